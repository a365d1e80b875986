//! User-editable search intent and the request derived from it.

use thiserror::Error;

use super::{entities::SearchRequest, platform::PlatformId};

pub const DEFAULT_TARGET_MARGIN: &str = "25";

/// Whether a submission with zero enabled platforms is allowed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlatformPolicy {
    #[default]
    RequireAtLeastOne,
    AllowNone,
}

impl PlatformPolicy {
    pub fn from_required(required: bool) -> Self {
        if required {
            Self::RequireAtLeastOne
        } else {
            Self::AllowNone
        }
    }

    pub fn requires_platform(&self) -> bool {
        matches!(self, Self::RequireAtLeastOne)
    }
}

/// Local, user-correctable reasons a search cannot be submitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Bitte einen Suchbegriff eingeben.")]
    EmptyQuery,
    #[error("Bitte mindestens eine Plattform auswählen.")]
    NoPlatformSelected,
}

/// Raw form state. Numeric fields stay as typed text until a request is built.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchIntent {
    pub query: String,
    pub manual_target_price: String,
    pub target_margin_percent: String,
    enabled: [bool; PlatformId::ALL.len()],
}

impl Default for SearchIntent {
    fn default() -> Self {
        let mut enabled = [false; PlatformId::ALL.len()];
        enabled[PlatformId::Ebay.index()] = true;
        enabled[PlatformId::Kleinanzeigen.index()] = true;
        Self {
            query: String::new(),
            manual_target_price: String::new(),
            target_margin_percent: DEFAULT_TARGET_MARGIN.to_string(),
            enabled,
        }
    }
}

impl SearchIntent {
    pub fn is_enabled(&self, platform: PlatformId) -> bool {
        self.enabled[platform.index()]
    }

    pub fn toggle_platform(&mut self, platform: PlatformId) {
        let slot = &mut self.enabled[platform.index()];
        *slot = !*slot;
    }

    /// Enabled platforms in declaration order.
    pub fn enabled_platforms(&self) -> Vec<PlatformId> {
        PlatformId::ALL
            .into_iter()
            .filter(|platform| self.is_enabled(*platform))
            .collect()
    }

    pub fn validate(&self, policy: PlatformPolicy) -> Result<(), ValidationError> {
        if self.query.trim().is_empty() {
            return Err(ValidationError::EmptyQuery);
        }
        if policy.requires_platform() && !self.enabled.iter().any(|enabled| *enabled) {
            return Err(ValidationError::NoPlatformSelected);
        }
        Ok(())
    }

    pub fn build_request(&self) -> SearchRequest {
        SearchRequest {
            query: self.query.trim().to_string(),
            manual_vkp: parse_numeric_field(&self.manual_target_price),
            target_margin: parse_numeric_field(&self.target_margin_percent),
            platforms: self.enabled_platforms(),
        }
    }

    /// Validates, then builds the request. Used by the submit trigger.
    pub fn submit(&self, policy: PlatformPolicy) -> Result<SearchRequest, ValidationError> {
        self.validate(policy)?;
        Ok(self.build_request())
    }
}

/// Parses a free-form numeric field. Blank, non-numeric and non-finite input all
/// mean "unspecified".
pub fn parse_numeric_field(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
