//! Marketplaces the aggregation service can search.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical marketplace identifier. Serialises to the lowercase wire token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformId {
    Ebay,
    Kleinanzeigen,
    Vinted,
    Amazon,
}

impl PlatformId {
    /// Declaration order; requests always list platforms in this order.
    pub const ALL: [PlatformId; 4] = [
        PlatformId::Ebay,
        PlatformId::Kleinanzeigen,
        PlatformId::Vinted,
        PlatformId::Amazon,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            PlatformId::Ebay => "ebay",
            PlatformId::Kleinanzeigen => "kleinanzeigen",
            PlatformId::Vinted => "vinted",
            PlatformId::Amazon => "amazon",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlatformId::Ebay => "eBay",
            PlatformId::Kleinanzeigen => "Kleinanzeigen",
            PlatformId::Vinted => "Vinted",
            PlatformId::Amazon => "Amazon",
        }
    }

    /// Position in [`PlatformId::ALL`].
    pub fn index(&self) -> usize {
        match self {
            PlatformId::Ebay => 0,
            PlatformId::Kleinanzeigen => 1,
            PlatformId::Vinted => 2,
            PlatformId::Amazon => 3,
        }
    }

    /// Matches free-form platform text from a listing (case-insensitive, surrounding
    /// whitespace ignored). Unknown marketplaces yield `None`.
    pub fn match_loose(raw: &str) -> Option<PlatformId> {
        let needle = raw.trim();
        Self::ALL
            .into_iter()
            .find(|platform| platform.token().eq_ignore_ascii_case(needle))
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
