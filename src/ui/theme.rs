//! Class helpers so pages and components agree on styling.

use crate::domain::PlatformId;

// ============================================
// BUTTON STYLES
// ============================================

pub fn nav_button(active: bool) -> &'static str {
    if active {
        "nav-button nav-button--active"
    } else {
        "nav-button"
    }
}

pub fn sort_button(active: bool) -> &'static str {
    if active {
        "sort-button sort-button--active"
    } else {
        "sort-button"
    }
}

pub fn platform_toggle(active: bool) -> &'static str {
    if active {
        "platform-toggle platform-toggle--active"
    } else {
        "platform-toggle"
    }
}

// ============================================
// PLATFORM / RESULT STYLES
// ============================================

/// Badge for a listing's marketplace; unknown marketplaces get a neutral badge.
pub fn platform_badge(platform: Option<PlatformId>) -> &'static str {
    match platform {
        Some(PlatformId::Ebay) => "badge badge--ebay",
        Some(PlatformId::Kleinanzeigen) => "badge badge--kleinanzeigen",
        Some(PlatformId::Vinted) => "badge badge--vinted",
        Some(PlatformId::Amazon) => "badge badge--amazon",
        None => "badge badge--unknown",
    }
}

/// Colour for a margin value: profit, loss or not available.
pub fn margin_value(margin: Option<f64>) -> &'static str {
    match margin.filter(|value| value.is_finite()) {
        Some(value) if value >= 0.0 => "metric__value metric__value--profit",
        Some(_) => "metric__value metric__value--loss",
        None => "metric__value metric__value--neutral",
    }
}
