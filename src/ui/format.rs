//! Display formatting for prices, margins and scores.

use time::{macros::format_description, OffsetDateTime};

pub const DEFAULT_CURRENCY: &str = "€";
pub const MISSING: &str = "–";

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|value| value.is_finite())
}

fn currency_or_default(currency: Option<&str>) -> &str {
    currency
        .map(str::trim)
        .filter(|currency| !currency.is_empty())
        .unwrap_or(DEFAULT_CURRENCY)
}

/// Whole-unit price used in the market analysis, e.g. `650 €`.
pub fn format_price(value: Option<f64>, currency: Option<&str>) -> String {
    match finite(value) {
        Some(value) => format!("{:.0} {}", value, currency_or_default(currency)),
        None => MISSING.to_string(),
    }
}

/// Amount with cents, used for listing prices and platform fees, e.g. `649.99 €`.
pub fn format_amount(value: f64, currency: Option<&str>) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    format!("{:.2} {}", value, currency_or_default(currency))
}

pub fn format_margin(value: Option<f64>) -> String {
    match finite(value) {
        Some(value) => format!("{:.1}%", value),
        None => MISSING.to_string(),
    }
}

/// Score rounded half away from zero; absent scores show as `0`.
pub fn format_score(value: Option<f64>) -> String {
    let score = finite(value).unwrap_or(0.0);
    format!("{:.0}", score.round())
}

pub fn format_count(value: f64) -> String {
    format!("{:.0}", value.round())
}

pub fn format_clock(at: OffsetDateTime) -> String {
    at.format(format_description!("[hour]:[minute]"))
        .unwrap_or_default()
}
