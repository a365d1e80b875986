pub const APP_NAME: &str = "DealHawk";
pub const APP_TAGLINE: &str = "Finde in Sekunden die profitabelsten Deals";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_TAG: Option<&str> = option_env!("GIT_TAG");

pub fn version_label() -> String {
    if let Some(tag) = GIT_TAG {
        tag.to_string()
    } else {
        format!("v{}", APP_VERSION)
    }
}

/// `User-Agent` sent to the aggregation service.
pub fn user_agent() -> String {
    format!(
        "{}/{}",
        APP_NAME,
        version_label().trim_start_matches(|ch| ch == 'v' || ch == 'V')
    )
}
