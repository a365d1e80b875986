pub mod search;
pub mod settings;

pub use search::SearchPage;
pub use settings::SettingsPage;
