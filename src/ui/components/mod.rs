pub mod analysis_panel;
pub mod kpi_card;
pub mod result_card;
pub mod search_form;
pub mod status_panel;
pub mod toast;
