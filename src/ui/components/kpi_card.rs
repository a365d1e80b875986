use dioxus::prelude::*;

/// Single figure tile in the market analysis.
#[component]
pub fn KpiCard(title: String, value: String, description: Option<String>) -> Element {
    rsx! {
        div {
            class: "stat-tile",
            p { class: "stat-tile__label", "{title}" }
            p { class: "stat-tile__value", "{value}" }
            if let Some(desc) = description {
                p { class: "stat-tile__hint", "{desc}" }
            }
        }
    }
}
