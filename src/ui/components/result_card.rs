use dioxus::prelude::*;

use crate::{
    domain::ListingResult,
    ui::{format, theme},
};

#[component]
pub fn ResultCard(result: ListingResult) -> Element {
    let platform = result.known_platform();
    let badge_class = theme::platform_badge(platform);
    let platform_label = platform
        .map(|platform| platform.label().to_string())
        .unwrap_or_else(|| result.platform.clone());

    let currency = result.currency.as_deref();
    let price = format::format_amount(result.price, currency);
    let margin = format::format_margin(result.margin);
    let margin_class = theme::margin_value(result.margin);
    let score = format::format_score(result.score);
    let score_width = result.score_percent();
    let score_width_label = format!("{score_width:.0}%");

    let facts = [
        ("Standort", result.location.clone()),
        ("Zustand", result.condition.clone()),
        ("Verkäufer", result.seller.clone()),
    ]
    .into_iter()
    .filter_map(|(label, value)| {
        value
            .filter(|value| !value.trim().is_empty())
            .map(|value| (label, value))
    })
    .collect::<Vec<_>>();

    rsx! {
        article {
            class: "result-card",
            if let Some(image) = result.image.clone().filter(|src| !src.trim().is_empty()) {
                div { class: "result-card__image",
                    img { src: "{image}", alt: "{result.title}" }
                }
            }

            div { class: "result-card__header",
                div {
                    p { class: "result-card__kicker", "DealHawk Empfehlung" }
                    h3 { class: "result-card__title", "{result.title}" }
                }
                span { class: "{badge_class}", "{platform_label}" }
            }

            dl { class: "metrics",
                div { class: "metric",
                    dt { class: "metric__label", "Preis" }
                    dd { class: "metric__value", "{price}" }
                }
                div { class: "metric",
                    dt { class: "metric__label", "Marge" }
                    dd { class: "{margin_class}", "{margin}" }
                }
                div { class: "metric",
                    dt { class: "metric__label", "Score" }
                    dd { class: "metric__value metric__value--score", "{score}" }
                }
            }

            div { class: "score-bar",
                div { class: "score-bar__legend",
                    span { "Deal Score" }
                    span { "{score_width_label}" }
                }
                div { class: "score-bar__track",
                    div { class: "score-bar__fill", style: "width: {score_width}%;" }
                }
            }

            if !facts.is_empty() {
                ul { class: "facts",
                    for (label, value) in facts {
                        li { class: "fact",
                            p { class: "fact__label", "{label}" }
                            p { class: "fact__value", "{value}" }
                        }
                    }
                }
            }

            a {
                class: "listing-link",
                href: "{result.url}",
                target: "_blank",
                rel: "noopener noreferrer",
                "Listing öffnen ↗"
            }
        }
    }
}
