use dioxus::prelude::*;

use crate::{
    domain::AnalysisSummary,
    ui::{components::kpi_card::KpiCard, format},
};

const MANUAL_MARGIN_HINT: &str = "bezogen auf deinen Verkaufspreis";

#[derive(Clone, Debug, PartialEq)]
pub struct StatView {
    pub label: &'static str,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FeeView {
    /// Render key; platforms may repeat within one breakdown.
    pub key: String,
    pub platform: String,
    pub fee: String,
    pub net: Option<String>,
}

/// Stat tiles with a computable value, in display order.
pub fn stat_views(analysis: &AnalysisSummary) -> Vec<StatView> {
    let currency = analysis.currency.as_deref();
    [
        ("Durchschnitt", analysis.avg_price),
        ("Median", analysis.median_price),
        ("Günstigster", analysis.lowest_price()),
        ("Teuerster", analysis.highest_observed_price()),
        ("Weighted Avg", analysis.weighted_average),
        ("Ziel VKP", analysis.target_margin_vkp),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_some_and(f64::is_finite))
    .map(|(label, value)| StatView {
        label,
        value: format::format_price(value, currency),
    })
    .collect()
}

pub fn fee_views(analysis: &AnalysisSummary) -> Vec<FeeView> {
    analysis
        .fees()
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let currency = entry.currency.as_deref().or(analysis.currency.as_deref());
            FeeView {
                key: format!("{idx}-{}", entry.platform),
                platform: entry.platform.clone(),
                fee: format::format_amount(entry.fee, currency),
                net: entry
                    .net_proceeds
                    .filter(|net| net.is_finite())
                    .map(|net| format::format_price(Some(net), analysis.currency.as_deref())),
            }
        })
        .collect()
}

#[component]
pub fn AnalysisPanel(analysis: AnalysisSummary, query: String) -> Element {
    let currency = analysis.currency.clone();
    let heading = if query.trim().is_empty() {
        "Letzte Suche".to_string()
    } else {
        query.clone()
    };
    let total = analysis
        .total_results
        .filter(|total| total.is_finite())
        .map(format::format_count);
    let suggested = analysis
        .suggested_vkp
        .filter(|value| value.is_finite())
        .map(|value| format::format_price(Some(value), currency.as_deref()));
    let stats = stat_views(&analysis);
    let fees = fee_views(&analysis);
    let manual_margin = analysis
        .manual_vkp_margin
        .filter(|value| value.is_finite())
        .map(|value| format::format_margin(Some(value)));
    let manual_net = analysis
        .manual_vkp_net
        .filter(|value| value.is_finite())
        .map(|value| format::format_price(Some(value), currency.as_deref()));
    let has_manual = manual_margin.is_some() || manual_net.is_some();

    rsx! {
        section {
            class: "panel analysis",
            div { class: "analysis__header",
                div {
                    p { class: "section-label", "Marktanalyse" }
                    h2 { class: "analysis__title", "{heading}" }
                    if let Some(total) = total {
                        p { class: "analysis__meta", "{total} Treffer über alle Plattformen" }
                    }
                }
                if let Some(suggested) = suggested {
                    div { class: "suggested",
                        p { class: "suggested__label", "Empfohlener VKP" }
                        p { class: "suggested__value", "{suggested}" }
                    }
                }
            }

            if !stats.is_empty() {
                div { class: "stat-grid",
                    for stat in stats {
                        KpiCard {
                            key: "{stat.label}",
                            title: stat.label.to_string(),
                            value: stat.value,
                        }
                    }
                }
            }

            if !fees.is_empty() {
                div { class: "fees",
                    p { class: "section-label", "Gebührenabschätzung" }
                    div { class: "fee-grid",
                        for entry in fees {
                            div { key: "{entry.key}", class: "fee-card",
                                div { class: "fee-card__row",
                                    span { class: "fee-card__platform", "{entry.platform}" }
                                    span { class: "fee-card__fee", "Gebühren: {entry.fee}" }
                                }
                                if let Some(net) = entry.net {
                                    p { class: "fee-card__net", "Nettoerlös: {net}" }
                                }
                            }
                        }
                    }
                }
            }

            if has_manual {
                div { class: "highlight-grid",
                    if let Some(margin) = manual_margin {
                        div { class: "highlight highlight--margin",
                            KpiCard {
                                title: "Marge bei manuellem VKP".to_string(),
                                value: margin,
                                description: Some(MANUAL_MARGIN_HINT.to_string()),
                            }
                        }
                    }
                    if let Some(net) = manual_net {
                        div { class: "highlight highlight--net",
                            KpiCard { title: "Nettoerlös".to_string(), value: net }
                        }
                    }
                }
            }
        }
    }
}
