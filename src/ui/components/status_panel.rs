use dioxus::prelude::*;

#[component]
pub fn LoadingPanel(query: String) -> Element {
    rsx! {
        div { class: "panel status status--loading",
            div { class: "spinner" }
            p { class: "status__title", "Suche läuft..." }
            p { class: "status__body", "Wir durchsuchen die Plattformen nach \"{query}\"." }
        }
    }
}

#[component]
pub fn ErrorBanner(message: String) -> Element {
    rsx! {
        div { class: "banner banner--error", role: "alert",
            span { class: "banner__icon", "⛔" }
            p { "{message}" }
        }
    }
}

/// Non-fatal note from the service, shown next to whatever results came back.
#[component]
pub fn AdvisoryBanner(message: String) -> Element {
    rsx! {
        div { class: "banner banner--advisory", role: "status",
            span { class: "banner__icon", "ℹ️" }
            p { "{message}" }
        }
    }
}

#[component]
pub fn EmptyState(has_ever_searched: bool) -> Element {
    let (title, body) = if has_ever_searched {
        (
            "Keine Treffer",
            "Für diese Suche wurden keine passenden Angebote gefunden. \
             Versuche einen anderen Suchbegriff oder weitere Plattformen.",
        )
    } else {
        (
            "Bereit für die Jagd",
            "Gib einen Suchbegriff ein und wähle die Plattformen, \
             auf denen DealHawk nach Angeboten suchen soll.",
        )
    };

    rsx! {
        div { class: "panel status status--empty",
            p { class: "status__title", "{title}" }
            p { class: "status__body", "{body}" }
        }
    }
}
