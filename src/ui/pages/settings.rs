use dioxus::prelude::*;
use tracing::info;

use crate::{
    config,
    domain::PlatformPolicy,
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        theme,
    },
    util::version::{version_label, APP_NAME},
};

pub fn policy_description(policy: PlatformPolicy) -> &'static str {
    match policy {
        PlatformPolicy::RequireAtLeastOne => {
            "Suchen ohne ausgewählte Plattform werden blockiert."
        }
        PlatformPolicy::AllowNone => {
            "Suchen ohne ausgewählte Plattform werden an den Dienst gesendet."
        }
    }
}

/// Confirmation shown after switching the policy; relaxing it is flagged as a warning.
pub fn policy_toast(policy: PlatformPolicy) -> (ToastKind, &'static str) {
    match policy {
        PlatformPolicy::RequireAtLeastOne => (
            ToastKind::Success,
            "Mindestens eine Plattform ist jetzt Pflicht.",
        ),
        PlatformPolicy::AllowNone => (
            ToastKind::Warning,
            "Suchen ohne Plattformauswahl sind jetzt erlaubt.",
        ),
    }
}

#[component]
pub fn SettingsPage() -> Element {
    let mut policy = use_context::<Signal<PlatformPolicy>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let config = config::get();
    let endpoint = config.api_url.clone();
    let timeout = format!("{} s", config.request_timeout.as_secs());
    let version = version_label();

    let current = policy();
    let strict = current.requires_platform();
    let description = policy_description(current);

    let on_toggle_policy = move |_| {
        let next = PlatformPolicy::from_required(!policy().requires_platform());
        policy.set(next);
        info!(?next, "platform policy changed");
        let (kind, message) = policy_toast(next);
        push_toast(toasts, kind, message);
    };

    rsx! {
        div { class: "page settings-page",
            section { class: "panel",
                h2 { class: "section-label", "Suche" }
                div { class: "setting",
                    div {
                        p { class: "setting__title", "Plattformauswahl erzwingen" }
                        p { class: "setting__body", "{description}" }
                    }
                    button {
                        class: theme::platform_toggle(strict),
                        "aria-pressed": "{strict}",
                        onclick: on_toggle_policy,
                        if strict { "Aktiv" } else { "Aus" }
                    }
                }
            }

            section { class: "panel",
                h2 { class: "section-label", "Verbindung" }
                dl { class: "settings-list",
                    div { class: "settings-list__row",
                        dt { "Endpunkt" }
                        dd { code { "{endpoint}" } }
                    }
                    div { class: "settings-list__row",
                        dt { "Timeout" }
                        dd { "{timeout}" }
                    }
                }
                p { class: "setting__body",
                    "Änderbar über DEALHAWK_API_URL und DEALHAWK_REQUEST_TIMEOUT_SECS "
                    "(auch in einer .env Datei)."
                }
            }

            section { class: "panel settings-about",
                h2 { class: "section-label", "Über" }
                p { "{APP_NAME} {version}" }
            }
        }
    }
}
