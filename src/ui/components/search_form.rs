use dioxus::prelude::*;

use crate::{
    domain::{PlatformId, PlatformPolicy, SearchIntent, SortKey, ValidationError},
    ui::theme,
};

/// Label of the submit button for the current loading state.
pub fn submit_label(loading: bool) -> &'static str {
    if loading {
        "Wird geladen..."
    } else {
        "Deals finden"
    }
}

/// Submission is blocked while loading or while the intent does not validate.
pub fn can_submit(intent: &SearchIntent, policy: PlatformPolicy, loading: bool) -> bool {
    !loading && intent.validate(policy).is_ok()
}

#[component]
pub fn SearchForm(
    intent: Signal<SearchIntent>,
    policy: PlatformPolicy,
    loading: bool,
    sort_key: SortKey,
    on_submit: EventHandler<()>,
    on_sort: EventHandler<SortKey>,
) -> Element {
    let mut intent = intent;
    let snapshot = intent();
    let submit_enabled = can_submit(&snapshot, policy, loading);
    let label = submit_label(loading);
    // Only the platform hint is shown inline; an empty query is self-evident.
    let hint = match snapshot.validate(policy) {
        Err(err @ ValidationError::NoPlatformSelected) => Some(err.to_string()),
        _ => None,
    };

    rsx! {
        form {
            class: "panel search-form",
            onsubmit: move |evt| {
                evt.prevent_default();
                on_submit.call(());
            },
            div { class: "search-form__row",
                div { class: "field field--wide",
                    label { class: "field__label", r#for: "query", "Suchbegriff" }
                    input {
                        id: "query",
                        class: "field__input",
                        placeholder: "z. B. iPhone 14 128GB",
                        value: "{snapshot.query}",
                        oninput: move |evt| intent.with_mut(|intent| intent.query = evt.value()),
                    }
                }
                div { class: "field",
                    label { class: "field__label", r#for: "manual-vkp", "Eigener VKP" }
                    input {
                        id: "manual-vkp",
                        class: "field__input",
                        inputmode: "decimal",
                        placeholder: "optional",
                        value: "{snapshot.manual_target_price}",
                        oninput: move |evt| {
                            intent.with_mut(|intent| intent.manual_target_price = evt.value())
                        },
                    }
                }
                div { class: "field",
                    label { class: "field__label", r#for: "target-margin", "Zielmarge %" }
                    input {
                        id: "target-margin",
                        class: "field__input",
                        inputmode: "decimal",
                        value: "{snapshot.target_margin_percent}",
                        oninput: move |evt| {
                            intent.with_mut(|intent| intent.target_margin_percent = evt.value())
                        },
                    }
                }
            }

            div { class: "search-form__row search-form__row--controls",
                div { class: "toggle-group",
                    span { class: "section-label", "Plattformen" }
                    for platform in PlatformId::ALL {
                        PlatformToggle {
                            key: "{platform.token()}",
                            platform,
                            active: snapshot.is_enabled(platform),
                            on_toggle: move |platform: PlatformId| {
                                intent.with_mut(|intent| intent.toggle_platform(platform))
                            },
                        }
                    }
                }
                div { class: "toggle-group",
                    span { class: "section-label", "Sortierung" }
                    for key in SortKey::ALL {
                        button {
                            key: "{key.label()}",
                            r#type: "button",
                            class: theme::sort_button(key == sort_key),
                            onclick: move |_| on_sort.call(key),
                            "{key.label()}"
                        }
                    }
                }
                button {
                    r#type: "submit",
                    class: "submit-button",
                    disabled: !submit_enabled,
                    "{label}"
                }
            }

            if let Some(hint) = hint {
                p { class: "search-form__hint", "{hint}" }
            }
        }
    }
}

#[component]
fn PlatformToggle(
    platform: PlatformId,
    active: bool,
    on_toggle: EventHandler<PlatformId>,
) -> Element {
    rsx! {
        button {
            r#type: "button",
            class: theme::platform_toggle(active),
            "aria-pressed": "{active}",
            onclick: move |_| on_toggle.call(platform),
            "{platform.label()}"
        }
    }
}
