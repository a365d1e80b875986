use dioxus::prelude::*;

use crate::app::Route;
use crate::ui::theme;
use crate::util::version::{version_label, APP_NAME, APP_TAGLINE};

#[component]
pub fn Shell(children: Element) -> Element {
    let current_route = use_route::<Route>();
    let nav = use_navigator();
    let version = version_label();

    rsx! {
        div { class: "app",
            header { class: "app-header",
                div { class: "app-header__inner",
                    div { class: "brand",
                        span { class: "brand__mark", "🦅" }
                        div {
                            h1 { class: "brand__name", "{APP_NAME}" }
                            p { class: "brand__tagline", "{APP_TAGLINE}" }
                        }
                        span { class: "brand__version", "{version}" }
                    }

                    nav { class: "app-nav",
                        NavButton {
                            active: matches!(current_route, Route::Search {}),
                            onclick: move |_| { nav.push(Route::Search {}); },
                            label: "Suche",
                        }
                        NavButton {
                            active: matches!(current_route, Route::Settings {}),
                            onclick: move |_| { nav.push(Route::Settings {}); },
                            label: "Einstellungen",
                        }
                    }
                }
            }
            main { class: "app-main",
                {children}
            }
        }
    }
}

#[component]
fn NavButton(active: bool, onclick: EventHandler<()>, label: &'static str) -> Element {
    rsx! {
        button {
            class: theme::nav_button(active),
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}
