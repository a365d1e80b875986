use dioxus::{prelude::*, signals::Signal};
use tracing::{debug, error, info};

use crate::{
    config,
    domain::{Completion, PlatformPolicy, RequestTicket, ResultSession, SearchRequest},
    infra::search_api::SearchClient,
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::{SearchPage, SettingsPage},
        shell::Shell,
    },
    util::assets,
};

/// Shared handle to the aggregation client. A client that failed to build is kept
/// as its error so each submission can report it as a transport failure.
pub type ClientHandle = Result<SearchClient, String>;

const CLIENT_UNAVAILABLE: &str =
    "Der Suchdienst ist nicht konfiguriert. Suchen schlagen fehl, bis die Verbindung steht.";

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Search {},
    #[route("/settings")]
    Settings {},
}

#[component]
pub fn App() -> Element {
    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    let policy = use_signal(|| PlatformPolicy::from_required(config::get().require_platform));
    use_context_provider(|| policy);

    let client = use_context_provider(|| -> ClientHandle {
        let config = config::get();
        match SearchClient::from_config(config) {
            Ok(client) => {
                info!(endpoint = %client.endpoint(), "search client ready");
                Ok(client)
            }
            Err(err) => {
                error!("failed to initialise search client: {err}");
                Err(err.to_string())
            }
        }
    });
    let client_failed = client.is_err();
    use_effect(move || {
        if client_failed {
            push_toast(toasts, ToastKind::Error, CLIENT_UNAVAILABLE);
        }
    });

    rsx! {
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

/// Drives one submission after `begin`: awaits the service and hands the outcome
/// to the session, which drops it if the ticket has been superseded.
pub async fn run_search(
    client: ClientHandle,
    mut session: Signal<ResultSession>,
    ticket: RequestTicket,
    request: SearchRequest,
) -> Completion {
    debug!(seq = ticket.seq(), query = %request.query, "awaiting search response");
    let outcome = match &client {
        Ok(client) => client.search(&request).await.map_err(|err| err.to_string()),
        Err(reason) => Err(reason.clone()),
    };
    session.with_mut(|session| session.complete(ticket, outcome))
}

#[component]
pub fn Search() -> Element {
    rsx! { Shell { SearchPage {} } }
}

#[component]
pub fn Settings() -> Element {
    rsx! { Shell { SettingsPage {} } }
}
