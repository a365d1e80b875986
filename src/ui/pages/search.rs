use dioxus::prelude::*;
use tracing::debug;

use crate::{
    app::{run_search, ClientHandle},
    domain::{
        AnalysisSummary, ListingResult, PlatformPolicy, ResultSession, SearchIntent,
        SessionStatus, SortKey,
    },
    ui::{
        components::{
            analysis_panel::AnalysisPanel,
            result_card::ResultCard,
            search_form::SearchForm,
            status_panel::{AdvisoryBanner, EmptyState, ErrorBanner, LoadingPanel},
            toast::{push_toast, ToastKind, ToastMessage},
        },
        format,
    },
};

/// Result count with the time of the last applied response, e.g. `3 Angebote · 14:05`.
pub fn results_caption(count: usize, updated: Option<&str>) -> String {
    let noun = if count == 1 { "Angebot" } else { "Angebote" };
    match updated {
        Some(clock) => format!("{count} {noun} · aktualisiert {clock}"),
        None => format!("{count} {noun}"),
    }
}

/// Render key for a result card. Listing URLs are not guaranteed unique, so the
/// display position is part of the key.
pub fn result_key(position: usize, result: &ListingResult) -> String {
    format!("{position}-{}", result.url)
}

struct SessionView {
    status: SessionStatus,
    loading: bool,
    pending_query: String,
    error: Option<String>,
    results: Vec<ListingResult>,
    analysis: Option<AnalysisSummary>,
    advisory: Option<String>,
    last_query: String,
    sort_key: SortKey,
    has_ever_searched: bool,
    updated: Option<String>,
}

impl SessionView {
    fn capture(session: &ResultSession) -> Self {
        Self {
            status: session.status().clone(),
            loading: session.is_loading(),
            pending_query: session.pending_query().unwrap_or_default().to_string(),
            error: session.error_message().map(str::to_string),
            results: session.sorted_results().cloned().collect(),
            analysis: session.analysis().cloned(),
            advisory: session.advisory().map(str::to_string),
            last_query: session.last_query().to_string(),
            sort_key: session.sort_key(),
            has_ever_searched: session.has_ever_searched(),
            updated: session.completed_at().map(format::format_clock),
        }
    }
}

#[component]
pub fn SearchPage() -> Element {
    let policy = use_context::<Signal<PlatformPolicy>>();
    let client = use_context::<ClientHandle>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    // Both live as long as the page; leaving the route drops the session and
    // cancels any search task spawned from here.
    let intent = use_signal(SearchIntent::default);
    let mut session = use_signal(ResultSession::default);

    let view = session.with(SessionView::capture);
    let loading = view.loading;

    let on_submit = move |_: ()| {
        let request = match intent.read().submit(policy()) {
            Ok(request) => request,
            Err(err) => {
                debug!("search blocked: {err}");
                return;
            }
        };
        let Ok(ticket) = session.with_mut(|session| session.begin(&request)) else {
            return;
        };
        let client = client.clone();
        spawn(async move {
            run_search(client, session, ticket, request).await;
        });
    };

    let on_sort = move |key: SortKey| session.with_mut(|session| session.set_sort_key(key));
    let on_reset = move |_| {
        session.with_mut(ResultSession::reset);
        push_toast(toasts, ToastKind::Info, "Suche zurückgesetzt.");
    };

    let caption = results_caption(view.results.len(), view.updated.as_deref());
    let advisory = view.advisory.clone();
    let analysis = view.analysis.clone();
    let cards: Vec<(String, ListingResult)> = view
        .results
        .into_iter()
        .enumerate()
        .map(|(position, result)| (result_key(position, &result), result))
        .collect();

    rsx! {
        div { class: "page search-page",
            SearchForm {
                intent,
                policy: policy(),
                loading,
                sort_key: view.sort_key,
                on_submit,
                on_sort,
            }

            if view.has_ever_searched {
                div { class: "toolbar",
                    button { class: "ghost-button", onclick: on_reset, "Zurücksetzen" }
                }
            }

            match view.status {
                SessionStatus::Idle => rsx! {
                    EmptyState { has_ever_searched: false }
                },
                SessionStatus::Loading => rsx! {
                    LoadingPanel { query: view.pending_query.clone() }
                },
                SessionStatus::Error(_) => rsx! {
                    if let Some(message) = view.error.clone() {
                        ErrorBanner { message }
                    }
                },
                SessionStatus::Empty => rsx! {
                    if let Some(message) = advisory {
                        AdvisoryBanner { message }
                    }
                    if let Some(analysis) = analysis {
                        AnalysisPanel { analysis, query: view.last_query.clone() }
                    }
                    EmptyState { has_ever_searched: true }
                },
                SessionStatus::Loaded => rsx! {
                    if let Some(message) = advisory {
                        AdvisoryBanner { message }
                    }
                    if let Some(analysis) = analysis {
                        AnalysisPanel { analysis, query: view.last_query.clone() }
                    }
                    section { class: "results",
                        div { class: "results__header",
                            h2 { class: "results__title", "Top Deals" }
                            p { class: "results__caption", "{caption}" }
                        }
                        div { class: "result-grid",
                            for (card_key, result) in cards {
                                ResultCard { key: "{card_key}", result }
                            }
                        }
                    }
                },
            }
        }
    }
}
