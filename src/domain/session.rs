//! Lifecycle of one search session: submission, normalisation and the sorted view.

use std::{cmp::Ordering, fmt::Display};

use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, error, info, warn};

use super::{
    entities::{AnalysisSummary, ListingResult, SearchRequest},
    response::{NormalizedResponse, SearchResponse},
};

/// Shown for every transport or decode failure; the cause only goes to the log.
pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "Beim Abrufen der Ergebnisse ist ein Fehler aufgetreten.";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    Idle,
    Loading,
    Error(String),
    Empty,
    Loaded,
}

impl SessionStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionStatus::Loading)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Score,
    Margin,
}

impl SortKey {
    pub const ALL: [SortKey; 2] = [SortKey::Score, SortKey::Margin];

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Score => "Score",
            SortKey::Margin => "Marge",
        }
    }

    fn key_of(&self, result: &ListingResult) -> f64 {
        match self {
            SortKey::Score => result.score.unwrap_or(0.0),
            SortKey::Margin => result.margin.unwrap_or(0.0),
        }
    }
}

/// Handle for one issued request; only the latest ticket may complete the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestTicket {
    seq: u64,
}

impl RequestTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("a search is already in flight")]
    InFlight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The response belonged to a superseded request and was dropped.
    Discarded,
}

/// Indices of `results` sorted descending by `key`; equal keys keep their
/// incoming order.
fn sorted_indices(results: &[ListingResult], key: SortKey) -> Vec<usize> {
    let mut order: Vec<usize> = (0..results.len()).collect();
    // `sort_by` is stable, which the tie-break relies on.
    order.sort_by(|&a, &b| {
        let a_key = key.key_of(&results[a]);
        let b_key = key.key_of(&results[b]);
        b_key.partial_cmp(&a_key).unwrap_or(Ordering::Equal)
    });
    order
}

#[derive(Clone, Debug, PartialEq)]
struct InFlight {
    seq: u64,
    query: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultSession {
    status: SessionStatus,
    results: Vec<ListingResult>,
    analysis: Option<AnalysisSummary>,
    advisory: Option<String>,
    last_query: String,
    sort_key: SortKey,
    /// Indices into `results`, ordered by `sort_key`.
    view: Vec<usize>,
    has_ever_searched: bool,
    last_issued: u64,
    in_flight: Option<InFlight>,
    completed_at: Option<OffsetDateTime>,
}

impl ResultSession {
    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    pub fn analysis(&self) -> Option<&AnalysisSummary> {
        self.analysis.as_ref()
    }

    pub fn advisory(&self) -> Option<&str> {
        self.advisory.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            SessionStatus::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Query of the request currently awaiting its response.
    pub fn pending_query(&self) -> Option<&str> {
        self.in_flight.as_ref().map(|pending| pending.query.as_str())
    }

    pub fn last_query(&self) -> &str {
        &self.last_query
    }

    pub fn has_ever_searched(&self) -> bool {
        self.has_ever_searched
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn completed_at(&self) -> Option<OffsetDateTime> {
        self.completed_at
    }

    /// Results in display order. Reads the cached view; never re-sorts.
    pub fn sorted_results(&self) -> impl Iterator<Item = &ListingResult> + '_ {
        self.view.iter().map(|&idx| &self.results[idx])
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        if self.sort_key == key {
            return;
        }
        self.sort_key = key;
        self.refresh_view();
    }

    /// Moves to `Loading` and issues a ticket for `request`. Rejected while another
    /// request is in flight.
    pub fn begin(&mut self, request: &SearchRequest) -> Result<RequestTicket, SubmitRejected> {
        if self.in_flight.is_some() || self.status.is_loading() {
            warn!(query = %request.query, "search submitted while another is in flight; ignoring");
            return Err(SubmitRejected::InFlight);
        }

        self.last_issued += 1;
        let seq = self.last_issued;
        self.in_flight = Some(InFlight {
            seq,
            query: request.query.clone(),
        });
        self.has_ever_searched = true;
        self.advisory = None;
        self.status = SessionStatus::Loading;

        info!(
            seq,
            query = %request.query,
            platforms = request.platforms.len(),
            "search submitted"
        );
        Ok(RequestTicket { seq })
    }

    /// Applies the outcome of the request behind `ticket`. Outcomes for anything but
    /// the latest in-flight ticket are discarded without touching the session.
    pub fn complete<E: Display>(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<SearchResponse, E>,
    ) -> Completion {
        let pending = match self.in_flight.take() {
            Some(pending) if pending.seq == ticket.seq => pending,
            other => {
                self.in_flight = other;
                warn!(
                    seq = ticket.seq,
                    latest = self.last_issued,
                    "discarding response for superseded request"
                );
                return Completion::Discarded;
            }
        };

        match outcome {
            Ok(response) => self.apply(pending.query, response.normalize()),
            Err(err) => {
                error!(seq = ticket.seq, query = %pending.query, "search failed: {err}");
                self.results.clear();
                self.analysis = None;
                self.advisory = None;
                self.view.clear();
                self.status = SessionStatus::Error(TRANSPORT_FAILURE_MESSAGE.to_string());
            }
        }
        Completion::Applied
    }

    /// Returns to the initial state and invalidates any in-flight ticket.
    pub fn reset(&mut self) {
        let last_issued = self.last_issued;
        if self.in_flight.is_some() {
            debug!(seq = last_issued, "session reset with a request in flight");
        }
        *self = Self {
            last_issued,
            ..Self::default()
        };
    }

    fn apply(&mut self, query: String, normalized: NormalizedResponse) {
        let NormalizedResponse {
            results,
            analysis,
            message,
        } = normalized;

        debug!(
            results = results.len(),
            has_analysis = analysis.is_some(),
            has_message = message.is_some(),
            "normalised search response"
        );

        self.status = if results.is_empty() {
            SessionStatus::Empty
        } else {
            SessionStatus::Loaded
        };
        self.results = results;
        self.analysis = analysis;
        self.advisory = message;
        self.last_query = query;
        self.completed_at =
            Some(OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc()));
        self.refresh_view();

        info!(
            query = %self.last_query,
            results = self.results.len(),
            "search completed"
        );
    }

    fn refresh_view(&mut self) {
        self.view = sorted_indices(&self.results, self.sort_key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::platform::PlatformId;

    fn request(query: &str) -> SearchRequest {
        SearchRequest {
            query: query.to_string(),
            manual_vkp: None,
            target_margin: Some(25.0),
            platforms: vec![PlatformId::Ebay],
        }
    }

    fn listing(title: &str, url: &str, score: Option<f64>, margin: Option<f64>) -> ListingResult {
        ListingResult {
            title: title.to_string(),
            price: 10.0,
            platform: "ebay".to_string(),
            url: url.to_string(),
            image: None,
            location: None,
            condition: None,
            seller: None,
            margin,
            score,
            currency: None,
        }
    }

    fn response(value: serde_json::Value) -> SearchResponse {
        serde_json::from_value(value).unwrap()
    }

    fn sort_results(results: &[ListingResult], key: SortKey) -> Vec<ListingResult> {
        sorted_indices(results, key)
            .into_iter()
            .map(|idx| results[idx].clone())
            .collect()
    }

    fn titles(session: &ResultSession) -> Vec<String> {
        session
            .sorted_results()
            .map(|result| result.title.clone())
            .collect()
    }

    fn loaded_session() -> ResultSession {
        let mut session = ResultSession::default();
        let req = request("iPhone 14");
        let ticket = session.begin(&req).unwrap();
        session.complete(
            ticket,
            Ok::<_, String>(response(serde_json::json!({
                "results": [{"title": "A", "price": 100, "platform": "ebay", "url": "u1"}],
                "analysis": {"avg_price": 100.0},
            }))),
        );
        session
    }

    #[test]
    fn starts_idle_and_never_searched() {
        let session = ResultSession::default();
        assert_eq!(session.status(), &SessionStatus::Idle);
        assert!(!session.has_ever_searched());
        assert_eq!(session.sorted_results().count(), 0);
    }

    #[test]
    fn reference_scenario_orders_by_selected_key() {
        let mut session = ResultSession::default();
        let req = request("iPhone 14");
        let ticket = session.begin(&req).unwrap();
        let outcome = session.complete(
            ticket,
            Ok::<_, String>(response(serde_json::json!([
                {
                    "title": "A", "price": 100, "platform": "ebay", "url": "u1",
                    "score": 80, "margin": 10,
                },
                {
                    "title": "B", "price": 50, "platform": "vinted", "url": "u2",
                    "score": 90, "margin": 5,
                },
            ]))),
        );

        assert_eq!(outcome, Completion::Applied);
        assert_eq!(session.status(), &SessionStatus::Loaded);
        assert_eq!(titles(&session), ["B", "A"]);
        session.set_sort_key(SortKey::Margin);
        assert_eq!(titles(&session), ["A", "B"]);
        // canonical order is untouched
        assert_eq!(session.results[0].title, "A");
    }

    #[test]
    fn sort_is_stable_and_idempotent() {
        let results = vec![
            listing("first", "u1", Some(50.0), None),
            listing("missing", "u2", None, None),
            listing("second", "u3", Some(50.0), None),
            listing("zero", "u4", Some(0.0), None),
            listing("top", "u5", Some(99.0), None),
        ];
        let once = sort_results(&results, SortKey::Score);
        let titles: Vec<_> = once.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["top", "first", "second", "missing", "zero"]);
        assert_eq!(sort_results(&once, SortKey::Score), once);
    }

    #[test]
    fn switching_sort_key_keeps_the_multiset() {
        let mut session = ResultSession::default();
        let req = request("Sneaker");
        let ticket = session.begin(&req).unwrap();
        session.complete(
            ticket,
            Ok::<_, String>(SearchResponse::BareList(vec![
                listing("a", "u1", Some(10.0), Some(-4.0)),
                listing("b", "u2", Some(30.0), Some(12.0)),
                listing("c", "u3", None, Some(7.5)),
            ])),
        );

        let mut by_score: Vec<_> = session.sorted_results().map(|r| r.url.clone()).collect();
        session.set_sort_key(SortKey::Margin);
        let mut by_margin: Vec<_> = session.sorted_results().map(|r| r.url.clone()).collect();
        assert_eq!(by_margin, ["u2", "u3", "u1"]);
        by_score.sort();
        by_margin.sort();
        assert_eq!(by_score, by_margin);
    }

    #[test]
    fn empty_responses_are_empty_not_error() {
        for body in [
            serde_json::json!([]),
            serde_json::json!({ "results": [] }),
            serde_json::json!({}),
        ] {
            let mut session = ResultSession::default();
            let req = request("nothing");
            let ticket = session.begin(&req).unwrap();
            session.complete(ticket, Ok::<_, String>(response(body)));
            assert_eq!(session.status(), &SessionStatus::Empty);
            assert!(session.has_ever_searched());
        }
    }

    #[test]
    fn advisory_is_kept_apart_from_errors() {
        let mut session = ResultSession::default();
        let req = request("Kamera");
        let ticket = session.begin(&req).unwrap();
        session.complete(
            ticket,
            Ok::<_, String>(response(serde_json::json!({
                "results": [],
                "message": "rate limited",
            }))),
        );
        assert_eq!(session.status(), &SessionStatus::Empty);
        assert_eq!(session.advisory(), Some("rate limited"));
        assert_eq!(session.error_message(), None);
        assert!(session.results.is_empty());
    }

    #[test]
    fn advisory_does_not_clear_results() {
        let mut session = ResultSession::default();
        let req = request("Kamera");
        let ticket = session.begin(&req).unwrap();
        session.complete(
            ticket,
            Ok::<_, String>(response(serde_json::json!({
                "results": [{"title": "A", "price": 1, "platform": "ebay", "url": "u1"}],
                "message": "partial results: vinted timed out",
            }))),
        );
        assert_eq!(session.status(), &SessionStatus::Loaded);
        assert_eq!(session.results.len(), 1);
        assert!(session.advisory().is_some());
    }

    #[test]
    fn transport_failure_clears_previous_results() {
        let mut session = loaded_session();
        assert!(session.analysis().is_some());

        let req = request("iPhone 15");
        let ticket = session.begin(&req).unwrap();
        session.complete(ticket, Err::<SearchResponse, _>("connection refused"));

        assert_eq!(
            session.status(),
            &SessionStatus::Error(TRANSPORT_FAILURE_MESSAGE.to_string())
        );
        assert!(session.results.is_empty());
        assert_eq!(session.analysis(), None);
        assert_eq!(session.sorted_results().count(), 0);
        // last successful query stays as heading context
        assert_eq!(session.last_query(), "iPhone 14");
    }

    #[test]
    fn transport_failure_from_idle_is_error() {
        let mut session = ResultSession::default();
        let req = request("x");
        let ticket = session.begin(&req).unwrap();
        session.complete(ticket, Err::<SearchResponse, _>("HTTP 502"));
        assert!(matches!(session.status(), SessionStatus::Error(_)));
    }

    #[test]
    fn second_submit_while_loading_is_rejected() {
        let mut session = ResultSession::default();
        let req = request("x");
        let ticket = session.begin(&req).unwrap();
        assert_eq!(session.begin(&req), Err(SubmitRejected::InFlight));
        assert!(session.is_loading());

        session.complete(ticket, Ok::<_, String>(SearchResponse::BareList(vec![])));
        let next = session.begin(&req).unwrap();
        assert!(next.seq() > ticket.seq());
    }

    #[test]
    fn pending_query_tracks_the_request_in_flight() {
        let mut session = loaded_session();
        assert_eq!(session.pending_query(), None);

        let ticket = session.begin(&request("Pixel 8")).unwrap();
        assert_eq!(session.pending_query(), Some("Pixel 8"));
        // the previous heading stays until the new response lands
        assert_eq!(session.last_query(), "iPhone 14");

        session.complete(ticket, Ok::<_, String>(SearchResponse::BareList(vec![])));
        assert_eq!(session.pending_query(), None);
        assert_eq!(session.last_query(), "Pixel 8");

        session.begin(&request("Switch")).unwrap();
        session.reset();
        assert_eq!(session.pending_query(), None);
    }

    #[test]
    fn error_message_only_in_error_state() {
        let mut session = ResultSession::default();
        let ticket = session.begin(&request("x")).unwrap();
        assert_eq!(session.error_message(), None);
        session.complete(ticket, Err::<SearchResponse, _>("HTTP 500"));
        assert_eq!(session.error_message(), Some(TRANSPORT_FAILURE_MESSAGE));
    }

    #[test]
    fn late_response_after_reset_is_discarded() {
        let mut session = ResultSession::default();
        let req = request("x");
        let stale = session.begin(&req).unwrap();
        session.reset();
        let before = session.clone();

        let outcome = session.complete(
            stale,
            Ok::<_, String>(SearchResponse::BareList(vec![listing("late", "u1", None, None)])),
        );

        assert_eq!(outcome, Completion::Discarded);
        assert_eq!(session, before);
        assert_eq!(session.status(), &SessionStatus::Idle);
    }

    #[test]
    fn stale_ticket_cannot_overwrite_newer_session() {
        let mut session = ResultSession::default();
        let old_req = request("old");
        let stale = session.begin(&old_req).unwrap();
        session.reset();

        let new_req = request("new");
        let current = session.begin(&new_req).unwrap();
        assert!(current.seq() > stale.seq());

        let outcome = session.complete(stale, Err::<SearchResponse, _>("timeout"));
        assert_eq!(outcome, Completion::Discarded);
        assert!(session.is_loading());

        session.complete(
            current,
            Ok::<_, String>(SearchResponse::BareList(vec![listing("fresh", "u1", None, None)])),
        );
        assert_eq!(session.status(), &SessionStatus::Loaded);
        assert_eq!(session.last_query(), "new");
    }

    #[test]
    fn duplicate_completion_is_discarded() {
        let mut session = ResultSession::default();
        let req = request("x");
        let ticket = session.begin(&req).unwrap();
        session.complete(ticket, Ok::<_, String>(SearchResponse::BareList(vec![])));
        let outcome = session.complete(ticket, Err::<SearchResponse, _>("late"));
        assert_eq!(outcome, Completion::Discarded);
        assert_eq!(session.status(), &SessionStatus::Empty);
    }

    #[test]
    fn resubmission_clears_old_advisory() {
        let mut session = ResultSession::default();
        let req = request("x");
        let ticket = session.begin(&req).unwrap();
        session.complete(
            ticket,
            Ok::<_, String>(response(serde_json::json!({ "message": "slow down" }))),
        );
        assert!(session.advisory().is_some());
        session.begin(&req).unwrap();
        assert_eq!(session.advisory(), None);
    }
}
