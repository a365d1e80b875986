//! Accepted response shapes from the aggregation service.

use serde::Deserialize;

use super::entities::{AnalysisSummary, ListingResult};

/// Raw response body. The service answers either with a bare listing array or an
/// object envelope; the shape is resolved once here and never inspected again.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SearchResponse {
    BareList(Vec<ListingResult>),
    Envelope(SearchEnvelope),
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SearchEnvelope {
    #[serde(default)]
    pub results: Option<Vec<ListingResult>>,
    #[serde(default)]
    pub analysis: Option<AnalysisSummary>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response flattened into the session's model.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NormalizedResponse {
    pub results: Vec<ListingResult>,
    pub analysis: Option<AnalysisSummary>,
    /// Non-fatal advisory from the service.
    pub message: Option<String>,
}

impl SearchResponse {
    pub fn normalize(self) -> NormalizedResponse {
        match self {
            SearchResponse::BareList(results) => NormalizedResponse {
                results,
                analysis: None,
                message: None,
            },
            SearchResponse::Envelope(envelope) => NormalizedResponse {
                results: envelope.results.unwrap_or_default(),
                analysis: envelope.analysis,
                message: envelope
                    .message
                    .filter(|message| !message.trim().is_empty()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(value: serde_json::Value) -> NormalizedResponse {
        serde_json::from_value::<SearchResponse>(value)
            .unwrap()
            .normalize()
    }

    #[test]
    fn bare_array_has_no_analysis_or_message() {
        let normalized = parse(serde_json::json!([
            {"title": "A", "price": 100, "platform": "ebay", "url": "u1"}
        ]));
        assert_eq!(normalized.results.len(), 1);
        assert_eq!(normalized.analysis, None);
        assert_eq!(normalized.message, None);
    }

    #[test]
    fn envelope_without_results_defaults_to_empty() {
        let normalized = parse(serde_json::json!({
            "analysis": {"avg_price": 210.0},
            "message": "rate limited",
            "took_ms": 1200,
        }));
        assert!(normalized.results.is_empty());
        assert_eq!(
            normalized.analysis.and_then(|analysis| analysis.avg_price),
            Some(210.0)
        );
        assert_eq!(normalized.message.as_deref(), Some("rate limited"));
    }

    #[test]
    fn null_members_mean_absent() {
        let normalized = parse(serde_json::json!({
            "results": null,
            "analysis": null,
            "message": null,
        }));
        assert_eq!(normalized, NormalizedResponse::default());
    }

    #[test]
    fn blank_message_is_dropped() {
        let normalized = parse(serde_json::json!({ "results": [], "message": "  " }));
        assert_eq!(normalized.message, None);
    }

    #[test]
    fn scalar_bodies_are_rejected() {
        assert!(serde_json::from_str::<SearchResponse>("\"oops\"").is_err());
        assert!(serde_json::from_str::<SearchResponse>("42").is_err());
        assert!(serde_json::from_str::<SearchResponse>("[{\"title\": 1}]").is_err());
    }
}
