use serde::{Deserialize, Serialize};

use super::platform::PlatformId;

/// Payload sent to the aggregation service, built once per submission.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub manual_vkp: Option<f64>,
    pub target_margin: Option<f64>,
    pub platforms: Vec<PlatformId>,
}

/// One listing found by the aggregation service. The `url` identifies the
/// listing within a result set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListingResult {
    pub title: String,
    pub price: f64,
    /// Free-form marketplace name as reported by the service.
    pub platform: String,
    pub url: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub seller: Option<String>,
    /// Signed margin in percent.
    #[serde(default)]
    pub margin: Option<f64>,
    /// Ranking signal, nominally 0-100.
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
}

impl ListingResult {
    pub fn known_platform(&self) -> Option<PlatformId> {
        PlatformId::match_loose(&self.platform)
    }

    /// Score clamped to the 0-100 display range; absent scores count as zero.
    pub fn score_percent(&self) -> f64 {
        self.score
            .filter(|score| score.is_finite())
            .map(|score| score.clamp(0.0, 100.0))
            .unwrap_or(0.0)
    }
}

/// Fee and net proceeds estimate for selling on one platform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlatformFee {
    pub platform: String,
    pub fee: f64,
    #[serde(default)]
    pub net_proceeds: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Market analysis accompanying a result set. Every field is optional; a missing
/// value means the service could not compute it for this query.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    #[serde(default)]
    pub avg_price: Option<f64>,
    #[serde(default)]
    pub median_price: Option<f64>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub suggested_vkp: Option<f64>,
    #[serde(default)]
    pub weighted_average: Option<f64>,
    #[serde(default)]
    pub target_margin_vkp: Option<f64>,
    #[serde(default)]
    pub manual_vkp_margin: Option<f64>,
    #[serde(default)]
    pub manual_vkp_net: Option<f64>,
    #[serde(default)]
    pub cheapest_price: Option<f64>,
    #[serde(default)]
    pub highest_price: Option<f64>,
    #[serde(default)]
    pub total_results: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub platform_fees: Option<Vec<PlatformFee>>,
}

impl AnalysisSummary {
    /// Lowest observed price, falling back to the service's `cheapest_price`.
    pub fn lowest_price(&self) -> Option<f64> {
        self.min_price.or(self.cheapest_price)
    }

    /// Highest observed price, falling back to the service's `highest_price`.
    pub fn highest_observed_price(&self) -> Option<f64> {
        self.max_price.or(self.highest_price)
    }

    pub fn fees(&self) -> &[PlatformFee] {
        self.platform_fees.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serialises_unspecified_numbers_as_null() {
        let request = SearchRequest {
            query: "Kamera".into(),
            manual_vkp: None,
            target_margin: Some(25.0),
            platforms: vec![PlatformId::Vinted],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "query": "Kamera",
                "manual_vkp": null,
                "target_margin": 25.0,
                "platforms": ["vinted"],
            })
        );
    }

    #[test]
    fn listing_ignores_unknown_fields_and_accepts_nulls() {
        let listing: ListingResult = serde_json::from_value(serde_json::json!({
            "title": "Sneaker",
            "price": 80,
            "platform": "Vinted",
            "url": "https://example.test/1",
            "image": null,
            "score": 71.5,
            "shipping": {"cost": 4.99},
        }))
        .unwrap();

        assert_eq!(listing.image, None);
        assert_eq!(listing.margin, None);
        assert_eq!(listing.score, Some(71.5));
        assert_eq!(listing.known_platform(), Some(PlatformId::Vinted));
    }

    #[test]
    fn score_percent_is_clamped() {
        let mut listing: ListingResult = serde_json::from_value(serde_json::json!({
            "title": "A", "price": 1, "platform": "ebay", "url": "u",
        }))
        .unwrap();
        assert_eq!(listing.score_percent(), 0.0);
        listing.score = Some(140.0);
        assert_eq!(listing.score_percent(), 100.0);
        listing.score = Some(-3.0);
        assert_eq!(listing.score_percent(), 0.0);
    }

    #[test]
    fn analysis_price_bounds_fall_back_to_alternate_fields() {
        let analysis: AnalysisSummary = serde_json::from_value(serde_json::json!({
            "cheapest_price": 120.0,
            "highest_price": 480.0,
            "max_price": 450.0,
            "platform_fees": [{"platform": "ebay", "fee": 12.5}],
        }))
        .unwrap();

        assert_eq!(analysis.lowest_price(), Some(120.0));
        assert_eq!(analysis.highest_observed_price(), Some(450.0));
        assert_eq!(analysis.fees().len(), 1);
        assert_eq!(analysis.fees()[0].net_proceeds, None);
    }

    #[test]
    fn analysis_tolerates_null_fee_list() {
        let analysis: AnalysisSummary =
            serde_json::from_value(serde_json::json!({ "platform_fees": null })).unwrap();
        assert!(analysis.fees().is_empty());
    }
}
