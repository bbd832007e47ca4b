use crate::error::{Result, ResultExt};
use crate::query::{join_metrics, InsightsOptions, Params, POST_METRICS};
use crate::rest::GraphClient;
use crate::types::InsightsResponse;

/// Page metrics known to this client.
///
/// Static catalog; the API's metric metadata endpoint is not queried.
pub const AVAILABLE_PAGE_METRICS: &[&str] = &[
    "page_fans",
    "page_fan_adds",
    "page_fan_removes",
    "page_fan_adds_by_likes_source",
    "page_fan_adds_by_unlikes_source",
    "page_views_total",
    "page_views_logged_in_total",
    "page_views_logged_in_unique",
    "page_views_external_referrals",
    "page_impressions",
    "page_impressions_unique",
    "page_impressions_paid",
    "page_impressions_paid_unique",
    "page_impressions_organic",
    "page_impressions_organic_unique",
    "page_impressions_viral",
    "page_impressions_viral_unique",
    "page_posts_impressions",
    "page_posts_impressions_unique",
    "page_posts_impressions_paid",
    "page_posts_impressions_paid_unique",
    "page_posts_impressions_organic",
    "page_posts_impressions_organic_unique",
    "page_posts_impressions_viral",
    "page_posts_impressions_viral_unique",
    "page_engaged_users",
    "page_consumptions",
    "page_consumptions_unique",
    "page_places_checkin_total",
    "page_places_checkin_total_unique",
    "page_places_checkin_mobile",
    "page_places_checkin_mobile_unique",
    "page_negative_feedback",
    "page_negative_feedback_unique",
    "page_positive_feedback_by_type",
    "page_positive_feedback_by_type_unique",
];

impl GraphClient {
    /// Page insights over an optional date range
    pub fn get_page_insights(&self, page_id: &str, options: &InsightsOptions) -> Result<InsightsResponse> {
        let mut params = Params::new();
        options.apply(&mut params);
        self.get(&format!("{}/insights", page_id), params)
            .context("getting page insights")
    }

    /// Post insights. An empty metric list requests `POST_METRICS`.
    pub fn get_post_insights(&self, post_id: &str, metrics: &[String]) -> Result<InsightsResponse> {
        let params = Params::new().with("metric", join_metrics(metrics, POST_METRICS));
        self.get(&format!("{}/insights", post_id), params)
            .context("getting post insights")
    }

    /// Metrics that can be requested for a page. Makes no network call.
    pub fn get_available_metrics(&self, _page_id: &str) -> Vec<String> {
        AVAILABLE_PAGE_METRICS.iter().map(|m| m.to_string()).collect()
    }
}
