//! Query parameter assembly: field selections, per-method defaults and
//! typed options for the list-style calls.
//!
//! An empty selection always resolves to the documented default list for the
//! call rather than omitting `fields`, since the API's own defaults differ.

use crate::time::format_date;
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// Default fields for a single page
pub const PAGE_FIELDS: &[&str] = &[
    "id",
    "name",
    "category",
    "about",
    "description",
    "website",
    "phone",
    "username",
    "link",
    "fan_count",
    "followers_count",
    "talking_about_count",
    "picture",
    "cover",
    "location",
    "hours",
    "is_published",
    "is_verified",
    "can_post",
    "access_token",
];

/// Fields requested for `me/accounts`
pub const MANAGED_PAGE_FIELDS: &[&str] = &["id", "name", "category", "access_token", "can_post"];

/// Default fields for page posts
pub const POST_FIELDS: &[&str] = &["id", "message", "created_time"];

/// Default fields for comment listings and replies
pub const COMMENT_FIELDS: &[&str] = &[
    "id",
    "message",
    "created_time",
    "from{id,name,picture}",
    "like_count",
    "comment_count",
    "attachment",
];

/// Default fields for a single comment
pub const COMMENT_DETAIL_FIELDS: &[&str] = &[
    "id",
    "message",
    "created_time",
    "from{id,name,picture}",
    "like_count",
    "comment_count",
    "attachment",
    "parent",
];

/// Fields requested when listing page photos
pub const PHOTO_FIELDS: &[&str] = &[
    "id",
    "name",
    "picture",
    "source",
    "created_time",
    "updated_time",
    "link",
];

/// Fields requested for the current user
pub const USER_FIELDS: &[&str] = &["id", "name", "email"];

/// Default page insight metrics
pub const PAGE_METRICS: &[&str] = &[
    "page_fans",
    "page_fan_adds",
    "page_fan_removes",
    "page_views_total",
    "page_impressions",
    "page_posts_impressions",
    "page_engaged_users",
];

/// Default post insight metrics
pub const POST_METRICS: &[&str] = &[
    "post_impressions",
    "post_impressions_unique",
    "post_engaged_users",
    "post_reactions_by_type_total",
    "post_clicks",
    "post_video_views",
];

/// Ordered query parameters. `set` replaces an existing key in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn new() -> Self {
        Params(Vec::new())
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key.to_string(), value)),
        }
    }

    /// Builder-style `set`
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Set `limit` when positive; otherwise the API default applies
    pub fn set_limit(&mut self, limit: Option<u32>) {
        if let Some(limit) = limit.filter(|l| *l > 0) {
            self.set("limit", limit.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.0
    }
}

/// Field selection. Empty means "use the call's default list".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields(Vec<String>);

impl Fields {
    /// Empty selection
    pub fn default_set() -> Self {
        Fields(Vec::new())
    }

    /// Parse a comma separated list, ignoring blank entries.
    /// Commas inside a nested `{...}` selection do not split.
    pub fn parse(list: &str) -> Self {
        let mut fields = Vec::new();
        let mut depth = 0usize;
        let mut start = 0;
        for (i, c) in list.char_indices() {
            match c {
                '{' => depth += 1,
                '}' => depth = depth.saturating_sub(1),
                ',' if depth == 0 => {
                    fields.push(&list[start..i]);
                    start = i + 1;
                }
                _ => {}
            }
        }
        fields.push(&list[start..]);

        Fields(
            fields
                .into_iter()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Comma joined selection, falling back to `defaults`
    pub fn resolve(&self, defaults: &[&str]) -> String {
        if self.0.is_empty() {
            defaults.join(",")
        } else {
            self.0.join(",")
        }
    }
}

impl<S: Into<String>> FromIterator<S> for Fields {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Fields(iter.into_iter().map(Into::into).collect())
    }
}

impl From<&[&str]> for Fields {
    fn from(fields: &[&str]) -> Self {
        fields.iter().copied().collect()
    }
}

/// Options for posts and comment replies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Page size; `None` or zero leaves the API default
    pub limit: Option<u32>,
    pub fields: Fields,
}

impl ListOptions {
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields = fields;
        self
    }
}

/// Comment ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommentOrder {
    Chronological,
    #[default]
    ReverseChronological,
}

impl CommentOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommentOrder::Chronological => "chronological",
            CommentOrder::ReverseChronological => "reverse_chronological",
        }
    }
}

impl fmt::Display for CommentOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommentOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chronological" => Ok(CommentOrder::Chronological),
            "reverse_chronological" => Ok(CommentOrder::ReverseChronological),
            other => Err(format!(
                "invalid order '{}': expected chronological or reverse_chronological",
                other
            )),
        }
    }
}

/// Options for post comments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentOptions {
    pub limit: Option<u32>,
    pub order: CommentOrder,
    pub fields: Fields,
}

impl CommentOptions {
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_order(mut self, order: CommentOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields = fields;
        self
    }
}

/// Aggregation period for insights
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Period {
    #[default]
    Day,
    Week,
    Days28,
    Month,
    Lifetime,
    TotalOverRange,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Days28 => "days_28",
            Period::Month => "month",
            Period::Lifetime => "lifetime",
            Period::TotalOverRange => "total_over_range",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Period::Day),
            "week" => Ok(Period::Week),
            "days_28" => Ok(Period::Days28),
            "month" => Ok(Period::Month),
            "lifetime" => Ok(Period::Lifetime),
            "total_over_range" => Ok(Period::TotalOverRange),
            other => Err(format!("invalid period '{}'", other)),
        }
    }
}

/// Options for page insights
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsightsOptions {
    /// Metric names; empty selects `PAGE_METRICS`
    pub metrics: Vec<String>,
    pub period: Period,
    pub since: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
}

impl InsightsOptions {
    pub fn with_metrics<S: Into<String>>(mut self, metrics: impl IntoIterator<Item = S>) -> Self {
        self.metrics = metrics.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    pub fn with_range(mut self, since: Option<NaiveDate>, until: Option<NaiveDate>) -> Self {
        self.since = since;
        self.until = until;
        self
    }

    pub(crate) fn apply(&self, params: &mut Params) {
        params.set("metric", join_metrics(&self.metrics, PAGE_METRICS));
        params.set("period", self.period.as_str());
        if let Some(since) = self.since {
            params.set("since", format_date(since));
        }
        if let Some(until) = self.until {
            params.set("until", format_date(until));
        }
    }
}

/// Comma joined metric list, falling back to `defaults`
pub(crate) fn join_metrics(metrics: &[String], defaults: &[&str]) -> String {
    if metrics.is_empty() {
        defaults.join(",")
    } else {
        metrics.join(",")
    }
}
