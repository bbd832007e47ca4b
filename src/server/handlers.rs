use super::auth::resolve_token;
use super::error::ApiError;
use super::AppState;
use crate::query::{CommentOptions, CommentOrder, Fields, ListOptions};
use crate::rest::{GraphClient, ACCESS_TOKEN_PARAM};
use crate::types::{Comment, CommentsResponse, Page, PostsResponse};
use axum::{
    extract::{Path, RawQuery, State},
    http::HeaderMap,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

/// Page size when `limit` is absent or not a positive integer
pub const DEFAULT_LIMIT: u32 = 10;

pub const SERVICE_NAME: &str = "facebook-pages-api";

/// Decoded query string; the first occurrence of a key wins
#[derive(Debug, Default)]
pub struct QueryString(Vec<(String, String)>);

impl QueryString {
    pub fn parse(raw: Option<&str>) -> Self {
        let pairs = raw
            .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
            .unwrap_or_default();
        QueryString(pairs)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn limit(&self) -> u32 {
        self.get("limit")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_LIMIT)
    }

    pub fn fields(&self) -> Fields {
        self.get("fields").map(Fields::parse).unwrap_or_default()
    }

    pub fn order(&self) -> Result<CommentOrder, ApiError> {
        match self.get("order").filter(|v| !v.is_empty()) {
            Some(raw) => raw.parse().map_err(ApiError::BadRequest),
            None => Ok(CommentOrder::default()),
        }
    }
}

/// A path value must name a single Graph node
fn require(value: &str, what: &str) -> Result<(), ApiError> {
    let value = value.trim();
    if value.is_empty()
        || value == "."
        || value == ".."
        || value.contains(|c| matches!(c, '/' | '\\' | '?' | '#'))
    {
        return Err(ApiError::BadRequest(format!("{} is required", what)));
    }
    Ok(())
}

fn authenticate(state: &AppState, query: &QueryString, headers: &HeaderMap) -> Result<GraphClient, ApiError> {
    let (token, source) = resolve_token(
        query.get(ACCESS_TOKEN_PARAM),
        headers,
        state.default_token.as_deref(),
        state.options.env_fallback.as_deref(),
    )?;
    tracing::debug!(?source, "credential resolved");
    Ok(state.client(&token))
}

/// Run a blocking client call off the async runtime.
///
/// `operation` names the failure in the response, e.g. "getting posts".
async fn call<T, F>(client: GraphClient, operation: &'static str, f: F) -> Result<T, ApiError>
where
    F: FnOnce(GraphClient) -> crate::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(move || f(client))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    result.map_err(|e| ApiError::Upstream(format!("Error {}: {}", operation, e.root())))
}

pub async fn get_page(
    State(state): State<Arc<AppState>>,
    Path(page_id): Path<String>,
    RawQuery(raw): RawQuery,
    headers: HeaderMap,
) -> Result<Json<Page>, ApiError> {
    require(&page_id, "Page ID")?;
    let query = QueryString::parse(raw.as_deref());
    let client = authenticate(&state, &query, &headers)?;
    let fields = query.fields();

    let page = call(client, "getting page", move |c| c.get_page(&page_id, &fields)).await?;
    Ok(Json(page))
}

pub async fn get_pages(
    State(state): State<Arc<AppState>>,
    RawQuery(raw): RawQuery,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let query = QueryString::parse(raw.as_deref());
    let client = authenticate(&state, &query, &headers)?;

    let pages = call(client, "getting pages", |c| c.get_managed_pages()).await?;
    Ok(Json(json!({ "data": pages })))
}

pub async fn get_posts(
    State(state): State<Arc<AppState>>,
    Path(page_id): Path<String>,
    RawQuery(raw): RawQuery,
    headers: HeaderMap,
) -> Result<Json<PostsResponse>, ApiError> {
    require(&page_id, "Page ID")?;
    let query = QueryString::parse(raw.as_deref());
    let client = authenticate(&state, &query, &headers)?;
    let options = ListOptions::default()
        .with_limit(query.limit())
        .with_fields(query.fields());

    let posts = call(client, "getting posts", move |c| c.get_posts(&page_id, &options)).await?;
    Ok(Json(posts))
}

pub async fn get_post_comments(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<String>,
    RawQuery(raw): RawQuery,
    headers: HeaderMap,
) -> Result<Json<CommentsResponse>, ApiError> {
    require(&post_id, "Post ID")?;
    let query = QueryString::parse(raw.as_deref());
    let order = query.order()?;
    let client = authenticate(&state, &query, &headers)?;
    let options = CommentOptions::default()
        .with_limit(query.limit())
        .with_order(order)
        .with_fields(query.fields());

    let comments = call(client, "getting comments", move |c| {
        c.get_post_comments(&post_id, &options)
    })
    .await?;
    Ok(Json(comments))
}

pub async fn get_comment(
    State(state): State<Arc<AppState>>,
    Path(comment_id): Path<String>,
    RawQuery(raw): RawQuery,
    headers: HeaderMap,
) -> Result<Json<Comment>, ApiError> {
    require(&comment_id, "Comment ID")?;
    let query = QueryString::parse(raw.as_deref());
    let client = authenticate(&state, &query, &headers)?;
    let fields = query.fields();

    let comment = call(client, "getting comment", move |c| c.get_comment(&comment_id, &fields)).await?;
    Ok(Json(comment))
}

pub async fn get_comment_replies(
    State(state): State<Arc<AppState>>,
    Path(comment_id): Path<String>,
    RawQuery(raw): RawQuery,
    headers: HeaderMap,
) -> Result<Json<CommentsResponse>, ApiError> {
    require(&comment_id, "Comment ID")?;
    let query = QueryString::parse(raw.as_deref());
    let client = authenticate(&state, &query, &headers)?;
    let options = ListOptions::default()
        .with_limit(query.limit())
        .with_fields(query.fields());

    let replies = call(client, "getting comment replies", move |c| {
        c.get_comment_replies(&comment_id, &options)
    })
    .await?;
    Ok(Json(replies))
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME,
        "version": state.config.api_version,
    }))
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_defaults() {
        assert_eq!(QueryString::parse(None).limit(), 10);
        assert_eq!(QueryString::parse(Some("limit=2")).limit(), 2);
        assert_eq!(QueryString::parse(Some("limit=0")).limit(), 10);
        assert_eq!(QueryString::parse(Some("limit=-3")).limit(), 10);
        assert_eq!(QueryString::parse(Some("limit=ten")).limit(), 10);
    }

    #[test]
    fn test_first_value_wins() {
        let query = QueryString::parse(Some("fields=id&fields=name"));
        assert_eq!(query.get("fields"), Some("id"));
    }

    #[test]
    fn test_fields_decoded() {
        let query = QueryString::parse(Some("fields=id%2Cfrom%7Bid%2Cname%7D"));
        assert_eq!(query.fields().as_slice(), &["id", "from{id,name}"]);
    }

    #[test]
    fn test_order() {
        assert_eq!(QueryString::parse(None).order().unwrap(), CommentOrder::ReverseChronological);
        assert_eq!(
            QueryString::parse(Some("order=chronological")).order().unwrap(),
            CommentOrder::Chronological
        );
        assert!(matches!(
            QueryString::parse(Some("order=random")).order(),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn test_require() {
        assert!(require("123", "Page ID").is_ok());
        let err = require("  ", "Page ID").unwrap_err();
        assert_eq!(err.to_string(), "Page ID is required");

        for value in ["me/accounts", "..", ".", "123?fields=x", "123#x", "a\\b"] {
            assert!(require(value, "Comment ID").is_err(), "{} accepted", value);
        }
    }
}
