#![cfg(feature = "server")]

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use common::{resource, test_config, MockTransport};
use fbpages::server::{router, AppState, RouterOptions};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

const INVALID_TOKEN: &str = r#"{"error":{"message":"Invalid token","code":190}}"#;

fn app(mock: &Arc<MockTransport>, default_token: Option<&str>, options: RouterOptions) -> Router {
    let state = AppState::new(test_config(), mock.clone())
        .with_default_token(default_token.map(str::to_string))
        .with_options(options);
    router(state)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn test_health() {
    let mock = Arc::new(MockTransport::new());
    let (status, body) = send(app(&mock, None, RouterOptions::default()), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "facebook-pages-api");
    assert_eq!(body["version"], "v23.0");
    assert_eq!(mock.count(), 0);
}

#[tokio::test]
async fn test_page_route() {
    let mock = Arc::new(MockTransport::new().on("123", 200, r#"{"id":"123","name":"Coffee"}"#));
    let (status, body) = send(
        app(&mock, Some("default-token"), RouterOptions::default()),
        get("/api/pages/123?fields=id,name"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Coffee");
    let request = mock.last();
    assert_eq!(resource(&request), "123");
    assert_eq!(request.query_param("fields"), Some("id,name"));
}

#[tokio::test]
async fn test_posts_route_dispatch() {
    let mock = Arc::new(MockTransport::new().on("123/posts", 200, r#"{"data":[{"id":"123_1"}]}"#));
    let (status, body) = send(
        app(&mock, Some("default-token"), RouterOptions::default()),
        get("/api/pages/123/posts?limit=2"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["id"], "123_1");
    let request = mock.last();
    assert_eq!(resource(&request), "123/posts");
    assert_eq!(request.query_param("limit"), Some("2"));
}

#[tokio::test]
async fn test_default_limit() {
    let mock = Arc::new(MockTransport::new().on("123/posts", 200, r#"{"data":[]}"#));
    send(
        app(&mock, Some("default-token"), RouterOptions::default()),
        get("/api/pages/123/posts?limit=abc"),
    )
    .await;

    assert_eq!(mock.last().query_param("limit"), Some("10"));
}

#[tokio::test]
async fn test_managed_pages_wrapped() {
    let mock = Arc::new(MockTransport::new().on("me/accounts", 200, r#"{"data":[{"id":"1","name":"A"}]}"#));
    let (status, body) = send(
        app(&mock, Some("default-token"), RouterOptions::default()),
        get("/api/pages"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["id"], "1");
}

#[tokio::test]
async fn test_comments_routes() {
    let mock = Arc::new(
        MockTransport::new()
            .on("123_1/comments", 200, r#"{"data":[],"summary":{"total_count":0}}"#)
            .on("c1", 200, r#"{"id":"c1","message":"hi"}"#)
            .on("c1/comments", 200, r#"{"data":[{"id":"r1"}]}"#),
    );
    let options = RouterOptions::default();

    let (status, _) = send(
        app(&mock, Some("t"), options.clone()),
        get("/api/posts/123_1/comments?order=chronological"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let request = mock.last();
    assert_eq!(request.query_param("order"), Some("chronological"));
    assert_eq!(request.query_param("limit"), Some("10"));

    let (_, body) = send(app(&mock, Some("t"), options.clone()), get("/api/comments/c1")).await;
    assert_eq!(body["message"], "hi");
    assert_eq!(resource(&mock.last()), "c1");

    let (_, body) = send(app(&mock, Some("t"), options), get("/api/comments/c1/replies?limit=2")).await;
    assert_eq!(body["data"][0]["id"], "r1");
    assert_eq!(resource(&mock.last()), "c1/comments");
    assert_eq!(mock.last().query_param("limit"), Some("2"));
}

#[tokio::test]
async fn test_default_comment_order() {
    let mock = Arc::new(MockTransport::new().on("123_1/comments", 200, r#"{"data":[]}"#));
    send(
        app(&mock, Some("t"), RouterOptions::default()),
        get("/api/posts/123_1/comments"),
    )
    .await;

    assert_eq!(mock.last().query_param("order"), Some("reverse_chronological"));
}

#[tokio::test]
async fn test_invalid_order_rejected() {
    let mock = Arc::new(MockTransport::new());
    let (status, body) = send(
        app(&mock, Some("t"), RouterOptions::default()),
        get("/api/posts/123_1/comments?order=sideways"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
    assert_eq!(mock.count(), 0);
}

#[tokio::test]
async fn test_blank_path_value() {
    let mock = Arc::new(MockTransport::new());
    let (status, body) = send(
        app(&mock, Some("t"), RouterOptions::default()),
        get("/api/pages/%20/posts"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Page ID is required");
    assert_eq!(mock.count(), 0);
}

#[tokio::test]
async fn test_encoded_separators_rejected() {
    let mock = Arc::new(MockTransport::new().on("me/accounts", 200, r#"{"data":[]}"#));
    let cases = [
        ("/api/pages/me%2Faccounts", "Page ID is required"),
        ("/api/pages/..%2Fme/posts", "Page ID is required"),
        ("/api/pages/%2E%2E", "Page ID is required"),
        ("/api/posts/1%3Ffields%3Dx/comments", "Post ID is required"),
        ("/api/comments/c1%23x", "Comment ID is required"),
        ("/api/comments/me%2Faccounts/replies", "Comment ID is required"),
    ];

    for (uri, message) in cases {
        let (status, body) = send(app(&mock, Some("server-default"), RouterOptions::default()), get(uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"], message, "{}", uri);
    }
    assert_eq!(mock.count(), 0);
}

#[tokio::test]
async fn test_health_reports_configured_version() {
    let mock = Arc::new(MockTransport::new());
    let state = AppState::new(test_config().with_api_version("v19.0"), mock.clone());
    let (status, body) = send(router(state), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], "v19.0");
}

#[tokio::test]
async fn test_query_token_beats_header() {
    let mock = Arc::new(MockTransport::new().on("123", 200, r#"{"id":"123"}"#));
    let request = Request::builder()
        .uri("/api/pages/123?access_token=from-query")
        .header(header::AUTHORIZATION, "Bearer from-header")
        .body(Body::empty())
        .unwrap();
    send(app(&mock, Some("default-token"), RouterOptions::default()), request).await;

    assert_eq!(mock.last().query_param("access_token"), Some("from-query"));
}

#[tokio::test]
async fn test_header_token_beats_default() {
    let mock = Arc::new(MockTransport::new().on("123", 200, r#"{"id":"123"}"#));
    let request = Request::builder()
        .uri("/api/pages/123")
        .header(header::AUTHORIZATION, "Bearer from-header")
        .body(Body::empty())
        .unwrap();
    send(app(&mock, Some("default-token"), RouterOptions::default()), request).await;

    assert_eq!(mock.last().query_param("access_token"), Some("from-header"));
}

#[tokio::test]
async fn test_default_token_used() {
    let mock = Arc::new(MockTransport::new().on("123", 200, r#"{"id":"123"}"#));
    send(app(&mock, Some("default-token"), RouterOptions::default()), get("/api/pages/123")).await;

    assert_eq!(mock.last().query_param("access_token"), Some("default-token"));
}

#[tokio::test]
async fn test_environment_fallback() {
    std::env::set_var("FBPAGES_ROUTER_TEST_TOKEN", "from-env");
    let mock = Arc::new(MockTransport::new().on("123", 200, r#"{"id":"123"}"#));
    let options = RouterOptions {
        cors: false,
        env_fallback: Some("FBPAGES_ROUTER_TEST_TOKEN".to_string()),
    };
    let (status, _) = send(app(&mock, None, options), get("/api/pages/123")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(mock.last().query_param("access_token"), Some("from-env"));
}

#[tokio::test]
async fn test_no_credential() {
    let mock = Arc::new(MockTransport::new());
    let (status, body) = send(app(&mock, None, RouterOptions::default()), get("/api/pages/123")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 401);
    assert!(body["error"].as_str().unwrap().starts_with("Authentication error:"));
    assert_eq!(mock.count(), 0);
}

#[tokio::test]
async fn test_remote_error_surfaces_as_500() {
    let mock = Arc::new(MockTransport::new().on("123/posts", 400, INVALID_TOKEN));
    let (status, body) = send(
        app(&mock, Some("expired"), RouterOptions::default()),
        get("/api/pages/123/posts"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 500);
    assert_eq!(body["error"], "Error getting posts: API error: Invalid token (code: 190)");
}

#[tokio::test]
async fn test_unknown_route() {
    let mock = Arc::new(MockTransport::new());
    let (status, body) = send(app(&mock, Some("t"), RouterOptions::default()), get("/api/unknown")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Endpoint not found");
    assert_eq!(body["code"], 404);
}

#[tokio::test]
async fn test_wrong_method() {
    let mock = Arc::new(MockTransport::new());
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/pages/123")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app(&mock, Some("t"), RouterOptions::default()), request).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error"], "Method not allowed");
    assert_eq!(body["code"], 405);
}

#[tokio::test]
async fn test_cors_preflight() {
    let mock = Arc::new(MockTransport::new());
    let options = RouterOptions {
        cors: true,
        env_fallback: None,
    };
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/pages/123")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(Body::empty())
        .unwrap();
    let response = app(&mock, None, options).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
    assert_eq!(mock.count(), 0);
}

#[tokio::test]
async fn test_cors_headers_on_response() {
    let mock = Arc::new(MockTransport::new());
    let options = RouterOptions {
        cors: true,
        env_fallback: None,
    };
    let request = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app(&mock, None, options).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}
