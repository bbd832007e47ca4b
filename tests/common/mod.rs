#![allow(dead_code)]

use fbpages::{Config, GraphClient, GraphError, HttpRequest, HttpResponse, Transport};
use std::sync::{Arc, Mutex};

pub const TEST_BASE_URL: &str = "http://graph.test";

/// Transport that records every request and answers from a route table.
///
/// Routes match on the path after the API version; unmatched requests get
/// a Graph-style 404 envelope.
#[derive(Default)]
pub struct MockTransport {
    routes: Vec<(String, HttpResponse)>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, resource: &str, status: u16, body: &str) -> Self {
        self.routes.push((resource.to_string(), HttpResponse::new(status, body)));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> HttpRequest {
        self.requests().pop().expect("no request recorded")
    }

    pub fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

/// Resource path of a recorded request, e.g. "123/posts"
pub fn resource(request: &HttpRequest) -> &str {
    let rest = request.url.strip_prefix(TEST_BASE_URL).unwrap_or(&request.url);
    let rest = rest.trim_start_matches('/');
    rest.split_once('/').map(|(_, r)| r).unwrap_or(rest)
}

impl Transport for MockTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, GraphError> {
        let path = resource(&request).to_string();
        self.requests.lock().unwrap().push(request);

        let response = self
            .routes
            .iter()
            .find(|(r, _)| *r == path)
            .map(|(_, resp)| resp.clone())
            .unwrap_or_else(|| {
                HttpResponse::new(
                    404,
                    r#"{"error":{"message":"Unknown path components","type":"OAuthException","code":2500}}"#,
                )
            });
        Ok(response)
    }
}

pub fn test_config() -> Config {
    Config::new(TEST_BASE_URL)
}

pub fn client_with(mock: &Arc<MockTransport>) -> GraphClient {
    GraphClient::with_transport("test-token", test_config(), mock.clone())
}
