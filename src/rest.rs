use crate::client::Config;
use crate::error::{GraphError, Result};
use crate::query::Params;
use crate::response::ErrorResponse;
use crate::transport::{Body, HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Query parameter carrying the credential on every call
pub const ACCESS_TOKEN_PARAM: &str = "access_token";

/// Client for the Graph API, bound to one credential
#[derive(Clone)]
pub struct GraphClient {
    access_token: String,
    config: Config,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for GraphClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl GraphClient {
    /// Create a client with the default configuration
    pub fn new(access_token: &str) -> Result<Self> {
        Self::with_config(access_token, Config::default())
    }

    /// Create a client with a custom configuration
    pub fn with_config(access_token: &str, config: Config) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(access_token, config, Arc::new(transport)))
    }

    /// Create a client on top of an existing transport
    pub fn with_transport(access_token: &str, config: Config, transport: Arc<dyn Transport>) -> Self {
        GraphClient {
            access_token: access_token.to_string(),
            config,
            transport,
        }
    }

    /// Override the API version
    pub fn set_api_version(&mut self, version: &str) {
        self.config.api_version = version.to_string();
    }

    pub fn with_api_version(mut self, version: &str) -> Self {
        self.set_api_version(version);
        self
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn api_version(&self) -> &str {
        &self.config.api_version
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Full URL of a resource path: `{base}/{version}/{resource}`
    pub fn build_url(&self, resource: &str) -> String {
        format!("{}/{}/{}", self.config.base_url, self.config.api_version, resource)
    }

    /// Send a request for `resource`.
    ///
    /// The stored credential replaces any `access_token` already in `params`.
    /// `Content-Type: application/json` is set only for POST with a JSON body.
    pub fn execute(
        &self,
        method: HttpMethod,
        resource: &str,
        mut params: Params,
        body: Body,
    ) -> Result<HttpResponse> {
        params.set(ACCESS_TOKEN_PARAM, self.access_token.as_str());

        let mut headers = Vec::new();
        if method == HttpMethod::Post && matches!(body, Body::Json(_)) {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }

        let request = HttpRequest {
            method,
            url: self.build_url(resource),
            query: params.into_pairs(),
            headers,
            body,
        };

        let start = Instant::now();
        let response = self.transport.send(request)?;
        tracing::debug!(
            method = %method,
            resource,
            status = response.status,
            elapsed = ?start.elapsed(),
            "graph request"
        );

        Ok(response)
    }

    /// Decode a response into `T`, mapping failure statuses to errors
    pub fn decode<T>(response: HttpResponse) -> Result<T>
    where
        T: DeserializeOwned,
    {
        if response.is_failure() {
            return Err(match serde_json::from_slice::<ErrorResponse>(&response.body) {
                Ok(envelope) => GraphError::from_detail(envelope.error),
                Err(err) => {
                    tracing::warn!(status = response.status, error = %err, "unparseable error envelope");
                    GraphError::http(response.status, response.text())
                }
            });
        }

        serde_json::from_slice(&response.body).map_err(GraphError::Decode)
    }

    /// Execute and decode in one step
    pub fn apply<T>(&self, method: HttpMethod, resource: &str, params: Params, body: Body) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.execute(method, resource, params, body)?;
        Self::decode(response)
    }

    pub(crate) fn get<T>(&self, resource: &str, params: Params) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.apply(HttpMethod::Get, resource, params, Body::Empty)
    }
}
