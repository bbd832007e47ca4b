use crate::client::DEFAULT_API_VERSION;
use std::env;

/// Default credential variable, also used for the request-time fallback
pub const ACCESS_TOKEN_ENV: &str = "PAGE_ACCESS_TOKEN";
pub const PORT_ENV: &str = "PORT";
pub const HOST_ENV: &str = "HOST";
pub const API_VERSION_ENV: &str = "API_VERSION";

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Environment-driven settings for the façade
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Server-wide default credential
    pub default_token: Option<String>,
    pub api_version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            default_token: None,
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get(PORT_ENV) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid {} '{}': {}", PORT_ENV, raw, e))?,
            None => DEFAULT_PORT,
        };

        Ok(ServerConfig {
            host: get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            default_token: get(ACCESS_TOKEN_ENV),
            api_version: get(API_VERSION_ENV).unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
