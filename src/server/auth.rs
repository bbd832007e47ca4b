//! Per-request credential resolution.
//!
//! Order: `access_token` query parameter, `Authorization: Bearer` header,
//! the server-wide default, then (when enabled) an environment variable read
//! at request time. Empty values count as absent.

use super::error::ApiError;
use axum::http::{header::AUTHORIZATION, HeaderMap};

const BEARER_PREFIX: &str = "Bearer ";

/// Token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Where a resolved credential came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Query,
    Header,
    Default,
    Environment,
}

/// Resolve the credential for one request
pub fn resolve_token(
    query_token: Option<&str>,
    headers: &HeaderMap,
    default_token: Option<&str>,
    env_fallback: Option<&str>,
) -> Result<(String, CredentialSource), ApiError> {
    if let Some(token) = query_token.filter(|t| !t.is_empty()) {
        return Ok((token.to_string(), CredentialSource::Query));
    }

    if let Some(token) = bearer_token(headers) {
        return Ok((token.to_string(), CredentialSource::Header));
    }

    if let Some(token) = default_token.filter(|t| !t.is_empty()) {
        return Ok((token.to_string(), CredentialSource::Default));
    }

    if let Some(var) = env_fallback {
        if let Ok(token) = std::env::var(var) {
            if !token.is_empty() {
                return Ok((token, CredentialSource::Environment));
            }
        }
        return Err(ApiError::Unauthorized(format!(
            "no access token provided - use access_token query parameter, Authorization header, or {} environment variable",
            var
        )));
    }

    Err(ApiError::Unauthorized(
        "no access token provided and no default token configured".to_string(),
    ))
}
