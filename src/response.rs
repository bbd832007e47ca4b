use serde::{Deserialize, Serialize};

/// Error envelope returned by the Graph API on failure statuses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error details inside the envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Human readable message
    pub message: String,

    /// Error category, e.g. "OAuthException"
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Numeric error code
    #[serde(default)]
    pub code: i64,

    /// Numeric sub-code refining `code`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_subcode: Option<i64>,

    /// Trace id for support requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fbtrace_id: Option<String>,
}

/// Collection envelope: `{"data": [...], "paging": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Collection {
            data: Vec::new(),
            paging: None,
        }
    }
}

/// Pagination information. Handed to callers, never followed automatically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursors: Option<Cursors>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// Cursor pair around the current slice
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursors {
    #[serde(default)]
    pub before: String,
    #[serde(default)]
    pub after: String,
}

impl Paging {
    /// Cursor for the slice after this one
    pub fn after(&self) -> Option<&str> {
        self.cursors.as_ref().map(|c| c.after.as_str()).filter(|s| !s.is_empty())
    }

    /// Cursor for the slice before this one
    pub fn before(&self) -> Option<&str> {
        self.cursors.as_ref().map(|c| c.before.as_str()).filter(|s| !s.is_empty())
    }

    pub fn has_next(&self) -> bool {
        self.next.as_deref().is_some_and(|s| !s.is_empty())
    }
}

/// `{"success": bool}` acknowledgement returned by mutating calls
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub(crate) struct SuccessResponse {
    #[serde(default)]
    pub success: bool,
}

/// `{"data": T}` wrapper used by single-object debug endpoints
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DataResponse<T> {
    pub data: T,
}
