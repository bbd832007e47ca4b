//! # fbpages - Facebook Pages client for the Graph API
//!
//! A Rust client for reading and managing Facebook Pages through the Graph
//! API, plus an optional local REST façade (feature `server`) that exposes the
//! read operations to other programs.
//!
//! ## Features
//!
//! - Pages, posts, comments and replies with per-call field selection
//! - Photo upload (file, reader or remote URL), listing and deletion
//! - Page and post insights
//! - Credential validation and token debugging
//! - Graph API error envelopes surfaced as typed errors
//! - Pluggable [`Transport`] so calls can be served without a network
//!
//! ## Basic Usage
//!
//! ```no_run
//! use fbpages::{Fields, GraphClient, ListOptions};
//!
//! fn main() -> Result<(), fbpages::GraphError> {
//!     let client = GraphClient::new("page_access_token")?;
//!
//!     let page = client.get_page("123456789", &Fields::default())?;
//!     println!("{} has {} fans", page.name, page.fan_count);
//!
//!     let posts = client.get_posts("123456789", &ListOptions::default().with_limit(5))?;
//!     for post in &posts.data {
//!         println!("{} {}", post.id, post.created_time);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## API Version
//!
//! ```no_run
//! use fbpages::{Config, GraphClient};
//!
//! let config = Config::default().with_api_version("v19.0");
//! let client = GraphClient::with_config("page_access_token", config)?;
//! assert_eq!(client.build_url("me"), "https://graph.facebook.com/v19.0/me");
//! # Ok::<(), fbpages::GraphError>(())
//! ```

pub mod client;
pub mod error;
pub mod insights;
pub mod pages;
pub mod photos;
pub mod query;
pub mod response;
pub mod rest;
pub mod time;
pub mod token;
pub mod transport;
pub mod types;
pub mod upload;

#[cfg(feature = "server")]
pub mod server;

// Re-export main types for convenience
pub use client::{Config, DEFAULT_API_VERSION, DEFAULT_BASE_URL};
pub use error::{GraphError, Result};
pub use insights::AVAILABLE_PAGE_METRICS;
pub use query::{CommentOptions, CommentOrder, Fields, InsightsOptions, ListOptions, Params, Period};
pub use response::{Collection, Cursors, ErrorDetail, Paging};
pub use rest::GraphClient;
pub use time::GraphTime;
pub use transport::{Body, HttpMethod, HttpRequest, HttpResponse, Multipart, ReqwestTransport, Transport};
pub use types::*;
