//! Plain-data HTTP request/response types and the transport seam.
//!
//! `GraphClient` assembles an `HttpRequest`, hands it to a `Transport`, and
//! decodes the returned `HttpResponse`. The default transport is a pooled
//! blocking `reqwest` client; tests substitute a recording transport.

use crate::client::{create_graph_client, Config};
use crate::error::{GraphError, Result};
use reqwest::blocking::multipart;
use reqwest::blocking::Client;
use std::fmt;

/// HTTP method for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file part in a multipart body
#[derive(Clone, PartialEq, Eq)]
pub struct FilePart {
    pub name: String,
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for FilePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePart")
            .field("name", &self.name)
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// `multipart/form-data` body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Multipart {
    pub fields: Vec<(String, String)>,
    pub files: Vec<FilePart>,
}

impl Multipart {
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.fields.push((name.to_string(), value.to_string()));
        self
    }

    pub fn file(mut self, part: FilePart) -> Self {
        self.files.push(part);
        self
    }

    /// Value of a text field
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Request body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Body {
    #[default]
    Empty,
    Json(Vec<u8>),
    Form(Vec<(String, String)>),
    Multipart(Multipart),
}

impl Body {
    pub fn is_empty(&self) -> bool {
        matches!(self, Body::Empty)
    }
}

/// An outbound request described as plain data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Absolute URL without query string
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

impl HttpRequest {
    /// Value of a query parameter
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Value of a header, compared case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A fully read response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        HttpResponse {
            status,
            body: body.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.status >= 400
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}

/// Executes requests against the network.
///
/// Implementations read the body fully and release the connection before returning.
pub trait Transport: Send + Sync {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Blocking `reqwest` transport
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(ReqwestTransport {
            client: create_graph_client(config)?,
        })
    }

    /// Wrap an existing client
    pub fn from_client(client: Client) -> Self {
        ReqwestTransport { client }
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url).query(&request.query);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match request.body {
            Body::Empty => builder,
            Body::Json(bytes) => builder.body(bytes),
            Body::Form(pairs) => builder.form(&pairs),
            Body::Multipart(mp) => builder.multipart(build_form(mp)?),
        };

        let response = builder.send()?;
        let status = response.status().as_u16();
        let body = response.bytes()?;

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}

fn build_form(mp: Multipart) -> Result<multipart::Form> {
    let mut form = multipart::Form::new();
    for file in mp.files {
        let part = multipart::Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.mime_type)
            .map_err(|e| GraphError::RequestBuild(format!("invalid mime type: {}", e)))?;
        form = form.part(file.name, part);
    }
    for (name, value) in mp.fields {
        form = form.text(name, value);
    }
    Ok(form)
}
