//! Request, response and per-call context types carried through the pipeline.

use crate::error::{RuntimeError, RuntimeResult};
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::{Method, StatusCode};
use std::collections::HashMap;

/// An outgoing HTTP request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    method: Method,
    url: String,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl HttpRequest {
    /// Create a request without headers or body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    /// Set the request body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Set a header, failing if the name or value cannot be sent.
    pub fn with_header(mut self, name: &str, value: &str) -> RuntimeResult<Self> {
        self.set_header(name, value)?;
        Ok(self)
    }

    /// Set a header, replacing any previous value of the same name.
    pub fn set_header(&mut self, name: &str, value: &str) -> RuntimeResult<()> {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| RuntimeError::invalid_header(name, value))?;
        let header_value =
            HeaderValue::from_str(value).map_err(|_| RuntimeError::invalid_header(name, value))?;
        self.headers.insert(header_name, header_value);
        Ok(())
    }

    /// Value of a header, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The target URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// All headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Mutable access to the headers.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// The raw body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// A response returned by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl HttpResponse {
    /// Create a response with no headers or body.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    /// Set the response body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// The status code returned by the service.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// All headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Mutable access to the headers.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Value of a header, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The raw body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// State of one request's trip through the pipeline.
///
/// Policies may stash string values in the context for later stages.
#[derive(Debug, Clone)]
pub struct HttpPipelineCallContext {
    request: HttpRequest,
    data: HashMap<String, String>,
}

impl HttpPipelineCallContext {
    /// Start a call for `request`.
    pub fn new(request: HttpRequest) -> Self {
        Self {
            request,
            data: HashMap::new(),
        }
    }

    /// The request being sent.
    pub fn http_request(&self) -> &HttpRequest {
        &self.request
    }

    /// Mutable access to the request, for policies that modify it.
    pub fn http_request_mut(&mut self) -> &mut HttpRequest {
        &mut self.request
    }

    /// Store a value for later stages.
    pub fn set_data(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.data.insert(key.into(), value.into());
    }

    /// Read a value stored by an earlier stage.
    pub fn data(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    /// Consume the context, returning the request as it was finally sent.
    pub fn into_request(self) -> HttpRequest {
        self.request
    }
}
