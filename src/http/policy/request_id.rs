//! Policy attaching a client request id.

use crate::error::{RuntimeError, RuntimeResult};
use crate::http::pipeline::{HttpPipelinePolicy, NextPolicy};
use crate::http::request::{HttpPipelineCallContext, HttpResponse};
use futures::future::BoxFuture;
use http::header::{HeaderName, HeaderValue};
use uuid::Uuid;

/// Default header used to correlate client and service logs.
pub const CLIENT_REQUEST_ID_HEADER: &str = "x-ms-client-request-id";

/// Sets a fresh UUID v4 request id unless the caller already supplied one.
#[derive(Debug, Clone)]
pub struct RequestIdPolicy {
    header: HeaderName,
}

impl RequestIdPolicy {
    /// Use `header` as the request id header.
    pub fn new(header: &str) -> RuntimeResult<Self> {
        let header = HeaderName::from_bytes(header.as_bytes())
            .map_err(|_| RuntimeError::invalid_header(header, ""))?;
        Ok(Self { header })
    }

    /// The header the request id is written to.
    pub fn header(&self) -> &HeaderName {
        &self.header
    }
}

impl Default for RequestIdPolicy {
    fn default() -> Self {
        Self {
            header: HeaderName::from_static(CLIENT_REQUEST_ID_HEADER),
        }
    }
}

impl HttpPipelinePolicy for RequestIdPolicy {
    fn process<'a>(
        &'a self,
        context: &'a mut HttpPipelineCallContext,
        next: NextPolicy<'a>,
    ) -> BoxFuture<'a, RuntimeResult<HttpResponse>> {
        Box::pin(async move {
            let headers = context.http_request_mut().headers_mut();
            if !headers.contains_key(&self.header) {
                let id = Uuid::new_v4().to_string();
                let value = HeaderValue::from_str(&id)
                    .map_err(|_| RuntimeError::invalid_header(self.header.as_str(), id.as_str()))?;
                headers.insert(self.header.clone(), value);
            }
            next.process(context).await
        })
    }
}
