//! Policy setting the `User-Agent` header.

use crate::error::{RuntimeError, RuntimeResult};
use crate::http::pipeline::{HttpPipelinePolicy, NextPolicy};
use crate::http::request::{HttpPipelineCallContext, HttpResponse};
use futures::future::BoxFuture;
use http::header::{HeaderValue, USER_AGENT};

/// User agent sent when none is configured.
pub fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Overwrites `User-Agent` with a fixed value.
#[derive(Debug, Clone)]
pub struct UserAgentPolicy {
    value: HeaderValue,
}

impl UserAgentPolicy {
    /// Send `user_agent`, failing if it is not a valid header value.
    pub fn new(user_agent: &str) -> RuntimeResult<Self> {
        let value = HeaderValue::from_str(user_agent)
            .map_err(|_| RuntimeError::invalid_header(USER_AGENT.as_str(), user_agent))?;
        Ok(Self { value })
    }
}

impl HttpPipelinePolicy for UserAgentPolicy {
    fn process<'a>(
        &'a self,
        context: &'a mut HttpPipelineCallContext,
        next: NextPolicy<'a>,
    ) -> BoxFuture<'a, RuntimeResult<HttpResponse>> {
        Box::pin(async move {
            context
                .http_request_mut()
                .headers_mut()
                .insert(USER_AGENT, self.value.clone());
            next.process(context).await
        })
    }
}
