//! Policy stamping the `Date` header.

use crate::error::{RuntimeError, RuntimeResult};
use crate::http::pipeline::{HttpPipelinePolicy, NextPolicy};
use crate::http::request::{HttpPipelineCallContext, HttpResponse};
use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use http::header::{DATE, HeaderValue};
use log::trace;

/// RFC 1123 layout, always rendered in UTC with English day and month names.
pub const RFC1123_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Format an instant the way the `Date` header expects it.
pub fn format_rfc1123(instant: DateTime<Utc>) -> String {
    instant.format(RFC1123_FORMAT).to_string()
}

/// Sets the `Date` header to the time the request actually leaves this stage.
///
/// The clock is read when the stage runs, not when the policy is built, so a
/// delayed or repeated send carries a fresh timestamp. Any existing `Date`
/// header is replaced.
#[derive(Debug, Clone, Copy)]
pub struct AddDatePolicy {
    clock: fn() -> DateTime<Utc>,
}

impl AddDatePolicy {
    /// Stamp requests with the system clock.
    pub fn new() -> Self {
        Self { clock: Utc::now }
    }

    /// Stamp requests with a custom clock.
    pub fn with_clock(clock: fn() -> DateTime<Utc>) -> Self {
        Self { clock }
    }
}

impl Default for AddDatePolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpPipelinePolicy for AddDatePolicy {
    fn process<'a>(
        &'a self,
        context: &'a mut HttpPipelineCallContext,
        next: NextPolicy<'a>,
    ) -> BoxFuture<'a, RuntimeResult<HttpResponse>> {
        Box::pin(async move {
            let stamp = format_rfc1123((self.clock)());
            let value = HeaderValue::from_str(&stamp)
                .map_err(|_| RuntimeError::invalid_header(DATE.as_str(), stamp.as_str()))?;
            trace!("Date: {}", stamp);
            context.http_request_mut().headers_mut().insert(DATE, value);
            next.process(context).await
        })
    }
}
