//! Policy chaining.
//!
//! A pipeline is an ordered list of [`HttpPipelinePolicy`] stages in front of
//! an [`HttpClient`]. Each stage receives the call context and a
//! [`NextPolicy`] continuation; calling [`NextPolicy::process`] hands the
//! request to the following stage, and the last stage hands it to the client.

use crate::error::RuntimeResult;
use crate::http::request::{HttpPipelineCallContext, HttpRequest, HttpResponse};
use futures::future::BoxFuture;
use log::{debug, trace};
use std::sync::Arc;

/// One stage of the request pipeline.
pub trait HttpPipelinePolicy: Send + Sync {
    /// Inspect or modify the call, then forward it with `next`.
    fn process<'a>(
        &'a self,
        context: &'a mut HttpPipelineCallContext,
        next: NextPolicy<'a>,
    ) -> BoxFuture<'a, RuntimeResult<HttpResponse>>;
}

/// Transport sending a fully prepared request.
pub trait HttpClient: Send + Sync {
    /// Send `request` and return the service's response.
    fn send<'a>(&'a self, request: &'a HttpRequest) -> BoxFuture<'a, RuntimeResult<HttpResponse>>;
}

/// The remainder of the pipeline after the current stage.
pub struct NextPolicy<'a> {
    policies: &'a [Arc<dyn HttpPipelinePolicy>],
    client: &'a dyn HttpClient,
}

impl<'a> NextPolicy<'a> {
    fn new(policies: &'a [Arc<dyn HttpPipelinePolicy>], client: &'a dyn HttpClient) -> Self {
        Self { policies, client }
    }

    /// Run the rest of the pipeline.
    pub fn process(
        self,
        context: &'a mut HttpPipelineCallContext,
    ) -> BoxFuture<'a, RuntimeResult<HttpResponse>> {
        match self.policies.split_first() {
            Some((policy, rest)) => {
                trace!("{} policies left before transport", self.policies.len());
                policy.process(context, NextPolicy::new(rest, self.client))
            }
            None => self.client.send(context.http_request()),
        }
    }
}

/// An ordered chain of policies in front of a transport.
#[derive(Clone)]
pub struct HttpPipeline {
    policies: Vec<Arc<dyn HttpPipelinePolicy>>,
    client: Arc<dyn HttpClient>,
}

impl HttpPipeline {
    /// Create a pipeline; `policies` run in the given order.
    pub fn new(client: Arc<dyn HttpClient>, policies: Vec<Arc<dyn HttpPipelinePolicy>>) -> Self {
        Self { policies, client }
    }

    /// Number of policy stages.
    pub fn policy_count(&self) -> usize {
        self.policies.len()
    }

    /// Send `request` through every policy and the transport.
    pub async fn send(&self, request: HttpRequest) -> RuntimeResult<HttpResponse> {
        let mut context = HttpPipelineCallContext::new(request);
        self.send_context(&mut context).await
    }

    /// Send an already prepared call context, leaving the final request in it.
    pub async fn send_context(
        &self,
        context: &mut HttpPipelineCallContext,
    ) -> RuntimeResult<HttpResponse> {
        debug!(
            "Sending {} {} through {} policies",
            context.http_request().method(),
            context.http_request().url(),
            self.policies.len()
        );
        NextPolicy::new(&self.policies, self.client.as_ref())
            .process(context)
            .await
    }
}

impl std::fmt::Debug for HttpPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPipeline")
            .field("policies", &self.policies.len())
            .finish()
    }
}
