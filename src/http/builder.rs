//! Builder pattern for configuring HTTP pipelines.
//!
//! The builder assembles the default policies described by a
//! [`PipelineConfig`] around any caller-supplied policies:
//!
//! ```text
//! User-Agent -> request id -> caller policies... -> Date -> transport
//! ```
//!
//! The `Date` stage runs last so that its timestamp is taken as close to the
//! transport as possible.

use crate::error::RuntimeResult;
use crate::http::pipeline::{HttpClient, HttpPipeline, HttpPipelinePolicy};
use crate::http::policy::{
    AddDatePolicy, CLIENT_REQUEST_ID_HEADER, RequestIdPolicy, UserAgentPolicy, default_user_agent,
};
use log::debug;
use std::sync::Arc;

/// Which default policies a pipeline carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Value of the `User-Agent` header. `None` leaves the header alone.
    pub user_agent: Option<String>,

    /// Header carrying a generated client request id. `None` disables it.
    pub request_id_header: Option<String>,

    /// Whether to stamp the RFC 1123 `Date` header.
    pub add_date_header: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            user_agent: Some(default_user_agent()),
            request_id_header: Some(CLIENT_REQUEST_ID_HEADER.to_string()),
            add_date_header: true,
        }
    }
}

impl PipelineConfig {
    /// A configuration with every default policy disabled.
    pub fn bare() -> Self {
        Self {
            user_agent: None,
            request_id_header: None,
            add_date_header: false,
        }
    }
}

/// Builder for [`HttpPipeline`].
///
/// # Example
///
/// ```rust,no_run
/// use arm_client_runtime::http::{HttpClient, HttpPipelineBuilder, PipelineConfig};
/// use std::sync::Arc;
///
/// # fn example(client: Arc<dyn HttpClient>) -> arm_client_runtime::RuntimeResult<()> {
/// let pipeline = HttpPipelineBuilder::new(client)
///     .with_config(PipelineConfig {
///         user_agent: Some("my-tool/1.0".to_string()),
///         ..PipelineConfig::default()
///     })
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct HttpPipelineBuilder {
    client: Arc<dyn HttpClient>,
    config: PipelineConfig,
    policies: Vec<Arc<dyn HttpPipelinePolicy>>,
}

impl HttpPipelineBuilder {
    /// Start a builder over `client` with the default configuration.
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self {
            client,
            config: PipelineConfig::default(),
            policies: Vec::new(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a caller policy; caller policies run in the order they are added.
    pub fn policy(mut self, policy: impl HttpPipelinePolicy + 'static) -> Self {
        self.policies.push(Arc::new(policy));
        self
    }

    /// Assemble the pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RuntimeError::InvalidHeaderValue`] if the configured
    /// user agent or request id header cannot be sent.
    pub fn build(self) -> RuntimeResult<HttpPipeline> {
        let mut policies: Vec<Arc<dyn HttpPipelinePolicy>> = Vec::new();

        if let Some(user_agent) = &self.config.user_agent {
            policies.push(Arc::new(UserAgentPolicy::new(user_agent)?));
        }
        if let Some(header) = &self.config.request_id_header {
            policies.push(Arc::new(RequestIdPolicy::new(header)?));
        }
        policies.extend(self.policies);
        if self.config.add_date_header {
            policies.push(Arc::new(AddDatePolicy::new()));
        }

        debug!("Built HTTP pipeline with {} policies", policies.len());
        Ok(HttpPipeline::new(self.client, policies))
    }
}
