//! HTTP request pipeline: request types, policy chaining and built-in policies.

pub mod builder;
pub mod pipeline;
pub mod policy;
pub mod request;

pub use builder::{HttpPipelineBuilder, PipelineConfig};
pub use pipeline::{HttpClient, HttpPipeline, HttpPipelinePolicy, NextPolicy};
pub use policy::{AddDatePolicy, RequestIdPolicy, UserAgentPolicy};
pub use request::{HttpPipelineCallContext, HttpRequest, HttpResponse};
