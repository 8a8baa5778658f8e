//! Client runtime plumbing for cloud resource management.
//!
//! Two independent halves:
//!
//! - [`resource`] - identifiers, dependency tasks and
//!   [`ParentedResourceBuilder`], which lets a child resource be created
//!   under an existing parent or under a parent that is created in the same
//!   dependency graph.
//! - [`http`] - a policy pipeline in front of a pluggable [`HttpClient`],
//!   including [`AddDatePolicy`] which stamps an RFC 1123 `Date` header.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use arm_client_runtime::http::{HttpClient, HttpPipelineBuilder, HttpRequest};
//! use http::Method;
//! use std::sync::Arc;
//!
//! # async fn example(client: Arc<dyn HttpClient>) -> arm_client_runtime::RuntimeResult<()> {
//! let pipeline = HttpPipelineBuilder::new(client).build()?;
//! let request = HttpRequest::new(Method::GET, "https://management.azure.com/subscriptions");
//! let response = pipeline.send(request).await?;
//! println!("{}", response.status());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod http;
pub mod resource;

pub use crate::error::{RuntimeError, RuntimeResult};
pub use crate::http::{
    AddDatePolicy, HttpClient, HttpPipeline, HttpPipelineBuilder, HttpPipelinePolicy,
    PipelineConfig,
};
pub use crate::resource::{
    ChildResourceCreator, Creatable, ParentResource, ParentedResourceBuilder, ResourceId,
    TaskGroup,
};
