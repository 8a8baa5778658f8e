//! Resource-side plumbing: identifiers, dependency tasks and the builder for
//! independently managed child resources.

pub mod creatable;
pub mod model;
pub mod parented;
pub mod resource_id;

pub use creatable::{Creatable, TaskGroup};
pub use model::{InnerResource, ParentResource};
pub use parented::{ChildResourceCreator, ParentedResourceBuilder};
pub use resource_id::{ResourceId, group_from_resource_id};
