//! Builder for child resources that are created and updated independently of
//! their parent.
//!
//! Many resources in the resource manager live underneath a parent (a database
//! under a server, a subnet under a network) yet have their own create/update
//! lifecycle. [`ParentedResourceBuilder`] captures what they all share:
//!
//! * the parent is either an existing resource, named directly, or a resource
//!   that is itself still pending creation;
//! * the builder is in create mode until the service has assigned the
//!   resource an identifier, after which the resource group and parent name
//!   come from that identifier.
//!
//! The service call itself is supplied by a [`ChildResourceCreator`] per
//! resource kind.
//!
//! # Example
//!
//! ```rust
//! use arm_client_runtime::resource::{
//!     ChildResourceCreator, ParentResource, ParentedResourceBuilder, TaskGroup,
//! };
//! use arm_client_runtime::RuntimeResult;
//! use serde_json::{Value, json};
//! use std::future::Future;
//!
//! #[derive(Clone)]
//! struct Server { name: String, group: String }
//!
//! impl ParentResource for Server {
//!     fn name(&self) -> &str { &self.name }
//!     fn resource_group_name(&self) -> &str { &self.group }
//! }
//!
//! struct CreateDatabase;
//!
//! impl ChildResourceCreator<Value, Server, ()> for CreateDatabase {
//!     type Child = String;
//!
//!     fn create_child_resource<'a>(
//!         &'a self,
//!         builder: &'a ParentedResourceBuilder<Value, Server, ()>,
//!     ) -> impl Future<Output = RuntimeResult<String>> + Send + 'a {
//!         async move {
//!             Ok(format!(
//!                 "{}/{}/{}",
//!                 builder.resource_group_name().unwrap_or_default(),
//!                 builder.parent_name().unwrap_or_default(),
//!                 builder.name()
//!             ))
//!         }
//!     }
//! }
//!
//! # async fn example() -> RuntimeResult<()> {
//! let mut db = ParentedResourceBuilder::<Value, Server, ()>::new(
//!     "db1",
//!     json!({}),
//!     (),
//!     TaskGroup::new("db1"),
//! );
//! db.with_existing_parent_resource("rg", "srv1");
//! assert_eq!(db.create(&CreateDatabase).await?, "rg/srv1/db1");
//! # Ok(())
//! # }
//! ```

use crate::error::{RuntimeError, RuntimeResult};
use crate::resource::creatable::{Creatable, TaskGroup};
use crate::resource::model::{InnerResource, ParentResource};
use crate::resource::resource_id::ResourceId;
use log::{debug, trace};
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

/// Service call that creates one kind of child resource.
///
/// Invoked by [`ParentedResourceBuilder::create_resource`] once the parent
/// identity has been resolved, so `builder.resource_group_name()` and
/// `builder.parent_name()` reflect the final parent.
pub trait ChildResourceCreator<I, P, M> {
    /// The resource returned by the service once created.
    type Child;

    /// Create the child resource described by `builder`.
    fn create_child_resource<'a>(
        &'a self,
        builder: &'a ParentedResourceBuilder<I, P, M>,
    ) -> impl Future<Output = RuntimeResult<Self::Child>> + Send + 'a;
}

/// Definition and update state of a child resource with its own lifecycle.
///
/// Type parameters:
///
/// * `I` - the raw service model
/// * `P` - the parent resource type
/// * `M` - the service manager handle
pub struct ParentedResourceBuilder<I, P, M> {
    name: String,
    inner: I,
    manager: M,
    group_name: Option<String>,
    parent_name: Option<String>,
    pending_parent_key: Option<String>,
    tasks: TaskGroup,
    _parent: PhantomData<fn() -> P>,
}

impl<I, P, M> ParentedResourceBuilder<I, P, M>
where
    I: InnerResource,
{
    /// Create a builder for a resource that is being defined.
    ///
    /// The parent name is not derived here; use [`Self::from_existing`] for a
    /// model fetched from the service.
    pub fn new(name: impl Into<String>, inner: I, manager: M, tasks: TaskGroup) -> Self {
        Self {
            name: name.into(),
            inner,
            manager,
            group_name: None,
            parent_name: None,
            pending_parent_key: None,
            tasks,
            _parent: PhantomData,
        }
    }

    /// Create a builder around a model fetched from the service, deriving the
    /// parent name from its identifier.
    pub fn from_existing(
        name: impl Into<String>,
        inner: I,
        manager: M,
        tasks: TaskGroup,
    ) -> RuntimeResult<Self> {
        let parent_name = parent_name_from(&inner)?;
        let mut builder = Self::new(name, inner, manager, tasks);
        builder.parent_name = parent_name;
        Ok(builder)
    }

    /// The service manager this resource belongs to.
    pub fn manager(&self) -> &M {
        &self.manager
    }

    /// The name of the resource.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw service model.
    pub fn inner(&self) -> &I {
        &self.inner
    }

    /// The resource identifier, once the service has assigned one.
    pub fn id(&self) -> Option<&str> {
        self.inner.id()
    }

    /// The resource group of the resource.
    ///
    /// An explicitly recorded group wins; otherwise the group is read from the
    /// resource identifier, parsed the same way as for the parent name.
    ///
    /// Returns `None` when neither is available. Calling this before the
    /// parent has been declared on a resource in create mode is a caller
    /// error, not a state to be defaulted.
    pub fn resource_group_name(&self) -> Option<String> {
        match &self.group_name {
            Some(group) => Some(group.clone()),
            None => self
                .id()
                .and_then(|id| ResourceId::from_string(id).ok())
                .and_then(|id| id.resource_group_name().map(str::to_string)),
        }
    }

    /// The name of the parent resource, if known.
    pub fn parent_name(&self) -> Option<&str> {
        self.parent_name.as_deref()
    }

    /// `true` while the resource has no identifier, i.e. it is being defined
    /// rather than updated.
    pub fn is_in_create_mode(&self) -> bool {
        self.id().is_none()
    }

    /// Key of the pending parent creation this resource depends on.
    pub fn pending_parent_key(&self) -> Option<&str> {
        self.pending_parent_key.as_deref()
    }

    /// The dependencies of this resource's creation.
    pub fn task_group(&self) -> &TaskGroup {
        &self.tasks
    }

    /// Place the resource under an existing parent, named directly.
    ///
    /// Overwrites any group or parent recorded before.
    pub fn with_existing_parent_resource(
        &mut self,
        group_name: impl Into<String>,
        parent_name: impl Into<String>,
    ) -> &mut Self {
        self.group_name = Some(group_name.into());
        self.parent_name = Some(parent_name.into());
        self
    }

    /// Place the resource under an already resolved parent resource.
    pub fn with_existing_parent(&mut self, parent: &P) -> &mut Self
    where
        P: ParentResource,
    {
        self.with_existing_parent_resource(parent.resource_group_name(), parent.name())
    }

    /// Place the resource under a parent that is itself pending creation.
    ///
    /// The parent creation becomes a dependency of this resource's creation.
    /// Only the first call registers anything; later calls leave the
    /// registered parent in place.
    pub fn with_new_parent_resource(&mut self, parent: Arc<dyn Creatable<P>>) -> &mut Self
    where
        P: Send + Sync + 'static,
    {
        if let Some(key) = &self.pending_parent_key {
            debug!(
                "Resource '{}' already waits on parent '{}', ignoring '{}'",
                self.name,
                key,
                parent.key()
            );
            return self;
        }

        let key = self.tasks.add_dependency(parent);
        self.pending_parent_key = Some(key);
        self
    }

    /// Replace the raw model, e.g. after a fetch or a create/update response,
    /// and re-derive the parent name from its identifier.
    ///
    /// The identifier is validated before anything is replaced: on error the
    /// builder keeps its previous model and parent.
    pub fn set_inner(&mut self, inner: I) -> RuntimeResult<()> {
        if let Some(parent_name) = parent_name_from(&inner)? {
            self.parent_name = Some(parent_name);
        }
        self.inner = inner;
        Ok(())
    }

    /// Resolve the parent identity and create the resource.
    ///
    /// When a pending parent was registered, its result is read from the
    /// task group and recorded as the existing parent. The dependency must
    /// already have run; see [`Self::create`] to run it first.
    pub async fn create_resource<C>(&mut self, creator: &C) -> RuntimeResult<C::Child>
    where
        P: ParentResource + Clone + 'static,
        C: ChildResourceCreator<I, P, M>,
    {
        if let Some(key) = self.pending_parent_key.clone() {
            let parent: P = self.tasks.task_result(&key)?;
            trace!(
                "Resource '{}' resolved parent '{}' in group '{}'",
                self.name,
                parent.name(),
                parent.resource_group_name()
            );
            self.with_existing_parent(&parent);
        }
        creator.create_child_resource(self).await
    }

    /// Run the registered dependencies, then create the resource.
    pub async fn create<C>(&mut self, creator: &C) -> RuntimeResult<C::Child>
    where
        P: ParentResource + Clone + 'static,
        C: ChildResourceCreator<I, P, M>,
    {
        self.tasks.invoke_dependencies().await?;
        self.create_resource(creator).await
    }

}

/// Name of the parent named by `inner`'s identifier; `None` in create mode.
fn parent_name_from<I: InnerResource>(inner: &I) -> RuntimeResult<Option<String>> {
    let Some(id) = inner.id() else {
        return Ok(None);
    };

    let resource_id = ResourceId::from_string(id)?;
    let parent = resource_id
        .parent()
        .ok_or_else(|| RuntimeError::invalid_resource_id(id, "has no parent resource"))?;
    Ok(Some(parent.name().to_string()))
}

impl<I, P, M> std::fmt::Debug for ParentedResourceBuilder<I, P, M>
where
    I: InnerResource,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParentedResourceBuilder")
            .field("name", &self.name)
            .field("id", &self.id())
            .field("group_name", &self.group_name)
            .field("parent_name", &self.parent_name)
            .field("pending_parent_key", &self.pending_parent_key)
            .field("tasks", &self.tasks)
            .finish()
    }
}
