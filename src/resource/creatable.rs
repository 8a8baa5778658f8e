//! Pending-creation handles and the task group that resolves them.
//!
//! A [`Creatable`] is a not-yet-executed creation of some resource. A
//! [`TaskGroup`] collects creatables that another creation depends on, runs
//! them before the dependent task, and keeps their results so the dependent
//! task can read them back by key.
//!
//! Results are stored type-erased; [`TaskGroup::task_result`] downcasts them
//! back to the type the caller expects.

use crate::error::{RuntimeError, RuntimeResult};
use futures::future::BoxFuture;
use log::debug;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// A creation operation that has been declared but not yet executed.
pub trait Creatable<T>: Send + Sync {
    /// Key identifying this creation within a task group.
    fn key(&self) -> &str;

    /// Execute the creation.
    fn create(&self) -> BoxFuture<'_, RuntimeResult<T>>;
}

type TaskOutput = Arc<dyn Any + Send + Sync>;

trait DependencyTask: Send + Sync {
    fn key(&self) -> &str;
    fn run(&self) -> BoxFuture<'_, RuntimeResult<TaskOutput>>;
}

struct ErasedCreatable<T>(Arc<dyn Creatable<T>>);

impl<T: Send + Sync + 'static> DependencyTask for ErasedCreatable<T> {
    fn key(&self) -> &str {
        self.0.key()
    }

    fn run(&self) -> BoxFuture<'_, RuntimeResult<TaskOutput>> {
        Box::pin(async move {
            let created = self.0.create().await?;
            Ok(Arc::new(created) as TaskOutput)
        })
    }
}

/// Registry of the creations a task depends on, together with their results.
pub struct TaskGroup {
    key: String,
    dependencies: Vec<Box<dyn DependencyTask>>,
    results: HashMap<String, TaskOutput>,
}

impl TaskGroup {
    /// Create an empty task group for the task identified by `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            dependencies: Vec::new(),
            results: HashMap::new(),
        }
    }

    /// Key of the task owning this group.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Register `creatable` as a dependency and return the key its result
    /// will be stored under.
    ///
    /// Registering the same key twice keeps the first registration.
    pub fn add_dependency<T>(&mut self, creatable: Arc<dyn Creatable<T>>) -> String
    where
        T: Send + Sync + 'static,
    {
        let key = creatable.key().to_string();
        if self.has_dependency(&key) {
            debug!("Task '{}' already depends on '{}'", self.key, key);
            return key;
        }

        debug!("Task '{}' now depends on '{}'", self.key, key);
        self.dependencies.push(Box::new(ErasedCreatable(creatable)));
        key
    }

    /// Whether a dependency with `key` has been registered.
    pub fn has_dependency(&self, key: &str) -> bool {
        self.dependencies.iter().any(|task| task.key() == key)
    }

    /// Keys of all registered dependencies, in registration order.
    pub fn dependency_keys(&self) -> Vec<&str> {
        self.dependencies.iter().map(|task| task.key()).collect()
    }

    /// Whether the dependency with `key` has run and produced a result.
    pub fn is_completed(&self, key: &str) -> bool {
        self.results.contains_key(key)
    }

    /// Run every dependency that has not completed yet, in registration order.
    ///
    /// Stops at the first failing dependency and returns its error unchanged.
    /// Dependencies that already completed are not run again.
    pub async fn invoke_dependencies(&mut self) -> RuntimeResult<()> {
        for task in &self.dependencies {
            if self.results.contains_key(task.key()) {
                continue;
            }

            debug!("Task '{}' running dependency '{}'", self.key, task.key());
            let output = task.run().await?;
            self.results.insert(task.key().to_string(), output);
        }
        Ok(())
    }

    /// Read back the result of a completed dependency.
    ///
    /// # Errors
    ///
    /// * [`RuntimeError::MissingTaskResult`] if the dependency has not run
    /// * [`RuntimeError::TaskResultTypeMismatch`] if it produced another type
    pub fn task_result<T>(&self, key: &str) -> RuntimeResult<T>
    where
        T: Clone + 'static,
    {
        let output = self
            .results
            .get(key)
            .ok_or_else(|| RuntimeError::missing_task_result(key))?;

        (**output)
            .downcast_ref::<T>()
            .cloned()
            .ok_or_else(|| RuntimeError::TaskResultTypeMismatch {
                key: key.to_string(),
            })
    }
}

impl std::fmt::Debug for TaskGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskGroup")
            .field("key", &self.key)
            .field("dependencies", &self.dependency_keys())
            .field("completed", &self.results.keys().collect::<Vec<_>>())
            .finish()
    }
}
