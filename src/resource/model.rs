//! Traits describing the models the child-resource builder works with.

use serde_json::Value;

/// The raw service representation of a resource.
///
/// The only thing the runtime needs from a raw model is its identifier: a
/// model without one has never been persisted, so the owning builder is in
/// create mode.
pub trait InnerResource {
    /// The fully-qualified resource identifier, if the service assigned one.
    fn id(&self) -> Option<&str>;
}

/// Raw JSON payloads expose their identifier through the top-level `id` field.
impl InnerResource for Value {
    fn id(&self) -> Option<&str> {
        self.get("id").and_then(Value::as_str)
    }
}

/// A resolved resource that can act as the parent of an independent child.
pub trait ParentResource {
    /// The name of the parent resource.
    fn name(&self) -> &str;

    /// The resource group the parent lives in.
    fn resource_group_name(&self) -> &str;
}
