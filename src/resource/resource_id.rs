//! ResourceId value object for ARM resource identifiers.
//!
//! This module provides a parsed, type-safe view over the slash-delimited
//! identifiers used by the resource manager:
//!
//! ```text
//! /subscriptions/{sub}/resourceGroups/{group}/providers/{namespace}/{type}/{name}[/{childType}/{childName}]...
//! ```
//!
//! The identifier is validated once at construction; accessors never fail.

use crate::error::{RuntimeError, RuntimeResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const SUBSCRIPTIONS: &str = "subscriptions";
const RESOURCE_GROUPS: &str = "resourceGroups";
const PROVIDERS: &str = "providers";

/// A validated resource identifier.
///
/// ## Validation Rules
///
/// - Must start with `/`
/// - Must not contain empty segments
/// - Segments must come in key/value pairs
/// - The first pair must be `subscriptions/{id}`
///
/// ## Examples
///
/// ```rust
/// use arm_client_runtime::resource::ResourceId;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let id: ResourceId =
///         "/subscriptions/S/resourceGroups/RG/providers/Microsoft.Sql/servers/srv1/databases/db1"
///             .parse()?;
///     assert_eq!(id.resource_group_name(), Some("RG"));
///     assert_eq!(id.name(), "db1");
///     assert_eq!(id.parent().map(|p| p.name().to_string()), Some("srv1".to_string()));
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId {
    id: String,
    segments: Vec<String>,
    // Index of the `providers` key within `segments`, if any.
    providers_at: Option<usize>,
}

impl ResourceId {
    /// Parse a resource identifier string.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::InvalidResourceId`] when the string violates any
    /// of the validation rules listed on the type.
    pub fn from_string(id: &str) -> RuntimeResult<Self> {
        let rest = id
            .strip_prefix('/')
            .ok_or_else(|| RuntimeError::invalid_resource_id(id, "must start with '/'"))?;

        let segments: Vec<String> = rest.split('/').map(str::to_string).collect();

        if segments.iter().any(String::is_empty) {
            return Err(RuntimeError::invalid_resource_id(id, "contains an empty segment"));
        }
        if segments.len() % 2 != 0 {
            return Err(RuntimeError::invalid_resource_id(
                id,
                "segments must come in key/value pairs",
            ));
        }
        if !segments[0].eq_ignore_ascii_case(SUBSCRIPTIONS) {
            return Err(RuntimeError::invalid_resource_id(
                id,
                "must start with a subscriptions segment",
            ));
        }

        let providers_at = segments
            .iter()
            .step_by(2)
            .position(|key| key.eq_ignore_ascii_case(PROVIDERS))
            .map(|pair| pair * 2);

        if let Some(at) = providers_at {
            // providers/{namespace} must be followed by at least one type/name pair
            if segments.len() < at + 4 {
                return Err(RuntimeError::invalid_resource_id(
                    id,
                    "provider namespace must be followed by a resource type and name",
                ));
            }
        }

        Ok(Self {
            id: id.to_string(),
            segments,
            providers_at,
        })
    }

    /// The full identifier string.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The subscription the resource lives in.
    pub fn subscription_id(&self) -> &str {
        &self.segments[1]
    }

    /// The resource group, when the identifier is scoped to one.
    pub fn resource_group_name(&self) -> Option<&str> {
        self.value_of(RESOURCE_GROUPS)
    }

    /// The provider namespace, e.g. `Microsoft.Sql`.
    pub fn provider_namespace(&self) -> Option<&str> {
        self.providers_at.map(|at| self.segments[at + 1].as_str())
    }

    /// The fully-qualified resource type, e.g. `Microsoft.Sql/servers/databases`.
    ///
    /// Identifiers without a provider section report the key of their last
    /// pair, so a resource group id yields `resourceGroups`.
    pub fn resource_type(&self) -> String {
        match self.providers_at {
            Some(at) => {
                let mut parts = vec![self.segments[at + 1].as_str()];
                parts.extend(self.segments[at + 2..].iter().step_by(2).map(String::as_str));
                parts.join("/")
            }
            None => self.segments[self.segments.len() - 2].clone(),
        }
    }

    /// The name of the resource, i.e. the last segment.
    pub fn name(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    /// The identifier of the immediate parent resource.
    ///
    /// Only nested provider resources have a parent; a top-level provider
    /// resource, a resource group or a subscription returns `None`.
    pub fn parent(&self) -> Option<ResourceId> {
        let at = self.providers_at?;
        // providers, namespace, then type/name pairs
        let pairs = (self.segments.len() - at - 2) / 2;
        if pairs < 2 {
            return None;
        }

        let parent_segments = self.segments[..self.segments.len() - 2].to_vec();
        let id = format!("/{}", parent_segments.join("/"));
        Some(Self {
            id,
            segments: parent_segments,
            providers_at: self.providers_at,
        })
    }

    fn value_of(&self, key: &str) -> Option<&str> {
        self.segments
            .chunks_exact(2)
            .find(|pair| pair[0].eq_ignore_ascii_case(key))
            .map(|pair| pair[1].as_str())
    }
}

/// Extract the resource group name from an identifier string.
///
/// This is deliberately lenient: it only looks for a `resourceGroups/{name}`
/// pair and does not validate the rest of the identifier.
pub fn group_from_resource_id(id: &str) -> Option<String> {
    let mut segments = id.split('/').filter(|s| !s.is_empty());
    while let Some(segment) = segments.next() {
        if segment.eq_ignore_ascii_case(RESOURCE_GROUPS) {
            return segments.next().map(str::to_string);
        }
    }
    None
}

impl FromStr for ResourceId {
    type Err = RuntimeError;

    fn from_str(s: &str) -> RuntimeResult<Self> {
        Self::from_string(s)
    }
}

impl TryFrom<&str> for ResourceId {
    type Error = RuntimeError;

    fn try_from(value: &str) -> RuntimeResult<Self> {
        Self::from_string(value)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl Serialize for ResourceId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.id.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::from_string(&value).map_err(serde::de::Error::custom)
    }
}
