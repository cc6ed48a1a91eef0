//! Domain Ports - Core trait definitions for the stretch conversion tool
//!
//! These traits define the boundaries between the conversion workflow and the
//! remote systems it depends on. Adapters implement these traits to provide
//! concrete functionality.

use crate::domain::topology::StretchTopology;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// =============================================================================
// Inventory Types
// =============================================================================

/// Type tag of a managed inventory object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    Cluster,
    Host,
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeTag::Cluster => write!(f, "cluster"),
            TypeTag::Host => write!(f, "host"),
        }
    }
}

/// Opaque, typed identifier for a managed inventory object.
///
/// References are produced by directory resolution and echoed back to the
/// management plane; workflow code never invents them. Two references are
/// equal iff both the type tag and the value match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectReference {
    #[serde(rename = "type")]
    type_tag: TypeTag,
    value: String,
}

impl ObjectReference {
    /// Create a reference. Reserved for directory adapters and test doubles.
    pub fn new(type_tag: TypeTag, value: impl Into<String>) -> Self {
        Self {
            type_tag,
            value: value.into(),
        }
    }

    pub fn type_tag(&self) -> TypeTag {
        self.type_tag
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_cluster(&self) -> bool {
        self.type_tag == TypeTag::Cluster
    }

    pub fn is_host(&self) -> bool {
        self.type_tag == TypeTag::Host
    }
}

impl std::fmt::Display for ObjectReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.type_tag, self.value)
    }
}

// =============================================================================
// Conversion Acknowledgement
// =============================================================================

/// Acknowledgement returned by the management plane for a conversion request.
///
/// Opaque beyond success signaling; the task id, when present, identifies the
/// server-side operation but is never polled by this tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Server-side task identifier, if the plane tracks one
    pub task_id: Option<String>,
    /// Raw status string as reported by the plane
    pub status: String,
    /// When the acknowledgement was received
    pub received_at: chrono::DateTime<chrono::Utc>,
}

// =============================================================================
// Directory Service Port
// =============================================================================

/// Port for inventory path resolution
#[async_trait]
pub trait DirectoryService: Send + Sync {
    /// Resolve an inventory path to the single object of the expected type.
    ///
    /// Fails with `NotFound` when nothing matches, `AmbiguousPath` when more
    /// than one object matches, `WrongType` when the match has another type.
    async fn resolve(&self, path: &str, expected: TypeTag) -> Result<ObjectReference>;
}

// =============================================================================
// Management Plane Port
// =============================================================================

/// Port for the stretch-conversion RPC
#[async_trait]
pub trait ManagementPlane: Send + Sync {
    /// Submit a stretched-cluster conversion. Exactly one attempt; any
    /// remote fault surfaces as `RequestRejected`.
    async fn submit_stretch_conversion(
        &self,
        topology: &StretchTopology,
    ) -> Result<ConversionResult>;
}

// =============================================================================
// Type Aliases for Arc'd Traits
// =============================================================================

pub type DirectoryServiceRef = Arc<dyn DirectoryService>;
pub type ManagementPlaneRef = Arc<dyn ManagementPlane>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_tag_display() {
        assert_eq!(format!("{}", TypeTag::Cluster), "cluster");
        assert_eq!(format!("{}", TypeTag::Host), "host");
    }

    #[test]
    fn test_reference_equality() {
        let a = ObjectReference::new(TypeTag::Host, "host-12");
        let b = ObjectReference::new(TypeTag::Host, "host-12");
        let c = ObjectReference::new(TypeTag::Cluster, "host-12");
        let d = ObjectReference::new(TypeTag::Host, "host-13");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_reference_wire_shape() {
        let r = ObjectReference::new(TypeTag::Cluster, "domain-c7");
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["type"], "cluster");
        assert_eq!(json["value"], "domain-c7");
    }
}
