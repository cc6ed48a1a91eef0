//! stretchctl - Stretched-Cluster Conversion Tool
//!
//! Converts a storage cluster from a single, symmetric topology into a
//! stretched topology: two fault domains plus a witness host arbitrating
//! split-brain scenarios.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Conversion Workflow                      │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────┐      ┌───────────────────────────┐  │
//! │  │  Topology Resolver  │ ───> │  Stretch Converter        │  │
//! │  │  (paths -> refs)    │      │  (validate + submit once) │  │
//! │  └──────────┬──────────┘      └─────────────┬─────────────┘  │
//! ├─────────────┼───────────────────────────────┼────────────────┤
//! │  ┌──────────┴──────────┐      ┌─────────────┴─────────────┐  │
//! │  │  Directory Service  │      │  Management Plane         │  │
//! │  │  (REST inventory)   │      │  (REST stretch request)   │  │
//! │  └─────────────────────┘      └───────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`controlplane`]: Resolution and conversion workflow
//! - [`domain`]: Topology data model and port definitions
//! - [`remote`]: REST adapters for the directory and management plane
//! - [`error`]: Error types and handling

pub mod controlplane;
pub mod domain;
pub mod error;
pub mod remote;

// Re-export commonly used types
pub use controlplane::{
    ConversionRequest, ResolvedTopology, StretchConverter, TopologyPaths, TopologyResolver,
};

pub use domain::ports::{
    ConversionResult, DirectoryService, DirectoryServiceRef, ManagementPlane, ManagementPlaneRef,
    ObjectReference, TypeTag,
};

pub use domain::topology::{FaultDomain, StretchTopology};

pub use error::{Error, Result};

pub use remote::{RemoteConfig, RestDirectory, RestManagementPlane};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
