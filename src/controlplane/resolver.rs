//! Topology Resolver
//!
//! Translates operator-supplied inventory paths into object references the
//! management plane can act on. Resolution is read-only, strictly sequential
//! (cluster, primary hosts, secondary hosts, witness), and aborts on the
//! first failure so a partial topology is never handed to the converter.

use crate::controlplane::with_cancel;
use crate::domain::ports::{DirectoryServiceRef, ObjectReference, TypeTag};
use crate::error::{Error, Result};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

// =============================================================================
// Resolver Input/Output
// =============================================================================

/// Operator-supplied inventory paths for one conversion
#[derive(Debug, Clone)]
pub struct TopologyPaths {
    /// Path of the cluster to convert
    pub cluster: String,
    /// Paths of the hosts forming the primary fault domain
    pub primary_hosts: Vec<String>,
    /// Paths of the hosts forming the secondary fault domain
    pub secondary_hosts: Vec<String>,
    /// Path of the witness host
    pub witness: String,
}

/// Fully resolved references for one conversion
#[derive(Debug, Clone)]
pub struct ResolvedTopology {
    pub cluster: ObjectReference,
    pub primary_hosts: Vec<ObjectReference>,
    pub secondary_hosts: Vec<ObjectReference>,
    pub witness: ObjectReference,
}

// =============================================================================
// Topology Resolver
// =============================================================================

/// Resolves inventory paths through the directory service port
pub struct TopologyResolver {
    directory: DirectoryServiceRef,
    /// Datacenter used to qualify relative paths
    datacenter: Option<String>,
}

impl TopologyResolver {
    /// Create a resolver over a directory service
    pub fn new(directory: DirectoryServiceRef) -> Self {
        Self {
            directory,
            datacenter: None,
        }
    }

    /// Qualify relative paths against this datacenter
    pub fn with_datacenter(mut self, datacenter: impl Into<String>) -> Self {
        self.datacenter = Some(datacenter.into());
        self
    }

    /// Resolve a cluster path to a cluster reference
    pub async fn resolve_cluster(&self, path: &str) -> Result<ObjectReference> {
        let path = self.qualify(path)?;
        debug!("Resolving cluster path: {}", path);
        self.directory.resolve(&path, TypeTag::Cluster).await
    }

    /// Resolve a host path to a host reference
    pub async fn resolve_host(&self, path: &str) -> Result<ObjectReference> {
        let path = self.qualify(path)?;
        debug!("Resolving host path: {}", path);
        self.directory.resolve(&path, TypeTag::Host).await
    }

    /// Resolve every path of a topology, in the fixed order cluster,
    /// primary hosts, secondary hosts, witness. The first failure aborts
    /// the whole workflow.
    pub async fn resolve(
        &self,
        paths: &TopologyPaths,
        cancel: &CancellationToken,
    ) -> Result<ResolvedTopology> {
        info!(
            "Resolving topology: cluster {}, {} primary host(s), {} secondary host(s), witness {}",
            paths.cluster,
            paths.primary_hosts.len(),
            paths.secondary_hosts.len(),
            paths.witness
        );

        let cluster = with_cancel(cancel, self.resolve_cluster(&paths.cluster)).await?;

        let mut primary_hosts = Vec::with_capacity(paths.primary_hosts.len());
        for path in &paths.primary_hosts {
            primary_hosts.push(with_cancel(cancel, self.resolve_host(path)).await?);
        }

        let mut secondary_hosts = Vec::with_capacity(paths.secondary_hosts.len());
        for path in &paths.secondary_hosts {
            secondary_hosts.push(with_cancel(cancel, self.resolve_host(path)).await?);
        }

        let witness = with_cancel(cancel, self.resolve_host(&paths.witness)).await?;

        debug!("Resolved topology: cluster {}, witness {}", cluster, witness);

        Ok(ResolvedTopology {
            cluster,
            primary_hosts,
            secondary_hosts,
            witness,
        })
    }

    /// Qualify a relative path against the configured datacenter. Absolute
    /// paths pass through untouched.
    fn qualify(&self, path: &str) -> Result<String> {
        if path.starts_with('/') {
            return Ok(path.to_string());
        }

        match &self.datacenter {
            Some(datacenter) => Ok(format!("/{}/host/{}", datacenter, path)),
            None => Err(Error::Configuration(format!(
                "relative inventory path \"{}\" requires a datacenter",
                path
            ))),
        }
    }
}
