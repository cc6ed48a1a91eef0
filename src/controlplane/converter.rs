//! Stretch Request Builder & Submitter
//!
//! Validates resolved references against the topology invariants, builds the
//! `StretchTopology` descriptor, and submits it through the management plane
//! port exactly once. No retry, no local state retained afterward.

use crate::controlplane::resolver::ResolvedTopology;
use crate::controlplane::with_cancel;
use crate::domain::ports::{ConversionResult, ManagementPlaneRef, ObjectReference};
use crate::domain::topology::{FaultDomain, StretchTopology};
use crate::error::Result;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Default name of the primary fault domain
pub const DEFAULT_PRIMARY_NAME: &str = "Primary";

/// Default name of the secondary fault domain
pub const DEFAULT_SECONDARY_NAME: &str = "Secondary";

// =============================================================================
// Conversion Request
// =============================================================================

/// Resolved inputs for one conversion attempt
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub cluster: ObjectReference,
    pub primary_name: String,
    pub primary_hosts: Vec<ObjectReference>,
    pub secondary_name: String,
    pub secondary_hosts: Vec<ObjectReference>,
    pub witness: ObjectReference,
    /// Name of the domain that wins quorum tie-breaks
    pub preferred: String,
    /// Opaque disk mapping, passed through to the wire verbatim
    pub disk_mapping: Option<serde_json::Value>,
}

impl ConversionRequest {
    /// Build a request from resolved references with the default domain
    /// names, preferring the primary domain.
    pub fn from_resolved(resolved: ResolvedTopology) -> Self {
        Self {
            cluster: resolved.cluster,
            primary_name: DEFAULT_PRIMARY_NAME.into(),
            primary_hosts: resolved.primary_hosts,
            secondary_name: DEFAULT_SECONDARY_NAME.into(),
            secondary_hosts: resolved.secondary_hosts,
            witness: resolved.witness,
            preferred: DEFAULT_PRIMARY_NAME.into(),
            disk_mapping: None,
        }
    }

    /// Override the fault domain names
    pub fn with_domain_names(
        mut self,
        primary: impl Into<String>,
        secondary: impl Into<String>,
    ) -> Self {
        self.primary_name = primary.into();
        self.secondary_name = secondary.into();
        self
    }

    /// Override the preferred domain name
    pub fn with_preferred(mut self, preferred: impl Into<String>) -> Self {
        self.preferred = preferred.into();
        self
    }

    /// Attach an opaque disk mapping
    pub fn with_disk_mapping(mut self, mapping: serde_json::Value) -> Self {
        self.disk_mapping = Some(mapping);
        self
    }
}

// =============================================================================
// Conversion Phases
// =============================================================================

/// Per-invocation conversion phases. Never re-entered; each invocation is a
/// fresh run ending in Rejected, Succeeded, or Failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Validating,
    Rejected,
    Submitting,
    Succeeded,
    Failed,
}

fn transition(phase: &mut Phase, next: Phase) {
    debug!("Conversion phase: {:?} -> {:?}", phase, next);
    *phase = next;
}

// =============================================================================
// Stretch Converter
// =============================================================================

/// Builds and submits stretch conversion requests
pub struct StretchConverter {
    plane: ManagementPlaneRef,
}

impl StretchConverter {
    /// Create a converter over a management plane
    pub fn new(plane: ManagementPlaneRef) -> Self {
        Self { plane }
    }

    /// Validate the request, build the topology descriptor, and submit it.
    ///
    /// Validation failures short-circuit before any network call; the remote
    /// call is made at most once per invocation.
    pub async fn convert(
        &self,
        request: ConversionRequest,
        cancel: &CancellationToken,
    ) -> Result<ConversionResult> {
        let mut phase = Phase::Idle;

        transition(&mut phase, Phase::Validating);
        let topology = match Self::build_topology(request) {
            Ok(topology) => topology,
            Err(err) => {
                transition(&mut phase, Phase::Rejected);
                warn!("Conversion rejected before submission: {}", err);
                return Err(err);
            }
        };

        info!(
            "Submitting stretch conversion: cluster {}, domains \"{}\"/\"{}\" ({} hosts), witness {}, preferred \"{}\"",
            topology.cluster(),
            topology.primary().name(),
            topology.secondary().name(),
            topology.host_count(),
            topology.witness(),
            topology.preferred()
        );

        transition(&mut phase, Phase::Submitting);
        match with_cancel(cancel, self.plane.submit_stretch_conversion(&topology)).await {
            Ok(result) => {
                transition(&mut phase, Phase::Succeeded);
                info!(
                    "Conversion accepted: status {}, task {}",
                    result.status,
                    result.task_id.as_deref().unwrap_or("-")
                );
                Ok(result)
            }
            Err(err) => {
                transition(&mut phase, Phase::Failed);
                warn!("Conversion failed: {}", err);
                Err(err)
            }
        }
    }

    /// Enforce the topology invariants and assemble the descriptor
    fn build_topology(request: ConversionRequest) -> Result<StretchTopology> {
        let primary = FaultDomain::new(request.primary_name, request.primary_hosts)?;
        let secondary = FaultDomain::new(request.secondary_name, request.secondary_hosts)?;

        StretchTopology::assemble(
            request.cluster,
            primary,
            secondary,
            request.witness,
            request.preferred,
            request.disk_mapping,
        )
    }
}
