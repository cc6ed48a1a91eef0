//! Stretch Topology Data Model
//!
//! The desired end-state of a stretched-cluster conversion: two named fault
//! domains plus a witness host. Constructors enforce the topology invariants
//! so an assembled `StretchTopology` is always safe to submit.

use crate::domain::ports::{ObjectReference, TypeTag};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

// =============================================================================
// Fault Domain
// =============================================================================

/// A named group of hosts co-located for failure isolation.
///
/// Invariants: non-empty name, non-empty duplicate-free ordered host set,
/// every member a host reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultDomain {
    name: String,
    hosts: Vec<ObjectReference>,
}

impl FaultDomain {
    /// Build a fault domain, validating the local invariants.
    pub fn new(name: impl Into<String>, hosts: Vec<ObjectReference>) -> Result<Self> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(Error::ValidationFailed(
                "fault domain name must not be empty".into(),
            ));
        }

        if hosts.is_empty() {
            return Err(Error::ValidationFailed(format!(
                "fault domain \"{}\" has no hosts",
                name
            )));
        }

        for host in &hosts {
            if !host.is_host() {
                return Err(Error::ValidationFailed(format!(
                    "fault domain \"{}\" member {} is not a host reference",
                    name, host
                )));
            }
        }

        for (i, host) in hosts.iter().enumerate() {
            if hosts[..i].contains(host) {
                return Err(Error::ValidationFailed(format!(
                    "fault domain \"{}\" lists host {} more than once",
                    name, host
                )));
            }
        }

        Ok(Self { name, hosts })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hosts(&self) -> &[ObjectReference] {
        &self.hosts
    }

    pub fn contains(&self, reference: &ObjectReference) -> bool {
        self.hosts.contains(reference)
    }
}

// =============================================================================
// Stretch Topology
// =============================================================================

/// Complete desired end-state of a stretched-cluster conversion.
///
/// Built once per invocation, submitted once, then discarded; never mutated
/// after assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StretchTopology {
    cluster: ObjectReference,
    primary: FaultDomain,
    secondary: FaultDomain,
    witness: ObjectReference,
    preferred: String,
    disk_mapping: Option<serde_json::Value>,
}

impl StretchTopology {
    /// Assemble a topology from validated parts, enforcing the cross-domain
    /// invariants.
    pub fn assemble(
        cluster: ObjectReference,
        primary: FaultDomain,
        secondary: FaultDomain,
        witness: ObjectReference,
        preferred: impl Into<String>,
        disk_mapping: Option<serde_json::Value>,
    ) -> Result<Self> {
        let preferred = preferred.into();

        if !cluster.is_cluster() {
            return Err(Error::ValidationFailed(format!(
                "{} is not a cluster reference",
                cluster
            )));
        }

        if primary.name() == secondary.name() {
            return Err(Error::ValidationFailed(format!(
                "fault domain names must be distinct, both are \"{}\"",
                primary.name()
            )));
        }

        if let Some(shared) = primary.hosts().iter().find(|h| secondary.contains(h)) {
            return Err(Error::ValidationFailed(format!(
                "host {} appears in both fault domains",
                shared
            )));
        }

        if !witness.is_host() {
            return Err(Error::ValidationFailed(format!(
                "{} is not a host reference, cannot act as witness",
                witness
            )));
        }

        if primary.contains(&witness) || secondary.contains(&witness) {
            return Err(Error::ValidationFailed(format!(
                "witness overlaps fault domain: {} is already a domain member",
                witness
            )));
        }

        if preferred != primary.name() && preferred != secondary.name() {
            return Err(Error::ValidationFailed(format!(
                "preferred domain \"{}\" matches neither \"{}\" nor \"{}\"",
                preferred,
                primary.name(),
                secondary.name()
            )));
        }

        Ok(Self {
            cluster,
            primary,
            secondary,
            witness,
            preferred,
            disk_mapping,
        })
    }

    pub fn cluster(&self) -> &ObjectReference {
        &self.cluster
    }

    pub fn primary(&self) -> &FaultDomain {
        &self.primary
    }

    pub fn secondary(&self) -> &FaultDomain {
        &self.secondary
    }

    pub fn witness(&self) -> &ObjectReference {
        &self.witness
    }

    pub fn preferred(&self) -> &str {
        &self.preferred
    }

    pub fn disk_mapping(&self) -> Option<&serde_json::Value> {
        self.disk_mapping.as_ref()
    }

    /// Total host count across both domains, witness excluded
    pub fn host_count(&self) -> usize {
        self.primary.hosts().len() + self.secondary.hosts().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn host(value: &str) -> ObjectReference {
        ObjectReference::new(TypeTag::Host, value)
    }

    fn cluster(value: &str) -> ObjectReference {
        ObjectReference::new(TypeTag::Cluster, value)
    }

    fn domain(name: &str, hosts: &[&str]) -> FaultDomain {
        FaultDomain::new(name, hosts.iter().map(|h| host(h)).collect()).unwrap()
    }

    #[test]
    fn test_fault_domain_rejects_empty() {
        assert_matches!(
            FaultDomain::new("Primary", vec![]),
            Err(Error::ValidationFailed(_))
        );
        assert_matches!(
            FaultDomain::new("", vec![host("host-1")]),
            Err(Error::ValidationFailed(_))
        );
    }

    #[test]
    fn test_fault_domain_rejects_non_host_member() {
        let result = FaultDomain::new("Primary", vec![host("host-1"), cluster("domain-c7")]);
        assert_matches!(result, Err(Error::ValidationFailed(_)));
    }

    #[test]
    fn test_fault_domain_rejects_duplicate_member() {
        let result = FaultDomain::new("Primary", vec![host("host-1"), host("host-1")]);
        assert_matches!(result, Err(Error::ValidationFailed(_)));
    }

    #[test]
    fn test_assemble_valid_topology() {
        let topology = StretchTopology::assemble(
            cluster("domain-c7"),
            domain("Primary", &["host-1"]),
            domain("Secondary", &["host-2"]),
            host("host-3"),
            "Primary",
            None,
        )
        .unwrap();

        assert_eq!(topology.preferred(), "Primary");
        assert_eq!(topology.host_count(), 2);
        assert!(topology.disk_mapping().is_none());
    }

    #[test]
    fn test_assemble_rejects_overlapping_domains() {
        let result = StretchTopology::assemble(
            cluster("domain-c7"),
            domain("Primary", &["host-1", "host-2"]),
            domain("Secondary", &["host-2"]),
            host("host-3"),
            "Primary",
            None,
        );
        assert_matches!(result, Err(Error::ValidationFailed(reason)) => {
            assert!(reason.contains("both fault domains"), "reason: {}", reason);
        });
    }

    #[test]
    fn test_assemble_rejects_witness_in_domain() {
        let result = StretchTopology::assemble(
            cluster("domain-c7"),
            domain("Primary", &["host-1"]),
            domain("Secondary", &["host-2"]),
            host("host-1"),
            "Primary",
            None,
        );
        assert_matches!(result, Err(Error::ValidationFailed(reason)) => {
            assert!(reason.contains("witness overlaps fault domain"), "reason: {}", reason);
        });
    }

    #[test]
    fn test_assemble_rejects_unknown_preferred() {
        let result = StretchTopology::assemble(
            cluster("domain-c7"),
            domain("Primary", &["host-1"]),
            domain("Secondary", &["host-2"]),
            host("host-3"),
            "Tertiary",
            None,
        );
        assert_matches!(result, Err(Error::ValidationFailed(_)));
    }

    #[test]
    fn test_assemble_rejects_duplicate_domain_names() {
        let result = StretchTopology::assemble(
            cluster("domain-c7"),
            domain("SiteA", &["host-1"]),
            domain("SiteA", &["host-2"]),
            host("host-3"),
            "SiteA",
            None,
        );
        assert_matches!(result, Err(Error::ValidationFailed(_)));
    }

    #[test]
    fn test_assemble_rejects_non_cluster_reference() {
        let result = StretchTopology::assemble(
            host("host-9"),
            domain("Primary", &["host-1"]),
            domain("Secondary", &["host-2"]),
            host("host-3"),
            "Primary",
            None,
        );
        assert_matches!(result, Err(Error::ValidationFailed(_)));
    }

    #[test]
    fn test_operator_chosen_domain_names() {
        let topology = StretchTopology::assemble(
            cluster("domain-c7"),
            domain("dc-east", &["host-1"]),
            domain("dc-west", &["host-2"]),
            host("host-3"),
            "dc-west",
            None,
        )
        .unwrap();

        assert_eq!(topology.preferred(), "dc-west");
        assert_eq!(topology.secondary().name(), "dc-west");
    }
}
