//! REST Management Plane Adapter
//!
//! Serializes a `StretchTopology` into the management plane's wire format and
//! submits it as a single conversion request. One attempt per call; the
//! caller decides what a fault means.

use crate::domain::ports::{ConversionResult, ManagementPlane, ObjectReference};
use crate::domain::topology::StretchTopology;
use crate::error::{Error, Result};
use crate::remote::RemoteConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

// =============================================================================
// Wire Types
// =============================================================================

/// Fault domain block of the conversion request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct FaultDomainConfigBody {
    first_fd_name: String,
    first_fd_hosts: Vec<ObjectReference>,
    second_fd_name: String,
    second_fd_hosts: Vec<ObjectReference>,
}

/// Conversion request as the management plane expects it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct StretchConversionBody {
    cluster: ObjectReference,
    fault_domain_config: FaultDomainConfigBody,
    witness_host: ObjectReference,
    preferred_fd: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    disk_mapping: Option<serde_json::Value>,
}

impl StretchConversionBody {
    fn from_topology(topology: &StretchTopology) -> Self {
        Self {
            cluster: topology.cluster().clone(),
            fault_domain_config: FaultDomainConfigBody {
                first_fd_name: topology.primary().name().to_string(),
                first_fd_hosts: topology.primary().hosts().to_vec(),
                second_fd_name: topology.secondary().name().to_string(),
                second_fd_hosts: topology.secondary().hosts().to_vec(),
            },
            witness_host: topology.witness().clone(),
            preferred_fd: topology.preferred().to_string(),
            disk_mapping: topology.disk_mapping().cloned(),
        }
    }
}

/// Acknowledgement body on success
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConversionAck {
    #[serde(default)]
    task_id: Option<String>,
    #[serde(default = "default_status")]
    status: String,
}

fn default_status() -> String {
    "accepted".to_string()
}

/// Structured fault envelope on rejection
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FaultEnvelope {
    fault: FaultBody,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FaultBody {
    #[serde(default = "default_fault_code")]
    code: String,
    message: String,
}

fn default_fault_code() -> String {
    "Fault".to_string()
}

// =============================================================================
// REST Management Plane
// =============================================================================

/// Management plane adapter over the cluster REST API
pub struct RestManagementPlane {
    config: RemoteConfig,
    client: reqwest::Client,
}

impl RestManagementPlane {
    /// Create a management plane client from connection configuration
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let client = config.http_client()?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl ManagementPlane for RestManagementPlane {
    async fn submit_stretch_conversion(
        &self,
        topology: &StretchTopology,
    ) -> Result<ConversionResult> {
        let url = self.config.url("cluster/stretch");
        let body = StretchConversionBody::from_topology(topology);

        debug!("POST {} for cluster {}", url, topology.cluster());

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let ack: ConversionAck = response.json().await?;
            info!(
                "Management plane accepted conversion for {}: {}",
                topology.cluster(),
                ack.status
            );
            return Ok(ConversionResult {
                task_id: ack.task_id,
                status: ack.status,
                received_at: chrono::Utc::now(),
            });
        }

        // Surface the structured fault when there is one, the raw body
        // otherwise. The detail travels unchanged to the caller.
        let raw = response.text().await.unwrap_or_default();
        match serde_json::from_str::<FaultEnvelope>(&raw) {
            Ok(envelope) => Err(Error::RequestRejected {
                code: envelope.fault.code,
                message: envelope.fault.message,
            }),
            Err(_) => Err(Error::RequestRejected {
                code: status.to_string(),
                message: if raw.is_empty() {
                    "no fault detail provided".to_string()
                } else {
                    raw
                },
            }),
        }
    }
}
