//! REST Directory Adapter
//!
//! Resolves inventory paths against the management endpoint's directory API.
//! Lookups are read-only; match-count and type checks happen client-side so
//! the resolution error taxonomy is uniform across directory backends.

use crate::domain::ports::{DirectoryService, ObjectReference, TypeTag};
use crate::error::{Error, Result};
use crate::remote::RemoteConfig;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

// =============================================================================
// Wire Types
// =============================================================================

/// Directory lookup response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResolveResponse {
    #[serde(default)]
    matches: Vec<ObjectReference>,
}

// =============================================================================
// REST Directory
// =============================================================================

/// Directory service adapter over the inventory REST API
pub struct RestDirectory {
    config: RemoteConfig,
    client: reqwest::Client,
}

impl RestDirectory {
    /// Create a directory client from connection configuration
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let client = config.http_client()?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl DirectoryService for RestDirectory {
    async fn resolve(&self, path: &str, expected: TypeTag) -> Result<ObjectReference> {
        let url = format!(
            "{}?path={}&type={}",
            self.config.url("inventory/resolve"),
            urlencoding::encode(path),
            expected
        );

        debug!("Directory lookup: {} (expecting {})", path, expected);

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Protocol(format!(
                "directory lookup for {} returned {}",
                path, status
            )));
        }

        let body: ResolveResponse = response.json().await?;
        select_match(path, expected, body.matches)
    }
}

/// Map a match list to the single expected reference
fn select_match(
    path: &str,
    expected: TypeTag,
    matches: Vec<ObjectReference>,
) -> Result<ObjectReference> {
    match matches.as_slice() {
        [] => Err(Error::NotFound { path: path.into() }),
        [found] if found.type_tag() == expected => Ok(found.clone()),
        [found] => Err(Error::WrongType {
            path: path.into(),
            expected,
            actual: found.type_tag(),
        }),
        many => Err(Error::AmbiguousPath {
            path: path.into(),
            matches: many.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn host(value: &str) -> ObjectReference {
        ObjectReference::new(TypeTag::Host, value)
    }

    #[test]
    fn test_select_single_match() {
        let found = select_match("/dc1/host/c1/h1", TypeTag::Host, vec![host("host-1")]).unwrap();
        assert_eq!(found, host("host-1"));
    }

    #[test]
    fn test_select_no_match() {
        let result = select_match("/dc1/host/c1/h9", TypeTag::Host, vec![]);
        assert_matches!(result, Err(Error::NotFound { path }) => {
            assert_eq!(path, "/dc1/host/c1/h9");
        });
    }

    #[test]
    fn test_select_ambiguous() {
        let result = select_match(
            "/dc1/host/*",
            TypeTag::Host,
            vec![host("host-1"), host("host-2")],
        );
        assert_matches!(result, Err(Error::AmbiguousPath { matches: 2, .. }));
    }

    #[test]
    fn test_select_wrong_type() {
        let result = select_match(
            "/dc1/host/c1",
            TypeTag::Cluster,
            vec![host("host-1")],
        );
        assert_matches!(
            result,
            Err(Error::WrongType {
                expected: TypeTag::Cluster,
                actual: TypeTag::Host,
                ..
            })
        );
    }

    #[test]
    fn test_response_parsing() {
        let body: ResolveResponse = serde_json::from_str(
            r#"{"matches":[{"type":"cluster","value":"domain-c7"}]}"#,
        )
        .unwrap();
        assert_eq!(body.matches.len(), 1);
        assert_eq!(body.matches[0].type_tag(), TypeTag::Cluster);
        assert_eq!(body.matches[0].value(), "domain-c7");
    }

    #[test]
    fn test_response_parsing_empty() {
        let body: ResolveResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(body.matches.is_empty());
    }
}
