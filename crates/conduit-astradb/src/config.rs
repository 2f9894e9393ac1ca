use conduit_core::{ConduitError, SensitiveString};
use serde::Deserialize;
use serde_json::Value;

use crate::CONNECTOR_TYPE;

/// Credentials for the Astra DB Data API.
///
/// Both values are sensitive: the token authenticates every request and
/// the endpoint identifies the database. Neither appears in logs or
/// serialized diagnostics — see [`SensitiveString`].
#[derive(Debug, Clone, Deserialize)]
pub struct AstraAccessConfig {
    /// Application token, e.g. `AstraCS:...`.
    pub token: SensitiveString,
    /// Database API endpoint,
    /// e.g. `https://<db-id>-<region>.apps.astra.datastax.com`.
    pub api_endpoint: SensitiveString,
}

impl AstraAccessConfig {
    pub fn new(token: impl Into<String>, api_endpoint: impl Into<String>) -> Self {
        Self {
            token: SensitiveString::new(token),
            api_endpoint: SensitiveString::new(api_endpoint),
        }
    }

    /// Reject empty credentials before any network traffic.
    pub fn validate(&self) -> Result<(), ConduitError> {
        if self.token.is_empty() {
            return Err(ConduitError::Config("token must not be empty".into()));
        }
        if self.api_endpoint.is_empty() {
            return Err(ConduitError::Config("api_endpoint must not be empty".into()));
        }
        Ok(())
    }
}

/// Connection configuration: connector-type tag plus access credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct AstraConnectionConfig {
    /// Connector-type tag; always [`CONNECTOR_TYPE`](crate::CONNECTOR_TYPE).
    #[serde(default = "default_connection_type")]
    pub connection_type: String,
    pub access_config: AstraAccessConfig,
}

fn default_connection_type() -> String {
    CONNECTOR_TYPE.to_string()
}

impl AstraConnectionConfig {
    pub fn new(access_config: AstraAccessConfig) -> Self {
        Self {
            connection_type: default_connection_type(),
            access_config,
        }
    }
}

/// Stager configuration.
///
/// The Astra staging transform has no tunable fields; the type exists so
/// the registry's five slots stay uniform across connectors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AstraUploadStagerConfig {}

/// Upload destination configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AstraUploaderConfig {
    /// Name of the destination collection.
    pub collection_name: String,
    /// Vector dimensionality the collection is provisioned with.
    pub embedding_dimension: usize,
    /// Optional keyspace; the server default is used when unset.
    #[serde(default)]
    pub namespace: Option<String>,
    /// Optional indexing policy document, forwarded verbatim on
    /// collection creation and otherwise omitted.
    #[serde(default)]
    pub requested_indexing_policy: Option<Value>,
    /// Records per insert call.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_batch_size() -> usize {
    20
}

impl AstraUploaderConfig {
    /// Create a validated configuration with the default batch size.
    pub fn new(
        collection_name: impl Into<String>,
        embedding_dimension: usize,
    ) -> Result<Self, ConduitError> {
        let config = Self {
            collection_name: collection_name.into(),
            embedding_dimension,
            namespace: None,
            requested_indexing_policy: None,
            batch_size: default_batch_size(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_indexing_policy(mut self, policy: Value) -> Self {
        self.requested_indexing_policy = Some(policy);
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Reject settings the destination could never accept.
    ///
    /// Deserialized configs bypass [`new`](Self::new), so consumers
    /// validate again before first use.
    pub fn validate(&self) -> Result<(), ConduitError> {
        if self.collection_name.is_empty() {
            return Err(ConduitError::Config(
                "collection_name must not be empty".into(),
            ));
        }
        if self.embedding_dimension == 0 {
            return Err(ConduitError::Config(
                "embedding_dimension must be positive".into(),
            ));
        }
        if self.batch_size == 0 {
            return Err(ConduitError::Config("batch_size must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_applies_default_batch_size() {
        let config = AstraUploaderConfig::new("elements", 1536).unwrap();
        assert_eq!(config.batch_size, 20);
        assert!(config.namespace.is_none());
        assert!(config.requested_indexing_policy.is_none());
    }

    #[test]
    fn builders_set_optional_fields() {
        let config = AstraUploaderConfig::new("elements", 1536)
            .unwrap()
            .with_namespace("ingest")
            .with_indexing_policy(json!({"deny": ["metadata"]}))
            .with_batch_size(50);
        assert_eq!(config.namespace.as_deref(), Some("ingest"));
        assert_eq!(
            config.requested_indexing_policy,
            Some(json!({"deny": ["metadata"]}))
        );
        assert_eq!(config.batch_size, 50);
    }

    #[test]
    fn rejects_zero_dimension() {
        let err = AstraUploaderConfig::new("elements", 0).unwrap_err();
        assert!(err.to_string().contains("embedding_dimension"));
    }

    #[test]
    fn rejects_zero_batch_size() {
        let config = AstraUploaderConfig::new("elements", 1536)
            .unwrap()
            .with_batch_size(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_empty_collection_name() {
        assert!(AstraUploaderConfig::new("", 1536).is_err());
    }

    #[test]
    fn access_config_rejects_empty_credentials() {
        assert!(AstraAccessConfig::new("", "https://db.example.com")
            .validate()
            .is_err());
        assert!(AstraAccessConfig::new("AstraCS:token", "")
            .validate()
            .is_err());
        assert!(AstraAccessConfig::new("AstraCS:token", "https://db.example.com")
            .validate()
            .is_ok());
    }

    #[test]
    fn deserializes_from_host_documents() {
        let connection: AstraConnectionConfig = serde_json::from_value(json!({
            "access_config": {
                "token": "AstraCS:token",
                "api_endpoint": "https://db.example.com"
            }
        }))
        .unwrap();
        assert_eq!(connection.connection_type, CONNECTOR_TYPE);
        assert_eq!(connection.access_config.token.expose_secret(), "AstraCS:token");

        let uploader: AstraUploaderConfig = serde_json::from_value(json!({
            "collection_name": "elements",
            "embedding_dimension": 384
        }))
        .unwrap();
        assert_eq!(uploader.batch_size, 20);
        assert!(uploader.validate().is_ok());
    }

    #[test]
    fn debug_output_never_contains_credentials() {
        let connection = AstraConnectionConfig::new(AstraAccessConfig::new(
            "AstraCS:supersecret",
            "https://db.example.com",
        ));
        let rendered = format!("{connection:?}");
        assert!(!rendered.contains("supersecret"));
        assert!(!rendered.contains("db.example.com"));
    }
}
