use async_trait::async_trait;
use conduit_core::{ConduitError, SensitiveString};
use serde_json::{json, Value};

use crate::uploader::DocumentCollection;
use crate::AstraAccessConfig;

/// Keyspace used when the uploader config does not name one.
const DEFAULT_NAMESPACE: &str = "default_keyspace";

/// Minimal Astra DB Data API client.
///
/// Speaks the JSON command protocol (`createCollection`, `insertMany`)
/// over HTTPS. Retry and backoff for transient failures are not handled
/// here; they belong to the HTTP layer and the host pipeline.
#[derive(Clone)]
pub struct AstraClient {
    http: reqwest::Client,
    base_url: String,
    token: SensitiveString,
}

impl AstraClient {
    /// Build a client for one database keyspace.
    ///
    /// Requests carry the application token and a caller-identification
    /// user agent naming this crate and its version.
    pub fn new(access: &AstraAccessConfig, namespace: Option<&str>) -> Result<Self, ConduitError> {
        access.validate()?;
        let keyspace = namespace.unwrap_or(DEFAULT_NAMESPACE);
        let endpoint = access.api_endpoint.expose_secret().trim_end_matches('/');
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConduitError::Provisioning(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: format!("{endpoint}/api/json/v1/{keyspace}"),
            token: access.token.clone(),
        })
    }

    /// Obtain or create a vector collection sized to `dimension`.
    ///
    /// Creation is idempotent: an existing collection with the same
    /// settings yields a usable handle. An existing collection with
    /// different settings (a dimension conflict) and an authentication
    /// failure are both fatal.
    pub async fn create_collection(
        &self,
        name: &str,
        dimension: usize,
        indexing: Option<&Value>,
    ) -> Result<AstraCollection, ConduitError> {
        let body = create_collection_command(name, dimension, indexing);
        let response = self.command(&self.base_url, &body).await.map_err(|e| {
            ConduitError::Provisioning(format!("createCollection '{name}' failed: {e}"))
        })?;

        if let Some((code, message)) = api_error(&response) {
            return Err(ConduitError::Provisioning(format!(
                "cannot provision collection '{name}' with dimension {dimension}: {message} ({code})"
            )));
        }

        tracing::debug!("collection '{name}' ready (dimension {dimension})");
        Ok(AstraCollection {
            client: self.clone(),
            url: format!("{}/{name}", self.base_url),
            name: name.to_string(),
        })
    }

    /// POST one Data API command document and return the parsed response.
    async fn command(&self, url: &str, body: &Value) -> Result<Value, String> {
        let resp = self
            .http
            .post(url)
            .header("Token", self.token.expose_secret())
            .json(body)
            .send()
            .await
            .map_err(|e| format!("request failed: {e}"))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| format!("failed to read response: {e}"))?;
        if !status.is_success() {
            return Err(format!("HTTP {status}: {text}"));
        }
        serde_json::from_str(&text).map_err(|e| format!("invalid response body: {e}"))
    }
}

/// Handle to one provisioned collection, valid for a single upload run.
pub struct AstraCollection {
    client: AstraClient,
    url: String,
    name: String,
}

impl AstraCollection {
    /// Name of the destination collection.
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl DocumentCollection for AstraCollection {
    async fn insert_many(&self, documents: &[Value]) -> Result<(), ConduitError> {
        let body = json!({ "insertMany": { "documents": documents } });
        let response = self
            .client
            .command(&self.url, &body)
            .await
            .map_err(ConduitError::Write)?;

        if let Some((code, message)) = api_error(&response) {
            return Err(ConduitError::Write(format!("{message} ({code})")));
        }
        Ok(())
    }
}

/// Build the `createCollection` command document.
///
/// The indexing policy is forwarded verbatim when requested and omitted
/// entirely otherwise.
fn create_collection_command(name: &str, dimension: usize, indexing: Option<&Value>) -> Value {
    let mut options = json!({ "vector": { "dimension": dimension } });
    if let Some(policy) = indexing {
        options["indexing"] = policy.clone();
    }
    json!({ "createCollection": { "name": name, "options": options } })
}

/// First error entry of a Data API response envelope, if any.
fn api_error(response: &Value) -> Option<(&str, &str)> {
    let err = response.get("errors")?.as_array()?.first()?;
    let code = err.get("errorCode").and_then(Value::as_str).unwrap_or("");
    let message = err
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("unknown error");
    Some((code, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_includes_indexing_only_when_requested() {
        let without = create_collection_command("elements", 1536, None);
        assert_eq!(
            without["createCollection"]["options"]["vector"]["dimension"],
            1536
        );
        assert!(without["createCollection"]["options"]
            .get("indexing")
            .is_none());

        let policy = json!({"deny": ["metadata"]});
        let with = create_collection_command("elements", 1536, Some(&policy));
        assert_eq!(with["createCollection"]["options"]["indexing"], policy);
    }

    #[test]
    fn api_error_reads_the_error_envelope() {
        let response = json!({
            "errors": [{
                "errorCode": "EXISTING_COLLECTION_DIFFERENT_SETTINGS",
                "message": "collection already exists with different settings"
            }]
        });
        let (code, message) = api_error(&response).unwrap();
        assert_eq!(code, "EXISTING_COLLECTION_DIFFERENT_SETTINGS");
        assert!(message.contains("different settings"));

        let ok = json!({"status": {"ok": 1}});
        assert!(api_error(&ok).is_none());
    }

    #[test]
    fn client_scopes_base_url_to_keyspace() {
        let access = AstraAccessConfig::new("AstraCS:token", "https://db.example.com/");
        let client = AstraClient::new(&access, Some("ingest")).unwrap();
        assert_eq!(client.base_url, "https://db.example.com/api/json/v1/ingest");

        let default = AstraClient::new(&access, None).unwrap();
        assert_eq!(
            default.base_url,
            "https://db.example.com/api/json/v1/default_keyspace"
        );
    }

    #[test]
    fn client_rejects_empty_credentials() {
        let access = AstraAccessConfig::new("", "https://db.example.com");
        assert!(AstraClient::new(&access, None).is_err());
    }
}
