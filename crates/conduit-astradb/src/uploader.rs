use async_trait::async_trait;
use conduit_core::{batches, ConduitError, UploadContent, Uploader};
use serde_json::Value;
use tokio::fs;

use crate::client::{AstraClient, AstraCollection};
use crate::{AstraConnectionConfig, AstraUploaderConfig, CONNECTOR_TYPE};

/// Insert surface of a provisioned collection.
///
/// The batched write loop runs against this seam, so the upload protocol
/// can be exercised without a live Data API endpoint.
#[async_trait]
pub trait DocumentCollection: Send + Sync {
    /// Insert one batch of documents in a single call.
    async fn insert_many(&self, documents: &[Value]) -> Result<(), ConduitError>;
}

/// Uploads staged Astra documents in fixed-size batches.
///
/// One [`run`](Uploader::run) is a single upload run: the destination
/// collection is provisioned (idempotently) at the start, every staged
/// file is concatenated in the order supplied, and the combined sequence
/// is written one batch at a time. A failed batch aborts the rest of the
/// run; batches already submitted stay committed on the remote side.
pub struct AstraUploader {
    connection_config: AstraConnectionConfig,
    upload_config: AstraUploaderConfig,
}

impl AstraUploader {
    /// Build an uploader, validating both configs before any I/O.
    pub fn new(
        connection_config: AstraConnectionConfig,
        upload_config: AstraUploaderConfig,
    ) -> Result<Self, ConduitError> {
        connection_config.access_config.validate()?;
        upload_config.validate()?;
        Ok(Self {
            connection_config,
            upload_config,
        })
    }

    /// Obtain the destination collection, creating it if necessary.
    ///
    /// Re-running against an existing, compatibly-sized collection
    /// succeeds; a dimension conflict surfaces as
    /// [`ConduitError::Provisioning`] naming the collection and the
    /// requested dimension.
    pub async fn get_collection(&self) -> Result<AstraCollection, ConduitError> {
        let client = AstraClient::new(
            &self.connection_config.access_config,
            self.upload_config.namespace.as_deref(),
        )?;
        client
            .create_collection(
                &self.upload_config.collection_name,
                self.upload_config.embedding_dimension,
                self.upload_config.requested_indexing_policy.as_ref(),
            )
            .await
    }

    /// Read and concatenate the staged records from every file, in order.
    async fn collect_records(contents: &[UploadContent]) -> Result<Vec<Value>, ConduitError> {
        let mut records = Vec::new();
        for content in contents {
            let raw = fs::read_to_string(&content.path).await.map_err(|e| {
                ConduitError::Write(format!("failed to read {}: {e}", content.path.display()))
            })?;
            let staged: Vec<Value> = serde_json::from_str(&raw).map_err(|e| {
                ConduitError::Write(format!("failed to parse {}: {e}", content.path.display()))
            })?;
            records.extend(staged);
        }
        Ok(records)
    }

    /// Submit `records` through `collection`, one batch at a time.
    async fn write_batches(
        &self,
        collection: &dyn DocumentCollection,
        records: &[Value],
    ) -> Result<(), ConduitError> {
        for (index, batch) in batches(records, self.upload_config.batch_size).enumerate() {
            collection.insert_many(batch).await.map_err(|e| {
                let cause = match e {
                    ConduitError::Write(msg) => msg,
                    other => other.to_string(),
                };
                ConduitError::Write(format!(
                    "batch {index} ({} records) into collection '{}' failed: {cause}",
                    batch.len(),
                    self.upload_config.collection_name
                ))
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl Uploader for AstraUploader {
    fn connector_type(&self) -> &'static str {
        CONNECTOR_TYPE
    }

    async fn run(&self, contents: &[UploadContent]) -> Result<(), ConduitError> {
        let records = Self::collect_records(contents).await?;

        tracing::info!(
            "writing {} objects to destination collection {}",
            records.len(),
            self.upload_config.collection_name
        );

        let collection = self.get_collection().await?;
        self.write_batches(&collection, &records).await
    }
}
