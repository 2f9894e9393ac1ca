//! Astra DB destination connector for Conduit.
//!
//! This crate provides the two pipeline components for writing extracted
//! document elements into [Astra DB](https://www.datastax.com/products/datastax-astra)
//! vector collections: [`AstraUploadStager`], which conforms elements
//! into the Astra document shape (`$vector` / `content` / `metadata`),
//! and [`AstraUploader`], which provisions the destination collection
//! and writes staged records through the Data API in fixed-size batches.
//!
//! # Example
//!
//! ```rust,no_run
//! use conduit_astradb::{
//!     AstraAccessConfig, AstraConnectionConfig, AstraUploader, AstraUploaderConfig,
//!     UploadContent, Uploader,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let access = AstraAccessConfig::new(
//!     "AstraCS:...",
//!     "https://<db-id>-<region>.apps.astra.datastax.com",
//! );
//! let connection = AstraConnectionConfig::new(access);
//! let config = AstraUploaderConfig::new("my_collection", 1536)?;
//!
//! let uploader = AstraUploader::new(connection, config)?;
//! uploader.run(&[UploadContent::new("staged/elements.json")]).await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod stager;
mod uploader;

pub use client::{AstraClient, AstraCollection};
pub use config::{
    AstraAccessConfig, AstraConnectionConfig, AstraUploadStagerConfig, AstraUploaderConfig,
};
pub use stager::AstraUploadStager;
pub use uploader::{AstraUploader, DocumentCollection};

// Re-export core types for convenience.
pub use conduit_core::{
    ConduitError, DestinationEntry, FileData, SensitiveString, UploadContent, UploadStager,
    Uploader,
};

use serde_json::Value;

/// Connector-type tag the host pipeline registry resolves.
pub const CONNECTOR_TYPE: &str = "astradb";

fn parse_connection_config(raw: &Value) -> Result<AstraConnectionConfig, ConduitError> {
    let config: AstraConnectionConfig = serde_json::from_value(raw.clone())
        .map_err(|e| ConduitError::Config(format!("invalid astradb connection config: {e}")))?;
    config.access_config.validate()?;
    Ok(config)
}

fn parse_stager_config(raw: &Value) -> Result<AstraUploadStagerConfig, ConduitError> {
    serde_json::from_value(raw.clone())
        .map_err(|e| ConduitError::Config(format!("invalid astradb stager config: {e}")))
}

fn parse_uploader_config(raw: &Value) -> Result<AstraUploaderConfig, ConduitError> {
    let config: AstraUploaderConfig = serde_json::from_value(raw.clone())
        .map_err(|e| ConduitError::Config(format!("invalid astradb uploader config: {e}")))?;
    config.validate()?;
    Ok(config)
}

/// The five-slot destination registry entry for [`CONNECTOR_TYPE`].
///
/// Hosts register this under `"astradb"` once at pipeline-build time:
///
/// ```rust
/// use conduit_astradb::{astradb_destination_entry, CONNECTOR_TYPE};
/// use conduit_core::DestinationRegistry;
///
/// let mut registry = DestinationRegistry::new();
/// registry.register(CONNECTOR_TYPE, astradb_destination_entry());
/// ```
pub fn astradb_destination_entry() -> DestinationEntry {
    DestinationEntry {
        connection_config: |raw| parse_connection_config(raw).map(|_| ()),
        upload_stager_config: |raw| parse_stager_config(raw).map(|_| ()),
        upload_stager: |raw| {
            let config = parse_stager_config(raw)?;
            Ok(Box::new(AstraUploadStager::new(config)))
        },
        uploader_config: |raw| parse_uploader_config(raw).map(|_| ()),
        uploader: |connection_raw, uploader_raw| {
            let connection = parse_connection_config(connection_raw)?;
            let config = parse_uploader_config(uploader_raw)?;
            Ok(Box::new(AstraUploader::new(connection, config)?))
        },
    }
}
