use std::collections::HashMap;

use serde_json::Value;

use crate::{ConduitError, UploadStager, Uploader};

/// Parses and validates one raw configuration document.
pub type ConfigCheck = fn(&Value) -> Result<(), ConduitError>;

/// Builds a stager from its raw config document.
pub type StagerFactory = fn(&Value) -> Result<Box<dyn UploadStager>, ConduitError>;

/// Builds an uploader from raw connection and uploader config documents.
pub type UploaderFactory = fn(&Value, &Value) -> Result<Box<dyn Uploader>, ConduitError>;

/// Factory bundle for one destination connector.
///
/// The five slots mirror the pieces the host needs to construct a
/// pipeline stage: the two component factories plus a validator for each
/// of the three configuration documents. Entries are plain function
/// references resolved once at pipeline-build time.
pub struct DestinationEntry {
    /// Validates a raw connection-config document (credentials).
    pub connection_config: ConfigCheck,
    /// Validates a raw stager-config document.
    pub upload_stager_config: ConfigCheck,
    /// Builds the stager from its config document.
    pub upload_stager: StagerFactory,
    /// Validates a raw uploader-config document (destination settings).
    pub uploader_config: ConfigCheck,
    /// Builds the uploader from connection + uploader config documents.
    pub uploader: UploaderFactory,
}

/// Mapping from connector-type name to its [`DestinationEntry`].
///
/// The host pipeline registers every available destination once at
/// startup and resolves entries by name when building stages.
#[derive(Default)]
pub struct DestinationRegistry {
    entries: HashMap<&'static str, DestinationEntry>,
}

impl DestinationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a destination connector under its type name.
    ///
    /// A later registration under the same name replaces the earlier one.
    pub fn register(&mut self, connector_type: &'static str, entry: DestinationEntry) {
        self.entries.insert(connector_type, entry);
    }

    /// Resolve a destination connector by type name.
    pub fn get(&self, connector_type: &str) -> Option<&DestinationEntry> {
        self.entries.get(connector_type)
    }

    /// Names of every registered connector.
    pub fn connector_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }
}
