use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Identity of one source file moving through the pipeline.
///
/// The host pipeline threads this through every stager invocation. The
/// staging transform itself does not consume it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileData {
    /// Stable identifier assigned by the host pipeline.
    pub identifier: String,
    /// Original source document name, when known.
    #[serde(default)]
    pub source_name: Option<String>,
}

impl FileData {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            source_name: None,
        }
    }

    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }
}

/// One staged file handed to an [`Uploader`](crate::Uploader).
#[derive(Debug, Clone)]
pub struct UploadContent {
    /// Path to a staged JSON array produced by an
    /// [`UploadStager`](crate::UploadStager).
    pub path: PathBuf,
}

impl UploadContent {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}
