use std::path::{Path, PathBuf};

use async_trait::async_trait;
use conduit_core::{ConduitError, FileData, UploadStager};
use serde_json::{Map, Value};
use tokio::fs;

use crate::AstraUploadStagerConfig;

/// Stages extracted elements into the Astra document shape.
///
/// Each input element becomes one document with exactly three keys:
/// `$vector` (moved from `embeddings`), `content` (moved from `text`),
/// and `metadata` (every remaining field). A missing vector or text
/// stages as `null`. The moved keys never reappear under `metadata`.
///
/// The transform is pure: no network access, no configuration tunables,
/// output a function of the input file content alone.
#[derive(Debug, Default)]
pub struct AstraUploadStager {
    pub config: AstraUploadStagerConfig,
}

impl AstraUploadStager {
    pub fn new(config: AstraUploadStagerConfig) -> Self {
        Self { config }
    }

    /// Conform one element to the Astra document shape.
    fn conform_record(mut element: Map<String, Value>) -> Value {
        let vector = element.remove("embeddings").unwrap_or(Value::Null);
        let content = element.remove("text").unwrap_or(Value::Null);
        serde_json::json!({
            "$vector": vector,
            "content": content,
            "metadata": Value::Object(element),
        })
    }
}

#[async_trait]
impl UploadStager for AstraUploadStager {
    async fn run(
        &self,
        elements_path: &Path,
        _file_data: &FileData,
        output_dir: &Path,
        output_filename: &str,
    ) -> Result<PathBuf, ConduitError> {
        let raw = fs::read_to_string(elements_path).await.map_err(|e| {
            ConduitError::Staging(format!("failed to read {}: {e}", elements_path.display()))
        })?;
        let elements: Vec<Map<String, Value>> = serde_json::from_str(&raw).map_err(|e| {
            ConduitError::Staging(format!("failed to parse {}: {e}", elements_path.display()))
        })?;

        let staged: Vec<Value> = elements.into_iter().map(Self::conform_record).collect();
        let body = serde_json::to_string(&staged).map_err(|e| {
            ConduitError::Staging(format!("failed to serialize staged records: {e}"))
        })?;

        // Write a temp sibling first, then rename: an interrupted write
        // must never leave a truncated file at the final path.
        let output_path = output_dir.join(format!("{output_filename}.json"));
        let tmp_path = output_dir.join(format!("{output_filename}.json.tmp"));
        fs::write(&tmp_path, body).await.map_err(|e| {
            ConduitError::Staging(format!("failed to write {}: {e}", tmp_path.display()))
        })?;
        fs::rename(&tmp_path, &output_path).await.map_err(|e| {
            ConduitError::Staging(format!(
                "failed to move staged output into place at {}: {e}",
                output_path.display()
            ))
        })?;

        tracing::debug!(
            "staged {} records to {}",
            staged.len(),
            output_path.display()
        );
        Ok(output_path)
    }
}
