use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::{ConduitError, FileData};

/// File-to-file staging transform run before upload.
///
/// Implementations read a JSON array of extracted elements and write the
/// destination-native rendition of the same sequence: one output record
/// per input record, input order preserved, no filtering or merging.
/// Staging is single-pass — feeding a staged file back through the
/// transform is not supported.
#[async_trait]
pub trait UploadStager: Send + Sync {
    /// Stage `elements_path` into `output_dir/output_filename.json` and
    /// return the written path.
    ///
    /// A malformed input file or an unwritable output directory fails the
    /// call with [`ConduitError::Staging`]; no partially-written output is
    /// left behind at the returned path.
    async fn run(
        &self,
        elements_path: &Path,
        file_data: &FileData,
        output_dir: &Path,
        output_filename: &str,
    ) -> Result<PathBuf, ConduitError>;
}
