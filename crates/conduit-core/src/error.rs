use thiserror::Error;

/// Error type shared by all Conduit destination connectors.
///
/// Each variant maps to one failure domain of a pipeline stage.
/// `Config` failures are raised before any I/O; `Staging` failures are
/// fatal per elements file; `Provisioning` failures abort an upload run
/// before any batch is sent; `Write` failures abort the remaining
/// batches of a run while leaving already-submitted batches committed.
#[derive(Error, Debug)]
pub enum ConduitError {
    /// Missing or invalid configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Staging an elements file failed (malformed input or output I/O).
    #[error("staging error: {0}")]
    Staging(String),

    /// The destination collection could not be provisioned.
    #[error("provisioning error: {0}")]
    Provisioning(String),

    /// A batched write against the destination failed.
    #[error("write error: {0}")]
    Write(String),
}
