use async_trait::async_trait;

use crate::{ConduitError, UploadContent};

/// Batched writer from staged files into a destination store.
///
/// One invocation of [`run`](Self::run) is a single upload run: the
/// destination resource is provisioned (idempotently) at the start of the
/// run and discarded at its end. Execution is strictly sequential; a
/// failed batch aborts the remaining batches while batches already
/// submitted stay committed on the remote side.
#[async_trait]
pub trait Uploader: Send + Sync {
    /// Connector-type tag of this uploader.
    fn connector_type(&self) -> &'static str;

    /// Upload every record from the given staged files, in order.
    async fn run(&self, contents: &[UploadContent]) -> Result<(), ConduitError>;
}
