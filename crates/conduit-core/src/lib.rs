//! Core traits and types for Conduit destination connectors.
//!
//! A destination connector contributes two leaf components to the host
//! pipeline: an [`UploadStager`], which conforms extracted document
//! elements into the destination's native record shape, and an
//! [`Uploader`], which writes the staged records to the destination in
//! batches. Connectors expose both, together with their configuration
//! types, through a five-slot [`DestinationEntry`] that the host resolves
//! by connector-type name at pipeline-build time.

mod batch;
mod error;
mod registry;
mod secret;
mod stager;
mod types;
mod uploader;

pub use batch::batches;
pub use error::ConduitError;
pub use registry::{
    ConfigCheck, DestinationEntry, DestinationRegistry, StagerFactory, UploaderFactory,
};
pub use secret::SensitiveString;
pub use stager::UploadStager;
pub use types::{FileData, UploadContent};
pub use uploader::Uploader;
