//! Scene-layer error types.

use ember_component::{ComponentError, EntityId};
use ember_stream::StreamError;

/// Errors raised by scene mutation and (de)serialisation.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// A component operation referenced an entity the scene does not hold.
    #[error("{0} does not exist in this scene")]
    EntityNotFound(EntityId),

    /// The stream does not start with the scene magic bytes.
    #[error("not a scene stream (bad magic bytes)")]
    BadHeader,

    /// The stream was written by an unsupported format version.
    #[error("unsupported scene format version {0}")]
    UnsupportedVersion(u32),

    /// Component metadata lookup or record storage failed.
    #[error(transparent)]
    Component(#[from] ComponentError),

    /// The underlying stream could not be read or written.
    #[error(transparent)]
    Stream(#[from] StreamError),
}
