//! Component-layer error types.

use ember_stream::StreamError;

use crate::component::ComponentTypeId;

/// Errors raised by the metadata tables and component vector storage.
#[derive(Debug, thiserror::Error)]
pub enum ComponentError {
    /// A [`ComponentTypeId`] was looked up before any registration for it
    /// occurred. Registration must happen before a scene touches the type.
    #[error("unknown component type {0:?} — was it registered before use?")]
    UnknownComponentType(ComponentTypeId),

    /// A deserialised record blob is not a whole number of records.
    #[error("corrupt record blob for '{name}': {len} bytes is not a multiple of stride {stride}")]
    CorruptRecords {
        /// Name of the component type whose blob was rejected.
        name: &'static str,
        /// Byte length of the rejected blob.
        len: usize,
        /// Record stride the blob was expected to obey.
        stride: usize,
    },

    /// A custom-decoded component value had the wrong byte size for its type.
    #[error("decoded value for '{name}' is {actual} bytes, expected {expected}")]
    ValueSizeMismatch {
        /// Name of the component type.
        name: &'static str,
        /// Size the type's layout requires.
        expected: usize,
        /// Size the decoder produced.
        actual: usize,
    },

    /// A component type that owns heap data was streamed without custom
    /// serialisation metadata. Raw byte round-trips would duplicate
    /// ownership of the heap resources.
    #[error("'{name}' owns heap data but has no stream metadata")]
    NotPlainOldData {
        /// Name of the offending component type.
        name: &'static str,
    },

    /// Custom component serialisation failed.
    #[error("failed to encode component: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    /// Custom component deserialisation failed.
    #[error("failed to decode component: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    /// The underlying stream could not be read.
    #[error(transparent)]
    Stream(#[from] StreamError),
}
