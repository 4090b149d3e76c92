//! # ember_stream
//!
//! Flat binary serialisation buffer for the engine.
//!
//! This crate provides:
//!
//! - [`BinaryStream`] — an append/cursor-based byte buffer with typed
//!   put/take primitives and length-prefixed strings, blobs, and lists.
//! - [`Scalar`] — the sealed trait implemented by every primitive that can
//!   be written to or read from a stream.
//! - [`StreamError`] — read-side and I/O error types.
//!
//! The scene serialiser uses `BinaryStream` as its storage medium; scene
//! files on disk are a saved stream with a length header.

pub mod error;
pub mod stream;

pub use error::StreamError;
pub use stream::{BinaryStream, Scalar};
