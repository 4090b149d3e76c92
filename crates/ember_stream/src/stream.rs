//! The [`BinaryStream`] buffer and the [`Scalar`] primitive trait.
//!
//! All multi-byte values are written little-endian. Strings, byte blobs, and
//! lists are length-prefixed with a `u64` count so the reader never has to
//! guess where a field ends.

use std::io::Write;
use std::path::Path;

use crate::error::StreamError;

mod sealed {
    pub trait Sealed {}
}

/// A primitive value that can be appended to or read from a [`BinaryStream`].
///
/// Implemented for the fixed-width integers, `f32`/`f64`, and `bool`. The
/// trait is sealed; composite values are built from these primitives via
/// [`BinaryStream::put_str`], [`BinaryStream::put_bytes`], and
/// [`BinaryStream::put_list`].
pub trait Scalar: Sized + Copy + sealed::Sealed {
    /// Append this value at the end of the stream.
    fn put(self, stream: &mut BinaryStream);

    /// Read one value at the cursor, advancing it.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::UnexpectedEof`] if fewer bytes remain than the
    /// value needs.
    fn take(stream: &mut BinaryStream) -> Result<Self, StreamError>;
}

macro_rules! impl_scalar {
    ($($ty:ty),* $(,)?) => {$(
        impl sealed::Sealed for $ty {}

        impl Scalar for $ty {
            fn put(self, stream: &mut BinaryStream) {
                stream.append(&self.to_le_bytes());
            }

            fn take(stream: &mut BinaryStream) -> Result<Self, StreamError> {
                let mut buf = [0u8; size_of::<$ty>()];
                stream.read_exact(&mut buf)?;
                Ok(<$ty>::from_le_bytes(buf))
            }
        }
    )*};
}

impl_scalar!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

impl sealed::Sealed for bool {}

impl Scalar for bool {
    fn put(self, stream: &mut BinaryStream) {
        stream.append(&[u8::from(self)]);
    }

    fn take(stream: &mut BinaryStream) -> Result<Self, StreamError> {
        Ok(u8::take(stream)? != 0)
    }
}

/// A flat, growable byte buffer with a combined read/write cursor.
///
/// Writes always append at the end of the buffer; reads consume from the
/// cursor, which can be repositioned with [`BinaryStream::seek`]. This is
/// the serialisation medium for scene files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryStream {
    data: Vec<u8>,
    cursor: usize,
}

impl BinaryStream {
    /// Create a new, empty stream.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty stream with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            cursor: 0,
        }
    }

    /// Wrap an existing byte buffer, with the cursor at the start.
    #[must_use]
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { data, cursor: 0 }
    }

    /// Total number of bytes in the buffer (not the bytes remaining).
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the buffer holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current cursor position.
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Bytes between the cursor and the end of the buffer.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.cursor
    }

    /// The whole buffer as a byte slice.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the stream, returning the underlying buffer.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Discard all contents and reset the cursor.
    pub fn clear(&mut self) {
        self.data.clear();
        self.cursor = 0;
    }

    /// Move the cursor to an absolute byte position.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::SeekOutOfBounds`] if `position` lies past the
    /// end of the buffer. Seeking to `len()` itself is allowed (the stream
    /// is then exhausted).
    pub fn seek(&mut self, position: usize) -> Result<(), StreamError> {
        if position > self.data.len() {
            return Err(StreamError::SeekOutOfBounds {
                position,
                len: self.data.len(),
            });
        }
        self.cursor = position;
        Ok(())
    }

    /// Append a primitive value.
    pub fn put<T: Scalar>(&mut self, value: T) {
        value.put(self);
    }

    /// Read a primitive value at the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::UnexpectedEof`] if the buffer is exhausted.
    pub fn take<T: Scalar>(&mut self) -> Result<T, StreamError> {
        T::take(self)
    }

    /// Append a length-prefixed byte blob.
    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.put(bytes.len() as u64);
        self.append(bytes);
    }

    /// Read a length-prefixed byte blob.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::UnexpectedEof`] if the recorded length exceeds
    /// the bytes remaining.
    pub fn take_bytes(&mut self) -> Result<Vec<u8>, StreamError> {
        let len = self.take::<u64>()? as usize;
        if len > self.remaining() {
            return Err(StreamError::UnexpectedEof {
                needed: len,
                remaining: self.remaining(),
            });
        }
        let start = self.cursor;
        self.cursor += len;
        Ok(self.data[start..self.cursor].to_vec())
    }

    /// Append a length-prefixed UTF-8 string.
    pub fn put_str(&mut self, value: &str) {
        self.put_bytes(value.as_bytes());
    }

    /// Read a length-prefixed UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::UnexpectedEof`] if the buffer is exhausted, or
    /// [`StreamError::InvalidUtf8`] if the bytes are not valid UTF-8.
    pub fn take_str(&mut self) -> Result<String, StreamError> {
        let bytes = self.take_bytes()?;
        Ok(String::from_utf8(bytes)?)
    }

    /// Append a length-prefixed list of primitives.
    pub fn put_list<T: Scalar>(&mut self, items: &[T]) {
        self.put(items.len() as u64);
        for &item in items {
            self.put(item);
        }
    }

    /// Read a length-prefixed list of primitives.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::UnexpectedEof`] if the recorded element count
    /// cannot fit in the bytes remaining.
    pub fn take_list<T: Scalar>(&mut self) -> Result<Vec<T>, StreamError> {
        let count = self.take::<u64>()? as usize;
        // Each element needs at least one byte; reject impossible counts
        // before allocating.
        if count > self.remaining() {
            return Err(StreamError::UnexpectedEof {
                needed: count,
                remaining: self.remaining(),
            });
        }
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(self.take::<T>()?);
        }
        Ok(items)
    }

    /// Persist the whole buffer to a file, prefixed with its byte length.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Io`] if the file cannot be created or written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StreamError> {
        let mut file = std::fs::File::create(path)?;
        file.write_all(&(self.data.len() as u64).to_le_bytes())?;
        file.write_all(&self.data)?;
        Ok(())
    }

    /// Load a stream previously written by [`BinaryStream::save`]. The
    /// cursor starts at 0.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Io`] if the file cannot be read, or
    /// [`StreamError::TruncatedFile`] if the recorded length does not match
    /// the file contents.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StreamError> {
        let raw = std::fs::read(path)?;
        if raw.len() < 8 {
            return Err(StreamError::TruncatedFile {
                expected: 8,
                actual: raw.len() as u64,
            });
        }
        let mut header = [0u8; 8];
        header.copy_from_slice(&raw[..8]);
        let expected = u64::from_le_bytes(header);
        let actual = (raw.len() - 8) as u64;
        if expected != actual {
            return Err(StreamError::TruncatedFile { expected, actual });
        }
        Ok(Self::from_bytes(raw[8..].to_vec()))
    }

    fn append(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), StreamError> {
        if buf.len() > self.remaining() {
            return Err(StreamError::UnexpectedEof {
                needed: buf.len(),
                remaining: self.remaining(),
            });
        }
        let start = self.cursor;
        self.cursor += buf.len();
        buf.copy_from_slice(&self.data[start..self.cursor]);
        Ok(())
    }
}
