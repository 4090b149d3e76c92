//! Stream-layer error types.

/// Errors that can occur while reading from or persisting a stream.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// The stream ended before the requested number of bytes could be read.
    #[error("unexpected end of stream: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof {
        /// Bytes the caller asked for.
        needed: usize,
        /// Bytes left between the cursor and the end of the buffer.
        remaining: usize,
    },

    /// A length-prefixed string did not contain valid UTF-8.
    #[error("string is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// The cursor was moved past the end of the buffer.
    #[error("seek to {position} is out of bounds (stream length {len})")]
    SeekOutOfBounds {
        /// Requested cursor position.
        position: usize,
        /// Current stream length.
        len: usize,
    },

    /// A file's recorded byte length did not match its actual contents.
    #[error("truncated stream file: header says {expected} bytes, found {actual}")]
    TruncatedFile {
        /// Byte length recorded in the file header.
        expected: u64,
        /// Bytes actually present after the header.
        actual: u64,
    },

    /// Reading or writing the backing file failed.
    #[error("stream I/O error: {0}")]
    Io(#[from] std::io::Error),
}
