//! DNS codec error types.

use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, Error>;

/// DNS codec errors.
///
/// All failures are value-returning; nothing in the codec aborts the
/// process. A decode failure invalidates the whole message being parsed —
/// partially decoded sections are never surfaced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A domain name that cannot be encoded: a label over 63 bytes, an
    /// empty interior label, or an invalid character.
    #[error("invalid domain name: {message}")]
    InvalidName {
        /// Description of the violation.
        message: String,
    },

    /// The buffer ended in the middle of a name's label data.
    #[error("truncated name at offset {offset}")]
    TruncatedName {
        /// Byte offset where the name ran out of data.
        offset: usize,
    },

    /// Domain name exceeds the 255-byte wire format limit.
    #[error("name too long: {length} bytes exceeds maximum of 255")]
    NameTooLong {
        /// Accumulated wire format length.
        length: usize,
    },

    /// A compression pointer was encountered while decoding a name.
    ///
    /// This decoder is deliberately limited: it never resolves pointers,
    /// and it refuses to guess at the bytes that follow one.
    #[error("unsupported compression pointer at offset {offset}")]
    UnsupportedCompression {
        /// Byte offset of the pointer marker.
        offset: usize,
    },

    /// Fewer than 12 bytes were available for the message header.
    #[error("truncated header: expected {expected} bytes, got {actual}")]
    TruncatedHeader {
        /// Required header size.
        expected: usize,
        /// Bytes actually available.
        actual: usize,
    },

    /// The buffer ended inside a resource record's fixed fields or RDATA.
    #[error("truncated record: needed {needed} more bytes, got {available}")]
    TruncatedRecord {
        /// Bytes still required by the record.
        needed: usize,
        /// Bytes remaining in the buffer.
        available: usize,
    },

    /// Unexpected end of data while reading a fixed-width field.
    #[error("unexpected end of data at offset {offset}")]
    UnexpectedEof {
        /// Byte offset where EOF was encountered.
        offset: usize,
    },

    /// Unassigned opcode value in the header flags word.
    #[error("invalid opcode: {value}")]
    InvalidOpCode {
        /// The invalid opcode value.
        value: u8,
    },

    /// Reserved response code value in the header flags word.
    #[error("invalid response code: {value}")]
    InvalidResponseCode {
        /// The invalid rcode value.
        value: u8,
    },

    /// RDATA length does not match the typed view being requested.
    #[error("RDATA length mismatch for {rtype}: expected {expected} bytes, got {actual}")]
    RDataLengthMismatch {
        /// Record type name.
        rtype: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },
}

impl Error {
    /// Creates a new `InvalidName` error.
    #[inline]
    pub fn invalid_name(message: impl Into<String>) -> Self {
        Self::InvalidName {
            message: message.into(),
        }
    }

    /// Creates a new `TruncatedName` error.
    #[inline]
    pub fn truncated_name(offset: usize) -> Self {
        Self::TruncatedName { offset }
    }

    /// Creates a new `NameTooLong` error.
    #[inline]
    pub fn name_too_long(length: usize) -> Self {
        Self::NameTooLong { length }
    }

    /// Creates a new `UnexpectedEof` error.
    #[inline]
    pub fn unexpected_eof(offset: usize) -> Self {
        Self::UnexpectedEof { offset }
    }

    /// Returns true if this error indicates a short buffer.
    #[inline]
    pub fn is_truncation(&self) -> bool {
        matches!(
            self,
            Self::TruncatedName { .. }
                | Self::TruncatedHeader { .. }
                | Self::TruncatedRecord { .. }
                | Self::UnexpectedEof { .. }
        )
    }
}
