//! Error types for the recovery core.
//!
//! Every failure is a value. Record-level failures refuse the whole record,
//! attribute-level failures drop the single attribute, and range reads are
//! strict: a short read from the device fails the call.

use thiserror::Error;

/// Why a 1024-byte MFT record slot was refused.
#[derive(Debug, Error)]
pub enum RecordParseError {
    #[error("i/o error reading record at offset {offset}")]
    Io {
        offset: u64,
        #[source]
        source: std::io::Error,
    },

    #[error("short read: record at offset {offset} extends past the end of the image")]
    ShortRead { offset: u64 },

    #[error("record signature is not FILE (found {found:02X?})")]
    BadSignature { found: [u8; 4] },

    #[error("header invariant violated: {reason}")]
    HeaderInvariant { reason: String },
}

/// Why an encoded run list was rejected. Decode failure is total: no partial
/// run sequence escapes to the caller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunListDecodeError {
    #[error("run header {header:#04x} at position {pos} has a zero-size length field")]
    ZeroLengthFieldSize { header: u8, pos: usize },

    #[error("run field at position {pos} exceeds buffer length {len}")]
    FieldOutOfBounds { pos: usize, len: usize },

    #[error("run at position {pos} decodes to zero clusters")]
    ZeroClusterCount { pos: usize },

    #[error("run at position {pos} decodes to a negative absolute cluster number")]
    NegativeAbsoluteLcn { pos: usize },
}

/// Failures while mapping or materializing a logical byte range of a file.
#[derive(Debug, Error)]
pub enum RangeReadError {
    #[error("cluster size must be non-zero")]
    InvalidClusterSize,

    #[error("i/o error at disk offset {offset}")]
    Io {
        offset: u64,
        #[source]
        source: std::io::Error,
    },

    #[error("short read at disk offset {offset}: fragment extends past the end of the image")]
    ShortRead { offset: u64 },
}
