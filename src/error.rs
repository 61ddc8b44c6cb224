//! Module: error
//!
//! The typed error surface of the decoder. Every failure a caller can
//! observe is one of these three variants; nothing in this crate uses
//! `anyhow` or a boxed `dyn Error` at the public boundary.

use thiserror::Error;

/// Everything that can go wrong decoding a GZIP member.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GzipError {
    /// The first two bytes were not 0x1F, 0x8B.
    #[error("not a gzip stream (bad magic bytes)")]
    InvalidMagic,

    /// The CM byte was not 8 (deflate).
    #[error("unsupported compression method")]
    InvalidMethod,

    /// Any other malformed-input condition: bad block header, bad
    /// Huffman table, impossible distance, unknown symbol, NLEN/LEN
    /// mismatch, CRC32 mismatch, or a structural truncation. `reason`
    /// names which check failed, for logging, not for matching on.
    #[error("malformed gzip/deflate stream: {reason}")]
    InvalidFile { reason: &'static str },

    /// Shape B only: the caller-provided output region was too small.
    #[error("output buffer too small: need {required} bytes, have {available}")]
    NoSpace { required: usize, available: usize },
}

impl GzipError {
    pub(crate) fn invalid(reason: &'static str) -> Self {
        GzipError::InvalidFile { reason }
    }
}

pub type Result<T> = std::result::Result<T, GzipError>;
