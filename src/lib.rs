//! module: lib
//!
//! In-memory GZIP/DEFLATE decompression (RFC 1952 / RFC 1951): no I/O,
//! no CLI, synchronous. Given a complete gzip-compressed buffer, this
//! crate returns the decompressed bytes.
//!
//! Two entry points cover the two ways a caller might want the output:
//! [`decode`] allocates and returns a `Vec<u8>`; [`decode_into`] writes
//! into a caller-supplied buffer sized beforehand via [`peek_size`].
//! Enable the `capi` feature for a C ABI front door over the same
//! logic, for callers embedding this crate from C.

mod bitreader;
mod crc32;
mod error;
mod gzip;
mod header;
mod huffman;
mod inflate;
mod sink;

#[cfg(feature = "capi")]
mod ffi;

pub use error::{GzipError, Result};
pub use gzip::{decode, decode_into, peek_size};
