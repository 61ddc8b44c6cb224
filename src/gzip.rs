//! Module: gzip
//!
//! The Rust-facing entry points: parses the GZIP member envelope,
//! drives the block interpreter over the payload, and checks the
//! trailing CRC32/ISIZE against what was actually produced.

use crate::bitreader::BitReader;
use crate::crc32;
use crate::error::{GzipError, Result};
use crate::header;
use crate::inflate::inflate;
use crate::sink::{SliceSink, VecSink};

const TRAILER_LEN: usize = 8;

/// Decompress `input`, a complete GZIP member, returning a freshly
/// allocated buffer with the original bytes (Shape A: allocating).
///
/// Only the first member of `input` is decoded; trailing bytes after
/// the first member's 8-byte trailer (e.g. from a concatenated
/// multi-member stream) are ignored.
pub fn decode(input: &[u8]) -> Result<Vec<u8>> {
    let header = header::parse_header(input)?;
    let body = member_body(input, header.header_len)?;

    let mut sink = VecSink(Vec::with_capacity(peek_size(input) as usize));
    let mut reader = BitReader::new(body);
    inflate(&mut reader, &mut sink)?;

    let trailer = trailer_bytes(input, header.header_len, &mut reader)?;
    verify_trailer(trailer, &sink.0)?;
    Ok(sink.0)
}

/// Decompress `input` into a caller-supplied region (Shape B:
/// caller-provides-output), returning the number of bytes written.
///
/// Use [`peek_size`] beforehand to size `output`.
pub fn decode_into(input: &[u8], output: &mut [u8]) -> Result<usize> {
    let header = header::parse_header(input)?;
    let body = member_body(input, header.header_len)?;

    let mut sink = SliceSink::new(output);
    let mut reader = BitReader::new(body);
    inflate(&mut reader, &mut sink)?;
    let written = sink.written();

    let trailer = trailer_bytes(input, header.header_len, &mut reader)?;
    verify_trailer(trailer, &output[..written])?;
    Ok(written)
}

/// Read ISIZE, the last 4 bytes of a GZIP member: the decompressed
/// size modulo 2^32. Returns 0 if `input` is too short to hold a
/// trailer; a caller can use this to size a buffer for
/// [`decode_into`] before committing to the call.
pub fn peek_size(input: &[u8]) -> u32 {
    if input.len() < TRAILER_LEN {
        return 0;
    }
    let b = &input[input.len() - 4..];
    u32::from_le_bytes([b[0], b[1], b[2], b[3]])
}

/// Slice out everything after the parsed header: the DEFLATE payload
/// followed by the 8-byte trailer (and possibly more, for a
/// concatenated multi-member stream, which `inflate` simply won't
/// consume). The trailer's real start is only known once `inflate` has
/// run, since DEFLATE doesn't declare its own compressed length up
/// front; see `trailer_bytes`.
fn member_body(input: &[u8], header_len: usize) -> Result<&[u8]> {
    if input.len() < header_len + TRAILER_LEN {
        return Err(GzipError::invalid(
            "truncated gzip member (no room for trailer)",
        ));
    }
    Ok(&input[header_len..])
}

/// Locate the 8-byte trailer that follows the DEFLATE stream `reader`
/// just finished consuming. `reader` was built over `input[header_len..]`,
/// so its own byte position (rounded up to the next whole byte) gives
/// the trailer's offset from `header_len` — this is what actually
/// stopped the first member, rather than assuming the trailer sits at
/// the end of `input`, which breaks the moment anything (a second
/// concatenated member, padding) follows it.
fn trailer_bytes<'a>(
    input: &'a [u8],
    header_len: usize,
    reader: &mut BitReader,
) -> Result<&'a [u8]> {
    reader.align_to_byte();
    let consumed = reader.bytes_consumed();
    let trailer_start = header_len + consumed;
    if input.len() < trailer_start + TRAILER_LEN {
        return Err(GzipError::invalid(
            "truncated gzip member (no room for trailer)",
        ));
    }
    Ok(&input[trailer_start..trailer_start + TRAILER_LEN])
}

fn verify_trailer(trailer: &[u8], produced: &[u8]) -> Result<()> {
    let crc = u32::from_le_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);
    let isize_ = u32::from_le_bytes([trailer[4], trailer[5], trailer[6], trailer[7]]);

    if crc32::sum(produced) != crc {
        log::debug!("gzip trailer CRC32 mismatch");
        return Err(GzipError::invalid(
            "trailing CRC32 does not match decompressed data",
        ));
    }
    if produced.len() as u32 != isize_ {
        log::debug!(
            "gzip trailer ISIZE mismatch: produced {} vs {}",
            produced.len(),
            isize_
        );
        return Err(GzipError::invalid(
            "trailing ISIZE does not match decompressed length",
        ));
    }
    log::trace!("gzip member decoded: {} bytes", produced.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{decode, decode_into, peek_size};
    use crate::error::GzipError;

    /// `gzip -n` of the empty string.
    const EMPTY_GZ: &[u8] = &[
        0x1f, 0x8b, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x03, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00,
    ];

    /// `gzip -n` of "Hello, World!\n" (BTYPE=1, fixed Huffman).
    const HELLO_GZ: &[u8] = &[
        0x1f, 0x8b, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0xf3, 0x48, 0xcd, 0xc9, 0xc9,
        0xd7, 0x51, 0x08, 0xcf, 0x2f, 0xca, 0x49, 0x51, 0xe4, 0x02, 0x00, 0x84, 0x9e, 0xe8, 0xb4,
        0x0e, 0x00, 0x00, 0x00,
    ];

    #[test]
    fn test_s1_empty_payload() {
        let out = decode(EMPTY_GZ).unwrap();
        assert_eq!(out.len(), 0);
    }

    #[test]
    fn test_s2_hello_world_fixed_huffman() {
        let out = decode(HELLO_GZ).unwrap();
        assert_eq!(out, b"Hello, World!\n");
    }

    #[test]
    fn test_s4_bad_magic() {
        let mut bytes = HELLO_GZ.to_vec();
        bytes[0] = 0x1e;
        assert_eq!(decode(&bytes), Err(GzipError::InvalidMagic));
    }

    #[test]
    fn test_s5_bad_method() {
        let mut bytes = HELLO_GZ.to_vec();
        bytes[2] = 0x09;
        assert_eq!(decode(&bytes), Err(GzipError::InvalidMethod));
    }

    #[test]
    fn test_s6_truncated_is_invalid_file() {
        let half = &HELLO_GZ[..HELLO_GZ.len() / 2];
        assert!(decode(half).is_err());
        assert_ne!(decode(half).unwrap_err(), GzipError::InvalidMagic);
    }

    #[test]
    fn test_peek_size() {
        assert_eq!(peek_size(EMPTY_GZ), 0);
        assert_eq!(peek_size(HELLO_GZ), 14);
        assert_eq!(peek_size(&[]), 0);
    }

    #[test]
    fn test_decode_into_shape_b() {
        let mut buf = [0u8; 14];
        let written = decode_into(HELLO_GZ, &mut buf).unwrap();
        assert_eq!(written, 14);
        assert_eq!(&buf, b"Hello, World!\n");
    }

    #[test]
    fn test_decode_into_no_space() {
        let mut buf = [0u8; 4];
        let err = decode_into(HELLO_GZ, &mut buf).unwrap_err();
        assert!(matches!(err, GzipError::NoSpace { .. }));
    }

    #[test]
    fn test_trailing_bytes_after_member_are_ignored() {
        // A second concatenated member (here, just HELLO_GZ again) after
        // the first member's trailer must not shift where the trailer is
        // read from: the first member still decodes correctly.
        let mut bytes = HELLO_GZ.to_vec();
        bytes.extend_from_slice(HELLO_GZ);
        let out = decode(&bytes).unwrap();
        assert_eq!(out, b"Hello, World!\n");
    }

    #[test]
    fn test_trailing_padding_after_member_is_ignored() {
        let mut bytes = HELLO_GZ.to_vec();
        bytes.extend_from_slice(&[0u8; 5]);
        let out = decode(&bytes).unwrap();
        assert_eq!(out, b"Hello, World!\n");
    }

    #[test]
    fn test_corrupt_crc_fails() {
        let mut bytes = HELLO_GZ.to_vec();
        let crc_start = bytes.len() - 8; // first byte of the trailing CRC32 field
        bytes[crc_start] ^= 0xff;
        match decode(&bytes) {
            Err(GzipError::InvalidFile { reason }) => {
                assert_eq!(reason, "trailing CRC32 does not match decompressed data");
            }
            other => panic!("expected a CRC32 mismatch, got {other:?}"),
        }
    }
}
