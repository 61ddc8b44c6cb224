//! Module: ffi
//!
//! A thin C ABI front door over [`crate::decode`], for callers
//! embedding this crate from C: pass in a pointer and length, get back
//! a heap pointer and its length.
//!
//! Gated behind the `capi` feature; the default build exposes only the
//! safe Rust API.

use libc::{c_int, c_uchar, c_void};
use std::ptr;

/// Decompress the gzip-compressed buffer at `buf` (`buf_len` bytes).
///
/// On success, returns a pointer to a heap buffer holding the
/// decompressed bytes and writes its length to `*decompressed_len`.
/// The caller takes ownership of the returned buffer and must free it
/// with [`gzinflate_free`]. On any failure, returns a null pointer and
/// leaves `*decompressed_len` unset.
///
/// # Safety
///
/// `buf` must point to at least `buf_len` readable bytes, and
/// `decompressed_len` must point to a writable `c_int`.
#[no_mangle]
pub unsafe extern "C" fn gzinflate_decompress(
    buf: *const c_void,
    buf_len: c_int,
    decompressed_len: *mut c_int,
) -> *mut c_void {
    if buf.is_null() || buf_len < 0 {
        return ptr::null_mut();
    }
    let input = std::slice::from_raw_parts(buf as *const c_uchar, buf_len as usize);

    let decoded = match crate::decode(input) {
        Ok(bytes) => bytes,
        Err(_) => return ptr::null_mut(),
    };

    let mut boxed = decoded.into_boxed_slice();
    let ptr = boxed.as_mut_ptr();
    let len = boxed.len();
    std::mem::forget(boxed);
    *decompressed_len = len as c_int;
    ptr as *mut c_void
}

/// Free a buffer previously returned by [`gzinflate_decompress`].
///
/// # Safety
///
/// `ptr`/`len` must be exactly the pointer/length pair returned by a
/// prior call to [`gzinflate_decompress`], and must not have been
/// freed already.
#[no_mangle]
pub unsafe extern "C" fn gzinflate_free(ptr: *mut c_void, len: c_int) {
    if ptr.is_null() || len < 0 {
        return;
    }
    let slice = std::slice::from_raw_parts_mut(ptr as *mut c_uchar, len as usize);
    drop(Box::from_raw(slice));
}
