//! Sentinel-returning entry points for binding layers.
//!
//! Every function returns a byte count, or one of the reserved [`ErrorCode`]
//! values in its place. Nothing here panics or returns `Result`; test the value
//! with [`is_error`] and translate it with [`check`] or
//! [`ErrorCode::from_size`].

use tracing::warn;

use crate::codec;
use crate::error::{ErrorCode, Result, SizeT, FIRST_ERROR};
use crate::options::Options;
use crate::size;

#[inline]
pub fn is_error(size: SizeT) -> bool {
    size >= FIRST_ERROR
}

/// Name of the error a sentinel stands for, or `"VBZ_UNKNOWN_ERROR"`.
pub fn error_name(size: SizeT) -> &'static str {
    ErrorCode::from_size(size).map_or("VBZ_UNKNOWN_ERROR", ErrorCode::name)
}

/// Translate a returned size into a `Result`.
pub fn check(size: SizeT) -> std::result::Result<usize, ErrorCode> {
    if !is_error(size) {
        return Ok(size as usize);
    }
    Err(ErrorCode::from_size(size).unwrap_or(ErrorCode::TooLarge))
}

fn to_size(op: &'static str, result: Result<usize>) -> SizeT {
    match result {
        Ok(n) => match SizeT::try_from(n) {
            Ok(n) if !is_error(n) => n,
            _ => ErrorCode::TooLarge.as_size(),
        },
        Err(e) => {
            warn!(op, error = %e, "vbz call failed");
            e.code().as_size()
        }
    }
}

pub fn max_compressed_size(source_size: SizeT, options: &Options) -> SizeT {
    to_size(
        "max_compressed_size",
        size::max_compressed_size(source_size as usize, options),
    )
}

pub fn decompressed_size(compressed: &[u8], options: &Options) -> SizeT {
    to_size("decompressed_size", size::decompressed_size(compressed, options))
}

pub fn compress(source: &[u8], dest: &mut [u8], options: &Options) -> SizeT {
    to_size("compress", codec::compress(source, dest, options))
}

pub fn decompress(source: &[u8], dest: &mut [u8], options: &Options) -> SizeT {
    to_size("decompress", codec::decompress(source, dest, options))
}

pub fn compress_bare(source: &[u8], dest: &mut [u8], options: &Options) -> SizeT {
    to_size("compress_bare", codec::compress_bare(source, dest, options))
}

pub fn decompress_bare(source: &[u8], dest: &mut [u8], options: &Options) -> SizeT {
    to_size("decompress_bare", codec::decompress_bare(source, dest, options))
}
