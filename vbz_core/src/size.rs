use crate::compressor::ZstdAdapter;
use crate::error::{Result, VbzError};
use crate::options::Options;
use crate::streamvbyte;
use crate::transform;

/// Bytes of the little-endian `u32` original-size header written by
/// [`crate::compress`].
pub const SIZE_HEADER_LEN: usize = 4;

/// Upper bound on the output of [`crate::compress`] for `source_size` input
/// bytes. Size the destination with this before compressing.
pub fn max_compressed_size(source_size: usize, options: &Options) -> Result<usize> {
    let mut size = transform::max_transformed_size(source_size, options)?;
    if options.zstd_enabled() {
        size = ZstdAdapter::compress_bound(size);
    }
    Ok(size + SIZE_HEADER_LEN)
}

/// Exact number of bytes [`crate::decompress`] will produce, read from the
/// size header without decoding the body.
pub fn decompressed_size(compressed: &[u8], options: &Options) -> Result<usize> {
    options.validate()?;
    let header: [u8; SIZE_HEADER_LEN] = compressed
        .get(..SIZE_HEADER_LEN)
        .and_then(|h| h.try_into().ok())
        .ok_or(VbzError::Truncated {
            len: compressed.len(),
        })?;
    Ok(u32::from_le_bytes(header) as usize)
}

/// [`decompressed_size`], checked against what the body can decode to.
///
/// The header must agree with the body length (or the zstd frame's content
/// size) before the result is safe to allocate from.
pub fn checked_decompressed_size(compressed: &[u8], options: &Options) -> Result<usize> {
    let original = decompressed_size(compressed, options)?;
    let body = &compressed[SIZE_HEADER_LEN..];
    let stored = if options.zstd_enabled() {
        ZstdAdapter::content_size(body)?
    } else {
        body.len()
    };
    let consistent = if options.perform_delta_zig_zag {
        let count = original / options.width();
        count.div_ceil(4) <= stored && stored <= streamvbyte::max_packed_len(count)
    } else {
        stored == original
    };
    if !consistent {
        return Err(VbzError::Stream("size header disagrees with body"));
    }
    Ok(original)
}
