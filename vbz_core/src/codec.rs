use tracing::debug;

use crate::compressor::ZstdAdapter;
use crate::error::{Result, VbzError, FIRST_ERROR};
use crate::options::Options;
use crate::size::{checked_decompressed_size, max_compressed_size, SIZE_HEADER_LEN};
use crate::transform;

/// Largest buffer whose length can be reported without colliding with the
/// sentinel range.
fn check_len(len: usize) -> Result<u32> {
    u32::try_from(len)
        .ok()
        .filter(|&n| n < FIRST_ERROR)
        .ok_or(VbzError::TooLarge(len))
}

fn copy_into(source: &[u8], dest: &mut [u8]) -> Result<usize> {
    let capacity = dest.len();
    dest.get_mut(..source.len())
        .ok_or(VbzError::DestinationSize {
            required: source.len(),
            capacity,
        })?
        .copy_from_slice(source);
    Ok(source.len())
}

/// Compress without the size header. Returns the number of bytes written.
///
/// The output can only be decoded with [`decompress_bare`] by a caller that
/// knows the exact decoded size.
pub fn compress_bare(source: &[u8], dest: &mut [u8], options: &Options) -> Result<usize> {
    let version = options.validate()?;
    check_len(source.len())?;
    let transformed = transform::forward(source, options, version)?;
    if !options.zstd_enabled() {
        return copy_into(&transformed, dest);
    }
    ZstdAdapter::new(options.zstd_compression_level).compress_into(&transformed, dest)
}

/// Decompress a body written by [`compress_bare`].
///
/// With delta-zigzag on, `dest.len()` must equal the decoded size exactly.
/// Otherwise `dest` only needs to be large enough and the decoded length is
/// returned.
pub fn decompress_bare(source: &[u8], dest: &mut [u8], options: &Options) -> Result<usize> {
    let version = options.validate()?;
    if !options.zstd_enabled() {
        return transform::inverse(source, dest, options, version);
    }
    if !options.perform_delta_zig_zag {
        return ZstdAdapter::decompress_into(source, dest);
    }

    // The frame holds the packed stream; it can never be larger than the
    // worst-case packing of the samples the caller expects.
    let packed_len = ZstdAdapter::content_size(source)?;
    if packed_len > transform::max_transformed_size(dest.len(), options)? {
        return Err(VbzError::Stream("frame larger than any packing of the destination"));
    }
    let mut packed = vec![0u8; packed_len];
    ZstdAdapter::decompress_into(source, &mut packed)?;
    transform::inverse(&packed, dest, options, version)
}

/// Compress `source` into `dest` as `[original size: u32 LE][body]`.
///
/// Size `dest` with [`max_compressed_size`]. Returns the number of bytes
/// written.
pub fn compress(source: &[u8], dest: &mut [u8], options: &Options) -> Result<usize> {
    options.validate()?;
    let original = check_len(source.len())?;
    if dest.len() < SIZE_HEADER_LEN {
        return Err(VbzError::DestinationSize {
            required: SIZE_HEADER_LEN,
            capacity: dest.len(),
        });
    }
    let (header, body) = dest.split_at_mut(SIZE_HEADER_LEN);
    let written = compress_bare(source, body, options)?;
    header.copy_from_slice(&original.to_le_bytes());

    let total = SIZE_HEADER_LEN + written;
    check_len(total)?;
    debug!(
        source_len = source.len(),
        compressed_len = total,
        version = options.version,
        integer_size = options.integer_size,
        "compressed"
    );
    Ok(total)
}

/// Decompress a buffer written by [`compress`] into `dest`.
///
/// `dest` must hold at least [`crate::decompressed_size`] bytes; a smaller
/// buffer is rejected before anything is written. A size header that
/// disagrees with the body is corrupt input. Returns the number of bytes
/// written.
pub fn decompress(source: &[u8], dest: &mut [u8], options: &Options) -> Result<usize> {
    let original = checked_decompressed_size(source, options)?;
    let capacity = dest.len();
    let target = dest
        .get_mut(..original)
        .ok_or(VbzError::DestinationSize {
            required: original,
            capacity,
        })?;
    // `target` already holds everything the header promised.
    let produced = decompress_bare(&source[SIZE_HEADER_LEN..], target, options).map_err(|e| {
        match e {
            VbzError::DestinationSize { .. } => VbzError::Stream("body larger than size header"),
            other => other,
        }
    })?;
    if produced != original {
        return Err(VbzError::Stream("decoded length differs from size header"));
    }
    debug!(
        compressed_len = source.len(),
        decompressed_len = produced,
        "decompressed"
    );
    Ok(produced)
}

/// Allocate, compress and trim.
pub fn compress_to_vec(source: &[u8], options: &Options) -> Result<Vec<u8>> {
    let mut out = vec![0u8; max_compressed_size(source.len(), options)?];
    let written = compress(source, &mut out, options)?;
    out.truncate(written);
    Ok(out)
}

/// Allocate from the size header and decompress.
pub fn decompress_to_vec(source: &[u8], options: &Options) -> Result<Vec<u8>> {
    let mut out = vec![0u8; checked_decompressed_size(source, options)?];
    let written = decompress(source, &mut out, options)?;
    out.truncate(written);
    Ok(out)
}
