use std::borrow::Cow;

use crate::error::{Result, VbzError};
use crate::options::Options;
use crate::streamvbyte;
use crate::zigzag;

/// Transform implementations that stored data may have been written with.
///
/// Variants are frozen once released: data written under a version is always
/// read back by that version's inverse. Behavior changes get a new variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Version {
    /// Delta-zigzag followed by byte-granular stream-vbyte for every width.
    V0,
    /// As `V0`, except 1-byte samples use the half-byte packing.
    V1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Packing {
    Byte,
    HalfByte,
}

impl Version {
    pub fn from_u32(version: u32) -> Result<Self> {
        match version {
            0 => Ok(Version::V0),
            1 => Ok(Version::V1),
            other => Err(VbzError::Version(other)),
        }
    }

    pub fn as_u32(self) -> u32 {
        match self {
            Version::V0 => 0,
            Version::V1 => 1,
        }
    }

    fn packing(self, integer_size: usize) -> Packing {
        match (self, integer_size) {
            (Version::V1, 1) => Packing::HalfByte,
            _ => Packing::Byte,
        }
    }
}

fn sample_count(len: usize, options: &Options) -> Result<usize> {
    let width = options.width();
    if len % width != 0 {
        return Err(VbzError::InputSize {
            len,
            integer_size: options.integer_size,
        });
    }
    Ok(len / width)
}

/// Upper bound on the forward transform's output for `source_size` bytes.
pub fn max_transformed_size(source_size: usize, options: &Options) -> Result<usize> {
    options.validate()?;
    if !options.perform_delta_zig_zag {
        return Ok(source_size);
    }
    Ok(streamvbyte::max_packed_len(sample_count(source_size, options)?))
}

/// Sign-extend little-endian samples of `width` bytes.
fn read_samples(bytes: &[u8], width: usize) -> impl Iterator<Item = i32> + '_ {
    bytes.chunks_exact(width).map(move |c| match width {
        1 => i32::from(c[0] as i8),
        2 => i32::from(i16::from_le_bytes([c[0], c[1]])),
        _ => i32::from_le_bytes([c[0], c[1], c[2], c[3]]),
    })
}

/// Truncate each value back to `width` little-endian bytes.
fn write_samples(values: &[i32], width: usize, dest: &mut [u8]) {
    for (value, out) in values.iter().zip(dest.chunks_exact_mut(width)) {
        out.copy_from_slice(&value.to_le_bytes()[..width]);
    }
}

/// Forward transform. Borrows the input unchanged when delta-zigzag is off.
pub fn forward<'a>(source: &'a [u8], options: &Options, version: Version) -> Result<Cow<'a, [u8]>> {
    if !options.perform_delta_zig_zag {
        return Ok(Cow::Borrowed(source));
    }
    sample_count(source.len(), options)?;
    let width = options.width();
    let codes = zigzag::delta_zigzag_encode(read_samples(source, width));
    let packed = match version.packing(width) {
        Packing::Byte => streamvbyte::encode(&codes),
        Packing::HalfByte => streamvbyte::encode_half(&codes),
    };
    Ok(Cow::Owned(packed))
}

/// Inverse transform into `dest`.
///
/// With delta-zigzag on, `dest.len()` is the exact decoded size and must be a
/// whole number of samples. With it off, `packed` is copied and its length
/// returned.
pub fn inverse(packed: &[u8], dest: &mut [u8], options: &Options, version: Version) -> Result<usize> {
    if !options.perform_delta_zig_zag {
        let capacity = dest.len();
        let target = dest
            .get_mut(..packed.len())
            .ok_or(VbzError::DestinationSize {
                required: packed.len(),
                capacity,
            })?;
        target.copy_from_slice(packed);
        return Ok(packed.len());
    }
    let count = sample_count(dest.len(), options)?;
    let width = options.width();
    let codes = match version.packing(width) {
        Packing::Byte => streamvbyte::decode(packed, count)?,
        Packing::HalfByte => streamvbyte::decode_half(packed, count)?,
    };
    write_samples(&zigzag::delta_zigzag_decode(&codes), width, dest);
    Ok(dest.len())
}
