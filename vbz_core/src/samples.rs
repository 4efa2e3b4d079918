//! Typed front end over the byte-level codec.
//!
//! Callers holding `&[i16]` (or any other supported sample type) go through
//! here instead of building little-endian byte buffers by hand.

use crate::codec::{compress_to_vec, decompress_to_vec};
use crate::error::{Result, VbzError};
use crate::options::Options;

mod sealed {
    pub trait Sealed {}
}

/// Fixed-width integer types the codec can carry.
pub trait Sample: sealed::Sealed + Copy + Default {
    /// Bytes per sample, the `integer_size` the codec is configured with.
    const WIDTH: u32;
    /// Signed types default to delta-zigzag.
    const SIGNED: bool;

    fn write_le(self, out: &mut Vec<u8>);
    fn read_le(bytes: &[u8]) -> Self;
}

macro_rules! impl_sample {
    ($($ty:ty => $signed:expr),* $(,)?) => {$(
        impl sealed::Sealed for $ty {}

        impl Sample for $ty {
            const WIDTH: u32 = std::mem::size_of::<$ty>() as u32;
            const SIGNED: bool = $signed;

            #[inline]
            fn write_le(self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_le_bytes());
            }

            #[inline]
            fn read_le(bytes: &[u8]) -> Self {
                let mut raw = [0u8; std::mem::size_of::<$ty>()];
                raw.copy_from_slice(bytes);
                <$ty>::from_le_bytes(raw)
            }
        }
    )*};
}

impl_sample!(i8 => true, u8 => false, i16 => true, u16 => false, i32 => true, u32 => false);

impl Options {
    /// Options sized for `T`, delta-zigzag on for signed types only.
    pub fn for_sample<T: Sample>() -> Self {
        Options::new(T::WIDTH).with_delta_zig_zag(T::SIGNED)
    }
}

/// Little-endian bytes of `samples`.
pub fn to_bytes<T: Sample>(samples: &[T]) -> Vec<u8> {
    let mut out = Vec::with_capacity(samples.len() * T::WIDTH as usize);
    for &s in samples {
        s.write_le(&mut out);
    }
    out
}

/// Parse little-endian samples. `bytes` must hold a whole number of them.
pub fn from_bytes<T: Sample>(bytes: &[u8]) -> Result<Vec<T>> {
    let width = T::WIDTH as usize;
    if bytes.len() % width != 0 {
        return Err(VbzError::InputSize {
            len: bytes.len(),
            integer_size: T::WIDTH,
        });
    }
    Ok(bytes.chunks_exact(width).map(T::read_le).collect())
}

fn check_width<T: Sample>(options: &Options) -> Result<()> {
    if options.integer_size != T::WIDTH {
        return Err(VbzError::IntegerSize(options.integer_size));
    }
    Ok(())
}

/// Compress typed samples into a sized buffer.
pub fn encode_samples<T: Sample>(samples: &[T], options: &Options) -> Result<Vec<u8>> {
    check_width::<T>(options)?;
    compress_to_vec(&to_bytes(samples), options)
}

/// Inverse of [`encode_samples`].
pub fn decode_samples<T: Sample>(compressed: &[u8], options: &Options) -> Result<Vec<T>> {
    check_width::<T>(options)?;
    from_bytes(&decompress_to_vec(compressed, options)?)
}
