//! Lossless codec for fixed-width integer signals.
//!
//! The forward path takes each sample's difference from its predecessor,
//! zigzag maps it to an unsigned value, packs the values with stream-vbyte and
//! finally runs zstd over the result. Any stage after delta can be switched off
//! through [`Options`].
//!
//! ```
//! use vbz_core::{compress_to_vec, decompress_to_vec, Options};
//!
//! let samples: Vec<u8> = (1i16..100).flat_map(|v| v.to_le_bytes()).collect();
//! let options = Options::new(2).with_version(1);
//! let compressed = compress_to_vec(&samples, &options).unwrap();
//! assert!(compressed.len() < samples.len());
//! assert_eq!(decompress_to_vec(&compressed, &options).unwrap(), samples);
//! ```

pub mod codec;
pub mod compressor;
pub mod error;
pub mod options;
pub mod raw;
pub mod samples;
pub mod size;
pub mod streamvbyte;
pub mod transform;
pub mod zigzag;

pub use codec::{
    compress, compress_bare, compress_to_vec, decompress, decompress_bare, decompress_to_vec,
};
pub use compressor::ZstdAdapter;
pub use error::{ErrorCode, ErrorKind, Result, SizeT, VbzError, FIRST_ERROR};
pub use options::{Options, DEFAULT_VERSION, DEFAULT_ZSTD_LEVEL};
pub use samples::{decode_samples, encode_samples, Sample};
pub use size::{
    checked_decompressed_size, decompressed_size, max_compressed_size, SIZE_HEADER_LEN,
};
pub use transform::Version;
