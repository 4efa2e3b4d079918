use serde::{Deserialize, Serialize};

use crate::error::{Result, VbzError};
use crate::transform::Version;

/// Version used for new data unless the caller asks for another one.
pub const DEFAULT_VERSION: u32 = 0;

/// Zstd level used when none is stored alongside the data.
pub const DEFAULT_ZSTD_LEVEL: u32 = 1;

/// Options controlling a single compress or decompress call.
///
/// Decompression must use the same options the data was compressed with; the
/// compressed buffer does not record them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Options {
    /// Transform implementation used for both directions.
    pub version: u32,
    /// Bytes per sample: 1, 2 or 4.
    pub integer_size: u32,
    /// Delta + zigzag + stream-vbyte the samples before zstd. When false the
    /// sample bytes reach zstd unchanged.
    pub perform_delta_zig_zag: bool,
    /// Zstd level (1 = fast, 22 = smallest). `0` skips zstd entirely.
    pub zstd_compression_level: u32,
}

impl Default for Options {
    /// 16-bit signed samples, delta-zigzag on, zstd level 1.
    fn default() -> Self {
        Self::new(2)
    }
}

impl Options {
    pub fn new(integer_size: u32) -> Self {
        Self {
            version: DEFAULT_VERSION,
            integer_size,
            perform_delta_zig_zag: true,
            zstd_compression_level: DEFAULT_ZSTD_LEVEL,
        }
    }

    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn with_delta_zig_zag(mut self, enabled: bool) -> Self {
        self.perform_delta_zig_zag = enabled;
        self
    }

    pub fn with_zstd_level(mut self, level: u32) -> Self {
        self.zstd_compression_level = level;
        self
    }

    /// Check the integer size and resolve the version to a transform.
    pub fn validate(&self) -> Result<Version> {
        match self.integer_size {
            1 | 2 | 4 => {}
            other => return Err(VbzError::IntegerSize(other)),
        }
        Version::from_u32(self.version)
    }

    #[inline]
    pub fn zstd_enabled(&self) -> bool {
        self.zstd_compression_level != 0
    }

    #[inline]
    pub(crate) fn width(&self) -> usize {
        self.integer_size as usize
    }
}
