use tracing::debug;
use vbz_core::{
    checked_decompressed_size, compress, decompress, max_compressed_size, Options,
    DEFAULT_ZSTD_LEVEL,
};

use crate::error::{FilterError, Result};
use crate::filter::{Filter, VBZ_FILTER_ID};

/// Stored parameter words of the VBZ filter:
/// `[version, integer_size, perform_delta_zig_zag, zstd_compression_level]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterParams {
    pub options: Options,
}

impl FilterParams {
    /// Minimum number of words a chunk must carry.
    pub const MIN_WORDS: usize = 3;

    /// Parse stored words. A missing level word means level 1, and any
    /// non-zero zigzag word means on. Words past the fourth are ignored.
    pub fn parse(words: &[u32]) -> Result<Self> {
        let [version, integer_size, zig_zag, rest @ ..] = words else {
            return Err(FilterError::InvalidParams {
                filter: "vbz",
                reason: format!(
                    "expected at least {} parameter words, got {}",
                    Self::MIN_WORDS,
                    words.len()
                ),
            });
        };
        let options = Options {
            version: *version,
            integer_size: *integer_size,
            perform_delta_zig_zag: *zig_zag != 0,
            zstd_compression_level: rest.first().copied().unwrap_or(DEFAULT_ZSTD_LEVEL),
        };
        options.validate()?;
        Ok(Self { options })
    }

    pub fn to_words(&self) -> Vec<u32> {
        let o = &self.options;
        vec![
            o.version,
            o.integer_size,
            u32::from(o.perform_delta_zig_zag),
            o.zstd_compression_level,
        ]
    }
}

impl From<Options> for FilterParams {
    fn from(options: Options) -> Self {
        Self { options }
    }
}

/// The VBZ codec as a chunk filter.
#[derive(Debug, Default, Clone, Copy)]
pub struct VbzFilter;

impl Filter for VbzFilter {
    fn id(&self) -> u16 {
        VBZ_FILTER_ID
    }

    fn name(&self) -> &'static str {
        "vbz"
    }

    fn encode(&self, chunk: &[u8], params: &[u32]) -> Result<Vec<u8>> {
        let options = FilterParams::parse(params)?.options;
        let mut out = vec![0u8; max_compressed_size(chunk.len(), &options)?];
        let written = compress(chunk, &mut out, &options)?;
        out.truncate(written);
        debug!(raw = chunk.len(), encoded = written, "vbz chunk encoded");
        Ok(out)
    }

    fn decode(&self, payload: &[u8], params: &[u32]) -> Result<Vec<u8>> {
        let options = FilterParams::parse(params)?.options;
        let expected = checked_decompressed_size(payload, &options)?;
        let mut out = vec![0u8; expected];
        let produced = decompress(payload, &mut out, &options)?;
        if produced != expected {
            return Err(FilterError::SizeMismatch {
                filter: "vbz",
                expected,
                produced,
            });
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vbz_core::VbzError;

    #[test]
    fn test_parse_defaults_level() {
        let params = FilterParams::parse(&[1, 2, 1]).unwrap();
        assert_eq!(params.options, Options::new(2).with_version(1));
        assert_eq!(params.to_words(), vec![1, 2, 1, 1]);
    }

    #[test]
    fn test_parse_nonzero_zigzag_word() {
        let params = FilterParams::parse(&[0, 4, 7, 5]).unwrap();
        assert!(params.options.perform_delta_zig_zag);
        assert_eq!(params.options.zstd_compression_level, 5);
        assert!(!FilterParams::parse(&[0, 4, 0]).unwrap().options.perform_delta_zig_zag);
    }

    #[test]
    fn test_parse_too_few_words() {
        assert!(matches!(
            FilterParams::parse(&[0, 2]),
            Err(FilterError::InvalidParams { filter: "vbz", .. })
        ));
    }

    #[test]
    fn test_parse_rejects_bad_options() {
        assert!(matches!(
            FilterParams::parse(&[9, 2, 1, 1]),
            Err(FilterError::Vbz(VbzError::Version(9)))
        ));
        assert!(matches!(
            FilterParams::parse(&[0, 3, 1, 1]),
            Err(FilterError::Vbz(VbzError::IntegerSize(3)))
        ));
    }

    #[test]
    fn test_chunk_round_trip() {
        let chunk: Vec<u8> = (0..1000i16).flat_map(|v| (v / 3).to_le_bytes()).collect();
        let params = [0, 2, 1, 1];
        let encoded = VbzFilter.encode(&chunk, &params).unwrap();
        assert!(encoded.len() < chunk.len());
        assert_eq!(VbzFilter.decode(&encoded, &params).unwrap(), chunk);
    }

    #[test]
    fn test_inflated_size_header_is_rejected() {
        // Four header bytes claiming ~4 GiB followed by a tiny body.
        let chunk = [0xfe, 0xff, 0xff, 0xff, 0x28, 0xb5, 0x2f, 0xfd];
        for params in [[0, 2, 1, 1], [0, 2, 1, 0], [0, 2, 0, 0]] {
            assert!(matches!(
                VbzFilter.decode(&chunk, &params),
                Err(FilterError::Vbz(e)) if e.kind() == vbz_core::ErrorKind::CorruptInput
            ));
        }
    }

    #[test]
    fn test_partial_sample_chunk() {
        assert!(matches!(
            VbzFilter.encode(&[1, 2, 3], &[0, 2, 1, 1]),
            Err(FilterError::Vbz(VbzError::InputSize { len: 3, integer_size: 2 }))
        ));
    }
}
