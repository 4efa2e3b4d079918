use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::{FilterError, Result};
use crate::filter::{Filter, DEFLATE_FILTER_ID};

/// Zlib level used when the chunk stores no level word.
pub const DEFAULT_DEFLATE_LEVEL: u32 = 6;

/// Zlib ("gzip") filter with parameters `[level]`.
///
/// The generic baseline datasets are usually written with before they are
/// converted to VBZ.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeflateFilter;

fn level(params: &[u32]) -> Result<Compression> {
    match params.first().copied().unwrap_or(DEFAULT_DEFLATE_LEVEL) {
        level @ 0..=9 => Ok(Compression::new(level)),
        other => Err(FilterError::InvalidParams {
            filter: "deflate",
            reason: format!("level {other} is outside 0..=9"),
        }),
    }
}

impl Filter for DeflateFilter {
    fn id(&self) -> u16 {
        DEFLATE_FILTER_ID
    }

    fn name(&self) -> &'static str {
        "deflate"
    }

    fn encode(&self, chunk: &[u8], params: &[u32]) -> Result<Vec<u8>> {
        let mut encoder = ZlibEncoder::new(Vec::with_capacity(chunk.len() / 2), level(params)?);
        encoder.write_all(chunk)?;
        Ok(encoder.finish()?)
    }

    fn decode(&self, payload: &[u8], params: &[u32]) -> Result<Vec<u8>> {
        level(params)?;
        let mut out = Vec::new();
        ZlibDecoder::new(payload).read_to_end(&mut out)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_default_level() {
        let chunk = b"abcabcabcabcabcabcabcabc".repeat(50);
        let encoded = DeflateFilter.encode(&chunk, &[]).unwrap();
        assert!(encoded.len() < chunk.len());
        assert_eq!(DeflateFilter.decode(&encoded, &[]).unwrap(), chunk);
    }

    #[test]
    fn test_stored_level_zero() {
        let chunk = vec![9u8; 100];
        let encoded = DeflateFilter.encode(&chunk, &[0]).unwrap();
        assert_eq!(DeflateFilter.decode(&encoded, &[0]).unwrap(), chunk);
    }

    #[test]
    fn test_level_out_of_range() {
        assert!(matches!(
            DeflateFilter.encode(b"x", &[10]),
            Err(FilterError::InvalidParams { filter: "deflate", .. })
        ));
    }

    #[test]
    fn test_garbage_payload() {
        assert!(matches!(
            DeflateFilter.decode(b"definitely not zlib", &[]),
            Err(FilterError::Deflate(_))
        ));
    }
}
