use crate::error::Result;

/// Filter ID under which chunked-storage layers find the VBZ codec.
pub const VBZ_FILTER_ID: u16 = 32020;

/// Filter ID of the zlib ("gzip") filter.
pub const DEFLATE_FILTER_ID: u16 = 1;

/// One stage of a chunk filter pipeline.
///
/// Each `Filter` implementation:
/// - Is identified by a stable numeric `id()` stored next to the data.
/// - Transforms a single chunk independently; no state is carried between
///   chunks or calls, so one instance is shared across threads.
/// - Receives the parameter words stored with the chunk on both encode and
///   decode. Decoding with different parameters than were used to encode is
///   a caller error and is not detectable in general.
pub trait Filter: Send + Sync {
    /// Stable filter ID.
    fn id(&self) -> u16;

    /// Human-readable name for CLI display.
    fn name(&self) -> &'static str;

    /// Encode one chunk.
    fn encode(&self, chunk: &[u8], params: &[u32]) -> Result<Vec<u8>>;

    /// Decode one chunk written by `encode` with the same `params`.
    fn decode(&self, payload: &[u8], params: &[u32]) -> Result<Vec<u8>>;
}
