use crate::error::{Result, VbzError};

/// Zstandard stage of the codec.
///
/// Each call produces or consumes one independent zstd frame. The frame
/// records its content size, which is how the decoder sizes its output.
#[derive(Debug, Clone, Copy)]
pub struct ZstdAdapter {
    level: i32,
}

impl ZstdAdapter {
    /// Levels above zstd's maximum are clamped by zstd.
    pub fn new(level: u32) -> Self {
        Self {
            level: i32::try_from(level).unwrap_or(i32::MAX),
        }
    }

    /// Worst case frame size for `len` input bytes.
    pub fn compress_bound(len: usize) -> usize {
        zstd::zstd_safe::compress_bound(len)
    }

    /// Compress `source` into `dest`, returning the frame length.
    ///
    /// zstd refuses to write past `dest`; a refusal on a destination smaller
    /// than [`Self::compress_bound`] is reported as a too-small destination.
    pub fn compress_into(&self, source: &[u8], dest: &mut [u8]) -> Result<usize> {
        zstd::bulk::compress_to_buffer(source, dest, self.level).map_err(|e| {
            let required = Self::compress_bound(source.len());
            if dest.len() < required {
                VbzError::DestinationSize {
                    required,
                    capacity: dest.len(),
                }
            } else {
                VbzError::Zstd(e.to_string())
            }
        })
    }

    /// Content size recorded in the frame header.
    pub fn content_size(frame: &[u8]) -> Result<usize> {
        match zstd::zstd_safe::get_frame_content_size(frame) {
            Ok(Some(size)) => usize::try_from(size).map_err(|_| VbzError::TooLarge(usize::MAX)),
            Ok(None) => Err(VbzError::Zstd(
                "frame does not record its content size".to_string(),
            )),
            Err(_) => Err(VbzError::Zstd("invalid frame header".to_string())),
        }
    }

    /// Decompress one frame into the front of `dest`, returning the number of
    /// bytes written. The capacity check happens before anything is written.
    pub fn decompress_into(frame: &[u8], dest: &mut [u8]) -> Result<usize> {
        let size = Self::content_size(frame)?;
        let capacity = dest.len();
        let target = dest
            .get_mut(..size)
            .ok_or(VbzError::DestinationSize {
                required: size,
                capacity,
            })?;
        let written = zstd::bulk::decompress_to_buffer(frame, target)
            .map_err(|e| VbzError::Zstd(e.to_string()))?;
        if written != size {
            return Err(VbzError::Zstd(format!(
                "frame decoded to {written} bytes but records {size}"
            )));
        }
        Ok(written)
    }
}
