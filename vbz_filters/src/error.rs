use std::io;

use thiserror::Error;
use vbz_core::VbzError;

pub type Result<T> = std::result::Result<T, FilterError>;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error(transparent)]
    Vbz(#[from] VbzError),

    #[error("deflate stream error: {0}")]
    Deflate(#[from] io::Error),

    #[error("unknown filter id {0}")]
    UnknownFilter(u16),

    #[error("filter id {0} is already registered")]
    Duplicate(u16),

    #[error("invalid parameters for filter '{filter}': {reason}")]
    InvalidParams { filter: &'static str, reason: String },

    #[error("filter '{filter}' produced {produced} bytes, expected {expected}")]
    SizeMismatch {
        filter: &'static str,
        expected: usize,
        produced: usize,
    },
}
