use std::fmt;

use thiserror::Error;

/// Byte count as carried across the sentinel boundary.
pub type SizeT = u32;

pub type Result<T> = std::result::Result<T, VbzError>;

/// Coarse classification shared by every error the codec can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unsupported `integer_size` or unknown `version`.
    InvalidOptions,
    /// Destination capacity cannot hold the result. Detected before any write
    /// past the capacity.
    BufferTooSmall,
    /// Compressed input is truncated or fails a consistency check.
    CorruptInput,
    /// Delta-zigzag requested on a buffer shape the codec cannot handle.
    Unsupported,
}

/// Reserved return values of the size-returning entry points in [`crate::raw`].
///
/// Every code sits at the very top of the `SizeT` range, so any value below
/// [`FIRST_ERROR`] is a valid byte count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ErrorCode {
    Zstd = SizeT::MAX,
    InputSize = SizeT::MAX - 1,
    IntegerSize = SizeT::MAX - 2,
    DestinationSize = SizeT::MAX - 3,
    Stream = SizeT::MAX - 4,
    Version = SizeT::MAX - 5,
    TooLarge = SizeT::MAX - 6,
}

/// Smallest reserved sentinel.
pub const FIRST_ERROR: SizeT = ErrorCode::TooLarge as SizeT;

impl ErrorCode {
    const ALL: [ErrorCode; 7] = [
        ErrorCode::Zstd,
        ErrorCode::InputSize,
        ErrorCode::IntegerSize,
        ErrorCode::DestinationSize,
        ErrorCode::Stream,
        ErrorCode::Version,
        ErrorCode::TooLarge,
    ];

    #[inline]
    pub fn as_size(self) -> SizeT {
        self as SizeT
    }

    /// Translate a value returned by a [`crate::raw`] function back into its
    /// error code. Returns `None` for valid byte counts and for values in the
    /// reserved range that no code is assigned to.
    pub fn from_size(size: SizeT) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.as_size() == size)
    }

    pub fn name(self) -> &'static str {
        match self {
            ErrorCode::Zstd => "VBZ_ZSTD_ERROR",
            ErrorCode::InputSize => "VBZ_INPUT_SIZE_ERROR",
            ErrorCode::IntegerSize => "VBZ_INTEGER_SIZE_ERROR",
            ErrorCode::DestinationSize => "VBZ_DESTINATION_SIZE_ERROR",
            ErrorCode::Stream => "VBZ_STREAM_ERROR",
            ErrorCode::Version => "VBZ_VERSION_ERROR",
            ErrorCode::TooLarge => "VBZ_TOO_LARGE_ERROR",
        }
    }

    pub fn kind(self) -> ErrorKind {
        match self {
            ErrorCode::IntegerSize | ErrorCode::Version => ErrorKind::InvalidOptions,
            ErrorCode::DestinationSize => ErrorKind::BufferTooSmall,
            ErrorCode::Zstd | ErrorCode::Stream => ErrorKind::CorruptInput,
            ErrorCode::InputSize | ErrorCode::TooLarge => ErrorKind::Unsupported,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::error::Error for ErrorCode {}

/// Errors reported by the codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VbzError {
    #[error("zstd error: {0}")]
    Zstd(String),

    #[error("buffer of {len} bytes is not a whole number of {integer_size}-byte samples")]
    InputSize { len: usize, integer_size: u32 },

    #[error("unsupported integer size {0} (expected 1, 2 or 4)")]
    IntegerSize(u32),

    #[error("destination too small: {required} bytes required, capacity is {capacity}")]
    DestinationSize { required: usize, capacity: usize },

    #[error("malformed stream: {0}")]
    Stream(&'static str),

    #[error("compressed buffer of {len} bytes is shorter than its size header")]
    Truncated { len: usize },

    #[error("unknown vbz version {0}")]
    Version(u32),

    #[error("buffer of {0} bytes exceeds the largest size the codec can report")]
    TooLarge(usize),
}

impl VbzError {
    /// Sentinel used for this error at the [`crate::raw`] boundary.
    pub fn code(&self) -> ErrorCode {
        match self {
            VbzError::Zstd(_) => ErrorCode::Zstd,
            VbzError::InputSize { .. } => ErrorCode::InputSize,
            VbzError::IntegerSize(_) => ErrorCode::IntegerSize,
            VbzError::DestinationSize { .. } => ErrorCode::DestinationSize,
            VbzError::Stream(_) | VbzError::Truncated { .. } => ErrorCode::Stream,
            VbzError::Version(_) => ErrorCode::Version,
            VbzError::TooLarge(_) => ErrorCode::TooLarge,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.code().kind()
    }
}
