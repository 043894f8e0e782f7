use core::fmt;

/// Reasons a file was readable but is not a decodable WBMP image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// The input ended inside a header field.
    EndOfInput,
    /// Fewer pixel bytes are present than `height * ceil(width / 8)`.
    TruncatedPixelData { expected: usize, available: usize },
    /// A dimension or a buffer size derived from it does not fit the target integer.
    DimensionOverflow,
    /// Reserved header bytes are non-zero (only checked in strict mode).
    InvalidHeader,
    /// Dimensions exceed the configured limits.
    TooLarge { width: u32, height: u32 },
    /// A packed buffer does not match `ceil(width * height / 8)` bytes.
    BufferSizeMismatch { expected: usize, actual: usize },
}

/// Error type for WBMP decoding operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WbmpError {
    IoError(embedded_io::ErrorKind),
    Format(FormatError),
}

impl WbmpError {
    pub(crate) fn from_io_error(error: impl embedded_io::Error) -> Self {
        WbmpError::IoError(error.kind())
    }

    pub(crate) fn from_read_exact_error<E: embedded_io::Error>(
        error: embedded_io::ReadExactError<E>,
    ) -> Self {
        match error {
            embedded_io::ReadExactError::UnexpectedEof => {
                WbmpError::Format(FormatError::EndOfInput)
            }
            embedded_io::ReadExactError::Other(e) => WbmpError::from_io_error(e),
        }
    }

    pub fn is_format_error(&self) -> bool {
        matches!(self, WbmpError::Format(_))
    }
}

impl From<FormatError> for WbmpError {
    fn from(err: FormatError) -> Self {
        WbmpError::Format(err)
    }
}

impl embedded_io::Error for WbmpError {
    fn kind(&self) -> embedded_io::ErrorKind {
        match self {
            WbmpError::IoError(kind) => *kind,
            WbmpError::Format(FormatError::TooLarge { .. }) => embedded_io::ErrorKind::Unsupported,
            WbmpError::Format(_) => embedded_io::ErrorKind::InvalidData,
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::EndOfInput => f.write_str("unexpected end of input in WBMP header"),
            FormatError::TruncatedPixelData {
                expected,
                available,
            } => write!(
                f,
                "truncated pixel data: expected {expected} bytes, found {available}"
            ),
            FormatError::DimensionOverflow => f.write_str("image dimensions overflow"),
            FormatError::InvalidHeader => f.write_str("reserved header bytes are not zero"),
            FormatError::TooLarge { width, height } => {
                write!(f, "image of {width}x{height} exceeds the configured limits")
            }
            FormatError::BufferSizeMismatch { expected, actual } => write!(
                f,
                "packed buffer holds {actual} bytes, dimensions need {expected}"
            ),
        }
    }
}

impl fmt::Display for WbmpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WbmpError::IoError(kind) => write!(f, "io error: {kind:?}"),
            WbmpError::Format(err) => write!(f, "invalid WBMP: {err}"),
        }
    }
}

impl core::error::Error for WbmpError {}
