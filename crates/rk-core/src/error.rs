use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A dimension is zero; there are no pixels to process.
    EmptyImage,
    SizeMismatch { expected: usize, actual: usize },
    InvalidStride,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyImage => write!(f, "image has zero width or height"),
            Self::SizeMismatch { expected, actual } => {
                write!(f, "buffer size mismatch: expected {expected}, got {actual}")
            }
            Self::InvalidStride => write!(f, "stride is smaller than width"),
        }
    }
}

impl std::error::Error for Error {}
