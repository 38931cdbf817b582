use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Byte length is too short for the declared geometry.
    SizeMismatch { expected: usize, actual: usize },
    /// Row stride cannot hold a full row of RGBA pixels.
    InvalidStride { stride: usize, min: usize },
    /// Width/height product does not fit in `usize`.
    Overflow,
    OutOfBounds,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected at least {expected} bytes, got {actual}")
            }
            Self::InvalidStride { stride, min } => {
                write!(f, "invalid stride: {stride} bytes, need at least {min}")
            }
            Self::Overflow => write!(f, "buffer dimensions overflow"),
            Self::OutOfBounds => write!(f, "out of bounds"),
        }
    }
}

impl std::error::Error for Error {}
