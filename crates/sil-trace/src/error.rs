use core::fmt;

use sil_core::Coordinate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceError {
    /// No pixel has alpha above the threshold.
    NoBorderFound,
    /// Raw parts do not describe a valid RGBA buffer.
    InvalidBuffer(sil_core::Error),
    /// A heading was requested between pixels that are not 8-adjacent.
    DegenerateAdjacency { from: Coordinate, to: Coordinate },
    /// The walk used more probes than the buffer can account for.
    StepLimitExceeded { limit: usize },
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoBorderFound => write!(f, "no pixel above the alpha threshold"),
            Self::InvalidBuffer(e) => write!(f, "invalid pixel buffer: {e}"),
            Self::DegenerateAdjacency { from, to } => {
                write!(f, "pixels {from} and {to} are not 8-adjacent")
            }
            Self::StepLimitExceeded { limit } => {
                write!(f, "boundary walk did not close within {limit} probes")
            }
        }
    }
}

impl std::error::Error for TraceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidBuffer(e) => Some(e),
            _ => None,
        }
    }
}

impl From<sil_core::Error> for TraceError {
    fn from(e: sil_core::Error) -> Self {
        Self::InvalidBuffer(e)
    }
}
