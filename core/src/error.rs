use std::fmt;

/// Error raised by the benchmark runner.
///
/// The runner has a single failure mode: the caller asked for a run that
/// cannot be performed (non-positive length, zero rounds, no strategies).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BenchError {
    InvalidInput { reason: String },
}

impl BenchError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        BenchError::InvalidInput { reason: reason.into() }
    }

    pub fn reason(&self) -> &str {
        match self {
            BenchError::InvalidInput { reason } => reason,
        }
    }
}

impl fmt::Display for BenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchError::InvalidInput { reason } => write!(f, "invalid input: {}", reason),
        }
    }
}

impl std::error::Error for BenchError {}
