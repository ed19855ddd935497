use std::error::Error as StdError;
use std::fmt;

/// Unified error type for boundary conversions and the adapters above them.
#[derive(Debug)]
pub enum Error {
    /// A bounded conversion's output would not fit the declared destination.
    /// Nothing is written to the destination when this is reported.
    CapacityExceeded { required: usize, capacity: usize },
    /// An input sequence does not decode to a valid code point. The offset is
    /// the index of the first offending code unit in the input buffer.
    MalformedSequence { offset: usize },
    /// Backing storage for an owned array could not be reserved.
    AllocationFailure,
    /// The requested operation is not available in this build or with the
    /// supplied parameters.
    UnsupportedOperation { message: String },
}

/// Convenience result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Construct a capacity error for a destination of `capacity` units that
    /// would need `required` units to hold the converted output.
    #[must_use]
    pub fn capacity(required: usize, capacity: usize) -> Self {
        Self::CapacityExceeded { required, capacity }
    }

    /// Construct a malformed-sequence error at the given input offset.
    #[must_use]
    pub fn malformed(offset: usize) -> Self {
        Self::MalformedSequence { offset }
    }

    /// Construct an unsupported-operation error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedOperation {
            message: message.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CapacityExceeded { required, capacity } => write!(
                f,
                "output capacity exceeded: {required} units required, {capacity} available"
            ),
            Error::MalformedSequence { offset } => {
                write!(f, "malformed sequence at input offset {offset}")
            }
            Error::AllocationFailure => write!(f, "allocation failure"),
            Error::UnsupportedOperation { message } => {
                write!(f, "unsupported operation: {message}")
            }
        }
    }
}

impl StdError for Error {}
