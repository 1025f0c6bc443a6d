//! Queue error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur while sizing or growing a [`Queue`](crate::Queue).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueueError {
    /// A reallocation target that does not exceed the current capacity.
    InvalidCapacity {
        /// Capacity passed to the reallocation.
        requested: usize,
        /// Capacity of the buffer at the time of the call.
        current: usize,
    },
    /// The requested capacity cannot be expressed as a memory layout
    /// (its byte size overflows `isize`), or the slot count itself
    /// overflowed `usize` while being computed.
    CapacityOverflow {
        /// Requested capacity in elements, saturated at `usize::MAX`.
        requested: usize,
    },
    /// The global allocator could not provide the requested region.
    AllocationFailed {
        /// Size of the failed allocation in bytes.
        bytes: usize,
    },
    /// A [`QueueConfig`](crate::QueueConfig) failed validation.
    InvalidConfig {
        /// Human-readable reason for rejection.
        reason: String,
    },
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCapacity { requested, current } => {
                write!(
                    f,
                    "new capacity {requested} must be larger than the current capacity {current}"
                )
            }
            Self::CapacityOverflow { requested } => {
                write!(f, "capacity overflow: {requested} slots do not fit in memory")
            }
            Self::AllocationFailed { bytes } => {
                write!(f, "allocation of {bytes} bytes failed")
            }
            Self::InvalidConfig { reason } => {
                write!(f, "invalid queue config: {reason}")
            }
        }
    }
}

impl Error for QueueError {}

/// A failed [`Queue::try_push`](crate::Queue::try_push).
///
/// Carries the rejected value back to the caller so nothing is lost when
/// the queue cannot grow.
#[derive(Clone, PartialEq, Eq)]
pub struct PushError<T> {
    /// Why the buffer could not make room.
    pub error: QueueError,
    /// The value that was not pushed.
    pub value: T,
}

impl<T> PushError<T> {
    /// Take back the value that was not pushed.
    pub fn into_value(self) -> T {
        self.value
    }
}

// Not derived: `T` need not be `Debug`.
impl<T> fmt::Debug for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PushError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "push rejected: {}", self.error)
    }
}

impl<T> Error for PushError<T> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}
