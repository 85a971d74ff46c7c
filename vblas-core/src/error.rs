use thiserror::Error;

use crate::event::EventId;
use crate::graph::GraphError;
use crate::routine::Routine;
use crate::scalar::DType;
use crate::tag::{Backend, Library};

/// Errors raised by the dispatch layer, its queues and its backends.
///
/// `Clone` so a failed event can hand the same error to every waiter.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BlasError {
    /// The selected library/backend has no implementation for this routine
    /// and element type. Raised before anything is queued.
    #[error("{routine} is not supported for {dtype} on {library}/{backend}")]
    Unsupported {
        routine: Routine,
        dtype: DType,
        library: Library,
        backend: Backend,
    },

    #[error("{library} is not available on {backend}: {reason}")]
    UnsupportedBackend {
        library: Library,
        backend: Backend,
        reason: String,
    },

    /// Parameter check failure reported by a backend.
    #[error("{routine}: illegal value for `{argument}`: {reason}")]
    InvalidArgument {
        routine: Routine,
        argument: &'static str,
        reason: String,
    },

    #[error("{routine}: buffer `{argument}` holds {actual} elements, {required} required")]
    BufferTooSmall {
        routine: Routine,
        argument: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("{routine}: backend failure: {message}")]
    Backend { routine: Routine, message: String },

    #[error("dependency {event} failed")]
    DependencyFailed { event: EventId },

    #[error("kernel `{label}` panicked: {message}")]
    KernelPanicked { label: String, message: String },

    #[error("queue is shut down")]
    QueueClosed,

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type Result<T> = std::result::Result<T, BlasError>;

impl BlasError {
    /// True for failures raised synchronously at dispatch time.
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            BlasError::Unsupported { .. } | BlasError::UnsupportedBackend { .. }
        )
    }
}
