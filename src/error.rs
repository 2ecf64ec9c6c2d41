//! Queue errors.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, QueueError>;

/// Errors returned by [`DynamicQueue`](crate::DynamicQueue) operations.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueueError {
    /// The operation needs at least one element, but the queue is empty.
    #[error("Tried to access the head of an empty queue")]
    Underflow,
}
