//! A FIFO queue stored in a circular buffer that grows and shrinks with its
//! contents.

mod config;
mod dynamic_queue;
mod error;

pub use config::{DEFAULT_INITIAL_CAPACITY, DynamicQueueConfig};
pub use dynamic_queue::DynamicQueue;
pub use error::{QueueError, Result};

#[cfg(feature = "fuzzing")]
pub use dynamic_queue::fuzzing;

pub use allocator_api2::alloc::{Allocator, Global};
