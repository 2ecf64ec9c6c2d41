//! Configuration for constructing queues.

/// Number of slots allocated for a queue when no capacity is specified.
pub const DEFAULT_INITIAL_CAPACITY: usize = 10;

/// Configuration parameters for a
/// [`DynamicQueue`](crate::DynamicQueue).
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DynamicQueueConfig {
    /// The number of slots allocated when the queue is created. The queue
    /// never shrinks below this. A value of zero is treated as one.
    pub initial_capacity: usize,
}

impl DynamicQueueConfig {
    /// Creates a configuration with the given initial capacity.
    pub fn new(initial_capacity: usize) -> Self {
        Self { initial_capacity }
    }

    /// The initial capacity that a queue created from this configuration
    /// will actually get.
    pub fn effective_initial_capacity(&self) -> usize {
        self.initial_capacity.max(1)
    }
}

impl Default for DynamicQueueConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}
