//! A circular queue (ring buffer) that grows and shrinks with its contents.

use crate::{
    config::{DEFAULT_INITIAL_CAPACITY, DynamicQueueConfig},
    error::{QueueError, Result},
};
use allocator_api2::{
    alloc::{Allocator, Global},
    vec::Vec as AVec,
};
use std::{fmt, iter, mem};

/// A circular queue (ring buffer) that stores elements in FIFO order and
/// resizes its storage to fit the number of elements.
///
/// Elements are stored in a contiguous buffer of slots, wrapping around to the
/// beginning when the end is reached. When an element is enqueued into a full
/// buffer, the capacity is doubled. When a dequeue leaves the buffer at most a
/// quarter full, the capacity is halved, but never below the capacity the
/// queue was created with. Every resize moves the elements into a fresh buffer
/// with the head at the first slot.
///
/// Cloning copies the full buffer, so the clone has the same capacity as the
/// original regardless of how many elements it holds.
#[derive(Debug)]
pub struct DynamicQueue<T, A: Allocator = Global> {
    slots: AVec<Option<T>, A>,
    initial_capacity: usize,
    head: usize,
    tail: usize,
    len: usize,
}

impl<T> DynamicQueue<T> {
    /// Creates a new empty queue with room for `capacity_hint` elements. A
    /// hint of zero is treated as one.
    ///
    /// The resulting capacity is the floor the queue will never shrink below.
    pub fn new(capacity_hint: usize) -> Self {
        Self::new_in(Global, capacity_hint)
    }

    /// Creates a new empty queue with the given configuration.
    pub fn with_config(config: &DynamicQueueConfig) -> Self {
        Self::with_config_in(Global, config)
    }
}

impl<T> Default for DynamicQueue<T> {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_CAPACITY)
    }
}

impl<T, A: Allocator> DynamicQueue<T, A> {
    /// Creates a new empty queue using the given allocator, with room for
    /// `capacity_hint` elements. A hint of zero is treated as one.
    pub fn new_in(alloc: A, capacity_hint: usize) -> Self {
        Self::with_config_in(alloc, &DynamicQueueConfig::new(capacity_hint))
    }

    /// Creates a new empty queue using the given allocator and
    /// configuration.
    pub fn with_config_in(alloc: A, config: &DynamicQueueConfig) -> Self {
        let initial_capacity = config.effective_initial_capacity();
        if initial_capacity != config.initial_capacity {
            log::debug!(
                "Using initial queue capacity {initial_capacity} instead of {}",
                config.initial_capacity
            );
        }
        Self {
            slots: allocate_slots(alloc, initial_capacity),
            initial_capacity,
            head: initial_capacity - 1,
            tail: 0,
            len: 0,
        }
    }

    /// Returns the number of elements currently in the queue.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of elements currently in the queue. Same as
    /// [`Self::len`].
    pub fn size(&self) -> usize {
        self.len()
    }

    /// Whether the queue contains no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of slots in the current buffer.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the capacity the queue was created with, which is the floor
    /// for shrinking.
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Returns a configuration that creates queues with the same initial
    /// capacity as this one.
    pub fn config(&self) -> DynamicQueueConfig {
        DynamicQueueConfig::new(self.initial_capacity)
    }

    /// Returns the allocator backing the queue's buffer.
    pub fn allocator(&self) -> &A {
        self.slots.allocator()
    }

    /// Returns a reference to the oldest element in the queue.
    ///
    /// # Errors
    /// Returns [`QueueError::Underflow`] if the queue is empty.
    pub fn head(&self) -> Result<&T> {
        if self.is_empty() {
            return Err(QueueError::Underflow);
        }
        self.slots[self.head].as_ref().ok_or(QueueError::Underflow)
    }

    /// Exchanges the contents, buffers and capacities of the two queues
    /// without moving any elements.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    fn slot_after(&self, idx: usize) -> usize {
        (idx + 1) % self.capacity()
    }

    fn slot_at_offset_from_head(&self, offset: usize) -> usize {
        (self.head + offset) % self.capacity()
    }

    fn elements(&self) -> impl Iterator<Item = &T> {
        (0..self.len)
            .filter_map(move |offset| self.slots[self.slot_at_offset_from_head(offset)].as_ref())
    }
}

impl<T, A: Allocator + Clone> DynamicQueue<T, A> {
    /// Adds an element to the back of the queue. If the buffer is full, the
    /// capacity is doubled first.
    pub fn enqueue(&mut self, value: T) {
        if self.is_empty() {
            self.head = self.tail;
        } else if self.len == self.capacity() {
            let new_capacity = 2 * self.capacity();
            log::trace!(
                "Growing queue from {} to {new_capacity} slots",
                self.capacity()
            );
            self.relocate(new_capacity);
            self.tail = self.len;
        } else {
            self.tail = self.slot_after(self.tail);
        }

        self.slots[self.tail] = Some(value);
        self.len += 1;
    }

    /// Removes and returns the oldest element in the queue. If this leaves
    /// the buffer at most a quarter full and the capacity is above the
    /// initial capacity, the capacity is halved.
    ///
    /// # Errors
    /// Returns [`QueueError::Underflow`] if the queue is empty.
    pub fn dequeue(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(QueueError::Underflow);
        }

        let value = self.slots[self.head]
            .take()
            .ok_or(QueueError::Underflow)?;

        // With a single element the head stays put, since the next enqueue
        // moves it to the tail anyway
        if self.len > 1 {
            self.head = self.slot_after(self.head);
        }
        self.len -= 1;

        if self.len <= self.capacity() / 4 && self.capacity() > self.initial_capacity {
            let new_capacity = self.capacity() / 2;
            log::trace!(
                "Shrinking queue from {} to {new_capacity} slots",
                self.capacity()
            );
            self.relocate(new_capacity);
            self.tail = self.len.saturating_sub(1);
        }

        Ok(value)
    }

    /// Removes all elements and replaces the buffer with one of the initial
    /// capacity.
    pub fn clear(&mut self) {
        log::trace!(
            "Clearing queue with {} elements, resetting from {} to {} slots",
            self.len,
            self.capacity(),
            self.initial_capacity
        );
        self.slots = allocate_slots(self.slots.allocator().clone(), self.initial_capacity);
        self.head = self.initial_capacity - 1;
        self.tail = 0;
        self.len = 0;
    }

    /// Moves the elements in order into a new buffer with the given number
    /// of slots, with the head at the first slot. The tail is left for the
    /// caller to set.
    fn relocate(&mut self, new_capacity: usize) {
        let mut slots = allocate_slots(self.slots.allocator().clone(), new_capacity);

        for (offset, slot) in slots.iter_mut().take(self.len).enumerate() {
            let idx = self.slot_at_offset_from_head(offset);
            *slot = self.slots[idx].take();
        }

        self.slots = slots;
        self.head = 0;
    }
}

impl<T: Clone, A: Allocator + Clone> DynamicQueue<T, A> {
    /// Makes this queue a copy of `source`, including its capacity. The
    /// previous buffer of this queue is released.
    pub fn assign(&mut self, source: &Self) {
        let mut copy = source.clone();
        self.swap(&mut copy);
    }
}

impl<T: Clone, A: Allocator + Clone> Clone for DynamicQueue<T, A> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            initial_capacity: self.initial_capacity,
            head: self.head,
            tail: self.tail,
            len: self.len,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign(source);
    }
}

impl<T, A: Allocator + Clone> Extend<T> for DynamicQueue<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.enqueue(value);
        }
    }
}

impl<T: fmt::Display, A: Allocator> fmt::Display for DynamicQueue<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (idx, element) in self.elements().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{element}")?;
        }
        write!(f, "]")
    }
}

fn allocate_slots<T, A: Allocator>(alloc: A, capacity: usize) -> AVec<Option<T>, A> {
    let mut slots = AVec::with_capacity_in(capacity, alloc);
    slots.extend(iter::repeat_with(|| None).take(capacity));
    slots
}

#[cfg(feature = "fuzzing")]
pub mod fuzzing {
    use super::*;
    use arbitrary::{Arbitrary, Result, Unstructured};
    use std::collections::VecDeque;

    const MAX_INITIAL_CAPACITY: usize = 64;

    #[derive(Clone, Copy, Debug)]
    pub struct ArbitraryInitialCapacity(usize);

    #[derive(Arbitrary, Clone, Copy, Debug)]
    pub enum QueueOperation {
        Enqueue(u16),
        Dequeue,
        Head,
        Clear,
        CloneAndSwap,
        CloneAndMutate,
    }

    impl Arbitrary<'_> for ArbitraryInitialCapacity {
        fn arbitrary(u: &mut Unstructured<'_>) -> Result<Self> {
            Ok(Self(u.int_in_range(0..=MAX_INITIAL_CAPACITY)?))
        }

        fn size_hint(_depth: usize) -> (usize, Option<usize>) {
            let size = mem::size_of::<u8>();
            (size, Some(size))
        }
    }

    pub fn fuzz_test_dynamic_queue_operations(
        (initial_capacity, operations): (ArbitraryInitialCapacity, Vec<QueueOperation>),
    ) {
        let mut queue = DynamicQueue::new(initial_capacity.0);
        let mut model = VecDeque::new();
        let floor = queue.initial_capacity();

        for operation in operations {
            let capacity_before = queue.capacity();
            let mut expected_capacity = capacity_before;

            match operation {
                QueueOperation::Enqueue(value) => {
                    if model.len() == capacity_before {
                        expected_capacity = 2 * capacity_before;
                    }
                    queue.enqueue(value);
                    model.push_back(value);
                }
                QueueOperation::Dequeue => {
                    let dequeued = queue.dequeue().ok();
                    assert_eq!(dequeued, model.pop_front());
                    if dequeued.is_some()
                        && model.len() <= capacity_before / 4
                        && capacity_before > floor
                    {
                        expected_capacity = capacity_before / 2;
                    }
                }
                QueueOperation::Head => {
                    assert_eq!(queue.head().ok(), model.front());
                }
                QueueOperation::Clear => {
                    queue.clear();
                    model.clear();
                    expected_capacity = floor;
                }
                QueueOperation::CloneAndSwap => {
                    let mut copy = queue.clone();
                    let mut other = DynamicQueue::new(1);
                    other.swap(&mut copy);
                    queue = other;
                }
                QueueOperation::CloneAndMutate => {
                    let mut copy = queue.clone();
                    assert_eq!(copy.capacity(), queue.capacity());
                    copy.enqueue(0);
                    let _ = copy.dequeue();
                }
            }

            assert_eq!(queue.len(), model.len());
            assert_eq!(queue.capacity(), expected_capacity);
            assert!(queue.len() <= queue.capacity());
            assert!(queue.capacity() >= floor);
        }

        while let Ok(value) = queue.dequeue() {
            assert_eq!(Some(value), model.pop_front());
        }
        assert!(model.is_empty());
    }
}
