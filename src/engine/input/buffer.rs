// Bounded FIFO of pending inputs

use std::collections::VecDeque;

/// Default number of inputs held before new ones are dropped
pub const DEFAULT_CAPACITY: usize = 4;

/// Queue of inputs waiting to be consumed, oldest first
///
/// Inputs never expire on their own; once the queue is full further pushes
/// are rejected until something is consumed or the queue is cleared.
#[derive(Debug, Clone)]
pub struct InputBuffer<T> {
    buffer: VecDeque<T>,
    capacity: usize,
}

impl<T: Copy> InputBuffer<T> {
    /// Create a new input buffer
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Add an input; returns false if the buffer was full
    pub fn push(&mut self, input: T) -> bool {
        if self.buffer.len() >= self.capacity {
            return false;
        }
        self.buffer.push_back(input);
        true
    }

    /// The oldest pending input
    pub fn front(&self) -> Option<T> {
        self.buffer.front().copied()
    }

    /// Consume the oldest pending input
    pub fn pop(&mut self) -> Option<T> {
        self.buffer.pop_front()
    }

    /// Clear all buffered inputs
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Get the number of buffered inputs
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.buffer.iter()
    }
}

impl<T: Copy> Default for InputBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}
