//! Fixed-capacity ring buffer
//!
//! FIFO queue over a pre-allocated slot array. Full and empty conditions are
//! reported to the caller; nothing blocks and nothing is dropped silently.
//! Not synchronized: callers that share a buffer must guard it themselves.

use thiserror::Error;

/// Ring buffer conditions reported to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RingError {
    /// Push on a full buffer with [`WhenFull::Error`]
    #[error("ring buffer is full")]
    Full,

    /// Pop on an empty buffer
    #[error("ring buffer is empty")]
    Empty,
}

/// What `push` does when the buffer is full
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WhenFull {
    /// Reject the new item with [`RingError::Full`]
    #[default]
    Error,
    /// Evict the oldest item to make room
    Overwrite,
}

/// Fixed-capacity circular queue
#[derive(Debug)]
pub struct RingBuffer<T> {
    slots: Box<[Option<T>]>,
    head: usize,
    len: usize,
    when_full: WhenFull,
}

impl<T> RingBuffer<T> {
    /// Create a buffer with the given capacity and full policy
    ///
    /// A capacity of zero yields a buffer that is always full.
    pub fn new(capacity: usize, when_full: WhenFull) -> Self {
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            head: 0,
            len: 0,
            when_full,
        }
    }

    /// Create a buffer that rejects pushes when full
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(capacity, WhenFull::Error)
    }

    /// Number of items currently stored
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Maximum number of items
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Configured full policy
    #[inline]
    pub fn when_full(&self) -> WhenFull {
        self.when_full
    }

    /// Append an item at the back
    ///
    /// Returns the evicted oldest item when the buffer was full and the
    /// policy is [`WhenFull::Overwrite`].
    ///
    /// # Errors
    ///
    /// Returns [`RingError::Full`] when the buffer is full and the policy is
    /// [`WhenFull::Error`]. The rejected item is dropped.
    pub fn push(&mut self, item: T) -> Result<Option<T>, RingError> {
        if !self.is_full() {
            let tail = self.slot_index(self.len);
            self.slots[tail] = Some(item);
            self.len += 1;
            return Ok(None);
        }

        match self.when_full {
            WhenFull::Error => Err(RingError::Full),
            WhenFull::Overwrite if self.capacity() == 0 => Ok(Some(item)),
            WhenFull::Overwrite => {
                let evicted = self.slots[self.head].replace(item);
                self.head = self.slot_index(1);
                Ok(evicted)
            }
        }
    }

    /// Remove and return the oldest item
    ///
    /// # Errors
    ///
    /// Returns [`RingError::Empty`] when there is nothing to pop.
    pub fn pop(&mut self) -> Result<T, RingError> {
        if self.is_empty() {
            return Err(RingError::Empty);
        }
        let item = self.slots[self.head].take().ok_or(RingError::Empty)?;
        self.head = self.slot_index(1);
        self.len -= 1;
        Ok(item)
    }

    /// Oldest item without removing it
    pub fn peek(&self) -> Option<&T> {
        if self.is_empty() {
            None
        } else {
            self.slots[self.head].as_ref()
        }
    }

    /// Pop items oldest-first until the buffer is empty
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain { ring: self }
    }

    /// Drop every stored item
    pub fn clear(&mut self) {
        self.drain().for_each(drop);
    }

    #[inline]
    fn slot_index(&self, offset: usize) -> usize {
        (self.head + offset) % self.capacity()
    }
}

/// Iterator returned by [`RingBuffer::drain`]
///
/// Items not consumed before the iterator is dropped stay in the buffer.
pub struct Drain<'a, T> {
    ring: &'a mut RingBuffer<T>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        // Empty terminates the drain
        self.ring.pop().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.ring.len(), Some(self.ring.len()))
    }
}

impl<T> ExactSizeIterator for Drain<'_, T> {}

#[cfg(test)]
#[path = "ring_test.rs"]
mod ring_test;
