//! Tests for the ring buffer

use super::*;

// =============================================================================
// Push / pop
// =============================================================================

#[test]
fn test_fifo_order() {
    let mut ring = RingBuffer::with_capacity(3);
    ring.push(1).unwrap();
    ring.push(2).unwrap();
    ring.push(3).unwrap();

    assert_eq!(ring.pop(), Ok(1));
    assert_eq!(ring.pop(), Ok(2));
    assert_eq!(ring.pop(), Ok(3));
    assert_eq!(ring.pop(), Err(RingError::Empty));
}

#[test]
fn test_wraps_around() {
    let mut ring = RingBuffer::with_capacity(2);
    for round in 0..5 {
        ring.push(round * 2).unwrap();
        ring.push(round * 2 + 1).unwrap();
        assert!(ring.is_full());
        assert_eq!(ring.pop(), Ok(round * 2));
        assert_eq!(ring.pop(), Ok(round * 2 + 1));
        assert!(ring.is_empty());
    }
}

#[test]
fn test_full_with_error_policy() {
    let mut ring = RingBuffer::with_capacity(2);
    ring.push("a").unwrap();
    ring.push("b").unwrap();

    assert_eq!(ring.push("c"), Err(RingError::Full));
    assert_eq!(ring.len(), 2);
    assert_eq!(ring.peek(), Some(&"a"));
}

#[test]
fn test_full_with_overwrite_policy() {
    let mut ring = RingBuffer::new(2, WhenFull::Overwrite);
    ring.push("a").unwrap();
    ring.push("b").unwrap();

    assert_eq!(ring.push("c"), Ok(Some("a")));
    assert_eq!(ring.len(), 2);

    let items: Vec<_> = ring.drain().collect();
    assert_eq!(items, ["b", "c"]);
}

#[test]
fn test_zero_capacity() {
    let mut ring = RingBuffer::with_capacity(0);
    assert!(ring.is_full());
    assert!(ring.is_empty());
    assert_eq!(ring.push(1), Err(RingError::Full));

    let mut ring = RingBuffer::new(0, WhenFull::Overwrite);
    assert_eq!(ring.push(1), Ok(Some(1)));
    assert!(ring.is_empty());
}

#[test]
fn test_peek_empty() {
    let ring: RingBuffer<u8> = RingBuffer::with_capacity(4);
    assert_eq!(ring.peek(), None);
    assert_eq!(ring.capacity(), 4);
    assert_eq!(ring.when_full(), WhenFull::Error);
}

// =============================================================================
// Drain
// =============================================================================

#[test]
fn test_drain_empties_buffer_in_order() {
    let mut ring = RingBuffer::with_capacity(3);
    ring.push(10).unwrap();
    ring.push(20).unwrap();
    ring.pop().unwrap();
    ring.push(30).unwrap();
    ring.push(40).unwrap();

    let drain = ring.drain();
    assert_eq!(drain.len(), 3);
    assert_eq!(drain.collect::<Vec<_>>(), [20, 30, 40]);
    assert!(ring.is_empty());
}

#[test]
fn test_partial_drain_keeps_rest() {
    let mut ring = RingBuffer::with_capacity(4);
    for i in 0..4 {
        ring.push(i).unwrap();
    }

    let first: Vec<_> = ring.drain().take(2).collect();
    assert_eq!(first, [0, 1]);
    assert_eq!(ring.len(), 2);
    assert_eq!(ring.peek(), Some(&2));
}

#[test]
fn test_clear() {
    let mut ring = RingBuffer::with_capacity(2);
    ring.push(String::from("x")).unwrap();
    ring.clear();
    assert!(ring.is_empty());
    ring.push(String::from("y")).unwrap();
    assert_eq!(ring.pop().as_deref(), Ok("y"));
}
