//! State shared between interrupt/task producers and the poll loop
//!
//! Producers only publish: button edges go into a bounded queue behind a
//! short critical section, the obstacle edge is a single atomic flag. The
//! poll loop consumes both once per iteration.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;
use portable_atomic::{AtomicBool, AtomicU32, Ordering};

use crate::traits::ButtonEvent;

/// Default button event queue depth
pub const EVENT_QUEUE_DEPTH: usize = 8;

/// Bounded queue of button edges
///
/// When full, the newest event is dropped and counted.
pub struct EventQueue<const N: usize = EVENT_QUEUE_DEPTH> {
    events: Mutex<RefCell<Deque<ButtonEvent, N>>>,
    dropped: AtomicU32,
}

impl<const N: usize> Default for EventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> EventQueue<N> {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            events: Mutex::new(RefCell::new(Deque::new())),
            dropped: AtomicU32::new(0),
        }
    }

    /// Publish an event; returns false if it was dropped
    pub fn push(&self, event: ButtonEvent) -> bool {
        let accepted =
            critical_section::with(|cs| self.events.borrow_ref_mut(cs).push_back(event).is_ok());
        if !accepted {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
        accepted
    }

    /// Take the oldest event
    pub fn pop(&self) -> Option<ButtonEvent> {
        critical_section::with(|cs| self.events.borrow_ref_mut(cs).pop_front())
    }

    /// Iterate over queued events, one critical section per event
    pub fn drain(&self) -> Drain<'_, N> {
        Drain { queue: self }
    }

    /// Number of queued events
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.events.borrow_ref(cs).len())
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Events dropped because the queue was full
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }
}

/// Draining iterator over an [`EventQueue`]
pub struct Drain<'a, const N: usize> {
    queue: &'a EventQueue<N>,
}

impl<const N: usize> Iterator for Drain<'_, N> {
    type Item = ButtonEvent;

    fn next(&mut self) -> Option<ButtonEvent> {
        self.queue.pop()
    }
}

/// Single-word edge flag set by a producer and consumed by the poll loop
pub struct EdgeFlag {
    raised: AtomicBool,
}

impl Default for EdgeFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeFlag {
    /// Create a cleared flag
    pub const fn new() -> Self {
        Self {
            raised: AtomicBool::new(false),
        }
    }

    /// Record an edge
    pub fn raise(&self) {
        self.raised.store(true, Ordering::Release);
    }

    /// Read and clear
    pub fn take(&self) -> bool {
        self.raised.swap(false, Ordering::Acquire)
    }
}
