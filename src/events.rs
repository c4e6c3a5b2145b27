//! Interrupt-to-main-loop event queue
//!
//! Timer and ADC interrupts post [`OrnamentEvent`]s; the main loop drains
//! them and feeds them to the [`Ornament`](crate::Ornament) one at a time.
//! Tick events are for hosts that pace the ornament with their own timers.
//! A [`TickScheduler`](crate::TickScheduler) paces itself and only consumes
//! battery samples.
//! This is the only place where core inputs cross a preemption boundary, so
//! every access runs inside a critical section.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

/// Default queue depth
pub const EVENT_QUEUE_SIZE: usize = 8;

/// Something the host wants the core to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrnamentEvent {
    /// Animation step (1 ms)
    FineTick,
    /// Brightness measurement step (1 s)
    CoarseTick,
    /// Fresh battery voltage conversion
    BatterySample(u16),
}

/// Returned by [`EventQueue::post`] when the queue is full; gives the event back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFull(pub OrnamentEvent);

/// Bounded FIFO of events, safe to post to from interrupt context
pub struct EventQueue<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<OrnamentEvent, SIZE>>>,
}

impl<const SIZE: usize> EventQueue<SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Handle for interrupt handlers
    pub const fn sender(&self) -> EventSender<'_, SIZE> {
        EventSender { queue: self }
    }

    /// Handle for the main loop
    pub const fn receiver(&self) -> EventReceiver<'_, SIZE> {
        EventReceiver { queue: self }
    }

    /// Queue an event without blocking
    pub fn post(&self, event: OrnamentEvent) -> Result<(), QueueFull> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(event).map_err(QueueFull)
        })
    }

    /// Take the oldest event, if any
    pub fn pop(&self) -> Option<OrnamentEvent> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pop_front())
    }

    /// Number of queued events
    pub fn pending(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }
}

impl<const SIZE: usize> Default for EventQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Posting side of an [`EventQueue`]
#[derive(Clone, Copy)]
pub struct EventSender<'a, const SIZE: usize> {
    queue: &'a EventQueue<SIZE>,
}

impl<const SIZE: usize> EventSender<'_, SIZE> {
    pub fn post(&self, event: OrnamentEvent) -> Result<(), QueueFull> {
        self.queue.post(event)
    }
}

/// Draining side of an [`EventQueue`]
#[derive(Clone, Copy)]
pub struct EventReceiver<'a, const SIZE: usize> {
    queue: &'a EventQueue<SIZE>,
}

impl<const SIZE: usize> EventReceiver<'_, SIZE> {
    pub fn pop(&self) -> Option<OrnamentEvent> {
        self.queue.pop()
    }

    pub fn pending(&self) -> usize {
        self.queue.pending()
    }
}
