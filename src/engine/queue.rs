//! FIFO event queue with a dispatch guard.

use std::collections::VecDeque;
use std::fmt::Debug;
use tracing::trace;

/// Pending events for one machine.
///
/// The `dispatching` flag is set while the machine drains the queue. Events
/// pushed during that time wait for the drain loop instead of being
/// dispatched recursively.
#[derive(Debug)]
pub struct EventQueue<E> {
    pending: VecDeque<E>,
    dispatching: bool,
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventQueue<E> {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            dispatching: false,
        }
    }

    /// Handle through which handlers send events.
    ///
    /// Useful for driving a handler directly in unit tests.
    pub fn outbox(&mut self) -> Outbox<'_, E> {
        Outbox::new(self)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return all pending events, oldest first.
    pub fn take(&mut self) -> Vec<E> {
        self.pending.drain(..).collect()
    }

    pub(crate) fn push(&mut self, event: E) {
        self.pending.push_back(event);
    }

    pub(crate) fn pop(&mut self) -> Option<E> {
        self.pending.pop_front()
    }

    pub(crate) fn is_dispatching(&self) -> bool {
        self.dispatching
    }

    pub(crate) fn set_dispatching(&mut self, dispatching: bool) {
        self.dispatching = dispatching;
    }
}

/// Sending side of a machine's queue, handed to every handler call.
///
/// Events sent here are dispatched after the event (or transition)
/// currently running has finished, in the order they were sent.
pub struct Outbox<'a, E> {
    queue: &'a mut EventQueue<E>,
}

impl<'a, E> Outbox<'a, E> {
    pub(crate) fn new(queue: &'a mut EventQueue<E>) -> Self {
        Self { queue }
    }

    /// Queue `event` for this machine.
    pub fn send_event(&mut self, event: E)
    where
        E: Debug,
    {
        trace!(?event, queued = self.queue.len(), "event queued by handler");
        self.queue.push(event);
    }

    /// Events waiting behind the one being dispatched.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_is_fifo() {
        let mut queue = EventQueue::new();
        queue.push(1);
        queue.push(2);
        queue.push(3);
        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.pop(), Some(2));
        assert_eq!(queue.pop(), Some(3));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn outbox_appends_to_tail() {
        let mut queue = EventQueue::new();
        queue.push("first");
        {
            let mut outbox = queue.outbox();
            outbox.send_event("second");
            assert_eq!(outbox.pending(), 2);
        }
        assert_eq!(queue.take(), vec!["first", "second"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn dispatch_flag_starts_clear() {
        let mut queue: EventQueue<u8> = EventQueue::default();
        assert!(!queue.is_dispatching());
        queue.set_dispatching(true);
        assert!(queue.is_dispatching());
    }
}
