//=========================================================================
// Event Inbox
//=========================================================================
//
// Per-window queue of native events with bounded per-frame draining.
//
// Architecture:
//   Receiver<NativeEvent> → fill() → VecDeque (peekable) → pop()/peek()
//
// The bound keeps one chatty window from starving the frame; anything
// beyond it stays in the channel for the next frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;

use crossbeam_channel::{Receiver, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::native_event::NativeEvent;

//=== EventInbox ==========================================================

#[derive(Debug)]
pub struct EventInbox {
    receiver: Receiver<NativeEvent>,
    pending: VecDeque<NativeEvent>,
    max_events_per_frame: usize,
    disconnected: bool,
}

impl EventInbox {
    pub fn new(receiver: Receiver<NativeEvent>, max_events_per_frame: usize) -> Self {
        assert!(max_events_per_frame > 0, "max_events_per_frame must be greater than 0");

        Self {
            receiver,
            pending: VecDeque::with_capacity(16),
            max_events_per_frame,
            disconnected: false,
        }
    }

    /// Moves up to `max_events_per_frame` queued events into the buffer.
    ///
    /// Returns the number of events moved.
    pub fn fill(&mut self) -> usize {
        let mut drained = 0;

        while drained < self.max_events_per_frame {
            match self.receiver.try_recv() {
                Ok(event) => {
                    self.pending.push_back(event);
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => {
                    self.disconnected = true;
                    break;
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= self.max_events_per_frame && !self.receiver.is_empty() {
            warn!(
                target: "platform",
                "Window event backlog: drained {} events this frame, {} deferred",
                drained,
                self.receiver.len()
            );
        }

        drained
    }

    pub fn pop(&mut self) -> Option<NativeEvent> {
        self.pending.pop_front()
    }

    /// Next buffered event without consuming it.
    pub fn peek(&self) -> Option<&NativeEvent> {
        self.pending.front()
    }

    /// Returns `true` if any buffered event matches `predicate`.
    pub fn any_pending(&self, predicate: impl Fn(&NativeEvent) -> bool) -> bool {
        self.pending.iter().any(predicate)
    }

    /// `true` once the producing context dropped its sender.
    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn fill_handles_empty_queue() {
        let (_tx, rx) = unbounded::<NativeEvent>();
        let mut inbox = EventInbox::new(rx, 8);

        assert_eq!(inbox.fill(), 0);
        assert!(inbox.peek().is_none());
        assert!(!inbox.is_disconnected());
    }

    #[test]
    fn fill_is_bounded_and_keeps_the_rest_queued() {
        let (tx, rx) = unbounded();
        let mut inbox = EventInbox::new(rx, 2);

        for _ in 0..5 {
            tx.send(NativeEvent::Minimized).unwrap();
        }

        assert_eq!(inbox.fill(), 2);
        assert_eq!(inbox.pending.len(), 2);

        inbox.pop();
        inbox.pop();
        assert_eq!(inbox.fill(), 2);
        assert_eq!(inbox.pending.len(), 2);
    }

    #[test]
    fn peek_does_not_consume() {
        let (tx, rx) = unbounded();
        let mut inbox = EventInbox::new(rx, 8);

        tx.send(NativeEvent::Focused(true)).unwrap();
        tx.send(NativeEvent::Focused(false)).unwrap();
        inbox.fill();

        assert_eq!(inbox.peek(), Some(&NativeEvent::Focused(true)));
        assert_eq!(inbox.pop(), Some(NativeEvent::Focused(true)));
        assert_eq!(inbox.peek(), Some(&NativeEvent::Focused(false)));
        assert!(inbox.any_pending(|event| matches!(event, NativeEvent::Focused(false))));
    }

    #[test]
    fn fill_detects_disconnect() {
        let (tx, rx) = unbounded::<NativeEvent>();
        let mut inbox = EventInbox::new(rx, 8);

        drop(tx);
        inbox.fill();

        assert!(inbox.is_disconnected());
    }

    #[test]
    #[should_panic(expected = "max_events_per_frame")]
    fn zero_bound_panics() {
        let (_tx, rx) = unbounded::<NativeEvent>();
        let _ = EventInbox::new(rx, 0);
    }
}
