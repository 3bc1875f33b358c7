//=========================================================================
// Event Dispatcher
//=========================================================================
//
// Typed, synchronous publish/subscribe primitive.
//
// Architecture:
//   subscribe(callback) → BTreeMap<SubscriptionId, Listener<E>>
//                               ↓
//   dispatch(event) ──→ listeners in ascending id order
//                               ↓
//                 first `true` return consumes the event
//
// Ids are sequential per dispatcher, so iteration order equals
// registration order within one dispatcher. Consumers must still not rely
// on ordering between unrelated subscribers.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::BTreeMap;
use std::fmt;

//=== Event ===============================================================

/// Marker trait for values that can travel through an [`EventDispatcher`].
///
/// Events are immutable values constructed at dispatch time and dropped
/// once every subscriber has run.
pub trait Event: 'static {}

//=== SubscriptionId ======================================================

/// Opaque handle returned by [`EventDispatcher::subscribe`].
///
/// Unique within the dispatcher that produced it; ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u32);

impl SubscriptionId {
    pub fn value(&self) -> u32 {
        self.0
    }
}

/// Boxed subscriber callback. Returning `true` consumes the event.
pub type Listener<E> = Box<dyn FnMut(&E) -> bool>;

//=== EventDispatcher =====================================================

/// Registry of callbacks for one event type.
///
/// Dispatch borrows the dispatcher mutably, so a callback can never add or
/// remove subscribers of the dispatcher that is invoking it.
pub struct EventDispatcher<E: Event> {
    listeners: BTreeMap<SubscriptionId, Listener<E>>,
    next_id: u32,
}

impl<E: Event> EventDispatcher<E> {
    pub fn new() -> Self {
        Self {
            listeners: BTreeMap::new(),
            next_id: 0,
        }
    }

    //--- Subscription -----------------------------------------------------

    /// Registers `callback` and returns its subscription handle.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&E) -> bool + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .expect("EventDispatcher subscription ids exhausted");

        self.listeners.insert(id, Box::new(callback));
        id
    }

    /// Removes a subscription. Returns `false` if `id` is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    //--- Dispatch ---------------------------------------------------------

    /// Invokes subscribers in registration order until one consumes `event`.
    ///
    /// Returns `true` if a subscriber consumed the event.
    pub fn dispatch(&mut self, event: E) -> bool {
        for listener in self.listeners.values_mut() {
            if listener(&event) {
                return true;
            }
        }
        false
    }

    //--- Queries ----------------------------------------------------------

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<E: Event> Default for EventDispatcher<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> fmt::Debug for EventDispatcher<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("event", &std::any::type_name::<E>())
            .field("subscribers", &self.listeners.len())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Ping(u32);
    impl Event for Ping {}

    //--- Test Helpers -----------------------------------------------------

    /// Returns a listener that records `name` into `log` and returns `consume`.
    fn recorder(
        log: &Rc<RefCell<Vec<&'static str>>>,
        name: &'static str,
        consume: bool,
    ) -> impl FnMut(&Ping) -> bool + 'static {
        let log = Rc::clone(log);
        move |_| {
            log.borrow_mut().push(name);
            consume
        }
    }

    //--- Tests ------------------------------------------------------------

    #[test]
    fn consuming_subscriber_stops_propagation() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = EventDispatcher::<Ping>::new();

        dispatcher.subscribe(recorder(&log, "A", true));
        dispatcher.subscribe(recorder(&log, "B", false));

        assert!(dispatcher.dispatch(Ping(1)));
        assert_eq!(*log.borrow(), vec!["A"]);
    }

    #[test]
    fn reversed_registration_runs_both_until_consumed() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = EventDispatcher::<Ping>::new();

        dispatcher.subscribe(recorder(&log, "B", false));
        dispatcher.subscribe(recorder(&log, "A", true));

        assert!(dispatcher.dispatch(Ping(1)));
        assert_eq!(*log.borrow(), vec!["B", "A"]);
    }

    #[test]
    fn unconsumed_event_reaches_everyone() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = EventDispatcher::<Ping>::new();

        dispatcher.subscribe(recorder(&log, "A", false));
        dispatcher.subscribe(recorder(&log, "B", false));

        assert!(!dispatcher.dispatch(Ping(1)));
        assert_eq!(*log.borrow(), vec!["A", "B"]);
    }

    #[test]
    fn unsubscribed_handler_is_never_invoked_again() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = EventDispatcher::<Ping>::new();

        let id = dispatcher.subscribe(recorder(&log, "A", false));
        dispatcher.dispatch(Ping(1));
        assert!(dispatcher.unsubscribe(id));

        dispatcher.dispatch(Ping(2));
        dispatcher.dispatch(Ping(3));
        assert_eq!(*log.borrow(), vec!["A"]);
        assert!(dispatcher.is_empty());
    }

    #[test]
    fn unsubscribe_unknown_id_returns_false() {
        let mut dispatcher = EventDispatcher::<Ping>::new();
        let id = dispatcher.subscribe(|_| false);

        assert!(dispatcher.unsubscribe(id));
        assert!(!dispatcher.unsubscribe(id), "second removal must fail");
        assert!(!dispatcher.unsubscribe(SubscriptionId(4242)));
    }

    #[test]
    fn ids_are_unique_and_not_reused() {
        let mut dispatcher = EventDispatcher::<Ping>::new();
        let first = dispatcher.subscribe(|_| false);
        dispatcher.unsubscribe(first);
        let second = dispatcher.subscribe(|_| false);

        assert_ne!(first, second);
        assert_eq!(dispatcher.len(), 1);
    }

    #[test]
    fn listener_receives_event_payload() {
        let seen = Rc::new(RefCell::new(None));
        let mut dispatcher = EventDispatcher::<Ping>::new();

        let sink = Rc::clone(&seen);
        dispatcher.subscribe(move |ping| {
            *sink.borrow_mut() = Some(ping.0);
            false
        });

        dispatcher.dispatch(Ping(7));
        assert_eq!(*seen.borrow(), Some(7));
    }
}
