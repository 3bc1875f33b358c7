//=========================================================================
// Event Sources
//=========================================================================
//
// Typed listener routing for subsystems that publish several event kinds.
//
// Each subsystem owns one `*Events` set holding a dispatcher per event
// type. `EventSource<E>` selects the matching dispatcher at compile time,
// so `add_event_listener::<KeyPressEvent>(...)` only type-checks on a
// manager that actually publishes `KeyPressEvent`.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::dispatcher::{Event, EventDispatcher};

//=== EventSource =========================================================

/// Selects the dispatcher for event type `E` inside an event set.
pub trait EventSource<E: Event> {
    fn dispatcher_mut(&mut self) -> &mut EventDispatcher<E>;

    /// Dispatches `event` through the matching dispatcher.
    fn emit(&mut self, event: E) -> bool {
        self.dispatcher_mut().dispatch(event)
    }
}

//=== event_set! ==========================================================

/// Declares a struct holding one `EventDispatcher` per listed event type
/// and implements `EventSource` for each.
macro_rules! event_set {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $field:ident : $event:ty ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Default)]
        pub struct $name {
            $( $field: $crate::core::event::EventDispatcher<$event> ),+
        }

        $(
            impl $crate::core::event::EventSource<$event> for $name {
                fn dispatcher_mut(&mut self) -> &mut $crate::core::event::EventDispatcher<$event> {
                    &mut self.$field
                }
            }
        )+
    };
}

pub(crate) use event_set;

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::SubscriptionId;

    #[derive(Debug)]
    struct Opened;
    impl Event for Opened {}

    #[derive(Debug)]
    struct Closed(u8);
    impl Event for Closed {}

    event_set! {
        pub struct DoorEvents {
            opened: Opened,
            closed: Closed,
        }
    }

    fn listen<E: Event>(set: &mut DoorEvents, f: impl FnMut(&E) -> bool + 'static) -> SubscriptionId
    where
        DoorEvents: EventSource<E>,
    {
        set.dispatcher_mut().subscribe(f)
    }

    #[test]
    fn routes_to_matching_dispatcher() {
        let mut events = DoorEvents::default();
        listen::<Closed>(&mut events, |closed| closed.0 == 3);

        assert!(!events.emit(Opened));
        assert!(events.emit(Closed(3)));
        assert!(!events.emit(Closed(1)));
        assert!(events.opened.is_empty());
    }
}
