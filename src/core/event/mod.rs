//=========================================================================
// Events
//
// Generic typed pub/sub used by every subsystem. Concrete event types
// live next to the subsystem that dispatches them (input, cursor, touch,
// window, screen).
//
//=========================================================================

//=== Module Declarations =================================================

mod dispatcher;
mod source;

//=== Public API ==========================================================

pub use dispatcher::{Event, EventDispatcher, Listener, SubscriptionId};
pub use source::EventSource;

pub(crate) use source::event_set;
