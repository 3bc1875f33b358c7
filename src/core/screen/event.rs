//=========================================================================
// Screen Events
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::event::{event_set, Event};

use super::orientation::ScreenOrientation;

//=== ScreenReorientEvent =================================================

/// The device was rotated; `orientation` is always concrete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenReorientEvent {
    pub orientation: ScreenOrientation,
}

impl Event for ScreenReorientEvent {}

//=== ScreenEvents ========================================================

event_set! {
    /// Dispatchers owned by one `Screen`.
    pub struct ScreenEvents {
        screen_reorient: ScreenReorientEvent,
    }
}
