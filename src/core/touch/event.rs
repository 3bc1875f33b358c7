//=========================================================================
// Touch Events
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::event::{event_set, Event};

use super::touch::Touch;

//=== Events ==============================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPressEvent {
    pub touch: Touch,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchMoveEvent {
    pub touch: Touch,
}

/// Fired while the contact is still listed by `TouchManager::touches`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchReleaseEvent {
    pub touch: Touch,
}

impl Event for TouchPressEvent {}
impl Event for TouchMoveEvent {}
impl Event for TouchReleaseEvent {}

//=== TouchEvents =========================================================

event_set! {
    /// Dispatchers owned by one `TouchManager`.
    pub struct TouchEvents {
        touch_press: TouchPressEvent,
        touch_move: TouchMoveEvent,
        touch_release: TouchReleaseEvent,
    }
}
