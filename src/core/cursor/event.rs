//=========================================================================
// Cursor Events
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::event::{event_set, Event};
use crate::core::geometry::Vector2;

//=== CursorMoveEvent =====================================================

/// Visible cursor moved; `position` is bottom-left, Y-up client space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorMoveEvent {
    pub position: Vector2,
}

impl Event for CursorMoveEvent {}

//=== CursorEvents ========================================================

event_set! {
    /// Dispatchers owned by one `CursorManager`.
    pub struct CursorEvents {
        cursor_move: CursorMoveEvent,
    }
}
