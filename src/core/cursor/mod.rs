//=========================================================================
// Cursor
//
// Pointer position, visibility and hidden-cursor recentring.
//
//=========================================================================

//=== Module Declarations =================================================

mod cursor_manager;
mod event;

//=== Public API ==========================================================

pub use cursor_manager::CursorManager;
pub use event::{CursorEvents, CursorMoveEvent};
