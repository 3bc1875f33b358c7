//=========================================================================
// Touch
//
// Multi-touch contact lifecycle for touch-capable backends.
//
//=========================================================================

//=== Module Declarations =================================================

mod event;
#[allow(clippy::module_inception)]
mod touch;
mod touch_manager;

//=== Public API ==========================================================

pub use event::{TouchEvents, TouchMoveEvent, TouchPressEvent, TouchReleaseEvent};
pub use touch::{Touch, TouchId, TouchType};
pub use touch_manager::TouchManager;
