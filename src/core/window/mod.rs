//=========================================================================
// Window
//
// Native window lifecycle, composed input/cursor/touch managers and the
// per-backend routing protocol.
//
//=========================================================================

//=== Module Declarations =================================================

mod create_info;
mod event;
mod routing;
#[allow(clippy::module_inception)]
mod window;

//=== Public API ==========================================================

pub use create_info::WindowCreateInfo;
pub use event::{
    WindowCloseEvent, WindowEvents, WindowFocusEvent, WindowMaximizeEvent, WindowMinimizeEvent,
    WindowMoveEvent, WindowResizeEvent,
};
pub use window::Window;

//=== Internal API ========================================================

pub(crate) use window::WindowSettings;
