//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Capability traits every backend implements.
//
// Defines the contract between a native context and the core: core code
// (Window, managers, PlatformContext) only ever talks to these traits,
// so backends can be swapped without touching it.
//
// Capabilities are composed, not inherited: a backend provides one
// `NativeContext`, one `NativeWindow` per window and, where the platform
// has a pointer, one `NativeCursor` per window.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::Receiver;
use winit::raw_window_handle::{DisplayHandle, HandleError, WindowHandle};

//=== Internal Dependencies ===============================================

use crate::core::error::PlatformError;
use crate::core::geometry::{Vector2, Vector2Int, Vector2UInt};
use crate::core::screen::ScreenInfo;
use crate::core::window::WindowCreateInfo;

use super::native_event::NativeEvent;
use super::profile::BackendProfile;

//=== NativeCursor ========================================================

/// OS pointer control for one window.
pub trait NativeCursor {
    /// Shows or hides the OS pointer while it is over the window.
    fn set_visible(&mut self, visible: bool);

    /// Moves the OS pointer to a client position in the backend's
    /// native coordinate origin.
    fn warp(&mut self, position: Vector2);
}

//=== NativeWindow ========================================================

/// One native window.
///
/// Geometry is exchanged in desktop coordinates: `position` is the
/// bottom-left corner of the client area, Y-up. State queries return
/// `None` when the OS offers no way to ask; callers then fall back to
/// state tracked from events.
pub trait NativeWindow {
    fn set_title(&mut self, title: &str);

    fn position(&self) -> Vector2Int;
    fn set_position(&mut self, position: Vector2Int);

    /// Client-area size in pixels.
    fn size(&self) -> Vector2UInt;
    fn set_size(&mut self, size: Vector2UInt);

    /// Drawable size in physical pixels.
    fn framebuffer_size(&self) -> Vector2UInt;

    fn opacity(&self) -> f32;
    fn set_opacity(&mut self, opacity: f32);

    fn minimize(&mut self);
    fn maximize(&mut self);
    fn show(&mut self);
    fn hide(&mut self);
    fn focus(&mut self);

    fn is_minimized(&self) -> Option<bool>;
    fn is_maximized(&self) -> Option<bool>;
    fn is_focused(&self) -> Option<bool>;
    fn is_visible(&self) -> Option<bool>;

    /// Pointer control, if the platform has a pointer.
    fn cursor(&self) -> Option<Box<dyn NativeCursor>>;

    fn window_handle(&self) -> Result<WindowHandle<'_>, HandleError>;
    fn display_handle(&self) -> Result<DisplayHandle<'_>, HandleError>;

    /// Releases the native window. Called exactly once.
    fn close(&mut self);
}

//=== NativeContext =======================================================

/// A freshly created native window and the inbox the context routes its
/// events into.
pub struct NativeWindowParts {
    pub window: Box<dyn NativeWindow>,
    pub inbox: Receiver<NativeEvent>,
}

/// Process-wide native connection (display, event loop, app instance).
pub trait NativeContext {
    /// Protocol profile of every window this context creates.
    fn profile(&self) -> BackendProfile;

    /// Creates a window from an already validated description.
    fn create_window(&mut self, info: &WindowCreateInfo) -> Result<NativeWindowParts, PlatformError>;

    /// Drains the native queue once and routes events into window inboxes.
    fn pump(&mut self);

    /// Current monitor layout.
    fn screens(&self) -> Vec<ScreenInfo>;
}
