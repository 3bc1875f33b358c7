//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_windowing::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Context and configuration
pub use crate::platform::headless::{
    HeadlessConfig, HeadlessDriver, HeadlessWindowId, HeadlessWindowState,
};
pub use crate::platform::{BackendSelection, PlatformContext, PlatformContextBuilder};

// Errors
pub use crate::core::error::{ConfigurationError, PlatformError};

// Events
pub use crate::core::event::{Event, EventDispatcher, SubscriptionId};

// Geometry
pub use crate::core::geometry::{Insets, Vector2, Vector2Int, Vector2UInt};

// Window
pub use crate::core::window::{
    Window, WindowCloseEvent, WindowCreateInfo, WindowFocusEvent, WindowMaximizeEvent,
    WindowMinimizeEvent, WindowMoveEvent, WindowResizeEvent,
};

// Input, cursor and touch
pub use crate::core::cursor::{CursorManager, CursorMoveEvent};
pub use crate::core::input::{
    InputManager, Key, KeyPressEvent, KeyReleaseEvent, MouseButton, MouseButtonPressEvent,
    MouseButtonReleaseEvent, MouseScrollEvent,
};
pub use crate::core::touch::{
    Touch, TouchId, TouchManager, TouchMoveEvent, TouchPressEvent, TouchReleaseEvent, TouchType,
};

// Screens and backends
pub use crate::core::platform_bridge::{BackendType, NativeEvent};
pub use crate::core::screen::{Screen, ScreenInfo, ScreenOrientation, ScreenReorientEvent};
