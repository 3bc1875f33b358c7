//=========================================================================
// Native Events
//=========================================================================
//
// Backend-neutral representation of everything a native event loop can
// report about one window.
//
// Contexts translate their OS messages into `NativeEvent`s and route
// them into the target window's inbox. The window then applies the
// backend's protocol filters (see `BackendProfile`) before updating its
// managers and dispatching public events.
//
// Positions:
// - Cursor and touch positions are client-area coordinates measured from
//   the backend's `CoordinateOrigin`; routing normalizes them.
// - Window positions are already in desktop coordinates (bottom-left of
//   the client area, Y-up).
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::time::Instant;

//=== Internal Dependencies ===============================================

use crate::core::geometry::{Vector2, Vector2Int, Vector2UInt};
use crate::core::input::{Key, MouseButton};
use crate::core::touch::TouchId;

//=== NativeEvent =========================================================

#[derive(Debug, Clone, PartialEq)]
pub enum NativeEvent {
    //--- Keyboard ---------------------------------------------------------
    KeyPress {
        key: Key,
        /// Set when the OS flags the press as auto-repeat.
        repeat: bool,
        timestamp: Instant,
    },
    KeyRelease {
        key: Key,
        timestamp: Instant,
    },

    //--- Mouse ------------------------------------------------------------
    MouseButtonPress(MouseButton),
    MouseButtonRelease(MouseButton),
    Scroll(Vector2),
    CursorMoved(Vector2),

    //--- Touch ------------------------------------------------------------
    TouchPress {
        id: TouchId,
        position: Vector2,
        force: f32,
    },
    TouchMove {
        id: TouchId,
        position: Vector2,
    },
    TouchRelease {
        id: TouchId,
    },

    //--- Window -----------------------------------------------------------
    Moved(Vector2Int),
    Resized(Vector2UInt),
    Focused(bool),
    Minimized,
    Maximized,
    /// Left the minimized or maximized state.
    Restored,
    Visibility(bool),
    /// Mobile app moved to the background.
    Suspended,
    /// Mobile app returned to the foreground.
    Resumed,
    CloseRequested,
    Destroyed,
}

impl NativeEvent {
    /// Convenience constructor for a non-repeat key press.
    pub fn key_press(key: Key, timestamp: Instant) -> Self {
        Self::KeyPress { key, repeat: false, timestamp }
    }

    pub fn key_release(key: Key, timestamp: Instant) -> Self {
        Self::KeyRelease { key, timestamp }
    }
}
