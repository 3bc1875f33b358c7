//=========================================================================
// Window Events
//
// Lifecycle and geometry notifications published by `Window` after the
// backend's protocol filters have run.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::event::{event_set, Event};
use crate::core::geometry::{Vector2Int, Vector2UInt};

//=== Events ==============================================================

/// New desktop position (bottom-left of the client area, Y-up).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowMoveEvent {
    pub position: Vector2Int,
}

/// New client-area size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowResizeEvent {
    pub size: Vector2UInt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowFocusEvent {
    pub focused: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowMinimizeEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowMaximizeEvent;

/// Dispatched right before the window closes itself in response to a
/// user close request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowCloseEvent;

impl Event for WindowMoveEvent {}
impl Event for WindowResizeEvent {}
impl Event for WindowFocusEvent {}
impl Event for WindowMinimizeEvent {}
impl Event for WindowMaximizeEvent {}
impl Event for WindowCloseEvent {}

//=== WindowEvents ========================================================

event_set! {
    /// Dispatchers owned by one `Window`.
    pub struct WindowEvents {
        window_move: WindowMoveEvent,
        window_resize: WindowResizeEvent,
        window_focus: WindowFocusEvent,
        window_minimize: WindowMinimizeEvent,
        window_maximize: WindowMaximizeEvent,
        window_close: WindowCloseEvent,
    }
}
