//=========================================================================
// Input Events
//
// Edge-triggered notifications published by `InputManager` whenever a
// backend registers a key, button or scroll change.
//
// Event Flow:
// ```text
// Native event (per backend)
//         ↓
//    translate → Key / MouseButton
//         ↓
//    InputManager::register_*  ──→ ActionBuffer (polling)
//         ↓
//    InputEvents dispatchers   ──→ subscribers (edge consumers)
// ```
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::event::{event_set, Event};
use crate::core::geometry::Vector2;

use super::key::{Key, MouseButton};

//=== Keyboard ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPressEvent {
    pub key: Key,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyReleaseEvent {
    pub key: Key,
}

//=== Mouse ===============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseButtonPressEvent {
    pub button: MouseButton,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseButtonReleaseEvent {
    pub button: MouseButton,
}

/// Scroll reported by one native event (not the frame accumulator).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseScrollEvent {
    pub scroll: Vector2,
}

impl Event for KeyPressEvent {}
impl Event for KeyReleaseEvent {}
impl Event for MouseButtonPressEvent {}
impl Event for MouseButtonReleaseEvent {}
impl Event for MouseScrollEvent {}

//=== InputEvents =========================================================

event_set! {
    /// Dispatchers owned by one `InputManager`.
    pub struct InputEvents {
        key_press: KeyPressEvent,
        key_release: KeyReleaseEvent,
        mouse_button_press: MouseButtonPressEvent,
        mouse_button_release: MouseButtonReleaseEvent,
        mouse_scroll: MouseScrollEvent,
    }
}
