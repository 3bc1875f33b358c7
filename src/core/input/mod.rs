//=========================================================================
// Input
//
// Keyboard and mouse state for one window.
//
// Responsibilities:
// - Identify keys and buttons independently of the backend
// - Track Pressed/Held/Released/Resting per frame
// - Publish edge events to subscribers
//
//=========================================================================

//=== Module Declarations =================================================

mod action_buffer;
mod event;
mod input_manager;
mod key;

//=== Public API ==========================================================

pub use action_buffer::{ActionBuffer, ActionState, InputAction};
pub use event::{
    InputEvents, KeyPressEvent, KeyReleaseEvent, MouseButtonPressEvent,
    MouseButtonReleaseEvent, MouseScrollEvent,
};
pub use input_manager::InputManager;
pub use key::{Key, MouseButton};
