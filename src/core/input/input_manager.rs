//=========================================================================
// Input Manager
//=========================================================================
//
// Keyboard and mouse press-state machine for one window.
//
// Architecture:
//   backend → register_*() → ActionBuffer (current frame) → queries
//                  ↓
//            InputEvents (typed dispatch)
//
// Frame lifecycle (driven by `Window::update`):
//   update() → register_*() while the inbox drains → queries
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::event::{Event, EventSource, SubscriptionId};
use crate::core::geometry::Vector2;

use super::action_buffer::{ActionBuffer, ActionState, InputAction};
use super::event::{
    InputEvents, KeyPressEvent, KeyReleaseEvent, MouseButtonPressEvent,
    MouseButtonReleaseEvent, MouseScrollEvent,
};
use super::key::{Key, MouseButton};

//=== InputManager ========================================================

/// Double-buffered keyboard/mouse state plus typed input events.
#[derive(Debug, Default)]
pub struct InputManager {
    keys: ActionBuffer<{ Key::COUNT }>,
    mouse_buttons: ActionBuffer<{ MouseButton::COUNT }>,
    mouse_scroll: Vector2,
    events: InputEvents,
}

impl InputManager {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Frame Processing -------------------------------------------------

    /// Frame step: current state becomes previous, scroll resets to zero.
    pub(crate) fn update(&mut self) {
        self.keys.advance();
        self.mouse_buttons.advance();
        self.mouse_scroll = Vector2::ZERO;
    }

    //=====================================================================
    // Registration (called by backends)
    //=====================================================================

    pub fn register_key_press(&mut self, key: Key) {
        trace!(target: "platform::input", "key press: {}", key);
        self.keys.set(key.index(), InputAction::Press);
        self.events.emit(KeyPressEvent { key });
    }

    pub fn register_key_release(&mut self, key: Key) {
        trace!(target: "platform::input", "key release: {}", key);
        self.keys.set(key.index(), InputAction::Release);
        self.events.emit(KeyReleaseEvent { key });
    }

    pub fn register_mouse_button_press(&mut self, button: MouseButton) {
        trace!(target: "platform::input", "mouse button press: {}", button);
        self.mouse_buttons.set(button.index(), InputAction::Press);
        self.events.emit(MouseButtonPressEvent { button });
    }

    pub fn register_mouse_button_release(&mut self, button: MouseButton) {
        trace!(target: "platform::input", "mouse button release: {}", button);
        self.mouse_buttons.set(button.index(), InputAction::Release);
        self.events.emit(MouseButtonReleaseEvent { button });
    }

    /// Accumulates `scroll` into this frame's total.
    pub fn register_mouse_scroll(&mut self, scroll: Vector2) {
        self.mouse_scroll += scroll;
        self.events.emit(MouseScrollEvent { scroll });
    }

    //=====================================================================
    // Query API - Keyboard
    //=====================================================================

    /// Returns `true` if the key went down this frame.
    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.keys.state(key.index()) == ActionState::Pressed
    }

    /// Returns `true` if the key was down last frame and still is.
    pub fn is_key_held(&self, key: Key) -> bool {
        self.keys.state(key.index()) == ActionState::Held
    }

    /// Returns `true` if the key went up this frame.
    pub fn is_key_released(&self, key: Key) -> bool {
        self.keys.state(key.index()) == ActionState::Released
    }

    pub fn is_key_resting(&self, key: Key) -> bool {
        self.keys.state(key.index()) == ActionState::Resting
    }

    pub fn key_state(&self, key: Key) -> ActionState {
        self.keys.state(key.index())
    }

    /// At least one key went down this frame and all others are down.
    pub fn is_key_combination_pressed(&self, keys: &[Key]) -> bool {
        self.keys.is_combination_pressed(keys.iter().map(|key| key.index()))
    }

    /// Every key has been held since the previous frame.
    pub fn is_key_combination_held(&self, keys: &[Key]) -> bool {
        self.keys.is_combination_held(keys.iter().map(|key| key.index()))
    }

    //=====================================================================
    // Query API - Mouse
    //=====================================================================

    /// Like [`is_key_pressed`](Self::is_key_pressed) but for mouse buttons.
    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons.state(button.index()) == ActionState::Pressed
    }

    /// Like [`is_key_held`](Self::is_key_held) but for mouse buttons.
    pub fn is_mouse_button_held(&self, button: MouseButton) -> bool {
        self.mouse_buttons.state(button.index()) == ActionState::Held
    }

    /// Like [`is_key_released`](Self::is_key_released) but for mouse buttons.
    pub fn is_mouse_button_released(&self, button: MouseButton) -> bool {
        self.mouse_buttons.state(button.index()) == ActionState::Released
    }

    pub fn is_mouse_button_resting(&self, button: MouseButton) -> bool {
        self.mouse_buttons.state(button.index()) == ActionState::Resting
    }

    pub fn is_mouse_button_combination_pressed(&self, buttons: &[MouseButton]) -> bool {
        self.mouse_buttons
            .is_combination_pressed(buttons.iter().map(|button| button.index()))
    }

    pub fn is_mouse_button_combination_held(&self, buttons: &[MouseButton]) -> bool {
        self.mouse_buttons
            .is_combination_held(buttons.iter().map(|button| button.index()))
    }

    /// Scroll accumulated during the current frame.
    pub fn mouse_scroll(&self) -> Vector2 {
        self.mouse_scroll
    }

    //=====================================================================
    // Listeners
    //=====================================================================

    /// Subscribes to one of the input events.
    pub fn add_event_listener<E: Event>(
        &mut self,
        callback: impl FnMut(&E) -> bool + 'static,
    ) -> SubscriptionId
    where
        InputEvents: EventSource<E>,
    {
        self.events.dispatcher_mut().subscribe(callback)
    }

    pub fn remove_event_listener<E: Event>(&mut self, id: SubscriptionId) -> bool
    where
        InputEvents: EventSource<E>,
    {
        self.events.dispatcher_mut().unsubscribe(id)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    //--- Test Helpers -----------------------------------------------------

    fn held(manager: &mut InputManager, keys: &[Key]) {
        for key in keys {
            manager.register_key_press(*key);
        }
        manager.update();
    }

    //--- Key State Machine ------------------------------------------------

    #[test]
    fn bare_press_is_pressed() {
        for key in Key::ALL {
            let mut manager = InputManager::new();
            manager.register_key_press(*key);
            assert!(manager.is_key_pressed(*key), "{} should be pressed", key);
            assert!(!manager.is_key_held(*key));
        }
    }

    #[test]
    fn press_then_update_is_held() {
        for key in Key::ALL {
            let mut manager = InputManager::new();
            manager.register_key_press(*key);
            manager.update();
            assert!(manager.is_key_held(*key), "{} should be held", key);
            assert!(!manager.is_key_pressed(*key));
        }
    }

    #[test]
    fn release_edge_then_resting() {
        let mut manager = InputManager::new();
        held(&mut manager, &[Key::Space]);

        manager.register_key_release(Key::Space);
        assert!(manager.is_key_released(Key::Space));
        assert_eq!(manager.key_state(Key::Space), ActionState::Released);

        manager.update();
        assert!(manager.is_key_resting(Key::Space));
    }

    #[test]
    fn untouched_key_is_resting() {
        let manager = InputManager::new();
        assert!(manager.is_key_resting(Key::Q));
        assert!(manager.is_mouse_button_resting(MouseButton::Left));
    }

    //--- Combinations -----------------------------------------------------

    #[test]
    fn ctrl_s_combination() {
        let mut manager = InputManager::new();
        held(&mut manager, &[Key::LeftControl]);
        manager.register_key_press(Key::S);

        assert!(manager.is_key_combination_pressed(&[Key::LeftControl, Key::S]));
        assert!(!manager.is_key_combination_held(&[Key::LeftControl, Key::S]));

        manager.update();
        assert!(!manager.is_key_combination_pressed(&[Key::LeftControl, Key::S]));
        assert!(manager.is_key_combination_held(&[Key::LeftControl, Key::S]));
    }

    #[test]
    fn combination_requires_every_key() {
        let mut manager = InputManager::new();
        manager.register_key_press(Key::S);
        assert!(!manager.is_key_combination_pressed(&[Key::LeftControl, Key::S]));
        assert!(!manager.is_key_combination_pressed(&[]));
        assert!(!manager.is_key_combination_held(&[]));
    }

    //--- Mouse ------------------------------------------------------------

    #[test]
    fn mouse_buttons_follow_state_machine() {
        let mut manager = InputManager::new();
        manager.register_mouse_button_press(MouseButton::Right);
        assert!(manager.is_mouse_button_pressed(MouseButton::Right));

        manager.update();
        assert!(manager.is_mouse_button_held(MouseButton::Right));

        manager.register_mouse_button_press(MouseButton::Extra1);
        assert!(manager.is_mouse_button_combination_pressed(&[MouseButton::Right, MouseButton::Extra1]));

        manager.register_mouse_button_release(MouseButton::Right);
        assert!(manager.is_mouse_button_released(MouseButton::Right));
    }

    #[test]
    fn scroll_accumulates_and_resets_each_frame() {
        let mut manager = InputManager::new();
        manager.register_mouse_scroll(Vector2::new(0.0, 1.0));
        manager.register_mouse_scroll(Vector2::new(0.5, 2.0));
        assert_eq!(manager.mouse_scroll(), Vector2::new(0.5, 3.0));

        manager.update();
        assert_eq!(manager.mouse_scroll(), Vector2::ZERO);
    }

    //--- Events -----------------------------------------------------------

    #[test]
    fn registration_dispatches_typed_events() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut manager = InputManager::new();

        let sink = Rc::clone(&log);
        manager.add_event_listener::<KeyPressEvent>(move |event| {
            sink.borrow_mut().push(format!("press {}", event.key));
            false
        });
        let sink = Rc::clone(&log);
        manager.add_event_listener::<KeyReleaseEvent>(move |event| {
            sink.borrow_mut().push(format!("release {}", event.key));
            false
        });

        manager.register_key_press(Key::W);
        manager.register_key_release(Key::W);

        assert_eq!(*log.borrow(), vec!["press W", "release W"]);
    }

    #[test]
    fn removed_listener_stops_receiving() {
        let count = Rc::new(RefCell::new(0));
        let mut manager = InputManager::new();

        let sink = Rc::clone(&count);
        let id = manager.add_event_listener::<MouseScrollEvent>(move |_| {
            *sink.borrow_mut() += 1;
            false
        });

        manager.register_mouse_scroll(Vector2::new(0.0, 1.0));
        assert!(manager.remove_event_listener::<MouseScrollEvent>(id));
        assert!(!manager.remove_event_listener::<MouseScrollEvent>(id));
        manager.register_mouse_scroll(Vector2::new(0.0, 1.0));

        assert_eq!(*count.borrow(), 1);
    }
}
