//=========================================================================
// Winit Translation
//=========================================================================
//
// Converts winit input types into the backend-neutral `NativeEvent` model.
//
// Keys are matched on the physical code, so `Key::A` is the same key on
// every layout. Codes with no counterpart become `Key::Unknown` and are
// dropped by `keyboard`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Instant;

use log::trace;
use winit::event::{
    ElementState, KeyEvent, MouseButton as WinitMouseButton, MouseScrollDelta, Touch, TouchPhase,
};
use winit::keyboard::{KeyCode, PhysicalKey};

//=== Internal Dependencies ===============================================

use crate::core::geometry::Vector2;
use crate::core::input::{Key, MouseButton};
use crate::core::platform_bridge::NativeEvent;
use crate::core::touch::TouchId;

//=== Constants ===========================================================

/// Pixels per scroll line for touchpads that report pixel deltas.
const PIXELS_PER_LINE: f64 = 40.0;

//=== Event Translation ===================================================

/// Key press or release; `None` for keys without a mapping.
pub(super) fn keyboard(event: &KeyEvent, timestamp: Instant) -> Option<NativeEvent> {
    let key = match event.physical_key {
        PhysicalKey::Code(code) => Key::from(code),
        PhysicalKey::Unidentified(native) => {
            trace!(target: "platform::input", "Unidentified native key {:?}", native);
            return None;
        }
    };

    if key == Key::Unknown {
        trace!(target: "platform::input", "Unmapped key {:?}", event.physical_key);
        return None;
    }

    Some(match event.state {
        ElementState::Pressed => NativeEvent::KeyPress { key, repeat: event.repeat, timestamp },
        ElementState::Released => NativeEvent::KeyRelease { key, timestamp },
    })
}

pub(super) fn mouse_input(button: WinitMouseButton, state: ElementState) -> NativeEvent {
    let button = MouseButton::from(button);
    match state {
        ElementState::Pressed => NativeEvent::MouseButtonPress(button),
        ElementState::Released => NativeEvent::MouseButtonRelease(button),
    }
}

/// Scroll in lines; positive `y` scrolls up.
pub(super) fn scroll(delta: MouseScrollDelta) -> Vector2 {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => Vector2::new(x, y),
        MouseScrollDelta::PixelDelta(pixels) => Vector2::new(
            (pixels.x / PIXELS_PER_LINE) as f32,
            (pixels.y / PIXELS_PER_LINE) as f32,
        ),
    }
}

/// Touch in client pixels, top-left origin. Cancelled touches release.
pub(super) fn touch(touch: &Touch) -> NativeEvent {
    let id = TouchId(touch.id);
    let position = Vector2::new(touch.location.x as f32, touch.location.y as f32);

    match touch.phase {
        TouchPhase::Started => NativeEvent::TouchPress {
            id,
            position,
            force: touch.force.map_or(1.0, |force| force.normalized() as f32),
        },
        TouchPhase::Moved => NativeEvent::TouchMove { id, position },
        TouchPhase::Ended | TouchPhase::Cancelled => NativeEvent::TouchRelease { id },
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            WinitMouseButton::Back => MouseButton::Extra1,
            WinitMouseButton::Forward => MouseButton::Extra2,
            WinitMouseButton::Other(_) => MouseButton::Unknown,
        }
    }
}

/// Converts winit physical key codes to keys.
///
/// Media, IME and browser keys have no counterpart and map to
/// `Key::Unknown`.
impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        use KeyCode::*;
        match code {
            //--- Letters ------------------------------------------------------
            KeyA => Key::A,
            KeyB => Key::B,
            KeyC => Key::C,
            KeyD => Key::D,
            KeyE => Key::E,
            KeyF => Key::F,
            KeyG => Key::G,
            KeyH => Key::H,
            KeyI => Key::I,
            KeyJ => Key::J,
            KeyK => Key::K,
            KeyL => Key::L,
            KeyM => Key::M,
            KeyN => Key::N,
            KeyO => Key::O,
            KeyP => Key::P,
            KeyQ => Key::Q,
            KeyR => Key::R,
            KeyS => Key::S,
            KeyT => Key::T,
            KeyU => Key::U,
            KeyV => Key::V,
            KeyW => Key::W,
            KeyX => Key::X,
            KeyY => Key::Y,
            KeyZ => Key::Z,

            //--- Number Row ---------------------------------------------------
            Digit0 => Key::Number0,
            Digit1 => Key::Number1,
            Digit2 => Key::Number2,
            Digit3 => Key::Number3,
            Digit4 => Key::Number4,
            Digit5 => Key::Number5,
            Digit6 => Key::Number6,
            Digit7 => Key::Number7,
            Digit8 => Key::Number8,
            Digit9 => Key::Number9,

            //--- Punctuation --------------------------------------------------
            Space => Key::Space,
            Escape => Key::Escape,
            Minus => Key::Minus,
            Equal => Key::Equals,
            Comma => Key::Comma,
            Period => Key::Period,
            Quote => Key::Apostrophe,
            Semicolon => Key::Semicolon,
            Slash => Key::Slash,
            Backslash => Key::Backslash,
            BracketLeft => Key::LeftBracket,
            BracketRight => Key::RightBracket,
            Backquote => Key::Grave,
            IntlBackslash => Key::World1,
            IntlRo | IntlYen => Key::World2,

            //--- Editing ------------------------------------------------------
            Enter => Key::Enter,
            Backspace => Key::Backspace,
            Delete => Key::Delete,
            Tab => Key::Tab,
            CapsLock => Key::CapsLock,
            Insert => Key::Insert,

            //--- Navigation ---------------------------------------------------
            ArrowRight => Key::RightArrow,
            ArrowLeft => Key::LeftArrow,
            ArrowDown => Key::DownArrow,
            ArrowUp => Key::UpArrow,
            PageUp => Key::PageUp,
            PageDown => Key::PageDown,
            Home => Key::Home,
            End => Key::End,

            //--- Locks & System -----------------------------------------------
            ScrollLock => Key::ScrollLock,
            NumLock => Key::NumpadLock,
            PrintScreen => Key::PrintScreen,
            Pause => Key::Pause,

            //--- Function Row -------------------------------------------------
            F1 => Key::F1,
            F2 => Key::F2,
            F3 => Key::F3,
            F4 => Key::F4,
            F5 => Key::F5,
            F6 => Key::F6,
            F7 => Key::F7,
            F8 => Key::F8,
            F9 => Key::F9,
            F10 => Key::F10,
            F11 => Key::F11,
            F12 => Key::F12,
            F13 => Key::F13,
            F14 => Key::F14,
            F15 => Key::F15,
            F16 => Key::F16,
            F17 => Key::F17,
            F18 => Key::F18,
            F19 => Key::F19,
            F20 => Key::F20,
            F21 => Key::F21,
            F22 => Key::F22,
            F23 => Key::F23,
            F24 => Key::F24,
            F25 => Key::F25,

            //--- Keypad -------------------------------------------------------
            Numpad0 => Key::KeypadNumber0,
            Numpad1 => Key::KeypadNumber1,
            Numpad2 => Key::KeypadNumber2,
            Numpad3 => Key::KeypadNumber3,
            Numpad4 => Key::KeypadNumber4,
            Numpad5 => Key::KeypadNumber5,
            Numpad6 => Key::KeypadNumber6,
            Numpad7 => Key::KeypadNumber7,
            Numpad8 => Key::KeypadNumber8,
            Numpad9 => Key::KeypadNumber9,
            NumpadDecimal | NumpadComma => Key::KeypadDecimal,
            NumpadDivide => Key::KeypadDivide,
            NumpadMultiply | NumpadStar => Key::KeypadMultiply,
            NumpadSubtract => Key::KeypadSubtract,
            NumpadAdd => Key::KeypadAdd,
            NumpadEnter => Key::KeypadEnter,
            NumpadEqual => Key::KeypadEquals,

            //--- Modifiers ----------------------------------------------------
            ShiftLeft => Key::LeftShift,
            ShiftRight => Key::RightShift,
            ControlLeft => Key::LeftControl,
            ControlRight => Key::RightControl,
            Fn => Key::Function,
            ContextMenu => Key::Menu,
            AltLeft => Key::LeftAlt,
            AltRight => Key::RightAlt,
            SuperLeft => Key::LeftSystem,
            SuperRight => Key::RightSystem,

            _ => Key::Unknown,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
