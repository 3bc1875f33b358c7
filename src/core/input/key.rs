//=========================================================================
// Key & MouseButton
//=========================================================================
//
// Platform-independent identifiers for physical keys and mouse buttons.
//
// Keys name the physical location, not the produced character: `Key::A`
// is the same key on QWERTY and AZERTY layouts. Every backend owns a
// lookup table from its native codes into these enums (see
// `platform::winit::translate`).
//
// Both enums are dense (`#[repr(u8)]`, no gaps) so their ordinals index
// the fixed-size `ActionBuffer` arrays directly.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;

//=== Table Macro =========================================================

/// Declares a dense identifier enum together with its `ALL` table,
/// `COUNT`, `index()` and human readable `name()`.
macro_rules! identifier_table {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in ordinal order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            /// Number of variants (size of per-variant state arrays).
            pub const COUNT: usize = Self::ALL.len();

            /// Dense ordinal in `0..COUNT`.
            #[inline]
            pub const fn index(self) -> usize {
                self as usize
            }

            /// Looks up a variant by ordinal.
            pub fn from_index(index: usize) -> Option<Self> {
                Self::ALL.get(index).copied()
            }

            /// Human readable label, suitable for logs and settings screens.
            pub const fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

//=== Key =================================================================

identifier_table! {
    /// Physical keyboard key.
    ///
    /// `LeftSystem`/`RightSystem` are the Windows keys on PC keyboards and
    /// the Command keys on Apple keyboards; `LeftAlt`/`RightAlt` double as
    /// the Option keys.
    pub enum Key {
        /// Fallback for native codes with no mapping.
        Unknown => "Unknown",

        //--- Letters ------------------------------------------------------
        A => "A", B => "B", C => "C", D => "D", E => "E", F => "F",
        G => "G", H => "H", I => "I", J => "J", K => "K", L => "L",
        M => "M", N => "N", O => "O", P => "P", Q => "Q", R => "R",
        S => "S", T => "T", U => "U", V => "V", W => "W", X => "X",
        Y => "Y", Z => "Z",

        //--- Number Row ---------------------------------------------------
        Number0 => "Number 0", Number1 => "Number 1", Number2 => "Number 2",
        Number3 => "Number 3", Number4 => "Number 4", Number5 => "Number 5",
        Number6 => "Number 6", Number7 => "Number 7", Number8 => "Number 8",
        Number9 => "Number 9",

        //--- Punctuation --------------------------------------------------
        Space => "Space",
        Escape => "Escape",
        Minus => "Minus",
        Equals => "Equals",
        Comma => "Comma",
        Period => "Period",
        Apostrophe => "Apostrophe",
        Semicolon => "Semicolon",
        Slash => "Slash",
        Backslash => "Backslash",
        LeftBracket => "Left Bracket",
        RightBracket => "Right Bracket",
        Grave => "Grave",
        /// Non-US key left of `Z` (ISO layouts).
        World1 => "World 1",
        /// Non-US key right of the space bar (JIS layouts).
        World2 => "World 2",

        //--- Editing ------------------------------------------------------
        Enter => "Enter",
        Backspace => "Backspace",
        Delete => "Delete",
        Tab => "Tab",
        CapsLock => "Caps Lock",
        Insert => "Insert",
        Section => "Section",

        //--- Navigation ---------------------------------------------------
        RightArrow => "Right Arrow",
        LeftArrow => "Left Arrow",
        DownArrow => "Down Arrow",
        UpArrow => "Up Arrow",
        PageUp => "Page Up",
        PageDown => "Page Down",
        Home => "Home",
        End => "End",

        //--- Locks & System -----------------------------------------------
        ScrollLock => "Scroll Lock",
        NumpadLock => "Numpad Lock",
        PrintScreen => "Print Screen",
        Pause => "Pause",

        //--- Function Row -------------------------------------------------
        F1 => "F1", F2 => "F2", F3 => "F3", F4 => "F4", F5 => "F5",
        F6 => "F6", F7 => "F7", F8 => "F8", F9 => "F9", F10 => "F10",
        F11 => "F11", F12 => "F12", F13 => "F13", F14 => "F14", F15 => "F15",
        F16 => "F16", F17 => "F17", F18 => "F18", F19 => "F19", F20 => "F20",
        F21 => "F21", F22 => "F22", F23 => "F23", F24 => "F24", F25 => "F25",

        //--- Keypad -------------------------------------------------------
        KeypadNumber0 => "Keypad Number 0", KeypadNumber1 => "Keypad Number 1",
        KeypadNumber2 => "Keypad Number 2", KeypadNumber3 => "Keypad Number 3",
        KeypadNumber4 => "Keypad Number 4", KeypadNumber5 => "Keypad Number 5",
        KeypadNumber6 => "Keypad Number 6", KeypadNumber7 => "Keypad Number 7",
        KeypadNumber8 => "Keypad Number 8", KeypadNumber9 => "Keypad Number 9",
        KeypadDecimal => "Keypad Decimal",
        KeypadDivide => "Keypad Divide",
        KeypadMultiply => "Keypad Multiply",
        KeypadSubtract => "Keypad Subtract",
        KeypadAdd => "Keypad Add",
        KeypadEnter => "Keypad Enter",
        KeypadEquals => "Keypad Equals",

        //--- Modifiers ----------------------------------------------------
        LeftShift => "Left Shift",
        RightShift => "Right Shift",
        LeftControl => "Left Control",
        RightControl => "Right Control",
        Function => "Function",
        Menu => "Menu",
        LeftAlt => "Left Alt",
        RightAlt => "Right Alt",
        LeftSystem => "Left System",
        RightSystem => "Right System",
    }
}

impl Key {
    /// Lowercase character printed on the key cap, letters only.
    pub fn character(self) -> Option<char> {
        let index = self.index();
        if (Key::A.index()..=Key::Z.index()).contains(&index) {
            Some((b'a' + (index - Key::A.index()) as u8) as char)
        } else {
            None
        }
    }

    /// Returns `true` for Shift, Control, Alt and System keys.
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Key::LeftShift
                | Key::RightShift
                | Key::LeftControl
                | Key::RightControl
                | Key::LeftAlt
                | Key::RightAlt
                | Key::LeftSystem
                | Key::RightSystem
        )
    }
}

impl Default for Key {
    fn default() -> Self {
        Key::Unknown
    }
}

//=== MouseButton =========================================================

identifier_table! {
    /// Physical mouse button.
    pub enum MouseButton {
        /// Buttons with no mapping (macro keys, exotic devices).
        Unknown => "Unknown",
        Left => "Left",
        Right => "Right",
        Middle => "Middle",
        /// First side button (usually "back").
        Extra1 => "Extra 1",
        /// Second side button (usually "forward").
        Extra2 => "Extra 2",
    }
}

impl Default for MouseButton {
    fn default() -> Self {
        MouseButton::Unknown
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_table_is_dense() {
        for (ordinal, key) in Key::ALL.iter().enumerate() {
            assert_eq!(key.index(), ordinal, "{} is out of place", key);
            assert_eq!(Key::from_index(ordinal), Some(*key));
        }
        assert_eq!(Key::from_index(Key::COUNT), None);
    }

    #[test]
    fn key_table_covers_full_key_set() {
        assert_eq!(Key::ALL.first(), Some(&Key::Unknown));
        assert_eq!(Key::ALL.last(), Some(&Key::RightSystem));
        assert!(Key::ALL.contains(&Key::F25));
        assert!(Key::ALL.contains(&Key::KeypadEquals));
    }

    #[test]
    fn key_names_are_readable() {
        assert_eq!(Key::LeftBracket.name(), "Left Bracket");
        assert_eq!(Key::KeypadNumber7.to_string(), "Keypad Number 7");
        assert_eq!(Key::Number0.name(), "Number 0");
    }

    #[test]
    fn only_letters_have_characters() {
        assert_eq!(Key::A.character(), Some('a'));
        assert_eq!(Key::Z.character(), Some('z'));
        assert_eq!(Key::Number1.character(), None);
        assert_eq!(Key::Unknown.character(), None);
    }

    #[test]
    fn modifiers_are_classified() {
        assert!(Key::LeftShift.is_modifier());
        assert!(Key::RightSystem.is_modifier());
        assert!(!Key::Space.is_modifier());
        assert!(!Key::Function.is_modifier());
    }

    #[test]
    fn mouse_button_table_is_dense() {
        assert_eq!(MouseButton::COUNT, 6);
        for (ordinal, button) in MouseButton::ALL.iter().enumerate() {
            assert_eq!(button.index(), ordinal);
        }
        assert_eq!(MouseButton::Extra2.name(), "Extra 2");
    }
}
