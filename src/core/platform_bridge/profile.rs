//=========================================================================
// Backend Profiles
//=========================================================================
//
// Per-backend protocol switches consumed by the routing layer.
//
// Every native context reports which backend it realizes. The profile
// tells `Window` which quirks of that backend's native event model must
// be filtered out so all backends present one behaviour to the caller.
//
// ```text
//               origin    repeat  show   altgr  prtsc  min   pos/opacity  cursor  touch
//  Win32        top-left  drop    drop   yes    yes    live  yes          yes     no
//  X11          top-left  drop    -      -      -      live  yes          yes     no
//  Cocoa        bot-left  -       -      -      -      live  yes          yes     no
//  UIKit        top-left  -       -      -      -      track no           no      yes
//  Activity     top-left  -       -      -      -      track no           no      yes
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use crate::core::geometry::Vector2;

//=== BackendType =========================================================

/// Identifies which native API produced a window or screen.
///
/// Surface-creation code switches on this to pick the matching native
/// surface constructor for the handle exposed by the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendType {
    Win32,
    X11,
    Cocoa,
    UIKit,
    /// Android activity windows.
    Activity,
    /// In-process backend without a display server.
    Headless,
}

impl fmt::Display for BackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Win32 => "Win32",
            Self::X11 => "X11",
            Self::Cocoa => "Cocoa",
            Self::UIKit => "UIKit",
            Self::Activity => "Activity",
            Self::Headless => "Headless",
        };
        f.write_str(name)
    }
}

//=== CoordinateOrigin ====================================================

/// Corner of the client area that native coordinates are measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateOrigin {
    /// Y grows downwards from the top-left corner.
    TopLeft,
    /// Y grows upwards from the bottom-left corner.
    BottomLeft,
}

impl CoordinateOrigin {
    /// Converts a native client position into bottom-left, Y-up space.
    pub fn to_bottom_left(self, position: Vector2, client_height: f32) -> Vector2 {
        match self {
            Self::TopLeft => Vector2::new(position.x, client_height - position.y),
            Self::BottomLeft => position,
        }
    }

    /// Converts a bottom-left, Y-up client position back into native space.
    pub fn from_bottom_left(self, position: Vector2, client_height: f32) -> Vector2 {
        // The flip is its own inverse.
        self.to_bottom_left(position, client_height)
    }
}

//=== BackendProfile ======================================================

/// Protocol obligations and capabilities of one backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendProfile {
    pub backend: BackendType,

    /// Origin of cursor and touch positions in `NativeEvent`s.
    pub origin: CoordinateOrigin,

    /// OS auto-repeat surfaces as Release+Press pairs that must be merged.
    pub suppress_key_repeat: bool,

    /// Showing a hidden window emits Moved/Resized that must be dropped.
    pub suppress_synthetic_show_events: bool,

    /// AltGr arrives as LeftControl+RightAlt with identical timestamps.
    pub collapse_alt_gr: bool,

    /// PrintScreen is only reported on release.
    pub synthesize_print_screen_press: bool,

    /// The OS offers no minimized query; lifecycle callbacks drive it.
    pub tracks_minimized_manually: bool,

    pub supports_positioning: bool,
    pub supports_opacity: bool,
    pub has_cursor: bool,
    pub has_touch: bool,
}

impl BackendProfile {
    /// Profile describing the raw native protocol of `backend`.
    pub const fn for_backend(backend: BackendType) -> Self {
        let desktop = Self {
            backend,
            origin: CoordinateOrigin::TopLeft,
            suppress_key_repeat: false,
            suppress_synthetic_show_events: false,
            collapse_alt_gr: false,
            synthesize_print_screen_press: false,
            tracks_minimized_manually: false,
            supports_positioning: true,
            supports_opacity: true,
            has_cursor: true,
            has_touch: false,
        };
        let mobile = Self {
            tracks_minimized_manually: true,
            supports_positioning: false,
            supports_opacity: false,
            has_cursor: false,
            has_touch: true,
            ..desktop
        };

        match backend {
            BackendType::Win32 => Self {
                suppress_key_repeat: true,
                suppress_synthetic_show_events: true,
                collapse_alt_gr: true,
                synthesize_print_screen_press: true,
                ..desktop
            },
            BackendType::X11 => Self {
                suppress_key_repeat: true,
                ..desktop
            },
            BackendType::Cocoa => Self {
                origin: CoordinateOrigin::BottomLeft,
                ..desktop
            },
            BackendType::UIKit | BackendType::Activity => mobile,
            BackendType::Headless => desktop,
        }
    }

    /// Same profile with positions reported from `origin`.
    pub const fn with_origin(self, origin: CoordinateOrigin) -> Self {
        Self { origin, ..self }
    }

    /// Returns `true` for touch-first backends with manual lifecycle tracking.
    pub fn is_mobile(&self) -> bool {
        matches!(self.backend, BackendType::UIKit | BackendType::Activity)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_left_flip_round_trips() {
        let native = Vector2::new(100.0, 20.0);
        let flipped = CoordinateOrigin::TopLeft.to_bottom_left(native, 600.0);
        assert_eq!(flipped, Vector2::new(100.0, 580.0));
        assert_eq!(CoordinateOrigin::TopLeft.from_bottom_left(flipped, 600.0), native);
    }

    #[test]
    fn bottom_left_is_identity() {
        let position = Vector2::new(3.0, 4.0);
        assert_eq!(CoordinateOrigin::BottomLeft.to_bottom_left(position, 600.0), position);
    }

    #[test]
    fn win32_carries_all_desktop_quirks() {
        let profile = BackendProfile::for_backend(BackendType::Win32);
        assert!(profile.suppress_key_repeat);
        assert!(profile.suppress_synthetic_show_events);
        assert!(profile.collapse_alt_gr);
        assert!(profile.synthesize_print_screen_press);
        assert!(profile.has_cursor && !profile.has_touch);
    }

    #[test]
    fn mobile_backends_have_touch_and_no_cursor() {
        for backend in [BackendType::UIKit, BackendType::Activity] {
            let profile = BackendProfile::for_backend(backend);
            assert!(profile.is_mobile());
            assert!(profile.has_touch);
            assert!(!profile.has_cursor);
            assert!(!profile.supports_positioning);
            assert!(!profile.supports_opacity);
            assert!(profile.tracks_minimized_manually);
        }
    }

    #[test]
    fn cocoa_reports_bottom_left() {
        let profile = BackendProfile::for_backend(BackendType::Cocoa);
        assert_eq!(profile.origin, CoordinateOrigin::BottomLeft);
        let relocated = profile.with_origin(CoordinateOrigin::TopLeft);
        assert_eq!(relocated.origin, CoordinateOrigin::TopLeft);
        assert_eq!(relocated.backend, BackendType::Cocoa);
    }
}
