//=========================================================================
// Cocoa Helpers
//=========================================================================
//
// AppKit queries winit does not expose: the visible frame of an
// `NSScreen` (menu bar and Dock excluded) and `NSWindow` alpha.
//
// AppKit frames are in points with a bottom-left origin; insets are
// converted to physical pixels with the monitor's scale factor.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::ffi::c_void;

use log::debug;
use objc2::rc::Retained;
use objc2_app_kit::{NSScreen, NSView, NSWindow};
use objc2_foundation::NSRect;
use winit::raw_window_handle::{HasWindowHandle, RawWindowHandle};
use winit::window::Window as WinitWindow;

//=== Internal Dependencies ===============================================

use crate::core::geometry::Insets;

//=== Work Area ===========================================================

/// Space taken by the menu bar and Dock on `ns_screen`.
pub(super) fn screen_insets(ns_screen: *mut c_void, scale_factor: f64) -> Option<Insets> {
    if ns_screen.is_null() {
        return None;
    }

    let screen: &NSScreen = unsafe { &*(ns_screen as *const NSScreen) };
    let (frame, visible): (NSRect, NSRect) = unsafe { (screen.frame(), screen.visibleFrame()) };

    let to_pixels = |points: f64| (points.max(0.0) * scale_factor).round() as u32;
    let insets = Insets::new(
        to_pixels(visible.origin.x - frame.origin.x),
        to_pixels((frame.origin.x + frame.size.width) - (visible.origin.x + visible.size.width)),
        to_pixels((frame.origin.y + frame.size.height) - (visible.origin.y + visible.size.height)),
        to_pixels(visible.origin.y - frame.origin.y),
    );

    debug!(target: "platform::cocoa", "Screen visible frame leaves {:?}", insets);
    Some(insets)
}

//=== Opacity =============================================================

fn with_ns_window<R>(window: &WinitWindow, f: impl FnOnce(&NSWindow) -> R) -> Option<R> {
    let handle = window.window_handle().ok()?;
    let RawWindowHandle::AppKit(appkit) = handle.as_raw() else {
        return None;
    };

    let view: &NSView = unsafe { appkit.ns_view.cast::<NSView>().as_ref() };
    let ns_window: Retained<NSWindow> = unsafe { view.window() }?;
    Some(f(&ns_window))
}

pub(super) fn set_alpha(window: &WinitWindow, opacity: f32) {
    let applied = with_ns_window(window, |ns_window| unsafe {
        ns_window.setAlphaValue(f64::from(opacity));
    });
    if applied.is_none() {
        debug!(target: "platform::cocoa", "No NSWindow behind the view; alpha not applied");
    }
}

pub(super) fn alpha(window: &WinitWindow) -> Option<f32> {
    with_ns_window(window, |ns_window| unsafe { ns_window.alphaValue() } as f32)
}
