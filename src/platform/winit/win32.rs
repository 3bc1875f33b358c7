//=========================================================================
// Win32 Helpers
//=========================================================================
//
// The parts of Win32 winit does not expose: monitor work areas and
// layered-window opacity.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::mem;

use log::warn;
use windows::Win32::Foundation::{COLORREF, HWND};
use windows::Win32::Graphics::Gdi::{GetMonitorInfoW, HMONITOR, MONITORINFO};
use windows::Win32::UI::WindowsAndMessaging::{
    GetLayeredWindowAttributes, GetWindowLongW, SetLayeredWindowAttributes, SetWindowLongW,
    GWL_EXSTYLE, LAYERED_WINDOW_ATTRIBUTES_FLAGS, LWA_ALPHA, WS_EX_LAYERED,
};
use winit::raw_window_handle::{HasWindowHandle, RawWindowHandle};
use winit::window::Window as WinitWindow;

//=== Internal Dependencies ===============================================

use crate::core::geometry::Insets;

//=== Handles =============================================================

pub(super) fn hwnd(window: &WinitWindow) -> Option<HWND> {
    match window.window_handle().ok()?.as_raw() {
        RawWindowHandle::Win32(handle) => Some(HWND(handle.hwnd.get() as *mut _)),
        _ => None,
    }
}

/// Window class name; every window gets its own class.
pub(super) fn window_class_name(serial: u32) -> String {
    format!("AethericWindow{}", serial)
}

//=== Work Area ===========================================================

/// Taskbar and app-bar space reserved on `hmonitor` (`rcMonitor` vs
/// `rcWork`).
pub(super) fn monitor_insets(hmonitor: isize) -> Option<Insets> {
    let mut info = MONITORINFO {
        cbSize: mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };

    let found = unsafe { GetMonitorInfoW(HMONITOR(hmonitor as *mut _), &mut info) }.as_bool();
    if !found {
        warn!(target: "platform::win32", "GetMonitorInfoW failed for monitor {:#x}", hmonitor);
        return None;
    }

    let (full, work) = (info.rcMonitor, info.rcWork);
    Some(Insets::new(
        (work.left - full.left).max(0) as u32,
        (full.right - work.right).max(0) as u32,
        (work.top - full.top).max(0) as u32,
        (full.bottom - work.bottom).max(0) as u32,
    ))
}

//=== Opacity =============================================================

/// Makes the window layered on first use, then sets its alpha.
pub(super) fn set_opacity(hwnd: HWND, opacity: f32) {
    let layered = WS_EX_LAYERED.0 as i32;
    let alpha = (opacity * 255.0).round() as u8;

    unsafe {
        let style = GetWindowLongW(hwnd, GWL_EXSTYLE);
        if style & layered == 0 {
            SetWindowLongW(hwnd, GWL_EXSTYLE, style | layered);
        }
        if let Err(err) = SetLayeredWindowAttributes(hwnd, COLORREF(0), alpha, LWA_ALPHA) {
            warn!(target: "platform::win32", "SetLayeredWindowAttributes failed: {}", err);
        }
    }
}

/// `None` until the window has been made layered.
pub(super) fn opacity(hwnd: HWND) -> Option<f32> {
    let mut alpha = 0u8;
    let mut flags = LAYERED_WINDOW_ATTRIBUTES_FLAGS(0);

    unsafe {
        GetLayeredWindowAttributes(
            hwnd,
            None,
            Some(&mut alpha as *mut u8),
            Some(&mut flags as *mut LAYERED_WINDOW_ATTRIBUTES_FLAGS),
        )
    }
    .ok()?;

    (flags.0 & LWA_ALPHA.0 != 0).then(|| f32::from(alpha) / 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_names_are_unique_per_serial() {
        assert_ne!(window_class_name(1), window_class_name(2));
        assert!(window_class_name(7).starts_with("AethericWindow"));
    }
}
