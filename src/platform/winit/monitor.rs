//=========================================================================
// Monitor Enumeration
//=========================================================================
//
// Turns winit monitors into `ScreenInfo`s in desktop coordinates.
//
// winit reports monitor and window positions top-left, Y-down, relative
// to the virtual screen. Desktop coordinates put the bottom-left corner
// of the primary monitor at the origin, Y-up:
//
// ```text
//   native (0,0) ┌──────────────┐
//                │   primary    │
//                │              │
//   desktop (0,0)└──────────────┘ ← axis = primary.y + primary.height
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;
use winit::event_loop::ActiveEventLoop;
use winit::monitor::MonitorHandle;

//=== Internal Dependencies ===============================================

use crate::core::geometry::{Insets, Vector2Int, Vector2UInt};
use crate::core::screen::ScreenInfo;

use super::OsSupport;

//=== Constants ===========================================================

const DEFAULT_REFRESH_RATE: u16 = 60;

//=== DesktopFrame ========================================================

/// Flip between winit's Y-down virtual screen and Y-up desktop space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct DesktopFrame {
    axis: i32,
}

impl DesktopFrame {
    pub(super) fn from_primary(top: i32, height: u32) -> Self {
        Self { axis: top.saturating_add(height as i32) }
    }

    /// Bottom-left corner of a rect whose native top-left is `top_left`.
    pub(super) fn to_desktop(&self, top_left: Vector2Int, height: u32) -> Vector2Int {
        Vector2Int::new(top_left.x, self.axis - top_left.y - height as i32)
    }

    /// Native top-left corner of a rect whose desktop bottom-left is
    /// `bottom_left`.
    pub(super) fn to_native(&self, bottom_left: Vector2Int, height: u32) -> Vector2Int {
        Vector2Int::new(bottom_left.x, self.axis - bottom_left.y - height as i32)
    }
}

//=== Enumeration =========================================================

/// Every connected monitor, primary first, plus the frame they were
/// converted with.
pub(super) fn enumerate(event_loop: &ActiveEventLoop, os: &OsSupport) -> (Vec<ScreenInfo>, DesktopFrame) {
    let primary = event_loop.primary_monitor();
    let mut monitors: Vec<MonitorHandle> = event_loop.available_monitors().collect();

    if let Some(primary) = &primary {
        if let Some(index) = monitors.iter().position(|monitor| monitor == primary) {
            let primary = monitors.remove(index);
            monitors.insert(0, primary);
        }
    }

    let frame = monitors
        .first()
        .map(|monitor| DesktopFrame::from_primary(monitor.position().y, monitor.size().height))
        .unwrap_or_default();

    let screens: Vec<ScreenInfo> = monitors
        .iter()
        .enumerate()
        .map(|(index, monitor)| describe(index, monitor, frame, os))
        .collect();

    debug!(target: "platform::screen", "Enumerated {} monitors", screens.len());
    (screens, frame)
}

fn describe(index: usize, monitor: &MonitorHandle, frame: DesktopFrame, os: &OsSupport) -> ScreenInfo {
    let position = monitor.position();
    let size = monitor.size();
    let size = Vector2UInt::new(size.width, size.height);

    let name = monitor.name().unwrap_or_else(|| format!("Screen {}", index + 1));
    let origin = frame.to_desktop(Vector2Int::new(position.x, position.y), size.y);
    let refresh_rate = monitor
        .refresh_rate_millihertz()
        .map(|millihertz| ((millihertz + 500) / 1000) as u16)
        .filter(|hertz| *hertz > 0)
        .unwrap_or(DEFAULT_REFRESH_RATE);

    ScreenInfo::new(name, origin, size)
        .with_reserved(reserved_insets(monitor, os))
        .with_refresh_rate(refresh_rate)
}

//--- Reserved Insets -----------------------------------------------------

#[cfg(target_os = "windows")]
fn reserved_insets(monitor: &MonitorHandle, _os: &OsSupport) -> Insets {
    use winit::platform::windows::MonitorHandleExtWindows;

    super::win32::monitor_insets(monitor.hmonitor()).unwrap_or(Insets::NONE)
}

#[cfg(target_os = "macos")]
fn reserved_insets(monitor: &MonitorHandle, _os: &OsSupport) -> Insets {
    use winit::platform::macos::MonitorHandleExtMacOS;

    monitor
        .ns_screen()
        .and_then(|ns_screen| super::cocoa::screen_insets(ns_screen, monitor.scale_factor()))
        .unwrap_or(Insets::NONE)
}

#[cfg(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))]
fn reserved_insets(monitor: &MonitorHandle, os: &OsSupport) -> Insets {
    let Some(work_area) = os.x11.as_ref().and_then(|x11| x11.work_area()) else {
        debug!(target: "platform::x11", "No _NET_WORKAREA; assuming no reserved space");
        return Insets::NONE;
    };

    let position = monitor.position();
    let size = monitor.size();
    let bounds = super::x11::Rect {
        x: position.x,
        y: position.y,
        width: size.width,
        height: size.height,
    };
    super::x11::work_area_insets(work_area, bounds)
}

#[cfg(target_os = "android")]
fn reserved_insets(_monitor: &MonitorHandle, _os: &OsSupport) -> Insets {
    debug!(target: "platform::screen", "No reserved-area query on this backend");
    Insets::NONE
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_bottom_left_is_desktop_origin() {
        let frame = DesktopFrame::from_primary(0, 1080);
        assert_eq!(frame.to_desktop(Vector2Int::new(0, 0), 1080), Vector2Int::ZERO);
    }

    #[test]
    fn monitor_above_primary_has_positive_y() {
        let frame = DesktopFrame::from_primary(0, 1080);
        let above = frame.to_desktop(Vector2Int::new(0, -1440), 1440);
        assert_eq!(above, Vector2Int::new(0, 1080));
    }

    #[test]
    fn window_round_trips_through_native_space() {
        let frame = DesktopFrame::from_primary(0, 1080);
        let native = Vector2Int::new(100, 200);
        let desktop = frame.to_desktop(native, 600);
        assert_eq!(desktop, Vector2Int::new(100, 280));
        assert_eq!(frame.to_native(desktop, 600), native);
    }
}
