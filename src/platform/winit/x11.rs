//=========================================================================
// X11 Helpers
//=========================================================================
//
// EWMH plumbing winit does not expose, spoken over a second connection
// to the same X server.
//
// Responsibilities:
// - Atom negotiation against the window manager's `_NET_SUPPORTED` list
// - `_NET_WORKAREA` of the current desktop
// - `_NET_FRAME_EXTENTS` probe with a bounded wait
// - `_NET_WM_STATE` maximize acknowledgement with a bounded wait
// - `_NET_WM_WINDOW_OPACITY`
//
// Notes:
// Event selections are per client, so selecting `PropertyChange` on a
// window winit owns does not disturb winit's own event stream.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;
use std::time::Duration;

use log::{debug, warn};
use winit::raw_window_handle::{HasWindowHandle, RawWindowHandle};
use winit::window::Window as WinitWindow;
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{
    Atom, AtomEnum, ChangeWindowAttributesAux, ClientMessageEvent, ConnectionExt as _, EventMask,
    PropMode, Property, Window as XWindow,
};
use x11rb::protocol::Event;
use x11rb::rust_connection::RustConnection;
use x11rb::wrapper::ConnectionExt as _;

//=== Internal Dependencies ===============================================

use crate::core::geometry::Insets;
use crate::platform::round_trip;

//=== Atoms ===============================================================

x11rb::atom_manager! {
    Atoms: AtomsCookie {
        _NET_SUPPORTED,
        _NET_CURRENT_DESKTOP,
        _NET_WORKAREA,
        _NET_FRAME_EXTENTS,
        _NET_REQUEST_FRAME_EXTENTS,
        _NET_WM_STATE,
        _NET_WM_STATE_MAXIMIZED_VERT,
        _NET_WM_STATE_MAXIMIZED_HORZ,
        _NET_ACTIVE_WINDOW,
    }
}

//=== Rect ================================================================

/// Root-window rectangle, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Rect {
    pub(super) x: i32,
    pub(super) y: i32,
    pub(super) width: u32,
    pub(super) height: u32,
}

impl Rect {
    fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }
}

/// Insets of `monitor` left over once intersected with `work_area`.
pub(super) fn work_area_insets(work_area: Rect, monitor: Rect) -> Insets {
    let clamp = |value: i64, limit: u32| value.clamp(0, i64::from(limit)) as u32;

    Insets::new(
        clamp(i64::from(work_area.x) - i64::from(monitor.x), monitor.width),
        clamp(monitor.right() - work_area.right(), monitor.width),
        clamp(i64::from(work_area.y) - i64::from(monitor.y), monitor.height),
        clamp(monitor.bottom() - work_area.bottom(), monitor.height),
    )
}

/// `_NET_WM_WINDOW_OPACITY` maps 0.0..=1.0 onto the full CARDINAL range.
fn opacity_to_cardinal(opacity: f32) -> u32 {
    (f64::from(opacity.clamp(0.0, 1.0)) * f64::from(u32::MAX)).round() as u32
}

fn cardinal_to_opacity(value: u32) -> f32 {
    (f64::from(value) / f64::from(u32::MAX)) as f32
}

//=== X11Support ==========================================================

pub(super) struct X11Support {
    conn: RustConnection,
    root: XWindow,
    atoms: Atoms,
    supported: HashSet<Atom>,
    /// `None` if no client ever interned the atom: no compositor honours it.
    opacity_atom: Option<Atom>,
}

impl X11Support {
    /// Opens the helper connection; `None` with a warning if the server
    /// cannot be reached.
    pub(super) fn connect() -> Option<Self> {
        let (conn, screen) = match x11rb::connect(None) {
            Ok(connected) => connected,
            Err(err) => {
                warn!(target: "platform::x11", "Cannot open helper X11 connection: {}", err);
                return None;
            }
        };
        let root = conn.setup().roots.get(screen)?.root;

        let atoms = match Atoms::new(&conn).ok().and_then(|cookie| cookie.reply().ok()) {
            Some(atoms) => atoms,
            None => {
                warn!(target: "platform::x11", "Cannot intern EWMH atoms");
                return None;
            }
        };

        let supported: HashSet<Atom> = conn
            .get_property(false, root, atoms._NET_SUPPORTED, AtomEnum::ATOM, 0, u32::MAX)
            .ok()
            .and_then(|cookie| cookie.reply().ok())
            .and_then(|reply| reply.value32().map(|atoms| atoms.collect()))
            .unwrap_or_default();
        if supported.is_empty() {
            warn!(target: "platform::x11", "Window manager advertises no EWMH support");
        }

        let opacity_atom = conn
            .intern_atom(true, b"_NET_WM_WINDOW_OPACITY")
            .ok()
            .and_then(|cookie| cookie.reply().ok())
            .map(|reply| reply.atom)
            .filter(|atom| *atom != u32::from(AtomEnum::NONE));

        debug!(target: "platform::x11", "Window manager supports {} EWMH atoms", supported.len());
        Some(Self { conn, root, atoms, supported, opacity_atom })
    }

    fn supports(&self, atoms: &[(Atom, &str)]) -> bool {
        let mut all = true;
        for (atom, name) in atoms {
            if !self.supported.contains(atom) {
                warn!(target: "platform::x11", "Window manager does not support {}", name);
                all = false;
            }
        }
        all
    }

    pub(super) fn supports_maximize(&self) -> bool {
        self.supports(&[
            (self.atoms._NET_WM_STATE, "_NET_WM_STATE"),
            (self.atoms._NET_WM_STATE_MAXIMIZED_VERT, "_NET_WM_STATE_MAXIMIZED_VERT"),
            (self.atoms._NET_WM_STATE_MAXIMIZED_HORZ, "_NET_WM_STATE_MAXIMIZED_HORZ"),
        ])
    }

    pub(super) fn supports_focus(&self) -> bool {
        self.supports(&[(self.atoms._NET_ACTIVE_WINDOW, "_NET_ACTIVE_WINDOW")])
    }

    //--- Work Area --------------------------------------------------------

    /// `_NET_WORKAREA` of the current desktop.
    pub(super) fn work_area(&self) -> Option<Rect> {
        let desktop = self
            .cardinals(self.root, self.atoms._NET_CURRENT_DESKTOP)
            .and_then(|values| values.first().copied())
            .unwrap_or(0) as usize;

        let values = self.cardinals(self.root, self.atoms._NET_WORKAREA)?;
        let area = values.get(desktop * 4..desktop * 4 + 4)?;

        Some(Rect {
            x: area[0] as i32,
            y: area[1] as i32,
            width: area[2],
            height: area[3],
        })
    }

    //--- Frame Extents ----------------------------------------------------

    /// Decoration sizes around `window`, or `Insets::NONE` if the window
    /// manager cannot or does not answer within `timeout`.
    pub(super) fn frame_extents(&self, window: XWindow, timeout: Duration) -> Insets {
        if !self.supports(&[
            (self.atoms._NET_FRAME_EXTENTS, "_NET_FRAME_EXTENTS"),
            (self.atoms._NET_REQUEST_FRAME_EXTENTS, "_NET_REQUEST_FRAME_EXTENTS"),
        ]) {
            return Insets::NONE;
        }

        if let Some(extents) = self.read_extents(window) {
            return extents;
        }

        let request = ClientMessageEvent::new(32, window, self.atoms._NET_REQUEST_FRAME_EXTENTS, [0u32; 5]);
        let answered = property_round_trip(
            |enabled| self.select_property_changes(window, enabled),
            || {
                self.conn
                    .send_event(
                        false,
                        self.root,
                        EventMask::SUBSTRUCTURE_REDIRECT | EventMask::SUBSTRUCTURE_NOTIFY,
                        request,
                    )
                    .is_ok()
                    && self.conn.flush().is_ok()
            },
            || {
                round_trip::wait_until("X11 frame extents", timeout, || {
                    self.poll_property_change(window, self.atoms._NET_FRAME_EXTENTS)
                })
                .is_ok()
            },
        )
        .unwrap_or(false);

        if !answered {
            warn!(target: "platform::x11", "No frame extents for window {:#x}; assuming none", window);
            return Insets::NONE;
        }
        self.read_extents(window).unwrap_or(Insets::NONE)
    }

    fn read_extents(&self, window: XWindow) -> Option<Insets> {
        let values = self.cardinals(window, self.atoms._NET_FRAME_EXTENTS)?;
        match values[..] {
            [left, right, top, bottom] => Some(Insets::new(left, right, top, bottom)),
            _ => None,
        }
    }

    //--- Maximize ---------------------------------------------------------

    /// Sends `request` and waits for the window manager to rewrite
    /// `_NET_WM_STATE` in answer.
    pub(super) fn await_state_change(&self, window: XWindow, timeout: Duration, request: impl FnOnce()) {
        let acknowledged = property_round_trip(
            |enabled| self.select_property_changes(window, enabled),
            || {
                request();
                true
            },
            || {
                round_trip::wait_until("X11 maximize acknowledgement", timeout, || {
                    self.poll_property_change(window, self.atoms._NET_WM_STATE)
                })
                .is_ok()
            },
        )
        .unwrap_or(false);

        if acknowledged {
            debug!(target: "platform::x11", "Maximize of {:#x} acknowledged", window);
        }
    }

    //--- Opacity ----------------------------------------------------------

    pub(super) fn set_opacity(&self, window: XWindow, opacity: f32) {
        let Some(atom) = self.opacity_atom else {
            warn!(target: "platform::x11", "_NET_WM_WINDOW_OPACITY is unavailable; opacity ignored");
            return;
        };

        let result = if opacity >= 1.0 {
            self.conn.delete_property(window, atom).map(|_| ())
        } else {
            self.conn
                .change_property32(
                    PropMode::REPLACE,
                    window,
                    atom,
                    AtomEnum::CARDINAL,
                    &[opacity_to_cardinal(opacity)],
                )
                .map(|_| ())
        };

        if let Err(err) = result.and_then(|_| self.conn.flush()) {
            warn!(target: "platform::x11", "Cannot set opacity of {:#x}: {}", window, err);
        }
    }

    pub(super) fn opacity(&self, window: XWindow) -> Option<f32> {
        let atom = self.opacity_atom?;
        let values = self.cardinals(window, atom)?;
        values.first().map(|value| cardinal_to_opacity(*value))
    }

    //--- Internal Helpers -------------------------------------------------

    fn cardinals(&self, window: XWindow, property: Atom) -> Option<Vec<u32>> {
        let reply = self
            .conn
            .get_property(false, window, property, AtomEnum::CARDINAL, 0, u32::MAX)
            .ok()?
            .reply()
            .ok()?;
        let values: Vec<u32> = reply.value32()?.collect();
        (!values.is_empty()).then_some(values)
    }

    fn select_property_changes(&self, window: XWindow, enabled: bool) {
        let mask = if enabled { EventMask::PROPERTY_CHANGE } else { EventMask::NO_EVENT };
        let aux = ChangeWindowAttributesAux::new().event_mask(mask);
        if self.conn.change_window_attributes(window, &aux).is_err() || self.conn.flush().is_err() {
            warn!(target: "platform::x11", "Cannot select property changes on {:#x}", window);
        }
    }

    /// Drains the helper connection; `Some` once `property` of `window`
    /// received a new value.
    fn poll_property_change(&self, window: XWindow, property: Atom) -> Option<()> {
        let mut seen = false;
        while let Ok(Some(event)) = self.conn.poll_for_event() {
            if let Event::PropertyNotify(notify) = event {
                seen |= notify.window == window
                    && notify.atom == property
                    && notify.state == Property::NEW_VALUE;
            }
        }
        seen.then_some(())
    }
}

//=== Handles =============================================================

pub(super) fn window_id(window: &WinitWindow) -> Option<XWindow> {
    match window.window_handle().ok()?.as_raw() {
        RawWindowHandle::Xlib(handle) => Some(handle.window as XWindow),
        RawWindowHandle::Xcb(handle) => Some(handle.window.get()),
        _ => None,
    }
}

//--- Property Round Trip -------------------------------------------------

/// Selects property notifications, sends `request` and waits for the
/// answer. The selection goes in first, or a window manager answering
/// quickly is missed. `None` if the request could not be sent.
fn property_round_trip<T>(
    mut select: impl FnMut(bool),
    request: impl FnOnce() -> bool,
    wait: impl FnOnce() -> T,
) -> Option<T> {
    select(true);
    let answer = request().then(wait);
    select(false);
    answer
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: i32, y: i32, width: u32, height: u32) -> Rect {
        Rect { x, y, width, height }
    }

    #[test]
    fn top_panel_becomes_top_inset() {
        let insets = work_area_insets(rect(0, 27, 1920, 1053), rect(0, 0, 1920, 1080));
        assert_eq!(insets, Insets::new(0, 0, 27, 0));
    }

    #[test]
    fn work_area_spanning_two_monitors_is_clipped() {
        let work_area = rect(0, 0, 3200, 1040);
        let right = rect(1920, 0, 1280, 1024);
        assert_eq!(work_area_insets(work_area, right), Insets::NONE);

        let left = rect(0, 0, 1920, 1080);
        assert_eq!(work_area_insets(work_area, left), Insets::new(0, 0, 0, 40));
    }

    #[test]
    fn disjoint_work_area_saturates() {
        let insets = work_area_insets(rect(5000, 0, 100, 100), rect(0, 0, 1920, 1080));
        assert_eq!(insets.left, 1920);
    }

    #[test]
    fn opacity_cardinal_endpoints() {
        assert_eq!(opacity_to_cardinal(0.0), 0);
        assert_eq!(opacity_to_cardinal(1.0), u32::MAX);
        assert!((cardinal_to_opacity(opacity_to_cardinal(0.25)) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn property_round_trip_selects_before_requesting() {
        let steps = std::cell::RefCell::new(Vec::new());
        let answer = property_round_trip(
            |enabled| steps.borrow_mut().push(if enabled { "select" } else { "deselect" }),
            || {
                steps.borrow_mut().push("request");
                true
            },
            || {
                steps.borrow_mut().push("wait");
                7
            },
        );
        assert_eq!(answer, Some(7));
        assert_eq!(*steps.borrow(), ["select", "request", "wait", "deselect"]);
    }

    #[test]
    fn unsent_request_skips_the_wait() {
        let mut waited = false;
        let answer = property_round_trip(|_| {}, || false, || waited = true);
        assert_eq!(answer, None);
        assert!(!waited);
    }
}
