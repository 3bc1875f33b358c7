//=========================================================================
// Winit Window
//=========================================================================
//
// `NativeWindow` over a winit window.
//
// The context keeps only a weak reference for event bookkeeping; this
// wrapper owns the strong one, so `close` destroys the OS window.
//
// Geometry crosses two conversions: winit's Y-down virtual screen to
// Y-up desktop space (`DesktopFrame`), and client area to outer frame
// when positioning (winit moves the outer frame).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::Cell;
use std::rc::Rc;
use std::sync::{Arc, Weak};
use std::time::Duration;

use log::{debug, warn};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::raw_window_handle::{
    DisplayHandle, HandleError, HasDisplayHandle, HasWindowHandle, WindowHandle,
};
use winit::window::Window as OsWindow;

//=== Internal Dependencies ===============================================

use crate::core::geometry::{Vector2, Vector2Int, Vector2UInt};
use crate::core::platform_bridge::{NativeCursor, NativeWindow};

use super::monitor::DesktopFrame;

#[cfg(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))]
use super::x11::X11Support;
#[cfg(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))]
use crate::core::geometry::Insets;

//=== X11Binding ==========================================================

/// EWMH side of an X11 window.
#[cfg(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))]
pub(super) struct X11Binding {
    pub(super) support: Rc<X11Support>,
    pub(super) xid: u32,
    /// Decorations probed at creation.
    pub(super) extents: Insets,
}

//=== WinitWindow =========================================================

pub(super) struct WinitWindow {
    window: Option<Arc<OsWindow>>,
    desktop: Rc<Cell<DesktopFrame>>,
    round_trip_timeout: Duration,
    /// Last applied opacity; answers when the OS has no query.
    opacity: f32,
    #[cfg(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))]
    x11: Option<X11Binding>,
}

impl WinitWindow {
    pub(super) fn new(
        window: Arc<OsWindow>,
        desktop: Rc<Cell<DesktopFrame>>,
        round_trip_timeout: Duration,
    ) -> Self {
        Self {
            window: Some(window),
            desktop,
            round_trip_timeout,
            opacity: 1.0,
            #[cfg(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))]
            x11: None,
        }
    }

    #[cfg(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))]
    pub(super) fn with_x11(mut self, binding: Option<X11Binding>) -> Self {
        self.x11 = binding;
        self
    }

    fn os(&self) -> Option<&OsWindow> {
        self.window.as_deref()
    }

    /// Offset of the client area's top-left corner inside the outer frame.
    fn decoration_offset(&self, window: &OsWindow) -> Vector2Int {
        #[cfg(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))]
        if let Some(binding) = &self.x11 {
            return Vector2Int::new(binding.extents.left as i32, binding.extents.top as i32);
        }

        match (window.inner_position(), window.outer_position()) {
            (Ok(inner), Ok(outer)) => Vector2Int::new(inner.x - outer.x, inner.y - outer.y),
            _ => Vector2Int::ZERO,
        }
    }

    //--- Opacity ----------------------------------------------------------

    #[cfg(target_os = "windows")]
    fn apply_opacity(&self, window: &OsWindow, opacity: f32) {
        match super::win32::hwnd(window) {
            Some(hwnd) => super::win32::set_opacity(hwnd, opacity),
            None => warn!(target: "platform::win32", "No HWND behind window; opacity ignored"),
        }
    }

    #[cfg(target_os = "windows")]
    fn query_opacity(&self, window: &OsWindow) -> Option<f32> {
        super::win32::hwnd(window).and_then(super::win32::opacity)
    }

    #[cfg(target_os = "macos")]
    fn apply_opacity(&self, window: &OsWindow, opacity: f32) {
        super::cocoa::set_alpha(window, opacity);
    }

    #[cfg(target_os = "macos")]
    fn query_opacity(&self, window: &OsWindow) -> Option<f32> {
        super::cocoa::alpha(window)
    }

    #[cfg(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))]
    fn apply_opacity(&self, _window: &OsWindow, opacity: f32) {
        match &self.x11 {
            Some(binding) => binding.support.set_opacity(binding.xid, opacity),
            None => warn!(target: "platform::x11", "No X11 helper connection; opacity ignored"),
        }
    }

    #[cfg(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))]
    fn query_opacity(&self, _window: &OsWindow) -> Option<f32> {
        let binding = self.x11.as_ref()?;
        binding.support.opacity(binding.xid)
    }

    #[cfg(target_os = "android")]
    fn apply_opacity(&self, _window: &OsWindow, _opacity: f32) {
        warn!(target: "platform", "Window opacity is not supported on this backend");
    }

    #[cfg(target_os = "android")]
    fn query_opacity(&self, _window: &OsWindow) -> Option<f32> {
        None
    }

    //--- Window Manager Gates ---------------------------------------------

    #[cfg(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))]
    fn can_maximize(&self) -> bool {
        self.x11.as_ref().map_or(true, |binding| binding.support.supports_maximize())
    }

    #[cfg(not(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android")))))]
    fn can_maximize(&self) -> bool {
        true
    }

    #[cfg(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))]
    fn can_focus(&self) -> bool {
        self.x11.as_ref().map_or(true, |binding| binding.support.supports_focus())
    }

    #[cfg(not(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android")))))]
    fn can_focus(&self) -> bool {
        true
    }

    #[cfg(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))]
    fn request_maximize(&self, window: &OsWindow) {
        match &self.x11 {
            Some(binding) => binding.support.await_state_change(binding.xid, self.round_trip_timeout, || {
                window.set_maximized(true)
            }),
            None => window.set_maximized(true),
        }
    }

    #[cfg(not(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android")))))]
    fn request_maximize(&self, window: &OsWindow) {
        window.set_maximized(true);
        debug!(target: "platform", "Maximize requested; bounded by {:?}", self.round_trip_timeout);
    }
}

impl NativeWindow for WinitWindow {
    fn set_title(&mut self, title: &str) {
        if let Some(window) = self.os() {
            window.set_title(title);
        }
    }

    fn position(&self) -> Vector2Int {
        let Some(window) = self.os() else {
            return Vector2Int::ZERO;
        };
        let top_left = window
            .inner_position()
            .map(|position| Vector2Int::new(position.x, position.y))
            .unwrap_or(Vector2Int::ZERO);
        self.desktop.get().to_desktop(top_left, window.inner_size().height)
    }

    fn set_position(&mut self, position: Vector2Int) {
        let Some(window) = self.os() else {
            return;
        };
        let client = self.desktop.get().to_native(position, window.inner_size().height);
        let offset = self.decoration_offset(window);
        window.set_outer_position(PhysicalPosition::new(client.x - offset.x, client.y - offset.y));
    }

    fn size(&self) -> Vector2UInt {
        self.os()
            .map(|window| {
                let size = window.inner_size();
                Vector2UInt::new(size.width, size.height)
            })
            .unwrap_or(Vector2UInt::ZERO)
    }

    fn set_size(&mut self, size: Vector2UInt) {
        if let Some(window) = self.os() {
            let _ = window.request_inner_size(PhysicalSize::new(size.x, size.y));
        }
    }

    fn framebuffer_size(&self) -> Vector2UInt {
        // Inner sizes are already physical pixels.
        self.size()
    }

    fn opacity(&self) -> f32 {
        self.os()
            .and_then(|window| self.query_opacity(window))
            .unwrap_or(self.opacity)
    }

    fn set_opacity(&mut self, opacity: f32) {
        if let Some(window) = self.os() {
            self.apply_opacity(window, opacity);
        }
        self.opacity = opacity;
    }

    fn minimize(&mut self) {
        if let Some(window) = self.os() {
            window.set_minimized(true);
        }
    }

    fn maximize(&mut self) {
        if !self.can_maximize() {
            return;
        }
        if let Some(window) = self.os() {
            self.request_maximize(window);
        }
    }

    fn show(&mut self) {
        if let Some(window) = self.os() {
            window.set_visible(true);
        }
    }

    fn hide(&mut self) {
        if let Some(window) = self.os() {
            window.set_visible(false);
        }
    }

    fn focus(&mut self) {
        if !self.can_focus() {
            return;
        }
        if let Some(window) = self.os() {
            window.focus_window();
        }
    }

    fn is_minimized(&self) -> Option<bool> {
        self.os()?.is_minimized()
    }

    fn is_maximized(&self) -> Option<bool> {
        self.os().map(OsWindow::is_maximized)
    }

    fn is_focused(&self) -> Option<bool> {
        self.os().map(OsWindow::has_focus)
    }

    fn is_visible(&self) -> Option<bool> {
        self.os()?.is_visible()
    }

    fn cursor(&self) -> Option<Box<dyn NativeCursor>> {
        let window = self.window.as_ref()?;
        Some(Box::new(WinitCursor {
            window: Arc::downgrade(window),
            warned: false,
        }))
    }

    fn window_handle(&self) -> Result<WindowHandle<'_>, HandleError> {
        self.os().ok_or(HandleError::Unavailable)?.window_handle()
    }

    fn display_handle(&self) -> Result<DisplayHandle<'_>, HandleError> {
        self.os().ok_or(HandleError::Unavailable)?.display_handle()
    }

    fn close(&mut self) {
        if let Some(window) = self.window.take() {
            debug!(target: "platform", "Destroying native window {:?}", window.id());
        }
    }
}

//=== WinitCursor =========================================================

struct WinitCursor {
    window: Weak<OsWindow>,
    /// Warp failures are reported once per cursor.
    warned: bool,
}

impl NativeCursor for WinitCursor {
    fn set_visible(&mut self, visible: bool) {
        if let Some(window) = self.window.upgrade() {
            window.set_cursor_visible(visible);
        }
    }

    fn warp(&mut self, position: Vector2) {
        let Some(window) = self.window.upgrade() else {
            return;
        };
        let target = PhysicalPosition::new(f64::from(position.x), f64::from(position.y));
        if let Err(err) = window.set_cursor_position(target) {
            if !self.warned {
                warn!(target: "platform::cursor", "Cannot warp the cursor: {}", err);
                self.warned = true;
            }
        }
    }
}
