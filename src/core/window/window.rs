//=========================================================================
// Window
//=========================================================================
//
// One native window plus the managers composed into it.
//
// Architecture:
// ```text
//   NativeContext::pump ──→ registry ──→ EventInbox (this window)
//                                             ↓
//   Window::update ── protocol filters ──→ InputManager
//                                      ──→ CursorManager
//                                      ──→ TouchManager
//                                      ──→ WindowEvents
// ```
//
// States: Created → {Shown ⇄ Hidden, Minimized ⇄ Normal ⇄ Maximized}
// → Closed. Closing is terminal and idempotent; afterwards every
// operation is a no-op and getters return the last known values.
//
// State getters query the OS live. Where the OS has no query (mobile
// minimized state, or a backend returning `None`) the state tracked
// from native events is used instead.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::time::Duration;

use log::{debug, info, warn};
use winit::raw_window_handle::{
    DisplayHandle, HandleError, HasDisplayHandle, HasWindowHandle, WindowHandle,
};

//=== Internal Dependencies ===============================================

use crate::core::cursor::CursorManager;
use crate::core::event::{Event, EventSource, SubscriptionId};
use crate::core::geometry::{Vector2Int, Vector2UInt};
use crate::core::input::InputManager;
use crate::core::platform_bridge::{
    BackendProfile, BackendType, EventInbox, NativeWindow, NativeWindowParts,
};
use crate::core::screen::ScreenOrientation;
use crate::core::touch::TouchManager;

use super::create_info::WindowCreateInfo;
use super::event::{WindowEvents, WindowMaximizeEvent, WindowResizeEvent};

//=== WindowSettings ======================================================

/// Context-wide knobs every window is created with.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WindowSettings {
    pub(crate) max_events_per_frame: usize,
    pub(crate) key_repeat_threshold: Duration,
}

//=== TrackedState ========================================================

/// State reconstructed from native events.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct TrackedState {
    pub(super) minimized: bool,
    pub(super) maximized: bool,
    pub(super) focused: bool,
    pub(super) hidden: bool,
}

//=== Window ==============================================================

pub struct Window {
    pub(super) native: Box<dyn NativeWindow>,
    pub(super) inbox: EventInbox,
    pub(super) profile: BackendProfile,
    pub(super) key_repeat_threshold: Duration,

    pub(super) input: InputManager,
    pub(super) cursor: Option<CursorManager>,
    pub(super) touch: Option<TouchManager>,
    pub(super) events: WindowEvents,

    pub(super) title: String,
    pub(super) position: Vector2Int,
    pub(super) size: Vector2UInt,
    pub(super) opacity: f32,
    pub(super) resizable: bool,
    pub(super) allowed_orientations: ScreenOrientation,

    pub(super) state: TrackedState,
    pub(super) closed: bool,
    /// Set for the frame following a show; Win32 synthetic geometry
    /// notifications arrive then.
    pub(super) just_shown: bool,
    /// `maximize && hide` at creation: applied on first `show()`.
    pub(super) deferred_maximize: bool,
}

impl Window {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(
        parts: NativeWindowParts,
        info: &WindowCreateInfo,
        profile: BackendProfile,
        settings: WindowSettings,
        deferred_maximize: bool,
    ) -> Self {
        let NativeWindowParts { window: native, inbox } = parts;
        let size = native.size();

        let cursor = if profile.has_cursor {
            match native.cursor() {
                Some(cursor) => Some(CursorManager::new(cursor, profile.origin, size)),
                None => {
                    warn!(target: "platform::cursor", "{} window '{}' exposes no cursor control", profile.backend, info.title);
                    None
                }
            }
        } else {
            None
        };

        let state = TrackedState {
            minimized: false,
            maximized: native.is_maximized().unwrap_or(info.maximize && !deferred_maximize),
            focused: native.is_focused().unwrap_or(!info.hide),
            hidden: info.hide,
        };

        info!(
            target: "platform",
            "Created {} window '{}' ({}x{})",
            profile.backend, info.title, size.x, size.y
        );

        Self {
            position: native.position(),
            opacity: native.opacity(),
            native,
            inbox: EventInbox::new(inbox, settings.max_events_per_frame),
            profile,
            key_repeat_threshold: settings.key_repeat_threshold,
            input: InputManager::new(),
            cursor,
            touch: profile.has_touch.then(TouchManager::new),
            events: WindowEvents::default(),
            title: info.title.clone(),
            size,
            resizable: info.resizable,
            allowed_orientations: info.allowed_orientations,
            state,
            closed: false,
            just_shown: false,
            deferred_maximize,
        }
    }

    //=====================================================================
    // Frame
    //=====================================================================

    /// Advances the managers one frame and drains this window's share of
    /// the native queue. Call after `PlatformContext::update`.
    pub fn update(&mut self) {
        if self.closed {
            return;
        }

        self.input.update();
        if let Some(cursor) = &mut self.cursor {
            cursor.update();
        }
        if let Some(touch) = &mut self.touch {
            touch.update();
        }

        self.drain_inbox();
        if self.inbox.is_disconnected() && !self.closed {
            warn!(target: "platform", "Event route of window '{}' is gone; closing", self.title);
            self.close();
        }
        if self.closed {
            return;
        }

        let focused = self.is_focused();
        if let Some(cursor) = &mut self.cursor {
            cursor.post_update(focused);
        }
        self.just_shown = false;
    }

    //=====================================================================
    // Lifecycle
    //=====================================================================

    pub fn minimize(&mut self) {
        if self.closed {
            return;
        }
        if self.profile.is_mobile() {
            warn!(target: "platform", "{} windows cannot be minimized programmatically", self.profile.backend);
            return;
        }
        self.native.minimize();
    }

    /// Maximizes a resizable window; a no-op otherwise.
    pub fn maximize(&mut self) {
        if self.closed {
            return;
        }
        if !self.resizable {
            debug!(target: "platform", "Ignoring maximize of non-resizable window '{}'", self.title);
            return;
        }
        self.native.maximize();
    }

    pub fn show(&mut self) {
        if self.closed {
            return;
        }

        self.native.show();
        self.state.hidden = false;
        self.just_shown = self.profile.suppress_synthetic_show_events;

        if self.deferred_maximize {
            self.deferred_maximize = false;
            self.native.maximize();
            self.state.maximized = true;
            self.size = self.native.size();
            self.sync_cursor_client_size();

            self.events.emit(WindowMaximizeEvent);
            self.events.emit(WindowResizeEvent { size: self.size });
        }
    }

    pub fn hide(&mut self) {
        if self.closed {
            return;
        }
        self.native.hide();
        self.state.hidden = true;
    }

    pub fn focus(&mut self) {
        if self.closed {
            return;
        }
        self.native.focus();
    }

    /// Releases the native window. Idempotent.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }

        self.closed = true;
        self.native.close();
        info!(target: "platform", "Closed {} window '{}'", self.profile.backend, self.title);
    }

    //=====================================================================
    // Setters
    //=====================================================================

    pub fn set_title(&mut self, title: &str) {
        if self.closed {
            return;
        }
        self.title = title.to_owned();
        self.native.set_title(title);
    }

    /// Moves the client area's bottom-left corner to `position`.
    pub fn set_position(&mut self, position: Vector2Int) {
        if self.closed {
            return;
        }
        if !self.profile.supports_positioning {
            warn!(target: "platform", "{} windows cannot be positioned", self.profile.backend);
            return;
        }
        self.native.set_position(position);
    }

    pub fn set_size(&mut self, size: Vector2UInt) {
        if self.closed {
            return;
        }
        if size.x == 0 || size.y == 0 {
            warn!(target: "platform", "Ignoring zero window size {:?}", size);
            return;
        }
        self.native.set_size(size);
    }

    /// Sets window opacity, clamped to `0.0..=1.0`.
    pub fn set_opacity(&mut self, opacity: f32) {
        if self.closed {
            return;
        }
        if !self.profile.supports_opacity {
            warn!(target: "platform", "{} windows do not support opacity", self.profile.backend);
            return;
        }

        let opacity = opacity.clamp(0.0, 1.0);
        self.native.set_opacity(opacity);
        self.opacity = opacity;
    }

    //=====================================================================
    // Getters
    //=====================================================================

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn position(&self) -> Vector2Int {
        if self.closed {
            return self.position;
        }
        self.native.position()
    }

    pub fn size(&self) -> Vector2UInt {
        if self.closed {
            return self.size;
        }
        self.native.size()
    }

    pub fn framebuffer_size(&self) -> Vector2UInt {
        if self.closed {
            return self.size;
        }
        self.native.framebuffer_size()
    }

    pub fn opacity(&self) -> f32 {
        if self.closed {
            return self.opacity;
        }
        self.native.opacity()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_minimized(&self) -> bool {
        if self.closed || self.profile.tracks_minimized_manually {
            return self.state.minimized;
        }
        self.native.is_minimized().unwrap_or(self.state.minimized)
    }

    pub fn is_maximized(&self) -> bool {
        if self.closed {
            return self.state.maximized;
        }
        self.native.is_maximized().unwrap_or(self.state.maximized)
    }

    pub fn is_focused(&self) -> bool {
        if self.closed {
            return false;
        }
        self.native.is_focused().unwrap_or(self.state.focused)
    }

    pub fn is_hidden(&self) -> bool {
        if self.closed {
            return self.state.hidden;
        }
        self.native.is_visible().map(|visible| !visible).unwrap_or(self.state.hidden)
    }

    pub fn is_resizable(&self) -> bool {
        self.resizable
    }

    pub fn allowed_orientations(&self) -> ScreenOrientation {
        self.allowed_orientations
    }

    pub fn backend_type(&self) -> BackendType {
        self.profile.backend
    }

    //=====================================================================
    // Capabilities
    //=====================================================================

    pub fn input_manager(&self) -> Option<&InputManager> {
        Some(&self.input)
    }

    pub fn input_manager_mut(&mut self) -> Option<&mut InputManager> {
        Some(&mut self.input)
    }

    /// `None` on touch-only backends.
    pub fn cursor_manager(&self) -> Option<&CursorManager> {
        self.cursor.as_ref()
    }

    pub fn cursor_manager_mut(&mut self) -> Option<&mut CursorManager> {
        self.cursor.as_mut()
    }

    /// `None` on desktop backends.
    pub fn touch_manager(&self) -> Option<&TouchManager> {
        self.touch.as_ref()
    }

    pub fn touch_manager_mut(&mut self) -> Option<&mut TouchManager> {
        self.touch.as_mut()
    }

    //=====================================================================
    // Listeners
    //=====================================================================

    pub fn add_event_listener<E: Event>(
        &mut self,
        callback: impl FnMut(&E) -> bool + 'static,
    ) -> SubscriptionId
    where
        WindowEvents: EventSource<E>,
    {
        self.events.dispatcher_mut().subscribe(callback)
    }

    pub fn remove_event_listener<E: Event>(&mut self, id: SubscriptionId) -> bool
    where
        WindowEvents: EventSource<E>,
    {
        self.events.dispatcher_mut().unsubscribe(id)
    }

    //--- Internal Helpers -------------------------------------------------

    pub(super) fn sync_cursor_client_size(&mut self) {
        if let Some(cursor) = &mut self.cursor {
            cursor.set_client_size(self.size);
        }
    }
}

//=== Trait Implementations ===============================================

impl Drop for Window {
    fn drop(&mut self) {
        self.close();
    }
}

impl HasWindowHandle for Window {
    fn window_handle(&self) -> Result<WindowHandle<'_>, HandleError> {
        if self.closed {
            return Err(HandleError::Unavailable);
        }
        self.native.window_handle()
    }
}

impl HasDisplayHandle for Window {
    fn display_handle(&self) -> Result<DisplayHandle<'_>, HandleError> {
        if self.closed {
            return Err(HandleError::Unavailable);
        }
        self.native.display_handle()
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("backend", &self.profile.backend)
            .field("title", &self.title)
            .field("closed", &self.closed)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::{HeadlessConfig, HeadlessDriver};
    use crate::platform::{BackendSelection, PlatformContext};

    fn open(backend: BackendType, info: WindowCreateInfo) -> (PlatformContext, HeadlessDriver, Window) {
        let mut context = PlatformContext::builder()
            .with_backend(BackendSelection::Headless(HeadlessConfig::new(backend)))
            .build()
            .unwrap();
        let driver = context.headless_driver().unwrap();
        let window = context.create_window(&info).unwrap();
        (context, driver, window)
    }

    fn desktop() -> (PlatformContext, HeadlessDriver, Window) {
        open(BackendType::X11, WindowCreateInfo::new("Main").with_size(640, 480))
    }

    #[test]
    fn close_is_idempotent_and_terminal() {
        let (_context, driver, mut window) = desktop();
        let id = driver.last_window().unwrap();

        window.set_title("Renamed");
        window.close();
        window.close();
        window.set_title("Ignored");
        window.minimize();

        assert!(window.is_closed());
        assert_eq!(window.title(), "Renamed");
        assert!(driver.windows().is_empty());
        assert!(!driver.state(id).unwrap().minimized);
    }

    #[test]
    fn severed_event_route_closes_the_window() {
        let (_context, driver, mut window) = desktop();
        let id = driver.last_window().unwrap();

        driver.sever(id);
        window.update();

        assert!(window.is_closed());
        assert!(driver.state(id).unwrap().closed);
    }

    #[test]
    fn getters_report_last_known_values_after_close() {
        let (_context, _driver, mut window) = desktop();
        let size = window.size();
        window.close();

        assert_eq!(window.size(), size);
        assert_eq!(window.framebuffer_size(), size);
        assert!(!window.is_focused());
        assert_eq!(window.opacity(), 1.0);
        assert!(window.window_handle().is_err());
    }

    #[test]
    fn opacity_is_clamped() {
        let (_context, driver, mut window) = desktop();
        let id = driver.last_window().unwrap();

        window.set_opacity(1.5);
        assert_eq!(window.opacity(), 1.0);

        window.set_opacity(-0.5);
        assert_eq!(driver.state(id).unwrap().opacity, 0.0);
    }

    #[test]
    fn mobile_windows_ignore_desktop_only_requests() {
        let (_context, driver, mut window) =
            open(BackendType::Activity, WindowCreateInfo::new("Phone").with_size(1080, 1920));
        let id = driver.last_window().unwrap();
        let before = driver.state(id).unwrap();

        window.set_opacity(0.5);
        window.set_position(Vector2Int::new(10, 10));
        window.minimize();

        assert_eq!(driver.state(id).unwrap(), before);
        assert!(window.cursor_manager().is_none());
        assert!(window.touch_manager().is_some());
    }

    #[test]
    fn maximize_requires_resizable() {
        let info = WindowCreateInfo::new("Fixed").with_size(320, 240).with_resizable(false);
        let (_context, driver, mut window) = open(BackendType::Win32, info);

        window.maximize();
        assert!(!window.is_maximized());
        assert!(!driver.state(driver.last_window().unwrap()).unwrap().maximized);
    }

    #[test]
    fn zero_size_request_is_ignored() {
        let (_context, _driver, mut window) = desktop();
        window.set_size(Vector2UInt::new(0, 100));
        assert_eq!(window.size(), Vector2UInt::new(640, 480));

        window.set_size(Vector2UInt::new(800, 600));
        assert_eq!(window.size(), Vector2UInt::new(800, 600));
    }

    #[test]
    fn dropping_the_window_releases_it() {
        let (_context, driver, window) = desktop();
        drop(window);
        assert!(driver.windows().is_empty());
    }
}
