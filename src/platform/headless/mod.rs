//=========================================================================
// Headless Backend
//
// In-process window system used when no display server is available and
// by the test suite.
//
// Architecture:
// ```text
//   HeadlessDriver ──send()/broadcast()──→ pending queue
//                                               ↓ pump()
//   HeadlessContext ── WindowRegistry ──→ window inboxes
//        ↑                                       ↓
//   HeadlessWindow (native requests)      Window::update
// ```
//
// Responsibilities:
// - Emulate the protocol of any `BackendType`, quirks included, so the
//   routing layer can be exercised without a real OS
// - Let the driver inject native events, replace the monitor layout and
//   inspect what the "OS" believes about each window
//
// Notes:
// Injected events are delivered on the next `PlatformContext::update`,
// the same way a real backend hands over its queue once per frame.
//
//=========================================================================

//=== Module Declarations =================================================

mod window;

//=== Public API ==========================================================

pub use window::HeadlessWindowState;

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::error::PlatformError;
use crate::core::geometry::{Vector2Int, Vector2UInt};
use crate::core::platform_bridge::{
    BackendProfile, BackendType, NativeContext, NativeEvent, NativeWindowParts, WindowRegistry,
};
use crate::core::screen::{Screen, ScreenInfo};
use crate::core::window::WindowCreateInfo;

use window::HeadlessWindow;

//=== HeadlessConfig ======================================================

/// Setup of the emulated window system.
///
/// # Default Values
///
/// - **Backend**: `BackendType::Headless` (no protocol quirks)
/// - **Screens**: one 1920x1080 screen at the desktop origin
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessConfig {
    /// Backend whose protocol is emulated.
    pub backend: BackendType,
    pub screens: Vec<ScreenInfo>,
}

impl HeadlessConfig {
    pub fn new(backend: BackendType) -> Self {
        Self { backend, ..Self::default() }
    }

    /// Replaces the monitor layout; the first screen is the primary.
    ///
    /// # Panics
    ///
    /// Panics if `screens` is empty.
    pub fn with_screens(mut self, screens: Vec<ScreenInfo>) -> Self {
        assert!(!screens.is_empty(), "a headless display needs at least one screen");
        self.screens = screens;
        self
    }
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            backend: BackendType::Headless,
            screens: vec![ScreenInfo::new("Headless", Vector2Int::ZERO, Vector2UInt::new(1920, 1080))],
        }
    }
}

//=== HeadlessWindowId ====================================================

/// Native key of a headless window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HeadlessWindowId(u64);

//=== Shared State ========================================================

enum Pending {
    Window(HeadlessWindowId, NativeEvent),
    Broadcast(NativeEvent),
}

pub(super) struct HeadlessShared {
    profile: BackendProfile,
    registry: WindowRegistry<HeadlessWindowId>,
    windows: BTreeMap<HeadlessWindowId, HeadlessWindowState>,
    screens: Vec<ScreenInfo>,
    pending: VecDeque<Pending>,
    next_id: u64,
    pumps: u64,
}

impl HeadlessShared {
    fn queue(&mut self, id: HeadlessWindowId, event: NativeEvent) {
        self.pending.push_back(Pending::Window(id, event));
    }

    /// Work area of the primary screen, in desktop coordinates.
    fn primary_work_area(&self) -> (Vector2Int, Vector2UInt) {
        match self.screens.first() {
            Some(info) => {
                let screen = Screen::new(info.clone(), self.profile.backend);
                (screen.work_area_origin(), screen.work_area_size())
            }
            None => (Vector2Int::ZERO, Vector2UInt::ZERO),
        }
    }
}

//=== HeadlessContext =====================================================

pub(crate) struct HeadlessContext {
    shared: Rc<RefCell<HeadlessShared>>,
}

impl HeadlessContext {
    pub(crate) fn new(config: HeadlessConfig) -> (Self, HeadlessDriver) {
        let shared = Rc::new(RefCell::new(HeadlessShared {
            profile: BackendProfile::for_backend(config.backend),
            registry: WindowRegistry::new(),
            windows: BTreeMap::new(),
            screens: config.screens,
            pending: VecDeque::new(),
            next_id: 1,
            pumps: 0,
        }));

        debug!(target: "platform", "Headless display emulating {}", config.backend);
        let driver = HeadlessDriver { shared: Rc::clone(&shared) };
        (Self { shared }, driver)
    }
}

impl NativeContext for HeadlessContext {
    fn profile(&self) -> BackendProfile {
        self.shared.borrow().profile
    }

    fn create_window(&mut self, info: &WindowCreateInfo) -> Result<NativeWindowParts, PlatformError> {
        let mut shared = self.shared.borrow_mut();
        let id = HeadlessWindowId(shared.next_id);
        shared.next_id += 1;

        let (work_origin, work_size) = shared.primary_work_area();
        let (position, size) = if info.maximize {
            (work_origin, work_size)
        } else {
            let size = Vector2UInt::new(info.width, info.height);
            let centred = Vector2Int::new(
                work_origin.x + (i64::from(work_size.x) - i64::from(size.x)).max(0) as i32 / 2,
                work_origin.y + (i64::from(work_size.y) - i64::from(size.y)).max(0) as i32 / 2,
            );
            (centred, size)
        };

        shared.windows.insert(
            id,
            HeadlessWindowState {
                title: info.title.clone(),
                position,
                size,
                opacity: 1.0,
                visible: !info.hide,
                minimized: false,
                maximized: info.maximize,
                focused: !info.hide,
                cursor_visible: true,
                cursor_warps: Vec::new(),
                closed: false,
            },
        );
        let inbox = shared.registry.register(id);
        drop(shared);

        Ok(NativeWindowParts {
            window: Box::new(HeadlessWindow { id, shared: Rc::clone(&self.shared) }),
            inbox,
        })
    }

    fn pump(&mut self) {
        let mut shared = self.shared.borrow_mut();
        shared.pumps += 1;

        while let Some(pending) = shared.pending.pop_front() {
            match pending {
                Pending::Window(id, event) => {
                    shared.registry.route(id, event);
                }
                Pending::Broadcast(event) => shared.registry.broadcast(&event),
            }
        }
    }

    fn screens(&self) -> Vec<ScreenInfo> {
        self.shared.borrow().screens.clone()
    }
}

//=== HeadlessDriver ======================================================

/// Test-side handle onto the emulated window system.
///
/// Obtained from `PlatformContext::headless_driver`; clones share state.
#[derive(Clone)]
pub struct HeadlessDriver {
    shared: Rc<RefCell<HeadlessShared>>,
}

impl HeadlessDriver {
    /// Queues a native event for one window.
    pub fn send(&self, window: HeadlessWindowId, event: NativeEvent) {
        self.shared.borrow_mut().queue(window, event);
    }

    /// Queues a native event for every open window (app lifecycle).
    pub fn broadcast(&self, event: NativeEvent) {
        self.shared.borrow_mut().pending.push_back(Pending::Broadcast(event));
    }

    /// Replaces the monitor layout, as a hot-plug or rotation would.
    pub fn set_screens(&self, screens: Vec<ScreenInfo>) {
        self.shared.borrow_mut().screens = screens;
    }

    /// Ids of windows that have not been closed, oldest first.
    pub fn windows(&self) -> Vec<HeadlessWindowId> {
        let shared = self.shared.borrow();
        shared.windows.iter().filter(|(_, state)| !state.closed).map(|(id, _)| *id).collect()
    }

    /// Most recently created window, closed or not.
    pub fn last_window(&self) -> Option<HeadlessWindowId> {
        self.shared.borrow().windows.keys().next_back().copied()
    }

    pub fn state(&self, window: HeadlessWindowId) -> Option<HeadlessWindowState> {
        self.shared.borrow().windows.get(&window).cloned()
    }

    /// Drops the event route of `window` without closing it, as a native
    /// side that went away underneath the window would.
    pub fn sever(&self, window: HeadlessWindowId) {
        self.shared.borrow_mut().registry.unregister(window);
    }

    /// Number of times the context has pumped.
    pub fn pump_count(&self) -> u64 {
        self.shared.borrow().pumps
    }

    /// Events queued but not yet pumped.
    pub fn pending(&self) -> usize {
        self.shared.borrow().pending.len()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::Key;
    use crate::core::platform_bridge::NativeWindow;
    use std::time::Instant;

    fn context(backend: BackendType) -> (HeadlessContext, HeadlessDriver) {
        HeadlessContext::new(HeadlessConfig::new(backend))
    }

    #[test]
    fn windows_are_centred_in_the_primary_work_area() {
        let (mut context, driver) = context(BackendType::Headless);
        let _parts = context.create_window(&WindowCreateInfo::new("A").with_size(920, 480)).unwrap();

        let state = driver.state(driver.last_window().unwrap()).unwrap();
        assert_eq!(state.position, Vector2Int::new(500, 300));
        assert_eq!(state.size, Vector2UInt::new(920, 480));
        assert!(state.visible);
    }

    #[test]
    fn maximized_windows_fill_the_work_area() {
        let config = HeadlessConfig::default().with_screens(vec![ScreenInfo::new(
            "Desk",
            Vector2Int::ZERO,
            Vector2UInt::new(1920, 1080),
        )
        .with_reserved(crate::core::geometry::Insets::new(0, 0, 0, 40))]);
        let (mut context, driver) = HeadlessContext::new(config);

        let _parts = context
            .create_window(&WindowCreateInfo::new("Max").with_resizable(true).with_maximize(true))
            .unwrap();

        let state = driver.state(driver.last_window().unwrap()).unwrap();
        assert_eq!(state.size, Vector2UInt::new(1920, 1040));
        assert_eq!(state.position, Vector2Int::new(0, 40));
    }

    #[test]
    fn injected_events_arrive_on_pump() {
        let (mut context, driver) = context(BackendType::X11);
        let parts = context.create_window(&WindowCreateInfo::new("A")).unwrap();
        let id = driver.last_window().unwrap();

        driver.send(id, NativeEvent::key_press(Key::A, Instant::now()));
        assert!(parts.inbox.try_recv().is_err());
        assert_eq!(driver.pending(), 1);

        context.pump();
        assert!(matches!(parts.inbox.try_recv(), Ok(NativeEvent::KeyPress { key: Key::A, .. })));
        assert_eq!(driver.pump_count(), 1);
    }

    #[test]
    fn broadcast_reaches_every_window() {
        let (mut context, driver) = context(BackendType::Activity);
        let first = context.create_window(&WindowCreateInfo::new("A")).unwrap();
        let second = context.create_window(&WindowCreateInfo::new("B")).unwrap();

        driver.broadcast(NativeEvent::Suspended);
        context.pump();

        assert!(matches!(first.inbox.try_recv(), Ok(NativeEvent::Suspended)));
        assert!(matches!(second.inbox.try_recv(), Ok(NativeEvent::Suspended)));
    }

    #[test]
    fn win32_show_emits_synthetic_geometry() {
        let (mut context, _driver) = context(BackendType::Win32);
        let mut parts = context.create_window(&WindowCreateInfo::new("A").with_hide(true)).unwrap();

        parts.window.show();
        context.pump();

        let events: Vec<_> = parts.inbox.try_iter().collect();
        assert!(matches!(events[0], NativeEvent::Visibility(true)));
        assert!(events.iter().any(|event| matches!(event, NativeEvent::Moved(_))));
        assert!(events.iter().any(|event| matches!(event, NativeEvent::Resized(_))));
    }

    #[test]
    fn mobile_profile_has_no_cursor_nor_minimized_query() {
        let (mut context, _driver) = context(BackendType::UIKit);
        let parts = context.create_window(&WindowCreateInfo::new("A")).unwrap();

        assert!(parts.window.cursor().is_none());
        assert_eq!(parts.window.is_minimized(), None);
    }

    #[test]
    fn closed_windows_leave_the_registry() {
        let (mut context, driver) = context(BackendType::Headless);
        let mut parts = context.create_window(&WindowCreateInfo::new("A")).unwrap();
        let id = driver.last_window().unwrap();

        parts.window.close();
        driver.send(id, NativeEvent::Focused(true));
        context.pump();

        assert!(driver.windows().is_empty());
        assert!(driver.state(id).unwrap().closed);
        assert!(parts.inbox.try_recv().is_err());
    }

    #[test]
    fn handles_are_unavailable() {
        let (mut context, _driver) = context(BackendType::Headless);
        let parts = context.create_window(&WindowCreateInfo::new("A")).unwrap();

        assert!(parts.window.window_handle().is_err());
        assert!(parts.window.display_handle().is_err());
    }
}
