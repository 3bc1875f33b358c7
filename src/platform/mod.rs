//=========================================================================
// Platform Subsystem
//
// Owns the native connection and turns it into windows and screens.
//
// Architecture:
// ```text
//  PlatformContextBuilder ──build()──> PlatformContext
//                                          │
//          ┌───────────────────────────────┼─────────────────────┐
//          │ create_window()               │ update()            │ screens
//          ↓                               ↓                     ↓
//   NativeContext::create_window    NativeContext::pump   Vec<Screen>
//          │                               │             (rebuilt on
//          ↓                               ↓              display change)
//       Window  ←── inbox ←── WindowRegistry
// ```
//
// Key Design Decisions:
// - **One backend per context**: the backend is picked once at build time
//   and hidden behind `NativeContext`; nothing else branches on the OS
// - **Pump before windows**: `update()` must run once per frame before
//   any `Window::update`, which then drains what the pump routed to it
// - **No global state**: each context owns its registry, so several
//   contexts (e.g. one per test) never interfere
//
// Responsibilities:
// - Select and open the backend (native winit driver or headless)
// - Validate and create windows, applying creation-time policies
// - Enumerate screens and keep them in sync with the display layout
//
//=========================================================================

//=== Submodules ==========================================================

pub mod headless;
mod round_trip;

#[cfg(any(
    target_os = "windows",
    target_os = "macos",
    target_os = "android",
    target_os = "linux",
    target_os = "freebsd",
    target_os = "dragonfly",
    target_os = "netbsd",
    target_os = "openbsd",
))]
mod winit;

//=== External Dependencies ===============================================

use std::fmt;
use std::time::{Duration, Instant};

use log::{debug, error, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::error::PlatformError;
use crate::core::geometry::Vector2Int;
use crate::core::platform_bridge::{BackendProfile, BackendType, NativeContext};
use crate::core::screen::{Screen, ScreenInfo, ScreenOrientation};
use crate::core::window::{Window, WindowCreateInfo, WindowSettings};

use headless::{HeadlessConfig, HeadlessContext, HeadlessDriver};

//=== BackendSelection ====================================================

/// Which window system a context talks to.
#[derive(Debug, Clone, Default)]
pub enum BackendSelection {
    /// The OS window system of the build target, driven through winit.
    #[default]
    Native,
    /// The in-process emulation; see [`headless`].
    Headless(HeadlessConfig),
}

//=== PlatformContextBuilder ==============================================

/// Builder for configuring and opening a [`PlatformContext`].
///
/// # Default Values
///
/// - **Backend**: native
/// - **Max events per frame**: 512 per window
/// - **Round-trip timeout**: 250 ms
/// - **Display poll interval**: 500 ms
/// - **Key repeat threshold**: 20 ms
///
/// # Examples
///
/// ```
/// use aetheric_windowing::prelude::*;
/// use std::time::Duration;
///
/// let context = PlatformContext::builder()
///     .with_backend(BackendSelection::Headless(HeadlessConfig::new(BackendType::X11)))
///     .with_key_repeat_threshold(Duration::from_millis(30))
///     .build()
///     .unwrap();
///
/// assert_eq!(context.backend_type(), BackendType::X11);
/// ```
pub struct PlatformContextBuilder {
    backend: BackendSelection,
    max_events_per_frame: usize,
    round_trip_timeout: Duration,
    display_poll_interval: Duration,
    key_repeat_threshold: Duration,
    #[cfg(target_os = "android")]
    android_app: Option<::winit::platform::android::activity::AndroidApp>,
}

impl PlatformContextBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            backend: BackendSelection::Native,
            max_events_per_frame: 512,
            round_trip_timeout: Duration::from_millis(250),
            display_poll_interval: Duration::from_millis(500),
            key_repeat_threshold: Duration::from_millis(20),
            #[cfg(target_os = "android")]
            android_app: None,
        }
    }

    pub fn with_backend(mut self, backend: BackendSelection) -> Self {
        self.backend = backend;
        self
    }

    /// Caps how many native events one window routes per frame. The
    /// rest stay queued for the next frame.
    ///
    /// Default: 512
    ///
    /// # Panics
    ///
    /// Panics if `max` is 0.
    pub fn with_max_events_per_frame(mut self, max: usize) -> Self {
        assert!(max > 0, "max events per frame must be positive, got {}", max);
        self.max_events_per_frame = max;
        self
    }

    /// Upper bound for native round-trips: window creation and X11
    /// frame-extents or maximize acknowledgements.
    ///
    /// Default: 250 ms
    ///
    /// # Panics
    ///
    /// Panics if `timeout` is zero.
    pub fn with_round_trip_timeout(mut self, timeout: Duration) -> Self {
        assert!(!timeout.is_zero(), "round-trip timeout must be non-zero");
        self.round_trip_timeout = timeout;
        self
    }

    /// Minimum time between two display-layout checks in `update()`.
    /// Zero checks every frame.
    ///
    /// Default: 500 ms
    pub fn with_display_poll_interval(mut self, interval: Duration) -> Self {
        self.display_poll_interval = interval;
        self
    }

    /// Largest gap between a release and the following press of the same
    /// key for the pair to count as OS auto-repeat.
    ///
    /// Default: 20 ms
    pub fn with_key_repeat_threshold(mut self, threshold: Duration) -> Self {
        self.key_repeat_threshold = threshold;
        self
    }

    /// Activity handle the native event loop is bound to. Required on
    /// Android.
    #[cfg(target_os = "android")]
    pub fn with_android_app(mut self, app: ::winit::platform::android::activity::AndroidApp) -> Self {
        self.android_app = Some(app);
        self
    }

    /// Opens the backend and enumerates its screens.
    pub fn build(mut self) -> Result<PlatformContext, PlatformError> {
        let settings = WindowSettings {
            max_events_per_frame: self.max_events_per_frame,
            key_repeat_threshold: self.key_repeat_threshold,
        };
        let display_poll_interval = self.display_poll_interval;

        let (native, driver): (Box<dyn NativeContext>, Option<HeadlessDriver>) =
            match std::mem::take(&mut self.backend) {
                BackendSelection::Headless(config) => {
                    let (context, driver) = HeadlessContext::new(config);
                    (Box::new(context), Some(driver))
                }
                BackendSelection::Native => (open_native(self)?, None),
            };

        PlatformContext::open(native, driver, settings, display_poll_interval)
    }
}

impl Default for PlatformContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//--- Native Backend Selection ---------------------------------------------

#[cfg(any(
    target_os = "windows",
    target_os = "macos",
    target_os = "android",
    target_os = "linux",
    target_os = "freebsd",
    target_os = "dragonfly",
    target_os = "netbsd",
    target_os = "openbsd",
))]
fn open_native(builder: PlatformContextBuilder) -> Result<Box<dyn NativeContext>, PlatformError> {
    let config = self::winit::NativeConfig {
        round_trip_timeout: builder.round_trip_timeout,
        #[cfg(target_os = "android")]
        android_app: builder.android_app,
    };
    let context = self::winit::WinitContext::new(config)?;
    Ok(Box::new(context))
}

#[cfg(not(any(
    target_os = "windows",
    target_os = "macos",
    target_os = "android",
    target_os = "linux",
    target_os = "freebsd",
    target_os = "dragonfly",
    target_os = "netbsd",
    target_os = "openbsd",
)))]
fn open_native(_builder: PlatformContextBuilder) -> Result<Box<dyn NativeContext>, PlatformError> {
    error!(target: "platform", "No native backend can be pumped per frame on this target");
    Err(PlatformError::Unsupported("native windowing on this target; use the headless backend"))
}

//=== PlatformContext =====================================================

/// Process-wide entry point: creates windows, owns screens and pumps the
/// native queue once per frame.
pub struct PlatformContext {
    native: Box<dyn NativeContext>,
    profile: BackendProfile,
    driver: Option<HeadlessDriver>,
    settings: WindowSettings,

    screens: Vec<Screen>,
    /// Layout the current `screens` were built from.
    layout: Vec<ScreenInfo>,
    display_poll_interval: Duration,
    last_display_poll: Instant,
}

impl PlatformContext {
    /// Opens the native backend with default settings.
    pub fn new() -> Result<Self, PlatformError> {
        PlatformContextBuilder::new().build()
    }

    pub fn builder() -> PlatformContextBuilder {
        PlatformContextBuilder::new()
    }

    fn open(
        native: Box<dyn NativeContext>,
        driver: Option<HeadlessDriver>,
        settings: WindowSettings,
        display_poll_interval: Duration,
    ) -> Result<Self, PlatformError> {
        let profile = native.profile();
        let layout = native.screens();

        if layout.is_empty() {
            error!(target: "platform", "{} reported no screens", profile.backend);
            return Err(PlatformError::DisplayUnavailable(format!(
                "{} reported no screens",
                profile.backend
            )));
        }

        let screens = build_screens(&layout, profile.backend);
        info!(
            target: "platform",
            "Opened {} platform context with {} screen(s)",
            profile.backend,
            screens.len()
        );

        Ok(Self {
            native,
            profile,
            driver,
            settings,
            screens,
            layout,
            display_poll_interval,
            last_display_poll: Instant::now(),
        })
    }

    //=====================================================================
    // Windows
    //=====================================================================

    /// Validates `info` and opens a native window.
    ///
    /// - `maximize` on a non-resizable window sizes it to the primary
    ///   screen's work area instead.
    /// - `maximize` together with `hide` is deferred to the first
    ///   `Window::show`.
    pub fn create_window(&mut self, info: &WindowCreateInfo) -> Result<Window, PlatformError> {
        info.validate()?;

        let mut native_info = info.clone();
        let mut deferred_maximize = false;
        let mut fill_work_area = false;

        if info.maximize && !info.resizable {
            let work_area = self.primary_screen().work_area_size();
            if work_area.x > 0 && work_area.y > 0 {
                native_info.width = work_area.x;
                native_info.height = work_area.y;
                fill_work_area = true;
            }
            native_info.maximize = false;
        } else if info.maximize && info.hide {
            native_info.maximize = false;
            deferred_maximize = true;
        }

        let mut parts = self.native.create_window(&native_info).map_err(|err| {
            error!(target: "platform", "Failed to create window '{}': {}", info.title, err);
            err
        })?;

        if fill_work_area && self.profile.supports_positioning {
            parts.window.set_position(self.primary_screen().work_area_origin());
        }
        if deferred_maximize {
            debug!(target: "platform", "Deferring maximize of '{}' until shown", info.title);
        }

        Ok(Window::new(parts, &native_info, self.profile, self.settings, deferred_maximize))
    }

    //=====================================================================
    // Frame
    //=====================================================================

    /// Pumps the native queue once and refreshes the screen list when the
    /// display layout changed. Call once per frame before updating windows.
    pub fn update(&mut self) {
        self.native.pump();

        if self.last_display_poll.elapsed() >= self.display_poll_interval {
            self.last_display_poll = Instant::now();
            self.refresh_screens();
        }
    }

    fn refresh_screens(&mut self) {
        let layout = self.native.screens();
        if layout == self.layout {
            return;
        }
        if layout.is_empty() {
            warn!(target: "platform::screen", "Display reported no screens; keeping the previous layout");
            return;
        }

        if self.profile.is_mobile() && self.is_rotation(&layout) {
            for (screen, info) in self.screens.iter_mut().zip(&layout) {
                if screen.size() == info.size {
                    continue;
                }
                let orientation = if info.orientation.is_concrete() {
                    info.orientation
                } else {
                    ScreenOrientation::from_extent(info.size.x, info.size.y)
                };
                screen.apply(info.clone());
                screen.register_screen_reorient(orientation);
                info!(target: "platform::screen", "Screen '{}' reoriented to {:?}", screen.name(), orientation);
            }
        } else {
            self.screens = build_screens(&layout, self.profile.backend);
            info!(
                target: "platform::screen",
                "Display configuration changed; reloaded {} screen(s)",
                self.screens.len()
            );
        }

        self.layout = layout;
    }

    /// Same monitors, at least one of them turned by a quarter.
    fn is_rotation(&self, layout: &[ScreenInfo]) -> bool {
        layout.len() == self.layout.len()
            && self
                .layout
                .iter()
                .zip(layout)
                .all(|(old, new)| old == new || new.is_rotation_of(old))
    }

    //=====================================================================
    // Screens
    //=====================================================================

    pub fn primary_screen(&self) -> &Screen {
        &self.screens[0]
    }

    pub fn screens(&self) -> &[Screen] {
        &self.screens
    }

    pub fn screen_mut(&mut self, index: usize) -> Option<&mut Screen> {
        self.screens.get_mut(index)
    }

    /// Screen containing the window's centre, or the primary screen.
    pub fn window_screen(&self, window: &Window) -> &Screen {
        let position = window.position();
        let size = window.size();
        let centre = Vector2Int::new(
            position.x.saturating_add((size.x / 2) as i32),
            position.y.saturating_add((size.y / 2) as i32),
        );

        self.screens
            .iter()
            .find(|screen| screen.contains(centre))
            .unwrap_or_else(|| self.primary_screen())
    }

    /// Screens matching `predicate`, in enumeration order.
    pub fn enumerate_screens(&self, mut predicate: impl FnMut(&Screen) -> bool) -> Vec<&Screen> {
        self.screens.iter().filter(|screen| predicate(screen)).collect()
    }

    //=====================================================================
    // Queries
    //=====================================================================

    pub fn backend_type(&self) -> BackendType {
        self.profile.backend
    }

    /// Handle onto the emulated window system, for headless contexts.
    pub fn headless_driver(&self) -> Option<HeadlessDriver> {
        self.driver.clone()
    }
}

impl fmt::Debug for PlatformContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformContext")
            .field("backend", &self.profile.backend)
            .field("screens", &self.screens.len())
            .finish_non_exhaustive()
    }
}

//--- Helpers --------------------------------------------------------------

fn build_screens(layout: &[ScreenInfo], backend: BackendType) -> Vec<Screen> {
    layout.iter().cloned().map(|info| Screen::new(info, backend)).collect()
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ConfigurationError;
    use crate::core::geometry::{Insets, Vector2UInt};
    use crate::core::screen::ScreenReorientEvent;
    use crate::core::window::{WindowMaximizeEvent, WindowResizeEvent};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn headless(config: HeadlessConfig) -> PlatformContext {
        PlatformContext::builder()
            .with_backend(BackendSelection::Headless(config))
            .with_display_poll_interval(Duration::ZERO)
            .build()
            .unwrap()
    }

    fn desk() -> ScreenInfo {
        ScreenInfo::new("Desk", Vector2Int::ZERO, Vector2UInt::new(1920, 1080))
            .with_reserved(Insets::new(0, 0, 0, 40))
    }

    fn side() -> ScreenInfo {
        ScreenInfo::new("Side", Vector2Int::new(1920, 0), Vector2UInt::new(1280, 1024))
    }

    //--- Builder ----------------------------------------------------------

    #[test]
    #[should_panic(expected = "max events per frame must be positive")]
    fn zero_max_events_per_frame_is_rejected() {
        PlatformContext::builder().with_max_events_per_frame(0);
    }

    #[test]
    #[should_panic(expected = "round-trip timeout must be non-zero")]
    fn zero_round_trip_timeout_is_rejected() {
        PlatformContext::builder().with_round_trip_timeout(Duration::ZERO);
    }

    #[test]
    fn headless_context_reports_emulated_backend() {
        let context = headless(HeadlessConfig::new(BackendType::Cocoa));
        assert_eq!(context.backend_type(), BackendType::Cocoa);
        assert!(context.headless_driver().is_some());
    }

    //--- Window Creation --------------------------------------------------

    #[test]
    fn invalid_create_info_creates_nothing() {
        let mut context = headless(HeadlessConfig::default());
        let driver = context.headless_driver().unwrap();

        let cases = [
            (WindowCreateInfo::new(""), ConfigurationError::EmptyTitle),
            (WindowCreateInfo::new("A").with_size(0, 10), ConfigurationError::ZeroWidth),
            (WindowCreateInfo::new("A").with_size(10, 0), ConfigurationError::ZeroHeight),
        ];

        for (info, expected) in cases {
            match context.create_window(&info) {
                Err(PlatformError::InvalidConfiguration(err)) => assert_eq!(err, expected),
                other => panic!("expected {:?}, got {:?}", expected, other),
            }
        }
        assert!(driver.last_window().is_none());
    }

    #[test]
    fn non_resizable_maximize_fills_the_work_area() {
        let mut context = headless(HeadlessConfig::default().with_screens(vec![desk()]));
        let window = context
            .create_window(&WindowCreateInfo::new("Fixed").with_maximize(true))
            .unwrap();

        assert_eq!(window.size(), Vector2UInt::new(1920, 1040));
        assert_eq!(window.position(), Vector2Int::new(0, 40));
        assert!(!window.is_maximized());
    }

    #[test]
    fn hidden_maximize_is_deferred_until_show() {
        let mut context = headless(HeadlessConfig::default().with_screens(vec![desk()]));
        let mut window = context
            .create_window(
                &WindowCreateInfo::new("Later")
                    .with_resizable(true)
                    .with_maximize(true)
                    .with_hide(true),
            )
            .unwrap();
        assert!(!window.is_maximized());
        assert_eq!(window.size(), Vector2UInt::new(1280, 780));

        let maximized = Rc::new(RefCell::new(0));
        let resized = Rc::new(RefCell::new(Vec::new()));
        let m = Rc::clone(&maximized);
        let r = Rc::clone(&resized);
        window.add_event_listener::<WindowMaximizeEvent>(move |_| {
            *m.borrow_mut() += 1;
            true
        });
        window.add_event_listener::<WindowResizeEvent>(move |event| {
            r.borrow_mut().push(event.size);
            true
        });

        window.show();
        assert!(window.is_maximized());
        assert_eq!(*maximized.borrow(), 1);
        assert_eq!(resized.borrow().first(), Some(&Vector2UInt::new(1920, 1040)));

        context.update();
        window.update();
        assert_eq!(*maximized.borrow(), 1);
    }

    //--- Screens ----------------------------------------------------------

    #[test]
    fn primary_screen_is_first_enumerated() {
        let context = headless(HeadlessConfig::default().with_screens(vec![desk(), side()]));
        assert_eq!(context.primary_screen().name(), "Desk");
        assert_eq!(context.screens().len(), 2);
        assert_eq!(context.primary_screen().work_area_size(), Vector2UInt::new(1920, 1040));
    }

    #[test]
    fn enumerate_screens_filters_in_order() {
        let context = headless(HeadlessConfig::default().with_screens(vec![desk(), side()]));

        let tall = context.enumerate_screens(|screen| screen.height() > 1080);
        assert!(tall.is_empty());

        let all = context.enumerate_screens(|_| true);
        let names: Vec<_> = all.iter().map(|screen| screen.name()).collect();
        assert_eq!(names, ["Desk", "Side"]);
    }

    #[test]
    fn window_screen_follows_the_window_centre() {
        let mut context = headless(HeadlessConfig::default().with_screens(vec![desk(), side()]));
        let mut window = context.create_window(&WindowCreateInfo::new("A").with_size(400, 300)).unwrap();
        assert_eq!(context.window_screen(&window).name(), "Desk");

        window.set_position(Vector2Int::new(2200, 200));
        assert_eq!(context.window_screen(&window).name(), "Side");

        window.set_position(Vector2Int::new(-5000, -5000));
        assert_eq!(context.window_screen(&window).name(), "Desk");
    }

    #[test]
    fn display_change_rebuilds_screens() {
        let mut context = headless(HeadlessConfig::default().with_screens(vec![desk()]));
        let driver = context.headless_driver().unwrap();

        driver.set_screens(vec![desk(), side()]);
        context.update();

        assert_eq!(context.screens().len(), 2);
        assert_eq!(context.screens()[1].name(), "Side");
    }

    #[test]
    fn empty_layout_keeps_previous_screens() {
        let mut context = headless(HeadlessConfig::default().with_screens(vec![desk()]));
        context.headless_driver().unwrap().set_screens(Vec::new());

        context.update();
        assert_eq!(context.screens().len(), 1);
    }

    #[test]
    fn mobile_rotation_reorients_in_place() {
        let portrait = ScreenInfo::new("Panel", Vector2Int::ZERO, Vector2UInt::new(1080, 2400));
        let mut context = headless(HeadlessConfig::new(BackendType::Activity).with_screens(vec![portrait]));
        let driver = context.headless_driver().unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        context
            .screen_mut(0)
            .unwrap()
            .add_event_listener::<ScreenReorientEvent>(move |event| {
                sink.borrow_mut().push(event.orientation);
                true
            });

        driver.set_screens(vec![ScreenInfo::new("Panel", Vector2Int::ZERO, Vector2UInt::new(2400, 1080))]);
        context.update();

        assert_eq!(*seen.borrow(), [ScreenOrientation::LANDSCAPE]);
        assert_eq!(context.primary_screen().orientation(), ScreenOrientation::LANDSCAPE);
        assert_eq!(context.primary_screen().size(), Vector2UInt::new(2400, 1080));
    }

    #[test]
    fn display_polling_is_throttled() {
        let mut context = PlatformContext::builder()
            .with_backend(BackendSelection::Headless(HeadlessConfig::default()))
            .with_display_poll_interval(Duration::from_secs(3600))
            .build()
            .unwrap();
        let driver = context.headless_driver().unwrap();

        driver.set_screens(vec![desk(), side()]);
        context.update();

        assert_eq!(context.screens().len(), 1);
        assert_eq!(driver.pump_count(), 1);
    }

    #[test]
    fn display_without_screens_is_unavailable() {
        let config = HeadlessConfig { screens: Vec::new(), ..HeadlessConfig::new(BackendType::X11) };
        let result = PlatformContext::builder().with_backend(BackendSelection::Headless(config)).build();
        assert!(matches!(result, Err(PlatformError::DisplayUnavailable(_))));
    }
}
