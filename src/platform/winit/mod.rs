//=========================================================================
// Winit Driver
//=========================================================================
//
// Native backend for desktop targets and Android, driven through winit's
// pump API so the caller keeps ownership of the frame loop.
//
// Architecture:
// ```text
//   WinitContext::pump()
//        │ pump_app_events(Duration::ZERO)
//        ↓
//   App (ApplicationHandler)
//        │ window_event() → translate → WindowRegistry::route
//        │ about_to_wait() → pending window creation, monitor refresh
//        ↓
//   per-window inboxes
// ```
//
// Key Design Decisions:
// - **Creation inside the loop**: winit only creates windows from an
//   active event loop, so `create_window` parks a request on the app and
//   pumps until it is served, bounded by the round-trip timeout
// - **Top-left everywhere**: winit already reports client positions
//   top-left on every OS, including Cocoa, so the profile's origin is
//   overridden accordingly
// - **OS helpers for the gaps**: work areas, opacity and EWMH state come
//   from `win32`, `cocoa` and `x11`
//
//=========================================================================

//=== Submodules ==========================================================

mod monitor;
mod translate;
mod window;

#[cfg(target_os = "windows")]
mod win32;

#[cfg(target_os = "macos")]
mod cocoa;

#[cfg(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))]
mod x11;

//=== External Dependencies ===============================================

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use log::{debug, error, info, trace, warn};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::error::OsError;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window as OsWindow, WindowAttributes, WindowId};

//=== Internal Dependencies ===============================================

use crate::core::error::PlatformError;
use crate::core::geometry::{Vector2, Vector2Int, Vector2UInt};
use crate::core::platform_bridge::{
    BackendProfile, BackendType, CoordinateOrigin, NativeContext, NativeEvent, NativeWindowParts,
    WindowRegistry,
};
use crate::core::screen::ScreenInfo;
use crate::core::window::WindowCreateInfo;
use crate::platform::round_trip;

use monitor::DesktopFrame;
use window::WinitWindow;

//=== NativeConfig ========================================================

/// Settings the platform builder forwards to the native driver.
pub(super) struct NativeConfig {
    pub(super) round_trip_timeout: Duration,
    #[cfg(target_os = "android")]
    pub(super) android_app: Option<winit::platform::android::activity::AndroidApp>,
}

//=== OsSupport ===========================================================

/// Side channels to the OS that winit does not cover.
#[derive(Default)]
pub(super) struct OsSupport {
    #[cfg(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))]
    x11: Option<Rc<x11::X11Support>>,
}

impl OsSupport {
    fn connect() -> Self {
        Self {
            #[cfg(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))]
            x11: x11::X11Support::connect().map(Rc::new),
        }
    }
}

const fn native_backend() -> BackendType {
    if cfg!(target_os = "windows") {
        BackendType::Win32
    } else if cfg!(target_os = "macos") {
        BackendType::Cocoa
    } else if cfg!(target_os = "android") {
        BackendType::Activity
    } else {
        BackendType::X11
    }
}

//=== App =================================================================

struct TrackedWindow {
    window: Weak<OsWindow>,
    minimized: bool,
    maximized: bool,
}

/// Event-loop side of the driver.
struct App {
    registry: WindowRegistry<WindowId>,
    windows: HashMap<WindowId, TrackedWindow>,

    request: Option<WindowAttributes>,
    created: Option<Result<OsWindow, OsError>>,

    screens: Vec<ScreenInfo>,
    screens_wanted: Cell<bool>,
    desktop: Rc<Cell<DesktopFrame>>,

    os: OsSupport,
    started: bool,
    suspended: bool,
}

impl App {
    fn new(os: OsSupport) -> Self {
        Self {
            registry: WindowRegistry::new(),
            windows: HashMap::new(),
            request: None,
            created: None,
            screens: Vec::new(),
            screens_wanted: Cell::new(true),
            desktop: Rc::new(Cell::new(DesktopFrame::default())),
            os,
            started: false,
            suspended: false,
        }
    }

    /// Work that needs an active event loop.
    fn service(&mut self, event_loop: &ActiveEventLoop) {
        if !self.started {
            return;
        }

        if let Some(attributes) = self.request.take() {
            self.created = Some(event_loop.create_window(attributes));
        }

        if self.screens_wanted.replace(false) {
            let (screens, frame) = monitor::enumerate(event_loop, &self.os);
            self.screens = screens;
            self.desktop.set(frame);
        }

        self.windows.retain(|_, tracked| tracked.window.strong_count() > 0);
    }

    fn route(&mut self, id: WindowId, event: NativeEvent) {
        self.registry.route(id, event);
    }

    /// Compares winit's state queries with what was last reported and
    /// emits the transitions.
    fn sync_state(&mut self, id: WindowId) {
        let Some(tracked) = self.windows.get_mut(&id) else {
            return;
        };
        let Some(window) = tracked.window.upgrade() else {
            return;
        };

        let minimized = window.is_minimized().unwrap_or(tracked.minimized);
        let maximized = window.is_maximized();
        let was = (tracked.minimized, tracked.maximized);
        tracked.minimized = minimized;
        tracked.maximized = maximized;

        match (was, (minimized, maximized)) {
            ((false, _), (true, _)) => self.route(id, NativeEvent::Minimized),
            ((_, false), (false, true)) => {
                if was.0 {
                    self.route(id, NativeEvent::Restored);
                }
                self.route(id, NativeEvent::Maximized);
            }
            ((true, _), (false, false)) | ((_, true), (false, false)) => {
                self.route(id, NativeEvent::Restored)
            }
            _ => {}
        }
    }

    /// Client-area bottom-left of `id` in desktop space.
    fn desktop_position(&self, id: WindowId) -> Option<Vector2Int> {
        let window = self.windows.get(&id)?.window.upgrade()?;
        let inner = window.inner_position().ok()?;
        let height = window.inner_size().height;
        Some(self.desktop.get().to_desktop(Vector2Int::new(inner.x, inner.y), height))
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.started = true;
        if std::mem::take(&mut self.suspended) {
            debug!(target: "platform", "Application resumed");
            self.registry.broadcast(&NativeEvent::Resumed);
            self.screens_wanted.set(true);
        }
        self.service(event_loop);
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        debug!(target: "platform", "Application suspended");
        self.suspended = true;
        self.registry.broadcast(&NativeEvent::Suspended);
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        let now = Instant::now();

        match event {
            WindowEvent::CloseRequested => self.route(id, NativeEvent::CloseRequested),
            WindowEvent::Destroyed => {
                self.windows.remove(&id);
                self.route(id, NativeEvent::Destroyed);
            }
            WindowEvent::Focused(focused) => self.route(id, NativeEvent::Focused(focused)),
            WindowEvent::Moved(outer) => {
                let position = self
                    .desktop_position(id)
                    .unwrap_or_else(|| Vector2Int::new(outer.x, outer.y));
                self.route(id, NativeEvent::Moved(position));
            }
            WindowEvent::Resized(size) => {
                self.sync_state(id);
                self.route(id, NativeEvent::Resized(Vector2UInt::new(size.width, size.height)));
            }
            WindowEvent::ScaleFactorChanged { .. } => self.screens_wanted.set(true),
            WindowEvent::KeyboardInput { event, is_synthetic, .. } => {
                if is_synthetic {
                    trace!(target: "platform::input", "Dropped synthetic key {:?}", event.physical_key);
                    return;
                }
                if let Some(native) = translate::keyboard(&event, now) {
                    self.route(id, native);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let position = Vector2::new(position.x as f32, position.y as f32);
                self.route(id, NativeEvent::CursorMoved(position));
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.route(id, translate::mouse_input(button, state));
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.route(id, NativeEvent::Scroll(translate::scroll(delta)));
            }
            WindowEvent::Touch(touch) => self.route(id, translate::touch(&touch)),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.service(event_loop);
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.registry.broadcast(&NativeEvent::Destroyed);
    }
}

//=== WinitContext ========================================================

pub(super) struct WinitContext {
    event_loop: EventLoop<()>,
    app: App,
    profile: BackendProfile,
    round_trip_timeout: Duration,
    exited: bool,
    class_serial: u32,
}

impl WinitContext {
    pub(super) fn new(config: NativeConfig) -> Result<Self, PlatformError> {
        let mut builder = EventLoop::builder();

        #[cfg(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))]
        {
            use winit::platform::x11::EventLoopBuilderExtX11;
            builder.with_x11();
        }

        #[cfg(target_os = "android")]
        {
            use winit::platform::android::EventLoopBuilderExtAndroid;
            let Some(app) = config.android_app else {
                error!(target: "platform", "Android backend requires the activity's AndroidApp");
                return Err(PlatformError::DisplayUnavailable("no AndroidApp was supplied".into()));
            };
            builder.with_android_app(app);
        }

        let event_loop = builder.build().map_err(|err| {
            error!(target: "platform", "Cannot open the native event loop: {}", err);
            PlatformError::DisplayUnavailable(err.to_string())
        })?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let backend = native_backend();
        let mut context = Self {
            event_loop,
            app: App::new(OsSupport::connect()),
            profile: BackendProfile::for_backend(backend).with_origin(CoordinateOrigin::TopLeft),
            round_trip_timeout: config.round_trip_timeout,
            exited: false,
            class_serial: 0,
        };

        // `resumed` and the first monitor layout arrive on the first passes;
        // Android resumes only once the activity has a surface.
        let timeout = context.round_trip_timeout;
        let enumerated = round_trip::wait_until("initial monitor enumeration", timeout, || {
            context.pump();
            (!context.app.screens.is_empty()).then_some(())
        });
        if let Err(err) = enumerated {
            debug!(
                target: "platform",
                "{}; continuing without screens; open() reports DisplayUnavailable",
                err
            );
        }
        info!(target: "platform", "Native {} event loop ready", backend);
        Ok(context)
    }

    fn attributes(&mut self, info: &WindowCreateInfo) -> WindowAttributes {
        let attributes = OsWindow::default_attributes()
            .with_title(info.title.clone())
            .with_inner_size(PhysicalSize::new(info.width, info.height))
            .with_resizable(info.resizable)
            .with_maximized(info.maximize)
            .with_visible(!info.hide);

        self.class_serial += 1;

        #[cfg(target_os = "windows")]
        let attributes = {
            use winit::platform::windows::WindowAttributesExtWindows;
            attributes.with_class_name(win32::window_class_name(self.class_serial))
        };

        attributes
    }

    #[cfg(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))]
    fn bind_x11(&mut self, window: &OsWindow, hidden: bool) -> Option<window::X11Binding> {
        let support = self.app.os.x11.clone()?;
        let xid = x11::window_id(window)?;

        // Window managers only compute extents for mapped windows.
        if hidden {
            window.set_visible(true);
        }
        let extents = support.frame_extents(xid, self.round_trip_timeout);
        if hidden {
            window.set_visible(false);
        }
        debug!(target: "platform::x11", "Window {:#x} frame extents {:?}", xid, extents);

        Some(window::X11Binding { support, xid, extents })
    }
}

impl NativeContext for WinitContext {
    fn profile(&self) -> BackendProfile {
        self.profile
    }

    fn create_window(&mut self, info: &WindowCreateInfo) -> Result<NativeWindowParts, PlatformError> {
        if self.exited {
            return Err(PlatformError::DisplayUnavailable("event loop has exited".into()));
        }

        let attributes = self.attributes(info);
        self.app.request = Some(attributes);
        self.app.created = None;

        let created = round_trip::wait_until("window creation", self.round_trip_timeout, || {
            self.event_loop.pump_app_events(Some(Duration::ZERO), &mut self.app);
            self.app.created.take()
        });

        let os_window = match created {
            Ok(Ok(window)) => Arc::new(window),
            Ok(Err(err)) => return Err(PlatformError::WindowCreation(err.to_string())),
            Err(timeout) => {
                self.app.request = None;
                return Err(timeout);
            }
        };

        let window = WinitWindow::new(
            Arc::clone(&os_window),
            Rc::clone(&self.app.desktop),
            self.round_trip_timeout,
        );

        #[cfg(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))]
        let window = {
            let binding = self.bind_x11(&os_window, info.hide);
            window.with_x11(binding)
        };

        // Anything the window produced while unregistered is dropped here.
        self.pump();

        let id = os_window.id();
        let inbox = self.app.registry.register(id);
        self.app.windows.insert(
            id,
            TrackedWindow {
                window: Arc::downgrade(&os_window),
                minimized: false,
                maximized: os_window.is_maximized(),
            },
        );

        debug!(target: "platform", "Created native window {:?} \"{}\"", id, info.title);
        Ok(NativeWindowParts { window: Box::new(window), inbox })
    }

    fn pump(&mut self) {
        if self.exited {
            return;
        }
        if let PumpStatus::Exit(code) = self.event_loop.pump_app_events(Some(Duration::ZERO), &mut self.app)
        {
            self.exited = true;
            info!(target: "platform", "Native event loop exited with code {}", code);
        }
    }

    fn screens(&self) -> Vec<ScreenInfo> {
        // Refreshed on the next pump; display changes have no dedicated event.
        self.app.screens_wanted.set(true);
        if self.app.screens.is_empty() {
            warn!(target: "platform::screen", "No monitors enumerated yet");
        }
        self.app.screens.clone()
    }
}
