//=========================================================================
// Headless Window
//=========================================================================
//
// In-memory native window. Every request mutates the shared state and
// queues the notifications a real window system would answer with, so
// routing behaves the same as it does on the emulated backend.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::rc::Rc;

use log::trace;
use winit::raw_window_handle::{DisplayHandle, HandleError, WindowHandle};

//=== Internal Dependencies ===============================================

use crate::core::geometry::{Vector2, Vector2Int, Vector2UInt};
use crate::core::platform_bridge::{NativeCursor, NativeEvent, NativeWindow};

use super::{HeadlessShared, HeadlessWindowId};

//=== HeadlessWindowState =================================================

/// Snapshot of what the emulated window system believes about a window.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessWindowState {
    pub title: String,
    /// Bottom-left corner of the client area, Y-up.
    pub position: Vector2Int,
    pub size: Vector2UInt,
    pub opacity: f32,
    pub visible: bool,
    pub minimized: bool,
    pub maximized: bool,
    pub focused: bool,
    pub cursor_visible: bool,
    /// Every warp requested through the cursor, in native coordinates.
    pub cursor_warps: Vec<Vector2>,
    pub closed: bool,
}

//=== HeadlessWindow ======================================================

pub(super) struct HeadlessWindow {
    pub(super) id: HeadlessWindowId,
    pub(super) shared: Rc<RefCell<HeadlessShared>>,
}

impl HeadlessWindow {
    fn read<R>(&self, f: impl FnOnce(&HeadlessWindowState) -> R) -> R {
        let shared = self.shared.borrow();
        f(&shared.windows[&self.id])
    }

    /// Mutates the window and queues the notifications it produces.
    fn write(&self, f: impl FnOnce(&mut HeadlessWindowState, &mut Vec<NativeEvent>)) {
        let mut shared = self.shared.borrow_mut();
        let mut notifications = Vec::new();

        if let Some(state) = shared.windows.get_mut(&self.id) {
            if state.closed {
                return;
            }
            f(state, &mut notifications);
        }
        for event in notifications {
            shared.queue(self.id, event);
        }
    }
}

impl NativeWindow for HeadlessWindow {
    fn set_title(&mut self, title: &str) {
        self.write(|state, _| state.title = title.to_owned());
    }

    fn position(&self) -> Vector2Int {
        self.read(|state| state.position)
    }

    fn set_position(&mut self, position: Vector2Int) {
        self.write(|state, out| {
            state.position = position;
            out.push(NativeEvent::Moved(position));
        });
    }

    fn size(&self) -> Vector2UInt {
        self.read(|state| state.size)
    }

    fn set_size(&mut self, size: Vector2UInt) {
        self.write(|state, out| {
            state.size = size;
            out.push(NativeEvent::Resized(size));
        });
    }

    fn framebuffer_size(&self) -> Vector2UInt {
        self.size()
    }

    fn opacity(&self) -> f32 {
        self.read(|state| state.opacity)
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.write(|state, _| state.opacity = opacity);
    }

    fn minimize(&mut self) {
        self.write(|state, out| {
            if state.minimized {
                return;
            }
            state.minimized = true;
            out.push(NativeEvent::Minimized);
            if state.focused {
                state.focused = false;
                out.push(NativeEvent::Focused(false));
            }
        });
    }

    fn maximize(&mut self) {
        let work_area = self.shared.borrow().primary_work_area();
        self.write(|state, out| {
            if state.maximized {
                return;
            }
            let (origin, size) = work_area;
            state.maximized = true;
            state.minimized = false;
            state.position = origin;
            state.size = size;
            out.push(NativeEvent::Maximized);
            out.push(NativeEvent::Moved(origin));
            out.push(NativeEvent::Resized(size));
        });
    }

    fn show(&mut self) {
        let synthetic = self.shared.borrow().profile.suppress_synthetic_show_events;
        self.write(|state, out| {
            if state.visible {
                return;
            }
            state.visible = true;
            state.focused = true;
            out.push(NativeEvent::Visibility(true));
            if synthetic {
                out.push(NativeEvent::Moved(state.position));
                out.push(NativeEvent::Resized(state.size));
            }
            out.push(NativeEvent::Focused(true));
        });
    }

    fn hide(&mut self) {
        self.write(|state, out| {
            if !state.visible {
                return;
            }
            state.visible = false;
            out.push(NativeEvent::Visibility(false));
            if state.focused {
                state.focused = false;
                out.push(NativeEvent::Focused(false));
            }
        });
    }

    fn focus(&mut self) {
        self.write(|state, out| {
            if state.focused {
                return;
            }
            state.focused = true;
            out.push(NativeEvent::Focused(true));
        });
    }

    fn is_minimized(&self) -> Option<bool> {
        if self.shared.borrow().profile.tracks_minimized_manually {
            return None;
        }
        Some(self.read(|state| state.minimized))
    }

    fn is_maximized(&self) -> Option<bool> {
        Some(self.read(|state| state.maximized))
    }

    fn is_focused(&self) -> Option<bool> {
        Some(self.read(|state| state.focused))
    }

    fn is_visible(&self) -> Option<bool> {
        Some(self.read(|state| state.visible))
    }

    fn cursor(&self) -> Option<Box<dyn NativeCursor>> {
        if !self.shared.borrow().profile.has_cursor {
            return None;
        }
        Some(Box::new(HeadlessCursor { id: self.id, shared: Rc::clone(&self.shared) }))
    }

    fn window_handle(&self) -> Result<WindowHandle<'_>, HandleError> {
        Err(HandleError::Unavailable)
    }

    fn display_handle(&self) -> Result<DisplayHandle<'_>, HandleError> {
        Err(HandleError::Unavailable)
    }

    fn close(&mut self) {
        let mut shared = self.shared.borrow_mut();
        if let Some(state) = shared.windows.get_mut(&self.id) {
            state.closed = true;
            state.visible = false;
            state.focused = false;
        }
        shared.registry.unregister(self.id);
        trace!(target: "platform", "Headless window {:?} released", self.id);
    }
}

//=== HeadlessCursor ======================================================

struct HeadlessCursor {
    id: HeadlessWindowId,
    shared: Rc<RefCell<HeadlessShared>>,
}

impl NativeCursor for HeadlessCursor {
    fn set_visible(&mut self, visible: bool) {
        if let Some(state) = self.shared.borrow_mut().windows.get_mut(&self.id) {
            state.cursor_visible = visible;
        }
    }

    fn warp(&mut self, position: Vector2) {
        if let Some(state) = self.shared.borrow_mut().windows.get_mut(&self.id) {
            state.cursor_warps.push(position);
        }
    }
}
