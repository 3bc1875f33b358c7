//=========================================================================
// Native Event Routing
//=========================================================================
//
// Applies the backend protocol filters to a window's inbox and feeds the
// survivors into the managers and window dispatchers.
//
// Filters (enabled per `BackendProfile`):
// - Auto-repeat: presses flagged `repeat` are always dropped; with
//   `suppress_key_repeat`, a release followed in the inbox by a press of
//   the same key within the threshold is dropped together with it.
// - AltGr: a LeftControl event immediately followed by a RightAlt event
//   of the same direction, stamped within the threshold, is dropped.
// - PrintScreen: an unmatched release registers a press first.
// - Synthetic show: Moved/Resized are dropped in the frame a hidden
//   window becomes visible.
// - Coordinates: cursor and touch positions become bottom-left, Y-up.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Instant;

use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use crate::core::event::EventSource;
use crate::core::geometry::Vector2;
use crate::core::input::Key;
use crate::core::platform_bridge::NativeEvent;
use crate::core::touch::Touch;

use super::event::{
    WindowCloseEvent, WindowFocusEvent, WindowMaximizeEvent, WindowMinimizeEvent, WindowMoveEvent,
    WindowResizeEvent,
};
use super::window::Window;

//=== Routing =============================================================

impl Window {
    /// Pulls this frame's native events and routes them one by one.
    pub(super) fn drain_inbox(&mut self) {
        self.inbox.fill();

        if self.profile.suppress_synthetic_show_events
            && self.inbox.any_pending(|event| matches!(event, NativeEvent::Visibility(true)))
        {
            self.just_shown = true;
        }

        while let Some(event) = self.inbox.pop() {
            self.route(event);
            if self.closed {
                break;
            }
        }
    }

    fn route(&mut self, event: NativeEvent) {
        trace!(target: "platform", "'{}' ← {:?}", self.title, event);

        match event {
            //--- Keyboard -------------------------------------------------
            NativeEvent::KeyPress { key, repeat, timestamp } => {
                if repeat {
                    return;
                }
                if self.is_alt_gr_half(key, timestamp, true) {
                    return;
                }
                self.input.register_key_press(key);
            }

            NativeEvent::KeyRelease { key, timestamp } => {
                if self.is_repeat_release(key, timestamp) {
                    return;
                }
                if self.is_alt_gr_half(key, timestamp, false) {
                    return;
                }
                if self.profile.synthesize_print_screen_press
                    && key == Key::PrintScreen
                    && !self.input.key_state(key).is_down()
                {
                    self.input.register_key_press(key);
                }
                self.input.register_key_release(key);
            }

            //--- Mouse ----------------------------------------------------
            NativeEvent::MouseButtonPress(button) => self.input.register_mouse_button_press(button),
            NativeEvent::MouseButtonRelease(button) => self.input.register_mouse_button_release(button),
            NativeEvent::Scroll(scroll) => self.input.register_mouse_scroll(scroll),

            NativeEvent::CursorMoved(native) => {
                let position = self.normalize(native);
                if let Some(cursor) = &mut self.cursor {
                    cursor.register_cursor_move(position);
                }
            }

            //--- Touch ----------------------------------------------------
            NativeEvent::TouchPress { id, position, force } => {
                let position = self.normalize(position);
                if let Some(touch) = &mut self.touch {
                    touch.register_touch_press(Touch::press(id, position, force));
                }
            }

            NativeEvent::TouchMove { id, position } => {
                let position = self.normalize(position);
                match &mut self.touch {
                    Some(touch) if touch.contains(id) => touch.register_touch_move(id, position),
                    _ => trace!(target: "platform::touch", "Dropped move of unknown touch {:?}", id),
                }
            }

            NativeEvent::TouchRelease { id } => {
                match &mut self.touch {
                    Some(touch) if touch.contains(id) => touch.register_touch_release(id),
                    _ => trace!(target: "platform::touch", "Dropped release of unknown touch {:?}", id),
                }
            }

            //--- Geometry -------------------------------------------------
            NativeEvent::Moved(position) => {
                if self.just_shown {
                    debug!(target: "platform", "Suppressed synthetic move of '{}' on show", self.title);
                    return;
                }
                self.position = position;
                self.events.emit(WindowMoveEvent { position });
            }

            NativeEvent::Resized(size) => {
                if self.just_shown {
                    debug!(target: "platform", "Suppressed synthetic resize of '{}' on show", self.title);
                    return;
                }
                if self.state.minimized || size.x == 0 || size.y == 0 {
                    return;
                }
                self.size = size;
                self.sync_cursor_client_size();
                self.events.emit(WindowResizeEvent { size });
            }

            //--- State ----------------------------------------------------
            NativeEvent::Focused(focused) => {
                self.state.focused = focused;
                if focused {
                    if let Some(cursor) = &mut self.cursor {
                        if !cursor.is_cursor_visible() {
                            cursor.refresh_visibility();
                        }
                    }
                }
                self.events.emit(WindowFocusEvent { focused });
            }

            NativeEvent::Minimized | NativeEvent::Suspended => {
                if !self.state.minimized {
                    self.state.minimized = true;
                    self.events.emit(WindowMinimizeEvent);
                }
            }

            NativeEvent::Maximized => {
                if !self.state.maximized {
                    self.state.maximized = true;
                    self.state.minimized = false;
                    self.events.emit(WindowMaximizeEvent);
                }
            }

            NativeEvent::Restored => {
                self.state.minimized = false;
                self.state.maximized = false;
            }

            NativeEvent::Resumed => {
                self.state.minimized = false;
            }

            NativeEvent::Visibility(visible) => {
                self.state.hidden = !visible;
            }

            //--- Teardown -------------------------------------------------
            NativeEvent::CloseRequested => {
                self.events.emit(WindowCloseEvent);
                self.close();
            }

            NativeEvent::Destroyed => {
                info!(target: "platform", "Native window '{}' was destroyed", self.title);
                self.close();
            }
        }
    }

    //--- Filters ----------------------------------------------------------

    /// Release half of an OS auto-repeat pair; consumes the matching press.
    fn is_repeat_release(&mut self, key: Key, released_at: Instant) -> bool {
        if !self.profile.suppress_key_repeat {
            return false;
        }

        let repeated = matches!(
            self.inbox.peek(),
            Some(NativeEvent::KeyPress { key: next, timestamp, .. })
                if *next == key
                    && timestamp.saturating_duration_since(released_at) <= self.key_repeat_threshold
        );

        if repeated {
            self.inbox.pop();
            debug!(target: "platform::input", "Suppressed auto-repeat of {}", key);
        }
        repeated
    }

    /// LeftControl half of an AltGr chord.
    fn is_alt_gr_half(&self, key: Key, timestamp: Instant, pressed: bool) -> bool {
        if !self.profile.collapse_alt_gr || key != Key::LeftControl {
            return false;
        }

        let chord = match self.inbox.peek() {
            Some(NativeEvent::KeyPress { key: Key::RightAlt, timestamp: next, .. }) => {
                pressed && self.same_instant(timestamp, *next)
            }
            Some(NativeEvent::KeyRelease { key: Key::RightAlt, timestamp: next }) => {
                !pressed && self.same_instant(timestamp, *next)
            }
            _ => false,
        };

        if chord {
            debug!(target: "platform::input", "Collapsed AltGr chord");
        }
        chord
    }

    /// Drivers stamp each event as it is delivered, so the two halves of
    /// one OS message differ by the delivery gap.
    fn same_instant(&self, first: Instant, second: Instant) -> bool {
        second.saturating_duration_since(first) <= self.key_repeat_threshold
    }

    fn normalize(&self, native: Vector2) -> Vector2 {
        self.profile.origin.to_bottom_left(native, self.size.y as f32)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
