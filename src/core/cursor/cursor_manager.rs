//=========================================================================
// Cursor Manager
//=========================================================================
//
// Cursor position, visibility and confinement for one window.
//
// Frame lifecycle (driven by `Window::update`):
// ```text
//   update()              last = current, recentred = false
//   register_cursor_move  current = routed position
//   post_update(focused)  hidden + focused → warp to centre
// ```
//
// Delta convention:
// - Visible: `current − last`.
// - Hidden and recentred this frame: `last − current`, where `last` is
//   the pre-warp position and `current` is the centre. Both report the
//   user's physical motion with the same sign. The jump to the centre is
//   never observable and the first recentre after hiding reports zero.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::event::{Event, EventSource, SubscriptionId};
use crate::core::geometry::{Vector2, Vector2UInt};
use crate::core::platform_bridge::{CoordinateOrigin, NativeCursor};

use super::event::{CursorEvents, CursorMoveEvent};

//=== CursorManager =======================================================

pub struct CursorManager {
    native: Box<dyn NativeCursor>,
    origin: CoordinateOrigin,
    client_size: Vector2UInt,

    position: Vector2,
    last_position: Vector2,
    visible: bool,
    just_hidden: bool,
    recentred: bool,

    events: CursorEvents,
}

impl CursorManager {
    pub(crate) fn new(
        native: Box<dyn NativeCursor>,
        origin: CoordinateOrigin,
        client_size: Vector2UInt,
    ) -> Self {
        Self {
            native,
            origin,
            client_size,
            position: Vector2::ZERO,
            last_position: Vector2::ZERO,
            visible: true,
            just_hidden: false,
            recentred: false,
            events: CursorEvents::default(),
        }
    }

    //--- Frame Processing -------------------------------------------------

    pub(crate) fn update(&mut self) {
        self.last_position = self.position;
        self.recentred = false;
    }

    /// Recentres a hidden cursor of a focused window.
    pub(crate) fn post_update(&mut self, focused: bool) {
        if self.visible || !focused {
            return;
        }

        let centre = self.client_size.center();
        if self.just_hidden {
            self.last_position = centre;
            self.just_hidden = false;
        } else {
            self.last_position = self.position;
        }
        self.position = centre;
        self.recentred = true;

        let native = self.origin.from_bottom_left(centre, self.client_size.y as f32);
        self.native.warp(native);
    }

    pub(crate) fn set_client_size(&mut self, size: Vector2UInt) {
        self.client_size = size;
    }

    /// Reapplies the OS pointer visibility (focus regain resets it on
    /// some platforms).
    pub(crate) fn refresh_visibility(&mut self) {
        self.native.set_visible(self.visible);
    }

    //=====================================================================
    // Registration (called by backends)
    //=====================================================================

    /// Stores a routed position (bottom-left, Y-up client space).
    pub fn register_cursor_move(&mut self, position: Vector2) {
        if position == self.position {
            return;
        }

        self.position = position;
        if self.visible {
            trace!(target: "platform::cursor", "cursor moved to {:?}", position);
            self.events.emit(CursorMoveEvent { position });
        }
    }

    //=====================================================================
    // Control
    //=====================================================================

    pub fn set_cursor_visibility(&mut self, visible: bool) {
        if visible == self.visible {
            return;
        }

        self.visible = visible;
        self.just_hidden = !visible;
        self.native.set_visible(visible);
    }

    /// Warps the cursor to `position` (bottom-left, Y-up client space).
    pub fn set_cursor_position(&mut self, position: Vector2) {
        self.last_position = self.position;
        self.position = position;

        let native = self.origin.from_bottom_left(position, self.client_size.y as f32);
        self.native.warp(native);
    }

    //=====================================================================
    // Query API
    //=====================================================================

    pub fn is_cursor_visible(&self) -> bool {
        self.visible
    }

    pub fn cursor_position(&self) -> Vector2 {
        self.position
    }

    /// Motion since the previous frame (see module docs for the sign rule).
    pub fn cursor_delta(&self) -> Vector2 {
        if self.recentred {
            self.last_position - self.position
        } else {
            self.position - self.last_position
        }
    }

    //=====================================================================
    // Listeners
    //=====================================================================

    pub fn add_event_listener<E: Event>(
        &mut self,
        callback: impl FnMut(&E) -> bool + 'static,
    ) -> SubscriptionId
    where
        CursorEvents: EventSource<E>,
    {
        self.events.dispatcher_mut().subscribe(callback)
    }

    pub fn remove_event_listener<E: Event>(&mut self, id: SubscriptionId) -> bool
    where
        CursorEvents: EventSource<E>,
    {
        self.events.dispatcher_mut().unsubscribe(id)
    }
}

impl fmt::Debug for CursorManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorManager")
            .field("position", &self.position)
            .field("last_position", &self.last_position)
            .field("visible", &self.visible)
            .field("just_hidden", &self.just_hidden)
            .finish_non_exhaustive()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    //--- Test Helpers -----------------------------------------------------

    #[derive(Debug, Default)]
    struct Recorded {
        visible: Option<bool>,
        warps: Vec<Vector2>,
    }

    struct FakeCursor(Rc<RefCell<Recorded>>);

    impl NativeCursor for FakeCursor {
        fn set_visible(&mut self, visible: bool) {
            self.0.borrow_mut().visible = Some(visible);
        }

        fn warp(&mut self, position: Vector2) {
            self.0.borrow_mut().warps.push(position);
        }
    }

    fn manager(origin: CoordinateOrigin) -> (CursorManager, Rc<RefCell<Recorded>>) {
        let recorded = Rc::new(RefCell::new(Recorded::default()));
        let cursor = CursorManager::new(
            Box::new(FakeCursor(Rc::clone(&recorded))),
            origin,
            Vector2UInt::new(800, 600),
        );
        (cursor, recorded)
    }

    /// Simulates one frame in which the pointer reports `position`.
    fn frame(cursor: &mut CursorManager, position: Vector2, focused: bool) {
        cursor.update();
        cursor.register_cursor_move(position);
        cursor.post_update(focused);
    }

    //--- Visible ----------------------------------------------------------

    #[test]
    fn visible_delta_is_current_minus_last() {
        let (mut cursor, _) = manager(CoordinateOrigin::BottomLeft);
        frame(&mut cursor, Vector2::new(100.0, 100.0), true);
        frame(&mut cursor, Vector2::new(120.0, 90.0), true);

        assert_eq!(cursor.cursor_delta(), Vector2::new(20.0, -10.0));
        assert_eq!(cursor.cursor_position(), Vector2::new(120.0, 90.0));
    }

    #[test]
    fn no_motion_means_zero_delta() {
        let (mut cursor, _) = manager(CoordinateOrigin::BottomLeft);
        frame(&mut cursor, Vector2::new(10.0, 10.0), true);
        cursor.update();
        assert_eq!(cursor.cursor_delta(), Vector2::ZERO);
    }

    #[test]
    fn move_event_only_when_visible_and_changed() {
        let (mut cursor, _) = manager(CoordinateOrigin::BottomLeft);
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        cursor.add_event_listener::<CursorMoveEvent>(move |_| {
            *sink.borrow_mut() += 1;
            false
        });

        cursor.register_cursor_move(Vector2::new(1.0, 1.0));
        cursor.register_cursor_move(Vector2::new(1.0, 1.0));
        cursor.set_cursor_visibility(false);
        cursor.register_cursor_move(Vector2::new(2.0, 2.0));

        assert_eq!(*count.borrow(), 1);
    }

    //--- Hidden -----------------------------------------------------------

    #[test]
    fn first_recentre_after_hiding_reports_zero() {
        let (mut cursor, recorded) = manager(CoordinateOrigin::BottomLeft);
        frame(&mut cursor, Vector2::new(100.0, 100.0), true);

        cursor.set_cursor_visibility(false);
        assert_eq!(recorded.borrow().visible, Some(false));

        frame(&mut cursor, Vector2::new(130.0, 100.0), true);
        assert_eq!(cursor.cursor_delta(), Vector2::ZERO);
        assert_eq!(cursor.cursor_position(), Vector2::new(400.0, 300.0));
        assert_eq!(recorded.borrow().warps.last(), Some(&Vector2::new(400.0, 300.0)));
    }

    #[test]
    fn hidden_delta_reports_motion_never_the_jump() {
        let (mut cursor, _) = manager(CoordinateOrigin::BottomLeft);
        cursor.set_cursor_visibility(false);
        frame(&mut cursor, Vector2::new(400.0, 300.0), true);

        // User moves (20, -10) away from the centre.
        frame(&mut cursor, Vector2::new(420.0, 290.0), true);

        // Raw post-warp delta would be centre − pre-warp = (-20, 10).
        let raw = cursor.cursor_position() - Vector2::new(420.0, 290.0);
        assert_eq!(raw, Vector2::new(-20.0, 10.0));
        assert_eq!(cursor.cursor_delta(), -raw);
        assert_eq!(cursor.cursor_delta(), Vector2::new(20.0, -10.0));

        // Next frame without motion: the warp itself is not reported.
        frame(&mut cursor, Vector2::new(400.0, 300.0), true);
        assert_eq!(cursor.cursor_delta(), Vector2::ZERO);
    }

    #[test]
    fn odd_client_size_recentres_without_drift() {
        let recorded = Rc::new(RefCell::new(Recorded::default()));
        let mut cursor = CursorManager::new(
            Box::new(FakeCursor(Rc::clone(&recorded))),
            CoordinateOrigin::TopLeft,
            Vector2UInt::new(801, 601),
        );
        cursor.set_cursor_visibility(false);
        frame(&mut cursor, Vector2::new(100.0, 100.0), true);

        for _ in 0..3 {
            // The OS reports the pointer exactly where it was warped.
            let warped = *recorded.borrow().warps.last().unwrap();
            assert_eq!(warped, Vector2::new(warped.x.round(), warped.y.round()));
            let reported = CoordinateOrigin::TopLeft.to_bottom_left(warped, 601.0);
            frame(&mut cursor, reported, true);
            assert_eq!(cursor.cursor_delta(), Vector2::ZERO);
        }
    }

    #[test]
    fn unfocused_window_is_not_recentred() {
        let (mut cursor, recorded) = manager(CoordinateOrigin::BottomLeft);
        cursor.set_cursor_visibility(false);
        frame(&mut cursor, Vector2::new(10.0, 10.0), false);

        assert!(recorded.borrow().warps.is_empty());
        assert_eq!(cursor.cursor_position(), Vector2::new(10.0, 10.0));
    }

    #[test]
    fn warp_uses_native_origin() {
        let (mut cursor, recorded) = manager(CoordinateOrigin::TopLeft);
        cursor.set_cursor_position(Vector2::new(50.0, 500.0));

        assert_eq!(recorded.borrow().warps.last(), Some(&Vector2::new(50.0, 100.0)));
        assert_eq!(cursor.cursor_position(), Vector2::new(50.0, 500.0));
        assert_eq!(cursor.cursor_delta(), Vector2::new(50.0, 500.0));
    }

    #[test]
    fn showing_again_restores_plain_delta() {
        let (mut cursor, recorded) = manager(CoordinateOrigin::BottomLeft);
        cursor.set_cursor_visibility(false);
        frame(&mut cursor, Vector2::new(400.0, 300.0), true);
        cursor.set_cursor_visibility(true);
        assert_eq!(recorded.borrow().visible, Some(true));

        frame(&mut cursor, Vector2::new(410.0, 300.0), true);
        assert_eq!(cursor.cursor_delta(), Vector2::new(10.0, 0.0));
    }
}
