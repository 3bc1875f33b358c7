//=========================================================================
// Touch Manager
//=========================================================================
//
// Active contact set for one window.
//
// Lifecycle per TouchId:
// ```text
//   register_touch_press    → appended (or overwritten on id reuse)
//   register_touch_move*    → position / last_position / tap_time
//   register_touch_release  → kind = Release, still listed
//   update()                → pruned
// ```
//
// Moves and releases for unknown ids, and presses whose kind is not
// `Press`, are programming errors in the backend and panic.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Instant;

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::event::{Event, EventSource, SubscriptionId};
use crate::core::geometry::Vector2;

use super::event::{TouchEvents, TouchMoveEvent, TouchPressEvent, TouchReleaseEvent};
use super::touch::{Touch, TouchId, TouchType};

//=== TouchManager ========================================================

#[derive(Debug, Default)]
pub struct TouchManager {
    touches: Vec<Touch>,
    events: TouchEvents,
}

impl TouchManager {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Frame Processing -------------------------------------------------

    /// Housekeeping: drops contacts released during the previous frame.
    pub(crate) fn update(&mut self) {
        self.touches.retain(|touch| !touch.is_released());
    }

    //=====================================================================
    // Registration (called by backends)
    //=====================================================================

    /// # Panics
    ///
    /// Panics if `touch.kind` is not [`TouchType::Press`].
    pub fn register_touch_press(&mut self, touch: Touch) {
        assert!(
            touch.kind == TouchType::Press,
            "register_touch_press called with a {:?} touch (id {:?})",
            touch.kind,
            touch.id
        );

        match self.find_mut(touch.id) {
            Some(existing) => *existing = touch,
            None => self.touches.push(touch),
        }

        trace!(target: "platform::touch", "touch {:?} pressed at {:?}", touch.id, touch.position);
        self.events.emit(TouchPressEvent { touch });
    }

    /// # Panics
    ///
    /// Panics if `id` is not an active contact.
    pub fn register_touch_move(&mut self, id: TouchId, position: Vector2) {
        let touch = self.expect_active(id, "register_touch_move");
        touch.last_position = touch.position;
        touch.position = position;
        touch.tap_time = Instant::now();

        let touch = *touch;
        self.events.emit(TouchMoveEvent { touch });
    }

    /// # Panics
    ///
    /// Panics if `id` is not an active contact.
    pub fn register_touch_release(&mut self, id: TouchId) {
        let touch = self.expect_active(id, "register_touch_release");
        touch.kind = TouchType::Release;

        let touch = *touch;
        trace!(target: "platform::touch", "touch {:?} released", id);
        self.events.emit(TouchReleaseEvent { touch });
    }

    //=====================================================================
    // Query API
    //=====================================================================

    /// Active contacts, including ones released this frame.
    pub fn touches(&self) -> &[Touch] {
        &self.touches
    }

    pub fn touch(&self, id: TouchId) -> Option<&Touch> {
        self.touches.iter().find(|touch| touch.id == id)
    }

    pub fn contains(&self, id: TouchId) -> bool {
        self.touch(id).is_some()
    }

    //=====================================================================
    // Listeners
    //=====================================================================

    pub fn add_event_listener<E: Event>(
        &mut self,
        callback: impl FnMut(&E) -> bool + 'static,
    ) -> SubscriptionId
    where
        TouchEvents: EventSource<E>,
    {
        self.events.dispatcher_mut().subscribe(callback)
    }

    pub fn remove_event_listener<E: Event>(&mut self, id: SubscriptionId) -> bool
    where
        TouchEvents: EventSource<E>,
    {
        self.events.dispatcher_mut().unsubscribe(id)
    }

    //--- Internal Helpers -------------------------------------------------

    fn find_mut(&mut self, id: TouchId) -> Option<&mut Touch> {
        self.touches.iter_mut().find(|touch| touch.id == id)
    }

    fn expect_active(&mut self, id: TouchId, operation: &str) -> &mut Touch {
        match self.find_mut(id) {
            Some(touch) => touch,
            None => panic!("{} called with unknown touch id {:?}", operation, id),
        }
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

    fn press(manager: &mut TouchManager, id: u64, x: f32, y: f32) {
        manager.register_touch_press(Touch::press(TouchId(id), Vector2::new(x, y), 1.0));
    }

    #[test]
    fn move_updates_existing_entry_without_duplicating() {
        let mut manager = TouchManager::new();
        press(&mut manager, 7, 10.0, 10.0);
        manager.register_touch_move(TouchId(7), Vector2::new(15.0, 12.0));

        assert_eq!(manager.touches().len(), 1);
        let touch = manager.touch(TouchId(7)).unwrap();
        assert_eq!(touch.position, Vector2::new(15.0, 12.0));
        assert_eq!(touch.last_position, Vector2::new(10.0, 10.0));
        assert_eq!(touch.delta(), Vector2::new(5.0, 2.0));
    }

    #[test]
    fn released_touch_is_visible_until_next_update() {
        let mut manager = TouchManager::new();
        press(&mut manager, 7, 0.0, 0.0);
        manager.register_touch_release(TouchId(7));

        assert_eq!(manager.touches().len(), 1);
        assert!(manager.touches()[0].is_released());

        manager.update();
        assert!(manager.touches().is_empty());
        assert!(!manager.contains(TouchId(7)));
    }

    #[test]
    fn release_event_sees_final_state() {
        let mut manager = TouchManager::new();
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        manager.add_event_listener::<TouchReleaseEvent>(move |event| {
            *sink.borrow_mut() = Some((event.touch.kind, event.touch.position));
            false
        });

        press(&mut manager, 3, 4.0, 5.0);
        manager.register_touch_release(TouchId(3));

        assert_eq!(*seen.borrow(), Some((TouchType::Release, Vector2::new(4.0, 5.0))));
    }

    #[test]
    fn reused_id_overwrites_in_place() {
        let mut manager = TouchManager::new();
        press(&mut manager, 1, 0.0, 0.0);
        press(&mut manager, 2, 0.0, 0.0);
        press(&mut manager, 1, 9.0, 9.0);

        assert_eq!(manager.touches().len(), 2);
        assert_eq!(manager.touches()[0].id, TouchId(1));
        assert_eq!(manager.touches()[0].position, Vector2::new(9.0, 9.0));
    }

    #[test]
    fn events_fire_for_each_phase() {
        let mut manager = TouchManager::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&log);
        manager.add_event_listener::<TouchPressEvent>(move |_| {
            sink.borrow_mut().push("press");
            false
        });
        let sink = Rc::clone(&log);
        manager.add_event_listener::<TouchMoveEvent>(move |_| {
            sink.borrow_mut().push("move");
            false
        });

        press(&mut manager, 5, 0.0, 0.0);
        manager.register_touch_move(TouchId(5), Vector2::new(1.0, 1.0));

        assert_eq!(*log.borrow(), vec!["press", "move"]);
    }

    #[test]
    #[should_panic(expected = "unknown touch id")]
    fn move_of_unknown_id_panics() {
        let mut manager = TouchManager::new();
        manager.register_touch_move(TouchId(42), Vector2::ZERO);
    }

    #[test]
    #[should_panic(expected = "unknown touch id")]
    fn release_of_unknown_id_panics() {
        let mut manager = TouchManager::new();
        manager.register_touch_release(TouchId(42));
    }

    #[test]
    #[should_panic(expected = "Release touch")]
    fn press_with_release_kind_panics() {
        let mut manager = TouchManager::new();
        let mut touch = Touch::press(TouchId(1), Vector2::ZERO, 1.0);
        touch.kind = TouchType::Release;
        manager.register_touch_press(touch);
    }
}
