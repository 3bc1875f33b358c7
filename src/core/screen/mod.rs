//=========================================================================
// Screen
//=========================================================================
//
// One monitor: geometry, work area, refresh rate and orientation.
//
// Screens are enumerated by the context from `ScreenInfo` descriptors
// and rebuilt wholesale whenever the display configuration changes, so
// a `&Screen` is only valid until the next `PlatformContext::update`
// that reported a reload.
//
// Desktop coordinates are bottom-left origin, Y-up. The work area is the
// full area minus OS-reserved chrome:
//
// ```text
//   ┌──────────────────────────┐  ← top inset (menu bar)
//   │                          │
//   │        work area         │
//   │                          │
//   ├──────────────────────────┤  ← bottom inset (taskbar / dock)
//   origin                     origin.x + size.x
// ```
//
//=========================================================================

//=== Module Declarations =================================================

mod event;
mod orientation;

//=== Public API ==========================================================

pub use event::{ScreenEvents, ScreenReorientEvent};
pub use orientation::ScreenOrientation;

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::event::{Event, EventSource, SubscriptionId};
use crate::core::geometry::{Insets, Vector2Int, Vector2UInt};
use crate::core::platform_bridge::BackendType;

//=== ScreenInfo ==========================================================

/// Backend description of one monitor, as enumerated.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenInfo {
    pub name: String,
    /// Bottom-left corner in desktop coordinates.
    pub origin: Vector2Int,
    pub size: Vector2UInt,
    /// Reserved chrome; `Insets::NONE` when the OS could not report it.
    pub reserved: Insets,
    pub refresh_rate: u16,
    pub orientation: ScreenOrientation,
}

impl ScreenInfo {
    pub fn new(name: impl Into<String>, origin: Vector2Int, size: Vector2UInt) -> Self {
        Self {
            name: name.into(),
            origin,
            size,
            reserved: Insets::NONE,
            refresh_rate: 60,
            orientation: ScreenOrientation::from_extent(size.x, size.y),
        }
    }

    pub fn with_reserved(mut self, reserved: Insets) -> Self {
        self.reserved = reserved;
        self
    }

    pub fn with_refresh_rate(mut self, refresh_rate: u16) -> Self {
        self.refresh_rate = refresh_rate;
        self
    }

    pub fn with_orientation(mut self, orientation: ScreenOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Same monitor rotated by a quarter turn.
    pub(crate) fn is_rotation_of(&self, other: &ScreenInfo) -> bool {
        self.name == other.name && self.size == other.size.transposed() && self.size != other.size
    }
}

//=== Screen ==============================================================

#[derive(Debug)]
pub struct Screen {
    name: String,
    origin: Vector2Int,
    size: Vector2UInt,
    work_area_origin: Vector2Int,
    work_area_size: Vector2UInt,
    refresh_rate: u16,
    orientation: ScreenOrientation,
    backend: BackendType,
    events: ScreenEvents,
}

impl Screen {
    pub(crate) fn new(info: ScreenInfo, backend: BackendType) -> Self {
        let mut screen = Self {
            name: String::new(),
            origin: Vector2Int::ZERO,
            size: Vector2UInt::ZERO,
            work_area_origin: Vector2Int::ZERO,
            work_area_size: Vector2UInt::ZERO,
            refresh_rate: 0,
            orientation: ScreenOrientation::UNKNOWN,
            backend,
            events: ScreenEvents::default(),
        };
        screen.apply(info);
        screen
    }

    /// Refreshes geometry in place, keeping subscribers.
    pub(crate) fn apply(&mut self, info: ScreenInfo) {
        if info.reserved.is_none() {
            debug!(target: "platform::screen", "No reserved area for screen '{}'; work area is full area", info.name);
        }

        let (work_area_origin, work_area_size) = work_area(info.origin, info.size, info.reserved);

        self.name = info.name;
        self.origin = info.origin;
        self.size = info.size;
        self.work_area_origin = work_area_origin;
        self.work_area_size = work_area_size;
        self.refresh_rate = info.refresh_rate;
        self.orientation = info.orientation;
    }

    //--- Reorientation ----------------------------------------------------

    /// Records a device rotation and notifies subscribers.
    ///
    /// # Panics
    ///
    /// Panics if `orientation` is a mask such as `PORTRAIT_ANY`.
    pub fn register_screen_reorient(&mut self, orientation: ScreenOrientation) {
        assert!(
            orientation.is_concrete(),
            "register_screen_reorient requires a concrete orientation, got {:?}",
            orientation
        );

        self.orientation = orientation;
        self.events.emit(ScreenReorientEvent { orientation });
    }

    //--- Queries ----------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin(&self) -> Vector2Int {
        self.origin
    }

    pub fn size(&self) -> Vector2UInt {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.x
    }

    pub fn height(&self) -> u32 {
        self.size.y
    }

    pub fn work_area_origin(&self) -> Vector2Int {
        self.work_area_origin
    }

    pub fn work_area_size(&self) -> Vector2UInt {
        self.work_area_size
    }

    pub fn refresh_rate(&self) -> u16 {
        self.refresh_rate
    }

    pub fn orientation(&self) -> ScreenOrientation {
        self.orientation
    }

    pub fn backend_type(&self) -> BackendType {
        self.backend
    }

    /// `true` if the desktop point lies within the full screen area.
    pub fn contains(&self, point: Vector2Int) -> bool {
        let min = self.origin;
        let max_x = i64::from(min.x) + i64::from(self.size.x);
        let max_y = i64::from(min.y) + i64::from(self.size.y);
        point.x >= min.x
            && point.y >= min.y
            && i64::from(point.x) < max_x
            && i64::from(point.y) < max_y
    }

    //--- Listeners --------------------------------------------------------

    pub fn add_event_listener<E: Event>(
        &mut self,
        callback: impl FnMut(&E) -> bool + 'static,
    ) -> SubscriptionId
    where
        ScreenEvents: EventSource<E>,
    {
        self.events.dispatcher_mut().subscribe(callback)
    }

    pub fn remove_event_listener<E: Event>(&mut self, id: SubscriptionId) -> bool
    where
        ScreenEvents: EventSource<E>,
    {
        self.events.dispatcher_mut().unsubscribe(id)
    }
}

//=== Work Area ===========================================================

/// Subtracts `reserved` from a screen; oversized insets saturate to an
/// empty area at the clamped offset.
fn work_area(origin: Vector2Int, size: Vector2UInt, reserved: Insets) -> (Vector2Int, Vector2UInt) {
    let offset_x = reserved.left.min(size.x);
    let offset_y = reserved.bottom.min(size.y);

    let work_origin = Vector2Int::new(
        origin.x.saturating_add(offset_x as i32),
        origin.y.saturating_add(offset_y as i32),
    );
    let work_size = Vector2UInt::new(
        size.x.saturating_sub(reserved.horizontal()),
        size.y.saturating_sub(reserved.vertical()),
    );

    (work_origin, work_size)
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn screen(reserved: Insets) -> Screen {
        let info = ScreenInfo::new("Primary", Vector2Int::new(0, 0), Vector2UInt::new(1920, 1080))
            .with_reserved(reserved);
        Screen::new(info, BackendType::Headless)
    }

    #[test]
    fn bottom_taskbar_shrinks_work_area() {
        let screen = screen(Insets::new(0, 0, 0, 40));
        assert_eq!(screen.work_area_size(), Vector2UInt::new(1920, 1040));
        assert_eq!(screen.work_area_origin(), Vector2Int::new(0, 40));
    }

    #[test]
    fn missing_reserved_data_yields_full_area() {
        let screen = screen(Insets::NONE);
        assert_eq!(screen.work_area_size(), screen.size());
        assert_eq!(screen.work_area_origin(), screen.origin());
    }

    #[test]
    fn all_edges_are_subtracted() {
        let info = ScreenInfo::new("Side", Vector2Int::new(1920, 100), Vector2UInt::new(1280, 1024))
            .with_reserved(Insets::new(64, 0, 25, 0));
        let screen = Screen::new(info, BackendType::Cocoa);

        assert_eq!(screen.work_area_size(), Vector2UInt::new(1216, 999));
        assert_eq!(screen.work_area_origin(), Vector2Int::new(1984, 100));
    }

    #[test]
    fn oversized_insets_saturate() {
        let (origin, size) = work_area(Vector2Int::ZERO, Vector2UInt::new(100, 100), Insets::new(80, 80, 0, 500));
        assert_eq!(size, Vector2UInt::new(0, 0));
        assert_eq!(origin, Vector2Int::new(80, 100));
    }

    #[test]
    fn contains_is_half_open() {
        let screen = screen(Insets::NONE);
        assert!(screen.contains(Vector2Int::new(0, 0)));
        assert!(screen.contains(Vector2Int::new(1919, 1079)));
        assert!(!screen.contains(Vector2Int::new(1920, 500)));
        assert!(!screen.contains(Vector2Int::new(-1, 500)));
    }

    #[test]
    fn reorient_updates_and_dispatches() {
        let mut screen = screen(Insets::NONE);
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        screen.add_event_listener::<ScreenReorientEvent>(move |event| {
            *sink.borrow_mut() = Some(event.orientation);
            true
        });

        screen.register_screen_reorient(ScreenOrientation::PORTRAIT_FLIPPED);

        assert_eq!(screen.orientation(), ScreenOrientation::PORTRAIT_FLIPPED);
        assert_eq!(*seen.borrow(), Some(ScreenOrientation::PORTRAIT_FLIPPED));
    }

    #[test]
    #[should_panic(expected = "concrete orientation")]
    fn reorient_rejects_portrait_any() {
        screen(Insets::NONE).register_screen_reorient(ScreenOrientation::PORTRAIT_ANY);
    }

    #[test]
    #[should_panic(expected = "concrete orientation")]
    fn reorient_rejects_landscape_any() {
        screen(Insets::NONE).register_screen_reorient(ScreenOrientation::LANDSCAPE_ANY);
    }

    #[test]
    fn rotation_detection() {
        let landscape = ScreenInfo::new("Panel", Vector2Int::ZERO, Vector2UInt::new(2400, 1080));
        let portrait = ScreenInfo::new("Panel", Vector2Int::ZERO, Vector2UInt::new(1080, 2400));
        assert!(portrait.is_rotation_of(&landscape));
        assert!(!landscape.is_rotation_of(&landscape));
    }
}
