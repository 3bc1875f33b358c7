//=========================================================================
// Touch
//
// One physical contact on a touch surface, identified by the id the
// platform assigned to it for the lifetime of the contact.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::time::{Duration, Instant};

//=== Internal Dependencies ===============================================

use crate::core::geometry::Vector2;

//=== TouchId =============================================================

/// Platform-assigned contact identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TouchId(pub u64);

//=== TouchType ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchType {
    Press,
    Release,
}

//=== Touch ===============================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touch {
    pub id: TouchId,
    pub kind: TouchType,
    /// Time of the last press or move.
    pub tap_time: Instant,
    /// Normalized pressure, `1.0` when the device does not report it.
    pub force: f32,
    /// Bottom-left, Y-up client space.
    pub position: Vector2,
    pub last_position: Vector2,
}

impl Touch {
    /// A new contact at `position`.
    pub fn press(id: TouchId, position: Vector2, force: f32) -> Self {
        Self {
            id,
            kind: TouchType::Press,
            tap_time: Instant::now(),
            force,
            position,
            last_position: position,
        }
    }

    pub fn delta(&self) -> Vector2 {
        self.position - self.last_position
    }

    /// Time since the contact last pressed or moved.
    pub fn hold_duration(&self) -> Duration {
        self.tap_time.elapsed()
    }

    pub fn is_released(&self) -> bool {
        self.kind == TouchType::Release
    }
}
