//=========================================================================
// Geometry Primitives
//
// Small value types shared by every subsystem: float positions and
// deltas, signed pixel origins, unsigned pixel sizes and edge insets.
//
// Coordinate convention:
// All public positions produced by this crate are bottom-left origin,
// Y-up. Backends that report top-left, Y-down coordinates convert at the
// routing boundary (see `core::window`).
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

//=== Vector2 =============================================================

/// Floating-point 2D vector used for cursor, touch and scroll values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Vector2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vector2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vector2 {
    type Output = Self;
    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl From<(f32, f32)> for Vector2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

//=== Vector2Int ==========================================================

/// Signed pixel coordinate (window and screen origins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vector2Int {
    pub x: i32,
    pub y: i32,
}

impl Vector2Int {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Vector2Int {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2Int {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

//=== Vector2UInt =========================================================

/// Unsigned pixel extent (window, framebuffer and screen sizes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vector2UInt {
    pub x: u32,
    pub y: u32,
}

impl Vector2UInt {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Centre pixel of a `self`-sized area. Odd extents round down, so
    /// the result is always a position the OS can warp the pointer to.
    pub fn center(self) -> Vector2 {
        Vector2::new((self.x / 2) as f32, (self.y / 2) as f32)
    }

    /// Swaps width and height (portrait ⇄ landscape).
    pub fn transposed(self) -> Self {
        Self::new(self.y, self.x)
    }
}

//=== Insets ==============================================================

/// Per-edge pixel thickness reserved by the OS (taskbars, docks, status
/// bars) or drawn by the window manager (frame extents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// No reserved area. Also used when the OS could not report one.
    pub const NONE: Self = Self { left: 0, right: 0, top: 0, bottom: 0 };

    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    pub fn horizontal(&self) -> u32 {
        self.left.saturating_add(self.right)
    }

    pub fn vertical(&self) -> u32 {
        self.top.saturating_add(self.bottom)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_arithmetic() {
        let a = Vector2::new(120.0, 90.0);
        let b = Vector2::new(100.0, 100.0);
        assert_eq!(a - b, Vector2::new(20.0, -10.0));
        assert_eq!(-(a - b), Vector2::new(-20.0, 10.0));
        assert_eq!(a + b, Vector2::new(220.0, 190.0));
        assert_eq!(b * 0.5, Vector2::new(50.0, 50.0));
    }

    #[test]
    fn size_center_is_a_whole_pixel() {
        assert_eq!(Vector2UInt::new(800, 600).center(), Vector2::new(400.0, 300.0));
        assert_eq!(Vector2UInt::new(801, 601).center(), Vector2::new(400.0, 300.0));
    }

    #[test]
    fn insets_sum_edges() {
        let insets = Insets::new(10, 20, 30, 40);
        assert_eq!(insets.horizontal(), 30);
        assert_eq!(insets.vertical(), 70);
        assert!(!insets.is_none());
        assert!(Insets::NONE.is_none());
    }
}
