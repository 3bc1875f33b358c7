//=========================================================================
// Screen Orientation
//
// Flag set used both for concrete device orientations (one bit) and for
// query masks such as "any portrait" (several bits). Modelled after the
// `Modifiers` pattern: a transparent integer with associated constants.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

//=== ScreenOrientation ===================================================

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScreenOrientation(u8);

impl ScreenOrientation {
    pub const UNKNOWN: Self = Self(0x00);
    pub const PORTRAIT: Self = Self(0x01);
    pub const PORTRAIT_FLIPPED: Self = Self(0x02);
    pub const PORTRAIT_ANY: Self = Self(0x01 | 0x02);
    pub const LANDSCAPE: Self = Self(0x04);
    pub const LANDSCAPE_FLIPPED: Self = Self(0x08);
    pub const LANDSCAPE_ANY: Self = Self(0x04 | 0x08);
    pub const ANY: Self = Self(0x0F);

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// `true` if every orientation in `other` is allowed by `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// `true` if `self` and `other` share an orientation.
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// A single device orientation, or `UNKNOWN`. Masks like
    /// `PORTRAIT_ANY` are not concrete.
    pub const fn is_concrete(self) -> bool {
        self.0.count_ones() <= 1
    }

    pub const fn is_portrait(self) -> bool {
        self.intersects(Self::PORTRAIT_ANY) && !self.intersects(Self::LANDSCAPE_ANY)
    }

    pub const fn is_landscape(self) -> bool {
        self.intersects(Self::LANDSCAPE_ANY) && !self.intersects(Self::PORTRAIT_ANY)
    }

    /// Orientation implied by a screen's extent; square screens count as
    /// landscape.
    pub const fn from_extent(width: u32, height: u32) -> Self {
        if height > width {
            Self::PORTRAIT
        } else {
            Self::LANDSCAPE
        }
    }
}

//--- Trait Implementations -----------------------------------------------

impl BitOr for ScreenOrientation {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ScreenOrientation {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for ScreenOrientation {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Debug for ScreenOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(ScreenOrientation, &str); 4] = [
            (ScreenOrientation::PORTRAIT, "PORTRAIT"),
            (ScreenOrientation::PORTRAIT_FLIPPED, "PORTRAIT_FLIPPED"),
            (ScreenOrientation::LANDSCAPE, "LANDSCAPE"),
            (ScreenOrientation::LANDSCAPE_FLIPPED, "LANDSCAPE_FLIPPED"),
        ];

        if *self == Self::UNKNOWN {
            return f.write_str("UNKNOWN");
        }

        let mut first = true;
        for (flag, name) in NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_are_unions_of_concrete_flags() {
        assert_eq!(
            ScreenOrientation::PORTRAIT | ScreenOrientation::PORTRAIT_FLIPPED,
            ScreenOrientation::PORTRAIT_ANY
        );
        assert_eq!(
            ScreenOrientation::PORTRAIT_ANY | ScreenOrientation::LANDSCAPE_ANY,
            ScreenOrientation::ANY
        );
    }

    #[test]
    fn only_single_flags_are_concrete() {
        assert!(ScreenOrientation::PORTRAIT.is_concrete());
        assert!(ScreenOrientation::LANDSCAPE_FLIPPED.is_concrete());
        assert!(ScreenOrientation::UNKNOWN.is_concrete());
        assert!(!ScreenOrientation::PORTRAIT_ANY.is_concrete());
        assert!(!ScreenOrientation::LANDSCAPE_ANY.is_concrete());
        assert!(!ScreenOrientation::ANY.is_concrete());
    }

    #[test]
    fn contains_checks_allowed_set() {
        let allowed = ScreenOrientation::LANDSCAPE_ANY;
        assert!(allowed.contains(ScreenOrientation::LANDSCAPE_FLIPPED));
        assert!(!allowed.contains(ScreenOrientation::PORTRAIT));
        assert!(ScreenOrientation::ANY.contains(allowed));
    }

    #[test]
    fn extent_maps_to_orientation() {
        assert_eq!(ScreenOrientation::from_extent(1080, 1920), ScreenOrientation::PORTRAIT);
        assert_eq!(ScreenOrientation::from_extent(1920, 1080), ScreenOrientation::LANDSCAPE);
        assert!(ScreenOrientation::PORTRAIT_FLIPPED.is_portrait());
        assert!(!ScreenOrientation::ANY.is_portrait());
    }

    #[test]
    fn debug_lists_flags() {
        assert_eq!(format!("{:?}", ScreenOrientation::PORTRAIT_ANY), "PORTRAIT | PORTRAIT_FLIPPED");
        assert_eq!(format!("{:?}", ScreenOrientation::UNKNOWN), "UNKNOWN");
    }
}
