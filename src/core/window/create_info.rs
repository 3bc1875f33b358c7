//=========================================================================
// Window Create Info
//
// Description of a window to create, validated before any native
// resource is touched.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::error::ConfigurationError;
use crate::core::screen::ScreenOrientation;

//=== WindowCreateInfo ====================================================

/// Parameters for `PlatformContext::create_window`.
///
/// # Example
///
/// ```
/// use aetheric_windowing::prelude::*;
///
/// let info = WindowCreateInfo::new("Editor")
///     .with_size(1600, 900)
///     .with_resizable(true)
///     .with_maximize(true);
/// assert!(info.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WindowCreateInfo {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    /// Orientations the window may be displayed in (mobile only).
    pub allowed_orientations: ScreenOrientation,
    pub maximize: bool,
    pub hide: bool,
}

impl WindowCreateInfo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    //--- Fluent Setters ---------------------------------------------------

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn with_allowed_orientations(mut self, orientations: ScreenOrientation) -> Self {
        self.allowed_orientations = orientations;
        self
    }

    pub fn with_maximize(mut self, maximize: bool) -> Self {
        self.maximize = maximize;
        self
    }

    pub fn with_hide(mut self, hide: bool) -> Self {
        self.hide = hide;
        self
    }

    //--- Validation -------------------------------------------------------

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.title.is_empty() {
            return Err(ConfigurationError::EmptyTitle);
        }
        if self.width == 0 {
            return Err(ConfigurationError::ZeroWidth);
        }
        if self.height == 0 {
            return Err(ConfigurationError::ZeroHeight);
        }
        Ok(())
    }
}

impl Default for WindowCreateInfo {
    fn default() -> Self {
        Self {
            title: String::from("Window"),
            width: 1280,
            height: 780,
            resizable: false,
            allowed_orientations: ScreenOrientation::ANY,
            maximize: false,
            hide: false,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let info = WindowCreateInfo::default();
        assert_eq!(info.title, "Window");
        assert_eq!((info.width, info.height), (1280, 780));
        assert_eq!(info.allowed_orientations, ScreenOrientation::ANY);
        assert!(info.validate().is_ok());
    }

    #[test]
    fn empty_title_is_rejected() {
        let info = WindowCreateInfo::new("");
        assert_eq!(info.validate(), Err(ConfigurationError::EmptyTitle));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            WindowCreateInfo::new("A").with_size(0, 10).validate(),
            Err(ConfigurationError::ZeroWidth)
        );
        assert_eq!(
            WindowCreateInfo::new("A").with_size(10, 0).validate(),
            Err(ConfigurationError::ZeroHeight)
        );
    }
}
