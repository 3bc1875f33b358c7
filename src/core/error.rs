//=========================================================================
// Error Taxonomy
//=========================================================================
//
// Recoverable failures surfaced through `Result`.
//
// Four classes of failure exist in the windowing layer:
//
// ```text
//  Configuration errors   → PlatformError::InvalidConfiguration (Err)
//  Native hard failures   → DisplayUnavailable / WindowCreation (Err)
//  Capability gaps        → log::warn! + no-op (never an Err)
//  Precondition errors    → panic (programming defects)
// ```
//
// Round-trips against the native layer are bounded; giving up is
// reported as `RoundTripTimeout` to callers that cannot degrade.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;
use std::time::Duration;

//=== ConfigurationError ==================================================

/// Invalid `WindowCreateInfo` detected before any native resource exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The window title is empty.
    EmptyTitle,

    /// The requested width is zero.
    ZeroWidth,

    /// The requested height is zero.
    ZeroHeight,
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "window title must not be empty"),
            Self::ZeroWidth => write!(f, "window width must be greater than 0"),
            Self::ZeroHeight => write!(f, "window height must be greater than 0"),
        }
    }
}

impl std::error::Error for ConfigurationError {}

//=== PlatformError =======================================================

/// Errors returned by `PlatformContext` construction and window creation.
///
/// These are typically fatal for application startup: without a display
/// or a window handle the abstraction cannot proceed.
#[derive(Debug)]
pub enum PlatformError {
    /// Window creation parameters were rejected.
    InvalidConfiguration(ConfigurationError),

    /// The native display or event loop could not be opened.
    DisplayUnavailable(String),

    /// The native window could not be created.
    WindowCreation(String),

    /// A bounded native round-trip did not complete in time.
    RoundTripTimeout {
        operation: &'static str,
        waited: Duration,
    },

    /// The requested backend cannot run on this target.
    Unsupported(&'static str),
}

//--- Trait Implementations -----------------------------------------------

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration(e) => write!(f, "Invalid window configuration: {}", e),
            Self::DisplayUnavailable(e) => write!(f, "Display unavailable: {}", e),
            Self::WindowCreation(e) => write!(f, "Window creation failed: {}", e),
            Self::RoundTripTimeout { operation, waited } => {
                write!(f, "Native round-trip '{}' timed out after {:?}", operation, waited)
            }
            Self::Unsupported(what) => write!(f, "Unsupported: {}", what),
        }
    }
}

impl std::error::Error for PlatformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidConfiguration(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigurationError> for PlatformError {
    fn from(error: ConfigurationError) -> Self {
        Self::InvalidConfiguration(error)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn platform_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PlatformError>();
        assert_error::<ConfigurationError>();
    }

    #[test]
    fn configuration_error_converts_and_keeps_source() {
        let error: PlatformError = ConfigurationError::EmptyTitle.into();
        assert!(matches!(error, PlatformError::InvalidConfiguration(ConfigurationError::EmptyTitle)));
        assert!(error.source().is_some());
        assert!(error.to_string().contains("title"));
    }

    #[test]
    fn timeout_display_names_operation() {
        let error = PlatformError::RoundTripTimeout {
            operation: "frame extents",
            waited: Duration::from_millis(250),
        };
        let text = error.to_string();
        assert!(text.contains("frame extents"));
        assert!(text.contains("250ms"));
    }
}
