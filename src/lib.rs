//=========================================================================
// Aetheric Windowing: Library Root
//
// Cross-platform windowing and input substrate: one interface for window
// lifecycle, keyboard/mouse/touch input, cursor control and monitor
// enumeration over Win32, X11, Cocoa, UIKit and Android activity windows.
//
// Responsibilities:
// - Expose the platform-independent core (`core`)
// - Expose the context that creates windows and pumps native events
//   (`platform`)
// - Keep backend internals private
//
// Typical usage:
// ```no_run
// use aetheric_windowing::prelude::*;
//
// fn main() -> Result<(), PlatformError> {
//     let mut context = PlatformContext::new()?;
//     let mut window = context.create_window(&WindowCreateInfo::new("Demo"))?;
//
//     while !window.is_closed() {
//         context.update();
//         window.update();
//
//         if let Some(input) = window.input_manager() {
//             if input.is_key_pressed(Key::Escape) {
//                 window.close();
//             }
//         }
//     }
//     Ok(())
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the abstraction: events, managers, window, screen and the
// bridge traits every backend implements.
//
// `platform` holds `PlatformContext`, its builder and the backends.
//
pub mod core;
pub mod platform;
pub mod prelude;

//--- Public Exports ------------------------------------------------------

pub use crate::core::error::PlatformError;
pub use crate::core::window::{Window, WindowCreateInfo};
pub use crate::platform::{PlatformContext, PlatformContextBuilder};
