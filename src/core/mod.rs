//=========================================================================
// Core
//
// Platform-independent half of the windowing layer.
//
// Responsibilities:
// - Typed event dispatch shared by every subsystem
// - Keyboard/mouse, cursor and touch state machines
// - Screen geometry and work-area computation
// - Window lifecycle and the per-backend routing protocol
// - The contract backends implement (`platform_bridge`)
//
// Notes:
// Everything here is single-threaded and synchronous. Native events are
// produced by a backend during `PlatformContext::update` and consumed by
// each `Window::update` on the same thread.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod cursor;
pub mod error;
pub mod event;
pub mod geometry;
pub mod input;
pub mod platform_bridge;
pub mod screen;
pub mod touch;
pub mod window;
