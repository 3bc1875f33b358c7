//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges native backends (winit-driven OS windows, headless) with the
// core window, input, cursor and touch logic.
//
// This module defines the contract between backend implementations and
// core logic, so backends can be swapped without changing core code.
//
// Components:
// - `interface`: Capability traits (the contract)
// - `native_event`: Backend-neutral native event model
// - `profile`: Per-backend protocol quirks and capabilities
// - `registry`: Context-owned native window → inbox routing
// - `inbox`: Window-side bounded event buffering
//
//=========================================================================

//=== Module Declarations =================================================

mod inbox;
mod interface;
mod native_event;
mod profile;
mod registry;

//=== Public API ==========================================================

pub use interface::{NativeContext, NativeCursor, NativeWindow, NativeWindowParts};
pub use native_event::NativeEvent;
pub use profile::{BackendProfile, BackendType, CoordinateOrigin};

//=== Internal API ========================================================

pub(crate) use inbox::EventInbox;
pub(crate) use registry::WindowRegistry;
