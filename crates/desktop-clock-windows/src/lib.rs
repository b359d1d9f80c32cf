//! Windows implementation of the desktop clock: Win32 window,
//! Direct2D/DirectWrite renderer, and the system clock.
#![cfg(windows)]

/// Application entry: startup, message loop, shutdown.
pub mod app;

/// Local time from `GetLocalTime`.
pub mod clock;

/// Per-monitor DPI awareness.
pub mod dpi;

mod message_pump;

/// Direct2D renderer.
pub mod renderer;

/// The clock window and its window procedure.
pub mod window;

pub use app::run;
pub use clock::SystemClock;
pub use renderer::Renderer;
pub use window::{ClockWindow, RedrawHandle};
