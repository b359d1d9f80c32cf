pub mod chrome;
pub mod color;
pub mod config;
pub mod error;
pub mod log;
pub mod scene;
pub mod tick;
pub mod time;

pub use chrome::{Chrome, HitTest, ShowCommand, ShowState, SizeReason};
pub use color::Color;
pub use config::{Config, Palette};
pub use error::{AppError, GraphicsError};
pub use scene::{Scene, Size, TextRole};
pub use tick::{RedrawTarget, TICK_INTERVAL, Ticker};
pub use time::{ClockSnapshot, LocalTime, TimeSource, Weekday};
