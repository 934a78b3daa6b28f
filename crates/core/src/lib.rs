#![forbid(unsafe_code)]

pub mod model;
pub mod time;
pub mod timer;
pub mod viewport;

pub use time::Clock;
pub use timer::ExamTimer;
pub use viewport::{DocumentViewport, ZOOM_LEVELS};
