mod engine;
mod mode;

pub use engine::{minutes_to_duration, Timer, TimerState};
pub use mode::Mode;
