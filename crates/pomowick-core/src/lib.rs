//! # Pomowick Core Library
//!
//! Core logic for the pomowick Pomodoro timer. The `pomowick` CLI is a thin
//! terminal layer over this crate.
//!
//! ## Architecture
//!
//! - **Timer**: A monotonic-clock state machine that requires the caller to
//!   periodically invoke `tick()` for progress updates
//! - **Session**: Focus/rest/continued-focus rules layered over one timer
//! - **Storage**: TOML settings and SQLite daily focus totals
//! - **Notify**: Terminal bell and desktop notifications
//!
//! ## Key Components
//!
//! - [`Timer`]: Core timer state machine
//! - [`SessionDriver`]: Step-wise session runner
//! - [`StatsDb`]: Daily focus persistence
//! - [`Settings`]: User settings

pub mod clock;
pub mod display;
pub mod error;
pub mod events;
pub mod notify;
pub mod session;
pub mod storage;
pub mod timer;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use error::{ConfigError, CoreError, StatsError, ValidationError};
pub use events::TimerEvent;
pub use notify::{Notifier, NullNotifier, TerminalNotifier};
pub use session::{dynamic_rest, Prompter, SessionDriver, SessionPlan, SessionStep, SessionView};
pub use storage::{DailySummary, DayTotal, FocusLog, MemoryFocusLog, NotificationSettings, Settings, StatsDb};
pub use timer::{Mode, Timer, TimerState};
