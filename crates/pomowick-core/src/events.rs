use serde::{Deserialize, Serialize};

use crate::timer::Mode;

/// Every timer command that changes state produces an event.
///
/// Commands that would be invalid in the current state return `None`
/// instead, so the absence of an event is the caller's diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimerEvent {
    Started {
        mode: Mode,
        duration_secs: u64,
    },
    Paused {
        mode: Mode,
        /// Remaining seconds, or elapsed seconds while counting up.
        remaining_secs: u64,
        count_up: bool,
    },
    Resumed {
        mode: Mode,
        remaining_secs: u64,
    },
    Stopped {
        mode: Mode,
    },
    ModeSwitched {
        from: Mode,
        to: Mode,
        duration_secs: u64,
    },
    ContinuedFocusStarted,
}
