//! Timer state machine.
//!
//! The timer is a pure, synchronous object driven by monotonic clock
//! deltas. It does not use internal threads - the caller is responsible for
//! calling `tick()` roughly once per second.
//!
//! ## State Transitions
//!
//! ```text
//!              start                 tick() == true
//! Idle ----------------> Countdown ------------------> (caller decides)
//!  ^                      |     ^                        |
//!  |  stop / switch_mode  |     | resume                 | start_continued_focus
//!  +----------------------+     |                        v
//!  |                      pause v                      CountUp
//!  +------------------------ Paused <--------------------+
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = Timer::new(focus, rest)?;
//! timer.start();
//! // In a loop, about once per second:
//! if timer.tick() { /* segment finished */ }
//! ```

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::mode::Mode;
use crate::clock::{Clock, MonotonicClock};
use crate::display::format_mm_ss;
use crate::error::ValidationError;
use crate::events::TimerEvent;

/// Coarse state derived from the timer's flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerState {
    Idle,
    RunningCountdown,
    /// Continued focus: `remaining` holds elapsed time.
    RunningCountUp,
    Paused,
}

/// Focus/rest timer.
///
/// Remaining time is always recomputed from a fixed anchor instead of being
/// decremented per tick, so scheduling jitter never accumulates.
#[derive(Debug, Clone)]
pub struct Timer<C: Clock = MonotonicClock> {
    clock: C,
    focus: Duration,
    rest: Duration,
    mode: Mode,
    running: bool,
    paused: bool,
    /// Time left in the segment; elapsed time while continued focus is active.
    remaining: Duration,
    continued_focus: bool,
    /// Start of the current unpaused run, shifted forward on resume.
    anchor: Instant,
    paused_at: Instant,
}

impl Timer<MonotonicClock> {
    /// Create a timer on the real monotonic clock.
    ///
    /// # Errors
    /// Returns [`ValidationError::NonPositiveDuration`] if either duration is zero.
    pub fn new(focus: Duration, rest: Duration) -> Result<Self, ValidationError> {
        Self::with_clock(focus, rest, MonotonicClock)
    }

    /// Create a timer from (possibly fractional) minutes.
    ///
    /// # Errors
    /// Fails when either value is not a finite, positive number of minutes.
    pub fn from_minutes(focus_min: f64, rest_min: f64) -> Result<Self, ValidationError> {
        let focus = minutes_to_duration("focus", focus_min)?;
        let rest = minutes_to_duration("rest", rest_min)?;
        Self::new(focus, rest)
    }
}

impl<C: Clock> Timer<C> {
    /// Create a timer reading time from `clock`.
    ///
    /// Starts idle in focus mode with the full focus duration remaining.
    ///
    /// # Errors
    /// Returns [`ValidationError::NonPositiveDuration`] if either duration is zero.
    pub fn with_clock(focus: Duration, rest: Duration, clock: C) -> Result<Self, ValidationError> {
        if focus.is_zero() {
            return Err(ValidationError::NonPositiveDuration {
                field: "focus",
                value: format!("{focus:?}"),
            });
        }
        if rest.is_zero() {
            return Err(ValidationError::NonPositiveDuration {
                field: "rest",
                value: format!("{rest:?}"),
            });
        }
        let now = clock.now();
        Ok(Self {
            clock,
            focus,
            rest,
            mode: Mode::Focus,
            running: false,
            paused: false,
            remaining: focus,
            continued_focus: false,
            anchor: now,
            paused_at: now,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn continued_focus_active(&self) -> bool {
        self.continued_focus
    }

    /// Remaining time as of the last `tick`/`pause`, or elapsed time while
    /// continued focus is active.
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// `remaining` floored to whole seconds.
    pub fn remaining_secs(&self) -> u64 {
        self.remaining.as_secs()
    }

    pub fn focus_duration(&self) -> Duration {
        self.focus
    }

    pub fn rest_duration(&self) -> Duration {
        self.rest
    }

    /// Full duration of the current mode.
    pub fn full_duration(&self) -> Duration {
        match self.mode {
            Mode::Focus => self.focus,
            Mode::Rest => self.rest,
        }
    }

    pub fn state(&self) -> TimerState {
        match (self.running, self.paused, self.continued_focus) {
            (false, _, _) => TimerState::Idle,
            (true, true, _) => TimerState::Paused,
            (true, false, true) => TimerState::RunningCountUp,
            (true, false, false) => TimerState::RunningCountdown,
        }
    }

    /// `remaining` as `MM:SS`. Minutes are not wrapped at the hour.
    pub fn display_string(&self) -> String {
        format_mm_ss(self.remaining_secs())
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start (or restart) a countdown of the full duration for the current mode.
    pub fn start(&mut self) -> Option<TimerEvent> {
        self.running = true;
        self.paused = false;
        self.continued_focus = false;
        self.anchor = self.clock.now();
        self.remaining = self.full_duration();
        Some(TimerEvent::Started {
            mode: self.mode,
            duration_secs: self.remaining.as_secs(),
        })
    }

    /// Freeze the current segment. No-op unless running and unpaused.
    pub fn pause(&mut self) -> Option<TimerEvent> {
        if !self.running || self.paused {
            tracing::debug!(state = ?self.state(), "pause ignored");
            return None;
        }
        let now = self.clock.now();
        let elapsed = now.saturating_duration_since(self.anchor);
        self.remaining = if self.continued_focus {
            elapsed
        } else {
            self.full_duration().saturating_sub(elapsed)
        };
        self.paused_at = now;
        self.paused = true;
        Some(TimerEvent::Paused {
            mode: self.mode,
            remaining_secs: self.remaining.as_secs(),
            count_up: self.continued_focus,
        })
    }

    /// Continue a paused segment, excluding the paused span from elapsed time.
    pub fn resume(&mut self) -> Option<TimerEvent> {
        if !self.running || !self.paused {
            tracing::debug!(state = ?self.state(), "resume ignored");
            return None;
        }
        let paused_for = self.clock.now().saturating_duration_since(self.paused_at);
        self.anchor += paused_for;
        self.paused = false;
        Some(TimerEvent::Resumed {
            mode: self.mode,
            remaining_secs: self.remaining.as_secs(),
        })
    }

    /// Return to idle with the full duration for the current mode.
    ///
    /// Elapsed time is discarded; persist it before calling if it matters.
    pub fn stop(&mut self) -> Option<TimerEvent> {
        self.running = false;
        self.paused = false;
        self.continued_focus = false;
        self.remaining = self.full_duration();
        Some(TimerEvent::Stopped { mode: self.mode })
    }

    /// Recompute `remaining` from the anchor.
    ///
    /// Returns `true` while a countdown sits at zero. Count-up never finishes
    /// on its own, and an idle or paused timer is left untouched.
    pub fn tick(&mut self) -> bool {
        if !self.running || self.paused {
            return false;
        }
        let elapsed = self.clock.now().saturating_duration_since(self.anchor);
        if self.continued_focus {
            self.remaining = elapsed;
            return false;
        }
        let left = self.full_duration().saturating_sub(elapsed);
        self.remaining = Duration::from_secs(left.as_secs());
        self.remaining.is_zero()
    }

    /// Flip Focus/Rest and go idle with the new mode's full duration.
    pub fn switch_mode(&mut self) -> Option<TimerEvent> {
        let from = self.mode;
        self.mode = from.toggled();
        self.running = false;
        self.paused = false;
        self.continued_focus = false;
        self.remaining = self.full_duration();
        Some(TimerEvent::ModeSwitched {
            from,
            to: self.mode,
            duration_secs: self.remaining.as_secs(),
        })
    }

    /// Keep focusing past a finished focus segment, counting up from zero.
    ///
    /// Only valid in focus mode with nothing remaining and continued focus
    /// not already active; otherwise nothing changes and a warning is logged.
    pub fn start_continued_focus(&mut self) -> Option<TimerEvent> {
        if self.mode != Mode::Focus || !self.remaining.is_zero() || self.continued_focus {
            tracing::warn!(
                mode = %self.mode,
                remaining_secs = self.remaining.as_secs(),
                continued_focus = self.continued_focus,
                "start_continued_focus called out of sequence"
            );
            return None;
        }
        self.running = true;
        self.paused = false;
        self.continued_focus = true;
        self.anchor = self.clock.now();
        self.remaining = Duration::ZERO;
        Some(TimerEvent::ContinuedFocusStarted)
    }
}

/// Convert user-facing minutes into a validated duration.
pub fn minutes_to_duration(field: &'static str, minutes: f64) -> Result<Duration, ValidationError> {
    let invalid = || ValidationError::NonPositiveDuration {
        field,
        value: minutes.to_string(),
    };
    if !minutes.is_finite() || minutes <= 0.0 {
        return Err(invalid());
    }
    let duration = Duration::try_from_secs_f64(minutes * 60.0).map_err(|_| invalid())?;
    if duration.is_zero() {
        return Err(invalid());
    }
    Ok(duration)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::clock::ManualClock;
    use proptest::prelude::*;

    #[derive(Debug, Clone, Copy)]
    enum Op {
        Start,
        Pause,
        Resume,
        Stop,
        Tick,
        Switch,
        Continue,
        Advance(u64),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Start),
            Just(Op::Pause),
            Just(Op::Resume),
            Just(Op::Stop),
            Just(Op::Tick),
            Just(Op::Switch),
            Just(Op::Continue),
            (0u64..120_000).prop_map(Op::Advance),
        ]
    }

    fn apply(timer: &mut Timer<ManualClock>, clock: &ManualClock, op: Op) {
        match op {
            Op::Start => {
                timer.start();
            }
            Op::Pause => {
                timer.pause();
            }
            Op::Resume => {
                timer.resume();
            }
            Op::Stop => {
                timer.stop();
            }
            Op::Tick => {
                timer.tick();
            }
            Op::Switch => {
                timer.switch_mode();
            }
            Op::Continue => {
                timer.start_continued_focus();
            }
            Op::Advance(ms) => clock.advance(Duration::from_millis(ms)),
        }
    }

    proptest! {
        #[test]
        fn any_positive_durations_build_idle_focus(focus in 1u64..100_000, rest in 1u64..100_000) {
            let timer = Timer::new(Duration::from_secs(focus), Duration::from_secs(rest)).unwrap();
            prop_assert_eq!(timer.mode(), Mode::Focus);
            prop_assert!(!timer.is_running());
            prop_assert_eq!(timer.remaining(), Duration::from_secs(focus));
        }

        #[test]
        fn non_positive_minutes_always_fail(focus in -1000.0f64..=0.0, rest in -1000.0f64..1000.0) {
            prop_assert!(Timer::from_minutes(focus, rest).is_err());
            prop_assert!(Timer::from_minutes(rest.abs() + 1.0, focus).is_err());
        }

        #[test]
        fn switch_mode_always_lands_idle(ops in proptest::collection::vec(op(), 0..40)) {
            let clock = ManualClock::new();
            let mut timer = Timer::with_clock(Duration::from_secs(90), Duration::from_secs(30), clock.clone()).unwrap();
            for op in ops {
                apply(&mut timer, &clock, op);
            }
            timer.switch_mode();
            prop_assert!(!timer.is_running());
            prop_assert!(!timer.is_paused());
            prop_assert!(!timer.continued_focus_active());
            prop_assert_eq!(timer.remaining(), timer.full_duration());
        }

        #[test]
        fn stop_always_resets(ops in proptest::collection::vec(op(), 0..40)) {
            let clock = ManualClock::new();
            let mut timer = Timer::with_clock(Duration::from_secs(90), Duration::from_secs(30), clock.clone()).unwrap();
            for op in ops {
                apply(&mut timer, &clock, op);
            }
            timer.stop();
            prop_assert_eq!(timer.state(), TimerState::Idle);
            prop_assert!(!timer.continued_focus_active());
            prop_assert_eq!(timer.remaining(), timer.full_duration());
        }

        #[test]
        fn continued_focus_only_from_finished_focus(ops in proptest::collection::vec(op(), 0..40)) {
            let clock = ManualClock::new();
            let mut timer = Timer::with_clock(Duration::from_secs(5), Duration::from_secs(3), clock.clone()).unwrap();
            for op in ops {
                apply(&mut timer, &clock, op);
            }
            let eligible = timer.mode() == Mode::Focus
                && timer.remaining().is_zero()
                && !timer.continued_focus_active();
            let before = (timer.mode(), timer.is_running(), timer.is_paused(), timer.remaining());
            let applied = timer.start_continued_focus().is_some();
            prop_assert_eq!(applied, eligible);
            if !applied {
                let after = (timer.mode(), timer.is_running(), timer.is_paused(), timer.remaining());
                prop_assert_eq!(before, after);
            }
        }

        #[test]
        fn countdown_never_finishes_with_time_left(steps in proptest::collection::vec(0u64..3_000, 1..30)) {
            let clock = ManualClock::new();
            let mut timer = Timer::with_clock(Duration::from_secs(20), Duration::from_secs(5), clock.clone()).unwrap();
            timer.start();
            let mut last = timer.remaining();
            for ms in steps {
                clock.advance(Duration::from_millis(ms));
                let finished = timer.tick();
                prop_assert_eq!(finished, timer.remaining().is_zero());
                prop_assert!(timer.remaining() <= last);
                last = timer.remaining();
            }
        }
    }
}
