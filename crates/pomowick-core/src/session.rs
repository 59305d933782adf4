//! Focus/rest session driver.
//!
//! Owns the single [`Timer`] for a session and applies the session rules
//! around it: logging finished focus time, offering rest, continued focus
//! with a rest that grows with it, and pause handling on interrupt.
//!
//! The driver never sleeps or reads the terminal. The caller invokes
//! [`SessionDriver::tick`] about once per second with the interrupt flag and
//! a [`Prompter`] for yes/no questions, then renders the returned view.
//!
//! ```text
//! begin ──> Focus ──(ends)──> "Start rest session?" ──yes──> Rest ──(ends)──> Finished
//!                                      │
//!                                      └──no──> Continued Focus ──(interrupt)──> Rest (scaled)
//!
//! any countdown ──(interrupt)──> "Resume?" ──no──> Abandoned
//! ```

use std::time::Duration;

use serde::Serialize;

use crate::clock::{Clock, MonotonicClock};
use crate::display::{countdown_progress, format_hms, status_line};
use crate::error::ValidationError;
use crate::notify::Notifier;
use crate::storage::{FocusLog, Settings};
use crate::timer::{minutes_to_duration, Mode, Timer};

/// Yes/no questions and informational lines for the user.
pub trait Prompter {
    fn confirm(&mut self, question: &str, default: bool) -> bool;
    fn say(&mut self, line: &str);
}

/// Focus and rest lengths for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPlan {
    pub focus: Duration,
    pub rest: Duration,
}

impl SessionPlan {
    /// Rest is `focus / rest_divisor`.
    ///
    /// # Errors
    /// Fails unless both resulting lengths are positive.
    pub fn new(focus: Duration, rest_divisor: f64) -> Result<Self, ValidationError> {
        if !rest_divisor.is_finite() || rest_divisor <= 0.0 {
            return Err(ValidationError::NonPositiveDuration {
                field: "rest_divisor",
                value: rest_divisor.to_string(),
            });
        }
        if focus.is_zero() {
            return Err(ValidationError::NonPositiveDuration {
                field: "focus",
                value: format!("{focus:?}"),
            });
        }
        let rest = Duration::try_from_secs_f64(focus.as_secs_f64() / rest_divisor)
            .ok()
            .filter(|rest| !rest.is_zero())
            .ok_or_else(|| ValidationError::NonPositiveDuration {
                field: "rest",
                value: format!("{focus:?} / {rest_divisor}"),
            })?;
        Ok(Self { focus, rest })
    }

    /// Plan from saved settings, optionally overriding the focus minutes.
    ///
    /// # Errors
    /// Fails if the focus minutes or divisor do not give positive lengths.
    pub fn from_settings(settings: &Settings, focus_minutes: Option<f64>) -> Result<Self, ValidationError> {
        let focus = minutes_to_duration("focus", focus_minutes.unwrap_or(settings.focus_minutes))?;
        Self::new(focus, settings.rest_divisor)
    }
}

/// Rest earned by a focus segment that ran `continued` past its nominal
/// length, keeping the planned rest/focus ratio. Whole seconds, at least one.
pub fn dynamic_rest(plan: &SessionPlan, continued: Duration) -> Duration {
    let total_focus = plan.focus.as_secs_f64() + continued.as_secs_f64();
    let secs = (total_focus * plan.rest.as_secs_f64() / plan.focus.as_secs_f64()).floor();
    if secs.is_finite() && secs >= 1.0 {
        Duration::from_secs(secs as u64)
    } else {
        Duration::from_secs(1)
    }
}

/// Snapshot for rendering the status line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    /// "Focus", "Rest" or "Continued Focus".
    pub label: &'static str,
    pub mode: Mode,
    /// Seconds left, or seconds of continued focus while counting up.
    pub secs: u64,
    pub progress: f64,
    pub paused: bool,
}

impl SessionView {
    pub fn clock_text(&self) -> String {
        format_hms(self.secs)
    }

    pub fn status_line(&self) -> String {
        status_line(self.label, self.secs, self.progress)
    }
}

/// Result of one driver step.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionStep {
    Running(SessionView),
    /// The rest segment ran out.
    Finished,
    /// The user declined to resume a paused countdown.
    Abandoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ended {
    Finished,
    Abandoned,
}

/// Drives one focus/rest session.
pub struct SessionDriver<L, N, C = MonotonicClock>
where
    L: FocusLog,
    N: Notifier,
    C: Clock + Clone,
{
    plan: SessionPlan,
    timer: Timer<C>,
    clock: C,
    log: L,
    notifier: N,
    ended: Option<Ended>,
}

impl<L: FocusLog, N: Notifier> SessionDriver<L, N, MonotonicClock> {
    /// Build the timer on the real clock and start the focus segment.
    ///
    /// # Errors
    /// Fails if the plan holds a zero duration.
    pub fn begin(plan: SessionPlan, log: L, notifier: N) -> Result<Self, ValidationError> {
        Self::begin_with_clock(plan, MonotonicClock, log, notifier)
    }
}

impl<L, N, C> SessionDriver<L, N, C>
where
    L: FocusLog,
    N: Notifier,
    C: Clock + Clone,
{
    /// Build the timer on `clock` and start the focus segment.
    ///
    /// # Errors
    /// Fails if the plan holds a zero duration.
    pub fn begin_with_clock(
        plan: SessionPlan,
        clock: C,
        log: L,
        notifier: N,
    ) -> Result<Self, ValidationError> {
        let mut timer = Timer::with_clock(plan.focus, plan.rest, clock.clone())?;
        timer.start();
        tracing::info!(
            focus_secs = plan.focus.as_secs(),
            rest_secs = plan.rest.as_secs(),
            "session started"
        );
        Ok(Self {
            plan,
            timer,
            clock,
            log,
            notifier,
            ended: None,
        })
    }

    pub fn plan(&self) -> &SessionPlan {
        &self.plan
    }

    pub fn timer(&self) -> &Timer<C> {
        &self.timer
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn is_over(&self) -> bool {
        self.ended.is_some()
    }

    pub fn view(&self) -> SessionView {
        let continued = self.timer.continued_focus_active();
        let secs = self.timer.remaining_secs();
        let progress = if continued {
            1.0
        } else {
            countdown_progress(self.timer.full_duration().as_secs(), secs)
        };
        SessionView {
            label: if continued {
                "Continued Focus"
            } else {
                self.timer.mode().label()
            },
            mode: self.timer.mode(),
            secs,
            progress,
            paused: self.timer.is_paused(),
        }
    }

    /// Advance the session by one step.
    pub fn tick(&mut self, interrupted: bool, prompt: &mut impl Prompter) -> SessionStep {
        match self.ended {
            Some(Ended::Finished) => return SessionStep::Finished,
            Some(Ended::Abandoned) => return SessionStep::Abandoned,
            None => {}
        }

        if interrupted {
            if self.timer.continued_focus_active() {
                self.stop_continued_focus(prompt);
                return SessionStep::Running(self.view());
            }
            if self.timer.is_running() {
                return self.pause_and_ask(prompt);
            }
        }

        if self.timer.tick() {
            return self.segment_finished(prompt);
        }
        SessionStep::Running(self.view())
    }

    fn segment_finished(&mut self, prompt: &mut impl Prompter) -> SessionStep {
        let mode = self.timer.mode();
        self.notifier.notify(&format!("{} session ended!", mode.label()));

        match mode {
            Mode::Focus => {
                self.record(self.timer.focus_duration().as_secs());
                if prompt.confirm("Start rest session?", true) {
                    self.timer.switch_mode();
                    self.timer.start();
                } else {
                    self.timer.start_continued_focus();
                    prompt.say("Continuing focus. Press Ctrl+C to stop and log.");
                }
                SessionStep::Running(self.view())
            }
            Mode::Rest => {
                self.timer.stop();
                self.ended = Some(Ended::Finished);
                tracing::info!("session finished");
                SessionStep::Finished
            }
        }
    }

    fn pause_and_ask(&mut self, prompt: &mut impl Prompter) -> SessionStep {
        if !self.timer.is_paused() {
            self.timer.pause();
        }
        prompt.say(&format!(
            "Timer paused at {}.",
            format_hms(self.timer.remaining_secs())
        ));
        if prompt.confirm("Resume?", true) {
            self.timer.resume();
            return SessionStep::Running(self.view());
        }

        if self.timer.mode() == Mode::Focus {
            let elapsed = self
                .timer
                .full_duration()
                .saturating_sub(self.timer.remaining());
            self.record(elapsed.as_secs());
        }
        self.timer.stop();
        self.ended = Some(Ended::Abandoned);
        tracing::info!("session abandoned");
        SessionStep::Abandoned
    }

    fn stop_continued_focus(&mut self, prompt: &mut impl Prompter) {
        self.timer.pause();
        let continued = self.timer.remaining_secs();
        if continued > 0 {
            self.record(continued);
            self.notifier.notify("Continued focus stopped.");
            prompt.say(&format!(
                "Logged {}m {}s of continued focus.",
                continued / 60,
                continued % 60
            ));
        }
        self.timer.stop();

        let rest = dynamic_rest(&self.plan, Duration::from_secs(continued));
        match Timer::with_clock(self.plan.focus, rest, self.clock.clone()) {
            Ok(timer) => self.timer = timer,
            Err(e) => tracing::warn!(error = %e, "keeping planned rest"),
        }
        self.timer.switch_mode();
        self.timer.start();
        prompt.say(&format!("Starting {} rest.", format_hms(rest.as_secs())));
    }

    fn record(&mut self, secs: u64) {
        if let Err(e) = self.log.record_focus_seconds(secs) {
            tracing::warn!(error = %e, secs, "failed to record focus time");
        }
    }
}
