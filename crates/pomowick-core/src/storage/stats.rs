//! SQLite-backed daily focus totals.
//!
//! One row per local calendar day. Recording focus time adds to today's
//! row, so a new day starts from zero while earlier days stay as history.

use std::path::Path;

use chrono::{Local, NaiveDate};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

use super::{data_dir, Settings};
use crate::error::{CoreError, StatsError};

const DAY_FMT: &str = "%Y-%m-%d";

/// Sink for completed focus time.
pub trait FocusLog {
    /// Add `secs` of focus to today's total.
    fn record_focus_seconds(&mut self, secs: u64) -> Result<(), StatsError>;
}

impl<L: FocusLog + ?Sized> FocusLog for &mut L {
    fn record_focus_seconds(&mut self, secs: u64) -> Result<(), StatsError> {
        (**self).record_focus_seconds(secs)
    }
}

/// In-memory [`FocusLog`] that keeps every entry.
#[derive(Debug, Clone, Default)]
pub struct MemoryFocusLog {
    entries: Vec<u64>,
}

impl MemoryFocusLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[u64] {
        &self.entries
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().sum()
    }
}

impl FocusLog for MemoryFocusLog {
    fn record_focus_seconds(&mut self, secs: u64) -> Result<(), StatsError> {
        self.entries.push(secs);
        Ok(())
    }
}

/// Focus total for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTotal {
    pub day: NaiveDate,
    pub focus_seconds: u64,
}

/// Today's progress against the daily goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    pub day: NaiveDate,
    pub focus_seconds: u64,
    pub goal_seconds: u64,
    /// Focus plus the rest it earns at the configured divisor.
    pub spent_seconds: u64,
    pub remaining_seconds: u64,
}

impl DailySummary {
    pub fn compute(day: NaiveDate, focus_seconds: u64, settings: &Settings) -> Self {
        let goal_seconds = u64::from(settings.daily_goal_minutes) * 60;
        let earned_rest = if settings.rest_divisor.is_finite() && settings.rest_divisor > 0.0 {
            (focus_seconds as f64 / settings.rest_divisor).floor() as u64
        } else {
            0
        };
        let spent_seconds = focus_seconds.saturating_add(earned_rest);
        Self {
            day,
            focus_seconds,
            goal_seconds,
            spent_seconds,
            remaining_seconds: goal_seconds.saturating_sub(spent_seconds),
        }
    }
}

/// Daily focus statistics database.
pub struct StatsDb {
    conn: Connection,
}

impl StatsDb {
    /// Open the database at `<data dir>/pomowick.db`.
    ///
    /// # Errors
    /// Returns an error if the data directory or database cannot be opened.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("pomowick.db");
        Ok(Self::open_at(&path)?)
    }

    /// Open (or create) the database at `path`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self, StatsError> {
        let conn = Connection::open(path).map_err(|source| StatsError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self, StatsError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS daily_focus (
                day           TEXT PRIMARY KEY,
                focus_seconds INTEGER NOT NULL DEFAULT 0
            );",
        )
    }

    /// Add focus seconds to `day`.
    ///
    /// # Errors
    /// Returns an error if the upsert fails.
    pub fn add_focus_seconds(&self, day: NaiveDate, secs: u64) -> Result<(), StatsError> {
        let secs = i64::try_from(secs).unwrap_or(i64::MAX);
        self.conn.execute(
            "INSERT INTO daily_focus (day, focus_seconds) VALUES (?1, ?2)
             ON CONFLICT(day) DO UPDATE SET focus_seconds = focus_seconds + excluded.focus_seconds",
            params![day.format(DAY_FMT).to_string(), secs],
        )?;
        Ok(())
    }

    /// Focus seconds recorded on `day`; zero when nothing was recorded.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn focus_seconds_on(&self, day: NaiveDate) -> Result<u64, StatsError> {
        let secs: Option<i64> = self
            .conn
            .query_row(
                "SELECT focus_seconds FROM daily_focus WHERE day = ?1",
                params![day.format(DAY_FMT).to_string()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(secs.map(|s| s.max(0) as u64).unwrap_or(0))
    }

    /// Summary for `day` against the goal in `settings`.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn summary_for(&self, day: NaiveDate, settings: &Settings) -> Result<DailySummary, StatsError> {
        let focus = self.focus_seconds_on(day)?;
        Ok(DailySummary::compute(day, focus, settings))
    }

    /// Summary for today's local date.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn today_summary(&self, settings: &Settings) -> Result<DailySummary, StatsError> {
        self.summary_for(today(), settings)
    }

    /// Most recent `days` days with recorded focus, newest first.
    ///
    /// # Errors
    /// Returns an error if the query fails or a stored day is malformed.
    pub fn history(&self, days: u32) -> Result<Vec<DayTotal>, StatsError> {
        let mut stmt = self.conn.prepare(
            "SELECT day, focus_seconds FROM daily_focus ORDER BY day DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![days], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut totals = Vec::new();
        for row in rows {
            let (day, secs) = row?;
            let day = NaiveDate::parse_from_str(&day, DAY_FMT).map_err(|_| StatsError::BadDay(day))?;
            totals.push(DayTotal {
                day,
                focus_seconds: secs.max(0) as u64,
            });
        }
        Ok(totals)
    }
}

impl FocusLog for StatsDb {
    fn record_focus_seconds(&mut self, secs: u64) -> Result<(), StatsError> {
        if secs == 0 {
            return Ok(());
        }
        self.add_focus_seconds(today(), secs)?;
        tracing::info!(secs, "focus time recorded");
        Ok(())
    }
}

/// Today's local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DAY_FMT).unwrap()
    }

    #[test]
    fn empty_day_is_zero() {
        let db = StatsDb::open_memory().unwrap();
        assert_eq!(db.focus_seconds_on(today()).unwrap(), 0);
    }

    #[test]
    fn records_accumulate_within_a_day() {
        let mut db = StatsDb::open_memory().unwrap();
        db.record_focus_seconds(30 * 60).unwrap();
        db.record_focus_seconds(15 * 60).unwrap();
        assert_eq!(db.focus_seconds_on(today()).unwrap(), 45 * 60);
    }

    #[test]
    fn recording_zero_is_a_noop() {
        let mut db = StatsDb::open_memory().unwrap();
        db.record_focus_seconds(0).unwrap();
        assert!(db.history(10).unwrap().is_empty());
    }

    #[test]
    fn new_day_starts_from_zero() {
        let db = StatsDb::open_memory().unwrap();
        db.add_focus_seconds(day("2024-03-01"), 5000).unwrap();
        assert_eq!(db.focus_seconds_on(day("2024-03-02")).unwrap(), 0);
        assert_eq!(db.focus_seconds_on(day("2024-03-01")).unwrap(), 5000);
    }

    #[test]
    fn history_is_newest_first_and_limited() {
        let db = StatsDb::open_memory().unwrap();
        db.add_focus_seconds(day("2024-03-01"), 100).unwrap();
        db.add_focus_seconds(day("2024-03-03"), 300).unwrap();
        db.add_focus_seconds(day("2024-03-02"), 200).unwrap();

        let history = db.history(2).unwrap();
        assert_eq!(
            history,
            vec![
                DayTotal { day: day("2024-03-03"), focus_seconds: 300 },
                DayTotal { day: day("2024-03-02"), focus_seconds: 200 },
            ]
        );
    }

    #[test]
    fn persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.db");
        {
            let mut db = StatsDb::open_at(&path).unwrap();
            db.record_focus_seconds(90).unwrap();
        }
        let db = StatsDb::open_at(&path).unwrap();
        assert_eq!(db.focus_seconds_on(today()).unwrap(), 90);
    }

    #[test]
    fn open_fails_on_garbage_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.db");
        std::fs::write(&path, "this is not a sqlite database, just some text padding it out").unwrap();
        assert!(StatsDb::open_at(&path).is_err());
    }

    #[test]
    fn summary_counts_earned_rest() {
        let settings = Settings::default();
        let summary = DailySummary::compute(day("2024-03-01"), 3600 + 25 * 60 + 5, &settings);
        assert_eq!(summary.goal_seconds, 450 * 60);
        assert_eq!(summary.focus_seconds, 5105);
        assert_eq!(summary.spent_seconds, 5105 + 1021);
        assert_eq!(summary.remaining_seconds, 450 * 60 - 6126);
    }

    #[test]
    fn summary_remaining_saturates_at_zero() {
        let mut settings = Settings::default();
        settings.daily_goal_minutes = 10;
        let summary = DailySummary::compute(day("2024-03-01"), 3600, &settings);
        assert_eq!(summary.remaining_seconds, 0);
    }

    #[test]
    fn memory_log_through_mut_ref() {
        fn record(mut log: impl FocusLog, secs: u64) {
            log.record_focus_seconds(secs).unwrap();
        }
        let mut log = MemoryFocusLog::new();
        record(&mut log, 60);
        record(&mut log, 5);
        assert_eq!(log.entries(), &[60, 5]);
        assert_eq!(log.total(), 65);
    }

    #[test]
    fn today_summary_reads_recorded_focus() {
        let mut db = StatsDb::open_memory().unwrap();
        db.record_focus_seconds(25 * 60).unwrap();
        let summary = db.today_summary(&Settings::default()).unwrap();
        assert_eq!(summary.day, today());
        assert_eq!(summary.focus_seconds, 25 * 60);
        assert_eq!(summary.spent_seconds, 30 * 60);
        assert_eq!(summary.remaining_seconds, 420 * 60);
    }
}
