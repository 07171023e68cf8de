//! Run timing and the persisted best-time record.

use crate::core::constants::{BEST_TIME_ACHIEVED_AT_KEY, BEST_TIME_KEY};
use crate::utils::persistence::KeyValueStore;
use chrono::{DateTime, Utc};

/// Formats milliseconds as `MM:SS.cs`.
pub fn format_duration(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms / 1000) % 60;
    let centis = (ms % 1000) / 10;
    format!("{:02}:{:02}.{:02}", minutes, seconds, centis)
}

/// Elapsed time for the current run plus the all-time best.
///
/// Times are passed in from a [`Clock`](super::clock::Clock) so elapsed is
/// always a delta between two readings, never an accumulated tick count.
/// Only runs begun with [`start`](Self::start) can set a record; a run
/// begun with [`start_unranked`](Self::start_unranked) is timed but never
/// committed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunTimer {
    started_at: Option<u64>,
    elapsed_ms: u64,
    running: bool,
    record_eligible: bool,
    best_time_ms: Option<u64>,
    best_achieved_at: Option<DateTime<Utc>>,
}

impl RunTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a stopped timer with the best time read from `store`.
    /// Missing or unparsable values mean there is no record yet.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let best_time_ms = store.get(BEST_TIME_KEY).and_then(|raw| {
            let parsed = raw.trim().parse::<u64>().ok();
            if parsed.is_none() {
                tracing::warn!(value = %raw, "ignoring malformed best time");
            }
            parsed
        });
        let best_achieved_at = best_time_ms.and(
            store
                .get(BEST_TIME_ACHIEVED_AT_KEY)
                .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
                .map(|dt| dt.with_timezone(&Utc)),
        );
        Self {
            best_time_ms,
            best_achieved_at,
            ..Self::default()
        }
    }

    /// Starts timing a run from level 1.
    pub fn start(&mut self, now_ms: u64) {
        self.started_at = Some(now_ms);
        self.elapsed_ms = 0;
        self.running = true;
        self.record_eligible = true;
    }

    /// Starts timing a run that picked up saved progress.
    pub fn start_unranked(&mut self, now_ms: u64) {
        self.start(now_ms);
        self.record_eligible = false;
    }

    /// Continues a stopped run without losing the time already counted.
    pub fn resume(&mut self, now_ms: u64) {
        if self.running {
            return;
        }
        self.started_at = Some(now_ms.saturating_sub(self.elapsed_ms));
        self.running = true;
    }

    /// Freezes the elapsed time and returns it.
    pub fn stop(&mut self, now_ms: u64) -> u64 {
        if self.running {
            if let Some(started) = self.started_at {
                self.elapsed_ms = now_ms.saturating_sub(started);
            }
            self.running = false;
        }
        self.elapsed_ms
    }

    /// Stops and clears the run. The best time is kept.
    pub fn reset(&mut self) {
        self.running = false;
        self.started_at = None;
        self.elapsed_ms = 0;
        self.record_eligible = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// True if the current run started from level 1.
    pub fn is_record_eligible(&self) -> bool {
        self.record_eligible
    }

    /// Elapsed time as of `now_ms`; frozen once stopped.
    pub fn elapsed_at(&self, now_ms: u64) -> u64 {
        match (self.running, self.started_at) {
            (true, Some(started)) => now_ms.saturating_sub(started),
            _ => self.elapsed_ms,
        }
    }

    /// Elapsed time captured by the last `stop`.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn best_time_ms(&self) -> Option<u64> {
        self.best_time_ms
    }

    pub fn best_achieved_at(&self) -> Option<DateTime<Utc>> {
        self.best_achieved_at
    }

    pub fn display(&self, now_ms: u64) -> String {
        format_duration(self.elapsed_at(now_ms))
    }

    /// Records the stopped run's time if it beats the best (or there is none).
    /// Unranked runs never count.
    ///
    /// A failed write is logged; the in-memory record still updates.
    pub fn check_and_commit_record(&mut self, store: &mut dyn KeyValueStore) -> bool {
        if !self.record_eligible {
            tracing::debug!(elapsed_ms = self.elapsed_ms, "unranked run, record not checked");
            return false;
        }
        let is_record = match self.best_time_ms {
            None => true,
            Some(best) => self.elapsed_ms < best,
        };
        if !is_record {
            return false;
        }

        let achieved_at = Utc::now();
        self.best_time_ms = Some(self.elapsed_ms);
        self.best_achieved_at = Some(achieved_at);

        if let Err(e) = store.set(BEST_TIME_KEY, self.elapsed_ms.to_string()) {
            tracing::warn!(error = %e, "failed to persist best time");
        } else if let Err(e) = store.set(BEST_TIME_ACHIEVED_AT_KEY, achieved_at.to_rfc3339()) {
            tracing::warn!(error = %e, "failed to persist best time date");
        }
        true
    }

    /// Forgets the best time, in memory and in `store`.
    pub fn clear_record(&mut self, store: &mut dyn KeyValueStore) {
        self.best_time_ms = None;
        self.best_achieved_at = None;
        for key in [BEST_TIME_KEY, BEST_TIME_ACHIEVED_AT_KEY] {
            if let Err(e) = store.remove(key) {
                tracing::warn!(error = %e, key, "failed to clear best time");
            }
        }
    }
}
