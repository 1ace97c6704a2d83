//! Daily rollover: a driver loop that fires `finalize` near the end of each UTC
//! day and `reload` shortly after the next one starts.

use crate::board::Board;
use crate::error::CoreError;
use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolloverTrigger {
    /// Flush the open day, then clear the cache.
    Finalize,
    /// Load the new day's snapshot into the cache.
    Reload,
}

impl fmt::Display for RolloverTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RolloverTrigger::Finalize => f.write_str("finalize"),
            RolloverTrigger::Reload => f.write_str("reload"),
        }
    }
}

/// Times of day (UTC) at which the two triggers fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloverSchedule {
    pub finalize_at: NaiveTime,
    pub reload_at: NaiveTime,
}

impl Default for RolloverSchedule {
    fn default() -> Self {
        Self {
            finalize_at: NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN),
            reload_at: NaiveTime::from_hms_opt(0, 1, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

impl RolloverSchedule {
    /// First instant strictly after `now` whose UTC time of day is `at`.
    pub fn next_fire(now: DateTime<Utc>, at: NaiveTime) -> DateTime<Utc> {
        let today = now.date_naive().and_time(at).and_utc();
        if today > now {
            today
        } else {
            today + Duration::days(1)
        }
    }

    /// The next trigger to fire after `now`. Finalize wins a tie.
    pub fn next_trigger(&self, now: DateTime<Utc>) -> (DateTime<Utc>, RolloverTrigger) {
        let finalize = Self::next_fire(now, self.finalize_at);
        let reload = Self::next_fire(now, self.reload_at);
        if reload < finalize {
            (reload, RolloverTrigger::Reload)
        } else {
            (finalize, RolloverTrigger::Finalize)
        }
    }
}

/// Runs one trigger against the board. Failures are logged here; there is no
/// caller to report them to.
pub async fn run_trigger(board: &Board, trigger: RolloverTrigger) -> Result<(), CoreError> {
    let result = match trigger {
        RolloverTrigger::Finalize => board.finalize_day().await.map(|_| ()),
        RolloverTrigger::Reload => board.reload_day().await.map(|_| ()),
    };
    if let Err(err) = &result {
        tracing::error!(%trigger, error = ?err, "rollover trigger failed");
    }
    result
}

pub struct RolloverScheduler {
    board: Arc<Board>,
    schedule: RolloverSchedule,
}

impl RolloverScheduler {
    pub fn new(board: Arc<Board>, schedule: RolloverSchedule) -> Self {
        Self { board, schedule }
    }

    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }

    /// Sleeps until each trigger is due and runs it, until `shutdown` flips to
    /// true or its sender is dropped.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut cursor = self.board.clock().now();
        tracing::info!(
            finalize_at = %self.schedule.finalize_at,
            reload_at = %self.schedule.reload_at,
            "rollover scheduler started"
        );

        loop {
            let (fire_at, trigger) = self.schedule.next_trigger(cursor);
            let wait = (fire_at - self.board.clock().now())
                .to_std()
                .unwrap_or(std::time::Duration::ZERO);
            tracing::debug!(%trigger, %fire_at, "next rollover trigger scheduled");

            tokio::select! {
                _ = tokio::time::sleep(wait) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                    continue;
                }
            }

            let _ = run_trigger(&self.board, trigger).await;
            // Never schedule from before the instant just handled, or an early
            // wake-up would fire the same trigger twice.
            cursor = fire_at.max(self.board.clock().now());
        }

        tracing::info!("rollover scheduler stopped");
    }
}
