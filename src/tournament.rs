//! Daily tournament bookkeeping
//!
//! Tournaments are keyed by UTC calendar date. Within a period only a
//! player's best score counts, and the board rolls over at 01:00 UTC.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Duration as ChronoDuration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Hour (UTC) at which the countdown shown to players rolls over
pub const RESET_HOUR_UTC: u32 = 1;

fn utc(unix_ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(unix_ms).unwrap_or_default()
}

/// Tournament identifier for an instant: its UTC date, `YYYY-MM-DD`
pub fn tournament_id(unix_ms: i64) -> String {
    utc(unix_ms).format("%Y-%m-%d").to_string()
}

/// Time left until the next reset
pub fn time_until_reset(unix_ms: i64) -> Duration {
    let now = utc(unix_ms);
    let reset_time = NaiveTime::from_hms_opt(RESET_HOUR_UTC, 0, 0).unwrap_or_default();
    let mut target = now.date_naive().and_time(reset_time).and_utc();
    if now > target {
        target += ChronoDuration::days(1);
    }
    (target - now).to_std().unwrap_or_default()
}

/// `HH:MM:SS` countdown text
pub fn format_countdown(remaining: Duration) -> String {
    let secs = remaining.as_secs();
    format!(
        "{:02}:{:02}:{:02}",
        (secs / 3600) % 24,
        (secs / 60) % 60,
        secs % 60
    )
}

/// Result of recording a score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recorded {
    NewBest,
    NotHigher { best: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestEntry {
    pub player: String,
    pub score: u32,
    /// Insertion sequence (earlier wins ties)
    pub seq: u64,
}

/// Per-period best scores; keeps a new score only if it beats the old one.
///
/// A player with no entry counts as a best of 0, so a zero score is never
/// stored and can never lead a period.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyBest {
    periods: HashMap<String, Vec<BestEntry>>,
    next_seq: u64,
}

impl DailyBest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, period: &str, player: &str, score: u32) -> Recorded {
        let seq = self.next_seq;
        self.next_seq += 1;

        let best = self.best(period, player).unwrap_or(0);
        if score <= best {
            return Recorded::NotHigher { best };
        }

        let entries = self.periods.entry(period.to_string()).or_default();
        match entries.iter_mut().find(|e| e.player == player) {
            Some(entry) => {
                entry.score = score;
                entry.seq = seq;
            }
            None => entries.push(BestEntry {
                player: player.to_string(),
                score,
                seq,
            }),
        }
        Recorded::NewBest
    }

    pub fn best(&self, period: &str, player: &str) -> Option<u32> {
        self.periods
            .get(period)?
            .iter()
            .find(|e| e.player == player)
            .map(|e| e.score)
    }

    /// Highest score of the period; ties go to whoever got there first
    pub fn leader(&self, period: &str) -> Option<&BestEntry> {
        self.periods
            .get(period)?
            .iter()
            .max_by(|a, b| a.score.cmp(&b.score).then(b.seq.cmp(&a.seq)))
    }
}
