//! Streak and session bookkeeping.
//!
//! Every activity that counts (mood log, finished breathing exercise,
//! gratitude entry, checked task, launched guide) goes through
//! [`complete_session`] exactly once. The lifetime session total always
//! grows by one; the streak only moves on the first session of a day.

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, DayId};
use crate::error::Result;
use crate::storage::{keys, read_parsed, KeyValueStore};

/// Persisted ledger values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub last_completion_date: Option<DayId>,
    pub streak_count: u32,
    pub sessions_total: u64,
}

/// How the streak moved on a completed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakChange {
    /// A session was already recorded today.
    AlreadyCounted,
    /// First session ever.
    Started,
    /// Last session was yesterday.
    Extended,
    /// A day or more was skipped; streak restarts at 1.
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOutcome {
    pub ledger: LedgerSnapshot,
    pub streak_change: StreakChange,
}

impl LedgerSnapshot {
    /// Read the ledger; missing or unparseable values fall back to defaults.
    pub fn load(store: &dyn KeyValueStore) -> Result<Self> {
        Ok(Self {
            last_completion_date: read_parsed(store, keys::LAST_COMPLETION_DATE)?,
            streak_count: read_parsed(store, keys::STREAK_COUNT)?.unwrap_or(0),
            sessions_total: read_parsed(store, keys::SESSIONS_TOTAL)?.unwrap_or(0),
        })
    }

    /// True when a session has already been recorded on `today`.
    pub fn counted_on(&self, today: DayId) -> bool {
        self.last_completion_date == Some(today)
    }
}

/// Record one completed session.
///
/// # Errors
/// Returns an error only if the store cannot be read or written.
pub fn complete_session(store: &dyn KeyValueStore, clock: &dyn Clock) -> Result<SessionOutcome> {
    let today = clock.today();
    let yesterday = clock.yesterday();
    let mut ledger = LedgerSnapshot::load(store)?;

    ledger.sessions_total = ledger.sessions_total.saturating_add(1);
    store.set(keys::SESSIONS_TOTAL, &ledger.sessions_total.to_string())?;

    let streak_change = match ledger.last_completion_date {
        _ if ledger.counted_on(today) => StreakChange::AlreadyCounted,
        None => StreakChange::Started,
        Some(last) if last == yesterday => StreakChange::Extended,
        Some(_) => StreakChange::Reset,
    };

    match streak_change {
        StreakChange::AlreadyCounted => {}
        StreakChange::Started | StreakChange::Extended => {
            ledger.streak_count = ledger.streak_count.saturating_add(1);
        }
        StreakChange::Reset => ledger.streak_count = 1,
    }

    if streak_change != StreakChange::AlreadyCounted {
        store.set(keys::STREAK_COUNT, &ledger.streak_count.to_string())?;
        store.set(keys::LAST_COMPLETION_DATE, &today.to_string())?;
        ledger.last_completion_date = Some(today);
    }

    tracing::debug!(
        sessions_total = ledger.sessions_total,
        streak_count = ledger.streak_count,
        ?streak_change,
        "session completed"
    );

    Ok(SessionOutcome {
        ledger,
        streak_change,
    })
}
