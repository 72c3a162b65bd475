//! Gratitude journal: dated entries of exactly three things, newest first.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::{Result, ValidationError};
use crate::ledger::{self, SessionOutcome};
use crate::storage::{keys, read_json, write_json, KeyValueStore};

/// Items required in every entry.
pub const ITEMS_PER_ENTRY: usize = 3;

const DATE_DISPLAY: &str = "%-m/%-d/%Y";
const TIME_DISPLAY: &str = "%-I:%M:%S %p";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GratitudeEntry {
    /// Display date, e.g. "3/9/2024".
    pub date: String,
    /// Display time, e.g. "8:05:00 PM".
    pub timestamp: String,
    #[serde(rename = "gratitudes", alias = "items")]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedPractice {
    pub entry: GratitudeEntry,
    pub entries: usize,
    pub session: SessionOutcome,
}

/// All entries, newest first. A missing or unreadable log is empty.
pub fn history(store: &dyn KeyValueStore) -> Result<Vec<GratitudeEntry>> {
    Ok(read_json(store, keys::GRATITUDE_HISTORY)?.unwrap_or_default())
}

/// Trim and drop blank items, then require exactly [`ITEMS_PER_ENTRY`].
fn clean_items<S: AsRef<str>>(items: &[S]) -> Result<Vec<String>, ValidationError> {
    let cleaned: Vec<String> = items
        .iter()
        .map(|item| item.as_ref().trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect();

    if cleaned.len() != ITEMS_PER_ENTRY {
        return Err(ValidationError::GratitudeCount {
            expected: ITEMS_PER_ENTRY,
            actual: cleaned.len(),
        });
    }
    Ok(cleaned)
}

/// Record a gratitude practice and count it as a session.
///
/// # Errors
/// Returns a validation error, leaving the journal and ledger untouched,
/// unless exactly three non-blank items are given.
pub fn save_practice<S: AsRef<str>>(
    store: &dyn KeyValueStore,
    clock: &dyn Clock,
    items: &[S],
) -> Result<SavedPractice> {
    let items = clean_items(items)?;

    let now = clock.now();
    let entry = GratitudeEntry {
        date: now.format(DATE_DISPLAY).to_string(),
        timestamp: now.format(TIME_DISPLAY).to_string(),
        items,
    };

    let mut log = history(store)?;
    log.insert(0, entry.clone());
    write_json(store, keys::GRATITUDE_HISTORY, &log)?;

    let session = ledger::complete_session(store, clock)?;
    tracing::debug!(entries = log.len(), "gratitude practice saved");

    Ok(SavedPractice {
        entry,
        entries: log.len(),
        session,
    })
}
