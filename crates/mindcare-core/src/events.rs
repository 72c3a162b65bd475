use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::activity::Activity;
use crate::clock::DayId;
use crate::ledger::StreakChange;
use crate::mood::Mood;
use crate::plan::Day;
use crate::profile::Theme;

/// Every state change in the app produces an Event.
/// The view layer drains them after each action and re-renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    SessionCompleted {
        sessions_total: u64,
        streak_count: u32,
        streak_change: StreakChange,
        at: NaiveDateTime,
    },
    /// Calendar day rolled over and every task was unchecked.
    PlanReset {
        previous: Option<DayId>,
        today: DayId,
        at: NaiveDateTime,
    },
    TaskStatusChanged {
        day: Day,
        index: usize,
        completed: bool,
        completed_count: usize,
        total: usize,
        at: NaiveDateTime,
    },
    GratitudeSaved {
        entries: usize,
        at: NaiveDateTime,
    },
    GoalAdded {
        id: i64,
        at: NaiveDateTime,
    },
    GoalToggled {
        id: i64,
        completed: bool,
        at: NaiveDateTime,
    },
    MoodLogged {
        mood: Mood,
        at: NaiveDateTime,
    },
    ActivityLaunched {
        activity: Activity,
        url: String,
        at: NaiveDateTime,
    },
    BreathingFinished {
        counted: bool,
        at: NaiveDateTime,
    },
    ProfileUpdated {
        field: String,
        at: NaiveDateTime,
    },
    ThemeChanged {
        theme: Theme,
        at: NaiveDateTime,
    },
}
