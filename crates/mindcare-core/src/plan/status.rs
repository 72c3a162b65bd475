use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::{Day, Task, WeeklyPlan};
use crate::clock::{Clock, DayId};
use crate::error::{Result, ValidationError};
use crate::ledger::{self, SessionOutcome};
use crate::storage::{keys, read_json, read_parsed, write_json, KeyValueStore};

/// Dashboard previews show at most this many tasks.
const PREVIEW_TASKS: usize = 3;

/// Per-day task completion flags.
///
/// Every day always holds exactly as many flags as it has plan tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CompletionStatus {
    days: BTreeMap<Day, Vec<bool>>,
}

impl CompletionStatus {
    /// All tasks on all days unchecked.
    pub fn fresh(plan: &WeeklyPlan) -> Self {
        let days = Day::ALL
            .into_iter()
            .map(|day| (day, vec![false; plan.task_count(day)]))
            .collect();
        Self { days }
    }

    /// Bring stored flags in line with the plan.
    ///
    /// Days whose flag count no longer matches the plan, or that are missing,
    /// are rebuilt unchecked. Returns the days that had to be rebuilt.
    fn heal(&mut self, plan: &WeeklyPlan) -> Vec<Day> {
        let mut rebuilt = Vec::new();
        for day in Day::ALL {
            let expected = plan.task_count(day);
            let flags = self.days.entry(day).or_default();
            if flags.len() != expected {
                *flags = vec![false; expected];
                rebuilt.push(day);
            }
        }
        rebuilt
    }

    pub fn day(&self, day: Day) -> &[bool] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_done(&self, day: Day, index: usize) -> Option<bool> {
        self.day(day).get(index).copied()
    }

    pub fn progress(&self, day: Day) -> Progress {
        let flags = self.day(day);
        Progress {
            completed: flags.iter().filter(|done| **done).count(),
            total: flags.len(),
        }
    }
}

impl<'de> Deserialize<'de> for CompletionStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Unknown day names are dropped rather than failing the whole map.
        let raw = BTreeMap::<String, Vec<bool>>::deserialize(deserializer)?;
        let days = raw
            .into_iter()
            .filter_map(|(name, flags)| name.parse::<Day>().ok().map(|day| (day, flags)))
            .collect();
        Ok(Self { days })
    }
}

/// Completed vs total tasks for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    /// 0.0 ..= 100.0; an empty day is 0.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64 * 100.0
    }
}

/// What [`DailyPlan::reconcile_for_today`] found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reconciliation {
    /// New calendar day; everything was unchecked.
    Reset { previous: Option<DayId>, today: DayId },
    /// Same day; stored flags kept. `rebuilt` lists days that were repaired.
    Loaded { rebuilt: Vec<Day> },
}

/// Result of a successful [`DailyPlan::set_task_status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskUpdate {
    pub day: Day,
    pub index: usize,
    pub completed: bool,
    pub progress: Progress,
    /// Present when checking the task counted as a session.
    pub session: Option<SessionOutcome>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    #[serde(flatten)]
    pub task: Task,
    pub index: usize,
    pub completed: bool,
}

/// Everything needed to render one day of the plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayView {
    pub day: Day,
    pub label: &'static str,
    pub title: &'static str,
    pub tasks: Vec<TaskView>,
    pub progress: Progress,
    pub percentage: f64,
}

/// Short form of a day for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPreview {
    pub day: Day,
    pub title: &'static str,
    pub tasks: Vec<TaskView>,
    /// More tasks exist beyond the preview.
    pub has_more: bool,
    pub progress: Progress,
    pub percentage: f64,
}

/// The weekly plan together with today's completion flags.
#[derive(Debug, Clone)]
pub struct DailyPlan {
    plan: &'static WeeklyPlan,
    status: CompletionStatus,
}

impl DailyPlan {
    /// Load the completion flags for today, resetting them on a new day.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or written.
    pub fn reconcile_for_today(
        store: &dyn KeyValueStore,
        clock: &dyn Clock,
        plan: &'static WeeklyPlan,
    ) -> Result<(Self, Reconciliation)> {
        let today = clock.today();
        let last_update: Option<DayId> = read_parsed(store, keys::PLAN_LAST_UPDATE_DATE)?;

        if last_update != Some(today) {
            let status = CompletionStatus::fresh(plan);
            write_json(store, keys::PLAN_STATUS, &status)?;
            store.set(keys::PLAN_LAST_UPDATE_DATE, &today.to_string())?;
            tracing::info!(?last_update, %today, "new day, plan status reset");
            return Ok((
                Self { plan, status },
                Reconciliation::Reset {
                    previous: last_update,
                    today,
                },
            ));
        }

        let mut status = read_json::<CompletionStatus>(store, keys::PLAN_STATUS)?.unwrap_or_else(|| {
            CompletionStatus {
                days: BTreeMap::new(),
            }
        });
        let rebuilt = status.heal(plan);
        if !rebuilt.is_empty() {
            tracing::warn!(?rebuilt, "plan status did not match the plan, rebuilt days");
        }
        Ok((Self { plan, status }, Reconciliation::Loaded { rebuilt }))
    }

    pub fn plan(&self) -> &'static WeeklyPlan {
        self.plan
    }

    pub fn status(&self) -> &CompletionStatus {
        &self.status
    }

    /// Check or uncheck one task and persist the whole status.
    ///
    /// Checking a task counts as a completed session every time it is
    /// called with `completed = true`; unchecking never takes a session back.
    ///
    /// # Errors
    /// Returns a validation error, without changing anything, if `index`
    /// is outside the day's task list.
    pub fn set_task_status(
        &mut self,
        store: &dyn KeyValueStore,
        clock: &dyn Clock,
        day: Day,
        index: usize,
        completed: bool,
    ) -> Result<TaskUpdate> {
        let len = self.plan.task_count(day);
        let Some(flag) = self.status.days.get_mut(&day).and_then(|flags| flags.get_mut(index)) else {
            return Err(ValidationError::OutOfBounds {
                collection: format!("{day} tasks"),
                index,
                len,
            }
            .into());
        };
        let previous = std::mem::replace(flag, completed);

        if let Err(e) = write_json(store, keys::PLAN_STATUS, &self.status) {
            // Keep memory and store in agreement.
            if let Some(flag) = self.status.days.get_mut(&day).and_then(|f| f.get_mut(index)) {
                *flag = previous;
            }
            return Err(e);
        }

        let session = if completed {
            Some(ledger::complete_session(store, clock)?)
        } else {
            None
        };

        tracing::debug!(%day, index, completed, previous, "task status set");

        Ok(TaskUpdate {
            day,
            index,
            completed,
            progress: self.status.progress(day),
            session,
        })
    }

    pub fn progress(&self, day: Day) -> Progress {
        self.status.progress(day)
    }

    pub fn day_view(&self, day: Day) -> DayView {
        let plan = self.plan.day(day);
        let progress = self.progress(day);
        DayView {
            day,
            label: day.short_label(),
            title: plan.title,
            tasks: self.task_views(day, plan.tasks.len()),
            progress,
            percentage: progress.percentage(),
        }
    }

    pub fn preview(&self, day: Day) -> DayPreview {
        let plan = self.plan.day(day);
        let progress = self.progress(day);
        DayPreview {
            day,
            title: plan.title,
            tasks: self.task_views(day, PREVIEW_TASKS),
            has_more: plan.tasks.len() > PREVIEW_TASKS,
            progress,
            percentage: progress.percentage(),
        }
    }

    fn task_views(&self, day: Day, limit: usize) -> Vec<TaskView> {
        self.plan
            .day(day)
            .tasks
            .iter()
            .take(limit)
            .enumerate()
            .map(|(index, task)| TaskView {
                task: *task,
                index,
                completed: self.status.is_done(day, index).unwrap_or(false),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::ledger::LedgerSnapshot;
    use crate::storage::MemoryStore;

    fn setup() -> (MemoryStore, FixedClock) {
        // Monday
        (MemoryStore::new(), FixedClock::ymd_hms(2024, 3, 11, 8, 0, 0))
    }

    fn reconcile(store: &MemoryStore, clock: &FixedClock) -> (DailyPlan, Reconciliation) {
        DailyPlan::reconcile_for_today(store, clock, WeeklyPlan::standard()).unwrap()
    }

    #[test]
    fn first_run_resets_and_persists() {
        let (store, clock) = setup();
        let (plan, outcome) = reconcile(&store, &clock);
        assert!(matches!(outcome, Reconciliation::Reset { previous: None, .. }));
        assert_eq!(
            store.get(keys::PLAN_LAST_UPDATE_DATE).unwrap().as_deref(),
            Some("2024-03-11")
        );
        for day in Day::ALL {
            assert_eq!(plan.status().day(day), &[false; 4]);
        }
        let stored: serde_json::Value =
            serde_json::from_str(&store.get(keys::PLAN_STATUS).unwrap().unwrap()).unwrap();
        assert_eq!(stored["monday"], serde_json::json!([false, false, false, false]));
    }

    #[test]
    fn same_day_keeps_checked_tasks() {
        let (store, clock) = setup();
        let (mut plan, _) = reconcile(&store, &clock);
        plan.set_task_status(&store, &clock, Day::Monday, 2, true).unwrap();

        let (reloaded, outcome) = reconcile(&store, &clock);
        assert_eq!(outcome, Reconciliation::Loaded { rebuilt: vec![] });
        assert_eq!(reloaded.status().is_done(Day::Monday, 2), Some(true));
    }

    #[test]
    fn new_day_unchecks_everything() {
        let (store, clock) = setup();
        let (mut plan, _) = reconcile(&store, &clock);
        plan.set_task_status(&store, &clock, Day::Monday, 0, true).unwrap();
        plan.set_task_status(&store, &clock, Day::Friday, 3, true).unwrap();

        clock.advance_days(1);
        let (plan, outcome) = reconcile(&store, &clock);
        assert!(matches!(outcome, Reconciliation::Reset { .. }));
        for day in Day::ALL {
            assert_eq!(plan.progress(day).completed, 0);
            assert_eq!(plan.status().day(day).len(), plan.plan().task_count(day));
        }
    }

    #[test]
    fn stale_lengths_are_rebuilt_per_day() {
        let (store, clock) = setup();
        store.set(keys::PLAN_LAST_UPDATE_DATE, "2024-03-11").unwrap();
        store
            .set(
                keys::PLAN_STATUS,
                r#"{"monday":[true,false],"tuesday":[true,false,false,false],"funday":[true]}"#,
            )
            .unwrap();

        let (plan, outcome) = reconcile(&store, &clock);
        let Reconciliation::Loaded { rebuilt } = outcome else {
            panic!("expected Loaded");
        };
        assert!(rebuilt.contains(&Day::Monday));
        assert!(!rebuilt.contains(&Day::Tuesday));
        assert_eq!(plan.status().day(Day::Monday), &[false; 4]);
        assert_eq!(plan.status().is_done(Day::Tuesday, 0), Some(true));
    }

    #[test]
    fn malformed_status_is_rebuilt() {
        let (store, clock) = setup();
        store.set(keys::PLAN_LAST_UPDATE_DATE, "2024-03-11").unwrap();
        store.set(keys::PLAN_STATUS, "nope").unwrap();
        let (plan, outcome) = reconcile(&store, &clock);
        let Reconciliation::Loaded { rebuilt } = outcome else {
            panic!("expected Loaded");
        };
        assert_eq!(rebuilt.len(), 7);
        assert_eq!(plan.progress(Day::Sunday), Progress { completed: 0, total: 4 });
    }

    #[test]
    fn checking_counts_a_session_each_time() {
        let (store, clock) = setup();
        let (mut plan, _) = reconcile(&store, &clock);

        let first = plan.set_task_status(&store, &clock, Day::Monday, 0, true).unwrap();
        let second = plan.set_task_status(&store, &clock, Day::Monday, 0, true).unwrap();
        assert!(first.session.is_some());
        assert_eq!(second.session.unwrap().ledger.sessions_total, 2);
        assert_eq!(plan.status().is_done(Day::Monday, 0), Some(true));
    }

    #[test]
    fn unchecking_keeps_session_credit() {
        let (store, clock) = setup();
        let (mut plan, _) = reconcile(&store, &clock);
        plan.set_task_status(&store, &clock, Day::Monday, 1, true).unwrap();
        let update = plan.set_task_status(&store, &clock, Day::Monday, 1, false).unwrap();

        assert!(update.session.is_none());
        assert_eq!(update.progress, Progress { completed: 0, total: 4 });
        assert_eq!(LedgerSnapshot::load(&store).unwrap().sessions_total, 1);
    }

    #[test]
    fn out_of_range_index_changes_nothing() {
        let (store, clock) = setup();
        let (mut plan, _) = reconcile(&store, &clock);
        let before = store.get(keys::PLAN_STATUS).unwrap();

        let err = plan.set_task_status(&store, &clock, Day::Monday, 4, true).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.get(keys::PLAN_STATUS).unwrap(), before);
        assert_eq!(LedgerSnapshot::load(&store).unwrap().sessions_total, 0);
    }

    #[test]
    fn progress_and_views() {
        let (store, clock) = setup();
        let (mut plan, _) = reconcile(&store, &clock);
        plan.set_task_status(&store, &clock, Day::Monday, 0, true).unwrap();
        plan.set_task_status(&store, &clock, Day::Monday, 3, true).unwrap();

        let view = plan.day_view(Day::Monday);
        assert_eq!(view.title, "Fresh Start Monday");
        assert_eq!(view.label, "Mon");
        assert_eq!(view.progress, Progress { completed: 2, total: 4 });
        assert!((view.percentage - 50.0).abs() < f64::EPSILON);
        assert!(view.tasks[3].completed);

        let preview = plan.preview(Day::Monday);
        assert_eq!(preview.tasks.len(), 3);
        assert!(preview.has_more);
        assert_eq!(preview.progress.completed, 2);
    }

    #[test]
    fn empty_progress_is_zero_percent() {
        assert_eq!(Progress { completed: 0, total: 0 }.percentage(), 0.0);
    }
}
