//! Application state.
//!
//! [`App`] owns the store, the clock and the loaded state, and is the only
//! entry point the view layer needs. Each user action is one method; each
//! method persists what it changed and queues [`Event`]s for the view.

use std::sync::Arc;

use serde::Serialize;

use crate::activity::Activity;
use crate::breathing::BreathingSession;
use crate::clock::{Clock, DayId};
use crate::daily;
use crate::error::Result;
use crate::events::Event;
use crate::goals::{Goal, GoalList};
use crate::gratitude::{self, GratitudeEntry, SavedPractice};
use crate::ledger::{self, LedgerSnapshot, SessionOutcome};
use crate::mood::{Mood, MoodResponse};
use crate::plan::{DailyPlan, Day, DayPreview, DayView, Progress, Reconciliation, TaskUpdate, WeeklyPlan};
use crate::profile::{Profile, ProfileField, Theme};
use crate::storage::{keys, read_parsed, Config, KeyValueStore};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoodLogged {
    pub mood: Mood,
    pub response: MoodResponse,
    pub session: SessionOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityLaunch {
    pub activity: Activity,
    pub title: &'static str,
    pub url: &'static str,
    pub session: SessionOutcome,
}

/// Everything on the home screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub greeting: &'static str,
    pub first_name: String,
    pub quote: &'static str,
    pub journal_prompt: &'static str,
    pub streak_count: u32,
    pub sessions_total: u64,
    pub current_mood: Option<Mood>,
    pub today: DayPreview,
}

pub struct App<S: KeyValueStore> {
    store: S,
    clock: Arc<dyn Clock>,
    config: Config,
    today: DayId,
    plan: DailyPlan,
    goals: GoalList,
    profile: Profile,
    events: Vec<Event>,
}

impl<S: KeyValueStore> App<S> {
    /// Load all state from `store`, resetting the plan if the day changed.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or written.
    pub fn open(store: S, clock: Arc<dyn Clock>, config: Config) -> Result<Self> {
        let today = clock.today();
        let (plan, reconciliation) =
            DailyPlan::reconcile_for_today(&store, clock.as_ref(), WeeklyPlan::standard())?;
        let goals = GoalList::load(&store)?;
        let profile = Profile::load(&store, &config.profile)?;

        let mut app = Self {
            store,
            clock,
            config,
            today,
            plan,
            goals,
            profile,
            events: Vec::new(),
        };
        app.note_reconciliation(reconciliation);
        Ok(app)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn today(&self) -> DayId {
        self.today
    }

    /// Drain queued events, oldest first.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: Event) {
        tracing::debug!(?event, "event");
        self.events.push(event);
    }

    fn note_reconciliation(&mut self, reconciliation: Reconciliation) {
        if let Reconciliation::Reset { previous, today } = reconciliation {
            let at = self.clock.now();
            self.emit(Event::PlanReset { previous, today, at });
        }
    }

    fn note_session(&mut self, outcome: &SessionOutcome) {
        let at = self.clock.now();
        self.emit(Event::SessionCompleted {
            sessions_total: outcome.ledger.sessions_total,
            streak_count: outcome.ledger.streak_count,
            streak_change: outcome.streak_change,
            at,
        });
    }

    /// Re-check the calendar day. Returns true if the plan was reset.
    pub fn refresh_day(&mut self) -> Result<bool> {
        let today = self.clock.today();
        if today == self.today {
            return Ok(false);
        }
        let (plan, reconciliation) =
            DailyPlan::reconcile_for_today(&self.store, self.clock.as_ref(), WeeklyPlan::standard())?;
        self.plan = plan;
        self.today = today;
        let reset = matches!(reconciliation, Reconciliation::Reset { .. });
        self.note_reconciliation(reconciliation);
        Ok(reset)
    }

    // ── Ledger ───────────────────────────────────────────────────────

    pub fn ledger(&self) -> Result<LedgerSnapshot> {
        LedgerSnapshot::load(&self.store)
    }

    /// Count one session directly (e.g. a quick action with no other effect).
    pub fn complete_session(&mut self) -> Result<SessionOutcome> {
        let outcome = ledger::complete_session(&self.store, self.clock.as_ref())?;
        self.note_session(&outcome);
        Ok(outcome)
    }

    // ── Mood ─────────────────────────────────────────────────────────

    pub fn log_mood(&mut self, mood: Mood) -> Result<MoodLogged> {
        self.store.set(keys::CURRENT_MOOD, mood.label())?;
        let at = self.clock.now();
        self.emit(Event::MoodLogged { mood, at });
        let session = self.complete_session()?;
        Ok(MoodLogged {
            mood,
            response: mood.response(),
            session,
        })
    }

    pub fn current_mood(&self) -> Result<Option<Mood>> {
        read_parsed(&self.store, keys::CURRENT_MOOD)
    }

    // ── Plan ─────────────────────────────────────────────────────────

    /// Check or uncheck a task. `day` must name one of the seven plan days.
    ///
    /// # Errors
    /// Returns a validation error, changing nothing, for an unknown day or
    /// an out-of-range task index.
    pub fn set_task_status(&mut self, day: &str, index: usize, completed: bool) -> Result<TaskUpdate> {
        let day: Day = day.parse()?;
        self.refresh_day()?;
        let update = self
            .plan
            .set_task_status(&self.store, self.clock.as_ref(), day, index, completed)?;

        let at = self.clock.now();
        self.emit(Event::TaskStatusChanged {
            day,
            index,
            completed,
            completed_count: update.progress.completed,
            total: update.progress.total,
            at,
        });
        if let Some(session) = &update.session {
            self.note_session(session);
        }
        Ok(update)
    }

    // Plan reads refresh the day first.

    pub fn progress(&mut self, day: &str) -> Result<Progress> {
        let day: Day = day.parse()?;
        self.refresh_day()?;
        Ok(self.plan.progress(day))
    }

    pub fn day_view(&mut self, day: &str) -> Result<DayView> {
        let day: Day = day.parse()?;
        self.refresh_day()?;
        Ok(self.plan.day_view(day))
    }

    /// All seven days, Sunday first.
    pub fn week_view(&mut self) -> Result<Vec<DayView>> {
        self.refresh_day()?;
        Ok(Day::ALL.into_iter().map(|day| self.plan.day_view(day)).collect())
    }

    pub fn todays_day(&self) -> Day {
        self.clock.weekday()
    }

    // ── Gratitude ────────────────────────────────────────────────────

    pub fn save_gratitude<T: AsRef<str>>(&mut self, items: &[T]) -> Result<SavedPractice> {
        let saved = gratitude::save_practice(&self.store, self.clock.as_ref(), items)?;
        let at = self.clock.now();
        self.emit(Event::GratitudeSaved {
            entries: saved.entries,
            at,
        });
        self.note_session(&saved.session);
        Ok(saved)
    }

    pub fn gratitude_history(&self) -> Result<Vec<GratitudeEntry>> {
        gratitude::history(&self.store)
    }

    // ── Goals ────────────────────────────────────────────────────────

    pub fn goals(&self) -> &[Goal] {
        self.goals.goals()
    }

    pub fn add_goal(&mut self, text: &str) -> Result<Goal> {
        let goal = self.goals.add_goal(&self.store, self.clock.as_ref(), text)?;
        let at = self.clock.now();
        self.emit(Event::GoalAdded { id: goal.id, at });
        Ok(goal)
    }

    /// Unknown ids are ignored: `Ok(None)` and no event.
    pub fn toggle_goal(&mut self, id: i64) -> Result<Option<Goal>> {
        let toggled = self.goals.toggle_goal(&self.store, id)?;
        if let Some(goal) = &toggled {
            let at = self.clock.now();
            self.emit(Event::GoalToggled {
                id: goal.id,
                completed: goal.completed,
                at,
            });
        }
        Ok(toggled)
    }

    // ── Profile ──────────────────────────────────────────────────────

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn set_profile_field(&mut self, field: ProfileField, value: &str) -> Result<&Profile> {
        self.profile.set(&self.store, field, value)?;
        let at = self.clock.now();
        self.emit(Event::ProfileUpdated {
            field: format!("{field:?}").to_lowercase(),
            at,
        });
        Ok(&self.profile)
    }

    pub fn theme(&self) -> Result<Theme> {
        Theme::load(&self.store)
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        theme.save(&self.store)?;
        let at = self.clock.now();
        self.emit(Event::ThemeChanged { theme, at });
        Ok(())
    }

    // ── Activities ───────────────────────────────────────────────────

    pub fn launch_activity(&mut self, activity: Activity) -> Result<ActivityLaunch> {
        let at = self.clock.now();
        self.emit(Event::ActivityLaunched {
            activity,
            url: activity.url().to_string(),
            at,
        });
        let session = self.complete_session()?;
        Ok(ActivityLaunch {
            activity,
            title: activity.title(),
            url: activity.url(),
            session,
        })
    }

    /// A new breathing session using the configured timings.
    ///
    /// # Errors
    /// Returns a validation error when the configured timings could never
    /// complete a cycle (for example a hand-edited `cycles = 0`).
    pub fn breathing_session(&self) -> Result<BreathingSession> {
        Ok(BreathingSession::from_config(&self.config.breathing)?)
    }

    /// Close the breathing exercise. Only a completed exercise counts.
    pub fn finish_breathing(&mut self, counted: bool) -> Result<Option<SessionOutcome>> {
        let at = self.clock.now();
        self.emit(Event::BreathingFinished { counted, at });
        if counted {
            self.complete_session().map(Some)
        } else {
            Ok(None)
        }
    }

    // ── Dashboard ────────────────────────────────────────────────────

    pub fn dashboard(&mut self) -> Result<Dashboard> {
        use chrono::Timelike;

        self.refresh_day()?;
        let now = self.clock.now();
        let ledger = self.ledger()?;
        Ok(Dashboard {
            greeting: daily::greeting(now.hour()),
            first_name: self.profile.first_name().to_string(),
            quote: daily::quote_of_the_day(now.date()),
            journal_prompt: daily::journal_prompt(now.date()),
            streak_count: ledger.streak_count,
            sessions_total: ledger.sessions_total,
            current_mood: self.current_mood()?,
            today: self.plan.preview(self.clock.weekday()),
        })
    }
}
