//! # MindCare Core Library
//!
//! Business logic for the MindCare wellness tracker: streaks, the weekly
//! plan, the gratitude journal and goals, persisted in a key-value store.
//! Rendering is left to the caller; the bundled CLI is one such caller.
//!
//! ## Architecture
//!
//! - **Ledger**: lifetime session count and consecutive-day streak
//! - **Plan**: fixed weekly schedule plus per-day completion flags that reset
//!   when the calendar day changes
//! - **Journal / Goals / Profile**: small persisted collections
//! - **Breathing**: phase state machine with a cancellable tokio driver
//! - **Storage**: [`KeyValueStore`] over SQLite, TOML configuration
//!
//! ## Key Components
//!
//! - [`App`]: owns the state and exposes one method per user action
//! - [`Clock`]: time source; swap in [`FixedClock`] to test day rollover
//! - [`Database`]: persistent store
//! - [`Config`]: application configuration

pub mod activity;
pub mod app;
pub mod breathing;
pub mod clock;
pub mod daily;
pub mod error;
pub mod events;
pub mod goals;
pub mod gratitude;
pub mod ledger;
pub mod mood;
pub mod plan;
pub mod profile;
pub mod storage;

pub use activity::Activity;
pub use app::{ActivityLaunch, App, Dashboard, MoodLogged};
pub use breathing::{spawn_breathing, BreathingHandle, BreathingPhase, BreathingSession, BreathingUpdate};
pub use clock::{Clock, DayId, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use goals::{Goal, GoalList};
pub use gratitude::{GratitudeEntry, SavedPractice};
pub use ledger::{LedgerSnapshot, SessionOutcome, StreakChange};
pub use mood::{Mood, MoodResponse};
pub use plan::{CompletionStatus, DailyPlan, Day, DayView, Progress, WeeklyPlan};
pub use profile::{Profile, ProfileField, Theme};
pub use storage::{Config, Database, KeyValueStore, MemoryStore};
