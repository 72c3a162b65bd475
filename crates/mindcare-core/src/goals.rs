//! User-managed wellness goals.
//!
//! The list is small and written back whole on every change.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::{Result, ValidationError};
use crate::storage::{keys, read_json, write_json, KeyValueStore};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub text: String,
    pub completed: bool,
    /// Creation time in epoch milliseconds; unique within the list.
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GoalList {
    goals: Vec<Goal>,
}

impl GoalList {
    /// Goals shown before the user has saved any.
    pub fn seeded() -> Self {
        Self {
            goals: vec![
                Goal {
                    text: "Meditate 3 times this week".into(),
                    completed: false,
                    id: 1,
                },
                Goal {
                    text: "Go for a walk today".into(),
                    completed: false,
                    id: 2,
                },
            ],
        }
    }

    /// Load the persisted list, or the seeded examples if there is none.
    pub fn load(store: &dyn KeyValueStore) -> Result<Self> {
        Ok(read_json::<Vec<Goal>>(store, keys::GOALS)?
            .map(|goals| Self { goals })
            .unwrap_or_else(Self::seeded))
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn get(&self, id: i64) -> Option<&Goal> {
        self.goals.iter().find(|goal| goal.id == id)
    }

    fn save(&self, store: &dyn KeyValueStore) -> Result<()> {
        write_json(store, keys::GOALS, &self.goals)
    }

    /// Append a goal and persist the list.
    ///
    /// # Errors
    /// Returns a validation error if `text` is blank.
    pub fn add_goal(&mut self, store: &dyn KeyValueStore, clock: &dyn Clock, text: &str) -> Result<Goal> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::Empty("goal text".into()).into());
        }

        let mut id = clock.millis_since_epoch();
        if self.get(id).is_some() {
            id = self.goals.iter().map(|goal| goal.id).max().unwrap_or(id) + 1;
        }

        let goal = Goal {
            text: text.to_string(),
            completed: false,
            id,
        };
        self.goals.push(goal.clone());
        if let Err(e) = self.save(store) {
            self.goals.pop();
            return Err(e);
        }
        tracing::debug!(id, "goal added");
        Ok(goal)
    }

    /// Flip a goal's completion. Unknown ids are ignored and return `None`.
    pub fn toggle_goal(&mut self, store: &dyn KeyValueStore, id: i64) -> Result<Option<Goal>> {
        let Some(goal) = self.goals.iter_mut().find(|goal| goal.id == id) else {
            tracing::debug!(id, "toggle ignored, no such goal");
            return Ok(None);
        };
        goal.completed = !goal.completed;
        let toggled = goal.clone();
        self.save(store)?;
        Ok(Some(toggled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::MemoryStore;

    fn setup() -> (MemoryStore, FixedClock) {
        (MemoryStore::new(), FixedClock::ymd_hms(2024, 6, 1, 12, 0, 0))
    }

    #[test]
    fn seeds_two_examples_without_persisting() {
        let (store, _) = setup();
        let list = GoalList::load(&store).unwrap();
        let ids: Vec<i64> = list.goals().iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(store.get(keys::GOALS).unwrap().is_none());
    }

    #[test]
    fn saved_empty_list_is_not_reseeded() {
        let (store, _) = setup();
        store.set(keys::GOALS, "[]").unwrap();
        assert!(GoalList::load(&store).unwrap().goals().is_empty());
    }

    #[test]
    fn add_appends_and_persists() {
        let (store, clock) = setup();
        let mut list = GoalList::load(&store).unwrap();
        let goal = list.add_goal(&store, &clock, "  Drink water  ").unwrap();

        assert_eq!(goal.text, "Drink water");
        assert_eq!(goal.id, clock.millis_since_epoch());
        assert!(!goal.completed);
        let reloaded = GoalList::load(&store).unwrap();
        assert_eq!(reloaded.goals().len(), 3);
        assert_eq!(reloaded.goals()[2], goal);
    }

    #[test]
    fn same_millisecond_gets_distinct_id() {
        let (store, clock) = setup();
        let mut list = GoalList::load(&store).unwrap();
        let a = list.add_goal(&store, &clock, "one").unwrap();
        let b = list.add_goal(&store, &clock, "two").unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn blank_text_is_rejected() {
        let (store, clock) = setup();
        let mut list = GoalList::load(&store).unwrap();
        assert!(list.add_goal(&store, &clock, "   ").unwrap_err().is_validation());
        assert_eq!(list.goals().len(), 2);
        assert!(store.get(keys::GOALS).unwrap().is_none());
    }

    #[test]
    fn toggle_flips_and_persists() {
        let (store, _) = setup();
        let mut list = GoalList::load(&store).unwrap();
        let toggled = list.toggle_goal(&store, 2).unwrap().unwrap();
        assert!(toggled.completed);
        assert!(GoalList::load(&store).unwrap().get(2).unwrap().completed);

        list.toggle_goal(&store, 2).unwrap();
        assert!(!GoalList::load(&store).unwrap().get(2).unwrap().completed);
    }

    #[test]
    fn toggle_unknown_id_is_a_no_op() {
        let (store, _) = setup();
        store.set(keys::GOALS, "[]").unwrap();
        let mut list = GoalList::load(&store).unwrap();
        assert_eq!(list.toggle_goal(&store, 999).unwrap(), None);
        assert!(list.goals().is_empty());
        assert_eq!(store.get(keys::GOALS).unwrap().as_deref(), Some("[]"));
    }
}
