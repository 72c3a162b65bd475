//! Property tests for the streak/session ledger.

use mindcare_core::ledger::{complete_session, LedgerSnapshot};
use mindcare_core::{Clock, FixedClock, MemoryStore};
use proptest::prelude::*;

proptest! {
    /// Walk forward through a random schedule of days with sessions and
    /// compare against a straightforward model of the streak.
    #[test]
    fn streak_matches_model(gaps in prop::collection::vec((0i64..4, 1usize..4), 1..30)) {
        let store = MemoryStore::new();
        let clock = FixedClock::ymd_hms(2023, 12, 20, 12, 0, 0);

        let mut expected_total = 0u64;
        let mut expected_streak = 0u32;
        let mut last_day: Option<i64> = None;
        let mut day = 0i64;

        for (gap, sessions) in gaps {
            clock.advance_days(gap);
            day += gap;
            for _ in 0..sessions {
                let outcome = complete_session(&store, &clock).unwrap();
                expected_total += 1;
                match last_day {
                    Some(d) if d == day => {}
                    Some(d) if d == day - 1 => expected_streak += 1,
                    None => expected_streak += 1,
                    Some(_) => expected_streak = 1,
                }
                last_day = Some(day);
                prop_assert_eq!(outcome.ledger.sessions_total, expected_total);
                prop_assert_eq!(outcome.ledger.streak_count, expected_streak);
            }
        }

        let stored = LedgerSnapshot::load(&store).unwrap();
        prop_assert_eq!(stored.sessions_total, expected_total);
        prop_assert_eq!(stored.streak_count, expected_streak);
        prop_assert_eq!(stored.last_completion_date, Some(clock.today()));
    }
}
