//! Badge unlock detection
//!
//! A badge unlocks only when this exact before/after pair crosses its
//! threshold. Thresholds passed on an event the detector never saw are not
//! granted later, so callers must run it on every activity event.

use std::collections::BTreeSet;

use serde::Serialize;

use super::definitions::{BadgeDefinition, RequirementType};

/// Counters a badge threshold can be measured against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BadgeCounters {
    pub workout_count: u64,
    pub streak: u32,
}

impl BadgeCounters {
    pub fn new(workout_count: u64, streak: u32) -> Self {
        Self {
            workout_count,
            streak,
        }
    }

    fn metric(&self, requirement: RequirementType) -> u64 {
        match requirement {
            RequirementType::Workouts => self.workout_count,
            RequirementType::Streak => u64::from(self.streak),
        }
    }
}

/// Definitions newly crossed between `before` and `after`, in catalogue order
pub fn detect_new_badges<'a>(
    before: BadgeCounters,
    after: BadgeCounters,
    already_granted: &BTreeSet<String>,
    definitions: &'a [BadgeDefinition],
) -> Vec<&'a BadgeDefinition> {
    definitions
        .iter()
        .filter(|def| !already_granted.contains(&def.identifier))
        .filter(|def| {
            let threshold = u64::from(def.threshold_count);
            before.metric(def.requirement_type) < threshold
                && after.metric(def.requirement_type) >= threshold
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::definitions::default_badges;

    fn first_workout() -> Vec<BadgeDefinition> {
        vec![BadgeDefinition::workouts("first_blood", "First Blood", "", 1)]
    }

    #[test]
    fn test_crossing_unlocks() {
        let defs = first_workout();
        let found = detect_new_badges(
            BadgeCounters::new(0, 0),
            BadgeCounters::new(1, 1),
            &BTreeSet::new(),
            &defs,
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].identifier, "first_blood");
    }

    #[test]
    fn test_already_past_threshold_does_not_unlock() {
        let defs = first_workout();
        let found = detect_new_badges(
            BadgeCounters::new(5, 0),
            BadgeCounters::new(6, 0),
            &BTreeSet::new(),
            &defs,
        );
        assert!(found.is_empty());
    }

    #[test]
    fn test_already_granted_is_skipped() {
        let defs = first_workout();
        let granted: BTreeSet<String> = ["first_blood".to_string()].into();
        let found = detect_new_badges(
            BadgeCounters::new(0, 0),
            BadgeCounters::new(1, 0),
            &granted,
            &defs,
        );
        assert!(found.is_empty());
    }

    #[test]
    fn test_repeat_call_is_stable_and_commit_prevents_regrant() {
        let defs = default_badges();
        let before = BadgeCounters::new(9, 2);
        let after = BadgeCounters::new(10, 3);
        let granted = BTreeSet::new();

        let first = detect_new_badges(before, after, &granted, &defs);
        let second = detect_new_badges(before, after, &granted, &defs);
        assert_eq!(first, second);

        let ids: Vec<_> = first.iter().map(|d| d.identifier.as_str()).collect();
        assert_eq!(ids, ["ten_workouts", "streak_3"]);

        let committed: BTreeSet<String> = first.iter().map(|d| d.identifier.clone()).collect();
        assert!(detect_new_badges(after, after, &committed, &defs).is_empty());
    }

    #[test]
    fn test_streak_badges_use_streak_metric() {
        let defs = vec![BadgeDefinition::streak("streak_3", "On Fire", "", 3)];
        let unlocked = detect_new_badges(
            BadgeCounters::new(100, 2),
            BadgeCounters::new(101, 3),
            &BTreeSet::new(),
            &defs,
        );
        assert_eq!(unlocked.len(), 1);

        // Streak reset then rebuilt past a threshold never observed crossing
        let none = detect_new_badges(
            BadgeCounters::new(100, 5),
            BadgeCounters::new(101, 1),
            &BTreeSet::new(),
            &defs,
        );
        assert!(none.is_empty());
    }

    #[test]
    fn test_multiple_thresholds_in_one_jump_follow_catalogue_order() {
        let defs = vec![
            BadgeDefinition::workouts("ten", "Ten", "", 10),
            BadgeDefinition::workouts("one", "One", "", 1),
        ];
        let found = detect_new_badges(
            BadgeCounters::new(0, 0),
            BadgeCounters::new(10, 0),
            &BTreeSet::new(),
            &defs,
        );
        let ids: Vec<_> = found.iter().map(|d| d.identifier.as_str()).collect();
        assert_eq!(ids, ["ten", "one"]);
    }
}
