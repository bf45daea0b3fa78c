//! Progression events for notification collaborators
//!
//! The engine never notifies anyone itself. Callers turn these into
//! celebrations, pushes or feed posts.

use serde::Serialize;

use super::definitions::BadgeDefinition;
use super::orchestrator::{ActivityOutcome, ProgressionState};
use super::rank::rank_for_xp;

/// A rank change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankUp {
    pub old_rank: &'static str,
    pub new_rank: &'static str,
}

/// Events that can happen when an activity is recorded
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressionEvent {
    XpAwarded { amount: u64, total: u64 },
    StreakExtended { count: u32 },
    BadgeUnlocked(BadgeDefinition),
    RankUp(RankUp),
}

impl ActivityOutcome {
    /// Events for this outcome, given the state it was computed from
    pub fn events(&self, previous: &ProgressionState) -> Vec<ProgressionEvent> {
        let mut events = Vec::new();
        if self.duplicate {
            return events;
        }

        events.push(ProgressionEvent::XpAwarded {
            amount: self.xp_awarded,
            total: self.new_state.total_xp,
        });

        if self.new_state.current_streak > previous.current_streak {
            events.push(ProgressionEvent::StreakExtended {
                count: self.new_state.current_streak,
            });
        }

        events.extend(
            self.newly_unlocked_badges
                .iter()
                .cloned()
                .map(ProgressionEvent::BadgeUnlocked),
        );

        if self.ranked_up {
            events.push(ProgressionEvent::RankUp(RankUp {
                old_rank: rank_for_xp(previous.total_xp).name,
                new_rank: rank_for_xp(self.new_state.total_xp).name,
            }));
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::definitions::default_badges;
    use crate::progression::orchestrator::record_activity_completion;
    use chrono::NaiveDate;

    #[test]
    fn test_events_for_rank_up() {
        let previous = ProgressionState {
            total_xp: 900,
            ..Default::default()
        };
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let outcome = record_activity_completion(&previous, day, &default_badges()).unwrap();
        let events = outcome.events(&previous);

        assert_eq!(
            events[0],
            ProgressionEvent::XpAwarded {
                amount: 100,
                total: 1_000
            }
        );
        assert_eq!(events[1], ProgressionEvent::StreakExtended { count: 1 });
        assert!(matches!(
            &events[2],
            ProgressionEvent::BadgeUnlocked(b) if b.identifier == "first_blood"
        ));
        assert_eq!(
            events[3],
            ProgressionEvent::RankUp(RankUp {
                old_rank: "Recruit",
                new_rank: "Soldier"
            })
        );
    }

    #[test]
    fn test_duplicate_has_no_events() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let defs = default_badges();
        let first = record_activity_completion(&ProgressionState::default(), day, &defs).unwrap();
        let again = record_activity_completion(&first.new_state, day, &defs).unwrap();
        assert!(again.events(&first.new_state).is_empty());
    }
}
