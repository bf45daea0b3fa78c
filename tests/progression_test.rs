//! End-to-end behavior of the progression engine through its public API

mod common;

use std::collections::BTreeSet;

use common::{d, d_minus};
use forgefit::progression::{
    add_activity, classify_tier, current_streak, default_badges, detect_new_badges,
    has_ranked_up, rank_for_xp, record_activity_completion, xp_for_activity_count,
    BadgeCounters, BadgeDefinition, ProgressionState, Tier, RANKS,
};
use forgefit::error::ProgressionError;
use forgefit::store::ProgressionStore;

#[test]
fn test_tier_boundaries_and_order() {
    let expected = [
        (9, Tier::Novice),
        (10, Tier::Intermediate),
        (25, Tier::Intermediate),
        (26, Tier::Advanced),
        (50, Tier::Advanced),
        (51, Tier::Elite),
    ];
    for (pushups, tier) in expected {
        assert_eq!(classify_tier(pushups).unwrap(), tier, "pushups = {pushups}");
    }

    for p in 0..120 {
        assert!(classify_tier(p).unwrap() <= classify_tier(p + 1).unwrap());
    }
}

#[test]
fn test_xp_consistency_law() {
    for n in (0..10_000).step_by(7) {
        let accrued = add_activity(xp_for_activity_count(n).unwrap());
        assert_eq!(xp_for_activity_count(n + 1), accrued);
    }
}

#[test]
fn test_xp_near_limit_is_an_error() {
    let state = ProgressionState {
        total_xp: u64::MAX - 10,
        ..Default::default()
    };
    let err = record_activity_completion(&state, d(), &default_badges()).unwrap_err();
    assert_eq!(err, ProgressionError::XpOverflow);
    assert!(xp_for_activity_count(200_000_000_000_000_000).is_err());
}

#[test]
fn test_rank_partition_and_rank_up() {
    for xp in [0, 1, 999, 1_000, 4_999, 5_000, 1_000_000] {
        assert_eq!(RANKS.iter().filter(|r| r.contains(xp)).count(), 1);
    }
    assert!(has_ranked_up(999, 1_000));
    assert!(!has_ranked_up(1_000, 1_999));
    assert!(!has_ranked_up(0, 999));
}

#[test]
fn test_streak_scenarios() {
    let full: BTreeSet<_> = [d_minus(2), d_minus(1), d()].into();
    assert_eq!(current_streak(&full, d()), 3);

    let gapped: BTreeSet<_> = [d_minus(3), d_minus(1), d()].into();
    assert_eq!(current_streak(&gapped, d()), 2);

    assert_eq!(current_streak(&BTreeSet::new(), d()), 0);
}

#[test]
fn test_badge_crossing_precision() {
    let defs = vec![BadgeDefinition::workouts("first_blood", "First Blood", "", 1)];
    let granted = BTreeSet::new();

    let crossed = detect_new_badges(
        BadgeCounters::new(0, 0),
        BadgeCounters::new(1, 0),
        &granted,
        &defs,
    );
    assert_eq!(crossed.len(), 1);

    let past = detect_new_badges(
        BadgeCounters::new(5, 0),
        BadgeCounters::new(6, 0),
        &granted,
        &defs,
    );
    assert!(past.is_empty());
}

#[test]
fn test_first_activity_scenario() {
    let state = ProgressionState {
        total_xp: 900,
        ..Default::default()
    };
    let outcome = record_activity_completion(&state, d(), &default_badges()).unwrap();

    assert_eq!(outcome.new_state.total_xp, 1_000);
    assert_eq!(outcome.new_state.current_streak, 1);
    assert!(outcome.ranked_up);
    assert_eq!(rank_for_xp(outcome.new_state.total_xp).name, "Soldier");
    assert!(outcome
        .newly_unlocked_badges
        .iter()
        .any(|b| b.name == "First Blood"));
}

#[test]
fn test_duplicate_event_idempotence() {
    let defs = default_badges();
    let start = ProgressionState::default();

    let once = record_activity_completion(&start, d(), &defs).unwrap().new_state;
    let twice = record_activity_completion(&once, d(), &defs).unwrap().new_state;
    assert_eq!(once, twice);
}

#[test]
fn test_service_full_week() {
    let (_dir, service) = common::create_test_service();

    let mut unlocked = Vec::new();
    for n in (0..7).rev() {
        let done = service.complete_activity("kim", d_minus(n)).unwrap();
        unlocked.extend(done.newly_unlocked_badges.into_iter().map(|b| b.identifier));
    }
    assert_eq!(unlocked, ["first_blood", "streak_3", "streak_7"]);

    let summary = service.summary("kim", d()).unwrap();
    assert_eq!(summary.rank.total_xp, 700);
    assert_eq!(summary.streak.current, 7);
    assert_eq!(summary.workouts, 7);
}

#[test]
fn test_service_replayed_event_matches_single() {
    let (_dir, service) = common::create_test_service();

    service.complete_activity("kim", d_minus(1)).unwrap();
    service.complete_activity("kim", d()).unwrap();
    let before = service.store().load_state("kim").unwrap();

    let replay = service.complete_activity("kim", d()).unwrap();
    assert!(!replay.recorded);
    assert_eq!(service.store().load_state("kim").unwrap(), before);
}
