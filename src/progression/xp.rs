//! XP ledger
//!
//! Every completed activity is worth a flat reward. Incremental accrual and
//! recomputation from a count must always agree.

use crate::error::ProgressionError;

/// XP rewards for tracked actions
pub struct XpRewards;

impl XpRewards {
    /// XP for one completed activity
    pub const ACTIVITY_DONE: u64 = 100;
}

/// Total XP for `count` completed activities
pub fn xp_for_activity_count(count: u64) -> Result<u64, ProgressionError> {
    count
        .checked_mul(XpRewards::ACTIVITY_DONE)
        .ok_or(ProgressionError::XpOverflow)
}

/// Accrue one completed activity on top of `current_xp`
pub fn add_activity(current_xp: u64) -> Result<u64, ProgressionError> {
    current_xp
        .checked_add(XpRewards::ACTIVITY_DONE)
        .ok_or(ProgressionError::XpOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xp_for_count() {
        assert_eq!(xp_for_activity_count(0), Ok(0));
        assert_eq!(xp_for_activity_count(1), Ok(100));
        assert_eq!(xp_for_activity_count(37), Ok(3700));
    }

    #[test]
    fn test_incremental_matches_recomputed() {
        for n in 0..1_000 {
            let recomputed = xp_for_activity_count(n + 1).unwrap();
            let accrued = add_activity(xp_for_activity_count(n).unwrap()).unwrap();
            assert_eq!(recomputed, accrued);
        }
        let big = 40_000_000_000;
        assert_eq!(
            xp_for_activity_count(big + 1),
            add_activity(xp_for_activity_count(big).unwrap())
        );
    }

    #[test]
    fn test_overflow_is_rejected() {
        let max_count = u64::MAX / XpRewards::ACTIVITY_DONE;
        assert!(xp_for_activity_count(max_count).is_ok());
        assert_eq!(
            xp_for_activity_count(max_count + 1),
            Err(ProgressionError::XpOverflow)
        );
        assert_eq!(
            xp_for_activity_count(200_000_000_000_000_000),
            Err(ProgressionError::XpOverflow)
        );

        let last_ok = u64::MAX - XpRewards::ACTIVITY_DONE;
        assert_eq!(add_activity(last_ok), Ok(u64::MAX));
        assert_eq!(add_activity(u64::MAX - 50), Err(ProgressionError::XpOverflow));
    }
}
