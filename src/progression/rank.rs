//! XP ranks
//!
//! Ranks are contiguous XP bands. A table is only usable once it has been
//! checked to partition `[0, ∞)`.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::ConfigError;

/// Rank band definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rank {
    pub name: &'static str,
    pub min_xp: u64,
    /// Inclusive upper bound, `None` for the top rank
    pub max_xp: Option<u64>,
}

impl Rank {
    pub fn contains(&self, xp: u64) -> bool {
        xp >= self.min_xp && self.max_xp.is_none_or(|max| xp <= max)
    }

    pub fn is_top(&self) -> bool {
        self.max_xp.is_none()
    }
}

/// Standard rank bands (must be sorted by XP)
pub static RANKS: &[Rank] = &[
    Rank {
        name: "Recruit",
        min_xp: 0,
        max_xp: Some(999),
    },
    Rank {
        name: "Soldier",
        min_xp: 1_000,
        max_xp: Some(4_999),
    },
    Rank {
        name: "Commander",
        min_xp: 5_000,
        max_xp: None,
    },
];

/// A validated, ordered set of rank bands
#[derive(Debug, Clone, Copy)]
pub struct RankTable<'a> {
    bands: &'a [Rank],
}

impl RankTable<'static> {
    /// The standard Recruit / Soldier / Commander table
    pub fn standard() -> Self {
        Self { bands: RANKS }
    }
}

impl<'a> RankTable<'a> {
    /// Validate that `bands` partition `[0, ∞)` with no gaps or overlaps
    pub fn new(bands: &'a [Rank]) -> Result<Self, ConfigError> {
        let Some(first) = bands.first() else {
            return Err(ConfigError::EmptyRankTable);
        };
        if first.min_xp != 0 {
            return Err(ConfigError::RankTableStart {
                name: first.name.to_string(),
                min_xp: first.min_xp,
            });
        }

        let mut names = HashSet::new();
        for (idx, band) in bands.iter().enumerate() {
            if !names.insert(band.name) {
                return Err(ConfigError::DuplicateRank(band.name.to_string()));
            }

            let is_last = idx + 1 == bands.len();
            match band.max_xp {
                None if !is_last => {
                    return Err(ConfigError::UnboundedRankNotLast {
                        name: band.name.to_string(),
                    });
                }
                Some(_) if is_last => {
                    return Err(ConfigError::BoundedTopRank {
                        name: band.name.to_string(),
                    });
                }
                Some(max) if max < band.min_xp => {
                    return Err(ConfigError::EmptyRankBand {
                        name: band.name.to_string(),
                    });
                }
                _ => {}
            }

            if idx > 0 {
                // Previous band is bounded, checked above
                let previous_max = bands[idx - 1].max_xp.unwrap_or(u64::MAX);
                if previous_max.checked_add(1) != Some(band.min_xp) {
                    return Err(ConfigError::RankGapOrOverlap {
                        name: band.name.to_string(),
                        min_xp: band.min_xp,
                        previous_max,
                    });
                }
            }
        }

        Ok(Self { bands })
    }

    /// Rank matching the given XP
    pub fn rank_for_xp(&self, xp: u64) -> &'a Rank {
        self.bands
            .iter()
            .rev()
            .find(|r| xp >= r.min_xp)
            .unwrap_or(&self.bands[0])
    }

    /// Band following the one that contains `xp` (None at the top rank)
    pub fn next_rank(&self, xp: u64) -> Option<&'a Rank> {
        let current = self.rank_for_xp(xp);
        self.bands.iter().find(|r| r.min_xp > current.min_xp)
    }

    /// Percentage through the current band, in `[0, 100]`
    pub fn progress_to_next_rank(&self, xp: u64) -> f64 {
        let rank = self.rank_for_xp(xp);
        let Some(max) = rank.max_xp else {
            return 100.0;
        };
        let width = (max - rank.min_xp + 1) as f64;
        let into_band = xp.saturating_sub(rank.min_xp) as f64;
        (into_band / width * 100.0).clamp(0.0, 100.0)
    }

    /// XP still needed to enter the next band (0 at the top rank)
    pub fn xp_to_next_rank(&self, xp: u64) -> u64 {
        self.next_rank(xp)
            .map(|next| next.min_xp.saturating_sub(xp))
            .unwrap_or(0)
    }

    /// Whether the rank identity changed between two XP values
    pub fn has_ranked_up(&self, previous_xp: u64, current_xp: u64) -> bool {
        self.rank_for_xp(previous_xp) != self.rank_for_xp(current_xp)
    }
}

pub fn rank_for_xp(xp: u64) -> &'static Rank {
    RankTable::standard().rank_for_xp(xp)
}

pub fn progress_to_next_rank(xp: u64) -> f64 {
    RankTable::standard().progress_to_next_rank(xp)
}

pub fn xp_to_next_rank(xp: u64) -> u64 {
    RankTable::standard().xp_to_next_rank(xp)
}

pub fn has_ranked_up(previous_xp: u64, current_xp: u64) -> bool {
    RankTable::standard().has_ranked_up(previous_xp, current_xp)
}

/// Rank summary for display
#[derive(Debug, Clone, Serialize)]
pub struct RankProgress {
    pub total_xp: u64,
    pub rank: &'static str,
    pub next_rank: Option<&'static str>,
    pub progress_percent: f64,
    pub xp_to_next: u64,
}

impl RankProgress {
    pub fn new(total_xp: u64) -> Self {
        let table = RankTable::standard();
        Self {
            total_xp,
            rank: table.rank_for_xp(total_xp).name,
            next_rank: table.next_rank(total_xp).map(|r| r.name),
            progress_percent: table.progress_to_next_rank(total_xp),
            xp_to_next: table.xp_to_next_rank(total_xp),
        }
    }

    pub fn is_max_rank(&self) -> bool {
        self.next_rank.is_none()
    }
}
