//! Badge definitions and metadata
//!
//! The catalogue is plain data handed to the detector. The built-in set below
//! is the default; configuration may replace it.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ProgressionError};

/// Counter a badge threshold is measured against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RequirementType {
    /// Number of completed workouts (distinct active days)
    Workouts,
    /// Current daily streak length
    Streak,
}

impl RequirementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Workouts => "workouts",
            Self::Streak => "streak",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ProgressionError> {
        match s {
            "workouts" => Ok(Self::Workouts),
            "streak" => Ok(Self::Streak),
            other => Err(ProgressionError::UnknownRequirement(other.to_string())),
        }
    }
}

impl TryFrom<String> for RequirementType {
    type Error = ProgressionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RequirementType> for String {
    fn from(value: RequirementType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for RequirementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Badge definition with display metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeDefinition {
    /// Stable identifier, also the storage key
    pub identifier: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub requirement_type: RequirementType,
    pub threshold_count: u32,
}

impl BadgeDefinition {
    pub fn new(
        identifier: &str,
        name: &str,
        description: &str,
        requirement_type: RequirementType,
        threshold_count: u32,
    ) -> Self {
        Self {
            identifier: identifier.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            requirement_type,
            threshold_count,
        }
    }

    pub fn workouts(identifier: &str, name: &str, description: &str, threshold: u32) -> Self {
        Self::new(identifier, name, description, RequirementType::Workouts, threshold)
    }

    pub fn streak(identifier: &str, name: &str, description: &str, threshold: u32) -> Self {
        Self::new(identifier, name, description, RequirementType::Streak, threshold)
    }
}

/// Built-in badge catalogue, in display order
pub fn default_badges() -> Vec<BadgeDefinition> {
    vec![
        // === WORKOUTS ===
        BadgeDefinition::workouts("first_blood", "First Blood", "Complete your first workout", 1),
        BadgeDefinition::workouts("ten_workouts", "Getting Serious", "Complete 10 workouts", 10),
        BadgeDefinition::workouts("fifty_workouts", "Iron Habit", "Complete 50 workouts", 50),
        BadgeDefinition::workouts("century", "Century", "Complete 100 workouts", 100),
        // === STREAKS ===
        BadgeDefinition::streak("streak_3", "On Fire", "Train 3 days in a row", 3),
        BadgeDefinition::streak("streak_7", "Full Week", "Train 7 days in a row", 7),
        BadgeDefinition::streak("streak_30", "Unbreakable", "Train 30 days in a row", 30),
    ]
}

/// Check identifiers are unique and non-empty and thresholds are positive
pub fn validate_catalogue(definitions: &[BadgeDefinition]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for def in definitions {
        if def.identifier.trim().is_empty() {
            return Err(ConfigError::EmptyBadgeIdentifier);
        }
        if def.threshold_count == 0 {
            return Err(ConfigError::ZeroThreshold(def.identifier.clone()));
        }
        if !seen.insert(def.identifier.as_str()) {
            return Err(ConfigError::DuplicateBadge(def.identifier.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalogue_is_valid() {
        let badges = default_badges();
        assert!(validate_catalogue(&badges).is_ok());
        assert_eq!(badges[0].identifier, "first_blood");
        assert_eq!(badges[0].name, "First Blood");
        assert_eq!(badges[0].threshold_count, 1);
    }

    #[test]
    fn test_rejects_duplicates_and_zero_threshold() {
        let dup = vec![
            BadgeDefinition::workouts("a", "A", "", 1),
            BadgeDefinition::streak("a", "A again", "", 2),
        ];
        assert_eq!(validate_catalogue(&dup), Err(ConfigError::DuplicateBadge("a".into())));

        let zero = vec![BadgeDefinition::streak("z", "Z", "", 0)];
        assert_eq!(validate_catalogue(&zero), Err(ConfigError::ZeroThreshold("z".into())));

        let blank = vec![BadgeDefinition::streak("  ", "Blank", "", 3)];
        assert_eq!(validate_catalogue(&blank), Err(ConfigError::EmptyBadgeIdentifier));
    }

    #[test]
    fn test_requirement_type_parse() {
        assert_eq!(RequirementType::parse("workouts").unwrap(), RequirementType::Workouts);
        assert_eq!(RequirementType::parse("streak").unwrap(), RequirementType::Streak);
        assert_eq!(
            RequirementType::parse("calories"),
            Err(ProgressionError::UnknownRequirement("calories".into()))
        );
    }
}
