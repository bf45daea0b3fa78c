//! Configuration loading and management

mod io;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::progression::{default_badges, validate_catalogue, BadgeDefinition};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub settings: Settings,

    /// Badge catalogue; the built-in catalogue is used when empty
    #[serde(default)]
    pub badge: Vec<BadgeDefinition>,
}

/// General settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Progression database path (defaults to ~/.forgefit/progression.db)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
}

impl Config {
    /// Config with the built-in badge catalogue written out, used by `init`
    pub fn with_defaults() -> Self {
        Self {
            settings: Settings::default(),
            badge: default_badges(),
        }
    }

    /// Badge definitions in effect
    pub fn badges(&self) -> Vec<BadgeDefinition> {
        if self.badge.is_empty() {
            default_badges()
        } else {
            self.badge.clone()
        }
    }

    /// Database path in effect
    pub fn database_path(&self) -> PathBuf {
        self.settings
            .database_path
            .clone()
            .unwrap_or_else(|| Self::global_config_dir().join("progression.db"))
    }

    /// Reject an unusable badge catalogue
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_catalogue(&self.badges())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_falls_back_to_builtin_badges() {
        let config = Config::default();
        assert_eq!(config.badges(), default_badges());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_custom_catalogue() {
        let config: Config = toml::from_str(
            r#"
            [settings]
            database_path = "/tmp/fit.db"

            [[badge]]
            identifier = "first_blood"
            name = "First Blood"
            requirement_type = "workouts"
            threshold_count = 1

            [[badge]]
            identifier = "fortnight"
            name = "Fortnight"
            description = "Train 14 days in a row"
            requirement_type = "streak"
            threshold_count = 14
            "#,
        )
        .unwrap();

        assert_eq!(config.database_path(), PathBuf::from("/tmp/fit.db"));
        let badges = config.badges();
        assert_eq!(badges.len(), 2);
        assert_eq!(badges[1].identifier, "fortnight");
        assert_eq!(badges[1].threshold_count, 14);
    }

    #[test]
    fn test_unknown_requirement_type_fails_to_parse() {
        let parsed: Result<Config, _> = toml::from_str(
            r#"
            [[badge]]
            identifier = "burner"
            name = "Burner"
            requirement_type = "calories"
            threshold_count = 1000
            "#,
        );
        let err = parsed.unwrap_err().to_string();
        assert!(err.contains("calories"), "unexpected error: {err}");
    }
}
