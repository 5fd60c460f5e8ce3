//! Runtime settings.
//!
//! Layered with figment: defaults, then an optional JSON file, then `TRACKER_*` environment
//! variables (`TRACKER_CHANNEL_CAPACITY`, `TRACKER_FILE_ROOT`). `TRACKER_CONFIG` names the
//! file and is not itself a setting.

use figment::providers::{Env, Format, Json, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const ENV_PREFIX: &str = "TRACKER_";
pub const CONFIG_PATH_VAR: &str = "TRACKER_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Figment(#[from] figment::Error),

    #[error("Invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackerConfig {
    /// Capacity of each store's request channel.
    pub channel_capacity: usize,
    /// Root folder of the order document tree.
    pub file_root: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 32,
            file_root: "files".to_string(),
        }
    }
}

impl TrackerConfig {
    /// Defaults < JSON file < environment. A missing file contributes nothing.
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Json::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).ignore(&["config"]))
    }

    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment(path))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.channel_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                key: "channel_capacity".into(),
                value: "0".into(),
            });
        }
        if self.file_root.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "file_root".into(),
                value: self.file_root,
            });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    fn from_json(raw: &str) -> Result<TrackerConfig, ConfigError> {
        TrackerConfig::from_figment(
            Figment::new()
                .merge(Serialized::defaults(TrackerConfig::default()))
                .merge(Json::string(raw)),
        )
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config = from_json(r#"{"file_root": "/srv/jobs"}"#).unwrap();
        assert_eq!(config.channel_capacity, 32);
        assert_eq!(config.file_root, "/srv/jobs");
    }

    #[test]
    fn unknown_fields_and_invalid_values_are_rejected() {
        assert!(matches!(
            from_json(r#"{"fileroot": "x"}"#),
            Err(ConfigError::Figment(_))
        ));
        assert!(matches!(
            from_json(r#"{"channel_capacity": 0}"#),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            from_json(r#"{"file_root": "  "}"#),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "tracker.json",
                r#"{"channel_capacity": 8, "file_root": "/srv/jobs"}"#,
            )?;
            jail.set_env("TRACKER_CHANNEL_CAPACITY", "64");
            jail.set_env(CONFIG_PATH_VAR, "tracker.json");

            let config = TrackerConfig::load(Some(Path::new("tracker.json"))).unwrap();
            assert_eq!(config.channel_capacity, 64);
            assert_eq!(config.file_root, "/srv/jobs");
            Ok(())
        });
    }

    #[test]
    fn unparsable_environment_value_names_the_field() {
        Jail::expect_with(|jail| {
            jail.set_env("TRACKER_CHANNEL_CAPACITY", "many");

            let err = TrackerConfig::load(None).unwrap_err();
            assert!(err.to_string().contains("channel_capacity"));
            Ok(())
        });
    }
}
