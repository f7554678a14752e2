//! Report configuration
//!
//! Layered with figment, later layers winning:
//! - Built-in defaults
//! - A TOML file (`--config`, or `dicedist.toml` if present)
//! - `DICEDIST_*` environment variables

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Config file read when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "dicedist.toml";

/// Prefix for environment overrides, e.g. `DICEDIST_HIT_CHANCE`
pub const ENV_PREFIX: &str = "DICEDIST_";

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable summary and table
    #[default]
    Text,
    /// Single JSON object
    Json,
}

/// Defaults for a damage report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Flat bonus added to each hit
    pub modifier: i64,
    /// Probability the attack lands
    pub hit_chance: f64,
    /// Whether a miss still deals half damage
    pub half_damage: bool,
    /// Report output format
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            modifier: 0,
            hit_chance: 1.0,
            half_damage: false,
            format: OutputFormat::Text,
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error(transparent)]
    Figment(#[from] Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Figment(Box::new(err))
    }
}

impl Config {
    /// Provider stack for the given config file
    pub fn figment(file: &Path) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load and validate configuration.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(p) if !p.exists() => return Err(ConfigError::NotFound(p.to_path_buf())),
            Some(p) => p.to_path_buf(),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };
        debug!("loading config from {} (if present)", file.display());

        let config: Config = Self::figment(&file).extract()?;
        config.validate()?;
        debug!(?config, "resolved config");
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.hit_chance) {
            return Err(ConfigError::Invalid(format!(
                "hit_chance must be in [0, 1], got {}",
                self.hit_chance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.modifier, 0);
        assert_eq!(config.hit_chance, 1.0);
        assert!(!config.half_damage);
        assert_eq!(config.format, OutputFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config("modifier = -2\nhit_chance = 0.4\nhalf_damage = true\nformat = \"json\"\n");
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.modifier, -2);
        assert_eq!(config.hit_chance, 0.4);
        assert!(config.half_damage);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_config("half_damage = true\n");
        let config = Config::load(Some(file.path())).unwrap();
        assert!(config.half_damage);
        assert_eq!(config.hit_chance, 1.0);
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/dicedist.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_out_of_range_hit_chance() {
        let file = write_config("hit_chance = 1.5\n");
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_file() {
        let file = write_config("hit_chance = \"often\"\n");
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)));
    }
}
