//! Run configuration loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) is a
//! valid configuration. Command-line flags are applied on top through
//! [`ConfigOverrides`].
//!
//! ```toml
//! sample_min = 2000
//! women_csv = "./data/women.csv"
//! household_csv = "./data/household.csv"
//! output_dir = "./output"
//! identity = "tagged"
//! dimensions = ["Has electricity", "type_of_place_of_residence"]
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use cohort_model::Dimension;
use cohort_search::ValueIdentity;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_SAMPLE_MIN: usize = 2000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {message}")]
    Invalid { message: String },
}

/// How equal values from different dimensions are treated when pruning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IdentityMode {
    /// A value is identified together with its dimension.
    #[default]
    Tagged,
    /// Equal literals collide across dimensions.
    Raw,
}

impl From<IdentityMode> for ValueIdentity {
    fn from(mode: IdentityMode) -> Self {
        match mode {
            IdentityMode::Tagged => ValueIdentity::DimensionTagged,
            IdentityMode::Raw => ValueIdentity::Raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Minimum rows for a value to stay in its domain and for a cohort to
    /// be reported.
    pub sample_min: usize,
    pub women_csv: PathBuf,
    pub household_csv: PathBuf,
    pub output_dir: PathBuf,
    /// Explored dimensions, in enumeration order.
    pub dimensions: Vec<Dimension>,
    pub identity: IdentityMode,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            sample_min: DEFAULT_SAMPLE_MIN,
            women_csv: PathBuf::from("./data/women.csv"),
            household_csv: PathBuf::from("./data/household.csv"),
            output_dir: PathBuf::from("./output"),
            dimensions: Dimension::ALL.to_vec(),
            identity: IdentityMode::default(),
        }
    }
}

/// Values supplied on the command line; `None` keeps the file value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub sample_min: Option<usize>,
    pub women_csv: Option<PathBuf>,
    pub household_csv: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub identity: Option<IdentityMode>,
}

impl RunConfig {
    /// Reads and validates a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: RunConfig = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when given, otherwise starts from the defaults, then
    /// applies `overrides` and validates the result.
    pub fn resolve(path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(sample_min) = overrides.sample_min {
            self.sample_min = sample_min;
        }
        if let Some(path) = overrides.women_csv {
            self.women_csv = path;
        }
        if let Some(path) = overrides.household_csv {
            self.household_csv = path;
        }
        if let Some(path) = overrides.output_dir {
            self.output_dir = path;
        }
        if let Some(identity) = overrides.identity {
            self.identity = identity;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_min == 0 {
            return Err(ConfigError::Invalid {
                message: "sample_min must be at least 1".to_string(),
            });
        }
        if self.dimensions.is_empty() {
            return Err(ConfigError::Invalid {
                message: "at least one dimension must be explored".to_string(),
            });
        }
        let mut seen = BTreeSet::new();
        for dimension in &self.dimensions {
            if !seen.insert(dimension) {
                return Err(ConfigError::Invalid {
                    message: format!("dimension '{dimension}' is listed twice"),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config: RunConfig = toml::from_str("").unwrap();
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.sample_min, 2000);
        assert_eq!(config.dimensions.len(), 9);
        assert_eq!(config.identity, IdentityMode::Tagged);
    }

    #[test]
    fn dimension_names_are_checked() {
        let config: RunConfig = toml::from_str(
            r#"
            sample_min = 50
            identity = "raw"
            dimensions = ["Has radio", "type_of_place_of_residence"]
            "#,
        )
        .unwrap();
        assert_eq!(config.sample_min, 50);
        assert_eq!(config.identity, IdentityMode::Raw);
        assert_eq!(
            config.dimensions,
            vec![Dimension::HasRadio, Dimension::TypeOfPlaceOfResidence]
        );

        assert!(toml::from_str::<RunConfig>(r#"dimensions = ["Favourite colour"]"#).is_err());
        assert!(toml::from_str::<RunConfig>("unknown_key = 1").is_err());
    }

    #[test]
    fn overrides_win() {
        let mut config = RunConfig::default();
        config.apply(ConfigOverrides {
            sample_min: Some(10),
            output_dir: Some(PathBuf::from("/tmp/out")),
            ..ConfigOverrides::default()
        });
        assert_eq!(config.sample_min, 10);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.women_csv, PathBuf::from("./data/women.csv"));
    }

    #[test]
    fn validation_rejects_bad_values() {
        let config = RunConfig {
            sample_min: 0,
            ..RunConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));

        let config = RunConfig {
            dimensions: vec![Dimension::HasRadio, Dimension::HasRadio],
            ..RunConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
    }
}
