use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::directory::AlgorithmDirectory;
use crate::logging::LogFormat;
use crate::params::{AlgorithmFamily, ParameterSet};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse provider config: {0}")]
    Parse(String),
    #[error("configuration invalid: {0}")]
    Validation(String),
}

/// Provider settings, read from TOML.
///
/// ```toml
/// default-dilithium = "dilithium3"
/// default-falcon = "falcon-512"
/// enabled-parameter-sets = []
/// log-filter = "pqc_provider=info"
/// log-format = "text"
/// ```
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct ProviderConfig {
    /// Set used by an unlocked Dilithium key-pair adapter that was never
    /// initialised.
    #[serde(default = "default_dilithium")]
    pub default_dilithium: String,
    #[serde(default = "default_falcon")]
    pub default_falcon: String,
    /// Names exposed by the directory; empty enables every set.
    #[serde(default)]
    pub enabled_parameter_sets: Vec<String>,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_dilithium() -> String {
    ParameterSet::DILITHIUM3.name().into()
}

fn default_falcon() -> String {
    ParameterSet::FALCON_512.name().into()
}

fn default_log_filter() -> String {
    "pqc_provider=info".into()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            default_dilithium: default_dilithium(),
            default_falcon: default_falcon(),
            enabled_parameter_sets: Vec::new(),
            log_filter: default_log_filter(),
            log_format: LogFormat::Text,
        }
    }
}

/// Directory and per-family defaults derived from a validated config.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ResolvedConfig {
    pub directory: AlgorithmDirectory,
    pub default_dilithium: ParameterSet,
    pub default_falcon: ParameterSet,
}

impl ProviderConfig {
    /// Config restricted to the category-3 and category-5 sets.
    pub fn sample() -> Self {
        Self {
            default_dilithium: "dilithium3".into(),
            default_falcon: "falcon-1024".into(),
            enabled_parameter_sets: vec![
                "dilithium3".into(),
                "dilithium5".into(),
                "falcon-1024".into(),
            ],
            log_filter: "pqc_provider=debug".into(),
            log_format: LogFormat::Json,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolve().map(|_| ())
    }

    pub(crate) fn resolve(&self) -> Result<ResolvedConfig, ConfigError> {
        let standard = AlgorithmDirectory::standard();
        let directory = if self.enabled_parameter_sets.is_empty() {
            standard
        } else {
            let mut sets = Vec::with_capacity(self.enabled_parameter_sets.len());
            for name in &self.enabled_parameter_sets {
                let set = standard.resolve(name).ok_or_else(|| {
                    ConfigError::Validation(format!("unknown parameter set {name}"))
                })?;
                sets.push(set);
            }
            AlgorithmDirectory::with_sets(sets)
        };

        let default_dilithium =
            resolve_default(&directory, AlgorithmFamily::Dilithium, &self.default_dilithium)?;
        let default_falcon =
            resolve_default(&directory, AlgorithmFamily::Falcon, &self.default_falcon)?;

        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::Validation("log filter must not be empty".into()));
        }

        Ok(ResolvedConfig {
            directory,
            default_dilithium,
            default_falcon,
        })
    }
}

fn resolve_default(
    directory: &AlgorithmDirectory,
    family: AlgorithmFamily,
    name: &str,
) -> Result<ParameterSet, ConfigError> {
    directory.resolve_in(family, name).ok_or_else(|| {
        ConfigError::Validation(format!(
            "default {family} parameter set {name} is unknown, disabled, or of another family"
        ))
    })
}

pub fn parse_config(contents: &str) -> Result<ProviderConfig, ConfigError> {
    let config: ProviderConfig =
        toml::from_str(contents).map_err(|err| ConfigError::Parse(err.to_string()))?;
    config.validate()?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<ProviderConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&contents)
}
