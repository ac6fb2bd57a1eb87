use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::user::os_random_seed;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing config file: {0}")]
    MissingFile(String),

    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid config: {0}")]
    Parse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Service configuration: where the user dataset lives and, optionally, how
/// to generate it when it is absent.
#[derive(Debug, Deserialize, Serialize)]
pub struct ServiceConfig {
    pub dataset: String,
    #[serde(default)]
    pub generator: Option<GeneratorConfig>,
}

/// Generator settings, with or without a pinned seed.
#[derive(Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum GeneratorConfig {
    Seeded(SeededGeneratorConfig),
    Unseeded(UnseededGeneratorConfig),
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct SeededGeneratorConfig {
    pub count: usize,
    pub seed: u64,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct UnseededGeneratorConfig {
    pub count: usize,
}

impl GeneratorConfig {
    /// The full settings, with a missing seed drawn from the OS.
    pub fn cfg(&self) -> SeededGeneratorConfig {
        match self {
            Self::Seeded(cfg) => *cfg,
            Self::Unseeded(cfg) => SeededGeneratorConfig {
                count: cfg.count,
                seed: os_random_seed() as u64,
            },
        }
    }
}

impl ServiceConfig {
    /// Reads a config file, choosing the format by file extension.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::MissingFile(path.display().to_string()));
        }

        let raw = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&raw).map_err(|err| ConfigError::Parse(err.to_string()))
            }
            Some("ron") => {
                ron::de::from_str(&raw).map_err(|err| ConfigError::Parse(err.to_string()))
            }
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
