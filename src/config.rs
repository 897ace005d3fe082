//! Configuration management for specguard
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (specguard.toml)
//! - Environment variables (SPECGUARD__*)
//!
//! ## Example config file (specguard.toml):
//! ```toml
//! [diff]
//! block_on_breaking = true
//!
//! [lint]
//! fail_on_error = true
//!
//! [score]
//! min_score = 60
//!
//! [output]
//! format = "github"
//! ```

use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::report::OutputFormat;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecGuardConfig {
    #[serde(default)]
    pub diff: DiffConfig,

    #[serde(default)]
    pub lint: LintConfig,

    #[serde(default)]
    pub score: ScoreConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// `specguard diff` settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffConfig {
    /// Exit non-zero when any breaking change is found
    #[serde(default = "default_true")]
    pub block_on_breaking: bool,
}

/// `specguard lint` settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintConfig {
    /// Exit non-zero when any error-level finding is found
    #[serde(default = "default_true")]
    pub fail_on_error: bool,
}

/// `specguard score` settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreConfig {
    /// Scores below this fail
    #[serde(default = "default_min_score")]
    pub min_score: u32,
}

/// Output settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_true() -> bool {
    true
}

fn default_min_score() -> u32 {
    60
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            block_on_breaking: true,
        }
    }
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            fail_on_error: true,
        }
    }
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            min_score: default_min_score(),
        }
    }
}

impl SpecGuardConfig {
    /// Load configuration from the default locations, with an optional
    /// explicit file layered on top
    pub fn load_from(config_path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_locations = ["specguard.toml", ".specguard.toml", "config/specguard.toml"];
        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(config_dir) = directories::ProjectDirs::from("dev", "specguard", "specguard") {
            let xdg_config = config_dir.config_dir().join("specguard.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("SPECGUARD")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let loaded: Self = config.try_deserialize()?;
        tracing::debug!(?loaded, "configuration loaded");
        Ok(loaded)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = self
            .to_toml()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }
}
