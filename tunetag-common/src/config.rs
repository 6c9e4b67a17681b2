//! Configuration loading and resolution
//!
//! The catalog and match weights are compiled in; a TOML file may override
//! any part of them. The config file is located in priority order:
//! 1. Command-line argument (highest priority)
//! 2. `TUNETAG_CONFIG` environment variable
//! 3. User config file (`<config dir>/tunetag/config.toml`)
//! 4. Compiled defaults (fallback)
//!
//! An explicitly named file (1 or 2) must load. A missing or broken user
//! config file never terminates startup: it is reported and defaults apply.
//!
//! # Example
//! ```toml
//! [logging]
//! level = "debug"
//!
//! [matching]
//! extension = "mid"
//! weights = [4, 5, 3, 3, 2]
//!
//! [playback]
//! command = "timidity"
//! args = ["-Os"]
//!
//! [stickers.sun]
//! sunny = 1.0
//! summer = 0.5
//! ```

use crate::catalog::{Catalog, Category, Sticker};
use crate::matcher::{MatchSelector, DEFAULT_SUFFIX, DEFAULT_WEIGHTS};
use crate::tags::CATEGORY_COUNT;
use crate::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "TUNETAG_CONFIG";

/// TOML configuration file contents
///
/// Every section is optional; omitted values keep compiled defaults.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub matching: MatchingConfig,

    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Replacement category table (must hold exactly 5 categories)
    #[serde(default)]
    pub categories: Option<Vec<CategoryConfig>>,

    /// Replacement sticker table: sticker name → tag → weight
    #[serde(default)]
    pub stickers: Option<BTreeMap<String, BTreeMap<String, f64>>>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Candidate matching configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MatchingConfig {
    /// Candidate file extension, with or without the leading dot
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Per-category score weights
    #[serde(default = "default_weights")]
    pub weights: [u32; CATEGORY_COUNT],
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            weights: DEFAULT_WEIGHTS,
        }
    }
}

impl MatchingConfig {
    /// Extension as a filename suffix (`mid` → `.mid`)
    pub fn suffix(&self) -> String {
        if self.extension.starts_with('.') {
            self.extension.clone()
        } else {
            format!(".{}", self.extension)
        }
    }
}

/// External player configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct PlaybackConfig {
    /// Player executable; the file path is appended after `args`
    #[serde(default)]
    pub command: Option<String>,

    #[serde(default)]
    pub args: Vec<String>,
}

/// One category entry in the TOML file
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CategoryConfig {
    pub name: String,
    pub tags: Vec<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_extension() -> String {
    DEFAULT_SUFFIX.trim_start_matches('.').to_string()
}

fn default_weights() -> [u32; CATEGORY_COUNT] {
    DEFAULT_WEIGHTS
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Build the validated catalog
    ///
    /// Missing tables fall back to the reference categories and stickers.
    pub fn catalog(&self) -> Result<Catalog> {
        let categories = match &self.categories {
            Some(list) => list
                .iter()
                .map(|c| Category::new(c.name.clone(), c.tags.iter().cloned()))
                .collect(),
            None => Vec::from(Catalog::reference_categories()),
        };

        let stickers = match &self.stickers {
            Some(table) => table
                .iter()
                .map(|(name, weights)| {
                    Sticker::new(name.clone(), weights.iter().map(|(t, w)| (t.clone(), *w)))
                })
                .collect(),
            None => Catalog::reference_stickers(),
        };

        Catalog::new(categories, stickers)
    }

    /// Build the match selector from `[matching]`
    pub fn match_selector(&self) -> Result<MatchSelector> {
        MatchSelector::new(self.matching.weights, self.matching.suffix())
    }
}

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    CommandLine(PathBuf),
    Environment(PathBuf),
    UserConfig(PathBuf),
    CompiledDefaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::CommandLine(p) => write!(f, "command line ({})", p.display()),
            ConfigSource::Environment(p) => {
                write!(f, "{} ({})", CONFIG_ENV_VAR, p.display())
            }
            ConfigSource::UserConfig(p) => write!(f, "user config ({})", p.display()),
            ConfigSource::CompiledDefaults => write!(f, "compiled defaults"),
        }
    }
}

/// Locates and loads the configuration file
pub struct ConfigResolver {
    env_var_name: String,
    user_config_path: Option<PathBuf>,
}

impl ConfigResolver {
    /// Resolver using `TUNETAG_CONFIG` and the platform config directory
    pub fn new() -> Self {
        Self {
            env_var_name: CONFIG_ENV_VAR.to_string(),
            user_config_path: default_user_config_path(),
        }
    }

    /// Override the user config file location (None disables tier 3)
    pub fn with_user_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.user_config_path = path;
        self
    }

    /// Resolve the configuration
    ///
    /// # Errors
    /// Only when a file named by the command line or environment cannot be
    /// read or parsed.
    pub fn resolve(&self, cli_arg: Option<&Path>) -> Result<(TomlConfig, ConfigSource)> {
        // Priority 1: Command-line argument
        if let Some(path) = cli_arg {
            let config = TomlConfig::load(path)?;
            return Ok((config, ConfigSource::CommandLine(path.to_path_buf())));
        }

        // Priority 2: Environment variable
        if let Ok(value) = std::env::var(&self.env_var_name) {
            if !value.trim().is_empty() {
                let path = PathBuf::from(value);
                let config = TomlConfig::load(&path)?;
                return Ok((config, ConfigSource::Environment(path)));
            }
        }

        // Priority 3: User config file
        if let Some(path) = &self.user_config_path {
            if path.exists() {
                match TomlConfig::load(path) {
                    Ok(config) => return Ok((config, ConfigSource::UserConfig(path.clone()))),
                    Err(e) => {
                        warn!(
                            "Ignoring config file {}: {}. Using compiled defaults.",
                            path.display(),
                            e
                        );
                    }
                }
            }
        }

        // Priority 4: Compiled defaults
        info!("No config file found, using compiled defaults");
        Ok((TomlConfig::default(), ConfigSource::CompiledDefaults))
    }
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Platform user config file path
pub fn default_user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tunetag").join("config.toml"))
}
