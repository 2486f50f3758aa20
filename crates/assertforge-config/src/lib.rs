//! Configuration system for AssertForge.
//!
//! Load assertion settings from TOML or YAML files to control how failure
//! messages render and how floating-point equality is judged, without code
//! changes.
//!
//! # Examples
//!
//! ```
//! use assertforge_config::AssertConfig;
//!
//! let config = AssertConfig::from_toml_str(r#"
//!     default_tolerance = 1e-9
//!
//!     [render]
//!     max_string_length = 60
//!     max_items = 5
//! "#).unwrap();
//!
//! let settings = config.settings();
//! assert_eq!(settings.default_tolerance, Some(1e-9));
//! assert_eq!(settings.render.max_items, 5);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use assertforge_config::AssertConfig;
//!
//! let config = AssertConfig::load("assertforge.toml").unwrap_or_default();
//! ```

use std::path::Path;

use assertforge_core::{Asserter, RenderOptions, Settings};
use serde::{Deserialize, Serialize};
use thiserror::Error;


/// Default filter directive of the console subscriber.
pub const DEFAULT_FILTER: &str = "assertforge_core=info";

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main assertion configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AssertConfig {
    /// Rendering of values in failure messages.
    #[serde(default)]
    pub render: RenderConfig,

    /// Tolerance for floating-point equality without an explicit `within`.
    #[serde(default)]
    pub default_tolerance: Option<f64>,

    /// Console logging.
    #[serde(default)]
    pub console: ConsoleConfig,
}

impl AssertConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or holds
    /// out-of-range values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(tolerance) = self.default_tolerance {
            if !tolerance.is_finite() || tolerance < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "default_tolerance must be a finite, non-negative number, got {tolerance}"
                )));
            }
        }
        if self.console.filter.trim().is_empty() {
            return Err(ConfigError::Invalid("console.filter must not be empty".to_string()));
        }
        Ok(())
    }

    /// Sets the default floating-point tolerance.
    pub fn with_default_tolerance(mut self, amount: f64) -> Self {
        self.default_tolerance = Some(amount);
        self
    }

    /// Sets the string clipping length. Zero disables clipping.
    pub fn with_max_string_length(mut self, length: usize) -> Self {
        self.render.max_string_length = length;
        self
    }

    /// Sets how many list items are rendered. Zero renders all of them.
    pub fn with_max_items(mut self, items: usize) -> Self {
        self.render.max_items = items;
        self
    }

    /// Sets the console filter directive.
    pub fn with_console_filter(mut self, filter: impl Into<String>) -> Self {
        self.console.filter = filter.into();
        self
    }

    /// Converts into the settings used by `Asserter`.
    pub fn settings(&self) -> Settings {
        Settings {
            render: self.render.options(),
            default_tolerance: self.default_tolerance,
        }
    }

    /// Builds an asserter with these settings.
    pub fn asserter(&self) -> Asserter {
        Asserter::new(self.settings())
    }
}

/// Limits on rendered values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RenderConfig {
    /// Strings longer than this are clipped. Zero disables clipping.
    #[serde(default)]
    pub max_string_length: usize,

    /// Lists show at most this many items. Zero shows all of them.
    #[serde(default = "default_max_items")]
    pub max_items: usize,
}

fn default_max_items() -> usize {
    RenderOptions::default().max_items
}

impl Default for RenderConfig {
    fn default() -> Self {
        let options = RenderOptions::default();
        Self {
            max_string_length: options.max_string_length,
            max_items: options.max_items,
        }
    }
}

impl RenderConfig {
    pub fn options(&self) -> RenderOptions {
        RenderOptions {
            max_string_length: self.max_string_length,
            max_items: self.max_items,
        }
    }
}

/// Console subscriber configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ConsoleConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    DEFAULT_FILTER.to_string()
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}
