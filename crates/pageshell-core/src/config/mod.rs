//! # pageshell Configuration
//!
//! [`ShellConfig`] carries the few knobs the shell has: where the
//! computational module lives, the initial markup placed after each region,
//! and the default log level. Region selectors and the event name are fixed
//! and deliberately absent.
pub mod error;

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json;
#[cfg(feature = "yaml-config")]
use serde_yaml;
#[cfg(feature = "toml-config")]
use toml;

use crate::config::error::ConfigError;
use crate::kernel::constants::{DEFAULT_MODULE_PATH, WEB_MODULE_PATH};
use crate::region::RegionId;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "toml",
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                #[cfg(feature = "yaml-config")]
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                #[cfg(feature = "toml-config")]
                "toml" => Some(ConfigFormat::Toml),
                _ => None,
            })
    }
}

fn default_module_path() -> String {
    DEFAULT_MODULE_PATH.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_app_content() -> String {
    "<p> App Contents </p>".to_string()
}

fn default_nav_content() -> String {
    "<p> Nav Bar </p>".to_string()
}

fn default_message_bar_content() -> String {
    "<p> Message Bar </p>".to_string()
}

/// Initial markup inserted after each region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionContent {
    #[serde(default = "default_app_content")]
    pub app: String,
    #[serde(default = "default_nav_content")]
    pub nav: String,
    #[serde(default = "default_message_bar_content")]
    pub message_bar: String,
}

impl RegionContent {
    pub fn for_region(&self, id: RegionId) -> &str {
        match id {
            RegionId::App => &self.app,
            RegionId::Nav => &self.nav,
            RegionId::MessageBar => &self.message_bar,
        }
    }
}

impl Default for RegionContent {
    fn default() -> Self {
        Self {
            app: default_app_content(),
            nav: default_nav_content(),
            message_bar: default_message_bar_content(),
        }
    }
}

/// Shell configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Relative path of the computational module's entry point.
    ///
    /// The filesystem source expects the `.wasm` binary; the browser source
    /// expects the JS glue that exports a default init function.
    #[serde(default = "default_module_path")]
    pub module_path: String,
    /// Default log filter when none is given in the environment
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Markup placed after each region during initialization
    #[serde(default)]
    pub content: RegionContent,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            module_path: default_module_path(),
            log_level: default_log_level(),
            content: RegionContent::default(),
        }
    }
}

impl ShellConfig {
    /// Defaults for the browser, where the module is loaded through its JS glue
    /// rather than as a raw `.wasm` binary.
    pub fn web() -> Self {
        Self {
            module_path: WEB_MODULE_PATH.to_string(),
            ..Self::default()
        }
    }

    /// Parse configuration text in the given format.
    pub fn parse(text: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let parsed: Self = match format {
            ConfigFormat::Json => serde_json::from_str(text)
                .map_err(|e| ConfigError::parse(format, e)),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::from_str(text)
                .map_err(|e| ConfigError::parse(format, e)),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::from_str(text)
                .map_err(|e| ConfigError::parse(format, e)),
        }?;
        Ok(parsed)
    }

    /// Load configuration from a file, choosing the format by extension.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let format = ConfigFormat::from_path(path)
            .ok_or_else(|| ConfigError::UnsupportedFormat { path: path.to_path_buf() })?;
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let config = Self::parse(&text, format)?;
        log::debug!("Loaded {} configuration from {}", format.extension(), path.display());
        Ok(config)
    }

    /// Serialize to the given format.
    pub fn to_format_string(&self, format: ConfigFormat) -> Result<String, ConfigError> {
        match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)
                .map_err(|e| ConfigError::serialize(format, e)),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::to_string(self)
                .map_err(|e| ConfigError::serialize(format, e)),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::to_string_pretty(self)
                .map_err(|e| ConfigError::serialize(format, e)),
        }
    }
}
