//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/xml2conf/xml2conf.toml`
//! 3. Explicit config file (`--config <path>`)
//! 4. Environment variables: `XML2CONF_*` prefix, `__` between section and key
//!    (e.g. `XML2CONF_TRANSLATE__ABS_OPERANDS=exactly-one`)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::AbsOperands;

const ENV_PREFIX: &str = "XML2CONF";

/// Translation options.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TranslateConfig {
    /// `first` ignores extra `abs` operands, `exactly-one` rejects them
    pub abs_operands: AbsOperands,
}

/// Source loading options.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoaderConfig {
    /// Trim whitespace around element text (for pretty-printed sources)
    pub trim_text: bool,
}

/// Output file options.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    /// End the output file with a newline
    pub trailing_newline: bool,
}

/// Unified configuration for xml2conf.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub translate: TranslateConfig,
    pub loader: LoaderConfig,
    pub output: OutputConfig,
}

/// Raw settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RawSettings {
    pub translate: RawTranslateConfig,
    pub loader: RawLoaderConfig,
    pub output: RawOutputConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RawTranslateConfig {
    pub abs_operands: Option<AbsOperands>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RawLoaderConfig {
    pub trim_text: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RawOutputConfig {
    pub trailing_newline: Option<bool>,
}

/// Get the XDG config directory for xml2conf.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "xml2conf").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("xml2conf.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Merge overlay config onto self (base): overlay wins where specified.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            translate: TranslateConfig {
                abs_operands: overlay
                    .translate
                    .abs_operands
                    .unwrap_or(self.translate.abs_operands),
            },
            loader: LoaderConfig {
                trim_text: overlay.loader.trim_text.unwrap_or(self.loader.trim_text),
            },
            output: OutputConfig {
                trailing_newline: overlay
                    .output
                    .trailing_newline
                    .unwrap_or(self.output.trailing_newline),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; it must exist
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("load: global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        // 3. Explicit config file
        if let Some(path) = config_file {
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            debug!("load: config file {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables
        Self::apply_env_overrides(current, env_source())
    }

    /// Apply `XML2CONF_*` environment variables as explicit overrides.
    pub fn apply_env_overrides(
        mut settings: Self,
        source: Environment,
    ) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(source)
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_value(&config, "translate.abs_operands")? {
            settings.translate.abs_operands = parse_abs_operands(&val)?;
        }
        if let Some(val) = env_value(&config, "loader.trim_text")? {
            settings.loader.trim_text = parse_bool("loader.trim_text", &val)?;
        }
        if let Some(val) = env_value(&config, "output.trailing_newline")? {
            settings.output.trailing_newline = parse_bool("output.trailing_newline", &val)?;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# xml2conf configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/xml2conf/xml2conf.toml
#   Explicit: --config <path>
#   Env:      XML2CONF_<SECTION>__<KEY>, e.g. XML2CONF_OUTPUT__TRAILING_NEWLINE=true

[translate]
# Operands beyond the first in an `abs` expression:
#   "first"       ignore them
#   "exactly-one" reject the document
# abs_operands = "first"

[loader]
# Strip whitespace around element text (pretty-printed sources)
# trim_text = false

[output]
# End the output file with a newline
# trailing_newline = false
"#
        .to_string()
    }
}

/// Process environment, `XML2CONF_` prefix, `__` section separator.
pub fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

fn env_value(config: &Config, key: &str) -> Result<Option<String>, ApplicationError> {
    match config.get_string(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

fn parse_abs_operands(val: &str) -> Result<AbsOperands, ApplicationError> {
    match val.trim() {
        "first" => Ok(AbsOperands::First),
        "exactly-one" => Ok(AbsOperands::ExactlyOne),
        other => Err(ApplicationError::Config {
            message: format!(
                "translate.abs_operands: expected 'first' or 'exactly-one', got '{other}'"
            ),
        }),
    }
}

fn parse_bool(key: &str, val: &str) -> Result<bool, ApplicationError> {
    val.trim()
        .parse::<bool>()
        .map_err(|_| ApplicationError::Config {
            message: format!("{key}: expected 'true' or 'false', got '{val}'"),
        })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
