mod error;

pub use error::ConfigError;

use crate::jobs::JobDefinition;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Marker the legacy runtime uses to delimit a script from its virtual sub-path.
pub const DEFAULT_SCRIPT_EXTENSION: &str = ".xsjs";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestConfig {
    /// e.g. ".xsjs"
    #[serde(default = "default_script_extension")]
    pub script_extension: String,

    /// Language used when the request does not name an acceptable one.
    #[serde(default)]
    pub default_language: String,

    /// Decompose `multipart/form-data` bodies the host framework left unparsed.
    #[serde(default = "default_true")]
    pub decompose_unparsed_form_data: bool,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            script_extension: default_script_extension(),
            default_language: String::new(),
            decompose_unparsed_form_data: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MultipartConfig {
    /// Maximum number of parts in a single multipart body.
    #[serde(default = "default_max_parts")]
    pub max_parts: usize,

    /// How deep multipart parts may nest before they are kept opaque.
    #[serde(default = "default_max_nesting_depth")]
    pub max_nesting_depth: usize,
}

impl Default for MultipartConfig {
    fn default() -> Self {
        Self {
            max_parts: default_max_parts(),
            max_nesting_depth: default_max_nesting_depth(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobsConfig {
    #[serde(default)]
    pub jobs: Vec<JobDefinition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    #[serde(default)]
    pub request: RequestConfig,

    #[serde(default)]
    pub multipart: MultipartConfig,

    /// Jobs support is disabled when the section is absent.
    pub jobs: Option<JobsConfig>,
}

impl BridgeConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let cfg: Self = toml::from_str(&contents).map_err(|e| ConfigError::parse(path, e))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ext = &self.request.script_extension;
        if !ext.starts_with('.') || ext.len() < 2 || ext.contains(['/', '?']) {
            return Err(ConfigError::InvalidScriptExtension {
                extension: ext.clone(),
            });
        }

        if self.multipart.max_parts == 0 {
            return Err(ConfigError::InvalidLimit {
                name: "multipart.max_parts",
            });
        }

        Ok(())
    }
}

impl FromStr for BridgeConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(s).map_err(|e| ConfigError::parse("<inline>", e))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

fn default_script_extension() -> String {
    DEFAULT_SCRIPT_EXTENSION.to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_parts() -> usize {
    1000
}

fn default_max_nesting_depth() -> usize {
    4
}
