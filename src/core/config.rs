//! Configuration - layered defaults, global file, local file, environment

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::params::ParamKey;
use crate::core::scenario::DEFAULT_SAMPLE_COUNT;

/// Name of the per-directory configuration folder
pub const LOCAL_DIR: &str = ".lce";

/// Configuration file name used in both locations
pub const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid value for {var}: '{value}'")]
    Env { var: &'static str, value: String },
}

/// One configuration layer as written on disk; unset fields inherit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_exchange_rate: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_count: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_x: Option<ParamKey>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_y: Option<ParamKey>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neutral_zero_direction: Option<bool>,
}

/// Effective configuration
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    pub author: String,
    pub default_exchange_rate: f64,
    pub sample_count: usize,
    pub default_x: ParamKey,
    pub default_y: ParamKey,
    pub default_format: Option<String>,
    /// Report r = 0 as "No correlation" rather than "Negative"
    pub neutral_zero_direction: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            author: default_author(),
            default_exchange_rate: 121.5,
            sample_count: DEFAULT_SAMPLE_COUNT,
            default_x: ParamKey::FobUsd,
            default_y: ParamKey::TotalLandedCost,
            default_format: None,
            neutral_zero_direction: false,
        }
    }
}

fn default_author() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
}

impl Config {
    /// Load from the standard locations relative to the current directory
    pub fn load() -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::load_from(global_path().as_deref(), find_local(&cwd).as_deref())
    }

    /// Load from explicit file locations, then apply the environment
    pub fn load_from(global: Option<&Path>, local: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        for path in [global, local].into_iter().flatten() {
            if path.exists() {
                let layer = read_layer(path)?;
                tracing::debug!(path = %path.display(), "applying config layer");
                config.apply(layer);
            }
        }

        config.apply(env_layer()?);
        Ok(config)
    }

    /// Overlay the set fields of a layer
    pub fn apply(&mut self, layer: ConfigLayer) {
        if let Some(author) = layer.author {
            self.author = author;
        }
        if let Some(rate) = layer.default_exchange_rate {
            self.default_exchange_rate = rate;
        }
        if let Some(count) = layer.sample_count {
            self.sample_count = count;
        }
        if let Some(x) = layer.default_x {
            self.default_x = x;
        }
        if let Some(y) = layer.default_y {
            self.default_y = y;
        }
        if layer.default_format.is_some() {
            self.default_format = layer.default_format;
        }
        if let Some(neutral) = layer.neutral_zero_direction {
            self.neutral_zero_direction = neutral;
        }
    }

    /// The files consulted by [`Config::load`], in precedence order
    pub fn search_paths() -> Vec<PathBuf> {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let mut paths = Vec::new();
        if let Some(global) = global_path() {
            paths.push(global);
        }
        paths.push(find_local(&cwd).unwrap_or_else(|| cwd.join(LOCAL_DIR).join(CONFIG_FILE)));
        paths
    }
}

/// Global config file, e.g. `~/.config/lce/config.yaml` on Linux
pub fn global_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "lce").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Nearest `.lce/config.yaml` at or above `start`
pub fn find_local(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(LOCAL_DIR).join(CONFIG_FILE))
        .find(|candidate| candidate.is_file())
}

fn read_layer(path: &Path) -> Result<ConfigLayer, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if content.trim().is_empty() {
        return Ok(ConfigLayer::default());
    }
    serde_yml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn env_layer() -> Result<ConfigLayer, ConfigError> {
    let mut layer = ConfigLayer {
        author: std::env::var("LCE_AUTHOR").ok().filter(|a| !a.is_empty()),
        ..Default::default()
    };

    if let Ok(raw) = std::env::var("LCE_EXCHANGE_RATE") {
        let rate = raw.trim().parse().map_err(|_| ConfigError::Env {
            var: "LCE_EXCHANGE_RATE",
            value: raw.clone(),
        })?;
        layer.default_exchange_rate = Some(rate);
    }

    if let Ok(raw) = std::env::var("LCE_SAMPLES") {
        let count = raw.trim().parse().map_err(|_| ConfigError::Env {
            var: "LCE_SAMPLES",
            value: raw.clone(),
        })?;
        layer.sample_count = Some(count);
    }

    Ok(layer)
}
