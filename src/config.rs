// ABOUTME: Configuration module for the slidesmith application
// ABOUTME: Provides default settings, environment overrides and per-command options

use crate::blocks;
use crate::bootstrap::BootstrapOptions;
use crate::errors::{DeckError, Result};
use crate::slides::SLIDE_SEPARATOR;
use crate::split::SplitOptions;
use crate::wrap::WrapOptions;
use std::env;
use std::path::PathBuf;

/// Global configuration for the application
#[derive(Debug, Clone)]
pub struct Config {
    pub max_lines: usize,
    pub lookback: usize,
    pub max_width: usize,
    pub slides_dir: PathBuf,
    pub index_output: PathBuf,
    pub site_title: String,
    pub reveal_version: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_lines: 40,
            lookback: 10,
            max_width: 70,
            slides_dir: PathBuf::from("slides"),
            index_output: PathBuf::from("src/index.html"),
            site_title: "HCI/HMI Lecture".to_string(),
            reveal_version: "5.0.4".to_string(),
        }
    }
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

impl Config {
    /// Create a new configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            max_lines: env_usize("SLIDESMITH_MAX_LINES", defaults.max_lines),
            lookback: env_usize("SLIDESMITH_LOOKBACK", defaults.lookback),
            max_width: env_usize("SLIDESMITH_MAX_WIDTH", defaults.max_width),
            slides_dir: env::var("SLIDESMITH_SLIDES_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.slides_dir),
            index_output: env::var("SLIDESMITH_INDEX_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.index_output),
            site_title: env::var("SLIDESMITH_SITE_TITLE").unwrap_or(defaults.site_title),
            reveal_version: env::var("SLIDESMITH_REVEAL_VERSION")
                .unwrap_or(defaults.reveal_version),
        }
    }

    /// Reject settings the rewriters cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.max_lines == 0 {
            return Err(DeckError::ConfigError(
                "max_lines must be at least 1".to_string(),
            ));
        }
        if self.lookback == 0 {
            return Err(DeckError::ConfigError(
                "lookback must be at least 1".to_string(),
            ));
        }
        if self.max_width < 10 {
            return Err(DeckError::ConfigError(format!(
                "max_width must be at least 10, got {}",
                self.max_width
            )));
        }
        Ok(())
    }

    /// Get split options from this config
    pub fn split_options(&self) -> SplitOptions {
        SplitOptions {
            max_lines: self.max_lines,
            lookback: self.lookback,
            container_markers: blocks::default_container_markers(),
            separator: SLIDE_SEPARATOR.to_string(),
        }
    }

    pub fn wrap_options(&self) -> WrapOptions {
        WrapOptions {
            max_width: self.max_width,
            ..WrapOptions::default()
        }
    }

    pub fn bootstrap_options(&self) -> BootstrapOptions {
        BootstrapOptions {
            site_title: self.site_title.clone(),
            reveal_version: self.reveal_version.clone(),
            ..BootstrapOptions::default()
        }
    }
}
