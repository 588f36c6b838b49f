// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Startup configuration.
//!
//! Each setting is taken from the first source that has it: command-line
//! flag, environment, config file, built-in default.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use vsh_shell::{DEFAULT_HISTORY_SIZE, DEFAULT_MAX_JOBS};

use crate::env;

pub const DEFAULT_VFS_FILE: &str = "vfs.dat";
pub const DEFAULT_LOG_LEVEL: &str = "warn";
const LOG_FILE: &str = "vsh.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine state directory")]
    NoStateDir,

    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Contents of a `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub vfs_file: Option<PathBuf>,
    pub history_size: Option<usize>,
    pub max_jobs: Option<usize>,
    pub log_level: Option<String>,
    pub banner: Option<bool>,
}

impl FileConfig {
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path`. A missing file is an error only when `required`.
    pub fn load(path: &Path, required: bool) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content, path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// Settings given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub vfs_file: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub log_level: Option<String>,
    pub no_banner: bool,
}

/// Fully resolved settings for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub vfs_file: PathBuf,
    pub history_size: usize,
    pub max_jobs: usize,
    /// `EnvFilter` directive.
    pub log_filter: String,
    pub banner: bool,
    pub state_dir: PathBuf,
    pub log_path: PathBuf,
}

impl Config {
    pub fn load(overrides: Overrides) -> Result<Self, ConfigError> {
        let file = match overrides.config.clone().or_else(env::config_file) {
            Some(path) => FileConfig::load(&path, true)?,
            None => match default_config_path() {
                Some(path) => FileConfig::load(&path, false)?,
                None => FileConfig::default(),
            },
        };
        let state_dir = env::state_dir()?;
        Ok(Self::merge(overrides, file, state_dir))
    }

    fn merge(overrides: Overrides, file: FileConfig, state_dir: PathBuf) -> Self {
        let vfs_file = overrides
            .vfs_file
            .or_else(env::vfs_file)
            .or(file.vfs_file)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_VFS_FILE));
        let log_filter = overrides
            .log_level
            .or_else(env::log_filter)
            .or(file.log_level)
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        Self {
            vfs_file,
            history_size: file.history_size.unwrap_or(DEFAULT_HISTORY_SIZE),
            max_jobs: file.max_jobs.unwrap_or(DEFAULT_MAX_JOBS),
            log_filter,
            banner: !overrides.no_banner && file.banner.unwrap_or(true),
            log_path: state_dir.join(LOG_FILE),
            state_dir,
        }
    }
}

/// `~/.config/vsh/config.toml` or the platform equivalent.
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("vsh").join("config.toml"))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
