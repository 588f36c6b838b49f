// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use std::path::PathBuf;

use crate::config::ConfigError;

/// Resolve state directory: VSH_STATE_DIR > XDG_STATE_HOME/vsh > ~/.local/state/vsh
pub fn state_dir() -> Result<PathBuf, ConfigError> {
    if let Some(dir) = non_empty("VSH_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Some(xdg) = non_empty("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("vsh"));
    }
    let home = dirs::home_dir().ok_or(ConfigError::NoStateDir)?;
    Ok(home.join(".local/state/vsh"))
}

/// Store file override
pub fn vfs_file() -> Option<PathBuf> {
    non_empty("VSH_VFS").map(PathBuf::from)
}

/// Config file override
pub fn config_file() -> Option<PathBuf> {
    non_empty("VSH_CONFIG").map(PathBuf::from)
}

/// Log filter directive, e.g. `debug` or `vsh_storage=trace`
pub fn log_filter() -> Option<String> {
    non_empty("VSH_LOG")
}

fn non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
