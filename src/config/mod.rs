// Author: Dustin Pilgrim
// License: MIT

pub mod parser;

use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr, eyre};
use rune_cfg::RuneConfig;

use crate::core::config::Config;

pub struct LoadedConfig {
    /// File the config came from; `None` means built-in defaults.
    pub path: Option<PathBuf>,
    pub cfg: Config,
}

pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("sessionwatch").join("sessionwatch.rune"))
}

pub fn system_config_path() -> PathBuf {
    PathBuf::from("/etc/sessionwatch/sessionwatch.rune")
}

/// First existing config file: user, then system.
pub fn resolve_default_config_path() -> Option<PathBuf> {
    user_config_path()
        .filter(|p| p.exists())
        .or_else(|| Some(system_config_path()).filter(|p| p.exists()))
}

/// Load an explicit config file. Missing or unparsable files are errors.
pub fn load_from_path(path: &Path) -> Result<LoadedConfig> {
    if !path.exists() {
        return Err(eyre!("config file not found: {}", path.display()));
    }

    let rune = RuneConfig::from_file(path)
        .wrap_err_with(|| format!("failed to load config from {}", path.display()))?;

    let cfg = parser::parse_session_config(&rune)
        .wrap_err_with(|| format!("invalid config in {}", path.display()))?;

    tracing::debug!("loaded config from {}", path.display());

    Ok(LoadedConfig {
        path: Some(path.to_path_buf()),
        cfg,
    })
}

/// Load `explicit` if given, else the first default location, else defaults.
pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        return load_from_path(path);
    }

    match resolve_default_config_path() {
        Some(path) => load_from_path(&path),
        None => {
            tracing::debug!("no config file found; using built-in defaults");
            Ok(LoadedConfig {
                path: None,
                cfg: Config::default(),
            })
        }
    }
}
