//! XDG-style path utilities for configuration and audio output.
//!
//! XDG Base Directory conventions are preferred over OS-specific
//! locations so the layout is the same on every platform.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "mentor";

/// Returns the configuration directory for mentor.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/mentor` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/mentor` otherwise
pub fn config_dir() -> Result<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config")
}

/// Returns the directory synthesized answers are written to.
///
/// Resolution order:
/// 1. `$XDG_CACHE_HOME/mentor/audio` if `XDG_CACHE_HOME` is set
/// 2. `~/.cache/mentor/audio` otherwise
pub fn audio_dir() -> Result<PathBuf> {
    Ok(xdg_dir("XDG_CACHE_HOME", ".cache")?.join("audio"))
}

fn xdg_dir(env_var: &str, home_fallback: &str) -> Result<PathBuf> {
    match std::env::var(env_var) {
        Ok(xdg) if !xdg.is_empty() => Ok(PathBuf::from(xdg).join(APP_DIR)),
        _ => Ok(home_dir()?.join(home_fallback).join(APP_DIR)),
    }
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().context("Failed to determine home directory")
}
