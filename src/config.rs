// src/config.rs
// Optional ~/.termshell.toml settings

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_ENV: &str = "TERMSHELL_CONFIG";
const CONFIG_FILE: &str = ".termshell.toml";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Hard ceiling for commands passed to the host interpreter.
    pub command_timeout_secs: u64,
    /// In-memory history entries kept by the line editor.
    pub history_size: usize,
    pub show_banner: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            command_timeout_secs: 30,
            history_size: 1000,
            show_banner: true,
        }
    }
}

impl Config {
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    /// Load from `$TERMSHELL_CONFIG` or `~/.termshell.toml`.
    /// A missing or broken file falls back to defaults.
    pub fn load() -> Self {
        let Some(path) = config_path() else { return Config::default() };
        if !path.exists() {
            return Config::default();
        }
        match Config::from_file(&path) {
            Ok(cfg) => {
                log::debug!("loaded config from {}", path.display());
                cfg
            }
            Err(e) => {
                log::warn!("ignoring {}: {e:#}", path.display());
                Config::default()
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Config::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(content).context("invalid config")?;
        if cfg.command_timeout_secs == 0 {
            anyhow::bail!("command_timeout_secs must be greater than zero");
        }
        Ok(cfg)
    }
}

fn config_path() -> Option<PathBuf> {
    if let Some(p) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(p));
    }
    dirs::home_dir().map(|h| h.join(CONFIG_FILE))
}
