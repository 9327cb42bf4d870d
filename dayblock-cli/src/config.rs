use anyhow::{Context, Result};
use dayblock_core::WorkWindow;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::state::ensure_dayblock_home;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// IANA timezone used to turn the system clock into local wall time.
    #[serde(default = "default_timezone")]
    pub timezone: String,

    pub workday: WorkdaySection,

    /// Seconds between overdue push-down passes in `watch`.
    #[serde(default = "default_tick_seconds")]
    pub tick_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkdaySection {
    pub start_hour: u32,
    pub end_hour: u32,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_tick_seconds() -> u64 {
    20
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            workday: WorkdaySection {
                start_hour: 8,
                end_hour: 18,
            },
            tick_seconds: default_tick_seconds(),
        }
    }
}

impl Config {
    pub fn work_window(&self) -> WorkWindow {
        WorkWindow::new(self.workday.start_hour, self.workday.end_hour)
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_dayblock_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(toml::from_str(&s).context("parse config.toml")?)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}
