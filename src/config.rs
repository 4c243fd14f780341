// ============================================================================
// CONFIGURATION - read once from the environment at startup
// ============================================================================

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};

const DEFAULT_TICK_MS: u64 = 250;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Event-poll timeout for the main loop.
    pub tick_rate: Duration,
    /// Start with the two welcome notes.
    pub seed: bool,
    /// Where log records go; `None` keeps logging off.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(DEFAULT_TICK_MS),
            seed: true,
            log_file: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(raw) = lookup("NOTEGRID_TICK_MS") {
            let ms: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("NOTEGRID_TICK_MS must be an integer, got {raw:?}"))?;
            if ms == 0 {
                bail!("NOTEGRID_TICK_MS must be greater than zero");
            }
            config.tick_rate = Duration::from_millis(ms);
        }

        if let Some(raw) = lookup("NOTEGRID_NO_SEED") {
            config.seed = !parse_flag(&raw)
                .with_context(|| format!("NOTEGRID_NO_SEED must be a boolean, got {raw:?}"))?;
        }

        config.log_file = match lookup("NOTEGRID_LOG_FILE") {
            Some(path) if !path.trim().is_empty() => Some(PathBuf::from(path)),
            _ if lookup("RUST_LOG").is_some() => Some(default_log_file()?),
            _ => None,
        };

        Ok(config)
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("unrecognised flag value {other:?}"),
    }
}

fn default_log_file() -> Result<PathBuf> {
    let data_home = dirs::data_dir().context("Could not determine data directory")?;
    Ok(data_home.join("notegrid").join("notegrid.log"))
}
