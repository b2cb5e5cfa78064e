//! `legis.ron` run configuration. Every field is optional; a missing file
//! means all defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use legis_engine::{available_jurisdictions, FetchSettings, OnExhaustion, RetryPolicy};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::logging::LogDestination;

pub const DEFAULT_CONFIG_PATH: &str = "legis.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub output_dir: PathBuf,
    /// Jurisdiction names to run; empty runs every known jurisdiction.
    pub jurisdictions: Vec<String>,
    /// Legislative session for scrapers that take one, e.g. `"20192020"`.
    pub session: Option<String>,
    pub retry: RetryConfig,
    pub fetch: FetchConfig,
    pub log: LogDestination,
    pub verbose: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("_data"),
            jurisdictions: Vec::new(),
            session: None,
            retry: RetryConfig::default(),
            fetch: FetchConfig::default(),
            log: LogDestination::default(),
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Exhaustion {
    Fail,
    Warn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub initial_secs: u64,
    pub multiplier: u32,
    pub max_secs: u64,
    pub on_exhaustion: Exhaustion,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            initial_secs: 8,
            multiplier: 2,
            max_secs: 65,
            on_exhaustion: Exhaustion::Warn,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub user_agent: Option<String>,
    pub max_bytes: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
}

impl AppConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("reading config {}", path.display()));
            }
        };
        Self::parse(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(ron::from_str(content)?)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            initial_timeout: Duration::from_secs(self.retry.initial_secs),
            multiplier: self.retry.multiplier,
            max_timeout: Duration::from_secs(self.retry.max_secs),
            on_exhaustion: match self.retry.on_exhaustion {
                Exhaustion::Fail => OnExhaustion::Fail,
                Exhaustion::Warn => OnExhaustion::Warn,
            },
        }
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        let mut settings = FetchSettings::default();
        if let Some(user_agent) = &self.fetch.user_agent {
            settings.user_agent = user_agent.clone();
        }
        if let Some(max_bytes) = self.fetch.max_bytes {
            settings.max_bytes = max_bytes;
        }
        if let Some(secs) = self.fetch.connect_timeout_secs {
            settings.connect_timeout = Duration::from_secs(secs);
        }
        settings
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    /// Names to run, in configured order; every known jurisdiction when none are listed.
    pub fn selected_jurisdictions(&self) -> Vec<String> {
        if self.jurisdictions.is_empty() {
            available_jurisdictions()
                .iter()
                .map(|name| name.to_string())
                .collect()
        } else {
            self.jurisdictions.clone()
        }
    }
}
