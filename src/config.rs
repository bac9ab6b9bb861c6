use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::record::DEFAULT_UTC_OFFSET_HOURS;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const DEFAULT_AIRPORT_PATH: &str =
    "/System/Library/PrivateFrameworks/Apple80211.framework/Versions/Current/Resources/airport";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub collector: CollectorConfig,
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Wi-Fi interface handed to the network controller.
    pub interface: String,
    pub log_path: PathBuf,
    /// Fixed offset for record timestamps and operator log lines.
    pub utc_offset_hours: i32,
    /// Log-write failures in a row before the campaign is aborted.
    pub max_consecutive_log_failures: u32,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            interface: "en0".into(),
            log_path: PathBuf::from("logs/benchmark.jsonl"),
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
            max_consecutive_log_failures: 3,
        }
    }
}

/// Which diagnostic tool to sample PHY metrics with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticChoice {
    #[default]
    Auto,
    SystemProfiler,
    Airport,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub diagnostic: DiagnosticChoice,
    pub networksetup: String,
    pub system_profiler: String,
    pub airport: String,
    pub speedtest: String,
    pub speedtest_args: Vec<String>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            diagnostic: DiagnosticChoice::Auto,
            networksetup: "networksetup".into(),
            system_profiler: "/usr/sbin/system_profiler".into(),
            airport: DEFAULT_AIRPORT_PATH.into(),
            speedtest: "speedtest-cli".into(),
            speedtest_args: vec!["--json".into(), "--secure".into()],
        }
    }
}

impl AppConfig {
    /// Load from `explicit`, else `CONFIG_FILE`, else `config.toml`.
    /// Only the implicit `config.toml` may be absent; built-in defaults are used then.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let (path, required) = match explicit {
            Some(p) => (p.to_path_buf(), true),
            None => match std::env::var("CONFIG_FILE") {
                Ok(p) => (PathBuf::from(p), true),
                Err(_) => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
            },
        };
        if !required && !path.exists() {
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        let s = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.collector.interface.trim().is_empty(),
            "collector.interface must be non-empty"
        );
        anyhow::ensure!(
            !self.collector.log_path.as_os_str().is_empty(),
            "collector.log_path must be non-empty"
        );
        anyhow::ensure!(
            (-12..=14).contains(&self.collector.utc_offset_hours),
            "collector.utc_offset_hours must be between -12 and 14, got {}",
            self.collector.utc_offset_hours
        );
        anyhow::ensure!(
            self.collector.max_consecutive_log_failures > 0,
            "collector.max_consecutive_log_failures must be > 0, got {}",
            self.collector.max_consecutive_log_failures
        );
        for (name, value) in [
            ("tools.networksetup", &self.tools.networksetup),
            ("tools.system_profiler", &self.tools.system_profiler),
            ("tools.airport", &self.tools.airport),
            ("tools.speedtest", &self.tools.speedtest),
        ] {
            anyhow::ensure!(!value.trim().is_empty(), "{} must be non-empty", name);
        }
        Ok(())
    }
}
