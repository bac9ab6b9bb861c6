// Command-line interface

use crate::campaign::CampaignPlan;
use crate::config::AppConfig;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_COUNT: u32 = 3;
pub const DEFAULT_INTERVAL_SECS: u64 = 10;

#[derive(Debug, Parser)]
#[command(name = "wifi-bench", version)]
#[command(about = "Switch between Wi-Fi networks and log link quality and throughput samples as JSONL")]
pub struct Cli {
    /// SSIDs to benchmark, in order.
    #[arg(long, num_args = 1.., required = true)]
    pub ssids: Vec<String>,

    /// Samples per SSID.
    #[arg(long, default_value_t = DEFAULT_COUNT, value_parser = clap::value_parser!(u32).range(1..))]
    pub count: u32,

    /// Settle wait after each network switch, in seconds.
    #[arg(long, default_value_t = DEFAULT_INTERVAL_SECS)]
    pub interval: u64,

    /// Passwords matched to SSIDs by position; the last one repeats for remaining SSIDs.
    #[arg(long, num_args = 0..)]
    pub passwords: Vec<String>,

    /// Config file (default: $CONFIG_FILE or ./config.toml).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Overrides collector.log_path.
    #[arg(long)]
    pub log_path: Option<PathBuf>,

    /// Overrides collector.interface.
    #[arg(long)]
    pub interface: Option<String>,
}

impl Cli {
    pub fn plan(&self) -> CampaignPlan {
        CampaignPlan::new(
            &self.ssids,
            &self.passwords,
            self.count,
            Duration::from_secs(self.interval),
        )
    }

    /// Apply command-line overrides on top of the loaded config.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(path) = &self.log_path {
            config.collector.log_path = path.clone();
        }
        if let Some(interface) = &self.interface {
            config.collector.interface = interface.clone();
        }
    }
}
