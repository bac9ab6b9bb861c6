use anyhow::Result;
use chrono::FixedOffset;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;
use wifi_bench::campaign::{self, CampaignDeps, CampaignSettings};
use wifi_bench::cli::Cli;
use wifi_bench::config::AppConfig;
use wifi_bench::diagnostics::{DiagnosticTool, MacDiagnostics};
use wifi_bench::log_repo::LogRepo;
use wifi_bench::network::{Networksetup, TokioSleeper};
use wifi_bench::record::{RecordBuilder, SystemClock, fixed_offset};
use wifi_bench::speedtest::SpeedtestCli;

/// Operator log timestamps in the same fixed offset as the records.
struct OffsetTimer(FixedOffset);

impl FormatTime for OffsetTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Utc::now()
                .with_timezone(&self.0)
                .format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut app_config = AppConfig::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut app_config);
    app_config.validate()?;

    let offset = fixed_offset(app_config.collector.utc_offset_hours).ok_or_else(|| {
        anyhow::anyhow!(
            "invalid utc offset: {}",
            app_config.collector.utc_offset_hours
        )
    })?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(OffsetTimer(offset))
        .with_env_filter(filter)
        .init();

    let plan = cli.plan();
    let diagnostics = MacDiagnostics::from_config(&app_config.tools);
    tracing::info!(
        source = ?diagnostics.source(),
        interface = %app_config.collector.interface,
        samples = plan.total_samples(),
        "collector configured"
    );

    let deps = CampaignDeps {
        controller: Networksetup::new(app_config.tools.networksetup.clone()),
        diagnostics,
        speed_tester: SpeedtestCli::new(
            app_config.tools.speedtest.clone(),
            app_config.tools.speedtest_args.clone(),
        ),
        sleeper: TokioSleeper,
        records: RecordBuilder::new(SystemClock, offset),
        log: LogRepo::new(app_config.collector.log_path.clone()),
    };
    let settings = CampaignSettings {
        interface: app_config.collector.interface.clone(),
        max_consecutive_log_failures: app_config.collector.max_consecutive_log_failures,
    };

    match campaign::run(&plan, &deps, &settings).await {
        Ok(summary) => {
            for f in &summary.failures {
                tracing::warn!(
                    ssid = %f.ssid,
                    repetition = f.repetition,
                    stage = %f.stage,
                    kind = f.kind,
                    "failed sample: {}",
                    f.message
                );
            }
            Ok(())
        }
        Err(aborted) => {
            tracing::error!(
                attempted = aborted.summary.attempted,
                succeeded = aborted.summary.succeeded,
                "campaign aborted"
            );
            Err(aborted.into())
        }
    }
}
