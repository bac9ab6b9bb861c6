// Campaign loop: for each SSID, for each repetition, switch -> sample PHY -> speed test -> record -> append.
// A failed step drops only that sample; the campaign always moves on to the next one.

use crate::diagnostics::{DiagnosticTool, get_physical_metrics};
use crate::error::CollectorError;
use crate::log_repo::LogRepo;
use crate::models::Record;
use crate::network::{NetworkController, Sleeper, switch_network};
use crate::record::{Clock, RecordBuilder};
use crate::speedtest::{SpeedTester, run_speedtest};
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::instrument;

/// One SSID to benchmark, with its resolved password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SsidTarget {
    pub ssid: String,
    pub password: Option<String>,
}

/// What to measure. Immutable for the campaign's duration.
#[derive(Debug, Clone)]
pub struct CampaignPlan {
    pub targets: Vec<SsidTarget>,
    /// Samples per SSID.
    pub count: u32,
    /// Settle wait after every switch.
    pub settle: Duration,
}

impl CampaignPlan {
    pub fn new(ssids: &[String], passwords: &[String], count: u32, settle: Duration) -> Self {
        let targets = ssids
            .iter()
            .cloned()
            .zip(resolve_passwords(ssids.len(), passwords))
            .map(|(ssid, password)| SsidTarget { ssid, password })
            .collect();
        Self {
            targets,
            count,
            settle,
        }
    }

    /// Saturates instead of overflowing for very large `count`.
    pub fn total_samples(&self) -> u64 {
        (self.targets.len() as u64).saturating_mul(u64::from(self.count))
    }
}

/// Pair passwords with `n` SSIDs positionally. A shorter list repeats its last entry;
/// an empty list means no password anywhere. Extra passwords are ignored.
pub fn resolve_passwords(n: usize, passwords: &[String]) -> Vec<Option<String>> {
    (0..n)
        .map(|i| passwords.get(i).or(passwords.last()).cloned())
        .collect()
}

/// Step of a single sample; reported with failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    SwitchingNetwork,
    CollectingMetrics,
    RunningSpeedTest,
    BuildingRecord,
    Appending,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::SwitchingNetwork => "switching_network",
            Stage::CollectingMetrics => "collecting_metrics",
            Stage::RunningSpeedTest => "running_speed_test",
            Stage::BuildingRecord => "building_record",
            Stage::Appending => "appending",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationFailure {
    pub ssid: String,
    /// 1-based repetition within the SSID.
    pub repetition: u32,
    pub stage: Stage,
    /// `CollectorError::kind()` label.
    pub kind: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct CampaignSummary {
    pub attempted: u32,
    pub succeeded: u32,
    pub failures: Vec<IterationFailure>,
}

impl CampaignSummary {
    pub fn failed(&self) -> u32 {
        self.failures.len() as u32
    }
}

/// The log path kept rejecting writes; the campaign stopped early.
#[derive(Debug, Error)]
#[error("campaign aborted after {consecutive} consecutive log write failures: {last}")]
pub struct CampaignAborted {
    pub consecutive: u32,
    pub last: CollectorError,
    pub summary: CampaignSummary,
}

/// Collaborators for the campaign.
pub struct CampaignDeps<N, D, S, W, C: Clock> {
    pub controller: N,
    pub diagnostics: D,
    pub speed_tester: S,
    pub sleeper: W,
    pub records: RecordBuilder<C>,
    pub log: LogRepo,
}

pub struct CampaignSettings {
    pub interface: String,
    pub max_consecutive_log_failures: u32,
}

/// Run every (SSID, repetition) pair in order. Returns `Err` only when
/// `max_consecutive_log_failures` appends in a row failed.
pub async fn run<N, D, S, W, C>(
    plan: &CampaignPlan,
    deps: &CampaignDeps<N, D, S, W, C>,
    settings: &CampaignSettings,
) -> Result<CampaignSummary, CampaignAborted>
where
    N: NetworkController,
    D: DiagnosticTool,
    S: SpeedTester,
    W: Sleeper,
    C: Clock,
{
    let mut summary = CampaignSummary::default();
    let mut consecutive_log_failures: u32 = 0;

    tracing::info!(
        ssids = plan.targets.len(),
        count = plan.count,
        settle_secs = plan.settle.as_secs(),
        log_path = %deps.log.path().display(),
        "campaign started"
    );

    for target in &plan.targets {
        for repetition in 1..=plan.count {
            summary.attempted += 1;
            let (stage, e) = match sample(target, repetition, plan.settle, deps, settings).await {
                Ok(record) => {
                    summary.succeeded += 1;
                    consecutive_log_failures = 0;
                    tracing::info!(
                        ssid = %record.ssid,
                        repetition,
                        rssi = ?record.rssi,
                        noise = ?record.noise,
                        mcs_index = ?record.mcs_index,
                        download_mbps = record.download_mbps,
                        upload_mbps = record.upload_mbps,
                        ping_ms = record.ping_ms,
                        "sample recorded"
                    );
                    continue;
                }
                Err(failure) => failure,
            };

            tracing::warn!(
                ssid = %target.ssid,
                repetition,
                stage = %stage,
                kind = e.kind(),
                error = %e,
                "sample failed, continuing"
            );
            summary.failures.push(IterationFailure {
                ssid: target.ssid.clone(),
                repetition,
                stage,
                kind: e.kind(),
                message: e.to_string(),
            });

            if stage == Stage::Appending && e.is_io() {
                consecutive_log_failures += 1;
                if consecutive_log_failures >= settings.max_consecutive_log_failures {
                    tracing::error!(
                        consecutive = consecutive_log_failures,
                        log_path = %deps.log.path().display(),
                        "log path keeps failing, aborting campaign"
                    );
                    return Err(CampaignAborted {
                        consecutive: consecutive_log_failures,
                        last: e,
                        summary,
                    });
                }
            }
        }
    }

    tracing::info!(
        attempted = summary.attempted,
        succeeded = summary.succeeded,
        failed = summary.failed(),
        "campaign finished"
    );
    Ok(summary)
}

/// One sample. The error carries the stage it happened in.
#[instrument(skip_all, fields(ssid = %target.ssid, repetition = repetition))]
async fn sample<N, D, S, W, C>(
    target: &SsidTarget,
    repetition: u32,
    settle: Duration,
    deps: &CampaignDeps<N, D, S, W, C>,
    settings: &CampaignSettings,
) -> Result<Record, (Stage, CollectorError)>
where
    N: NetworkController,
    D: DiagnosticTool,
    S: SpeedTester,
    W: Sleeper,
    C: Clock,
{
    switch_network(
        &deps.controller,
        &deps.sleeper,
        &settings.interface,
        &target.ssid,
        target.password.as_deref(),
        settle,
    )
    .await
    .map_err(|e| (Stage::SwitchingNetwork, e))?;

    check_association(&deps.controller, &settings.interface, &target.ssid).await;

    let physical = get_physical_metrics(&deps.diagnostics)
        .await
        .map_err(|e| (Stage::CollectingMetrics, e))?;

    let speed = run_speedtest(&deps.speed_tester)
        .await
        .map_err(|e| (Stage::RunningSpeedTest, e))?;

    tracing::trace!(stage = %Stage::BuildingRecord, "building record");
    let record = deps.records.build(&target.ssid, &physical, &speed);

    deps.log
        .append(&record)
        .await
        .map_err(|e| (Stage::Appending, e))?;
    Ok(record)
}

/// Warn when the interface is not on the SSID we asked for. Never fails the sample:
/// the record is labelled with the configured SSID regardless.
async fn check_association<N: NetworkController>(controller: &N, interface: &str, expected: &str) {
    match controller.current_ssid(interface).await {
        Ok(Some(current)) if current == expected => {}
        Ok(Some(current)) => tracing::warn!(
            operation = "check_association",
            expected,
            current = %current,
            "interface associated with a different SSID"
        ),
        Ok(None) => tracing::warn!(
            operation = "check_association",
            expected,
            "interface not associated after settle wait"
        ),
        Err(e) => tracing::debug!(
            operation = "check_association",
            error = %e,
            "association check unavailable"
        ),
    }
}
