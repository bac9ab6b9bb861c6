// Application-layer throughput: backend collaborator plus unit normalization

mod cli;
pub mod normalize;

pub use cli::{SpeedtestCli, parse_speedtest_json};
pub use normalize::{bps_to_mbps, normalize};

use crate::error::CollectorError;
use crate::models::{RawSpeed, SpeedMetrics};
use std::future::Future;
use tracing::instrument;

/// Collaborator that runs one throughput test. Any backend failure is a `Measurement` error.
pub trait SpeedTester {
    fn measure(&self) -> impl Future<Output = Result<RawSpeed, CollectorError>>;
}

#[instrument(skip_all, fields(operation = "run_speedtest"))]
pub async fn run_speedtest<S: SpeedTester>(tester: &S) -> Result<SpeedMetrics, CollectorError> {
    let raw = tester.measure().await?;
    let speed = normalize(raw)?;
    tracing::debug!(
        download_mbps = speed.download_mbps,
        upload_mbps = speed.upload_mbps,
        ping_ms = speed.ping_ms,
        "speed test finished"
    );
    Ok(speed)
}
