// Network switching: controller collaborator, settle wait and the switch step

mod networksetup;

pub use networksetup::{Networksetup, join_failure, parse_current_network, switch_args};

use crate::error::CollectorError;
use std::future::Future;
use std::time::Duration;
use tracing::instrument;

/// OS-level Wi-Fi control.
pub trait NetworkController {
    /// Join `ssid` on `interface`. Unknown SSID, refused join and a missing controller
    /// binary all surface as `CollectorError::Switch`.
    fn switch(
        &self,
        interface: &str,
        ssid: &str,
        password: Option<&str>,
    ) -> impl Future<Output = Result<(), CollectorError>>;

    /// SSID the interface is associated with, `None` when disconnected.
    fn current_ssid(
        &self,
        interface: &str,
    ) -> impl Future<Output = Result<Option<String>, CollectorError>>;
}

/// Sleep primitive, injectable so tests do not wait in real time.
pub trait Sleeper {
    fn wait(&self, duration: Duration) -> impl Future<Output = ()>;
}

pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Join `ssid`, then wait out the full settle period. The wait is never shortened:
/// PHY readings right after association are unstable even when the link is already up.
#[instrument(skip_all, fields(operation = "switch_network", ssid = %ssid, interface = %interface))]
pub async fn switch_network<N: NetworkController, W: Sleeper>(
    controller: &N,
    sleeper: &W,
    interface: &str,
    ssid: &str,
    password: Option<&str>,
    settle: Duration,
) -> Result<(), CollectorError> {
    controller.switch(interface, ssid, password).await?;
    tracing::debug!(settle_secs = settle.as_secs(), "switch requested, settling");
    sleeper.wait(settle).await;
    Ok(())
}
