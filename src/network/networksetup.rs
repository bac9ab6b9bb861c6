// macOS network controller backed by `networksetup`

use super::NetworkController;
use crate::command;
use crate::error::CollectorError;

// networksetup reports several join failures on stdout with a zero exit status.
const JOIN_FAILURE_MARKERS: [&str; 3] = ["Could not find network", "Failed to join network", "Error:"];

pub struct Networksetup {
    program: String,
}

impl Networksetup {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl NetworkController for Networksetup {
    async fn switch(
        &self,
        interface: &str,
        ssid: &str,
        password: Option<&str>,
    ) -> Result<(), CollectorError> {
        let args = switch_args(interface, ssid, password);
        let out = command::run(&self.program, &args)
            .await
            .map_err(|e| CollectorError::Switch {
                ssid: ssid.to_string(),
                detail: format!("{}: {}", self.program, e),
            })?;
        if !out.success() {
            return Err(CollectorError::Switch {
                ssid: ssid.to_string(),
                detail: out.failure_detail(),
            });
        }
        if let Some(message) = join_failure(&out.stdout) {
            return Err(CollectorError::Switch {
                ssid: ssid.to_string(),
                detail: message.to_string(),
            });
        }
        Ok(())
    }

    async fn current_ssid(&self, interface: &str) -> Result<Option<String>, CollectorError> {
        let args = vec!["-getairportnetwork".to_string(), interface.to_string()];
        let out = command::run(&self.program, &args)
            .await
            .map_err(|e| CollectorError::Command {
                program: self.program.clone(),
                detail: e.to_string(),
            })?;
        if !out.success() {
            return Err(CollectorError::Command {
                program: self.program.clone(),
                detail: out.failure_detail(),
            });
        }
        Ok(parse_current_network(&out.stdout))
    }
}

/// `-setairportnetwork <interface> <ssid> [password]`
pub fn switch_args(interface: &str, ssid: &str, password: Option<&str>) -> Vec<String> {
    let mut args = vec![
        "-setairportnetwork".to_string(),
        interface.to_string(),
        ssid.to_string(),
    ];
    if let Some(pw) = password {
        args.push(pw.to_string());
    }
    args
}

/// First stdout line that signals a failed join, if any.
pub fn join_failure(stdout: &str) -> Option<&str> {
    stdout
        .lines()
        .map(str::trim)
        .find(|line| JOIN_FAILURE_MARKERS.iter().any(|m| line.contains(m)))
}

/// `Current Wi-Fi Network: MyNet` -> `Some("MyNet")`; "not associated" -> `None`.
pub fn parse_current_network(stdout: &str) -> Option<String> {
    let text = stdout.trim();
    if text.to_ascii_lowercase().contains("not associated") {
        return None;
    }
    let (_, ssid) = text.split_once("Network:")?;
    let ssid = ssid.trim();
    if ssid.is_empty() {
        None
    } else {
        Some(ssid.to_string())
    }
}
