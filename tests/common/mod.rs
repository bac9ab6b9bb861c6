// Shared test fakes for the collector's collaborators
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::time::Duration;
use wifi_bench::diagnostics::{DiagnosticSource, DiagnosticTool};
use wifi_bench::error::CollectorError;
use wifi_bench::models::RawSpeed;
use wifi_bench::network::{NetworkController, Sleeper};
use wifi_bench::record::Clock;
use wifi_bench::speedtest::SpeedTester;

pub const SYSTEM_PROFILER_OUTPUT: &str = "\
Wi-Fi:

      Interfaces:
        en0:
          Status: Connected
          Current Network Information:
            MyNet_5GHz:
              PHY Mode: 802.11ax
              Channel: 100 (5GHz, 80MHz)
              Signal / Noise: -55 dBm / -95 dBm
              Transmit Rate: 780
              MCS Index: 9
";

pub const SYSTEM_PROFILER_OUTPUT_NO_MCS: &str = "\
Wi-Fi:

      Interfaces:
        en0:
          Current Network Information:
            MyNet_5GHz:
              Signal / Noise: -55 dBm / -95 dBm
";

pub fn raw_speed() -> RawSpeed {
    RawSpeed {
        download_bps: 432_399_360.0,
        upload_bps: 93_478_912.0,
        ping_ms: 12.4,
    }
}

pub fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 22, 1, 0, 0).unwrap()
}

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchCall {
    pub interface: String,
    pub ssid: String,
    pub password: Option<String>,
}

/// Joins any SSID except those in `unknown`; reports the last joined SSID as current
/// unless `reported_ssid` overrides it.
#[derive(Default)]
pub struct FakeController {
    pub unknown: HashSet<String>,
    pub reported_ssid: Option<String>,
    pub calls: RefCell<Vec<SwitchCall>>,
}

impl FakeController {
    pub fn rejecting(ssids: &[&str]) -> Self {
        Self {
            unknown: ssids.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn switched_ssids(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.ssid.clone()).collect()
    }
}

impl NetworkController for FakeController {
    async fn switch(
        &self,
        interface: &str,
        ssid: &str,
        password: Option<&str>,
    ) -> Result<(), CollectorError> {
        self.calls.borrow_mut().push(SwitchCall {
            interface: interface.to_string(),
            ssid: ssid.to_string(),
            password: password.map(str::to_string),
        });
        if self.unknown.contains(ssid) {
            return Err(CollectorError::Switch {
                ssid: ssid.to_string(),
                detail: "exit status: 4".into(),
            });
        }
        Ok(())
    }

    async fn current_ssid(&self, _interface: &str) -> Result<Option<String>, CollectorError> {
        if let Some(s) = &self.reported_ssid {
            return Ok(Some(s.clone()));
        }
        Ok(self.calls.borrow().last().map(|c| c.ssid.clone()))
    }
}

/// Returns canned system_profiler text, or a command failure when `output` is None.
pub struct FakeDiagnostics {
    pub output: Option<String>,
    pub queries: RefCell<u32>,
}

impl FakeDiagnostics {
    pub fn with_output(text: &str) -> Self {
        Self {
            output: Some(text.to_string()),
            queries: RefCell::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            output: None,
            queries: RefCell::new(0),
        }
    }
}

impl DiagnosticTool for FakeDiagnostics {
    fn source(&self) -> DiagnosticSource {
        DiagnosticSource::SystemProfiler
    }

    async fn query_physical_layer(&self) -> Result<String, CollectorError> {
        *self.queries.borrow_mut() += 1;
        self.output.clone().ok_or_else(|| CollectorError::Command {
            program: "system_profiler".into(),
            detail: "exit status: 1".into(),
        })
    }
}

/// Pops scripted results; once the script is exhausted every call succeeds with `raw_speed()`.
#[derive(Default)]
pub struct FakeSpeedTester {
    pub script: RefCell<VecDeque<Result<RawSpeed, String>>>,
    pub runs: RefCell<u32>,
}

impl FakeSpeedTester {
    pub fn scripted(results: Vec<Result<RawSpeed, String>>) -> Self {
        Self {
            script: RefCell::new(results.into()),
            runs: RefCell::new(0),
        }
    }
}

impl SpeedTester for FakeSpeedTester {
    async fn measure(&self) -> Result<RawSpeed, CollectorError> {
        *self.runs.borrow_mut() += 1;
        match self.script.borrow_mut().pop_front() {
            Some(Ok(raw)) => Ok(raw),
            Some(Err(msg)) => Err(CollectorError::Measurement(msg)),
            None => Ok(raw_speed()),
        }
    }
}

#[derive(Default)]
pub struct RecordingSleeper {
    pub waits: RefCell<Vec<Duration>>,
}

impl Sleeper for RecordingSleeper {
    async fn wait(&self, duration: Duration) {
        self.waits.borrow_mut().push(duration);
    }
}

/// Write an executable shell script into `dir` and return its path as a String.
#[cfg(unix)]
pub fn write_script(dir: &std::path::Path, name: &str, body: &str) -> String {
    use std::os::unix::fs::PermissionsExt;
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path.to_str().unwrap().to_string()
}
