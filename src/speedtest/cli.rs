// speedtest-cli backend: `speedtest-cli --json` prints one JSON object per run

use super::SpeedTester;
use crate::command;
use crate::error::CollectorError;
use crate::models::RawSpeed;

pub struct SpeedtestCli {
    program: String,
    args: Vec<String>,
}

impl SpeedtestCli {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl SpeedTester for SpeedtestCli {
    async fn measure(&self) -> Result<RawSpeed, CollectorError> {
        let out = command::run(&self.program, &self.args)
            .await
            .map_err(|e| CollectorError::Measurement(format!("{}: {}", self.program, e)))?;
        if !out.success() {
            return Err(CollectorError::Measurement(format!(
                "{} {}",
                self.program,
                out.failure_detail()
            )));
        }
        parse_speedtest_json(&out.stdout)
    }
}

/// Parse the backend's JSON result (`download`/`upload` in bits/s, `ping` in ms).
pub fn parse_speedtest_json(text: &str) -> Result<RawSpeed, CollectorError> {
    serde_json::from_str(text.trim())
        .map_err(|e| CollectorError::Measurement(format!("unreadable speedtest output: {e}")))
}
