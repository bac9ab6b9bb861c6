// Collector error taxonomy. Missing fields in tool output are not errors; they become None.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectorError {
    /// External diagnostic tool could not be started or exited non-zero.
    #[error("command `{program}` failed: {detail}")]
    Command { program: String, detail: String },

    /// Speed-test backend failed or produced unusable output.
    #[error("speed test failed: {0}")]
    Measurement(String),

    /// Network join failed (unknown SSID, controller missing, join refused).
    #[error("switch to SSID {ssid:?} failed: {detail}")]
    Switch { ssid: String, detail: String },

    /// Log write failed.
    #[error("log write failed: {0}")]
    Io(#[from] std::io::Error),
}

impl CollectorError {
    /// Stable label used in operator logs and campaign summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            CollectorError::Command { .. } => "command",
            CollectorError::Measurement(_) => "measurement",
            CollectorError::Switch { .. } => "switch",
            CollectorError::Io(_) => "io",
        }
    }

    pub fn is_io(&self) -> bool {
        matches!(self, CollectorError::Io(_))
    }
}
