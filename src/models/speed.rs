// Throughput metrics: raw backend units in, canonical Mbps/ms out

use serde::Deserialize;

/// Backend output as reported by speedtest-cli: bits per second and milliseconds.
/// Extra keys in the backend JSON (server, timestamp, ...) are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RawSpeed {
    #[serde(rename = "download")]
    pub download_bps: f64,
    #[serde(rename = "upload")]
    pub upload_bps: f64,
    #[serde(rename = "ping")]
    pub ping_ms: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedMetrics {
    pub download_mbps: f64,
    pub upload_mbps: f64,
    pub ping_ms: f64,
}
