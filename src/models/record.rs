// One JSONL line of the benchmark log

use serde::{Deserialize, Serialize};

use super::Band;

/// Flat, schema-stable sample. Field order is the serialized key order.
/// All ten keys are always written; a PHY value the tool did not report is `null`,
/// never a missing key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// RFC 3339 with the configured fixed offset, e.g. `2026-02-22T10:00:00+09:00`.
    pub timestamp: String,
    /// Configured SSID, verbatim. Never read back from the device.
    pub ssid: String,
    pub rssi: Option<i32>,
    pub noise: Option<i32>,
    pub mcs_index: Option<u32>,
    pub download_mbps: f64,
    pub upload_mbps: f64,
    pub ping_ms: f64,
    pub channel: Option<u32>,
    pub band: Option<Band>,
}
