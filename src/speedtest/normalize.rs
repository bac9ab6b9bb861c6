// Raw backend throughput (bits/s) to canonical Mbps, one decimal place

use crate::error::CollectorError;
use crate::models::{RawSpeed, SpeedMetrics};

const BITS_PER_MEGABIT: f64 = 1_000_000.0;

/// `round(bps / 1_000_000, 1)`, computed as `(mbps * 10).round() / 10`.
/// Exact ties round away from zero: 250_000 bps is `0.3`, not `0.2`.
pub fn bps_to_mbps(bps: f64) -> f64 {
    (bps / BITS_PER_MEGABIT * 10.0).round() / 10.0
}

/// Convert a backend result. Ping passes through unchanged.
/// Negative or non-finite inputs are rejected rather than written to the log.
pub fn normalize(raw: RawSpeed) -> Result<SpeedMetrics, CollectorError> {
    for (name, value) in [
        ("download", raw.download_bps),
        ("upload", raw.upload_bps),
        ("ping", raw.ping_ms),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(CollectorError::Measurement(format!(
                "{name} value out of range: {value}"
            )));
        }
    }
    Ok(SpeedMetrics {
        download_mbps: bps_to_mbps(raw.download_bps),
        upload_mbps: bps_to_mbps(raw.upload_bps),
        ping_ms: raw.ping_ms,
    })
}
