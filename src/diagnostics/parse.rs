// Text parsers for the macOS Wi-Fi diagnostic tools. Missing lines leave fields as None.

use crate::models::{Band, PhysicalMetrics};
use regex::Regex;
use std::sync::LazyLock;

const CURRENT_NETWORK_HEADER: &str = "Current Network Information:";
const OTHER_NETWORKS_HEADER: &str = "Other Local Wi-Fi Networks:";

static SIGNAL_NOISE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*Signal\s*/\s*Noise:\s*(-?\d+)\s*dBm\s*/\s*(-?\d+)\s*dBm")
        .expect("signal/noise pattern is valid")
});

static MCS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*MCS Index:\s*(\d+)").expect("MCS pattern is valid"));

// `Channel: 100 (5GHz, 80MHz)`; the bracketed part is optional.
static CHANNEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*Channel:\s*(\d+)(?:\s*\(\s*([^,)]+))?").expect("channel pattern is valid")
});

/// Parse `system_profiler SPAirPortDataType` output.
///
/// Only the associated network's block is read: the text after
/// `Current Network Information:` (or the whole text when that header is absent)
/// up to `Other Local Wi-Fi Networks:`, so scan results for neighbouring
/// networks never leak into the sample. First match wins per field.
pub fn parse_system_profiler(text: &str) -> PhysicalMetrics {
    let section = match text.find(CURRENT_NETWORK_HEADER) {
        Some(i) => &text[i + CURRENT_NETWORK_HEADER.len()..],
        None => text,
    };
    let section = match section.find(OTHER_NETWORKS_HEADER) {
        Some(i) => &section[..i],
        None => section,
    };

    let mut metrics = PhysicalMetrics::default();
    for line in section.lines() {
        if metrics.rssi.is_none()
            && let Some(caps) = SIGNAL_NOISE_RE.captures(line)
        {
            metrics.rssi = caps[1].parse().ok();
            metrics.noise = caps[2].parse().ok();
            continue;
        }
        if metrics.mcs_index.is_none()
            && let Some(caps) = MCS_RE.captures(line)
        {
            metrics.mcs_index = caps[1].parse().ok();
            continue;
        }
        if metrics.channel.is_none()
            && let Some(caps) = CHANNEL_RE.captures(line)
        {
            metrics.channel = caps[1].parse().ok().filter(|c| *c > 0);
            metrics.band = caps.get(2).and_then(|m| Band::from_token(m.as_str()));
        }
    }
    metrics
}

/// Parse legacy `airport -I` output (`key: value` lines).
/// The tool does not report the band, so `band` is always None here.
pub fn parse_airport_info(text: &str) -> PhysicalMetrics {
    let mut metrics = PhysicalMetrics::default();
    for line in text.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "agrCtlRSSI" => metrics.rssi = value.parse().ok(),
            "agrCtlNoise" => metrics.noise = value.parse().ok(),
            "MCS" => metrics.mcs_index = value.parse().ok(),
            "channel" => metrics.channel = leading_int(value).filter(|c| *c > 0),
            _ => {}
        }
    }
    metrics
}

/// Leading decimal digits of `s` (`"100,80"` -> 100).
fn leading_int(s: &str) -> Option<u32> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().ok()
}
