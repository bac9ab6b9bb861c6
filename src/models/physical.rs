// Physical-layer link metrics sampled from the platform diagnostic tool

use serde::{Deserialize, Serialize};

/// Frequency band of the associated channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Band {
    #[serde(rename = "2.4GHz")]
    Ghz2_4,
    #[serde(rename = "5GHz")]
    Ghz5,
    #[serde(rename = "6GHz")]
    Ghz6,
}

impl Band {
    /// Map a textual band token (e.g. `2GHz`, `5 GHz`, `6GHz`) to a canonical band.
    pub fn from_token(token: &str) -> Option<Self> {
        let normalized: String = token
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "2ghz" | "2.4ghz" => Some(Band::Ghz2_4),
            "5ghz" => Some(Band::Ghz5),
            "6ghz" => Some(Band::Ghz6),
            _ => None,
        }
    }
}

/// One PHY sample. Every field is optional: a line missing from the tool output leaves it `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhysicalMetrics {
    /// Received signal strength, dBm.
    pub rssi: Option<i32>,
    /// Noise floor, dBm.
    pub noise: Option<i32>,
    pub mcs_index: Option<u32>,
    pub channel: Option<u32>,
    pub band: Option<Band>,
}
