// Record assembly: SSID label + PHY sample + speed sample + timestamp

use crate::models::{PhysicalMetrics, Record, SpeedMetrics};
use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};

/// Default timestamp offset in hours (JST). Fixed so records from different hosts compare directly.
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 9;

/// Time source for record timestamps.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// `FixedOffset` for a whole-hour offset, `None` when out of chrono's range.
pub fn fixed_offset(hours: i32) -> Option<FixedOffset> {
    FixedOffset::east_opt(hours.checked_mul(3600)?)
}

/// RFC 3339, second precision, numeric offset (`2026-02-22T10:00:00+09:00`).
pub fn format_timestamp(at: DateTime<Utc>, offset: FixedOffset) -> String {
    at.with_timezone(&offset)
        .to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Merge the three inputs. `ssid` is copied verbatim.
pub fn build_record(
    ssid: &str,
    physical: &PhysicalMetrics,
    speed: &SpeedMetrics,
    timestamp: String,
) -> Record {
    Record {
        timestamp,
        ssid: ssid.to_string(),
        rssi: physical.rssi,
        noise: physical.noise,
        mcs_index: physical.mcs_index,
        download_mbps: speed.download_mbps,
        upload_mbps: speed.upload_mbps,
        ping_ms: speed.ping_ms,
        channel: physical.channel,
        band: physical.band,
    }
}

/// Stamps records with the configured offset using an injected clock.
pub struct RecordBuilder<C: Clock> {
    clock: C,
    offset: FixedOffset,
}

impl<C: Clock> RecordBuilder<C> {
    pub fn new(clock: C, offset: FixedOffset) -> Self {
        Self { clock, offset }
    }

    pub fn build(&self, ssid: &str, physical: &PhysicalMetrics, speed: &SpeedMetrics) -> Record {
        let timestamp = format_timestamp(self.clock.now(), self.offset);
        build_record(ssid, physical, speed, timestamp)
    }
}
