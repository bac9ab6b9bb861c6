// Measurement models: PHY metrics, throughput metrics and the persisted record

mod physical;
mod record;
mod speed;

pub use physical::{Band, PhysicalMetrics};
pub use record::Record;
pub use speed::{RawSpeed, SpeedMetrics};
