use crate::entity::task;
use crate::model::position::{PositionReading, PositionStatus};
use crate::model::proximity::Proximity;
use crate::utils::distance::calculate_distance;
use chrono::{DateTime, Utc};

/// Live tracking state for one task under GPS monitoring. Kept in the
/// shared in-memory map, never persisted; each reading overwrites the
/// previous one (last update wins).
#[derive(Debug)]
pub struct TrackingInfo {
    pub destination_name: String,
    pub destination_lat: f64,
    pub destination_lng: f64,
    pub target_date_time: DateTime<Utc>,
    pub position_status: PositionStatus,
    pub last_reading: Option<PositionReading>,
    pub last_distance: Option<f64>,
    pub proximity: Option<Proximity>,
    pub updated_at: DateTime<Utc>,
}

impl TrackingInfo {
    pub fn new(task: &task::Model) -> Self {
        TrackingInfo {
            destination_name: task.destination_name.clone(),
            destination_lat: task.destination_lat,
            destination_lng: task.destination_lng,
            target_date_time: task.target_date_time,
            position_status: PositionStatus::Acquiring,
            last_reading: None,
            last_distance: None,
            proximity: None,
            updated_at: task.gps_activation_time,
        }
    }

    /// Feeds one reading through the proximity evaluator and stores the
    /// result. Returns the new band.
    pub fn apply_reading(&mut self, reading: PositionReading, now: DateTime<Utc>) -> Proximity {
        let meters = calculate_distance(
            reading.latitude,
            reading.longitude,
            self.destination_lat,
            self.destination_lng,
        );
        let proximity = Proximity::classify(meters);
        self.position_status = PositionStatus::Fixed;
        self.last_reading = Some(reading);
        self.last_distance = Some(meters);
        self.proximity = Some(proximity);
        self.updated_at = now;
        proximity
    }

    /// Position source failed; keep the last reading for display but
    /// flag the state as degraded.
    pub fn mark_unavailable(&mut self, now: DateTime<Utc>) {
        self.position_status = PositionStatus::Unavailable;
        self.updated_at = now;
    }
}
