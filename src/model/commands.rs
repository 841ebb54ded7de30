use crate::model::position::PositionReport;
use uuid::Uuid;

/// Commands consumed by the position tracking worker.
#[derive(Debug)]
pub enum TrackCommand {
    PositionUpdate {
        task_id: Uuid,
        latitude: f64,
        longitude: f64,
    },
    PositionLost {
        task_id: Uuid,
    },
    CheckIn {
        task_id: Uuid,
        latitude: f64,
        longitude: f64,
    },
}

impl From<PositionReport> for TrackCommand {
    fn from(report: PositionReport) -> Self {
        match report {
            PositionReport::Position {
                task_id,
                latitude,
                longitude,
            } => TrackCommand::PositionUpdate {
                task_id,
                latitude,
                longitude,
            },
            PositionReport::Lost { task_id } => TrackCommand::PositionLost { task_id },
            PositionReport::CheckIn {
                task_id,
                latitude,
                longitude,
            } => TrackCommand::CheckIn {
                task_id,
                latitude,
                longitude,
            },
        }
    }
}
