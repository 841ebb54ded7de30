use serde::Deserialize;
use uuid::Uuid;

/// One decoded line from the device position feed.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PositionReport {
    /// A fresh GPS reading for a watched task.
    Position {
        task_id: Uuid,
        latitude: f64,
        longitude: f64,
    },
    /// The position source failed (permission denied, no signal).
    Lost { task_id: Uuid },
    /// The user pressed check-in at this reading.
    CheckIn {
        task_id: Uuid,
        latitude: f64,
        longitude: f64,
    },
}

/// The latest known reading for a task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionReading {
    pub latitude: f64,
    pub longitude: f64,
}

/// Display state of the position source for a task. `Unavailable` is
/// the degraded "no position" state the UI falls back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionStatus {
    Acquiring,
    Fixed,
    Unavailable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_position_line() {
        let line = r#"{"kind":"position","task_id":"6a2f64cd-6321-4cc5-a731-4f1e589f77f4","latitude":35.6762,"longitude":139.6503}"#;
        let report: PositionReport = serde_json::from_str(line).unwrap();
        assert!(matches!(report, PositionReport::Position { latitude, .. } if latitude == 35.6762));
    }

    #[test]
    fn decodes_a_lost_signal_line() {
        let line = r#"{"kind":"lost","task_id":"6a2f64cd-6321-4cc5-a731-4f1e589f77f4"}"#;
        let report: PositionReport = serde_json::from_str(line).unwrap();
        assert!(matches!(report, PositionReport::Lost { .. }));
    }

    #[test]
    fn rejects_an_unknown_kind() {
        let line = r#"{"kind":"teleport","task_id":"6a2f64cd-6321-4cc5-a731-4f1e589f77f4"}"#;
        assert!(serde_json::from_str::<PositionReport>(line).is_err());
    }
}
