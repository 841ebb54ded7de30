use crate::model::commands::TrackCommand;
use crate::model::position::PositionReport;
use crate::model::types::HandlerResult;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::Sender;

/// Reads newline-delimited JSON position reports from stdin (the device
/// feed pipe) and forwards them to the tracking worker. A malformed
/// line is logged and skipped; end of stream ends ingestion.
pub async fn read_position_reports(tx: Sender<TrackCommand>) -> HandlerResult {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<PositionReport>(line) {
            Ok(report) => {
                if tx.send(report.into()).await.is_err() {
                    break;
                }
            }
            Err(e) => log::warn!("skipping malformed position report: {e}"),
        }
    }
    Ok(())
}
