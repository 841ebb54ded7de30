use arrival_pact::background_processing::tasks::{enforce_deadlines, track_position_updates};
use arrival_pact::db::DatabaseHandler;
use arrival_pact::entity::task::TaskStatus;
use arrival_pact::ingest;
use arrival_pact::model::commands::TrackCommand;
use arrival_pact::model::tracking_info::TrackingInfo;
use arrival_pact::model::types::Db;
use arrival_pact::payment::stripe::StripeClient;
use arrival_pact::utils::settings::{read_settings, Settings};
use anyhow::Result;
use dotenv::dotenv;
use uuid::Uuid;

use log::LevelFilter;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

const SETTINGS_PATH: &str = "settings.toml";

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{d} - {l} - {m}\n")))
        .build("log/output.log")?;

    let config = Config::builder()
        .appender(Appender::builder().build("logfile", Box::new(logfile)))
        .build(Root::builder().appender("logfile").build(LevelFilter::Info))?;

    log4rs::init_config(config)?;

    log::info!("Starting Arrival Pact service...");

    let settings = if Path::new(SETTINGS_PATH).exists() {
        read_settings(SETTINGS_PATH).unwrap_or_else(|e| {
            log::error!("Could not read {SETTINGS_PATH}: {e}");
            Settings::default()
        })
    } else {
        Settings::default()
    };

    let db_handler = DatabaseHandler::from_env().await;
    let payments = StripeClient::from_env();

    // Tasks already under monitoring when the service went down resume
    // from the stored records.
    let live_tasks: Db<Uuid, TrackingInfo> = Arc::new(scc::HashMap::new());
    for task in db_handler.find_tasks_by_status(TaskStatus::Active).await {
        let _ = live_tasks
            .insert_async(task.id, TrackingInfo::new(&task))
            .await;
    }
    log::info!("Resumed monitoring of {} active tasks", live_tasks.len());

    let (tx, rx) = mpsc::channel::<TrackCommand>(settings.position_channel_capacity);

    {
        let db_handler = db_handler.clone();
        let payments = payments.clone();
        let live_tasks = live_tasks.clone();
        let scan_interval = Duration::from_secs(settings.deadline_scan_interval_seconds);
        tokio::spawn(async move {
            enforce_deadlines(db_handler, payments, live_tasks, scan_interval).await
        });
    }

    {
        let db_handler = db_handler.clone();
        let live_tasks = live_tasks.clone();
        tokio::spawn(async move { track_position_updates(rx, db_handler, live_tasks).await });
    }

    tokio::select! {
        result = ingest::read_position_reports(tx) => {
            result?;
            log::info!("Position feed closed, shutting down");
        }
        _ = tokio::signal::ctrl_c() => {
            log::info!("Interrupted, shutting down");
        }
    }

    Ok(())
}
