use crate::db::DatabaseHandler;
use crate::entity::task::{self, TaskStatus};
use crate::model::commands::TrackCommand;
use crate::model::position::PositionReading;
use crate::model::proximity::Proximity;
use crate::model::task::can_transition;
use crate::model::tracking_info::TrackingInfo;
use crate::model::types::Db;
use crate::payment::stripe::StripeClient;
use crate::utils::distance::{calculate_distance, format_distance};
use chrono::Utc;
use sea_orm::{IntoActiveModel, Set};
use std::time::Duration;
use tokio::sync::mpsc::Receiver;
use uuid::Uuid;

/// Consumes the device position feed. Every reading is independent:
/// the proximity band is recomputed from scratch and the latest
/// reading wins.
pub async fn track_position_updates(
    mut rx: Receiver<TrackCommand>,
    db_handler: DatabaseHandler,
    live_tasks: Db<Uuid, TrackingInfo>,
) {
    while let Some(cmd) = rx.recv().await {
        match cmd {
            TrackCommand::PositionUpdate {
                task_id,
                latitude,
                longitude,
            } => {
                if let Some(mut info) = live_tasks.get_async(&task_id).await {
                    let previous = info.proximity;
                    let reading = PositionReading {
                        latitude,
                        longitude,
                    };
                    let proximity = info.apply_reading(reading, Utc::now());
                    if previous != Some(proximity) {
                        let distance = info.last_distance.unwrap_or_default();
                        log::info!(
                            "task {task_id}: {} to {}, {}",
                            format_distance(distance),
                            info.destination_name,
                            proximity.message()
                        );
                    }
                } else {
                    log::debug!("task {task_id}: reading for a task not under monitoring");
                }
            }
            TrackCommand::PositionLost { task_id } => {
                if let Some(mut info) = live_tasks.get_async(&task_id).await {
                    info.mark_unavailable(Utc::now());
                    log::warn!("task {task_id}: position source unavailable");
                }
            }
            TrackCommand::CheckIn {
                task_id,
                latitude,
                longitude,
            } => {
                if let Err(e) =
                    handle_check_in(&db_handler, &live_tasks, task_id, latitude, longitude).await
                {
                    log::error!("task {task_id}: check-in failed: {e:?}");
                }
            }
        }
    }
}

async fn handle_check_in(
    db_handler: &DatabaseHandler,
    live_tasks: &Db<Uuid, TrackingInfo>,
    task_id: Uuid,
    latitude: f64,
    longitude: f64,
) -> crate::model::types::HandlerResult {
    let Some(stored) = db_handler.find_task_by_id(task_id).await else {
        log::warn!("task {task_id}: check-in for an unknown task");
        return Ok(());
    };
    if !can_transition(stored.status, TaskStatus::Completed) {
        log::warn!(
            "task {task_id}: check-in rejected, task is {:?}",
            stored.status
        );
        return Ok(());
    }

    let meters = calculate_distance(
        latitude,
        longitude,
        stored.destination_lat,
        stored.destination_lng,
    );
    if !Proximity::classify(meters).can_check_in() {
        log::info!(
            "task {task_id}: check-in rejected, still {} away",
            format_distance(meters)
        );
        return Ok(());
    }

    let now = Utc::now();
    let mut active = stored.into_active_model();
    active.status = Set(TaskStatus::Completed);
    active.check_in_lat = Set(Some(latitude));
    active.check_in_lng = Set(Some(longitude));
    active.check_in_time = Set(Some(now));
    active.completed_at = Set(Some(now));
    db_handler.update_task(active).await?;

    live_tasks.remove_async(&task_id).await;
    log::info!("task {task_id}: checked in, penalty avoided");
    Ok(())
}

/// Periodic deadline scan: starts GPS monitoring for pending tasks
/// whose activation time has come, and settles active tasks whose
/// target time has passed without a check-in.
pub async fn enforce_deadlines(
    db_handler: DatabaseHandler,
    payments: StripeClient,
    live_tasks: Db<Uuid, TrackingInfo>,
    scan_interval: Duration,
) {
    let mut ticker = tokio::time::interval(scan_interval);
    loop {
        ticker.tick().await;
        let now = Utc::now();

        for stored in db_handler.find_tasks_to_activate(now).await {
            let task_id = stored.id;
            let _ = live_tasks
                .insert_async(task_id, TrackingInfo::new(&stored))
                .await;
            let mut active = stored.into_active_model();
            active.status = Set(TaskStatus::Active);
            match db_handler.update_task(active).await {
                Ok(_) => log::info!("task {task_id}: GPS monitoring started"),
                Err(e) => {
                    live_tasks.remove_async(&task_id).await;
                    log::error!("task {task_id}: activation failed: {e:?}");
                }
            }
        }

        for stored in db_handler.find_overdue_tasks(now).await {
            fail_overdue_task(&db_handler, &payments, &live_tasks, stored).await;
        }
    }
}

/// The pact was broken: charge the penalty and mark the task failed.
/// A declined charge still fails the task; the record must not stay
/// active past its deadline.
///
/// The intent id is persisted in its own write before the status write.
/// A scan that charges and then fails to settle leaves the row active
/// with the intent recorded, so the next tick re-selects it, skips the
/// charge, and only retries the status write.
async fn fail_overdue_task(
    db_handler: &DatabaseHandler,
    payments: &StripeClient,
    live_tasks: &Db<Uuid, TrackingInfo>,
    stored: task::Model,
) {
    let task_id = stored.id;

    if needs_penalty_charge(&stored) {
        if let Some(intent_id) = post_penalty_charge(db_handler, payments, &stored).await {
            let mut record = stored.clone().into_active_model();
            record.payment_intent_id = Set(Some(intent_id));
            if let Err(e) = db_handler.update_task(record).await {
                log::error!("task {task_id}: could not record payment intent: {e:?}");
            }
        }
    } else {
        log::info!("task {task_id}: penalty already charged on an earlier scan");
    }

    live_tasks.remove_async(&task_id).await;

    let mut active = stored.into_active_model();
    active.status = Set(TaskStatus::Failed);
    match db_handler.update_task(active).await {
        Ok(_) => log::info!("task {task_id}: marked failed"),
        Err(e) => log::error!("task {task_id}: could not mark failed: {e:?}"),
    }
}

/// Whether the penalty still has to be charged for this overdue task.
/// An intent id on the row means an earlier scan already posted the
/// charge, even if that scan never managed to mark the task failed.
fn needs_penalty_charge(stored: &task::Model) -> bool {
    stored.payment_intent_id.is_none()
}

async fn post_penalty_charge(
    db_handler: &DatabaseHandler,
    payments: &StripeClient,
    stored: &task::Model,
) -> Option<String> {
    let task_id = stored.id;
    let Some(profile) = db_handler.find_profile_by_id(stored.user_id).await else {
        log::error!("task {task_id}: no profile for user {}", stored.user_id);
        return None;
    };
    let Some(payment_method_id) = profile.stripe_payment_method_id else {
        log::error!(
            "task {task_id}: no saved payment method for user {}",
            stored.user_id
        );
        return None;
    };

    match payments
        .charge_penalty(stored.penalty_amount, &payment_method_id)
        .await
    {
        Ok(intent) => {
            log::info!(
                "task {task_id}: penalty of ¥{} charged, intent {} ({})",
                stored.penalty_amount,
                intent.id,
                intent.status
            );
            Some(intent.id)
        }
        Err(e) => {
            log::error!("task {task_id}: penalty charge failed: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn overdue_task(payment_intent_id: Option<String>) -> task::Model {
        let target = Utc.with_ymd_and_hms(2025, 3, 1, 18, 0, 0).unwrap();
        task::Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            destination_name: "渋谷駅".to_string(),
            destination_address: "東京都渋谷区".to_string(),
            destination_lat: 35.6580,
            destination_lng: 139.7016,
            target_date_time: target,
            gps_activation_time: target - chrono::Duration::hours(6),
            penalty_amount: 5000,
            status: TaskStatus::Active,
            payment_intent_id,
            check_in_lat: None,
            check_in_lng: None,
            check_in_time: None,
            completed_at: None,
            created_at: target - chrono::Duration::hours(24),
        }
    }

    #[test]
    fn uncharged_overdue_task_needs_the_penalty() {
        assert!(needs_penalty_charge(&overdue_task(None)));
    }

    #[test]
    fn recorded_intent_blocks_a_second_charge() {
        // An earlier scan charged but never settled the status; the row
        // comes back still active and must not be charged again.
        let stored = overdue_task(Some("pi_123".to_string()));
        assert!(!needs_penalty_charge(&stored));
    }
}
