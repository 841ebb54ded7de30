use crate::entity::task::{self, TaskStatus};
use crate::utils::constants::{GPS_ACTIVATION_LEAD, MIN_TARGET_LEAD};
use crate::utils::distance::calculate_distance;
use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Where the user has committed to be.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Destination {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Destination {
    pub fn distance_to(&self, latitude: f64, longitude: f64) -> f64 {
        calculate_distance(self.latitude, self.longitude, latitude, longitude)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum TaskValidationError {
    #[error("target time {target} is earlier than the allowed minimum {earliest}")]
    TargetTooSoon {
        target: DateTime<Utc>,
        earliest: DateTime<Utc>,
    },
    #[error("penalty amount must be positive, got {0}")]
    NonPositivePenalty(i64),
}

/// A pact as entered by the user, before it has a stored record.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub user_id: Uuid,
    pub destination: Destination,
    pub target_date_time: DateTime<Utc>,
    pub penalty_amount: i64,
}

impl NewTask {
    /// Validates the pact and builds the row to insert: a fresh id,
    /// `pending` status, and the derived GPS activation time.
    pub fn into_active_model(
        self,
        now: DateTime<Utc>,
    ) -> Result<task::ActiveModel, TaskValidationError> {
        let earliest = earliest_allowed_target(now);
        if self.target_date_time < earliest {
            return Err(TaskValidationError::TargetTooSoon {
                target: self.target_date_time,
                earliest,
            });
        }
        if self.penalty_amount <= 0 {
            return Err(TaskValidationError::NonPositivePenalty(self.penalty_amount));
        }

        Ok(task::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(self.user_id),
            destination_name: Set(self.destination.name),
            destination_address: Set(self.destination.address),
            destination_lat: Set(self.destination.latitude),
            destination_lng: Set(self.destination.longitude),
            target_date_time: Set(self.target_date_time),
            gps_activation_time: Set(gps_activation_time(self.target_date_time)),
            penalty_amount: Set(self.penalty_amount),
            status: Set(TaskStatus::Pending),
            payment_intent_id: Set(None),
            check_in_lat: Set(None),
            check_in_lng: Set(None),
            check_in_time: Set(None),
            completed_at: Set(None),
            created_at: Set(now),
        })
    }
}

/// GPS monitoring starts six hours before the target time.
pub fn gps_activation_time(target: DateTime<Utc>) -> DateTime<Utc> {
    target - *GPS_ACTIVATION_LEAD
}

/// The soonest target time a new pact may carry.
pub fn earliest_allowed_target(now: DateTime<Utc>) -> DateTime<Utc> {
    now + *MIN_TARGET_LEAD
}

/// Legal status moves. The stored record never goes backwards and a
/// settled pact never changes again.
pub fn can_transition(from: TaskStatus, to: TaskStatus) -> bool {
    matches!(
        (from, to),
        (TaskStatus::Pending, TaskStatus::Active)
            | (TaskStatus::Active, TaskStatus::Completed)
            | (TaskStatus::Active, TaskStatus::Failed)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn destination() -> Destination {
        Destination {
            name: "渋谷駅".to_string(),
            address: "東京都渋谷区".to_string(),
            latitude: 35.6580,
            longitude: 139.7016,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn gps_activation_is_six_hours_before_target() {
        let target = Utc.with_ymd_and_hms(2025, 3, 1, 18, 0, 0).unwrap();
        let expected = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(gps_activation_time(target), expected);
    }

    #[test]
    fn target_exactly_four_hours_out_is_allowed() {
        let task = NewTask {
            user_id: Uuid::new_v4(),
            destination: destination(),
            target_date_time: now() + chrono::Duration::hours(4),
            penalty_amount: 5000,
        };
        assert!(task.into_active_model(now()).is_ok());
    }

    #[test]
    fn target_under_four_hours_out_is_rejected() {
        let task = NewTask {
            user_id: Uuid::new_v4(),
            destination: destination(),
            target_date_time: now() + chrono::Duration::hours(4) - chrono::Duration::seconds(1),
            penalty_amount: 5000,
        };
        assert!(matches!(
            task.into_active_model(now()),
            Err(TaskValidationError::TargetTooSoon { .. })
        ));
    }

    #[test]
    fn zero_penalty_is_rejected() {
        let task = NewTask {
            user_id: Uuid::new_v4(),
            destination: destination(),
            target_date_time: now() + chrono::Duration::hours(12),
            penalty_amount: 0,
        };
        assert_eq!(
            task.into_active_model(now()),
            Err(TaskValidationError::NonPositivePenalty(0))
        );
    }

    #[test]
    fn new_task_row_carries_derived_fields() {
        let target = now() + chrono::Duration::hours(12);
        let task = NewTask {
            user_id: Uuid::new_v4(),
            destination: destination(),
            target_date_time: target,
            penalty_amount: 5000,
        };
        let row = task.into_active_model(now()).unwrap();
        assert_eq!(row.status.as_ref(), &TaskStatus::Pending);
        assert_eq!(row.gps_activation_time.as_ref(), &gps_activation_time(target));
    }

    #[test]
    fn settled_pacts_never_move() {
        assert!(can_transition(TaskStatus::Pending, TaskStatus::Active));
        assert!(can_transition(TaskStatus::Active, TaskStatus::Completed));
        assert!(can_transition(TaskStatus::Active, TaskStatus::Failed));
        assert!(!can_transition(TaskStatus::Pending, TaskStatus::Completed));
        assert!(!can_transition(TaskStatus::Completed, TaskStatus::Active));
        assert!(!can_transition(TaskStatus::Failed, TaskStatus::Pending));
        assert!(!can_transition(TaskStatus::Active, TaskStatus::Pending));
    }
}
