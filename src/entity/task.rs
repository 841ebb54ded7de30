use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A commitment-contract task as stored in the `tasks` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub destination_name: String,
    pub destination_address: String,
    #[sea_orm(column_type = "Double")]
    pub destination_lat: f64,
    #[sea_orm(column_type = "Double")]
    pub destination_lng: f64,
    pub target_date_time: DateTimeUtc,
    pub gps_activation_time: DateTimeUtc,
    /// Whole yen.
    pub penalty_amount: i64,
    pub status: TaskStatus,
    pub payment_intent_id: Option<String>,
    #[sea_orm(column_type = "Double", nullable)]
    pub check_in_lat: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub check_in_lng: Option<f64>,
    pub check_in_time: Option<DateTimeUtc>,
    pub completed_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "failed")]
    Failed,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
