use crate::entity::prelude::{Task, UserProfile};
use crate::entity::task::{self, Column, TaskStatus};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, Database, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter,
};
use std::env;
use uuid::Uuid;

#[derive(Clone)]
pub struct DatabaseHandler {
    pub db: DatabaseConnection,
}

type TaskModel = task::Model;
type TaskActiveModel = task::ActiveModel;
type UserProfileModel = crate::entity::user_profile::Model;

impl DatabaseHandler {
    pub async fn new(uri: String) -> Self {
        let mut opt = ConnectOptions::new(uri);
        opt.sqlx_logging(false);

        let db = Database::connect(opt).await.unwrap();

        DatabaseHandler { db }
    }

    pub async fn from_env() -> Self {
        Self::new(env::var("DATABASE_URL").unwrap()).await
    }

    pub async fn find_task_by_id(&self, id: Uuid) -> Option<TaskModel> {
        Task::find_by_id(id).one(&self.db).await.unwrap_or_else(|x| {
            log::error!("Error accessing the database: {:?}", x);
            None
        })
    }

    pub async fn find_tasks_by_status(&self, status: TaskStatus) -> Vec<TaskModel> {
        Task::find()
            .filter(Column::Status.eq(status))
            .all(&self.db)
            .await
            .unwrap_or_else(|x| {
                log::error!("Error accessing the database: {:?}", x);
                vec![]
            })
    }

    /// Pending tasks whose GPS activation time has passed.
    pub async fn find_tasks_to_activate(&self, now: DateTime<Utc>) -> Vec<TaskModel> {
        Task::find()
            .filter(Column::Status.eq(TaskStatus::Pending))
            .filter(Column::GpsActivationTime.lte(now))
            .all(&self.db)
            .await
            .unwrap_or_else(|x| {
                log::error!("Error accessing the database: {:?}", x);
                vec![]
            })
    }

    /// Active tasks whose target time has passed without a check-in.
    pub async fn find_overdue_tasks(&self, now: DateTime<Utc>) -> Vec<TaskModel> {
        Task::find()
            .filter(Column::Status.eq(TaskStatus::Active))
            .filter(Column::TargetDateTime.lt(now))
            .all(&self.db)
            .await
            .unwrap_or_else(|x| {
                log::error!("Error accessing the database: {:?}", x);
                vec![]
            })
    }

    pub async fn insert_task(&self, task: TaskActiveModel) -> Result<TaskModel, DbErr> {
        task.insert(&self.db).await
    }

    pub async fn update_task(&self, task: TaskActiveModel) -> Result<TaskModel, DbErr> {
        task.update(&self.db).await
    }

    pub async fn find_profile_by_id(&self, id: Uuid) -> Option<UserProfileModel> {
        UserProfile::find_by_id(id)
            .one(&self.db)
            .await
            .unwrap_or_else(|x| {
                log::error!("Error accessing the database: {:?}", x);
                None
            })
    }
}
