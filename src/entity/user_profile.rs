use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-user profile row. Carries the saved payment-method reference and
/// its display fields; card data itself never touches this service.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub stripe_payment_method_id: Option<String>,
    pub payment_method_brand: Option<String>,
    pub payment_method_last4: Option<String>,
    pub payment_method_exp_month: Option<i32>,
    pub payment_method_exp_year: Option<i32>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
