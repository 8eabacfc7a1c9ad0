//! `SeaORM` Entity for sales deals.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{DealStage, LeadSource, Priority};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "deals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub value: Decimal,
    pub currency: String,
    /// Win probability in percent, implied by the stage.
    pub probability: i32,
    pub stage: DealStage,
    pub pipeline: String,
    pub account_id: Uuid,
    pub primary_contact_id: Option<Uuid>,
    pub assigned_to: Uuid,
    pub expected_close_date: Date,
    pub actual_close_date: Option<Date>,
    pub next_step: Option<String>,
    pub next_step_date: Option<Date>,
    pub products: Option<Json>,
    pub service_type: Option<String>,
    pub lead_source: Option<LeadSource>,
    pub loss_reason: Option<String>,
    pub competitor_won: Option<String>,
    pub contract_type: Option<String>,
    pub contract_length_months: Option<i32>,
    pub renewal_date: Option<Date>,
    pub tags: Option<Json>,
    pub priority: Priority,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_by: Uuid,
    pub updated_by: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountId",
        to = "super::accounts::Column::Id"
    )]
    Accounts,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
