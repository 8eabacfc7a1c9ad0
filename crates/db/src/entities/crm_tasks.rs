//! `SeaORM` Entity for CRM follow-up tasks.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{Priority, TaskStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "crm_tasks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTimeWithTimeZone>,
    pub status: TaskStatus,
    pub priority: Priority,
    pub related_lead_id: Option<Uuid>,
    pub related_deal_id: Option<Uuid>,
    pub related_account_id: Option<Uuid>,
    pub assigned_to: Uuid,
    pub created_by: Uuid,
    pub completed_at: Option<DateTimeWithTimeZone>,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
