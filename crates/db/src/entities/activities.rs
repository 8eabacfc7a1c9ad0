//! `SeaORM` Entity for CRM activity log entries.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ActivityKind;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "activities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub kind: ActivityKind,
    pub subject: String,
    pub detail: Option<String>,
    pub activity_date: DateTimeWithTimeZone,
    pub duration_minutes: Option<i32>,
    pub related_lead_id: Option<Uuid>,
    pub related_deal_id: Option<Uuid>,
    pub related_account_id: Option<Uuid>,
    pub related_contact_id: Option<Uuid>,
    pub performed_by: Uuid,
    pub created_by: Uuid,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
