//! `SeaORM` Entity for sales leads.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{LeadSource, LeadStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "leads")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub position: Option<String>,
    pub status: LeadStatus,
    pub lead_score: i32,
    pub source: LeadSource,
    pub source_details: Option<String>,
    pub school_district: Option<String>,
    pub school_type: Option<String>,
    pub student_count: Option<i32>,
    pub territory: Option<String>,
    pub address: Option<Json>,
    pub preferred_contact: Option<String>,
    pub time_zone: Option<String>,
    pub tags: Option<Json>,
    pub industry: Option<String>,
    pub estimated_value: Option<Decimal>,
    pub budget_range: Option<String>,
    pub expected_close_date: Option<Date>,
    pub next_follow_up: Option<Date>,
    pub last_contact_date: Option<DateTimeWithTimeZone>,
    pub decision_maker: bool,
    pub has_budget: bool,
    pub has_need: bool,
    pub has_timeline: bool,
    pub notes: Option<String>,
    pub lost_reason: Option<String>,
    pub converted_to_account: Option<Uuid>,
    pub converted_at: Option<DateTimeWithTimeZone>,
    pub assigned_to: Uuid,
    pub created_by: Uuid,
    pub updated_by: Option<Uuid>,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
