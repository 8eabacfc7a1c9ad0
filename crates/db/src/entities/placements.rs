//! `SeaORM` Entity for student employment placements.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{JobType, PlacementStatus, SalaryType, VerificationMethod};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "placements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub student_number: String,
    pub company_name: String,
    pub company_industry: Option<String>,
    pub company_size: Option<String>,
    pub company_website: Option<String>,
    pub company_address: Option<Json>,
    pub job_title: String,
    pub job_type: JobType,
    pub department: Option<String>,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub hours_per_week: Option<i32>,
    pub salary_amount: Option<Decimal>,
    pub salary_type: Option<SalaryType>,
    pub salary_currency: String,
    pub benefits: Option<Json>,
    pub status: PlacementStatus,
    pub application_date: Date,
    pub contact_name: String,
    pub contact_title: Option<String>,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub application_method: Option<String>,
    pub resume_submitted: bool,
    pub cover_letter_submitted: bool,
    pub verified: bool,
    pub verification_date: Option<DateTimeWithTimeZone>,
    pub verification_method: Option<VerificationMethod>,
    pub verification_source: Option<String>,
    pub performance_rating: Option<i32>,
    pub performance_feedback: Option<String>,
    pub notes: Option<String>,
    pub documents: Option<Json>,
    pub is_active: bool,
    pub created_by: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::placement_interviews::Entity")]
    PlacementInterviews,
}

impl Related<super::placement_interviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlacementInterviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
