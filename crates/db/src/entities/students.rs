//! `SeaORM` Entity for the students table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{EnrollmentStatus, FundingSource, LeadSource, StudentStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Human-readable identifier, `STU<YY><seq>`. Assigned when omitted.
    #[sea_orm(unique)]
    pub student_number: String,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<Date>,
    pub gender: Option<String>,
    pub campus: String,
    pub program: String,
    pub session: String,
    pub first_term: Date,
    pub expected_graduation: Option<Date>,
    pub status: StudentStatus,
    pub enrollment_status: EnrollmentStatus,
    pub lead_source: Option<LeadSource>,
    pub cohort_group: Option<String>,
    pub address: Option<Json>,
    pub emergency_contact: Option<Json>,
    pub funding_source: Option<FundingSource>,
    pub notes: Option<String>,
    pub documents: Option<Json>,
    pub is_active: bool,
    pub last_login_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
