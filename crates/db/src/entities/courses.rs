//! `SeaORM` Entity for the courses table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::CourseStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub course_code: String,
    pub title: String,
    pub description: Option<String>,
    pub credits: Decimal,
    pub lecture_hours: i32,
    pub lab_hours: i32,
    pub clinical_hours: i32,
    pub total_hours: i32,
    pub term: String,
    pub session: String,
    pub academic_year: String,
    pub instructor_name: String,
    pub instructor_email: String,
    pub instructor_phone: Option<String>,
    pub instructor_department: Option<String>,
    pub schedule: Option<Json>,
    /// Hard cap on the active roster.
    pub enrollment_limit: i32,
    pub prerequisites: Option<Json>,
    pub materials: Option<Json>,
    pub grading_policy: Option<Json>,
    pub status: CourseStatus,
    pub notes: Option<String>,
    pub syllabus: Option<String>,
    pub is_active: bool,
    pub created_by: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::course_enrollments::Entity")]
    CourseEnrollments,
}

impl Related<super::course_enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseEnrollments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
