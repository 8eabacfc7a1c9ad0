//! `SeaORM` Entity for per-student-per-course grade records.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{HistoryStatus, LetterGrade};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "academic_history")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub student_number: String,
    pub course_code: String,
    pub course_title: String,
    pub term: String,
    pub session: String,
    pub academic_year: String,
    pub grade: LetterGrade,
    pub grade_points: Option<Decimal>,
    pub credits: Decimal,
    pub total_sessions: i32,
    pub attended_sessions: i32,
    /// Derived from the session counts on every save.
    pub attendance_percent: Option<Decimal>,
    pub scores: Option<Json>,
    pub status: HistoryStatus,
    pub enrolled_at: DateTimeWithTimeZone,
    pub completion_date: Option<Date>,
    pub withdrawal_date: Option<Date>,
    pub instructor_name: Option<String>,
    pub instructor_email: Option<String>,
    pub comments: Option<Json>,
    pub is_retake: bool,
    pub original_grade: Option<String>,
    pub is_transfer_credit: bool,
    pub transfer_institution: Option<String>,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
