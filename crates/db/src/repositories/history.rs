//! Academic history repository: grade records, GPA and failing grades.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use atrium_core::academic::{self, GradedCourse};

use crate::entities::{
    academic_history,
    sea_orm_active_enums::{HistoryStatus, LetterGrade},
};

/// Error types for academic history operations.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// Record not found.
    #[error("Academic history record not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for adding a history record.
#[derive(Debug, Clone)]
pub struct CreateHistoryInput {
    /// Student number.
    pub student_number: String,
    /// Course code.
    pub course_code: String,
    /// Course title.
    pub course_title: String,
    /// Term.
    pub term: String,
    /// Session.
    pub session: String,
    /// Academic year.
    pub academic_year: String,
    /// Letter grade.
    pub grade: LetterGrade,
    /// Grade points; defaulted from the grade when omitted.
    pub grade_points: Option<Decimal>,
    /// Credit hours.
    pub credits: Decimal,
    /// Sessions held.
    pub total_sessions: i32,
    /// Sessions attended.
    pub attended_sessions: i32,
    /// Score breakdown blob.
    pub scores: Option<serde_json::Value>,
    /// Record status.
    pub status: HistoryStatus,
    /// Instructor name.
    pub instructor_name: Option<String>,
    /// Instructor email.
    pub instructor_email: Option<String>,
    /// Comments blob.
    pub comments: Option<serde_json::Value>,
    /// Retake of an earlier attempt.
    pub is_retake: bool,
    /// Grade from the earlier attempt.
    pub original_grade: Option<String>,
    /// Transfer credit.
    pub is_transfer_credit: bool,
    /// Transferring institution.
    pub transfer_institution: Option<String>,
}

/// Allow-listed update fields for a history record.
#[derive(Debug, Clone, Default)]
pub struct UpdateHistoryInput {
    /// Letter grade.
    pub grade: Option<LetterGrade>,
    /// Grade points; re-defaulted from the grade when the grade changes and
    /// no explicit points are supplied.
    pub grade_points: Option<Decimal>,
    /// Sessions held.
    pub total_sessions: Option<i32>,
    /// Sessions attended.
    pub attended_sessions: Option<i32>,
    /// Score breakdown blob.
    pub scores: Option<serde_json::Value>,
    /// Record status.
    pub status: Option<HistoryStatus>,
    /// Comments blob.
    pub comments: Option<serde_json::Value>,
}

const fn core_grade(grade: &LetterGrade) -> academic::LetterGrade {
    match grade {
        LetterGrade::A => academic::LetterGrade::A,
        LetterGrade::AMinus => academic::LetterGrade::AMinus,
        LetterGrade::BPlus => academic::LetterGrade::BPlus,
        LetterGrade::B => academic::LetterGrade::B,
        LetterGrade::BMinus => academic::LetterGrade::BMinus,
        LetterGrade::CPlus => academic::LetterGrade::CPlus,
        LetterGrade::C => academic::LetterGrade::C,
        LetterGrade::CMinus => academic::LetterGrade::CMinus,
        LetterGrade::DPlus => academic::LetterGrade::DPlus,
        LetterGrade::D => academic::LetterGrade::D,
        LetterGrade::DMinus => academic::LetterGrade::DMinus,
        LetterGrade::F => academic::LetterGrade::F,
        LetterGrade::I => academic::LetterGrade::I,
        LetterGrade::W => academic::LetterGrade::W,
        LetterGrade::P => academic::LetterGrade::P,
        LetterGrade::Np => academic::LetterGrade::NP,
    }
}

/// Academic history repository.
#[derive(Debug, Clone)]
pub struct HistoryRepository {
    db: DatabaseConnection,
}

impl HistoryRepository {
    /// Creates a new history repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists a student's history records, newest term first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_student(
        &self,
        student_number: &str,
    ) -> Result<Vec<academic_history::Model>, DbErr> {
        academic_history::Entity::find()
            .filter(academic_history::Column::StudentNumber.eq(student_number))
            .filter(academic_history::Column::IsActive.eq(true))
            .order_by_desc(academic_history::Column::AcademicYear)
            .order_by_asc(academic_history::Column::CourseCode)
            .all(&self.db)
            .await
    }

    /// Finds a record by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<academic_history::Model>, DbErr> {
        academic_history::Entity::find_by_id(id).one(&self.db).await
    }

    /// Adds a history record. Attendance percentage and completion/withdrawal
    /// dates are derived here, the way every save path must derive them.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        input: CreateHistoryInput,
    ) -> Result<academic_history::Model, DbErr> {
        let now = Utc::now();
        let today = now.date_naive();

        let grade_points = input
            .grade_points
            .or_else(|| core_grade(&input.grade).default_points());

        let attendance_percent =
            academic::attendance_percentage(input.attended_sessions, input.total_sessions);

        let completion_date = (input.status == HistoryStatus::Completed).then_some(today);
        let withdrawal_date = (input.status == HistoryStatus::Withdrawn).then_some(today);

        let record = academic_history::ActiveModel {
            id: Set(Uuid::new_v4()),
            student_number: Set(input.student_number),
            course_code: Set(input.course_code.to_uppercase()),
            course_title: Set(input.course_title),
            term: Set(input.term),
            session: Set(input.session),
            academic_year: Set(input.academic_year),
            grade: Set(input.grade),
            grade_points: Set(grade_points),
            credits: Set(input.credits),
            total_sessions: Set(input.total_sessions),
            attended_sessions: Set(input.attended_sessions),
            attendance_percent: Set(attendance_percent),
            scores: Set(input.scores),
            status: Set(input.status),
            enrolled_at: Set(now.into()),
            completion_date: Set(completion_date),
            withdrawal_date: Set(withdrawal_date),
            instructor_name: Set(input.instructor_name),
            instructor_email: Set(input.instructor_email.map(|e| e.to_lowercase())),
            comments: Set(input.comments),
            is_retake: Set(input.is_retake),
            original_grade: Set(input.original_grade),
            is_transfer_credit: Set(input.is_transfer_credit),
            transfer_institution: Set(input.transfer_institution),
            is_active: Set(true),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        record.insert(&self.db).await
    }

    /// Applies an allow-listed update, rederiving attendance percentage and
    /// stamping completion/withdrawal dates on their first transition.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::NotFound` when the id does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateHistoryInput,
    ) -> Result<academic_history::Model, HistoryError> {
        let record = self.find_by_id(id).await?.ok_or(HistoryError::NotFound(id))?;
        let now = Utc::now();
        let today = now.date_naive();

        let total_sessions = input.total_sessions.unwrap_or(record.total_sessions);
        let attended_sessions = input.attended_sessions.unwrap_or(record.attended_sessions);
        let had_completion = record.completion_date.is_some();
        let had_withdrawal = record.withdrawal_date.is_some();

        let mut active = record.into_active_model();

        if let Some(grade) = input.grade {
            let points = input
                .grade_points
                .or_else(|| core_grade(&grade).default_points());
            active.grade = Set(grade);
            active.grade_points = Set(points);
        } else if let Some(points) = input.grade_points {
            active.grade_points = Set(Some(points));
        }

        active.total_sessions = Set(total_sessions);
        active.attended_sessions = Set(attended_sessions);
        active.attendance_percent =
            Set(academic::attendance_percentage(attended_sessions, total_sessions));

        if let Some(scores) = input.scores {
            active.scores = Set(Some(scores));
        }
        if let Some(comments) = input.comments {
            active.comments = Set(Some(comments));
        }
        if let Some(status) = input.status {
            if status == HistoryStatus::Completed && !had_completion {
                active.completion_date = Set(Some(today));
            }
            if status == HistoryStatus::Withdrawn && !had_withdrawal {
                active.withdrawal_date = Set(Some(today));
            }
            active.status = Set(status);
        }
        active.updated_at = Set(now.into());

        Ok(active.update(&self.db).await?)
    }

    /// Recomputes a student's GPA on demand.
    ///
    /// Only active, completed records count; administrative grade codes are
    /// excluded inside the computation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn gpa(&self, student_number: &str) -> Result<Decimal, DbErr> {
        let records = academic_history::Entity::find()
            .filter(academic_history::Column::StudentNumber.eq(student_number))
            .filter(academic_history::Column::IsActive.eq(true))
            .filter(academic_history::Column::Status.eq(HistoryStatus::Completed))
            .all(&self.db)
            .await?;

        let graded: Vec<GradedCourse> = records
            .into_iter()
            .map(|record| GradedCourse {
                grade: core_grade(&record.grade),
                grade_points: record.grade_points.unwrap_or(Decimal::ZERO),
                credits: record.credits,
            })
            .collect();

        Ok(academic::cumulative_gpa(&graded))
    }

    /// Lists active records carrying failing grades (F, D, D-).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn failing_grades(&self) -> Result<Vec<academic_history::Model>, DbErr> {
        academic_history::Entity::find()
            .filter(academic_history::Column::IsActive.eq(true))
            .filter(academic_history::Column::Grade.is_in([
                LetterGrade::F,
                LetterGrade::D,
                LetterGrade::DMinus,
            ]))
            .order_by_asc(academic_history::Column::StudentNumber)
            .all(&self.db)
            .await
    }
}
