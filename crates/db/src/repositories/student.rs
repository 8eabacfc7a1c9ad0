//! Student repository for the admissions module.

use atrium_shared::types::pagination::{PageRequest, SortOrder};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, IntoActiveModel, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    Select, Set,
};
use uuid::Uuid;

use atrium_core::finance::{student_number, student_sequence_scope};

use super::{SequenceRepository, contains_ci};
use crate::entities::{
    sea_orm_active_enums::{EnrollmentStatus, FundingSource, LeadSource, StudentStatus},
    students,
};

/// Error types for student operations.
#[derive(Debug, thiserror::Error)]
pub enum StudentError {
    /// Student not found.
    #[error("Student not found: {0}")]
    NotFound(Uuid),

    /// Duplicate email or student number.
    #[error("Student with this email or student number already exists")]
    Duplicate,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Filter options for listing students.
#[derive(Debug, Clone, Default)]
pub struct StudentFilter {
    /// Filter by status.
    pub status: Option<StudentStatus>,
    /// Filter by program.
    pub program: Option<String>,
    /// Filter by campus.
    pub campus: Option<String>,
    /// Filter by session.
    pub session: Option<String>,
    /// Case-insensitive substring search over name, number and email.
    pub search: Option<String>,
}

/// Allow-listed sort keys for student lists.
#[derive(Debug, Clone, Copy, Default)]
pub enum StudentSortKey {
    /// Sort by name.
    #[default]
    Name,
    /// Sort by student number.
    StudentNumber,
    /// Sort by status.
    Status,
    /// Sort by program.
    Program,
    /// Sort by creation time.
    CreatedAt,
}

impl StudentSortKey {
    /// Parses an allow-listed sort key; anything else falls back to name.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "student_number" => Self::StudentNumber,
            "status" => Self::Status,
            "program" => Self::Program,
            "created_at" => Self::CreatedAt,
            _ => Self::Name,
        }
    }

    const fn column(self) -> students::Column {
        match self {
            Self::Name => students::Column::Name,
            Self::StudentNumber => students::Column::StudentNumber,
            Self::Status => students::Column::Status,
            Self::Program => students::Column::Program,
            Self::CreatedAt => students::Column::CreatedAt,
        }
    }
}

/// Input for creating a student.
#[derive(Debug, Clone)]
pub struct CreateStudentInput {
    /// Explicit student number; allocated from the yearly sequence when
    /// omitted.
    pub student_number: Option<String>,
    /// Full name.
    pub name: String,
    /// Email, unique.
    pub email: String,
    /// Phone.
    pub phone: Option<String>,
    /// Date of birth.
    pub date_of_birth: Option<chrono::NaiveDate>,
    /// Gender.
    pub gender: Option<String>,
    /// Campus.
    pub campus: String,
    /// Program.
    pub program: String,
    /// Session.
    pub session: String,
    /// First term date.
    pub first_term: chrono::NaiveDate,
    /// Expected graduation date.
    pub expected_graduation: Option<chrono::NaiveDate>,
    /// Status.
    pub status: StudentStatus,
    /// Enrollment modality.
    pub enrollment_status: EnrollmentStatus,
    /// Lead source.
    pub lead_source: Option<LeadSource>,
    /// Cohort group.
    pub cohort_group: Option<String>,
    /// Address blob.
    pub address: Option<serde_json::Value>,
    /// Emergency contact blob.
    pub emergency_contact: Option<serde_json::Value>,
    /// Funding source.
    pub funding_source: Option<FundingSource>,
    /// Notes.
    pub notes: Option<String>,
}

/// Allow-listed update fields for a student.
#[derive(Debug, Clone, Default)]
pub struct UpdateStudentInput {
    /// Full name.
    pub name: Option<String>,
    /// Email.
    pub email: Option<String>,
    /// Phone.
    pub phone: Option<String>,
    /// Campus.
    pub campus: Option<String>,
    /// Program.
    pub program: Option<String>,
    /// Session.
    pub session: Option<String>,
    /// Expected graduation date.
    pub expected_graduation: Option<chrono::NaiveDate>,
    /// Status.
    pub status: Option<StudentStatus>,
    /// Enrollment modality.
    pub enrollment_status: Option<EnrollmentStatus>,
    /// Lead source.
    pub lead_source: Option<LeadSource>,
    /// Cohort group.
    pub cohort_group: Option<String>,
    /// Address blob.
    pub address: Option<serde_json::Value>,
    /// Emergency contact blob.
    pub emergency_contact: Option<serde_json::Value>,
    /// Funding source.
    pub funding_source: Option<FundingSource>,
    /// Notes.
    pub notes: Option<String>,
}

/// Fields accepted by the bulk update endpoint.
#[derive(Debug, Clone, Default)]
pub struct StudentBulkUpdate {
    /// New status.
    pub status: Option<StudentStatus>,
    /// New campus.
    pub campus: Option<String>,
    /// New session.
    pub session: Option<String>,
    /// New cohort group.
    pub cohort_group: Option<String>,
}

/// Status rollup for the admissions stats endpoint.
#[derive(Debug, Clone, Default)]
pub struct StudentStats {
    /// All active students.
    pub total: u64,
    /// Enrolled or active.
    pub enrolled: u64,
    /// Prospective.
    pub prospective: u64,
    /// Graduated.
    pub graduated: u64,
    /// Count per program, descending.
    pub by_program: Vec<(String, i64)>,
    /// Count per campus, descending.
    pub by_campus: Vec<(String, i64)>,
}

#[derive(Debug, FromQueryResult)]
struct BucketCount {
    bucket: String,
    count: i64,
}

/// Student repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct StudentRepository {
    db: DatabaseConnection,
}

impl StudentRepository {
    /// Creates a new student repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn filtered(filter: &StudentFilter) -> Select<students::Entity> {
        let mut query = students::Entity::find().filter(students::Column::IsActive.eq(true));

        if let Some(status) = &filter.status {
            query = query.filter(students::Column::Status.eq(status.clone()));
        }
        if let Some(program) = &filter.program {
            query = query.filter(students::Column::Program.eq(program));
        }
        if let Some(campus) = &filter.campus {
            query = query.filter(students::Column::Campus.eq(campus));
        }
        if let Some(session) = &filter.session {
            query = query.filter(students::Column::Session.eq(session));
        }
        if let Some(search) = &filter.search {
            query = query.filter(
                Condition::any()
                    .add(contains_ci(students::Column::Name, search))
                    .add(contains_ci(students::Column::StudentNumber, search))
                    .add(contains_ci(students::Column::Email, search)),
            );
        }

        query
    }

    /// Lists students matching the filter, returning the page and the total
    /// matching count.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        filter: &StudentFilter,
        sort: StudentSortKey,
        order: SortOrder,
        page: &PageRequest,
    ) -> Result<(Vec<students::Model>, u64), DbErr> {
        let query = Self::filtered(filter);
        let total = query.clone().count(&self.db).await?;

        let order = match order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };

        let items = query
            .order_by(sort.column(), order)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((items, total))
    }

    /// Fetches all students matching the filter, for export.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn export(&self, filter: &StudentFilter) -> Result<Vec<students::Model>, DbErr> {
        Self::filtered(filter)
            .order_by_asc(students::Column::Name)
            .all(&self.db)
            .await
    }

    /// Finds a student by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<students::Model>, DbErr> {
        students::Entity::find_by_id(id).one(&self.db).await
    }

    /// Finds a student by student number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_number(&self, number: &str) -> Result<Option<students::Model>, DbErr> {
        students::Entity::find()
            .filter(students::Column::StudentNumber.eq(number))
            .one(&self.db)
            .await
    }

    /// Creates a student, allocating a student number from the yearly
    /// sequence when none was supplied.
    ///
    /// # Errors
    ///
    /// Returns `StudentError::Duplicate` when the email or number is taken.
    pub async fn create(&self, input: CreateStudentInput) -> Result<students::Model, StudentError> {
        let email = input.email.to_lowercase();

        let mut dup = Condition::any().add(students::Column::Email.eq(email.clone()));
        if let Some(number) = &input.student_number {
            dup = dup.add(students::Column::StudentNumber.eq(number.clone()));
        }
        if students::Entity::find().filter(dup).count(&self.db).await? > 0 {
            return Err(StudentError::Duplicate);
        }

        let number = match input.student_number {
            Some(number) => number,
            None => {
                let today = Utc::now().date_naive();
                let seq = SequenceRepository::new(self.db.clone())
                    .next_value(&student_sequence_scope(today))
                    .await?;
                student_number(today, seq)
            }
        };

        let now = Utc::now().into();
        let student = students::ActiveModel {
            id: Set(Uuid::new_v4()),
            student_number: Set(number),
            name: Set(input.name),
            email: Set(email),
            phone: Set(input.phone),
            date_of_birth: Set(input.date_of_birth),
            gender: Set(input.gender),
            campus: Set(input.campus),
            program: Set(input.program),
            session: Set(input.session),
            first_term: Set(input.first_term),
            expected_graduation: Set(input.expected_graduation),
            status: Set(input.status),
            enrollment_status: Set(input.enrollment_status),
            lead_source: Set(input.lead_source),
            cohort_group: Set(input.cohort_group),
            address: Set(input.address),
            emergency_contact: Set(input.emergency_contact),
            funding_source: Set(input.funding_source),
            notes: Set(input.notes),
            documents: Set(None),
            is_active: Set(true),
            last_login_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(student.insert(&self.db).await?)
    }

    /// Applies an allow-listed update to a student.
    ///
    /// # Errors
    ///
    /// Returns `StudentError::NotFound` when the id does not exist and
    /// `StudentError::Duplicate` when the new email is taken.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateStudentInput,
    ) -> Result<students::Model, StudentError> {
        let student = self
            .find_by_id(id)
            .await?
            .ok_or(StudentError::NotFound(id))?;

        if let Some(email) = &input.email {
            let taken = students::Entity::find()
                .filter(students::Column::Email.eq(email.to_lowercase()))
                .filter(students::Column::Id.ne(id))
                .count(&self.db)
                .await?;
            if taken > 0 {
                return Err(StudentError::Duplicate);
            }
        }

        let mut active = student.into_active_model();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(email) = input.email {
            active.email = Set(email.to_lowercase());
        }
        if let Some(phone) = input.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(campus) = input.campus {
            active.campus = Set(campus);
        }
        if let Some(program) = input.program {
            active.program = Set(program);
        }
        if let Some(session) = input.session {
            active.session = Set(session);
        }
        if let Some(expected_graduation) = input.expected_graduation {
            active.expected_graduation = Set(Some(expected_graduation));
        }
        if let Some(status) = input.status {
            active.status = Set(status);
        }
        if let Some(enrollment_status) = input.enrollment_status {
            active.enrollment_status = Set(enrollment_status);
        }
        if let Some(lead_source) = input.lead_source {
            active.lead_source = Set(Some(lead_source));
        }
        if let Some(cohort_group) = input.cohort_group {
            active.cohort_group = Set(Some(cohort_group));
        }
        if let Some(address) = input.address {
            active.address = Set(Some(address));
        }
        if let Some(emergency_contact) = input.emergency_contact {
            active.emergency_contact = Set(Some(emergency_contact));
        }
        if let Some(funding_source) = input.funding_source {
            active.funding_source = Set(Some(funding_source));
        }
        if let Some(notes) = input.notes {
            active.notes = Set(Some(notes));
        }
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Soft-deletes a student.
    ///
    /// # Errors
    ///
    /// Returns `StudentError::NotFound` when the id does not exist.
    pub async fn soft_delete(&self, id: Uuid) -> Result<(), StudentError> {
        let student = self
            .find_by_id(id)
            .await?
            .ok_or(StudentError::NotFound(id))?;

        let mut active = student.into_active_model();
        active.is_active = Set(false);
        active.updated_at = Set(Utc::now().into());
        active.update(&self.db).await?;
        Ok(())
    }

    /// Computes the admissions status rollup.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn stats(&self) -> Result<StudentStats, DbErr> {
        let active = students::Entity::find().filter(students::Column::IsActive.eq(true));

        let total = active.clone().count(&self.db).await?;
        let enrolled = active
            .clone()
            .filter(
                students::Column::Status
                    .is_in([StudentStatus::Enrolled, StudentStatus::Active]),
            )
            .count(&self.db)
            .await?;
        let prospective = active
            .clone()
            .filter(students::Column::Status.eq(StudentStatus::Prospective))
            .count(&self.db)
            .await?;
        let graduated = active
            .clone()
            .filter(students::Column::Status.eq(StudentStatus::Graduated))
            .count(&self.db)
            .await?;

        let by_program = self.distribution(students::Column::Program).await?;
        let by_campus = self.distribution(students::Column::Campus).await?;

        Ok(StudentStats {
            total,
            enrolled,
            prospective,
            graduated,
            by_program,
            by_campus,
        })
    }

    async fn distribution(&self, column: students::Column) -> Result<Vec<(String, i64)>, DbErr> {
        let rows = students::Entity::find()
            .select_only()
            .column_as(column, "bucket")
            .column_as(students::Column::Id.count(), "count")
            .filter(students::Column::IsActive.eq(true))
            .group_by(column)
            .order_by_desc(Expr::col(sea_orm::sea_query::Alias::new("count")))
            .into_model::<BucketCount>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(|r| (r.bucket, r.count)).collect())
    }

    /// Applies a bulk update to the given ids, returning
    /// `(matched_count, modified_count)`.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn bulk_update(
        &self,
        ids: &[Uuid],
        updates: StudentBulkUpdate,
    ) -> Result<(u64, u64), DbErr> {
        let matched = students::Entity::find()
            .filter(students::Column::Id.is_in(ids.to_vec()))
            .count(&self.db)
            .await?;

        let mut update = students::Entity::update_many()
            .filter(students::Column::Id.is_in(ids.to_vec()))
            .col_expr(students::Column::UpdatedAt, Expr::value(Utc::now()));

        if let Some(status) = updates.status {
            update = update.col_expr(students::Column::Status, Expr::value(status));
        }
        if let Some(campus) = updates.campus {
            update = update.col_expr(students::Column::Campus, Expr::value(campus));
        }
        if let Some(session) = updates.session {
            update = update.col_expr(students::Column::Session, Expr::value(session));
        }
        if let Some(cohort_group) = updates.cohort_group {
            update = update.col_expr(students::Column::CohortGroup, Expr::value(cohort_group));
        }

        let result = update.exec(&self.db).await?;
        Ok((matched, result.rows_affected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_parse_allow_list() {
        assert!(matches!(StudentSortKey::parse("status"), StudentSortKey::Status));
        assert!(matches!(
            StudentSortKey::parse("created_at"),
            StudentSortKey::CreatedAt
        ));
        // Unknown keys fall back to the default rather than erroring.
        assert!(matches!(StudentSortKey::parse("password_hash"), StudentSortKey::Name));
        assert!(matches!(StudentSortKey::parse(""), StudentSortKey::Name));
    }
}
