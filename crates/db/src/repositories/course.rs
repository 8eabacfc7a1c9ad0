//! Course repository for the registrar module.
//!
//! The roster lives in `course_enrollments`; the capacity invariant is
//! enforced inside the enrollment transaction so a full course can never
//! over-admit.

use atrium_shared::types::pagination::{PageRequest, SortOrder};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
    TransactionTrait,
};
use uuid::Uuid;

use super::contains_ci;
use crate::entities::{
    course_enrollments, courses,
    sea_orm_active_enums::{CourseStatus, RosterStatus},
};

/// Error types for course operations.
#[derive(Debug, thiserror::Error)]
pub enum CourseError {
    /// Course not found.
    #[error("Course not found: {0}")]
    NotFound(Uuid),

    /// Duplicate course code.
    #[error("Course with this code already exists")]
    Duplicate,

    /// The active roster is at the enrollment limit.
    #[error("Course is full")]
    CourseFull,

    /// The student already holds an active roster entry.
    #[error("Student is already enrolled")]
    AlreadyEnrolled,

    /// The student has no roster entry to drop.
    #[error("Student is not enrolled in this course")]
    NotEnrolled,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Filter options for listing courses.
#[derive(Debug, Clone, Default)]
pub struct CourseFilter {
    /// Filter by term.
    pub term: Option<String>,
    /// Filter by session.
    pub session: Option<String>,
    /// Filter by academic year.
    pub academic_year: Option<String>,
    /// Filter by status.
    pub status: Option<CourseStatus>,
    /// Filter by instructor email.
    pub instructor_email: Option<String>,
    /// Case-insensitive substring search over code and title.
    pub search: Option<String>,
}

/// Allow-listed sort keys for course lists.
#[derive(Debug, Clone, Copy, Default)]
pub enum CourseSortKey {
    /// Sort by course code.
    #[default]
    CourseCode,
    /// Sort by title.
    Title,
    /// Sort by term.
    Term,
    /// Sort by creation time.
    CreatedAt,
}

impl CourseSortKey {
    /// Parses an allow-listed sort key; anything else falls back to code.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "title" => Self::Title,
            "term" => Self::Term,
            "created_at" => Self::CreatedAt,
            _ => Self::CourseCode,
        }
    }

    const fn column(self) -> courses::Column {
        match self {
            Self::CourseCode => courses::Column::CourseCode,
            Self::Title => courses::Column::Title,
            Self::Term => courses::Column::Term,
            Self::CreatedAt => courses::Column::CreatedAt,
        }
    }
}

/// Input for creating a course.
#[derive(Debug, Clone)]
pub struct CreateCourseInput {
    /// Unique course code.
    pub course_code: String,
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Credit hours.
    pub credits: rust_decimal::Decimal,
    /// Lecture hours.
    pub lecture_hours: i32,
    /// Lab hours.
    pub lab_hours: i32,
    /// Clinical hours.
    pub clinical_hours: i32,
    /// Total hours.
    pub total_hours: i32,
    /// Term.
    pub term: String,
    /// Session.
    pub session: String,
    /// Academic year.
    pub academic_year: String,
    /// Instructor name.
    pub instructor_name: String,
    /// Instructor email.
    pub instructor_email: String,
    /// Instructor phone.
    pub instructor_phone: Option<String>,
    /// Instructor department.
    pub instructor_department: Option<String>,
    /// Schedule blob.
    pub schedule: Option<serde_json::Value>,
    /// Roster capacity, at least 1.
    pub enrollment_limit: i32,
    /// Prerequisites blob.
    pub prerequisites: Option<serde_json::Value>,
    /// Materials blob.
    pub materials: Option<serde_json::Value>,
    /// Grading policy blob.
    pub grading_policy: Option<serde_json::Value>,
    /// Notes.
    pub notes: Option<String>,
    /// Syllabus link.
    pub syllabus: Option<String>,
    /// Creating user.
    pub created_by: Option<Uuid>,
}

/// Allow-listed update fields for a course.
#[derive(Debug, Clone, Default)]
pub struct UpdateCourseInput {
    /// Title.
    pub title: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Credit hours.
    pub credits: Option<rust_decimal::Decimal>,
    /// Total hours.
    pub total_hours: Option<i32>,
    /// Instructor name.
    pub instructor_name: Option<String>,
    /// Instructor email.
    pub instructor_email: Option<String>,
    /// Schedule blob.
    pub schedule: Option<serde_json::Value>,
    /// Roster capacity. Rejected when below the current active roster.
    pub enrollment_limit: Option<i32>,
    /// Status.
    pub status: Option<CourseStatus>,
    /// Notes.
    pub notes: Option<String>,
    /// Syllabus link.
    pub syllabus: Option<String>,
}

/// Fields accepted by the bulk update endpoint.
#[derive(Debug, Clone, Default)]
pub struct CourseBulkUpdate {
    /// New status.
    pub status: Option<CourseStatus>,
    /// New term.
    pub term: Option<String>,
    /// New session.
    pub session: Option<String>,
}

/// Registrar stats rollup.
#[derive(Debug, Clone, Default)]
pub struct CourseStats {
    /// All active courses.
    pub total: u64,
    /// Courses with status Active.
    pub active: u64,
    /// Sum of enrollment limits.
    pub total_capacity: i64,
    /// Active roster entries across all courses.
    pub total_enrolled: u64,
}

/// Course repository for CRUD and roster operations.
#[derive(Debug, Clone)]
pub struct CourseRepository {
    db: DatabaseConnection,
}

impl CourseRepository {
    /// Creates a new course repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn filtered(filter: &CourseFilter) -> Select<courses::Entity> {
        let mut query = courses::Entity::find().filter(courses::Column::IsActive.eq(true));

        if let Some(term) = &filter.term {
            query = query.filter(courses::Column::Term.eq(term));
        }
        if let Some(session) = &filter.session {
            query = query.filter(courses::Column::Session.eq(session));
        }
        if let Some(academic_year) = &filter.academic_year {
            query = query.filter(courses::Column::AcademicYear.eq(academic_year));
        }
        if let Some(status) = &filter.status {
            query = query.filter(courses::Column::Status.eq(status.clone()));
        }
        if let Some(instructor_email) = &filter.instructor_email {
            query = query.filter(courses::Column::InstructorEmail.eq(instructor_email));
        }
        if let Some(search) = &filter.search {
            query = query.filter(
                Condition::any()
                    .add(contains_ci(courses::Column::CourseCode, search))
                    .add(contains_ci(courses::Column::Title, search)),
            );
        }

        query
    }

    /// Lists courses matching the filter with the total matching count.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        filter: &CourseFilter,
        sort: CourseSortKey,
        order: SortOrder,
        page: &PageRequest,
    ) -> Result<(Vec<courses::Model>, u64), DbErr> {
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

    /// Fetches all courses matching the filter, for export.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn export(&self, filter: &CourseFilter) -> Result<Vec<courses::Model>, DbErr> {
        Self::filtered(filter)
            .order_by_asc(courses::Column::CourseCode)
            .all(&self.db)
            .await
    }

    /// Finds a course by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<courses::Model>, DbErr> {
        courses::Entity::find_by_id(id).one(&self.db).await
    }

    /// Creates a course.
    ///
    /// # Errors
    ///
    /// Returns `CourseError::Duplicate` when the code is taken.
    pub async fn create(&self, input: CreateCourseInput) -> Result<courses::Model, CourseError> {
        let code = input.course_code.to_uppercase();
        let taken = courses::Entity::find()
            .filter(courses::Column::CourseCode.eq(code.clone()))
            .count(&self.db)
            .await?;
        if taken > 0 {
            return Err(CourseError::Duplicate);
        }

        let now = Utc::now().into();
        let course = courses::ActiveModel {
            id: Set(Uuid::new_v4()),
            course_code: Set(code),
            title: Set(input.title),
            description: Set(input.description),
            credits: Set(input.credits),
            lecture_hours: Set(input.lecture_hours),
            lab_hours: Set(input.lab_hours),
            clinical_hours: Set(input.clinical_hours),
            total_hours: Set(input.total_hours),
            term: Set(input.term),
            session: Set(input.session),
            academic_year: Set(input.academic_year),
            instructor_name: Set(input.instructor_name),
            instructor_email: Set(input.instructor_email.to_lowercase()),
            instructor_phone: Set(input.instructor_phone),
            instructor_department: Set(input.instructor_department),
            schedule: Set(input.schedule),
            enrollment_limit: Set(input.enrollment_limit.max(1)),
            prerequisites: Set(input.prerequisites),
            materials: Set(input.materials),
            grading_policy: Set(input.grading_policy),
            status: Set(CourseStatus::Active),
            notes: Set(input.notes),
            syllabus: Set(input.syllabus),
            is_active: Set(true),
            created_by: Set(input.created_by),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(course.insert(&self.db).await?)
    }

    /// Applies an allow-listed update. Shrinking the enrollment limit below
    /// the current active roster count is rejected.
    ///
    /// # Errors
    ///
    /// Returns `CourseError::NotFound` or `CourseError::CourseFull`.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateCourseInput,
    ) -> Result<courses::Model, CourseError> {
        let course = self.find_by_id(id).await?.ok_or(CourseError::NotFound(id))?;

        if let Some(limit) = input.enrollment_limit {
            let enrolled = self.enrolled_count(id).await?;
            if i64::from(limit) < i64::try_from(enrolled).unwrap_or(i64::MAX) {
                return Err(CourseError::CourseFull);
            }
        }

        let mut active = course.into_active_model();
        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(description) = input.description {
            active.description = Set(Some(description));
        }
        if let Some(credits) = input.credits {
            active.credits = Set(credits);
        }
        if let Some(total_hours) = input.total_hours {
            active.total_hours = Set(total_hours);
        }
        if let Some(instructor_name) = input.instructor_name {
            active.instructor_name = Set(instructor_name);
        }
        if let Some(instructor_email) = input.instructor_email {
            active.instructor_email = Set(instructor_email.to_lowercase());
        }
        if let Some(schedule) = input.schedule {
            active.schedule = Set(Some(schedule));
        }
        if let Some(limit) = input.enrollment_limit {
            active.enrollment_limit = Set(limit.max(1));
        }
        if let Some(status) = input.status {
            active.status = Set(status);
        }
        if let Some(notes) = input.notes {
            active.notes = Set(Some(notes));
        }
        if let Some(syllabus) = input.syllabus {
            active.syllabus = Set(Some(syllabus));
        }
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Soft-deletes a course.
    ///
    /// # Errors
    ///
    /// Returns `CourseError::NotFound` when the id does not exist.
    pub async fn soft_delete(&self, id: Uuid) -> Result<(), CourseError> {
        let course = self.find_by_id(id).await?.ok_or(CourseError::NotFound(id))?;

        let mut active = course.into_active_model();
        active.is_active = Set(false);
        active.updated_at = Set(Utc::now().into());
        active.update(&self.db).await?;
        Ok(())
    }

    /// Counts active roster entries for a course.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn enrolled_count(&self, course_id: Uuid) -> Result<u64, DbErr> {
        course_enrollments::Entity::find()
            .filter(course_enrollments::Column::CourseId.eq(course_id))
            .filter(course_enrollments::Column::Status.eq(RosterStatus::Enrolled))
            .count(&self.db)
            .await
    }

    /// Returns the full roster for a course.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn roster(&self, course_id: Uuid) -> Result<Vec<course_enrollments::Model>, DbErr> {
        course_enrollments::Entity::find()
            .filter(course_enrollments::Column::CourseId.eq(course_id))
            .order_by_asc(course_enrollments::Column::EnrolledAt)
            .all(&self.db)
            .await
    }

    /// Enrolls a student, enforcing the capacity invariant.
    ///
    /// # Errors
    ///
    /// Returns `CourseError::CourseFull` when the active roster is at the
    /// limit and `CourseError::AlreadyEnrolled` on a duplicate entry.
    pub async fn enroll_student(
        &self,
        course_id: Uuid,
        student_number: &str,
    ) -> Result<course_enrollments::Model, CourseError> {
        let course = self
            .find_by_id(course_id)
            .await?
            .ok_or(CourseError::NotFound(course_id))?;

        let txn = self.db.begin().await?;

        let enrolled = course_enrollments::Entity::find()
            .filter(course_enrollments::Column::CourseId.eq(course_id))
            .filter(course_enrollments::Column::Status.eq(RosterStatus::Enrolled))
            .count(&txn)
            .await?;

        if enrolled >= u64::try_from(course.enrollment_limit.max(0)).unwrap_or(0) {
            txn.rollback().await?;
            return Err(CourseError::CourseFull);
        }

        let existing = course_enrollments::Entity::find()
            .filter(course_enrollments::Column::CourseId.eq(course_id))
            .filter(course_enrollments::Column::StudentNumber.eq(student_number))
            .filter(course_enrollments::Column::Status.eq(RosterStatus::Enrolled))
            .count(&txn)
            .await?;

        if existing > 0 {
            txn.rollback().await?;
            return Err(CourseError::AlreadyEnrolled);
        }

        let now = Utc::now().into();
        let entry = course_enrollments::ActiveModel {
            id: Set(Uuid::new_v4()),
            course_id: Set(course_id),
            student_number: Set(student_number.to_string()),
            status: Set(RosterStatus::Enrolled),
            enrolled_at: Set(now),
            updated_at: Set(now),
        };
        let entry = entry.insert(&txn).await?;

        txn.commit().await?;
        Ok(entry)
    }

    /// Drops a student from the roster.
    ///
    /// # Errors
    ///
    /// Returns `CourseError::NotEnrolled` when no active entry exists.
    pub async fn drop_student(
        &self,
        course_id: Uuid,
        student_number: &str,
    ) -> Result<course_enrollments::Model, CourseError> {
        let entry = course_enrollments::Entity::find()
            .filter(course_enrollments::Column::CourseId.eq(course_id))
            .filter(course_enrollments::Column::StudentNumber.eq(student_number))
            .filter(course_enrollments::Column::Status.eq(RosterStatus::Enrolled))
            .one(&self.db)
            .await?
            .ok_or(CourseError::NotEnrolled)?;

        let mut active = entry.into_active_model();
        active.status = Set(RosterStatus::Dropped);
        active.updated_at = Set(Utc::now().into());
        Ok(active.update(&self.db).await?)
    }

    /// Computes the registrar stats rollup.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn stats(&self) -> Result<CourseStats, DbErr> {
        let all = courses::Entity::find().filter(courses::Column::IsActive.eq(true));

        let total = all.clone().count(&self.db).await?;
        let active = all
            .clone()
            .filter(courses::Column::Status.eq(CourseStatus::Active))
            .count(&self.db)
            .await?;

        #[derive(Debug, sea_orm::FromQueryResult)]
        struct CapacitySum {
            capacity: Option<i64>,
        }

        let capacity = courses::Entity::find()
            .select_only()
            .column_as(courses::Column::EnrollmentLimit.sum(), "capacity")
            .filter(courses::Column::IsActive.eq(true))
            .into_model::<CapacitySum>()
            .one(&self.db)
            .await?
            .and_then(|row| row.capacity)
            .unwrap_or(0);

        let total_enrolled = course_enrollments::Entity::find()
            .filter(course_enrollments::Column::Status.eq(RosterStatus::Enrolled))
            .count(&self.db)
            .await?;

        Ok(CourseStats {
            total,
            active,
            total_capacity: capacity,
            total_enrolled,
        })
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
        updates: CourseBulkUpdate,
    ) -> Result<(u64, u64), DbErr> {
        let matched = courses::Entity::find()
            .filter(courses::Column::Id.is_in(ids.to_vec()))
            .count(&self.db)
            .await?;

        let mut update = courses::Entity::update_many()
            .filter(courses::Column::Id.is_in(ids.to_vec()))
            .col_expr(courses::Column::UpdatedAt, Expr::value(Utc::now()));

        if let Some(status) = updates.status {
            update = update.col_expr(courses::Column::Status, Expr::value(status));
        }
        if let Some(term) = updates.term {
            update = update.col_expr(courses::Column::Term, Expr::value(term));
        }
        if let Some(session) = updates.session {
            update = update.col_expr(courses::Column::Session, Expr::value(session));
        }

        let result = update.exec(&self.db).await?;
        Ok((matched, result.rows_affected))
    }
}
