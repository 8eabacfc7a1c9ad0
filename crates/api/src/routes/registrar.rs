//! Registrar routes: courses, roster operations, academic history and GPA.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use rust_decimal::Decimal;
use sea_orm::ActiveEnum;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use atrium_core::auth::UserRole;
use atrium_core::export::CsvBuilder;
use atrium_db::entities::sea_orm_active_enums::{CourseStatus, HistoryStatus, LetterGrade};
use atrium_db::repositories::course::{
    CourseBulkUpdate, CourseError, CourseFilter, CourseSortKey, CreateCourseInput,
    UpdateCourseInput,
};
use atrium_db::repositories::history::{CreateHistoryInput, HistoryError, UpdateHistoryInput};
use atrium_db::{CourseRepository, HistoryRepository};
use atrium_shared::types::pagination::{PageRequest, PageResponse};

use crate::AppState;
use crate::middleware::auth::AuthUser;

use super::{csv_response, parse_sort_order};

const VIEW_ROLES: &[UserRole] = &[
    UserRole::Admin,
    UserRole::Registrar,
    UserRole::Finance,
    UserRole::Instructor,
    UserRole::SalesRep,
    UserRole::Marketing,
];

const EDIT_ROLES: &[UserRole] = &[UserRole::Admin, UserRole::Registrar, UserRole::Instructor];

const DELETE_ROLES: &[UserRole] = &[UserRole::Admin, UserRole::Registrar];

/// Creates the registrar router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/registrar/courses", get(list_courses))
        .route("/registrar/courses", post(create_course))
        .route("/registrar/courses/stats", get(course_stats))
        .route("/registrar/courses/export", get(export_courses))
        .route("/registrar/courses/bulk-update", post(bulk_update_courses))
        .route("/registrar/courses/{id}", get(get_course))
        .route("/registrar/courses/{id}", put(update_course))
        .route("/registrar/courses/{id}", delete(delete_course))
        .route("/registrar/courses/{id}/enroll", post(enroll_student))
        .route("/registrar/courses/{id}/drop", post(drop_student))
        .route("/registrar/student-history", post(add_history_record))
        .route("/registrar/student-history/{id}", put(update_history_record))
        .route("/registrar/student-history/by-student/{student_number}", get(student_history))
        .route("/registrar/students/{student_number}/gpa", get(student_gpa))
        .route("/registrar/failing-grades", get(failing_grades))
}

/// Query parameters for listing courses.
#[derive(Debug, Deserialize)]
pub struct ListCoursesQuery {
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
    /// Substring search over code and title.
    pub search: Option<String>,
    /// Allow-listed sort key.
    pub sort_by: Option<String>,
    /// `asc` (default) or `desc`.
    pub sort_order: Option<String>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Page size.
    pub per_page: Option<u32>,
}

/// Request body for creating a course.
#[derive(Debug, Deserialize)]
pub struct CreateCourseRequest {
    /// Unique course code.
    pub course_code: String,
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Credit hours.
    pub credits: Decimal,
    /// Lecture hours.
    pub lecture_hours: Option<i32>,
    /// Lab hours.
    pub lab_hours: Option<i32>,
    /// Clinical hours.
    pub clinical_hours: Option<i32>,
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
    /// Roster capacity.
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
}

/// Request body for updating a course.
#[derive(Debug, Deserialize)]
pub struct UpdateCourseRequest {
    /// Title.
    pub title: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Credit hours.
    pub credits: Option<Decimal>,
    /// Total hours.
    pub total_hours: Option<i32>,
    /// Instructor name.
    pub instructor_name: Option<String>,
    /// Instructor email.
    pub instructor_email: Option<String>,
    /// Schedule blob.
    pub schedule: Option<serde_json::Value>,
    /// Roster capacity.
    pub enrollment_limit: Option<i32>,
    /// Status.
    pub status: Option<CourseStatus>,
    /// Notes.
    pub notes: Option<String>,
    /// Syllabus link.
    pub syllabus: Option<String>,
}

/// Request body for roster operations.
#[derive(Debug, Deserialize)]
pub struct RosterRequest {
    /// The student to enroll or drop.
    pub student_number: String,
}

/// Request body for bulk course updates.
#[derive(Debug, Deserialize)]
pub struct BulkUpdateCoursesRequest {
    /// Target course ids.
    pub ids: Vec<Uuid>,
    /// Fields to apply.
    pub updates: BulkCourseFields,
}

/// Allow-listed bulk update fields.
#[derive(Debug, Deserialize)]
pub struct BulkCourseFields {
    /// New status.
    pub status: Option<CourseStatus>,
    /// New term.
    pub term: Option<String>,
    /// New session.
    pub session: Option<String>,
}

/// Request body for adding a history record.
#[derive(Debug, Deserialize)]
pub struct AddHistoryRequest {
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
    pub total_sessions: Option<i32>,
    /// Sessions attended.
    pub attended_sessions: Option<i32>,
    /// Score breakdown blob.
    pub scores: Option<serde_json::Value>,
    /// Record status, defaults to Enrolled.
    pub status: Option<HistoryStatus>,
    /// Instructor name.
    pub instructor_name: Option<String>,
    /// Instructor email.
    pub instructor_email: Option<String>,
    /// Comments blob.
    pub comments: Option<serde_json::Value>,
    /// Retake flag.
    pub is_retake: Option<bool>,
    /// Original grade for retakes.
    pub original_grade: Option<String>,
    /// Transfer credit flag.
    pub is_transfer_credit: Option<bool>,
    /// Transferring institution.
    pub transfer_institution: Option<String>,
}

/// Request body for updating a history record.
#[derive(Debug, Deserialize)]
pub struct UpdateHistoryRequest {
    /// Letter grade.
    pub grade: Option<LetterGrade>,
    /// Grade points.
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

/// Query parameters for course export.
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    /// `json` (default) or `csv`.
    pub format: Option<String>,
    /// Filter by term.
    pub term: Option<String>,
    /// Filter by session.
    pub session: Option<String>,
    /// Filter by status.
    pub status: Option<CourseStatus>,
    /// Substring search.
    pub search: Option<String>,
}

fn course_error(e: &CourseError) -> axum::response::Response {
    match e {
        CourseError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "not_found", "message": "Course not found" })),
        )
            .into_response(),
        CourseError::Duplicate => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "duplicate_course",
                "message": "Course with this code already exists"
            })),
        )
            .into_response(),
        CourseError::CourseFull => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "course_full",
                "message": "Enrollment count cannot exceed enrollment limit"
            })),
        )
            .into_response(),
        CourseError::AlreadyEnrolled => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "already_enrolled",
                "message": "Student is already enrolled"
            })),
        )
            .into_response(),
        CourseError::NotEnrolled => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "not_enrolled",
                "message": "Student is not enrolled in this course"
            })),
        )
            .into_response(),
        CourseError::Database(err) => {
            error!(error = %err, "Database error in registrar");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal_error", "message": "An error occurred" })),
            )
                .into_response()
        }
    }
}

fn history_error(e: &HistoryError) -> axum::response::Response {
    match e {
        HistoryError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "not_found", "message": "Academic history record not found" })),
        )
            .into_response(),
        HistoryError::Database(err) => {
            error!(error = %err, "Database error in registrar history");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal_error", "message": "An error occurred" })),
            )
                .into_response()
        }
    }
}

/// GET /registrar/courses - List courses.
async fn list_courses(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListCoursesQuery>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(VIEW_ROLES) {
        return response;
    }

    let repo = CourseRepository::new((*state.db).clone());
    let filter = CourseFilter {
        term: query.term,
        session: query.session,
        academic_year: query.academic_year,
        status: query.status,
        instructor_email: query.instructor_email,
        search: query.search,
    };
    let sort = CourseSortKey::parse(query.sort_by.as_deref().unwrap_or_default());
    let order = parse_sort_order(query.sort_order.as_deref());
    let page = PageRequest {
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    };

    match repo.list(&filter, sort, order, &page).await {
        Ok((courses, total)) => {
            Json(PageResponse::new(courses, page.page, page.per_page, total)).into_response()
        }
        Err(e) => course_error(&CourseError::Database(e)),
    }
}

/// GET /registrar/courses/{id} - Fetch one course with its roster.
async fn get_course(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(VIEW_ROLES) {
        return response;
    }

    let repo = CourseRepository::new((*state.db).clone());
    let course = match repo.find_by_id(id).await {
        Ok(Some(course)) => course,
        Ok(None) => return course_error(&CourseError::NotFound(id)),
        Err(e) => return course_error(&CourseError::Database(e)),
    };

    let roster = match repo.roster(id).await {
        Ok(roster) => roster,
        Err(e) => return course_error(&CourseError::Database(e)),
    };
    let enrolled = match repo.enrolled_count(id).await {
        Ok(count) => count,
        Err(e) => return course_error(&CourseError::Database(e)),
    };

    let available =
        i64::from(course.enrollment_limit) - i64::try_from(enrolled).unwrap_or(i64::MAX);

    (
        StatusCode::OK,
        Json(json!({
            "course": course,
            "roster": roster,
            "enrollment_count": enrolled,
            "available_seats": available.max(0),
        })),
    )
        .into_response()
}

/// POST /registrar/courses - Create a course.
async fn create_course(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateCourseRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(EDIT_ROLES) {
        return response;
    }

    if payload.enrollment_limit < 1 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_enrollment_limit",
                "message": "Enrollment limit must be at least 1"
            })),
        )
            .into_response();
    }

    let repo = CourseRepository::new((*state.db).clone());
    let input = CreateCourseInput {
        course_code: payload.course_code,
        title: payload.title,
        description: payload.description,
        credits: payload.credits,
        lecture_hours: payload.lecture_hours.unwrap_or(0),
        lab_hours: payload.lab_hours.unwrap_or(0),
        clinical_hours: payload.clinical_hours.unwrap_or(0),
        total_hours: payload.total_hours,
        term: payload.term,
        session: payload.session,
        academic_year: payload.academic_year,
        instructor_name: payload.instructor_name,
        instructor_email: payload.instructor_email,
        instructor_phone: payload.instructor_phone,
        instructor_department: payload.instructor_department,
        schedule: payload.schedule,
        enrollment_limit: payload.enrollment_limit,
        prerequisites: payload.prerequisites,
        materials: payload.materials,
        grading_policy: payload.grading_policy,
        notes: payload.notes,
        syllabus: payload.syllabus,
        created_by: Some(auth.user_id()),
    };

    match repo.create(input).await {
        Ok(course) => {
            info!(course_id = %course.id, code = %course.course_code, "Course created");
            (StatusCode::CREATED, Json(json!({ "course": course }))).into_response()
        }
        Err(e) => course_error(&e),
    }
}

/// PUT /registrar/courses/{id} - Update a course.
async fn update_course(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCourseRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(EDIT_ROLES) {
        return response;
    }

    let repo = CourseRepository::new((*state.db).clone());
    let input = UpdateCourseInput {
        title: payload.title,
        description: payload.description,
        credits: payload.credits,
        total_hours: payload.total_hours,
        instructor_name: payload.instructor_name,
        instructor_email: payload.instructor_email,
        schedule: payload.schedule,
        enrollment_limit: payload.enrollment_limit,
        status: payload.status,
        notes: payload.notes,
        syllabus: payload.syllabus,
    };

    match repo.update(id, input).await {
        Ok(course) => {
            info!(course_id = %id, "Course updated");
            (StatusCode::OK, Json(json!({ "course": course }))).into_response()
        }
        Err(e) => course_error(&e),
    }
}

/// DELETE /registrar/courses/{id} - Soft-delete a course.
async fn delete_course(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(DELETE_ROLES) {
        return response;
    }

    let repo = CourseRepository::new((*state.db).clone());
    match repo.soft_delete(id).await {
        Ok(()) => {
            info!(course_id = %id, "Course deactivated");
            (
                StatusCode::OK,
                Json(json!({ "message": "Course deleted successfully" })),
            )
                .into_response()
        }
        Err(e) => course_error(&e),
    }
}

/// POST /registrar/courses/{id}/enroll - Enroll a student.
///
/// Enrollment past the limit fails with a capacity error.
async fn enroll_student(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<RosterRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(EDIT_ROLES) {
        return response;
    }

    let repo = CourseRepository::new((*state.db).clone());
    match repo.enroll_student(id, &payload.student_number).await {
        Ok(entry) => {
            info!(course_id = %id, student = %payload.student_number, "Student enrolled");
            (StatusCode::CREATED, Json(json!({ "enrollment": entry }))).into_response()
        }
        Err(e) => course_error(&e),
    }
}

/// POST /registrar/courses/{id}/drop - Drop a student from the roster.
async fn drop_student(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<RosterRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(EDIT_ROLES) {
        return response;
    }

    let repo = CourseRepository::new((*state.db).clone());
    match repo.drop_student(id, &payload.student_number).await {
        Ok(entry) => {
            info!(course_id = %id, student = %payload.student_number, "Student dropped");
            (StatusCode::OK, Json(json!({ "enrollment": entry }))).into_response()
        }
        Err(e) => course_error(&e),
    }
}

/// GET /registrar/courses/stats - Registrar rollup.
async fn course_stats(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if let Err(response) = auth.require_role(VIEW_ROLES) {
        return response;
    }

    let repo = CourseRepository::new((*state.db).clone());
    match repo.stats().await {
        Ok(stats) => (
            StatusCode::OK,
            Json(json!({
                "total_courses": stats.total,
                "active_courses": stats.active,
                "total_capacity": stats.total_capacity,
                "total_enrolled": stats.total_enrolled,
            })),
        )
            .into_response(),
        Err(e) => course_error(&CourseError::Database(e)),
    }
}

/// POST /registrar/courses/bulk-update - Update many courses at once.
async fn bulk_update_courses(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<BulkUpdateCoursesRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(DELETE_ROLES) {
        return response;
    }

    if payload.ids.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "missing_ids",
                "message": "Course IDs array is required"
            })),
        )
            .into_response();
    }

    let repo = CourseRepository::new((*state.db).clone());
    let updates = CourseBulkUpdate {
        status: payload.updates.status,
        term: payload.updates.term,
        session: payload.updates.session,
    };

    match repo.bulk_update(&payload.ids, updates).await {
        Ok((matched, modified)) => {
            info!(matched, modified, "Bulk course update");
            (
                StatusCode::OK,
                Json(json!({ "matched_count": matched, "modified_count": modified })),
            )
                .into_response()
        }
        Err(e) => course_error(&CourseError::Database(e)),
    }
}

/// GET /registrar/courses/export - Export matching courses.
async fn export_courses(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ExportQuery>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(VIEW_ROLES) {
        return response;
    }

    let repo = CourseRepository::new((*state.db).clone());
    let filter = CourseFilter {
        term: query.term,
        session: query.session,
        academic_year: None,
        status: query.status,
        instructor_email: None,
        search: query.search,
    };

    let courses = match repo.export(&filter).await {
        Ok(courses) => courses,
        Err(e) => return course_error(&CourseError::Database(e)),
    };

    if query.format.as_deref() == Some("csv") {
        let mut csv = CsvBuilder::new(&[
            "Course Code",
            "Title",
            "Credits",
            "Term",
            "Session",
            "Academic Year",
            "Instructor",
            "Enrollment Limit",
            "Status",
        ]);
        for course in &courses {
            csv.row([
                course.course_code.clone(),
                course.title.clone(),
                course.credits.to_string(),
                course.term.clone(),
                course.session.clone(),
                course.academic_year.clone(),
                course.instructor_name.clone(),
                course.enrollment_limit.to_string(),
                course.status.to_value(),
            ]);
        }
        return csv_response("courses.csv", csv.finish());
    }

    (
        StatusCode::OK,
        Json(json!({ "count": courses.len(), "courses": courses })),
    )
        .into_response()
}

/// GET /registrar/student-history/by-student/{student_number} - Transcript.
async fn student_history(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(student_number): Path<String>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(VIEW_ROLES) {
        return response;
    }

    let repo = HistoryRepository::new((*state.db).clone());
    match repo.list_for_student(&student_number).await {
        Ok(records) => (
            StatusCode::OK,
            Json(json!({ "student_number": student_number, "records": records })),
        )
            .into_response(),
        Err(e) => history_error(&HistoryError::Database(e)),
    }
}

/// POST /registrar/student-history - Add a grade record.
async fn add_history_record(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<AddHistoryRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(EDIT_ROLES) {
        return response;
    }

    let repo = HistoryRepository::new((*state.db).clone());
    let input = CreateHistoryInput {
        student_number: payload.student_number,
        course_code: payload.course_code,
        course_title: payload.course_title,
        term: payload.term,
        session: payload.session,
        academic_year: payload.academic_year,
        grade: payload.grade,
        grade_points: payload.grade_points,
        credits: payload.credits,
        total_sessions: payload.total_sessions.unwrap_or(0),
        attended_sessions: payload.attended_sessions.unwrap_or(0),
        scores: payload.scores,
        status: payload.status.unwrap_or(HistoryStatus::Enrolled),
        instructor_name: payload.instructor_name,
        instructor_email: payload.instructor_email,
        comments: payload.comments,
        is_retake: payload.is_retake.unwrap_or(false),
        original_grade: payload.original_grade,
        is_transfer_credit: payload.is_transfer_credit.unwrap_or(false),
        transfer_institution: payload.transfer_institution,
    };

    match repo.create(input).await {
        Ok(record) => {
            info!(record_id = %record.id, "Academic history record added");
            (StatusCode::CREATED, Json(json!({ "record": record }))).into_response()
        }
        Err(e) => history_error(&HistoryError::Database(e)),
    }
}

/// PUT /registrar/student-history/{id} - Update a grade record.
async fn update_history_record(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateHistoryRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(EDIT_ROLES) {
        return response;
    }

    let repo = HistoryRepository::new((*state.db).clone());
    let input = UpdateHistoryInput {
        grade: payload.grade,
        grade_points: payload.grade_points,
        total_sessions: payload.total_sessions,
        attended_sessions: payload.attended_sessions,
        scores: payload.scores,
        status: payload.status,
        comments: payload.comments,
    };

    match repo.update(id, input).await {
        Ok(record) => {
            info!(record_id = %id, "Academic history record updated");
            (StatusCode::OK, Json(json!({ "record": record }))).into_response()
        }
        Err(e) => history_error(&e),
    }
}

/// GET /registrar/students/{student_number}/gpa - Recompute a GPA.
async fn student_gpa(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(student_number): Path<String>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(VIEW_ROLES) {
        return response;
    }

    let repo = HistoryRepository::new((*state.db).clone());
    match repo.gpa(&student_number).await {
        Ok(gpa) => (
            StatusCode::OK,
            Json(json!({ "student_number": student_number, "gpa": gpa })),
        )
            .into_response(),
        Err(e) => history_error(&HistoryError::Database(e)),
    }
}

/// GET /registrar/failing-grades - Records carrying failing grades.
async fn failing_grades(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if let Err(response) = auth.require_role(EDIT_ROLES) {
        return response;
    }

    let repo = HistoryRepository::new((*state.db).clone());
    match repo.failing_grades().await {
        Ok(records) => (
            StatusCode::OK,
            Json(json!({ "count": records.len(), "records": records })),
        )
            .into_response(),
        Err(e) => history_error(&HistoryError::Database(e)),
    }
}
