//! Admissions routes: student CRUD, stats, bulk update and export.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use atrium_core::auth::UserRole;
use atrium_core::export::CsvBuilder;
use atrium_db::entities::sea_orm_active_enums::{
    EnrollmentStatus, FundingSource, LeadSource, NotificationKind, StudentStatus,
};
use atrium_db::repositories::notification::CreateNotificationInput;
use atrium_db::repositories::student::{
    CreateStudentInput, StudentBulkUpdate, StudentError, StudentFilter, StudentSortKey,
    UpdateStudentInput,
};
use atrium_db::{NotificationRepository, StudentRepository};
use atrium_shared::types::pagination::{PageRequest, PageResponse};
use sea_orm::ActiveEnum;

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

const EDIT_ROLES: &[UserRole] = &[UserRole::Admin, UserRole::Registrar, UserRole::SalesRep];

const DELETE_ROLES: &[UserRole] = &[UserRole::Admin];

/// Creates the admissions router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admissions/students", get(list_students))
        .route("/admissions/students", post(create_student))
        .route("/admissions/students/stats", get(student_stats))
        .route("/admissions/students/export", get(export_students))
        .route("/admissions/students/bulk-update", post(bulk_update_students))
        .route("/admissions/students/{id}", get(get_student))
        .route("/admissions/students/{id}", put(update_student))
        .route("/admissions/students/{id}", delete(delete_student))
}

/// Query parameters for listing students.
#[derive(Debug, Deserialize)]
pub struct ListStudentsQuery {
    /// Filter by status.
    pub status: Option<StudentStatus>,
    /// Filter by program.
    pub program: Option<String>,
    /// Filter by campus.
    pub campus: Option<String>,
    /// Filter by session.
    pub session: Option<String>,
    /// Substring search over name, number and email.
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

/// Request body for creating a student.
#[derive(Debug, Deserialize)]
pub struct CreateStudentRequest {
    /// Explicit student number; assigned when omitted.
    pub student_number: Option<String>,
    /// Full name.
    pub name: String,
    /// Email.
    pub email: String,
    /// Phone.
    pub phone: Option<String>,
    /// Date of birth.
    pub date_of_birth: Option<NaiveDate>,
    /// Gender.
    pub gender: Option<String>,
    /// Campus.
    pub campus: String,
    /// Program.
    pub program: String,
    /// Session.
    pub session: String,
    /// First term date.
    pub first_term: NaiveDate,
    /// Expected graduation.
    pub expected_graduation: Option<NaiveDate>,
    /// Status, defaults to Prospective.
    pub status: Option<StudentStatus>,
    /// Enrollment modality, defaults to Full-time.
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

/// Request body for updating a student.
#[derive(Debug, Deserialize)]
pub struct UpdateStudentRequest {
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
    /// Expected graduation.
    pub expected_graduation: Option<NaiveDate>,
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

/// Request body for bulk updates.
#[derive(Debug, Deserialize)]
pub struct BulkUpdateRequest {
    /// Target student ids.
    pub ids: Vec<Uuid>,
    /// Fields to apply.
    pub updates: BulkUpdateFields,
}

/// Allow-listed bulk update fields.
#[derive(Debug, Deserialize)]
pub struct BulkUpdateFields {
    /// New status.
    pub status: Option<StudentStatus>,
    /// New campus.
    pub campus: Option<String>,
    /// New session.
    pub session: Option<String>,
    /// New cohort group.
    pub cohort_group: Option<String>,
}

/// Query parameters for export.
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    /// `json` (default) or `csv`.
    pub format: Option<String>,
    /// Filter by status.
    pub status: Option<StudentStatus>,
    /// Filter by program.
    pub program: Option<String>,
    /// Filter by campus.
    pub campus: Option<String>,
    /// Filter by session.
    pub session: Option<String>,
    /// Substring search.
    pub search: Option<String>,
}

fn error_response(e: &StudentError) -> axum::response::Response {
    match e {
        StudentError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "not_found", "message": "Student not found" })),
        )
            .into_response(),
        StudentError::Duplicate => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "duplicate_student",
                "message": "Student with this email or student number already exists"
            })),
        )
            .into_response(),
        StudentError::Database(err) => {
            error!(error = %err, "Database error in admissions");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal_error", "message": "An error occurred" })),
            )
                .into_response()
        }
    }
}

/// GET /admissions/students - List students with filters and pagination.
async fn list_students(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListStudentsQuery>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(VIEW_ROLES) {
        return response;
    }

    let repo = StudentRepository::new((*state.db).clone());
    let filter = StudentFilter {
        status: query.status,
        program: query.program,
        campus: query.campus,
        session: query.session,
        search: query.search,
    };
    let sort = StudentSortKey::parse(query.sort_by.as_deref().unwrap_or_default());
    let order = parse_sort_order(query.sort_order.as_deref());
    let page = PageRequest {
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    };

    match repo.list(&filter, sort, order, &page).await {
        Ok((students, total)) => {
            Json(PageResponse::new(students, page.page, page.per_page, total)).into_response()
        }
        Err(e) => error_response(&StudentError::Database(e)),
    }
}

/// GET /admissions/students/{id} - Fetch one student.
async fn get_student(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(VIEW_ROLES) {
        return response;
    }

    let repo = StudentRepository::new((*state.db).clone());
    match repo.find_by_id(id).await {
        Ok(Some(student)) => (StatusCode::OK, Json(json!({ "student": student }))).into_response(),
        Ok(None) => error_response(&StudentError::NotFound(id)),
        Err(e) => error_response(&StudentError::Database(e)),
    }
}

/// POST /admissions/students - Create a student.
async fn create_student(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateStudentRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(EDIT_ROLES) {
        return response;
    }

    let repo = StudentRepository::new((*state.db).clone());
    let input = CreateStudentInput {
        student_number: payload.student_number,
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
        date_of_birth: payload.date_of_birth,
        gender: payload.gender,
        campus: payload.campus,
        program: payload.program,
        session: payload.session,
        first_term: payload.first_term,
        expected_graduation: payload.expected_graduation,
        status: payload.status.unwrap_or(StudentStatus::Prospective),
        enrollment_status: payload
            .enrollment_status
            .unwrap_or(EnrollmentStatus::FullTime),
        lead_source: payload.lead_source,
        cohort_group: payload.cohort_group,
        address: payload.address,
        emergency_contact: payload.emergency_contact,
        funding_source: payload.funding_source,
        notes: payload.notes,
    };

    match repo.create(input).await {
        Ok(student) => {
            info!(student_id = %student.id, number = %student.student_number, "Student created");

            let notifications = NotificationRepository::new((*state.db).clone());
            if let Err(e) = notifications
                .create(CreateNotificationInput {
                    title: "New student enrolled".to_string(),
                    message: format!("{} has been added to {}", student.name, student.program),
                    kind: NotificationKind::Success,
                    category: Some("Admissions".to_string()),
                    important: false,
                    user_id: None,
                })
                .await
            {
                error!(error = %e, "Failed to record admissions notification");
            }

            (StatusCode::CREATED, Json(json!({ "student": student }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// PUT /admissions/students/{id} - Update a student.
async fn update_student(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStudentRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(EDIT_ROLES) {
        return response;
    }

    let repo = StudentRepository::new((*state.db).clone());
    let input = UpdateStudentInput {
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
        campus: payload.campus,
        program: payload.program,
        session: payload.session,
        expected_graduation: payload.expected_graduation,
        status: payload.status,
        enrollment_status: payload.enrollment_status,
        lead_source: payload.lead_source,
        cohort_group: payload.cohort_group,
        address: payload.address,
        emergency_contact: payload.emergency_contact,
        funding_source: payload.funding_source,
        notes: payload.notes,
    };

    match repo.update(id, input).await {
        Ok(student) => {
            info!(student_id = %id, "Student updated");
            (StatusCode::OK, Json(json!({ "student": student }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// DELETE /admissions/students/{id} - Soft-delete a student.
async fn delete_student(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(DELETE_ROLES) {
        return response;
    }

    let repo = StudentRepository::new((*state.db).clone());
    match repo.soft_delete(id).await {
        Ok(()) => {
            info!(student_id = %id, "Student deactivated");
            (
                StatusCode::OK,
                Json(json!({ "message": "Student deleted successfully" })),
            )
                .into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// GET /admissions/students/stats - Admissions rollup.
async fn student_stats(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if let Err(response) = auth.require_role(VIEW_ROLES) {
        return response;
    }

    let repo = StudentRepository::new((*state.db).clone());
    match repo.stats().await {
        Ok(stats) => (
            StatusCode::OK,
            Json(json!({
                "overview": {
                    "total_students": stats.total,
                    "enrolled_students": stats.enrolled,
                    "prospective_students": stats.prospective,
                    "graduated_students": stats.graduated,
                },
                "program_distribution": stats
                    .by_program
                    .iter()
                    .map(|(program, count)| json!({ "program": program, "count": count }))
                    .collect::<Vec<_>>(),
                "campus_distribution": stats
                    .by_campus
                    .iter()
                    .map(|(campus, count)| json!({ "campus": campus, "count": count }))
                    .collect::<Vec<_>>(),
            })),
        )
            .into_response(),
        Err(e) => error_response(&StudentError::Database(e)),
    }
}

/// POST /admissions/students/bulk-update - Update many students at once.
async fn bulk_update_students(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<BulkUpdateRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(&[UserRole::Admin, UserRole::Registrar]) {
        return response;
    }

    if payload.ids.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "missing_ids",
                "message": "Student IDs array is required"
            })),
        )
            .into_response();
    }

    let repo = StudentRepository::new((*state.db).clone());
    let updates = StudentBulkUpdate {
        status: payload.updates.status,
        campus: payload.updates.campus,
        session: payload.updates.session,
        cohort_group: payload.updates.cohort_group,
    };

    match repo.bulk_update(&payload.ids, updates).await {
        Ok((matched, modified)) => {
            info!(matched, modified, "Bulk student update");
            (
                StatusCode::OK,
                Json(json!({ "matched_count": matched, "modified_count": modified })),
            )
                .into_response()
        }
        Err(e) => error_response(&StudentError::Database(e)),
    }
}

/// GET /admissions/students/export - Export matching students.
async fn export_students(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ExportQuery>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(VIEW_ROLES) {
        return response;
    }

    let repo = StudentRepository::new((*state.db).clone());
    let filter = StudentFilter {
        status: query.status,
        program: query.program,
        campus: query.campus,
        session: query.session,
        search: query.search,
    };

    let students = match repo.export(&filter).await {
        Ok(students) => students,
        Err(e) => return error_response(&StudentError::Database(e)),
    };

    if query.format.as_deref() == Some("csv") {
        let mut csv = CsvBuilder::new(&[
            "Student Number",
            "Name",
            "Email",
            "Phone",
            "Campus",
            "Program",
            "Session",
            "Status",
            "First Term",
        ]);
        for student in &students {
            csv.row([
                student.student_number.clone(),
                student.name.clone(),
                student.email.clone(),
                student.phone.clone().unwrap_or_default(),
                student.campus.clone(),
                student.program.clone(),
                student.session.clone(),
                student.status.to_value(),
                student.first_term.to_string(),
            ]);
        }
        return csv_response("students.csv", csv.finish());
    }

    (
        StatusCode::OK,
        Json(json!({ "count": students.len(), "students": students })),
    )
        .into_response()
}
