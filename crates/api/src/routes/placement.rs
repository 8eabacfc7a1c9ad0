//! Placement routes: employment records, verification, interviews and
//! stats.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::ActiveEnum;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use atrium_core::auth::UserRole;
use atrium_core::export::CsvBuilder;
use atrium_db::PlacementRepository;
use atrium_db::entities::sea_orm_active_enums::{
    InterviewKind, InterviewOutcome, JobType, PlacementStatus, SalaryType, VerificationMethod,
};
use atrium_db::repositories::placement::{
    CreateInterviewInput, CreatePlacementInput, PlacementBulkUpdate, PlacementError,
    PlacementFilter, PlacementSortKey, UpdatePlacementInput,
};
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

const EDIT_ROLES: &[UserRole] = &[UserRole::Admin, UserRole::Registrar, UserRole::Marketing];

/// Creates the placement router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/placement/placements", get(list_placements))
        .route("/placement/placements", post(create_placement))
        .route("/placement/placements/stats", get(placement_stats))
        .route("/placement/placements/employed", get(employed_students))
        .route("/placement/placements/pending", get(pending_applications))
        .route("/placement/placements/export", get(export_placements))
        .route("/placement/placements/bulk-update", post(bulk_update_placements))
        .route("/placement/placements/{id}", get(get_placement))
        .route("/placement/placements/{id}", put(update_placement))
        .route("/placement/placements/{id}", delete(delete_placement))
        .route("/placement/placements/{id}/verify", post(verify_placement))
        .route("/placement/placements/{id}/interview", post(add_interview))
}

/// Query parameters for listing placements.
#[derive(Debug, Deserialize)]
pub struct ListPlacementsQuery {
    /// Filter by student number.
    pub student_number: Option<String>,
    /// Filter by status.
    pub status: Option<PlacementStatus>,
    /// Filter by job type.
    pub job_type: Option<JobType>,
    /// Filter by verification flag.
    pub verified: Option<bool>,
    /// Inclusive start-date range start.
    pub from: Option<NaiveDate>,
    /// Inclusive start-date range end.
    pub to: Option<NaiveDate>,
    /// Substring search over company and title.
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

/// Request body for creating a placement.
#[derive(Debug, Deserialize)]
pub struct CreatePlacementRequest {
    /// Student number.
    pub student_number: String,
    /// Company name.
    pub company_name: String,
    /// Company industry.
    pub company_industry: Option<String>,
    /// Company size bracket.
    pub company_size: Option<String>,
    /// Company website.
    pub company_website: Option<String>,
    /// Company address blob.
    pub company_address: Option<serde_json::Value>,
    /// Job title.
    pub job_title: String,
    /// Job type.
    pub job_type: JobType,
    /// Department.
    pub department: Option<String>,
    /// Start date.
    pub start_date: NaiveDate,
    /// End date.
    pub end_date: Option<NaiveDate>,
    /// Hours per week.
    pub hours_per_week: Option<i32>,
    /// Salary amount.
    pub salary_amount: Option<Decimal>,
    /// Salary structure.
    pub salary_type: Option<SalaryType>,
    /// Salary currency.
    pub salary_currency: Option<String>,
    /// Benefits blob.
    pub benefits: Option<serde_json::Value>,
    /// Status, defaults to Applied.
    pub status: Option<PlacementStatus>,
    /// Application date.
    pub application_date: Option<NaiveDate>,
    /// Employer contact name.
    pub contact_name: String,
    /// Employer contact title.
    pub contact_title: Option<String>,
    /// Employer contact email.
    pub contact_email: String,
    /// Employer contact phone.
    pub contact_phone: Option<String>,
    /// How the application was made.
    pub application_method: Option<String>,
    /// Resume submitted.
    pub resume_submitted: Option<bool>,
    /// Cover letter submitted.
    pub cover_letter_submitted: Option<bool>,
    /// Notes.
    pub notes: Option<String>,
}

/// Request body for updating a placement.
#[derive(Debug, Deserialize)]
pub struct UpdatePlacementRequest {
    /// Job title.
    pub job_title: Option<String>,
    /// Job type.
    pub job_type: Option<JobType>,
    /// Status.
    pub status: Option<PlacementStatus>,
    /// Start date.
    pub start_date: Option<NaiveDate>,
    /// End date.
    pub end_date: Option<NaiveDate>,
    /// Hours per week.
    pub hours_per_week: Option<i32>,
    /// Salary amount.
    pub salary_amount: Option<Decimal>,
    /// Salary structure.
    pub salary_type: Option<SalaryType>,
    /// Performance rating, 1-5.
    pub performance_rating: Option<i32>,
    /// Performance feedback.
    pub performance_feedback: Option<String>,
    /// Notes.
    pub notes: Option<String>,
}

/// Request body for verifying a placement.
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    /// Verification method.
    pub method: VerificationMethod,
    /// Verification source.
    pub source: Option<String>,
}

/// Request body for logging an interview.
#[derive(Debug, Deserialize)]
pub struct InterviewRequest {
    /// When the interview happens.
    pub interview_date: DateTime<Utc>,
    /// Format.
    pub kind: InterviewKind,
    /// Interviewer name.
    pub interviewer: Option<String>,
    /// Notes.
    pub notes: Option<String>,
    /// Outcome, defaults to Pending.
    pub outcome: Option<InterviewOutcome>,
}

/// Request body for bulk updates.
#[derive(Debug, Deserialize)]
pub struct BulkUpdatePlacementsRequest {
    /// Target placement ids.
    pub ids: Vec<Uuid>,
    /// Fields to apply.
    pub updates: BulkPlacementFields,
}

/// Allow-listed bulk update fields.
#[derive(Debug, Deserialize)]
pub struct BulkPlacementFields {
    /// New status.
    pub status: Option<PlacementStatus>,
    /// New verification flag.
    pub verified: Option<bool>,
}

/// Query parameters for export.
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    /// `json` (default) or `csv`.
    pub format: Option<String>,
    /// Filter by status.
    pub status: Option<PlacementStatus>,
    /// Filter by job type.
    pub job_type: Option<JobType>,
    /// Filter by verification flag.
    pub verified: Option<bool>,
    /// Substring search.
    pub search: Option<String>,
}

fn error_response(e: &PlacementError) -> axum::response::Response {
    match e {
        PlacementError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "not_found", "message": "Placement not found" })),
        )
            .into_response(),
        PlacementError::Database(err) => {
            error!(error = %err, "Database error in placement");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal_error", "message": "An error occurred" })),
            )
                .into_response()
        }
    }
}

/// GET /placement/placements - List placements.
async fn list_placements(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListPlacementsQuery>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(VIEW_ROLES) {
        return response;
    }

    let repo = PlacementRepository::new((*state.db).clone());
    let filter = PlacementFilter {
        student_number: query.student_number,
        status: query.status,
        job_type: query.job_type,
        verified: query.verified,
        from: query.from,
        to: query.to,
        search: query.search,
    };
    let sort = PlacementSortKey::parse(query.sort_by.as_deref().unwrap_or_default());
    let order = parse_sort_order(query.sort_order.as_deref());
    let page = PageRequest {
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    };

    match repo.list(&filter, sort, order, &page).await {
        Ok((placements, total)) => {
            Json(PageResponse::new(placements, page.page, page.per_page, total)).into_response()
        }
        Err(e) => error_response(&PlacementError::Database(e)),
    }
}

/// GET /placement/placements/{id} - Fetch one placement with interviews.
async fn get_placement(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(VIEW_ROLES) {
        return response;
    }

    let repo = PlacementRepository::new((*state.db).clone());
    let placement = match repo.find_by_id(id).await {
        Ok(Some(placement)) => placement,
        Ok(None) => return error_response(&PlacementError::NotFound(id)),
        Err(e) => return error_response(&PlacementError::Database(e)),
    };

    let interviews = match repo.interviews(id).await {
        Ok(interviews) => interviews,
        Err(e) => return error_response(&PlacementError::Database(e)),
    };

    (
        StatusCode::OK,
        Json(json!({ "placement": placement, "interviews": interviews })),
    )
        .into_response()
}

/// POST /placement/placements - Create a placement.
async fn create_placement(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreatePlacementRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(EDIT_ROLES) {
        return response;
    }

    let repo = PlacementRepository::new((*state.db).clone());
    let input = CreatePlacementInput {
        student_number: payload.student_number,
        company_name: payload.company_name,
        company_industry: payload.company_industry,
        company_size: payload.company_size,
        company_website: payload.company_website,
        company_address: payload.company_address,
        job_title: payload.job_title,
        job_type: payload.job_type,
        department: payload.department,
        start_date: payload.start_date,
        end_date: payload.end_date,
        hours_per_week: payload.hours_per_week,
        salary_amount: payload.salary_amount,
        salary_type: payload.salary_type,
        salary_currency: payload.salary_currency,
        benefits: payload.benefits,
        status: payload.status.unwrap_or(PlacementStatus::Applied),
        application_date: payload.application_date,
        contact_name: payload.contact_name,
        contact_title: payload.contact_title,
        contact_email: payload.contact_email,
        contact_phone: payload.contact_phone,
        application_method: payload.application_method,
        resume_submitted: payload.resume_submitted.unwrap_or(false),
        cover_letter_submitted: payload.cover_letter_submitted.unwrap_or(false),
        notes: payload.notes,
        created_by: Some(auth.user_id()),
    };

    match repo.create(input).await {
        Ok(placement) => {
            info!(placement_id = %placement.id, "Placement created");
            (StatusCode::CREATED, Json(json!({ "placement": placement }))).into_response()
        }
        Err(e) => error_response(&PlacementError::Database(e)),
    }
}

/// PUT /placement/placements/{id} - Update a placement.
async fn update_placement(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePlacementRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(EDIT_ROLES) {
        return response;
    }

    let repo = PlacementRepository::new((*state.db).clone());
    let input = UpdatePlacementInput {
        job_title: payload.job_title,
        job_type: payload.job_type,
        status: payload.status,
        start_date: payload.start_date,
        end_date: payload.end_date,
        hours_per_week: payload.hours_per_week,
        salary_amount: payload.salary_amount,
        salary_type: payload.salary_type,
        performance_rating: payload.performance_rating,
        performance_feedback: payload.performance_feedback,
        notes: payload.notes,
    };

    match repo.update(id, input).await {
        Ok(placement) => {
            info!(placement_id = %id, "Placement updated");
            (StatusCode::OK, Json(json!({ "placement": placement }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// DELETE /placement/placements/{id} - Soft-delete a placement.
async fn delete_placement(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(&[UserRole::Admin]) {
        return response;
    }

    let repo = PlacementRepository::new((*state.db).clone());
    match repo.soft_delete(id).await {
        Ok(()) => {
            info!(placement_id = %id, "Placement deactivated");
            (
                StatusCode::OK,
                Json(json!({ "message": "Placement deleted successfully" })),
            )
                .into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// GET /placement/placements/employed - Verified employed placements.
async fn employed_students(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if let Err(response) = auth.require_role(VIEW_ROLES) {
        return response;
    }

    let repo = PlacementRepository::new((*state.db).clone());
    match repo.employed().await {
        Ok(placements) => (
            StatusCode::OK,
            Json(json!({ "count": placements.len(), "placements": placements })),
        )
            .into_response(),
        Err(e) => error_response(&PlacementError::Database(e)),
    }
}

/// GET /placement/placements/pending - Applications in flight.
async fn pending_applications(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if let Err(response) = auth.require_role(VIEW_ROLES) {
        return response;
    }

    let repo = PlacementRepository::new((*state.db).clone());
    match repo.pending().await {
        Ok(placements) => (
            StatusCode::OK,
            Json(json!({ "count": placements.len(), "placements": placements })),
        )
            .into_response(),
        Err(e) => error_response(&PlacementError::Database(e)),
    }
}

/// POST /placement/placements/{id}/verify - Verify a placement.
async fn verify_placement(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<VerifyRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(EDIT_ROLES) {
        return response;
    }

    let repo = PlacementRepository::new((*state.db).clone());
    match repo.verify(id, payload.method, payload.source).await {
        Ok(placement) => {
            info!(placement_id = %id, "Placement verified");
            (StatusCode::OK, Json(json!({ "placement": placement }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// POST /placement/placements/{id}/interview - Log an interview.
async fn add_interview(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<InterviewRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(EDIT_ROLES) {
        return response;
    }

    let repo = PlacementRepository::new((*state.db).clone());
    let input = CreateInterviewInput {
        interview_date: payload.interview_date,
        kind: payload.kind,
        interviewer: payload.interviewer,
        notes: payload.notes,
        outcome: payload.outcome,
    };

    match repo.add_interview(id, input).await {
        Ok(interview) => {
            info!(placement_id = %id, "Interview logged");
            (StatusCode::CREATED, Json(json!({ "interview": interview }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// GET /placement/placements/stats - Placement rollup.
async fn placement_stats(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if let Err(response) = auth.require_role(VIEW_ROLES) {
        return response;
    }

    let repo = PlacementRepository::new((*state.db).clone());
    match repo.stats().await {
        Ok(stats) => (
            StatusCode::OK,
            Json(json!({
                "total": stats.total,
                "employed": stats.employed,
                "employment_rate": stats.employment_rate,
                "average_salary": stats.average_salary,
                "industry_breakdown": stats
                    .by_industry
                    .iter()
                    .map(|(industry, count)| json!({ "industry": industry, "count": count }))
                    .collect::<Vec<_>>(),
            })),
        )
            .into_response(),
        Err(e) => error_response(&PlacementError::Database(e)),
    }
}

/// POST /placement/placements/bulk-update - Update many at once.
async fn bulk_update_placements(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<BulkUpdatePlacementsRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(EDIT_ROLES) {
        return response;
    }

    if payload.ids.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "missing_ids",
                "message": "Placement IDs array is required"
            })),
        )
            .into_response();
    }

    let repo = PlacementRepository::new((*state.db).clone());
    let updates = PlacementBulkUpdate {
        status: payload.updates.status,
        verified: payload.updates.verified,
    };

    match repo.bulk_update(&payload.ids, updates).await {
        Ok((matched, modified)) => {
            info!(matched, modified, "Bulk placement update");
            (
                StatusCode::OK,
                Json(json!({ "matched_count": matched, "modified_count": modified })),
            )
                .into_response()
        }
        Err(e) => error_response(&PlacementError::Database(e)),
    }
}

/// GET /placement/placements/export - Export matching placements.
async fn export_placements(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ExportQuery>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(VIEW_ROLES) {
        return response;
    }

    let repo = PlacementRepository::new((*state.db).clone());
    let filter = PlacementFilter {
        status: query.status,
        job_type: query.job_type,
        verified: query.verified,
        search: query.search,
        ..PlacementFilter::default()
    };

    let placements = match repo.export(&filter).await {
        Ok(placements) => placements,
        Err(e) => return error_response(&PlacementError::Database(e)),
    };

    if query.format.as_deref() == Some("csv") {
        let mut csv = CsvBuilder::new(&[
            "Student Number",
            "Company",
            "Job Title",
            "Job Type",
            "Status",
            "Start Date",
            "Salary",
            "Verified",
        ]);
        for placement in &placements {
            csv.row([
                placement.student_number.clone(),
                placement.company_name.clone(),
                placement.job_title.clone(),
                placement.job_type.to_value(),
                placement.status.to_value(),
                placement.start_date.to_string(),
                placement
                    .salary_amount
                    .map(|amount| amount.to_string())
                    .unwrap_or_default(),
                placement.verified.to_string(),
            ]);
        }
        return csv_response("placements.csv", csv.finish());
    }

    (
        StatusCode::OK,
        Json(json!({ "count": placements.len(), "placements": placements })),
    )
        .into_response()
}
