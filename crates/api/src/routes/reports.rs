//! Reports routes: cross-module rollups, templates and report metadata.
//!
//! Custom report definitions and schedules are metadata only; nothing here
//! executes them.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{Duration, Months, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use atrium_core::auth::UserRole;
use atrium_core::export::CsvBuilder;
use atrium_db::ReportRepository;

use crate::AppState;
use crate::middleware::auth::AuthUser;

use super::csv_response;

const REPORT_ROLES: &[UserRole] = &[
    UserRole::Admin,
    UserRole::Registrar,
    UserRole::Finance,
    UserRole::Instructor,
    UserRole::SalesRep,
    UserRole::Marketing,
];

/// Creates the reports router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/admissions", get(admissions_summary))
        .route("/reports/finance", get(finance_stats))
        .route("/reports/registrar", get(registrar_breakdown))
        .route("/reports/placement", get(placement_outcomes))
        .route("/reports/templates", get(report_templates))
        .route("/reports/custom", post(create_custom_report))
        .route("/reports/schedule", post(schedule_report))
        .route("/reports/export/{report}", get(export_report))
}

/// Inclusive date range accepted by every rollup.
#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    /// Range start.
    pub from: Option<NaiveDate>,
    /// Range end.
    pub to: Option<NaiveDate>,
}

/// Query parameters for report export.
#[derive(Debug, Deserialize)]
pub struct ExportReportQuery {
    /// `json` (default) or `csv`.
    pub format: Option<String>,
    /// Range start.
    pub from: Option<NaiveDate>,
    /// Range end.
    pub to: Option<NaiveDate>,
}

/// Request body for a custom report definition.
#[derive(Debug, Deserialize)]
pub struct CustomReportRequest {
    /// Report name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Source module.
    pub module: String,
    /// Saved filters blob.
    pub filters: Option<serde_json::Value>,
    /// Grouping keys.
    pub group_by: Option<Vec<String>>,
    /// Selected metrics.
    pub metrics: Option<Vec<String>>,
}

/// Request body for scheduling a report.
#[derive(Debug, Deserialize)]
pub struct ScheduleReportRequest {
    /// daily | weekly | monthly | quarterly.
    pub frequency: String,
    /// Recipient email addresses.
    pub recipients: Vec<String>,
    /// Output format.
    pub format: Option<String>,
    /// Which report to run.
    pub report_type: String,
    /// Saved filters blob.
    pub filters: Option<serde_json::Value>,
}

fn internal_error() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "internal_error", "message": "An error occurred" })),
    )
        .into_response()
}

/// GET /reports/admissions - Admissions summary rollup.
async fn admissions_summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DateRangeQuery>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(REPORT_ROLES) {
        return response;
    }

    let repo = ReportRepository::new((*state.db).clone());
    match repo.admissions_summary(query.from, query.to).await {
        Ok(summary) => (
            StatusCode::OK,
            Json(json!({
                "total_students": summary.total_students,
                "enrolled": summary.enrolled,
                "prospective": summary.prospective,
                "graduated": summary.graduated,
                "new_in_range": summary.new_in_range,
                "program_distribution": summary
                    .by_program
                    .iter()
                    .map(|(program, count)| json!({ "program": program, "count": count }))
                    .collect::<Vec<_>>(),
                "campus_distribution": summary
                    .by_campus
                    .iter()
                    .map(|(campus, count)| json!({ "campus": campus, "count": count }))
                    .collect::<Vec<_>>(),
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to build admissions summary");
            internal_error()
        }
    }
}

/// GET /reports/finance - Finance rollup.
async fn finance_stats(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DateRangeQuery>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(REPORT_ROLES) {
        return response;
    }

    let repo = ReportRepository::new((*state.db).clone());
    match repo.finance_stats(query.from, query.to).await {
        Ok(stats) => (
            StatusCode::OK,
            Json(json!({
                "total_charges": stats.total_charges,
                "total_payments": stats.total_payments,
                "outstanding": stats.outstanding,
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to build finance stats");
            internal_error()
        }
    }
}

/// GET /reports/registrar - Registrar breakdown with average GPA.
async fn registrar_breakdown(
    State(state): State<AppState>,
    auth: AuthUser,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(REPORT_ROLES) {
        return response;
    }

    let repo = ReportRepository::new((*state.db).clone());
    let breakdown = match repo.registrar_breakdown().await {
        Ok(breakdown) => breakdown,
        Err(e) => {
            error!(error = %e, "Failed to build registrar breakdown");
            return internal_error();
        }
    };
    let average_gpa = match repo.average_gpa().await {
        Ok(gpa) => gpa,
        Err(e) => {
            error!(error = %e, "Failed to compute average GPA");
            return internal_error();
        }
    };

    (
        StatusCode::OK,
        Json(json!({
            "total_courses": breakdown.total_courses,
            "active_courses": breakdown.active_courses,
            "total_capacity": breakdown.total_capacity,
            "total_enrolled": breakdown.total_enrolled,
            "completed_records": breakdown.completed_records,
            "completion_rate": breakdown.completion_rate,
            "average_gpa": average_gpa,
        })),
    )
        .into_response()
}

/// GET /reports/placement - Placement outcomes rollup.
async fn placement_outcomes(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DateRangeQuery>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(REPORT_ROLES) {
        return response;
    }

    let repo = ReportRepository::new((*state.db).clone());
    match repo.placement_outcomes(query.from, query.to).await {
        Ok(outcomes) => (
            StatusCode::OK,
            Json(json!({
                "total": outcomes.total,
                "employed": outcomes.employed,
                "employment_rate": outcomes.employment_rate,
                "average_salary": outcomes.average_salary,
                "industry_breakdown": outcomes
                    .by_industry
                    .iter()
                    .map(|(industry, count)| json!({ "industry": industry, "count": count }))
                    .collect::<Vec<_>>(),
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to build placement outcomes");
            internal_error()
        }
    }
}

/// GET /reports/templates - Static report template metadata.
async fn report_templates(auth: AuthUser) -> impl IntoResponse {
    if let Err(response) = auth.require_role(REPORT_ROLES) {
        return response;
    }

    (
        StatusCode::OK,
        Json(json!({
            "templates": [
                {
                    "id": "admissions_summary",
                    "name": "Admissions Summary",
                    "description": "Overview of student enrollment and demographics",
                    "module": "admissions",
                    "metrics": ["total_students", "enrollment_rate", "program_distribution"],
                },
                {
                    "id": "finance_overview",
                    "name": "Finance Overview",
                    "description": "Financial performance and transaction analysis",
                    "module": "finance",
                    "metrics": ["total_charges", "total_payments", "outstanding"],
                },
                {
                    "id": "academic_performance",
                    "name": "Academic Performance",
                    "description": "Student grades and program performance",
                    "module": "registrar",
                    "metrics": ["average_gpa", "completion_rate", "grade_distribution"],
                },
                {
                    "id": "placement_outcomes",
                    "name": "Placement Outcomes",
                    "description": "Job placement and employment statistics",
                    "module": "placement",
                    "metrics": ["employment_rate", "average_salary", "industry_breakdown"],
                },
            ]
        })),
    )
        .into_response()
}

/// POST /reports/custom - Save a custom report definition (metadata only).
async fn create_custom_report(
    auth: AuthUser,
    Json(payload): Json<CustomReportRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(&[UserRole::Admin, UserRole::Registrar, UserRole::Finance]) {
        return response;
    }

    let definition = json!({
        "id": Uuid::new_v4(),
        "name": payload.name,
        "description": payload.description,
        "module": payload.module,
        "filters": payload.filters,
        "group_by": payload.group_by,
        "metrics": payload.metrics,
        "created_by": auth.user_id(),
        "created_at": Utc::now(),
    });

    info!(user_id = %auth.user_id(), "Custom report defined");

    (
        StatusCode::CREATED,
        Json(json!({
            "message": "Custom report created successfully",
            "report": definition,
        })),
    )
        .into_response()
}

/// POST /reports/schedule - Save a report schedule (metadata only).
async fn schedule_report(
    auth: AuthUser,
    Json(payload): Json<ScheduleReportRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(&[UserRole::Admin, UserRole::Registrar, UserRole::Finance]) {
        return response;
    }

    let now = Utc::now();
    let next_run = match payload.frequency.as_str() {
        "daily" => Some(now + Duration::days(1)),
        "weekly" => Some(now + Duration::weeks(1)),
        "monthly" => now.checked_add_months(Months::new(1)),
        "quarterly" => now.checked_add_months(Months::new(3)),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_frequency",
                    "message": "Frequency must be daily, weekly, monthly or quarterly"
                })),
            )
                .into_response();
        }
    };

    let schedule = json!({
        "id": Uuid::new_v4(),
        "frequency": payload.frequency,
        "recipients": payload.recipients,
        "format": payload.format.unwrap_or_else(|| "json".to_string()),
        "report_type": payload.report_type,
        "filters": payload.filters,
        "created_by": auth.user_id(),
        "created_at": now,
        "next_run": next_run,
    });

    info!(user_id = %auth.user_id(), "Report scheduled");

    (
        StatusCode::CREATED,
        Json(json!({
            "message": "Report scheduled successfully",
            "schedule": schedule,
        })),
    )
        .into_response()
}

/// GET /reports/export/{report} - Export a rollup as JSON or CSV.
async fn export_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(report): Path<String>,
    Query(query): Query<ExportReportQuery>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(REPORT_ROLES) {
        return response;
    }

    let repo = ReportRepository::new((*state.db).clone());
    match report.as_str() {
        "admissions" => {
            let summary = match repo.admissions_summary(query.from, query.to).await {
                Ok(summary) => summary,
                Err(e) => {
                    error!(error = %e, "Failed to export admissions report");
                    return internal_error();
                }
            };
            if query.format.as_deref() == Some("csv") {
                let mut csv = CsvBuilder::new(&["Metric", "Value"]);
                csv.row(["Total Students".to_string(), summary.total_students.to_string()]);
                csv.row(["Enrolled".to_string(), summary.enrolled.to_string()]);
                csv.row(["Prospective".to_string(), summary.prospective.to_string()]);
                csv.row(["Graduated".to_string(), summary.graduated.to_string()]);
                csv.row(["New In Range".to_string(), summary.new_in_range.to_string()]);
                return csv_response("admissions_report.csv", csv.finish());
            }
            (
                StatusCode::OK,
                Json(json!({
                    "total_students": summary.total_students,
                    "enrolled": summary.enrolled,
                    "prospective": summary.prospective,
                    "graduated": summary.graduated,
                    "new_in_range": summary.new_in_range,
                })),
            )
                .into_response()
        }
        "finance" => {
            let stats = match repo.finance_stats(query.from, query.to).await {
                Ok(stats) => stats,
                Err(e) => {
                    error!(error = %e, "Failed to export finance report");
                    return internal_error();
                }
            };
            if query.format.as_deref() == Some("csv") {
                let mut csv = CsvBuilder::new(&["Metric", "Value"]);
                csv.row(["Total Charges".to_string(), stats.total_charges.to_string()]);
                csv.row(["Total Payments".to_string(), stats.total_payments.to_string()]);
                csv.row(["Outstanding".to_string(), stats.outstanding.to_string()]);
                return csv_response("finance_report.csv", csv.finish());
            }
            (
                StatusCode::OK,
                Json(json!({
                    "total_charges": stats.total_charges,
                    "total_payments": stats.total_payments,
                    "outstanding": stats.outstanding,
                })),
            )
                .into_response()
        }
        "placement" => {
            let outcomes = match repo.placement_outcomes(query.from, query.to).await {
                Ok(outcomes) => outcomes,
                Err(e) => {
                    error!(error = %e, "Failed to export placement report");
                    return internal_error();
                }
            };
            if query.format.as_deref() == Some("csv") {
                let mut csv = CsvBuilder::new(&["Metric", "Value"]);
                csv.row(["Total Placements".to_string(), outcomes.total.to_string()]);
                csv.row(["Employed".to_string(), outcomes.employed.to_string()]);
                csv.row(["Employment Rate".to_string(), outcomes.employment_rate.to_string()]);
                return csv_response("placement_report.csv", csv.finish());
            }
            (
                StatusCode::OK,
                Json(json!({
                    "total": outcomes.total,
                    "employed": outcomes.employed,
                    "employment_rate": outcomes.employment_rate,
                })),
            )
                .into_response()
        }
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Unknown report. Expected admissions, finance or placement."
            })),
        )
            .into_response(),
    }
}
