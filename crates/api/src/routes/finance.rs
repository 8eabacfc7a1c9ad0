//! Finance routes: student finance records, balances, overdue and stats.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::ActiveEnum;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use atrium_core::auth::UserRole;
use atrium_core::export::CsvBuilder;
use atrium_db::entities::sea_orm_active_enums::{
    FinanceCategory, FinanceStatus, FinanceType, FundingSource, NotificationKind, PaymentMethod,
};
use atrium_db::repositories::finance::{
    CreateFinanceRecordInput, FinanceBulkUpdate, FinanceError, FinanceFilter, FinanceSortKey,
    UpdateFinanceRecordInput,
};
use atrium_db::repositories::notification::CreateNotificationInput;
use atrium_db::{FinanceRepository, NotificationRepository};
use atrium_shared::types::pagination::{PageRequest, PageResponse};

use crate::AppState;
use crate::middleware::auth::AuthUser;

use super::{csv_response, parse_sort_order};

const FINANCE_ROLES: &[UserRole] = &[UserRole::Admin, UserRole::Finance];

/// Creates the finance router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/finance/records", get(list_records))
        .route("/finance/records", post(create_record))
        .route("/finance/records/stats", get(finance_stats))
        .route("/finance/records/overdue", get(overdue_records))
        .route("/finance/records/export", get(export_records))
        .route("/finance/records/bulk-update", post(bulk_update_records))
        .route("/finance/records/{id}", get(get_record))
        .route("/finance/records/{id}", put(update_record))
        .route("/finance/records/{id}", delete(delete_record))
        .route("/finance/students/{student_number}/balance", get(student_balance))
}

/// Query parameters for listing finance records.
#[derive(Debug, Deserialize)]
pub struct ListRecordsQuery {
    /// Filter by student number.
    pub student_number: Option<String>,
    /// Filter by record type.
    #[serde(rename = "type")]
    pub record_type: Option<FinanceType>,
    /// Filter by category.
    pub category: Option<FinanceCategory>,
    /// Filter by status.
    pub status: Option<FinanceStatus>,
    /// Filter by term.
    pub term: Option<String>,
    /// Inclusive date range start.
    pub from: Option<NaiveDate>,
    /// Inclusive date range end.
    pub to: Option<NaiveDate>,
    /// Inclusive minimum amount.
    pub min_amount: Option<Decimal>,
    /// Inclusive maximum amount.
    pub max_amount: Option<Decimal>,
    /// Substring search over reference and description.
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

/// Request body for creating a finance record.
#[derive(Debug, Deserialize)]
pub struct CreateRecordRequest {
    /// Student number.
    pub student_number: String,
    /// Record type.
    #[serde(rename = "type")]
    pub record_type: FinanceType,
    /// Category, defaults to Other.
    pub category: Option<FinanceCategory>,
    /// Amount, non-negative.
    pub amount: Decimal,
    /// Record date.
    pub record_date: NaiveDate,
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// Term.
    pub term: String,
    /// Session.
    pub session: String,
    /// Funding source.
    pub funding_source: Option<FundingSource>,
    /// Status, defaults to Pending.
    pub status: Option<FinanceStatus>,
    /// Payment method.
    pub payment_method: Option<PaymentMethod>,
    /// Check number.
    pub check_number: Option<String>,
    /// External processor transaction id.
    pub external_transaction_id: Option<String>,
    /// Description.
    pub description: String,
    /// Notes.
    pub notes: Option<String>,
    /// Recurring flag.
    pub is_recurring: Option<bool>,
    /// Recurrence frequency.
    pub recurring_frequency: Option<String>,
}

/// Request body for updating a finance record.
#[derive(Debug, Deserialize)]
pub struct UpdateRecordRequest {
    /// Amount.
    pub amount: Option<Decimal>,
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// Status.
    pub status: Option<FinanceStatus>,
    /// Payment method.
    pub payment_method: Option<PaymentMethod>,
    /// Description.
    pub description: Option<String>,
    /// Notes.
    pub notes: Option<String>,
}

/// Request body for bulk updates.
#[derive(Debug, Deserialize)]
pub struct BulkUpdateRecordsRequest {
    /// Target record ids.
    pub ids: Vec<Uuid>,
    /// Fields to apply.
    pub updates: BulkRecordFields,
}

/// Allow-listed bulk update fields.
#[derive(Debug, Deserialize)]
pub struct BulkRecordFields {
    /// New status.
    pub status: Option<FinanceStatus>,
    /// New category.
    pub category: Option<FinanceCategory>,
}

/// Query parameters for export and stats.
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    /// `json` (default) or `csv`.
    pub format: Option<String>,
    /// Filter by status.
    pub status: Option<FinanceStatus>,
    /// Filter by record type.
    #[serde(rename = "type")]
    pub record_type: Option<FinanceType>,
    /// Inclusive date range start.
    pub from: Option<NaiveDate>,
    /// Inclusive date range end.
    pub to: Option<NaiveDate>,
    /// Substring search.
    pub search: Option<String>,
}

fn error_response(e: &FinanceError) -> axum::response::Response {
    match e {
        FinanceError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "not_found", "message": "Finance record not found" })),
        )
            .into_response(),
        FinanceError::Database(err) => {
            error!(error = %err, "Database error in finance");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal_error", "message": "An error occurred" })),
            )
                .into_response()
        }
    }
}

/// GET /finance/records - List finance records.
async fn list_records(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListRecordsQuery>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(FINANCE_ROLES) {
        return response;
    }

    let repo = FinanceRepository::new((*state.db).clone());
    let filter = FinanceFilter {
        student_number: query.student_number,
        record_type: query.record_type,
        category: query.category,
        status: query.status,
        term: query.term,
        from: query.from,
        to: query.to,
        min_amount: query.min_amount,
        max_amount: query.max_amount,
        search: query.search,
    };
    let sort = FinanceSortKey::parse(query.sort_by.as_deref().unwrap_or_default());
    let order = parse_sort_order(query.sort_order.as_deref());
    let page = PageRequest {
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    };

    match repo.list(&filter, sort, order, &page).await {
        Ok((records, total)) => {
            Json(PageResponse::new(records, page.page, page.per_page, total)).into_response()
        }
        Err(e) => error_response(&FinanceError::Database(e)),
    }
}

/// GET /finance/records/{id} - Fetch one record.
async fn get_record(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(FINANCE_ROLES) {
        return response;
    }

    let repo = FinanceRepository::new((*state.db).clone());
    match repo.find_by_id(id).await {
        Ok(Some(record)) => (StatusCode::OK, Json(json!({ "record": record }))).into_response(),
        Ok(None) => error_response(&FinanceError::NotFound(id)),
        Err(e) => error_response(&FinanceError::Database(e)),
    }
}

/// POST /finance/records - Create a record with a generated reference.
async fn create_record(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateRecordRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(FINANCE_ROLES) {
        return response;
    }

    if payload.amount < Decimal::ZERO {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_amount",
                "message": "Amount cannot be negative"
            })),
        )
            .into_response();
    }

    let repo = FinanceRepository::new((*state.db).clone());
    let input = CreateFinanceRecordInput {
        student_number: payload.student_number,
        record_type: payload.record_type,
        category: payload.category.unwrap_or(FinanceCategory::Other),
        amount: payload.amount,
        record_date: payload.record_date,
        due_date: payload.due_date,
        term: payload.term,
        session: payload.session,
        funding_source: payload.funding_source,
        status: payload.status.unwrap_or(FinanceStatus::Pending),
        payment_method: payload.payment_method,
        check_number: payload.check_number,
        external_transaction_id: payload.external_transaction_id,
        description: payload.description,
        notes: payload.notes,
        is_recurring: payload.is_recurring.unwrap_or(false),
        recurring_frequency: payload.recurring_frequency,
    };

    match repo.create(input).await {
        Ok(record) => {
            info!(record_id = %record.id, reference = %record.reference_number, "Finance record created");

            if record.record_type == FinanceType::Payment {
                let notifications = NotificationRepository::new((*state.db).clone());
                if let Err(e) = notifications
                    .create(CreateNotificationInput {
                        title: "Payment received".to_string(),
                        message: format!(
                            "{} payment received from {}",
                            record.amount, record.student_number
                        ),
                        kind: NotificationKind::Info,
                        category: Some("Finance".to_string()),
                        important: false,
                        user_id: None,
                    })
                    .await
                {
                    error!(error = %e, "Failed to record finance notification");
                }
            }

            (StatusCode::CREATED, Json(json!({ "record": record }))).into_response()
        }
        Err(e) => error_response(&FinanceError::Database(e)),
    }
}

/// PUT /finance/records/{id} - Update a record.
async fn update_record(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRecordRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(FINANCE_ROLES) {
        return response;
    }

    let repo = FinanceRepository::new((*state.db).clone());
    let input = UpdateFinanceRecordInput {
        amount: payload.amount,
        due_date: payload.due_date,
        status: payload.status,
        payment_method: payload.payment_method,
        description: payload.description,
        notes: payload.notes,
        processed_by: Some(auth.user_id()),
    };

    match repo.update(id, input).await {
        Ok(record) => {
            info!(record_id = %id, "Finance record updated");
            (StatusCode::OK, Json(json!({ "record": record }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// DELETE /finance/records/{id} - Soft-delete a record.
async fn delete_record(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(&[UserRole::Admin]) {
        return response;
    }

    let repo = FinanceRepository::new((*state.db).clone());
    match repo.soft_delete(id).await {
        Ok(()) => {
            info!(record_id = %id, "Finance record deactivated");
            (
                StatusCode::OK,
                Json(json!({ "message": "Finance record deleted successfully" })),
            )
                .into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// GET /finance/students/{student_number}/balance - Outstanding balance.
async fn student_balance(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(student_number): Path<String>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(FINANCE_ROLES) {
        return response;
    }

    let repo = FinanceRepository::new((*state.db).clone());
    match repo.student_balance(&student_number).await {
        Ok(balance) => (
            StatusCode::OK,
            Json(json!({ "student_number": student_number, "balance": balance })),
        )
            .into_response(),
        Err(e) => error_response(&FinanceError::Database(e)),
    }
}

/// GET /finance/records/overdue - Pending records past their due date.
async fn overdue_records(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if let Err(response) = auth.require_role(FINANCE_ROLES) {
        return response;
    }

    let repo = FinanceRepository::new((*state.db).clone());
    match repo.overdue().await {
        Ok(records) => (
            StatusCode::OK,
            Json(json!({ "count": records.len(), "records": records })),
        )
            .into_response(),
        Err(e) => error_response(&FinanceError::Database(e)),
    }
}

/// GET /finance/records/stats - Finance rollup over a date range.
async fn finance_stats(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<RangeQuery>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(FINANCE_ROLES) {
        return response;
    }

    let repo = FinanceRepository::new((*state.db).clone());
    match repo.stats(query.from, query.to).await {
        Ok(stats) => (
            StatusCode::OK,
            Json(json!({
                "total_charges": stats.total_charges,
                "total_payments": stats.total_payments,
                "outstanding": stats.outstanding,
                "by_type": stats
                    .by_type
                    .iter()
                    .map(|(kind, total, count)| json!({
                        "type": kind.to_value(),
                        "total": total,
                        "count": count,
                    }))
                    .collect::<Vec<_>>(),
                "by_status": stats
                    .by_status
                    .iter()
                    .map(|(status, total, count)| json!({
                        "status": status.to_value(),
                        "total": total,
                        "count": count,
                    }))
                    .collect::<Vec<_>>(),
            })),
        )
            .into_response(),
        Err(e) => error_response(&FinanceError::Database(e)),
    }
}

/// POST /finance/records/bulk-update - Update many records at once.
async fn bulk_update_records(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<BulkUpdateRecordsRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(FINANCE_ROLES) {
        return response;
    }

    if payload.ids.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "missing_ids",
                "message": "Record IDs array is required"
            })),
        )
            .into_response();
    }

    let repo = FinanceRepository::new((*state.db).clone());
    let updates = FinanceBulkUpdate {
        status: payload.updates.status,
        category: payload.updates.category,
    };

    match repo.bulk_update(&payload.ids, updates).await {
        Ok((matched, modified)) => {
            info!(matched, modified, "Bulk finance update");
            (
                StatusCode::OK,
                Json(json!({ "matched_count": matched, "modified_count": modified })),
            )
                .into_response()
        }
        Err(e) => error_response(&FinanceError::Database(e)),
    }
}

/// GET /finance/records/export - Export matching records.
async fn export_records(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<RangeQuery>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(FINANCE_ROLES) {
        return response;
    }

    let repo = FinanceRepository::new((*state.db).clone());
    let filter = FinanceFilter {
        status: query.status,
        record_type: query.record_type,
        from: query.from,
        to: query.to,
        search: query.search,
        ..FinanceFilter::default()
    };

    let records = match repo.export(&filter).await {
        Ok(records) => records,
        Err(e) => return error_response(&FinanceError::Database(e)),
    };

    if query.format.as_deref() == Some("csv") {
        let mut csv = CsvBuilder::new(&[
            "Reference",
            "Student Number",
            "Type",
            "Category",
            "Amount",
            "Status",
            "Date",
            "Due Date",
            "Description",
        ]);
        for record in &records {
            csv.row([
                record.reference_number.clone(),
                record.student_number.clone(),
                record.record_type.to_value(),
                record.category.to_value(),
                record.amount.to_string(),
                record.status.to_value(),
                record.record_date.to_string(),
                record.due_date.map(|d| d.to_string()).unwrap_or_default(),
                record.description.clone(),
            ]);
        }
        return csv_response("finance_records.csv", csv.finish());
    }

    (
        StatusCode::OK,
        Json(json!({ "count": records.len(), "records": records })),
    )
        .into_response()
}
