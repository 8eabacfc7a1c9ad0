//! Accounting routes: transactions, approvals, reconciliation, ledger
//! balances and the audit trail.

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
use atrium_db::AccountingRepository;
use atrium_db::entities::sea_orm_active_enums::{
    AccountCategory, PaymentMethod, TxnStatus, TxnType,
};
use atrium_db::repositories::accounting::{
    AccountingError, CreateTransactionInput, TransactionBulkUpdate, TransactionFilter,
    TransactionSortKey, UpdateTransactionInput,
};
use atrium_shared::types::pagination::{PageRequest, PageResponse};

use crate::AppState;
use crate::middleware::auth::AuthUser;

use super::{csv_response, parse_sort_order};

const ACCOUNTING_ROLES: &[UserRole] = &[UserRole::Admin, UserRole::Finance];

/// Creates the accounting router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounting/transactions", get(list_transactions))
        .route("/accounting/transactions", post(create_transaction))
        .route("/accounting/transactions/stats", get(accounting_stats))
        .route("/accounting/transactions/pending", get(pending_transactions))
        .route("/accounting/transactions/overdue", get(overdue_transactions))
        .route("/accounting/transactions/unreconciled", get(unreconciled_transactions))
        .route("/accounting/transactions/export", get(export_transactions))
        .route("/accounting/transactions/bulk-update", post(bulk_update_transactions))
        .route("/accounting/transactions/{id}", get(get_transaction))
        .route("/accounting/transactions/{id}", put(update_transaction))
        .route("/accounting/transactions/{id}", delete(delete_transaction))
        .route("/accounting/transactions/{id}/approve", post(approve_transaction))
        .route("/accounting/transactions/{id}/reconcile", post(reconcile_transaction))
        .route("/accounting/transactions/{id}/dispute", post(dispute_transaction))
        .route("/accounting/balance/{ledger_code}", get(ledger_balance))
}

/// Query parameters for listing transactions.
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    /// Filter by student number.
    pub student_number: Option<String>,
    /// Filter by transaction type.
    #[serde(rename = "type")]
    pub txn_type: Option<TxnType>,
    /// Filter by status.
    pub status: Option<TxnStatus>,
    /// Filter by ledger code.
    pub ledger_code: Option<String>,
    /// Filter by account category.
    pub account_category: Option<AccountCategory>,
    /// Filter by reconciliation flag.
    pub reconciled: Option<bool>,
    /// Inclusive date range start.
    pub from: Option<NaiveDate>,
    /// Inclusive date range end.
    pub to: Option<NaiveDate>,
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

/// Request body for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    /// Student number.
    pub student_number: String,
    /// Transaction type.
    #[serde(rename = "type")]
    pub txn_type: TxnType,
    /// Amount, non-negative.
    pub amount: Decimal,
    /// Payment method.
    pub method: PaymentMethod,
    /// Ledger code.
    pub ledger_code: String,
    /// Account category.
    pub account_category: AccountCategory,
    /// Sub-category.
    pub sub_category: Option<String>,
    /// Status, defaults to Pending.
    pub status: Option<TxnStatus>,
    /// Transaction date.
    pub transaction_date: NaiveDate,
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// Term.
    pub term: Option<String>,
    /// Session.
    pub session: Option<String>,
    /// Academic year.
    pub academic_year: Option<String>,
    /// Payment reference.
    pub payment_reference: Option<String>,
    /// Check number.
    pub check_number: Option<String>,
    /// Last four card digits.
    pub card_last_four: Option<String>,
    /// Description.
    pub description: String,
    /// Notes.
    pub notes: Option<String>,
    /// Internal notes.
    pub internal_notes: Option<String>,
}

/// Request body for updating a transaction.
#[derive(Debug, Deserialize)]
pub struct UpdateTransactionRequest {
    /// Amount.
    pub amount: Option<Decimal>,
    /// Status.
    pub status: Option<TxnStatus>,
    /// Payment method.
    pub method: Option<PaymentMethod>,
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// Description.
    pub description: Option<String>,
    /// Notes.
    pub notes: Option<String>,
    /// Internal notes.
    pub internal_notes: Option<String>,
}

/// Request body for approving a transaction.
#[derive(Debug, Deserialize)]
pub struct ApproveRequest {
    /// Approval notes.
    pub notes: Option<String>,
}

/// Request body for disputing a transaction.
#[derive(Debug, Deserialize)]
pub struct DisputeRequest {
    /// Dispute reason.
    pub reason: String,
}

/// Request body for bulk updates.
#[derive(Debug, Deserialize)]
pub struct BulkUpdateTransactionsRequest {
    /// Target transaction ids.
    pub ids: Vec<Uuid>,
    /// Fields to apply.
    pub updates: BulkTransactionFields,
}

/// Allow-listed bulk update fields.
#[derive(Debug, Deserialize)]
pub struct BulkTransactionFields {
    /// New status.
    pub status: Option<TxnStatus>,
    /// New reconciliation flag.
    pub reconciled: Option<bool>,
}

/// Query parameters for the ledger balance endpoint.
#[derive(Debug, Deserialize)]
pub struct BalanceQuery {
    /// Account category for the normal-side rule.
    pub account_category: AccountCategory,
}

/// Query parameters for export and stats.
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    /// `json` (default) or `csv`.
    pub format: Option<String>,
    /// Filter by status.
    pub status: Option<TxnStatus>,
    /// Filter by transaction type.
    #[serde(rename = "type")]
    pub txn_type: Option<TxnType>,
    /// Inclusive date range start.
    pub from: Option<NaiveDate>,
    /// Inclusive date range end.
    pub to: Option<NaiveDate>,
    /// Substring search.
    pub search: Option<String>,
}

fn error_response(e: &AccountingError) -> axum::response::Response {
    match e {
        AccountingError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "not_found", "message": "Transaction not found" })),
        )
            .into_response(),
        AccountingError::Database(err) => {
            error!(error = %err, "Database error in accounting");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal_error", "message": "An error occurred" })),
            )
                .into_response()
        }
    }
}

/// GET /accounting/transactions - List transactions.
async fn list_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListTransactionsQuery>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(ACCOUNTING_ROLES) {
        return response;
    }

    let repo = AccountingRepository::new((*state.db).clone());
    let filter = TransactionFilter {
        student_number: query.student_number,
        txn_type: query.txn_type,
        status: query.status,
        ledger_code: query.ledger_code,
        account_category: query.account_category,
        reconciled: query.reconciled,
        from: query.from,
        to: query.to,
        search: query.search,
    };
    let sort = TransactionSortKey::parse(query.sort_by.as_deref().unwrap_or_default());
    let order = parse_sort_order(query.sort_order.as_deref());
    let page = PageRequest {
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    };

    match repo.list(&filter, sort, order, &page).await {
        Ok((transactions, total)) => {
            Json(PageResponse::new(transactions, page.page, page.per_page, total)).into_response()
        }
        Err(e) => error_response(&AccountingError::Database(e)),
    }
}

/// GET /accounting/transactions/{id} - Fetch one transaction with its
/// audit trail.
async fn get_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(ACCOUNTING_ROLES) {
        return response;
    }

    let repo = AccountingRepository::new((*state.db).clone());
    let transaction = match repo.find_by_id(id).await {
        Ok(Some(transaction)) => transaction,
        Ok(None) => return error_response(&AccountingError::NotFound(id)),
        Err(e) => return error_response(&AccountingError::Database(e)),
    };

    let audit_trail = match repo.audit_trail(id).await {
        Ok(trail) => trail,
        Err(e) => return error_response(&AccountingError::Database(e)),
    };

    (
        StatusCode::OK,
        Json(json!({ "transaction": transaction, "audit_trail": audit_trail })),
    )
        .into_response()
}

/// POST /accounting/transactions - Create a transaction.
async fn create_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateTransactionRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(ACCOUNTING_ROLES) {
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

    let repo = AccountingRepository::new((*state.db).clone());
    let input = CreateTransactionInput {
        student_number: payload.student_number,
        txn_type: payload.txn_type,
        amount: payload.amount,
        method: payload.method,
        ledger_code: payload.ledger_code,
        account_category: payload.account_category,
        sub_category: payload.sub_category,
        status: payload.status.unwrap_or(TxnStatus::Pending),
        transaction_date: payload.transaction_date,
        due_date: payload.due_date,
        term: payload.term,
        session: payload.session,
        academic_year: payload.academic_year,
        payment_reference: payload.payment_reference,
        check_number: payload.check_number,
        card_last_four: payload.card_last_four,
        description: payload.description,
        notes: payload.notes,
        internal_notes: payload.internal_notes,
        created_by: auth.user_id(),
    };

    match repo.create(input).await {
        Ok(transaction) => {
            info!(
                transaction_id = %transaction.id,
                reference = %transaction.reference_number,
                "Transaction created"
            );
            (StatusCode::CREATED, Json(json!({ "transaction": transaction }))).into_response()
        }
        Err(e) => error_response(&AccountingError::Database(e)),
    }
}

/// PUT /accounting/transactions/{id} - Update a transaction.
async fn update_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTransactionRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(ACCOUNTING_ROLES) {
        return response;
    }

    let repo = AccountingRepository::new((*state.db).clone());
    let input = UpdateTransactionInput {
        amount: payload.amount,
        status: payload.status,
        method: payload.method,
        due_date: payload.due_date,
        description: payload.description,
        notes: payload.notes,
        internal_notes: payload.internal_notes,
        updated_by: auth.user_id(),
    };

    match repo.update(id, input).await {
        Ok(transaction) => {
            info!(transaction_id = %id, "Transaction updated");
            (StatusCode::OK, Json(json!({ "transaction": transaction }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// DELETE /accounting/transactions/{id} - Soft-delete a transaction.
async fn delete_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(&[UserRole::Admin]) {
        return response;
    }

    let repo = AccountingRepository::new((*state.db).clone());
    match repo.soft_delete(id).await {
        Ok(()) => {
            info!(transaction_id = %id, "Transaction deactivated");
            (
                StatusCode::OK,
                Json(json!({ "message": "Transaction deleted successfully" })),
            )
                .into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// POST /accounting/transactions/{id}/approve - Approve a transaction.
async fn approve_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ApproveRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(ACCOUNTING_ROLES) {
        return response;
    }

    let repo = AccountingRepository::new((*state.db).clone());
    match repo.approve(id, auth.user_id(), payload.notes).await {
        Ok(transaction) => {
            info!(transaction_id = %id, "Transaction approved");
            (StatusCode::OK, Json(json!({ "transaction": transaction }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// POST /accounting/transactions/{id}/reconcile - Reconcile a transaction.
async fn reconcile_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(ACCOUNTING_ROLES) {
        return response;
    }

    let repo = AccountingRepository::new((*state.db).clone());
    match repo.reconcile(id, auth.user_id()).await {
        Ok(transaction) => {
            info!(transaction_id = %id, "Transaction reconciled");
            (StatusCode::OK, Json(json!({ "transaction": transaction }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// POST /accounting/transactions/{id}/dispute - Dispute a transaction.
async fn dispute_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<DisputeRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(ACCOUNTING_ROLES) {
        return response;
    }

    let repo = AccountingRepository::new((*state.db).clone());
    match repo.dispute(id, auth.user_id(), payload.reason).await {
        Ok(transaction) => {
            info!(transaction_id = %id, "Transaction disputed");
            (StatusCode::OK, Json(json!({ "transaction": transaction }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// GET /accounting/transactions/pending - Pending transactions.
async fn pending_transactions(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if let Err(response) = auth.require_role(ACCOUNTING_ROLES) {
        return response;
    }

    let repo = AccountingRepository::new((*state.db).clone());
    match repo.pending().await {
        Ok(transactions) => (
            StatusCode::OK,
            Json(json!({ "count": transactions.len(), "transactions": transactions })),
        )
            .into_response(),
        Err(e) => error_response(&AccountingError::Database(e)),
    }
}

/// GET /accounting/transactions/overdue - Open transactions past due.
async fn overdue_transactions(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if let Err(response) = auth.require_role(ACCOUNTING_ROLES) {
        return response;
    }

    let repo = AccountingRepository::new((*state.db).clone());
    match repo.overdue().await {
        Ok(transactions) => (
            StatusCode::OK,
            Json(json!({ "count": transactions.len(), "transactions": transactions })),
        )
            .into_response(),
        Err(e) => error_response(&AccountingError::Database(e)),
    }
}

/// GET /accounting/transactions/unreconciled - Unreconciled transactions.
async fn unreconciled_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(ACCOUNTING_ROLES) {
        return response;
    }

    let repo = AccountingRepository::new((*state.db).clone());
    match repo.unreconciled().await {
        Ok(transactions) => (
            StatusCode::OK,
            Json(json!({ "count": transactions.len(), "transactions": transactions })),
        )
            .into_response(),
        Err(e) => error_response(&AccountingError::Database(e)),
    }
}

/// GET /accounting/balance/{ledger_code} - Ledger balance by code.
async fn ledger_balance(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(ledger_code): Path<String>,
    Query(query): Query<BalanceQuery>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(ACCOUNTING_ROLES) {
        return response;
    }

    let repo = AccountingRepository::new((*state.db).clone());
    match repo
        .ledger_code_balance(&ledger_code, query.account_category)
        .await
    {
        Ok(balance) => (
            StatusCode::OK,
            Json(json!({
                "ledger_code": balance.ledger_code,
                "total_debits": balance.total_debits,
                "total_credits": balance.total_credits,
                "balance": balance.balance,
            })),
        )
            .into_response(),
        Err(e) => error_response(&AccountingError::Database(e)),
    }
}

/// GET /accounting/transactions/stats - Accounting rollup.
async fn accounting_stats(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<RangeQuery>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(ACCOUNTING_ROLES) {
        return response;
    }

    let repo = AccountingRepository::new((*state.db).clone());
    match repo.stats(query.from, query.to).await {
        Ok(stats) => (
            StatusCode::OK,
            Json(json!({
                "total_count": stats.total_count,
                "total_amount": stats.total_amount,
                "pending_count": stats.pending_count,
                "reconciled_count": stats.reconciled_count,
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
        Err(e) => error_response(&AccountingError::Database(e)),
    }
}

/// POST /accounting/transactions/bulk-update - Update many at once.
async fn bulk_update_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<BulkUpdateTransactionsRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(ACCOUNTING_ROLES) {
        return response;
    }

    if payload.ids.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "missing_ids",
                "message": "Transaction IDs array is required"
            })),
        )
            .into_response();
    }

    let repo = AccountingRepository::new((*state.db).clone());
    let updates = TransactionBulkUpdate {
        status: payload.updates.status,
        reconciled: payload.updates.reconciled,
    };

    match repo.bulk_update(&payload.ids, updates).await {
        Ok((matched, modified)) => {
            info!(matched, modified, "Bulk transaction update");
            (
                StatusCode::OK,
                Json(json!({ "matched_count": matched, "modified_count": modified })),
            )
                .into_response()
        }
        Err(e) => error_response(&AccountingError::Database(e)),
    }
}

/// GET /accounting/transactions/export - Export matching transactions.
async fn export_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<RangeQuery>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(ACCOUNTING_ROLES) {
        return response;
    }

    let repo = AccountingRepository::new((*state.db).clone());
    let filter = TransactionFilter {
        status: query.status,
        txn_type: query.txn_type,
        from: query.from,
        to: query.to,
        search: query.search,
        ..TransactionFilter::default()
    };

    let transactions = match repo.export(&filter).await {
        Ok(transactions) => transactions,
        Err(e) => return error_response(&AccountingError::Database(e)),
    };

    if query.format.as_deref() == Some("csv") {
        let mut csv = CsvBuilder::new(&[
            "Reference",
            "Student Number",
            "Type",
            "Amount",
            "Method",
            "Ledger Code",
            "Category",
            "Status",
            "Date",
            "Description",
        ]);
        for transaction in &transactions {
            csv.row([
                transaction.reference_number.clone(),
                transaction.student_number.clone(),
                transaction.txn_type.to_value(),
                transaction.amount.to_string(),
                transaction.method.to_value(),
                transaction.ledger_code.clone(),
                transaction.account_category.to_value(),
                transaction.status.to_value(),
                transaction.transaction_date.to_string(),
                transaction.description.clone(),
            ]);
        }
        return csv_response("accounting_transactions.csv", csv.finish());
    }

    (
        StatusCode::OK,
        Json(json!({ "count": transactions.len(), "transactions": transactions })),
    )
        .into_response()
}
