//! CRM deal routes: pipeline CRUD, stage transitions, kanban and stats.

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
use atrium_db::DealRepository;
use atrium_db::entities::sea_orm_active_enums::{DealStage, LeadSource, Priority};
use atrium_db::repositories::deal::{
    CreateDealInput, DealError, DealFilter, UpdateDealInput,
};
use atrium_shared::types::pagination::{PageRequest, PageResponse};

use crate::AppState;
use crate::middleware::auth::AuthUser;

use super::parse_sort_order;

const CRM_ROLES: &[UserRole] = &[UserRole::Admin, UserRole::SalesRep, UserRole::Marketing];

/// Creates the deals router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/crm/deals", get(list_deals))
        .route("/crm/deals", post(create_deal))
        .route("/crm/deals/kanban", get(kanban))
        .route("/crm/deals/stats/pipeline", get(pipeline_stats))
        .route("/crm/deals/{id}", get(get_deal))
        .route("/crm/deals/{id}", put(update_deal))
        .route("/crm/deals/{id}", delete(delete_deal))
        .route("/crm/deals/{id}/advance-stage", put(advance_stage))
        .route("/crm/deals/{id}/close-won", put(close_won))
        .route("/crm/deals/{id}/close-lost", put(close_lost))
}

/// Query parameters for listing deals.
#[derive(Debug, Deserialize)]
pub struct ListDealsQuery {
    /// Filter by stage.
    pub stage: Option<DealStage>,
    /// Filter by account.
    pub account_id: Option<Uuid>,
    /// Filter by priority.
    pub priority: Option<Priority>,
    /// Substring search over the deal name.
    pub search: Option<String>,
    /// `asc` (default) or `desc` over expected close date.
    pub sort_order: Option<String>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Page size.
    pub per_page: Option<u32>,
}

/// Request body for creating a deal.
#[derive(Debug, Deserialize)]
pub struct CreateDealRequest {
    /// Deal name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Value, non-negative.
    pub value: Decimal,
    /// Currency code, defaults to USD.
    pub currency: Option<String>,
    /// Initial stage, defaults to Prospecting.
    pub stage: Option<DealStage>,
    /// Pipeline name.
    pub pipeline: Option<String>,
    /// Owning account.
    pub account_id: Uuid,
    /// Primary contact.
    pub primary_contact_id: Option<Uuid>,
    /// Owner; defaults to the caller.
    pub assigned_to: Option<Uuid>,
    /// Expected close date.
    pub expected_close_date: NaiveDate,
    /// Service type.
    pub service_type: Option<String>,
    /// Lead source.
    pub lead_source: Option<LeadSource>,
    /// Priority.
    pub priority: Option<Priority>,
    /// Notes.
    pub notes: Option<String>,
}

/// Request body for updating a deal.
#[derive(Debug, Deserialize)]
pub struct UpdateDealRequest {
    /// Deal name.
    pub name: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Value.
    pub value: Option<Decimal>,
    /// Stage; refreshes the probability.
    pub stage: Option<DealStage>,
    /// Expected close date.
    pub expected_close_date: Option<NaiveDate>,
    /// Next step.
    pub next_step: Option<String>,
    /// Next step date.
    pub next_step_date: Option<NaiveDate>,
    /// Priority.
    pub priority: Option<Priority>,
    /// Notes.
    pub notes: Option<String>,
}

/// Request body for closing a deal as lost.
#[derive(Debug, Deserialize)]
pub struct CloseLostRequest {
    /// Loss reason.
    pub loss_reason: Option<String>,
    /// Winning competitor.
    pub competitor_won: Option<String>,
}

fn error_response(e: &DealError) -> axum::response::Response {
    match e {
        DealError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "not_found", "message": "Deal not found" })),
        )
            .into_response(),
        DealError::NotOwner => (
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": "forbidden",
                "message": "Access denied. You can only access records assigned to you."
            })),
        )
            .into_response(),
        DealError::AlreadyClosed => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "already_closed", "message": "Deal is already closed" })),
        )
            .into_response(),
        DealError::CannotAdvance => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "cannot_advance",
                "message": "Deal cannot advance from its current stage"
            })),
        )
            .into_response(),
        DealError::Database(err) => {
            error!(error = %err, "Database error in deals");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal_error", "message": "An error occurred" })),
            )
                .into_response()
        }
    }
}

/// GET /crm/deals - List visible deals.
async fn list_deals(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListDealsQuery>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(CRM_ROLES) {
        return response;
    }

    let repo = DealRepository::new((*state.db).clone());
    let filter = DealFilter {
        stage: query.stage,
        account_id: query.account_id,
        priority: query.priority,
        search: query.search,
    };
    let order = parse_sort_order(query.sort_order.as_deref());
    let page = PageRequest {
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    };

    match repo.list(auth.owner_scope(), &filter, order, &page).await {
        Ok((deals, total)) => {
            Json(PageResponse::new(deals, page.page, page.per_page, total)).into_response()
        }
        Err(e) => error_response(&DealError::Database(e)),
    }
}

/// GET /crm/deals/kanban - Visible deals grouped by stage.
async fn kanban(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if let Err(response) = auth.require_role(CRM_ROLES) {
        return response;
    }

    let repo = DealRepository::new((*state.db).clone());
    match repo.kanban(auth.owner_scope()).await {
        Ok(buckets) => (
            StatusCode::OK,
            Json(json!({
                "columns": buckets
                    .iter()
                    .map(|(stage, deals)| json!({
                        "stage": stage.to_value(),
                        "count": deals.len(),
                        "deals": deals,
                    }))
                    .collect::<Vec<_>>(),
            })),
        )
            .into_response(),
        Err(e) => error_response(&DealError::Database(e)),
    }
}

/// GET /crm/deals/{id} - Fetch one deal.
async fn get_deal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(CRM_ROLES) {
        return response;
    }

    let repo = DealRepository::new((*state.db).clone());
    match repo.find_scoped(id, auth.owner_scope()).await {
        Ok(deal) => (StatusCode::OK, Json(json!({ "deal": deal }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST /crm/deals - Create a deal.
async fn create_deal(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateDealRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(CRM_ROLES) {
        return response;
    }

    if payload.value < Decimal::ZERO {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_value",
                "message": "Deal value cannot be negative"
            })),
        )
            .into_response();
    }

    let assigned_to = match payload.assigned_to {
        Some(other) if other != auth.user_id() && !auth.role.is_privileged() => {
            return (
                StatusCode::FORBIDDEN,
                Json(json!({
                    "error": "forbidden",
                    "message": "Only administrators can assign deals to other users"
                })),
            )
                .into_response();
        }
        Some(other) => other,
        None => auth.user_id(),
    };

    let repo = DealRepository::new((*state.db).clone());
    let input = CreateDealInput {
        name: payload.name,
        description: payload.description,
        value: payload.value,
        currency: payload.currency,
        stage: payload.stage.unwrap_or(DealStage::Prospecting),
        pipeline: payload.pipeline,
        account_id: payload.account_id,
        primary_contact_id: payload.primary_contact_id,
        assigned_to,
        expected_close_date: payload.expected_close_date,
        service_type: payload.service_type,
        lead_source: payload.lead_source,
        priority: payload.priority,
        notes: payload.notes,
        created_by: auth.user_id(),
    };

    match repo.create(input).await {
        Ok(deal) => {
            info!(deal_id = %deal.id, "Deal created");
            (StatusCode::CREATED, Json(json!({ "deal": deal }))).into_response()
        }
        Err(e) => error_response(&DealError::Database(e)),
    }
}

/// PUT /crm/deals/{id} - Update a deal.
async fn update_deal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDealRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(CRM_ROLES) {
        return response;
    }

    let repo = DealRepository::new((*state.db).clone());
    let input = UpdateDealInput {
        name: payload.name,
        description: payload.description,
        value: payload.value,
        stage: payload.stage,
        expected_close_date: payload.expected_close_date,
        next_step: payload.next_step,
        next_step_date: payload.next_step_date,
        priority: payload.priority,
        notes: payload.notes,
        updated_by: auth.user_id(),
    };

    match repo.update(id, auth.owner_scope(), input).await {
        Ok(deal) => {
            info!(deal_id = %id, "Deal updated");
            (StatusCode::OK, Json(json!({ "deal": deal }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// PUT /crm/deals/{id}/advance-stage - Move one stage forward.
async fn advance_stage(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(CRM_ROLES) {
        return response;
    }

    let repo = DealRepository::new((*state.db).clone());
    match repo.advance_stage(id, auth.owner_scope(), auth.user_id()).await {
        Ok(deal) => {
            info!(deal_id = %id, stage = %deal.stage.to_value(), "Deal advanced");
            (StatusCode::OK, Json(json!({ "deal": deal }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// PUT /crm/deals/{id}/close-won - Close as won.
async fn close_won(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(CRM_ROLES) {
        return response;
    }

    let repo = DealRepository::new((*state.db).clone());
    match repo.close_won(id, auth.owner_scope(), auth.user_id()).await {
        Ok(deal) => {
            info!(deal_id = %id, "Deal closed won");
            (StatusCode::OK, Json(json!({ "deal": deal }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// PUT /crm/deals/{id}/close-lost - Close as lost with a reason.
async fn close_lost(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CloseLostRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(CRM_ROLES) {
        return response;
    }

    let repo = DealRepository::new((*state.db).clone());
    match repo
        .close_lost(
            id,
            auth.owner_scope(),
            auth.user_id(),
            payload.loss_reason,
            payload.competitor_won,
        )
        .await
    {
        Ok(deal) => {
            info!(deal_id = %id, "Deal closed lost");
            (StatusCode::OK, Json(json!({ "deal": deal }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// DELETE /crm/deals/{id} - Soft-delete a deal.
async fn delete_deal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(CRM_ROLES) {
        return response;
    }

    let repo = DealRepository::new((*state.db).clone());
    match repo.soft_delete(id, auth.owner_scope()).await {
        Ok(()) => {
            info!(deal_id = %id, "Deal deactivated");
            (
                StatusCode::OK,
                Json(json!({ "message": "Deal deleted successfully" })),
            )
                .into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// GET /crm/deals/stats/pipeline - Per-stage pipeline rollup.
async fn pipeline_stats(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if let Err(response) = auth.require_role(CRM_ROLES) {
        return response;
    }

    let repo = DealRepository::new((*state.db).clone());
    match repo.pipeline_stats(auth.owner_scope()).await {
        Ok(rollup) => (
            StatusCode::OK,
            Json(json!({
                "pipeline": rollup
                    .iter()
                    .map(|entry| json!({
                        "stage": entry.stage.to_value(),
                        "count": entry.count,
                        "total_value": entry.total_value,
                        "weighted_value": entry.weighted_value,
                    }))
                    .collect::<Vec<_>>(),
            })),
        )
            .into_response(),
        Err(e) => error_response(&DealError::Database(e)),
    }
}
