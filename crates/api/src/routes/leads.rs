//! CRM lead routes.
//!
//! Lists and stats are ownership-scoped through the query predicate;
//! single-record operations check ownership after load. The privileged role
//! bypasses both.

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
use atrium_db::LeadRepository;
use atrium_db::entities::sea_orm_active_enums::{LeadSource, LeadStatus};
use atrium_db::repositories::lead::{
    ConvertDealSeed, ConvertLeadInput, CreateLeadInput, LeadError, LeadFilter, UpdateLeadInput,
};
use atrium_shared::types::pagination::{PageRequest, PageResponse};

use crate::AppState;
use crate::middleware::auth::AuthUser;

use super::parse_sort_order;

const CRM_ROLES: &[UserRole] = &[UserRole::Admin, UserRole::SalesRep, UserRole::Marketing];

/// Creates the leads router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/crm/leads", get(list_leads))
        .route("/crm/leads", post(create_lead))
        .route("/crm/leads/stats/summary", get(lead_stats))
        .route("/crm/leads/{id}", get(get_lead))
        .route("/crm/leads/{id}", put(update_lead))
        .route("/crm/leads/{id}", delete(delete_lead))
        .route("/crm/leads/{id}/convert", post(convert_lead))
        .route("/crm/leads/{id}/score", put(rescore_lead))
}

/// Query parameters for listing leads.
#[derive(Debug, Deserialize)]
pub struct ListLeadsQuery {
    /// Filter by status.
    pub status: Option<LeadStatus>,
    /// Filter by source.
    pub source: Option<LeadSource>,
    /// Filter by territory.
    pub territory: Option<String>,
    /// Substring search over name, email and company.
    pub search: Option<String>,
    /// `asc` or `desc` (default) over creation time.
    pub sort_order: Option<String>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Page size.
    pub per_page: Option<u32>,
}

/// Request body for creating a lead.
#[derive(Debug, Deserialize)]
pub struct CreateLeadRequest {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email.
    pub email: String,
    /// Phone.
    pub phone: Option<String>,
    /// Company.
    pub company: Option<String>,
    /// Position.
    pub position: Option<String>,
    /// Source.
    pub source: LeadSource,
    /// Source details.
    pub source_details: Option<String>,
    /// School district.
    pub school_district: Option<String>,
    /// School type.
    pub school_type: Option<String>,
    /// Student count.
    pub student_count: Option<i32>,
    /// Territory.
    pub territory: Option<String>,
    /// Address blob.
    pub address: Option<serde_json::Value>,
    /// Industry.
    pub industry: Option<String>,
    /// Estimated value.
    pub estimated_value: Option<Decimal>,
    /// Budget range bracket.
    pub budget_range: Option<String>,
    /// Expected close date.
    pub expected_close_date: Option<NaiveDate>,
    /// Notes.
    pub notes: Option<String>,
    /// Owner; defaults to the caller.
    pub assigned_to: Option<Uuid>,
}

/// Request body for updating a lead.
#[derive(Debug, Deserialize)]
pub struct UpdateLeadRequest {
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Email.
    pub email: Option<String>,
    /// Phone.
    pub phone: Option<String>,
    /// Company.
    pub company: Option<String>,
    /// Status.
    pub status: Option<LeadStatus>,
    /// Territory.
    pub territory: Option<String>,
    /// Estimated value.
    pub estimated_value: Option<Decimal>,
    /// Next follow-up date.
    pub next_follow_up: Option<NaiveDate>,
    /// Last contact timestamp.
    pub last_contact_date: Option<DateTime<Utc>>,
    /// Decision-maker flag.
    pub decision_maker: Option<bool>,
    /// Budget-confirmed flag.
    pub has_budget: Option<bool>,
    /// Need-established flag.
    pub has_need: Option<bool>,
    /// Timeline-established flag.
    pub has_timeline: Option<bool>,
    /// Notes.
    pub notes: Option<String>,
    /// Loss reason.
    pub lost_reason: Option<String>,
    /// Reassignment target (privileged only).
    pub assigned_to: Option<Uuid>,
}

/// Request body for converting a lead.
#[derive(Debug, Deserialize)]
pub struct ConvertLeadRequest {
    /// Name for the new account; defaults to the lead's company.
    pub account_name: Option<String>,
    /// Also create a contact. Defaults to true.
    pub create_contact: Option<bool>,
    /// Also create a deal seeded with these fields.
    pub deal: Option<ConvertDealRequest>,
}

/// Deal seed inside a conversion request.
#[derive(Debug, Deserialize)]
pub struct ConvertDealRequest {
    /// Deal name.
    pub name: String,
    /// Deal value.
    pub value: Decimal,
    /// Expected close date.
    pub expected_close_date: NaiveDate,
}

fn error_response(e: &LeadError) -> axum::response::Response {
    match e {
        LeadError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "not_found", "message": "Lead not found" })),
        )
            .into_response(),
        LeadError::NotOwner => (
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": "forbidden",
                "message": "Access denied. You can only access records assigned to you."
            })),
        )
            .into_response(),
        LeadError::AlreadyConverted => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "already_converted",
                "message": "Lead has already been converted"
            })),
        )
            .into_response(),
        LeadError::Database(err) => {
            error!(error = %err, "Database error in leads");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal_error", "message": "An error occurred" })),
            )
                .into_response()
        }
    }
}

/// GET /crm/leads - List visible leads.
async fn list_leads(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListLeadsQuery>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(CRM_ROLES) {
        return response;
    }

    let repo = LeadRepository::new((*state.db).clone());
    let filter = LeadFilter {
        status: query.status,
        source: query.source,
        territory: query.territory,
        search: query.search,
    };
    let order = parse_sort_order(query.sort_order.as_deref().or(Some("desc")));
    let page = PageRequest {
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    };

    match repo.list(auth.owner_scope(), &filter, order, &page).await {
        Ok((leads, total)) => {
            Json(PageResponse::new(leads, page.page, page.per_page, total)).into_response()
        }
        Err(e) => error_response(&LeadError::Database(e)),
    }
}

/// GET /crm/leads/{id} - Fetch one lead.
async fn get_lead(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(CRM_ROLES) {
        return response;
    }

    let repo = LeadRepository::new((*state.db).clone());
    match repo.find_scoped(id, auth.owner_scope()).await {
        Ok(lead) => (StatusCode::OK, Json(json!({ "lead": lead }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST /crm/leads - Create a lead.
async fn create_lead(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateLeadRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(CRM_ROLES) {
        return response;
    }

    // Only the privileged role may assign leads to someone else.
    let assigned_to = match payload.assigned_to {
        Some(other) if other != auth.user_id() && !auth.role.is_privileged() => {
            return (
                StatusCode::FORBIDDEN,
                Json(json!({
                    "error": "forbidden",
                    "message": "Only administrators can assign leads to other users"
                })),
            )
                .into_response();
        }
        Some(other) => other,
        None => auth.user_id(),
    };

    let repo = LeadRepository::new((*state.db).clone());
    let input = CreateLeadInput {
        first_name: payload.first_name,
        last_name: payload.last_name,
        email: payload.email,
        phone: payload.phone,
        company: payload.company,
        position: payload.position,
        source: payload.source,
        source_details: payload.source_details,
        school_district: payload.school_district,
        school_type: payload.school_type,
        student_count: payload.student_count,
        territory: payload.territory,
        address: payload.address,
        industry: payload.industry,
        estimated_value: payload.estimated_value,
        budget_range: payload.budget_range,
        expected_close_date: payload.expected_close_date,
        notes: payload.notes,
        assigned_to,
        created_by: auth.user_id(),
    };

    match repo.create(input).await {
        Ok(lead) => {
            info!(lead_id = %lead.id, "Lead created");
            (StatusCode::CREATED, Json(json!({ "lead": lead }))).into_response()
        }
        Err(e) => error_response(&LeadError::Database(e)),
    }
}

/// PUT /crm/leads/{id} - Update a lead.
async fn update_lead(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLeadRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(CRM_ROLES) {
        return response;
    }

    if payload.assigned_to.is_some() && !auth.role.is_privileged() {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": "forbidden",
                "message": "Only administrators can reassign leads"
            })),
        )
            .into_response();
    }

    let repo = LeadRepository::new((*state.db).clone());
    let input = UpdateLeadInput {
        first_name: payload.first_name,
        last_name: payload.last_name,
        email: payload.email,
        phone: payload.phone,
        company: payload.company,
        status: payload.status,
        territory: payload.territory,
        estimated_value: payload.estimated_value,
        next_follow_up: payload.next_follow_up,
        last_contact_date: payload.last_contact_date,
        decision_maker: payload.decision_maker,
        has_budget: payload.has_budget,
        has_need: payload.has_need,
        has_timeline: payload.has_timeline,
        notes: payload.notes,
        lost_reason: payload.lost_reason,
        assigned_to: payload.assigned_to,
        updated_by: auth.user_id(),
    };

    match repo.update(id, auth.owner_scope(), input).await {
        Ok(lead) => {
            info!(lead_id = %id, "Lead updated");
            (StatusCode::OK, Json(json!({ "lead": lead }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// PUT /crm/leads/{id}/score - Recompute the lead score.
async fn rescore_lead(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(CRM_ROLES) {
        return response;
    }

    let repo = LeadRepository::new((*state.db).clone());
    match repo.rescore(id, auth.owner_scope()).await {
        Ok(lead) => (
            StatusCode::OK,
            Json(json!({ "lead_score": lead.lead_score, "lead": lead })),
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST /crm/leads/{id}/convert - Convert into account/contact/deal.
async fn convert_lead(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ConvertLeadRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(CRM_ROLES) {
        return response;
    }

    let repo = LeadRepository::new((*state.db).clone());
    let input = ConvertLeadInput {
        account_name: payload.account_name,
        create_contact: payload.create_contact.unwrap_or(true),
        deal: payload.deal.map(|seed| ConvertDealSeed {
            name: seed.name,
            value: seed.value,
            expected_close_date: seed.expected_close_date,
        }),
        performed_by: auth.user_id(),
    };

    match repo.convert(id, auth.owner_scope(), input).await {
        Ok(converted) => {
            info!(lead_id = %id, account_id = %converted.account.id, "Lead converted");
            (
                StatusCode::OK,
                Json(json!({
                    "lead": converted.lead,
                    "account": converted.account,
                    "contact": converted.contact,
                    "deal": converted.deal,
                })),
            )
                .into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// DELETE /crm/leads/{id} - Soft-delete a lead.
async fn delete_lead(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_role(CRM_ROLES) {
        return response;
    }

    let repo = LeadRepository::new((*state.db).clone());
    match repo.soft_delete(id, auth.owner_scope()).await {
        Ok(()) => {
            info!(lead_id = %id, "Lead deactivated");
            (
                StatusCode::OK,
                Json(json!({ "message": "Lead deleted successfully" })),
            )
                .into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// GET /crm/leads/stats/summary - Visible-lead rollup.
async fn lead_stats(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if let Err(response) = auth.require_role(CRM_ROLES) {
        return response;
    }

    let repo = LeadRepository::new((*state.db).clone());
    match repo.stats(auth.owner_scope()).await {
        Ok(stats) => (
            StatusCode::OK,
            Json(json!({
                "total": stats.total,
                "converted": stats.converted,
                "conversion_rate": stats.conversion_rate,
                "by_status": stats
                    .by_status
                    .iter()
                    .map(|(status, count)| json!({
                        "status": status.to_value(),
                        "count": count,
                    }))
                    .collect::<Vec<_>>(),
            })),
        )
            .into_response(),
        Err(e) => error_response(&LeadError::Database(e)),
    }
}
