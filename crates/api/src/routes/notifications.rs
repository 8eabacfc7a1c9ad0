//! Notification routes, backed by the notifications table.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch},
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use atrium_db::NotificationRepository;
use atrium_db::repositories::notification::UpdateNotificationInput;

use crate::AppState;
use crate::middleware::auth::AuthUser;

/// Creates the notifications router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route("/notifications/{id}", patch(update_notification))
        .route("/notifications/{id}", delete(delete_notification))
}

/// Query parameters for listing notifications.
#[derive(Debug, Deserialize)]
pub struct ListNotificationsQuery {
    /// Only unread notifications.
    pub unread: Option<bool>,
}

/// Request body for updating a notification.
#[derive(Debug, Deserialize)]
pub struct UpdateNotificationRequest {
    /// Read flag.
    pub read: Option<bool>,
    /// Important flag.
    pub important: Option<bool>,
}

fn internal_error() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "internal_error", "message": "An error occurred" })),
    )
        .into_response()
}

/// GET /notifications - List notifications, newest first.
async fn list_notifications(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListNotificationsQuery>,
) -> impl IntoResponse {
    let repo = NotificationRepository::new((*state.db).clone());
    match repo.list(query.unread.unwrap_or(false)).await {
        Ok(notifications) => (
            StatusCode::OK,
            Json(json!({ "notifications": notifications })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list notifications");
            internal_error()
        }
    }
}

/// PATCH /notifications/{id} - Update read/important flags.
async fn update_notification(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateNotificationRequest>,
) -> impl IntoResponse {
    let repo = NotificationRepository::new((*state.db).clone());
    let input = UpdateNotificationInput {
        read: payload.read,
        important: payload.important,
    };

    match repo.update(id, input).await {
        Ok(Some(notification)) => (
            StatusCode::OK,
            Json(json!({ "notification": notification })),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "not_found", "message": "Notification not found" })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to update notification");
            internal_error()
        }
    }
}

/// DELETE /notifications/{id} - Remove a notification.
async fn delete_notification(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = NotificationRepository::new((*state.db).clone());
    match repo.delete(id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(json!({ "message": "Notification deleted successfully" })),
        )
            .into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "not_found", "message": "Notification not found" })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to delete notification");
            internal_error()
        }
    }
}
