//! Authentication middleware for protected routes.
//!
//! Validates the bearer token, loads the principal and rejects disabled or
//! locked accounts before any handler runs. Handlers declare their role
//! allow-list through [`AuthUser::require_role`].

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use atrium_core::auth::{UserRole, is_locked};
use atrium_db::entities::sea_orm_active_enums::UserRole as DbUserRole;
use atrium_db::{OwnerScope, UserRepository};

use crate::AppState;

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

/// The authenticated principal, stored in request extensions.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// User id.
    pub id: Uuid,
    /// Resolved role.
    pub role: UserRole,
}

impl AuthUser {
    /// Returns the user ID.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.id
    }

    /// Record-visibility scope for CRM queries: privileged roles see all
    /// records, everyone else only their own.
    #[must_use]
    pub const fn owner_scope(&self) -> OwnerScope {
        if self.role.is_privileged() {
            OwnerScope::All
        } else {
            OwnerScope::Owner(self.id)
        }
    }

    /// Checks this principal against a role allow-list.
    ///
    /// # Errors
    ///
    /// Returns a 403 response when the role is not in the list.
    pub fn require_role(&self, allowed: &[UserRole]) -> Result<(), Response> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err((
                StatusCode::FORBIDDEN,
                Json(json!({
                    "error": "forbidden",
                    "message": "Access denied. Insufficient permissions."
                })),
            )
                .into_response())
        }
    }
}

/// Authentication middleware that validates JWT tokens and loads the
/// principal.
///
/// Rejections, in order: missing/invalid/expired token, unknown principal,
/// deactivated account, locked account.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(token) = auth_header.and_then(extract_bearer_token) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "missing_token",
                "message": "Authorization header with Bearer token is required"
            })),
        )
            .into_response();
    };

    let claims = match state.jwt_service.validate_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            let (error, message) = match e {
                atrium_shared::JwtError::Expired => ("token_expired", "Token has expired"),
                _ => ("invalid_token", "Invalid or malformed token"),
            };
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": error, "message": message })),
            )
                .into_response();
        }
    };

    let user_repo = UserRepository::new((*state.db).clone());
    let user = match user_repo.find_by_id(claims.user_id()).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "invalid_token",
                    "message": "Invalid token. User not found."
                })),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "Database error during authentication");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred during authentication"
                })),
            )
                .into_response();
        }
    };

    if !user.is_active {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "account_disabled",
                "message": "This account has been disabled"
            })),
        )
            .into_response();
    }

    if is_locked(user.locked_until.map(Into::into), Utc::now()) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "account_locked",
                "message": "Account is locked. Please contact an administrator."
            })),
        )
            .into_response();
    }

    let auth_user = AuthUser {
        id: user.id,
        role: entity_role(&user.role),
    };

    request.extensions_mut().insert(auth_user);
    next.run(request).await
}

/// Maps the persisted role onto the core role type.
#[must_use]
pub const fn entity_role(role: &DbUserRole) -> UserRole {
    match role {
        DbUserRole::Admin => UserRole::Admin,
        DbUserRole::Registrar => UserRole::Registrar,
        DbUserRole::Finance => UserRole::Finance,
        DbUserRole::Instructor => UserRole::Instructor,
        DbUserRole::SalesRep => UserRole::SalesRep,
        DbUserRole::Marketing => UserRole::Marketing,
        DbUserRole::Student => UserRole::Student,
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({
                        "error": "unauthorized",
                        "message": "Authentication required"
                    })),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(extract_bearer_token("bearer abc"), Some("abc"));
        assert_eq!(extract_bearer_token("Basic abc"), None);
    }

    #[test]
    fn test_owner_scope_by_role() {
        let admin = AuthUser {
            id: Uuid::new_v4(),
            role: UserRole::Admin,
        };
        assert_eq!(admin.owner_scope(), OwnerScope::All);

        let rep = AuthUser {
            id: Uuid::new_v4(),
            role: UserRole::SalesRep,
        };
        assert_eq!(rep.owner_scope(), OwnerScope::Owner(rep.id));
    }

    #[test]
    fn test_require_role() {
        let user = AuthUser {
            id: Uuid::new_v4(),
            role: UserRole::Registrar,
        };
        assert!(user.require_role(&[UserRole::Admin, UserRole::Registrar]).is_ok());
        assert!(user.require_role(&[UserRole::Admin]).is_err());
    }
}
