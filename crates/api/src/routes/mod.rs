//! API route definitions, one module per domain module.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Router, middleware};

use atrium_shared::types::pagination::SortOrder;

use crate::{AppState, middleware::auth::auth_middleware};

pub mod accounting;
pub mod admissions;
pub mod auth;
pub mod deals;
pub mod finance;
pub mod health;
pub mod leads;
pub mod notifications;
pub mod placement;
pub mod registrar;
pub mod reports;

/// Creates the API router: public auth endpoints plus the protected module
/// routers behind the authentication middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(auth::protected_routes())
        .merge(admissions::routes())
        .merge(registrar::routes())
        .merge(finance::routes())
        .merge(accounting::routes())
        .merge(placement::routes())
        .merge(reports::routes())
        .merge(leads::routes())
        .merge(deals::routes())
        .merge(notifications::routes())
        .layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new().merge(auth::routes()).merge(protected_routes)
}

/// Parses a `sort_order` query value; anything but `desc` sorts ascending.
pub(crate) fn parse_sort_order(raw: Option<&str>) -> SortOrder {
    match raw {
        Some("desc") => SortOrder::Desc,
        _ => SortOrder::Asc,
    }
}

/// Builds a CSV attachment response.
pub(crate) fn csv_response(filename: &str, body: String) -> Response {
    let disposition = format!("attachment; filename={filename}");
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("text/csv")),
            (
                header::CONTENT_DISPOSITION,
                HeaderValue::from_str(&disposition)
                    .unwrap_or_else(|_| HeaderValue::from_static("attachment")),
            ),
        ],
        body,
    )
        .into_response()
}
