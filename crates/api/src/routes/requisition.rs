//! Route definitions for the `/requisiciones` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::requisition;
use crate::state::AppState;

/// Routes mounted at `/requisiciones`.
///
/// The static `/todas` segment takes precedence over `/{origin}`.
///
/// ```text
/// GET    /todas              list_combined
/// GET    /{origin}           list_by_origin   (tic | logistica | compras)
/// GET    /{origin}/{id}      get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/todas", get(requisition::list_combined))
        .route("/{origin}", get(requisition::list_by_origin))
        .route("/{origin}/{id}", get(requisition::get_by_id))
}
