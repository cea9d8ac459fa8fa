//! Route definitions for the `/aprobaciones` ledger.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::approval;
use crate::state::AppState;

/// Routes mounted at `/aprobaciones`.
///
/// ```text
/// GET    /                       list_active
/// POST   /                       record_decision
/// GET    /pestanas               list_tabs
/// GET    /entregas-recientes     list_recent_deliveries
/// GET    /{id}                   get_by_id
/// PATCH  /{id}/entregar          mark_delivered
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(approval::list_active).post(approval::record_decision),
        )
        .route("/pestanas", get(approval::list_tabs))
        .route(
            "/entregas-recientes",
            get(approval::list_recent_deliveries),
        )
        .route("/{id}", get(approval::get_by_id))
        .route("/{id}/entregar", patch(approval::mark_delivered))
}
