pub mod approval;
pub mod auth;
pub mod health;
pub mod mindmap;
pub mod requisition;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /login                                   login (public)
/// /logout                                  logout (public)
///
/// /aprobaciones                            list active, record decision
/// /aprobaciones/pestanas                   active ledger split into tabs
/// /aprobaciones/entregas-recientes         deliveries in the retention window
/// /aprobaciones/{id}                       get
/// /aprobaciones/{id}/entregar              confirm delivery (PATCH)
///
/// /requisiciones/todas                     all origins, newest first
/// /requisiciones/{origin}                  list one origin
/// /requisiciones/{origin}/{id}             get
///
/// /mindmap/nodes                           list, create
/// /mindmap/nodes/{id}                      get, replace, delete
/// /mindmap/tree                            forest + connections
/// /mindmap/connections                     list, create
/// /mindmap/connections/{id}                delete
/// ```
///
/// Everything except login and logout requires a Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Session routes.
        .merge(auth::router())
        // Approval ledger.
        .nest("/aprobaciones", approval::router())
        // Requisition origin tables.
        .nest("/requisiciones", requisition::router())
        // Mind-map graph.
        .nest("/mindmap", mindmap::router())
}
