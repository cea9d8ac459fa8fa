//! Route definitions for the `/mindmap` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::mindmap;
use crate::state::AppState;

/// Routes mounted at `/mindmap`.
///
/// ```text
/// GET    /nodes                  list_nodes
/// POST   /nodes                  create_node
/// GET    /nodes/{id}             get_node
/// PUT    /nodes/{id}             update_node
/// DELETE /nodes/{id}             delete_node
/// GET    /tree                   get_tree
/// GET    /connections            list_connections
/// POST   /connections            create_connection
/// DELETE /connections/{id}       delete_connection
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/nodes",
            get(mindmap::list_nodes).post(mindmap::create_node),
        )
        .route(
            "/nodes/{id}",
            get(mindmap::get_node)
                .put(mindmap::update_node)
                .delete(mindmap::delete_node),
        )
        .route("/tree", get(mindmap::get_tree))
        .route(
            "/connections",
            get(mindmap::list_connections).post(mindmap::create_connection),
        )
        .route("/connections/{id}", delete(mindmap::delete_connection))
}
