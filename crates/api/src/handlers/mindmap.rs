//! Handlers for the mind-map graph: nodes, connections and the forest
//! view.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use reqdesk_core::error::CoreError;
use reqdesk_core::mindmap::graph::{Forest, NodeArena};
use reqdesk_core::mindmap::{
    child_position, resolve_color, resolve_connection_type, validate_title,
};
use reqdesk_core::types::DbId;
use reqdesk_db::models::mindmap::{
    CreateConnection, CreateNode, MindMapConnection, MindMapNode, UpdateNode,
};
use reqdesk_db::repositories::{MindMapConnectionRepo, MindMapNodeRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Response body of `GET /mindmap/tree`.
#[derive(Debug, Serialize)]
pub struct MindMapForest<'a> {
    #[serde(flatten)]
    pub forest: Forest<'a, MindMapNode>,
    pub connections: Vec<MindMapConnection>,
}

fn node_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "MindMapNode",
        id,
    })
}

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

/// GET /api/mindmap/nodes
pub async fn list_nodes(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let nodes = MindMapNodeRepo::list(&state.pool).await?;
    Ok(Json(nodes))
}

/// GET /api/mindmap/nodes/{id}
pub async fn get_node(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let node = MindMapNodeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| node_not_found(id))?;
    Ok(Json(node))
}

/// POST /api/mindmap/nodes
///
/// Create a node. A child sent without coordinates is placed next to its
/// parent, below any siblings it already has.
pub async fn create_node(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(mut input): Json<CreateNode>,
) -> AppResult<impl IntoResponse> {
    validate_title(&input.title)?;
    input.title = input.title.trim().to_string();
    input.color = Some(resolve_color(input.color.as_deref())?);

    if input.position_x.is_none() && input.position_y.is_none() {
        if let Some(parent_id) = input.parent_id {
            // An unknown parent is left to the foreign key to reject.
            if let Some(parent) = MindMapNodeRepo::find_by_id(&state.pool, parent_id).await? {
                let siblings = MindMapNodeRepo::count_children(&state.pool, parent_id).await?;
                let position = child_position(parent.position(), siblings as usize);
                input.position_x = Some(position.x);
                input.position_y = Some(position.y);
            }
        }
    }

    let node = MindMapNodeRepo::create(&state.pool, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        node_id = node.id,
        parent_id = ?node.parent_id,
        "Mind-map node created"
    );

    Ok((StatusCode::CREATED, Json(node)))
}

/// PUT /api/mindmap/nodes/{id}
///
/// Replace every mutable field of a node.
pub async fn update_node(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateNode>,
) -> AppResult<impl IntoResponse> {
    validate_title(&input.title)?;
    input.title = input.title.trim().to_string();
    input.color = Some(resolve_color(input.color.as_deref())?);

    let node = MindMapNodeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| node_not_found(id))?;

    tracing::info!(user_id = auth.user_id, node_id = id, "Mind-map node updated");

    Ok(Json(node))
}

/// DELETE /api/mindmap/nodes/{id}
///
/// Delete a node and every connection touching it.
pub async fn delete_node(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed_connections = MindMapNodeRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| node_not_found(id))?;

    tracing::info!(
        user_id = auth.user_id,
        node_id = id,
        removed_connections,
        "Mind-map node deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/mindmap/tree
///
/// All nodes as a forest (root ids plus every node in pre-order with its
/// depth and child ids) and the list of connections.
pub async fn get_tree(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let (nodes, connections) = tokio::try_join!(
        MindMapNodeRepo::list(&state.pool),
        MindMapConnectionRepo::list(&state.pool),
    )?;

    let arena = NodeArena::new(nodes);
    let body = MindMapForest {
        forest: arena.forest(),
        connections,
    };
    Ok(Json(body).into_response())
}

// ---------------------------------------------------------------------------
// Connections
// ---------------------------------------------------------------------------

/// GET /api/mindmap/connections
///
/// Always answers with an array. A storage failure is logged and reported
/// as an empty list.
pub async fn list_connections(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> Json<Vec<MindMapConnection>> {
    match MindMapConnectionRepo::list(&state.pool).await {
        Ok(connections) => Json(connections),
        Err(e) => {
            tracing::error!(error = %e, "Failed to list mind-map connections");
            Json(Vec::new())
        }
    }
}

/// POST /api/mindmap/connections
pub async fn create_connection(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(mut input): Json<CreateConnection>,
) -> AppResult<impl IntoResponse> {
    input.connection_type = Some(resolve_connection_type(input.connection_type.as_deref())?);

    let connection = MindMapConnectionRepo::create(&state.pool, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        connection_id = connection.id,
        source_node_id = connection.source_node_id,
        target_node_id = connection.target_node_id,
        connection_type = %connection.connection_type,
        "Mind-map connection created"
    );

    Ok((StatusCode::CREATED, Json(connection)))
}

/// DELETE /api/mindmap/connections/{id}
pub async fn delete_connection(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !MindMapConnectionRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "MindMapConnection",
            id,
        }));
    }

    tracing::info!(user_id = auth.user_id, connection_id = id, "Mind-map connection deleted");

    Ok(StatusCode::NO_CONTENT)
}
