//! Mind-map node and connection models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use reqdesk_core::mindmap::graph::GraphNode;
use reqdesk_core::mindmap::Position;
use reqdesk_core::types::{DbId, Timestamp};

/// A row from the `mindmap_nodes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MindMapNode {
    pub id: DbId,
    pub parent_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub problem: bool,
    pub solution: bool,
    pub position_x: f64,
    pub position_y: f64,
    pub color: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MindMapNode {
    pub fn position(&self) -> Position {
        Position {
            x: self.position_x,
            y: self.position_y,
        }
    }
}

impl GraphNode for MindMapNode {
    fn id(&self) -> DbId {
        self.id
    }

    fn parent_id(&self) -> Option<DbId> {
        self.parent_id
    }
}

/// DTO for creating a node. Also the request body of `POST /mindmap/nodes`.
///
/// Absent fields fall back to the column defaults (`color` = `#1E3A8A`,
/// flags `false`, position `(0, 0)`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateNode {
    pub parent_id: Option<DbId>,
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub problem: Option<bool>,
    pub solution: Option<bool>,
    pub position_x: Option<f64>,
    pub position_y: Option<f64>,
    pub color: Option<String>,
}

/// DTO for replacing a node's mutable fields. Request body of
/// `PUT /mindmap/nodes/{id}`.
///
/// This is a full replacement: omitted flags become `false`, omitted
/// coordinates `0`, an omitted color the default color.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNode {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub problem: bool,
    #[serde(default)]
    pub solution: bool,
    #[serde(default)]
    pub position_x: f64,
    #[serde(default)]
    pub position_y: f64,
    pub color: Option<String>,
}

/// A row from the `mindmap_connections` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MindMapConnection {
    pub id: DbId,
    pub source_node_id: DbId,
    pub target_node_id: DbId,
    pub connection_type: String,
    pub created_at: Timestamp,
}

/// DTO for creating a connection. Request body of
/// `POST /mindmap/connections`; `connection_type` defaults to `related`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateConnection {
    pub source_node_id: DbId,
    pub target_node_id: DbId,
    pub connection_type: Option<String>,
}
