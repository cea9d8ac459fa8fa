//! Repository for the `mindmap_nodes` table.

use sqlx::PgPool;
use reqdesk_core::mindmap::DEFAULT_NODE_COLOR;
use reqdesk_core::types::DbId;

use crate::models::mindmap::{CreateNode, MindMapNode, UpdateNode};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, parent_id, title, description, problem, solution, \
                        position_x, position_y, color, created_at, updated_at";

/// Provides CRUD operations for mind-map nodes.
pub struct MindMapNodeRepo;

impl MindMapNodeRepo {
    /// Insert a new node, returning the created row.
    ///
    /// Absent fields get the defaults: default color, flags `false`,
    /// position `(0, 0)`.
    pub async fn create(pool: &PgPool, input: &CreateNode) -> Result<MindMapNode, sqlx::Error> {
        let query = format!(
            "INSERT INTO mindmap_nodes
                (parent_id, title, description, problem, solution, position_x, position_y, color)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MindMapNode>(&query)
            .bind(input.parent_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.problem.unwrap_or(false))
            .bind(input.solution.unwrap_or(false))
            .bind(input.position_x.unwrap_or(0.0))
            .bind(input.position_y.unwrap_or(0.0))
            .bind(input.color.as_deref().unwrap_or(DEFAULT_NODE_COLOR))
            .fetch_one(pool)
            .await
    }

    /// Find a node by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MindMapNode>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM mindmap_nodes WHERE id = $1");
        sqlx::query_as::<_, MindMapNode>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all nodes, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<MindMapNode>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM mindmap_nodes ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, MindMapNode>(&query).fetch_all(pool).await
    }

    /// Number of nodes whose parent is `parent_id`.
    pub async fn count_children(pool: &PgPool, parent_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM mindmap_nodes WHERE parent_id = $1")
                .bind(parent_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    /// Replace every mutable field of a node. `updated_at` is bumped by the
    /// table trigger.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNode,
    ) -> Result<Option<MindMapNode>, sqlx::Error> {
        let query = format!(
            "UPDATE mindmap_nodes SET
                title = $2,
                description = $3,
                problem = $4,
                solution = $5,
                position_x = $6,
                position_y = $7,
                color = $8
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MindMapNode>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.problem)
            .bind(input.solution)
            .bind(input.position_x)
            .bind(input.position_y)
            .bind(input.color.as_deref().unwrap_or(DEFAULT_NODE_COLOR))
            .fetch_optional(pool)
            .await
    }

    /// Delete a node together with every connection that references it,
    /// in one transaction.
    ///
    /// Returns the number of connections removed, or `None` (and nothing is
    /// changed) if no row with the given `id` exists. Children of the node
    /// are kept; their `parent_id` is cleared by the foreign key.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<u64>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let edges = sqlx::query(
            "DELETE FROM mindmap_connections WHERE source_node_id = $1 OR target_node_id = $1",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let node = sqlx::query("DELETE FROM mindmap_nodes WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if node.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;
        Ok(Some(edges.rows_affected()))
    }
}
