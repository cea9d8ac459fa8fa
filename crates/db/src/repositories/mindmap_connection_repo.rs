//! Repository for the `mindmap_connections` table.

use sqlx::PgPool;
use reqdesk_core::mindmap::DEFAULT_CONNECTION_TYPE;
use reqdesk_core::types::DbId;

use crate::models::mindmap::{CreateConnection, MindMapConnection};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, source_node_id, target_node_id, connection_type, created_at";

/// Provides CRUD operations for mind-map connections.
pub struct MindMapConnectionRepo;

impl MindMapConnectionRepo {
    /// Insert a new connection, returning the created row.
    ///
    /// Unknown `source_node_id`/`target_node_id` fail with a foreign-key violation.
    pub async fn create(
        pool: &PgPool,
        input: &CreateConnection,
    ) -> Result<MindMapConnection, sqlx::Error> {
        let query = format!(
            "INSERT INTO mindmap_connections (source_node_id, target_node_id, connection_type)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MindMapConnection>(&query)
            .bind(input.source_node_id)
            .bind(input.target_node_id)
            .bind(
                input
                    .connection_type
                    .as_deref()
                    .unwrap_or(DEFAULT_CONNECTION_TYPE),
            )
            .fetch_one(pool)
            .await
    }

    /// List all connections in creation order.
    pub async fn list(pool: &PgPool) -> Result<Vec<MindMapConnection>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM mindmap_connections ORDER BY id");
        sqlx::query_as::<_, MindMapConnection>(&query)
            .fetch_all(pool)
            .await
    }

    /// Delete a connection by id. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM mindmap_connections WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
