//! Repository for the `aprobaciones` ledger table.

use sqlx::PgPool;
use reqdesk_core::approval::{DELIVERY_RETENTION_DAYS, STATE_APPROVED, STATE_DELIVERED};
use reqdesk_core::types::DbId;

use crate::models::approval::{Approval, CreateApproval};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, requisicion_id, tabla_origen, datos_completos, estado, aprobador, \
                        fecha_decision, entregado_por, observaciones, fecha_entrega";

/// Predicate selecting rows inside the retention window. `$1` is the
/// window length in days.
const ACTIVE_WINDOW: &str =
    "(fecha_entrega IS NULL OR fecha_entrega >= NOW() - make_interval(days => $1))";

/// Provides ledger operations for approval decisions and deliveries.
pub struct ApprovalRepo;

impl ApprovalRepo {
    /// Record a decision, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateApproval) -> Result<Approval, sqlx::Error> {
        let query = format!(
            "INSERT INTO aprobaciones
                (requisicion_id, tabla_origen, datos_completos, estado, aprobador)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Approval>(&query)
            .bind(input.requisicion_id)
            .bind(input.tabla_origen)
            .bind(&input.datos_completos)
            .bind(input.estado.as_str())
            .bind(&input.aprobador)
            .fetch_one(pool)
            .await
    }

    /// Find a ledger entry by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Approval>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM aprobaciones WHERE id = $1");
        sqlx::query_as::<_, Approval>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the entries that are still visible: never delivered, or delivered
    /// within the last [`DELIVERY_RETENTION_DAYS`] days. Newest decision first.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Approval>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM aprobaciones
             WHERE {ACTIVE_WINDOW}
             ORDER BY fecha_decision DESC, id DESC"
        );
        sqlx::query_as::<_, Approval>(&query)
            .bind(DELIVERY_RETENTION_DAYS)
            .fetch_all(pool)
            .await
    }

    /// List deliveries made within the retention window, most recent
    /// delivery first.
    pub async fn list_recent_deliveries(pool: &PgPool) -> Result<Vec<Approval>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM aprobaciones
             WHERE LOWER(estado) = LOWER($2)
               AND fecha_entrega IS NOT NULL
               AND {ACTIVE_WINDOW}
             ORDER BY fecha_entrega DESC, id DESC"
        );
        sqlx::query_as::<_, Approval>(&query)
            .bind(DELIVERY_RETENTION_DAYS)
            .bind(STATE_DELIVERED)
            .fetch_all(pool)
            .await
    }

    /// Mark an approved entry as delivered.
    ///
    /// The update only applies while the stored state is `Aprobado`, so
    /// concurrent deliveries of the same entry cannot both succeed. The
    /// delivery time is never earlier than the decision time.
    ///
    /// Returns `None` if no row with `id` exists or it is not in the
    /// approved state; callers tell the two apart with [`Self::find_by_id`].
    pub async fn mark_delivered(
        pool: &PgPool,
        id: DbId,
        entregado_por: &str,
        observaciones: Option<&str>,
    ) -> Result<Option<Approval>, sqlx::Error> {
        let query = format!(
            "UPDATE aprobaciones SET
                estado = $2,
                entregado_por = $3,
                observaciones = $4,
                fecha_entrega = GREATEST(NOW(), fecha_decision)
             WHERE id = $1 AND LOWER(estado) = LOWER($5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Approval>(&query)
            .bind(id)
            .bind(STATE_DELIVERED)
            .bind(entregado_por)
            .bind(observaciones)
            .bind(STATE_APPROVED)
            .fetch_optional(pool)
            .await
    }
}
