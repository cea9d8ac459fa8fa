//! Repository for the `requisiciones_tic`, `requisiciones_logistica` and
//! `requisiciones_compras` tables.
//!
//! The table name is interpolated into the query text, so it is only ever
//! taken from [`RequisitionOrigin::table`].

use sqlx::PgPool;
use reqdesk_core::requisition::{merge_newest_first, RequisitionOrigin};
use reqdesk_core::types::DbId;

use crate::models::requisition::{CreateRequisition, Requisition, TaggedRequisition};

/// Column list shared by every origin table.
const COLUMNS: &str = "id, nombre_solicitante, departamento_origen, descripcion, fecha_solicitud, datos_adicionales";

/// Read access to the requisition origin tables.
pub struct RequisitionRepo;

impl RequisitionRepo {
    /// List every requisition of one origin, newest submission first.
    pub async fn list_by_origin(
        pool: &PgPool,
        origin: RequisitionOrigin,
    ) -> Result<Vec<Requisition>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {table} ORDER BY fecha_solicitud DESC, id DESC",
            table = origin.table()
        );
        sqlx::query_as::<_, Requisition>(&query)
            .fetch_all(pool)
            .await
    }

    /// List the requisitions of all three origins, tagged with their origin
    /// and sorted newest submission first.
    ///
    /// The three reads run concurrently; if any of them fails the whole call
    /// fails. Equal timestamps keep origin order (TIC, Logística, Compras).
    pub async fn list_combined(pool: &PgPool) -> Result<Vec<TaggedRequisition>, sqlx::Error> {
        let (tic, logistica, compras) = tokio::try_join!(
            Self::list_by_origin(pool, RequisitionOrigin::Tic),
            Self::list_by_origin(pool, RequisitionOrigin::Logistica),
            Self::list_by_origin(pool, RequisitionOrigin::Compras),
        )?;

        let merged = merge_newest_first(
            vec![
                (RequisitionOrigin::Tic, tic),
                (RequisitionOrigin::Logistica, logistica),
                (RequisitionOrigin::Compras, compras),
            ],
            |r| r.fecha_solicitud,
        );

        Ok(merged
            .into_iter()
            .map(|(origin, requisition)| TaggedRequisition::new(origin, requisition))
            .collect())
    }

    /// Find a requisition by its id within one origin table.
    pub async fn find_by_id(
        pool: &PgPool,
        origin: RequisitionOrigin,
        id: DbId,
    ) -> Result<Option<Requisition>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {table} WHERE id = $1",
            table = origin.table()
        );
        sqlx::query_as::<_, Requisition>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a requisition into one origin table, returning the created row.
    pub async fn create(
        pool: &PgPool,
        origin: RequisitionOrigin,
        input: &CreateRequisition,
    ) -> Result<Requisition, sqlx::Error> {
        let query = format!(
            "INSERT INTO {table}
                (nombre_solicitante, departamento_origen, descripcion, datos_adicionales, fecha_solicitud)
             VALUES ($1, $2, $3, $4, COALESCE($5, NOW()))
             RETURNING {COLUMNS}",
            table = origin.table()
        );
        sqlx::query_as::<_, Requisition>(&query)
            .bind(&input.nombre_solicitante)
            .bind(&input.departamento_origen)
            .bind(&input.descripcion)
            .bind(sqlx::types::Json(&input.datos_adicionales))
            .bind(input.fecha_solicitud)
            .fetch_one(pool)
            .await
    }
}
