//! Requisition rows from the three origin tables.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;
use reqdesk_core::requisition::RequisitionOrigin;
use reqdesk_core::types::{DbId, Timestamp};

/// A row from any of the `requisiciones_*` tables.
///
/// The extra, schema-less fields stored in `datos_adicionales` are flattened
/// next to the fixed columns when serialized.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Requisition {
    pub id: DbId,
    pub nombre_solicitante: String,
    pub departamento_origen: String,
    pub descripcion: String,
    pub fecha_solicitud: Timestamp,
    #[sqlx(json)]
    #[serde(flatten)]
    pub datos_adicionales: Map<String, Value>,
}

/// A requisition tagged with the origin it was read from (combined listing).
#[derive(Debug, Clone, Serialize)]
pub struct TaggedRequisition {
    /// Display label of the origin (`TIC`, `Logística`, `Compras`).
    pub tipo: &'static str,
    /// Table identifier of the origin, as stored in the approvals ledger.
    pub tabla_origen: &'static str,
    #[serde(flatten)]
    pub requisition: Requisition,
}

impl TaggedRequisition {
    pub fn new(origin: RequisitionOrigin, requisition: Requisition) -> Self {
        Self {
            tipo: origin.label(),
            tabla_origen: origin.table(),
            requisition,
        }
    }
}

/// DTO for inserting a requisition.
///
/// Requisitions are submitted through a separate front end; this is used to
/// seed rows (operators, tests).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRequisition {
    pub nombre_solicitante: String,
    pub departamento_origen: String,
    pub descripcion: String,
    #[serde(default)]
    pub datos_adicionales: Map<String, Value>,
    /// Submission time; `None` uses the database clock.
    pub fecha_solicitud: Option<Timestamp>,
}
