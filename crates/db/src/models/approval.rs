//! Approval ledger models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use reqdesk_core::approval::{ApprovalState, LedgerEntry};
use reqdesk_core::types::{DbId, Timestamp};

/// A row from the `aprobaciones` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Approval {
    pub id: DbId,
    pub requisicion_id: DbId,
    pub tabla_origen: String,
    /// Snapshot of the requisition at decision time.
    pub datos_completos: serde_json::Value,
    pub estado: String,
    pub aprobador: String,
    pub fecha_decision: Timestamp,
    pub entregado_por: Option<String>,
    pub observaciones: Option<String>,
    pub fecha_entrega: Option<Timestamp>,
}

impl LedgerEntry for Approval {
    fn state(&self) -> Option<ApprovalState> {
        ApprovalState::parse(&self.estado)
    }

    fn decided_at(&self) -> Timestamp {
        self.fecha_decision
    }

    fn delivered_at(&self) -> Option<Timestamp> {
        self.fecha_entrega
    }
}

/// DTO for inserting a ledger entry. Built by the handler after validation.
#[derive(Debug, Clone)]
pub struct CreateApproval {
    pub requisicion_id: DbId,
    /// Table identifier of the origin (`RequisitionOrigin::table`).
    pub tabla_origen: &'static str,
    pub datos_completos: serde_json::Value,
    pub estado: ApprovalState,
    pub aprobador: String,
}

/// Request body for `POST /aprobaciones`.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordDecisionRequest {
    /// Origin slug (`tic`) or table identifier (`requisiciones_tic`).
    pub tabla_origen: String,
    pub requisicion_id: DbId,
    pub estado: String,
    #[serde(default)]
    pub aprobador: String,
}

/// Request body for `PATCH /aprobaciones/{id}/entregar`.
#[derive(Debug, Clone, Deserialize)]
pub struct DeliverRequest {
    #[serde(default)]
    pub entregado_por: String,
    pub observaciones: Option<String>,
}
