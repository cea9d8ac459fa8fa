//! Handlers for the approval ledger.
//!
//! Decisions are recorded against a requisition with a snapshot of its
//! current row. Approved entries can later be confirmed as delivered.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use reqdesk_core::approval::{
    ensure_deliverable, parse_decision, partition_tabs, validate_person_name,
};
use reqdesk_core::error::CoreError;
use reqdesk_core::requisition::RequisitionOrigin;
use reqdesk_core::types::DbId;
use reqdesk_db::models::approval::{CreateApproval, DeliverRequest, RecordDecisionRequest};
use reqdesk_db::repositories::{ApprovalRepo, RequisitionRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/aprobaciones
///
/// List ledger entries that are undelivered or were delivered within the
/// retention window, newest decision first.
pub async fn list_active(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let entries = ApprovalRepo::list_active(&state.pool).await?;
    Ok(Json(entries))
}

/// GET /api/aprobaciones/pestanas
///
/// The active ledger split into approved, rejected and delivered tabs.
pub async fn list_tabs(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let entries = ApprovalRepo::list_active(&state.pool).await?;
    Ok(Json(partition_tabs(entries)))
}

/// GET /api/aprobaciones/entregas-recientes
pub async fn list_recent_deliveries(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let entries = ApprovalRepo::list_recent_deliveries(&state.pool).await?;
    Ok(Json(entries))
}

/// GET /api/aprobaciones/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let entry = ApprovalRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Approval",
            id,
        }))?;
    Ok(Json(entry))
}

/// POST /api/aprobaciones
///
/// Record an approve/reject decision for a requisition. The requisition row
/// is copied into the entry as it is at decision time.
pub async fn record_decision(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<RecordDecisionRequest>,
) -> AppResult<impl IntoResponse> {
    let origin: RequisitionOrigin = input.tabla_origen.parse()?;
    let estado = parse_decision(&input.estado)?;
    let aprobador = validate_person_name("aprobador", &input.aprobador)?;

    let requisition = RequisitionRepo::find_by_id(&state.pool, origin, input.requisicion_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Requisition",
            id: input.requisicion_id,
        }))?;

    let datos_completos = serde_json::to_value(&requisition)
        .map_err(|e| AppError::InternalError(format!("Snapshot serialization error: {e}")))?;

    let create = CreateApproval {
        requisicion_id: requisition.id,
        tabla_origen: origin.table(),
        datos_completos,
        estado,
        aprobador,
    };
    let entry = ApprovalRepo::create(&state.pool, &create).await?;

    tracing::info!(
        user_id = auth.user_id,
        username = %auth.username,
        approval_id = entry.id,
        requisicion_id = entry.requisicion_id,
        tabla_origen = %entry.tabla_origen,
        estado = %entry.estado,
        "Requisition decision recorded"
    );

    Ok((StatusCode::CREATED, Json(entry)))
}

/// PATCH /api/aprobaciones/{id}/entregar
///
/// Confirm the delivery of an approved entry. Rejected or already delivered
/// entries answer 409.
pub async fn mark_delivered(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<DeliverRequest>,
) -> AppResult<impl IntoResponse> {
    let entregado_por = validate_person_name("entregado_por", &input.entregado_por)?;
    let observaciones = input
        .observaciones
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let updated =
        ApprovalRepo::mark_delivered(&state.pool, id, &entregado_por, observaciones).await?;

    let Some(entry) = updated else {
        // Nothing matched: either the entry is missing or it is not approved.
        let existing = ApprovalRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Approval",
                id,
            }))?;
        ensure_deliverable(id, &existing.estado)?;
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Approval {id} could not be marked as delivered"
        ))));
    };

    tracing::info!(
        user_id = auth.user_id,
        username = %auth.username,
        approval_id = entry.id,
        entregado_por = %entregado_por,
        "Delivery confirmed"
    );

    Ok(Json(entry))
}
