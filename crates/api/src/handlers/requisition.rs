//! Handlers for reading requisitions from the three origin tables.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use reqdesk_core::error::CoreError;
use reqdesk_core::requisition::RequisitionOrigin;
use reqdesk_core::types::DbId;
use reqdesk_db::repositories::RequisitionRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/requisiciones/todas
///
/// Every requisition from all origins, tagged with its origin and sorted
/// newest submission first.
pub async fn list_combined(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let rows = RequisitionRepo::list_combined(&state.pool).await?;
    tracing::debug!(count = rows.len(), "Combined requisitions listed");
    Ok(Json(rows))
}

/// GET /api/requisiciones/{origin}
pub async fn list_by_origin(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(origin): Path<String>,
) -> AppResult<impl IntoResponse> {
    let origin: RequisitionOrigin = origin.parse()?;
    let rows = RequisitionRepo::list_by_origin(&state.pool, origin).await?;
    Ok(Json(rows))
}

/// GET /api/requisiciones/{origin}/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path((origin, id)): Path<(String, DbId)>,
) -> AppResult<impl IntoResponse> {
    let origin: RequisitionOrigin = origin.parse()?;
    let row = RequisitionRepo::find_by_id(&state.pool, origin, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Requisition",
            id,
        }))?;
    Ok(Json(row))
}
