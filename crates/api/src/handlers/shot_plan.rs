//! Handlers for editing a shooting day's shot plan.
//!
//! Every handler goes through the day's edit session in
//! [`PlanSessions`](crate::session::PlanSessions): reads return the
//! in-memory plan, mutations apply a core operation to it and leave the
//! write to the debounced flush task. `POST .../flush` writes immediately.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use callsheet_core::error::CoreError;
use callsheet_core::shot_plan::{
    AllocateRequest, AllocationSummary, SceneBatchConfig, ShotRow, ShotRowPatch,
};
use callsheet_core::types::{DbId, RowId};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST .../rows/{row_id}/cast`.
#[derive(Debug, Deserialize)]
pub struct AddCastRequest {
    pub cast: String,
}

/// Request body for `POST .../reorder`.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub from_index: usize,
    pub to_index: usize,
}

/// Response body for `POST .../allocate`.
#[derive(Debug, Serialize)]
pub struct AllocateResponse {
    pub rows: Vec<ShotRow>,
    pub summary: AllocationSummary,
}

/// Response body for `POST .../flush`.
#[derive(Debug, Serialize)]
pub struct FlushResponse {
    /// `false` when there were no unsaved edits.
    pub written: bool,
}

/// GET /api/v1/shooting-days/{day_id}/shot-plan
pub async fn get_plan(
    State(state): State<AppState>,
    Path(day_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ShotRow>>>> {
    let rows = state.sessions.rows(&state.pool, day_id).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// POST /api/v1/shooting-days/{day_id}/shot-plan/rows
pub async fn add_row(
    State(state): State<AppState>,
    Path(day_id): Path<DbId>,
) -> AppResult<(StatusCode, Json<DataResponse<ShotRow>>)> {
    let row = state
        .sessions
        .edit(&state.pool, day_id, |session| {
            Ok(session.plan_mut().add_row().clone())
        })
        .await?;

    tracing::debug!(shooting_day_id = day_id, row_id = %row.id, "Shot row added");
    Ok((StatusCode::CREATED, Json(DataResponse { data: row })))
}

/// PATCH /api/v1/shooting-days/{day_id}/shot-plan/rows/{row_id}
pub async fn update_row(
    State(state): State<AppState>,
    Path((day_id, row_id)): Path<(DbId, RowId)>,
    Json(patch): Json<ShotRowPatch>,
) -> AppResult<Json<DataResponse<ShotRow>>> {
    let row = state
        .sessions
        .edit(&state.pool, day_id, |session| {
            session.plan_mut().update_row(row_id, &patch).cloned()
        })
        .await?;
    Ok(Json(DataResponse { data: row }))
}

/// DELETE /api/v1/shooting-days/{day_id}/shot-plan/rows/{row_id}
pub async fn remove_row(
    State(state): State<AppState>,
    Path((day_id, row_id)): Path<(DbId, RowId)>,
) -> AppResult<StatusCode> {
    state
        .sessions
        .edit(&state.pool, day_id, |session| session.remove_row(row_id))
        .await?;

    tracing::debug!(shooting_day_id = day_id, row_id = %row_id, "Shot row removed");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/shooting-days/{day_id}/shot-plan/rows/{row_id}/cast
///
/// Adding a cast id the row already has is a no-op, not an error.
pub async fn add_cast(
    State(state): State<AppState>,
    Path((day_id, row_id)): Path<(DbId, RowId)>,
    Json(input): Json<AddCastRequest>,
) -> AppResult<Json<DataResponse<ShotRow>>> {
    let cast = input.cast.trim().to_string();
    if cast.is_empty() {
        return Err(CoreError::Validation("cast must not be empty".to_string()).into());
    }

    let row = state
        .sessions
        .edit(&state.pool, day_id, |session| {
            session.plan_mut().add_cast(row_id, &cast).cloned()
        })
        .await?;
    Ok(Json(DataResponse { data: row }))
}

/// POST /api/v1/shooting-days/{day_id}/shot-plan/rows/{row_id}/apply-to-scene
///
/// Copies the row's scene time, location type and location to every other
/// row of the same scene. Returns the whole plan.
pub async fn apply_to_same_scene(
    State(state): State<AppState>,
    Path((day_id, row_id)): Path<(DbId, RowId)>,
) -> AppResult<Json<DataResponse<Vec<ShotRow>>>> {
    let rows = state
        .sessions
        .edit(&state.pool, day_id, |session| {
            let plan = session.plan_mut();
            plan.apply_to_same_scene(row_id)?;
            Ok(plan.rows().to_vec())
        })
        .await?;
    Ok(Json(DataResponse { data: rows }))
}

/// POST /api/v1/shooting-days/{day_id}/shot-plan/allocate
pub async fn allocate(
    State(state): State<AppState>,
    Path(day_id): Path<DbId>,
    Json(input): Json<AllocateRequest>,
) -> AppResult<Json<DataResponse<AllocateResponse>>> {
    let cfg = input.into_config()?;

    let (rows, summary) = state
        .sessions
        .edit(&state.pool, day_id, |session| {
            let plan = session.plan_mut();
            let summary = plan.allocate(&cfg);
            Ok((plan.rows().to_vec(), summary))
        })
        .await?;

    tracing::info!(
        shooting_day_id = day_id,
        cuts = rows.len(),
        minutes_per_cut = summary.minutes_per_cut,
        meal_inserted = summary.meal_inserted,
        "Shot plan times allocated",
    );
    Ok(Json(DataResponse {
        data: AllocateResponse { rows, summary },
    }))
}

/// POST /api/v1/shooting-days/{day_id}/shot-plan/expand-scene
///
/// Appends the scene's cuts and returns the whole plan.
pub async fn expand_scene(
    State(state): State<AppState>,
    Path(day_id): Path<DbId>,
    Json(input): Json<SceneBatchConfig>,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<ShotRow>>>)> {
    input.validate()?;

    let rows = state
        .sessions
        .edit(&state.pool, day_id, |session| {
            session.plan_mut().expand_scene(&input)?;
            Ok(session.plan().rows().to_vec())
        })
        .await?;

    tracing::info!(
        shooting_day_id = day_id,
        scene_number = %input.scene_number,
        cut_count = input.cut_count,
        "Scene expanded",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: rows })))
}

/// POST /api/v1/shooting-days/{day_id}/shot-plan/reorder
pub async fn reorder(
    State(state): State<AppState>,
    Path(day_id): Path<DbId>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<Json<DataResponse<Vec<ShotRow>>>> {
    let rows = state
        .sessions
        .edit(&state.pool, day_id, |session| {
            let plan = session.plan_mut();
            plan.reorder(input.from_index, input.to_index)?;
            Ok(plan.rows().to_vec())
        })
        .await?;
    Ok(Json(DataResponse { data: rows }))
}

/// POST /api/v1/shooting-days/{day_id}/shot-plan/flush
pub async fn flush(
    State(state): State<AppState>,
    Path(day_id): Path<DbId>,
) -> AppResult<Json<DataResponse<FlushResponse>>> {
    let written = state.sessions.flush(&state.pool, day_id).await?;
    if written {
        tracing::info!(shooting_day_id = day_id, "Shot plan flushed on request");
    }
    Ok(Json(DataResponse {
        data: FlushResponse { written },
    }))
}
