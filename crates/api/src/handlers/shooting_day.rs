//! Handlers for shooting days (call sheet headers).
//!
//! Days are created and listed under their project:
//! `/projects/{project_id}/shooting-days`, and addressed directly at
//! `/shooting-days/{id}` afterwards.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use callsheet_core::clock::ClockTime;
use callsheet_core::error::CoreError;
use callsheet_core::types::DbId;
use callsheet_db::models::shooting_day::{CreateShootingDay, ShootingDay, UpdateShootingDay};
use callsheet_db::repositories::{ProjectRepo, ShootingDayRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Normalise an optional call time to `HH:MM`, rejecting anything unparseable.
fn normalise_call_time(call_time: &mut Option<String>) -> Result<(), CoreError> {
    if let Some(raw) = call_time.as_deref() {
        *call_time = Some(raw.parse::<ClockTime>()?.to_string());
    }
    Ok(())
}

fn validate_day_number(day_number: i32) -> Result<(), CoreError> {
    if day_number < 1 {
        return Err(CoreError::Validation(format!(
            "day_number must be >= 1, got {day_number}"
        )));
    }
    Ok(())
}

/// POST /api/v1/projects/{project_id}/shooting-days
///
/// Overrides `input.project_id` with the value from the URL path.
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(mut input): Json<CreateShootingDay>,
) -> AppResult<(StatusCode, Json<DataResponse<ShootingDay>>)> {
    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or_else(|| AppError::not_found("Project", project_id))?;

    input.project_id = project_id;
    validate_day_number(input.day_number)?;
    normalise_call_time(&mut input.call_time)?;

    let day = ShootingDayRepo::create(&state.pool, &input).await?;
    tracing::info!(project_id, shooting_day_id = day.id, "Shooting day created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: day })))
}

/// GET /api/v1/projects/{project_id}/shooting-days
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ShootingDay>>>> {
    let days = ShootingDayRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: days }))
}

/// GET /api/v1/shooting-days/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ShootingDay>>> {
    let day = ShootingDayRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("ShootingDay", id))?;
    Ok(Json(DataResponse { data: day }))
}

/// PUT /api/v1/shooting-days/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateShootingDay>,
) -> AppResult<Json<DataResponse<ShootingDay>>> {
    if let Some(day_number) = input.day_number {
        validate_day_number(day_number)?;
    }
    normalise_call_time(&mut input.call_time)?;

    let day = ShootingDayRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("ShootingDay", id))?;
    Ok(Json(DataResponse { data: day }))
}

/// DELETE /api/v1/shooting-days/{id}
///
/// Also drops any open edit session for the day, discarding unsaved edits.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if ShootingDayRepo::soft_delete(&state.pool, id).await? {
        state.sessions.evict(id).await;
        tracing::info!(shooting_day_id = id, "Shooting day deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("ShootingDay", id))
    }
}
