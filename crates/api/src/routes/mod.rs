pub mod health;
pub mod project;
pub mod shooting_day;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                                        list, create
/// /projects/{id}                                   get, update, delete
/// /projects/{project_id}/shooting-days             list, create
///
/// /shooting-days/{id}                              get, update, delete
/// /shooting-days/{day_id}/shot-plan                current rows
/// /shooting-days/{day_id}/shot-plan/rows           add row
/// /shooting-days/{day_id}/shot-plan/rows/{row_id}  edit, remove
/// /shooting-days/{day_id}/shot-plan/allocate       time allocation
/// /shooting-days/{day_id}/shot-plan/expand-scene   batch cut generation
/// /shooting-days/{day_id}/shot-plan/reorder        drag-and-drop move
/// /shooting-days/{day_id}/shot-plan/flush          persist now
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .nest("/shooting-days", shooting_day::router())
}
