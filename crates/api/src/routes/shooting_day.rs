//! Route definitions for shooting days and their shot plans.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{shooting_day, shot_plan};
use crate::state::AppState;

/// Routes mounted at `/shooting-days`.
///
/// ```text
/// GET    /{id}                                      get_by_id
/// PUT    /{id}                                      update
/// DELETE /{id}                                      delete
///
/// GET    /{day_id}/shot-plan                        get_plan
/// POST   /{day_id}/shot-plan/rows                   add_row
/// PATCH  /{day_id}/shot-plan/rows/{row_id}          update_row
/// DELETE /{day_id}/shot-plan/rows/{row_id}          remove_row
/// POST   /{day_id}/shot-plan/rows/{row_id}/cast     add_cast
/// POST   /{day_id}/shot-plan/rows/{row_id}/apply-to-scene
///                                                   apply_to_same_scene
/// POST   /{day_id}/shot-plan/allocate               allocate
/// POST   /{day_id}/shot-plan/expand-scene           expand_scene
/// POST   /{day_id}/shot-plan/reorder                reorder
/// POST   /{day_id}/shot-plan/flush                  flush
/// ```
pub fn router() -> Router<AppState> {
    let plan_routes = Router::new()
        .route("/", get(shot_plan::get_plan))
        .route("/rows", post(shot_plan::add_row))
        .route(
            "/rows/{row_id}",
            patch(shot_plan::update_row).delete(shot_plan::remove_row),
        )
        .route("/rows/{row_id}/cast", post(shot_plan::add_cast))
        .route(
            "/rows/{row_id}/apply-to-scene",
            post(shot_plan::apply_to_same_scene),
        )
        .route("/allocate", post(shot_plan::allocate))
        .route("/expand-scene", post(shot_plan::expand_scene))
        .route("/reorder", post(shot_plan::reorder))
        .route("/flush", post(shot_plan::flush));

    Router::new()
        .route(
            "/{id}",
            get(shooting_day::get_by_id)
                .put(shooting_day::update)
                .delete(shooting_day::delete),
        )
        .nest("/{day_id}/shot-plan", plan_routes)
}
