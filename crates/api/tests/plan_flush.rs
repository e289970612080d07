//! Tests for edit-session lifetime and the background flush task.
//!
//! These drive the router like the other API tests but keep hold of the
//! session store and the flush task, so they can check what stays in
//! memory, stop the task, and force write failures.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use callsheet_db::repositories::ShotRowRepo;
use common::{body_json, create_day, delete, get, post, post_json, spawn_test_app, SLOW_DEBOUNCE_MS};
use serde_json::json;
use sqlx::PgPool;

fn plan_uri(day_id: i64) -> String {
    format!("/api/v1/shooting-days/{day_id}/shot-plan")
}

fn scene(number: &str, cuts: u32) -> serde_json::Value {
    json!({ "scene_number": number, "cut_count": cuts })
}

async fn stored_rows(pool: &PgPool, day_id: i64) -> usize {
    ShotRowRepo::list_by_day(pool, day_id).await.unwrap().len()
}

/// Poll until `day_id` has `expected` stored rows or about five seconds pass.
async fn wait_for_rows(pool: &PgPool, day_id: i64, expected: usize) -> usize {
    let mut stored = 0;
    for _ in 0..100 {
        stored = stored_rows(pool, day_id).await;
        if stored == expected {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    stored
}

// ---------------------------------------------------------------------------
// Session lifetime
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_flush_closes_clean_session(pool: PgPool) {
    let app = spawn_test_app(pool.clone(), SLOW_DEBOUNCE_MS);
    let day_id = create_day(&app.router).await;

    post_json(
        app.router.clone(),
        &format!("{}/expand-scene", plan_uri(day_id)),
        scene("6", 3),
    )
    .await;
    assert_eq!(app.sessions.len().await, 1);
    assert!(app.sessions.is_dirty(day_id).await);

    post(app.router.clone(), &format!("{}/flush", plan_uri(day_id))).await;
    assert!(app.sessions.is_empty().await);

    // Reads of a day nobody is editing come from the database and do not
    // open a session.
    let response = get(app.router.clone(), &plan_uri(day_id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 3);
    assert!(app.sessions.is_empty().await);

    // The next edit reopens the day from the stored plan.
    let response = post(app.router.clone(), &format!("{}/rows", plan_uri(day_id))).await;
    assert_eq!(body_json(response).await["data"]["sequence"], 4);
    assert_eq!(app.sessions.len().await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_delete_drops_day_sessions(pool: PgPool) {
    let app = spawn_test_app(pool, SLOW_DEBOUNCE_MS);
    let day_id = create_day(&app.router).await;
    let day = body_json(get(app.router.clone(), &format!("/api/v1/shooting-days/{day_id}")).await).await;
    let project_id = day["data"]["project_id"].as_i64().unwrap();

    post(app.router.clone(), &format!("{}/rows", plan_uri(day_id))).await;
    assert_eq!(app.sessions.len().await, 1);

    let response = delete(app.router.clone(), &format!("/api/v1/projects/{project_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(app.sessions.is_empty().await);

    let response = get(app.router.clone(), &plan_uri(day_id)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = post(app.router.clone(), &format!("{}/rows", plan_uri(day_id))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(app.sessions.is_empty().await);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_day_delete_racing_first_edit_leaves_no_session(pool: PgPool) {
    let app = spawn_test_app(pool, SLOW_DEBOUNCE_MS);

    for _ in 0..10 {
        let day_id = create_day(&app.router).await;
        let rows_uri = format!("{}/rows", plan_uri(day_id));
        let day_uri = format!("/api/v1/shooting-days/{day_id}");
        let (edit, removed) = tokio::join!(
            post(app.router.clone(), &rows_uri),
            delete(app.router.clone(), &day_uri),
        );
        assert_eq!(removed.status(), StatusCode::NO_CONTENT);
        assert!(matches!(
            edit.status(),
            StatusCode::CREATED | StatusCode::NOT_FOUND
        ));
        assert!(app.sessions.is_empty().await);
    }
}

// ---------------------------------------------------------------------------
// Flush task
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cancel_drains_pending_edits(pool: PgPool) {
    let app = spawn_test_app(pool.clone(), SLOW_DEBOUNCE_MS);
    let day_id = create_day(&app.router).await;

    post_json(
        app.router.clone(),
        &format!("{}/expand-scene", plan_uri(day_id)),
        scene("11", 3),
    )
    .await;
    assert_eq!(stored_rows(&pool, day_id).await, 0);

    app.cancel.cancel();
    tokio::time::timeout(Duration::from_secs(5), app.flush_task)
        .await
        .expect("flush task should stop after cancel")
        .unwrap();

    assert_eq!(stored_rows(&pool, day_id).await, 3);
    assert!(app.sessions.is_empty().await);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_flush_stays_dirty_and_retries(pool: PgPool) {
    let app = spawn_test_app(pool.clone(), 300);
    let day_id = create_day(&app.router).await;
    let day = body_json(get(app.router.clone(), &format!("/api/v1/shooting-days/{day_id}")).await).await;
    let project_id = day["data"]["project_id"].as_i64().unwrap();

    post_json(
        app.router.clone(),
        &format!("{}/expand-scene", plan_uri(day_id)),
        scene("2", 2),
    )
    .await;

    // Remove the day row underneath the session so the save hits the
    // foreign key.
    sqlx::query("DELETE FROM shooting_days WHERE id = $1")
        .bind(day_id)
        .execute(&pool)
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(700)).await;
    assert_eq!(stored_rows(&pool, day_id).await, 0);
    assert!(app.sessions.is_dirty(day_id).await);
    assert_eq!(app.sessions.len().await, 1);

    sqlx::query("INSERT INTO shooting_days (id, project_id, day_number) VALUES ($1, $2, 1)")
        .bind(day_id)
        .bind(project_id)
        .execute(&pool)
        .await
        .unwrap();

    assert_eq!(wait_for_rows(&pool, day_id, 2).await, 2);
    assert!(!app.sessions.is_dirty(day_id).await);
    assert!(app.sessions.is_empty().await);
}
