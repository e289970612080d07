//! Repository for the `shooting_days` table.

use callsheet_core::types::DbId;
use sqlx::PgPool;

use crate::models::shooting_day::{CreateShootingDay, ShootingDay, UpdateShootingDay};

const COLUMNS: &str = "id, project_id, day_number, shoot_date, call_time, base_location, \
    weather_note, notes, deleted_at, created_at, updated_at";

/// A day is only visible while its project is.
const PROJECT_LIVE: &str = "EXISTS (SELECT 1 FROM projects p \
    WHERE p.id = shooting_days.project_id AND p.deleted_at IS NULL)";

/// Provides CRUD operations for shooting days.
pub struct ShootingDayRepo;

impl ShootingDayRepo {
    /// Insert a new shooting day, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateShootingDay,
    ) -> Result<ShootingDay, sqlx::Error> {
        let query = format!(
            "INSERT INTO shooting_days
                (project_id, day_number, shoot_date, call_time, base_location, weather_note, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ShootingDay>(&query)
            .bind(input.project_id)
            .bind(input.day_number)
            .bind(input.shoot_date)
            .bind(&input.call_time)
            .bind(&input.base_location)
            .bind(&input.weather_note)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a shooting day by ID. Excludes soft-deleted days and days of a
    /// soft-deleted project.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ShootingDay>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM shooting_days
             WHERE id = $1 AND deleted_at IS NULL AND {PROJECT_LIVE}"
        );
        sqlx::query_as::<_, ShootingDay>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the shooting days of a project ordered by day number.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ShootingDay>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM shooting_days
             WHERE project_id = $1 AND deleted_at IS NULL AND {PROJECT_LIVE}
             ORDER BY day_number ASC, id ASC"
        );
        sqlx::query_as::<_, ShootingDay>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update a shooting day. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateShootingDay,
    ) -> Result<Option<ShootingDay>, sqlx::Error> {
        let query = format!(
            "UPDATE shooting_days SET
                day_number = COALESCE($2, day_number),
                shoot_date = COALESCE($3, shoot_date),
                call_time = COALESCE($4, call_time),
                base_location = COALESCE($5, base_location),
                weather_note = COALESCE($6, weather_note),
                notes = COALESCE($7, notes)
             WHERE id = $1 AND deleted_at IS NULL AND {PROJECT_LIVE}
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ShootingDay>(&query)
            .bind(id)
            .bind(input.day_number)
            .bind(input.shoot_date)
            .bind(&input.call_time)
            .bind(&input.base_location)
            .bind(&input.weather_note)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a shooting day. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE shooting_days SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
