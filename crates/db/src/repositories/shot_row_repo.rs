//! Repository for the `shot_rows` table.
//!
//! Rows are written by upsert keyed on their client-generated UUID, so a
//! whole plan can be saved without knowing which rows are new.

use callsheet_core::shot_plan::ShotRow;
use callsheet_core::types::{DbId, RowId};
use sqlx::PgPool;

use crate::models::shot_row::ShotRowRecord;

const COLUMNS: &str = "id, shooting_day_id, sequence, scene_number, cut_number, scene_time, \
    location_type, start_time, end_time, location, content, cast_ids, notes, \
    deleted_at, created_at, updated_at";

/// Provides persistence for the shot plan of a shooting day.
pub struct ShotRowRepo;

impl ShotRowRepo {
    /// All live rows of a shooting day, ordered by `sequence`.
    pub async fn list_by_day(
        pool: &PgPool,
        shooting_day_id: DbId,
    ) -> Result<Vec<ShotRowRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM shot_rows
             WHERE shooting_day_id = $1 AND deleted_at IS NULL
             ORDER BY sequence ASC, created_at ASC"
        );
        sqlx::query_as::<_, ShotRowRecord>(&query)
            .bind(shooting_day_id)
            .fetch_all(pool)
            .await
    }

    /// Find a single row by ID, including soft-deleted rows.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: RowId,
    ) -> Result<Option<ShotRowRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM shot_rows WHERE id = $1");
        sqlx::query_as::<_, ShotRowRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or update one row.
    pub async fn upsert(
        pool: &PgPool,
        shooting_day_id: DbId,
        row: &ShotRow,
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        Self::upsert_inner(&mut tx, shooting_day_id, row).await?;
        tx.commit().await
    }

    /// Persist a whole plan in one transaction: upsert every row, then
    /// soft-delete the rows removed since the last save.
    pub async fn save_plan(
        pool: &PgPool,
        shooting_day_id: DbId,
        rows: &[ShotRow],
        removed: &[RowId],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        for row in rows {
            Self::upsert_inner(&mut tx, shooting_day_id, row).await?;
        }
        if !removed.is_empty() {
            sqlx::query(
                "UPDATE shot_rows SET deleted_at = NOW()
                 WHERE id = ANY($1) AND shooting_day_id = $2 AND deleted_at IS NULL",
            )
            .bind(removed)
            .bind(shooting_day_id)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        tracing::debug!(
            shooting_day_id,
            upserted = rows.len(),
            removed = removed.len(),
            "Shot plan saved",
        );
        Ok(())
    }

    /// Soft-delete a row. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: RowId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE shot_rows SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn upsert_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        shooting_day_id: DbId,
        row: &ShotRow,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO shot_rows
                (id, shooting_day_id, sequence, scene_number, cut_number, scene_time,
                 location_type, start_time, end_time, location, content, cast_ids, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             ON CONFLICT (id) DO UPDATE SET
                sequence = EXCLUDED.sequence,
                scene_number = EXCLUDED.scene_number,
                cut_number = EXCLUDED.cut_number,
                scene_time = EXCLUDED.scene_time,
                location_type = EXCLUDED.location_type,
                start_time = EXCLUDED.start_time,
                end_time = EXCLUDED.end_time,
                location = EXCLUDED.location,
                content = EXCLUDED.content,
                cast_ids = EXCLUDED.cast_ids,
                notes = EXCLUDED.notes
             WHERE shot_rows.shooting_day_id = EXCLUDED.shooting_day_id",
        )
        .bind(row.id)
        .bind(shooting_day_id)
        .bind(row.sequence)
        .bind(&row.scene_number)
        .bind(&row.cut_number)
        .bind(row.scene_time.map(|t| t.as_str()))
        .bind(row.location_type.map(|t| t.as_str()))
        .bind(row.start_time.map(|t| t.to_string()))
        .bind(row.end_time.map(|t| t.to_string()))
        .bind(&row.location)
        .bind(&row.content)
        .bind(&row.cast_ids)
        .bind(&row.notes)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
