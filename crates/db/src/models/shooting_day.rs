//! Shooting day (call sheet header) model and DTOs.

use callsheet_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `shooting_days` table.
///
/// `call_time` is stored as `HH:MM` text, the same form the shot plan uses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ShootingDay {
    pub id: DbId,
    pub project_id: DbId,
    pub day_number: i32,
    pub shoot_date: Option<NaiveDate>,
    pub call_time: Option<String>,
    pub base_location: Option<String>,
    pub weather_note: Option<String>,
    pub notes: Option<String>,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a shooting day.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateShootingDay {
    /// Taken from the URL path; ignored in the body.
    #[serde(default)]
    pub project_id: DbId,
    pub day_number: i32,
    pub shoot_date: Option<NaiveDate>,
    pub call_time: Option<String>,
    pub base_location: Option<String>,
    pub weather_note: Option<String>,
    pub notes: Option<String>,
}

/// DTO for updating a shooting day. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateShootingDay {
    pub day_number: Option<i32>,
    pub shoot_date: Option<NaiveDate>,
    pub call_time: Option<String>,
    pub base_location: Option<String>,
    pub weather_note: Option<String>,
    pub notes: Option<String>,
}
