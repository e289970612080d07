//! Shot row model.
//!
//! The table stores scene attributes and clock times as text; conversion to
//! the typed [`ShotRow`] happens in [`ShotRowRecord::into_row`].

use callsheet_core::clock::ClockTime;
use callsheet_core::error::CoreError;
use callsheet_core::shot_plan::{LocationType, SceneTime, ShotRow};
use callsheet_core::types::{DbId, RowId, Timestamp};
use sqlx::FromRow;

/// A row from the `shot_rows` table.
#[derive(Debug, Clone, FromRow)]
pub struct ShotRowRecord {
    pub id: RowId,
    pub shooting_day_id: DbId,
    pub sequence: i32,
    pub scene_number: Option<String>,
    pub cut_number: Option<String>,
    pub scene_time: Option<String>,
    pub location_type: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub location: Option<String>,
    pub content: String,
    pub cast_ids: Vec<String>,
    pub notes: Option<String>,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ShotRowRecord {
    /// Convert into the domain row, parsing the text columns.
    pub fn into_row(self) -> Result<ShotRow, CoreError> {
        Ok(ShotRow {
            id: self.id,
            sequence: self.sequence,
            scene_number: self.scene_number,
            cut_number: self.cut_number,
            scene_time: self
                .scene_time
                .as_deref()
                .map(str::parse::<SceneTime>)
                .transpose()?,
            location_type: self
                .location_type
                .as_deref()
                .map(str::parse::<LocationType>)
                .transpose()?,
            start_time: parse_time(self.start_time.as_deref())?,
            end_time: parse_time(self.end_time.as_deref())?,
            location: self.location,
            content: self.content,
            cast_ids: self.cast_ids,
            notes: self.notes,
        })
    }
}

fn parse_time(raw: Option<&str>) -> Result<Option<ClockTime>, CoreError> {
    raw.map(str::parse::<ClockTime>).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn record() -> ShotRowRecord {
        ShotRowRecord {
            id: Uuid::new_v4(),
            shooting_day_id: 1,
            sequence: 1,
            scene_number: Some("4".into()),
            cut_number: Some("4-1".into()),
            scene_time: Some("evening".into()),
            location_type: Some("exterior".into()),
            start_time: Some("18:30".into()),
            end_time: None,
            location: Some("Pier".into()),
            content: String::new(),
            cast_ids: vec!["Jo".into()],
            notes: None,
            deleted_at: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn converts_text_columns() {
        let row = record().into_row().unwrap();
        assert_eq!(row.scene_time, Some(SceneTime::Evening));
        assert_eq!(row.location_type, Some(LocationType::Exterior));
        assert_eq!(row.start_time.unwrap().to_string(), "18:30");
        assert_eq!(row.end_time, None);
    }

    #[test]
    fn bad_stored_time_is_an_error() {
        let mut rec = record();
        rec.end_time = Some("late".into());
        assert!(rec.into_row().is_err());
    }
}
