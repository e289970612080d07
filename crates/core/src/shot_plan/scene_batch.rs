//! Batch generation of cut rows for one scene.

use serde::Deserialize;

use crate::error::CoreError;
use crate::shot_plan::row::{LocationType, SceneTime, ShotRow};
use crate::types::RowId;

/// Largest batch the editor offers. Not enforced by [`expand_scene`].
pub const MAX_CUTS_PER_BATCH: u32 = 50;

/// Scene-level values shared by every generated cut.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneBatchConfig {
    pub scene_number: String,
    pub cut_count: u32,
    pub scene_time: Option<SceneTime>,
    pub location_type: Option<LocationType>,
    pub location: Option<String>,
}

impl SceneBatchConfig {
    /// Reject a blank scene number or a zero cut count.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.scene_number.trim().is_empty() {
            return Err(CoreError::Validation(
                "scene_number must not be empty".to_string(),
            ));
        }
        if self.cut_count == 0 {
            return Err(CoreError::Validation(
                "cut_count must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Append `cfg.cut_count` new rows for the scene, using UUID v4 ids.
pub fn expand_scene(rows: &[ShotRow], cfg: &SceneBatchConfig) -> Vec<ShotRow> {
    expand_scene_with(rows, cfg, uuid::Uuid::new_v4)
}

/// Append `cfg.cut_count` new rows for the scene, drawing ids from `next_id`.
///
/// Existing rows are copied unchanged. New cuts are numbered
/// `"{scene}-1"`, `"{scene}-2"`, ... with no check against cut numbers
/// already present, so expanding the same scene twice repeats them.
pub fn expand_scene_with(
    rows: &[ShotRow],
    cfg: &SceneBatchConfig,
    mut next_id: impl FnMut() -> RowId,
) -> Vec<ShotRow> {
    let start_sequence = rows.len() as i32 + 1;
    let location = cfg.location.clone().filter(|l| !l.is_empty());

    let mut out = Vec::with_capacity(rows.len() + cfg.cut_count as usize);
    out.extend_from_slice(rows);

    for i in 0..cfg.cut_count {
        let mut row = ShotRow::empty(next_id(), start_sequence + i as i32);
        row.scene_number = Some(cfg.scene_number.clone());
        row.cut_number = Some(format!("{}-{}", cfg.scene_number, i + 1));
        row.scene_time = cfg.scene_time;
        row.location_type = cfg.location_type;
        row.location = location.clone();
        out.push(row);
    }
    out
}
