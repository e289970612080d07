//! Shot plan of a shooting day: the ordered cut list and its editing
//! operations.
//!
//! The free functions in the submodules are pure `(&[ShotRow], params) ->
//! Vec<ShotRow>` transforms. [`ShotPlan`] is the single-owner document that
//! an editing session holds and mutates through them; persisting the result
//! is the caller's job.

pub mod allocator;
pub mod ordering;
pub mod propagate;
pub mod row;
pub mod scene_batch;

pub use allocator::{
    allocate, allocate_with_summary, AllocateRequest, AllocationMode, AllocationSummary,
    AllocatorConfig, MealBreak,
};
pub use ordering::reorder;
pub use propagate::apply_to_same_scene;
pub use row::{LocationType, SceneTime, ShotRow, ShotRowPatch};
pub use scene_batch::{expand_scene, expand_scene_with, SceneBatchConfig};

use crate::error::CoreError;
use crate::types::RowId;

/// The ordered shot rows of one shooting day.
///
/// Every method leaves `sequence` equal to index + 1.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShotPlan {
    rows: Vec<ShotRow>,
}

impl ShotPlan {
    /// Wrap rows loaded from storage, sorting by `sequence` and recompacting.
    pub fn from_rows(mut rows: Vec<ShotRow>) -> Self {
        rows.sort_by_key(|r| r.sequence);
        ordering::renumber(&mut rows);
        Self { rows }
    }

    pub fn rows(&self) -> &[ShotRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<ShotRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: RowId) -> Option<&ShotRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    fn position(&self, id: RowId) -> Result<usize, CoreError> {
        self.rows
            .iter()
            .position(|r| r.id == id)
            .ok_or(CoreError::RowNotFound(id))
    }

    /// Append an empty row and return it.
    pub fn add_row(&mut self) -> &ShotRow {
        let row = ShotRow::empty(uuid::Uuid::new_v4(), self.rows.len() as i32 + 1);
        self.rows.push(row);
        &self.rows[self.rows.len() - 1]
    }

    /// Apply an inline field edit to one row.
    pub fn update_row(&mut self, id: RowId, patch: &ShotRowPatch) -> Result<&ShotRow, CoreError> {
        let idx = self.position(id)?;
        self.rows[idx].apply_patch(patch);
        Ok(&self.rows[idx])
    }

    /// Add a cast id to one row. Duplicates are ignored.
    pub fn add_cast(&mut self, id: RowId, cast: &str) -> Result<&ShotRow, CoreError> {
        let idx = self.position(id)?;
        self.rows[idx].add_cast(cast);
        Ok(&self.rows[idx])
    }

    /// Remove a row and recompact the sequence. Returns the removed row.
    pub fn remove_row(&mut self, id: RowId) -> Result<ShotRow, CoreError> {
        let idx = self.position(id)?;
        let removed = self.rows.remove(idx);
        ordering::renumber(&mut self.rows);
        Ok(removed)
    }

    /// Time every row. See [`allocator::allocate`].
    pub fn allocate(&mut self, cfg: &AllocatorConfig) -> AllocationSummary {
        let (rows, summary) = allocator::allocate_with_summary(&self.rows, cfg);
        self.rows = rows;
        summary
    }

    /// Append a batch of cuts for one scene. Returns the new rows.
    pub fn expand_scene(&mut self, cfg: &SceneBatchConfig) -> Result<&[ShotRow], CoreError> {
        cfg.validate()?;
        let before = self.rows.len();
        self.rows = scene_batch::expand_scene(&self.rows, cfg);
        Ok(&self.rows[before..])
    }

    /// Copy the scene attributes of row `source_id` to the rest of its scene.
    pub fn apply_to_same_scene(&mut self, source_id: RowId) -> Result<(), CoreError> {
        let idx = self.position(source_id)?;
        self.rows = propagate::apply_to_same_scene(&self.rows, &self.rows[idx]);
        Ok(())
    }

    /// Move a row from one index to another.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), CoreError> {
        self.rows = ordering::reorder(&self.rows, from, to)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn seq_is_permutation(plan: &ShotPlan) -> bool {
        let mut seqs: Vec<_> = plan.rows().iter().map(|r| r.sequence).collect();
        seqs.sort();
        seqs == (1..=plan.len() as i32).collect::<Vec<_>>()
    }

    fn batch(scene: &str, count: u32) -> SceneBatchConfig {
        SceneBatchConfig {
            scene_number: scene.into(),
            cut_count: count,
            scene_time: Some(SceneTime::Night),
            location_type: Some(LocationType::Exterior),
            location: Some("Rooftop".into()),
        }
    }

    #[test]
    fn from_rows_sorts_and_compacts() {
        let a = ShotRow::empty(uuid::Uuid::new_v4(), 7);
        let b = ShotRow::empty(uuid::Uuid::new_v4(), 3);
        let plan = ShotPlan::from_rows(vec![a.clone(), b.clone()]);
        assert_eq!(plan.rows()[0].id, b.id);
        assert_eq!(plan.rows()[0].sequence, 1);
        assert_eq!(plan.rows()[1].id, a.id);
        assert_eq!(plan.rows()[1].sequence, 2);
    }

    #[test]
    fn sequence_stays_compact_through_edits() {
        let mut plan = ShotPlan::default();
        plan.add_row();
        plan.expand_scene(&batch("12", 3)).unwrap();
        assert!(seq_is_permutation(&plan));

        let second = plan.rows()[1].id;
        plan.remove_row(second).unwrap();
        assert!(ordering::is_compact(plan.rows()));

        plan.reorder(2, 0).unwrap();
        assert!(ordering::is_compact(plan.rows()));

        let source = plan.rows()[0].id;
        plan.apply_to_same_scene(source).unwrap();
        assert!(ordering::is_compact(plan.rows()));

        let cfg = AllocatorConfig {
            mode: AllocationMode::PerCut {
                minutes_per_cut: 10,
            },
            start_time: "08:00".parse().unwrap(),
            break_minutes: 0,
            meal: None,
        };
        plan.allocate(&cfg);
        assert!(ordering::is_compact(plan.rows()));
        assert_eq!(plan.len(), 3);
    }

    #[test]
    fn expand_scene_returns_new_rows() {
        let mut plan = ShotPlan::default();
        plan.add_row();
        let added = plan.expand_scene(&batch("3", 2)).unwrap();
        assert_eq!(added.len(), 2);
        assert_eq!(added[0].sequence, 2);
        assert_eq!(added[1].cut_number.as_deref(), Some("3-2"));
    }

    #[test]
    fn expand_scene_validates_config() {
        let mut plan = ShotPlan::default();
        assert_matches!(
            plan.expand_scene(&batch("", 2)),
            Err(CoreError::Validation(_))
        );
        assert!(plan.is_empty());
    }

    #[test]
    fn unknown_row_is_reported() {
        let mut plan = ShotPlan::default();
        let id = uuid::Uuid::new_v4();
        assert_matches!(plan.remove_row(id), Err(CoreError::RowNotFound(x)) if x == id);
        assert_matches!(plan.apply_to_same_scene(id), Err(CoreError::RowNotFound(_)));
    }

    #[test]
    fn update_and_cast_edits() {
        let mut plan = ShotPlan::default();
        let id = plan.add_row().id;
        let patch = ShotRowPatch {
            content: Some("dolly in".into()),
            ..Default::default()
        };
        plan.update_row(id, &patch).unwrap();
        plan.add_cast(id, "Mia").unwrap();
        plan.add_cast(id, "Mia").unwrap();
        let row = plan.get(id).unwrap();
        assert_eq!(row.content, "dolly in");
        assert_eq!(row.cast_ids, vec!["Mia"]);
    }
}
