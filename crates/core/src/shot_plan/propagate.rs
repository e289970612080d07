//! Copy scene-level attributes across rows of the same scene.

use crate::shot_plan::row::ShotRow;

/// Give every other row of `source`'s scene the same scene time, interior /
/// exterior flag, and location.
///
/// Rows are matched on a scene number exactly equal to the source's, with no
/// trimming or case folding. Nothing else on the matched rows changes. A
/// source whose scene number is unset or blank is a no-op.
pub fn apply_to_same_scene(rows: &[ShotRow], source: &ShotRow) -> Vec<ShotRow> {
    if source.scene_key().is_none() {
        return rows.to_vec();
    }
    let scene = source.scene_number.as_deref();

    rows.iter()
        .map(|row| {
            let mut row = row.clone();
            if row.id != source.id && row.scene_number.as_deref() == scene {
                row.scene_time = source.scene_time;
                row.location_type = source.location_type;
                row.location = source.location.clone();
            }
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shot_plan::row::{LocationType, SceneTime};
    use uuid::Uuid;

    fn row(seq: i32, scene: Option<&str>, time: SceneTime) -> ShotRow {
        let mut r = ShotRow::empty(Uuid::new_v4(), seq);
        r.scene_number = scene.map(str::to_string);
        r.scene_time = Some(time);
        r
    }

    fn fixture() -> Vec<ShotRow> {
        let mut rows = vec![
            row(1, Some("5"), SceneTime::Day),
            row(2, Some("5"), SceneTime::Night),
            row(3, Some("6"), SceneTime::Night),
        ];
        rows[0].location_type = Some(LocationType::Exterior);
        rows[0].location = Some("Harbour".into());
        rows[1].content = "close up".into();
        rows[1].start_time = Some("10:00".parse().unwrap());
        rows
    }

    #[test]
    fn copies_to_same_scene_only() {
        let rows = fixture();
        let out = apply_to_same_scene(&rows, &rows[0]);
        assert_eq!(out[1].scene_time, Some(SceneTime::Day));
        assert_eq!(out[1].location_type, Some(LocationType::Exterior));
        assert_eq!(out[1].location.as_deref(), Some("Harbour"));
        assert_eq!(out[2], rows[2]);
        assert_eq!(out[0], rows[0]);
    }

    #[test]
    fn leaves_other_fields_alone() {
        let rows = fixture();
        let out = apply_to_same_scene(&rows, &rows[0]);
        assert_eq!(out[1].content, "close up");
        assert_eq!(out[1].start_time, rows[1].start_time);
        assert_eq!(out[1].sequence, 2);
        assert_eq!(out[1].id, rows[1].id);
    }

    #[test]
    fn is_idempotent() {
        let rows = fixture();
        let once = apply_to_same_scene(&rows, &rows[0]);
        let twice = apply_to_same_scene(&once, &rows[0]);
        assert_eq!(once, twice);
    }

    #[test]
    fn source_without_scene_is_noop() {
        let mut rows = fixture();
        rows.push(row(4, None, SceneTime::Morning));
        rows.push(row(5, None, SceneTime::Evening));
        let out = apply_to_same_scene(&rows, &rows[3]);
        assert_eq!(out, rows);
    }

    #[test]
    fn scene_numbers_must_match_exactly() {
        let rows = vec![
            row(1, Some("5"), SceneTime::Day),
            row(2, Some(" 5 "), SceneTime::Night),
            row(3, Some("5a"), SceneTime::Night),
        ];
        let out = apply_to_same_scene(&rows, &rows[0]);
        assert_eq!(out[1].scene_time, Some(SceneTime::Night));
        assert_eq!(out[2].scene_time, Some(SceneTime::Night));
    }

    #[test]
    fn blank_source_scene_is_noop() {
        let rows = vec![
            row(1, Some("  "), SceneTime::Day),
            row(2, Some("  "), SceneTime::Night),
        ];
        assert_eq!(apply_to_same_scene(&rows, &rows[0]), rows);
    }
}
