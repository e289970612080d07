//! Row ordering: drag-and-drop moves and sequence recompaction.

use crate::error::CoreError;
use crate::shot_plan::row::ShotRow;

/// Reassign `sequence = index + 1` on every row.
pub fn renumber(rows: &mut [ShotRow]) {
    for (i, row) in rows.iter_mut().enumerate() {
        row.sequence = i as i32 + 1;
    }
}

/// Move the row at `from` to `to` (remove, then insert) and renumber.
///
/// Both indices must be within `0..rows.len()`.
pub fn reorder(rows: &[ShotRow], from: usize, to: usize) -> Result<Vec<ShotRow>, CoreError> {
    let len = rows.len();
    if from >= len || to >= len {
        return Err(CoreError::Validation(format!(
            "reorder indices must be < {len}, got from={from} to={to}"
        )));
    }
    let mut out = rows.to_vec();
    let moved = out.remove(from);
    out.insert(to, moved);
    renumber(&mut out);
    Ok(out)
}

/// `true` if the sequences are exactly `1..=len` in array order.
pub fn is_compact(rows: &[ShotRow]) -> bool {
    rows.iter()
        .enumerate()
        .all(|(i, row)| row.sequence == i as i32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use uuid::Uuid;

    fn rows(n: usize) -> Vec<ShotRow> {
        (0..n)
            .map(|i| ShotRow::empty(Uuid::new_v4(), i as i32 + 1))
            .collect()
    }

    #[test]
    fn moves_forward() {
        let input = rows(4);
        let out = reorder(&input, 0, 2).unwrap();
        let ids: Vec<_> = out.iter().map(|r| r.id).collect();
        assert_eq!(ids, [input[1].id, input[2].id, input[0].id, input[3].id]);
        assert!(is_compact(&out));
    }

    #[test]
    fn moves_backward() {
        let input = rows(4);
        let out = reorder(&input, 3, 0).unwrap();
        assert_eq!(out[0].id, input[3].id);
        assert_eq!(out[0].sequence, 1);
        assert_eq!(out[3].id, input[2].id);
        assert!(is_compact(&out));
    }

    #[test]
    fn same_index_keeps_order() {
        let input = rows(3);
        assert_eq!(reorder(&input, 1, 1).unwrap(), input);
    }

    #[test]
    fn preserves_membership() {
        let input = rows(6);
        let out = reorder(&input, 4, 1).unwrap();
        let mut before: Vec<_> = input.iter().map(|r| r.id).collect();
        let mut after: Vec<_> = out.iter().map(|r| r.id).collect();
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn rejects_out_of_range() {
        assert_matches!(reorder(&rows(2), 2, 0), Err(CoreError::Validation(_)));
        assert_matches!(reorder(&rows(2), 0, 5), Err(CoreError::Validation(_)));
        assert_matches!(reorder(&[], 0, 0), Err(CoreError::Validation(_)));
    }

    #[test]
    fn renumber_compacts_gaps() {
        let mut input = rows(3);
        input.remove(1);
        assert!(!is_compact(&input));
        renumber(&mut input);
        assert!(is_compact(&input));
    }
}
