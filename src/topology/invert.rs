//! Incidence inversion: turn a forward "entity → neighbors" relation into
//! "neighbor → entities that listed it".
//!
//! The inversion is a two-pass count-then-fill over the forward CSR: first
//! accumulate per-neighbor degrees and prefix-sum them into exact row
//! extents, then walk the forward relation again in entity-index order and
//! write each source into its neighbor's row through a per-row cursor. No
//! growable shared buckets, no locking; the traversal order is fixed, so the
//! inverse rows are reproducible run-to-run.
//!
//! Each inverse row lists sources in ascending source index (the traversal
//! order); no other canonical ordering is implied.

use crate::topology::csr::Csr;
use crate::topology::id::EntityId;

/// Invert a forward relation stored as CSR rows of `Dst` handles.
///
/// `forward.row(s)` lists the neighbors of source `Src::from_index(s)`;
/// the result's `row(d)` lists every source that mentioned neighbor `d`.
/// `target_count` is the total number of `Dst` entities, including any with
/// zero references (their rows come out empty; whether that is an error is
/// the caller's contract, see [`crate::validate::require_coverage`]).
pub fn invert_incidence<Src, Dst>(forward: &Csr<Dst>, target_count: usize) -> Csr<Src>
where
    Src: EntityId,
    Dst: EntityId,
{
    // 1) per-neighbor degrees
    let mut degree = vec![0u32; target_count];
    for &d in forward.values() {
        degree[d.index()] += 1;
    }

    // 2) prefix sums give exact row extents
    let mut offsets = vec![0u32; target_count + 1];
    for i in 0..target_count {
        offsets[i + 1] = offsets[i] + degree[i];
    }
    let total = offsets[target_count] as usize;

    // 3) fill through per-row write cursors, sources in index order
    let mut cursor = offsets.clone();
    let mut values = vec![Src::from_index(0); total];
    for (s, row) in forward.iter_rows().enumerate() {
        for &d in row {
            let pos = cursor[d.index()] as usize;
            values[pos] = Src::from_index(s);
            cursor[d.index()] += 1;
        }
    }

    Csr::from_parts(offsets, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::id::{CellId, VertexId};

    fn v(i: u32) -> VertexId {
        VertexId::new(i)
    }

    #[test]
    fn inverts_small_relation() {
        // cell 0 -> v0,v1,v2 ; cell 1 -> v1,v2,v3
        let forward = Csr::from_rows(&[vec![v(0), v(1), v(2)], vec![v(1), v(2), v(3)]]);
        let inverse: Csr<CellId> = invert_incidence(&forward, 4);
        assert_eq!(inverse.row(0), &[CellId::new(0)]);
        assert_eq!(inverse.row(1), &[CellId::new(0), CellId::new(1)]);
        assert_eq!(inverse.row(2), &[CellId::new(0), CellId::new(1)]);
        assert_eq!(inverse.row(3), &[CellId::new(1)]);
    }

    #[test]
    fn preserves_entry_count() {
        let forward = Csr::from_rows(&[vec![v(0), v(3)], vec![v(3)], vec![v(1), v(3), v(0)]]);
        let inverse: Csr<CellId> = invert_incidence(&forward, 4);
        assert_eq!(inverse.total_len(), forward.total_len());
    }

    #[test]
    fn unreferenced_target_gets_empty_row() {
        let forward = Csr::from_rows(&[vec![v(0)], vec![v(2)]]);
        let inverse: Csr<CellId> = invert_incidence(&forward, 3);
        assert_eq!(inverse.row_len(0), 1);
        assert_eq!(inverse.row_len(1), 0);
        assert_eq!(inverse.row_len(2), 1);
    }

    #[test]
    fn round_trip_membership() {
        let forward = Csr::from_rows(&[vec![v(2), v(0)], vec![v(1), v(2)], vec![v(2)]]);
        let inverse: Csr<CellId> = invert_incidence(&forward, 3);
        for (s, row) in forward.iter_rows().enumerate() {
            for &d in row {
                let hits = inverse
                    .row(d.index())
                    .iter()
                    .filter(|&&c| c.index() == s)
                    .count();
                assert_eq!(hits, 1, "source {s} must appear exactly once for {d:?}");
            }
        }
    }
}
