//! Property-based tests for incidence inversion.

use mesh_fvm::topology::csr::Csr;
use mesh_fvm::topology::id::{CellId, EntityId, VertexId};
use mesh_fvm::topology::invert::invert_incidence;
use proptest::prelude::*;

fn forward_relation() -> impl Strategy<Value = (Vec<Vec<u32>>, usize)> {
    (1usize..12).prop_flat_map(|target_count| {
        let rows = prop::collection::vec(
            prop::collection::vec(0..target_count as u32, 0..6),
            0..10,
        );
        (rows, Just(target_count))
    })
}

proptest! {
    #[test]
    fn round_trip_preserves_every_entry((rows, target_count) in forward_relation()) {
        let typed: Vec<Vec<VertexId>> = rows
            .iter()
            .map(|row| row.iter().map(|&v| VertexId::new(v)).collect())
            .collect();
        let forward: Csr<VertexId> = Csr::from_rows(&typed);
        let inverse: Csr<CellId> = invert_incidence(&forward, target_count);

        // No entry lost or invented.
        prop_assert_eq!(inverse.total_len(), forward.total_len());

        // Forward -> inverse: every mention is recorded with its multiplicity.
        for (s, row) in forward.iter_rows().enumerate() {
            for &d in row {
                let expected = row.iter().filter(|&&x| x == d).count();
                let found = inverse
                    .row(d.index())
                    .iter()
                    .filter(|&&c| c.index() == s)
                    .count();
                prop_assert_eq!(found, expected);
            }
        }

        // Inverse -> forward: every recorded source really lists the target.
        for (d, row) in inverse.iter_rows().enumerate() {
            for &c in row {
                prop_assert!(
                    forward.row(c.index()).iter().any(|&v| v.index() == d)
                );
            }
        }
    }

    #[test]
    fn inverse_rows_follow_traversal_order((rows, target_count) in forward_relation()) {
        let typed: Vec<Vec<VertexId>> = rows
            .iter()
            .map(|row| row.iter().map(|&v| VertexId::new(v)).collect())
            .collect();
        let forward: Csr<VertexId> = Csr::from_rows(&typed);
        let inverse: Csr<CellId> = invert_incidence(&forward, target_count);

        // The fill traverses sources in index order, so each inverse row is
        // non-decreasing and identical across repeated runs.
        for row in inverse.iter_rows() {
            prop_assert!(row.windows(2).all(|w| w[0] <= w[1]));
        }
        let again: Csr<CellId> = invert_incidence(&forward, target_count);
        prop_assert_eq!(inverse, again);
    }
}
