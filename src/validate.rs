//! Cross-cutting invariant checks, invoked by the builder after each
//! pipeline stage.
//!
//! Every check is eager: it runs at the end of the stage that produced the
//! relevant data, and a failure aborts mesh construction with a typed error.
//! Nothing here repairs the mesh.

use crate::geometry::GEOM_EPS;
use crate::mesh_error::MeshFvmError;
use crate::topology::csr::Csr;
use crate::topology::id::{CellId, EntityId, EntityKind, FaceId};
use crate::topology::store::EntityStore;
use hashbrown::HashSet;
use itertools::Itertools;
use itertools::MinMaxResult;

/// External numbers must be a permutation of a contiguous range:
/// `max - min + 1 == count` and no value repeated. The range need not be
/// 1-based. An empty kind is trivially contiguous.
///
/// The distinctness check matters: a duplicate paired with a gap (say
/// `[1, 2, 2, 4]`) would slip past the range arithmetic alone.
pub fn contiguous_numbering(kind: EntityKind, numbers: &[i64]) -> Result<(), MeshFvmError> {
    let (min, max) = match numbers.iter().minmax() {
        MinMaxResult::NoElements => return Ok(()),
        MinMaxResult::OneElement(&n) => (n, n),
        MinMaxResult::MinMax(&min, &max) => (min, max),
    };
    let count = numbers.len();
    let mut seen = HashSet::with_capacity(count);
    if max - min + 1 != count as i64 || !numbers.iter().all(|&n| seen.insert(n)) {
        return Err(MeshFvmError::NonContiguousNumbering {
            kind,
            min,
            max,
            count,
        });
    }
    Ok(())
}

/// Every row of an inverse incidence map must be non-empty: an entity that
/// nothing references (an orphan vertex, a face with no cell) is a modeled
/// failure, not a silently dropped entry.
pub fn require_coverage<Src: EntityId>(
    inverse: &Csr<Src>,
    kind: EntityKind,
    required: EntityKind,
) -> Result<(), MeshFvmError> {
    for i in 0..inverse.row_count() {
        if inverse.row_len(i) == 0 {
            return Err(MeshFvmError::UnmappedEntity {
                kind,
                index: i,
                required,
            });
        }
    }
    Ok(())
}

/// Face areas (segment lengths) must exceed epsilon; a near-zero length means
/// the two face-defining vertices coincide.
pub fn faces_nondegenerate(store: &EntityStore, areas: &[f64]) -> Result<(), MeshFvmError> {
    for (i, &area) in areas.iter().enumerate() {
        if area <= GEOM_EPS {
            let face = FaceId::from_index(i);
            let fv = store.face_vertices(face);
            return Err(MeshFvmError::DegenerateFace {
                face,
                v0: fv[0],
                v1: fv[1],
                length: area,
            });
        }
    }
    Ok(())
}

/// Recompute the out-of-plane orientation product for every (cell, local
/// face) tangent/normal pair; it must be +1 within tolerance, which holds
/// exactly when normals are unit length and outward for anticlockwise
/// winding.
pub fn orientation(
    cell_faces: &Csr<FaceId>,
    tangents: &[[f64; 3]],
    normals: &[[f64; 3]],
) -> Result<(), MeshFvmError> {
    for c in 0..cell_faces.row_count() {
        for (local, k) in cell_faces.row_range(c).enumerate() {
            let t = tangents[k];
            let n = normals[k];
            let product = n[0] * t[1] - n[1] * t[0];
            if (product - 1.0).abs() > GEOM_EPS {
                return Err(MeshFvmError::InconsistentOrientation {
                    cell: CellId::from_index(c),
                    face: cell_faces.row(c)[local],
                    product,
                });
            }
        }
    }
    Ok(())
}

/// Divergence-theorem cell areas must be strictly positive.
pub fn cell_areas_positive(areas: &[f64]) -> Result<(), MeshFvmError> {
    for (i, &area) in areas.iter().enumerate() {
        if area <= GEOM_EPS {
            return Err(MeshFvmError::NonPositiveCellArea {
                cell: CellId::from_index(i),
                area,
            });
        }
    }
    Ok(())
}

/// Every face delta (orthogonal projection of the centroidal vector onto the
/// face normal) must exceed epsilon; a near-zero delta signals a collinear or
/// degenerate cell configuration.
pub fn face_deltas_positive(deltas: &[f64]) -> Result<(), MeshFvmError> {
    for (i, &delta) in deltas.iter().enumerate() {
        if delta <= GEOM_EPS {
            return Err(MeshFvmError::DegenerateGeometry {
                face: FaceId::from_index(i),
                delta,
            });
        }
    }
    Ok(())
}
