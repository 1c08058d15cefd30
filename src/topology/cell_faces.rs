//! Composite derivation of the cell→face incidence map.
//!
//! The raw data carries no direct cell-face relation; it is recovered by
//! combining each cell's vertex winding with the vertex→face inverse map.
//! Face `k` of a cell connects cell-local vertex `k` to vertex `k+1`
//! (wrapping from the last vertex back to the first), so the resulting
//! cell-local face order is aligned with the vertex winding. Downstream
//! normal computation depends on exactly this alignment.

use crate::mesh_error::MeshFvmError;
use crate::topology::csr::Csr;
use crate::topology::id::{CellId, EntityId, FaceId, VertexId};
use crate::topology::store::EntityStore;
use itertools::Itertools;

/// Build the ordered cell→face map from cell windings and the vertex→face
/// inverse.
///
/// # Errors
/// [`MeshFvmError::MissingFace`] if no face spans some consecutive vertex
/// pair of a cell.
pub fn build_cell_faces(
    store: &EntityStore,
    vertex_faces: &Csr<FaceId>,
) -> Result<Csr<FaceId>, MeshFvmError> {
    let cell_count = store.cell_count();
    let mut offsets = Vec::with_capacity(cell_count + 1);
    offsets.push(0u32);
    // One face per winding edge, so the face list is as long as the vertex list.
    let mut values = Vec::with_capacity(store.cell_vertex_map().total_len());

    for c in 0..cell_count {
        let cell = CellId::from_index(c);
        for (&a, &b) in store.cell_vertices(cell).iter().circular_tuple_windows() {
            let face = find_shared_face(store, vertex_faces, a, b).ok_or(
                MeshFvmError::MissingFace {
                    cell,
                    v0: a,
                    v1: b,
                },
            )?;
            values.push(face);
        }
        offsets.push(values.len() as u32);
    }

    Ok(Csr::from_parts(offsets, values))
}

/// The cell-local index of `face` within `cell`'s ordered face list, if the
/// face belongs to the cell. A small linear search; cell face lists are short.
///
/// Assemblers use this to index the per-cell-local normal/tangent arrays for
/// a global face id.
#[inline]
pub fn local_face_index(cell_faces: &Csr<FaceId>, cell: CellId, face: FaceId) -> Option<usize> {
    cell_faces
        .row(cell.index())
        .iter()
        .position(|&f| f == face)
}

/// The one face whose two vertices are exactly `{a, b}`, if it exists.
fn find_shared_face(
    store: &EntityStore,
    vertex_faces: &Csr<FaceId>,
    a: VertexId,
    b: VertexId,
) -> Option<FaceId> {
    vertex_faces.row(a.index()).iter().copied().find(|&f| {
        let fv = store.face_vertices(f);
        (fv[0] == a && fv[1] == b) || (fv[0] == b && fv[1] == a)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::invert::invert_incidence;
    use crate::topology::store::{RawEntities, RawMesh, RawVertices};

    fn unit_square_raw() -> RawMesh {
        let segs = vec![vec![0u32, 1], vec![1, 2], vec![2, 3], vec![3, 0]];
        RawMesh {
            vertices: RawVertices {
                numbers: vec![1, 2, 3, 4],
                tags: vec![0; 4],
                coords: vec![
                    [0.0, 0.0, 0.0],
                    [1.0, 0.0, 0.0],
                    [1.0, 1.0, 0.0],
                    [0.0, 1.0, 0.0],
                ],
            },
            edges: RawEntities {
                numbers: vec![1, 2, 3, 4],
                tags: vec![0; 4],
                vertices: segs.clone(),
            },
            faces: RawEntities {
                numbers: vec![1, 2, 3, 4],
                tags: vec![1; 4],
                vertices: segs,
            },
            cells: RawEntities {
                numbers: vec![1],
                tags: vec![0],
                vertices: vec![vec![0, 1, 2, 3]],
            },
        }
    }

    #[test]
    fn faces_follow_winding_order() {
        let store = EntityStore::from_raw(unit_square_raw()).unwrap();
        let vertex_faces: Csr<FaceId> =
            invert_incidence(store.face_vertex_map(), store.vertex_count());
        let cell_faces = build_cell_faces(&store, &vertex_faces).unwrap();
        assert_eq!(
            cell_faces.row(0),
            &[
                FaceId::new(0),
                FaceId::new(1),
                FaceId::new(2),
                FaceId::new(3)
            ]
        );
    }

    #[test]
    fn missing_face_is_reported() {
        let mut raw = unit_square_raw();
        // Drop the wrap-around face 3-0.
        raw.faces.numbers.pop();
        raw.faces.tags.pop();
        raw.faces.vertices.pop();
        let store = EntityStore::from_raw(raw).unwrap();
        let vertex_faces: Csr<FaceId> =
            invert_incidence(store.face_vertex_map(), store.vertex_count());
        let err = build_cell_faces(&store, &vertex_faces).unwrap_err();
        assert!(matches!(err, MeshFvmError::MissingFace { .. }));
    }
}
