//! Boundary classification.
//!
//! A face with exactly one incident cell is a boundary face; a vertex is a
//! boundary vertex if it belongs to any boundary face. Interior faces have
//! exactly two incident cells. The flags select the one- versus two-cell
//! branch in geometric interpolation downstream.

use crate::topology::csr::Csr;
use crate::topology::id::{CellId, EntityId, FaceId, VertexId};
use crate::topology::store::EntityStore;

/// Immutable boundary flags, derived once from the face→cell map.
#[derive(Clone, Debug)]
pub struct Boundary {
    boundary_faces: Vec<FaceId>,
    face_flags: Vec<bool>,
    vertex_flags: Vec<bool>,
}

/// Classify faces and vertices from the face→cell incidence.
///
/// Assumes every face has at least one incident cell; coverage is enforced
/// by the builder before classification runs.
pub fn classify(store: &EntityStore, face_cells: &Csr<CellId>) -> Boundary {
    let mut boundary_faces = Vec::new();
    let mut face_flags = vec![false; store.face_count()];
    let mut vertex_flags = vec![false; store.vertex_count()];

    for f in 0..store.face_count() {
        if face_cells.row_len(f) == 1 {
            let face = FaceId::from_index(f);
            boundary_faces.push(face);
            face_flags[f] = true;
            for &v in store.face_vertices(face) {
                vertex_flags[v.index()] = true;
            }
        }
    }

    Boundary {
        boundary_faces,
        face_flags,
        vertex_flags,
    }
}

impl Boundary {
    /// Boundary faces in ascending face index.
    #[inline]
    pub fn faces(&self) -> &[FaceId] {
        &self.boundary_faces
    }

    #[inline]
    pub fn is_boundary_face(&self, f: FaceId) -> bool {
        self.face_flags[f.index()]
    }

    #[inline]
    pub fn is_boundary_vertex(&self, v: VertexId) -> bool {
        self.vertex_flags[v.index()]
    }
}
