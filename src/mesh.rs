//! The immutable mesh aggregate and its construction pipeline.
//!
//! [`Mesh::build`] runs the strict derivation pipeline over loader output:
//!
//! 1. entity store validation (numbering, arity, vertex ranges)
//! 2. vertex→cell, vertex→face, vertex→edge incidence inversion
//! 3. cell→face composite derivation, then face→cell inversion
//! 4. boundary classification
//! 5. geometry evaluation (ordered sub-stages, see [`crate::geometry::metrics`])
//!
//! Each stage completes for all entities before the next begins, and the
//! validator runs at the end of each stage. On any failure the error
//! propagates out and no mesh value exists. The finished `Mesh` is read-only
//! and safe to share across assembler threads (`Send + Sync`, no interior
//! mutability).

use crate::geometry::metrics::Geometry;
use crate::mesh_error::MeshFvmError;
use crate::topology::boundary::{Boundary, classify};
use crate::topology::cell_faces::{build_cell_faces, local_face_index};
use crate::topology::csr::Csr;
use crate::topology::id::{CellId, EdgeId, EntityId, EntityKind, FaceId, VertexId};
use crate::topology::invert::invert_incidence;
use crate::topology::store::{EntityStore, RawMesh};
use crate::validate;

/// Fully derived, immutable mesh: entities, incidence maps, boundary flags,
/// and geometry.
#[derive(Clone, Debug)]
pub struct Mesh {
    store: EntityStore,
    vertex_cells: Csr<CellId>,
    vertex_faces: Csr<FaceId>,
    vertex_edges: Csr<EdgeId>,
    cell_faces: Csr<FaceId>,
    face_cells: Csr<CellId>,
    boundary: Boundary,
    geometry: Geometry,
}

impl Mesh {
    /// Build a mesh from raw loader output.
    ///
    /// Runs the full derivation pipeline; any violated invariant aborts with
    /// the corresponding [`MeshFvmError`] kind and no partial mesh is
    /// returned.
    pub fn build(raw: RawMesh) -> Result<Self, MeshFvmError> {
        let store = EntityStore::from_raw(raw)?;
        log::debug!(
            "entity store: {} vertices, {} edges, {} faces, {} cells",
            store.vertex_count(),
            store.edge_count(),
            store.face_count(),
            store.cell_count()
        );

        let vertex_cells: Csr<CellId> =
            invert_incidence(store.cell_vertex_map(), store.vertex_count());
        validate::require_coverage(&vertex_cells, EntityKind::Vertex, EntityKind::Cell)?;
        let vertex_faces: Csr<FaceId> =
            invert_incidence(store.face_vertex_map(), store.vertex_count());
        validate::require_coverage(&vertex_faces, EntityKind::Vertex, EntityKind::Face)?;
        let vertex_edges: Csr<EdgeId> =
            invert_incidence(store.edge_vertex_map(), store.vertex_count());
        validate::require_coverage(&vertex_edges, EntityKind::Vertex, EntityKind::Edge)?;
        log::debug!("vertex incidence maps inverted");

        let cell_faces = build_cell_faces(&store, &vertex_faces)?;
        let face_cells: Csr<CellId> = invert_incidence(&cell_faces, store.face_count());
        validate::require_coverage(&face_cells, EntityKind::Face, EntityKind::Cell)?;
        log::debug!("cell-face incidence derived");

        let boundary = classify(&store, &face_cells);
        log::debug!(
            "boundary classified: {} of {} faces",
            boundary.faces().len(),
            store.face_count()
        );

        let geometry = Geometry::evaluate(&store, &cell_faces, &face_cells, &vertex_cells, &boundary)?;
        let min_delta = geometry
            .face_deltas
            .iter()
            .fold(f64::INFINITY, |acc, &d| acc.min(d));
        let max_skew = geometry
            .face_skewness
            .iter()
            .fold(0.0f64, |acc, &s| acc.max(s.abs()));
        log::debug!("geometry evaluated: min delta {min_delta:.3e}, max |skewness| {max_skew:.3e}");

        Ok(Self {
            store,
            vertex_cells,
            vertex_faces,
            vertex_edges,
            cell_faces,
            face_cells,
            boundary,
            geometry,
        })
    }

    /// The validated entity data (numbering, tags, coordinates, vertex lists).
    #[inline]
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// All derived geometric attributes.
    #[inline]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Boundary flags for faces and vertices.
    #[inline]
    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.store.vertex_count()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.store.edge_count()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.store.face_count()
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.store.cell_count()
    }

    /// Cells incident to a vertex.
    #[inline]
    pub fn vertex_cells(&self, v: VertexId) -> &[CellId] {
        self.vertex_cells.row(v.index())
    }

    /// Faces incident to a vertex.
    #[inline]
    pub fn vertex_faces(&self, v: VertexId) -> &[FaceId] {
        self.vertex_faces.row(v.index())
    }

    /// Edges incident to a vertex.
    #[inline]
    pub fn vertex_edges(&self, v: VertexId) -> &[EdgeId] {
        self.vertex_edges.row(v.index())
    }

    /// A cell's faces in cell-local (winding-aligned) order.
    #[inline]
    pub fn cell_faces(&self, c: CellId) -> &[FaceId] {
        self.cell_faces.row(c.index())
    }

    /// The one or two cells incident to a face. The first entry is the
    /// face's "first" cell used for delta evaluation.
    #[inline]
    pub fn face_cells(&self, f: FaceId) -> &[CellId] {
        self.face_cells.row(f.index())
    }

    /// The cell-local index of `face` within `cell`'s face list, for
    /// indexing the per-cell-local normal/tangent arrays.
    #[inline]
    pub fn local_face_index(&self, cell: CellId, face: FaceId) -> Option<usize> {
        local_face_index(&self.cell_faces, cell, face)
    }

    /// Outward unit normal of `cell`'s local face `local`.
    #[inline]
    pub fn face_normal(&self, cell: CellId, local: usize) -> [f64; 3] {
        self.geometry.face_normals[self.cell_faces.row_range(cell.index()).start + local]
    }

    /// Unit tangent of `cell`'s local face `local`, in winding order.
    #[inline]
    pub fn face_tangent(&self, cell: CellId, local: usize) -> [f64; 3] {
        self.geometry.face_tangents[self.cell_faces.row_range(cell.index()).start + local]
    }

    #[inline]
    pub fn cell_center(&self, c: CellId) -> [f64; 3] {
        self.geometry.cell_centers[c.index()]
    }

    /// Cell area, the 2D "volume".
    #[inline]
    pub fn cell_area(&self, c: CellId) -> f64 {
        self.geometry.cell_areas[c.index()]
    }

    #[inline]
    pub fn face_center(&self, f: FaceId) -> [f64; 3] {
        self.geometry.face_centers[f.index()]
    }

    /// Face area, the segment length.
    #[inline]
    pub fn face_area(&self, f: FaceId) -> f64 {
        self.geometry.face_areas[f.index()]
    }

    /// Centroidal vector across a face.
    #[inline]
    pub fn face_vector(&self, f: FaceId) -> [f64; 3] {
        self.geometry.face_vectors[f.index()]
    }

    /// Orthogonality delta (diffusive-flux distance) of a face.
    #[inline]
    pub fn face_delta(&self, f: FaceId) -> f64 {
        self.geometry.face_deltas[f.index()]
    }

    /// Skewness diagnostic of a face.
    #[inline]
    pub fn face_skewness(&self, f: FaceId) -> f64 {
        self.geometry.face_skewness[f.index()]
    }

    /// Cell interpolation weights at a face, aligned with
    /// [`Mesh::face_cells`]. Interior faces carry two weights summing to 1;
    /// boundary faces carry the single weight 1.
    #[inline]
    pub fn face_weights(&self, f: FaceId) -> &[f64] {
        self.geometry.face_weights.row(f.index())
    }

    /// Cell interpolation weights at a vertex, aligned with
    /// [`Mesh::vertex_cells`]; the row sums to 1.
    #[inline]
    pub fn vertex_weights(&self, v: VertexId) -> &[f64] {
        self.geometry.vertex_weights.row(v.index())
    }
}
