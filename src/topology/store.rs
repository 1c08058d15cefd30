//! The entity store: immutable-after-load container for raw mesh entities.
//!
//! [`RawMesh`] is the loader contract: plain per-kind arrays of external
//! numbers, tags, vertex coordinates, and ragged entity→vertex lists. The
//! file format and tokenizing that produce it live outside this crate.
//!
//! [`EntityStore`] is the validated form: ragged lists are packed into CSR
//! storage, external numbering is checked for contiguity, face/cell arity and
//! vertex ranges are enforced. Once built it never changes.

use crate::mesh_error::MeshFvmError;
use crate::topology::csr::Csr;
use crate::topology::id::{CellId, EdgeId, EntityId, EntityKind, FaceId, VertexId};
use crate::validate;

/// Raw vertex arrays as produced by the external loader.
#[derive(Clone, Debug, Default)]
pub struct RawVertices {
    /// External (file) number per vertex; contiguous but not necessarily 1-based.
    pub numbers: Vec<i64>,
    /// Region/boundary tag per vertex.
    pub tags: Vec<i32>,
    /// 3-component coordinate per vertex; the z component is 0 for planar meshes.
    pub coords: Vec<[f64; 3]>,
}

/// Raw arrays for one ragged entity kind (edges, faces, or cells).
#[derive(Clone, Debug, Default)]
pub struct RawEntities {
    /// External (file) number per entity.
    pub numbers: Vec<i64>,
    /// Region/boundary tag per entity.
    pub tags: Vec<i32>,
    /// Ordered vertex-index list per entity. For cells the order defines the
    /// anticlockwise polygon winding; for faces it is exactly two entries.
    pub vertices: Vec<Vec<u32>>,
}

/// Complete loader output for one mesh.
#[derive(Clone, Debug, Default)]
pub struct RawMesh {
    pub vertices: RawVertices,
    pub edges: RawEntities,
    pub faces: RawEntities,
    pub cells: RawEntities,
}

/// Validated, immutable per-entity data: numbering, tags, coordinates, and
/// CSR-packed entity→vertex lists.
#[derive(Clone, Debug)]
pub struct EntityStore {
    vertex_numbers: Vec<i64>,
    vertex_tags: Vec<i32>,
    coords: Vec<[f64; 3]>,
    edge_numbers: Vec<i64>,
    edge_tags: Vec<i32>,
    edge_vertices: Csr<VertexId>,
    face_numbers: Vec<i64>,
    face_tags: Vec<i32>,
    face_vertices: Csr<VertexId>,
    cell_numbers: Vec<i64>,
    cell_tags: Vec<i32>,
    cell_vertices: Csr<VertexId>,
}

impl EntityStore {
    /// Validate raw loader output and pack it into CSR form.
    ///
    /// # Errors
    /// - [`MeshFvmError::CountMismatch`] if parallel arrays disagree in length
    /// - [`MeshFvmError::NonContiguousNumbering`] if any kind's external
    ///   numbers do not form a contiguous range
    /// - [`MeshFvmError::InvalidFaceArity`] / [`MeshFvmError::InvalidCellArity`]
    ///   for malformed faces or cells
    /// - [`MeshFvmError::VertexOutOfRange`] for dangling vertex references
    pub fn from_raw(raw: RawMesh) -> Result<Self, MeshFvmError> {
        let vertex_count = raw.vertices.numbers.len();
        check_len(
            EntityKind::Vertex,
            "tags",
            vertex_count,
            raw.vertices.tags.len(),
        )?;
        check_len(
            EntityKind::Vertex,
            "coords",
            vertex_count,
            raw.vertices.coords.len(),
        )?;

        let edge_vertices = pack_connectivity(EntityKind::Edge, &raw.edges, vertex_count)?;
        let face_vertices = pack_connectivity(EntityKind::Face, &raw.faces, vertex_count)?;
        let cell_vertices = pack_connectivity(EntityKind::Cell, &raw.cells, vertex_count)?;

        for (i, row) in face_vertices.iter_rows().enumerate() {
            if row.len() != 2 {
                return Err(MeshFvmError::InvalidFaceArity {
                    face: FaceId::from_index(i),
                    found: row.len(),
                });
            }
        }
        for (i, row) in cell_vertices.iter_rows().enumerate() {
            if row.len() < 3 {
                return Err(MeshFvmError::InvalidCellArity {
                    cell: CellId::from_index(i),
                    found: row.len(),
                });
            }
        }

        validate::contiguous_numbering(EntityKind::Vertex, &raw.vertices.numbers)?;
        validate::contiguous_numbering(EntityKind::Edge, &raw.edges.numbers)?;
        validate::contiguous_numbering(EntityKind::Face, &raw.faces.numbers)?;
        validate::contiguous_numbering(EntityKind::Cell, &raw.cells.numbers)?;

        Ok(Self {
            vertex_numbers: raw.vertices.numbers,
            vertex_tags: raw.vertices.tags,
            coords: raw.vertices.coords,
            edge_numbers: raw.edges.numbers,
            edge_tags: raw.edges.tags,
            edge_vertices,
            face_numbers: raw.faces.numbers,
            face_tags: raw.faces.tags,
            face_vertices,
            cell_numbers: raw.cells.numbers,
            cell_tags: raw.cells.tags,
            cell_vertices,
        })
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_numbers.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_numbers.len()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.face_numbers.len()
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cell_numbers.len()
    }

    /// Coordinate of one vertex.
    #[inline]
    pub fn coord(&self, v: VertexId) -> [f64; 3] {
        self.coords[v.index()]
    }

    /// All vertex coordinates, in dense index order.
    #[inline]
    pub fn coords(&self) -> &[[f64; 3]] {
        &self.coords
    }

    /// The two vertices of a face.
    #[inline]
    pub fn face_vertices(&self, f: FaceId) -> &[VertexId] {
        self.face_vertices.row(f.index())
    }

    /// The vertices of a cell, in anticlockwise winding order.
    #[inline]
    pub fn cell_vertices(&self, c: CellId) -> &[VertexId] {
        self.cell_vertices.row(c.index())
    }

    /// The vertices of an edge.
    #[inline]
    pub fn edge_vertices(&self, e: EdgeId) -> &[VertexId] {
        self.edge_vertices.row(e.index())
    }

    /// Full CSR entity→vertex relations, for inversion.
    pub(crate) fn edge_vertex_map(&self) -> &Csr<VertexId> {
        &self.edge_vertices
    }

    pub(crate) fn face_vertex_map(&self) -> &Csr<VertexId> {
        &self.face_vertices
    }

    pub(crate) fn cell_vertex_map(&self) -> &Csr<VertexId> {
        &self.cell_vertices
    }

    #[inline]
    pub fn vertex_number(&self, v: VertexId) -> i64 {
        self.vertex_numbers[v.index()]
    }

    #[inline]
    pub fn edge_number(&self, e: EdgeId) -> i64 {
        self.edge_numbers[e.index()]
    }

    #[inline]
    pub fn face_number(&self, f: FaceId) -> i64 {
        self.face_numbers[f.index()]
    }

    #[inline]
    pub fn cell_number(&self, c: CellId) -> i64 {
        self.cell_numbers[c.index()]
    }

    #[inline]
    pub fn vertex_tag(&self, v: VertexId) -> i32 {
        self.vertex_tags[v.index()]
    }

    #[inline]
    pub fn edge_tag(&self, e: EdgeId) -> i32 {
        self.edge_tags[e.index()]
    }

    #[inline]
    pub fn face_tag(&self, f: FaceId) -> i32 {
        self.face_tags[f.index()]
    }

    #[inline]
    pub fn cell_tag(&self, c: CellId) -> i32 {
        self.cell_tags[c.index()]
    }

    /// Faces carrying the given tag, in dense index order.
    pub fn faces_with_tag(&self, tag: i32) -> impl Iterator<Item = FaceId> + '_ {
        self.face_tags
            .iter()
            .enumerate()
            .filter(move |&(_, &t)| t == tag)
            .map(|(i, _)| FaceId::from_index(i))
    }

    /// Cells carrying the given tag, in dense index order.
    pub fn cells_with_tag(&self, tag: i32) -> impl Iterator<Item = CellId> + '_ {
        self.cell_tags
            .iter()
            .enumerate()
            .filter(move |&(_, &t)| t == tag)
            .map(|(i, _)| CellId::from_index(i))
    }
}

fn check_len(
    kind: EntityKind,
    field: &'static str,
    expected: usize,
    found: usize,
) -> Result<(), MeshFvmError> {
    if expected != found {
        return Err(MeshFvmError::CountMismatch {
            kind,
            field,
            expected,
            found,
        });
    }
    Ok(())
}

/// Pack one ragged entity→vertex relation, checking array lengths and vertex
/// ranges.
fn pack_connectivity(
    kind: EntityKind,
    raw: &RawEntities,
    vertex_count: usize,
) -> Result<Csr<VertexId>, MeshFvmError> {
    let count = raw.numbers.len();
    check_len(kind, "tags", count, raw.tags.len())?;
    check_len(kind, "vertices", count, raw.vertices.len())?;

    let total: usize = raw.vertices.iter().map(|row| row.len()).sum();
    let mut offsets = Vec::with_capacity(count + 1);
    offsets.push(0u32);
    let mut values = Vec::with_capacity(total);
    for (index, row) in raw.vertices.iter().enumerate() {
        for &vertex in row {
            if vertex as usize >= vertex_count {
                return Err(MeshFvmError::VertexOutOfRange {
                    kind,
                    index,
                    vertex,
                    vertex_count,
                });
            }
            values.push(VertexId::new(vertex));
        }
        offsets.push(values.len() as u32);
    }
    Ok(Csr::from_parts(offsets, values))
}
