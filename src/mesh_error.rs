//! MeshFvmError: unified error type for mesh-fvm public APIs.
//!
//! Every invariant violation during mesh construction is unrecoverable for
//! the mesh being built: construction either succeeds completely or returns
//! one of these variants, and no partial mesh is observable. The embedding
//! code decides whether to abort or try a different input mesh; this crate
//! performs no automatic repair.

use crate::topology::id::{CellId, EntityKind, FaceId, VertexId};
use thiserror::Error;

/// Unified error type for mesh-fvm operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshFvmError {
    /// An entity kind's external numbers do not form a contiguous range.
    #[error("{kind} numbering is not contiguous: min {min}, max {max}, count {count}")]
    NonContiguousNumbering {
        kind: EntityKind,
        min: i64,
        max: i64,
        count: usize,
    },
    /// An entity has zero incident neighbors where at least one is required.
    #[error("{kind} {index} has no incident {required}")]
    UnmappedEntity {
        kind: EntityKind,
        index: usize,
        required: EntityKind,
    },
    /// The two face-defining vertices coincide (near-zero face area).
    #[error("face {face} is degenerate: vertices {v0} and {v1} coincide (length {length:.3e})")]
    DegenerateFace {
        face: FaceId,
        v0: VertexId,
        v1: VertexId,
        length: f64,
    },
    /// A cell's signed area from the divergence theorem is at or below epsilon.
    #[error("cell {cell} has non-positive area {area:.3e}; winding is inconsistent or the cell self-intersects")]
    NonPositiveCellArea { cell: CellId, area: f64 },
    /// A cell-local tangent/normal pair fails the unit orientation check.
    #[error(
        "face {face} of cell {cell} fails the orientation check: \
         out-of-plane orientation product is {product:.6} (expected +1)"
    )]
    InconsistentOrientation {
        cell: CellId,
        face: FaceId,
        product: f64,
    },
    /// A face's orthogonality delta is at or below epsilon (collinear or
    /// degenerate cell configuration).
    #[error("face {face} has degenerate orthogonality delta {delta:.3e}")]
    DegenerateGeometry { face: FaceId, delta: f64 },
    /// A raw per-entity array's length disagrees with the declared count.
    #[error("{kind} array `{field}` has length {found}, expected {expected}")]
    CountMismatch {
        kind: EntityKind,
        field: &'static str,
        expected: usize,
        found: usize,
    },
    /// A face whose vertex list is not exactly two vertices.
    #[error("face {face} has {found} vertices, expected exactly 2")]
    InvalidFaceArity { face: FaceId, found: usize },
    /// A cell whose vertex list has fewer than three vertices.
    #[error("cell {cell} has {found} vertices, expected at least 3")]
    InvalidCellArity { cell: CellId, found: usize },
    /// A connectivity entry references a vertex outside the vertex range.
    #[error("{kind} {index} references vertex {vertex}, but only {vertex_count} vertices exist")]
    VertexOutOfRange {
        kind: EntityKind,
        index: usize,
        vertex: u32,
        vertex_count: usize,
    },
    /// No face spans a consecutive vertex pair of a cell's winding.
    #[error("no face connects vertices {v0} and {v1} of cell {cell}")]
    MissingFace {
        cell: CellId,
        v0: VertexId,
        v1: VertexId,
    },
}
