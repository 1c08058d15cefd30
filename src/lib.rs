//! # mesh-fvm
//!
//! mesh-fvm is a topology-and-geometry engine for finite-volume
//! discretizations over unstructured 2D polygonal meshes. Given the raw
//! per-entity arrays a mesh loader produces (external numbers, tags, vertex
//! coordinates, and ragged entity-to-vertex lists), it derives every
//! connectivity relation and geometric quantity a finite-volume assembler
//! needs:
//!
//! - inverse incidence maps (vertex→cells, vertex→faces, vertex→edges,
//!   cell→faces, face→cells), stored in compressed sparse row form
//! - boundary classification for faces and vertices
//! - cell centers and areas, face centers/areas/normals/tangents
//! - centroidal vectors, non-orthogonality deltas, and skewness diagnostics
//! - inverse-distance interpolation weights at faces and vertices
//!
//! Construction is a strict pipeline driven by [`mesh::Mesh::build`]; each
//! stage is validated eagerly and any invariant violation aborts with a typed
//! [`mesh_error::MeshFvmError`]. No partially built mesh is ever observable.
//! The finished [`mesh::Mesh`] is immutable and safe to share across threads.
//!
//! ## Determinism
//!
//! All derived incidence maps are filled by a two-pass count-then-fill
//! traversal in entity-index order, so their row contents are reproducible
//! run-to-run. Geometry passes are data-parallel over entities via `rayon`
//! and write only their own output rows.
//!
//! ## Usage
//!
//! ```rust
//! use mesh_fvm::mesh::Mesh;
//! use mesh_fvm::mesh_generation::quad_grid;
//!
//! # fn main() -> Result<(), mesh_fvm::mesh_error::MeshFvmError> {
//! let raw = quad_grid(4, 3, [0.0, 0.0], [4.0, 3.0]);
//! let mesh = Mesh::build(raw)?;
//! assert_eq!(mesh.cell_count(), 12);
//! # Ok(())
//! # }
//! ```

pub mod geometry;
pub mod mesh;
pub mod mesh_error;
pub mod mesh_generation;
pub mod topology;
pub mod validate;

/// A convenient prelude to import the most-used types.
pub mod prelude {
    pub use crate::geometry::metrics::Geometry;
    pub use crate::geometry::quality::{QualityReport, quality_report};
    pub use crate::mesh::Mesh;
    pub use crate::mesh_error::MeshFvmError;
    pub use crate::mesh_generation::quad_grid;
    pub use crate::topology::boundary::Boundary;
    pub use crate::topology::csr::Csr;
    pub use crate::topology::id::{CellId, EdgeId, EntityId, EntityKind, FaceId, VertexId};
    pub use crate::topology::store::{EntityStore, RawEntities, RawMesh, RawVertices};
}
