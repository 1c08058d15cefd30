//! Fatal-invariant tests: malformed input must abort construction with the
//! matching error kind and never yield a mesh value.

use mesh_fvm::mesh::Mesh;
use mesh_fvm::mesh_error::MeshFvmError;
use mesh_fvm::mesh_generation::quad_grid;
use mesh_fvm::topology::id::EntityKind;
use mesh_fvm::topology::store::{RawEntities, RawMesh, RawVertices};

/// A single triangle cell with mirrored edges/faces at the given vertex
/// positions.
fn triangle_raw(coords: [[f64; 3]; 3]) -> RawMesh {
    let segs = vec![vec![0u32, 1], vec![1, 2], vec![2, 0]];
    RawMesh {
        vertices: RawVertices {
            numbers: vec![1, 2, 3],
            tags: vec![0; 3],
            coords: coords.to_vec(),
        },
        edges: RawEntities {
            numbers: vec![1, 2, 3],
            tags: vec![0; 3],
            vertices: segs.clone(),
        },
        faces: RawEntities {
            numbers: vec![1, 2, 3],
            tags: vec![0; 3],
            vertices: segs,
        },
        cells: RawEntities {
            numbers: vec![1],
            tags: vec![0],
            vertices: vec![vec![0, 1, 2]],
        },
    }
}

#[test]
fn coincident_face_vertices_are_fatal() {
    // Vertices 0 and 1 coincide, so face 0 has zero length.
    let raw = triangle_raw([[0.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
    let err = Mesh::build(raw).unwrap_err();
    assert!(matches!(err, MeshFvmError::DegenerateFace { .. }));
}

#[test]
fn non_contiguous_numbering_is_fatal() {
    let mut raw = quad_grid(2, 2, [0.0, 0.0], [1.0, 1.0]);
    *raw.cells.numbers.last_mut().unwrap() += 10;
    let err = Mesh::build(raw).unwrap_err();
    assert!(matches!(
        err,
        MeshFvmError::NonContiguousNumbering {
            kind: EntityKind::Cell,
            ..
        }
    ));
}

#[test]
fn orphan_vertex_is_fatal() {
    let mut raw = quad_grid(2, 2, [0.0, 0.0], [1.0, 1.0]);
    // Contiguous number, valid coordinate, but nothing references it.
    let next = raw.vertices.numbers.iter().max().unwrap() + 1;
    raw.vertices.numbers.push(next);
    raw.vertices.tags.push(0);
    raw.vertices.coords.push([9.0, 9.0, 0.0]);
    let err = Mesh::build(raw).unwrap_err();
    assert!(matches!(
        err,
        MeshFvmError::UnmappedEntity {
            kind: EntityKind::Vertex,
            required: EntityKind::Cell,
            ..
        }
    ));
}

#[test]
fn missing_face_is_fatal() {
    let mut raw = quad_grid(1, 1, [0.0, 0.0], [1.0, 1.0]);
    raw.faces.numbers.pop();
    raw.faces.tags.pop();
    raw.faces.vertices.pop();
    let err = Mesh::build(raw).unwrap_err();
    assert!(matches!(err, MeshFvmError::MissingFace { .. }));
}

#[test]
fn clockwise_cell_is_fatal() {
    // Reversed winding makes every derived normal point inward, which the
    // divergence-theorem area exposes as a negative cell area.
    let raw = triangle_raw([[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]]);
    let err = Mesh::build(raw).unwrap_err();
    assert!(matches!(err, MeshFvmError::NonPositiveCellArea { .. }));
}

#[test]
fn collinear_sliver_is_fatal() {
    // A triangle so flat that its centroid sits on the long face within
    // tolerance: positive area, but a vanishing orthogonality delta.
    let h = 2.4e-10;
    let raw = triangle_raw([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.5, h, 0.0]]);
    let err = Mesh::build(raw).unwrap_err();
    assert!(matches!(err, MeshFvmError::DegenerateGeometry { .. }));
}
