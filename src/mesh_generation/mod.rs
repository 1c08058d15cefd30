//! Structured mesh generators producing raw loader-shaped input.
//!
//! These exist for tests, benchmarks, and embedding codes that want a mesh
//! without an external file: the output is a plain [`RawMesh`], identical in
//! shape to what a mesh-file loader produces, and goes through the same
//! validated build pipeline as any other input.

use crate::topology::store::{RawEntities, RawMesh, RawVertices};

/// Tag applied to boundary vertices and boundary faces by the generators.
pub const BOUNDARY_TAG: i32 = 1;
/// Tag applied to interior entities by the generators.
pub const INTERIOR_TAG: i32 = 0;

/// Generate a structured quadrilateral grid over `[min, max]` with `nx`×`ny`
/// cells.
///
/// Cells are wound anticlockwise; faces are the unique grid segments, with
/// edges mirroring them. Boundary vertices and faces carry [`BOUNDARY_TAG`].
/// External numbers are 1-based and contiguous.
///
/// # Panics
/// Panics if `nx` or `ny` is zero.
pub fn quad_grid(nx: usize, ny: usize, min: [f64; 2], max: [f64; 2]) -> RawMesh {
    assert!(nx > 0 && ny > 0, "grid extents must be positive");

    let dx = (max[0] - min[0]) / nx as f64;
    let dy = (max[1] - min[1]) / ny as f64;
    let row_stride = nx + 1;
    let vertex_at = |i: usize, j: usize| (j * row_stride + i) as u32;

    let vertex_count = (nx + 1) * (ny + 1);
    let mut coords = Vec::with_capacity(vertex_count);
    let mut vertex_tags = Vec::with_capacity(vertex_count);
    for j in 0..=ny {
        let y = min[1] + dy * j as f64;
        for i in 0..=nx {
            let x = min[0] + dx * i as f64;
            coords.push([x, y, 0.0]);
            let on_boundary = i == 0 || i == nx || j == 0 || j == ny;
            vertex_tags.push(if on_boundary { BOUNDARY_TAG } else { INTERIOR_TAG });
        }
    }

    // Unique grid segments: horizontal runs first, then vertical.
    let face_count = (ny + 1) * nx + (nx + 1) * ny;
    let mut face_vertices = Vec::with_capacity(face_count);
    let mut face_tags = Vec::with_capacity(face_count);
    for j in 0..=ny {
        for i in 0..nx {
            face_vertices.push(vec![vertex_at(i, j), vertex_at(i + 1, j)]);
            face_tags.push(if j == 0 || j == ny { BOUNDARY_TAG } else { INTERIOR_TAG });
        }
    }
    for j in 0..ny {
        for i in 0..=nx {
            face_vertices.push(vec![vertex_at(i, j), vertex_at(i, j + 1)]);
            face_tags.push(if i == 0 || i == nx { BOUNDARY_TAG } else { INTERIOR_TAG });
        }
    }

    let mut cell_vertices = Vec::with_capacity(nx * ny);
    for j in 0..ny {
        for i in 0..nx {
            // Anticlockwise: bottom-left, bottom-right, top-right, top-left.
            cell_vertices.push(vec![
                vertex_at(i, j),
                vertex_at(i + 1, j),
                vertex_at(i + 1, j + 1),
                vertex_at(i, j + 1),
            ]);
        }
    }

    let numbers = |n: usize| (1..=n as i64).collect::<Vec<_>>();
    RawMesh {
        vertices: RawVertices {
            numbers: numbers(vertex_count),
            tags: vertex_tags,
            coords,
        },
        edges: RawEntities {
            numbers: numbers(face_count),
            tags: vec![INTERIOR_TAG; face_count],
            vertices: face_vertices.clone(),
        },
        faces: RawEntities {
            numbers: numbers(face_count),
            tags: face_tags,
            vertices: face_vertices,
        },
        cells: RawEntities {
            numbers: numbers(nx * ny),
            tags: vec![INTERIOR_TAG; nx * ny],
            vertices: cell_vertices,
        },
    }
}
