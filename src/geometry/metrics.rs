//! The geometry evaluation pipeline.
//!
//! Ordered sub-stages, each a data-parallel pass over one entity kind:
//! cell centers, face centers/areas, cell-local face tangents/normals, cell
//! areas via the 2D divergence theorem, centroidal vectors, orthogonality
//! deltas with skewness diagnostics, and inverse-distance interpolation
//! weights at faces and vertices. Each sub-stage depends on the previous and
//! is validated before the next begins.
//!
//! Faces are line segments in this 2D model, so the face "area" is the
//! segment length and the cell "volume" is the polygon area. Tangents and
//! normals are stored per (cell, local face) occurrence, flat-indexed through
//! the cell→face CSR offsets, because normal orientation is cell-relative.

use crate::geometry::vector;
use crate::mesh_error::MeshFvmError;
use crate::topology::boundary::Boundary;
use crate::topology::cell_faces::local_face_index;
use crate::topology::csr::Csr;
use crate::topology::id::{CellId, EntityId, FaceId};
use crate::topology::store::EntityStore;
use crate::validate;
use itertools::Itertools;
use rayon::prelude::*;

/// All derived geometric attributes of a built mesh.
#[derive(Clone, Debug)]
pub struct Geometry {
    /// Arithmetic mean of each cell's vertex coordinates.
    pub cell_centers: Vec<[f64; 3]>,
    /// Cell areas from the divergence theorem (the 2D "volume").
    pub cell_areas: Vec<f64>,
    /// Midpoint of each face's two vertices.
    pub face_centers: Vec<[f64; 3]>,
    /// Segment length of each face.
    pub face_areas: Vec<f64>,
    /// Unit tangent per (cell, local face), in cell winding order;
    /// flat-indexed through the cell→face CSR offsets.
    pub face_tangents: Vec<[f64; 3]>,
    /// Unit outward normal per (cell, local face); same layout as tangents.
    pub face_normals: Vec<[f64; 3]>,
    /// Centroidal vector per face: between the two incident cell centers for
    /// an interior face, or from the sole cell center to the face center for
    /// a boundary face.
    pub face_vectors: Vec<[f64; 3]>,
    /// Orthogonal projection of the centroidal vector onto the face normal
    /// (evaluated at the face's first incident cell); the diffusive-flux
    /// distance.
    pub face_deltas: Vec<f64>,
    /// Projection of the centroidal vector onto the face tangent; lateral
    /// misalignment diagnostic.
    pub face_skewness: Vec<f64>,
    /// Inverse-distance cell→face weights, rows aligned with the face→cell
    /// map. A boundary face has the single weight 1.
    pub face_weights: Csr<f64>,
    /// Inverse-distance cell→vertex weights, rows aligned with the
    /// vertex→cell map; each row sums to 1.
    pub vertex_weights: Csr<f64>,
}

impl Geometry {
    /// Run all geometry sub-stages over a validated topology.
    pub fn evaluate(
        store: &EntityStore,
        cell_faces: &Csr<FaceId>,
        face_cells: &Csr<CellId>,
        vertex_cells: &Csr<CellId>,
        boundary: &Boundary,
    ) -> Result<Self, MeshFvmError> {
        let cell_centers = cell_centers(store);
        log::trace!("cell centers done ({} cells)", cell_centers.len());

        let (face_centers, face_areas) = face_centers_areas(store);
        validate::faces_nondegenerate(store, &face_areas)?;

        let (face_tangents, face_normals) = face_frames(store, cell_faces);
        validate::orientation(cell_faces, &face_tangents, &face_normals)?;

        let cell_areas = cell_areas(cell_faces, &face_normals, &face_centers, &face_areas);
        validate::cell_areas_positive(&cell_areas)?;

        let face_vectors = face_vectors(face_cells, &cell_centers, &face_centers, boundary);
        let (face_deltas, face_skewness) = face_deltas(
            cell_faces,
            face_cells,
            &face_vectors,
            &face_tangents,
            &face_normals,
        );
        validate::face_deltas_positive(&face_deltas)?;
        log::trace!(
            "face geometry done ({} faces, {} boundary)",
            face_areas.len(),
            boundary.faces().len()
        );

        let face_weights = face_weights(face_cells, &cell_centers, &face_centers);
        let vertex_weights = vertex_weights(store, vertex_cells, &cell_centers);

        Ok(Self {
            cell_centers,
            cell_areas,
            face_centers,
            face_areas,
            face_tangents,
            face_normals,
            face_vectors,
            face_deltas,
            face_skewness,
            face_weights,
            vertex_weights,
        })
    }
}

/// Cell centers: arithmetic mean of the cell's vertex coordinates.
fn cell_centers(store: &EntityStore) -> Vec<[f64; 3]> {
    (0..store.cell_count())
        .into_par_iter()
        .map(|c| {
            let verts = store.cell_vertices(CellId::from_index(c));
            let mut acc = [0.0; 3];
            for &v in verts {
                acc = vector::add(acc, store.coord(v));
            }
            vector::scale(acc, 1.0 / verts.len() as f64)
        })
        .collect()
}

/// Face centers (segment midpoints) and areas (segment lengths).
fn face_centers_areas(store: &EntityStore) -> (Vec<[f64; 3]>, Vec<f64>) {
    (0..store.face_count())
        .into_par_iter()
        .map(|f| {
            let fv = store.face_vertices(FaceId::from_index(f));
            let a = store.coord(fv[0]);
            let b = store.coord(fv[1]);
            (vector::midpoint(a, b), vector::distance(a, b))
        })
        .unzip()
}

/// Unit tangents and outward normals per (cell, local face).
///
/// The tangent runs from cell-local vertex `k` to `k+1`, so it follows the
/// anticlockwise winding; rotating it by -90 degrees in-plane yields the
/// outward normal. Face lengths are validated non-degenerate before this
/// stage, so the normalization divisor is nonzero.
fn face_frames(store: &EntityStore, cell_faces: &Csr<FaceId>) -> (Vec<[f64; 3]>, Vec<[f64; 3]>) {
    let total = cell_faces.total_len();
    let mut tangents = Vec::with_capacity(total);
    let mut normals = Vec::with_capacity(total);
    for c in 0..store.cell_count() {
        let verts = store.cell_vertices(CellId::from_index(c));
        for (&a, &b) in verts.iter().circular_tuple_windows() {
            let edge = vector::sub(store.coord(b), store.coord(a));
            let t = vector::scale(edge, 1.0 / vector::norm(edge));
            tangents.push(t);
            normals.push([t[1], -t[0], 0.0]);
        }
    }
    (tangents, normals)
}

/// Cell areas via the 2D divergence theorem: sum over the cell's faces of
/// `normal_x * face_center_x * face_area`.
fn cell_areas(
    cell_faces: &Csr<FaceId>,
    normals: &[[f64; 3]],
    face_centers: &[[f64; 3]],
    face_areas: &[f64],
) -> Vec<f64> {
    (0..cell_faces.row_count())
        .into_par_iter()
        .map(|c| {
            cell_faces
                .row_range(c)
                .zip(cell_faces.row(c))
                .map(|(k, &f)| normals[k][0] * face_centers[f.index()][0] * face_areas[f.index()])
                .sum()
        })
        .collect()
}

/// Centroidal vectors: cell center to cell center across an interior face
/// (direction follows the face→cell row order), or cell center to face
/// center for a boundary face.
fn face_vectors(
    face_cells: &Csr<CellId>,
    cell_centers: &[[f64; 3]],
    face_centers: &[[f64; 3]],
    boundary: &Boundary,
) -> Vec<[f64; 3]> {
    (0..face_cells.row_count())
        .into_par_iter()
        .map(|f| {
            let cells = face_cells.row(f);
            if boundary.is_boundary_face(FaceId::from_index(f)) {
                vector::sub(face_centers[f], cell_centers[cells[0].index()])
            } else {
                vector::sub(
                    cell_centers[cells[1].index()],
                    cell_centers[cells[0].index()],
                )
            }
        })
        .collect()
}

/// Orthogonality deltas and skewness, both projections of the centroidal
/// vector onto the face frame at the face's first incident cell.
fn face_deltas(
    cell_faces: &Csr<FaceId>,
    face_cells: &Csr<CellId>,
    face_vectors: &[[f64; 3]],
    tangents: &[[f64; 3]],
    normals: &[[f64; 3]],
) -> (Vec<f64>, Vec<f64>) {
    (0..face_cells.row_count())
        .into_par_iter()
        .map(|f| {
            let face = FaceId::from_index(f);
            let cell = face_cells.row(f)[0];
            let local = local_face_index(cell_faces, cell, face)
                .expect("face must appear in its incident cell's face list");
            let k = cell_faces.row_range(cell.index()).start + local;
            let delta = vector::dot(face_vectors[f], normals[k]).abs();
            let skew = vector::dot(face_vectors[f], tangents[k]);
            (delta, skew)
        })
        .unzip()
}

/// Inverse-distance cell→face weights. Interior faces weight their two cells
/// by inverse distance to the face center; boundary faces give their sole
/// cell weight 1. Distances are bounded below by the already-validated face
/// deltas, so the divisions are safe.
fn face_weights(
    face_cells: &Csr<CellId>,
    cell_centers: &[[f64; 3]],
    face_centers: &[[f64; 3]],
) -> Csr<f64> {
    let rows: Vec<Vec<f64>> = (0..face_cells.row_count())
        .into_par_iter()
        .map(|f| {
            let cells = face_cells.row(f);
            if cells.len() == 1 {
                vec![1.0]
            } else {
                let d1 = vector::distance(cell_centers[cells[0].index()], face_centers[f]);
                let d2 = vector::distance(cell_centers[cells[1].index()], face_centers[f]);
                let w1 = (1.0 / d1) / (1.0 / d1 + 1.0 / d2);
                vec![w1, 1.0 - w1]
            }
        })
        .collect();
    Csr::from_rows(&rows)
}

/// Inverse-distance cell→vertex weights, normalized per vertex so each row
/// sums to 1. The raw sum completes before the divide (a local two-pass per
/// vertex).
fn vertex_weights(
    store: &EntityStore,
    vertex_cells: &Csr<CellId>,
    cell_centers: &[[f64; 3]],
) -> Csr<f64> {
    let rows: Vec<Vec<f64>> = (0..store.vertex_count())
        .into_par_iter()
        .map(|v| {
            let coord = store.coords()[v];
            let mut raw: Vec<f64> = vertex_cells
                .row(v)
                .iter()
                .map(|&c| 1.0 / vector::distance(coord, cell_centers[c.index()]))
                .collect();
            let sum: f64 = raw.iter().sum();
            for w in &mut raw {
                *w /= sum;
            }
            raw
        })
        .collect();
    Csr::from_rows(&rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::invert::invert_incidence;
    use crate::topology::store::{RawEntities, RawMesh, RawVertices};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-10
    }

    fn unit_square() -> (EntityStore, Csr<FaceId>, Csr<CellId>, Csr<CellId>, Boundary) {
        let segs = vec![vec![0u32, 1], vec![1, 2], vec![2, 3], vec![3, 0]];
        let raw = RawMesh {
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
                tags: vec![0; 4],
                vertices: segs,
            },
            cells: RawEntities {
                numbers: vec![1],
                tags: vec![0],
                vertices: vec![vec![0, 1, 2, 3]],
            },
        };
        let store = EntityStore::from_raw(raw).unwrap();
        let vertex_faces: Csr<FaceId> =
            invert_incidence(store.face_vertex_map(), store.vertex_count());
        let vertex_cells: Csr<CellId> =
            invert_incidence(store.cell_vertex_map(), store.vertex_count());
        let cell_faces =
            crate::topology::cell_faces::build_cell_faces(&store, &vertex_faces).unwrap();
        let face_cells: Csr<CellId> = invert_incidence(&cell_faces, store.face_count());
        let boundary = crate::topology::boundary::classify(&store, &face_cells);
        (store, cell_faces, face_cells, vertex_cells, boundary)
    }

    #[test]
    fn unit_square_metrics() {
        let (store, cell_faces, face_cells, vertex_cells, boundary) = unit_square();
        let geom =
            Geometry::evaluate(&store, &cell_faces, &face_cells, &vertex_cells, &boundary)
                .unwrap();

        assert_eq!(geom.cell_centers[0], [0.5, 0.5, 0.0]);
        assert!(approx(geom.cell_areas[0], 1.0));
        assert_eq!(geom.face_centers[0], [0.5, 0.0, 0.0]);
        assert!(geom.face_areas.iter().all(|&a| approx(a, 1.0)));

        // Bottom face: tangent +x, outward normal -y.
        assert_eq!(geom.face_tangents[0], [1.0, 0.0, 0.0]);
        assert_eq!(geom.face_normals[0], [0.0, -1.0, 0.0]);

        // All four faces are boundary faces at distance 0.5 from the center.
        for f in 0..4 {
            assert!(approx(geom.face_deltas[f], 0.5));
            assert!(approx(geom.face_skewness[f], 0.0));
            assert_eq!(geom.face_weights.row(f), &[1.0]);
        }

        // Each vertex sees the single cell with full weight.
        for v in 0..4 {
            assert_eq!(geom.vertex_weights.row(v), &[1.0]);
        }
    }

    #[test]
    fn clockwise_winding_fails_area_check() {
        let (store, _, _, _, _) = unit_square();
        // Rebuild with reversed winding through the raw arrays.
        let mut raw = RawMesh {
            vertices: RawVertices {
                numbers: (1..=4).collect(),
                tags: vec![0; 4],
                coords: store.coords().to_vec(),
            },
            ..Default::default()
        };
        let segs = vec![vec![0u32, 3], vec![3, 2], vec![2, 1], vec![1, 0]];
        raw.edges = RawEntities {
            numbers: (1..=4).collect(),
            tags: vec![0; 4],
            vertices: segs.clone(),
        };
        raw.faces = RawEntities {
            numbers: (1..=4).collect(),
            tags: vec![0; 4],
            vertices: segs,
        };
        raw.cells = RawEntities {
            numbers: vec![1],
            tags: vec![0],
            vertices: vec![vec![0, 3, 2, 1]],
        };
        let store = EntityStore::from_raw(raw).unwrap();
        let vertex_faces: Csr<FaceId> =
            invert_incidence(store.face_vertex_map(), store.vertex_count());
        let vertex_cells: Csr<CellId> =
            invert_incidence(store.cell_vertex_map(), store.vertex_count());
        let cell_faces =
            crate::topology::cell_faces::build_cell_faces(&store, &vertex_faces).unwrap();
        let face_cells: Csr<CellId> = invert_incidence(&cell_faces, store.face_count());
        let boundary = crate::topology::boundary::classify(&store, &face_cells);
        let err =
            Geometry::evaluate(&store, &cell_faces, &face_cells, &vertex_cells, &boundary)
                .unwrap_err();
        assert!(matches!(err, MeshFvmError::NonPositiveCellArea { .. }));
    }
}
