//! Mesh quality diagnostics over a built mesh.
//!
//! Summarizes the geometric attributes that matter for finite-volume
//! accuracy: orthogonality deltas, skewness, cell areas, and interior face
//! weight spread. Pure read-only derivation; typically logged or printed by
//! the embedding driver after construction.

use crate::geometry::vector;
use crate::mesh::Mesh;
use crate::topology::id::{EntityId, FaceId};

/// Summary statistics of a mesh's geometric quality.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct QualityReport {
    pub cell_count: usize,
    pub face_count: usize,
    pub boundary_face_count: usize,
    /// Smallest orthogonality delta over all faces.
    pub min_delta: f64,
    pub max_delta: f64,
    pub mean_delta: f64,
    /// Largest absolute skewness over all faces.
    pub max_skewness: f64,
    pub min_cell_area: f64,
    pub max_cell_area: f64,
    pub total_area: f64,
    /// Largest deviation of an interior face's first weight from 0.5; zero on
    /// a perfectly uniform mesh.
    pub max_weight_imbalance: f64,
}

/// Compute quality statistics for a built mesh.
pub fn quality_report(mesh: &Mesh) -> QualityReport {
    let geom = mesh.geometry();

    let mut min_delta = f64::INFINITY;
    let mut max_delta = 0.0f64;
    let mut delta_sum = 0.0;
    for &d in &geom.face_deltas {
        min_delta = min_delta.min(d);
        max_delta = max_delta.max(d);
        delta_sum += d;
    }

    let max_skewness = geom
        .face_skewness
        .iter()
        .fold(0.0f64, |acc, &s| acc.max(s.abs()));

    let mut min_cell_area = f64::INFINITY;
    let mut max_cell_area = 0.0f64;
    let mut total_area = 0.0;
    for &a in &geom.cell_areas {
        min_cell_area = min_cell_area.min(a);
        max_cell_area = max_cell_area.max(a);
        total_area += a;
    }

    let mut max_weight_imbalance = 0.0f64;
    for f in 0..mesh.face_count() {
        let weights = mesh.face_weights(FaceId::from_index(f));
        if weights.len() == 2 {
            max_weight_imbalance = max_weight_imbalance.max((weights[0] - 0.5).abs());
        }
    }

    let face_count = mesh.face_count();
    QualityReport {
        cell_count: mesh.cell_count(),
        face_count,
        boundary_face_count: mesh.boundary().faces().len(),
        min_delta,
        max_delta,
        mean_delta: if face_count > 0 {
            delta_sum / face_count as f64
        } else {
            0.0
        },
        max_skewness,
        min_cell_area,
        max_cell_area,
        total_area,
        max_weight_imbalance,
    }
}

/// Mean skewness magnitude relative to face delta, a dimensionless lateral
/// misalignment measure.
pub fn mean_relative_skewness(mesh: &Mesh) -> f64 {
    let geom = mesh.geometry();
    if geom.face_deltas.is_empty() {
        return 0.0;
    }
    let sum: f64 = geom
        .face_skewness
        .iter()
        .zip(&geom.face_deltas)
        .map(|(&s, &d)| s.abs() / d)
        .sum();
    sum / geom.face_deltas.len() as f64
}

/// Ratio of a face's delta to the full centroidal distance; 1 on a perfectly
/// orthogonal mesh.
pub fn face_orthogonality(mesh: &Mesh, f: FaceId) -> f64 {
    let geom = mesh.geometry();
    mesh.face_delta(f) / vector::norm(geom.face_vectors[f.index()])
}
