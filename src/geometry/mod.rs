//! Geometric attributes of the 2D mesh: centers, areas, face frames,
//! non-orthogonality corrections, and interpolation weights.

pub mod metrics;
pub mod quality;
pub mod vector;

/// Tolerance for all degeneracy and orientation checks.
pub(crate) const GEOM_EPS: f64 = 1e-10;
