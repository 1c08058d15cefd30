//! Mesh topology: entity handles, CSR ragged storage, the raw entity store,
//! incidence inversion, composite cell→face derivation, and boundary
//! classification.

pub mod boundary;
pub mod cell_faces;
pub mod csr;
pub mod id;
pub mod invert;
pub mod store;
