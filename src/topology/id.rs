//! Typed entity handles for mesh entities.
//!
//! Every mesh entity (vertex, edge, face, cell) is addressed by a dense,
//! zero-based index into per-kind arrays. Each kind gets its own transparent
//! `u32` newtype so that a cell index can never be used where a face index is
//! expected. The [`EntityId`] trait lets generic topology code (CSR storage,
//! incidence inversion) convert between handles and array positions.
//!
//! External (file) numbers are kept separately in the entity store; handles
//! here are always the dense internal index.

use std::fmt;

/// The four entity kinds of the 2D mesh model. Used in diagnostics and
/// error reporting, not for dispatch.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum EntityKind {
    Vertex,
    Edge,
    Face,
    Cell,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Vertex => write!(f, "vertex"),
            EntityKind::Edge => write!(f, "edge"),
            EntityKind::Face => write!(f, "face"),
            EntityKind::Cell => write!(f, "cell"),
        }
    }
}

/// Canonical bound set for entity handles.
///
/// Rationale:
/// - `Copy` for cheap pass-by-value in tight loops
/// - `Eq + Hash` for `HashMap`-backed lookups
/// - `Ord` for deterministic ordering of neighbor lists
/// - `Debug` for diagnostics and invariant checks
pub trait EntityId: Copy + Eq + std::hash::Hash + Ord + fmt::Debug {
    /// The entity kind this handle addresses, for diagnostics.
    const KIND: EntityKind;

    /// Build a handle from a dense array index.
    fn from_index(index: usize) -> Self;

    /// The dense array index this handle addresses.
    fn index(self) -> usize;
}

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident, $kind:expr) => {
        $(#[$doc])*
        #[derive(
            Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Creates a handle from a raw dense index.
            #[inline]
            pub const fn new(raw: u32) -> Self {
                $name(raw)
            }

            /// Returns the raw dense index.
            #[inline]
            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl EntityId for $name {
            const KIND: EntityKind = $kind;

            #[inline]
            fn from_index(index: usize) -> Self {
                $name(index as u32)
            }

            #[inline]
            fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.0).finish()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Dense handle for a mesh vertex.
    VertexId,
    EntityKind::Vertex
);
entity_id!(
    /// Dense handle for a mesh edge.
    EdgeId,
    EntityKind::Edge
);
entity_id!(
    /// Dense handle for a mesh face (a 2-vertex line segment in 2D).
    FaceId,
    EntityKind::Face
);
entity_id!(
    /// Dense handle for a mesh cell (an anticlockwise-wound polygon).
    CellId,
    EntityKind::Cell
);
