//! The [`Coord`] type alias and per-instance lattice identifiers.

use smallvec::SmallVec;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// A position on a lattice: one signed coordinate per dimension.
///
/// Uses `SmallVec<[i32; 4]>` to avoid heap allocation for lattices up to
/// 4 dimensions, which covers the common simulation cases (chains, square
/// and cubic grids, 4D hypercubic). Higher-dimensional lattices spill to
/// the heap transparently.
///
/// Coordinates are signed so that neighbor stepping can go below zero
/// before periodic wraparound normalizes it back into range.
pub type Coord = SmallVec<[i32; 4]>;

/// Counter for unique [`LatticeInstanceId`] allocation.
static LATTICE_INSTANCE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for a lattice object.
///
/// Allocated from a monotonic atomic counter via [`LatticeInstanceId::next`].
/// Two distinct lattice instances always have different IDs, even when their
/// shape and boundary are equal — lattices have value semantics for their
/// parameters but identity semantics as entities. Consumers that cache
/// per-lattice derived data (site tables, adjacency) key it on this ID to
/// avoid stale reuse when a lattice is dropped and another is allocated at
/// the same address.
///
/// Cloning a lattice preserves its instance ID, which is correct because
/// lattices are immutable after construction: same ID implies same topology.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LatticeInstanceId(u64);

impl LatticeInstanceId {
    /// Allocate a fresh, unique instance ID.
    ///
    /// Each call returns an ID never returned before within this process.
    /// Thread-safe.
    pub fn next() -> Self {
        Self(LATTICE_INSTANCE_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for LatticeInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
