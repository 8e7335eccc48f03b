//! Lattis: regular point lattices for simulation codes.
//!
//! This is the top-level facade crate re-exporting the public API from the
//! lattis sub-crates. For most users, adding `lattis` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use lattis::prelude::*;
//!
//! // A 4x4 torus.
//! let lat = BoundedLattice::new([4, 4], BoundaryCondition::Periodic).unwrap();
//! assert_eq!(lat.len(), 16);
//!
//! // Periodic index conversion folds any integer coordinate.
//! assert_eq!(lat.to_serial(&[-1, 0]).unwrap(), 3);
//!
//! // Every site of a torus has 4 distinct unit neighbors.
//! for (site, neighbors) in lat.surround_all() {
//!     assert_eq!(neighbors.len(), 4, "site {site}");
//! }
//!
//! // Edge enumeration covers each unordered pair once, wraparound included.
//! let wrapping = lat.edges(1).unwrap().filter(|e| e.wraps).count();
//! assert_eq!(wrapping, 8);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `lattis-core` | `Coord`, instance identifiers |
//! | [`grid`] | `lattis-grid` | The `Lattice` trait, concrete lattices, iterators |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types (`lattis-core`).
///
/// The [`types::Coord`] position alias and [`types::LatticeInstanceId`].
pub use lattis_core as types;

/// Lattice trait, concrete lattices, and iterators (`lattis-grid`).
///
/// Provides the [`grid::Lattice`] contract with concrete implementations
/// [`grid::BoundedLattice`] and [`grid::StaticBounded`].
pub use lattis_grid as grid;

/// Common imports for typical lattis usage.
///
/// ```rust
/// use lattis::prelude::*;
/// ```
pub mod prelude {
    pub use lattis_core::{Coord, LatticeInstanceId};
    pub use lattis_grid::{
        Boundary, BoundaryCondition, BoundedLattice, Edge, Face, FastMod, Lattice, LatticeError,
        LatticeExt, StaticBounded,
    };
}
