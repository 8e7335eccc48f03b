//! Boundary-aware lattice topology, indexing, and iteration.
//!
//! This crate defines the [`Lattice`] trait — the capability contract every
//! regular point lattice satisfies: shape and boundary queries, a bijective
//! position/serial-index mapping, and boundary-condition-aware adjacency —
//! along with concrete lattice types and the derived iterators.
//!
//! # Concrete lattices
//!
//! - [`BoundedLattice`]: hyper-rectangular grid with runtime shape and
//!   per-axis [`BoundaryCondition`]
//! - [`StaticBounded`]: hypercubic grid with a compile-time extent, using
//!   the const-specialized modulo path
//!
//! # Iteration
//!
//! [`LatticeExt`] derives lazy [`Sites`], [`Edges`], [`Surround`], and
//! [`Faces`] iterators from any lattice, concrete or `dyn`-erased. Faces
//! are an optional capability: probe [`Lattice::supports_faces`] first.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod bounded;
pub mod error;
pub mod fastmod;
pub mod iter;
pub mod lattice;
pub mod static_bounded;

#[cfg(test)]
pub(crate) mod compliance;

pub use boundary::{Boundary, BoundaryCondition};
pub use bounded::BoundedLattice;
pub use error::LatticeError;
pub use fastmod::{const_fold, FastMod};
pub use iter::{Edge, Edges, Face, Faces, Sites, Surround};
pub use lattice::{Lattice, LatticeExt};
pub use static_bounded::StaticBounded;
