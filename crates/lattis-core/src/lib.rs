//! Core types for the lattis lattice toolkit.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! [`Coord`] type alias and the strongly-typed [`LatticeInstanceId`] used
//! throughout the lattis workspace.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod id;

pub use id::{Coord, LatticeInstanceId};
