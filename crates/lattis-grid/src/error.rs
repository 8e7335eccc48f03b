//! Error types for lattice construction and queries.

use lattis_core::Coord;
use std::fmt;

/// Errors arising from lattice construction, index conversion, or iteration.
///
/// All variants are local precondition violations on the interface boundary.
/// The core never retries and never silently recovers — in particular an
/// out-of-range coordinate on a Fixed axis is rejected, not clamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LatticeError {
    /// A coordinate or serial index is outside the valid range.
    OutOfRange {
        /// The offending position (a single-entry coord for serial indices).
        coord: Coord,
        /// Human-readable description of the valid range.
        bounds: String,
    },
    /// A position's coordinate count does not match the lattice dimension.
    DimensionMismatch {
        /// Dimension count of the lattice.
        expected: usize,
        /// Coordinate count actually supplied.
        got: usize,
    },
    /// An optional capability was requested of a lattice that lacks it.
    ///
    /// Absence of a capability is signalled with this error, never with an
    /// empty sequence, so callers cannot confuse "no faces" with "cannot
    /// compute faces".
    Unsupported {
        /// The missing capability.
        what: &'static str,
    },
    /// Attempted to construct a lattice with no sites (empty shape or a
    /// zero extent).
    EmptyLattice,
    /// An extent exceeds the coordinate type's range.
    ExtentTooLarge {
        /// Axis of the offending extent.
        axis: usize,
        /// The offending extent.
        value: u32,
        /// Maximum supported extent.
        max: u32,
    },
    /// The product of extents overflows the serial index type.
    LengthOverflow,
}

impl fmt::Display for LatticeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { coord, bounds } => {
                write!(f, "position {coord:?} out of range: {bounds}")
            }
            Self::DimensionMismatch { expected, got } => {
                write!(f, "expected {expected} coordinates, got {got}")
            }
            Self::Unsupported { what } => {
                write!(f, "unsupported capability: {what}")
            }
            Self::EmptyLattice => write!(f, "lattice must have at least one site"),
            Self::ExtentTooLarge { axis, value, max } => {
                write!(f, "extent {value} on axis {axis} exceeds maximum {max}")
            }
            Self::LengthOverflow => write!(f, "product of extents overflows usize"),
        }
    }
}

impl std::error::Error for LatticeError {}
