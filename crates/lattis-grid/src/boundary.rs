//! Boundary conditions for lattice edges.

use crate::error::LatticeError;
use smallvec::SmallVec;

/// How a lattice axis behaves at its ends.
///
/// This controls the *topology* — which sites are considered neighbors of
/// boundary sites and whether coordinates outside `[0, extent)` are valid.
///
/// # Examples
///
/// ```
/// use lattis_grid::{BoundedLattice, BoundaryCondition, Lattice, LatticeExt};
///
/// // Fixed: the end site of a chain has a single neighbor.
/// let chain = BoundedLattice::chain(5, BoundaryCondition::Fixed).unwrap();
/// assert_eq!(chain.surround(0).unwrap().len(), 1);
///
/// // Periodic: every site of a ring has exactly two neighbors.
/// let ring = BoundedLattice::chain(5, BoundaryCondition::Periodic).unwrap();
/// assert_eq!(ring.surround(0).unwrap().len(), 2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoundaryCondition {
    /// No wraparound: a coordinate outside `[0, extent)` is invalid.
    Fixed,
    /// Coordinates wrap modulo the extent (the axis closes into a ring).
    Periodic,
}

/// Boundary conditions for a whole lattice: one kind for all axes, or one
/// kind per axis.
///
/// Immutable value type. Construct with [`Boundary::uniform`] or
/// [`Boundary::per_axis`]; query per-axis behavior with
/// [`condition`](Boundary::condition).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Boundary {
    /// The same condition applies to every axis.
    Uniform(BoundaryCondition),
    /// One condition per axis, in axis order.
    PerAxis(SmallVec<[BoundaryCondition; 4]>),
}

impl Boundary {
    /// A boundary applying `bc` to every axis.
    pub fn uniform(bc: BoundaryCondition) -> Self {
        Self::Uniform(bc)
    }

    /// A boundary with one condition per axis.
    pub fn per_axis(conditions: impl IntoIterator<Item = BoundaryCondition>) -> Self {
        Self::PerAxis(conditions.into_iter().collect())
    }

    /// The condition governing `axis`.
    ///
    /// For a per-axis boundary, `axis` must be within the stored arity;
    /// lattice constructors validate this via [`check_ndims`](Self::check_ndims).
    pub fn condition(&self, axis: usize) -> BoundaryCondition {
        match self {
            Self::Uniform(bc) => *bc,
            Self::PerAxis(conditions) => conditions[axis],
        }
    }

    /// `true` iff every axis is [`BoundaryCondition::Periodic`].
    pub fn is_periodic(&self) -> bool {
        match self {
            Self::Uniform(bc) => *bc == BoundaryCondition::Periodic,
            Self::PerAxis(conditions) => conditions
                .iter()
                .all(|bc| *bc == BoundaryCondition::Periodic),
        }
    }

    /// Validate this boundary against a lattice of `ndims` axes.
    ///
    /// A uniform boundary fits any arity; a per-axis boundary must list
    /// exactly `ndims` conditions.
    pub fn check_ndims(&self, ndims: usize) -> Result<(), LatticeError> {
        match self {
            Self::Uniform(_) => Ok(()),
            Self::PerAxis(conditions) => {
                if conditions.len() == ndims {
                    Ok(())
                } else {
                    Err(LatticeError::DimensionMismatch {
                        expected: ndims,
                        got: conditions.len(),
                    })
                }
            }
        }
    }
}

impl From<BoundaryCondition> for Boundary {
    fn from(bc: BoundaryCondition) -> Self {
        Self::Uniform(bc)
    }
}
