//! Hypercubic lattice with compile-time extent.

use crate::boundary::{Boundary, BoundaryCondition};
use crate::error::LatticeError;
use crate::fastmod::const_fold;
use crate::lattice::Lattice;
use lattis_core::{Coord, LatticeInstanceId};
use smallvec::SmallVec;

/// An N-dimensional hypercubic lattice whose extent `E` along every axis is
/// a compile-time constant.
///
/// The statically-declared extent routes all periodic wraparound through
/// [`const_fold`], so the compiler strength-reduces the modulo per
/// monomorphization — the second path of the two-path optimization
/// ([`FastMod`](crate::FastMod) covers runtime-sized lattices). Use this
/// type when lattice dimensions are fixed in the source, e.g. a `16^3`
/// simulation box declared as `StaticBounded<16, 3>`.
///
/// # Examples
///
/// ```
/// use lattis_grid::{StaticBounded, BoundaryCondition, Lattice};
///
/// let lat = StaticBounded::<8, 2>::new(BoundaryCondition::Periodic).unwrap();
/// assert_eq!(lat.len(), 64);
/// assert_eq!(lat.to_serial(&[-1, 0]).unwrap(), 7);
/// ```
#[derive(Debug, Clone)]
pub struct StaticBounded<const E: u32, const N: usize> {
    shape: [u32; N],
    strides: [usize; N],
    boundary: Boundary,
    len: usize,
    instance_id: LatticeInstanceId,
}

impl<const E: u32, const N: usize> StaticBounded<E, N> {
    /// Create a lattice with one boundary condition on every axis.
    ///
    /// `E == 0` and `E > i32::MAX` are rejected at compile time; a zero
    /// `N` or a site count overflowing `usize` is
    /// `Err(LatticeError::EmptyLattice)` / `Err(LatticeError::LengthOverflow)`.
    pub fn new(bc: BoundaryCondition) -> Result<Self, LatticeError> {
        Self::with_boundary(Boundary::uniform(bc))
    }

    /// Create a lattice with per-axis boundary conditions.
    pub fn with_boundary(boundary: impl Into<Boundary>) -> Result<Self, LatticeError> {
        const {
            assert!(E > 0, "extent must be nonzero");
            assert!(E <= i32::MAX as u32, "extent must fit in i32");
        }
        if N == 0 {
            return Err(LatticeError::EmptyLattice);
        }
        let boundary = boundary.into();
        boundary.check_ndims(N)?;

        let mut strides = [0usize; N];
        let mut len = 1usize;
        for stride in &mut strides {
            *stride = len;
            len = len
                .checked_mul(E as usize)
                .ok_or(LatticeError::LengthOverflow)?;
        }

        Ok(Self {
            shape: [E; N],
            strides,
            boundary,
            len,
            instance_id: LatticeInstanceId::next(),
        })
    }
}

impl<const E: u32, const N: usize> Lattice for StaticBounded<E, N> {
    fn ndims(&self) -> usize {
        N
    }

    fn shape(&self) -> &[u32] {
        &self.shape
    }

    fn len(&self) -> usize {
        self.len
    }

    fn name(&self) -> &'static str {
        "hypercubic"
    }

    fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    fn to_serial(&self, position: &[i32]) -> Result<usize, LatticeError> {
        if position.len() != N {
            return Err(LatticeError::DimensionMismatch {
                expected: N,
                got: position.len(),
            });
        }
        let mut serial = 0usize;
        for (axis, &c) in position.iter().enumerate() {
            let folded = match self.boundary.condition(axis) {
                BoundaryCondition::Periodic => const_fold::<E>(c),
                BoundaryCondition::Fixed => {
                    if c < 0 || c >= E as i32 {
                        return Err(LatticeError::OutOfRange {
                            coord: SmallVec::from_slice(position),
                            bounds: format!("[0, {E})^{N}"),
                        });
                    }
                    c as u32
                }
            };
            serial += folded as usize * self.strides[axis];
        }
        Ok(serial)
    }

    fn to_position(&self, serial: usize) -> Result<Coord, LatticeError> {
        if serial >= self.len {
            return Err(LatticeError::OutOfRange {
                coord: SmallVec::new(),
                bounds: format!("serial {serial} outside [0, {})", self.len),
            });
        }
        let mut rest = serial;
        let mut position = Coord::with_capacity(N);
        for _ in 0..N {
            position.push((rest % E as usize) as i32);
            rest /= E as usize;
        }
        Ok(position)
    }

    fn instance_id(&self) -> LatticeInstanceId {
        self.instance_id
    }

    fn topology_eq(&self, other: &dyn Lattice) -> bool {
        (other as &dyn std::any::Any)
            .downcast_ref::<Self>()
            .is_some_and(|o| self.boundary == o.boundary)
    }
}
