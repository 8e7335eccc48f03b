//! Hyper-rectangular lattice with runtime shape and boundary.

use crate::boundary::{Boundary, BoundaryCondition};
use crate::error::LatticeError;
use crate::fastmod::FastMod;
use crate::lattice::Lattice;
use lattis_core::{Coord, LatticeInstanceId};
use smallvec::SmallVec;

/// The reference lattice: an N-dimensional hyper-rectangular grid with
/// per-axis extents and boundary conditions chosen at construction.
///
/// Stores its shape, row-major strides, and one precomputed [`FastMod`]
/// reciprocal per axis, so periodic index conversion never divides. All
/// state is immutable after construction.
///
/// # Examples
///
/// ```
/// use lattis_grid::{BoundedLattice, BoundaryCondition, Lattice, LatticeExt};
///
/// let lat = BoundedLattice::new([3, 4], BoundaryCondition::Periodic).unwrap();
/// assert_eq!(lat.ndims(), 2);
/// assert_eq!(lat.len(), 12);
///
/// // Periodic conversion folds any integer coordinate into range.
/// assert_eq!(lat.to_serial(&[-1, 0]).unwrap(), 2);
///
/// // Row-major bijection between positions and serial indices.
/// let p = lat.to_position(7).unwrap();
/// assert_eq!(lat.to_serial(&p).unwrap(), 7);
/// ```
#[derive(Debug, Clone)]
pub struct BoundedLattice {
    shape: SmallVec<[u32; 4]>,
    strides: SmallVec<[usize; 4]>,
    folds: SmallVec<[FastMod; 4]>,
    boundary: Boundary,
    len: usize,
    name: &'static str,
    instance_id: LatticeInstanceId,
}

impl BoundedLattice {
    /// Maximum extent per axis: coordinates use `i32`, so each must fit.
    pub const MAX_EXTENT: u32 = i32::MAX as u32;

    /// Create a lattice with the given shape and one boundary condition
    /// applied to every axis.
    ///
    /// Returns `Err(LatticeError::EmptyLattice)` for an empty shape or a
    /// zero extent, `Err(LatticeError::ExtentTooLarge)` if an extent
    /// exceeds `i32::MAX`, and `Err(LatticeError::LengthOverflow)` if the
    /// site count overflows `usize`.
    pub fn new(
        shape: impl IntoIterator<Item = u32>,
        bc: BoundaryCondition,
    ) -> Result<Self, LatticeError> {
        Self::with_boundary(shape, Boundary::uniform(bc))
    }

    /// Create a lattice with per-axis boundary conditions.
    ///
    /// In addition to the checks of [`new`](Self::new), a
    /// [`Boundary::PerAxis`] whose arity differs from the shape's is
    /// `Err(LatticeError::DimensionMismatch)`.
    pub fn with_boundary(
        shape: impl IntoIterator<Item = u32>,
        boundary: impl Into<Boundary>,
    ) -> Result<Self, LatticeError> {
        Self::build(shape.into_iter().collect(), boundary.into(), "bounded")
    }

    /// A one-dimensional lattice of `len` sites (a chain, or a ring when
    /// periodic).
    pub fn chain(len: u32, bc: BoundaryCondition) -> Result<Self, LatticeError> {
        let mut lat = Self::new([len], bc)?;
        lat.name = "chain";
        Ok(lat)
    }

    /// A two-dimensional `rows x cols` lattice (a torus when periodic).
    pub fn square(rows: u32, cols: u32, bc: BoundaryCondition) -> Result<Self, LatticeError> {
        let mut lat = Self::new([rows, cols], bc)?;
        lat.name = "square";
        Ok(lat)
    }

    fn build(
        shape: SmallVec<[u32; 4]>,
        boundary: Boundary,
        name: &'static str,
    ) -> Result<Self, LatticeError> {
        if shape.is_empty() {
            return Err(LatticeError::EmptyLattice);
        }
        boundary.check_ndims(shape.len())?;

        let mut strides = SmallVec::with_capacity(shape.len());
        let mut folds = SmallVec::with_capacity(shape.len());
        let mut len = 1usize;
        for (axis, &extent) in shape.iter().enumerate() {
            if extent == 0 {
                return Err(LatticeError::EmptyLattice);
            }
            if extent > Self::MAX_EXTENT {
                return Err(LatticeError::ExtentTooLarge {
                    axis,
                    value: extent,
                    max: Self::MAX_EXTENT,
                });
            }
            strides.push(len);
            folds.push(FastMod::new(extent));
            len = len
                .checked_mul(extent as usize)
                .ok_or(LatticeError::LengthOverflow)?;
        }

        Ok(Self {
            shape,
            strides,
            folds,
            boundary,
            len,
            name,
            instance_id: LatticeInstanceId::next(),
        })
    }

    /// Human-readable description of the valid coordinate ranges, for
    /// error messages: `[0, 3) x [0, 4)`.
    fn bounds_desc(&self) -> String {
        let parts: Vec<String> = self.shape.iter().map(|e| format!("[0, {e})")).collect();
        parts.join(" x ")
    }
}

impl Lattice for BoundedLattice {
    fn ndims(&self) -> usize {
        self.shape.len()
    }

    fn shape(&self) -> &[u32] {
        &self.shape
    }

    fn len(&self) -> usize {
        self.len
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    fn to_serial(&self, position: &[i32]) -> Result<usize, LatticeError> {
        if position.len() != self.shape.len() {
            return Err(LatticeError::DimensionMismatch {
                expected: self.shape.len(),
                got: position.len(),
            });
        }
        let mut serial = 0usize;
        for (axis, &c) in position.iter().enumerate() {
            let extent = self.shape[axis];
            let folded = match self.boundary.condition(axis) {
                BoundaryCondition::Periodic => self.folds[axis].fold(c),
                BoundaryCondition::Fixed => {
                    if c < 0 || c >= extent as i32 {
                        return Err(LatticeError::OutOfRange {
                            coord: SmallVec::from_slice(position),
                            bounds: self.bounds_desc(),
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
        let mut position = Coord::with_capacity(self.shape.len());
        for &extent in &self.shape {
            position.push((rest % extent as usize) as i32);
            rest /= extent as usize;
        }
        Ok(position)
    }

    fn instance_id(&self) -> LatticeInstanceId {
        self.instance_id
    }

    fn topology_eq(&self, other: &dyn Lattice) -> bool {
        (other as &dyn std::any::Any)
            .downcast_ref::<Self>()
            .is_some_and(|o| self.shape == o.shape && self.boundary == o.boundary)
    }
}
