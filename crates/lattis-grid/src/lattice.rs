//! The core `Lattice` trait and `dyn Lattice` downcast support.

use crate::boundary::Boundary;
use crate::error::LatticeError;
use crate::iter::{Edges, Faces, Sites, Surround};
use lattis_core::{Coord, LatticeInstanceId};
use smallvec::SmallVec;
use std::any::Any;

/// Capability contract every conforming lattice type satisfies.
///
/// A lattice is a regular grid of sites in N dimensions with a bijective
/// mapping between multi-dimensional positions and flat serial indices,
/// plus boundary-condition-aware adjacency. Concrete types
/// ([`BoundedLattice`](crate::BoundedLattice),
/// [`StaticBounded`](crate::StaticBounded)) implement it to define their
/// arithmetic; iteration over sites, edges, neighbor sets, and faces is
/// derived generically through [`LatticeExt`].
///
/// All operations are side-effect-free and O(N) in the dimension count,
/// never in the site count. Lattices are immutable after construction, so
/// concurrent reads and any number of simultaneous iterators are safe.
///
/// # Object Safety
///
/// This trait is designed for use as `dyn Lattice`. Use `downcast_ref` for
/// opt-in specialization on concrete types; the iterator constructors live
/// on [`LatticeExt`] so they work on both concrete and erased lattices.
pub trait Lattice: Any + Send + Sync + 'static {
    /// Number of dimensions. Fixed at construction.
    fn ndims(&self) -> usize;

    /// Extent along each dimension, in axis order. Every entry is >= 1.
    fn shape(&self) -> &[u32];

    /// Total number of sites: the product of [`shape`](Self::shape) entries.
    fn len(&self) -> usize;

    /// Always `false` — construction rejects empty shapes and zero extents.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Human-readable identity of the lattice kind. No effect on arithmetic.
    fn name(&self) -> &'static str;

    /// The boundary conditions governing this lattice's axes.
    fn boundary(&self) -> &Boundary;

    /// `true` iff every axis is periodic.
    fn is_periodic(&self) -> bool {
        self.boundary().is_periodic()
    }

    /// Convert a position to its serial index under row-major strides.
    ///
    /// On a Periodic axis any integer coordinate folds into range first, so
    /// conversion succeeds for arbitrary input along that axis. On a Fixed
    /// axis a coordinate outside `[0, extent)` is
    /// [`LatticeError::OutOfRange`]; it is never clamped. A position whose
    /// arity differs from [`ndims`](Self::ndims) is
    /// [`LatticeError::DimensionMismatch`].
    fn to_serial(&self, position: &[i32]) -> Result<usize, LatticeError>;

    /// Convert a serial index back to its canonical position.
    ///
    /// The result's coordinates all lie in `[0, extent)`. A serial index
    /// `>= len()` is [`LatticeError::OutOfRange`].
    fn to_position(&self, serial: usize) -> Result<Coord, LatticeError>;

    /// Whether this lattice can enumerate faces (unit plaquettes).
    ///
    /// Callers probe this before calling [`LatticeExt::faces`]; absence is
    /// signalled by [`LatticeError::Unsupported`], never by an empty
    /// sequence.
    fn supports_faces(&self) -> bool {
        self.ndims() >= 2
    }

    /// Whether [`LatticeExt::edges`] accepts the given step length.
    fn supports_edge_length(&self, length: u32) -> bool {
        length >= 1
    }

    /// Unique instance identifier for this lattice object.
    ///
    /// Allocated from a monotonic counter at construction time. Lets
    /// consumers that cache per-lattice derived data detect when a
    /// different instance is passed.
    fn instance_id(&self) -> LatticeInstanceId;

    /// Returns `true` if `self` and `other` are topologically equivalent:
    /// same concrete type, same shape, same boundary conditions.
    ///
    /// Implementors should downcast `other` to `Self` and compare all
    /// behavior-relevant fields; return `false` if the downcast fails.
    fn topology_eq(&self, other: &dyn Lattice) -> bool;
}

impl dyn Lattice {
    /// Attempt to downcast a trait object to a concrete lattice type.
    ///
    /// This enables opt-in specialization: code that works with
    /// `&dyn Lattice` can check for a known concrete type and use
    /// type-specific fast paths.
    pub fn downcast_ref<T: Lattice>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }
}

/// Iterator constructors derived from the [`Lattice`] contract.
///
/// Blanket-implemented for every lattice, sized or erased, so
/// `lattice.sites()` works the same on a `BoundedLattice` value and on a
/// `&dyn Lattice`. All iterators borrow the lattice read-only for their
/// lifetime; a fresh call restarts iteration from the beginning.
pub trait LatticeExt: Lattice {
    /// Every serial index in `[0, len)`, ascending, exactly once.
    fn sites(&self) -> Sites {
        Sites::new(self.len())
    }

    /// Every edge of the given step length, each unordered site pair
    /// exactly once.
    ///
    /// Returns [`LatticeError::Unsupported`] when
    /// [`supports_edge_length`](Lattice::supports_edge_length) is `false`
    /// for `length`.
    fn edges(&self, length: u32) -> Result<Edges<'_, Self>, LatticeError> {
        Edges::new(self, length)
    }

    /// Unit-step neighbors of `site`, deduplicated, in axis order
    /// (decreasing direction before increasing per axis).
    fn surround(&self, site: usize) -> Result<SmallVec<[usize; 8]>, LatticeError> {
        crate::iter::surround_site(self, site)
    }

    /// Lazy `(site, neighbors)` pairs over all sites in ascending site
    /// order.
    fn surround_all(&self) -> Surround<'_, Self> {
        Surround::new(self)
    }

    /// Unit plaquettes of the lattice, each face exactly once.
    ///
    /// Optional capability: returns [`LatticeError::Unsupported`] when
    /// [`supports_faces`](Lattice::supports_faces) is `false` (lattices
    /// with fewer than two dimensions).
    fn faces(&self) -> Result<Faces<'_, Self>, LatticeError> {
        Faces::new(self)
    }
}

impl<L: Lattice + ?Sized> LatticeExt for L {}
