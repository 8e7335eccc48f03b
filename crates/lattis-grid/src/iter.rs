//! Lazy iterators over sites, edges, neighbor sets, and faces.
//!
//! All iterators are read-only views derived from the [`Lattice`] contract:
//! they borrow the lattice for their lifetime, never mutate it, and a fresh
//! constructor call restarts iteration independently of any prior pass.
//! Serial arithmetic uses the row-major stride formula the trait guarantees,
//! so stepping to a neighbor is a single add — no per-edge division and no
//! re-validation of positions the iterator itself produced.

use crate::boundary::{Boundary, BoundaryCondition};
use crate::error::LatticeError;
use crate::lattice::Lattice;
use indexmap::IndexSet;
use lattis_core::Coord;
use smallvec::SmallVec;

/// An adjacency between two sites at a given step length.
///
/// `a` is the originating site and `b` the site reached by stepping
/// `length` along `axis` in the increasing direction (folded on periodic
/// axes). Together with `wraps` this preserves enough information to
/// recompute the geometric displacement: a wraparound edge spans the
/// periodic image, not the linear coordinate difference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    /// Originating site.
    pub a: usize,
    /// Site reached by the step.
    pub b: usize,
    /// Axis the edge runs along.
    pub axis: usize,
    /// Step length the edge was generated with.
    pub length: u32,
    /// `true` iff the step crossed a periodic boundary.
    pub wraps: bool,
}

/// A unit plaquette: the minimal closed cell spanned by two axes.
///
/// Corner sites are listed in cyclic order: anchor, `+e0`, `+e0+e1`, `+e1`,
/// where `e0`/`e1` are unit steps along `axes.0` and `axes.1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Face {
    /// The four corner sites in cyclic order.
    pub sites: [usize; 4],
    /// The axis pair spanning the plaquette, `axes.0 < axes.1`.
    pub axes: (usize, usize),
}

/// Iterator over every serial index of a lattice, ascending.
///
/// Finite and restartable: a new call to
/// [`LatticeExt::sites`](crate::LatticeExt::sites) begins at index 0 again.
#[derive(Clone, Debug)]
pub struct Sites {
    next: usize,
    end: usize,
}

impl Sites {
    pub(crate) fn new(len: usize) -> Self {
        Self { next: 0, end: len }
    }
}

impl Iterator for Sites {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.next < self.end {
            let s = self.next;
            self.next += 1;
            Some(s)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Sites {
    fn next_back(&mut self) -> Option<usize> {
        if self.next < self.end {
            self.end -= 1;
            Some(self.end)
        } else {
            None
        }
    }
}

impl ExactSizeIterator for Sites {}

/// Per-axis edge-generation rule, precomputed once per iterator.
///
/// Canonicalization for periodic axes (each unordered pair exactly once):
/// a step that lands on the originating site is dropped entirely; when the
/// same pair is reachable by stepping from both endpoints (`2L ≡ 0 mod E`,
/// e.g. extent 2 with unit steps) the edge is emitted only from the
/// endpoint with the smaller axis coordinate; otherwise every site emits
/// its `+L` edge, wrapping included.
#[derive(Clone, Copy, Debug)]
enum AxisRule {
    /// Fixed axis: emit iff the coordinate is below `limit` (= extent − L,
    /// saturating).
    Fixed { limit: u32 },
    /// Periodic axis whose step is a multiple of the extent: self-edges,
    /// never emitted.
    SelfStep,
    /// Periodic axis where both endpoints would generate the same pair.
    Halved { reduced: u32 },
    /// Periodic axis, general case.
    Periodic { reduced: u32 },
}

fn axis_rules(shape: &[u32], boundary: &Boundary, length: u32) -> SmallVec<[AxisRule; 4]> {
    shape
        .iter()
        .enumerate()
        .map(|(axis, &extent)| match boundary.condition(axis) {
            BoundaryCondition::Fixed => AxisRule::Fixed {
                limit: extent.saturating_sub(length),
            },
            BoundaryCondition::Periodic => {
                let reduced = length % extent;
                if reduced == 0 {
                    AxisRule::SelfStep
                } else if (2 * length as u64) % extent as u64 == 0 {
                    AxisRule::Halved { reduced }
                } else {
                    AxisRule::Periodic { reduced }
                }
            }
        })
        .collect()
}

/// Row-major strides: `stride[0] = 1`, `stride[d] = stride[d-1] * shape[d-1]`.
fn strides_of(shape: &[u32]) -> SmallVec<[usize; 4]> {
    let mut strides = SmallVec::with_capacity(shape.len());
    let mut acc = 1usize;
    for &extent in shape {
        strides.push(acc);
        acc *= extent as usize;
    }
    strides
}

/// Advance a row-major position odometer by one site (axis 0 fastest).
fn advance(position: &mut Coord, shape: &[u32]) {
    for (c, &extent) in position.iter_mut().zip(shape) {
        *c += 1;
        if *c < extent as i32 {
            return;
        }
        *c = 0;
    }
}

/// Resolve a single axis step of the rule's length from coordinate `c`.
///
/// Returns the signed coordinate delta and whether the step wrapped, or
/// `None` when the edge is omitted (out of range on Fixed, or dropped by
/// the periodic canonicalization rule).
fn resolve_step(c: i32, extent: u32, rule: AxisRule, length: u32) -> Option<(i32, bool)> {
    match rule {
        AxisRule::Fixed { limit } => {
            if (c as u32) < limit {
                Some((length as i32, false))
            } else {
                None
            }
        }
        AxisRule::SelfStep => None,
        AxisRule::Halved { reduced } | AxisRule::Periodic { reduced } => {
            let stepped = c + reduced as i32;
            let (folded, crossed) = if stepped >= extent as i32 {
                (stepped - extent as i32, true)
            } else {
                (stepped, false)
            };
            if matches!(rule, AxisRule::Halved { .. }) && c >= folded {
                return None;
            }
            // A step longer than the extent wraps even when the folded
            // coordinate lands above the origin.
            Some((folded - c, crossed || reduced != length))
        }
    }
}

/// Iterator over every eligible edge of a lattice at a fixed step length.
///
/// Per site and per axis, one step in the increasing direction is attempted;
/// the [`AxisRule`] canonicalization guarantees each unordered site pair
/// appears exactly once. Order of emission is row-major by originating site,
/// then by axis.
#[derive(Debug)]
pub struct Edges<'a, L: Lattice + ?Sized> {
    lattice: &'a L,
    rules: SmallVec<[AxisRule; 4]>,
    strides: SmallVec<[usize; 4]>,
    length: u32,
    position: Coord,
    serial: usize,
    axis: usize,
}

impl<'a, L: Lattice + ?Sized> Edges<'a, L> {
    pub(crate) fn new(lattice: &'a L, length: u32) -> Result<Self, LatticeError> {
        if !lattice.supports_edge_length(length) {
            return Err(LatticeError::Unsupported {
                what: "edge length",
            });
        }
        let shape = lattice.shape();
        Ok(Self {
            lattice,
            rules: axis_rules(shape, lattice.boundary(), length),
            strides: strides_of(shape),
            length,
            position: shape.iter().map(|_| 0).collect(),
            serial: 0,
            axis: 0,
        })
    }
}

impl<L: Lattice + ?Sized> Iterator for Edges<'_, L> {
    type Item = Edge;

    fn next(&mut self) -> Option<Edge> {
        let shape = self.lattice.shape();
        let total = self.lattice.len();
        while self.serial < total {
            while self.axis < shape.len() {
                let axis = self.axis;
                self.axis += 1;
                let c = self.position[axis];
                if let Some((delta, wraps)) =
                    resolve_step(c, shape[axis], self.rules[axis], self.length)
                {
                    let b = (self.serial as i64 + delta as i64 * self.strides[axis] as i64)
                        as usize;
                    return Some(Edge {
                        a: self.serial,
                        b,
                        axis,
                        length: self.length,
                        wraps,
                    });
                }
            }
            self.serial += 1;
            self.axis = 0;
            advance(&mut self.position, shape);
        }
        None
    }
}

/// Unit-step neighbors of a single site, deduplicated.
///
/// Shared by [`LatticeExt::surround`](crate::LatticeExt::surround) and the
/// all-sites [`Surround`] iterator. Neighbors appear in axis order,
/// decreasing direction before increasing; duplicates (periodic axes of
/// extent 1 or 2, where both directions reach the same site) are kept once
/// in first-seen order.
pub(crate) fn surround_site<L: Lattice + ?Sized>(
    lattice: &L,
    site: usize,
) -> Result<SmallVec<[usize; 8]>, LatticeError> {
    let position = lattice.to_position(site)?;
    let shape = lattice.shape();
    let boundary = lattice.boundary();
    let strides = strides_of(shape);

    let mut seen: IndexSet<usize> = IndexSet::new();
    for (axis, &extent) in shape.iter().enumerate() {
        let c = position[axis];
        let n = extent as i32;
        for delta in [-1i32, 1] {
            let stepped = c + delta;
            let folded = match boundary.condition(axis) {
                BoundaryCondition::Fixed => {
                    if stepped < 0 || stepped >= n {
                        continue;
                    }
                    stepped
                }
                BoundaryCondition::Periodic => {
                    if stepped < 0 {
                        n - 1
                    } else if stepped >= n {
                        0
                    } else {
                        stepped
                    }
                }
            };
            let neighbor =
                (site as i64 + (folded - c) as i64 * strides[axis] as i64) as usize;
            seen.insert(neighbor);
        }
    }
    Ok(seen.into_iter().collect())
}

/// Iterator over `(site, neighbor-set)` pairs for every site, ascending.
#[derive(Debug)]
pub struct Surround<'a, L: Lattice + ?Sized> {
    lattice: &'a L,
    serial: usize,
}

impl<'a, L: Lattice + ?Sized> Surround<'a, L> {
    pub(crate) fn new(lattice: &'a L) -> Self {
        Self { lattice, serial: 0 }
    }
}

impl<L: Lattice + ?Sized> Iterator for Surround<'_, L> {
    type Item = (usize, SmallVec<[usize; 8]>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.serial >= self.lattice.len() {
            return None;
        }
        let site = self.serial;
        self.serial += 1;
        let neighbors =
            surround_site(self.lattice, site).expect("cursor only visits valid serials");
        Some((site, neighbors))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.lattice.len() - self.serial;
        (remaining, Some(remaining))
    }
}

/// Iterator over every unit plaquette of a lattice.
///
/// For each site and each axis pair `d0 < d1`, the face anchored at the
/// site is emitted when a unit step is eligible along both axes under the
/// same per-axis canonicalization as [`Edges`] — so degenerate periodic
/// extents never produce the same corner set twice.
#[derive(Debug)]
pub struct Faces<'a, L: Lattice + ?Sized> {
    lattice: &'a L,
    rules: SmallVec<[AxisRule; 4]>,
    strides: SmallVec<[usize; 4]>,
    position: Coord,
    serial: usize,
    pair: usize,
    pairs: Vec<(usize, usize)>,
}

impl<'a, L: Lattice + ?Sized> Faces<'a, L> {
    pub(crate) fn new(lattice: &'a L) -> Result<Self, LatticeError> {
        if !lattice.supports_faces() {
            return Err(LatticeError::Unsupported { what: "faces" });
        }
        let shape = lattice.shape();
        let ndims = shape.len();
        let mut pairs = Vec::with_capacity(ndims * (ndims - 1) / 2);
        for d0 in 0..ndims {
            for d1 in (d0 + 1)..ndims {
                pairs.push((d0, d1));
            }
        }
        Ok(Self {
            lattice,
            rules: axis_rules(shape, lattice.boundary(), 1),
            strides: strides_of(shape),
            position: shape.iter().map(|_| 0).collect(),
            serial: 0,
            pair: 0,
            pairs,
        })
    }
}

impl<L: Lattice + ?Sized> Iterator for Faces<'_, L> {
    type Item = Face;

    fn next(&mut self) -> Option<Face> {
        let shape = self.lattice.shape();
        let total = self.lattice.len();
        while self.serial < total {
            while self.pair < self.pairs.len() {
                let (d0, d1) = self.pairs[self.pair];
                self.pair += 1;
                let step0 = resolve_step(self.position[d0], shape[d0], self.rules[d0], 1);
                let step1 = resolve_step(self.position[d1], shape[d1], self.rules[d1], 1);
                if let (Some((delta0, _)), Some((delta1, _))) = (step0, step1) {
                    let anchor = self.serial as i64;
                    let off0 = delta0 as i64 * self.strides[d0] as i64;
                    let off1 = delta1 as i64 * self.strides[d1] as i64;
                    return Some(Face {
                        sites: [
                            anchor as usize,
                            (anchor + off0) as usize,
                            (anchor + off0 + off1) as usize,
                            (anchor + off1) as usize,
                        ],
                        axes: (d0, d1),
                    });
                }
            }
            self.serial += 1;
            self.pair = 0;
            advance(&mut self.position, shape);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounded::BoundedLattice;
    use crate::lattice::LatticeExt;
    use BoundaryCondition::{Fixed, Periodic};

    fn pair(e: &Edge) -> (usize, usize) {
        (e.a.min(e.b), e.a.max(e.b))
    }

    // ── Sites ───────────────────────────────────────────────────

    #[test]
    fn sites_cover_shape_3x4_exactly_once() {
        let lat = BoundedLattice::new([3, 4], Fixed).unwrap();
        let collected: Vec<usize> = lat.sites().collect();
        assert_eq!(collected, (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn sites_is_restartable() {
        let lat = BoundedLattice::chain(5, Periodic).unwrap();
        let first: Vec<usize> = lat.sites().collect();
        let second: Vec<usize> = lat.sites().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn sites_is_double_ended_and_exact() {
        let lat = BoundedLattice::chain(4, Fixed).unwrap();
        let mut it = lat.sites();
        assert_eq!(it.len(), 4);
        assert_eq!(it.next_back(), Some(3));
        assert_eq!(it.next(), Some(0));
        assert_eq!(it.len(), 2);
    }

    // ── Edges ───────────────────────────────────────────────────

    #[test]
    fn edges_chain_fixed_worked() {
        let lat = BoundedLattice::chain(4, Fixed).unwrap();
        let edges: Vec<(usize, usize)> = lat.edges(1).unwrap().iter_pairs();
        assert_eq!(edges, vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn edges_chain_periodic_includes_wraparound() {
        let lat = BoundedLattice::chain(4, Periodic).unwrap();
        let edges: Vec<Edge> = lat.edges(1).unwrap().collect();
        assert_eq!(edges.len(), 4);
        let pairs: Vec<(usize, usize)> = edges.iter().map(|e| (e.a, e.b)).collect();
        assert_eq!(pairs, vec![(0, 1), (1, 2), (2, 3), (3, 0)]);
        assert!(!edges[0].wraps);
        assert!(edges[3].wraps);
    }

    #[test]
    fn edges_no_duplicate_pairs_on_degenerate_periodic() {
        // Extent 2: the single pair {0, 1} is reachable from both ends.
        let lat = BoundedLattice::chain(2, Periodic).unwrap();
        let edges: Vec<Edge> = lat.edges(1).unwrap().collect();
        assert_eq!(edges.len(), 1);
        assert_eq!((edges[0].a, edges[0].b), (0, 1));
    }

    #[test]
    fn edges_extent_one_periodic_yields_none() {
        // Every step is a self-edge.
        let lat = BoundedLattice::chain(1, Periodic).unwrap();
        assert_eq!(lat.edges(1).unwrap().count(), 0);
    }

    #[test]
    fn edges_square_fixed_count() {
        // 3x3 with Fixed boundary: 2*3 horizontal + 3*2 vertical = 12.
        let lat = BoundedLattice::new([3, 3], Fixed).unwrap();
        assert_eq!(lat.edges(1).unwrap().count(), 12);
    }

    #[test]
    fn edges_square_periodic_count() {
        // Torus: every site emits one edge per axis.
        let lat = BoundedLattice::new([3, 3], Periodic).unwrap();
        assert_eq!(lat.edges(1).unwrap().count(), 18);
    }

    #[test]
    fn edges_length_two_fixed() {
        let lat = BoundedLattice::chain(5, Fixed).unwrap();
        let pairs: Vec<(usize, usize)> = lat.edges(2).unwrap().iter_pairs();
        assert_eq!(pairs, vec![(0, 2), (1, 3), (2, 4)]);
    }

    #[test]
    fn edges_length_two_periodic_halved() {
        // Extent 4, step 2: 2L ≡ 0 (mod 4), each pair reachable both ways.
        let lat = BoundedLattice::chain(4, Periodic).unwrap();
        let edges: Vec<Edge> = lat.edges(2).unwrap().collect();
        let pairs: Vec<(usize, usize)> = edges.iter().map(pair).collect();
        assert_eq!(pairs, vec![(0, 2), (1, 3)]);
    }

    #[test]
    fn edges_length_beyond_fixed_extent_is_empty() {
        let lat = BoundedLattice::chain(3, Fixed).unwrap();
        assert_eq!(lat.edges(5).unwrap().count(), 0);
    }

    #[test]
    fn edges_length_zero_is_unsupported() {
        let lat = BoundedLattice::chain(3, Fixed).unwrap();
        assert!(matches!(
            lat.edges(0),
            Err(LatticeError::Unsupported { .. })
        ));
    }

    #[test]
    fn edges_mixed_boundary_per_axis() {
        // Periodic rows, Fixed columns on a 2x3: rows wrap, columns do not.
        let lat = BoundedLattice::with_boundary(
            [2, 3],
            Boundary::per_axis([Periodic, Fixed]),
        )
        .unwrap();
        let edges: Vec<Edge> = lat.edges(1).unwrap().collect();
        // Axis 0 (extent 2, periodic, halved): 1 per row pair = 3.
        // Axis 1 (extent 3, fixed): 2 per column * 2 = 4.
        assert_eq!(edges.len(), 7);
        assert_eq!(edges.iter().filter(|e| e.axis == 0).count(), 3);
        assert_eq!(edges.iter().filter(|e| e.axis == 1).count(), 4);
    }

    /// Helper: collect `(a, b)` pairs in emission order.
    trait IterPairs {
        fn iter_pairs(self) -> Vec<(usize, usize)>;
    }

    impl<L: Lattice + ?Sized> IterPairs for Edges<'_, L> {
        fn iter_pairs(self) -> Vec<(usize, usize)> {
            self.map(|e| (e.a, e.b)).collect()
        }
    }

    // ── Surround ────────────────────────────────────────────────

    #[test]
    fn surround_interior_site_square() {
        let lat = BoundedLattice::new([3, 3], Fixed).unwrap();
        // Site 4 = position (1, 1): all four unit neighbors.
        let n = lat.surround(4).unwrap();
        assert_eq!(n.as_slice(), &[3, 5, 1, 7]);
    }

    #[test]
    fn surround_corner_fixed_omits_out_of_range() {
        let lat = BoundedLattice::new([3, 3], Fixed).unwrap();
        let n = lat.surround(0).unwrap();
        assert_eq!(n.as_slice(), &[1, 3]);
    }

    #[test]
    fn surround_corner_periodic_wraps() {
        let lat = BoundedLattice::new([3, 3], Periodic).unwrap();
        let n = lat.surround(0).unwrap();
        assert_eq!(n.as_slice(), &[2, 1, 6, 3]);
    }

    #[test]
    fn surround_no_duplicates_extent_two_periodic() {
        let lat = BoundedLattice::chain(2, Periodic).unwrap();
        let n = lat.surround(0).unwrap();
        assert_eq!(n.as_slice(), &[1]);
    }

    #[test]
    fn surround_extent_one_periodic_is_self_once() {
        let lat = BoundedLattice::chain(1, Periodic).unwrap();
        let n = lat.surround(0).unwrap();
        assert_eq!(n.as_slice(), &[0]);
    }

    #[test]
    fn surround_rejects_out_of_range_site() {
        let lat = BoundedLattice::chain(3, Fixed).unwrap();
        assert!(matches!(
            lat.surround(3),
            Err(LatticeError::OutOfRange { .. })
        ));
    }

    #[test]
    fn surround_all_covers_every_site() {
        let lat = BoundedLattice::new([2, 3], Periodic).unwrap();
        let pairs: Vec<(usize, _)> = lat.surround_all().collect();
        assert_eq!(pairs.len(), 6);
        for (site, neighbors) in &pairs {
            assert!(*site < 6);
            assert_eq!(neighbors, &lat.surround(*site).unwrap());
        }
    }

    #[test]
    fn surround_is_symmetric() {
        let lat = BoundedLattice::with_boundary(
            [3, 4],
            Boundary::per_axis([Fixed, Periodic]),
        )
        .unwrap();
        for (site, neighbors) in lat.surround_all() {
            for n in neighbors {
                assert!(
                    lat.surround(n).unwrap().contains(&site),
                    "adjacency not symmetric: {n} in surround({site}) but not vice versa"
                );
            }
        }
    }

    // ── Faces ───────────────────────────────────────────────────

    #[test]
    fn faces_unsupported_on_chain() {
        let lat = BoundedLattice::chain(5, Periodic).unwrap();
        assert!(!lat.supports_faces());
        assert!(matches!(
            lat.faces(),
            Err(LatticeError::Unsupported { what: "faces" })
        ));
    }

    #[test]
    fn faces_square_fixed_worked() {
        let lat = BoundedLattice::new([3, 3], Fixed).unwrap();
        let faces: Vec<Face> = lat.faces().unwrap().collect();
        assert_eq!(faces.len(), 4);
        // Anchor (0,0): corners 0, 1, 4, 3 in cyclic order.
        assert_eq!(faces[0].sites, [0, 1, 4, 3]);
        assert_eq!(faces[0].axes, (0, 1));
    }

    #[test]
    fn faces_square_periodic_count() {
        // Torus 3x3: one plaquette anchored at every site.
        let lat = BoundedLattice::new([3, 3], Periodic).unwrap();
        assert_eq!(lat.faces().unwrap().count(), 9);
    }

    #[test]
    fn faces_degenerate_torus_not_duplicated() {
        // 2x2 torus: all anchors produce the same 4-site cell; the
        // halved-axis rule keeps exactly one.
        let lat = BoundedLattice::new([2, 2], Periodic).unwrap();
        let faces: Vec<Face> = lat.faces().unwrap().collect();
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0].sites, [0, 1, 3, 2]);
    }

    #[test]
    fn faces_cubic_axis_pairs() {
        // 3D fixed 3x3x3: 3 axis pairs, 4 anchors each per free axis * 3
        // positions of the remaining axis = 12 per pair.
        let lat = BoundedLattice::new([3, 3, 3], Fixed).unwrap();
        let faces: Vec<Face> = lat.faces().unwrap().collect();
        assert_eq!(faces.len(), 36);
        for f in &faces {
            assert!(f.axes.0 < f.axes.1);
        }
    }

    #[test]
    fn faces_corners_are_distinct_sites() {
        let lat = BoundedLattice::new([3, 4], Periodic).unwrap();
        for face in lat.faces().unwrap() {
            let mut sites = face.sites;
            sites.sort_unstable();
            sites.windows(2).for_each(|w| assert_ne!(w[0], w[1]));
        }
    }
}
