//! Lattice trait compliance test helpers.
//!
//! These functions verify that a [`Lattice`] implementation satisfies the
//! invariants required by the trait contract. Reused across all concrete
//! lattice test modules (BoundedLattice, StaticBounded).

use crate::lattice::{Lattice, LatticeExt};
use indexmap::IndexSet;

/// Assert `len() == product(shape())`.
pub fn assert_len_is_shape_product(lattice: &dyn Lattice) {
    let product: usize = lattice.shape().iter().map(|&e| e as usize).product();
    assert_eq!(
        lattice.len(),
        product,
        "len ({}) != product of shape {:?}",
        lattice.len(),
        lattice.shape()
    );
}

/// Assert `sites()` yields `[0, len)` ascending, exactly once.
pub fn assert_sites_complete_and_ascending(lattice: &dyn Lattice) {
    let sites: Vec<usize> = lattice.sites().collect();
    let expected: Vec<usize> = (0..lattice.len()).collect();
    assert_eq!(sites, expected, "sites() is not 0..len in order");
}

/// Assert a second iteration pass reproduces the first.
pub fn assert_iterators_restartable(lattice: &dyn Lattice) {
    assert!(
        lattice.sites().eq(lattice.sites()),
        "sites() is not restartable"
    );
    let first: Vec<_> = lattice.edges(1).expect("unit edges").collect();
    let second: Vec<_> = lattice.edges(1).expect("unit edges").collect();
    assert_eq!(first, second, "edges() is not restartable");
}

/// Assert serial -> position -> serial is the identity and every produced
/// position is canonical (each coordinate in `[0, extent)`).
pub fn assert_serial_position_bijective(lattice: &dyn Lattice) {
    for s in lattice.sites() {
        let p = lattice.to_position(s).expect("valid serial");
        for (axis, (&c, &extent)) in p.iter().zip(lattice.shape()).enumerate() {
            assert!(
                c >= 0 && c < extent as i32,
                "to_position({s}) coordinate {c} on axis {axis} not in [0, {extent})"
            );
        }
        let back = lattice.to_serial(&p).expect("canonical position");
        assert_eq!(back, s, "to_serial(to_position({s})) = {back}");
    }
}

/// Assert `n in surround(s)` implies `s in surround(n)`.
pub fn assert_surround_symmetric(lattice: &dyn Lattice) {
    for (site, neighbors) in lattice.surround_all() {
        for n in neighbors {
            let back = lattice.surround(n).expect("valid neighbor serial");
            assert!(
                back.contains(&site),
                "adjacency not symmetric: {n} in surround({site}) but {site} not in surround({n})"
            );
        }
    }
}

/// Assert no site lists the same neighbor twice.
pub fn assert_surround_deduplicated(lattice: &dyn Lattice) {
    for (site, neighbors) in lattice.surround_all() {
        let unique: IndexSet<usize> = neighbors.iter().copied().collect();
        assert_eq!(
            unique.len(),
            neighbors.len(),
            "surround({site}) lists a neighbor more than once: {neighbors:?}"
        );
    }
}

/// Assert unit edges cover each unordered site pair at most once, with
/// valid distinct endpoints that are mutual neighbors.
pub fn assert_edges_canonical(lattice: &dyn Lattice) {
    let mut seen: IndexSet<(usize, usize)> = IndexSet::new();
    for edge in lattice.edges(1).expect("unit edges") {
        assert!(edge.a < lattice.len(), "edge endpoint {} out of range", edge.a);
        assert!(edge.b < lattice.len(), "edge endpoint {} out of range", edge.b);
        assert_ne!(edge.a, edge.b, "self-edge emitted at site {}", edge.a);
        let key = (edge.a.min(edge.b), edge.a.max(edge.b));
        assert!(
            seen.insert(key),
            "edge {key:?} emitted more than once"
        );
        assert!(
            lattice.surround(edge.a).expect("valid site").contains(&edge.b),
            "edge {key:?} endpoints are not neighbors"
        );
    }
}

/// Run all compliance checks on a lattice.
pub fn run_full_compliance(lattice: &dyn Lattice) {
    assert_len_is_shape_product(lattice);
    assert_sites_complete_and_ascending(lattice);
    assert_iterators_restartable(lattice);
    assert_serial_position_bijective(lattice);
    assert_surround_symmetric(lattice);
    assert_surround_deduplicated(lattice);
    assert_edges_canonical(lattice);
}
