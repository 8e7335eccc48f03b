//! Division-free modulo for periodic wraparound.
//!
//! Periodic index conversion folds every coordinate once per site per axis,
//! so the reduction sits on the hot path of lattice-wide iteration. Two
//! code paths avoid the hardware divide:
//!
//! - [`FastMod`]: the modulus is fixed at lattice construction. A
//!   multiply-shift reciprocal is precomputed once and each reduction is a
//!   widening multiply, no division.
//! - [`const_fold`]: the modulus is a compile-time constant (statically
//!   sized lattices). The compiler strength-reduces the `%` itself.
//!
//! Both agree with the mathematical modulo `((x % m) + m) % m` for every
//! `i32` input, including negatives — neighbor stepping goes below zero
//! before wraparound normalizes it.

/// Precomputed multiply-shift reciprocal for a fixed modulus.
///
/// Uses the Lemire fastmod trick: with `magic = u64::MAX / d + 1`, the value
/// `x mod d` for 32-bit `x` is the high 64 bits of
/// `(magic * x) as u128 * d`. Construction costs one division; every
/// reduction afterwards is two multiplies.
///
/// # Examples
///
/// ```
/// use lattis_grid::FastMod;
///
/// let m = FastMod::new(5);
/// assert_eq!(m.fold(7), 2);
/// assert_eq!(m.fold(-1), 4);
/// assert_eq!(m.fold(-10), 0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FastMod {
    modulus: u32,
    magic: u64,
}

impl FastMod {
    /// Precompute the reciprocal for `modulus`.
    ///
    /// # Panics
    ///
    /// Panics if `modulus == 0`. Lattice constructors reject zero extents
    /// before ever building a `FastMod`.
    pub fn new(modulus: u32) -> Self {
        assert_ne!(modulus, 0, "modulus must be nonzero");
        // For modulus == 1 the magic wraps to 0 and every reduction
        // yields 0, which is the correct residue.
        let magic = (u64::MAX / modulus as u64).wrapping_add(1);
        Self { modulus, magic }
    }

    /// The modulus this reciprocal was built for.
    pub fn modulus(&self) -> u32 {
        self.modulus
    }

    /// Reduce a non-negative 32-bit value into `[0, modulus)`.
    #[inline]
    fn fold_u32(&self, x: u32) -> u32 {
        let lowbits = self.magic.wrapping_mul(x as u64);
        (((lowbits as u128) * (self.modulus as u128)) >> 64) as u32
    }

    /// Reduce any `i32` into `[0, modulus)` under mathematical modulo.
    ///
    /// Negative inputs reduce by magnitude and reflect, so `fold(-1)` on
    /// modulus 5 is 4, matching `(-1i32).rem_euclid(5)`.
    #[inline]
    pub fn fold(&self, x: i32) -> u32 {
        if x >= 0 {
            self.fold_u32(x as u32)
        } else {
            let r = self.fold_u32(x.unsigned_abs());
            if r == 0 {
                0
            } else {
                self.modulus - r
            }
        }
    }
}

/// Compile-time-specialized modulo: fold `x` into `[0, M)`.
///
/// For a modulus known at compile time the optimizer replaces the division
/// behind `rem_euclid` with multiply-shift arithmetic on its own; this
/// function exists to make that specialization a named, testable path.
/// Statically sized lattices route every wraparound through it.
///
/// # Panics
///
/// Fails to compile (post-monomorphization) if `M == 0`.
///
/// # Examples
///
/// ```
/// use lattis_grid::const_fold;
///
/// assert_eq!(const_fold::<5>(-1), 4);
/// assert_eq!(const_fold::<8>(13), 5);
/// ```
#[inline]
pub const fn const_fold<const M: u32>(x: i32) -> u32 {
    const { assert!(M > 0, "modulus must be nonzero") };
    // M <= i32::MAX is enforced by lattice constructors; the cast is exact
    // for all extents a lattice can carry.
    x.rem_euclid(M as i32) as u32
}
