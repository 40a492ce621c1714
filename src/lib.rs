#![cfg_attr(not(test), no_std)]
//! This crate provides **exact** summation of `f64`s: the sum of any sequence of doubles, computed
//! with no intermediate rounding at all and then rounded *once* to the nearest double, using the
//! *superaccumulators* of Radford Neal's
//! [xsum](https://arxiv.org/abs/1505.05571) algorithm.
//!
//! # Introduction
//!
//! Adding doubles in the obvious way rounds after every addition, so the result depends on the
//! order of the values and can be arbitrarily wrong when large values cancel. An exact sum has
//! neither problem: the result is always the correctly rounded value of the true sum, so it is
//! bit-for-bit the same for any permutation of the inputs.
//!
//! The trick is a fixed-point number wide enough to hold any double without loss. Adding a double
//! to it is just a couple of integer additions, which makes exact summation only a few times slower
//! than naive summation (and for long sums, with the large accumulator, sometimes barely slower
//! at all).
//!
//! # Usage
//!
//! ```
//! use xsum::{Xsum, XsumAuto, XsumExt};
//!
//! // Sum a slice in one go.
//! let values = [1e20, 0.1, -1e20, 1e20, 0.1, -1e20, 1e20, 0.1, -1e20];
//! assert_eq!(values.xsum(), 0.30000000000000004);
//! assert_eq!(values.iter().sum::<f64>(), 0.0);  // Not so with naive summation!
//!
//! // Or add values as they come.
//! let mut acc = XsumAuto::new();
//! acc.add(0.1);
//! acc.add_list(&[0.2, 0.3]);
//! acc += -0.6;
//! assert_eq!(acc.sum(), 2.0_f64.powi(-55));
//!
//! // Infinities and NaNs behave as they do for IEEE addition.
//! acc.add(f64::INFINITY);
//! assert_eq!(acc.sum(), f64::INFINITY);
//! ```
//!
//! There are several accumulator types, trading size for speed; see [`Xsum`] for the operations
//! and the rules for infinities, NaNs, and signed zeros, and the types themselves for guidance
//! on which to pick.
//!
//! This crate is `no_std`, but needs `alloc`. It logs (sparingly) through [`tracing`].
//!
//! This crate includes benchmarks; run them with `cargo bench -F bench`.

extern crate alloc;

/// Bit layout of an IEEE 754 double.
mod float;
/// The small superaccumulator.
mod small;
/// The large superaccumulator.
mod large;
/// The public accumulator types.
mod xsum;
/// Miscellaneous utilities.
mod utl;

pub use xsum::{Xsum, XsumAuto, XsumExt, XsumLarge, XsumSmall, XsumVariant};
pub use xsum::{XSUM_THRESHOLD, xsum, xsum_with_threshold};


/// Exact sums with rationals, to test against.
#[cfg(test)]
mod rational;

#[cfg(test)]
const PROPTEST_CASES: u32 = if cfg!(debug_assertions) {0x400} else {0x4000};

/// Re-export some internals for benchmarking purposes, only on `feature = "bench"`.
#[cfg(feature = "bench")]
mod bench;
