//! The public face of the crate: accumulator types that can be fed doubles and asked for their
//! exact, correctly rounded sum.
//!
//! There are four of them, all implementing [`Xsum`]:
//!
//!   - [`XsumSmall`]: wraps the small superaccumulator. Small state (about half a kilobyte) and
//!     cheap to sum, best for short inputs.
//!   - [`XsumLarge`]: wraps the large superaccumulator. Large state (tens of kilobytes) and slower
//!     to sum, but each add is cheaper, so it wins for long inputs.
//!   - [`XsumAuto`]: starts small and switches to large once it has seen more than a threshold
//!     number of values, for when the input length is not known in advance.
//!   - [`XsumVariant`]: one of the above, chosen by the caller, for when it is.

use crate::large::LargeAccumulator;
use crate::small::SmallAccumulator;

/// The default number of values past which the large accumulator is preferred over the small one.
/// See [`XsumAuto::with_threshold`] and [`xsum_with_threshold`].
pub const XSUM_THRESHOLD: usize = 1000;

/// An accumulator of doubles whose [`sum`](Self::sum) is exact: it is the sum of all the values
/// added, computed with no intermediate rounding, rounded once to the nearest double (ties to
/// even). In particular, it does not depend on the order in which values are added.
///
/// Infinities and NaNs are handled as IEEE 754 addition would: any NaN makes the sum NaN (the NaN
/// with the largest payload is kept), infinities of opposite signs make it NaN, and otherwise an
/// infinity makes it that infinity. A sum of no values is `-0.0`, and a sum that is exactly zero
/// is `+0.0` unless every value added was negative or `-0.0`.
///
/// # Example
///
/// ```
/// use xsum::{Xsum, XsumSmall};
///
/// let mut acc = XsumSmall::new();
/// acc.add_list(&[1e308, 0.1, -1e308, 0.2]);
/// acc.add(1e30);
/// acc.add(-1e30);
/// assert_eq!(acc.sum(), 0.30000000000000004);
/// assert_eq!(0.1 + 0.2, 0.30000000000000004);
/// ```
pub trait Xsum: Default {
  /// Add a value.
  fn add(&mut self, value: f64);

  /// Add a slice of values. Same as calling [`add`](Self::add) for each, but faster.
  fn add_list(&mut self, values: &[f64]);

  /// The sum of all values added so far, correctly rounded.
  ///
  /// This takes `&mut self` because it normalises the internal state, but it does not change the
  /// value represented: more values can be added afterwards, and calling it again without adding
  /// anything gives the same result.
  fn sum(&mut self) -> f64;

  /// Forget all values added, as if newly created.
  fn clear(&mut self) {
    *self = Self::default()
  }
}

/// [`XsumSmall`]
mod small;

/// [`XsumLarge`]
mod large;

/// [`XsumAuto`]
mod auto;

/// [`XsumVariant`]
mod variant;

/// Summing a slice in one go: [`xsum`], [`XsumExt`].
mod slice;

pub use small::XsumSmall;
pub use large::XsumLarge;
pub use auto::XsumAuto;
pub use variant::XsumVariant;
pub use slice::{XsumExt, xsum, xsum_with_threshold};

/// Implement the standard traits for feeding values to an accumulator: `Extend`, `FromIterator`,
/// and `+=`, all in terms of [`Xsum::add`].
macro_rules! impl_std_traits {
  ($t:ty) => {
    impl Extend<f64> for $t {
      fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for value in iter {
          Xsum::add(self, value)
        }
      }
    }

    impl<'a> Extend<&'a f64> for $t {
      fn extend<I: IntoIterator<Item = &'a f64>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
      }
    }

    impl FromIterator<f64> for $t {
      fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut acc = Self::default();
        acc.extend(iter);
        acc
      }
    }

    impl<'a> FromIterator<&'a f64> for $t {
      fn from_iter<I: IntoIterator<Item = &'a f64>>(iter: I) -> Self {
        iter.into_iter().copied().collect()
      }
    }

    impl core::ops::AddAssign<f64> for $t {
      fn add_assign(&mut self, rhs: f64) {
        Xsum::add(self, rhs)
      }
    }

    impl core::ops::AddAssign<&f64> for $t {
      fn add_assign(&mut self, rhs: &f64) {
        Xsum::add(self, *rhs)
      }
    }
  };
}

impl_std_traits!{XsumSmall}
impl_std_traits!{XsumLarge}
impl_std_traits!{XsumAuto}
impl_std_traits!{XsumVariant}

#[cfg(test)]
mod tests {
  use super::*;

  fn same(actual: f64, expected: f64) -> bool {
    actual.to_bits() == expected.to_bits() || (actual.is_nan() && expected.is_nan())
  }

  /// Sum `values` with every accumulator, both with `add_list` and with `add` one at a time, and
  /// check that every result is `expected`. Also check that each is back to `-0.0` after a
  /// `clear`.
  fn check_all<const N: usize>(values: [f64; N], expected: f64) {
    fn check<X: Xsum>(mut acc: X, values: &[f64], expected: f64) {
      acc.add_list(values);
      let sum = acc.sum();
      assert!(same(sum, expected), "add_list {values:?}: {sum:?} ≠ {expected:?}");
      assert!(same(acc.sum(), sum), "sum twice {values:?}");
      acc.clear();
      for &value in values {
        acc.add(value)
      }
      let sum = acc.sum();
      assert!(same(sum, expected), "add {values:?}: {sum:?} ≠ {expected:?}");
      acc.clear();
      assert_eq!(acc.sum().to_bits(), (-0.0_f64).to_bits(), "clear {values:?}");
    }

    check(XsumSmall::new(), &values, expected);
    check(XsumLarge::new(), &values, expected);
    check(XsumAuto::new(), &values, expected);
    check(XsumAuto::with_threshold(1), &values, expected);
    check(XsumVariant::Small(XsumSmall::new()), &values, expected);
    check(XsumVariant::Large(Box::default()), &values, expected);
    check(XsumVariant::Auto(XsumAuto::with_threshold(0)), &values, expected);

    assert!(same(xsum(&values), expected), "xsum {values:?}");
    assert!(same(values.xsum(), expected), "XsumExt {values:?}");
    assert!(same(xsum_with_threshold(&values, 0), expected), "xsum_with_threshold {values:?}");
    assert!(same(values.iter().collect::<XsumSmall>().sum(), expected), "collect {values:?}");
    assert!(same(values.into_iter().collect::<XsumLarge>().sum(), expected), "collect {values:?}");
  }

  #[test]
  fn basic() {
    check_all([1.0, 2.0, 3.0], 6.0);
    check_all([1e308], 1e308);
    check_all([1e308, -1e308], 0.0);
    check_all([0.1], 0.1);
    check_all([0.1, 0.1], 0.2);
    check_all([0.1, -0.1], 0.0);
    check_all([1e308, 1e308, 0.1, 0.1, 1e30, 0.1, -1e30, -1e308, -1e308], 0.30000000000000004);
    check_all([1e20, 0.1, -1e20, 1e20, 0.1, -1e20, 1e20, 0.1, -1e20], 0.30000000000000004);
    check_all([1e30, 0.1, -1e30], 0.1);
  }

  /// Sums near the top of the range, with overflow and heavy cancellation.
  #[test]
  fn near_overflow() {
    check_all(
      [8.98846567431158e+307, 8.988_465_674_311_579e307, -1.797_693_134_862_315_7e308],
      9.9792015476736e+291,
    );
    check_all(
      [-5.630_637_621_603_525e255, 9.565_271_205_476_345e307, 2.993_760_464_302_079_7e292],
      9.565_271_205_476_347e307,
    );
    check_all(
      [
        6.739_986_666_787_661e66,
        2.0,
        -1.2689709186578243e-116,
        1.704_601_573_946_735_4e308,
        -9.979_201_547_673_601e291,
        6.160_926_733_208_294e307,
        -3.179_557_053_031_852e234,
        -7.027_282_978_772_846e307,
        -0.7500000000000001,
      ],
      1.61796594939028e+308,
    );
    check_all(
      [
        0.31150493246968836,
        -8.988_465_674_311_582e307,
        1.8315037361673755e-270,
        -15.999999999999996,
        2.9999999999999996,
        7.345_200_721_499_384e164,
        -2.033582473639399,
        -8.98846567431158e+307,
        -3.573_729_515_540_599_3e292,
        4.13894772383715e-124,
        -3.6111186457260667e-35,
        2.387_234_887_098_013e180,
        7.645295562778372e-298,
        3.395189016861822e-103,
        -2.6331611115768973e-149,
      ],
      f64::NEG_INFINITY,
    );
    check_all(
      [
        -1.144_258_913_440_990_2e308,
        9.593_842_098_384_855e138,
        4.494_232_837_155_791e307,
        -1.348_269_851_146_736_7e308,
        4.494_232_837_155_792e307,
      ],
      -1.593_682_197_156_568_5e308,
    );
    check_all(
      [
        -1.144_258_913_440_990_2e308,
        4.494_232_837_155_791e307,
        -1.348_269_851_146_736_7e308,
        4.494_232_837_155_792e307,
      ],
      -1.593_682_197_156_568_7e308,
    );
    check_all(
      [
        9.593_842_098_384_855e138,
        -6.948_356_297_254_111e307,
        -1.348_269_851_146_736_7e308,
        4.494_232_837_155_792e307,
      ],
      -1.593_682_197_156_568_5e308,
    );
    check_all(
      [-2.534_858_246_857_893e115, 8.988_465_674_311_579e307, 8.98846567431158e+307],
      1.797_693_134_862_315_7e308,
    );
    check_all(
      [1.358_812_489_418_619_3e308, 1.480_398_620_115_200_6e223, 6.741_349_255_733_684e307],
      f64::INFINITY,
    );
    check_all(
      [6.741_349_255_733_684e307, 1.797_693_134_862_315_5e308, -7.388_327_292_663_961e41],
      f64::INFINITY,
    );
    check_all(
      [-1.980_704_062_856_609_3e28, 1.797_693_134_862_315_7e308, 9.9792015476736e+291],
      1.797_693_134_862_315_7e308,
    );
    check_all(
      [
        -1.021_455_799_117_396_4e61,
        1.797_693_134_862_315_7e308,
        8.98846567431158e+307,
        -8.988_465_674_311_579e307,
      ],
      1.797_693_134_862_315_7e308,
    );
    check_all(
      [
        1.797_693_134_862_315_7e308,
        7.999999999999999,
        -1.908963895403937e-230,
        1.644_595_008_232_026_4e292,
        2.073_485_670_760_580_6e205,
      ],
      f64::INFINITY,
    );
    check_all(
      [6.197409167220438e-223, -9.979_201_547_673_601e291, -1.797_693_134_862_315_7e308],
      f64::NEG_INFINITY,
    );
    check_all(
      [
        4.49423283715579e+307,
        8.944_251_746_776_101e307,
        -0.0002441406250000001,
        1.175_206_071_004_381_7e308,
        4.940_846_717_201_632e292,
        -1.683_669_940_645_452_8e308,
      ],
      8.353_845_887_521_184e307,
    );
    check_all(
      [
        8.988_465_674_311_579e307,
        7.999999999999998,
        7.029158107234023e-308,
        -2.2303483759420562e-172,
        -1.797_693_134_862_315_7e308,
        -8.98846567431158e+307,
      ],
      -1.797_693_134_862_315_7e308,
    );
    check_all([8.98846567431158e+307, 8.98846567431158e+307], f64::INFINITY);
  }

  #[test]
  fn nan_inf() {
    check_all([f64::NAN], f64::NAN);
    check_all([f64::NAN, 2.4], f64::NAN);
    check_all([f64::INFINITY, f64::NAN], f64::NAN);
    check_all([f64::INFINITY, f64::NAN, 1.5], f64::NAN);
    check_all([f64::INFINITY, f64::NEG_INFINITY], f64::NAN);
    check_all([f64::NEG_INFINITY, f64::INFINITY], f64::NAN);

    check_all([f64::INFINITY], f64::INFINITY);
    check_all([f64::INFINITY, 23.3], f64::INFINITY);
    check_all([f64::INFINITY, f64::INFINITY], f64::INFINITY);
    check_all([f64::NEG_INFINITY], f64::NEG_INFINITY);
    check_all([f64::NEG_INFINITY, f64::NEG_INFINITY], f64::NEG_INFINITY);
  }

  /// Of two NaNs, the one with the larger payload survives, with its sign cleared.
  #[test]
  fn nan_payload() {
    let small = f64::from_bits(0xfff0_0000_0000_0001);
    let large = f64::from_bits(0x7ff0_0000_0000_1000);
    let expected = 0x7ff0_0000_0000_1000;
    for values in [[small, large, 1.0], [large, 1.0, small], [f64::INFINITY, small, large]] {
      assert_eq!(XsumSmall::from_iter(values).sum().to_bits(), expected);
      assert_eq!(XsumLarge::from_iter(values).sum().to_bits(), expected);
    }
    assert_eq!(xsum(&[-f64::from_bits(expected)]).to_bits(), expected);
  }

  #[test]
  fn zeros() {
    check_all([], -0.0);
    check_all([-0.0], -0.0);
    check_all([-0.0, -0.0], -0.0);
    check_all([-0.0, 0.0], 0.0);
    check_all([0.0], 0.0);
  }

  #[test]
  fn std_traits() {
    let mut acc = XsumAuto::new();
    acc += 0.5;
    acc += &0.25;
    acc.extend([1.0, 2.0]);
    acc.extend(&[4.0, 8.0]);
    assert_eq!(acc.sum(), 15.75);
    assert_eq!(acc.len(), 6);

    let mut acc: XsumVariant = [0.1; 10].iter().collect();
    assert_eq!(acc.sum(), 1.0);
  }
}
