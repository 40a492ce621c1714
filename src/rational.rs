//! An exact oracle for the tests: sums of doubles as arbitrary precision [`Rational`]s, and a
//! check that a double is the correctly rounded value of a rational.

use malachite::rational::Rational;
use malachite::base::num::arithmetic::traits::PowerOf2;

/// The exact sum of `values`, which must all be finite.
pub(crate) fn exact_sum(values: &[f64]) -> Rational {
  values.iter()
    .map(|&x| Rational::try_from(x).expect("Only finite values have a rational value"))
    .fold(Rational::from(0), |acc, x| acc + x)
}

/// The value of `x` as a rational, except that infinities stand for ±2^1024: the next power of 2
/// past the largest finite double, which is where rounding to nearest would put them.
fn to_rational(x: f64) -> Rational {
  match Rational::try_from(x) {
    Ok(q) => q,
    Err(_) if x > 0.0 => Rational::power_of_2(1024_i64),
    Err(_) => -Rational::power_of_2(1024_i64),
  }
}

/// Whether `result` is `exact` rounded to the nearest double, ties to even, where overflowing the
/// largest finite double rounds to infinity. The sign of a zero `result` is not checked.
///
/// This is checked the obvious way: `result` must be no further from `exact` than the midpoints to
/// its two neighbours, and may only be exactly at a midpoint if its mantissa is even.
pub(crate) fn is_correct_rounded(exact: &Rational, result: f64) -> bool {
  if result.is_nan() {
    return false
  }
  if result.is_infinite() {
    // Past the midpoint between MAX (which is odd) and 2^1024, or exactly on it.
    let midpoint = (to_rational(f64::MAX) + to_rational(f64::INFINITY)) / Rational::from(2);
    return if result > 0.0 { *exact >= midpoint } else { *exact <= -midpoint }
  }

  let here = to_rational(result);
  let below = (to_rational(result.next_down()) + &here) / Rational::from(2);
  let above = (to_rational(result.next_up()) + &here) / Rational::from(2);
  let is_even = result.to_bits() & 1 == 0;
  if is_even {
    below <= *exact && *exact <= above
  } else {
    below < *exact && *exact < above
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn exact_sum() {
    assert_eq!(super::exact_sum(&[]), Rational::from(0));
    assert_eq!(super::exact_sum(&[0.5, 0.25, -1.0]), Rational::from(-1) / Rational::from(4));
    assert_eq!(super::exact_sum(&[1e308, 1e308]), Rational::try_from(1e308).unwrap() * Rational::from(2));
  }

  #[test]
  fn correct_rounded() {
    let q = |x: f64| Rational::try_from(x).unwrap();
    let ulp = f64::EPSILON;
    assert!(is_correct_rounded(&q(1.0), 1.0));
    assert!(!is_correct_rounded(&q(1.0), 1.0 + ulp));
    // Ties.
    let tie = q(1.0) + q(ulp / 2.0);
    assert!(is_correct_rounded(&tie, 1.0));
    assert!(!is_correct_rounded(&tie, 1.0 + ulp));
    let tie = q(1.0 + ulp) + q(ulp / 2.0);
    assert!(is_correct_rounded(&tie, 1.0 + 2.0 * ulp));
    assert!(!is_correct_rounded(&tie, 1.0 + ulp));
    // Zero.
    assert!(is_correct_rounded(&Rational::from(0), 0.0));
    assert!(is_correct_rounded(&Rational::from(0), -0.0));
    assert!(!is_correct_rounded(&Rational::from(0), f64::from_bits(1)));
    // Overflow.
    let max = q(f64::MAX);
    assert!(is_correct_rounded(&(&max + &max), f64::INFINITY));
    assert!(is_correct_rounded(&-(&max + &max), f64::NEG_INFINITY));
    assert!(!is_correct_rounded(&(&max + &max), f64::MAX));
    assert!(is_correct_rounded(&max, f64::MAX));
    assert!(!is_correct_rounded(&max, f64::INFINITY));
    assert!(is_correct_rounded(&(&max + q(2.0_f64.powi(970))), f64::INFINITY));
    assert!(!is_correct_rounded(&q(1.0), f64::NAN));
  }
}
