use super::*;
use alloc::boxed::Box;

/// The exact, correctly rounded sum of `values`.
///
/// Uses an [`XsumSmall`] for fewer than [`XSUM_THRESHOLD`] values, and an [`XsumLarge`] (on the
/// heap) otherwise.
///
/// ```
/// assert_eq!(xsum::xsum(&[1e308, 1e308, 0.1, 0.1, 1e30, 0.1, -1e30, -1e308, -1e308]), 0.30000000000000004);
/// assert_eq!(xsum::xsum(&[]).to_bits(), (-0.0_f64).to_bits());
/// ```
pub fn xsum(values: &[f64]) -> f64 {
  xsum_with_threshold(values, XSUM_THRESHOLD)
}

/// Like [`xsum`], but using an [`XsumLarge`] from `threshold` values on.
pub fn xsum_with_threshold(values: &[f64], threshold: usize) -> f64 {
  if values.len() < threshold {
    let mut acc = XsumSmall::new();
    acc.add_list(values);
    acc.sum()
  } else {
    let mut acc = Box::new(XsumLarge::new());
    acc.add_list(values);
    acc.sum()
  }
}

/// Method syntax for [`xsum`].
///
/// ```
/// use xsum::XsumExt;
///
/// let values = vec![1e20, 0.1, -1e20, 1e20, 0.1, -1e20, 1e20, 0.1, -1e20];
/// assert_eq!(values.xsum(), 0.30000000000000004);
/// ```
pub trait XsumExt {
  /// The exact, correctly rounded sum; see [`xsum`].
  fn xsum(&self) -> f64;
}

impl XsumExt for [f64] {
  fn xsum(&self) -> f64 {
    xsum(self)
  }
}
