use super::*;

/// An exact accumulator backed by the small superaccumulator alone.
///
/// This is the better choice for sums of up to about a thousand values (see [`XSUM_THRESHOLD`]),
/// or when many accumulators are alive at once: it is a few hundred bytes, and [`Xsum::sum`] is
/// cheap. For longer sums, [`XsumLarge`] adds faster.
///
/// ```
/// use xsum::{Xsum, XsumSmall};
///
/// let mut acc = XsumSmall::new();
/// acc.add_list(&[1e20, 0.1, -1e20]);
/// assert_eq!(acc.sum(), 0.1);
/// assert_eq!(acc.len(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct XsumSmall(pub(crate) SmallAccumulator);

impl XsumSmall {
  /// An empty accumulator; its sum is `-0.0`.
  pub const fn new() -> Self {
    Self(SmallAccumulator::new())
  }

  /// Number of values added so far (including zeros, infinities, and NaNs).
  pub fn len(&self) -> usize {
    self.0.size_count
  }

  /// Whether no values have been added.
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl Xsum for XsumSmall {
  #[inline]
  fn add(&mut self, value: f64) {
    self.0.add(value)
  }

  fn add_list(&mut self, values: &[f64]) {
    self.0.add_list(values)
  }

  fn sum(&mut self) -> f64 {
    self.0.round()
  }
}
