use super::*;

/// An exact accumulator backed by the large superaccumulator.
///
/// Each [`Xsum::add`] is cheaper than with [`XsumSmall`], but the state is much bigger (tens of
/// kilobytes, so consider boxing it) and [`Xsum::sum`] has more work to do. This pays off for
/// sums of more than about a thousand values (see [`XSUM_THRESHOLD`]).
///
/// ```
/// use xsum::{Xsum, XsumLarge};
///
/// let mut acc = Box::new(XsumLarge::new());
/// for i in 0 .. 10_000 {
///   acc.add(if i % 2 == 0 { 1e100 } else { -1e100 });
///   acc.add(0.25);
/// }
/// assert_eq!(acc.sum(), 2500.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct XsumLarge(pub(crate) LargeAccumulator);

impl XsumLarge {
  /// An empty accumulator; its sum is `-0.0`.
  pub const fn new() -> Self {
    Self(LargeAccumulator::new())
  }

  /// Number of values added so far (including zeros, infinities, and NaNs).
  pub fn len(&self) -> usize {
    self.0.sacc.size_count
  }

  /// Whether no values have been added.
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

/// Carry on an exact sum started with a small accumulator. This costs the same no matter how many
/// values the small accumulator has seen.
impl From<XsumSmall> for XsumLarge {
  fn from(small: XsumSmall) -> Self {
    Self(LargeAccumulator::from_small(small.0))
  }
}

impl Xsum for XsumLarge {
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
