use super::*;
use alloc::boxed::Box;

/// One of the exact accumulators, picked by the caller. Unlike [`XsumAuto`], the `Small` and
/// `Large` cases never change into one another, so there is no threshold check on each add.
///
/// ```
/// use xsum::{Xsum, XsumLarge, XsumSmall, XsumVariant};
///
/// fn accumulator_for(len: usize) -> XsumVariant {
///   if len < xsum::XSUM_THRESHOLD {
///     XsumVariant::Small(XsumSmall::new())
///   } else {
///     XsumVariant::Large(Box::new(XsumLarge::new()))
///   }
/// }
///
/// let values = vec![0.1; 5000];
/// let mut acc = accumulator_for(values.len());
/// acc.add_list(&values);
/// assert_eq!(acc.sum(), 500.0);
/// ```
#[derive(Clone, Debug)]
pub enum XsumVariant {
  Small(XsumSmall),
  Large(Box<XsumLarge>),
  Auto(XsumAuto),
}

/// An empty [`XsumVariant::Small`].
impl Default for XsumVariant {
  fn default() -> Self {
    Self::Small(XsumSmall::new())
  }
}

impl XsumVariant {
  /// Number of values added so far (including zeros, infinities, and NaNs).
  pub fn len(&self) -> usize {
    match self {
      Self::Small(x) => x.len(),
      Self::Large(x) => x.len(),
      Self::Auto(x) => x.len(),
    }
  }

  /// Whether no values have been added.
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl Xsum for XsumVariant {
  fn add(&mut self, value: f64) {
    match self {
      Self::Small(x) => x.add(value),
      Self::Large(x) => x.add(value),
      Self::Auto(x) => x.add(value),
    }
  }

  fn add_list(&mut self, values: &[f64]) {
    match self {
      Self::Small(x) => x.add_list(values),
      Self::Large(x) => x.add_list(values),
      Self::Auto(x) => x.add_list(values),
    }
  }

  fn sum(&mut self) -> f64 {
    match self {
      Self::Small(x) => x.sum(),
      Self::Large(x) => x.sum(),
      Self::Auto(x) => x.sum(),
    }
  }

  /// Empty the accumulator, keeping its case (and threshold, for `Auto`).
  fn clear(&mut self) {
    match self {
      Self::Small(x) => x.clear(),
      Self::Large(x) => x.clear(),
      Self::Auto(x) => x.clear(),
    }
  }
}
