use super::*;
use alloc::boxed::Box;

/// An exact accumulator that starts out as an [`XsumSmall`], and turns into an [`XsumLarge`]
/// once it has been given more than [`threshold`](Self::threshold) values.
///
/// Use this when the number of values is not known beforehand. If it is, an [`XsumVariant`] of
/// the right kind saves the check after each add.
///
/// ```
/// use xsum::{Xsum, XsumAuto};
///
/// let mut acc = XsumAuto::with_threshold(100);
/// acc.add_list(&[0.5; 100]);
/// assert!(!acc.is_large());
/// acc.add(0.5);
/// assert!(acc.is_large());
/// assert_eq!(acc.sum(), 50.5);
/// ```
#[derive(Clone, Debug)]
pub struct XsumAuto {
  kind: Kind,
  threshold: usize,
}

#[derive(Clone, Debug)]
enum Kind {
  Small(XsumSmall),
  Large(Box<XsumLarge>),
}

impl XsumAuto {
  /// An empty accumulator, switching to large past [`XSUM_THRESHOLD`] values.
  pub const fn new() -> Self {
    Self::with_threshold(XSUM_THRESHOLD)
  }

  /// An empty accumulator, switching to large past `threshold` values.
  pub const fn with_threshold(threshold: usize) -> Self {
    Self { kind: Kind::Small(XsumSmall::new()), threshold }
  }

  /// The number of values past which this accumulator switches to large.
  pub const fn threshold(&self) -> usize {
    self.threshold
  }

  /// Whether this accumulator has switched to large.
  pub const fn is_large(&self) -> bool {
    matches!(self.kind, Kind::Large(_))
  }

  /// Number of values added so far (including zeros, infinities, and NaNs).
  pub fn len(&self) -> usize {
    match &self.kind {
      Kind::Small(small) => small.len(),
      Kind::Large(large) => large.len(),
    }
  }

  /// Whether no values have been added.
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Switch to large if we have gone past the threshold. The small accumulator moves into the
  /// large one as is, so this costs the same regardless of what it holds.
  fn grow_if_needed(&mut self) {
    if let Kind::Small(small) = &mut self.kind {
      if small.len() > self.threshold {
        let small = core::mem::take(small);
        tracing::debug!(count = small.len(), threshold = self.threshold, "switching to large accumulator");
        self.kind = Kind::Large(Box::new(XsumLarge::from(small)))
      }
    }
  }
}

impl Default for XsumAuto {
  fn default() -> Self {
    Self::new()
  }
}

impl Xsum for XsumAuto {
  fn add(&mut self, value: f64) {
    match &mut self.kind {
      Kind::Small(small) => {
        small.add(value);
        self.grow_if_needed()
      },
      Kind::Large(large) => large.add(value),
    }
  }

  fn add_list(&mut self, values: &[f64]) {
    match &mut self.kind {
      Kind::Small(small) => {
        small.add_list(values);
        self.grow_if_needed()
      },
      Kind::Large(large) => large.add_list(values),
    }
  }

  fn sum(&mut self) -> f64 {
    match &mut self.kind {
      Kind::Small(small) => small.sum(),
      Kind::Large(large) => large.sum(),
    }
  }

  /// Back to an empty small accumulator, with the same threshold.
  fn clear(&mut self) {
    *self = Self::with_threshold(self.threshold)
  }
}
