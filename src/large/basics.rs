use super::*;
use crate::float::{EXP_BITS, MANTISSA_BITS};

impl LargeAccumulator {
  /// Number of slots: one per value of the sign and exponent fields together.
  pub(crate) const SLOTS: usize = {
    assert!(N_SLOTS == 1 << (EXP_BITS + 1));
    assert!(N_SLOTS % 64 == 0, "The used-slot bitmap must fill whole words");
    N_SLOTS
  };

  /// Number of bits above the mantissa field of a double: the headroom available for the sum of
  /// mantissas in a slot.
  pub(crate) const COUNT_BITS: u32 = u64::BITS - MANTISSA_BITS;

  /// Number of terms a slot can take before it must be flushed.
  pub(crate) const SLOT_CAPACITY: i32 = 1 << Self::COUNT_BITS;

  /// The `count` of a slot that has never been used.
  pub(crate) const UNUSED: i32 = -1;

  pub(crate) const fn new() -> Self {
    Self::from_small(SmallAccumulator::new())
  }

  /// A large accumulator whose slots are all empty, and whose small accumulator is `sacc`. This
  /// is a lossless conversion, and its cost does not depend on what `sacc` holds.
  pub(crate) const fn from_small(sacc: SmallAccumulator) -> Self {
    Self {
      chunk: [0; Self::SLOTS],
      count: [Self::UNUSED; Self::SLOTS],
      chunks_used: [0; Self::SLOTS / 64],
      used_used: 0,
      sacc,
    }
  }

  /// Mark slot `ix` as used, in both levels of the bitmap.
  #[inline]
  pub(crate) fn mark_used(&mut self, ix: usize) {
    self.chunks_used[ix >> 6] |= 1 << (ix & 0x3f);
    self.used_used |= 1 << (ix >> 6);
  }
}

impl Default for LargeAccumulator {
  fn default() -> Self {
    Self::new()
  }
}
