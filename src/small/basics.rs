use super::*;
use crate::float::{EXP_BITS, MANTISSA_BITS};

impl SmallAccumulator {
  /// Number of low-order exponent bits that select a bit position *within* a chunk. The
  /// remaining high-order bits of the exponent select the chunk itself.
  pub(crate) const LOW_EXP_BITS: u32 = 5;

  /// Mask for the low-order exponent bits.
  pub(crate) const LOW_EXP_MASK: i64 = (1 << Self::LOW_EXP_BITS) - 1;

  /// Number of high-order exponent bits, i.e. the ones used to index the chunks.
  pub(crate) const HIGH_EXP_BITS: u32 = EXP_BITS - Self::LOW_EXP_BITS;

  /// Number of chunks: one for each value of the high-order exponent bits, plus 3 more on top so
  /// that a mantissa shifted into the highest exponent band still has room above it, and so that
  /// carries out of that band have somewhere to go.
  pub(crate) const CHUNKS: usize = {
    assert!(N_CHUNKS == (1 << Self::HIGH_EXP_BITS) + 3);
    N_CHUNKS
  };

  /// The number of bits in the canonical digit of a chunk (once carries are propagated).
  pub(crate) const LOW_MANTISSA_BITS: u32 = 1 << Self::LOW_EXP_BITS;

  /// Mask for the canonical digit of a chunk.
  pub(crate) const LOW_MANTISSA_MASK: i64 = (1 << Self::LOW_MANTISSA_BITS) - 1;

  /// Bits of a chunk above the sign and the largest possible mantissa. Each one of these bits
  /// doubles the number of terms we can add before needing to propagate carries.
  pub(crate) const CARRY_BITS: u32 = (i64::BITS - 1) - MANTISSA_BITS;

  /// Number of terms that can be added to the chunks before a carry propagation is mandatory.
  ///
  /// ```ignore
  /// assert_eq!(SmallAccumulator::CARRY_TERMS, 2047);
  /// ```
  pub(crate) const CARRY_TERMS: i64 = (1 << Self::CARRY_BITS) - 1;

  /// An empty accumulator, representing the (negative!) zero of an empty sum.
  pub(crate) const ZERO: Self = Self {
    chunk: [0; Self::CHUNKS],
    adds_until_propagate: Self::CARRY_TERMS,
    inf: 0,
    nan: 0,
    size_count: 0,
    has_pos_number: false,
  };

  pub(crate) const fn new() -> Self {
    Self::ZERO
  }

  /// Record that `value` has been added: this is what decides between `+0.0` and `-0.0` if the
  /// sum turns out to be exactly zero, and what the auto accumulator uses to decide when to
  /// switch representation.
  #[inline]
  pub(crate) fn note_value(&mut self, value: f64) {
    self.size_count += 1;
    self.has_pos_number |= value.is_sign_positive();
  }

  /// If no more terms may be added without risking overflow of a chunk, propagate carries.
  #[inline]
  pub(crate) fn ensure_budget(&mut self) {
    if crate::utl::unlikely(self.adds_until_propagate == 0) {
      let _ = self.carry_propagate();
    }
  }
}

impl Default for SmallAccumulator {
  fn default() -> Self {
    Self::new()
  }
}
