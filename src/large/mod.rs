use crate::small::SmallAccumulator;

/// The *large superaccumulator*: one slot for every possible combination of sign and exponent
/// of a double, in front of a [`SmallAccumulator`].
///
/// The trick is that doubles with the same sign and exponent also have identical upper 12 bits.
/// So we can add their whole bit patterns as plain 64-bit integers: the mantissas sum correctly
/// in the low bits, and the upper bits just accumulate a multiple of the sign+exponent, which is
/// known (it's the slot index times the number of terms) and can be cancelled out later.
///
/// A slot can take [`SLOT_CAPACITY`](Self::SLOT_CAPACITY) terms before its mantissa sum risks
/// overflowing 64 bits; at that point (or when the sum is requested) it is *flushed*: its
/// mantissa sum is added, in three pieces, to the small accumulator, and the slot starts over.
///
/// This makes adding a single double a lot cheaper than with the small accumulator alone (one
/// integer add and one decrement, with no shifting or splitting), at the price of a much larger
/// state and a slower [`round`](SmallAccumulator::round). Hence it pays off for long sums only.
#[derive(Clone)]
pub(crate) struct LargeAccumulator {
  /// The slots, indexed by the upper 12 bits (sign and exponent) of a double.
  pub(crate) chunk: [u64; N_SLOTS],
  /// Number of terms each slot can still take before it must be flushed, or -1 if the slot has
  /// never been used (or is the slot of infinities/NaNs, which are never stored in slots).
  pub(crate) count: [i32; N_SLOTS],
  /// Bit `k` of word `w` is set iff slot `64 w + k` has been used.
  pub(crate) chunks_used: [u64; N_SLOTS / 64],
  /// Bit `w` is set iff word `w` of `chunks_used` is non-zero.
  pub(crate) used_used: u64,
  /// The small accumulator the slots are flushed into.
  pub(crate) sacc: SmallAccumulator,
}

/// Number of slots, see [`LargeAccumulator::SLOTS`].
const N_SLOTS: usize = 1 << (crate::float::EXP_BITS + 1);

/// Constants and constructors.
mod basics;

/// Adding doubles to the slots, and flushing a slot to the small accumulator.
mod accumulate;

/// Flushing all the used slots to the small accumulator.
mod transfer;

impl core::fmt::Debug for LargeAccumulator {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    let used = self.count.iter().filter(|&&c| c >= 0).count();
    f.debug_struct("LargeAccumulator")
      .field("slots_used", &used)
      .field("sacc", &self.sacc)
      .finish_non_exhaustive()
  }
}
