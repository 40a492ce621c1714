use super::*;

impl SmallAccumulator {
  /// Propagate carries, so that every chunk except the uppermost non-zero one holds a canonical
  /// digit in `0 .. 2^LOW_MANTISSA_BITS`, and the uppermost non-zero one carries the sign.
  ///
  /// Returns the index of the uppermost non-zero chunk (or `0` if the whole accumulator is `0`),
  /// and resets the budget of additions until the next propagation is due.
  ///
  /// Carries never need to go past the top chunk when summing actual doubles, since there are
  /// enough chunks to hold any such sum. If they would (which only manual fiddling with the
  /// chunks can cause), the accumulator is poisoned with a NaN whose payload is all 1s: at that
  /// point we cannot reliably tell which sign an infinity should have.
  pub(crate) fn carry_propagate(&mut self) -> usize {
    self.adds_until_propagate = Self::CARRY_TERMS - 1;

    // Find the uppermost non-zero chunk, if any. Note this may move up or down as we propagate.
    let Some(mut u) = self.chunk.iter().rposition(|&c| c != 0) else { return 0 };

    // `uix` is the index of the uppermost chunk that is (still) non-zero after propagating.
    let mut uix = None;
    let mut i = 0;
    loop {
      // Skip to the next non-zero chunk, at or below `u`.
      while i <= u && self.chunk[i] == 0 { i += 1 }
      if i > u { break }
      let c = self.chunk[i];

      let chigh = c >> Self::LOW_MANTISSA_BITS;
      if chigh == 0 {
        // Already canonical, nothing to carry.
        uix = Some(i);
        i += 1;
        continue
      }

      if u == i {
        // Don't propagate a -1 into the region of 0s above: this chunk is the top one, and it is
        // allowed to be negative.
        if chigh == -1 {
          uix = Some(i);
          break
        }
        // We are about to change `chunk[u + 1]`, so that becomes the new top to look at.
        u = i + 1;
      }

      let clow = c & Self::LOW_MANTISSA_MASK;
      if clow != 0 { uix = Some(i) }

      // Keep the low bits here, carry the high bits (which may be negative) one chunk up. Note
      // this may well make `chunk[i + 1]` zero.
      self.chunk[i] = clow;
      if crate::utl::likely(i + 1 < Self::CHUNKS) {
        self.chunk[i + 1] += chigh
      } else {
        tracing::warn!(chunk = i, carry = chigh, "carry out of the top of the accumulator, sum is NaN");
        self.add_inf_nan(float::OVERFLOW_NAN);
        u = i
      }

      i += 1;
      if i > u { break }
    }

    // Carry propagation may have made 0 out of something that looked non-zero.
    let Some(mut uix) = uix else { return 0 };

    // While the uppermost chunk is -1, fold it into the chunk below: the same number, with one
    // non-zero chunk fewer.
    while uix > 0 && self.chunk[uix] == -1 {
      self.chunk[uix - 1] -= 1 << Self::LOW_MANTISSA_BITS;
      self.chunk[uix] = 0;
      uix -= 1;
    }

    uix
  }
}
