use super::*;

impl LargeAccumulator {
  /// Flush every slot that holds something into the small accumulator.
  ///
  /// Rather than look at all [`SLOTS`](Self::SLOTS) slots, we only visit those marked in the
  /// two-level used bitmap: `used_used` tells us which words of `chunks_used` are non-zero, and
  /// each of those tells us which slots in its block of 64 have been used. Set bits are taken one
  /// at a time with `trailing_zeros`, so there is no scan over empty 32, 16, or 8-bit sub-blocks
  /// of a word. Slots that were used but are already empty (a full `count`) are skipped too, so
  /// calling this repeatedly is cheap and adds nothing twice.
  pub(crate) fn transfer_to_small(&mut self) {
    let mut used_used = self.used_used;
    while used_used != 0 {
      let p = used_used.trailing_zeros() as usize;
      used_used &= used_used - 1;

      let mut used = self.chunks_used[p];
      while used != 0 {
        let ix = (p << 6) | used.trailing_zeros() as usize;
        used &= used - 1;
        if self.count[ix] >= 0 && self.count[ix] < Self::SLOT_CAPACITY {
          self.flush_slot(ix)
        }
      }
    }
  }

  /// Round to the nearest double; see [`SmallAccumulator::round`].
  pub(crate) fn round(&mut self) -> f64 {
    self.transfer_to_small();
    self.sacc.round()
  }
}
