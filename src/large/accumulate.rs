use super::*;
use crate::float::{EXP_BITS, EXP_MASK, MANTISSA_BITS};

impl LargeAccumulator {
  /// Add a single value.
  #[inline]
  pub(crate) fn add(&mut self, value: f64) {
    self.sacc.note_value(value);

    // The upper 12 bits, sign and exponent, are the slot index.
    let bits = value.to_bits();
    let ix = (bits >> MANTISSA_BITS) as usize;

    let count = self.count[ix] - 1;
    if crate::utl::likely(count >= 0) {
      self.count[ix] = count;
      self.chunk[ix] = self.chunk[ix].wrapping_add(bits);
    } else {
      // The slot is full, has never been used, or is the slot for Inf/NaN.
      self.add_slow(ix, bits)
    }
  }

  /// Add a slice of values.
  pub(crate) fn add_list(&mut self, values: &[f64]) {
    for &value in values {
      self.add(value)
    }
  }

  #[cold]
  fn add_slow(&mut self, ix: usize, bits: u64) {
    if ix as i64 & EXP_MASK == EXP_MASK {
      self.sacc.add_inf_nan(bits as i64)
    } else {
      self.flush_slot(ix);
      self.count[ix] -= 1;
      self.chunk[ix] = self.chunk[ix].wrapping_add(bits);
    }
  }

  /// Add whatever slot `ix` holds to the small accumulator (if anything), and then reset it to
  /// empty, with a full [`SLOT_CAPACITY`](Self::SLOT_CAPACITY), marked as used.
  pub(crate) fn flush_slot(&mut self, ix: usize) {
    let count = self.count[ix];
    debug_assert!((Self::UNUSED ..= Self::SLOT_CAPACITY).contains(&count));

    if count >= 0 {
      self.sacc.ensure_budget();

      // The slot holds the wrapping sum of `SLOT_CAPACITY - count` whole bit patterns, sign and
      // exponent included, and we want just the sum of the mantissas. All those sign+exponent
      // parts are the same, equal to `ix`: had we added `SLOT_CAPACITY` of them, they would have
      // overflowed out the top and left just the mantissas. So we add the `count` missing ones to
      // get the same effect.
      let mut chunk = self.chunk[ix];
      if count > 0 {
        chunk = chunk.wrapping_add((count as u64).wrapping_mul(ix as u64) << MANTISSA_BITS);
      }

      // Find where the mantissas go in the small accumulator, same as in
      // `SmallAccumulator::add_no_carry`. Note subnormals have exponent 1, not 0.
      let exp = ix & EXP_MASK as usize;
      let (low_exp, high_exp) = match exp {
        0 => (1, 0),
        _ => (exp as u32 & SmallAccumulator::LOW_EXP_MASK as u32, exp >> SmallAccumulator::LOW_EXP_BITS),
      };

      // Split the sum of mantissas in three parts, for three consecutive chunks: the sum of up to
      // `SLOT_CAPACITY` mantissas is up to 64 bits wide, so it spans three 32-bit digits once
      // shifted. Except for subnormals, we also need to add in the implicit 1s, one per term,
      // just above the mantissas.
      const LOW_MASK: u64 = SmallAccumulator::LOW_MANTISSA_MASK as u64;
      const LOW_BITS: u32 = SmallAccumulator::LOW_MANTISSA_BITS;
      let low = (chunk << low_exp) & LOW_MASK;
      let mut mid = chunk >> (LOW_BITS - low_exp);
      if exp != 0 {
        let terms = (Self::SLOT_CAPACITY - count) as u64;
        mid += terms << (MANTISSA_BITS - LOW_BITS + low_exp);
      }
      let high = mid >> LOW_BITS;
      let mid = mid & LOW_MASK;
      let (low, mid, high) = (low as i64, mid as i64, high as i64);

      debug_assert!(high_exp + 2 < SmallAccumulator::CHUNKS);
      let sacc = &mut self.sacc.chunk[high_exp ..= high_exp + 2];
      if ix & (1 << EXP_BITS) != 0 {
        sacc[0] -= low;
        sacc[1] -= mid;
        sacc[2] -= high;
      } else {
        sacc[0] += low;
        sacc[1] += mid;
        sacc[2] += high;
      }
      self.sacc.adds_until_propagate -= 1;
    }

    self.chunk[ix] = 0;
    self.count[ix] = Self::SLOT_CAPACITY;
    self.mark_used(ix);
  }
}
