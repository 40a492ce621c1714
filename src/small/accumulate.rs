use super::*;
use crate::float::{Fields, MANTISSA_BITS, MANTISSA_MASK, SIGN_MASK};

impl SmallAccumulator {
  /// Update the sticky infinity/NaN state with `bits`, the bit pattern of an infinity or a NaN.
  ///
  ///   - Infinities: the first one is recorded as-is. A later one of opposite sign turns the
  ///     record into a NaN (computed as `inf - inf`, so that it is whatever NaN the FPU makes).
  ///   - NaNs: we keep the one with the largest payload (mantissa), with its sign cleared. On
  ///     ties the newer one wins, which in particular means the first NaN always replaces the
  ///     initial "no NaN" state of 0.
  pub(crate) fn add_inf_nan(&mut self, bits: i64) {
    let mantissa = bits & MANTISSA_MASK;
    if mantissa == 0 {
      if self.inf == 0 {
        self.inf = bits
      } else if self.inf != bits {
        let inf = float::from_bits(bits);
        self.inf = (inf - inf).to_bits() as i64
      }
    } else if self.nan & MANTISSA_MASK <= mantissa {
      self.nan = bits & !SIGN_MASK
    }
  }

  /// The core algorithm of the small accumulator: add a double to the chunks, **without**
  /// checking whether a carry propagation is due. This does not do the bookkeeping of
  /// [`Self::note_value`] either.
  ///
  /// The caller has to make sure that `adds_until_propagate > 0` before, and decrement it after.
  #[inline]
  pub(crate) fn add_no_carry(&mut self, value: f64) {
    let fields = Fields::of(value);
    let Fields { bits, exp, mut mantissa } = fields;

    // The exponent field decides where the mantissa goes: the high bits of it select a chunk,
    // the low bits how far to shift the mantissa into it.
    let low_exp;
    if exp == 0 {
      // Zero (of either sign) contributes nothing.
      if mantissa == 0 { return }
      // Subnormals have no implicit 1, but their exponent is 1, not 0.
      low_exp = 1;
    } else if crate::utl::unlikely(fields.is_special()) {
      self.add_inf_nan(bits);
      return
    } else {
      // Normals: put in the implicit 1.
      mantissa |= 1 << MANTISSA_BITS;
      low_exp = exp & Self::LOW_EXP_MASK;
    }
    let high_exp = (exp >> Self::LOW_EXP_BITS) as usize;

    // Split the mantissa in two: the bits that fall in `chunk[high_exp]` and the ones that spill
    // into `chunk[high_exp + 1]` (which always exists, since there are extra chunks on top).
    //
    //   chunk[high_exp + 1]            chunk[high_exp]
    //   |                    |11010110|00100111...01101|0000000|
    //                        [      mantissa << low_exp        ]
    //
    // The low part has at most `LOW_MANTISSA_BITS` bits. The high part has at most
    // `MANTISSA_BITS` bits: the mantissa has one bit more than that (the implicit 1), but is
    // always shifted right by at least 1.
    let low = (mantissa << low_exp) & Self::LOW_MANTISSA_MASK;
    let high = mantissa >> (Self::LOW_MANTISSA_BITS as i64 - low_exp);

    debug_assert!(high_exp + 1 < Self::CHUNKS);
    if fields.is_negative() {
      self.chunk[high_exp] -= low;
      self.chunk[high_exp + 1] -= high;
    } else {
      self.chunk[high_exp] += low;
      self.chunk[high_exp + 1] += high;
    }
  }

  /// Add a single value, with bookkeeping and carry propagation if due.
  pub(crate) fn add(&mut self, value: f64) {
    self.note_value(value);
    self.ensure_budget();
    self.add_no_carry(value);
    self.adds_until_propagate -= 1;
  }

  /// Add a slice of values. Equivalent to calling [`Self::add`] on each, but checks whether a
  /// carry propagation is due only once per batch of [`Self::CARRY_TERMS`] values.
  pub(crate) fn add_list(&mut self, values: &[f64]) {
    let mut rest = values;
    while !rest.is_empty() {
      self.ensure_budget();
      let (batch, tail) = rest.split_at(rest.len().min(self.adds_until_propagate as usize));
      for &value in batch {
        self.note_value(value);
        self.add_no_carry(value);
      }
      self.adds_until_propagate -= batch.len() as i64;
      rest = tail;
    }
  }
}
