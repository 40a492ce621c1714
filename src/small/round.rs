use super::*;
use crate::float::{EXP_BIAS, EXP_MASK, MANTISSA_BITS, MANTISSA_MASK, SIGN_MASK};

impl SmallAccumulator {
  /// Round the accumulator to the nearest double (ties to even). This is the final step after a
  /// series of additions, and the *only* step that actually rounds.
  ///
  /// As a side effect, carries are propagated; the accumulator remains valid for further
  /// additions, and calling this again without adding anything gives the same result.
  ///
  /// Special values take priority, in this order:
  ///
  ///   1. Any NaN added: the NaN with the largest payload (sign cleared).
  ///   2. Any infinity added: that infinity, or a NaN if both signs of infinity were added. Note
  ///      that a finite sum overflowing the other way does *not* make this a NaN: there is no
  ///      real ambiguity about the sign then.
  ///   3. Nothing added: `-0.0`.
  ///   4. A sum that is exactly zero: `+0.0` if any addend had a positive sign, `-0.0` otherwise.
  pub(crate) fn round(&mut self) -> f64 {
    if self.nan != 0 { return float::from_bits(self.nan) }
    if self.inf != 0 { return float::from_bits(self.inf) }
    if self.size_count == 0 { return -0.0 }

    // Propagate carries. Now the sign of the sum is the sign of the uppermost non-zero chunk,
    // `chunk[i]`, and all the chunks below it are canonical digits. In theory this might also
    // have overflowed the accumulator, so check the NaN again.
    let i = self.carry_propagate();
    if crate::utl::unlikely(self.nan != 0) { return float::from_bits(self.nan) }
    let top = self.chunk[i];

    // Subnormals (and zero) live in the lowest two chunks, and don't need a floating exponent, so
    // we can write them out directly. Note `top` is never 0 or -1 unless `i` is 0.
    if i <= 1 {
      if let Some(result) = self.round_subnormal(i, top) {
        return result
      }
    }

    self.round_normal(i, top)
  }

  /// Fast path of [`Self::round`] when the uppermost non-zero chunk `i` is `≤ 1`. Returns `None`
  /// if the sum turns out to not be subnormal after all.
  fn round_subnormal(&self, i: usize, top: i64) -> Option<f64> {
    debug_assert!(i <= 1);
    if top == 0 {
      return Some(if self.has_pos_number {0.0} else {-0.0})
    }

    // The exponent of a subnormal is 1, not 0, hence the `>> 1` everywhere (the lowest bit of
    // chunk 0 is never set anyway).
    if i == 0 {
      let magnitude = top.abs() >> 1;
      let sign = if top < 0 {SIGN_MASK} else {0};
      return Some(float::from_bits(magnitude | sign))
    }

    let value = (top << (Self::LOW_MANTISSA_BITS - 1)) + (self.chunk[0] >> 1);
    if value < 0 {
      if value > -(1 << MANTISSA_BITS) {
        return Some(float::from_bits(-value | SIGN_MASK))
      }
    } else if value < 1 << MANTISSA_BITS {
      return Some(float::from_bits(value))
    }
    None
  }

  /// The general path of [`Self::round`]: `chunk[i]`, with `i ≥ 1`, is the uppermost non-zero
  /// chunk, with value `top`.
  fn round_normal(&self, i: usize, top: i64) -> f64 {
    debug_assert!(i >= 1 && top != 0 && top != -1);
    const LOW_BITS: i64 = SmallAccumulator::LOW_MANTISSA_BITS as i64;

    // Find the position of the uppermost 1 bit of `|top|` by converting it to a double (which is
    // exact, since it fits in 33 bits) and reading off its exponent: `e - EXP_BIAS` is in
    // `0 ..= 32`.
    let mut e = ((top as f64).to_bits() as i64 >> MANTISSA_BITS) & EXP_MASK;

    // We want to fill in a full mantissa, including the implicit 1, plus two extra bits to decide
    // on rounding; `more` is how many bits we need to bring in from the chunks below.
    //
    // For negative numbers, we may later find we need one bit more still: negating the upper
    // part can carry out of the top, and then stop doing so once more bits are brought in.
    let mut more = 2 + MANTISSA_BITS as i64 + EXP_BIAS - e;

    // Bring `more` bits in from below, setting `j` to the lowest chunk they come from and `lower`
    // to the bits of that chunk not yet brought in. Note `lower` has at least one bit in it, so it
    // can give that extra bit for negative numbers. `chunk[i - 1]` always exists, since `i ≥ 1`.
    let mut mantissa = top << more;
    let mut j = i as isize - 1;
    let mut lower = self.chunk[j as usize];
    if more >= LOW_BITS {
      more -= LOW_BITS;
      mantissa += lower << more;
      j -= 1;
      lower = if j < 0 {0} else {self.chunk[j as usize]};
    }
    mantissa += lower >> (LOW_BITS - more);
    lower &= (1 << (LOW_BITS - more)) - 1;

    // Decide on rounding. `mantissa` now has the signed mantissa bits plus two extra bits at the
    // bottom, and `e` the exponent of its uppermost bit within chunk `i`. For a positive sum, the
    // bits in `lower` and in the chunks below `j` *add* to the magnitude; for a negative sum, they
    // *subtract* from it.
    //
    // Sticky bits (is anything non-zero below the extra bits?) are only needed in case of a tie,
    // so we only scan the lower chunks for them if needed.
    let sticky = |lower: i64, j: isize| -> bool {
      lower != 0 || self.chunk[.. j.max(0) as usize].iter().any(|&c| c != 0)
    };
    let sign;
    let round_away_from_zero;
    if mantissa >= 0 {
      sign = 0;
      round_away_from_zero = match mantissa & 0b11 {
        0b00 | 0b01 => false,
        0b11 => true,
        // Exactly `10` plus maybe something below: round to even if a tie.
        _ => mantissa & 0b100 != 0 || sticky(lower, j),
      };
    } else {
      // If negating `mantissa` does not give us a full mantissa plus extra bits (i.e. `-mantissa`
      // came out as `10000…` in the upper part only because of the bits not brought in yet), we
      // need to bring in one more bit from `lower`.
      if (-mantissa) & (1 << (MANTISSA_BITS + 2)) == 0 {
        let pos = 1 << (LOW_BITS - 1 - more);
        mantissa <<= 1;
        if lower & pos != 0 {
          mantissa += 1;
          lower &= !pos;
        }
        e -= 1;
      }
      sign = SIGN_MASK;
      mantissa = -mantissa;
      round_away_from_zero = match mantissa & 0b11 {
        0b11 => true,
        0b00 | 0b01 => false,
        // Exactly `10` *minus* maybe something below: anything non-zero below puts us under the
        // halfway point; otherwise it's a tie, round to even.
        _ => mantissa & 0b100 != 0 && !sticky(lower, j),
      };
    }

    if round_away_from_zero {
      // Add 1 to the lowest mantissa bit, and if that carries out of the top, shift back.
      mantissa += 0b100;
      if mantissa & (1 << (MANTISSA_BITS + 3)) != 0 {
        mantissa >>= 1;
        e += 1;
      }
    }

    // Drop the two extra rounding bits, and move the exponent to account for where chunk `i` is.
    mantissa >>= 2;
    e += ((i as i64) << Self::LOW_EXP_BITS) - EXP_BIAS - MANTISSA_BITS as i64;

    if e >= EXP_MASK {
      return float::from_bits(sign | (EXP_MASK << MANTISSA_BITS))
    }
    debug_assert!(e > 0);
    float::from_bits(sign | (e << MANTISSA_BITS) | (mantissa & MANTISSA_MASK))
  }
}
