//! Bit layout of an IEEE 754 double, and decomposition of an [`f64`] into its fields.
//!
//! All conversions between a double and its bits go through [`f64::to_bits`] and
//! [`f64::from_bits`]: we never convert numerically, only reinterpret.

/// Bits in the mantissa field, excluding the implicit leading 1.
pub(crate) const MANTISSA_BITS: u32 = f64::MANTISSA_DIGITS - 1;

/// Bits in the exponent field.
pub(crate) const EXP_BITS: u32 = 11;

/// Mask for the mantissa field.
pub(crate) const MANTISSA_MASK: i64 = (1 << MANTISSA_BITS) - 1;

/// Mask for the exponent field (after shifting it down to bit 0).
pub(crate) const EXP_MASK: i64 = (1 << EXP_BITS) - 1;

/// The exponent bias: a biased exponent field `e` means `2 ^ (e - EXP_BIAS)`.
pub(crate) const EXP_BIAS: i64 = (1 << (EXP_BITS - 1)) - 1;

/// Mask for the sign bit.
pub(crate) const SIGN_MASK: i64 = i64::MIN;

/// The bit pattern of the NaN that results from an overflow of the accumulator itself: all
/// exponent and mantissa bits set, sign clear.
pub(crate) const OVERFLOW_NAN: i64 = (EXP_MASK << MANTISSA_BITS) | MANTISSA_MASK;

/// The fields of a double, as found in its bit pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Fields {
  /// The whole bit pattern, reinterpreted as a signed integer (so that `bits < 0` iff the sign
  /// bit is set).
  pub bits: i64,
  /// The biased exponent field, `0 ..= EXP_MASK`.
  pub exp: i64,
  /// The mantissa field, without the implicit bit.
  pub mantissa: i64,
}

impl Fields {
  #[inline]
  pub const fn of(value: f64) -> Self {
    let bits = value.to_bits() as i64;
    Self {
      bits,
      exp: (bits >> MANTISSA_BITS) & EXP_MASK,
      mantissa: bits & MANTISSA_MASK,
    }
  }

  /// Whether the sign bit is set (this includes `-0.0` and negative NaNs).
  #[inline]
  pub const fn is_negative(self) -> bool {
    self.bits < 0
  }

  /// Whether the value is an infinity or a NaN (exponent field all ones).
  #[inline]
  pub const fn is_special(self) -> bool {
    self.exp == EXP_MASK
  }
}

/// Reinterpret a signed bit pattern as a double.
#[inline]
pub(crate) const fn from_bits(bits: i64) -> f64 {
  f64::from_bits(bits as u64)
}
