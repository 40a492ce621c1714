use crate::float;

/// The *small superaccumulator*: a fixed-point number wide enough to hold the exact sum of any
/// (reasonable) number of doubles, with no rounding whatsoever.
///
/// The number is split into [`CHUNKS`](Self::CHUNKS) signed 64-bit *chunks*. Chunk `k` holds the
/// bits for the band of biased exponents `32k ..= 32k + 31`; that is, in a fully normalised
/// accumulator, the value represented is
///
/// ```text
/// Σ chunk[k] × 2 ^ (32k - 1075)
/// ```
///
/// with every chunk except the uppermost in `0 .. 2^32`. Between normalisations, chunks are
/// allowed to grow beyond 32 bits (positive or negative): the upper bits of each 64-bit chunk are
/// headroom for carries, which are only resolved (by [`Self::carry_propagate`]) every
/// [`CARRY_TERMS`](Self::CARRY_TERMS) additions.
///
/// Besides the chunks, the accumulator keeps sticky bit patterns for any infinities and NaNs it
/// has seen, and just enough bookkeeping to decide the sign of a sum that comes out exactly zero.
//
// This is the "xsum" small accumulator of Radford Neal, "Fast exact summation using small and
// large superaccumulators" (2015), <https://arxiv.org/abs/1505.05571>.
#[derive(Clone)]
pub(crate) struct SmallAccumulator {
  /// The chunks, least significant first.
  pub(crate) chunk: [i64; N_CHUNKS],
  /// Number of chunk additions that can still be done before a carry propagation is due.
  pub(crate) adds_until_propagate: i64,
  /// If non-zero, the bit pattern of +Inf, -Inf, or (if both were seen) a NaN.
  pub(crate) inf: i64,
  /// If non-zero, the bit pattern of the NaN with the largest payload seen, sign cleared.
  pub(crate) nan: i64,
  /// Number of values added.
  pub(crate) size_count: usize,
  /// Whether any value added had its sign bit clear.
  pub(crate) has_pos_number: bool,
}

/// Number of chunks, see [`SmallAccumulator::CHUNKS`].
const N_CHUNKS: usize = (1 << (float::EXP_BITS - 5)) + 3;

/// Constants, constructors, and bookkeeping.
mod basics;

/// Adding single doubles to the chunks, and the sticky Inf/NaN rules.
mod accumulate;

/// Carry propagation (normalisation of the chunks).
mod propagate;

/// Rounding the accumulator to the nearest double.
mod round;

impl core::fmt::Debug for SmallAccumulator {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    // Only print the chunks that are in use, otherwise this is 67 lines of mostly 0s.
    let used = self.chunk.iter().rposition(|&c| c != 0).map_or(0, |u| u + 1);
    f.debug_struct("SmallAccumulator")
      .field("chunk", &&self.chunk[.. used])
      .field("adds_until_propagate", &self.adds_until_propagate)
      .field("inf", &float::from_bits(self.inf))
      .field("nan", &float::from_bits(self.nan))
      .field("size_count", &self.size_count)
      .field("has_pos_number", &self.has_pos_number)
      .finish()
  }
}
