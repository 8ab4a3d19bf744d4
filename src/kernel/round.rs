use crate::block::BitBlock;
use crate::error::Error;
use crate::word::Word;

/// Round off the `n` least significant bits of `src`, producing a `TGT`-bit result by round to
/// nearest, ties to even.
///
/// The dropped bits are read as the classic guard/sticky partition: the highest dropped bit is
/// the *guard*; the OR of everything below it is the *sticky*. Then:
///
///   - guard = 0: truncate (round down), whatever the sticky says;
///   - guard = 1, sticky ≠ 0: round up;
///   - guard = 1, sticky = 0 (an exact tie): round up only if the retained least significant
///     bit is 1, so ties land on the even value.
///
/// Rounding up is a plain increment of the truncated value, and *that increment can overflow
/// into one additional bit*: the boolean in the result reports exactly that carry, and it is
/// the caller's job to handle it (typically by renormalizing, as
/// [`Triple::round_to`](crate::Triple::round_to) does). When the carry is reported the returned
/// block has wrapped to zero.
///
/// Fails with [`Error::RoundOffAllBits`] if `n >= SRC` (nothing would be left to return), and
/// with [`Error::CutOffLeadingBit`] if any bit at or above position `TGT + n` is set: that is
/// significant high-order information the rounding window would silently lose, which indicates
/// a pre-alignment bug in the caller rather than ordinary precision loss.
///
/// A `TGT` of zero returns the empty block unconditionally.
pub fn round<
  const TGT: u32, const SRC: u32,
  W: Word,
  const TW: usize, const SW: usize,
>(
  src: &BitBlock<SRC, W, SW>,
  n: u32,
) -> Result<(BitBlock<TGT, W, TW>, bool), Error> {
  if const { TGT == 0 } {
    return Ok((BitBlock::ZERO, false));
  }
  if n >= SRC {
    return Err(Error::RoundOffAllBits { width: SRC });
  }
  // Reject set bits above the rounding window before touching anything else.
  for leading in TGT.saturating_add(n)..SRC {
    if src.bit(leading) {
      return Err(Error::CutOffLeadingBit { position: leading });
    }
  }

  // The retained bits, truncated.
  let shifted = *src >> n;
  let mut result = BitBlock::<TGT, W, TW>::ZERO;
  for i in 0..TW.min(SW) {
    result.words[i] = shifted.words[i];
  }
  result.sanitize();

  let mut carry = false;
  if n > 0 && src.bit(n - 1) {
    // Guard bit is set: round up unless this is a tie that the even (currently-even) value
    // wins.
    let sticky = src.any_set_below(n - 1);
    if sticky || result.bit(0) {
      carry = result.increment();
    }
  }
  Ok((result, carry))
}

/// Keep the top `TGT` bits of `src`, discarding the rest unrounded.
pub fn truncate<
  const TGT: u32, const SRC: u32,
  W: Word,
  const TW: usize, const SW: usize,
>(src: &BitBlock<SRC, W, SW>) -> BitBlock<TGT, W, TW> {
  const { assert!(TGT <= SRC, "truncate narrows; it cannot widen") }
  let mut tgt = BitBlock::<TGT, W, TW>::ZERO;
  for i in 0..TGT {
    tgt.set_bit(TGT - 1 - i, src.bit(SRC - 1 - i));
  }
  tgt
}
