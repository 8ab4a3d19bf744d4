use super::copy::copy_into;
use crate::block::BitBlock;
use crate::error::Error;
use crate::word::Word;

/// Integer quotient of two `N`-bit blocks by restoring division, in a `2N`-bit result for
/// symmetry with [`multiply_unsigned`](super::multiply_unsigned) (the quotient itself always
/// fits `N` bits).
///
/// For each quotient bit from the most significant candidate down: if the divisor, shifted to
/// align with the dividend's leading bit, is not greater than the running remainder, commit the
/// subtraction and set the bit; otherwise restore (skip the subtraction) and clear it.
///
/// Fails with [`Error::DivideByZero`] when `b` has no set bit.
pub fn integer_divide_unsigned<
  const N: u32, const M: u32,
  W: Word,
  const NW: usize, const MW: usize,
>(
  a: &BitBlock<N, W, NW>,
  b: &BitBlock<N, W, NW>,
) -> Result<BitBlock<M, W, MW>, Error> {
  const { assert!(M == 2 * N, "the division result block is 2N bits wide") }
  let msb = b.most_significant_bit().ok_or(Error::DivideByZero)?;
  let mut result = BitBlock::<M, W, MW>::ZERO;
  let mut accumulator = *a;
  let mut subtractand = *b << (N - 1 - msb);
  for i in (0..N - msb).rev() {
    if subtractand <= accumulator {
      accumulator.subtract(&subtractand);
      result.set_bit(i, true);
    }
    subtractand >>= 1;
  }
  Ok(result)
}

/// Restoring division continued past the integer quotient: dividing `a` by `b` into an `M`-bit
/// result (`M >= N`) computes `floor((a << (M - N)) / b)`, i.e. the quotient with `M - N`
/// additional fraction bits, directly rather than by computing quotient and remainder
/// separately and converting. The caller keeps track of where the radix point lies.
///
/// Fails with [`Error::DivideByZero`] when `b` has no set bit.
pub fn divide_with_fraction<
  const N: u32, const M: u32,
  W: Word,
  const NW: usize, const MW: usize,
>(
  a: &BitBlock<N, W, NW>,
  b: &BitBlock<N, W, NW>,
) -> Result<BitBlock<M, W, MW>, Error> {
  const { assert!(M >= N, "the fraction-producing division cannot narrow its operands") }
  let msb = b.most_significant_bit().ok_or(Error::DivideByZero)?;
  let mut result = BitBlock::<M, W, MW>::ZERO;
  let mut accumulator = BitBlock::<M, W, MW>::ZERO;
  let mut subtractand = BitBlock::<M, W, MW>::ZERO;
  // Both operands enter left-aligned at the top of the wide block; the quotient bits then fill
  // downward through the fraction positions.
  copy_into(a, M - N, &mut accumulator);
  copy_into(b, M - N, &mut subtractand);
  subtractand <<= N - 1 - msb;
  for i in (0..M - msb).rev() {
    if subtractand <= accumulator {
      accumulator.subtract(&subtractand);
      result.set_bit(i, true);
    }
    subtractand >>= 1;
  }
  Ok(result)
}
