use crate::block::BitBlock;
use crate::word::Word;

/// Add two `N`-bit blocks into an `N+1`-bit sum. The result width is `N+1` precisely so the
/// carry out of bit `N-1` is captured as the top bit of the result instead of being discarded;
/// it is also returned as a flag for convenience. Cannot overflow or fail by construction.
///
/// Callers that want an `N`-bit result must truncate and inspect the carry themselves.
pub fn add_unsigned<
  const N: u32, const S: u32,
  W: Word,
  const NW: usize, const SW: usize,
>(
  a: &BitBlock<N, W, NW>,
  b: &BitBlock<N, W, NW>,
) -> (BitBlock<S, W, SW>, bool) {
  const { assert!(S == N + 1, "the sum of two N-bit numbers needs exactly N+1 bits") }
  let mut sum = BitBlock::<S, W, SW>::ZERO;
  let mut carry = false;
  for i in 0..NW {
    let (r, c) = a.words[i].carrying_add(b.words[i], carry);
    sum.words[i] = r;
    carry = c;
  }
  // If widening crossed a word boundary, the carry lands in a fresh word; otherwise the word
  // addition has already deposited it at bit N (the operands' padding bits are zero).
  if SW > NW {
    sum.words[NW] = if carry { W::ONE } else { W::ZERO };
  }
  sum.sanitize();
  let carry_out = if const { S == 0 } { false } else { sum.bit(S - 1) };
  (sum, carry_out)
}

/// Subtract `b` from `a`, widening to `N+1` bits: the top bit of the result (also returned as
/// a flag) is the borrow indicator, and the low `N` bits are `a - b` mod 2^`N`. Reading all
/// `N+1` bits as two's complement gives the signed difference.
pub fn subtract_unsigned<
  const N: u32, const S: u32,
  W: Word,
  const NW: usize, const SW: usize,
>(
  a: &BitBlock<N, W, NW>,
  b: &BitBlock<N, W, NW>,
) -> (BitBlock<S, W, SW>, bool) {
  const { assert!(S == N + 1, "the difference of two N-bit numbers needs exactly N+1 bits") }
  let mut dif = BitBlock::<S, W, SW>::ZERO;
  let mut borrow = false;
  for i in 0..NW {
    let (r, c) = a.words[i].borrowing_sub(b.words[i], borrow);
    dif.words[i] = r;
    borrow = c;
  }
  if SW > NW {
    dif.words[NW] = if borrow { W::ONE } else { W::ZERO };
  }
  // A wrapped top word fills its padding with ones; bit N survives sanitization as the borrow.
  dif.sanitize();
  let borrow_out = if const { S == 0 } { false } else { dif.bit(S - 1) };
  (dif, borrow_out)
}

/// Add two sign-magnitude numbers of the same width: bit `N-1` is the sign, bits `[0, N-1)` the
/// magnitude. Returns the sum in the same encoding, plus a flag reporting overflow of the
/// magnitude field (only possible when the signs agree).
///
/// Equal magnitudes of opposite sign produce positive zero.
pub fn add_sign_magnitude<
  const N: u32,
  W: Word,
  const NW: usize,
>(
  a: &BitBlock<N, W, NW>,
  b: &BitBlock<N, W, NW>,
) -> (BitBlock<N, W, NW>, bool) {
  const { assert!(N >= 1, "a sign-magnitude number needs at least a sign bit") }
  let sign_a = a.bit(N - 1);
  let sign_b = b.bit(N - 1);
  let mut mag_a = *a;
  mag_a.set_bit(N - 1, false);
  let mut mag_b = *b;
  mag_b.set_bit(N - 1, false);

  if sign_a == sign_b {
    let overflow = mag_a.accumulate(&mag_b);
    // The magnitude may have carried into the sign position; that is the overflow, and the
    // sign bit must be restored over it.
    let overflow = overflow | mag_a.bit(N - 1);
    mag_a.set_bit(N - 1, sign_a);
    (mag_a, overflow)
  } else {
    // Signs differ: subtract the smaller magnitude from the larger, keep the larger's sign.
    let (mut big, small, sign) = if mag_a < mag_b {
      (mag_b, mag_a, sign_b)
    } else {
      (mag_a, mag_b, sign_a)
    };
    big.subtract(&small);
    if !big.is_zero() {
      big.set_bit(N - 1, sign);
    }
    (big, false)
  }
}

/// The ones' complement: every bit flipped. This is negation for a *sign-magnitude* encoded
/// number's magnitude step, and an intermediate of [`twos_complement`]; the two must not be
/// confused.
pub fn ones_complement<
  const N: u32,
  W: Word,
  const NW: usize,
>(x: &BitBlock<N, W, NW>) -> BitBlock<N, W, NW> {
  !*x
}

/// The two's complement: every bit flipped, then a ripple increment. This is negation for a
/// two's complement encoded number.
pub fn twos_complement<
  const N: u32,
  W: Word,
  const NW: usize,
>(x: &BitBlock<N, W, NW>) -> BitBlock<N, W, NW> {
  let mut complement = !*x;
  let _ = complement.increment();
  complement
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::block::testutil::padding_is_clear;
  use proptest::prelude::*;

  type B20 = BitBlock<20, u8, 3>;
  type B21 = BitBlock<21, u8, 3>;

  const MASK20: u64 = (1 << 20) - 1;

  #[test]
  fn add_carry_in_top_bit() {
    let a = B20::from_bits(MASK20);
    let b = B20::from_bits(1);
    let (sum, carry) = add_unsigned::<20, 21, u8, 3, 3>(&a, &b);
    assert!(carry);
    assert_eq!(sum.to_u64().unwrap(), 1 << 20);
  }

  #[test]
  fn add_crossing_a_word_boundary() {
    type B8 = BitBlock<8, u8, 1>;
    let (sum, carry) = add_unsigned::<8, 9, u8, 1, 2>(&B8::from_bits(0xff), &B8::from_bits(0xff));
    assert!(carry);
    assert_eq!(sum.to_u64().unwrap(), 0x1fe);
  }

  #[test]
  fn subtract_borrow_in_top_bit() {
    let a = B20::from_bits(0);
    let b = B20::from_bits(1);
    let (dif, borrow) = subtract_unsigned::<20, 21, u8, 3, 3>(&a, &b);
    assert!(borrow);
    // -1 in 21-bit two's complement.
    assert_eq!(dif.to_u64().unwrap(), (1 << 21) - 1);
  }

  proptest!{
    #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES))]

    #[test]
    fn add_matches_native(x in 0u64..1 << 20, y in 0u64..1 << 20) {
      let (sum, carry) = add_unsigned::<20, 21, u8, 3, 3>(&B20::from_bits(x), &B20::from_bits(y));
      prop_assert_eq!(sum.to_u64().unwrap(), x + y);
      prop_assert_eq!(carry, x + y > MASK20);
      prop_assert!(padding_is_clear(&sum));
    }

    #[test]
    fn subtract_matches_native(x in 0u64..1 << 20, y in 0u64..1 << 20) {
      let (dif, borrow) = subtract_unsigned::<20, 21, u8, 3, 3>(&B20::from_bits(x), &B20::from_bits(y));
      prop_assert_eq!(dif.to_u64().unwrap(), x.wrapping_sub(y) & ((1 << 21) - 1));
      prop_assert_eq!(borrow, x < y);
      prop_assert!(padding_is_clear(&dif));
    }

    #[test]
    fn sign_magnitude_matches_native(x in 0i64..1 << 20, y in 0i64..1 << 20, sx: bool, sy: bool) {
      let encode = |mag: i64, neg: bool| {
        let mut b = B21::from_bits(mag as u64);
        b.set_bit(20, neg);
        b
      };
      let (sum, overflow) = add_sign_magnitude(&encode(x, sx), &encode(y, sy));
      if sx == sy {
        prop_assert_eq!(overflow, x + y > (1 << 20) - 1);
      } else {
        prop_assert!(!overflow);
      }
      if !overflow {
        let expected = if sx == sy {
          // Same sign keeps that sign, even for a zero sum (-0 + -0 = -0).
          encode(x + y, sx)
        } else {
          let total = (if sx { -x } else { x }) + (if sy { -y } else { y });
          encode(total.abs(), total < 0)
        };
        prop_assert_eq!(sum, expected);
      }
    }

    #[test]
    fn complements_match_native(x in 0u64..1 << 20) {
      prop_assert_eq!(ones_complement(&B20::from_bits(x)).to_u64().unwrap(), !x & MASK20);
      prop_assert_eq!(twos_complement(&B20::from_bits(x)).to_u64().unwrap(), x.wrapping_neg() & MASK20);
    }
  }
}
