use super::copy::copy_into;
use crate::block::BitBlock;
use crate::word::Word;

/// Multiply two `N`-bit blocks into a `2N`-bit product. Cannot overflow by construction.
///
/// Classic shift-and-accumulate: for each set bit `i` of `a`, add `b` placed at offset `i` into
/// the running result. The placement is an offset copy rather than a shift of the accumulator,
/// so each partial product costs one pass over the words.
pub fn multiply_unsigned<
  const N: u32, const M: u32,
  W: Word,
  const NW: usize, const MW: usize,
>(
  a: &BitBlock<N, W, NW>,
  b: &BitBlock<N, W, NW>,
) -> BitBlock<M, W, MW> {
  const { assert!(M == 2 * N, "the product of two N-bit numbers needs exactly 2N bits") }
  let mut result = BitBlock::<M, W, MW>::ZERO;
  let mut addend = BitBlock::<M, W, MW>::ZERO;
  for i in a.iter_ones() {
    copy_into(b, i, &mut addend);
    let carry = result.accumulate(&addend);
    debug_assert!(!carry, "a 2N-bit accumulator cannot overflow");
  }
  result
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::block::testutil::padding_is_clear;
  use proptest::prelude::*;

  type B20 = BitBlock<20, u8, 3>;

  #[test]
  fn small_products() {
    let mul = |x: u64, y: u64| {
      multiply_unsigned::<20, 40, u8, 3, 5>(&B20::from_bits(x), &B20::from_bits(y))
        .to_u64()
        .unwrap()
    };
    assert_eq!(mul(0, 12345), 0);
    assert_eq!(mul(1, 12345), 12345);
    assert_eq!(mul(0xfffff, 0xfffff), 0xfffff * 0xfffff);
  }

  proptest!{
    #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES))]

    #[test]
    fn matches_native(x in 0u64..1 << 20, y in 0u64..1 << 20) {
      let product = multiply_unsigned::<20, 40, u8, 3, 5>(&B20::from_bits(x), &B20::from_bits(y));
      prop_assert_eq!(product.to_u64().unwrap(), x * y);
      prop_assert!(padding_is_clear(&product));
    }

    // Same property at a width where the product no longer fits a u64, against a u128 oracle.
    #[test]
    fn matches_native_wide(x: u64, y: u64) {
      let a = BitBlock::<64, u64, 1>::from_bits(x);
      let b = BitBlock::<64, u64, 1>::from_bits(y);
      let product: BitBlock<128, u64, 2> = multiply_unsigned(&a, &b);
      let expected = x as u128 * y as u128;
      prop_assert_eq!(product.words[0], expected as u64);
      prop_assert_eq!(product.words[1], (expected >> 64) as u64);
    }
  }
}
