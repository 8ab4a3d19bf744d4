use super::*;
use crate::error::Error;

impl<
  const NBITS: u32,
  W: Word,
  const WORDS: usize,
> BitBlock<NBITS, W, WORDS> {
  /// Construct a block from the low bits of a `u64`: bits beyond `NBITS` are truncated, bit
  /// positions beyond 64 are zero-filled.
  pub fn from_bits(bits: u64) -> Self {
    let mut words = [W::ZERO; WORDS];
    for (i, w) in words.iter_mut().enumerate() {
      let shift = i as u32 * W::BITS;
      if shift < 64 {
        *w = W::of_u64(bits >> shift);
      }
    }
    let mut out = Self { words };
    out.sanitize();
    out
  }

  /// The block's value as a `u64`.
  ///
  /// Fails with [`Error::Overflow`] if any bit at position 64 or above is set; narrower blocks
  /// always succeed.
  pub fn to_u64(&self) -> Result<u64, Error> {
    let mut out = 0u64;
    for (i, w) in self.words.iter().enumerate() {
      let shift = i as u32 * W::BITS;
      if shift >= 64 {
        if *w != W::ZERO {
          return Err(Error::Overflow);
        }
      } else {
        out |= w.as_u64() << shift;
      }
    }
    Ok(out)
  }
}

/// The error type returned when parsing a bit string of the wrong length, or containing a
/// character other than `'0'` or `'1'`.
#[derive(Debug, Clone, Copy)]
#[derive(PartialEq, Eq)]
#[derive(thiserror::Error)]
#[error("expected exactly {expected} characters of '0' or '1'")]
pub struct ParseBitBlockError {
  pub expected: u32,
}

impl<
  const NBITS: u32,
  W: Word,
  const WORDS: usize,
> core::str::FromStr for BitBlock<NBITS, W, WORDS> {
  type Err = ParseBitBlockError;

  /// Parse a block from a string of exactly `NBITS` characters of `'0'`/`'1'`, most significant
  /// bit first: `s[0]` becomes bit `NBITS-1` and `s[NBITS-1]` becomes bit 0.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let err = ParseBitBlockError { expected: NBITS };
    if s.len() != NBITS as usize {
      return Err(err);
    }
    let mut out = Self::ZERO;
    for (i, c) in s.bytes().enumerate() {
      match c {
        b'0' => (),
        b'1' => out.set_bit(NBITS - 1 - i as u32, true),
        _ => return Err(err),
      }
    }
    Ok(out)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;

  type B20 = BitBlock<20, u8, 3>;
  type B100 = BitBlock<100, u64, 2>;

  #[test]
  fn from_bits_truncates() {
    assert_eq!(B20::from_bits(u64::MAX).to_u64().unwrap(), (1 << 20) - 1);
    assert_eq!(B20::from_bits(0).to_u64().unwrap(), 0);
  }

  #[test]
  fn to_u64_overflow() {
    let mut wide = B100::from_bits(u64::MAX);
    assert_eq!(wide.to_u64(), Ok(u64::MAX));
    wide.set(64, true).unwrap();
    assert_eq!(wide.to_u64(), Err(Error::Overflow));
  }

  #[test]
  fn parse_rejects_bad_input() {
    use core::str::FromStr;
    assert_eq!(B20::from_str("0"), Err(ParseBitBlockError { expected: 20 }));
    assert_eq!(B20::from_str("0000000000000000000x"), Err(ParseBitBlockError { expected: 20 }));
    assert_eq!(B20::from_str("000000000000000000000"), Err(ParseBitBlockError { expected: 20 }));
    assert!(B20::from_str("10000000000000000001").is_ok());
    assert!(BitBlock::<0, u8, 0>::from_str("").is_ok());
  }

  #[test]
  fn parse_is_msb_first() {
    let x: B20 = "10000000000000000001".parse().unwrap();
    assert!(x.bit(19));
    assert!(x.bit(0));
    assert_eq!(x.count_ones(), 2);
  }

  proptest!{
    #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES))]

    #[test]
    fn u64_roundtrip(x in 0u64..1 << 20) {
      prop_assert_eq!(B20::from_bits(x).to_u64().unwrap(), x);
    }

    #[test]
    fn string_roundtrip(x in 0u64..1 << 20) {
      let s = format!("{:020b}", x);
      let parsed: B20 = s.parse().unwrap();
      prop_assert_eq!(format!("{}", parsed), s);
      prop_assert_eq!(parsed.to_u64().unwrap(), x);
    }
  }
}
