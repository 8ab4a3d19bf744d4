use super::*;

impl<
  const NBITS: u32,
  W: Word,
  const WORDS: usize,
> BitBlock<NBITS, W, WORDS> {
  /// The number of set bits.
  #[inline]
  pub fn count_ones(&self) -> u32 {
    self.words.iter().map(|w| w.count_ones()).sum()
  }

  /// The 0-based index of the highest set bit, or `None` if the block is entirely zero.
  ///
  /// Words are scanned from most to least significant, stopping at the first nonzero word; the
  /// position within that word comes from a single `leading_zeros`, so there is no
  /// data-dependent scan over individual bits.
  pub fn most_significant_bit(&self) -> Option<u32> {
    for i in (0..WORDS).rev() {
      let w = self.words[i];
      if w != W::ZERO {
        return Some(i as u32 * W::BITS + (W::BITS - 1 - w.leading_zeros()));
      }
    }
    None
  }

  /// The index of the lowest set bit, or `None` if the block is entirely zero.
  pub fn first_set(&self) -> Option<u32> {
    for i in 0..WORDS {
      let w = self.words[i];
      if w != W::ZERO {
        return Some(i as u32 * W::BITS + w.trailing_zeros());
      }
    }
    None
  }

  /// The index of the lowest set bit strictly above `previous`, or `None` if there is none.
  /// Reseeding with the returned position steps a lazy forward iteration over the set bits;
  /// [`Self::iter_ones`] packages exactly that.
  pub fn next_set(&self, previous: u32) -> Option<u32> {
    let start = previous.checked_add(1)?;
    if start >= NBITS {
      return None;
    }
    let mut i = (start / W::BITS) as usize;
    // Mask off the already-visited low bits of the first word.
    let mut w = self.words[i] & !W::MAX.mask_lsb(start % W::BITS);
    loop {
      if w != W::ZERO {
        return Some(i as u32 * W::BITS + w.trailing_zeros());
      }
      i += 1;
      if i >= WORDS {
        return None;
      }
      w = self.words[i];
    }
  }

  /// Iterate over the positions of the set bits, lowest first.
  pub fn iter_ones(&self) -> Ones<'_, NBITS, W, WORDS> {
    Ones { block: self, next: self.first_set() }
  }
}

/// Iterator over the set-bit positions of a [`BitBlock`], lowest first. Finite; obtained from
/// [`BitBlock::iter_ones`].
pub struct Ones<'a, const NBITS: u32, W: Word, const WORDS: usize> {
  block: &'a BitBlock<NBITS, W, WORDS>,
  next: Option<u32>,
}

impl<const NBITS: u32, W: Word, const WORDS: usize> Iterator for Ones<'_, NBITS, W, WORDS> {
  type Item = u32;

  fn next(&mut self) -> Option<u32> {
    let current = self.next?;
    self.next = self.block.next_set(current);
    Some(current)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;

  type B20 = BitBlock<20, u8, 3>;

  #[test]
  fn msb_of_zero() {
    assert_eq!(B20::ZERO.most_significant_bit(), None);
    assert_eq!(BitBlock::<0, u8, 0>::ZERO.most_significant_bit(), None);
  }

  #[test]
  fn iter_ones() {
    let x = B20::from_bits(0b1000_0000_0101_0010);
    assert_eq!(x.iter_ones().collect::<Vec<_>>(), [1, 4, 6, 15]);
    assert_eq!(B20::ZERO.iter_ones().count(), 0);
  }

  #[test]
  fn next_set_reseeding() {
    let x = B20::from_bits(0b1001);
    assert_eq!(x.first_set(), Some(0));
    assert_eq!(x.next_set(0), Some(3));
    assert_eq!(x.next_set(3), None);
    assert_eq!(x.next_set(19), None);
    assert_eq!(x.next_set(u32::MAX), None);
  }

  proptest!{
    #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES))]

    #[test]
    fn msb_matches_native(x in 1u64..1 << 20) {
      prop_assert_eq!(
        B20::from_bits(x).most_significant_bit(),
        Some(63 - x.leading_zeros()),
      );
    }

    #[test]
    fn count_ones_matches_native(x in 0u64..1 << 20) {
      prop_assert_eq!(B20::from_bits(x).count_ones(), x.count_ones());
    }

    #[test]
    fn iter_ones_matches_native(x in 0u64..1 << 20) {
      let expected: Vec<u32> = (0..20).filter(|i| x >> i & 1 == 1).collect();
      prop_assert_eq!(B20::from_bits(x).iter_ones().collect::<Vec<_>>(), expected);
    }
  }
}
