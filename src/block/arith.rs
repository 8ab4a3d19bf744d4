use super::*;

// In-place ripple arithmetic. The carry or borrow is a single flag threaded word by word from
// the least significant word up; overflow past bit `NBITS-1` is recovered from the padding
// region by [`BitBlock::spill`].

impl<
  const NBITS: u32,
  W: Word,
  const WORDS: usize,
> BitBlock<NBITS, W, WORDS> {
  /// Add 1 to the block read as one big unsigned integer. Returns whether the carry propagated
  /// past bit `NBITS-1` (i.e. the block wrapped to zero). Callers use this flag to detect sign
  /// changes under a two's complement reading.
  pub fn increment(&mut self) -> bool {
    let mut carry = true;
    for w in self.words.iter_mut() {
      if !carry { break }
      let (r, c) = w.overflowing_add(W::ONE);
      *w = r;
      carry = c;
    }
    self.spill(carry)
  }

  /// Subtract 1 from the block read as one big unsigned integer. Returns whether the borrow
  /// propagated past bit `NBITS-1` (i.e. the block wrapped from zero to all ones).
  pub fn decrement(&mut self) -> bool {
    let mut borrow = true;
    for w in self.words.iter_mut() {
      if !borrow { break }
      let (r, b) = w.borrowing_sub(W::ONE, false);
      *w = r;
      borrow = b;
    }
    self.spill(borrow)
  }

  /// Add `addend` into `self` in place, returning the carry out of bit `NBITS-1`. This is the
  /// running-accumulator form used by the long multiplication kernel.
  pub fn accumulate(&mut self, addend: &Self) -> bool {
    let mut carry = false;
    for i in 0..WORDS {
      let (r, c) = self.words[i].carrying_add(addend.words[i], carry);
      self.words[i] = r;
      carry = c;
    }
    self.spill(carry)
  }

  /// Subtract `subtractand` from `self` in place, returning the borrow out of bit `NBITS-1`.
  /// This is the compare-and-commit step of the restoring division kernels.
  pub fn subtract(&mut self, subtractand: &Self) -> bool {
    let mut borrow = false;
    for i in 0..WORDS {
      let (r, b) = self.words[i].borrowing_sub(subtractand.words[i], borrow);
      self.words[i] = r;
      borrow = b;
    }
    self.spill(borrow)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use super::super::testutil::padding_is_clear;
  use proptest::prelude::*;

  type B20 = BitBlock<20, u8, 3>;

  const MASK20: u64 = (1 << 20) - 1;

  #[test]
  fn increment_wraps() {
    let mut x = B20::from_bits(MASK20);
    assert!(x.increment());
    assert!(x.is_zero());
    assert!(padding_is_clear(&x));
  }

  #[test]
  fn decrement_wraps() {
    let mut x = B20::ZERO;
    assert!(x.decrement());
    assert_eq!(x.to_u64().unwrap(), MASK20);
    assert!(padding_is_clear(&x));
  }

  #[test]
  fn zero_width() {
    // An empty register wraps immediately, both ways.
    let mut x = BitBlock::<0, u8, 0>::ZERO;
    assert!(x.increment());
    assert!(x.decrement());
  }

  proptest!{
    #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES))]

    #[test]
    fn increment_matches_native(x in 0u64..1 << 20) {
      let mut b = B20::from_bits(x);
      let carry = b.increment();
      prop_assert_eq!(b.to_u64().unwrap(), x.wrapping_add(1) & MASK20);
      prop_assert_eq!(carry, x == MASK20);
    }

    #[test]
    fn decrement_matches_native(x in 0u64..1 << 20) {
      let mut b = B20::from_bits(x);
      let borrow = b.decrement();
      prop_assert_eq!(b.to_u64().unwrap(), x.wrapping_sub(1) & MASK20);
      prop_assert_eq!(borrow, x == 0);
    }

    #[test]
    fn accumulate_matches_native(x in 0u64..1 << 20, y in 0u64..1 << 20) {
      let mut b = B20::from_bits(x);
      let carry = b.accumulate(&B20::from_bits(y));
      prop_assert_eq!(b.to_u64().unwrap(), (x + y) & MASK20);
      prop_assert_eq!(carry, x + y > MASK20);
      prop_assert!(padding_is_clear(&b));
    }

    #[test]
    fn subtract_matches_native(x in 0u64..1 << 20, y in 0u64..1 << 20) {
      let mut b = B20::from_bits(x);
      let borrow = b.subtract(&B20::from_bits(y));
      prop_assert_eq!(b.to_u64().unwrap(), x.wrapping_sub(y) & MASK20);
      prop_assert_eq!(borrow, x < y);
      prop_assert!(padding_is_clear(&b));
    }
  }
}
