use super::*;
use crate::error::Error;

impl<
  const NBITS: u32,
  W: Word,
  const WORDS: usize,
> BitBlock<NBITS, W, WORDS> {
  /// Bit `i`, without the range check. Safe (the array index still panics if violated), but
  /// only for crate-internal call sites that have already established `i < NBITS`.
  #[inline]
  pub(crate) fn bit(&self, i: u32) -> bool {
    debug_assert!(i < NBITS);
    let word = (i / W::BITS) as usize;
    self.words[word] & (W::ONE << (i % W::BITS)) != W::ZERO
  }

  /// Set bit `i` to `value`, without the range check. See [`Self::bit`].
  #[inline]
  pub(crate) fn set_bit(&mut self, i: u32, value: bool) {
    debug_assert!(i < NBITS);
    let word = (i / W::BITS) as usize;
    let mask = W::ONE << (i % W::BITS);
    if value {
      self.words[word] |= mask;
    } else {
      self.words[word] &= !mask;
    }
  }

  /// The value of bit `pos` (bit 0 is the least significant).
  ///
  /// Fails with [`Error::OutOfRange`] if `pos >= NBITS`.
  #[inline]
  pub fn test(&self, pos: u32) -> Result<bool, Error> {
    if pos < NBITS {
      Ok(self.bit(pos))
    } else {
      Err(Error::OutOfRange { index: pos, width: NBITS })
    }
  }

  /// Set bit `pos` to `value`; no other bit changes.
  ///
  /// Fails with [`Error::OutOfRange`] if `pos >= NBITS`.
  #[inline]
  pub fn set(&mut self, pos: u32, value: bool) -> Result<(), Error> {
    if pos < NBITS {
      self.set_bit(pos, value);
      Ok(())
    } else {
      Err(Error::OutOfRange { index: pos, width: NBITS })
    }
  }

  /// Clear bit `pos`. Same contract as [`Self::set`].
  #[inline]
  pub fn reset(&mut self, pos: u32) -> Result<(), Error> {
    self.set(pos, false)
  }

  /// Flip bit `pos`. Same contract as [`Self::set`].
  #[inline]
  pub fn flip(&mut self, pos: u32) -> Result<(), Error> {
    if pos < NBITS {
      self.set_bit(pos, !self.bit(pos));
      Ok(())
    } else {
      Err(Error::OutOfRange { index: pos, width: NBITS })
    }
  }

  /// As [`Self::test`], but without the range check.
  ///
  /// # Safety
  ///
  /// `pos < NBITS` must hold, or calling this function is *undefined behaviour*.
  #[inline]
  pub unsafe fn test_unchecked(&self, pos: u32) -> bool {
    debug_assert!(pos < NBITS);
    let word = (pos / W::BITS) as usize;
    unsafe { *self.words.get_unchecked(word) & (W::ONE << (pos % W::BITS)) != W::ZERO }
  }

  /// As [`Self::set`], but without the range check.
  ///
  /// # Safety
  ///
  /// `pos < NBITS` must hold, or calling this function is *undefined behaviour*.
  #[inline]
  pub unsafe fn set_unchecked(&mut self, pos: u32, value: bool) {
    debug_assert!(pos < NBITS);
    let word = (pos / W::BITS) as usize;
    let mask = W::ONE << (pos % W::BITS);
    let w = unsafe { self.words.get_unchecked_mut(word) };
    if value { *w |= mask } else { *w &= !mask }
  }

  /// Clear every bit.
  #[inline]
  pub fn clear(&mut self) {
    self.words = [W::ZERO; WORDS];
  }

  /// Flip every bit (the ones' complement, in place).
  #[inline]
  pub fn flip_all(&mut self) {
    for w in self.words.iter_mut() {
      *w = !*w;
    }
    self.sanitize();
  }

  /// Whether every bit is zero.
  #[inline]
  pub fn is_zero(&self) -> bool {
    self.words.iter().all(|w| *w == W::ZERO)
  }

  /// Whether any bit in `[0, pos)` is set: the "sticky" condition over the bits strictly below
  /// `pos`. `pos <= NBITS` is a precondition. `any_set_below(0)` is `false`.
  pub fn any_set_below(&self, pos: u32) -> bool {
    debug_assert!(pos <= NBITS);
    let full_words = (pos / W::BITS) as usize;
    let rem = pos % W::BITS;
    self.words[..full_words].iter().any(|w| *w != W::ZERO)
      || (rem != 0 && self.words[full_words].mask_lsb(rem) != W::ZERO)
  }
}
