//! This module and its submodules contain [`BitBlock`], a fixed-width bit vector packed into an
//! array of unsigned machine words, with bit-exact semantics equivalent to an `NBITS`-bit
//! unsigned binary register.
//!
//! Some notation used in the comments:
//!
//!   - **Bit 0, bit 1, .. bit NBITS-1**: numbered least significant to most significant.
//!   - **msw/lsw**: most/least significant word. Word 0 is the least significant.
//!   - **Padding bits**: the bits of the most significant word above bit `NBITS-1`. They are
//!     kept at zero by every mutating operation, so word-level comparisons, carries, and
//!     population counts need no special casing.

use crate::word::Word;

/// Number of `word_bits`-wide words needed to back an `nbits`-bit block.
///
/// Useful for spelling the third parameter of a [`BitBlock`] at the use site:
///
/// ```
/// use blockbits::{BitBlock, words_for};
/// type Bits100 = BitBlock<100, u64, { words_for(100, u64::BITS) }>;
/// ```
pub const fn words_for(nbits: u32, word_bits: u32) -> usize {
  if nbits == 0 { 0 } else { ((nbits - 1) / word_bits + 1) as usize }
}

/// A bit block of `NBITS` logical bits stored in `WORDS` words of type `W`, word 0 least
/// significant.
///
/// `WORDS` must equal [`words_for`]`(NBITS, W::BITS)`; this is checked at compile time. A
/// zero-width block (`NBITS = 0`) is a legal degenerate with an empty backing array: every
/// operation on it is a no-op returning the neutral value. Blocks that fit a single word
/// monomorphize to straight-line single-word code; there is no runtime dispatch on size.
///
/// Examples:
///
/// ```
/// # use blockbits::BitBlock;
/// type Foo = BitBlock<20, u8, 3>;   // 20 bits in three u8 words (4 padding bits)
/// type Bar = BitBlock<64, u64, 1>;  // a plain 64-bit register
/// ```
#[derive(Clone, Copy)]
#[derive(PartialEq, Eq, Hash)]
pub struct BitBlock<
  const NBITS: u32,
  W: Word,
  const WORDS: usize,
> {
  pub(crate) words: [W; WORDS],
}

impl<
  const NBITS: u32,
  W: Word,
  const WORDS: usize,
> BitBlock<NBITS, W, WORDS> {
  /// The logical size of this block in bits (i.e. parameter `NBITS`).
  ///
  /// Note: this is the logical size, not `WORDS * W::BITS`.
  pub const BITS: u32 = {
    assert!(
      WORDS == words_for(NBITS, W::BITS),
      "WORDS must be exactly the number of W words needed to hold NBITS bits",
    );
    NBITS
  };

  /// The all-zero block.
  pub const ZERO: Self = Self { words: [W::ZERO; WORDS] };

  /// Mask of the bits of the most significant word that belong to the block.
  #[inline]
  pub(crate) fn msw_mask() -> W {
    let used = NBITS % W::BITS;
    if used == 0 { W::MAX } else { W::MAX >> (W::BITS - used) }
  }

  /// Restore the padding invariant: clear any bits of the msw above bit `NBITS-1`. Called by
  /// every operation that can spill into the padding region (left shifts, complements,
  /// carries).
  #[inline]
  pub(crate) fn sanitize(&mut self) {
    // Referencing BITS evaluates the NBITS/WORDS layout assert at compile time.
    let _ = Self::BITS;
    if let Some(msw) = self.words.last_mut() {
      *msw = *msw & Self::msw_mask();
    }
  }

  /// Fold a word-level carry/borrow out of the top of the array into the carry out of bit
  /// `NBITS-1`, and re-sanitize. When the block has padding bits, an overflow of bit `NBITS-1`
  /// lands there rather than in the word-level flag.
  #[inline]
  pub(crate) fn spill(&mut self, word_flag: bool) -> bool {
    match self.words.last_mut() {
      None => word_flag,
      Some(msw) => {
        let pad = *msw & !Self::msw_mask();
        *msw = *msw & Self::msw_mask();
        word_flag || pad != W::ZERO
      }
    }
  }
}

impl<
  const NBITS: u32,
  W: Word,
  const WORDS: usize,
> Default for BitBlock<NBITS, W, WORDS> {
  fn default() -> Self { Self::ZERO }
}

mod arith;
mod bits;
mod cmp;
mod convert;
mod fmt;
mod logic;
mod scan;

pub use cmp::less_than_signed;
pub use convert::ParseBitBlockError;
pub use scan::Ones;



mod tests_compile_fail {
  /// ```compile_fail
  /// use blockbits::BitBlock;
  /// pub fn foo() -> u32 { BitBlock::<20, u8, 2>::BITS }
  /// ```
  #[allow(dead_code)]
  fn words_too_few() {}

  /// ```compile_fail
  /// use blockbits::BitBlock;
  /// pub fn foo() -> u32 { BitBlock::<20, u8, 4>::BITS }
  /// ```
  #[allow(dead_code)]
  fn words_too_many() {}

  /// ```compile_fail
  /// use blockbits::BitBlock;
  /// pub fn foo() -> u32 { BitBlock::<0, u8, 1>::BITS }
  /// ```
  #[allow(dead_code)]
  fn words_nonempty_for_zero_width() {}
}
