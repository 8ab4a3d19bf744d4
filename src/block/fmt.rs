use super::*;

use core::fmt;

impl<
  const NBITS: u32,
  W: Word,
  const WORDS: usize,
> fmt::Display for BitBlock<NBITS, W, WORDS> {
  /// The block as `NBITS` characters of `'0'`/`'1'`, most significant bit first. The exact
  /// inverse of the [`FromStr`](core::str::FromStr) impl.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for i in (0..NBITS).rev() {
      f.write_str(if self.bit(i) { "1" } else { "0" })?;
    }
    Ok(())
  }
}

impl<
  const NBITS: u32,
  W: Word,
  const WORDS: usize,
> fmt::Binary for BitBlock<NBITS, W, WORDS> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if f.alternate() {
      f.write_str("0b")?;
    }
    fmt::Display::fmt(self, f)
  }
}

impl<
  const NBITS: u32,
  W: Word,
  const WORDS: usize,
> fmt::LowerHex for BitBlock<NBITS, W, WORDS> {
  /// The block as hex nibbles, most significant first; the top nibble is zero-padded when
  /// `NBITS` is not a multiple of 4.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if f.alternate() {
      f.write_str("0x")?;
    }
    let digits = NBITS.div_ceil(4);
    for d in (0..digits).rev() {
      let mut nibble = 0u32;
      for b in 0..4 {
        let pos = 4 * d + b;
        if pos < NBITS && self.bit(pos) {
          nibble |= 1 << b;
        }
      }
      write!(f, "{nibble:x}")?;
    }
    Ok(())
  }
}

impl<
  const NBITS: u32,
  W: Word,
  const WORDS: usize,
> fmt::Debug for BitBlock<NBITS, W, WORDS> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("BitBlock")
      .field(&format_args!("0b{self}"))
      .finish()
  }
}
