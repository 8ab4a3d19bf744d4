use crate::block::BitBlock;
use crate::error::Error;
use crate::word::Word;

/// Copy `src` into `tgt` starting at bit `shift`, resetting `tgt` first (a full overwrite, not
/// a merge).
///
/// # Panics
///
/// `SRC + shift <= TGT` is a precondition; violating it panics.
pub fn copy_into<
  const SRC: u32, const TGT: u32,
  W: Word,
  const SW: usize, const TW: usize,
>(
  src: &BitBlock<SRC, W, SW>,
  shift: u32,
  tgt: &mut BitBlock<TGT, W, TW>,
) {
  tgt.clear();
  for i in 0..SRC {
    tgt.set_bit(i + shift, src.bit(i));
  }
}

/// Copy the bit range `[begin, end)` of `src` into `tgt` starting at bit `begin + shift`,
/// *without* resetting `tgt` (merge semantics).
///
/// Fails with [`Error::IterationBoundTooLarge`] if `end` exceeds the source width or
/// `end + shift` exceeds the target width.
pub fn copy_slice_into<
  const SRC: u32, const TGT: u32,
  W: Word,
  const SW: usize, const TW: usize,
>(
  src: &BitBlock<SRC, W, SW>,
  tgt: &mut BitBlock<TGT, W, TW>,
  begin: u32,
  end: u32,
  shift: u32,
) -> Result<(), Error> {
  if end > SRC || end + shift > TGT {
    return Err(Error::IterationBoundTooLarge);
  }
  for i in begin..end {
    if src.bit(i) {
      tgt.set_bit(i + shift, true);
    }
  }
  Ok(())
}
