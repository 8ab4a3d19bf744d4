//! This module and its submodules contain [`Triple`], a normalized `(sign, scale, significand)`
//! representation of a real value (a floating point number decomposed into its three
//! orthogonal fields) together with the generic, correctly rounded arithmetic over it
//! ([`module_add`], [`module_subtract`], [`module_multiply`], [`module_divide`]).
//!
//! Concrete number systems (posit, cfloat, fixed-point) decompose their operands into triples,
//! run the arithmetic here, then re-encode the rounded result into their own bit layout. That
//! seam keeps every encoding's arithmetic implementation down to decode + encode.

use crate::block::BitBlock;
use crate::word::Word;

/// A normalized real value: `(-1)^sign × 1.fraction × 2^scale`, or one of the special cases.
///
/// The fraction block holds the `FBITS` significand bits *below* the implicit hidden bit, most
/// significant first: bit `FBITS-1` weighs 2⁻¹, bit `FBITS-2` weighs 2⁻², and so on. `scale` is
/// the unbiased binary exponent.
///
/// The special cases are enum variants rather than side flags, so a value is always in exactly
/// one category and the scale/fraction of a zero, infinity, or NaN simply do not exist to be
/// misread.
///
/// Examples:
///
/// ```
/// # use blockbits::{BitBlock, Triple};
/// let six_and_a_half = Triple::<23, u32, 1>::from(6.5_f64);
/// assert_eq!(six_and_a_half, Triple::Normal {
///   sign: false,
///   scale: 2,                                    // 6.5 = +1.625 × 2²
///   fraction: BitBlock::from_bits(0b101 << 20),  // .625 = 0b.101
/// });
/// ```
#[derive(Clone, Copy, Debug)]
#[derive(PartialEq, Eq)]
pub enum Triple<
  const FBITS: u32,
  W: Word,
  const FW: usize,
> {
  /// Exact zero. Unsigned: the encodings this crate serves collapse ±0.
  Zero,
  /// Signed infinity.
  Inf { sign: bool },
  /// Not a number. Compares as unordered, propagates through arithmetic.
  NaN,
  /// An ordinary nonzero finite value.
  Normal { sign: bool, scale: i32, fraction: BitBlock<FBITS, W, FW> },
}

impl<
  const FBITS: u32,
  W: Word,
  const FW: usize,
> Triple<FBITS, W, FW> {
  /// The number of fraction bits (i.e. parameter `FBITS`), excluding the hidden bit.
  pub const FRACTION_BITS: u32 = FBITS;

  #[inline]
  pub fn is_zero(&self) -> bool { matches!(self, Self::Zero) }

  #[inline]
  pub fn is_inf(&self) -> bool { matches!(self, Self::Inf { .. }) }

  #[inline]
  pub fn is_nan(&self) -> bool { matches!(self, Self::NaN) }

  #[inline]
  pub fn is_normal(&self) -> bool { matches!(self, Self::Normal { .. }) }

  /// The sign: `true` is negative. Zero is positive; NaN reports negative (it maps to the
  /// all-negative special encoding in the number systems this crate serves).
  pub fn sign(&self) -> bool {
    match self {
      Self::Zero => false,
      Self::NaN => true,
      Self::Inf { sign } => *sign,
      Self::Normal { sign, .. } => *sign,
    }
  }

  /// The unbiased binary exponent, if the value has one.
  pub fn scale(&self) -> Option<i32> {
    match self {
      Self::Normal { scale, .. } => Some(*scale),
      _ => None,
    }
  }

  /// The significand bits below the hidden bit, if the value has them.
  pub fn fraction(&self) -> Option<&BitBlock<FBITS, W, FW>> {
    match self {
      Self::Normal { fraction, .. } => Some(fraction),
      _ => None,
    }
  }

  /// The magnitude: `self` with the sign forced positive.
  pub fn abs(self) -> Self {
    match self {
      Self::Inf { .. } => Self::Inf { sign: false },
      Self::Normal { scale, fraction, .. } => Self::Normal { sign: false, scale, fraction },
      other => other,
    }
  }
}

impl<
  const FBITS: u32,
  W: Word,
  const FW: usize,
> core::ops::Neg for Triple<FBITS, W, FW> {
  type Output = Self;

  fn neg(self) -> Self {
    match self {
      Self::Zero => Self::Zero,
      Self::NaN => Self::NaN,
      Self::Inf { sign } => Self::Inf { sign: !sign },
      Self::Normal { sign, scale, fraction } => Self::Normal { sign: !sign, scale, fraction },
    }
  }
}

mod cmp;
mod convert;
mod fmt;
mod ops;

pub use ops::{module_add, module_divide, module_multiply, module_subtract};

#[cfg(test)]
mod tests {
  use super::*;

  type T = crate::TripleDouble;

  #[test]
  fn categories_are_exclusive() {
    let cases = [
      T::Zero,
      T::NaN,
      T::Inf { sign: false },
      T::Normal { sign: false, scale: 0, fraction: BitBlock::ZERO },
    ];
    for (i, x) in cases.iter().enumerate() {
      assert_eq!(
        [x.is_zero(), x.is_nan(), x.is_inf(), x.is_normal()],
        core::array::from_fn(|j| i == j),
      );
    }
  }

  #[test]
  fn neg_and_abs() {
    let x = T::from(-3.0_f64);
    assert_eq!((-x).to_f64(), 3.0);
    assert_eq!(x.abs().to_f64(), 3.0);
    assert_eq!(-T::Inf { sign: false }, T::Inf { sign: true });
    assert_eq!(T::Inf { sign: true }.abs(), T::Inf { sign: false });
    assert_eq!(-T::Zero, T::Zero);
  }
}
