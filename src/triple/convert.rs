use super::*;

impl<
  const FBITS: u32,
  W: Word,
  const FW: usize,
> Triple<FBITS, W, FW> {
  /// Build a `Normal` from a sign, a scale, and up to 64 fraction bits left-aligned at the top
  /// of a `u64` (bit 63 weighs 2⁻¹), rounding to `FBITS` fraction bits, nearest, ties to even.
  /// `sticky` accumulates any bits already lost below the `u64`.
  ///
  /// If the round-up ripples through an all-ones fraction the significand wraps past its hidden
  /// bit: the fraction becomes zero and the scale goes up by one. That renormalization lives
  /// here so no caller can forget it.
  pub(crate) fn from_aligned_fraction(sign: bool, scale: i32, frac: u64, sticky: bool) -> Self {
    if const { FBITS == 0 } {
      // Only the hidden bit survives. The retained lsb is the hidden bit itself, which is odd,
      // so any set guard bit rounds up to the next power of two.
      let guard = frac >> 63 != 0;
      return Self::Normal {
        sign,
        scale: if guard { scale + 1 } else { scale },
        fraction: BitBlock::ZERO,
      };
    }
    if const { FBITS >= 64 } {
      // Every input bit is kept; no rounding can occur.
      debug_assert!(!sticky);
      let mut fraction = BitBlock::ZERO;
      for j in 0..64 {
        if frac >> (63 - j) & 1 == 1 {
          fraction.set_bit(FBITS - 1 - j, true);
        }
      }
      return Self::Normal { sign, scale, fraction };
    }

    let dropped = 64 - FBITS;
    let mut kept = frac >> dropped;
    let guard = frac >> (dropped - 1) & 1 == 1;
    let sticky = sticky || frac & ((1 << (dropped - 1)) - 1) != 0;
    let odd = kept & 1 == 1;
    let mut scale = scale;
    if guard && (sticky || odd) {
      kept += 1;
      if kept >> FBITS != 0 {
        // 1.111…1 rounded up to 10.000…0: renormalize.
        kept = 0;
        scale += 1;
      }
    }
    Self::Normal { sign, scale, fraction: BitBlock::from_bits(kept) }
  }

  /// Decompose a nonzero magnitude: the scale is the index of the most significant set bit, the
  /// bits below it become the fraction, rounded into `FBITS` bits.
  fn from_magnitude(sign: bool, magnitude: u64) -> Self {
    debug_assert!(magnitude != 0);
    let scale = 63 - magnitude.leading_zeros();
    let frac = if scale == 0 { 0 } else { magnitude << (64 - scale) };
    Self::from_aligned_fraction(sign, scale as i32, frac, false)
  }

  /// Decompose a finite, nonzero `f64` from its IEEE bit pattern.
  fn from_finite_f64(num: f64) -> Self {
    const MANTISSA_DIGITS_EXPLICIT: u32 = f64::MANTISSA_DIGITS - 1; // 52
    const EXP_BIAS: i32 = f64::MAX_EXP - 1; // 1023

    let sign = num.is_sign_negative();
    let bits = num.abs().to_bits();
    let mantissa = bits & ((1 << MANTISSA_DIGITS_EXPLICIT) - 1);
    let raw_exponent = (bits >> MANTISSA_DIGITS_EXPLICIT) as i32;

    if raw_exponent != 0 {
      // A normal number: reinstate the implicit leading 1 as the hidden bit and left-align the
      // 52 explicit mantissa bits.
      let scale = raw_exponent - EXP_BIAS;
      Self::from_aligned_fraction(sign, scale, mantissa << (64 - MANTISSA_DIGITS_EXPLICIT), false)
    } else {
      // A subnormal: value = mantissa × 2^(1 - bias - 52), with no hidden bit. Normalize on the
      // mantissa's own leading set bit, which lands the scale well below -1022.
      let msb = 63 - mantissa.leading_zeros();
      let scale = msb as i32 + 1 - EXP_BIAS - MANTISSA_DIGITS_EXPLICIT as i32;
      let frac = if msb == 0 { 0 } else { mantissa << (64 - msb) };
      Self::from_aligned_fraction(sign, scale, frac, false)
    }
  }

  /// Reconstruct the value as an `f64`: `(-1)^sign × (1 + Σ fractionᵢ·2^-(i+1)) × 2^scale`,
  /// accumulated over the fraction bits from most to least significant with a halving weight.
  pub fn to_f64(&self) -> f64 {
    match self {
      Self::Zero => 0.0,
      Self::NaN => f64::NAN,
      Self::Inf { sign: true } => f64::NEG_INFINITY,
      Self::Inf { sign: false } => f64::INFINITY,
      Self::Normal { sign, scale, fraction } => {
        let mut significand = 1.0f64;
        let mut weight = 0.5f64;
        for i in (0..FBITS).rev() {
          if fraction.bit(i) {
            significand += weight;
          }
          weight *= 0.5;
          if weight == 0.0 {
            break;
          }
        }
        let magnitude = significand * exp2i(*scale);
        if *sign { -magnitude } else { magnitude }
      }
    }
  }

  /// As [`Self::to_f64`], narrowed.
  pub fn to_f32(&self) -> f32 {
    self.to_f64() as f32
  }
}

/// 2^scale as an `f64`, composed directly from the IEEE bit pattern, covering the subnormal
/// range and saturating to 0 and ∞ beyond it.
fn exp2i(scale: i32) -> f64 {
  if scale > f64::MAX_EXP - 1 {
    f64::INFINITY
  } else if scale >= f64::MIN_EXP - 1 {
    f64::from_bits(((scale + f64::MAX_EXP - 1) as u64) << (f64::MANTISSA_DIGITS - 1))
  } else if scale >= f64::MIN_EXP - f64::MANTISSA_DIGITS as i32 {
    f64::from_bits(1u64 << (scale - (f64::MIN_EXP - f64::MANTISSA_DIGITS as i32)))
  } else {
    0.0
  }
}

macro_rules! impl_from_signed {
  ($from:ty) => {
    impl<
      const FBITS: u32,
      W: Word,
      const FW: usize,
    > From<$from> for Triple<FBITS, W, FW> {
      fn from(value: $from) -> Self {
        if value == 0 {
          Self::Zero
        } else {
          Self::from_magnitude(value < 0, (value as i64).unsigned_abs())
        }
      }
    }
  }
}

macro_rules! impl_from_unsigned {
  ($from:ty) => {
    impl<
      const FBITS: u32,
      W: Word,
      const FW: usize,
    > From<$from> for Triple<FBITS, W, FW> {
      fn from(value: $from) -> Self {
        if value == 0 {
          Self::Zero
        } else {
          Self::from_magnitude(false, value as u64)
        }
      }
    }
  }
}

impl_from_signed!{i32}
impl_from_signed!{i64}
impl_from_unsigned!{u32}
impl_from_unsigned!{u64}

impl<
  const FBITS: u32,
  W: Word,
  const FW: usize,
> From<f64> for Triple<FBITS, W, FW> {
  fn from(value: f64) -> Self {
    use core::num::FpCategory;
    match value.classify() {
      FpCategory::Zero => Self::Zero,
      FpCategory::Infinite => Self::Inf { sign: value.is_sign_negative() },
      FpCategory::Nan => Self::NaN,
      FpCategory::Normal | FpCategory::Subnormal => Self::from_finite_f64(value),
    }
  }
}

impl<
  const FBITS: u32,
  W: Word,
  const FW: usize,
> From<f32> for Triple<FBITS, W, FW> {
  fn from(value: f32) -> Self {
    // f32 → f64 is lossless, so one decomposition serves both.
    Self::from(f64::from(value))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;

  type T23 = crate::TripleSingle;
  type T52 = crate::TripleDouble;

  #[test]
  fn six_and_a_half() {
    // 6.5 = +1.625 × 2²; .625 = 0b101 at the top of the fraction.
    assert_eq!(
      T23::from(6.5_f64),
      Triple::Normal { sign: false, scale: 2, fraction: BitBlock::from_bits(0b101 << 20) },
    );
    assert_eq!(T23::from(6.5_f64).to_f64(), 6.5);
    assert_eq!(T52::from(-6.5_f64).to_f64(), -6.5);
  }

  #[test]
  fn specials() {
    assert_eq!(T52::from(0.0_f64), Triple::Zero);
    assert_eq!(T52::from(-0.0_f64), Triple::Zero);
    assert_eq!(T52::from(f64::INFINITY), Triple::Inf { sign: false });
    assert_eq!(T52::from(f64::NEG_INFINITY), Triple::Inf { sign: true });
    assert_eq!(T52::from(f64::NAN), Triple::NaN);
    assert!(T52::from(f64::NAN).to_f64().is_nan());
  }

  #[test]
  fn integers() {
    assert_eq!(T52::from(0_i64), Triple::Zero);
    assert_eq!(T52::from(1_i64), Triple::Normal { sign: false, scale: 0, fraction: BitBlock::ZERO });
    // 10 = +1.25 × 2³; .25 = 0b010.
    assert_eq!(
      T52::from(10_i64),
      Triple::Normal { sign: false, scale: 3, fraction: BitBlock::from_bits(0b010 << 49) },
    );
    assert_eq!(T52::from(-10_i64).to_f64(), -10.0);
    assert_eq!(T52::from(u64::MAX).to_f64(), u64::MAX as f64);
    assert_eq!(T52::from(i64::MIN).to_f64(), i64::MIN as f64);
  }

  #[test]
  fn integer_rounding_renormalizes() {
    // 15 = 1.111 × 2³ rounds to two fraction bits as 10.00 × 2³ = 1.0 × 2⁴.
    assert_eq!(
      Triple::<2, u8, 1>::from(15_i64),
      Triple::Normal { sign: false, scale: 4, fraction: BitBlock::ZERO },
    );
    // 13 = 1.101 × 2³ is a tie against an even lsb: stays 1.10 × 2³ (= 12).
    assert_eq!(
      Triple::<2, u8, 1>::from(13_i64),
      Triple::Normal { sign: false, scale: 3, fraction: BitBlock::from_bits(0b10) },
    );
    // 14 = 1.11 × 2³ needs no rounding at all.
    assert_eq!(
      Triple::<2, u8, 1>::from(14_i64),
      Triple::Normal { sign: false, scale: 3, fraction: BitBlock::from_bits(0b11) },
    );
    // 9 = 1.001 × 2³ is a tie against an even lsb: stays 1.00 × 2³.
    assert_eq!(
      Triple::<2, u8, 1>::from(9_i64),
      Triple::Normal { sign: false, scale: 3, fraction: BitBlock::ZERO },
    );
  }

  #[test]
  fn subnormals_decompose() {
    let tiny = f64::from_bits(1); // 2^-1074, least subnormal
    assert_eq!(
      T52::from(tiny),
      Triple::Normal { sign: false, scale: -1074, fraction: BitBlock::ZERO },
    );
    assert_eq!(T52::from(tiny).to_f64(), tiny);
    let largest_subnormal = f64::from_bits((1 << 52) - 1);
    assert_eq!(T52::from(largest_subnormal).scale(), Some(-1023));
    assert_eq!(T52::from(largest_subnormal).to_f64(), largest_subnormal);
  }

  #[test]
  fn zero_fraction_width() {
    // With no fraction bits, values round to the nearest power of two, ties away from the
    // smaller (the hidden bit is odd).
    assert_eq!(Triple::<0, u8, 0>::from(5_i64).scale(), Some(2)); // 5 → 4
    assert_eq!(Triple::<0, u8, 0>::from(6_i64).scale(), Some(3)); // 6 → 8
    assert_eq!(Triple::<0, u8, 0>::from(7_i64).scale(), Some(3)); // 7 → 8
  }

  proptest!{
    #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES))]

    #[test]
    fn f64_roundtrips_through_t52(x: f64) {
      // 52 fraction bits hold any finite f64 exactly, subnormals included.
      let t = T52::from(x);
      if x.is_nan() {
        prop_assert!(t.to_f64().is_nan());
      } else if x == 0.0 {
        prop_assert_eq!(t.to_f64(), 0.0);
      } else {
        prop_assert_eq!(t.to_f64(), x);
      }
    }

    #[test]
    fn f32_roundtrips_through_t23(x: f32) {
      let t = T23::from(x);
      if x.is_nan() {
        prop_assert!(t.to_f32().is_nan());
      } else if x == 0.0 {
        prop_assert_eq!(t.to_f32(), 0.0);
      } else {
        prop_assert_eq!(t.to_f32(), x);
      }
    }

    #[test]
    fn i64_roundtrips(x: i64) {
      prop_assert_eq!(T52::from(x).to_f64(), x as f64);
    }

    #[test]
    fn near_all_ones_renormalization(scale_bump in 0u32..10) {
      // 2^k - 1 for large k has an all-ones prefix; rounding into few fraction bits must land
      // exactly on 2^k, via the wrap-and-bump-scale path.
      let k = 54 + scale_bump;
      let x = (1u64 << k.min(63)).wrapping_sub(1);
      let t = Triple::<8, u8, 1>::from(x);
      prop_assert_eq!(t.to_f64(), {
        // Round x to 9 significant bits by hand.
        let msb = 63 - x.leading_zeros();
        let shift = msb.saturating_sub(8);
        let q = (x >> shift) + (if shift > 0 && x >> (shift - 1) & 1 == 1 { 1 } else { 0 });
        q as f64 * exp2i(shift as i32)
      });
    }
  }
}
