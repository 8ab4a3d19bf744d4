use super::*;

use crate::kernel::{add_unsigned, copy_into, divide_with_fraction, multiply_unsigned, round, twos_complement};

// The generic arithmetic: two same-width triples in, one wider triple out, exact until the
// caller rounds the result back down with [`Triple::round_to`]. The working widths cannot be
// derived from `F` on stable Rust, so the caller names them; the const asserts pin them to the
// widths the algorithms assume.

impl<
  const FBITS: u32,
  W: Word,
  const FW: usize,
> Triple<FBITS, W, FW> {
  /// The fraction re-aligned into an `A`-bit working register for addition.
  ///
  /// The hidden bit is made explicit at position `FBITS + shift` and the fraction bits follow
  /// below it. Bit 0 is reserved as the *sticky* bit: it absorbs (ORs) every bit that the
  /// alignment pushed at or below it, so no shifted-out information is lost to the rounding
  /// decision. A `shift` so negative that even the hidden bit falls to or below position 0
  /// compresses the entire operand into the sticky bit.
  fn nshift<const A: u32, const AW: usize>(
    fraction: &BitBlock<FBITS, W, FW>,
    shift: i32,
  ) -> BitBlock<A, W, AW> {
    let mut number = BitBlock::ZERO;
    let hpos = FBITS as i32 + shift;
    debug_assert!(hpos < A as i32, "aligned significand must fit the working width");
    if hpos >= A as i32 {
      return number;
    }
    if hpos <= 0 {
      number.set_bit(0, true);
      return number;
    }
    number.set_bit(hpos as u32, true);
    let mut npos = hpos - 1;
    let mut fpos = FBITS as i32 - 1;
    while npos > 0 && fpos >= 0 {
      number.set_bit(npos as u32, fraction.bit(fpos as u32));
      npos -= 1;
      fpos -= 1;
    }
    // Fraction bit fpos lands at fpos + shift; everything at or below position 0 is lost and
    // folds into the sticky bit.
    let lost = (1 - shift).clamp(0, FBITS as i32) as u32;
    number.set_bit(0, fraction.any_set_below(lost));
    number
  }

  /// The significand as a fixed-point number with the hidden bit explicit: `1.fraction` in
  /// `FH = FBITS + 1` bits. This is the operand form the multiply and divide kernels want.
  fn fixed_point<const FH: u32, const FHW: usize>(
    fraction: &BitBlock<FBITS, W, FW>,
  ) -> BitBlock<FH, W, FHW> {
    const { assert!(FH == FBITS + 1, "the fixed-point form adds exactly the hidden bit") }
    let mut fixed = BitBlock::ZERO;
    copy_into(fraction, 0, &mut fixed);
    fixed.set_bit(FBITS, true);
    fixed
  }

  /// Round to `TGT` fraction bits, nearest, ties to even.
  ///
  /// Widening copies the fraction top-aligned and is exact. Narrowing drops the low
  /// `FBITS - TGT` bits through the [`round`] kernel; when the round-up wraps an all-ones
  /// fraction past the hidden-bit boundary (`1.111…1` becoming `10.000…0`), the significand is
  /// renormalized on the spot: fraction zero, scale up by one. This renormalization is part of
  /// the contract, not an optional nicety: without it the wrapped fraction would silently
  /// read as `1.0` at the *old* scale, off by a factor of two.
  pub fn round_to<const TGT: u32, const TW: usize>(&self) -> Triple<TGT, W, TW> {
    match self {
      Self::Zero => Triple::Zero,
      Self::NaN => Triple::NaN,
      Self::Inf { sign } => Triple::Inf { sign: *sign },
      Self::Normal { sign, scale, fraction } => {
        if const { TGT >= FBITS } {
          let mut wide = BitBlock::ZERO;
          for j in 0..FBITS {
            wide.set_bit(TGT - 1 - j, fraction.bit(FBITS - 1 - j));
          }
          Triple::Normal { sign: *sign, scale: *scale, fraction: wide }
        } else if const { TGT == 0 } {
          // Only the hidden bit survives, and it is odd: any set guard bit rounds up to the
          // next power of two.
          let guard = fraction.bit(FBITS - 1);
          Triple::Normal { sign: *sign, scale: *scale + guard as i32, fraction: BitBlock::ZERO }
        } else {
          let Ok((bits, carry)) = round::<TGT, FBITS, W, TW, FW>(fraction, FBITS - TGT) else {
            // The window spans the whole fraction; neither rounding error can occur.
            unreachable!()
          };
          Triple::Normal { sign: *sign, scale: *scale + carry as i32, fraction: bits }
        }
      }
    }
  }
}

/// Add two triples into an `A1 = F + 5` bit result, exactly.
///
/// The working width `A = F + 4` gives the aligned significands three guard positions below
/// the smaller operand plus a sticky bit, and one headroom bit above for the same-sign carry;
/// the algorithms below assume exactly that layout, hence the pinned widths.
///
/// Sign-magnitude addition by two's complement: align both fractions by the scale difference,
/// complement the subtrahend when the signs differ (after swapping so the larger magnitude is
/// on the left, which keeps the sum non-negative and the result sign that of the larger
/// operand), ripple-add, then renormalize on the leading one.
pub fn module_add<
  const F: u32, const A: u32, const A1: u32,
  W: Word,
  const FW: usize, const AW: usize, const A1W: usize,
>(
  lhs: &Triple<F, W, FW>,
  rhs: &Triple<F, W, FW>,
) -> Triple<A1, W, A1W> {
  const { assert!(A == F + 4, "the adder working width is F guard-extended by 4") }
  const { assert!(A1 == A + 1, "the adder result carries one extra carry bit") }
  use Triple::*;

  let (lsign, lscale, lfrac, rsign, rscale, rfrac) = match (lhs, rhs) {
    (NaN, _) | (_, NaN) => return NaN,
    (Inf { sign: a }, Inf { sign: b }) => {
      // Opposite infinities cancel into nonsense, not a number.
      return if a == b { Inf { sign: *a } } else { NaN };
    }
    (Inf { sign }, _) | (_, Inf { sign }) => return Inf { sign: *sign },
    (Zero, Zero) => return Zero,
    (Zero, x) | (x, Zero) => return x.round_to::<A1, A1W>(),
    (
      Normal { sign: lsign, scale: lscale, fraction: lfrac },
      Normal { sign: rsign, scale: rscale, fraction: rfrac },
    ) => (*lsign, *lscale, lfrac, *rsign, *rscale, rfrac),
  };

  let scale_of_result = lscale.max(rscale);
  let mut r1: BitBlock<A, W, AW> = Triple::nshift(lfrac, lscale - scale_of_result + 3);
  let mut r2: BitBlock<A, W, AW> = Triple::nshift(rfrac, rscale - scale_of_result + 3);
  let (mut r1_sign, mut r2_sign) = (lsign, rsign);
  let signs_differ = r1_sign != r2_sign;

  // With sign-magnitude operands it pays to put the larger magnitude in r1: the difference is
  // then non-negative and the result simply takes r1's sign.
  if signs_differ && (lscale, lfrac) < (rscale, rfrac) {
    core::mem::swap(&mut r1, &mut r2);
    core::mem::swap(&mut r1_sign, &mut r2_sign);
  }
  if signs_differ {
    r2 = twos_complement(&r2);
  }

  let (sum, carry) = add_unsigned::<A, A1, W, AW, A1W>(&r1, &r2);
  log::trace!("module_add: scale {scale_of_result} carry {carry} sum {sum}");

  let mut shift = 0i32;
  if carry {
    if r1_sign == r2_sign {
      // The sum outgrew r1: its hidden bit sits one place up, in the carry position.
      shift = -1;
    } else {
      // The carry is the two's complement wrap-around; the magnitude may have *lost* leading
      // places to cancellation instead. Find the hidden bit below it.
      let mut i = A as i32 - 1;
      while i >= 0 && !sum.bit(i as u32) {
        shift += 1;
        i -= 1;
      }
    }
  }

  if shift >= A as i32 {
    // Cancellation wiped every bit: an exact zero.
    return Zero;
  }
  // The hidden bit sits at A-1-shift. Push it just out of the top: what remains, msb-aligned,
  // is the result fraction.
  let fraction = sum << (shift + 2) as u32;
  Normal { sign: r1_sign, scale: scale_of_result - shift, fraction }
}

/// Subtract by adding the negated right operand; see [`module_add`].
pub fn module_subtract<
  const F: u32, const A: u32, const A1: u32,
  W: Word,
  const FW: usize, const AW: usize, const A1W: usize,
>(
  lhs: &Triple<F, W, FW>,
  rhs: &Triple<F, W, FW>,
) -> Triple<A1, W, A1W> {
  module_add::<F, A, A1, W, FW, AW, A1W>(lhs, &-*rhs)
}

/// Multiply two triples into an `M = 2(F+1)` bit result, exactly.
///
/// The signs xor and the scales add; the significands, hidden bits made explicit, go through
/// the long multiplication kernel. The product of two values in `[1, 2)` lies in
/// `[1, 4)`, so at most one renormalization step is needed.
pub fn module_multiply<
  const F: u32, const FH: u32, const M: u32,
  W: Word,
  const FW: usize, const FHW: usize, const MW: usize,
>(
  lhs: &Triple<F, W, FW>,
  rhs: &Triple<F, W, FW>,
) -> Triple<M, W, MW> {
  const { assert!(FH == F + 1, "the fixed-point operands carry the hidden bit") }
  const { assert!(M == 2 * FH, "the product of two FH-bit significands needs 2·FH bits") }
  use Triple::*;

  if lhs.is_nan() || rhs.is_nan() {
    return NaN;
  }
  if (lhs.is_inf() && rhs.is_zero()) || (lhs.is_zero() && rhs.is_inf()) {
    return NaN;
  }
  let sign = lhs.sign() != rhs.sign();
  if lhs.is_inf() || rhs.is_inf() {
    return Inf { sign };
  }
  if lhs.is_zero() || rhs.is_zero() {
    return Zero;
  }
  let (
    Normal { scale: lscale, fraction: lfrac, .. },
    Normal { scale: rscale, fraction: rfrac, .. },
  ) = (lhs, rhs) else { unreachable!() };

  let mut scale = lscale + rscale;
  if const { F == 0 } {
    // Pure sign-and-scale values: 1.0 × 1.0, known a priori.
    return Normal { sign, scale, fraction: BitBlock::ZERO };
  }
  let r1: BitBlock<FH, W, FHW> = Triple::fixed_point(lfrac);
  let r2: BitBlock<FH, W, FHW> = Triple::fixed_point(rfrac);
  let mut fraction: BitBlock<M, W, MW> = multiply_unsigned(&r1, &r2);
  log::trace!("module_multiply: scale {scale} product {fraction}");
  // Shift the hidden bit (and the spare integer bit) out of the top.
  let shift = if fraction.bit(M - 1) {
    scale += 1;
    1
  } else {
    2
  };
  fraction <<= shift;
  Normal { sign, scale, fraction }
}

/// Divide two triples into a `D`-bit result with `D - (F+1)` fraction bits of quotient.
///
/// The signs xor, the scales subtract, and the significands go through the fraction-producing
/// restoring division. `D >= 2(F+1) + 3` guarantees enough quotient bits that a subsequent
/// round to `F` bits is correct: a nonterminating quotient of two `F+1`-bit significands
/// cannot sit closer than 2^-(2F+2) to a rounding boundary.
pub fn module_divide<
  const F: u32, const FH: u32, const D: u32,
  W: Word,
  const FW: usize, const FHW: usize, const DW: usize,
>(
  lhs: &Triple<F, W, FW>,
  rhs: &Triple<F, W, FW>,
) -> Triple<D, W, DW> {
  const { assert!(FH == F + 1, "the fixed-point operands carry the hidden bit") }
  const { assert!(D >= 2 * FH + 3, "the divider output must leave room to round correctly") }
  use Triple::*;

  if lhs.is_nan() || rhs.is_nan() {
    return NaN;
  }
  if (lhs.is_zero() && rhs.is_zero()) || (lhs.is_inf() && rhs.is_inf()) {
    return NaN;
  }
  let sign = lhs.sign() != rhs.sign();
  if lhs.is_inf() || rhs.is_zero() {
    return Inf { sign };
  }
  if lhs.is_zero() || rhs.is_inf() {
    return Zero;
  }
  let (
    Normal { scale: lscale, fraction: lfrac, .. },
    Normal { scale: rscale, fraction: rfrac, .. },
  ) = (lhs, rhs) else { unreachable!() };

  let mut scale = lscale - rscale;
  if const { F == 0 } {
    return Normal { sign, scale, fraction: BitBlock::ZERO };
  }
  let r1: BitBlock<FH, W, FHW> = Triple::fixed_point(lfrac);
  let r2: BitBlock<FH, W, FHW> = Triple::fixed_point(rfrac);
  let Ok(mut fraction) = divide_with_fraction::<FH, D, W, FHW, DW>(&r1, &r2) else {
    // The divisor carries an explicit hidden bit, so it is never zero.
    unreachable!()
  };
  log::trace!("module_divide: scale {scale} quotient {fraction}");
  // The ratio of two values in [1, 2) lies in (1/2, 2): the leading bit of the quotient is at
  // the radix point D-FH or one place below it.
  let mut msb = D - FH;
  let mut shift = FH;
  while !fraction.bit(msb) {
    msb -= 1;
    shift += 1;
  }
  fraction <<= shift;
  scale -= (shift - FH) as i32;
  Normal { sign, scale, fraction }
}

/// Instantiate the arithmetic operators for one concrete triple width, chaining the module
/// entry points with [`Triple::round_to`] at the working widths the algorithms require. Stable
/// Rust cannot spell `F + 4` in a generic type, so each exported alias gets its own
/// instantiation.
macro_rules! impl_alias_arith {
  ($t:ty, $w:ty,
    $f:literal / $fw:literal,
    add: $a:literal / $aw:literal, $a1:literal / $a1w:literal,
    mul: $fh:literal / $fhw:literal, $m:literal / $mw:literal,
    div: $d:literal / $dw:literal
  ) => {
    impl core::ops::Add for $t {
      type Output = Self;
      fn add(self, rhs: Self) -> Self {
        module_add::<$f, $a, $a1, $w, $fw, $aw, $a1w>(&self, &rhs).round_to::<$f, $fw>()
      }
    }

    impl core::ops::Sub for $t {
      type Output = Self;
      fn sub(self, rhs: Self) -> Self {
        module_subtract::<$f, $a, $a1, $w, $fw, $aw, $a1w>(&self, &rhs).round_to::<$f, $fw>()
      }
    }

    impl core::ops::Mul for $t {
      type Output = Self;
      fn mul(self, rhs: Self) -> Self {
        module_multiply::<$f, $fh, $m, $w, $fw, $fhw, $mw>(&self, &rhs).round_to::<$f, $fw>()
      }
    }

    impl core::ops::Div for $t {
      type Output = Self;
      fn div(self, rhs: Self) -> Self {
        module_divide::<$f, $fh, $d, $w, $fw, $fhw, $dw>(&self, &rhs).round_to::<$f, $fw>()
      }
    }
  }
}

impl_alias_arith! { crate::TripleSingle, u32,
  23 / 1,
  add: 27 / 1, 28 / 1,
  mul: 24 / 1, 48 / 2,
  div: 76 / 3
}

impl_alias_arith! { crate::TripleDouble, u64,
  52 / 1,
  add: 56 / 1, 57 / 1,
  mul: 53 / 1, 106 / 2,
  div: 163 / 3
}
