use super::*;

use core::cmp::Ordering;

impl<
  const FBITS: u32,
  W: Word,
  const FW: usize,
> PartialOrd for Triple<FBITS, W, FW> {
  /// The sign-magnitude order: infinities are the most extreme values on their side, zero sits
  /// between the signs, and two same-signed normals compare by scale, then fraction, with the
  /// whole comparison *flipped* when both are negative (a larger scale makes a negative number
  /// smaller). Any comparison involving NaN is unordered.
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    use Triple::*;
    let ord = match (self, other) {
      (NaN, _) | (_, NaN) => return None,

      (Inf { sign: a }, Inf { sign: b }) => b.cmp(a), // true < false: -∞ < +∞
      (Inf { sign }, _) => if *sign { Ordering::Less } else { Ordering::Greater },
      (_, Inf { sign }) => if *sign { Ordering::Greater } else { Ordering::Less },

      (Zero, Zero) => Ordering::Equal,
      (Zero, Normal { sign, .. }) => if *sign { Ordering::Greater } else { Ordering::Less },
      (Normal { sign, .. }, Zero) => if *sign { Ordering::Less } else { Ordering::Greater },

      (
        Normal { sign: sign_a, scale: scale_a, fraction: frac_a },
        Normal { sign: sign_b, scale: scale_b, fraction: frac_b },
      ) => match (sign_a, sign_b) {
        (false, true) => Ordering::Greater,
        (true, false) => Ordering::Less,
        (false, false) => (scale_a, frac_a).cmp(&(scale_b, frac_b)),
        (true, true) => (scale_b, frac_b).cmp(&(scale_a, frac_a)),
      },
    };
    Some(ord)
  }
}
