use super::*;

use core::fmt;

impl<
  const FBITS: u32,
  W: Word,
  const FW: usize,
> fmt::Display for Triple<FBITS, W, FW> {
  /// The triple form: `(sign, scale, fraction)`, e.g. `(-, 3, 0b1010…)`.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Zero => write!(f, "(+, 0, 0b{})", BitBlock::<FBITS, W, FW>::ZERO),
      Self::NaN => write!(f, "nan"),
      Self::Inf { sign } => write!(f, "({}inf)", if *sign { "-" } else { "+" }),
      Self::Normal { sign, scale, fraction } => {
        write!(f, "({}, {}, 0b{})", if *sign { "-" } else { "+" }, scale, fraction)
      }
    }
  }
}
