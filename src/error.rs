use thiserror::Error;

/// The error conditions surfaced by the fallible block operations.
///
/// Each variant is a distinct, local contract violation detected at the point of the call;
/// none is used for ordinary control flow. Operations whose result width is defined to always
/// be large enough (widening add/subtract, multiply) cannot fail and return plain values.
#[derive(Debug, Clone, Copy)]
#[derive(PartialEq, Eq)]
#[derive(Error)]
pub enum Error {
  /// A bit index exceeds the block's declared width.
  #[error("bit index {index} out of range for a {width}-bit block")]
  OutOfRange { index: u32, width: u32 },

  /// Conversion to a native integer would lose set bits above the native width.
  #[error("block value does not fit in a u64")]
  Overflow,

  /// The divisor block is entirely zero.
  #[error("division by zero")]
  DivideByZero,

  /// A rounding request would discard every bit of the source.
  #[error("rounding would discard all {width} source bits")]
  RoundOffAllBits { width: u32 },

  /// A rounding request would silently discard a *set* bit above the rounding window. This
  /// signals a pre-alignment bug in the caller, not ordinary precision loss, and must not be
  /// downgraded to an approximation.
  #[error("rounding would cut off a set bit above the rounding window (position {position})")]
  CutOffLeadingBit { position: u32 },

  /// A slice-copy range exceeds the source or target block bounds.
  #[error("slice bounds exceed the source or target block width")]
  IterationBoundTooLarge,
}
