#![cfg_attr(not(test), no_std)]
//! This crate provides the arithmetic core shared by software implementations of alternative
//! number formats (posits, cfloats, fixed-points): a word-packed, fixed-width bit block with
//! bit-exact register semantics, the classic arithmetic kernels over it (ripple add/subtract,
//! shift-and-add multiplication, restoring division, round-to-nearest-even truncation), and a
//! normalized `(sign, scale, significand)` triple in which generic, correctly rounded
//! add/subtract/multiply/divide is implemented once and reused by every concrete encoding.
//!
//! # Introduction
//!
//! A number system implementation needs two things below its encode/decode layer: raw-bit
//! storage of an arbitrary compile-time width, and arithmetic over significands that is exact
//! until the final rounding step. Both live here, and nothing else does: this crate knows
//! nothing about regimes, exponent fields, or any particular wire layout.
//!
//! # Usage
//!
//! ```
//! use blockbits::{BitBlock, TripleDouble, multiply_unsigned};
//!
//! // A 20-bit block backed by u8 words (3 of them; the layout is checked at compile time).
//! let a = BitBlock::<20, u8, 3>::from_bits(0b1010_0011);
//! let b = BitBlock::<20, u8, 3>::from_bits(0b0000_1101);
//! let product: BitBlock<40, u8, 5> = multiply_unsigned(&a, &b);
//! assert_eq!(product.to_u64().unwrap(), 0b1010_0011 * 0b0000_1101);
//!
//! // A normalized triple: 6.5 = +1.625 × 2², correctly rounded arithmetic built in.
//! let x = TripleDouble::from(6.5_f64);
//! let y = TripleDouble::from(2.0_f64);
//! assert_eq!((x + y).to_f64(), 8.5);
//! ```
//!
//! # Design notes
//!
//! Widths are fixed at compile time and there is no heap allocation anywhere; every type is a
//! plain value. Because stable Rust cannot derive an array length from a bit count in a type,
//! each block names its backing word count explicitly (`BitBlock<20, u8, 3>`) and the layout is
//! validated by a compile-time assertion. Kernels that produce a wider result (the sum of two
//! `n`-bit numbers has `n+1` bits, their product `2n`) take the result width as a const
//! parameter under the same compile-time checks.

mod block;
mod error;
mod kernel;
mod triple;
mod word;

pub use block::{BitBlock, Ones, ParseBitBlockError, less_than_signed, words_for};
pub use error::Error;
pub use kernel::{
  add_sign_magnitude, add_unsigned, copy_into, copy_slice_into, divide_with_fraction,
  integer_divide_unsigned, multiply_unsigned, ones_complement, round, subtract_unsigned,
  truncate, twos_complement,
};
pub use triple::{Triple, module_add, module_divide, module_multiply, module_subtract};
pub use word::Word;

/// A triple with the fraction precision of an IEEE 754 binary32 (23 fraction bits).
pub type TripleSingle = Triple<23, u32, 1>;

/// A triple with the fraction precision of an IEEE 754 binary64 (52 fraction bits).
pub type TripleDouble = Triple<52, u64, 1>;

/// Number of proptest cases per property; bumped up in release where we can afford it.
#[cfg(test)]
pub(crate) const PROPTEST_CASES: u32 = if cfg!(debug_assertions) { 0x200 } else { 0x2000 };
