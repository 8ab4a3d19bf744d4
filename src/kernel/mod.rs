//! The arithmetic kernels: free functions over [`BitBlock`](crate::BitBlock) implementing
//! widening add/subtract, sign-magnitude add, long multiplication, restoring division, round to
//! nearest even, and the copy/slice/complement helpers that move bits between blocks of
//! different widths.
//!
//! None of these hold state: each is a pure function from its inputs to a fresh value (the
//! in-place accumulator forms live on `BitBlock` itself). Result widths that are not forced by
//! the operation (and those that are, like `N+1` for a sum or `2N` for a product) are named by
//! the caller as const parameters and validated with compile-time asserts, mirroring how the
//! widths are spelled at every call site anyway.

mod addsub;
mod copy;
mod div;
mod mul;
mod round;

pub use addsub::{add_sign_magnitude, add_unsigned, ones_complement, subtract_unsigned, twos_complement};
pub use copy::{copy_into, copy_slice_into};
pub use div::{divide_with_fraction, integer_divide_unsigned};
pub use mul::multiply_unsigned;
pub use round::{round, truncate};
