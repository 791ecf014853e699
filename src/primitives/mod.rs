//! Primitive word operations
//!
//! This module holds the unsigned 64-bit mixing steps shared by the
//! BLAKE2b compression function and the Argon2 block permutation.
//!
//! Both constructions use the same add / xor / rotate skeleton with the
//! rotation amounts 32, 24, 16 and 63. They differ only in the addition:
//! BLAKE2b adds plainly and injects message words, Argon2 replaces the
//! addition with the `fBlaMka` multiply-add and takes no message input.
//! They are kept as two separate functions so neither pays for the other.

pub(crate) mod mix;
