//! Hash algorithms exposed by the crate.
//!
//! Currently includes BLAKE2b (RFC 7693) and the Argon2 variable-length
//! hash H′ built on top of it.

pub mod blake2b;

/// Re-export of the BLAKE2b state machine and convenience functions.
pub use blake2b::core::{Blake2b, blake2b};
pub use blake2b::long::blake2b_long;
