//! Argon2d password hashing (RFC 9106) with a fixed parameter set.
//!
//! Argon2d is the data-dependent member of the Argon2 family: the block
//! mixed into each new block is chosen from the contents of the block
//! just written. This maximizes resistance to time-memory trade-offs at
//! the cost of side-channel resistance, so it suits settings where the
//! attacker cannot observe the machine doing the hashing.
//!
//! # Configuration
//!
//! One lane, a 32-byte tag, 64 MiB of memory, 4 passes, version 0x13.
//! See [`params`] for the constants. Nothing is configurable at runtime.
//!
//! # Algorithm Overview
//!
//! 1. **Pre-hash**: H0 = BLAKE2b-512 over the parameter header and every
//!    length-prefixed input.
//! 2. **Seeding**: blocks 0 and 1 are `H′¹⁰²⁴(H0 || i || 0)`.
//! 3. **Filling**: every other block, pass after pass, is the block
//!    transform of its predecessor and a data-dependent reference block.
//! 4. **Finalization**: the tag is `H′³²` of the last block.
//!
//! # Memory
//!
//! The 64 MiB array is supplied by the caller as a slice of [`Block`]s
//! and borrowed through [`Memory`]. It is wiped once the tag has been
//! extracted, whatever the entry point.

pub(crate) mod block;
pub(crate) mod boundary;
pub mod core;
pub mod error;
pub(crate) mod memory;
pub mod packed;
pub mod params;
pub(crate) mod reference;

pub use self::block::{BLOCK_SIZE, BLOCK_WORDS, Block};
#[cfg(feature = "alloc")]
pub use self::core::hash_password;
pub use self::core::{Tag, argon2d, argon2d_packed};
pub use self::error::{Argon2Error, ErrorKind, InputField, InvalidArgument, MalformedInput, Result};
pub use self::memory::Memory;
pub use self::packed::PackedRecord;
pub use self::params::{Argon2Params, ParamField};
pub use self::reference::index_alpha;
