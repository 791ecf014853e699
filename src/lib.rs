//! Freestanding Argon2d with a fixed parameter set
//!
//! This crate computes Argon2d (RFC 9106) tags for exactly one
//! configuration: one lane, a 32-byte tag, 64 MiB of memory, 4 passes,
//! version 0x13. It is meant for hosts that own their memory and cannot
//! offer an allocator or a standard library, such as a wasm32 module
//! whose embedder hands it a pre-sized region.
//!
//! The focus is on **predictability and auditability**: every parameter
//! is a compile-time constant, the working memory is supplied and owned
//! by the caller, and no state survives a call.
//!
//! # Module overview
//!
//! - `hash`
//!   BLAKE2b as an incremental state machine that flushes a full buffer
//!   immediately, plus Argon2's variable-length hash H′ built on top of it.
//!
//! - `primitives`
//!   The 64-bit mixing steps shared by the BLAKE2b compression function
//!   and the Argon2 block permutation.
//!
//! - `derivation`
//!   The Argon2d engine: compiled-in parameters, the block transform,
//!   reference-block selection, the fill schedule, and the two entry
//!   points (discrete arguments and packed record).
//!
//! - `ffi` (feature `ffi`)
//!   C-ABI wrappers over both entry points for hosts that talk to the
//!   module through raw pointers.
//!
//! # Features
//!
//! - `alloc` (default): [`derivation::argon2d::Memory::allocate`],
//!   [`hash_password`] and [`PackedRecord::to_vec`].
//! - `std`: `std` support in the error and logging crates.
//! - `ffi`: the raw entry points.
//!
//! # Logging
//!
//! Entry points emit `tracing` events: `debug` when a run starts,
//! completes or is rejected, `trace` after each pass. No subscriber is
//! installed here, and inputs are never logged.
//!
//! # Design goals
//!
//! - No heap allocations in the engine
//! - No global state; one caller-owned memory region per computation
//! - All validation before the first block is written
//! - Working memory and intermediate digests wiped after use

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod derivation;
#[cfg(feature = "ffi")]
pub mod ffi;
pub mod hash;
pub(crate) mod primitives;

#[cfg(feature = "alloc")]
pub use derivation::argon2d::hash_password;
pub use derivation::argon2d::{
    Argon2Error, Block, ErrorKind, Memory, PackedRecord, Result, Tag, argon2d, argon2d_packed,
    index_alpha,
};
pub use hash::{Blake2b, blake2b, blake2b_long};
