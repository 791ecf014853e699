//! Password-based key derivation.

pub mod argon2d;

pub use argon2d::{Argon2Error, Memory, PackedRecord, Tag, argon2d, argon2d_packed};
