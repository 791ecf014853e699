//! BLAKE2b hash function (RFC 7693 compression, eager buffer flush)
//!
//! - `core`: the incremental hashing state machine
//!   (`new` → `update`* → `finalize`) and one-shot helpers
//! - `computations`: the 12-round compression function
//! - `long`: Argon2's variable-length hash H′ (RFC 9106 §3.3)
//!
//! Unkeyed hashing only. Output length is 1..=64 bytes. A full input
//! buffer is compressed immediately, so messages that are a nonzero
//! multiple of 128 bytes do not hash like RFC 7693 BLAKE2b.

pub(crate) mod computations;
pub mod core;
pub mod long;

/// Size of one BLAKE2b input block in bytes.
pub const BLOCK_LEN: usize = 128;

/// Largest digest BLAKE2b can produce, in bytes.
pub const MAX_OUTPUT_LEN: usize = 64;

/// BLAKE2b initialization vector.
///
/// Identical to the SHA-512 initial hash values (FIPS 180-4 §5.3.5).
pub(crate) const IV: [u64; 8] = [
    0x6a09_e667_f3bc_c908,
    0xbb67_ae85_84ca_a73b,
    0x3c6e_f372_fe94_f82b,
    0xa54f_f53a_5f1d_36f1,
    0x510e_527f_ade6_82d1,
    0x9b05_688c_2b3e_6c1f,
    0x1f83_d9ab_fb41_bd6b,
    0x5be0_cd19_137e_2179,
];

/// Message word schedule.
///
/// Ten distinct permutations; rounds 10 and 11 reuse rows 0 and 1.
pub(crate) const SIGMA: [[usize; 16]; 12] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
    [14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
    [11, 8, 12, 0, 5, 2, 15, 13, 10, 14, 3, 6, 7, 1, 9, 4],
    [7, 9, 3, 1, 13, 12, 11, 14, 2, 6, 5, 10, 4, 0, 15, 8],
    [9, 0, 5, 7, 2, 4, 10, 15, 14, 1, 11, 12, 6, 8, 3, 13],
    [2, 12, 6, 10, 0, 11, 8, 3, 4, 13, 7, 5, 15, 14, 1, 9],
    [12, 5, 1, 15, 14, 13, 4, 10, 0, 7, 6, 3, 9, 2, 8, 11],
    [13, 11, 7, 14, 12, 1, 3, 9, 5, 0, 15, 4, 8, 6, 2, 10],
    [6, 15, 14, 9, 11, 3, 0, 8, 12, 2, 13, 7, 1, 4, 10, 5],
    [10, 2, 8, 4, 7, 6, 1, 5, 15, 11, 9, 14, 3, 12, 13, 0],
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
    [14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
];
