//! Block operations for Argon2.
//!
//! This module defines the fundamental 1024-byte block structure and the
//! block transform that mixes two predecessor blocks into a new one. The
//! transform is built from the BLAKE2b round function with the addition
//! replaced by the `fBlaMka` multiply-add.

use zeroize::Zeroize;

use crate::primitives::mix::blamka_g;

/// Number of 64-bit words in a block.
pub const BLOCK_WORDS: usize = 128;

/// Size of a block in bytes.
pub const BLOCK_SIZE: usize = BLOCK_WORDS * 8;

/// A 1024-byte memory block (128 × 64-bit words).
///
/// Blocks are the fundamental unit of memory in Argon2. The byte view is
/// the little-endian serialization of the words; it is produced on demand
/// by [`Block::to_bytes`] rather than by aliasing storage.
///
/// Blocks are 64-byte aligned, matching the alignment hosts are expected
/// to provide for the memory region, and are zeroed on drop.
#[derive(Debug, Clone)]
#[repr(C, align(64))]
pub struct Block(pub [u64; BLOCK_WORDS]);

impl Block {
    /// The all-zero block.
    pub const ZERO: Self = Self([0u64; BLOCK_WORDS]);

    /// Word view.
    pub fn as_words(&self) -> &[u64; BLOCK_WORDS] {
        &self.0
    }

    /// Builds a block from its little-endian byte serialization.
    pub fn from_bytes(bytes: &[u8; BLOCK_SIZE]) -> Self {
        let mut block = Self::ZERO;
        for (word, chunk) in block.0.iter_mut().zip(bytes.chunks_exact(8)) {
            let mut le = [0u8; 8];
            le.copy_from_slice(chunk);
            *word = u64::from_le_bytes(le);
        }
        block
    }

    /// Little-endian byte serialization.
    pub fn to_bytes(&self) -> [u8; BLOCK_SIZE] {
        let mut out = [0u8; BLOCK_SIZE];
        for (chunk, word) in out.chunks_exact_mut(8).zip(self.0.iter()) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        out
    }

    /// Low 32 bits of the first word.
    ///
    /// In Argon2d this value drives the choice of reference block for the
    /// block that follows.
    #[inline]
    pub(crate) fn pseudo_rand(&self) -> u32 {
        self.0[0] as u32
    }

    pub(crate) fn in_place_xor(&mut self, other: &Block) {
        self.0
            .iter_mut()
            .zip(other.0.iter())
            .for_each(|(a, b)| *a ^= b);
    }

    pub(crate) fn xor(&self, other: &Block) -> Block {
        let mut out = self.clone();
        out.in_place_xor(other);
        out
    }

    /// Block transform (RFC 9106 §3.5, with the version 1.3 overwrite rule).
    ///
    /// Takes `R = prev ⊕ reference`, permutes `R` row-wise then
    /// column-wise, and stores `T ⊕ P(R)` where `T` is `R`, or
    /// `R ⊕ self` when `with_xor` is set (every pass after the first).
    ///
    /// `R` is built by the caller so the fill loop only has to borrow the
    /// destination mutably.
    pub(crate) fn fill_from_xor(&mut self, mut r: Block, with_xor: bool) {
        let mut t = r.clone();
        if with_xor {
            t.in_place_xor(self);
        }

        // First pass: P on 8 groups of 16 consecutive words
        for i in 0..8 {
            let base = 16 * i;
            let mut v = [0u64; 16];
            v.copy_from_slice(&r.0[base..base + 16]);
            permute_p(&mut v);
            r.0[base..base + 16].copy_from_slice(&v);
        }

        // Second pass: P on 8 groups of word pairs taken at a stride of 16
        for i in 0..8 {
            let mut v = [0u64; 16];
            for (pair, slot) in v.chunks_exact_mut(2).enumerate() {
                let src = 2 * i + 16 * pair;
                slot[0] = r.0[src];
                slot[1] = r.0[src + 1];
            }

            permute_p(&mut v);

            for (pair, slot) in v.chunks_exact(2).enumerate() {
                let dst = 2 * i + 16 * pair;
                r.0[dst] = slot[0];
                r.0[dst + 1] = slot[1];
            }
        }

        t.in_place_xor(&r);
        self.0 = t.0;
    }
}

impl Zeroize for Block {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Drop for Block {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// P permutation: one round of the BLAKE2-like mixing.
///
/// Applies GB to a 4×4 matrix of 64-bit words, first along columns,
/// then along diagonals.
#[inline(always)]
fn permute_p(v: &mut [u64; 16]) {
    (v[0], v[4], v[8], v[12]) = blamka_g(v[0], v[4], v[8], v[12]);
    (v[1], v[5], v[9], v[13]) = blamka_g(v[1], v[5], v[9], v[13]);
    (v[2], v[6], v[10], v[14]) = blamka_g(v[2], v[6], v[10], v[14]);
    (v[3], v[7], v[11], v[15]) = blamka_g(v[3], v[7], v[11], v[15]);

    (v[0], v[5], v[10], v[15]) = blamka_g(v[0], v[5], v[10], v[15]);
    (v[1], v[6], v[11], v[12]) = blamka_g(v[1], v[6], v[11], v[12]);
    (v[2], v[7], v[8], v[13]) = blamka_g(v[2], v[7], v[8], v[13]);
    (v[3], v[4], v[9], v[14]) = blamka_g(v[3], v[4], v[9], v[14]);
}
