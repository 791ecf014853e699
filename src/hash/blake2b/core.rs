//! BLAKE2b incremental hashing
//!
//! This module implements the BLAKE2b state machine defined in RFC 7693:
//!
//! ```text
//! new(output_len) → update(bytes)* → finalize(out)
//! ```
//!
//! Input is accumulated in a 128-byte buffer. The buffer is compressed as
//! soon as it becomes full, and `finalize` always compresses one more,
//! zero-padded block with the final-block flag set. For messages whose
//! length is a nonzero multiple of 128 bytes that last block is empty, so
//! the digest differs from RFC 7693 there; everywhere else it matches.
//!
//! The state is wiped when it is dropped, including after `finalize`.

use zeroize::Zeroize;

use super::computations::compress;
use super::{BLOCK_LEN, IV, MAX_OUTPUT_LEN};

/// BLAKE2b hashing state.
///
/// A value of this type is owned by exactly one in-flight hash
/// computation and is consumed by [`Blake2b::finalize`].
#[derive(Clone)]
pub struct Blake2b {
    /// Chaining state.
    h: [u64; 8],
    /// Bytes absorbed so far.
    counter: u64,
    buffer: [u8; BLOCK_LEN],
    /// Fill cursor into `buffer`, always in `0..BLOCK_LEN` between calls.
    buffer_len: usize,
    output_len: usize,
}

impl Blake2b {
    /// Creates an unkeyed BLAKE2b state producing `output_len` bytes.
    ///
    /// # Panics
    /// Panics if `output_len` is not in `1..=64`.
    pub fn new(output_len: usize) -> Self {
        assert!(
            (1..=MAX_OUTPUT_LEN).contains(&output_len),
            "BLAKE2b output length must be between 1 and 64 bytes"
        );

        let mut h = IV;
        h[0] ^= 0x0101_0000 | output_len as u64;

        Self {
            h,
            counter: 0,
            buffer: [0u8; BLOCK_LEN],
            buffer_len: 0,
            output_len,
        }
    }

    /// Digest length this state was created for.
    pub fn output_len(&self) -> usize {
        self.output_len
    }

    /// Absorbs `input` into the state.
    pub fn update(&mut self, mut input: &[u8]) {
        while !input.is_empty() {
            let take = (BLOCK_LEN - self.buffer_len).min(input.len());
            self.buffer[self.buffer_len..self.buffer_len + take].copy_from_slice(&input[..take]);

            self.buffer_len += take;
            self.counter = self.counter.wrapping_add(take as u64);
            input = &input[take..];

            if self.buffer_len == BLOCK_LEN {
                compress(&mut self.h, &self.buffer, self.counter, false);
                self.buffer_len = 0;
            }
        }
    }

    /// Finishes the computation and writes the digest to `out`.
    ///
    /// Exactly [`Blake2b::output_len`] bytes are written to the front of
    /// `out`.
    ///
    /// # Panics
    /// Panics if `out` is shorter than the output length.
    pub fn finalize(mut self, out: &mut [u8]) {
        self.buffer[self.buffer_len..].fill(0);
        compress(&mut self.h, &self.buffer, self.counter, true);

        let mut digest = [0u8; MAX_OUTPUT_LEN];
        for (chunk, word) in digest.chunks_exact_mut(8).zip(self.h.iter()) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }

        out[..self.output_len].copy_from_slice(&digest[..self.output_len]);
        digest.zeroize();
    }

    /// Hashes several discontiguous byte ranges as one message.
    ///
    /// The digest length is `dest.len()`; the parts are absorbed in order
    /// through a single `new`/`update`/`finalize` cycle, so no concatenated
    /// copy of the message is ever built.
    ///
    /// # Panics
    /// Panics if `dest.len()` is not in `1..=64`.
    pub fn hash(dest: &mut [u8], parts: &[&[u8]]) {
        let mut state = Self::new(dest.len());
        for part in parts {
            state.update(part);
        }
        state.finalize(dest);
    }
}

impl Drop for Blake2b {
    fn drop(&mut self) {
        self.h.zeroize();
        self.buffer.zeroize();
        self.counter.zeroize();
        self.buffer_len.zeroize();
    }
}

/// Computes the 64-byte BLAKE2b digest of `input`.
pub fn blake2b(input: &[u8]) -> [u8; MAX_OUTPUT_LEN] {
    let mut out = [0u8; MAX_OUTPUT_LEN];
    Blake2b::hash(&mut out, &[input]);
    out
}
