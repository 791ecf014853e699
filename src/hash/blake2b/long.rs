//! Variable-length hash H′ (RFC 9106 §3.3).
//!
//! H′ extends BLAKE2b to arbitrary output lengths:
//!
//! ```text
//! T ≤ 64:  H′(T, M) = BLAKE2b-T(LE32(T) || M)
//!
//! T > 64:  V1 = BLAKE2b-64(LE32(T) || M)
//!          Vi = BLAKE2b-64(V(i-1))            while more than 64 bytes remain
//!          H′ = V1[..32] || V2[..32] || ... || BLAKE2b-rem(Vr)
//! ```
//!
//! Every intermediate digest is a full 64 bytes, but only its first half
//! is emitted; the final chunk is a digest of exactly the remaining length.

use zeroize::Zeroize;

use super::MAX_OUTPUT_LEN;
use super::core::Blake2b;

/// Fills `dest` with H′ of the concatenation of `parts`.
///
/// The requested length is `dest.len()` and is itself hashed as a 4-byte
/// little-endian prefix, so outputs of different lengths are unrelated.
///
/// # Panics
/// Panics if `dest` is empty or longer than `u32::MAX` bytes.
pub fn blake2b_long(dest: &mut [u8], parts: &[&[u8]]) {
    assert!(
        !dest.is_empty() && dest.len() <= u32::MAX as usize,
        "H′ output length must be between 1 and 2^32 - 1 bytes"
    );
    let length_prefix = (dest.len() as u32).to_le_bytes();

    if dest.len() <= MAX_OUTPUT_LEN {
        let mut state = Blake2b::new(dest.len());
        state.update(&length_prefix);
        for part in parts {
            state.update(part);
        }
        state.finalize(dest);
        return;
    }

    let mut v = [0u8; MAX_OUTPUT_LEN];
    let mut state = Blake2b::new(MAX_OUTPUT_LEN);
    state.update(&length_prefix);
    for part in parts {
        state.update(part);
    }
    state.finalize(&mut v);

    let mut out = dest;
    loop {
        let (head, rest) = out.split_at_mut(MAX_OUTPUT_LEN / 2);
        head.copy_from_slice(&v[..MAX_OUTPUT_LEN / 2]);
        out = rest;

        if out.len() <= MAX_OUTPUT_LEN {
            break;
        }

        let previous = v;
        Blake2b::hash(&mut v, &[&previous]);
    }

    Blake2b::hash(out, &[&v]);
    v.zeroize();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_output_is_single_prefixed_digest() {
        let mut long = [0u8; 32];
        blake2b_long(&mut long, &[b"abc"]);

        let mut direct = [0u8; 32];
        Blake2b::hash(&mut direct, &[&32u32.to_le_bytes(), b"abc"]);

        assert_eq!(long, direct);
    }

    #[test]
    fn long_output_emits_half_digests_then_remainder() {
        let mut out = [0u8; 100];
        blake2b_long(&mut out, &[b"abc"]);

        let mut v1 = [0u8; 64];
        Blake2b::hash(&mut v1, &[&100u32.to_le_bytes(), b"abc"]);
        assert_eq!(out[..32], v1[..32]);

        // 100 = 32 + 68, and 68 > 64, so one more half-digest precedes the tail
        let mut v2 = [0u8; 64];
        Blake2b::hash(&mut v2, &[&v1]);
        assert_eq!(out[32..64], v2[..32]);

        let mut last = [0u8; 36];
        Blake2b::hash(&mut last, &[&v2]);
        assert_eq!(out[64..], last);
    }

    #[test]
    fn parts_split_anywhere_give_same_output() {
        let mut whole = [0u8; 1024];
        blake2b_long(&mut whole, &[b"argon2d block seed"]);

        let mut split = [0u8; 1024];
        blake2b_long(&mut split, &[b"argon2d ", b"block", b" seed"]);

        assert_eq!(whole, split);
    }
}
