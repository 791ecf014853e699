use super::{BLOCK_LEN, IV, SIGMA};
use crate::primitives::mix::blake2b_g;

/// BLAKE2b compression function F (RFC 7693 §3.2).
///
/// Mixes one 128-byte message block into the chaining state `h`.
///
/// # Parameters
/// - `h`: chaining state, updated in place
/// - `block`: message block, read as 16 little-endian words
/// - `counter`: total number of input bytes hashed so far, including
///   this block
/// - `last`: whether this is the final block
///
/// # Notes
/// - The byte counter is kept as a single 64-bit word; the high half of
///   RFC 7693's 128-bit offset is always zero for inputs this crate hashes.
pub(crate) fn compress(h: &mut [u64; 8], block: &[u8; BLOCK_LEN], counter: u64, last: bool) {
    let mut m = [0u64; 16];
    for (word, chunk) in m.iter_mut().zip(block.chunks_exact(8)) {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(chunk);
        *word = u64::from_le_bytes(bytes);
    }

    let mut v = [0u64; 16];
    v[..8].copy_from_slice(h);
    v[8..].copy_from_slice(&IV);

    v[12] ^= counter;
    if last {
        v[14] = !v[14];
    }

    for sigma in SIGMA.iter() {
        // Column step
        blake2b_g(&mut v, 0, 4, 8, 12, m[sigma[0]], m[sigma[1]]);
        blake2b_g(&mut v, 1, 5, 9, 13, m[sigma[2]], m[sigma[3]]);
        blake2b_g(&mut v, 2, 6, 10, 14, m[sigma[4]], m[sigma[5]]);
        blake2b_g(&mut v, 3, 7, 11, 15, m[sigma[6]], m[sigma[7]]);

        // Diagonal step
        blake2b_g(&mut v, 0, 5, 10, 15, m[sigma[8]], m[sigma[9]]);
        blake2b_g(&mut v, 1, 6, 11, 12, m[sigma[10]], m[sigma[11]]);
        blake2b_g(&mut v, 2, 7, 8, 13, m[sigma[12]], m[sigma[13]]);
        blake2b_g(&mut v, 3, 4, 9, 14, m[sigma[14]], m[sigma[15]]);
    }

    for i in 0..8 {
        h[i] ^= v[i] ^ v[i + 8];
    }
}
