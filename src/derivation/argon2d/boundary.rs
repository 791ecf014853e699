//! Initialization and finalization for Argon2d.
//!
//! This module handles the boundary operations of the algorithm:
//! computing the pre-hash digest H0 from all inputs, seeding the first
//! two blocks of the lane from it, and deriving the final tag from the
//! filled memory.

use zeroize::Zeroizing;

use super::block::{BLOCK_SIZE, Block};
use super::memory::Memory;
use super::params::{Argon2Params, TAG_LENGTH};
use crate::hash::blake2b::MAX_OUTPUT_LEN;
use crate::hash::{Blake2b, blake2b, blake2b_long};

/// Pre-hash digest H0.
pub(crate) type PreHash = Zeroizing<[u8; MAX_OUTPUT_LEN]>;

/// Caller inputs, each already known to fit a 32-bit length prefix.
#[derive(Clone, Copy)]
pub(crate) struct Inputs<'a> {
    pub password: &'a [u8],
    pub salt: &'a [u8],
    pub key: &'a [u8],
    pub associated_data: &'a [u8],
}

/// Computes the initial hash H0 from all Argon2 inputs.
///
/// H0 is a 64-byte BLAKE2b hash of the header followed by every input,
/// each prefixed with its length (RFC 9106 §3.2):
///
/// ```text
/// H0 = BLAKE2b(p || T || m || t || v || y || |P| || P || |S| || S || |K| || K || |X| || X)
/// ```
///
/// Empty inputs still contribute their zero length prefix. The parts are
/// streamed into BLAKE2b without building the concatenation.
pub(crate) fn pre_hash(params: &Argon2Params, inputs: &Inputs<'_>) -> PreHash {
    let header = params.header();
    let password_len = (inputs.password.len() as u32).to_le_bytes();
    let salt_len = (inputs.salt.len() as u32).to_le_bytes();
    let key_len = (inputs.key.len() as u32).to_le_bytes();
    let associated_data_len = (inputs.associated_data.len() as u32).to_le_bytes();

    let mut h0 = Zeroizing::new([0u8; MAX_OUTPUT_LEN]);
    Blake2b::hash(
        &mut h0[..],
        &[
            &header,
            &password_len,
            inputs.password,
            &salt_len,
            inputs.salt,
            &key_len,
            inputs.key,
            &associated_data_len,
            inputs.associated_data,
        ],
    );
    h0
}

/// Computes H0 over a packed record.
///
/// A validated record is byte-for-byte the same length-prefixed
/// concatenation [`pre_hash`] streams, so it is hashed as is.
pub(crate) fn pre_hash_record(record: &[u8]) -> PreHash {
    Zeroizing::new(blake2b(record))
}

/// Seeds the first two blocks of the lane.
///
/// ```text
/// B[0] = H′¹⁰²⁴(H0 || LE32(0) || LE32(lane))
/// B[1] = H′¹⁰²⁴(H0 || LE32(1) || LE32(lane))
/// ```
pub(crate) fn init(memory: &mut Memory<'_>, h0: &PreHash) {
    let lane = 0u32.to_le_bytes();
    let mut seed = Zeroizing::new([0u8; BLOCK_SIZE]);

    for block_index in 0..2u32 {
        blake2b_long(&mut seed[..], &[&h0[..], &block_index.to_le_bytes(), &lane]);
        *memory.block_mut(block_index) = Block::from_bytes(&seed);
    }
}

/// Derives the output tag from the filled memory.
///
/// With a single lane the final block is simply the last block of the
/// array; the tag is `H′ᵀ` of its byte serialization.
pub(crate) fn finalize(memory: &Memory<'_>) -> [u8; TAG_LENGTH] {
    let layout = memory.layout();
    debug_assert_eq!(layout.lanes, 1);
    let last = layout.lane_len - 1;
    let final_block = Zeroizing::new(memory.block(last).to_bytes());

    let mut tag = [0u8; TAG_LENGTH];
    blake2b_long(&mut tag, &[&final_block[..]]);
    tag
}
