//! Reference block selection for Argon2d.
//!
//! When filling the block at a given position, Argon2 mixes the previous
//! block with a *reference* block chosen pseudo-randomly from the blocks
//! that are already available. In Argon2d the pseudo-random input is the
//! low 32 bits of the previous block's first word, so the access pattern
//! depends on the data being hashed.
//!
//! With a single lane the reference lane is always the current lane, so
//! only the index inside the lane is computed here.

use super::memory::MemoryLayout;
use super::params::SYNC_POINTS;

/// Computes the index (within the lane) of the reference block.
///
/// # Parameters
/// - `pass`: current pass, starting at 0
/// - `slice`: current segment within the pass, `0..SYNC_POINTS`
/// - `index`: position within the segment
/// - `pseudo_rand`: low 32 bits of the previous block's first word
///
/// # Algorithm (RFC 9106 §3.4.1.3)
///
/// The reference area `W` holds every block that may be referenced:
///
/// - first pass, first segment: `index - 1`
/// - first pass, later segments: `slice × segment_len + index - 1`
/// - later passes: `lane_len - segment_len + index - 1`
///
/// The pseudo-random value is mapped onto that area with a quadratic
/// bias towards recently written blocks:
///
/// ```text
/// x   = J1² / 2³²
/// rel = W - 1 - (W × x / 2³²)
/// ```
///
/// On later passes the area starts just after the current segment (the
/// blocks of the next segment still hold the previous pass's contents),
/// except in the last segment where it starts at 0.
///
/// All arithmetic uses the same 32/64-bit widths and wrapping as the
/// reference algorithm. The first pass never asks for positions 0 and 1
/// of the first segment; for those the result is meaningless but still
/// lies inside the lane.
pub(crate) fn reference_index(
    layout: &MemoryLayout,
    pass: u32,
    slice: u32,
    index: u32,
    pseudo_rand: u32,
) -> u32 {
    let segment_len = layout.segment_len;
    let lane_len = layout.lane_len;

    let reference_area_size = if pass > 0 {
        lane_len
            .wrapping_sub(segment_len)
            .wrapping_add(index)
            .wrapping_sub(1)
    } else if slice == 0 {
        index.wrapping_sub(1)
    } else {
        slice
            .wrapping_mul(segment_len)
            .wrapping_add(index)
            .wrapping_sub(1)
    };

    let j1 = u64::from(pseudo_rand);
    let x = (j1 * j1) >> 32;
    let relative_position = u64::from(reference_area_size.wrapping_sub(1))
        .wrapping_sub((u64::from(reference_area_size) * x) >> 32);

    let start_position = if pass > 0 && slice != SYNC_POINTS - 1 {
        slice.wrapping_add(1).wrapping_mul(segment_len)
    } else {
        0
    };

    (u64::from(start_position).wrapping_add(relative_position) % u64::from(lane_len)) as u32
}

/// Reference block index for the compiled-in memory layout.
///
/// Pure function of its four inputs; the result is always smaller than
/// [`LANE_LENGTH`](super::params::LANE_LENGTH).
pub fn index_alpha(pass: u32, slice: u32, index: u32, pseudo_rand: u32) -> u32 {
    reference_index(&MemoryLayout::FIXED, pass, slice, index, pseudo_rand)
}
