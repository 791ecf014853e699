//! Memory organization and filling algorithm for Argon2d.
//!
//! The memory array is a single lane of 1 KiB blocks, split into
//! `SYNC_POINTS` segments. A pass fills the segments in order; inside a
//! segment, positions are filled strictly in increasing order because
//! every block depends on the one before it.
//!
//! The array itself belongs to the host. [`Memory`] borrows it
//! exclusively for one computation and wipes it once the tag is out.

#[cfg(feature = "alloc")]
use alloc::{boxed::Box, vec};

use tracing::trace;
use zeroize::Zeroize;

use super::block::Block;
use super::error::{InvalidArgument, Result};
use super::params::{Argon2Params, SYNC_POINTS};
use super::reference::reference_index;

/// Memory layout parameters for Argon2.
///
/// - Total memory is `lanes` rows of `lane_len` blocks.
/// - Each lane is divided into `SYNC_POINTS` segments of `segment_len`
///   blocks.
/// - `passes` full sweeps are made over the array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MemoryLayout {
    pub lanes: u32,
    pub lane_len: u32,
    pub segment_len: u32,
    pub total_blocks: u32,
    pub passes: u32,
}

impl MemoryLayout {
    /// Layout of the compiled-in configuration.
    pub(crate) const FIXED: Self = Self::new(&Argon2Params::FIXED);

    pub(crate) const fn new(params: &Argon2Params) -> Self {
        let lanes = params.parallelism;
        let total_blocks =
            (params.memory_size_kib / (SYNC_POINTS * lanes)) * (SYNC_POINTS * lanes);
        let lane_len = total_blocks / lanes;
        let segment_len = lane_len / SYNC_POINTS;

        Self {
            lanes,
            lane_len,
            segment_len,
            total_blocks,
            passes: params.iterations,
        }
    }

    /// Positions of one segment, in fill order.
    ///
    /// The first two positions of the first segment of the first pass are
    /// skipped; those blocks are derived directly from the pre-hash.
    pub(crate) fn segment(&self, pass: u32, slice: u32) -> SegmentPositions {
        let start = if pass == 0 && slice == 0 { 2 } else { 0 };
        SegmentPositions {
            lane_len: self.lane_len,
            segment_len: self.segment_len,
            pass,
            slice,
            index: start,
        }
    }

    /// Every position visited by a full run, in fill order.
    #[cfg(test)]
    pub(crate) fn schedule(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.passes).flat_map(move |pass| {
            (0..SYNC_POINTS).flat_map(move |slice| self.segment(pass, slice))
        })
    }
}

/// One block position visited by the fill loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Position {
    pub pass: u32,
    pub slice: u32,
    /// Position within the segment.
    pub index: u32,
    /// Block being written.
    pub current: u32,
    /// Block that precedes it, wrapping to the end of the lane.
    pub previous: u32,
}

/// Iterator over the positions of a single segment.
#[derive(Debug, Clone)]
pub(crate) struct SegmentPositions {
    lane_len: u32,
    segment_len: u32,
    pass: u32,
    slice: u32,
    index: u32,
}

impl Iterator for SegmentPositions {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.index >= self.segment_len {
            return None;
        }

        let current = self.slice * self.segment_len + self.index;
        let previous = if current % self.lane_len == 0 {
            current + self.lane_len - 1
        } else {
            current - 1
        };

        let position = Position {
            pass: self.pass,
            slice: self.slice,
            index: self.index,
            current,
            previous,
        };
        self.index += 1;
        Some(position)
    }
}

/// Exclusive borrow of the host-provided memory array.
///
/// The slice must hold exactly as many blocks as the layout requires.
/// Nothing else may touch the array while a computation runs.
pub struct Memory<'a> {
    blocks: &'a mut [Block],
    layout: MemoryLayout,
}

impl<'a> Memory<'a> {
    /// Wraps a host-provided array of [`MEMORY_BLOCKS`] blocks.
    ///
    /// [`MEMORY_BLOCKS`]: super::params::MEMORY_BLOCKS
    ///
    /// # Errors
    /// Returns [`InvalidArgument::MemorySize`] if the slice has any other
    /// length.
    pub fn new(blocks: &'a mut [Block]) -> Result<Self> {
        Self::with_layout(blocks, MemoryLayout::FIXED)
    }

    /// Allocates a zeroed array sized for the compiled-in configuration.
    ///
    /// The returned blocks are wiped when dropped.
    #[cfg(feature = "alloc")]
    pub fn allocate() -> Box<[Block]> {
        vec![Block::ZERO; MemoryLayout::FIXED.total_blocks as usize].into_boxed_slice()
    }

    pub(crate) fn with_layout(blocks: &'a mut [Block], layout: MemoryLayout) -> Result<Self> {
        let expected = layout.total_blocks as usize;
        if blocks.len() != expected {
            return Err(InvalidArgument::MemorySize {
                blocks: blocks.len(),
                expected,
            }
            .into());
        }

        Ok(Self { blocks, layout })
    }

    pub(crate) fn layout(&self) -> &MemoryLayout {
        &self.layout
    }

    pub(crate) fn block(&self, index: u32) -> &Block {
        &self.blocks[index as usize]
    }

    pub(crate) fn block_mut(&mut self, index: u32) -> &mut Block {
        &mut self.blocks[index as usize]
    }

    /// Fills every block over all passes.
    ///
    /// Requires blocks 0 and 1 to already hold the lane seeds.
    pub(crate) fn fill(&mut self) {
        for pass in 0..self.layout.passes {
            for slice in 0..SYNC_POINTS {
                self.fill_segment(pass, slice);
            }
            trace!(pass, "argon2d pass complete");
        }
    }

    /// Fills one segment.
    ///
    /// For each position:
    /// 1. Reads the pseudo-random value from the previous block
    /// 2. Selects the reference block from it
    /// 3. Writes the block transform of (previous, reference), folding in
    ///    the old contents on every pass after the first
    fn fill_segment(&mut self, pass: u32, slice: u32) {
        let layout = self.layout;
        for position in layout.segment(pass, slice) {
            let previous = &self.blocks[position.previous as usize];
            let reference = reference_index(
                &layout,
                position.pass,
                position.slice,
                position.index,
                previous.pseudo_rand(),
            );

            let r = previous.xor(&self.blocks[reference as usize]);
            self.blocks[position.current as usize].fill_from_xor(r, position.pass > 0);
        }
    }

    /// Zeroes the whole array.
    pub fn wipe(&mut self) {
        self.blocks.iter_mut().for_each(Zeroize::zeroize);
    }
}
