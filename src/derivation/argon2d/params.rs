//! Compiled-in Argon2d parameters.
//!
//! This build supports exactly one configuration. Every value here is a
//! constant; nothing is negotiated at runtime, and the packed-record
//! entry point rejects any header that disagrees with these numbers.
//!
//! | parameter      | value           |
//! |----------------|-----------------|
//! | parallelism    | 1               |
//! | tag length     | 32 bytes        |
//! | memory         | 65536 KiB       |
//! | iterations     | 4               |
//! | version        | 0x13            |
//! | type           | Argon2d (0)     |

use core::fmt;

/// Degree of parallelism (number of lanes).
pub const PARALLELISM: u32 = 1;

/// Length of the output tag in bytes.
pub const TAG_LENGTH: usize = 32;

/// Memory size in KiB. Each block is 1 KiB.
pub const MEMORY_SIZE_KIB: u32 = 64 * 1024;

/// Number of passes over memory.
pub const ITERATIONS: u32 = 4;

/// Argon2 version 1.3.
pub const VERSION: u32 = 0x13;

/// Argon2 type identifier for the data-dependent variant.
pub const HASH_TYPE: u32 = Argon2Type::D as u32;

/// Segments per lane per pass.
pub const SYNC_POINTS: u32 = 4;

/// Number of lanes in the memory matrix.
pub const LANES: u32 = PARALLELISM;

/// Minimum accepted salt length in bytes.
pub const MIN_SALT_LENGTH: usize = 8;

/// Total number of 1 KiB blocks in the memory array.
pub const MEMORY_BLOCKS: u32 = MEMORY_SIZE_KIB;

/// Number of blocks in one segment.
pub const SEGMENT_LENGTH: u32 = MEMORY_BLOCKS / (LANES * SYNC_POINTS);

/// Number of blocks in one lane.
pub const LANE_LENGTH: u32 = SEGMENT_LENGTH * SYNC_POINTS;

const _: () = assert!(MEMORY_BLOCKS % (LANES * SYNC_POINTS) == 0);
const _: () = assert!(LANE_LENGTH * LANES == MEMORY_BLOCKS);
const _: () = assert!(MEMORY_BLOCKS >= 8 * LANES);
const _: () = assert!(TAG_LENGTH >= 4);

/// Argon2 variants as encoded in the pre-hash input.
///
/// Only [`Argon2Type::D`] is implemented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum Argon2Type {
    /// Data-dependent addressing.
    D = 0,
    /// Data-independent addressing.
    I = 1,
    /// Hybrid addressing.
    Id = 2,
}

/// The six header fields that open the pre-hash input and the packed
/// record, in wire order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamField {
    Parallelism,
    TagLength,
    MemorySize,
    Iterations,
    Version,
    HashType,
}

impl ParamField {
    /// All header fields in the order they are serialized.
    pub const ORDER: [ParamField; 6] = [
        ParamField::Parallelism,
        ParamField::TagLength,
        ParamField::MemorySize,
        ParamField::Iterations,
        ParamField::Version,
        ParamField::HashType,
    ];
}

impl fmt::Display for ParamField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParamField::Parallelism => "parallelism",
            ParamField::TagLength => "tag length",
            ParamField::MemorySize => "memory size",
            ParamField::Iterations => "iterations",
            ParamField::Version => "version",
            ParamField::HashType => "hash type",
        };
        f.write_str(name)
    }
}

/// Numeric Argon2 parameter set.
///
/// The public API only ever runs with [`Argon2Params::FIXED`]; the type
/// exists so the header, the memory layout and the pre-hash all read the
/// same numbers from one place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Argon2Params {
    pub(crate) parallelism: u32,
    pub(crate) tag_length: u32,
    pub(crate) memory_size_kib: u32,
    pub(crate) iterations: u32,
    pub(crate) version: u32,
    pub(crate) hash_type: u32,
}

impl Argon2Params {
    /// The configuration this build is compiled for.
    pub const FIXED: Self = Self {
        parallelism: PARALLELISM,
        tag_length: TAG_LENGTH as u32,
        memory_size_kib: MEMORY_SIZE_KIB,
        iterations: ITERATIONS,
        version: VERSION,
        hash_type: HASH_TYPE,
    };

    /// Size of the serialized header in bytes.
    pub const HEADER_LEN: usize = 6 * 4;

    /// Value of one header field.
    pub fn get(&self, field: ParamField) -> u32 {
        match field {
            ParamField::Parallelism => self.parallelism,
            ParamField::TagLength => self.tag_length,
            ParamField::MemorySize => self.memory_size_kib,
            ParamField::Iterations => self.iterations,
            ParamField::Version => self.version,
            ParamField::HashType => self.hash_type,
        }
    }

    /// Little-endian header `p || T || m || t || v || y`.
    pub fn header(&self) -> [u8; Self::HEADER_LEN] {
        let mut out = [0u8; Self::HEADER_LEN];
        for (chunk, field) in out.chunks_exact_mut(4).zip(ParamField::ORDER) {
            chunk.copy_from_slice(&self.get(field).to_le_bytes());
        }
        out
    }
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self::FIXED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_is_little_endian_in_wire_order() {
        let header = Argon2Params::FIXED.header();
        assert_eq!(
            header,
            [
                1, 0, 0, 0, // parallelism
                32, 0, 0, 0, // tag length
                0, 0, 1, 0, // 65536 KiB
                4, 0, 0, 0, // iterations
                0x13, 0, 0, 0, // version
                0, 0, 0, 0, // Argon2d
            ]
        );
    }

    #[test]
    fn layout_constants_agree() {
        assert_eq!(SEGMENT_LENGTH, 16384);
        assert_eq!(LANE_LENGTH, MEMORY_BLOCKS);
    }
}
