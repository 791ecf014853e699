//! C-ABI entry points.
//!
//! These wrap [`argon2d`] and the packed-record path for hosts that can
//! only pass raw pointers, typically a wasm32 embedder that owns the
//! 64 MiB working region. Both functions report success as a `bool`;
//! the reason for a rejection is emitted as a `tracing` event.

use core::{ptr, slice};

use tracing::debug;
use zeroize::Zeroize;

use crate::derivation::argon2d::core::{packed_pre_hash, run};
use crate::derivation::argon2d::error::{Argon2Error, InputField, InvalidArgument, Result};
use crate::derivation::argon2d::params::TAG_LENGTH;
use crate::derivation::argon2d::{BLOCK_SIZE, Block, Memory, argon2d};

/// Hashes discrete arguments and writes the 32-byte tag to `tag_out`.
///
/// A pointer may be null only when its length is zero, except `salt`,
/// which must never be null. `memory` must point to `memory_len` blocks.
///
/// # Safety
///
/// Every non-null pointer must be valid for its stated length, `tag_out`
/// for 32 bytes, and none of the input ranges may overlap `memory` or
/// `tag_out`.
#[unsafe(no_mangle)]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn argon2d_hash_raw(
    password: *const u8,
    password_len: usize,
    salt: *const u8,
    salt_len: usize,
    key: *const u8,
    key_len: usize,
    associated_data: *const u8,
    associated_data_len: usize,
    memory: *mut Block,
    memory_len: usize,
    tag_out: *mut u8,
) -> bool {
    let result = (|| -> Result<()> {
        if salt.is_null() {
            return Err(InvalidArgument::NullPointer {
                field: InputField::Salt,
            }
            .into());
        }
        if tag_out.is_null() {
            return Err(InvalidArgument::NullPointer {
                field: InputField::Tag,
            }
            .into());
        }

        let password = unsafe { input(password, password_len, InputField::Password)? };
        let salt = unsafe { input(salt, salt_len, InputField::Salt)? };
        let key = unsafe { input(key, key_len, InputField::Key)? };
        let associated_data =
            unsafe { input(associated_data, associated_data_len, InputField::AssociatedData)? };
        let blocks = unsafe { region(memory, memory_len)? };

        let mut memory = Memory::new(blocks)?;
        let tag = argon2d(&mut memory, password, salt, Some(key), Some(associated_data))?;

        unsafe { ptr::copy_nonoverlapping(tag.as_ptr(), tag_out, TAG_LENGTH) };
        Ok(())
    })();

    match result {
        Ok(()) => true,
        Err(err) => reject(err),
    }
}

/// Hashes the packed record stored at the start of `memory`.
///
/// The first `record_len` bytes of the region hold the record. On
/// success the tag occupies the first 32 bytes of the region and every
/// other byte is zero. On failure the whole region is zeroed. Both the
/// record and the tag are plain bytes at their addresses, so the host
/// sees the same layout on any target endianness.
///
/// # Safety
///
/// `memory` must be valid for reads and writes of `memory_len` blocks
/// and must not be accessed by anything else during the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn argon2d_hash_packed_raw(
    memory: *mut Block,
    memory_len: usize,
    record_len: u32,
) -> bool {
    let blocks = match unsafe { region(memory, memory_len) } {
        Ok(blocks) => blocks,
        Err(err) => return reject(err),
    };

    match hash_in_place(blocks, record_len as usize) {
        Ok(()) => true,
        Err(err) => {
            blocks.iter_mut().for_each(Zeroize::zeroize);
            reject(err)
        }
    }
}

fn hash_in_place(blocks: &mut [Block], record_len: usize) -> Result<()> {
    let available = blocks.len() * BLOCK_SIZE;
    let Some(record) = region_bytes(blocks).get(..record_len) else {
        return Err(InvalidArgument::BufferTooSmall {
            needed: record_len,
            available,
        }
        .into());
    };
    let h0 = packed_pre_hash(record)?;

    debug!("argon2d_hash_packed_raw started");
    let tag = {
        let mut memory = Memory::new(blocks)?;
        run(&mut memory, &h0)
    };
    region_bytes_mut(blocks)[..TAG_LENGTH].copy_from_slice(&tag);
    debug!("argon2d_hash_packed_raw complete");
    Ok(())
}

/// The region as the host addresses it, one byte at a time.
fn region_bytes(blocks: &[Block]) -> &[u8] {
    // SAFETY: `Block` is plain `u64` storage without padding, so every
    // byte of the region is initialized.
    unsafe { slice::from_raw_parts(blocks.as_ptr().cast::<u8>(), blocks.len() * BLOCK_SIZE) }
}

fn region_bytes_mut(blocks: &mut [Block]) -> &mut [u8] {
    // SAFETY: as above; any byte pattern is a valid `u64`.
    unsafe {
        slice::from_raw_parts_mut(blocks.as_mut_ptr().cast::<u8>(), blocks.len() * BLOCK_SIZE)
    }
}

/// Borrows an input range, allowing null only for an empty one.
unsafe fn input<'a>(data: *const u8, len: usize, field: InputField) -> Result<&'a [u8]> {
    if len == 0 {
        return Ok(&[]);
    }
    if data.is_null() {
        return Err(InvalidArgument::NullPointer { field }.into());
    }
    Ok(unsafe { slice::from_raw_parts(data, len) })
}

unsafe fn region<'a>(memory: *mut Block, len: usize) -> Result<&'a mut [Block]> {
    if memory.is_null() {
        return Err(InvalidArgument::NullPointer {
            field: InputField::Memory,
        }
        .into());
    }
    Ok(unsafe { slice::from_raw_parts_mut(memory, len) })
}

fn reject(err: Argon2Error) -> bool {
    debug!(%err, "raw entry point rejected input");
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derivation::argon2d::PackedRecord;
    use crate::derivation::argon2d::params::MEMORY_BLOCKS;
    use hex_literal::hex;

    const GOLDEN: [u8; TAG_LENGTH] =
        hex!("8aeb83cf9f9c450fdee9fd1f5922865e76cb1a242969d85af69985331dfa1f27");

    #[test]
    fn null_salt_is_rejected() {
        let mut blocks = Memory::allocate();
        let mut tag = [0u8; TAG_LENGTH];
        let ok = unsafe {
            argon2d_hash_raw(
                b"test1234".as_ptr(),
                8,
                ptr::null(),
                0,
                ptr::null(),
                0,
                ptr::null(),
                0,
                blocks.as_mut_ptr(),
                blocks.len(),
                tag.as_mut_ptr(),
            )
        };
        assert!(!ok);
        assert_eq!(tag, [0u8; TAG_LENGTH]);
    }

    #[test]
    fn null_pointer_with_length_is_rejected() {
        assert_eq!(
            unsafe { input(ptr::null(), 4, InputField::Key) },
            Err(Argon2Error::from(InvalidArgument::NullPointer {
                field: InputField::Key
            }))
        );
        assert_eq!(unsafe { input(ptr::null(), 0, InputField::Key) }, Ok(&[][..]));
    }

    #[test]
    fn null_memory_is_rejected() {
        assert!(!unsafe { argon2d_hash_packed_raw(ptr::null_mut(), MEMORY_BLOCKS as usize, 48) });
    }

    #[test]
    fn raw_entry_points_agree_with_golden_tag() {
        let mut blocks = Memory::allocate();
        let mut tag = [0u8; TAG_LENGTH];
        let ok = unsafe {
            argon2d_hash_raw(
                b"test1234".as_ptr(),
                8,
                b"salt1234".as_ptr(),
                8,
                ptr::null(),
                0,
                ptr::null(),
                0,
                blocks.as_mut_ptr(),
                blocks.len(),
                tag.as_mut_ptr(),
            )
        };
        assert!(ok);
        assert_eq!(tag, GOLDEN);

        let record_len = PackedRecord::encode(
            b"test1234",
            b"salt1234",
            &[],
            &[],
            region_bytes_mut(&mut blocks),
        )
        .unwrap();

        let ok = unsafe {
            argon2d_hash_packed_raw(blocks.as_mut_ptr(), blocks.len(), record_len as u32)
        };
        assert!(ok);
        let bytes = region_bytes(&blocks);
        assert_eq!(bytes[..TAG_LENGTH], GOLDEN);
        assert!(bytes[TAG_LENGTH..].iter().all(|&b| b == 0));
    }

    #[test]
    fn region_bytes_follow_native_word_layout() {
        let mut blocks = [Block::ZERO; 2];
        region_bytes_mut(&mut blocks)[BLOCK_SIZE..BLOCK_SIZE + 8]
            .copy_from_slice(&0x0102_0304_0506_0708u64.to_ne_bytes());

        assert_eq!(blocks[1].as_words()[0], 0x0102_0304_0506_0708);
        assert_eq!(region_bytes(&blocks).len(), 2 * BLOCK_SIZE);
    }

    #[test]
    fn record_longer_than_region_is_rejected() {
        let mut blocks = [Block::ZERO; 1];
        assert_eq!(
            hash_in_place(&mut blocks, BLOCK_SIZE + 1),
            Err(Argon2Error::from(InvalidArgument::BufferTooSmall {
                needed: BLOCK_SIZE + 1,
                available: BLOCK_SIZE,
            }))
        );
    }

    #[test]
    fn rejected_record_wipes_region() {
        let mut blocks = Memory::allocate();
        let bytes = region_bytes_mut(&mut blocks);
        let record_len =
            PackedRecord::encode(b"password", b"somesalt", &[], &[], bytes).unwrap();
        bytes[0] = 2;

        let ok = unsafe {
            argon2d_hash_packed_raw(blocks.as_mut_ptr(), blocks.len(), record_len as u32)
        };
        assert!(!ok);
        assert!(blocks[0].as_words().iter().all(|&w| w == 0));
    }
}
