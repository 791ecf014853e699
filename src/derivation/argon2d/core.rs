#[cfg(feature = "alloc")]
use alloc::boxed::Box;

use tracing::debug;

use super::boundary::{Inputs, PreHash, finalize, init, pre_hash, pre_hash_record};
use super::error::{Argon2Error, InputField, InvalidArgument, Result};
use super::memory::Memory;
use super::packed::PackedRecord;
use super::params::{Argon2Params, MIN_SALT_LENGTH, TAG_LENGTH};

/// Output of one Argon2d computation.
pub type Tag = [u8; TAG_LENGTH];

/// Computes an Argon2d tag from discrete arguments.
///
/// # Arguments
///
/// * `memory` - Host-provided working memory, wiped before returning
/// * `password` - The password to hash, may be empty
/// * `salt` - At least 8 bytes
/// * `key` - Optional secret key; `None` hashes like an empty key
/// * `associated_data` - Optional public context; `None` hashes like
///   empty data
///
/// # Errors
///
/// Rejects a salt shorter than 8 bytes, and any field whose length does
/// not fit the 32-bit length prefix. Nothing is hashed in either case.
///
/// # Example
///
/// ```rust, ignore
/// use argon2d_fixed::derivation::argon2d::{Memory, argon2d};
///
/// let mut blocks = Memory::allocate();
/// let mut memory = Memory::new(&mut blocks).unwrap();
/// let tag = argon2d(&mut memory, b"test1234", b"salt1234", None, None).unwrap();
/// ```
pub fn argon2d(
    memory: &mut Memory<'_>,
    password: &[u8],
    salt: &[u8],
    key: Option<&[u8]>,
    associated_data: Option<&[u8]>,
) -> Result<Tag> {
    let inputs = Inputs {
        password,
        salt,
        key: key.unwrap_or_default(),
        associated_data: associated_data.unwrap_or_default(),
    };
    validate(&inputs).inspect_err(|err| debug!(%err, "argon2d rejected input"))?;

    debug!("argon2d started");
    let tag = compute(&Argon2Params::FIXED, memory, &inputs);
    debug!("argon2d complete");
    Ok(tag)
}

/// Computes an Argon2d tag from a packed parameter record.
///
/// The record is validated with [`PackedRecord::parse`] and then hashed
/// as is to obtain H0. The result equals [`argon2d`] on the same fields.
///
/// # Errors
///
/// Any error reported by [`PackedRecord::parse`].
pub fn argon2d_packed(memory: &mut Memory<'_>, record: &[u8]) -> Result<Tag> {
    let h0 = packed_pre_hash(record)?;

    debug!("argon2d_packed started");
    let tag = run(memory, &h0);
    debug!("argon2d_packed complete");
    Ok(tag)
}

/// Allocates working memory, hashes, and drops the memory again.
///
/// The memory is wiped after the tag is extracted and a second time when
/// its blocks are dropped.
#[cfg(feature = "alloc")]
pub fn hash_password(
    password: &[u8],
    salt: &[u8],
    key: Option<&[u8]>,
    associated_data: Option<&[u8]>,
) -> Result<Tag> {
    let mut blocks: Box<[_]> = Memory::allocate();
    let mut memory = Memory::new(&mut blocks)?;
    argon2d(&mut memory, password, salt, key, associated_data)
}

/// Validates a packed record and computes its H0.
///
/// The digest is owned, so the record buffer may be overwritten by the
/// computation afterwards.
pub(crate) fn packed_pre_hash(record: &[u8]) -> Result<PreHash> {
    let record = PackedRecord::parse(record)
        .inspect_err(|err| debug!(%err, "argon2d_packed rejected record"))?;
    Ok(pre_hash_record(record.as_bytes()))
}

fn validate(inputs: &Inputs<'_>) -> Result<()> {
    if inputs.salt.len() < MIN_SALT_LENGTH {
        return Err(InvalidArgument::SaltTooShort {
            length: inputs.salt.len(),
        }
        .into());
    }

    let fields = [
        (InputField::Password, inputs.password),
        (InputField::Salt, inputs.salt),
        (InputField::Key, inputs.key),
        (InputField::AssociatedData, inputs.associated_data),
    ];
    for (field, bytes) in fields {
        if u32::try_from(bytes.len()).is_err() {
            return Err(Argon2Error::from(InvalidArgument::FieldTooLong { field }));
        }
    }

    Ok(())
}

pub(crate) fn compute(
    params: &Argon2Params,
    memory: &mut Memory<'_>,
    inputs: &Inputs<'_>,
) -> Tag {
    let h0 = pre_hash(params, inputs);
    run(memory, &h0)
}

/// Seeds, fills and finalizes `memory`, then wipes it.
pub(crate) fn run(memory: &mut Memory<'_>, h0: &PreHash) -> Tag {
    init(memory, h0);
    memory.fill();
    let tag = finalize(memory);
    memory.wipe();
    tag
}
