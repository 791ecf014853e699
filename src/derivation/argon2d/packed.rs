//! Packed parameter record.
//!
//! Hosts that cannot pass several buffers across their boundary hand the
//! engine a single little-endian record instead:
//!
//! ```text
//! [parallelism][tag_length][memory_kib][iterations][version][hash_type]
//! [pw_len][pw][salt_len][salt][key_len][key][ad_len][ad]
//! ```
//!
//! All numbers are `u32`. The six header fields must equal the
//! compiled-in constants. The record is exactly the byte string Argon2
//! feeds into H0, so once it validates it is hashed without re-encoding.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use super::error::{Argon2Error, InputField, InvalidArgument, MalformedInput, Result};
use super::params::{Argon2Params, MIN_SALT_LENGTH, ParamField};

/// Borrowed view of a validated packed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedRecord<'a> {
    raw: &'a [u8],
    password: &'a [u8],
    salt: &'a [u8],
    key: &'a [u8],
    associated_data: &'a [u8],
}

impl<'a> PackedRecord<'a> {
    /// Smallest valid record: header, empty password, 8-byte salt, empty
    /// key and empty associated data.
    pub const MIN_LEN: usize = Argon2Params::HEADER_LEN + 4 + 4 + MIN_SALT_LENGTH + 4 + 4;

    /// Validates `raw` and splits it into its fields.
    ///
    /// # Errors
    /// - [`MalformedInput::TooShort`] if `raw` is below [`Self::MIN_LEN`]
    /// - [`Argon2Error::ConfigMismatch`] if a header field differs from
    ///   the compiled-in configuration
    /// - [`InvalidArgument::SaltTooShort`] if the salt is under 8 bytes
    /// - [`MalformedInput::LengthOverflow`] / [`MalformedInput::FieldOverrun`]
    ///   if a declared length runs past the end of the record
    /// - [`MalformedInput::TrailingBytes`] if bytes follow the associated data
    pub fn parse(raw: &'a [u8]) -> Result<Self> {
        if raw.len() < Self::MIN_LEN {
            return Err(MalformedInput::TooShort {
                length: raw.len(),
                minimum: Self::MIN_LEN,
            }
            .into());
        }
        let length =
            u32::try_from(raw.len()).map_err(|_| MalformedInput::TooLong { length: raw.len() })?;

        let header = &raw[..Argon2Params::HEADER_LEN];
        for (field, word) in ParamField::ORDER.into_iter().zip(header.chunks_exact(4)) {
            let expected = Argon2Params::FIXED.get(field);
            let actual = le_u32(word);
            if actual != expected {
                return Err(Argon2Error::ConfigMismatch {
                    field,
                    expected,
                    actual,
                });
            }
        }

        let mut reader = Reader {
            raw,
            length,
            position: Argon2Params::HEADER_LEN as u32,
        };
        let password = reader.read_field(InputField::Password)?;
        let salt = reader.read_field(InputField::Salt)?;
        if salt.len() < MIN_SALT_LENGTH {
            return Err(InvalidArgument::SaltTooShort { length: salt.len() }.into());
        }
        let key = reader.read_field(InputField::Key)?;
        let associated_data = reader.read_field(InputField::AssociatedData)?;

        if reader.position != reader.length {
            return Err(MalformedInput::TrailingBytes {
                remaining: (reader.length - reader.position) as usize,
            }
            .into());
        }

        Ok(Self {
            raw,
            password,
            salt,
            key,
            associated_data,
        })
    }

    /// The whole record, as hashed into H0.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.raw
    }

    pub fn password(&self) -> &'a [u8] {
        self.password
    }

    pub fn salt(&self) -> &'a [u8] {
        self.salt
    }

    pub fn key(&self) -> &'a [u8] {
        self.key
    }

    pub fn associated_data(&self) -> &'a [u8] {
        self.associated_data
    }

    /// Size of the record encoding the given fields.
    ///
    /// # Errors
    /// Returns [`InvalidArgument::FieldTooLong`] if a field, or the whole
    /// record, does not fit a 32-bit length.
    pub fn encoded_len(
        password: &[u8],
        salt: &[u8],
        key: &[u8],
        associated_data: &[u8],
    ) -> Result<usize> {
        let fields = [
            (InputField::Password, password),
            (InputField::Salt, salt),
            (InputField::Key, key),
            (InputField::AssociatedData, associated_data),
        ];

        let mut total = Argon2Params::HEADER_LEN as u32;
        for (field, bytes) in fields {
            let too_long = || Argon2Error::from(InvalidArgument::FieldTooLong { field });
            let length = u32::try_from(bytes.len()).map_err(|_| too_long())?;
            total = total
                .checked_add(4)
                .and_then(|t| t.checked_add(length))
                .ok_or_else(too_long)?;
        }
        Ok(total as usize)
    }

    /// Writes the record for the given fields into the front of `out`.
    ///
    /// The header always carries the compiled-in configuration. Returns
    /// the number of bytes written.
    ///
    /// # Errors
    /// - [`InvalidArgument::SaltTooShort`] if the salt is under 8 bytes
    /// - [`InvalidArgument::FieldTooLong`] if a field exceeds 32-bit lengths
    /// - [`InvalidArgument::BufferTooSmall`] if `out` cannot hold the record
    pub fn encode(
        password: &[u8],
        salt: &[u8],
        key: &[u8],
        associated_data: &[u8],
        out: &mut [u8],
    ) -> Result<usize> {
        if salt.len() < MIN_SALT_LENGTH {
            return Err(InvalidArgument::SaltTooShort { length: salt.len() }.into());
        }

        let needed = Self::encoded_len(password, salt, key, associated_data)?;
        if out.len() < needed {
            return Err(InvalidArgument::BufferTooSmall {
                needed,
                available: out.len(),
            }
            .into());
        }

        let header = Argon2Params::FIXED.header();
        out[..header.len()].copy_from_slice(&header);
        let mut position = header.len();

        for bytes in [password, salt, key, associated_data] {
            out[position..position + 4].copy_from_slice(&(bytes.len() as u32).to_le_bytes());
            position += 4;
            out[position..position + bytes.len()].copy_from_slice(bytes);
            position += bytes.len();
        }

        Ok(position)
    }

    /// Allocating variant of [`PackedRecord::encode`].
    #[cfg(feature = "alloc")]
    pub fn to_vec(
        password: &[u8],
        salt: &[u8],
        key: &[u8],
        associated_data: &[u8],
    ) -> Result<Vec<u8>> {
        let mut out = alloc::vec![0u8; Self::encoded_len(password, salt, key, associated_data)?];
        Self::encode(password, salt, key, associated_data, &mut out)?;
        Ok(out)
    }
}

/// Bounds-checked cursor over the raw record.
///
/// Offsets are 32-bit, as on the wire; every advance is checked for
/// overflow before it is compared with the record length.
struct Reader<'a> {
    raw: &'a [u8],
    length: u32,
    position: u32,
}

impl<'a> Reader<'a> {
    fn advance(&mut self, count: u32, field: InputField) -> Result<&'a [u8]> {
        let end = self
            .position
            .checked_add(count)
            .ok_or(MalformedInput::LengthOverflow { field })?;
        if end > self.length {
            return Err(MalformedInput::FieldOverrun { field }.into());
        }

        let bytes = &self.raw[self.position as usize..end as usize];
        self.position = end;
        Ok(bytes)
    }

    fn read_field(&mut self, field: InputField) -> Result<&'a [u8]> {
        let length = le_u32(self.advance(4, field)?);
        self.advance(length, field)
    }
}

/// Decodes a 4-byte little-endian word.
fn le_u32(bytes: &[u8]) -> u32 {
    let mut le = [0u8; 4];
    le.copy_from_slice(bytes);
    u32::from_le_bytes(le)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimum_record_layout() {
        assert_eq!(PackedRecord::MIN_LEN, 48);

        let mut out = [0u8; 48];
        let written = PackedRecord::encode(&[], b"saltsalt", &[], &[], &mut out).unwrap();
        assert_eq!(written, 48);

        let record = PackedRecord::parse(&out).unwrap();
        assert_eq!(record.password(), b"");
        assert_eq!(record.salt(), b"saltsalt");
        assert_eq!(record.key(), b"");
        assert_eq!(record.associated_data(), b"");
        assert_eq!(record.as_bytes().len(), 48);
    }

    #[test]
    fn encode_rejects_small_buffer() {
        let mut out = [0u8; 47];
        let err = PackedRecord::encode(&[], b"saltsalt", &[], &[], &mut out).unwrap_err();
        assert_eq!(
            err,
            Argon2Error::InvalidArgument(InvalidArgument::BufferTooSmall {
                needed: 48,
                available: 47,
            })
        );
    }

    #[test]
    fn header_is_checked_before_any_field() {
        let mut out = [0u8; 56];
        PackedRecord::encode(b"password", b"saltsalt", &[], &[], &mut out).unwrap();
        out[20] = 1;
        out[24..28].copy_from_slice(&u32::MAX.to_le_bytes());

        assert_eq!(
            PackedRecord::parse(&out),
            Err(Argon2Error::ConfigMismatch {
                field: ParamField::HashType,
                expected: 0,
                actual: 1,
            })
        );
    }

    #[test]
    fn length_addition_overflow_is_caught() {
        let mut reader = Reader {
            raw: &[0u8; 8],
            length: 8,
            position: 4,
        };
        assert_eq!(
            reader.advance(u32::MAX, InputField::Key),
            Err(Argon2Error::from(MalformedInput::LengthOverflow {
                field: InputField::Key
            }))
        );
        assert_eq!(reader.position, 4);
    }
}
