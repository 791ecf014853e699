//! Errors reported by the Argon2d entry points.
//!
//! Every error is detected by local validation before the memory-hard
//! computation starts. Once a run begins it always produces a tag, so
//! there is no error for the fill or finalize phases.

use core::fmt;

use thiserror::Error;

use super::params::ParamField;

/// Result type used throughout the Argon2d API.
pub type Result<T> = core::result::Result<T, Argon2Error>;

/// Caller-supplied inputs named in error messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputField {
    Password,
    Salt,
    Key,
    AssociatedData,
    /// The host-provided memory region.
    Memory,
    /// The destination for the tag.
    Tag,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputField::Password => "password",
            InputField::Salt => "salt",
            InputField::Key => "key",
            InputField::AssociatedData => "associated data",
            InputField::Memory => "memory",
            InputField::Tag => "tag",
        };
        f.write_str(name)
    }
}

/// Coarse classification of an [`Argon2Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A parameter field disagrees with the compiled-in configuration.
    ConfigMismatch,
    /// A packed record is structurally invalid.
    MalformedInput,
    /// A direct argument is unacceptable.
    InvalidArgument,
}

/// Structural problems in a packed record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MalformedInput {
    #[error("record is {length} bytes, at least {minimum} are required")]
    TooShort { length: usize, minimum: usize },

    #[error("record is {length} bytes, which does not fit a 32-bit length")]
    TooLong { length: usize },

    #[error("{field} runs past the end of the record")]
    FieldOverrun { field: InputField },

    #[error("{field} length overflows the record offset")]
    LengthOverflow { field: InputField },

    #[error("{remaining} unconsumed bytes after the associated data")]
    TrailingBytes { remaining: usize },
}

/// Direct arguments that cannot be hashed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum InvalidArgument {
    #[error("salt is {length} bytes, at least 8 are required")]
    SaltTooShort { length: usize },

    #[error("{field} pointer is null")]
    NullPointer { field: InputField },

    #[error("{field} is longer than 2^32 - 1 bytes")]
    FieldTooLong { field: InputField },

    #[error("memory holds {blocks} blocks, expected {expected}")]
    MemorySize { blocks: usize, expected: usize },

    #[error("buffer holds {available} bytes, {needed} are required")]
    BufferTooSmall { needed: usize, available: usize },
}

/// Errors that can occur before an Argon2d computation starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Argon2Error {
    /// A header field does not match the fixed configuration.
    #[error("{field} is {actual}, this build only supports {expected}")]
    ConfigMismatch {
        field: ParamField,
        expected: u32,
        actual: u32,
    },

    #[error("malformed record: {0}")]
    Malformed(#[from] MalformedInput),

    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),
}

impl Argon2Error {
    /// Returns the error's classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Argon2Error::ConfigMismatch { .. } => ErrorKind::ConfigMismatch,
            Argon2Error::Malformed(_) => ErrorKind::MalformedInput,
            Argon2Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
        }
    }
}
