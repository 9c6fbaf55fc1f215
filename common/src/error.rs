use primitive_types::U256;
use thiserror::Error;

use crate::codec::fields::Field;

/// Core error type for the plasma codec. Every construction and decode path
/// fails with one of these and never hands back a partially built value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlasmaError {
    /// A field value is outside the limits of the wire format
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A buffer does not have the length the format requires
    #[error("Length mismatch for {what}: expected {expected} bytes, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The decoded RLP tree does not have the expected shape
    #[error("Decode structure error: {0}")]
    DecodeStructure(#[from] StructureError),

    /// The bytes are not valid RLP at all
    #[error("RLP error: {0}")]
    Rlp(#[from] alloy_rlp::Error),

    /// A value does not fit its fixed width while encoding
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),
}

/// Field-level validation failures. Each variant names the offending field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is {bits} bits wide, maximum is {max}")]
    BitWidth { field: Field, bits: usize, max: usize },

    #[error("{field} is {length} bytes long, maximum is {max}")]
    ByteLength {
        field: Field,
        length: usize,
        max: usize,
    },

    #[error("{field} must be 27 or 28, got {value}")]
    RecoveryId { field: Field, value: U256 },

    #[error("Unknown transaction type {0}")]
    UnknownTransactionType(u8),
}

/// Shape errors found after the RLP tree was parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    #[error("{what} has {actual} elements, expected {expected}")]
    WrongElementCount {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{0} is not a list")]
    NotAList(&'static str),

    #[error("{0} is not a byte string")]
    NotBytes(&'static str),

    #[error("{0} trailing bytes after the top-level item")]
    TrailingBytes(usize),

    #[error("Nesting deeper than {0} levels")]
    TooDeep(usize),

    #[error("{0} does not use fixed-width field encodings")]
    NonCanonical(&'static str),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("value needs {needed} bytes but the field holds {length}")]
pub struct EncodingError {
    pub needed: usize,
    pub length: usize,
}

/// Result type alias for plasma codec operations
pub type PlasmaResult<T> = Result<T, PlasmaError>;
