//! Field catalogue of the plasma wire format.
//!
//! Every numeric or byte-string field has a fixed byte length on the wire and
//! a maximum bit-width it may carry. A [`FieldSpec`] bundles both and is the
//! single place where a value is checked against them.

use std::fmt;

use primitive_types::U256;

use super::fixed;
use crate::error::{PlasmaResult, ValidationError};

/// Names every field the codec validates, used to tag errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    BlockNumber,
    NumberOfTxInBlock,
    TxNumberInBlock,
    OutputNumberInTx,
    Amount,
    ParentHash,
    MerkleRoot,
    ReceiverAddress,
    TxType,
    V,
    R,
    S,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::BlockNumber => "block_number",
            Field::NumberOfTxInBlock => "number_of_tx_in_block",
            Field::TxNumberInBlock => "tx_number_in_block",
            Field::OutputNumberInTx => "output_number_in_tx",
            Field::Amount => "amount",
            Field::ParentHash => "parent_hash",
            Field::MerkleRoot => "merkle_root",
            Field::ReceiverAddress => "receiver_address",
            Field::TxType => "tx_type",
            Field::V => "v",
            Field::R => "r",
            Field::S => "s",
        };
        f.write_str(name)
    }
}

/// Wire layout of a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: Field,
    /// Bytes the field occupies in fixed-width encodings
    pub byte_length: usize,
    /// Largest bit-width a value may have
    pub max_bits: usize,
}

pub const BLOCK_NUMBER: FieldSpec = FieldSpec::new(Field::BlockNumber, 4, 32);
pub const NUMBER_OF_TX_IN_BLOCK: FieldSpec = FieldSpec::new(Field::NumberOfTxInBlock, 4, 32);
pub const TX_NUMBER_IN_BLOCK: FieldSpec = FieldSpec::new(Field::TxNumberInBlock, 4, 32);
pub const OUTPUT_NUMBER_IN_TX: FieldSpec = FieldSpec::new(Field::OutputNumberInTx, 1, 8);
pub const AMOUNT: FieldSpec = FieldSpec::new(Field::Amount, 32, 256);
pub const TX_TYPE: FieldSpec = FieldSpec::new(Field::TxType, 1, 8);
pub const PARENT_HASH: FieldSpec = FieldSpec::new(Field::ParentHash, 32, 256);
pub const MERKLE_ROOT: FieldSpec = FieldSpec::new(Field::MerkleRoot, 32, 256);
pub const RECEIVER_ADDRESS: FieldSpec = FieldSpec::new(Field::ReceiverAddress, 20, 160);
pub const V: FieldSpec = FieldSpec::new(Field::V, 1, 8);
pub const R: FieldSpec = FieldSpec::new(Field::R, 32, 256);
pub const S: FieldSpec = FieldSpec::new(Field::S, 32, 256);

impl FieldSpec {
    pub const fn new(field: Field, byte_length: usize, max_bits: usize) -> Self {
        Self {
            field,
            byte_length,
            max_bits,
        }
    }

    /// Checks an integer against the field's maximum bit-width
    pub fn validate(&self, value: &U256) -> Result<(), ValidationError> {
        self.check_bits(value.bits())
    }

    /// Checks a byte string against the field's fixed byte length
    pub fn validate_bytes(&self, bytes: &[u8]) -> Result<(), ValidationError> {
        if bytes.len() > self.byte_length {
            return Err(ValidationError::ByteLength {
                field: self.field,
                length: bytes.len(),
                max: self.byte_length,
            });
        }
        Ok(())
    }

    /// Encodes a value at the field's fixed width
    pub fn encode(&self, value: &U256) -> PlasmaResult<Vec<u8>> {
        Ok(fixed::encode(value, self.byte_length)?)
    }

    /// Decodes a big-endian buffer of any length and validates the result
    pub fn decode(&self, bytes: &[u8]) -> PlasmaResult<U256> {
        let bits = fixed::bit_width(bytes);
        self.check_bits(bits)?;
        fixed::decode(bytes).ok_or_else(|| {
            ValidationError::BitWidth {
                field: self.field,
                bits,
                max: self.max_bits,
            }
            .into()
        })
    }

    /// Checks a signature recovery id: within the field width and 27 or 28
    pub fn validate_recovery_id(&self, value: &U256) -> Result<(), ValidationError> {
        self.validate(value)?;
        if *value != U256::from(27) && *value != U256::from(28) {
            return Err(ValidationError::RecoveryId {
                field: self.field,
                value: *value,
            });
        }
        Ok(())
    }

    /// Left-pads a byte string to the field's fixed length
    pub fn pad_bytes(&self, bytes: &[u8]) -> Result<Vec<u8>, ValidationError> {
        self.validate_bytes(bytes)?;
        let mut padded = vec![0u8; self.byte_length];
        padded[self.byte_length - bytes.len()..].copy_from_slice(bytes);
        Ok(padded)
    }

    fn check_bits(&self, bits: usize) -> Result<(), ValidationError> {
        if bits > self.max_bits {
            return Err(ValidationError::BitWidth {
                field: self.field,
                bits,
                max: self.max_bits,
            });
        }
        Ok(())
    }
}
