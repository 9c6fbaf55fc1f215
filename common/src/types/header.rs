use primitive_types::U256;
use tracing::{debug, warn};

use crate::codec::fields::{
    FieldSpec, BLOCK_NUMBER, MERKLE_ROOT, NUMBER_OF_TX_IN_BLOCK, PARENT_HASH, R, S, V,
};
use crate::error::{PlasmaError, PlasmaResult, ValidationError};

/// Fixed byte length of an encoded block header
pub const BLOCK_HEADER_LENGTH: usize = BLOCK_NUMBER.byte_length
    + NUMBER_OF_TX_IN_BLOCK.byte_length
    + PARENT_HASH.byte_length
    + MERKLE_ROOT.byte_length
    + V.byte_length
    + R.byte_length
    + S.byte_length;

const HASH_LENGTH: usize = 32;

/// Header of a plasma block as committed to the root chain.
///
/// Encoded as the plain concatenation
/// `block_number ∥ number_of_tx_in_block ∥ parent_hash ∥ merkle_root ∥ v ∥ r ∥ s`
/// with every field at its fixed width. No RLP is involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockHeader {
    block_number: U256,
    number_of_tx_in_block: U256,
    parent_hash: [u8; HASH_LENGTH],
    merkle_root: [u8; HASH_LENGTH],
    v: U256,
    r: [u8; HASH_LENGTH],
    s: [u8; HASH_LENGTH],
}

impl BlockHeader {
    /// Builds a header from explicit field values. Byte-string fields shorter
    /// than 32 bytes are left padded with zeros.
    pub fn new(
        block_number: U256,
        number_of_tx_in_block: U256,
        parent_hash: &[u8],
        merkle_root: &[u8],
        v: U256,
        r: &[u8],
        s: &[u8],
    ) -> PlasmaResult<Self> {
        Self::validate(
            &block_number,
            &number_of_tx_in_block,
            parent_hash,
            merkle_root,
            &v,
            r,
            s,
        )?;

        Ok(Self {
            block_number,
            number_of_tx_in_block,
            parent_hash: pad_hash(&PARENT_HASH, parent_hash)?,
            merkle_root: pad_hash(&MERKLE_ROOT, merkle_root)?,
            v,
            r: pad_hash(&R, r)?,
            s: pad_hash(&S, s)?,
        })
    }

    /// Checks every header field against the wire limits, reporting the
    /// first field that fails.
    pub fn validate(
        block_number: &U256,
        number_of_tx_in_block: &U256,
        parent_hash: &[u8],
        merkle_root: &[u8],
        v: &U256,
        r: &[u8],
        s: &[u8],
    ) -> Result<(), ValidationError> {
        BLOCK_NUMBER.validate(block_number)?;
        NUMBER_OF_TX_IN_BLOCK.validate(number_of_tx_in_block)?;
        PARENT_HASH.validate_bytes(parent_hash)?;
        MERKLE_ROOT.validate_bytes(merkle_root)?;
        V.validate_recovery_id(v)?;
        R.validate_bytes(r)?;
        S.validate_bytes(s)?;
        Ok(())
    }

    /// Decodes a header from its fixed-length wire form
    pub fn decode(data: &[u8]) -> PlasmaResult<Self> {
        if data.len() != BLOCK_HEADER_LENGTH {
            warn!(
                length = data.len(),
                expected = BLOCK_HEADER_LENGTH,
                "Rejected block header with wrong length"
            );
            return Err(PlasmaError::LengthMismatch {
                what: "block header",
                expected: BLOCK_HEADER_LENGTH,
                actual: data.len(),
            });
        }

        let mut segments = Segments::new(data);
        let block_number = BLOCK_NUMBER.decode(segments.next(&BLOCK_NUMBER))?;
        let number_of_tx_in_block =
            NUMBER_OF_TX_IN_BLOCK.decode(segments.next(&NUMBER_OF_TX_IN_BLOCK))?;
        let parent_hash = segments.next(&PARENT_HASH);
        let merkle_root = segments.next(&MERKLE_ROOT);
        let v = V.decode(segments.next(&V))?;
        let r = segments.next(&R);
        let s = segments.next(&S);

        let header = Self::new(
            block_number,
            number_of_tx_in_block,
            parent_hash,
            merkle_root,
            v,
            r,
            s,
        )?;
        debug!(block_number = %header.block_number, "Decoded block header");
        Ok(header)
    }

    /// Encodes the header into its fixed-length wire form
    pub fn encode(&self) -> PlasmaResult<Vec<u8>> {
        let mut out = Vec::with_capacity(BLOCK_HEADER_LENGTH);
        out.extend(BLOCK_NUMBER.encode(&self.block_number)?);
        out.extend(NUMBER_OF_TX_IN_BLOCK.encode(&self.number_of_tx_in_block)?);
        out.extend_from_slice(&self.parent_hash);
        out.extend_from_slice(&self.merkle_root);
        out.extend(V.encode(&self.v)?);
        out.extend_from_slice(&self.r);
        out.extend_from_slice(&self.s);

        debug_assert_eq!(out.len(), BLOCK_HEADER_LENGTH);
        Ok(out)
    }

    pub fn block_number(&self) -> U256 {
        self.block_number
    }

    pub fn number_of_tx_in_block(&self) -> U256 {
        self.number_of_tx_in_block
    }

    pub fn parent_hash(&self) -> &[u8; HASH_LENGTH] {
        &self.parent_hash
    }

    pub fn merkle_root(&self) -> &[u8; HASH_LENGTH] {
        &self.merkle_root
    }

    pub fn v(&self) -> U256 {
        self.v
    }

    pub fn r(&self) -> &[u8; HASH_LENGTH] {
        &self.r
    }

    pub fn s(&self) -> &[u8; HASH_LENGTH] {
        &self.s
    }
}

fn pad_hash(field_spec: &FieldSpec, bytes: &[u8]) -> Result<[u8; HASH_LENGTH], ValidationError> {
    let mut out = [0u8; HASH_LENGTH];
    let padded = field_spec.pad_bytes(bytes)?;
    out.copy_from_slice(&padded);
    Ok(out)
}

/// Walks a buffer in fixed-size field segments
struct Segments<'a> {
    data: &'a [u8],
}

impl<'a> Segments<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    fn next(&mut self, field_spec: &FieldSpec) -> &'a [u8] {
        let (segment, rest) = self.data.split_at(field_spec.byte_length);
        self.data = rest;
        segment
    }
}
