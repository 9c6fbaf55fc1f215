use primitive_types::U256;
use tracing::{debug, warn};

use super::transaction::Transaction;
use crate::codec::fields::{R, S, V};
use crate::codec::RlpNode;
use crate::error::{PlasmaResult, StructureError, ValidationError};

/// A transaction body with its detached recoverable signature.
///
/// Wire form is `[tx_body, v, r, s]`. `r` and `s` are carried exactly as
/// received. Every other field must use its fixed width, so re-encoding a
/// decoded transaction reproduces the original bytes, which remote parties
/// hash for signature checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    transaction: Transaction,
    v: U256,
    r: Vec<u8>,
    s: Vec<u8>,
}

impl SignedTransaction {
    pub fn new(transaction: Transaction, v: U256, r: Vec<u8>, s: Vec<u8>) -> PlasmaResult<Self> {
        Self::validate(&v, &r, &s)?;
        Ok(Self {
            transaction,
            v,
            r,
            s,
        })
    }

    pub fn validate(v: &U256, r: &[u8], s: &[u8]) -> Result<(), ValidationError> {
        V.validate_recovery_id(v)?;
        R.validate_bytes(r)?;
        S.validate_bytes(s)?;
        Ok(())
    }

    pub fn decode(data: &[u8]) -> PlasmaResult<Self> {
        let node = RlpNode::decode(data)?;
        let items = node.as_list_of("signed transaction", 4)?;

        let transaction = Transaction::from_rlp(&items[0])?;
        let v = V.decode(items[1].as_bytes("v")?)?;
        let r = items[2].as_bytes("r")?.to_vec();
        let s = items[3].as_bytes("s")?.to_vec();

        let signed = Self::new(transaction, v, r, s)?;
        if signed.encode()? != data {
            warn!(
                length = data.len(),
                "Rejected signed transaction with non fixed-width fields"
            );
            return Err(StructureError::NonCanonical("signed transaction").into());
        }
        debug!(length = data.len(), v = %signed.v, "Decoded signed transaction");
        Ok(signed)
    }

    pub fn to_rlp(&self) -> PlasmaResult<RlpNode> {
        Ok(RlpNode::List(vec![
            self.transaction.to_rlp()?,
            V.encode(&self.v)?.into(),
            self.r.clone().into(),
            self.s.clone().into(),
        ]))
    }

    pub fn encode(&self) -> PlasmaResult<Vec<u8>> {
        Ok(self.to_rlp()?.encode())
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn v(&self) -> U256 {
        self.v
    }

    pub fn r(&self) -> &[u8] {
        &self.r
    }

    pub fn s(&self) -> &[u8] {
        &self.s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::fields::Field;
    use crate::error::PlasmaError;
    use crate::types::TransactionInput;
    use crate::types::TransactionType;

    fn empty_signed() -> SignedTransaction {
        SignedTransaction::new(
            Transaction::new(TransactionType::Fund, vec![], vec![]),
            U256::from(27),
            vec![0x11; 32],
            vec![0x22; 32],
        )
        .unwrap()
    }

    #[test]
    fn test_signed_roundtrip() {
        let signed = empty_signed();
        let data = signed.encode().unwrap();
        let decoded = SignedTransaction::decode(&data).unwrap();
        assert_eq!(decoded, signed);
        assert_eq!(decoded.encode().unwrap(), data);
    }

    #[test]
    fn test_signed_rejects_bad_recovery_id() {
        let err = SignedTransaction::new(
            Transaction::new(TransactionType::Split, vec![], vec![]),
            U256::from(0),
            vec![],
            vec![],
        )
        .unwrap_err();
        assert_eq!(
            err,
            PlasmaError::Validation(ValidationError::RecoveryId {
                field: Field::V,
                value: U256::zero(),
            })
        );
    }

    #[test]
    fn test_signed_rejects_long_signature_scalar() {
        let err = SignedTransaction::new(
            Transaction::new(TransactionType::Split, vec![], vec![]),
            U256::from(28),
            vec![0x01; 33],
            vec![],
        )
        .unwrap_err();
        assert_eq!(
            err,
            PlasmaError::Validation(ValidationError::ByteLength {
                field: Field::R,
                length: 33,
                max: 32,
            })
        );
    }

    #[test]
    fn test_signed_rejects_missing_signature() {
        let body = Transaction::new(TransactionType::Split, vec![], vec![])
            .to_rlp()
            .unwrap();
        let data = RlpNode::List(vec![body]).encode();
        assert_eq!(
            SignedTransaction::decode(&data).unwrap_err(),
            PlasmaError::DecodeStructure(StructureError::WrongElementCount {
                what: "signed transaction",
                expected: 4,
                actual: 1,
            })
        );
    }

    fn bytes(data: &[u8]) -> RlpNode {
        RlpNode::Bytes(data.to_vec())
    }

    fn envelope(body: RlpNode, v: &[u8]) -> Vec<u8> {
        RlpNode::List(vec![body, bytes(v), bytes(&[0x01]), bytes(&[0x02])]).encode()
    }

    #[test]
    fn test_signed_decode_rejects_bad_recovery_id() {
        let body = Transaction::new(TransactionType::Split, vec![], vec![])
            .to_rlp()
            .unwrap();
        let data = envelope(body, &[0x1d]);
        assert_eq!(
            SignedTransaction::decode(&data).unwrap_err(),
            PlasmaError::Validation(ValidationError::RecoveryId {
                field: Field::V,
                value: U256::from(29),
            })
        );
    }

    #[test]
    fn test_signed_decode_rejects_minimal_input_fields() {
        // [[1, [[0x58, "", "", 5]], []], 27, 0x01, 0x02]
        let input = RlpNode::List(vec![bytes(&[0x58]), bytes(&[]), bytes(&[]), bytes(&[0x05])]);
        let body = RlpNode::List(vec![
            bytes(&[0x01]),
            RlpNode::List(vec![input.clone()]),
            RlpNode::List(vec![]),
        ]);
        let data = envelope(body, &[0x1b]);
        assert_eq!(
            SignedTransaction::decode(&data).unwrap_err(),
            PlasmaError::DecodeStructure(StructureError::NonCanonical("signed transaction"))
        );

        // the same input stays acceptable on its own
        let standalone = TransactionInput::decode(&input.encode()).unwrap();
        assert_eq!(standalone.block_number(), U256::from(0x58));
    }

    #[test]
    fn test_signed_decode_rejects_padded_recovery_id() {
        let body = Transaction::new(TransactionType::Merge, vec![], vec![])
            .to_rlp()
            .unwrap();
        let data = envelope(body.clone(), &[0x00, 0x1b]);
        assert_eq!(
            SignedTransaction::decode(&data).unwrap_err(),
            PlasmaError::DecodeStructure(StructureError::NonCanonical("signed transaction"))
        );

        let data = envelope(body, &[0x1b]);
        let decoded = SignedTransaction::decode(&data).unwrap();
        assert_eq!(decoded.encode().unwrap(), data);
    }
}
