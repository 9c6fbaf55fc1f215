use primitive_types::U256;

use super::address::{Address, ADDRESS_LENGTH};
use crate::codec::fields::{AMOUNT, OUTPUT_NUMBER_IN_TX};
use crate::codec::RlpNode;
use crate::error::{PlasmaError, PlasmaResult, ValidationError};

const OUTPUT_FIELDS: usize = 3;

/// A payment target inside a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionOutput {
    output_number_in_tx: U256,
    receiver: Address,
    amount: U256,
}

impl TransactionOutput {
    pub fn new(output_number_in_tx: U256, receiver: Address, amount: U256) -> PlasmaResult<Self> {
        Self::validate(&output_number_in_tx, &amount)?;
        Ok(Self {
            output_number_in_tx,
            receiver,
            amount,
        })
    }

    pub fn validate(output_number_in_tx: &U256, amount: &U256) -> Result<(), ValidationError> {
        OUTPUT_NUMBER_IN_TX.validate(output_number_in_tx)?;
        AMOUNT.validate(amount)?;
        Ok(())
    }

    /// Decodes an output from its standalone RLP form. A single redundant
    /// list wrapping around the three fields is accepted.
    pub fn decode(data: &[u8]) -> PlasmaResult<Self> {
        let node = RlpNode::decode(data)?;
        Self::from_rlp(node.unwrap_single())
    }

    pub fn from_rlp(node: &RlpNode) -> PlasmaResult<Self> {
        let items = node.as_list_of("transaction output", OUTPUT_FIELDS)?;
        let output_number_in_tx =
            OUTPUT_NUMBER_IN_TX.decode(items[0].as_bytes("output number")?)?;

        let receiver_bytes = items[1].as_bytes("receiver address")?;
        let receiver =
            Address::try_from(receiver_bytes).map_err(|_| PlasmaError::LengthMismatch {
                what: "receiver address",
                expected: ADDRESS_LENGTH,
                actual: receiver_bytes.len(),
            })?;

        let amount = AMOUNT.decode(items[2].as_bytes("amount")?)?;

        Self::new(output_number_in_tx, receiver, amount)
    }

    pub fn to_rlp(&self) -> PlasmaResult<RlpNode> {
        Ok(RlpNode::List(vec![
            OUTPUT_NUMBER_IN_TX.encode(&self.output_number_in_tx)?.into(),
            self.receiver.as_bytes().to_vec().into(),
            AMOUNT.encode(&self.amount)?.into(),
        ]))
    }

    pub fn encode(&self) -> PlasmaResult<Vec<u8>> {
        Ok(self.to_rlp()?.encode())
    }

    pub fn output_number_in_tx(&self) -> U256 {
        self.output_number_in_tx
    }

    pub fn receiver(&self) -> &Address {
        &self.receiver
    }

    pub fn amount(&self) -> U256 {
        self.amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::fields::Field;
    use crate::error::StructureError;

    fn receiver() -> Address {
        "0x6891dc3962e710f0ff711b9c6acc26133fd35cb4".parse().unwrap()
    }

    #[test]
    fn test_output_roundtrip() {
        let output = TransactionOutput::new(
            U256::from(10),
            receiver(),
            U256::from(500_000_000_000_000u64),
        )
        .unwrap();
        let data = output.encode().unwrap();
        // list header + 1 + (1+20) + (1+32)
        assert_eq!(data.len(), 2 + 1 + 21 + 33);
        assert_eq!(TransactionOutput::decode(&data).unwrap(), output);
    }

    #[test]
    fn test_output_tolerates_extra_wrapping() {
        let output = TransactionOutput::new(U256::zero(), receiver(), U256::from(7)).unwrap();
        let wrapped = RlpNode::List(vec![output.to_rlp().unwrap()]);
        assert_eq!(TransactionOutput::decode(&wrapped.encode()).unwrap(), output);
    }

    #[test]
    fn test_output_rejects_short_address() {
        let node = RlpNode::List(vec![
            RlpNode::Bytes(vec![0]),
            RlpNode::Bytes(vec![0x68; 19]),
            RlpNode::Bytes(vec![1]),
        ]);
        assert_eq!(
            TransactionOutput::decode(&node.encode()).unwrap_err(),
            PlasmaError::LengthMismatch {
                what: "receiver address",
                expected: 20,
                actual: 19,
            }
        );
    }

    #[test]
    fn test_output_rejects_wrong_shape() {
        let data = RlpNode::Bytes(vec![1, 2, 3]).encode();
        assert_eq!(
            TransactionOutput::decode(&data).unwrap_err(),
            PlasmaError::DecodeStructure(StructureError::NotAList("transaction output"))
        );

        let node = RlpNode::List(vec![RlpNode::Bytes(vec![0]), RlpNode::Bytes(vec![1])]);
        assert!(matches!(
            TransactionOutput::decode(&node.encode()),
            Err(PlasmaError::DecodeStructure(StructureError::WrongElementCount {
                expected: 3,
                actual: 2,
                ..
            }))
        ));
    }

    #[test]
    fn test_output_rejects_overwide_amount() {
        let mut amount = vec![0xff; 33];
        amount[0] = 1;
        let node = RlpNode::List(vec![
            RlpNode::Bytes(vec![0]),
            RlpNode::Bytes(receiver().as_bytes().to_vec()),
            RlpNode::Bytes(amount),
        ]);
        assert!(matches!(
            TransactionOutput::decode(&node.encode()),
            Err(PlasmaError::Validation(ValidationError::BitWidth {
                field: Field::Amount,
                ..
            }))
        ));

        let err = TransactionOutput::new(U256::from(300), receiver(), U256::one()).unwrap_err();
        assert!(matches!(
            err,
            PlasmaError::Validation(ValidationError::BitWidth {
                field: Field::OutputNumberInTx,
                ..
            })
        ));
    }

    #[test]
    fn test_independently_built_outputs_are_equal() {
        let a = TransactionOutput::new(U256::from(2), receiver(), U256::from(9)).unwrap();
        let b = TransactionOutput::new(U256::from(2), receiver(), U256::from(9)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.encode().unwrap(), b.encode().unwrap());
    }
}
