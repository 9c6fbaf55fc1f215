use std::fmt;

use primitive_types::U256;
use tracing::debug;

use super::input::TransactionInput;
use super::output::TransactionOutput;
use crate::codec::fields::TX_TYPE;
use crate::codec::RlpNode;
use crate::error::{PlasmaResult, ValidationError};

/// Kind of a plasma transaction, carried as a one-byte tag on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    Null = 0,
    Split = 1,
    Merge = 2,
    Fund = 4,
}

impl TransactionType {
    pub fn tag(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for TransactionType {
    type Error = ValidationError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(TransactionType::Null),
            1 => Ok(TransactionType::Split),
            2 => Ok(TransactionType::Merge),
            4 => Ok(TransactionType::Fund),
            other => Err(ValidationError::UnknownTransactionType(other)),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransactionType::Null => "null",
            TransactionType::Split => "split",
            TransactionType::Merge => "merge",
            TransactionType::Fund => "fund",
        };
        f.write_str(name)
    }
}

/// Unsigned transaction body: `[tx_type, [inputs...], [outputs...]]`.
///
/// Inputs and outputs keep their order; output indices are expected to
/// match positions but that is not enforced here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    tx_type: TransactionType,
    inputs: Vec<TransactionInput>,
    outputs: Vec<TransactionOutput>,
}

impl Transaction {
    pub fn new(
        tx_type: TransactionType,
        inputs: Vec<TransactionInput>,
        outputs: Vec<TransactionOutput>,
    ) -> Self {
        Self {
            tx_type,
            inputs,
            outputs,
        }
    }

    pub fn decode(data: &[u8]) -> PlasmaResult<Self> {
        Self::from_rlp(&RlpNode::decode(data)?)
    }

    pub fn from_rlp(node: &RlpNode) -> PlasmaResult<Self> {
        let items = node.as_list_of("transaction", 3)?;

        let tag = TX_TYPE.decode(items[0].as_bytes("transaction type")?)?;
        // TX_TYPE is one byte wide, so the tag fits after validation
        let tx_type = TransactionType::try_from(tag.low_u32() as u8)?;

        let inputs = items[1]
            .as_list("input list")?
            .iter()
            .map(TransactionInput::from_rlp)
            .collect::<PlasmaResult<Vec<_>>>()?;

        let outputs = items[2]
            .as_list("output list")?
            .iter()
            .map(TransactionOutput::from_rlp)
            .collect::<PlasmaResult<Vec<_>>>()?;

        debug!(
            %tx_type,
            inputs = inputs.len(),
            outputs = outputs.len(),
            "Decoded transaction"
        );
        Ok(Self::new(tx_type, inputs, outputs))
    }

    pub fn to_rlp(&self) -> PlasmaResult<RlpNode> {
        let inputs = self
            .inputs
            .iter()
            .map(TransactionInput::to_rlp)
            .collect::<PlasmaResult<Vec<_>>>()?;
        let outputs = self
            .outputs
            .iter()
            .map(TransactionOutput::to_rlp)
            .collect::<PlasmaResult<Vec<_>>>()?;

        Ok(RlpNode::List(vec![
            TX_TYPE.encode(&U256::from(self.tx_type.tag()))?.into(),
            RlpNode::List(inputs),
            RlpNode::List(outputs),
        ]))
    }

    pub fn encode(&self) -> PlasmaResult<Vec<u8>> {
        Ok(self.to_rlp()?.encode())
    }

    pub fn tx_type(&self) -> TransactionType {
        self.tx_type
    }

    pub fn inputs(&self) -> &[TransactionInput] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[TransactionOutput] {
        &self.outputs
    }
}
