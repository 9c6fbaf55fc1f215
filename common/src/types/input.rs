use primitive_types::U256;

use crate::codec::fields::{AMOUNT, BLOCK_NUMBER, OUTPUT_NUMBER_IN_TX, TX_NUMBER_IN_BLOCK};
use crate::codec::RlpNode;
use crate::error::{PlasmaResult, ValidationError};

const INPUT_FIELDS: usize = 4;

/// Reference to an output of an earlier transaction, identified by
/// `(block_number, tx_number_in_block, output_number_in_tx)`, together with
/// the amount it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionInput {
    block_number: U256,
    tx_number_in_block: U256,
    output_number_in_tx: U256,
    amount: U256,
}

impl TransactionInput {
    pub fn new(
        block_number: U256,
        tx_number_in_block: U256,
        output_number_in_tx: U256,
        amount: U256,
    ) -> PlasmaResult<Self> {
        Self::validate(&block_number, &tx_number_in_block, &output_number_in_tx, &amount)?;
        Ok(Self {
            block_number,
            tx_number_in_block,
            output_number_in_tx,
            amount,
        })
    }

    pub fn validate(
        block_number: &U256,
        tx_number_in_block: &U256,
        output_number_in_tx: &U256,
        amount: &U256,
    ) -> Result<(), ValidationError> {
        BLOCK_NUMBER.validate(block_number)?;
        TX_NUMBER_IN_BLOCK.validate(tx_number_in_block)?;
        OUTPUT_NUMBER_IN_TX.validate(output_number_in_tx)?;
        AMOUNT.validate(amount)?;
        Ok(())
    }

    /// Decodes an input from its standalone RLP form
    pub fn decode(data: &[u8]) -> PlasmaResult<Self> {
        let node = RlpNode::decode(data)?;
        Self::from_rlp(node.unwrap_single())
    }

    /// Builds an input from the four-element RLP list. Elements may use any
    /// length, including minimal encodings.
    pub fn from_rlp(node: &RlpNode) -> PlasmaResult<Self> {
        let items = node.as_list_of("transaction input", INPUT_FIELDS)?;
        let block_number = BLOCK_NUMBER.decode(items[0].as_bytes("block number")?)?;
        let tx_number_in_block = TX_NUMBER_IN_BLOCK.decode(items[1].as_bytes("tx number")?)?;
        let output_number_in_tx =
            OUTPUT_NUMBER_IN_TX.decode(items[2].as_bytes("output number")?)?;
        let amount = AMOUNT.decode(items[3].as_bytes("amount")?)?;

        Self::new(block_number, tx_number_in_block, output_number_in_tx, amount)
    }

    pub fn to_rlp(&self) -> PlasmaResult<RlpNode> {
        Ok(RlpNode::List(vec![
            BLOCK_NUMBER.encode(&self.block_number)?.into(),
            TX_NUMBER_IN_BLOCK.encode(&self.tx_number_in_block)?.into(),
            OUTPUT_NUMBER_IN_TX.encode(&self.output_number_in_tx)?.into(),
            AMOUNT.encode(&self.amount)?.into(),
        ]))
    }

    pub fn encode(&self) -> PlasmaResult<Vec<u8>> {
        Ok(self.to_rlp()?.encode())
    }

    pub fn block_number(&self) -> U256 {
        self.block_number
    }

    pub fn tx_number_in_block(&self) -> U256 {
        self.tx_number_in_block
    }

    pub fn output_number_in_tx(&self) -> U256 {
        self.output_number_in_tx
    }

    pub fn amount(&self) -> U256 {
        self.amount
    }
}
