//! JSON views of decoded chain data. Amounts and counters are printed as
//! decimal strings since they may exceed what JSON numbers hold exactly.

use plasma_common::{
    BlockHeader, PlasmaResult, SignedTransaction, Transaction, TransactionInput,
    TransactionOutput,
};
use serde::Serialize;

pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parses hex input with or without a `0x` prefix
pub fn from_hex(data: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let data = data.trim();
    let data = data
        .strip_prefix("0x")
        .or_else(|| data.strip_prefix("0X"))
        .unwrap_or(data);
    hex::decode(data)
}

#[derive(Serialize, Debug)]
pub struct HeaderView {
    pub block_number: String,
    pub number_of_tx_in_block: String,
    pub parent_hash: String,
    pub merkle_root: String,
    pub v: String,
    pub r: String,
    pub s: String,
}

impl From<&BlockHeader> for HeaderView {
    fn from(header: &BlockHeader) -> Self {
        Self {
            block_number: header.block_number().to_string(),
            number_of_tx_in_block: header.number_of_tx_in_block().to_string(),
            parent_hash: to_hex(header.parent_hash()),
            merkle_root: to_hex(header.merkle_root()),
            v: header.v().to_string(),
            r: to_hex(header.r()),
            s: to_hex(header.s()),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct InputView {
    pub block_number: String,
    pub tx_number_in_block: String,
    pub output_number_in_tx: String,
    pub amount: String,
}

impl From<&TransactionInput> for InputView {
    fn from(input: &TransactionInput) -> Self {
        Self {
            block_number: input.block_number().to_string(),
            tx_number_in_block: input.tx_number_in_block().to_string(),
            output_number_in_tx: input.output_number_in_tx().to_string(),
            amount: input.amount().to_string(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct OutputView {
    pub output_number_in_tx: String,
    pub receiver: String,
    pub amount: String,
}

impl From<&TransactionOutput> for OutputView {
    fn from(output: &TransactionOutput) -> Self {
        Self {
            output_number_in_tx: output.output_number_in_tx().to_string(),
            receiver: output.receiver().to_string(),
            amount: output.amount().to_string(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct TransactionView {
    pub tx_type: String,
    pub inputs: Vec<InputView>,
    pub outputs: Vec<OutputView>,
    pub encoded: String,
}

impl TryFrom<&Transaction> for TransactionView {
    type Error = plasma_common::PlasmaError;

    fn try_from(tx: &Transaction) -> PlasmaResult<Self> {
        Ok(Self {
            tx_type: tx.tx_type().to_string(),
            inputs: tx.inputs().iter().map(InputView::from).collect(),
            outputs: tx.outputs().iter().map(OutputView::from).collect(),
            encoded: to_hex(&tx.encode()?),
        })
    }
}

#[derive(Serialize, Debug)]
pub struct SignedTransactionView {
    pub transaction: TransactionView,
    pub v: String,
    pub r: String,
    pub s: String,
    pub encoded: String,
}

impl TryFrom<&SignedTransaction> for SignedTransactionView {
    type Error = plasma_common::PlasmaError;

    fn try_from(signed: &SignedTransaction) -> PlasmaResult<Self> {
        Ok(Self {
            transaction: TransactionView::try_from(signed.transaction())?,
            v: signed.v().to_string(),
            r: to_hex(signed.r()),
            s: to_hex(signed.s()),
            encoded: to_hex(&signed.encode()?),
        })
    }
}
