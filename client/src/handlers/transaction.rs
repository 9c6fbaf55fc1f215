use std::io::Write;

use plasma_common::SignedTransaction;
use tracing::info;

use crate::error::ClientResult;
use crate::handlers::{write_json, Handler};
use crate::view::{from_hex, SignedTransactionView};

// Decodes a signed transaction and echoes its canonical encoding
pub struct TransactionHandler {
    data: String,
}

impl TransactionHandler {
    pub fn new(data: String) -> Self {
        Self { data }
    }
}

impl Handler for TransactionHandler {
    fn handle(&mut self, out: &mut dyn Write) -> ClientResult<()> {
        let bytes = from_hex(&self.data)?;
        let signed = SignedTransaction::decode(&bytes)?;
        info!(
            tx_type = %signed.transaction().tx_type(),
            inputs = signed.transaction().inputs().len(),
            outputs = signed.transaction().outputs().len(),
            "Decoded signed transaction"
        );
        write_json(out, &SignedTransactionView::try_from(&signed)?)
    }
}
