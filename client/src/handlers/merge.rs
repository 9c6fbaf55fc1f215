use std::io::Write;

use plasma_common::{MergePolicy, SignedTransaction, Transaction};
use primitive_types::U256;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::ClientResult;
use crate::handlers::{write_json, Handler};
use crate::view::{from_hex, TransactionView};

/// How far to consolidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeTarget {
    Amount(U256),
    Count(usize),
}

impl From<MergeTarget> for MergePolicy {
    fn from(target: MergeTarget) -> Self {
        match target {
            MergeTarget::Amount(amount) => MergePolicy::UntilAmount(amount),
            MergeTarget::Count(count) => MergePolicy::ForCount(count),
        }
    }
}

#[derive(Serialize, Debug)]
struct MergeView {
    merged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    transaction: Option<TransactionView>,
}

// Builds the unsigned transaction that consolidates small outputs
pub struct MergeHandler {
    data: String,
    unsigned: bool,
    target: MergeTarget,
}

impl MergeHandler {
    pub fn new(data: String, unsigned: bool, target: MergeTarget) -> Self {
        Self {
            data,
            unsigned,
            target,
        }
    }

    fn source_transaction(&self) -> ClientResult<Transaction> {
        let bytes = from_hex(&self.data)?;
        if self.unsigned {
            Ok(Transaction::decode(&bytes)?)
        } else {
            Ok(SignedTransaction::decode(&bytes)?.transaction().clone())
        }
    }
}

impl Handler for MergeHandler {
    fn handle(&mut self, out: &mut dyn Write) -> ClientResult<()> {
        let tx = self.source_transaction()?;
        let policy = MergePolicy::from(self.target);

        let view = match tx.merge_outputs(policy)? {
            Some(merged) => {
                info!(
                    before = tx.outputs().len(),
                    after = merged.outputs().len(),
                    "Consolidated outputs"
                );
                MergeView {
                    merged: true,
                    transaction: Some(TransactionView::try_from(&merged)?),
                }
            }
            None => {
                warn!(?policy, outputs = tx.outputs().len(), "No outputs to merge");
                MergeView {
                    merged: false,
                    transaction: None,
                }
            }
        };
        write_json(out, &view)
    }
}
