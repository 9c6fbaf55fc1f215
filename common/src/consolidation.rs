//! Output consolidation: fold a transaction's smallest outputs into one.
//!
//! Both policies assume every output pays the same receiver, which is the
//! case when a single owner tidies up their own small outputs.

use primitive_types::U256;
use tracing::debug;

use crate::codec::fields::Field;
use crate::error::{PlasmaResult, ValidationError};
use crate::types::{Transaction, TransactionOutput};

/// Stopping rule for selecting outputs to merge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Merge smallest outputs while their sum stays at or below the ceiling
    UntilAmount(U256),
    /// Merge smallest outputs until the transaction has at most this many
    ForCount(usize),
}

impl Transaction {
    /// Merges the smallest outputs whose running total stays within
    /// `max_amount`. Returns `Ok(None)` when fewer than two outputs fit.
    pub fn merge_outputs_until(&self, max_amount: U256) -> PlasmaResult<Option<Transaction>> {
        self.merge_outputs(MergePolicy::UntilAmount(max_amount))
    }

    /// Merges the smallest outputs so that exactly `max_outputs` remain.
    /// Returns `Ok(None)` when the transaction is already small enough or
    /// `max_outputs` is zero.
    pub fn merge_outputs_for_count(&self, max_outputs: usize) -> PlasmaResult<Option<Transaction>> {
        self.merge_outputs(MergePolicy::ForCount(max_outputs))
    }

    /// Applies a merge policy, producing a new transaction with the merged
    /// output last and every output renumbered by position.
    pub fn merge_outputs(&self, policy: MergePolicy) -> PlasmaResult<Option<Transaction>> {
        let Some(first) = self.outputs().first() else {
            return Ok(None);
        };
        let receiver = *first.receiver();

        let mut sorted: Vec<&TransactionOutput> = self.outputs().iter().collect();
        sorted.sort_by_key(|output| output.amount());

        let (count, merged_amount) = match policy {
            MergePolicy::UntilAmount(max_amount) => select_until_amount(&sorted, max_amount),
            MergePolicy::ForCount(max_outputs) => select_for_count(&sorted, max_outputs)?,
        };

        if count < 2 {
            debug!(?policy, selected = count, "Nothing to merge");
            return Ok(None);
        }

        let mut outputs = Vec::with_capacity(sorted.len() - count + 1);
        for (index, output) in sorted[count..].iter().enumerate() {
            outputs.push(TransactionOutput::new(
                U256::from(index as u64),
                *output.receiver(),
                output.amount(),
            )?);
        }
        outputs.push(TransactionOutput::new(
            U256::from(outputs.len() as u64),
            receiver,
            merged_amount,
        )?);

        debug!(
            ?policy,
            merged = count,
            %merged_amount,
            outputs = outputs.len(),
            "Merged transaction outputs"
        );
        Ok(Some(Transaction::new(
            self.tx_type(),
            self.inputs().to_vec(),
            outputs,
        )))
    }
}

/// Greedy prefix of ascending outputs whose sum stays within `max_amount`
fn select_until_amount(sorted: &[&TransactionOutput], max_amount: U256) -> (usize, U256) {
    let mut count = 0;
    let mut merged = U256::zero();
    for output in sorted {
        if output.amount() > max_amount - merged {
            break;
        }
        merged += output.amount();
        count += 1;
    }
    (count, merged)
}

/// Smallest outputs to fold so that `max_outputs` remain
fn select_for_count(
    sorted: &[&TransactionOutput],
    max_outputs: usize,
) -> Result<(usize, U256), ValidationError> {
    if max_outputs == 0 || sorted.len() <= max_outputs {
        return Ok((0, U256::zero()));
    }

    let count = sorted.len() - max_outputs + 1;
    let mut merged = U256::zero();
    for output in &sorted[..count] {
        let (sum, overflow) = merged.overflowing_add(output.amount());
        if overflow {
            return Err(ValidationError::BitWidth {
                field: Field::Amount,
                bits: 257,
                max: 256,
            });
        }
        merged = sum;
    }
    Ok((count, merged))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlasmaError;
    use crate::types::{Address, TransactionInput, TransactionType};

    fn address(s: &str) -> Address {
        s.parse().unwrap()
    }

    fn output(index: u64, amount: u64) -> TransactionOutput {
        TransactionOutput::new(
            U256::from(index),
            address("0x6891dc3962e710f0ff711b9c6acc26133fd35cb4"),
            U256::from(amount),
        )
        .unwrap()
    }

    fn transaction(amounts: &[u64]) -> Transaction {
        let input =
            TransactionInput::new(U256::from(10), U256::one(), U256::from(3), U256::from(5))
                .unwrap();
        let outputs = amounts
            .iter()
            .enumerate()
            .map(|(i, amount)| output(i as u64, *amount))
            .collect();
        Transaction::new(TransactionType::Split, vec![input], outputs)
    }

    fn amounts(tx: &Transaction) -> Vec<u64> {
        tx.outputs().iter().map(|o| o.amount().as_u64()).collect()
    }

    fn indices(tx: &Transaction) -> Vec<u64> {
        tx.outputs()
            .iter()
            .map(|o| o.output_number_in_tx().as_u64())
            .collect()
    }

    #[test]
    fn test_merge_until_amount() {
        let tx = transaction(&[3, 2, 4]);
        let merged = tx.merge_outputs_until(U256::from(6)).unwrap().unwrap();
        assert_eq!(amounts(&merged), vec![4, 5]);
        assert_eq!(indices(&merged), vec![0, 1]);
        assert_eq!(merged.inputs(), tx.inputs());
        assert_eq!(merged.tx_type(), TransactionType::Split);
    }

    #[test]
    fn test_merge_until_amount_stops_at_first_overflow() {
        let tx = transaction(&[3, 3, 2]);
        let merged = tx.merge_outputs_until(U256::from(6)).unwrap().unwrap();
        assert_eq!(amounts(&merged), vec![3, 5]);
    }

    #[test]
    fn test_merge_until_amount_everything_fits() {
        let tx = transaction(&[1, 2, 3]);
        let merged = tx.merge_outputs_until(U256::from(100)).unwrap().unwrap();
        assert_eq!(amounts(&merged), vec![6]);
        assert_eq!(indices(&merged), vec![0]);
    }

    #[test]
    fn test_merge_until_amount_with_max_ceiling() {
        let tx = transaction(&[1, 2]);
        let merged = tx.merge_outputs_until(U256::MAX).unwrap().unwrap();
        assert_eq!(amounts(&merged), vec![3]);
    }

    #[test]
    fn test_merge_refused_when_ceiling_too_small() {
        let tx = transaction(&[3, 2, 4]);
        let before = tx.clone();
        assert_eq!(tx.merge_outputs_until(U256::from(4)).unwrap(), None);
        assert_eq!(tx.merge_outputs_until(U256::from(1)).unwrap(), None);
        assert_eq!(tx, before);
    }

    #[test]
    fn test_merge_for_count() {
        let tx = transaction(&[3, 2, 4]);
        let merged = tx.merge_outputs_for_count(2).unwrap().unwrap();
        assert_eq!(merged.outputs().len(), 2);
        assert_eq!(amounts(&merged), vec![4, 5]);
        assert_eq!(indices(&merged), vec![0, 1]);
    }

    #[test]
    fn test_merge_for_count_down_to_one() {
        let tx = transaction(&[5, 1, 1, 2]);
        let merged = tx.merge_outputs_for_count(1).unwrap().unwrap();
        assert_eq!(amounts(&merged), vec![9]);
    }

    #[test]
    fn test_merge_for_count_refused() {
        let tx = transaction(&[3, 2, 4]);
        assert_eq!(tx.merge_outputs_for_count(3).unwrap(), None);
        assert_eq!(tx.merge_outputs_for_count(10).unwrap(), None);
        assert_eq!(tx.merge_outputs_for_count(0).unwrap(), None);
    }

    #[test]
    fn test_merge_empty_transaction() {
        let tx = Transaction::new(TransactionType::Split, vec![], vec![]);
        assert_eq!(tx.merge_outputs_until(U256::from(10)).unwrap(), None);
        assert_eq!(tx.merge_outputs_for_count(1).unwrap(), None);
    }

    #[test]
    fn test_merged_output_pays_first_receiver() {
        let first = address("0x6891dc3962e710f0ff711b9c6acc26133fd35cb4");
        let other = address("0x6891dc3962e710f0ff711b9c6acc26133fd35cb5");
        let outputs = vec![
            TransactionOutput::new(U256::zero(), first, U256::from(9)).unwrap(),
            TransactionOutput::new(U256::one(), other, U256::from(1)).unwrap(),
            TransactionOutput::new(U256::from(2), other, U256::from(2)).unwrap(),
        ];
        let tx = Transaction::new(TransactionType::Split, vec![], outputs);
        let merged = tx.merge_outputs_for_count(2).unwrap().unwrap();
        assert_eq!(merged.outputs()[0].receiver(), &first);
        assert_eq!(merged.outputs()[1].receiver(), &first);
        assert_eq!(merged.outputs()[1].amount(), U256::from(3));
    }

    #[test]
    fn test_merge_for_count_overflowing_sum() {
        let half = U256::MAX / 2 + 1;
        let owner = address("0x6891dc3962e710f0ff711b9c6acc26133fd35cb4");
        let outputs = vec![
            TransactionOutput::new(U256::zero(), owner, half).unwrap(),
            TransactionOutput::new(U256::one(), owner, half).unwrap(),
        ];
        let tx = Transaction::new(TransactionType::Split, vec![], outputs);
        assert!(matches!(
            tx.merge_outputs_for_count(1),
            Err(PlasmaError::Validation(ValidationError::BitWidth {
                field: Field::Amount,
                ..
            }))
        ));
    }
}
