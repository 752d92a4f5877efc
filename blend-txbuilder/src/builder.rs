use blend_primitives::{
    AccountCursor, Operation, SorobanData, TimeBounds, Transaction, MAX_OPERATIONS,
};

use crate::{TxBuilderError, TxBuilderOptions};

/// Accumulates the parts of a transaction sourced from a freshly fetched
/// account cursor.
///
/// ```
/// # use blend_txbuilder::prelude::*;
/// # use blend_primitives::{AccountCursor, Operation, OperationKind};
/// let source = AccountCursor::new(
///     "3b6a27bcceb6a42d62a3a8d02a6f0d73653215771de243a63ac048a18b59da29".parse().unwrap(),
///     10,
/// );
///
/// let tx = TransactionBuilder::new(source, &TxBuilderOptions::testnet())
///     .operation(Operation::new(OperationKind::Payment, vec![1, 2, 3]))
///     .build()
///     .unwrap();
///
/// assert_eq!(tx.sequence, 11);
/// assert_eq!(tx.fee, BASE_FEE);
/// ```
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    source: AccountCursor,
    fee: u32,
    time_bounds: Option<TimeBounds>,
    operations: Vec<Operation>,
    soroban_data: Option<SorobanData>,
}

impl TransactionBuilder {
    pub fn new(source: AccountCursor, options: &TxBuilderOptions) -> Self {
        Self {
            source,
            fee: options.fee,
            time_bounds: options.timebounds,
            operations: vec![],
            soroban_data: None,
        }
    }

    pub fn operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    pub fn soroban_data(mut self, data: SorobanData) -> Self {
        self.soroban_data = Some(data);
        self
    }

    pub fn time_bounds(mut self, bounds: TimeBounds) -> Self {
        self.time_bounds = Some(bounds);
        self
    }

    pub fn build(self) -> Result<Transaction, TxBuilderError> {
        let count = self.operations.len();

        if count == 0 {
            return Err(TxBuilderError::NoOperations);
        }

        if count > MAX_OPERATIONS {
            return Err(TxBuilderError::TooManyOperations(count));
        }

        let soroban = self.operations.iter().any(|op| op.kind.is_soroban());

        if soroban && count > 1 {
            return Err(TxBuilderError::MixedSorobanOperations);
        }

        if !soroban && self.soroban_data.is_some() {
            return Err(TxBuilderError::NotSoroban);
        }

        if let Some(bounds) = &self.time_bounds {
            if bounds.max_time != 0 && bounds.max_time < bounds.min_time {
                return Err(TxBuilderError::InvalidTimeBounds);
            }
        }

        let inclusion_fee = u32::try_from(count)
            .ok()
            .and_then(|n| self.fee.checked_mul(n))
            .ok_or(TxBuilderError::FeeOverflow)?;

        let resource_fee = self
            .soroban_data
            .as_ref()
            .map(|x| x.resource_fee)
            .unwrap_or_default();

        let fee = crate::assemble::total_fee(inclusion_fee, resource_fee)?;

        // unbounded windows are left out of the transaction entirely
        let time_bounds = self.time_bounds.filter(|x| !x.is_unbounded());

        Ok(Transaction {
            source: self.source.account_id,
            fee,
            sequence: self.source.next_sequence(),
            time_bounds,
            operations: self.operations,
            soroban_data: self.soroban_data,
        })
    }
}
