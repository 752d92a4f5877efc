use blend_primitives::{AuthEntry, SorobanData, Transaction};
use tracing::debug;

use crate::TxBuilderError;

pub(crate) fn total_fee(inclusion_fee: u32, resource_fee: i64) -> Result<u32, TxBuilderError> {
    i64::from(inclusion_fee)
        .checked_add(resource_fee)
        .and_then(|x| u32::try_from(x).ok())
        .ok_or(TxBuilderError::FeeOverflow)
}

/// Merges a successful simulation into the transaction it was run on.
///
/// The simulated resource data replaces whatever the transaction carried,
/// the fee becomes the inclusion fee plus `min_resource_fee`, and the
/// authorization entries land on the host function operation unless the
/// caller already provided its own.
pub fn assemble(
    mut tx: Transaction,
    mut data: SorobanData,
    min_resource_fee: i64,
    auth: Vec<AuthEntry>,
) -> Result<Transaction, TxBuilderError> {
    let operation = match tx.operations.as_mut_slice() {
        [op] if op.kind.is_soroban() => op,
        [] => return Err(TxBuilderError::NoOperations),
        [_] => return Err(TxBuilderError::NotSoroban),
        _ => return Err(TxBuilderError::MixedSorobanOperations),
    };

    if operation.kind.accepts_auth() && operation.auth.is_empty() {
        operation.auth = auth;
    }

    let inclusion_fee =
        u32::try_from(tx.inclusion_fee()).map_err(|_| TxBuilderError::FeeOverflow)?;

    data.resource_fee = data.resource_fee.max(min_resource_fee);
    tx.fee = total_fee(inclusion_fee, data.resource_fee)?;

    debug!(
        fee = tx.fee,
        instructions = data.instructions,
        read_only = data.footprint.read_only.len(),
        read_write = data.footprint.read_write.len(),
        "assembled simulated resources"
    );

    tx.soroban_data = Some(data);

    Ok(tx)
}
