use blend_primitives::{OperationKind, TimeBounds, TESTNET_PASSPHRASE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod assemble;
mod builder;

pub mod prelude;

/// Minimum per-operation inclusion fee, in stroops
pub const BASE_FEE: u32 = 100;

/// Fee, validity window and network a transaction is built for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxBuilderOptions {
    /// Inclusion fee per operation
    pub fee: u32,

    /// Validity window; `None` builds a transaction that never expires
    #[serde(default)]
    pub timebounds: Option<TimeBounds>,

    pub network_passphrase: String,
}

impl TxBuilderOptions {
    pub fn new(network_passphrase: impl Into<String>) -> Self {
        Self {
            fee: BASE_FEE,
            timebounds: None,
            network_passphrase: network_passphrase.into(),
        }
    }

    pub fn testnet() -> Self {
        Self::new(TESTNET_PASSPHRASE)
    }

    pub fn with_fee(mut self, fee: u32) -> Self {
        self.fee = fee;
        self
    }

    pub fn with_timebounds(mut self, timebounds: TimeBounds) -> Self {
        self.timebounds = Some(timebounds);
        self
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TxBuilderError {
    /// The built transaction has no operations
    #[error("transaction has no operations")]
    NoOperations,

    #[error("transaction has {0} operations, more than allowed")]
    TooManyOperations(usize),

    /// Soroban operations must be the only operation of their transaction
    #[error("soroban operations can't be combined with other operations")]
    MixedSorobanOperations,

    /// Resource data was supplied for a transaction without soroban operations
    #[error("resource data given to a transaction without soroban operations")]
    NotSoroban,

    /// A soroban operation was sent down a path that never simulates it
    #[error("{0:?} operations need simulated resources before signing")]
    RequiresSimulation(OperationKind),

    #[error("fee does not fit in a transaction")]
    FeeOverflow,

    #[error("time bounds end before they start")]
    InvalidTimeBounds,
}
