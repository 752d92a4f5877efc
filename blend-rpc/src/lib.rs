//! Ledger RPC surface used by the transaction pipeline
//!
//! [`LedgerRpc`] is the narrow set of calls the pipeline needs from a
//! Soroban RPC endpoint. [`HttpRpcClient`] speaks JSON-RPC 2.0 over HTTP;
//! tests and alternative transports implement the trait directly.

use async_trait::async_trait;
use blend_primitives::{AccountCursor, AccountId, TransactionEnvelope, TxHash};
use std::sync::Arc;
use thiserror::Error;

mod http;
mod model;

pub use http::*;
pub use model::*;

#[derive(Debug, Error)]
pub enum Error {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("unexpected http status {0}")]
    HttpStatus(u16),

    /// Error object returned by the endpoint itself
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("can't decode rpc response: {0}")]
    Decode(String),

    #[error("account {0} not found")]
    AccountNotFound(AccountId),

    #[error("can't encode envelope: {0}")]
    Codec(#[from] blend_codec::Error),

    #[error("invalid rpc config: {0}")]
    Config(String),
}

/// Calls the pipeline makes against the ledger
#[async_trait]
pub trait LedgerRpc: Send + Sync {
    /// Current sequence of an account
    async fn get_account(&self, account: &AccountId) -> Result<AccountCursor, Error>;

    async fn simulate_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<SimulateResponse, Error>;

    async fn send_transaction(&self, envelope: &TransactionEnvelope)
        -> Result<SendResponse, Error>;

    async fn get_transaction(&self, hash: &TxHash) -> Result<GetTransactionResponse, Error>;

    async fn get_latest_ledger(&self) -> Result<LatestLedger, Error>;
}

#[async_trait]
impl<T> LedgerRpc for Arc<T>
where
    T: LedgerRpc + ?Sized,
{
    async fn get_account(&self, account: &AccountId) -> Result<AccountCursor, Error> {
        (**self).get_account(account).await
    }

    async fn simulate_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<SimulateResponse, Error> {
        (**self).simulate_transaction(envelope).await
    }

    async fn send_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<SendResponse, Error> {
        (**self).send_transaction(envelope).await
    }

    async fn get_transaction(&self, hash: &TxHash) -> Result<GetTransactionResponse, Error> {
        (**self).get_transaction(hash).await
    }

    async fn get_latest_ledger(&self) -> Result<LatestLedger, Error> {
        (**self).get_latest_ledger().await
    }
}
