use blend_primitives::AccountId;
use blend_txbuilder::TxBuilderOptions;
use blend_wallet::{KeypairSigner, PrivateKey};
use std::time::Duration;

/// Who pays for and signs a transaction, and how it is built.
///
/// Passed explicitly to every pipeline call; two calls with different
/// params never share anything.
#[derive(Debug, Clone)]
pub struct TxParams<S> {
    pub account: AccountId,
    pub signer: S,
    pub options: TxBuilderOptions,
}

impl<S> TxParams<S> {
    pub fn new(account: AccountId, signer: S, options: TxBuilderOptions) -> Self {
        Self {
            account,
            signer,
            options,
        }
    }
}

impl TxParams<KeypairSigner> {
    /// Params for an account that signs with its own in-memory key
    pub fn for_keypair(key: PrivateKey, options: TxBuilderOptions) -> Self {
        let account = key.account_id();
        Self::new(account, KeypairSigner::new(key), options)
    }
}

/// Timing of submission retries and confirmation polling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Pause between two status checks, and between resubmissions
    pub poll_interval: Duration,

    /// How long a `TRY_AGAIN_LATER` submission keeps being retried
    pub submit_window: Duration,

    /// Upper bound on the wait for a terminal status; `None` waits for as
    /// long as the ledger keeps answering
    pub confirm_timeout: Option<Duration>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            submit_window: Duration::from_secs(20),
            confirm_timeout: None,
        }
    }
}

impl PollPolicy {
    pub fn with_confirm_timeout(mut self, timeout: Duration) -> Self {
        self.confirm_timeout = Some(timeout);
        self
    }
}
