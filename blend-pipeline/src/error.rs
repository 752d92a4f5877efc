use blend_rpc::{RestorePreamble, SimulateFailure};
use blend_primitives::TxHash;
use blend_txbuilder::TxBuilderError;
use blend_wallet::SignerError;
use std::{fmt, time::Duration};
use thiserror::Error;

use crate::ParseError;

/// What went wrong on the ledger side, as far as diagnostics tell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The contract returned one of its own error codes
    ContractError(u32),
    Trapped,
    Authorization,
    ResourceLimitExceeded,
    /// A ledger entry in the footprint is archived and must be restored
    ArchivedEntry,
    InsufficientFee,
    BadSequence,
    Unknown,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContractError(code) => write!(f, "contract error #{code}"),
            Self::Trapped => f.write_str("trapped"),
            Self::Authorization => f.write_str("authorization"),
            Self::ResourceLimitExceeded => f.write_str("resource limit exceeded"),
            Self::ArchivedEntry => f.write_str("archived entry"),
            Self::InsufficientFee => f.write_str("insufficient fee"),
            Self::BadSequence => f.write_str("bad sequence"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

const CONTRACT_ERROR: &str = "Error(Contract, #";

// matched against lowercased text, first hit wins
const MARKERS: &[(&str, FailureKind)] = &[
    ("archived", FailureKind::ArchivedEntry),
    ("error(auth", FailureKind::Authorization),
    ("bad_auth", FailureKind::Authorization),
    ("resource_limit_exceeded", FailureKind::ResourceLimitExceeded),
    ("error(budget", FailureKind::ResourceLimitExceeded),
    ("insufficient_fee", FailureKind::InsufficientFee),
    ("insufficient_refundable_fee", FailureKind::InsufficientFee),
    ("bad_seq", FailureKind::BadSequence),
    ("trapped", FailureKind::Trapped),
    ("error(wasmvm", FailureKind::Trapped),
];

fn contract_code(text: &str) -> Option<u32> {
    let start = text.find(CONTRACT_ERROR)? + CONTRACT_ERROR.len();
    let digits: String = text[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();

    digits.parse().ok()
}

/// Derives a [`FailureKind`] from a ledger result code and the diagnostic
/// events that came with it.
///
/// Contract error codes take precedence over every other marker, since a
/// contract failing on purpose usually drags generic host errors along.
pub fn classify(result_code: Option<&str>, events: &[String]) -> FailureKind {
    let texts: Vec<&str> = result_code
        .into_iter()
        .chain(events.iter().map(String::as_str))
        .collect();

    if let Some(code) = texts.iter().find_map(|x| contract_code(x)) {
        return FailureKind::ContractError(code);
    }

    let lowered: Vec<String> = texts.iter().map(|x| x.to_ascii_lowercase()).collect();

    MARKERS
        .iter()
        .find(|(marker, _)| lowered.iter().any(|x| x.contains(marker)))
        .map(|(_, kind)| *kind)
        .unwrap_or(FailureKind::Unknown)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationFailure {
    pub kind: FailureKind,
    pub message: String,
    pub events: Vec<String>,

    /// Present when the call needs archived entries restored first
    pub restore_preamble: Option<RestorePreamble>,
}

impl From<SimulateFailure> for SimulationFailure {
    fn from(failure: SimulateFailure) -> Self {
        let kind = match failure.restore_preamble {
            Some(_) => FailureKind::ArchivedEntry,
            None => classify(Some(failure.error.as_str()), &failure.events),
        };

        Self {
            kind,
            message: failure.error,
            events: failure.events,
            restore_preamble: failure.restore_preamble,
        }
    }
}

impl fmt::Display for SimulationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionFailure {
    pub kind: FailureKind,
    pub result_code: Option<String>,
    pub events: Vec<String>,
}

impl ExecutionFailure {
    pub fn new(result_code: Option<String>, events: Vec<String>) -> Self {
        Self {
            kind: classify(result_code.as_deref(), &events),
            result_code,
            events,
        }
    }
}

impl fmt::Display for ExecutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result_code {
            Some(code) => write!(f, "{} ({code})", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// Simulation refused the transaction; nothing was signed or sent
    #[error("simulation failed, {0}")]
    Simulation(SimulationFailure),

    /// The ledger refused to accept the transaction at all
    #[error("transaction {hash} rejected on submission")]
    SubmissionRejected {
        hash: TxHash,
        result_code: Option<String>,
        diagnostics: Vec<String>,
    },

    /// The ledger kept asking to try again until the submit window closed
    #[error("transaction {hash} not accepted after {waited:?}")]
    SubmissionTimeout { hash: TxHash, waited: Duration },

    #[error("transaction {hash} failed, {failure}")]
    ExecutionFailed {
        hash: TxHash,
        failure: ExecutionFailure,
    },

    #[error("classic operation failed: {0}")]
    ClassicOperationFailed(#[source] Box<Error>),

    #[error("transaction {hash} not confirmed before the deadline")]
    ConfirmationTimeout { hash: TxHash },

    #[error("rpc error: {0}")]
    Rpc(#[from] blend_rpc::Error),

    #[error("signer error: {0}")]
    Signer(#[from] SignerError),

    #[error("can't build transaction: {0}")]
    Build(#[from] TxBuilderError),

    #[error("codec error: {0}")]
    Codec(#[from] blend_codec::Error),

    /// The signer returned a different transaction than the one handed out
    #[error("signed envelope doesn't match assembled transaction {expected}")]
    EnvelopeAltered { expected: TxHash },

    /// No signature of the source account is valid on the configured network
    #[error("envelope isn't signed by the source account for network {passphrase:?}")]
    NetworkMismatch { passphrase: String },

    #[error("can't parse return value: {0}")]
    Parse(#[from] ParseError),
}

impl Error {
    /// Classification of ledger-originated failures
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            Self::Simulation(x) => Some(x.kind),
            Self::ExecutionFailed { failure, .. } => Some(failure.kind),
            Self::SubmissionRejected {
                result_code,
                diagnostics,
                ..
            } => Some(classify(result_code.as_deref(), diagnostics)),
            Self::ClassicOperationFailed(inner) => inner.kind(),
            _ => None,
        }
    }

    /// Restore preamble of a simulation that hit archived entries
    pub fn restore_preamble(&self) -> Option<&RestorePreamble> {
        match self {
            Self::Simulation(x) => x.restore_preamble.as_ref(),
            Self::ClassicOperationFailed(inner) => inner.restore_preamble(),
            _ => None,
        }
    }

    /// The hash of the transaction involved, once it reached the ledger
    pub fn tx_hash(&self) -> Option<&TxHash> {
        match self {
            Self::SubmissionRejected { hash, .. }
            | Self::SubmissionTimeout { hash, .. }
            | Self::ExecutionFailed { hash, .. }
            | Self::ConfirmationTimeout { hash } => Some(hash),
            Self::ClassicOperationFailed(inner) => inner.tx_hash(),
            _ => None,
        }
    }
}
