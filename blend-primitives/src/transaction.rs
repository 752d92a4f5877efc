use blend_codec::minicbor::{self, Decode, Encode};
use blend_codec::utils::Bytes;
use blend_crypto::hash::{Hash, Hasher};
use serde::{Deserialize, Serialize};

use crate::{AccountId, AuthEntry, LedgerKey, NetworkId, ENVELOPE_TYPE_TX};

/// Transactions carry at most this many operations
pub const MAX_OPERATIONS: usize = 100;

#[derive(
    Encode, Decode, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[cbor(index_only)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    #[n(0)]
    InvokeContract,
    #[n(1)]
    CreateAccount,
    #[n(2)]
    Payment,
    #[n(3)]
    ChangeTrust,
    #[n(4)]
    SetOptions,
    #[n(5)]
    UploadWasm,
    #[n(6)]
    CreateContract,
    #[n(7)]
    ExtendFootprintTtl,
    #[n(8)]
    RestoreFootprint,
}

impl OperationKind {
    /// Soroban operations need a resource footprint before submission
    pub fn is_soroban(&self) -> bool {
        matches!(
            self,
            Self::InvokeContract
                | Self::UploadWasm
                | Self::CreateContract
                | Self::ExtendFootprintTtl
                | Self::RestoreFootprint
        )
    }

    /// Host function invocations are the operations that carry auth entries
    pub fn accepts_auth(&self) -> bool {
        matches!(
            self,
            Self::InvokeContract | Self::UploadWasm | Self::CreateContract
        )
    }
}

/// A single ledger operation. The body is produced by the caller and never
/// interpreted by this crate.
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    #[n(0)]
    pub kind: OperationKind,

    #[n(1)]
    pub source: Option<AccountId>,

    #[n(2)]
    pub body: Bytes,

    #[n(3)]
    pub auth: Vec<AuthEntry>,
}

impl Operation {
    pub fn new(kind: OperationKind, body: impl Into<Bytes>) -> Self {
        Self {
            kind,
            source: None,
            body: body.into(),
            auth: vec![],
        }
    }

    pub fn with_source(mut self, source: AccountId) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_auth(mut self, auth: Vec<AuthEntry>) -> Self {
        self.auth = auth;
        self
    }
}

/// Validity window of a transaction, in unix seconds. A `max_time` of zero
/// leaves the upper end open.
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TimeBounds {
    #[n(0)]
    pub min_time: u64,

    #[n(1)]
    pub max_time: u64,
}

impl TimeBounds {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn is_unbounded(&self) -> bool {
        self.min_time == 0 && self.max_time == 0
    }
}

#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct LedgerFootprint {
    #[n(0)]
    pub read_only: Vec<LedgerKey>,

    #[n(1)]
    pub read_write: Vec<LedgerKey>,
}

/// Resource footprint and budgets of a soroban transaction
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SorobanData {
    #[n(0)]
    pub footprint: LedgerFootprint,

    #[n(1)]
    pub instructions: u32,

    #[n(2)]
    pub read_bytes: u32,

    #[n(3)]
    pub write_bytes: u32,

    #[n(4)]
    pub resource_fee: i64,
}

impl SorobanData {
    /// True when no resources at all were declared
    pub fn is_empty(&self) -> bool {
        self.footprint.read_only.is_empty()
            && self.footprint.read_write.is_empty()
            && self.instructions == 0
            && self.read_bytes == 0
            && self.write_bytes == 0
            && self.resource_fee == 0
    }
}

#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[n(0)]
    pub source: AccountId,

    #[n(1)]
    pub fee: u32,

    #[n(2)]
    pub sequence: i64,

    #[n(3)]
    pub time_bounds: Option<TimeBounds>,

    #[n(4)]
    pub operations: Vec<Operation>,

    #[n(5)]
    pub soroban_data: Option<SorobanData>,
}

impl Transaction {
    /// Hash that signers commit to, bound to the given network
    pub fn hash(&self, network: &NetworkId) -> Result<Hash, blend_codec::Error> {
        let mut hasher = Hasher::new();
        hasher.input(network.as_ref());
        hasher.input(&[ENVELOPE_TYPE_TX]);
        hasher
            .input_cbor(self)
            .map_err(|e| blend_codec::Error::Encode(e.to_string()))?;

        Ok(hasher.finalize())
    }

    pub fn is_soroban(&self) -> bool {
        self.operations.iter().any(|op| op.kind.is_soroban())
    }

    /// Fee left once the declared soroban resource fee is taken out
    pub fn inclusion_fee(&self) -> i64 {
        let resource_fee = self
            .soroban_data
            .as_ref()
            .map(|x| x.resource_fee)
            .unwrap_or_default();

        i64::from(self.fee) - resource_fee
    }
}

#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DecoratedSignature {
    #[n(0)]
    pub hint: Bytes,

    #[n(1)]
    pub signature: Bytes,
}

#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TransactionEnvelope {
    #[n(0)]
    pub tx: Transaction,

    #[n(1)]
    pub signatures: Vec<DecoratedSignature>,
}

impl TransactionEnvelope {
    pub fn unsigned(tx: Transaction) -> Self {
        Self {
            tx,
            signatures: vec![],
        }
    }

    pub fn is_signed(&self) -> bool {
        !self.signatures.is_empty()
    }

    pub fn hash(&self, network: &NetworkId) -> Result<Hash, blend_codec::Error> {
        self.tx.hash(network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blend_codec::Fragment;
    use test_case::test_case;

    fn source() -> AccountId {
        "3b6a27bcceb6a42d62a3a8d02a6f0d73653215771de243a63ac048a18b59da29"
            .parse()
            .unwrap()
    }

    fn invoke_tx() -> Transaction {
        Transaction {
            source: source(),
            fee: 100,
            sequence: 7,
            time_bounds: None,
            operations: vec![Operation::new(
                OperationKind::InvokeContract,
                vec![0xca, 0xfe],
            )],
            soroban_data: None,
        }
    }

    #[test_case(OperationKind::InvokeContract, true)]
    #[test_case(OperationKind::RestoreFootprint, true)]
    #[test_case(OperationKind::Payment, false)]
    #[test_case(OperationKind::ChangeTrust, false)]
    fn soroban_operation_kinds(kind: OperationKind, expected: bool) {
        assert_eq!(kind.is_soroban(), expected);
    }

    #[test]
    fn hash_depends_on_network() {
        let tx = invoke_tx();
        let testnet = tx.hash(&NetworkId::testnet()).unwrap();
        let public = tx.hash(&NetworkId::public()).unwrap();

        assert_ne!(testnet, public);
    }

    #[test]
    fn hash_ignores_signatures() {
        let network = NetworkId::testnet();
        let mut envelope = TransactionEnvelope::unsigned(invoke_tx());
        let before = envelope.hash(&network).unwrap();

        envelope.signatures.push(DecoratedSignature {
            hint: vec![0; 4].into(),
            signature: vec![1; 64].into(),
        });

        assert_eq!(envelope.hash(&network).unwrap(), before);
    }

    #[test]
    fn envelope_survives_transport() {
        let mut tx = invoke_tx();
        tx.fee = 35_100;
        tx.soroban_data = Some(SorobanData {
            footprint: LedgerFootprint {
                read_only: vec![vec![1, 1].into()],
                read_write: vec![vec![2, 2].into()],
            },
            instructions: 1_000_000,
            read_bytes: 2048,
            write_bytes: 512,
            resource_fee: 35_000,
        });
        let envelope = TransactionEnvelope::unsigned(tx);

        let encoded = envelope.to_base64().unwrap();
        let decoded = TransactionEnvelope::from_base64(&encoded).unwrap();

        assert_eq!(decoded, envelope);
        assert_eq!(decoded.tx.inclusion_fee(), 100);
    }
}
