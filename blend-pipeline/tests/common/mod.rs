#![allow(dead_code)]

use async_trait::async_trait;
use blend_primitives::{
    AccountCursor, AccountId, Bytes, Fragment, LedgerFootprint, NetworkId, SorobanData,
    TransactionEnvelope, TxHash,
};
use blend_rpc::{
    Error, GetTransactionResponse, GetTransactionStatus, LatestLedger, LedgerRpc, SendResponse,
    SendStatus, SimulateHostResult, SimulateResponse,
};
use blend_wallet::{KeypairSigner, PrivateKey, Signer, SignerError};
use std::collections::VecDeque;
use std::sync::Mutex;

pub const SEED: &str = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";

pub fn key() -> PrivateKey {
    SEED.parse().unwrap()
}

pub fn account() -> AccountId {
    key().account_id()
}

pub fn tx_hash() -> TxHash {
    TxHash::from([0xab; 32])
}

pub fn footprint() -> SorobanData {
    SorobanData {
        footprint: LedgerFootprint {
            read_only: vec![Bytes::from(vec![1u8, 1])],
            read_write: vec![Bytes::from(vec![2u8, 2])],
        },
        instructions: 2_500_000,
        read_bytes: 2_048,
        write_bytes: 512,
        resource_fee: 0,
    }
}

pub fn simulated(min_resource_fee: i64) -> SimulateResponse {
    SimulateResponse {
        latest_ledger: 100,
        transaction_data: Some(footprint()),
        min_resource_fee: Some(min_resource_fee),
        results: vec![SimulateHostResult {
            auth: vec![Bytes::from(vec![0xa0u8])],
            return_value: None,
        }],
        ..Default::default()
    }
}

pub fn simulation_error(message: &str, events: &[&str]) -> SimulateResponse {
    SimulateResponse {
        latest_ledger: 100,
        error: Some(message.to_string()),
        events: events.iter().map(|x| x.to_string()).collect(),
        ..Default::default()
    }
}

pub fn sent(status: SendStatus) -> SendResponse {
    SendResponse {
        status,
        hash: tx_hash(),
        latest_ledger: 100,
        error_result: None,
        diagnostic_events: vec![],
    }
}

pub fn not_found() -> GetTransactionResponse {
    GetTransactionResponse::not_found(101)
}

pub fn applied<T: Fragment>(value: T) -> GetTransactionResponse {
    GetTransactionResponse {
        status: GetTransactionStatus::Success,
        latest_ledger: 102,
        ledger: Some(102),
        return_value: Some(Bytes::from(value.encode_fragment().unwrap())),
        result_code: None,
        diagnostic_events: vec![],
    }
}

pub fn applied_raw(value: Option<Bytes>) -> GetTransactionResponse {
    GetTransactionResponse {
        return_value: value,
        ..applied(0u8)
    }
}

pub fn failed(result_code: &str, events: &[&str]) -> GetTransactionResponse {
    GetTransactionResponse {
        status: GetTransactionStatus::Failed,
        latest_ledger: 102,
        ledger: Some(102),
        return_value: None,
        result_code: Some(result_code.to_string()),
        diagnostic_events: events.iter().map(|x| x.to_string()).collect(),
    }
}

/// Replays scripted answers in order, repeating the last one forever
struct Script<T>(VecDeque<T>);

impl<T: Clone> Script<T> {
    fn next(&mut self) -> Option<T> {
        if self.0.len() > 1 {
            self.0.pop_front()
        } else {
            self.0.front().cloned()
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Calls {
    pub get_account: usize,
    pub simulate: usize,
    pub send: usize,
    pub get_transaction: usize,
}

struct State {
    sequence: i64,
    simulations: Script<SimulateResponse>,
    sends: Script<SendResponse>,
    polls: Script<GetTransactionResponse>,
    calls: Calls,
    simulated: Vec<TransactionEnvelope>,
    sent: Vec<TransactionEnvelope>,
}

/// In-memory ledger answering from scripts. Accepted submissions bump the
/// account sequence the way a real ledger would.
pub struct FakeLedger {
    state: Mutex<State>,
}

impl FakeLedger {
    pub fn new(sequence: i64) -> Self {
        Self {
            state: Mutex::new(State {
                sequence,
                simulations: Script(VecDeque::new()),
                sends: Script(VecDeque::from([sent(SendStatus::Pending)])),
                polls: Script(VecDeque::from([applied_raw(None)])),
                calls: Calls::default(),
                simulated: vec![],
                sent: vec![],
            }),
        }
    }

    pub fn simulations(self, items: Vec<SimulateResponse>) -> Self {
        self.state.lock().unwrap().simulations = Script(items.into());
        self
    }

    pub fn sends(self, items: Vec<SendResponse>) -> Self {
        self.state.lock().unwrap().sends = Script(items.into());
        self
    }

    pub fn polls(self, items: Vec<GetTransactionResponse>) -> Self {
        self.state.lock().unwrap().polls = Script(items.into());
        self
    }

    pub fn calls(&self) -> Calls {
        self.state.lock().unwrap().calls
    }

    pub fn simulated(&self) -> Vec<TransactionEnvelope> {
        self.state.lock().unwrap().simulated.clone()
    }

    pub fn sent(&self) -> Vec<TransactionEnvelope> {
        self.state.lock().unwrap().sent.clone()
    }

    pub fn sequence(&self) -> i64 {
        self.state.lock().unwrap().sequence
    }
}

#[async_trait]
impl LedgerRpc for FakeLedger {
    async fn get_account(&self, account: &AccountId) -> Result<AccountCursor, Error> {
        let mut state = self.state.lock().unwrap();
        state.calls.get_account += 1;

        if *account != self::account() {
            return Err(Error::AccountNotFound(*account));
        }

        Ok(AccountCursor::new(*account, state.sequence))
    }

    async fn simulate_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<SimulateResponse, Error> {
        let mut state = self.state.lock().unwrap();
        state.calls.simulate += 1;
        state.simulated.push(envelope.clone());

        state
            .simulations
            .next()
            .ok_or_else(|| Error::Transport("no simulation scripted".into()))
    }

    async fn send_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<SendResponse, Error> {
        let mut state = self.state.lock().unwrap();
        state.calls.send += 1;
        state.sent.push(envelope.clone());

        let response = state
            .sends
            .next()
            .ok_or_else(|| Error::Transport("no submission scripted".into()))?;

        if response.status.is_accepted() {
            state.sequence = envelope.tx.sequence;
        }

        Ok(response)
    }

    async fn get_transaction(&self, _: &TxHash) -> Result<GetTransactionResponse, Error> {
        let mut state = self.state.lock().unwrap();
        state.calls.get_transaction += 1;

        state
            .polls
            .next()
            .ok_or_else(|| Error::Transport("no status scripted".into()))
    }

    async fn get_latest_ledger(&self) -> Result<LatestLedger, Error> {
        Ok(LatestLedger {
            id: "fake".into(),
            protocol_version: 21,
            sequence: 100,
        })
    }
}

/// Keypair signer that keeps a copy of every envelope it was asked to sign
pub struct RecordingSigner {
    inner: KeypairSigner,
    seen: Mutex<Vec<TransactionEnvelope>>,
}

impl RecordingSigner {
    pub fn new() -> Self {
        Self {
            inner: KeypairSigner::new(key()),
            seen: Mutex::new(vec![]),
        }
    }

    pub fn seen(&self) -> Vec<TransactionEnvelope> {
        self.seen.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait]
impl Signer for RecordingSigner {
    async fn sign(
        &self,
        unsigned: String,
        network_passphrase: &str,
    ) -> Result<String, SignerError> {
        let envelope = TransactionEnvelope::from_base64(&unsigned)?;
        self.seen.lock().unwrap().push(envelope);

        self.inner.sign(unsigned, network_passphrase).await
    }
}

/// Signer that quietly changes the transaction before signing it
pub struct TamperingSigner(pub KeypairSigner);

#[async_trait]
impl Signer for TamperingSigner {
    async fn sign(
        &self,
        unsigned: String,
        network_passphrase: &str,
    ) -> Result<String, SignerError> {
        let mut envelope = TransactionEnvelope::from_base64(&unsigned)?;
        envelope.tx.fee += 1;

        self.0
            .sign(envelope.to_base64()?, network_passphrase)
            .await
    }
}

/// Signer that ignores the requested passphrase and always signs for a
/// fixed network
pub struct FixedNetworkSigner {
    pub inner: KeypairSigner,
    pub network: NetworkId,
}

#[async_trait]
impl Signer for FixedNetworkSigner {
    async fn sign(&self, unsigned: String, _: &str) -> Result<String, SignerError> {
        let mut envelope = TransactionEnvelope::from_base64(&unsigned)?;
        self.inner.sign_envelope(&mut envelope, &self.network)?;

        Ok(envelope.to_base64()?)
    }
}
