use async_trait::async_trait;
use blend_primitives::{AccountCursor, AccountId, Fragment, TransactionEnvelope, TxHash};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, trace, warn};

use crate::{
    AccountEntry, Error, GetTransactionResponse, LatestLedger, LedgerRpc, SendResponse,
    SimulateResponse,
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct RpcConfig {
    pub url: String,

    /// Sent verbatim as the `Authorization` header when present
    pub api_key: Option<String>,

    pub request_timeout_ms: u64,
    pub connect_timeout_ms: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: None,
            request_timeout_ms: 30_000,
            connect_timeout_ms: 5_000,
        }
    }
}

impl RpcConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

#[derive(Serialize)]
struct Request<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: serde_json::Value,
}

#[derive(Deserialize)]
struct Response<T> {
    result: Option<T>,
    error: Option<ErrorObject>,
}

#[derive(Deserialize)]
struct ErrorObject {
    code: i64,
    message: String,
}

/// JSON-RPC 2.0 client for a Soroban RPC endpoint
pub struct HttpRpcClient {
    config: RpcConfig,
    client: reqwest::Client,
    next_id: AtomicU64,
}

impl HttpRpcClient {
    pub fn new(config: RpcConfig) -> Result<Self, Error> {
        if config.url.trim().is_empty() {
            return Err(Error::Config("rpc url is empty".into()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .map_err(|e| Error::Config(format!("failed to build http client: {e}")))?;

        Ok(Self {
            config,
            client,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self
            .config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(key) => req.header("Authorization", key),
            None => req,
        }
    }

    /// Performs a call and returns its `result`, which the endpoint may
    /// legitimately leave empty.
    async fn call<T>(&self, method: &str, params: serde_json::Value) -> Result<Option<T>, Error>
    where
        T: DeserializeOwned,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        let request = Request {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };

        trace!(method, id, "sending rpc request");

        let resp = self
            .auth(self.client.post(&self.config.url).json(&request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout
                } else {
                    Error::Transport(e.to_string())
                }
            })?;

        let status = resp.status();

        if !status.is_success() {
            warn!(method, status = status.as_u16(), "rpc endpoint answered with an error status");
            return Err(Error::HttpStatus(status.as_u16()));
        }

        let body: Response<T> = resp
            .json()
            .await
            .map_err(|e| Error::Decode(e.to_string()))?;

        if let Some(err) = body.error {
            debug!(method, code = err.code, message = %err.message, "rpc call failed");
            return Err(Error::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        Ok(body.result)
    }

    async fn call_required<T>(&self, method: &str, params: serde_json::Value) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        self.call(method, params)
            .await?
            .ok_or_else(|| Error::Decode(format!("{method} returned no result")))
    }
}

#[async_trait]
impl LedgerRpc for HttpRpcClient {
    async fn get_account(&self, account: &AccountId) -> Result<AccountCursor, Error> {
        let entry: Option<AccountEntry> = self
            .call("getAccount", json!({ "account": account.to_string() }))
            .await?;

        entry
            .map(AccountCursor::from)
            .ok_or(Error::AccountNotFound(*account))
    }

    async fn simulate_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<SimulateResponse, Error> {
        let transaction = envelope.to_base64()?;

        self.call_required("simulateTransaction", json!({ "transaction": transaction }))
            .await
    }

    async fn send_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<SendResponse, Error> {
        let transaction = envelope.to_base64()?;

        self.call_required("sendTransaction", json!({ "transaction": transaction }))
            .await
    }

    async fn get_transaction(&self, hash: &TxHash) -> Result<GetTransactionResponse, Error> {
        self.call_required("getTransaction", json!({ "hash": hash.to_string() }))
            .await
    }

    async fn get_latest_ledger(&self) -> Result<LatestLedger, Error> {
        self.call_required("getLatestLedger", json!({})).await
    }
}
