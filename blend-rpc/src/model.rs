use blend_primitives::{
    AccountCursor, AccountId, AuthEntry, Bytes, Fragment, SorobanData, TxHash,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_with::{serde_as, DeserializeAs, DisplayFromStr, SerializeAs};

/// Serializes a cbor entity as its base64 transport string
pub struct Base64Fragment;

impl<T> SerializeAs<T> for Base64Fragment
where
    T: Fragment,
{
    fn serialize_as<S>(source: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let encoded = source.to_base64().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&encoded)
    }
}

impl<'de, T> DeserializeAs<'de, T> for Base64Fragment
where
    T: Fragment,
{
    fn deserialize_as<D>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        T::from_base64(&encoded).map_err(serde::de::Error::custom)
    }
}

/// Account entry as reported by `getAccount`
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AccountEntry {
    pub id: AccountId,

    #[serde_as(as = "DisplayFromStr")]
    pub sequence: i64,
}

impl From<AccountEntry> for AccountCursor {
    fn from(entry: AccountEntry) -> Self {
        AccountCursor::new(entry.id, entry.sequence)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SendStatus {
    Pending,
    Duplicate,
    TryAgainLater,
    Error,
}

impl SendStatus {
    /// The ledger took the transaction and will eventually report on it
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Pending | Self::Duplicate)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SendResponse {
    pub status: SendStatus,
    pub hash: TxHash,
    pub latest_ledger: u32,

    /// Result code of a rejected transaction, e.g. `txBAD_SEQ`
    #[serde(default)]
    pub error_result: Option<String>,

    #[serde(default)]
    pub diagnostic_events: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GetTransactionStatus {
    NotFound,
    Success,
    Failed,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GetTransactionResponse {
    pub status: GetTransactionStatus,
    pub latest_ledger: u32,

    /// Ledger the transaction was applied in, once known
    #[serde(default)]
    pub ledger: Option<u32>,

    #[serde(default)]
    pub return_value: Option<Bytes>,

    #[serde(default)]
    pub result_code: Option<String>,

    #[serde(default)]
    pub diagnostic_events: Vec<String>,
}

impl GetTransactionResponse {
    pub fn not_found(latest_ledger: u32) -> Self {
        Self {
            status: GetTransactionStatus::NotFound,
            latest_ledger,
            ledger: None,
            return_value: None,
            result_code: None,
            diagnostic_events: vec![],
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SimulateHostResult {
    #[serde(default)]
    pub auth: Vec<AuthEntry>,

    #[serde(default)]
    pub return_value: Option<Bytes>,
}

/// Resources needed to restore archived entries before a call can succeed
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RestorePreamble {
    #[serde_as(as = "Base64Fragment")]
    pub transaction_data: SorobanData,

    #[serde_as(as = "DisplayFromStr")]
    pub min_resource_fee: i64,
}

#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SimulateResponse {
    pub latest_ledger: u32,

    pub error: Option<String>,

    #[serde_as(as = "Option<Base64Fragment>")]
    pub transaction_data: Option<SorobanData>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    pub min_resource_fee: Option<i64>,

    #[serde(default)]
    pub results: Vec<SimulateHostResult>,

    #[serde(default)]
    pub events: Vec<String>,

    pub restore_preamble: Option<RestorePreamble>,
}

/// A simulation the transaction can be assembled from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulateSuccess {
    pub latest_ledger: u32,
    pub transaction_data: SorobanData,
    pub min_resource_fee: i64,
    pub auth: Vec<AuthEntry>,
    pub return_value: Option<Bytes>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulateFailure {
    pub latest_ledger: u32,
    pub error: String,
    pub events: Vec<String>,
    pub restore_preamble: Option<RestorePreamble>,
}

impl SimulateResponse {
    /// Splits the response into something that can be assembled or a
    /// failure. Responses that require a footprint restore count as
    /// failures; the preamble travels along so callers can restore.
    pub fn into_result(self) -> Result<SimulateSuccess, SimulateFailure> {
        let failure = |error: String, response: Self| SimulateFailure {
            latest_ledger: response.latest_ledger,
            error,
            events: response.events,
            restore_preamble: response.restore_preamble,
        };

        if let Some(error) = self.error.clone() {
            return Err(failure(error, self));
        }

        if self.restore_preamble.is_some() {
            return Err(failure("archived entries must be restored".into(), self));
        }

        let Some(transaction_data) = self.transaction_data.clone() else {
            return Err(failure("simulation returned no transaction data".into(), self));
        };

        let host = self.results.into_iter().next().unwrap_or_default();

        Ok(SimulateSuccess {
            latest_ledger: self.latest_ledger,
            transaction_data,
            min_resource_fee: self.min_resource_fee.unwrap_or_default(),
            auth: host.auth,
            return_value: host.return_value,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LatestLedger {
    pub id: String,
    pub protocol_version: u32,
    pub sequence: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use blend_primitives::LedgerFootprint;
    use serde_json::json;

    fn data() -> SorobanData {
        SorobanData {
            footprint: LedgerFootprint {
                read_only: vec![Bytes::from(vec![1u8, 2])],
                read_write: vec![],
            },
            instructions: 900,
            read_bytes: 10,
            write_bytes: 0,
            resource_fee: 1_234,
        }
    }

    #[test]
    fn send_status_uses_rpc_names() {
        let status: SendStatus = serde_json::from_value(json!("TRY_AGAIN_LATER")).unwrap();
        assert_eq!(status, SendStatus::TryAgainLater);
        assert!(!status.is_accepted());
        assert!(SendStatus::Duplicate.is_accepted());
    }

    #[test]
    fn simulation_success_is_assemblable() {
        let response: SimulateResponse = serde_json::from_value(json!({
            "latestLedger": 1000,
            "transactionData": data().to_base64().unwrap(),
            "minResourceFee": "1234",
            "results": [{ "auth": ["aabb"], "returnValue": "0102" }],
        }))
        .unwrap();

        let success = response.into_result().unwrap();

        assert_eq!(success.transaction_data, data());
        assert_eq!(success.min_resource_fee, 1_234);
        assert_eq!(success.auth, vec![Bytes::from(vec![0xaa, 0xbb])]);
        assert_eq!(success.return_value, Some(Bytes::from(vec![1u8, 2])));
    }

    #[test]
    fn simulation_error_keeps_events() {
        let response: SimulateResponse = serde_json::from_value(json!({
            "latestLedger": 1000,
            "error": "HostError: Error(Contract, #1205)",
            "events": ["contract failed"],
        }))
        .unwrap();

        let failure = response.into_result().unwrap_err();

        assert_eq!(failure.error, "HostError: Error(Contract, #1205)");
        assert_eq!(failure.events, vec!["contract failed".to_string()]);
        assert!(failure.restore_preamble.is_none());
    }

    #[test]
    fn restore_preamble_is_a_failure() {
        let response: SimulateResponse = serde_json::from_value(json!({
            "latestLedger": 1000,
            "transactionData": data().to_base64().unwrap(),
            "minResourceFee": "10",
            "restorePreamble": {
                "transactionData": data().to_base64().unwrap(),
                "minResourceFee": "5000",
            },
        }))
        .unwrap();

        let failure = response.into_result().unwrap_err();
        let preamble = failure.restore_preamble.unwrap();

        assert_eq!(preamble.min_resource_fee, 5_000);
        assert_eq!(preamble.transaction_data, data());
    }

    #[test]
    fn account_sequence_is_a_string() {
        let entry: AccountEntry = serde_json::from_value(json!({
            "id": "3b6a27bcceb6a42d62a3a8d02a6f0d73653215771de243a63ac048a18b59da29",
            "sequence": "103420918407103888",
        }))
        .unwrap();

        let cursor = AccountCursor::from(entry);
        assert_eq!(cursor.next_sequence(), 103_420_918_407_103_889);
    }

    #[test]
    fn transaction_response_defaults() {
        let response: GetTransactionResponse = serde_json::from_value(json!({
            "status": "NOT_FOUND",
            "latestLedger": 12,
        }))
        .unwrap();

        assert_eq!(response, GetTransactionResponse::not_found(12));
    }
}
