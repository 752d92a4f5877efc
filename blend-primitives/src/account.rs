use blend_codec::minicbor::{self, Decode, Encode};
use blend_crypto::key::ed25519::PublicKey;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Ledger account identifier: the account's ed25519 public key, rendered
/// as hex.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String")]
#[serde(try_from = "String")]
pub struct AccountId(PublicKey);

impl AccountId {
    pub fn public_key(&self) -> &PublicKey {
        &self.0
    }

    /// Last four bytes of the key, used to pair signatures with signers.
    pub fn signature_hint(&self) -> [u8; 4] {
        let bytes = self.0.as_ref();
        let mut hint = [0; 4];
        hint.copy_from_slice(&bytes[bytes.len() - 4..]);
        hint
    }
}

impl From<PublicKey> for AccountId {
    fn from(key: PublicKey) -> Self {
        Self(key)
    }
}

impl FromStr for AccountId {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PublicKey::from_str(s).map(Self)
    }
}

impl TryFrom<String> for AccountId {
    type Error = hex::FromHexError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.to_string()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccountId").field(&self.to_string()).finish()
    }
}

impl<C> Encode<C> for AccountId {
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        _ctx: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        e.bytes(self.0.as_ref())?.ok()
    }
}

impl<'b, C> Decode<'b, C> for AccountId {
    fn decode(d: &mut minicbor::Decoder<'b>, _ctx: &mut C) -> Result<Self, minicbor::decode::Error> {
        let bytes = d.bytes()?;
        PublicKey::try_from(bytes)
            .map(Self)
            .map_err(|e| minicbor::decode::Error::message(e.to_string()))
    }
}

/// An account identifier plus its current sequence number.
///
/// Cursors go stale as soon as the account submits anything; they are
/// fetched right before a transaction is built and never cached.
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountCursor {
    #[n(0)]
    pub account_id: AccountId,

    #[n(1)]
    pub sequence: i64,
}

impl AccountCursor {
    pub fn new(account_id: AccountId, sequence: i64) -> Self {
        Self {
            account_id,
            sequence,
        }
    }

    /// Sequence number the next transaction from this account must carry
    pub fn next_sequence(&self) -> i64 {
        self.sequence + 1
    }
}

impl From<AccountCursor> for AccountId {
    fn from(cursor: AccountCursor) -> Self {
        cursor.account_id
    }
}
