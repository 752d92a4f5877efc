use async_trait::async_trait;
use blend_crypto::key::ed25519::Signature;
use blend_primitives::{
    AccountId, Bytes, DecoratedSignature, Fragment, NetworkId, TransactionEnvelope,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::PrivateKey;

#[derive(Error, Debug)]
pub enum SignerError {
    #[error("envelope can't be decoded: {0}")]
    Codec(#[from] blend_codec::Error),

    /// The signer holds no key for the transaction source
    #[error("signer can't sign for account {0}")]
    UnknownAccount(AccountId),

    /// The signer declined to sign, e.g. a user rejected the prompt
    #[error("signing rejected: {0}")]
    Rejected(String),
}

/// Turns an unsigned envelope into a signed one for the given network.
///
/// Both ends use the base64 transport form of [`TransactionEnvelope`].
#[async_trait]
pub trait Signer: Send + Sync {
    async fn sign(&self, unsigned: String, network_passphrase: &str)
        -> Result<String, SignerError>;
}

#[async_trait]
impl<T> Signer for Arc<T>
where
    T: Signer + ?Sized,
{
    async fn sign(
        &self,
        unsigned: String,
        network_passphrase: &str,
    ) -> Result<String, SignerError> {
        (**self).sign(unsigned, network_passphrase).await
    }
}

/// Signer backed by a single in-memory account key
#[derive(Debug)]
pub struct KeypairSigner {
    key: PrivateKey,
}

impl KeypairSigner {
    pub fn new(key: PrivateKey) -> Self {
        Self { key }
    }

    pub fn account_id(&self) -> AccountId {
        self.key.account_id()
    }

    /// Appends this key's signature to an envelope, in place
    pub fn sign_envelope(
        &self,
        envelope: &mut TransactionEnvelope,
        network: &NetworkId,
    ) -> Result<(), SignerError> {
        let account = self.account_id();

        if envelope.tx.source != account {
            return Err(SignerError::UnknownAccount(envelope.tx.source));
        }

        let hash = envelope.hash(network)?;
        let signature = self.key.sign(hash);

        envelope.signatures.push(DecoratedSignature {
            hint: Bytes::from(account.signature_hint().to_vec()),
            signature: Bytes::from(signature.as_ref().to_vec()),
        });

        debug!(%hash, %account, "envelope signed");

        Ok(())
    }
}

#[async_trait]
impl Signer for KeypairSigner {
    async fn sign(
        &self,
        unsigned: String,
        network_passphrase: &str,
    ) -> Result<String, SignerError> {
        let mut envelope = TransactionEnvelope::from_base64(&unsigned)?;
        let network = NetworkId::from_passphrase(network_passphrase);

        self.sign_envelope(&mut envelope, &network)?;

        Ok(envelope.to_base64()?)
    }
}

/// Checks whether `account` produced a valid signature over the envelope
/// for the given network.
pub fn is_signed_by(
    envelope: &TransactionEnvelope,
    account: &AccountId,
    network: &NetworkId,
) -> Result<bool, blend_codec::Error> {
    let hash = envelope.hash(network)?;
    let hint = account.signature_hint();

    let found = envelope
        .signatures
        .iter()
        .filter(|x| x.hint.as_slice() == hint)
        .filter_map(|x| Signature::try_from(x.signature.as_slice()).ok())
        .any(|sig| account.public_key().verify(hash, &sig));

    Ok(found)
}
