//! Keys and signers for ledger accounts
//!
//! A [`Signer`] receives the base64 form of an unsigned envelope and hands
//! back the signed one. The pipeline never sees key material, so hardware
//! or remote signers plug in behind the same trait as [`KeypairSigner`].

use blend_crypto::key::ed25519::{PublicKey, SecretKey, Signature};
use blend_crypto::memsec::Scrubbed as _;
use blend_primitives::AccountId;
use rand_core::{CryptoRng, RngCore};
use std::{fmt, str::FromStr};
use thiserror::Error;

mod signer;

pub use signer::*;

#[derive(Error, Debug)]
pub enum Error {
    /// Secret is not hex encoded
    #[error("secret key is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// Decoded secret of unexpected length
    #[error("secret key must be {} bytes, got {0}", SecretKey::SIZE)]
    InvalidLength(usize),
}

/// Ed25519 secret of a ledger account
pub struct PrivateKey(SecretKey);

impl PrivateKey {
    pub fn generate<R>(rng: R) -> Self
    where
        R: RngCore + CryptoRng,
    {
        Self(SecretKey::new(rng))
    }

    pub fn public_key(&self) -> PublicKey {
        self.0.public_key()
    }

    pub fn account_id(&self) -> AccountId {
        AccountId::from(self.public_key())
    }

    pub fn sign<T>(&self, msg: T) -> Signature
    where
        T: AsRef<[u8]>,
    {
        self.0.sign(msg)
    }

    /// Hex form of the seed, as accepted by [`FromStr`]
    pub fn to_hex(&self) -> String {
        let mut bytes: [u8; SecretKey::SIZE] = unsafe { SecretKey::leak_into_bytes(self.0.clone()) };
        let out = hex::encode(bytes);
        bytes.scrub();
        out
    }
}

impl FromStr for PrivateKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = hex::decode(s.trim())?;

        let seed: Result<[u8; SecretKey::SIZE], _> = bytes.as_slice().try_into();
        let len = bytes.len();
        bytes.scrub();

        seed.map(|x| Self(SecretKey::from(x)))
            .map_err(|_| Error::InvalidLength(len))
    }
}

impl From<SecretKey> for PrivateKey {
    fn from(key: SecretKey) -> Self {
        Self(key)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PrivateKey").field(&self.account_id()).finish()
    }
}
