//! Encoding helpers shared by every Blend crate
//!
//! Ledger entities are encoded as CBOR through [`minicbor`]. Whenever an
//! entity leaves the process (towards the RPC endpoint or an external
//! signer) it travels as the standard base64 rendition of those bytes.

use base64::Engine as _;
use thiserror::Error;

/// Shared re-export of minicbor lib across all Blend crates
pub use minicbor;

/// Round-trip friendly common helper structs
pub mod utils;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cbor encoding failed: {0}")]
    Encode(String),

    #[error("cbor decoding failed: {0}")]
    Decode(#[from] minicbor::decode::Error),

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// A self-contained CBOR value that can be shipped as an opaque encoding.
pub trait Fragment: Sized + for<'b> minicbor::Decode<'b, ()> + minicbor::Encode<()> {
    fn encode_fragment(&self) -> Result<Vec<u8>, Error> {
        minicbor::to_vec(self).map_err(|e| Error::Encode(e.to_string()))
    }

    fn decode_fragment(bytes: &[u8]) -> Result<Self, Error> {
        minicbor::decode(bytes).map_err(Error::Decode)
    }

    /// Standard base64 of the CBOR bytes, the form handed to signers and
    /// to the RPC endpoint.
    fn to_base64(&self) -> Result<String, Error> {
        let bytes = self.encode_fragment()?;
        Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
    }

    fn from_base64(encoded: &str) -> Result<Self, Error> {
        let bytes = base64::engine::general_purpose::STANDARD.decode(encoded.trim())?;
        Self::decode_fragment(&bytes)
    }
}

impl<T> Fragment for T where T: for<'b> minicbor::Decode<'b, ()> + minicbor::Encode<()> + Sized {}
