use blend_codec::minicbor::{self, Decode, Encode};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, ops::Deref, str::FromStr};

/// `SHA-256` digest identifying a network or a transaction.
///
/// Shown and transported as 64 lowercase hex characters, cbor-encoded as a
/// 32 bytes string.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hash([u8; 32]);

impl Hash {
    pub const SIZE: usize = 32;

    #[inline]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<[u8; 32]> for Hash {
    #[inline]
    fn from(bytes: [u8; 32]) -> Self {
        Self::new(bytes)
    }
}

impl TryFrom<&[u8]> for Hash {
    type Error = std::array::TryFromSliceError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        bytes.try_into().map(Self)
    }
}

impl AsRef<[u8]> for Hash {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Deref for Hash {
    type Target = [u8; 32];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Hash").field(&hex::encode(self)).finish()
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self))
    }
}

impl FromStr for Hash {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0; Self::SIZE];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl Serialize for Hash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;

        raw.parse().map_err(|_| {
            de::Error::invalid_value(de::Unexpected::Str(&raw), &"a 32 bytes hex digest")
        })
    }
}

impl<C> Encode<C> for Hash {
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        _ctx: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        e.bytes(&self.0)?.ok()
    }
}

impl<'a, C> Decode<'a, C> for Hash {
    fn decode(d: &mut minicbor::Decoder<'a>, _ctx: &mut C) -> Result<Self, minicbor::decode::Error> {
        let bytes = d.bytes()?;

        Self::try_from(bytes).map_err(|_| {
            minicbor::decode::Error::message(format!(
                "expected a {} bytes digest, found {}",
                Self::SIZE,
                bytes.len()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blend_codec::{utils::Bytes, Fragment};
    use serde_test::{assert_de_tokens_error, assert_tokens, Token};

    const TESTNET_ID: &str = "cee0302d59844d32bdca915c8203dd44b33fbb7edc19051ea37abedf28ecd472";

    #[test]
    fn parses_hex_digests() {
        let hash: Hash = TESTNET_ID.parse().unwrap();

        assert_eq!(hash[0], 0xce);
        assert_eq!(hash[31], 0x72);
        assert_eq!(hash.to_string(), TESTNET_ID);
    }

    #[test]
    fn short_hex_is_refused() {
        assert!("27".parse::<Hash>().is_err());
    }

    #[test]
    fn json_form_is_hex() {
        let hash: Hash = TESTNET_ID.parse().unwrap();
        assert_tokens(&hash, &[Token::Str(TESTNET_ID)]);
    }

    #[test]
    fn wrong_json_length_names_the_digest() {
        assert_de_tokens_error::<Hash>(
            &[Token::Str("abcd")],
            "invalid value: string \"abcd\", expected a 32 bytes hex digest",
        );
    }

    #[test]
    fn wrong_cbor_length_is_not_decoded() {
        let short = Bytes::from(vec![7u8; 28]).encode_fragment().unwrap();
        assert!(Hash::decode_fragment(&short).is_err());
    }
}
