use blend_crypto::hash::{Hash, Hasher};
use std::fmt;

pub const PUBLIC_PASSPHRASE: &str = "Public Global Stellar Network ; September 2015";

pub const TESTNET_PASSPHRASE: &str = "Test SDF Network ; September 2015";

pub const FUTURENET_PASSPHRASE: &str = "Test SDF Future Network ; October 2022";

pub const STANDALONE_PASSPHRASE: &str = "Standalone Network ; February 2017";

/// Domain separator prepended to the transaction body before hashing
pub const ENVELOPE_TYPE_TX: u8 = 2;

/// Hash of the network passphrase; it binds every transaction hash (and
/// so every signature) to one network.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetworkId(Hash);

impl NetworkId {
    pub fn from_passphrase(passphrase: &str) -> Self {
        Self(Hasher::hash(passphrase.as_bytes()))
    }

    pub fn testnet() -> Self {
        Self::from_passphrase(TESTNET_PASSPHRASE)
    }

    pub fn public() -> Self {
        Self::from_passphrase(PUBLIC_PASSPHRASE)
    }
}

impl AsRef<[u8]> for NetworkId {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl fmt::Debug for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NetworkId").field(&self.0.to_string()).finish()
    }
}
