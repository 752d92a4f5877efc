use crate::hash::Hash;
use blend_codec::minicbor;
use cryptoxide::digest::Digest as _;
use cryptoxide::sha2::Sha256;
use std::convert::Infallible;

/// Streaming `SHA-256` hasher, the digest used for network ids and
/// transaction hashes.
///
/// ```
/// # use blend_crypto::hash::Hasher;
/// let digest = Hasher::hash(b"Test SDF Network ; September 2015");
/// # assert_eq!(
/// #   "cee0302d59844d32bdca915c8203dd44b33fbb7edc19051ea37abedf28ecd472",
/// #   hex::encode(digest)
/// # );
/// ```
pub struct Hasher(Sha256);

impl Hasher {
    /// create a new [`Hasher`]
    #[inline]
    pub fn new() -> Self {
        Self(Sha256::new())
    }

    /// update the [`Hasher`] with the given inputs
    #[inline]
    pub fn input(&mut self, bytes: &[u8]) {
        self.0.input(bytes);
    }

    /// convenient function to directly generate the hash
    /// of the given bytes without creating the intermediary
    /// types [`Hasher`] and calling [`Hasher::input`].
    #[inline]
    pub fn hash(bytes: &[u8]) -> Hash {
        let mut hasher = Self::new();
        hasher.input(bytes);
        hasher.finalize()
    }

    /// feed the CBOR encoding of `data` into the hasher
    pub fn input_cbor(
        &mut self,
        data: &impl minicbor::Encode<()>,
    ) -> Result<(), minicbor::encode::Error<Infallible>> {
        minicbor::encode(data, self)
    }

    /// consume the [`Hasher`] and returns the computed digest
    pub fn finalize(mut self) -> Hash {
        let mut hash = [0; Hash::SIZE];
        self.0.result(&mut hash);
        Hash::new(hash)
    }
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl minicbor::encode::Write for &mut Hasher {
    type Error = Infallible;

    fn write_all(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
        self.input(buf);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        assert_eq!(
            Hasher::hash(&[]).to_string(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn cbor_input_matches_encoded_bytes() {
        let value = (1u32, "soroban");
        let encoded = minicbor::to_vec(value).unwrap();

        let mut streamed = Hasher::new();
        streamed.input_cbor(&value).unwrap();

        assert_eq!(streamed.finalize(), Hasher::hash(&encoded));
    }
}
