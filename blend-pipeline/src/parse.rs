//! Ready-made parsers for transaction return values
//!
//! A parser is any `FnOnce(Option<Bytes>) -> Result<T, ParseError>`. It
//! receives the raw return value of a successful transaction, `None` when
//! the invocation returned nothing.

use blend_primitives::{Bytes, Fragment};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("transaction returned no value")]
    MissingValue,

    #[error("can't decode return value: {0}")]
    Codec(#[from] blend_codec::Error),

    #[error("unexpected return value: {0}")]
    Unexpected(String),
}

/// Hands back the return value untouched
pub fn raw(value: Option<Bytes>) -> Result<Option<Bytes>, ParseError> {
    Ok(value)
}

/// Drops the return value, for calls executed only for their effects
pub fn ignore(_: Option<Bytes>) -> Result<(), ParseError> {
    Ok(())
}

/// Decodes the cbor return value, which must be present
pub fn decode<T: Fragment>(value: Option<Bytes>) -> Result<T, ParseError> {
    let bytes = value.ok_or(ParseError::MissingValue)?;
    Ok(T::decode_fragment(&bytes)?)
}

pub fn decode_optional<T: Fragment>(value: Option<Bytes>) -> Result<Option<T>, ParseError> {
    value
        .map(|bytes| T::decode_fragment(&bytes))
        .transpose()
        .map_err(ParseError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_requires_a_value() {
        assert!(matches!(decode::<u64>(None), Err(ParseError::MissingValue)));
        assert_eq!(decode_optional::<u64>(None).unwrap(), None);
    }

    #[test]
    fn decode_reads_cbor() {
        let value = Bytes::from(vec![0x18, 0x2a]);
        assert_eq!(decode::<u64>(Some(value.clone())).unwrap(), 42);
        assert_eq!(decode_optional::<u64>(Some(value)).unwrap(), Some(42));
    }

    #[test]
    fn bad_payload_is_a_codec_error() {
        let value = Bytes::from(vec![0xff]);
        assert!(matches!(decode::<u64>(Some(value)), Err(ParseError::Codec(_))));
    }
}
