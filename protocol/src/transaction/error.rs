//! Error types for serialization and parsing.
//!
//! Every public codec operation returns a [`CodecError`]. Validation
//! failures and standard-codec failures are carried through transparently so
//! callers can match on the original error.

use std::collections::BTreeMap;

use alloy_primitives::Bytes;
use thiserror::Error;

use super::types::TxType;
use super::validation::ValidationError;

/// Error raised by a [`super::StandardCodec`] implementation. Boxed so that
/// any delegate can be plugged in; callers downcast to the concrete type.
pub type StandardError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A Celo envelope whose RLP list has the wrong number of slots.
///
/// `attributes` maps the slot names that could be assigned to their raw RLP
/// items, so a caller can see how far the payload got.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "invalid serialized {tx_type} transaction: expected {unsigned_fields} or {signed_fields} fields, got {actual}"
)]
pub struct FieldCountError {
    /// Encoding the tag byte announced.
    pub tx_type: TxType,
    /// Slot count of an unsigned list for `tx_type`.
    pub unsigned_fields: usize,
    /// Slot count of a signed list for `tx_type`.
    pub signed_fields: usize,
    /// Slot count actually found.
    pub actual: usize,
    /// Slot name to raw RLP item, for every slot that has a name.
    pub attributes: BTreeMap<&'static str, Bytes>,
    /// The complete input, tag byte included.
    pub serialized: Bytes,
}

/// Errors that can occur while serializing or parsing a transaction.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The record breaks a semantic rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The RLP list has neither the unsigned nor the signed slot count.
    #[error(transparent)]
    FieldCount(#[from] FieldCountError),

    /// The payload is not well-formed RLP, or a slot has the wrong shape.
    #[error("malformed rlp: {0}")]
    Rlp(#[from] alloy_rlp::Error),

    /// The `yParity` slot holds something other than 0 or 1.
    #[error("invalid y parity: 0x{0}")]
    InvalidYParity(String),

    /// Nothing to parse.
    #[error("empty transaction input")]
    EmptyInput,

    /// Bytes follow the RLP list.
    #[error("{0} trailing bytes after transaction payload")]
    TrailingBytes(usize),

    /// Failure reported by the standard codec, passed through unchanged.
    #[error(transparent)]
    Standard(StandardError),
}

impl CodecError {
    /// Returns the validation failure, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }

    /// `true` when the input bytes themselves are malformed, as opposed to a
    /// well-formed payload describing an invalid transaction.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Self::FieldCount(_)
                | Self::Rlp(_)
                | Self::InvalidYParity(_)
                | Self::EmptyInput
                | Self::TrailingBytes(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_display_transparently() {
        let err = CodecError::from(ValidationError::MissingFeeCurrency);
        assert_eq!(
            err.to_string(),
            "`feeCurrency` must be provided for CIP-64 transactions"
        );
        assert_eq!(
            err.as_validation(),
            Some(&ValidationError::MissingFeeCurrency)
        );
        assert!(!err.is_malformed_input());
    }

    #[test]
    fn field_count_message() {
        let err = FieldCountError {
            tx_type: TxType::Cip42,
            unsigned_fields: 12,
            signed_fields: 15,
            actual: 13,
            attributes: BTreeMap::new(),
            serialized: Bytes::new(),
        };
        assert_eq!(
            err.to_string(),
            "invalid serialized cip42 transaction: expected 12 or 15 fields, got 13"
        );
        assert!(CodecError::from(err).is_malformed_input());
    }

    #[test]
    fn standard_errors_keep_their_type() {
        let inner: StandardError = "boom".into();
        let err = CodecError::Standard(inner);
        assert_eq!(err.to_string(), "boom");
        assert!(!err.is_malformed_input());
    }
}
