//! Top-level entry points: route a record or a byte string to the right
//! codec.
//!
//! Serialization picks CIP-64 for an explicit `cip64` record, CIP-42 for an
//! explicit `cip42` record or one carrying any Celo-only field, and the
//! standard codec otherwise. Parsing routes on the first byte.

use alloy_primitives::{keccak256, B256};
use tracing::{debug, trace};

use super::decoder::decode;
use super::encoder::encode;
use super::error::CodecError;
use super::layout::{Layout, CIP42_LAYOUT};
use super::standard::{AlloyStandardCodec, StandardCodec};
use super::types::{Signature, TransactionRecord, TxType};
use crate::config::network_name;

/// Celo-aware codec that hands standard transactions to `C`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionCodec<C = AlloyStandardCodec> {
    standard: C,
}

impl TransactionCodec<AlloyStandardCodec> {
    /// Creates a codec with the default `alloy` standard delegate.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: StandardCodec> TransactionCodec<C> {
    /// Creates a codec with a custom standard delegate.
    pub fn with_standard(standard: C) -> Self {
        Self { standard }
    }

    /// The standard delegate.
    pub fn standard(&self) -> &C {
        &self.standard
    }

    /// Serializes `tx`. An explicit `signature` wins over `tx.signature`.
    ///
    /// # Errors
    ///
    /// [`CodecError::Validation`] for a Celo record that breaks a rule, or
    /// [`CodecError::Standard`] with the delegate's error unchanged.
    pub fn serialize(
        &self,
        tx: &TransactionRecord,
        signature: Option<&Signature>,
    ) -> Result<Vec<u8>, CodecError> {
        let signature = signature.or(tx.signature.as_ref());
        match route(tx) {
            Some(layout) => {
                debug!(
                    tx_type = %layout.tx_type,
                    network = %network_name(tx.chain_id),
                    "serializing celo transaction"
                );
                encode(layout, tx, signature)
            }
            None => {
                trace!("delegating to standard codec");
                self.standard
                    .serialize(tx, signature)
                    .map_err(CodecError::Standard)
            }
        }
    }

    /// Parses a serialized transaction of any supported type.
    ///
    /// # Errors
    ///
    /// [`CodecError::EmptyInput`] for an empty slice, the Celo decoder's
    /// errors for `0x7c` and `0x7b`, and [`CodecError::Standard`] otherwise.
    pub fn parse(&self, bytes: &[u8]) -> Result<TransactionRecord, CodecError> {
        let tag = *bytes.first().ok_or(CodecError::EmptyInput)?;
        match TxType::from_u8(tag).and_then(Layout::for_type) {
            Some(layout) => decode(layout, bytes),
            None => {
                trace!(tag, "delegating to standard codec");
                self.standard.parse(bytes).map_err(CodecError::Standard)
            }
        }
    }

    /// `keccak256` of the unsigned serialization, the digest a sender signs.
    ///
    /// Any signature on `tx` is ignored.
    pub fn signing_hash(&self, tx: &TransactionRecord) -> Result<B256, CodecError> {
        let unsigned = TransactionRecord {
            signature: None,
            ..tx.clone()
        };
        Ok(keccak256(self.serialize(&unsigned, None)?))
    }

    /// `keccak256` of the signed serialization.
    pub fn transaction_hash(
        &self,
        tx: &TransactionRecord,
        signature: &Signature,
    ) -> Result<B256, CodecError> {
        Ok(keccak256(self.serialize(tx, Some(signature))?))
    }
}

/// Celo layout for `tx`, `None` when it belongs to the standard codec.
fn route(tx: &TransactionRecord) -> Option<&'static Layout> {
    match tx.tx_type.and_then(Layout::for_type) {
        Some(layout) => Some(layout),
        None if tx.has_celo_fields() => Some(&CIP42_LAYOUT),
        None => None,
    }
}

/// Serializes `tx` with the default codec.
pub fn serialize_transaction(
    tx: &TransactionRecord,
    signature: Option<&Signature>,
) -> Result<Vec<u8>, CodecError> {
    TransactionCodec::new().serialize(tx, signature)
}

/// Parses `bytes` with the default codec.
pub fn parse_transaction(bytes: &[u8]) -> Result<TransactionRecord, CodecError> {
    TransactionCodec::new().parse(bytes)
}

/// Signing hash with the default codec.
pub fn signing_hash(tx: &TransactionRecord) -> Result<B256, CodecError> {
    TransactionCodec::new().signing_hash(tx)
}

/// Transaction hash with the default codec.
pub fn transaction_hash(tx: &TransactionRecord, signature: &Signature) -> Result<B256, CodecError> {
    TransactionCodec::new().transaction_hash(tx, signature)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
