//! The standard Ethereum codec used for everything that is not a Celo type.
//!
//! The dispatcher only needs two operations from it, so it sits behind the
//! [`StandardCodec`] trait. [`AlloyStandardCodec`] is the default and maps
//! records onto the `alloy-consensus` transaction types.

use alloy_consensus::{
    SignableTransaction, Signed, TxEip1559, TxEip2930, TxEnvelope, TxLegacy,
};
use alloy_eips::eip2718::{Decodable2718, Eip2718Error, Encodable2718};
use alloy_primitives::{Address, Bytes, PrimitiveSignature, TxKind, U256};
use thiserror::Error;
use tracing::trace;

use super::error::StandardError;
use super::types::{is_address, Signature, TransactionRecord, TxType};
use crate::config::{EIP155_V_OFFSET, V_EVEN};

/// Serializer and parser for the non-Celo transaction types.
///
/// Errors are boxed; the dispatcher passes them to the caller unchanged as
/// [`super::CodecError::Standard`].
pub trait StandardCodec {
    /// Serializes `tx`, signed with `signature` when one is given.
    fn serialize(
        &self,
        tx: &TransactionRecord,
        signature: Option<&Signature>,
    ) -> Result<Vec<u8>, StandardError>;

    /// Parses a standard envelope.
    fn parse(&self, bytes: &[u8]) -> Result<TransactionRecord, StandardError>;
}

/// Errors raised by [`AlloyStandardCodec`].
#[derive(Debug, Error)]
pub enum StandardCodecError {
    /// The envelope type is not one this codec handles.
    #[error("unsupported transaction type 0x{0:02x}")]
    UnsupportedType(u8),

    /// The record has neither a fee cap nor a gas price.
    #[error("cannot infer transaction type: set maxFeePerGas or gasPrice")]
    CannotInferType,

    /// A fee does not fit the 128-bit field of the standard types.
    #[error("{0} does not fit in 128 bits")]
    ValueOverflow(&'static str),

    /// An address field is not 20 bytes long.
    #[error("{0} is not a 20-byte address")]
    InvalidAddress(&'static str),

    /// Bytes follow the envelope.
    #[error("{0} trailing bytes after transaction envelope")]
    TrailingBytes(usize),

    /// Decoding failed inside `alloy`.
    #[error("eip-2718 decoding failed: {0}")]
    Eip2718(#[from] Eip2718Error),
}

/// [`StandardCodec`] backed by `alloy-consensus`.
///
/// Serializes legacy, EIP-2930 and EIP-1559 transactions. Parsing accepts
/// signed envelopes of those three types only.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlloyStandardCodec;

impl StandardCodec for AlloyStandardCodec {
    fn serialize(
        &self,
        tx: &TransactionRecord,
        signature: Option<&Signature>,
    ) -> Result<Vec<u8>, StandardError> {
        Ok(encode_standard(tx, signature)?)
    }

    fn parse(&self, bytes: &[u8]) -> Result<TransactionRecord, StandardError> {
        Ok(decode_standard(bytes)?)
    }
}

/// Picks the standard type for a record without an explicit one.
///
/// A fee cap means EIP-1559. A gas price means EIP-2930 when an access list
/// is present and legacy otherwise.
pub fn infer_type(tx: &TransactionRecord) -> Result<TxType, StandardCodecError> {
    match tx.tx_type {
        Some(ty) => Ok(ty),
        None if tx.max_fee_per_gas.is_some() => Ok(TxType::Eip1559),
        None if tx.gas_price.is_some() && !tx.access_list.is_empty() => Ok(TxType::Eip2930),
        None if tx.gas_price.is_some() => Ok(TxType::Legacy),
        None => Err(StandardCodecError::CannotInferType),
    }
}

fn encode_standard(
    tx: &TransactionRecord,
    signature: Option<&Signature>,
) -> Result<Vec<u8>, StandardCodecError> {
    let signature = signature.or(tx.signature.as_ref());
    let tx_type = infer_type(tx)?;
    trace!(%tx_type, signed = signature.is_some(), "encoding standard transaction");

    match tx_type {
        TxType::Legacy => {
            let chain_id = (tx.chain_id != 0).then_some(tx.chain_id);
            let inner = TxLegacy {
                chain_id,
                nonce: tx.nonce.unwrap_or_default(),
                gas_price: to_u128(tx.gas_price, "gasPrice")?,
                gas_limit: tx.gas.unwrap_or_default(),
                to: tx_kind(tx.to.as_ref())?,
                value: tx.value.unwrap_or_default(),
                input: tx.data.clone().unwrap_or_default(),
            };
            Ok(finish(inner, signature))
        }
        TxType::Eip2930 => {
            let inner = TxEip2930 {
                chain_id: tx.chain_id,
                nonce: tx.nonce.unwrap_or_default(),
                gas_price: to_u128(tx.gas_price, "gasPrice")?,
                gas_limit: tx.gas.unwrap_or_default(),
                to: tx_kind(tx.to.as_ref())?,
                value: tx.value.unwrap_or_default(),
                access_list: tx.access_list.clone(),
                input: tx.data.clone().unwrap_or_default(),
            };
            Ok(finish(inner, signature))
        }
        TxType::Eip1559 => {
            let inner = TxEip1559 {
                chain_id: tx.chain_id,
                nonce: tx.nonce.unwrap_or_default(),
                gas_limit: tx.gas.unwrap_or_default(),
                max_fee_per_gas: to_u128(tx.max_fee_per_gas, "maxFeePerGas")?,
                max_priority_fee_per_gas: to_u128(
                    tx.max_priority_fee_per_gas,
                    "maxPriorityFeePerGas",
                )?,
                to: tx_kind(tx.to.as_ref())?,
                value: tx.value.unwrap_or_default(),
                access_list: tx.access_list.clone(),
                input: tx.data.clone().unwrap_or_default(),
            };
            Ok(finish(inner, signature))
        }
        other => Err(StandardCodecError::UnsupportedType(other.as_u8())),
    }
}

/// Unsigned: the signing payload. Signed: the EIP-2718 envelope.
fn finish<T>(inner: T, signature: Option<&Signature>) -> Vec<u8>
where
    T: SignableTransaction<PrimitiveSignature>,
    TxEnvelope: From<Signed<T>>,
{
    match signature {
        Some(sig) => {
            let sig = PrimitiveSignature::new(sig.r, sig.s, recovery_parity(sig.v));
            TxEnvelope::from(inner.into_signed(sig)).encoded_2718()
        }
        None => {
            let mut out = Vec::new();
            inner.encode_for_signing(&mut out);
            out
        }
    }
}

fn decode_standard(bytes: &[u8]) -> Result<TransactionRecord, StandardCodecError> {
    let Some(&first) = bytes.first() else {
        return Err(Eip2718Error::RlpError(alloy_rlp::Error::InputTooShort).into());
    };
    // Lists start at 0xc0 and are untyped legacy envelopes.
    let supported = matches!(
        TxType::from_u8(first),
        Some(TxType::Eip2930 | TxType::Eip1559)
    );
    if first < 0xc0 && !supported {
        return Err(StandardCodecError::UnsupportedType(first));
    }

    let mut buf = bytes;
    let envelope = TxEnvelope::decode_2718(&mut buf)?;
    if !buf.is_empty() {
        return Err(StandardCodecError::TrailingBytes(buf.len()));
    }

    let record = match envelope {
        TxEnvelope::Legacy(signed) => {
            let tx = signed.tx();
            let v = legacy_v(signed.signature().v(), tx.chain_id)
                .ok_or(StandardCodecError::ValueOverflow("v"))?;
            TransactionRecord {
                tx_type: Some(TxType::Legacy),
                chain_id: tx.chain_id.unwrap_or_default(),
                nonce: non_zero(tx.nonce),
                gas_price: non_zero_u256(U256::from(tx.gas_price)),
                gas: non_zero(tx.gas_limit),
                to: to_bytes(tx.to),
                value: non_zero_u256(tx.value),
                data: non_empty(&tx.input),
                signature: Some(Signature::new(
                    v,
                    signed.signature().r(),
                    signed.signature().s(),
                )),
                ..Default::default()
            }
        }
        TxEnvelope::Eip2930(signed) => {
            let tx = signed.tx();
            TransactionRecord {
                tx_type: Some(TxType::Eip2930),
                chain_id: tx.chain_id,
                nonce: non_zero(tx.nonce),
                gas_price: non_zero_u256(U256::from(tx.gas_price)),
                gas: non_zero(tx.gas_limit),
                to: to_bytes(tx.to),
                value: non_zero_u256(tx.value),
                data: non_empty(&tx.input),
                access_list: tx.access_list.clone(),
                signature: Some(typed_signature(signed.signature())),
                ..Default::default()
            }
        }
        TxEnvelope::Eip1559(signed) => {
            let tx = signed.tx();
            TransactionRecord {
                tx_type: Some(TxType::Eip1559),
                chain_id: tx.chain_id,
                nonce: non_zero(tx.nonce),
                max_priority_fee_per_gas: non_zero_u256(U256::from(tx.max_priority_fee_per_gas)),
                max_fee_per_gas: non_zero_u256(U256::from(tx.max_fee_per_gas)),
                gas: non_zero(tx.gas_limit),
                to: to_bytes(tx.to),
                value: non_zero_u256(tx.value),
                data: non_empty(&tx.input),
                access_list: tx.access_list.clone(),
                signature: Some(typed_signature(signed.signature())),
                ..Default::default()
            }
        }
        _ => return Err(StandardCodecError::UnsupportedType(first)),
    };
    Ok(record)
}

/// Legacy `v`: EIP-155 when a chain id is present, else 27/28. `None` when
/// the chain id is too large for the EIP-155 value to fit in a `u64`.
fn legacy_v(parity: bool, chain_id: Option<u64>) -> Option<u64> {
    let parity = u64::from(parity);
    match chain_id {
        Some(id) => id
            .checked_mul(2)?
            .checked_add(EIP155_V_OFFSET)?
            .checked_add(parity),
        None => Some(V_EVEN + parity),
    }
}

/// Recovers the y parity from any `v` convention: raw 0/1, 27/28 or EIP-155.
fn recovery_parity(v: u64) -> bool {
    match v {
        0 | 1 => v == 1,
        27 | 28 => v == 28,
        _ => v >= EIP155_V_OFFSET && (v - EIP155_V_OFFSET) % 2 == 1,
    }
}

fn typed_signature(sig: &PrimitiveSignature) -> Signature {
    Signature::from_y_parity(sig.v(), sig.r(), sig.s())
}

fn to_u128(value: Option<U256>, field: &'static str) -> Result<u128, StandardCodecError> {
    u128::try_from(value.unwrap_or_default()).map_err(|_| StandardCodecError::ValueOverflow(field))
}

fn tx_kind(to: Option<&Bytes>) -> Result<TxKind, StandardCodecError> {
    match to {
        None => Ok(TxKind::Create),
        Some(b) if is_address(b) => Ok(TxKind::Call(Address::from_slice(b))),
        Some(_) => Err(StandardCodecError::InvalidAddress("to")),
    }
}

fn to_bytes(kind: TxKind) -> Option<Bytes> {
    match kind {
        TxKind::Call(addr) => Some(Bytes::copy_from_slice(addr.as_slice())),
        TxKind::Create => None,
    }
}

fn non_zero(v: u64) -> Option<u64> {
    (v != 0).then_some(v)
}

fn non_zero_u256(v: U256) -> Option<U256> {
    (!v.is_zero()).then_some(v)
}

fn non_empty(b: &Bytes) -> Option<Bytes> {
    (!b.is_empty()).then(|| b.clone())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
