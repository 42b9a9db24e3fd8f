//! Encoding of Celo typed envelopes.
//!
//! The list is fixed length: an absent or zero field is written as the
//! empty string marker, never dropped. Output is `tag || rlp(list)`.

use alloy_primitives::{Bytes, U256};
use alloy_rlp::{Header, EMPTY_STRING_CODE};

use super::error::CodecError;
use super::layout::{Field, Layout, CIP42_LAYOUT, CIP64_LAYOUT};
use super::types::{Signature, TransactionRecord};

/// Validates `tx` against CIP-42 and encodes it.
///
/// # Errors
///
/// Returns [`CodecError::Validation`] before any bytes are produced if the
/// record breaks a CIP-42 rule.
pub fn encode_cip42(
    tx: &TransactionRecord,
    signature: Option<&Signature>,
) -> Result<Vec<u8>, CodecError> {
    encode(&CIP42_LAYOUT, tx, signature)
}

/// Validates `tx` against CIP-64 and encodes it.
pub fn encode_cip64(
    tx: &TransactionRecord,
    signature: Option<&Signature>,
) -> Result<Vec<u8>, CodecError> {
    encode(&CIP64_LAYOUT, tx, signature)
}

/// Validates and encodes `tx` with the given layout.
pub fn encode(
    layout: &Layout,
    tx: &TransactionRecord,
    signature: Option<&Signature>,
) -> Result<Vec<u8>, CodecError> {
    layout.validate(tx, false)?;

    let items = field_list(layout, tx, signature);
    let payload_length: usize = items.iter().map(Vec::len).sum();

    let mut out = Vec::with_capacity(1 + alloy_rlp::length_of_length(payload_length) + payload_length);
    out.push(layout.tx_type.as_u8());
    Header {
        list: true,
        payload_length,
    }
    .encode(&mut out);
    for item in &items {
        out.extend_from_slice(item);
    }
    Ok(out)
}

/// Builds the ordered list of RLP items, one per slot.
///
/// Yields `layout.unsigned_len()` items, or `layout.signed_len()` when a
/// signature is supplied. Does not validate.
pub fn field_list(
    layout: &Layout,
    tx: &TransactionRecord,
    signature: Option<&Signature>,
) -> Vec<Vec<u8>> {
    let mut items: Vec<Vec<u8>> = layout
        .fields
        .iter()
        .map(|field| encode_field(*field, tx))
        .collect();

    if let Some(sig) = signature {
        // 27 is the only `v` that maps to an even parity.
        items.push(if sig.y_parity() {
            alloy_rlp::encode(1u8)
        } else {
            empty()
        });
        items.push(uint(Some(sig.r)));
        items.push(uint(Some(sig.s)));
    }
    items
}

fn encode_field(field: Field, tx: &TransactionRecord) -> Vec<u8> {
    match field {
        Field::ChainId => quantity(Some(tx.chain_id)),
        Field::Nonce => quantity(tx.nonce),
        Field::MaxPriorityFeePerGas => uint(tx.max_priority_fee_per_gas),
        Field::MaxFeePerGas => uint(tx.max_fee_per_gas),
        Field::Gas => quantity(tx.gas),
        Field::FeeCurrency => bytes(tx.fee_currency.as_ref()),
        Field::GatewayFeeRecipient => bytes(tx.gateway_fee_recipient.as_ref()),
        Field::GatewayFee => uint(tx.gateway_fee),
        Field::To => bytes(tx.to.as_ref()),
        Field::Value => uint(tx.value),
        Field::Data => bytes(tx.data.as_ref()),
        Field::AccessList => alloy_rlp::encode(&tx.access_list),
    }
}

fn empty() -> Vec<u8> {
    vec![EMPTY_STRING_CODE]
}

fn quantity(value: Option<u64>) -> Vec<u8> {
    match value {
        Some(v) if v != 0 => alloy_rlp::encode(v),
        _ => empty(),
    }
}

fn uint(value: Option<U256>) -> Vec<u8> {
    match value {
        Some(v) if !v.is_zero() => alloy_rlp::encode(v),
        _ => empty(),
    }
}

fn bytes(value: Option<&Bytes>) -> Vec<u8> {
    match value {
        Some(b) if !b.is_empty() => alloy_rlp::encode(b),
        _ => empty(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
