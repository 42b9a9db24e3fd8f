//! Decoding of Celo typed envelopes.
//!
//! Decoding happens in three passes: split the RLP list into raw slots,
//! check the slot count, then rebuild the record one slot at a time. A slot
//! holding the empty marker leaves its field absent, so a field that was
//! zero on encode comes back as `None`, never as a false zero. The rebuilt
//! record goes through the same validation the encoder applies.

use std::collections::BTreeMap;

use alloy_eips::eip2930::AccessList;
use alloy_primitives::{Bytes, U256};
use alloy_rlp::{Decodable, Header, EMPTY_LIST_CODE, EMPTY_STRING_CODE};
use tracing::{debug, trace};

use super::error::{CodecError, FieldCountError};
use super::layout::{Field, Layout, CIP42_LAYOUT, CIP64_LAYOUT};
use super::types::{Signature, TransactionRecord};
use crate::config::MAX_UINT_BYTES;

/// Decodes a `0x7c`-tagged CIP-42 envelope.
pub fn decode_cip42(bytes: &[u8]) -> Result<TransactionRecord, CodecError> {
    decode(&CIP42_LAYOUT, bytes)
}

/// Decodes a `0x7b`-tagged CIP-64 envelope.
pub fn decode_cip64(bytes: &[u8]) -> Result<TransactionRecord, CodecError> {
    decode(&CIP64_LAYOUT, bytes)
}

/// Decodes a tagged envelope with the given layout and validates the result.
///
/// # Errors
///
/// - [`CodecError::EmptyInput`] for an empty slice.
/// - [`CodecError::FieldCount`] when the list has neither the unsigned nor
///   the signed slot count. The error carries the named raw slots.
/// - [`CodecError::Rlp`] / [`CodecError::TrailingBytes`] for malformed RLP.
/// - [`CodecError::Validation`] when the decoded record breaks a rule.
pub fn decode(layout: &Layout, bytes: &[u8]) -> Result<TransactionRecord, CodecError> {
    let (tag, payload) = bytes.split_first().ok_or(CodecError::EmptyInput)?;
    if *tag != layout.tx_type.as_u8() {
        return Err(CodecError::Rlp(alloy_rlp::Error::Custom(
            "unexpected transaction type tag",
        )));
    }

    let slots = split_list(payload)?;
    trace!(tx_type = %layout.tx_type, slots = slots.len(), "split rlp list");

    let unsigned = layout.unsigned_len();
    let signed = layout.signed_len();
    if slots.len() != unsigned && slots.len() != signed {
        let attributes: BTreeMap<&'static str, Bytes> = slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| {
                layout
                    .slot_name(i)
                    .map(|name| (name, Bytes::copy_from_slice(slot)))
            })
            .collect();
        debug!(
            tx_type = %layout.tx_type,
            actual = slots.len(),
            "rejecting envelope with unexpected slot count"
        );
        return Err(FieldCountError {
            tx_type: layout.tx_type,
            unsigned_fields: unsigned,
            signed_fields: signed,
            actual: slots.len(),
            attributes,
            serialized: Bytes::copy_from_slice(bytes),
        }
        .into());
    }

    let mut tx = TransactionRecord {
        tx_type: Some(layout.tx_type),
        ..Default::default()
    };
    let mut fee_cap_overflow = false;

    for (field, slot) in layout.fields.iter().zip(&slots) {
        match field {
            Field::ChainId => tx.chain_id = decode_u64(slot)?.unwrap_or_default(),
            Field::Nonce => tx.nonce = decode_u64(slot)?,
            Field::MaxPriorityFeePerGas => tx.max_priority_fee_per_gas = decode_u256(slot)?,
            Field::MaxFeePerGas => match decode_fee_cap(slot)? {
                Some(cap) => tx.max_fee_per_gas = cap,
                None => fee_cap_overflow = true,
            },
            Field::Gas => tx.gas = decode_u64(slot)?,
            Field::FeeCurrency => tx.fee_currency = decode_bytes(slot)?,
            Field::GatewayFeeRecipient => tx.gateway_fee_recipient = decode_bytes(slot)?,
            Field::GatewayFee => tx.gateway_fee = decode_u256(slot)?,
            Field::To => tx.to = decode_bytes(slot)?,
            Field::Value => tx.value = decode_u256(slot)?,
            Field::Data => tx.data = decode_bytes(slot)?,
            Field::AccessList => {
                if !matches!(slot, [EMPTY_STRING_CODE] | [EMPTY_LIST_CODE]) {
                    let mut buf = *slot;
                    tx.access_list = AccessList::decode(&mut buf)?;
                }
            }
        }
    }

    if slots.len() == signed {
        tx.signature = decode_signature(&slots[unsigned..])?;
    }

    layout.validate(&tx, fee_cap_overflow)?;
    Ok(tx)
}

/// Splits an RLP list into its raw items, headers included.
///
/// The whole input must be consumed by the list.
pub fn split_list(payload: &[u8]) -> Result<Vec<&[u8]>, CodecError> {
    let mut buf = payload;
    let header = Header::decode(&mut buf)?;
    if !header.list {
        return Err(alloy_rlp::Error::UnexpectedString.into());
    }
    if buf.len() < header.payload_length {
        return Err(alloy_rlp::Error::InputTooShort.into());
    }
    let (mut body, rest) = buf.split_at(header.payload_length);
    if !rest.is_empty() {
        return Err(CodecError::TrailingBytes(rest.len()));
    }

    let mut items = Vec::new();
    while !body.is_empty() {
        let start = body;
        let item = Header::decode(&mut body)?;
        if body.len() < item.payload_length {
            return Err(alloy_rlp::Error::InputTooShort.into());
        }
        body = &body[item.payload_length..];
        items.push(&start[..start.len() - body.len()]);
    }
    Ok(items)
}

fn is_empty_slot(slot: &[u8]) -> bool {
    slot == [EMPTY_STRING_CODE]
}

fn decode_u64(slot: &[u8]) -> Result<Option<u64>, CodecError> {
    if is_empty_slot(slot) {
        return Ok(None);
    }
    let mut buf = slot;
    Ok(Some(u64::decode(&mut buf)?))
}

fn decode_u256(slot: &[u8]) -> Result<Option<U256>, CodecError> {
    if is_empty_slot(slot) {
        return Ok(None);
    }
    let mut buf = slot;
    Ok(Some(U256::decode(&mut buf)?))
}

/// Like [`decode_u256`], but a value wider than 256 bits is reported as
/// `None` instead of an RLP error so validation can name it.
fn decode_fee_cap(slot: &[u8]) -> Result<Option<Option<U256>>, CodecError> {
    if is_empty_slot(slot) {
        return Ok(Some(None));
    }
    let mut buf = slot;
    let raw = Bytes::decode(&mut buf)?;
    if raw.len() > MAX_UINT_BYTES {
        return Ok(None);
    }
    decode_u256(slot).map(Some)
}

fn decode_bytes(slot: &[u8]) -> Result<Option<Bytes>, CodecError> {
    if is_empty_slot(slot) {
        return Ok(None);
    }
    let mut buf = slot;
    Ok(Some(Bytes::decode(&mut buf)?))
}

/// Reads `[yParity, r, s]`. The signature is kept only when both scalars
/// are present; `v` comes back as 27 or 28.
fn decode_signature(slots: &[&[u8]]) -> Result<Option<Signature>, CodecError> {
    let y_parity = match slots[0] {
        [EMPTY_STRING_CODE] => false,
        [0x01] => true,
        other => return Err(CodecError::InvalidYParity(hex::encode(other))),
    };
    let r = decode_u256(slots[1])?;
    let s = decode_u256(slots[2])?;
    Ok(match (r, s) {
        (Some(r), Some(s)) => Some(Signature::from_y_parity(y_parity, r, s)),
        _ => None,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
