//! Property-based tests for the Celo envelopes.

use alloy_eips::eip2930::{AccessList, AccessListItem};
use alloy_primitives::{Address, Bytes, B256, U256};
use celo_tx_codec::config::{CIP42_TX_TYPE, CIP64_TX_TYPE};
use celo_tx_codec::{
    parse_transaction, serialize_transaction, Signature, TransactionRecord, TxType,
};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_address() -> impl Strategy<Value = Bytes> {
    prop::array::uniform20(any::<u8>())
        .prop_map(|bytes| Bytes::copy_from_slice(Address::from(bytes).as_slice()))
}

fn arb_u256() -> impl Strategy<Value = U256> {
    prop::array::uniform32(any::<u8>()).prop_map(|bytes| U256::from_be_bytes(bytes))
}

/// Non-empty data. Empty data is indistinguishable from absent on the wire.
fn arb_data() -> impl Strategy<Value = Bytes> {
    prop::collection::vec(any::<u8>(), 1..128).prop_map(Bytes::from)
}

fn arb_access_list() -> impl Strategy<Value = AccessList> {
    prop::collection::vec(
        (
            prop::array::uniform20(any::<u8>()),
            prop::collection::vec(prop::array::uniform32(any::<u8>()), 0..3),
        ),
        0..3,
    )
    .prop_map(|items| {
        AccessList(
            items
                .into_iter()
                .map(|(address, keys)| AccessListItem {
                    address: Address::from(address),
                    storage_keys: keys.into_iter().map(B256::from).collect(),
                })
                .collect(),
        )
    })
}

/// A record that passes CIP-42 validation, with every numeric field either
/// absent or non-zero.
fn arb_cip42() -> impl Strategy<Value = TransactionRecord> {
    (
        1u64..=u64::MAX,
        prop::option::of(1u64..=u64::MAX),
        prop::option::of(arb_u256().prop_filter("non-zero", |v| !v.is_zero())),
        prop::option::of(21_000u64..10_000_000),
        prop::option::of(arb_address()),
        prop::option::of((arb_address(), 1u64..=u64::MAX)),
        prop::option::of(arb_address()),
        prop::option::of(arb_u256().prop_filter("non-zero", |v| !v.is_zero())),
        prop::option::of(arb_data()),
        arb_access_list(),
    )
        .prop_map(
            |(chain_id, nonce, cap, gas, fee_currency, gateway, to, value, data, access_list)| {
                TransactionRecord {
                    tx_type: Some(TxType::Cip42),
                    chain_id,
                    nonce,
                    max_priority_fee_per_gas: cap.map(|c| c / U256::from(2u64) + U256::from(1u64)),
                    max_fee_per_gas: cap,
                    gas,
                    fee_currency,
                    gateway_fee_recipient: gateway.as_ref().map(|(r, _)| r.clone()),
                    gateway_fee: gateway.map(|(_, fee)| U256::from(fee)),
                    to,
                    value,
                    data,
                    access_list,
                    ..Default::default()
                }
            },
        )
}

fn arb_signature() -> impl Strategy<Value = Signature> {
    (
        any::<bool>(),
        arb_u256().prop_filter("non-zero", |v| !v.is_zero()),
        arb_u256().prop_filter("non-zero", |v| !v.is_zero()),
    )
        .prop_map(|(odd, r, s)| Signature::from_y_parity(odd, r, s))
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn unsigned_cip42_roundtrips(tx in arb_cip42()) {
        let bytes = serialize_transaction(&tx, None).unwrap();
        prop_assert_eq!(bytes[0], CIP42_TX_TYPE);
        prop_assert_eq!(parse_transaction(&bytes).unwrap(), tx);
    }

    #[test]
    fn signed_cip42_roundtrips(tx in arb_cip42(), sig in arb_signature()) {
        let bytes = serialize_transaction(&tx, Some(&sig)).unwrap();
        let parsed = parse_transaction(&bytes).unwrap();
        prop_assert_eq!(parsed.signature, Some(sig));
        prop_assert_eq!(TransactionRecord { signature: None, ..parsed }, tx);
    }

    #[test]
    fn cip64_roundtrips(mut tx in arb_cip42(), fee_currency in arb_address()) {
        tx.tx_type = Some(TxType::Cip64);
        tx.fee_currency = Some(fee_currency);
        tx.gateway_fee = None;
        tx.gateway_fee_recipient = None;
        let bytes = serialize_transaction(&tx, None).unwrap();
        prop_assert_eq!(parse_transaction(&bytes).unwrap(), tx);
    }

    #[test]
    fn fee_currency_always_selects_cip42(mut tx in arb_cip42(), fee_currency in arb_address()) {
        tx.tx_type = None;
        tx.fee_currency = Some(fee_currency);
        let bytes = serialize_transaction(&tx, None).unwrap();
        prop_assert_eq!(bytes[0], CIP42_TX_TYPE);
    }

    #[test]
    fn plain_records_never_select_cip42(mut tx in arb_cip42(), sig in arb_signature()) {
        tx.tx_type = None;
        tx.fee_currency = None;
        tx.gateway_fee = None;
        tx.gateway_fee_recipient = None;
        tx.max_fee_per_gas = Some(U256::from(100u64));
        tx.max_priority_fee_per_gas = Some(U256::from(1u64));
        let bytes = serialize_transaction(&tx, Some(&sig)).unwrap();
        prop_assert_ne!(bytes[0], CIP42_TX_TYPE);
    }

    #[test]
    fn decoder_never_panics(
        tag in prop_oneof![
            Just(CIP42_TX_TYPE),
            Just(CIP64_TX_TYPE),
            Just(0x01u8),
            Just(0x02u8),
            0xc0u8..=0xff,
        ],
        body in prop::collection::vec(any::<u8>(), 0..256),
    ) {
        let mut bytes = vec![tag];
        bytes.extend(body);
        let _ = parse_transaction(&bytes);
    }

    #[test]
    fn legacy_v_never_panics(v in any::<u128>(), r in 1u64.., s in 1u64..) {
        let mut items = vec![
            vec![0x80],
            alloy_rlp::encode(1u64),
            alloy_rlp::encode(21_000u64),
        ];
        let mut to = vec![0x94];
        to.extend_from_slice(&[0x11; 20]);
        items.push(to);
        items.push(vec![0x80]);
        items.push(vec![0x80]);
        items.push(alloy_rlp::encode(v));
        items.push(alloy_rlp::encode(r));
        items.push(alloy_rlp::encode(s));

        let payload_length = items.iter().map(Vec::len).sum();
        let mut bytes = Vec::new();
        alloy_rlp::Header { list: true, payload_length }.encode(&mut bytes);
        for item in &items {
            bytes.extend_from_slice(item);
        }
        let _ = parse_transaction(&bytes);
    }
}
