//! Core type definitions for Celo and standard transactions.
//!
//! A single [`TransactionRecord`] carries every variant the codec knows
//! about. Optional fields use `Option` so that "absent", "present and zero"
//! and "present and non-zero" stay distinct in memory even though the wire
//! collapses the first two into the empty string marker.

use alloy_eips::eip2930::AccessList;
use alloy_primitives::{Bytes, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{
    ADDRESS_LENGTH, CIP42_TX_TYPE, CIP64_TX_TYPE, EIP1559_TX_TYPE, EIP2930_TX_TYPE,
    LEGACY_TX_TYPE, V_EVEN, V_ODD,
};

// ---------------------------------------------------------------------------
// TxType
// ---------------------------------------------------------------------------

/// Discriminant for the encoding a transaction uses on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    /// Untyped RLP list, optionally with EIP-155 replay protection.
    Legacy,
    /// EIP-2930 access-list transaction.
    Eip2930,
    /// EIP-1559 fee-market transaction.
    Eip1559,
    /// CIP-64 fee-currency transaction.
    Cip64,
    /// CIP-42 fee-currency transaction with gateway fee.
    Cip42,
}

impl TxType {
    /// The EIP-2718 tag byte for this type.
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Legacy => LEGACY_TX_TYPE,
            Self::Eip2930 => EIP2930_TX_TYPE,
            Self::Eip1559 => EIP1559_TX_TYPE,
            Self::Cip64 => CIP64_TX_TYPE,
            Self::Cip42 => CIP42_TX_TYPE,
        }
    }

    /// Maps a tag byte back to a type. Unknown tags yield `None`.
    pub const fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            LEGACY_TX_TYPE => Some(Self::Legacy),
            EIP2930_TX_TYPE => Some(Self::Eip2930),
            EIP1559_TX_TYPE => Some(Self::Eip1559),
            CIP64_TX_TYPE => Some(Self::Cip64),
            CIP42_TX_TYPE => Some(Self::Cip42),
            _ => None,
        }
    }

    /// `true` for the Celo-specific encodings this crate owns.
    pub const fn is_celo(self) -> bool {
        matches!(self, Self::Cip42 | Self::Cip64)
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => write!(f, "legacy"),
            Self::Eip2930 => write!(f, "eip2930"),
            Self::Eip1559 => write!(f, "eip1559"),
            Self::Cip64 => write!(f, "cip64"),
            Self::Cip42 => write!(f, "cip42"),
        }
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// An ECDSA signature in `{v, r, s}` form.
///
/// Typed Celo transactions only carry a single parity bit. [`Self::y_parity`]
/// maps `v == 27` to `false` and every other `v` to `true`, which loses
/// EIP-155 style `v` values; decoding always yields `v` of 27 or 28.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    /// Recovery value, 27/28 by convention.
    pub v: u64,
    /// The `r` scalar.
    pub r: U256,
    /// The `s` scalar.
    pub s: U256,
}

impl Signature {
    /// Creates a signature from its three components.
    pub const fn new(v: u64, r: U256, s: U256) -> Self {
        Self { v, r, s }
    }

    /// Rebuilds a signature from a decoded parity bit.
    pub const fn from_y_parity(y_parity: bool, r: U256, s: U256) -> Self {
        let v = if y_parity { V_ODD } else { V_EVEN };
        Self { v, r, s }
    }

    /// The parity bit written to typed Celo envelopes.
    pub const fn y_parity(&self) -> bool {
        self.v != V_EVEN
    }
}

// ---------------------------------------------------------------------------
// TransactionRecord
// ---------------------------------------------------------------------------

/// A transaction in structured form, before encoding or after decoding.
///
/// Address-like fields are raw byte strings rather than [`alloy_primitives::Address`]
/// so that malformed input can be represented and rejected by validation
/// instead of being unrepresentable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Explicit encoding tag. `None` lets the dispatcher infer one.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub tx_type: Option<TxType>,

    /// EIP-155 chain id.
    pub chain_id: u64,

    /// Sender's sequence number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<u64>,

    /// Single legacy gas price. Never valid on Celo typed transactions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<U256>,

    /// Tip paid to the block producer per unit of gas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_priority_fee_per_gas: Option<U256>,

    /// Upper bound on the total fee per unit of gas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_fee_per_gas: Option<U256>,

    /// Gas limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<u64>,

    /// ERC-20 token the fees are paid in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_currency: Option<Bytes>,

    /// Full node receiving the gateway fee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway_fee_recipient: Option<Bytes>,

    /// Fee paid to `gateway_fee_recipient`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway_fee: Option<U256>,

    /// Recipient. `None` creates a contract.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Bytes>,

    /// Amount transferred, in wei.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,

    /// Call data or init code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Bytes>,

    /// Addresses and storage slots the transaction pre-declares.
    #[serde(default)]
    pub access_list: AccessList,

    /// Signature, when the record is signed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<Signature>,
}

impl TransactionRecord {
    /// Returns `true` if any field exclusive to the Celo encodings is set.
    pub fn has_celo_fields(&self) -> bool {
        self.fee_currency.is_some()
            || self.gateway_fee.is_some()
            || self.gateway_fee_recipient.is_some()
    }

    /// Returns `true` if the record carries a signature.
    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }
}

/// Address-shape check used by validation: exactly 20 raw bytes.
pub fn is_address(bytes: &[u8]) -> bool {
    bytes.len() == ADDRESS_LENGTH
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
