//! Slot layouts of the Celo typed envelopes.
//!
//! ```text
//! CIP-42 (0x7c): chainId nonce maxPriorityFeePerGas maxFeePerGas gas
//!                feeCurrency gatewayFeeRecipient gatewayFee to value data
//!                accessList [yParity r s]
//! CIP-64 (0x7b): chainId nonce maxPriorityFeePerGas maxFeePerGas gas
//!                to value data accessList feeCurrency [yParity r s]
//! ```
//!
//! The encoder walks a layout to build the list and the decoder walks the
//! same layout to read it back, so the two can never disagree on order.

use std::fmt;

use super::types::{TransactionRecord, TxType};
use super::validation::{check_cip42, check_cip64, ValidationError};
use crate::config::{
    CIP42_UNSIGNED_FIELD_COUNT, CIP64_UNSIGNED_FIELD_COUNT, SIGNATURE_FIELD_COUNT,
};

/// One slot of an unsigned Celo list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ChainId,
    Nonce,
    MaxPriorityFeePerGas,
    MaxFeePerGas,
    Gas,
    FeeCurrency,
    GatewayFeeRecipient,
    GatewayFee,
    To,
    Value,
    Data,
    AccessList,
}

impl Field {
    /// Attribute name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::ChainId => "chainId",
            Self::Nonce => "nonce",
            Self::MaxPriorityFeePerGas => "maxPriorityFeePerGas",
            Self::MaxFeePerGas => "maxFeePerGas",
            Self::Gas => "gas",
            Self::FeeCurrency => "feeCurrency",
            Self::GatewayFeeRecipient => "gatewayFeeRecipient",
            Self::GatewayFee => "gatewayFee",
            Self::To => "to",
            Self::Value => "value",
            Self::Data => "data",
            Self::AccessList => "accessList",
        }
    }
}

/// Names of the slots appended to a signed list.
pub const SIGNATURE_FIELDS: [&str; SIGNATURE_FIELD_COUNT] = ["yParity", "r", "s"];

type Check = fn(&TransactionRecord, bool) -> Result<(), ValidationError>;

/// Slot order and validation rules of one Celo encoding.
#[derive(Clone, Copy)]
pub struct Layout {
    /// Tag written before the list.
    pub tx_type: TxType,
    /// Unsigned slots, in wire order.
    pub fields: &'static [Field],
    check: Check,
}

impl fmt::Debug for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layout")
            .field("tx_type", &self.tx_type)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

impl Layout {
    /// Layout for a Celo type, `None` for the standard types.
    pub fn for_type(tx_type: TxType) -> Option<&'static Layout> {
        match tx_type {
            TxType::Cip42 => Some(&CIP42_LAYOUT),
            TxType::Cip64 => Some(&CIP64_LAYOUT),
            _ => None,
        }
    }

    /// Slot count without a signature.
    pub const fn unsigned_len(&self) -> usize {
        self.fields.len()
    }

    /// Slot count with a signature.
    pub const fn signed_len(&self) -> usize {
        self.fields.len() + SIGNATURE_FIELD_COUNT
    }

    /// Name of slot `index`, including the signature slots.
    pub fn slot_name(&self, index: usize) -> Option<&'static str> {
        match self.fields.get(index) {
            Some(field) => Some(field.name()),
            None => SIGNATURE_FIELDS.get(index - self.fields.len()).copied(),
        }
    }

    /// Runs the encoding's validation rules.
    pub(crate) fn validate(
        &self,
        tx: &TransactionRecord,
        fee_cap_overflow: bool,
    ) -> Result<(), ValidationError> {
        (self.check)(tx, fee_cap_overflow)
    }
}

const CIP42_FIELDS: [Field; CIP42_UNSIGNED_FIELD_COUNT] = [
    Field::ChainId,
    Field::Nonce,
    Field::MaxPriorityFeePerGas,
    Field::MaxFeePerGas,
    Field::Gas,
    Field::FeeCurrency,
    Field::GatewayFeeRecipient,
    Field::GatewayFee,
    Field::To,
    Field::Value,
    Field::Data,
    Field::AccessList,
];

const CIP64_FIELDS: [Field; CIP64_UNSIGNED_FIELD_COUNT] = [
    Field::ChainId,
    Field::Nonce,
    Field::MaxPriorityFeePerGas,
    Field::MaxFeePerGas,
    Field::Gas,
    Field::To,
    Field::Value,
    Field::Data,
    Field::AccessList,
    Field::FeeCurrency,
];

/// CIP-42 layout.
pub static CIP42_LAYOUT: Layout = Layout {
    tx_type: TxType::Cip42,
    fields: &CIP42_FIELDS,
    check: check_cip42,
};

/// CIP-64 layout.
pub static CIP64_LAYOUT: Layout = Layout {
    tx_type: TxType::Cip64,
    fields: &CIP64_FIELDS,
    check: check_cip64,
};
