//! Transaction construction via the builder pattern.
//!
//! The [`TransactionBuilder`] takes typed values (addresses, integers) and
//! produces a [`TransactionRecord`], so callers never hand-assemble raw byte
//! fields. `build()` does not validate; the codec does that on serialize.

use alloy_eips::eip2930::AccessList;
use alloy_primitives::{Address, Bytes, U256};

use super::types::{Signature, TransactionRecord, TxType};

/// Fluent builder for [`TransactionRecord`] instances.
///
/// # Usage
///
/// ```rust
/// use alloy_primitives::{address, U256};
/// use celo_tx_codec::transaction::TransactionBuilder;
///
/// let tx = TransactionBuilder::new(42220)
///     .nonce(7)
///     .max_priority_fee_per_gas(U256::from(1_000_000_000u64))
///     .max_fee_per_gas(U256::from(5_000_000_000u64))
///     .gas(21_000)
///     .fee_currency(address!("765de816845861e75a25fca122bb6898b8b1282a"))
///     .to(address!("00000000000000000000000000000000000000a1"))
///     .value(U256::from(1u64))
///     .build();
///
/// assert!(tx.has_celo_fields());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    tx: TransactionRecord,
}

impl TransactionBuilder {
    /// Creates a builder for the given chain. The type is left for the
    /// dispatcher to infer.
    pub fn new(chain_id: u64) -> Self {
        Self {
            tx: TransactionRecord {
                chain_id,
                ..Default::default()
            },
        }
    }

    /// Pins the encoding.
    pub fn tx_type(mut self, tx_type: TxType) -> Self {
        self.tx.tx_type = Some(tx_type);
        self
    }

    /// Sets the sender's nonce.
    pub fn nonce(mut self, nonce: u64) -> Self {
        self.tx.nonce = Some(nonce);
        self
    }

    /// Sets the legacy gas price. Celo typed transactions reject it.
    pub fn gas_price(mut self, gas_price: U256) -> Self {
        self.tx.gas_price = Some(gas_price);
        self
    }

    pub fn max_priority_fee_per_gas(mut self, tip: U256) -> Self {
        self.tx.max_priority_fee_per_gas = Some(tip);
        self
    }

    pub fn max_fee_per_gas(mut self, cap: U256) -> Self {
        self.tx.max_fee_per_gas = Some(cap);
        self
    }

    /// Sets the gas limit.
    pub fn gas(mut self, gas: u64) -> Self {
        self.tx.gas = Some(gas);
        self
    }

    /// Pays fees in the ERC-20 token at `token`.
    pub fn fee_currency(mut self, token: Address) -> Self {
        self.tx.fee_currency = Some(address_bytes(token));
        self
    }

    /// Sets both halves of the gateway fee.
    pub fn gateway_fee(mut self, recipient: Address, fee: U256) -> Self {
        self.tx.gateway_fee_recipient = Some(address_bytes(recipient));
        self.tx.gateway_fee = Some(fee);
        self
    }

    pub fn to(mut self, to: Address) -> Self {
        self.tx.to = Some(address_bytes(to));
        self
    }

    /// Sets the amount transferred, in wei.
    pub fn value(mut self, value: U256) -> Self {
        self.tx.value = Some(value);
        self
    }

    /// Attaches call data or init code.
    pub fn data(mut self, data: impl Into<Bytes>) -> Self {
        self.tx.data = Some(data.into());
        self
    }

    pub fn access_list(mut self, access_list: AccessList) -> Self {
        self.tx.access_list = access_list;
        self
    }

    /// Attaches a signature. The codec uses it when none is passed
    /// explicitly.
    pub fn signature(mut self, signature: Signature) -> Self {
        self.tx.signature = Some(signature);
        self
    }

    /// Consumes the builder and returns the record.
    pub fn build(self) -> TransactionRecord {
        self.tx
    }
}

fn address_bytes(address: Address) -> Bytes {
    Bytes::copy_from_slice(address.as_slice())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
