//! Semantic validation of Celo typed transactions.
//!
//! Both the encoder and the decoder run the same checks: the encoder so that
//! no bytes are produced for a malformed record, the decoder so that
//! adversarial wire input cannot smuggle one in. Checks run in a fixed order
//! and stop at the first failure, so a record that breaks several rules
//! always reports the same one.

use thiserror::Error;

use super::types::{is_address, TransactionRecord, TxType};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// A semantic rule violated by a transaction record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The chain id is not positive.
    #[error("chain ID {chain_id} is invalid: must be greater than zero")]
    InvalidChainId { chain_id: u64 },

    /// `to` is not a 20-byte address.
    #[error("address {address} is invalid")]
    InvalidAddress { address: String },

    /// A field that this transaction type cannot carry is set.
    #[error("`{field}` is not a valid {tx_type} transaction attribute")]
    IncompatibleField {
        field: &'static str,
        tx_type: TxType,
    },

    /// `maxFeePerGas` does not fit in 256 bits.
    #[error("max fee per gas cannot be higher than 2^256-1")]
    FeeCapOverflow,

    /// The tip is larger than the fee cap.
    #[error(
        "max priority fee per gas ({max_priority_fee_per_gas}) cannot be higher than max fee per gas ({max_fee_per_gas})"
    )]
    TipExceedsFeeCap {
        max_priority_fee_per_gas: String,
        max_fee_per_gas: String,
    },

    /// Only one half of the gateway fee pair is set.
    #[error("`{present}` requires `{missing}` to be set as well")]
    UnpairedField {
        present: &'static str,
        missing: &'static str,
    },

    /// `feeCurrency` is not address-shaped.
    #[error("`feeCurrency` must be a token address, got {fee_currency}")]
    InvalidFeeCurrency { fee_currency: String },

    /// CIP-64 transactions must name a fee currency.
    #[error("`feeCurrency` must be provided for CIP-64 transactions")]
    MissingFeeCurrency,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validates a record destined for the CIP-42 encoding.
///
/// The checks, in order:
///
/// 1. **Chain id**: must be > 0.
/// 2. **Recipient**: `to`, if set, must be an address.
/// 3. **Gas price**: the legacy single price must be absent.
/// 4. **Fee cap**: must fit in 256 bits.
/// 5. **Tip**: must not exceed the fee cap.
/// 6. **Gateway fee**: `gatewayFee` and `gatewayFeeRecipient` come as a pair.
/// 7. **Fee currency**: if set, must be an address.
///
/// # Errors
///
/// Returns the first failing check as a [`ValidationError`].
pub fn validate_cip42(tx: &TransactionRecord) -> Result<(), ValidationError> {
    check_cip42(tx, false)
}

/// Validates a record destined for the CIP-64 encoding.
///
/// Runs checks 1–5 of [`validate_cip42`], then rejects gateway fee fields,
/// then checks the fee currency shape, and finally requires a fee currency.
pub fn validate_cip64(tx: &TransactionRecord) -> Result<(), ValidationError> {
    check_cip64(tx, false)
}

/// CIP-42 rules. `fee_cap_overflow` is raised by the decoder when the
/// `maxFeePerGas` slot was wider than 256 bits and could not be stored.
pub(crate) fn check_cip42(
    tx: &TransactionRecord,
    fee_cap_overflow: bool,
) -> Result<(), ValidationError> {
    check_fee_market(tx, TxType::Cip42, fee_cap_overflow)?;

    match (&tx.gateway_fee, &tx.gateway_fee_recipient) {
        (Some(_), None) => {
            return Err(ValidationError::UnpairedField {
                present: "gatewayFee",
                missing: "gatewayFeeRecipient",
            })
        }
        (None, Some(_)) => {
            return Err(ValidationError::UnpairedField {
                present: "gatewayFeeRecipient",
                missing: "gatewayFee",
            })
        }
        _ => {}
    }

    check_fee_currency(tx)
}

pub(crate) fn check_cip64(
    tx: &TransactionRecord,
    fee_cap_overflow: bool,
) -> Result<(), ValidationError> {
    check_fee_market(tx, TxType::Cip64, fee_cap_overflow)?;

    if tx.gateway_fee.is_some() {
        return Err(ValidationError::IncompatibleField {
            field: "gatewayFee",
            tx_type: TxType::Cip64,
        });
    }
    if tx.gateway_fee_recipient.is_some() {
        return Err(ValidationError::IncompatibleField {
            field: "gatewayFeeRecipient",
            tx_type: TxType::Cip64,
        });
    }

    check_fee_currency(tx)?;

    if tx.fee_currency.is_none() {
        return Err(ValidationError::MissingFeeCurrency);
    }
    Ok(())
}

/// Rules 1–5, shared by both Celo encodings.
fn check_fee_market(
    tx: &TransactionRecord,
    tx_type: TxType,
    fee_cap_overflow: bool,
) -> Result<(), ValidationError> {
    if tx.chain_id == 0 {
        return Err(ValidationError::InvalidChainId {
            chain_id: tx.chain_id,
        });
    }

    if let Some(to) = &tx.to {
        if !is_address(to) {
            return Err(ValidationError::InvalidAddress {
                address: format!("0x{}", hex::encode(to)),
            });
        }
    }

    if tx.gas_price.is_some() {
        return Err(ValidationError::IncompatibleField {
            field: "gasPrice",
            tx_type,
        });
    }

    // A U256 cannot exceed 2^256-1; only the decoder can observe a wider cap.
    if fee_cap_overflow {
        return Err(ValidationError::FeeCapOverflow);
    }

    if let (Some(tip), Some(cap)) = (tx.max_priority_fee_per_gas, tx.max_fee_per_gas) {
        if tip > cap {
            return Err(ValidationError::TipExceedsFeeCap {
                max_priority_fee_per_gas: tip.to_string(),
                max_fee_per_gas: cap.to_string(),
            });
        }
    }

    Ok(())
}

fn check_fee_currency(tx: &TransactionRecord) -> Result<(), ValidationError> {
    if let Some(fee_currency) = &tx.fee_currency {
        if !is_address(fee_currency) {
            return Err(ValidationError::InvalidFeeCurrency {
                fee_currency: format!("0x{}", hex::encode(fee_currency)),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, Bytes, U256};

    fn addr(byte: u8) -> Bytes {
        Bytes::copy_from_slice(Address::repeat_byte(byte).as_slice())
    }

    /// Helper: a record that passes every CIP-42 rule.
    fn valid_cip42() -> TransactionRecord {
        TransactionRecord {
            chain_id: 42220,
            nonce: Some(1),
            max_priority_fee_per_gas: Some(U256::from(1)),
            max_fee_per_gas: Some(U256::from(2)),
            gas: Some(21_000),
            fee_currency: Some(addr(0xfc)),
            to: Some(addr(0x11)),
            ..Default::default()
        }
    }

    #[test]
    fn valid_record_passes() {
        assert_eq!(validate_cip42(&valid_cip42()), Ok(()));
    }

    #[test]
    fn rejects_zero_chain_id() {
        let mut tx = valid_cip42();
        tx.chain_id = 0;
        assert_eq!(
            validate_cip42(&tx),
            Err(ValidationError::InvalidChainId { chain_id: 0 })
        );
    }

    #[test]
    fn rejects_short_to_address() {
        let mut tx = valid_cip42();
        tx.to = Some(Bytes::from_static(&[0xde, 0xad]));
        match validate_cip42(&tx) {
            Err(ValidationError::InvalidAddress { address }) => assert_eq!(address, "0xdead"),
            other => panic!("expected InvalidAddress, got {:?}", other),
        }
    }

    #[test]
    fn rejects_gas_price() {
        let mut tx = valid_cip42();
        tx.gas_price = Some(U256::from(1));
        assert_eq!(
            validate_cip42(&tx),
            Err(ValidationError::IncompatibleField {
                field: "gasPrice",
                tx_type: TxType::Cip42,
            })
        );
    }

    #[test]
    fn reports_fee_cap_overflow_from_wire() {
        assert_eq!(
            check_cip42(&valid_cip42(), true),
            Err(ValidationError::FeeCapOverflow)
        );
    }

    #[test]
    fn rejects_tip_above_fee_cap() {
        let mut tx = valid_cip42();
        tx.max_priority_fee_per_gas = Some(U256::from(20));
        tx.max_fee_per_gas = Some(U256::from(10));
        match validate_cip42(&tx) {
            Err(ValidationError::TipExceedsFeeCap {
                max_priority_fee_per_gas,
                max_fee_per_gas,
            }) => {
                assert_eq!(max_priority_fee_per_gas, "20");
                assert_eq!(max_fee_per_gas, "10");
            }
            other => panic!("expected TipExceedsFeeCap, got {:?}", other),
        }
    }

    #[test]
    fn tip_equal_to_cap_is_fine() {
        let mut tx = valid_cip42();
        tx.max_priority_fee_per_gas = Some(U256::from(10));
        tx.max_fee_per_gas = Some(U256::from(10));
        assert!(validate_cip42(&tx).is_ok());
    }

    #[test]
    fn rejects_gateway_fee_without_recipient() {
        let mut tx = valid_cip42();
        tx.gateway_fee = Some(U256::from(5));
        assert_eq!(
            validate_cip42(&tx),
            Err(ValidationError::UnpairedField {
                present: "gatewayFee",
                missing: "gatewayFeeRecipient",
            })
        );
    }

    #[test]
    fn rejects_recipient_without_gateway_fee() {
        let mut tx = valid_cip42();
        tx.gateway_fee_recipient = Some(addr(0x22));
        assert_eq!(
            validate_cip42(&tx),
            Err(ValidationError::UnpairedField {
                present: "gatewayFeeRecipient",
                missing: "gatewayFee",
            })
        );
    }

    #[test]
    fn rejects_malformed_fee_currency() {
        let mut tx = valid_cip42();
        tx.fee_currency = Some(Bytes::from_static(b"cUSD"));
        assert!(matches!(
            validate_cip42(&tx),
            Err(ValidationError::InvalidFeeCurrency { .. })
        ));
    }

    #[test]
    fn first_violated_rule_wins() {
        // Breaks rules 1, 5 and 6 at once: only the chain id is reported.
        let mut tx = valid_cip42();
        tx.chain_id = 0;
        tx.max_priority_fee_per_gas = Some(U256::from(20));
        tx.max_fee_per_gas = Some(U256::from(10));
        tx.gateway_fee = Some(U256::from(1));
        assert_eq!(
            validate_cip42(&tx),
            Err(ValidationError::InvalidChainId { chain_id: 0 })
        );

        // Fix the chain id: the tip rule is next in line.
        tx.chain_id = 1;
        assert!(matches!(
            validate_cip42(&tx),
            Err(ValidationError::TipExceedsFeeCap { .. })
        ));
    }

    #[test]
    fn cip64_requires_fee_currency() {
        let mut tx = valid_cip42();
        assert!(validate_cip64(&tx).is_ok());
        tx.fee_currency = None;
        assert_eq!(validate_cip64(&tx), Err(ValidationError::MissingFeeCurrency));
    }

    #[test]
    fn cip64_rejects_gateway_fields() {
        let mut tx = valid_cip42();
        tx.gateway_fee = Some(U256::from(1));
        tx.gateway_fee_recipient = Some(addr(0x22));
        assert_eq!(
            validate_cip64(&tx),
            Err(ValidationError::IncompatibleField {
                field: "gatewayFee",
                tx_type: TxType::Cip64,
            })
        );
    }
}
