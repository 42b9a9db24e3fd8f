//! # Codec Configuration & Constants
//!
//! Every magic number the codec depends on lives here: type tags, slot
//! counts, address widths and the Celo network identifiers. The encoder and
//! decoder read their layouts from these values, so a wire change starts and
//! ends in this file.

// ---------------------------------------------------------------------------
// Transaction Type Tags
// ---------------------------------------------------------------------------

/// EIP-2718 tag of a legacy transaction. Never written on the wire: legacy
/// transactions are bare RLP lists.
pub const LEGACY_TX_TYPE: u8 = 0x00;

/// EIP-2930 access-list transaction.
pub const EIP2930_TX_TYPE: u8 = 0x01;

/// EIP-1559 fee-market transaction.
pub const EIP1559_TX_TYPE: u8 = 0x02;

/// CIP-64: fee-market transaction paid in an ERC-20 fee currency.
pub const CIP64_TX_TYPE: u8 = 0x7b;

/// CIP-42: fee-market transaction with fee currency and gateway fee.
pub const CIP42_TX_TYPE: u8 = 0x7c;

// ---------------------------------------------------------------------------
// Wire Layout
// ---------------------------------------------------------------------------

/// Slots in an unsigned CIP-42 list.
pub const CIP42_UNSIGNED_FIELD_COUNT: usize = 12;

/// Slots in a signed CIP-42 list (`yParity`, `r`, `s` appended).
pub const CIP42_SIGNED_FIELD_COUNT: usize = CIP42_UNSIGNED_FIELD_COUNT + SIGNATURE_FIELD_COUNT;

/// Slots in an unsigned CIP-64 list.
pub const CIP64_UNSIGNED_FIELD_COUNT: usize = 10;

/// Slots in a signed CIP-64 list.
pub const CIP64_SIGNED_FIELD_COUNT: usize = CIP64_UNSIGNED_FIELD_COUNT + SIGNATURE_FIELD_COUNT;

/// `yParity`, `r`, `s`.
pub const SIGNATURE_FIELD_COUNT: usize = 3;

/// Width of an account address in bytes.
pub const ADDRESS_LENGTH: usize = 20;

/// Widest numeric slot the codec accepts. Anything longer exceeds 2^256-1.
pub const MAX_UINT_BYTES: usize = 32;

// ---------------------------------------------------------------------------
// Signature Conventions
// ---------------------------------------------------------------------------

/// Pre-EIP-155 `v` for an even y-coordinate.
pub const V_EVEN: u64 = 27;

/// Pre-EIP-155 `v` for an odd y-coordinate.
pub const V_ODD: u64 = 28;

/// Offset applied to legacy `v` when EIP-155 replay protection is in use:
/// `v = chain_id * 2 + 35 + parity`.
pub const EIP155_V_OFFSET: u64 = 35;

// ---------------------------------------------------------------------------
// Networks
// ---------------------------------------------------------------------------

/// Celo mainnet.
pub const CELO_MAINNET_CHAIN_ID: u64 = 42220;

/// Alfajores testnet.
pub const CELO_ALFAJORES_CHAIN_ID: u64 = 44787;

/// Baklava testnet.
pub const CELO_BAKLAVA_CHAIN_ID: u64 = 62320;

/// Returns a friendly name for a chain id, mainly for logging.
pub fn network_name(chain_id: u64) -> String {
    match chain_id {
        CELO_MAINNET_CHAIN_ID => "celo".to_string(),
        CELO_ALFAJORES_CHAIN_ID => "alfajores".to_string(),
        CELO_BAKLAVA_CHAIN_ID => "baklava".to_string(),
        other => format!("unknown({})", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_celo_tags_do_not_collide_with_standard_tags() {
        for tag in [LEGACY_TX_TYPE, EIP2930_TX_TYPE, EIP1559_TX_TYPE] {
            assert_ne!(tag, CIP42_TX_TYPE);
            assert_ne!(tag, CIP64_TX_TYPE);
        }
        assert_ne!(CIP42_TX_TYPE, CIP64_TX_TYPE);
    }

    #[test]
    fn test_typed_tags_are_below_rlp_list_prefix() {
        // A typed envelope must never be mistaken for a legacy RLP list.
        assert!(CIP42_TX_TYPE < 0x80);
        assert!(CIP64_TX_TYPE < 0x80);
    }

    #[test]
    fn test_field_counts() {
        assert_eq!(CIP42_UNSIGNED_FIELD_COUNT, 12);
        assert_eq!(CIP42_SIGNED_FIELD_COUNT, 15);
        assert_eq!(CIP64_UNSIGNED_FIELD_COUNT, 10);
        assert_eq!(CIP64_SIGNED_FIELD_COUNT, 13);
    }

    #[test]
    fn test_network_name_formatting() {
        assert_eq!(network_name(CELO_MAINNET_CHAIN_ID), "celo");
        assert_eq!(network_name(CELO_ALFAJORES_CHAIN_ID), "alfajores");
        assert_eq!(network_name(1), "unknown(1)");
    }
}
