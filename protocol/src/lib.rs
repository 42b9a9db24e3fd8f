// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Celo Transaction Codec
//!
//! Wire codec for Celo's typed transactions. Celo extends the Ethereum
//! fee-market transaction with a fee currency (pay gas in an ERC-20 token)
//! and, in CIP-42, a gateway fee paid to the serving full node.
//!
//! ## Architecture
//!
//! - **config**: Type tags, slot counts, and well-known chain ids.
//! - **transaction**: Records, validation, encoding, decoding, and dispatch
//!   to the standard Ethereum codec.
//!
//! ## Quick Start
//!
//! ```rust
//! use alloy_primitives::{Address, U256};
//! use celo_tx_codec::{parse_transaction, serialize_transaction, TransactionBuilder};
//!
//! let tx = TransactionBuilder::new(42220)
//!     .nonce(1)
//!     .max_fee_per_gas(U256::from(10u64))
//!     .fee_currency(Address::repeat_byte(0xfc))
//!     .build();
//!
//! let bytes = serialize_transaction(&tx, None).unwrap();
//! assert_eq!(bytes[0], 0x7c);
//!
//! let back = parse_transaction(&bytes).unwrap();
//! assert_eq!(back.nonce, Some(1));
//! ```

pub mod config;
pub mod transaction;

pub use transaction::{
    parse_transaction, serialize_transaction, signing_hash, transaction_hash, CodecError,
    Signature, TransactionBuilder, TransactionCodec, TransactionRecord, TxType,
};
