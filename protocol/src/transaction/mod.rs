//! # Transaction Module
//!
//! Serialization and parsing of Celo transactions. The two Celo typed
//! envelopes are handled here; every other type is handed to a pluggable
//! standard codec.
//!
//! ## Architecture
//!
//! ```text
//! types.rs      TxType, Signature, TransactionRecord
//! builder.rs    Fluent TransactionBuilder for records
//! layout.rs     Slot order of the CIP-42 and CIP-64 lists
//! validation.rs Ordered semantic checks shared by encoder and decoder
//! encoder.rs    Record -> tag || rlp(list)
//! decoder.rs    tag || rlp(list) -> record
//! standard.rs   StandardCodec trait and the alloy-backed default
//! dispatch.rs   TransactionCodec, routing and hashing
//! error.rs      CodecError and FieldCountError
//! ```
//!
//! ## Wire Format
//!
//! `0x7c || rlp([chainId, nonce, maxPriorityFeePerGas, maxFeePerGas, gas,
//! feeCurrency, gatewayFeeRecipient, gatewayFee, to, value, data,
//! accessList])`, with `yParity, r, s` appended when signed. CIP-64 (`0x7b`)
//! drops the gateway pair and moves `feeCurrency` to the end.
//!
//! Zero and absent are the same on the wire: both encode as `0x80`, and the
//! decoder returns `None` for either.

pub mod builder;
pub mod decoder;
pub mod dispatch;
pub mod encoder;
pub mod error;
pub mod layout;
pub mod standard;
pub mod types;
pub mod validation;

pub use builder::TransactionBuilder;
pub use decoder::{decode_cip42, decode_cip64};
pub use dispatch::{
    parse_transaction, serialize_transaction, signing_hash, transaction_hash, TransactionCodec,
};
pub use encoder::{encode_cip42, encode_cip64};
pub use error::{CodecError, FieldCountError, StandardError};
pub use layout::{Field, Layout, CIP42_LAYOUT, CIP64_LAYOUT};
pub use standard::{AlloyStandardCodec, StandardCodec, StandardCodecError};
pub use types::{Signature, TransactionRecord, TxType};
pub use validation::{validate_cip42, validate_cip64, ValidationError};
