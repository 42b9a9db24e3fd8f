// Serialization & parsing benchmarks for the Celo transaction codec.
//
// Covers CIP-42 encode and decode with and without a signature, CIP-64
// encode, and decode throughput as the call data grows.

use alloy_primitives::{Address, U256};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use celo_tx_codec::transaction::{decode_cip42, encode_cip42, encode_cip64};
use celo_tx_codec::{Signature, TransactionBuilder, TransactionRecord, TxType};

fn sample_tx(data_len: usize) -> TransactionRecord {
    TransactionBuilder::new(42220)
        .nonce(42)
        .max_priority_fee_per_gas(U256::from(1_000_000_000u64))
        .max_fee_per_gas(U256::from(5_000_000_000u64))
        .gas(250_000)
        .fee_currency(Address::repeat_byte(0xfc))
        .to(Address::repeat_byte(0x11))
        .value(U256::from(1_000_000u64))
        .data(vec![0xab; data_len])
        .build()
}

fn sample_signature() -> Signature {
    Signature::new(
        28,
        U256::from_be_bytes([0x5a; 32]),
        U256::from_be_bytes([0x3c; 32]),
    )
}

fn bench_encode(c: &mut Criterion) {
    let tx = sample_tx(68);
    let sig = sample_signature();

    c.bench_function("cip42/encode_unsigned", |b| {
        b.iter(|| encode_cip42(&tx, None).unwrap());
    });
    c.bench_function("cip42/encode_signed", |b| {
        b.iter(|| encode_cip42(&tx, Some(&sig)).unwrap());
    });

    let mut cip64 = tx.clone();
    cip64.tx_type = Some(TxType::Cip64);
    c.bench_function("cip64/encode_signed", |b| {
        b.iter(|| encode_cip64(&cip64, Some(&sig)).unwrap());
    });
}

fn bench_decode(c: &mut Criterion) {
    let sig = sample_signature();
    let mut group = c.benchmark_group("cip42/decode_signed");

    for data_len in [0usize, 68, 1_024, 16_384] {
        let bytes = encode_cip42(&sample_tx(data_len), Some(&sig)).unwrap();
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(data_len), &bytes, |b, bytes| {
            b.iter(|| decode_cip42(bytes).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
