//! # Scale-Chain Benchmarks
//!
//! | Operation | Target |
//! |-----------|--------|
//! | Signer recovery | < 500μs |
//! | Chain step (SHA-256) | < 5μs for 1 KiB |
//! | Full submission | < 1ms |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sc_01_signature_verification::test_helpers::{address_of, key_from_seed, sign_payload};
use sc_01_signature_verification::{block_digest, recover_signer, DigestScheme};
use sc_02_node_registry::NodeRegistry;
use sc_03_hash_chain::chain_step;
use sc_04_block_validation::{BlockValidator, ValidationConfig};
use shared_types::{GENESIS_HASH, MAIN_CHAIN};
use std::time::Duration;

fn bench_signer_recovery(c: &mut Criterion) {
    let mut group = c.benchmark_group("sc-01-signer-recovery");
    group.measurement_time(Duration::from_secs(10));

    let key = key_from_seed(1);
    let payload = b"deadbeef";
    let signature = sign_payload(payload, DigestScheme::Keccak256, &key);
    let digest = block_digest(payload, DigestScheme::Keccak256);

    group.bench_function("recover", |b| {
        b.iter(|| recover_signer(black_box(&digest), black_box(&signature)))
    });
    group.finish();
}

fn bench_chain_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("sc-03-chain-step");

    for size in [32usize, 1024, 65_536] {
        let payload = vec![0xabu8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &payload, |b, p| {
            b.iter(|| chain_step(black_box(&GENESIS_HASH), black_box(p)))
        });
    }
    group.finish();
}

fn bench_submit(c: &mut Criterion) {
    let mut group = c.benchmark_group("sc-04-submit");
    group.measurement_time(Duration::from_secs(10));

    let key = key_from_seed(1);
    let registry = NodeRegistry::new([address_of(&key)]).unwrap();
    let validator = BlockValidator::new(MAIN_CHAIN, registry, ValidationConfig::default());
    let payload = vec![0x42u8; 256];
    let signature = sign_payload(&payload, DigestScheme::Keccak256, &key);

    group.bench_function("submit_256b", |b| {
        b.iter(|| {
            let next = validator.current_block_id() + 1;
            validator.submit(black_box(&payload), black_box(&signature), next)
        })
    });
    group.finish();
}

criterion_group!(benches, bench_signer_recovery, bench_chain_step, bench_submit);
criterion_main!(benches);
