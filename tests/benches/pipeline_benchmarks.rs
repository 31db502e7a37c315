//! # Designated Verifier Benchmarks
//!
//! | Component | Operation | Target |
//! |-----------|-----------|--------|
//! | dv-01 Self Attestation | Decode and verify one proof | < 1ms |
//! | dv-04 Report Pipeline | Severity parse and slash amount | < 10µs |
//! | dv-04 Report Pipeline | Co-sign a digest | < 1ms |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dv_01_self_attestation::test_helpers::{attest, generate_keypair, public_key_hex};
use dv_01_self_attestation::{SelfAttestationApi, SelfAttestationService};
use dv_04_report_pipeline::test_helpers::TEST_VERIFIER_KEY;
use dv_04_report_pipeline::{compute_slash_amount, parse_severity, DesignatedVerifier};
use primitive_types::U256;
use sha3::{Digest, Keccak256};
use std::time::Duration;

fn bench_attestation_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("dv-01-self-attestation");
    group.measurement_time(Duration::from_secs(10));

    let service = SelfAttestationService::default();
    let (secret, _) = generate_keypair();
    let public_key = public_key_hex(&secret);

    for events in [1usize, 16, 256] {
        let info = serde_json::json!({
            "events": (0..events)
                .map(|slot| serde_json::json!({"type": "double-sign", "slot": slot}))
                .collect::<Vec<_>>()
        });
        let message = serde_json::to_vec(&info).unwrap();
        let proof = attest(&secret, &message);

        group.bench_with_input(BenchmarkId::new("verify_encoded", events), &events, |b, _| {
            b.iter(|| {
                black_box(
                    service
                        .verify_encoded(&public_key, &message, &proof)
                        .unwrap(),
                )
            })
        });
    }
    group.finish();
}

fn bench_slash_calculation(c: &mut Criterion) {
    let mut group = c.benchmark_group("dv-04-slash-amount");
    let ceiling = U256::from(1_000u64) * U256::exp10(18);

    group.bench_function("parse_and_compute", |b| {
        b.iter(|| {
            let severity = parse_severity(black_box("0.123456789012345678")).unwrap();
            black_box(compute_slash_amount(ceiling, severity))
        })
    });

    group.bench_function("compute_max_values", |b| {
        b.iter(|| black_box(compute_slash_amount(U256::MAX, U256::exp10(18))))
    });
    group.finish();
}

fn bench_co_signing(c: &mut Criterion) {
    let mut group = c.benchmark_group("dv-04-co-signing");
    let verifier = DesignatedVerifier::from_hex(TEST_VERIFIER_KEY).unwrap();
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&Keccak256::digest(b"slashing report"));

    group.bench_function("sign_digest", |b| {
        b.iter(|| black_box(verifier.sign_digest(&digest, 1_050).unwrap()))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_attestation_verification,
    bench_slash_calculation,
    bench_co_signing
);
criterion_main!(benches);
