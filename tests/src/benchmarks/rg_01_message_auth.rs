//! # RG-01 Message Authentication Benchmarks
//!
//! - Sign: one HMAC-SHA256 plus payload serialization
//! - Verify: JSON parse, window check, HMAC, constant-time compare
//! - Message size sweep from 64 B to 64 KiB

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use rg_01_message_auth::{MessageAuthenticationApi, MessageAuthenticator};

fn authenticator() -> MessageAuthenticator {
    MessageAuthenticator::with_secret_key("bench-secret").unwrap_or_default()
}

fn bench_sign_and_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("rg-01-message-auth");
    let auth = authenticator();

    for size in [64usize, 1024, 16 * 1024, 64 * 1024] {
        let message = "m".repeat(size);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("sign", size), &message, |b, message| {
            b.iter(|| black_box(auth.sign_message(message).ok()))
        });

        if let Ok(signed) = auth.sign_message(&message) {
            group.bench_with_input(BenchmarkId::new("verify", size), &signed, |b, signed| {
                b.iter(|| black_box(auth.verify_message(signed).ok()))
            });
        }
    }

    group.finish();
}

fn bench_reject_forged(c: &mut Criterion) {
    let mut group = c.benchmark_group("rg-01-message-auth");
    let auth = authenticator();

    if let Ok(mut forged) = auth.sign_message("forged") {
        forged.signature = "0".repeat(64);
        group.bench_function("verify_forged", |b| {
            b.iter(|| black_box(auth.verify_message(&forged).ok()))
        });
    }

    group.bench_function("verify_serialized_garbage", |b| {
        b.iter(|| black_box(auth.verify_serialized("{not json").ok()))
    });

    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_sign_and_verify(c);
    bench_reject_forged(c);
}
