//! # Relay-Guard Security Benchmarks
//!
//! | Component | Operation | Expectation |
//! |-----------|-----------|-------------|
//! | rg-01 Message Auth | sign / verify | microseconds, linear in message size |
//! | rg-02 Payload Cipher | encrypt / decrypt | PBKDF2-bound, constant per call |
//! | rg-03 Rate Limiter | consume | sub-microsecond uncontended |

use criterion::{criterion_group, criterion_main, Criterion};
use rg_tests::benchmarks::{rg_01_message_auth, rg_02_payload_cipher, rg_03_rate_limiter};

fn all_benchmarks(c: &mut Criterion) {
    rg_01_message_auth::register_benchmarks(c);
    rg_02_payload_cipher::register_benchmarks(c);
    rg_03_rate_limiter::register_benchmarks(c);
}

criterion_group!(benches, all_benchmarks);
criterion_main!(benches);
