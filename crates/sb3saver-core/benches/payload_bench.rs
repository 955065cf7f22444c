// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for preparing a project archive for delivery.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use sb3saver_core::{AppDownloadOptions, ProjectArtifact, ProjectFilename};

/// Project sizes from an empty stage to a sprite-heavy project with sounds.
const SIZES: &[(&str, usize)] = &[
    ("10 KiB", 10 * 1024),
    ("1 MiB", 1024 * 1024),
    ("10 MiB", 10 * 1024 * 1024),
];

/// Benchmark base64 + JSON encoding of the `appdownload` payload.
fn bench_appdownload_payload(c: &mut Criterion) {
    let filename = ProjectFilename::from_title("Benchmark Project", "Scratch Project");

    let mut group = c.benchmark_group("appdownload_payload");
    for &(label, size) in SIZES {
        let artifact = ProjectArtifact::new(vec![0x5Au8; size]);
        group.bench_function(label, |b| {
            b.iter(|| {
                let json = AppDownloadOptions::encode(&filename, black_box(&artifact))
                    .to_json()
                    .expect("payload encoding failed");
                black_box(json);
            });
        });
    }
    group.finish();
}

/// Benchmark the SHA-256 fingerprint recorded on every receipt.
fn bench_fingerprint(c: &mut Criterion) {
    let mut group = c.benchmark_group("artifact_sha256");
    for &(label, size) in SIZES {
        let artifact = ProjectArtifact::new(vec![0xA5u8; size]);
        group.bench_function(label, |b| {
            b.iter(|| black_box(artifact.sha256_hex()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_appdownload_payload, bench_fingerprint);
criterion_main!(benches);
