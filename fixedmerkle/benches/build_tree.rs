use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fixedmerkle::{utils::hasher::Sha256Hasher, Config, Tree};

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_tree");
    for depth in [10u32, 14, 16] {
        let config = Arc::new(Config::new(Sha256Hasher::new(), depth, 32).unwrap());
        let leaves: Vec<[u8; 8]> = (0..config.all_leaves()).map(|i| i.to_le_bytes()).collect();
        group.bench_with_input(BenchmarkId::from_parameter(depth), &leaves, |b, leaves| {
            b.iter(|| Tree::new(config.clone(), black_box(leaves)).unwrap())
        });
    }
    group.finish();
}

fn bench_proofs(c: &mut Criterion) {
    let config = Arc::new(Config::new(Sha256Hasher::new(), 16, 32).unwrap());
    let leaves: Vec<[u8; 8]> = (0..config.all_leaves()).map(|i| i.to_le_bytes()).collect();
    let tree = Tree::new(config, &leaves).unwrap();
    let proof = tree.create_membership_proof(12345).unwrap();

    c.bench_function("create_membership_proof", |b| {
        b.iter(|| tree.create_membership_proof(black_box(12345)).unwrap())
    });
    c.bench_function("verify_membership_proof", |b| {
        b.iter(|| tree.verify_membership_proof(black_box(12345), &proof).unwrap())
    });
}

criterion_group!(benches, bench_build, bench_proofs);
criterion_main!(benches);
