use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use quadwords::{Difficulty, GroupBuilder, MemoryHistory, NoLookup, PuzzleAssembler, WordResolver};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::collections::HashSet;

fn bench_resolution(c: &mut Criterion) {
    let resolver = WordResolver::new(NoLookup);
    const THEMES: &[&str] = &["card suits", "planets", "common cipher names", "quantum error codes"];
    for &theme in THEMES {
        c.bench_with_input(BenchmarkId::new("resolve_curated", theme), &theme, |b, &theme| {
            let mut rng = SmallRng::seed_from_u64(1);
            b.iter(|| {
                let words = resolver.resolve(theme, &mut rng).expect("curated theme resolves");
                black_box(words);
            });
        });
    }
}

fn bench_group_build(c: &mut Criterion) {
    for tier in Difficulty::ALL {
        c.bench_with_input(
            BenchmarkId::new("build_group", tier.to_string()),
            &tier,
            |b, &tier| {
                let builder = GroupBuilder::new(NoLookup);
                let none = HashSet::new();
                let mut rng = SmallRng::seed_from_u64(2);
                b.iter(|| {
                    let group = builder.build(tier, &none, &none, &mut rng);
                    black_box(group.content_key());
                });
            },
        );
    }
}

fn bench_assembly(c: &mut Criterion) {
    c.bench_function("assemble_puzzle", |b| {
        let mut assembler = PuzzleAssembler::new(NoLookup, MemoryHistory::new());
        let mut rng = SmallRng::seed_from_u64(3);
        b.iter(|| {
            let assembled = assembler.assemble(&mut rng).expect("assembly succeeds");
            black_box(assembled.fresh);
        });
    });
}

criterion_group!(benches, bench_resolution, bench_group_build, bench_assembly);
criterion_main!(benches);
