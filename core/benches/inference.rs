use criterion::{Criterion, criterion_group, criterion_main};
use sapper_core::{BoardConfig, MineFieldGenerator, RandomMineFieldGenerator, play_game};

fn playthroughs(c: &mut Criterion) {
    let mut group = c.benchmark_group("playthrough");

    for (label, size, mines) in [
        ("9x9 light", (9, 9), 10),
        ("16x16 mid", (16, 16), 40),
    ] {
        group.bench_function(label, |b| {
            b.iter(|| {
                let config = BoardConfig::new(size, mines);
                let field = RandomMineFieldGenerator::new(7).generate(config);
                play_game(field, 11).unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, playthroughs);
criterion_main!(benches);
