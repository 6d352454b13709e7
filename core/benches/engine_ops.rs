use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use twofold_core::{Direction, Grid, GridEngine, MemoryStore, Tile, collapse_line};

fn bench_collapse(c: &mut Criterion) {
    let lines: [[Tile; 4]; 4] = [[2, 2, 2, 2], [0, 4, 0, 4], [2, 4, 8, 16], [0, 0, 0, 2]];

    c.bench_function("collapse_line", |b| {
        b.iter(|| {
            for line in &lines {
                black_box(collapse_line(black_box(line)));
            }
        })
    });
}

fn bench_slide(c: &mut Criterion) {
    let rows: [[Tile; 4]; 4] = [[2, 2, 4, 4], [0, 8, 8, 0], [16, 0, 16, 2], [2, 4, 8, 16]];
    let grid = Grid::from_rows(&rows).expect("valid grid");

    let mut group = c.benchmark_group("grid_slide");
    for direction in Direction::ALL {
        group.bench_function(direction.as_str(), |b| {
            b.iter(|| {
                let mut grid = grid.clone();
                black_box(grid.slide(black_box(direction)))
            })
        });
    }
    group.finish();
}

fn bench_play(c: &mut Criterion) {
    c.bench_function("engine_play_until_over", |b| {
        b.iter(|| {
            let mut engine = GridEngine::new(black_box(7), MemoryStore::new());
            let mut turns = 0u32;
            while !engine.is_game_over() && turns < 10_000 {
                let any_applied = Direction::ALL
                    .into_iter()
                    .any(|direction| engine.slide(direction).is_applied());
                if !any_applied {
                    break;
                }
                turns += 1;
            }
            black_box(engine.score())
        })
    });
}

criterion_group!(benches, bench_collapse, bench_slide, bench_play);
criterion_main!(benches);
