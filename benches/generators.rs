use criterion::{criterion_group, criterion_main, Criterion};
use mazes::{
    generators,
    grid::Grid,
    units::{CellSize, ColumnLength, RowLength},
};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

fn bench_recursive_backtracker_maze_32(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(32);

    c.bench_function("recursive_backtracker_maze_32", move |b| {
        b.iter(|| {
            let mut g = Grid::new(RowLength(32), ColumnLength(32), CellSize(20)).unwrap();
            generators::recursive_backtracker(&mut g, 0, &mut rng).unwrap()
        })
    });
}

fn bench_grid_construction_128(c: &mut Criterion) {
    c.bench_function("grid_construction_128", |b| {
        b.iter(|| Grid::new(RowLength(128), ColumnLength(128), CellSize(20)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_recursive_backtracker_maze_32,
    bench_grid_construction_128
);
criterion_main!(benches);
