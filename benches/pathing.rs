use criterion::{
    Criterion,
    criterion_group,
    criterion_main
};
use mazes::geometry::{Bounds, Position, Rect};
use mazes::pathing::{self, SearchSpace};

fn bench_open_field(c: &mut Criterion) {
    let space = SearchSpace::new(Bounds::new(800, 600), 20, 3).unwrap();
    let target = Rect::new(780, 580, 20, 20);
    c.bench_function("shortest_path_open_field", |b| {
        b.iter(|| pathing::shortest_path(&space, Position::new(0, 0), &target, &[]))
    });
}

fn bench_walled_field(c: &mut Criterion) {
    let space = SearchSpace::new(Bounds::new(800, 600), 20, 3).unwrap();
    let target = Rect::new(780, 580, 20, 20);
    let walls = (0..10)
        .map(|i| Rect::new(50 + i * 75, if i % 2 == 0 { 0 } else { 100 }, 50, 500))
        .collect::<Vec<_>>();
    c.bench_function("shortest_path_walled_field", |b| {
        b.iter(|| pathing::shortest_path(&space, Position::new(0, 0), &target, &walls))
    });
}

fn bench_enclosed_target(c: &mut Criterion) {
    let space = SearchSpace::new(Bounds::new(400, 400), 20, 5).unwrap();
    let target = Rect::new(200, 200, 20, 20);
    let enclosure = [Rect::new(150, 150, 150, 50),
                     Rect::new(150, 250, 150, 50),
                     Rect::new(150, 150, 50, 150),
                     Rect::new(250, 150, 50, 150)];
    c.bench_function("shortest_path_enclosed_target", |b| {
        b.iter(|| pathing::shortest_path(&space, Position::new(0, 0), &target, &enclosure))
    });
}

criterion_group!(benches,
    bench_open_field,
    bench_walled_field,
    bench_enclosed_target
);
criterion_main!(benches);
