use criterion::{criterion_group, criterion_main, Criterion};
use mazerun::{
    cells::Position,
    generators,
    pathing::{self, Distances},
    units::{Height, Width},
};
use rand::{rngs::StdRng, SeedableRng};

fn bench_distances_101_101(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let g = generators::recursive_backtracker(Width(101), Height(101), &mut rng);
    c.bench_function("distances_101_101", move |b| {
        b.iter(|| Distances::new(&g, Position::ORIGIN))
    });
}

fn bench_shortest_path_101_101(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let (g, goal) = generators::maze_with_goal(Width(101), Height(101), &mut rng);
    let distances = Distances::new(&g, Position::ORIGIN).unwrap();
    c.bench_function("shortest_path_101_101", move |b| {
        b.iter(|| pathing::shortest_path(&g, &distances, goal))
    });
}

criterion_group!(benches, bench_distances_101_101, bench_shortest_path_101_101);
criterion_main!(benches);
