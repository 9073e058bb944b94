use criterion::{criterion_group, criterion_main, Criterion};
use qmaze::{
    cells::{Cartesian2DCoordinate, CompassPrimary},
    circuit,
    generators,
    grid::Grid,
};
use rand::{SeedableRng, XorShiftRng};

fn bench_rng() -> XorShiftRng {
    XorShiftRng::from_seed([0xdead_beef, 0x9e37_79b9, 0x85eb_ca6b, 0xc2b2_ae35])
}

fn bench_recursive_backtracker_maze_32(c: &mut Criterion) {
    let mut g = Grid::new(32).unwrap();
    let mut rng = bench_rng();

    c.bench_function("recursive_backtracker_maze_32", move |b| {
        b.iter(|| generators::recursive_backtracker(&mut g, &mut rng))
    });
}

fn bench_text_render_maze_32(c: &mut Criterion) {
    let mut g = Grid::new(32).unwrap();
    generators::recursive_backtracker(&mut g, &mut bench_rng());

    c.bench_function("text_render_maze_32", move |b| b.iter(|| format!("{}", g)));
}

fn bench_encode_walk_8_steps(c: &mut Criterion) {
    let mut g = Grid::new(32).unwrap();
    generators::recursive_backtracker(&mut g, &mut bench_rng());
    let start = Cartesian2DCoordinate::new(0, 0);

    c.bench_function("encode_walk_8_steps", move |b| {
        b.iter(|| {
            let walk = circuit::encode_walk(&g, start, CompassPrimary::North, 8);
            circuit::Circuit::from_walk(&walk, 8)
        })
    });
}

criterion_group!(
    benches,
    bench_recursive_backtracker_maze_32,
    bench_text_render_maze_32,
    bench_encode_walk_8_steps
);
criterion_main!(benches);
