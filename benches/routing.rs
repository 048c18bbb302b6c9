use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use roadnet::RoadNetwork;

/// Square grid with random weights, roads in all four directions.
fn grid_network(side: usize) -> RoadNetwork {
    let mut rng = StdRng::seed_from_u64(42);
    let mut net = RoadNetwork::with_capacity(side * side);
    for id in 0..side * side {
        net.add_node(id, format!("J{}", id));
    }
    for row in 0..side {
        for col in 0..side {
            let id = row * side + col;
            if col + 1 < side {
                let w: f32 = rng.random_range(0.5..10.0);
                net.add_edge(id, id + 1, w);
                net.add_edge(id + 1, id, w);
            }
            if row + 1 < side {
                let w: f32 = rng.random_range(0.5..10.0);
                net.add_edge(id, id + side, w);
                net.add_edge(id + side, id, w);
            }
        }
    }
    net
}

fn bench_routing(c: &mut Criterion) {
    let net = grid_network(100);
    let corner = 100 * 100 - 1;

    c.bench_function("shortest_path_100x100", |b| {
        b.iter(|| net.shortest_path(black_box(0), black_box(corner)))
    });

    c.bench_function("breadth_first_100x100", |b| {
        b.iter(|| net.breadth_first(black_box(0)))
    });

    c.bench_function("degree_ranking_40x40", |b| {
        let small = grid_network(40);
        b.iter(|| small.degree_ranking())
    });
}

criterion_group!(benches, bench_routing);
criterion_main!(benches);
