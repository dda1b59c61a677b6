use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lumen::renderer::mesh::{displace_waves, Mesh};
use lumen::SceneModel;

fn wave_displacement_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("wave_displacement");

    for segments in [8, 16, 32, 64].iter() {
        let plane = Mesh::plane(4.0, 4.0, *segments, *segments);
        let mut out = Vec::with_capacity(plane.vertices.len());

        group.bench_function(format!("{segments}x{segments}_plane"), |b| {
            b.iter(|| {
                displace_waves(
                    black_box(&plane.vertices),
                    black_box(1.25),
                    &mut out,
                );
                black_box(&out);
            })
        });
    }
    group.finish();
}

fn mesh_generation_benchmark(c: &mut Criterion) {
    c.bench_function("cube_generation", |b| {
        b.iter(|| black_box(Mesh::cube()))
    });
    c.bench_function("plane_generation_32x32", |b| {
        b.iter(|| black_box(Mesh::plane(4.0, 4.0, 32, 32)))
    });
}

fn brightness_benchmark(c: &mut Criterion) {
    let mut model = SceneModel::default();
    model.apply_position_x(0.42);
    c.bench_function("led_brightness", |b| {
        b.iter(|| black_box(black_box(&model).led_brightness()))
    });
}

criterion_group!(
    benches,
    wave_displacement_benchmark,
    mesh_generation_benchmark,
    brightness_benchmark
);
criterion_main!(benches);
