//! Benchmarks for discovery, validation and planning.

use std::fs;
use std::path::{Path, PathBuf};

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tempfile::{tempdir, TempDir};

use panotiles::{discover, validate_discovery, Manifest, Planner, TileOptions, Workspace};

/// `<tmp>/gforces/tour/.src/panos` with `cars` folders of `per_car` scenes
/// plus as many top-level panoramas.
fn fixture(cars: usize, per_car: usize) -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let root = dir.path().join("gforces").join("tour");
    let panos = root.join(".src").join("panos");

    for car in 0..cars {
        let car_dir = panos.join(format!("car{}", car));
        fs::create_dir_all(&car_dir).unwrap();
        for n in 0..per_car {
            fs::write(car_dir.join(format!("scene_view_day_{:02}.jpg", n)), "").unwrap();
        }
        fs::write(panos.join(format!("model{}_front_day_01.jpg", car)), "").unwrap();
    }

    (dir, root)
}

fn planner(root: &Path) -> Planner {
    let manifest = Manifest::default();
    Planner::new(
        Workspace::new(root, &manifest),
        PathBuf::from("krpanotools"),
        &manifest.templates_dir(root),
        TileOptions {
            vr: true,
            preview_1024: true,
        },
    )
}

fn bench_discovery(c: &mut Criterion) {
    let mut group = c.benchmark_group("discovery");

    let (_small_dir, small) = fixture(4, 4);
    let (_large_dir, large) = fixture(50, 20);
    let small_panos = small.join(".src/panos");
    let large_panos = large.join(".src/panos");

    group.bench_function("discover_small", |b| {
        b.iter(|| discover(black_box(&small_panos)).unwrap())
    });

    group.bench_function("discover_and_validate_large", |b| {
        b.iter(|| {
            let discovery = discover(black_box(&large_panos)).unwrap();
            validate_discovery(&discovery, true).unwrap();
            discovery
        })
    });

    group.finish();
}

fn bench_planning(c: &mut Criterion) {
    let mut group = c.benchmark_group("planning");

    let (_dir, root) = fixture(50, 20);
    let discovery = discover(&root.join(".src/panos")).unwrap();
    let planner = planner(&root);

    group.bench_function("plan_all_large", |b| {
        b.iter(|| planner.plan_all(black_box(&discovery.items)))
    });

    group.finish();
}

criterion_group!(benches, bench_discovery, bench_planning);
criterion_main!(benches);
