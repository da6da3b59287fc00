// benches/product.rs

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use conformal_versors::{apply, compose, up, Direction, Multivector, Point, Versor};

const BATCH: usize = 1_000;

fn bench_product(c: &mut Criterion) {
    let mut coefficients = [0.0; 32];
    for (i, slot) in coefficients.iter_mut().enumerate() {
        *slot = (i % 7) as f64 - 3.0;
    }
    let a = black_box(Multivector::from_coefficients(coefficients));
    let b = a.reverse();

    c.bench_function("geometric product dense 32 × 1000", |bencher| {
        bencher.iter(|| {
            let mut out = Multivector::zero();
            for _ in 0..BATCH {
                out = black_box(&a).product(black_box(&b));
            }
            black_box(out)
        })
    });

    let rotor = Versor::rotation_about_axis(&Direction::new(1.0, 1.0, 1.0), 0.4)
        .expect("valid axis");
    let point = up(&Point::new(0.3, -1.2, 2.0));

    c.bench_function("geometric product rotor × point × 1000", |bencher| {
        bencher.iter(|| {
            let mut out = Multivector::zero();
            for _ in 0..BATCH {
                out = black_box(rotor.as_multivector()).product(black_box(&point));
            }
            black_box(out)
        })
    });
}

fn bench_apply(c: &mut Criterion) {
    let poloidal = Versor::poloidal(&Direction::new(0.0, 0.0, 1.0)).expect("valid axis");
    let chain = compose(&[
        Versor::translation(&Direction::new(1.0, 0.0, 0.0)),
        Versor::dilation(1.5).expect("positive factor"),
        Versor::rotation_about_axis(&Direction::new(0.0, 1.0, 0.0), 0.25).expect("valid axis"),
    ]);
    let p = Point::new(0.4, 0.2, -0.7);

    c.bench_function("apply poloidal × 1000", |bencher| {
        bencher.iter(|| {
            for _ in 0..BATCH {
                black_box(apply(black_box(&poloidal), black_box(&p)));
            }
        })
    });

    c.bench_function("apply composed chain × 1000", |bencher| {
        bencher.iter(|| {
            for _ in 0..BATCH {
                black_box(apply(black_box(&chain), black_box(&p)));
            }
        })
    });
}

criterion_group!(product_benches, bench_product, bench_apply);
criterion_main!(product_benches);
