use criterion::Criterion;
use criterion::{criterion_group, criterion_main};
use qgpde::{Config, Integrate, Qg2D};

const SIZES: [usize; 3] = [64, 128, 256];

pub fn bench_qg(c: &mut Criterion) {
    let mut group = c.benchmark_group("Qg2D");
    group.significance_level(0.1).sample_size(10);
    for n in SIZES.iter() {
        let mut parms = Config::default();
        parms.nx = *n;
        parms.ny = *n;
        let mut qg = Qg2D::new(&parms);
        qg.set_perturbation(1e-8, 1., 1.);
        let name = format!("Size: {}", *n);
        group.bench_function(&name, |b| b.iter(|| qg.update()));
    }
    group.finish();
}

criterion_group!(benches, bench_qg);
criterion_main!(benches);
