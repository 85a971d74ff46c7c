use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use vblas::{
    Blas, BlasOps, Buffer, ConstPtr, HostQueue, Level1, MutPtr, Queue, ReferenceBackend,
    Transpose,
};

fn bench_resolve(c: &mut Criterion) {
    let backend = ReferenceBackend::host();
    let x = vec![1.0f64; 16];
    let mut y = vec![0.0f64; 16];
    let (xp, yp) = (ConstPtr::new(x.as_ptr()), MutPtr::new(y.as_mut_ptr()));
    c.bench_function("resolve_daxpy", |b| {
        b.iter(|| {
            let call = Level1::Axpy { n: 16, alpha: 2.0, x: xp, incx: 1, y: yp, incy: 1 };
            BlasOps::<f64>::level1(&backend, call)
        });
    });
}

fn bench_daxpy(c: &mut Criterion) {
    let blas = Blas::new(ReferenceBackend::host());
    let queue = HostQueue::new().unwrap();
    let mut group = c.benchmark_group("daxpy");
    for &n in &[64, 1024, 16384] {
        let x = Buffer::from_slice(&(0..n).map(|i| i as f64 * 0.001).collect::<Vec<_>>());
        let y = Buffer::<f64>::zeroed(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                blas.axpy(&queue, n as i64, 2.0, &x, 1, &y, 1).unwrap();
                queue.wait().unwrap();
            });
        });
    }
    group.finish();
}

fn bench_dgemm(c: &mut Criterion) {
    let blas = Blas::new(ReferenceBackend::host());
    let queue = HostQueue::new().unwrap();
    let mut group = c.benchmark_group("dgemm");
    for &n in &[16, 64, 128] {
        let a: Vec<f64> = (0..n * n).map(|i| (i as f64 * 0.001).sin()).collect();
        let b: Vec<f64> = (0..n * n).map(|i| (i as f64 * 0.002).cos()).collect();
        let (a, b) = (Buffer::from_slice(&a), Buffer::from_slice(&b));
        let c_mat = Buffer::<f64>::zeroed(n * n);
        let ld = n as i64;
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |bench, _| {
            bench.iter(|| {
                blas.gemm(
                    &queue,
                    Transpose::NoTrans,
                    Transpose::NoTrans,
                    ld,
                    ld,
                    ld,
                    1.0,
                    &a,
                    ld,
                    &b,
                    ld,
                    0.0,
                    &c_mat,
                    ld,
                )
                .unwrap();
                queue.wait().unwrap();
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_resolve, bench_daxpy, bench_dgemm);
criterion_main!(benches);
