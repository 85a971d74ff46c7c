//! End-to-end runs of the reference backend on the host queue, checked
//! against naive column-major oracles.

mod common;

use common::{assert_close, op, random_vec, rng};
use vblas::{
    bf16, f16, Blas, BlasError, Buffer, ConstPtr, Diag, GemmGroup, HostQueue, MutPtr, Queue,
    ReferenceBackend, Routine, Side, Transpose, Uplo, UsmVec,
};

fn setup() -> (Blas<ReferenceBackend>, HostQueue) {
    (Blas::new(ReferenceBackend::host()), HostQueue::new().unwrap())
}

fn trans(t: bool) -> Transpose {
    if t {
        Transpose::Trans
    } else {
        Transpose::NoTrans
    }
}

/// Logical element `i` of a strided vector of length `n`.
fn elem(x: &[f64], i: usize, n: usize, inc: i64) -> f64 {
    let step = inc.unsigned_abs() as usize;
    if inc > 0 {
        x[i * step]
    } else {
        x[(n - 1 - i) * step]
    }
}

fn naive_gemm(
    ta: bool,
    tb: bool,
    m: usize,
    n: usize,
    k: usize,
    alpha: f64,
    a: &[f64],
    lda: usize,
    b: &[f64],
    ldb: usize,
    beta: f64,
    c: &[f64],
    ldc: usize,
) -> Vec<f64> {
    let mut out = c.to_vec();
    for j in 0..n {
        for i in 0..m {
            let mut s = 0.0;
            for p in 0..k {
                s += op(a, ta, i, p, lda) * op(b, tb, p, j, ldb);
            }
            out[i + j * ldc] = alpha * s + beta * c[i + j * ldc];
        }
    }
    out
}

/// Entry `(i, j)` of the triangle stored in `a`, zero outside it.
fn tri(a: &[f64], lda: usize, lower: bool, unit: bool, i: usize, j: usize) -> f64 {
    if i == j {
        if unit {
            1.0
        } else {
            a[i + j * lda]
        }
    } else if (lower && i > j) || (!lower && i < j) {
        a[i + j * lda]
    } else {
        0.0
    }
}

#[test]
fn test_gemm_matches_naive() {
    let (blas, queue) = setup();
    let mut rng = rng();
    let (m, n, k) = (5, 4, 3);
    for (ta, tb) in [(false, false), (true, false), (false, true), (true, true)] {
        let lda = (if ta { k } else { m }) + 1;
        let ldb = if tb { n } else { k };
        let a_cols = if ta { m } else { k };
        let b_cols = if tb { k } else { n };
        let a = random_vec(&mut rng, lda * a_cols);
        let b = random_vec(&mut rng, ldb * b_cols);
        let c = random_vec(&mut rng, m * n);
        let expected = naive_gemm(ta, tb, m, n, k, 1.5, &a, lda, &b, ldb, -0.5, &c, m);

        let (ab, bb, cb) = (Buffer::from_slice(&a), Buffer::from_slice(&b), Buffer::from_slice(&c));
        blas.gemm(
            &queue, trans(ta), trans(tb), m as i64, n as i64, k as i64, 1.5, &ab, lda as i64, &bb,
            ldb as i64, -0.5, &cb, m as i64,
        )
        .unwrap();
        assert_close(&cb.to_vec().unwrap(), &expected, 1e-12);
    }
}

#[test]
fn test_gemv_with_negative_increments() {
    let (blas, queue) = setup();
    let mut rng = rng();
    let (m, n, lda) = (4usize, 3usize, 5usize);
    let a = random_vec(&mut rng, lda * n);

    for (t, incx, incy) in [(false, 1i64, 1i64), (false, -2, 1), (true, 1, -3), (true, -1, -2)] {
        let (lx, ly) = if t { (m, n) } else { (n, m) };
        let x = random_vec(&mut rng, 1 + (lx - 1) * incx.unsigned_abs() as usize);
        let y = random_vec(&mut rng, 1 + (ly - 1) * incy.unsigned_abs() as usize);

        let mut expected = y.clone();
        for i in 0..ly {
            let mut s = 0.0;
            for p in 0..lx {
                s += op(&a, t, i, p, lda) * elem(&x, p, lx, incx);
            }
            let yi = elem(&y, i, ly, incy);
            let slot = if incy > 0 {
                i * incy as usize
            } else {
                (ly - 1 - i) * incy.unsigned_abs() as usize
            };
            expected[slot] = 2.0 * s + 0.25 * yi;
        }

        let (ab, xb, yb) = (Buffer::from_slice(&a), Buffer::from_slice(&x), Buffer::from_slice(&y));
        let (m, n, lda) = (m as i64, n as i64, lda as i64);
        blas.gemv(&queue, trans(t), m, n, 2.0, &ab, lda, &xb, incx, 0.25, &yb, incy).unwrap();
        assert_close(&yb.to_vec().unwrap(), &expected, 1e-12);
    }
}

#[test]
fn test_trsm_solves_every_variant() {
    let (blas, queue) = setup();
    let mut rng = rng();
    let (m, n) = (4usize, 3usize);

    for side in [Side::Left, Side::Right] {
        for lower in [true, false] {
            for t in [false, true] {
                for unit in [false, true] {
                    let ka = if side == Side::Left { m } else { n };
                    let mut a = random_vec(&mut rng, ka * ka);
                    for i in 0..ka {
                        a[i + i * ka] += 4.0;
                    }
                    let b = random_vec(&mut rng, m * n);
                    let ab = Buffer::from_slice(&a);
                    let bb = Buffer::from_slice(&b);
                    let uplo = if lower { Uplo::Lower } else { Uplo::Upper };
                    let diag = if unit { Diag::Unit } else { Diag::NonUnit };
                    blas.trsm(
                        &queue, side, uplo, trans(t), diag, m as i64, n as i64, 2.0, &ab, ka as i64,
                        &bb, m as i64,
                    )
                    .unwrap();
                    let x = bb.to_vec().unwrap();

                    // op(A) * X (or X * op(A)) must reproduce alpha * B.
                    let opa = |i: usize, j: usize| {
                        if t {
                            tri(&a, ka, lower, unit, j, i)
                        } else {
                            tri(&a, ka, lower, unit, i, j)
                        }
                    };
                    let mut back = vec![0.0; m * n];
                    for j in 0..n {
                        for i in 0..m {
                            back[i + j * m] = match side {
                                Side::Left => (0..m).map(|p| opa(i, p) * x[p + j * m]).sum(),
                                Side::Right => (0..n).map(|p| x[i + p * m] * opa(p, j)).sum(),
                            };
                        }
                    }
                    let scaled: Vec<f64> = b.iter().map(|v| 2.0 * v).collect();
                    assert_close(&back, &scaled, 1e-10);
                }
            }
        }
    }
}

#[test]
fn test_sbmv_matches_dense_symmetric() {
    let (blas, queue) = setup();
    let mut rng = rng();
    let (n, k) = (6usize, 2usize);
    let lda = k + 1;
    let x = random_vec(&mut rng, n);
    let y = random_vec(&mut rng, n);

    for lower in [false, true] {
        // Dense symmetric matrix with bandwidth k, packed into band storage.
        let mut dense = vec![0.0; n * n];
        let mut band = vec![0.0; lda * n];
        for j in 0..n {
            for i in j.saturating_sub(k)..=j {
                let v = (1 + i + 2 * j) as f64 * 0.1;
                dense[i + j * n] = v;
                dense[j + i * n] = v;
            }
        }
        for j in 0..n {
            for i in 0..n {
                if lower && i >= j && i - j <= k {
                    band[(i - j) + j * lda] = dense[i + j * n];
                }
                if !lower && j >= i && j - i <= k {
                    band[(k + i - j) + j * lda] = dense[i + j * n];
                }
            }
        }
        let expected: Vec<f64> = (0..n)
            .map(|i| {
                let s: f64 = (0..n).map(|p| dense[i + p * n] * x[p]).sum();
                1.5 * s - y[i]
            })
            .collect();

        let ab = Buffer::from_slice(&band);
        let (xb, yb) = (Buffer::from_slice(&x), Buffer::from_slice(&y));
        let uplo = if lower { Uplo::Lower } else { Uplo::Upper };
        blas.sbmv(&queue, uplo, n as i64, k as i64, 1.5, &ab, lda as i64, &xb, 1, -1.0, &yb, 1)
            .unwrap();
        assert_close(&yb.to_vec().unwrap(), &expected, 1e-12);
    }
}

#[test]
fn test_strided_gemm_batch() {
    let (blas, queue) = setup();
    let mut rng = rng();
    let (m, n, k, batch) = (3usize, 2usize, 4usize, 3usize);
    let (sa, sb, sc) = (m * k + 2, k * n, m * n + 1);
    let a = random_vec(&mut rng, sa * batch);
    let b = random_vec(&mut rng, sb * batch);
    let c = random_vec(&mut rng, sc * batch);

    let mut expected = c.clone();
    for i in 0..batch {
        let out = naive_gemm(
            false,
            false,
            m,
            n,
            k,
            1.0,
            &a[i * sa..],
            m,
            &b[i * sb..],
            k,
            2.0,
            &c[i * sc..i * sc + m * n],
            m,
        );
        expected[i * sc..i * sc + m * n].copy_from_slice(&out);
    }

    let (ab, bb, cb) = (Buffer::from_slice(&a), Buffer::from_slice(&b), Buffer::from_slice(&c));
    let nt = Transpose::NoTrans;
    blas.gemm_batch(
        &queue, nt, nt, m as i64, n as i64, k as i64, 1.0, &ab, m as i64, sa as i64, &bb, k as i64,
        sb as i64, 2.0, &cb, m as i64, sc as i64, batch as i64,
    )
    .unwrap();
    assert_close(&cb.to_vec().unwrap(), &expected, 1e-12);
}

#[test]
fn test_grouped_gemm_batch() {
    let (blas, queue) = setup();
    let mut rng = rng();
    let shapes = [(2usize, 3usize, 2usize, 2usize), (4, 1, 3, 1)];

    let mut operands = Vec::new();
    let mut groups = Vec::new();
    for &(m, n, k, size) in &shapes {
        let mut group = GemmGroup {
            transa: Transpose::NoTrans,
            transb: Transpose::Trans,
            m: m as i64,
            n: n as i64,
            k: k as i64,
            alpha: 1.0,
            lda: m as i64,
            ldb: n as i64,
            beta: 0.0,
            ldc: m as i64,
            a: Vec::new(),
            b: Vec::new(),
            c: Vec::new(),
        };
        for _ in 0..size {
            let a = UsmVec::from_slice(&random_vec(&mut rng, m * k));
            let b = UsmVec::from_slice(&random_vec(&mut rng, n * k));
            let mut c = UsmVec::<f64>::zeroed(m * n);
            group.a.push(ConstPtr::new(a.as_ptr()));
            group.b.push(ConstPtr::new(b.as_ptr()));
            group.c.push(MutPtr::new(c.as_mut_ptr()));
            operands.push((m, n, k, a, b, c));
        }
        groups.push(group);
    }

    let event = unsafe { blas.gemm_batch_groups_usm(&queue, &groups, &[]) }.unwrap();
    assert_eq!(event.label(), "dgemm_batch");
    event.wait().unwrap();

    for (m, n, k, a, b, c) in &operands {
        let zeros = vec![0.0; m * n];
        let (a, b) = (a.as_slice(), b.as_slice());
        let expected = naive_gemm(false, true, *m, *n, *k, 1.0, a, *m, b, *n, 0.0, &zeros, *m);
        assert_close(c.as_slice(), &expected, 1e-12);
    }
}

#[test]
fn test_half_precision_gemm() {
    let (blas, queue) = setup();
    let nt = Transpose::NoTrans;
    let a: Vec<f16> = [1.0f32, 2.0, 3.0, 4.0].iter().map(|&v| f16::from_f32(v)).collect();
    let b: Vec<f16> = [1.0f32, 1.0, 0.5, -1.0].iter().map(|&v| f16::from_f32(v)).collect();
    let ab = Buffer::from_slice(&a);
    let bb = Buffer::from_slice(&b);

    let c = Buffer::<f16>::from_elem(f16::ZERO, 4);
    blas.gemm_f16(&queue, nt, nt, 2, 2, 2, f16::ONE, &ab, 2, &bb, 2, f16::ZERO, &c, 2).unwrap();
    let c: Vec<f32> = c.to_vec().unwrap().iter().map(|v| v.to_f32()).collect();
    assert_eq!(c, vec![4.0, 6.0, -2.5, -3.0]);

    let c32 = Buffer::from_slice(&[1.0f32; 4]);
    blas.gemm_ext_f16f32(&queue, nt, nt, 2, 2, 2, 2.0, &ab, 2, &bb, 2, 1.0, &c32, 2).unwrap();
    assert_eq!(c32.to_vec().unwrap(), vec![9.0, 13.0, -4.0, -5.0]);
}

#[test]
fn test_bf16_gemm_accumulates_in_f32() {
    let (blas, queue) = setup();
    let nt = Transpose::NoTrans;
    let a: Vec<bf16> = [1.0f32, 2.0, 3.0, 4.0].iter().map(|&v| bf16::from_f32(v)).collect();
    let b: Vec<bf16> = [2.0f32, 0.0, 0.0, 2.0].iter().map(|&v| bf16::from_f32(v)).collect();
    let c = Buffer::<f32>::zeroed(4);
    blas.gemm_ext_bf16f32(
        &queue,
        nt,
        nt,
        2,
        2,
        2,
        1.0,
        &Buffer::from_slice(&a),
        2,
        &Buffer::from_slice(&b),
        2,
        0.0,
        &c,
        2,
    )
    .unwrap();
    assert_eq!(c.to_vec().unwrap(), vec![2.0, 4.0, 6.0, 8.0]);
}

#[test]
fn test_extended_precision_dots() {
    let (blas, queue) = setup();
    // 1e8 + 1 - 1e8 loses the 1 in f32 accumulation.
    let x = Buffer::from_slice(&[1.0e8f32, 1.0, -1.0e8]);
    let y = Buffer::from_slice(&[1.0f32, 1.0, 1.0]);

    let r64 = Buffer::<f64>::zeroed(1);
    blas.dot_f64(&queue, 3, &x, 1, &y, 1, &r64).unwrap();
    assert_eq!(r64.to_vec().unwrap(), vec![1.0]);

    let r32 = Buffer::<f32>::zeroed(1);
    blas.sdsdot(&queue, 3, 0.5, &x, 1, &y, 1, &r32).unwrap();
    assert_eq!(r32.to_vec().unwrap(), vec![1.5]);
}

#[test]
fn test_level1_reductions() {
    let (blas, queue) = setup();
    let x = Buffer::from_slice(&[3.0f64, -4.0, 1.0, -4.0, 0.5]);

    let sum = Buffer::<f64>::zeroed(1);
    let norm = Buffer::<f64>::zeroed(1);
    let max = Buffer::<i64>::zeroed(1);
    let min = Buffer::<i64>::zeroed(1);
    blas.asum(&queue, 5, &x, 1, &sum).unwrap();
    blas.nrm2(&queue, 2, &x, 1, &norm).unwrap();
    blas.iamax(&queue, 5, &x, 1, &max).unwrap();
    blas.iamin(&queue, 5, &x, 1, &min).unwrap();
    queue.wait().unwrap();

    assert_eq!(sum.to_vec().unwrap(), vec![12.5]);
    assert_close(&norm.to_vec().unwrap(), &[5.0], 1e-15);
    // Ties resolve to the first index, counted from zero.
    assert_eq!(max.to_vec().unwrap(), vec![1]);
    assert_eq!(min.to_vec().unwrap(), vec![4]);

    let empty = Buffer::<i64>::from_elem(7, 1);
    blas.iamax(&queue, 0, &x, 1, &empty).unwrap();
    assert_eq!(empty.to_vec().unwrap(), vec![0]);
}

#[test]
fn test_reductions_with_non_positive_increment_leave_defaults() {
    let (blas, queue) = setup();
    let x = Buffer::from_slice(&[5.0f64, 1.0, 2.0]);
    let single = Buffer::from_slice(&[2.0f64]);

    let sum = Buffer::from_slice(&[-1.0f64]);
    let norm = Buffer::from_slice(&[-1.0f64]);
    let max = Buffer::<i64>::from_elem(9, 1);
    let min = Buffer::<i64>::from_elem(9, 1);
    let ones = Buffer::from_slice(&[1.0f64; 3]);
    blas.asum(&queue, 3, &single, 0, &sum).unwrap();
    blas.nrm2(&queue, 3, &single, 0, &norm).unwrap();
    blas.iamax(&queue, 3, &x, -1, &max).unwrap();
    blas.iamin(&queue, 3, &x, -1, &min).unwrap();
    blas.scal(&queue, 3, 2.0, &ones, 0).unwrap();
    queue.wait().unwrap();

    assert_eq!(sum.to_vec().unwrap(), vec![0.0]);
    assert_eq!(norm.to_vec().unwrap(), vec![0.0]);
    assert_eq!(max.to_vec().unwrap(), vec![0]);
    assert_eq!(min.to_vec().unwrap(), vec![0]);
    assert_eq!(ones.to_vec().unwrap(), vec![1.0; 3]);
}

#[test]
fn test_axpy_then_scal_chain() {
    let (blas, queue) = setup();
    let mut rng = rng();
    let x = random_vec(&mut rng, 64);
    let y = random_vec(&mut rng, 64);
    let (xb, yb) = (Buffer::from_slice(&x), Buffer::from_slice(&y));

    blas.axpy(&queue, 64, 2.0, &xb, 1, &yb, 1).unwrap();
    blas.scal(&queue, 32, -1.0, &yb, 2).unwrap();
    blas.swap(&queue, 64, &xb, 1, &yb, 1).unwrap();

    let expected: Vec<f64> = x
        .iter()
        .zip(&y)
        .enumerate()
        .map(|(i, (a, b))| {
            let v = 2.0 * a + b;
            if i % 2 == 0 {
                -v
            } else {
                v
            }
        })
        .collect();
    assert_close(&xb.to_vec().unwrap(), &expected, 1e-14);
    assert_close(&yb.to_vec().unwrap(), &x, 0.0);
}

#[test]
fn test_unsupported_routine_queues_nothing() {
    let (blas, queue) = setup();
    let a = Buffer::from_slice(&[1.0f64, 0.0, 0.0, 1.0]);
    let x = Buffer::from_slice(&[1.0f64, 2.0]);

    let err = blas
        .trmv(&queue, Uplo::Upper, Transpose::NoTrans, Diag::NonUnit, 2, &a, 2, &x, 1)
        .unwrap_err();
    assert!(matches!(err, BlasError::Unsupported { routine: Routine::Trmv, .. }));
    assert!(x.pending_write().is_none());
    assert_eq!(x.to_vec().unwrap(), vec![1.0, 2.0]);
}

#[test]
fn test_invalid_leading_dimension_rejected_before_submit() {
    let (blas, queue) = setup();
    let a = Buffer::<f32>::zeroed(16);
    let x = Buffer::<f32>::zeroed(4);
    let y = Buffer::<f32>::zeroed(4);

    let err = blas
        .gemv(&queue, Transpose::NoTrans, 4, 2, 1.0, &a, 3, &x, 1, 0.0, &y, 1)
        .unwrap_err();
    assert!(matches!(err, BlasError::InvalidArgument { argument: "lda", .. }));
    assert!(y.pending_write().is_none());
}
