//! Column-major kernels over raw operand pointers.
//!
//! Dimensions arrive already validated. Vector element `i` of an `n`-vector
//! with a negative increment lives at `(n - 1 - i) * |inc|`, as in BLAS.

use num_traits::{Float, Zero};
use vblas_core::{BlasScalar, ConstPtr, Diag, MutPtr, Side, Transpose, Uplo};

type Real<T> = <T as BlasScalar>::Real;

/// Storage offset of logical element `i`.
#[inline(always)]
pub(super) fn at(i: usize, n: usize, inc: i64) -> usize {
    let step = inc.unsigned_abs() as usize;
    if inc >= 0 {
        i * step
    } else {
        (n - 1 - i) * step
    }
}

#[inline(always)]
pub(super) unsafe fn load<T: Copy>(p: ConstPtr<T>, offset: usize) -> T {
    p.get().add(offset).read()
}

#[inline(always)]
pub(super) unsafe fn store<T>(p: MutPtr<T>, offset: usize, value: T) {
    p.get().add(offset).write(value)
}

/// Element `(i, j)` of `op(A)`.
#[inline(always)]
unsafe fn op_at<T: BlasScalar>(
    a: ConstPtr<T>,
    trans: Transpose,
    i: usize,
    j: usize,
    lda: usize,
) -> T {
    match trans {
        Transpose::NoTrans => load(a, i + j * lda),
        Transpose::Trans => load(a, j + i * lda),
        Transpose::ConjTrans => load(a, j + i * lda).conj(),
    }
}

// ============================================================================
// Level 1
// ============================================================================

pub(super) unsafe fn asum<T: BlasScalar>(n: usize, x: ConstPtr<T>, incx: i64) -> Real<T> {
    if incx <= 0 {
        return <Real<T>>::zero();
    }
    let mut sum = <Real<T>>::zero();
    for i in 0..n {
        sum += load(x, at(i, n, incx)).abs1();
    }
    sum
}

pub(super) unsafe fn axpy<T: BlasScalar>(
    n: usize,
    alpha: T,
    x: ConstPtr<T>,
    incx: i64,
    y: MutPtr<T>,
    incy: i64,
) {
    if alpha.is_zero() {
        return;
    }
    for i in 0..n {
        let iy = at(i, n, incy);
        let v = load(y.as_const(), iy) + alpha * load(x, at(i, n, incx));
        store(y, iy, v);
    }
}

pub(super) unsafe fn copy<T: BlasScalar>(
    n: usize,
    x: ConstPtr<T>,
    incx: i64,
    y: MutPtr<T>,
    incy: i64,
) {
    for i in 0..n {
        store(y, at(i, n, incy), load(x, at(i, n, incx)));
    }
}

/// `sum_i op(x_i) * y_i` with `op` conjugation when `conj` is set.
pub(super) unsafe fn dot<T: BlasScalar>(
    n: usize,
    x: ConstPtr<T>,
    incx: i64,
    y: ConstPtr<T>,
    incy: i64,
    conj: bool,
) -> T {
    let mut sum = T::zero();
    for i in 0..n {
        let xi = load(x, at(i, n, incx));
        let xi = if conj { xi.conj() } else { xi };
        sum += xi * load(y, at(i, n, incy));
    }
    sum
}

/// Zero-based index of the first element with the largest (or smallest)
/// `|re| + |im|`. Zero for an empty vector.
pub(super) unsafe fn iamax<T: BlasScalar>(
    n: usize,
    x: ConstPtr<T>,
    incx: i64,
    largest: bool,
) -> i64 {
    if n == 0 || incx <= 0 {
        return 0;
    }
    let mut best = 0usize;
    let mut best_val = load(x, at(0, n, incx)).abs1();
    for i in 1..n {
        let v = load(x, at(i, n, incx)).abs1();
        let better = if largest { v > best_val } else { v < best_val };
        if better {
            best = i;
            best_val = v;
        }
    }
    best as i64
}

/// Euclidean norm, scaled by the largest magnitude to avoid overflow.
pub(super) unsafe fn nrm2<T: BlasScalar>(n: usize, x: ConstPtr<T>, incx: i64) -> Real<T> {
    if incx <= 0 {
        return <Real<T>>::zero();
    }
    let mut scale = <Real<T>>::zero();
    for i in 0..n {
        let v = load(x, at(i, n, incx)).abs1();
        if v > scale {
            scale = v;
        }
    }
    if scale.is_zero() {
        return scale;
    }
    let inv = T::from_real(scale.recip());
    let mut ssq = <Real<T>>::zero();
    for i in 0..n {
        ssq += (load(x, at(i, n, incx)) * inv).norm_sqr();
    }
    scale * ssq.sqrt()
}

pub(super) unsafe fn rot<T: BlasScalar>(
    n: usize,
    x: MutPtr<T>,
    incx: i64,
    y: MutPtr<T>,
    incy: i64,
    c: Real<T>,
    s: Real<T>,
) {
    let (c, s) = (T::from_real(c), T::from_real(s));
    for i in 0..n {
        let (ix, iy) = (at(i, n, incx), at(i, n, incy));
        let xi = load(x.as_const(), ix);
        let yi = load(y.as_const(), iy);
        store(x, ix, c * xi + s * yi);
        store(y, iy, c * yi - s * xi);
    }
}

pub(super) unsafe fn scal<T: BlasScalar>(n: usize, alpha: T, x: MutPtr<T>, incx: i64) {
    if incx <= 0 {
        return;
    }
    for i in 0..n {
        let ix = at(i, n, incx);
        store(x, ix, alpha * load(x.as_const(), ix));
    }
}

pub(super) unsafe fn swap<T: BlasScalar>(
    n: usize,
    x: MutPtr<T>,
    incx: i64,
    y: MutPtr<T>,
    incy: i64,
) {
    for i in 0..n {
        let (ix, iy) = (at(i, n, incx), at(i, n, incy));
        let xi = load(x.as_const(), ix);
        store(x, ix, load(y.as_const(), iy));
        store(y, iy, xi);
    }
}

// ============================================================================
// Level 2
// ============================================================================

/// y = beta * y, without reading y when beta is zero.
unsafe fn scale_vector<T: BlasScalar>(n: usize, beta: T, y: MutPtr<T>, incy: i64) {
    if beta.is_one() {
        return;
    }
    for i in 0..n {
        let iy = at(i, n, incy);
        let v = if beta.is_zero() {
            T::zero()
        } else {
            beta * load(y.as_const(), iy)
        };
        store(y, iy, v);
    }
}

pub(super) unsafe fn gemv<T: BlasScalar>(
    trans: Transpose,
    m: usize,
    n: usize,
    alpha: T,
    a: ConstPtr<T>,
    lda: usize,
    x: ConstPtr<T>,
    incx: i64,
    beta: T,
    y: MutPtr<T>,
    incy: i64,
) {
    let (lx, ly) = if trans.is_trans() { (m, n) } else { (n, m) };
    scale_vector(ly, beta, y, incy);
    if alpha.is_zero() {
        return;
    }
    if trans.is_trans() {
        for j in 0..n {
            let mut sum = T::zero();
            for i in 0..m {
                sum += op_at(a, trans, j, i, lda) * load(x, at(i, lx, incx));
            }
            let iy = at(j, ly, incy);
            store(y, iy, load(y.as_const(), iy) + alpha * sum);
        }
    } else {
        for j in 0..n {
            let temp = alpha * load(x, at(j, lx, incx));
            for i in 0..m {
                let iy = at(i, ly, incy);
                store(y, iy, load(y.as_const(), iy) + temp * load(a, i + j * lda));
            }
        }
    }
}

/// Symmetric band matrix-vector product, band storage with `k + 1` rows.
pub(super) unsafe fn sbmv<T: BlasScalar>(
    uplo: Uplo,
    n: usize,
    k: usize,
    alpha: T,
    a: ConstPtr<T>,
    lda: usize,
    x: ConstPtr<T>,
    incx: i64,
    beta: T,
    y: MutPtr<T>,
    incy: i64,
) {
    scale_vector(n, beta, y, incy);
    if alpha.is_zero() {
        return;
    }
    let xv = |i: usize| load(x, at(i, n, incx));
    let add_y = |i: usize, v: T| {
        let iy = at(i, n, incy);
        store(y, iy, load(y.as_const(), iy) + v);
    };
    for j in 0..n {
        let temp1 = alpha * xv(j);
        let mut temp2 = T::zero();
        match uplo {
            Uplo::Upper => {
                // Row `k + i - j` of column j holds A(i, j).
                for i in j.saturating_sub(k)..j {
                    let aij = load(a, k + i - j + j * lda);
                    add_y(i, temp1 * aij);
                    temp2 += aij * xv(i);
                }
                add_y(j, temp1 * load(a, k + j * lda) + alpha * temp2);
            }
            Uplo::Lower => {
                add_y(j, temp1 * load(a, j * lda));
                for i in (j + 1)..n.min(j + k + 1) {
                    let aij = load(a, i - j + j * lda);
                    add_y(i, temp1 * aij);
                    temp2 += aij * xv(i);
                }
                add_y(j, alpha * temp2);
            }
        }
    }
}

// ============================================================================
// Level 3
// ============================================================================

pub(super) unsafe fn gemm<T: BlasScalar>(
    transa: Transpose,
    transb: Transpose,
    m: usize,
    n: usize,
    k: usize,
    alpha: T,
    a: ConstPtr<T>,
    lda: usize,
    b: ConstPtr<T>,
    ldb: usize,
    beta: T,
    c: MutPtr<T>,
    ldc: usize,
) {
    for j in 0..n {
        for i in 0..m {
            let mut sum = T::zero();
            if !alpha.is_zero() {
                for p in 0..k {
                    sum += op_at(a, transa, i, p, lda) * op_at(b, transb, p, j, ldb);
                }
            }
            let idx = i + j * ldc;
            let prior = if beta.is_zero() {
                T::zero()
            } else {
                beta * load(c.as_const(), idx)
            };
            store(c, idx, alpha * sum + prior);
        }
    }
}

/// The triangular factor as it enters the solve: `op(A)` restricted to its
/// referenced triangle.
struct Triangle<T> {
    a: ConstPtr<T>,
    lda: usize,
    trans: Transpose,
    unit: bool,
    /// `op(A)` is lower triangular.
    lower: bool,
}

impl<T: BlasScalar> Triangle<T> {
    fn new(a: ConstPtr<T>, lda: usize, uplo: Uplo, trans: Transpose, diag: Diag) -> Self {
        Self {
            a,
            lda,
            trans,
            unit: diag == Diag::Unit,
            lower: (uplo == Uplo::Lower) != trans.is_trans(),
        }
    }

    #[inline(always)]
    unsafe fn get(&self, i: usize, j: usize) -> T {
        op_at(self.a, self.trans, i, j, self.lda)
    }

    #[inline(always)]
    unsafe fn divide_diag(&self, v: T, i: usize) -> T {
        if self.unit {
            v
        } else {
            v / self.get(i, i)
        }
    }
}

/// Solve `op(A) X = alpha B` (left) or `X op(A) = alpha B` (right) in place.
pub(super) unsafe fn trsm<T: BlasScalar>(
    side: Side,
    uplo: Uplo,
    trans: Transpose,
    diag: Diag,
    m: usize,
    n: usize,
    alpha: T,
    a: ConstPtr<T>,
    lda: usize,
    b: MutPtr<T>,
    ldb: usize,
) {
    let bx = |i: usize, j: usize| load(b.as_const(), i + j * ldb);
    let set = |i: usize, j: usize, v: T| store(b, i + j * ldb, v);

    for j in 0..n {
        for i in 0..m {
            let v = if alpha.is_zero() { T::zero() } else { alpha * bx(i, j) };
            set(i, j, v);
        }
    }
    if alpha.is_zero() {
        return;
    }

    let tri = Triangle::new(a, lda, uplo, trans, diag);
    match side {
        Side::Left => {
            for j in 0..n {
                if tri.lower {
                    for i in 0..m {
                        let mut s = bx(i, j);
                        for p in 0..i {
                            s -= tri.get(i, p) * bx(p, j);
                        }
                        set(i, j, tri.divide_diag(s, i));
                    }
                } else {
                    for i in (0..m).rev() {
                        let mut s = bx(i, j);
                        for p in (i + 1)..m {
                            s -= tri.get(i, p) * bx(p, j);
                        }
                        set(i, j, tri.divide_diag(s, i));
                    }
                }
            }
        }
        Side::Right => {
            for i in 0..m {
                if tri.lower {
                    for j in (0..n).rev() {
                        let mut s = bx(i, j);
                        for p in (j + 1)..n {
                            s -= bx(i, p) * tri.get(p, j);
                        }
                        set(i, j, tri.divide_diag(s, j));
                    }
                } else {
                    for j in 0..n {
                        let mut s = bx(i, j);
                        for p in 0..j {
                            s -= bx(i, p) * tri.get(p, j);
                        }
                        set(i, j, tri.divide_diag(s, j));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vblas_core::Complex64;

    fn cp<T>(v: &[T]) -> ConstPtr<T> {
        ConstPtr::new(v.as_ptr())
    }

    fn mp<T>(v: &mut [T]) -> MutPtr<T> {
        MutPtr::new(v.as_mut_ptr())
    }

    #[test]
    fn test_negative_increment_offsets() {
        assert_eq!(at(0, 4, 2), 0);
        assert_eq!(at(3, 4, 2), 6);
        assert_eq!(at(0, 4, -2), 6);
        assert_eq!(at(3, 4, -2), 0);
    }

    #[test]
    fn test_axpy_negative_increment() {
        let x = [1.0f64, 2.0, 3.0];
        let mut y = [10.0f64, 20.0, 30.0];
        unsafe { axpy(3, 2.0, cp(&x), 1, mp(&mut y), -1) };
        // Logical y_0 is the last stored element.
        assert_eq!(y, [16.0, 24.0, 32.0]);
    }

    #[test]
    fn test_iamax_first_occurrence() {
        let x = [1.0f32, -4.0, 4.0, 2.0];
        unsafe {
            assert_eq!(iamax(4, cp(&x), 1, true), 1);
            assert_eq!(iamax(4, cp(&x), 1, false), 0);
            assert_eq!(iamax(0, cp(&x), 1, true), 0);
        }
    }

    #[test]
    fn test_non_positive_increment_is_a_no_op() {
        let x = [5.0f64, 1.0, 2.0];
        let mut y = [1.0f64, 1.0, 1.0];
        unsafe {
            assert_eq!(asum(3, cp(&x), 0), 0.0);
            assert_eq!(nrm2(3, cp(&x), -1), 0.0);
            assert_eq!(iamax(3, cp(&x), -1, true), 0);
            assert_eq!(iamax(3, cp(&x), 0, false), 0);
            scal(3, 2.0, mp(&mut y), 0);
            scal(3, 2.0, mp(&mut y), -1);
        }
        assert_eq!(y, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_complex_dot_and_asum() {
        let x = [Complex64::new(1.0, 2.0), Complex64::new(0.0, -1.0)];
        let y = [Complex64::new(3.0, 0.0), Complex64::new(1.0, 1.0)];
        unsafe {
            let dotu = dot(2, cp(&x), 1, cp(&y), 1, false);
            let dotc = dot(2, cp(&x), 1, cp(&y), 1, true);
            assert_eq!(dotu, Complex64::new(4.0, 5.0));
            assert_eq!(dotc, Complex64::new(2.0, -5.0));
            assert_eq!(asum(2, cp(&x), 1), 4.0);
        }
    }

    #[test]
    fn test_nrm2_large_values() {
        let x = [3.0e200f64, 4.0e200];
        let r = unsafe { nrm2(2, cp(&x), 1) };
        assert!((r / 5.0e200 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_gemm_beta_zero_ignores_nan() {
        let a = [1.0f64, 2.0, 3.0, 4.0];
        let b = [1.0f64, 0.0, 0.0, 1.0];
        let mut c = [f64::NAN; 4];
        unsafe {
            gemm(
                Transpose::NoTrans,
                Transpose::NoTrans,
                2,
                2,
                2,
                1.0,
                cp(&a),
                2,
                cp(&b),
                2,
                0.0,
                mp(&mut c),
                2,
            )
        };
        assert_eq!(c, a);
    }

    #[test]
    fn test_trsm_left_lower() {
        // A = [[2, 0], [1, 4]] column-major, B = A * [1, 1]^T.
        let a = [2.0f64, 1.0, 0.0, 4.0];
        let mut b = [2.0f64, 5.0];
        unsafe {
            trsm(
                Side::Left,
                Uplo::Lower,
                Transpose::NoTrans,
                Diag::NonUnit,
                2,
                1,
                1.0,
                cp(&a),
                2,
                mp(&mut b),
                2,
            )
        };
        assert_eq!(b, [1.0, 1.0]);
    }
}
