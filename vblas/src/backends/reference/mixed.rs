//! Mixed-precision kernels. Inputs are widened on load and products are
//! accumulated in the wider type.

use vblas_core::{ConstPtr, MutPtr, Transpose};

use super::kernels::{at, load, store};

/// Element `(i, j)` of `op(A)`; conjugation is a no-op for real inputs.
#[inline(always)]
unsafe fn op_at<T: Copy>(a: ConstPtr<T>, trans: Transpose, i: usize, j: usize, lda: usize) -> T {
    if trans.is_trans() {
        load(a, j + i * lda)
    } else {
        load(a, i + j * lda)
    }
}

/// How a GEMM input or output element converts to and from the
/// accumulation type `f32`.
pub(super) trait Widen: Copy {
    fn widen(self) -> f32;
}

pub(super) trait Narrow: Widen {
    fn narrow(v: f32) -> Self;
}

impl Widen for vblas_core::f16 {
    #[inline(always)]
    fn widen(self) -> f32 {
        self.to_f32()
    }
}

impl Narrow for vblas_core::f16 {
    #[inline(always)]
    fn narrow(v: f32) -> Self {
        vblas_core::f16::from_f32(v)
    }
}

impl Widen for vblas_core::bf16 {
    #[inline(always)]
    fn widen(self) -> f32 {
        self.to_f32()
    }
}

impl Widen for f32 {
    #[inline(always)]
    fn widen(self) -> f32 {
        self
    }
}

impl Narrow for f32 {
    #[inline(always)]
    fn narrow(v: f32) -> Self {
        v
    }
}

/// C = alpha * op(A) * op(B) + beta * C with f32 accumulation.
pub(super) unsafe fn gemm_widened<I: Widen, O: Narrow>(
    transa: Transpose,
    transb: Transpose,
    m: usize,
    n: usize,
    k: usize,
    alpha: f32,
    a: ConstPtr<I>,
    lda: usize,
    b: ConstPtr<I>,
    ldb: usize,
    beta: f32,
    c: MutPtr<O>,
    ldc: usize,
) {
    for j in 0..n {
        for i in 0..m {
            let mut sum = 0.0f32;
            if alpha != 0.0 {
                for p in 0..k {
                    let (av, bv) = (op_at(a, transa, i, p, lda), op_at(b, transb, p, j, ldb));
                    sum += av.widen() * bv.widen();
                }
            }
            let idx = i + j * ldc;
            let prior = if beta == 0.0 {
                0.0
            } else {
                beta * load(c.as_const(), idx).widen()
            };
            store(c, idx, O::narrow(alpha * sum + prior));
        }
    }
}

/// `x^T y` over f32 vectors accumulated in f64.
pub(super) unsafe fn dot_f64(
    n: usize,
    x: ConstPtr<f32>,
    incx: i64,
    y: ConstPtr<f32>,
    incy: i64,
) -> f64 {
    let mut sum = 0.0f64;
    for i in 0..n {
        sum += f64::from(load(x, at(i, n, incx))) * f64::from(load(y, at(i, n, incy)));
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use vblas_core::{bf16, f16};

    #[test]
    fn test_f16_inputs_accumulate_in_f32() {
        // 2048 + 1 is not representable in f16 but is in f32.
        let a = [f16::from_f32(2048.0), f16::from_f32(1.0)];
        let b = [f16::from_f32(1.0), f16::from_f32(1.0)];
        let mut c = [0.0f32];
        unsafe {
            gemm_widened(
                Transpose::NoTrans,
                Transpose::NoTrans,
                1,
                1,
                2,
                1.0,
                ConstPtr::new(a.as_ptr()),
                1,
                ConstPtr::new(b.as_ptr()),
                2,
                0.0,
                MutPtr::new(c.as_mut_ptr()),
                1,
            )
        };
        assert_eq!(c[0], 2049.0);
    }

    #[test]
    fn test_bf16_widen() {
        assert_eq!(bf16::from_f32(1.5).widen(), 1.5);
    }

    #[test]
    fn test_dot_f64_keeps_precision() {
        let x = [1.0e8f32, 1.0, -1.0e8];
        let y = [1.0f32, 1.0, 1.0];
        let r = unsafe { dot_f64(3, ConstPtr::new(x.as_ptr()), 1, ConstPtr::new(y.as_ptr()), 1) };
        assert_eq!(r, 1.0);
    }
}
