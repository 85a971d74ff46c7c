//! CBLAS declarations for Intel MKL (`mkl_rt`), bound to typed traits.
//!
//! One macro invocation per element type declares that type's symbols and
//! implements the matching trait, so generic routing code can call
//! `T::gemm(..)` for any of the four BLAS types. Complex scalars are passed
//! by pointer, real ones by value, as in the C headers.
//!
//! Enumerations are `#[repr(u32)]` with CBLAS values and cast straight to
//! `c_int`.

#![allow(non_snake_case)]

use std::os::raw::c_int;

use vblas_core::{
    BlasScalar, Complex32, Complex64, ComplexScalar, Diag, Layout, RealScalar, Side, Transpose,
    Uplo,
};

#[cfg(not(feature = "mkl-ilp64"))]
pub type MklInt = i32;
#[cfg(feature = "mkl-ilp64")]
pub type MklInt = i64;

const COL_MAJOR: c_int = Layout::ColMajor as c_int;

type Real<T> = <T as BlasScalar>::Real;

/// How a scalar argument crosses the C boundary.
pub(super) trait CblasArg: Copy {
    type Arg: Copy;
    fn cblas_arg(&self) -> Self::Arg;
}

impl CblasArg for f32 {
    type Arg = f32;
    #[inline(always)]
    fn cblas_arg(&self) -> f32 {
        *self
    }
}

impl CblasArg for f64 {
    type Arg = f64;
    #[inline(always)]
    fn cblas_arg(&self) -> f64 {
        *self
    }
}

impl CblasArg for Complex32 {
    type Arg = *const Complex32;
    #[inline(always)]
    fn cblas_arg(&self) -> *const Complex32 {
        self
    }
}

impl CblasArg for Complex64 {
    type Arg = *const Complex64;
    #[inline(always)]
    fn cblas_arg(&self) -> *const Complex64 {
        self
    }
}

/// Routines CBLAS defines for all four element types.
#[rustfmt::skip]
pub(super) trait Cblas: BlasScalar + CblasArg {
    unsafe fn asum(n: MklInt, x: *const Self, incx: MklInt) -> Real<Self>;
    unsafe fn axpy(n: MklInt, alpha: Self, x: *const Self, incx: MklInt, y: *mut Self, incy: MklInt);
    unsafe fn copy(n: MklInt, x: *const Self, incx: MklInt, y: *mut Self, incy: MklInt);
    unsafe fn iamax(n: MklInt, x: *const Self, incx: MklInt) -> usize;
    unsafe fn iamin(n: MklInt, x: *const Self, incx: MklInt) -> usize;
    unsafe fn nrm2(n: MklInt, x: *const Self, incx: MklInt) -> Real<Self>;
    unsafe fn rot(n: MklInt, x: *mut Self, incx: MklInt, y: *mut Self, incy: MklInt, c: Real<Self>, s: Real<Self>);
    unsafe fn rotg(a: *mut Self, b: *mut Self, c: *mut Real<Self>, s: *mut Self);
    unsafe fn scal(n: MklInt, alpha: Self, x: *mut Self, incx: MklInt);
    unsafe fn swap(n: MklInt, x: *mut Self, incx: MklInt, y: *mut Self, incy: MklInt);

    unsafe fn gbmv(
        trans: Transpose, m: MklInt, n: MklInt, kl: MklInt, ku: MklInt, alpha: Self,
        a: *const Self, lda: MklInt, x: *const Self, incx: MklInt, beta: Self, y: *mut Self, incy: MklInt,
    );
    unsafe fn gemv(
        trans: Transpose, m: MklInt, n: MklInt, alpha: Self, a: *const Self, lda: MklInt,
        x: *const Self, incx: MklInt, beta: Self, y: *mut Self, incy: MklInt,
    );
    unsafe fn tbmv(
        uplo: Uplo, trans: Transpose, diag: Diag, n: MklInt, k: MklInt, a: *const Self, lda: MklInt,
        x: *mut Self, incx: MklInt,
    );
    unsafe fn tbsv(
        uplo: Uplo, trans: Transpose, diag: Diag, n: MklInt, k: MklInt, a: *const Self, lda: MklInt,
        x: *mut Self, incx: MklInt,
    );
    unsafe fn tpmv(uplo: Uplo, trans: Transpose, diag: Diag, n: MklInt, a: *const Self, x: *mut Self, incx: MklInt);
    unsafe fn tpsv(uplo: Uplo, trans: Transpose, diag: Diag, n: MklInt, a: *const Self, x: *mut Self, incx: MklInt);
    unsafe fn trmv(
        uplo: Uplo, trans: Transpose, diag: Diag, n: MklInt, a: *const Self, lda: MklInt,
        x: *mut Self, incx: MklInt,
    );
    unsafe fn trsv(
        uplo: Uplo, trans: Transpose, diag: Diag, n: MklInt, a: *const Self, lda: MklInt,
        x: *mut Self, incx: MklInt,
    );

    unsafe fn gemm(
        transa: Transpose, transb: Transpose, m: MklInt, n: MklInt, k: MklInt, alpha: Self,
        a: *const Self, lda: MklInt, b: *const Self, ldb: MklInt, beta: Self, c: *mut Self, ldc: MklInt,
    );
    unsafe fn gemmt(
        uplo: Uplo, transa: Transpose, transb: Transpose, n: MklInt, k: MklInt, alpha: Self,
        a: *const Self, lda: MklInt, b: *const Self, ldb: MklInt, beta: Self, c: *mut Self, ldc: MklInt,
    );
    unsafe fn symm(
        side: Side, uplo: Uplo, m: MklInt, n: MklInt, alpha: Self, a: *const Self, lda: MklInt,
        b: *const Self, ldb: MklInt, beta: Self, c: *mut Self, ldc: MklInt,
    );
    unsafe fn syr2k(
        uplo: Uplo, trans: Transpose, n: MklInt, k: MklInt, alpha: Self, a: *const Self, lda: MklInt,
        b: *const Self, ldb: MklInt, beta: Self, c: *mut Self, ldc: MklInt,
    );
    unsafe fn syrk(
        uplo: Uplo, trans: Transpose, n: MklInt, k: MklInt, alpha: Self, a: *const Self, lda: MklInt,
        beta: Self, c: *mut Self, ldc: MklInt,
    );
    unsafe fn trmm(
        side: Side, uplo: Uplo, trans: Transpose, diag: Diag, m: MklInt, n: MklInt, alpha: Self,
        a: *const Self, lda: MklInt, b: *mut Self, ldb: MklInt,
    );
    unsafe fn trsm(
        side: Side, uplo: Uplo, trans: Transpose, diag: Diag, m: MklInt, n: MklInt, alpha: Self,
        a: *const Self, lda: MklInt, b: *mut Self, ldb: MklInt,
    );
    unsafe fn gemm_batch_strided(
        transa: Transpose, transb: Transpose, m: MklInt, n: MklInt, k: MklInt, alpha: Self,
        a: *const Self, lda: MklInt, stride_a: MklInt, b: *const Self, ldb: MklInt, stride_b: MklInt,
        beta: Self, c: *mut Self, ldc: MklInt, stride_c: MklInt, batch_size: MklInt,
    );
}

/// Real-only routines.
#[rustfmt::skip]
pub(super) trait CblasReal: Cblas + RealScalar {
    unsafe fn dot(n: MklInt, x: *const Self, incx: MklInt, y: *const Self, incy: MklInt) -> Self;
    unsafe fn rotm(n: MklInt, x: *mut Self, incx: MklInt, y: *mut Self, incy: MklInt, param: *const Self);
    unsafe fn rotmg(d1: *mut Self, d2: *mut Self, x1: *mut Self, y1: Self, param: *mut Self);
    unsafe fn ger(
        m: MklInt, n: MklInt, alpha: Self, x: *const Self, incx: MklInt, y: *const Self, incy: MklInt,
        a: *mut Self, lda: MklInt,
    );
    unsafe fn sbmv(
        uplo: Uplo, n: MklInt, k: MklInt, alpha: Self, a: *const Self, lda: MklInt,
        x: *const Self, incx: MklInt, beta: Self, y: *mut Self, incy: MklInt,
    );
    unsafe fn spmv(
        uplo: Uplo, n: MklInt, alpha: Self, ap: *const Self, x: *const Self, incx: MklInt,
        beta: Self, y: *mut Self, incy: MklInt,
    );
    unsafe fn spr(uplo: Uplo, n: MklInt, alpha: Self, x: *const Self, incx: MklInt, ap: *mut Self);
    unsafe fn spr2(
        uplo: Uplo, n: MklInt, alpha: Self, x: *const Self, incx: MklInt, y: *const Self, incy: MklInt,
        ap: *mut Self,
    );
    unsafe fn symv(
        uplo: Uplo, n: MklInt, alpha: Self, a: *const Self, lda: MklInt, x: *const Self, incx: MklInt,
        beta: Self, y: *mut Self, incy: MklInt,
    );
    unsafe fn syr(uplo: Uplo, n: MklInt, alpha: Self, x: *const Self, incx: MklInt, a: *mut Self, lda: MklInt);
    unsafe fn syr2(
        uplo: Uplo, n: MklInt, alpha: Self, x: *const Self, incx: MklInt, y: *const Self, incy: MklInt,
        a: *mut Self, lda: MklInt,
    );
}

/// Complex-only routines.
#[rustfmt::skip]
pub(super) trait CblasComplex: Cblas + ComplexScalar {
    unsafe fn dotc(n: MklInt, x: *const Self, incx: MklInt, y: *const Self, incy: MklInt, out: *mut Self);
    unsafe fn dotu(n: MklInt, x: *const Self, incx: MklInt, y: *const Self, incy: MklInt, out: *mut Self);
    unsafe fn scal_real(n: MklInt, alpha: Real<Self>, x: *mut Self, incx: MklInt);
    unsafe fn gerc(
        m: MklInt, n: MklInt, alpha: Self, x: *const Self, incx: MklInt, y: *const Self, incy: MklInt,
        a: *mut Self, lda: MklInt,
    );
    unsafe fn geru(
        m: MklInt, n: MklInt, alpha: Self, x: *const Self, incx: MklInt, y: *const Self, incy: MklInt,
        a: *mut Self, lda: MklInt,
    );
    unsafe fn hbmv(
        uplo: Uplo, n: MklInt, k: MklInt, alpha: Self, a: *const Self, lda: MklInt,
        x: *const Self, incx: MklInt, beta: Self, y: *mut Self, incy: MklInt,
    );
    unsafe fn hemv(
        uplo: Uplo, n: MklInt, alpha: Self, a: *const Self, lda: MklInt, x: *const Self, incx: MklInt,
        beta: Self, y: *mut Self, incy: MklInt,
    );
    unsafe fn her(uplo: Uplo, n: MklInt, alpha: Real<Self>, x: *const Self, incx: MklInt, a: *mut Self, lda: MklInt);
    unsafe fn her2(
        uplo: Uplo, n: MklInt, alpha: Self, x: *const Self, incx: MklInt, y: *const Self, incy: MklInt,
        a: *mut Self, lda: MklInt,
    );
    unsafe fn hpmv(
        uplo: Uplo, n: MklInt, alpha: Self, ap: *const Self, x: *const Self, incx: MklInt,
        beta: Self, y: *mut Self, incy: MklInt,
    );
    unsafe fn hpr(uplo: Uplo, n: MklInt, alpha: Real<Self>, x: *const Self, incx: MklInt, ap: *mut Self);
    unsafe fn hpr2(
        uplo: Uplo, n: MklInt, alpha: Self, x: *const Self, incx: MklInt, y: *const Self, incy: MklInt,
        ap: *mut Self,
    );
    unsafe fn hemm(
        side: Side, uplo: Uplo, m: MklInt, n: MklInt, alpha: Self, a: *const Self, lda: MklInt,
        b: *const Self, ldb: MklInt, beta: Self, c: *mut Self, ldc: MklInt,
    );
    unsafe fn herk(
        uplo: Uplo, trans: Transpose, n: MklInt, k: MklInt, alpha: Real<Self>, a: *const Self, lda: MklInt,
        beta: Real<Self>, c: *mut Self, ldc: MklInt,
    );
    unsafe fn her2k(
        uplo: Uplo, trans: Transpose, n: MklInt, k: MklInt, alpha: Self, a: *const Self, lda: MklInt,
        b: *const Self, ldb: MklInt, beta: Real<Self>, c: *mut Self, ldc: MklInt,
    );
}

// ============================================================================
// Symbol tables
// ============================================================================

macro_rules! cblas_common {
    (
        $t:ty, $real:ty, $s:ty;
        asum: $asum:ident, axpy: $axpy:ident, copy: $copy:ident, iamax: $iamax:ident,
        iamin: $iamin:ident, nrm2: $nrm2:ident, rot: $rot:ident, rotg: $rotg:ident,
        scal: $scal:ident, swap: $swap:ident,
        gbmv: $gbmv:ident, gemv: $gemv:ident, tbmv: $tbmv:ident, tbsv: $tbsv:ident,
        tpmv: $tpmv:ident, tpsv: $tpsv:ident, trmv: $trmv:ident, trsv: $trsv:ident,
        gemm: $gemm:ident, gemmt: $gemmt:ident, symm: $symm:ident, syr2k: $syr2k:ident,
        syrk: $syrk:ident, trmm: $trmm:ident, trsm: $trsm:ident,
        gemm_batch_strided: $gbs:ident $(,)?
    ) => {
        #[link(name = "mkl_rt")]
        #[rustfmt::skip]
        extern "C" {
            fn $asum(n: MklInt, x: *const $t, incx: MklInt) -> $real;
            fn $axpy(n: MklInt, alpha: $s, x: *const $t, incx: MklInt, y: *mut $t, incy: MklInt);
            fn $copy(n: MklInt, x: *const $t, incx: MklInt, y: *mut $t, incy: MklInt);
            fn $iamax(n: MklInt, x: *const $t, incx: MklInt) -> usize;
            fn $iamin(n: MklInt, x: *const $t, incx: MklInt) -> usize;
            fn $nrm2(n: MklInt, x: *const $t, incx: MklInt) -> $real;
            fn $rot(n: MklInt, x: *mut $t, incx: MklInt, y: *mut $t, incy: MklInt, c: $real, s: $real);
            fn $rotg(a: *mut $t, b: *mut $t, c: *mut $real, s: *mut $t);
            fn $scal(n: MklInt, alpha: $s, x: *mut $t, incx: MklInt);
            fn $swap(n: MklInt, x: *mut $t, incx: MklInt, y: *mut $t, incy: MklInt);

            fn $gbmv(
                layout: c_int, trans: c_int, m: MklInt, n: MklInt, kl: MklInt, ku: MklInt, alpha: $s,
                a: *const $t, lda: MklInt, x: *const $t, incx: MklInt, beta: $s, y: *mut $t, incy: MklInt,
            );
            fn $gemv(
                layout: c_int, trans: c_int, m: MklInt, n: MklInt, alpha: $s, a: *const $t, lda: MklInt,
                x: *const $t, incx: MklInt, beta: $s, y: *mut $t, incy: MklInt,
            );
            fn $tbmv(
                layout: c_int, uplo: c_int, trans: c_int, diag: c_int, n: MklInt, k: MklInt,
                a: *const $t, lda: MklInt, x: *mut $t, incx: MklInt,
            );
            fn $tbsv(
                layout: c_int, uplo: c_int, trans: c_int, diag: c_int, n: MklInt, k: MklInt,
                a: *const $t, lda: MklInt, x: *mut $t, incx: MklInt,
            );
            fn $tpmv(
                layout: c_int, uplo: c_int, trans: c_int, diag: c_int, n: MklInt,
                ap: *const $t, x: *mut $t, incx: MklInt,
            );
            fn $tpsv(
                layout: c_int, uplo: c_int, trans: c_int, diag: c_int, n: MklInt,
                ap: *const $t, x: *mut $t, incx: MklInt,
            );
            fn $trmv(
                layout: c_int, uplo: c_int, trans: c_int, diag: c_int, n: MklInt,
                a: *const $t, lda: MklInt, x: *mut $t, incx: MklInt,
            );
            fn $trsv(
                layout: c_int, uplo: c_int, trans: c_int, diag: c_int, n: MklInt,
                a: *const $t, lda: MklInt, x: *mut $t, incx: MklInt,
            );

            fn $gemm(
                layout: c_int, transa: c_int, transb: c_int, m: MklInt, n: MklInt, k: MklInt, alpha: $s,
                a: *const $t, lda: MklInt, b: *const $t, ldb: MklInt, beta: $s, c: *mut $t, ldc: MklInt,
            );
            fn $gemmt(
                layout: c_int, uplo: c_int, transa: c_int, transb: c_int, n: MklInt, k: MklInt, alpha: $s,
                a: *const $t, lda: MklInt, b: *const $t, ldb: MklInt, beta: $s, c: *mut $t, ldc: MklInt,
            );
            fn $symm(
                layout: c_int, side: c_int, uplo: c_int, m: MklInt, n: MklInt, alpha: $s,
                a: *const $t, lda: MklInt, b: *const $t, ldb: MklInt, beta: $s, c: *mut $t, ldc: MklInt,
            );
            fn $syr2k(
                layout: c_int, uplo: c_int, trans: c_int, n: MklInt, k: MklInt, alpha: $s,
                a: *const $t, lda: MklInt, b: *const $t, ldb: MklInt, beta: $s, c: *mut $t, ldc: MklInt,
            );
            fn $syrk(
                layout: c_int, uplo: c_int, trans: c_int, n: MklInt, k: MklInt, alpha: $s,
                a: *const $t, lda: MklInt, beta: $s, c: *mut $t, ldc: MklInt,
            );
            fn $trmm(
                layout: c_int, side: c_int, uplo: c_int, trans: c_int, diag: c_int, m: MklInt, n: MklInt,
                alpha: $s, a: *const $t, lda: MklInt, b: *mut $t, ldb: MklInt,
            );
            fn $trsm(
                layout: c_int, side: c_int, uplo: c_int, trans: c_int, diag: c_int, m: MklInt, n: MklInt,
                alpha: $s, a: *const $t, lda: MklInt, b: *mut $t, ldb: MklInt,
            );
            fn $gbs(
                layout: c_int, transa: c_int, transb: c_int, m: MklInt, n: MklInt, k: MklInt, alpha: $s,
                a: *const $t, lda: MklInt, stride_a: MklInt, b: *const $t, ldb: MklInt, stride_b: MklInt,
                beta: $s, c: *mut $t, ldc: MklInt, stride_c: MklInt, batch_size: MklInt,
            );
        }

        #[rustfmt::skip]
        impl Cblas for $t {
            unsafe fn asum(n: MklInt, x: *const Self, incx: MklInt) -> $real {
                $asum(n, x, incx)
            }
            unsafe fn axpy(n: MklInt, alpha: Self, x: *const Self, incx: MklInt, y: *mut Self, incy: MklInt) {
                $axpy(n, alpha.cblas_arg(), x, incx, y, incy)
            }
            unsafe fn copy(n: MklInt, x: *const Self, incx: MklInt, y: *mut Self, incy: MklInt) {
                $copy(n, x, incx, y, incy)
            }
            unsafe fn iamax(n: MklInt, x: *const Self, incx: MklInt) -> usize {
                $iamax(n, x, incx)
            }
            unsafe fn iamin(n: MklInt, x: *const Self, incx: MklInt) -> usize {
                $iamin(n, x, incx)
            }
            unsafe fn nrm2(n: MklInt, x: *const Self, incx: MklInt) -> $real {
                $nrm2(n, x, incx)
            }
            unsafe fn rot(n: MklInt, x: *mut Self, incx: MklInt, y: *mut Self, incy: MklInt, c: $real, s: $real) {
                $rot(n, x, incx, y, incy, c, s)
            }
            unsafe fn rotg(a: *mut Self, b: *mut Self, c: *mut $real, s: *mut Self) {
                $rotg(a, b, c, s)
            }
            unsafe fn scal(n: MklInt, alpha: Self, x: *mut Self, incx: MklInt) {
                $scal(n, alpha.cblas_arg(), x, incx)
            }
            unsafe fn swap(n: MklInt, x: *mut Self, incx: MklInt, y: *mut Self, incy: MklInt) {
                $swap(n, x, incx, y, incy)
            }

            unsafe fn gbmv(
                trans: Transpose, m: MklInt, n: MklInt, kl: MklInt, ku: MklInt, alpha: Self,
                a: *const Self, lda: MklInt, x: *const Self, incx: MklInt, beta: Self, y: *mut Self, incy: MklInt,
            ) {
                $gbmv(COL_MAJOR, trans as c_int, m, n, kl, ku, alpha.cblas_arg(), a, lda, x, incx, beta.cblas_arg(), y, incy)
            }
            unsafe fn gemv(
                trans: Transpose, m: MklInt, n: MklInt, alpha: Self, a: *const Self, lda: MklInt,
                x: *const Self, incx: MklInt, beta: Self, y: *mut Self, incy: MklInt,
            ) {
                $gemv(COL_MAJOR, trans as c_int, m, n, alpha.cblas_arg(), a, lda, x, incx, beta.cblas_arg(), y, incy)
            }
            unsafe fn tbmv(
                uplo: Uplo, trans: Transpose, diag: Diag, n: MklInt, k: MklInt, a: *const Self, lda: MklInt,
                x: *mut Self, incx: MklInt,
            ) {
                $tbmv(COL_MAJOR, uplo as c_int, trans as c_int, diag as c_int, n, k, a, lda, x, incx)
            }
            unsafe fn tbsv(
                uplo: Uplo, trans: Transpose, diag: Diag, n: MklInt, k: MklInt, a: *const Self, lda: MklInt,
                x: *mut Self, incx: MklInt,
            ) {
                $tbsv(COL_MAJOR, uplo as c_int, trans as c_int, diag as c_int, n, k, a, lda, x, incx)
            }
            unsafe fn tpmv(uplo: Uplo, trans: Transpose, diag: Diag, n: MklInt, a: *const Self, x: *mut Self, incx: MklInt) {
                $tpmv(COL_MAJOR, uplo as c_int, trans as c_int, diag as c_int, n, a, x, incx)
            }
            unsafe fn tpsv(uplo: Uplo, trans: Transpose, diag: Diag, n: MklInt, a: *const Self, x: *mut Self, incx: MklInt) {
                $tpsv(COL_MAJOR, uplo as c_int, trans as c_int, diag as c_int, n, a, x, incx)
            }
            unsafe fn trmv(
                uplo: Uplo, trans: Transpose, diag: Diag, n: MklInt, a: *const Self, lda: MklInt,
                x: *mut Self, incx: MklInt,
            ) {
                $trmv(COL_MAJOR, uplo as c_int, trans as c_int, diag as c_int, n, a, lda, x, incx)
            }
            unsafe fn trsv(
                uplo: Uplo, trans: Transpose, diag: Diag, n: MklInt, a: *const Self, lda: MklInt,
                x: *mut Self, incx: MklInt,
            ) {
                $trsv(COL_MAJOR, uplo as c_int, trans as c_int, diag as c_int, n, a, lda, x, incx)
            }

            unsafe fn gemm(
                transa: Transpose, transb: Transpose, m: MklInt, n: MklInt, k: MklInt, alpha: Self,
                a: *const Self, lda: MklInt, b: *const Self, ldb: MklInt, beta: Self, c: *mut Self, ldc: MklInt,
            ) {
                $gemm(
                    COL_MAJOR, transa as c_int, transb as c_int, m, n, k, alpha.cblas_arg(),
                    a, lda, b, ldb, beta.cblas_arg(), c, ldc,
                )
            }
            unsafe fn gemmt(
                uplo: Uplo, transa: Transpose, transb: Transpose, n: MklInt, k: MklInt, alpha: Self,
                a: *const Self, lda: MklInt, b: *const Self, ldb: MklInt, beta: Self, c: *mut Self, ldc: MklInt,
            ) {
                $gemmt(
                    COL_MAJOR, uplo as c_int, transa as c_int, transb as c_int, n, k, alpha.cblas_arg(),
                    a, lda, b, ldb, beta.cblas_arg(), c, ldc,
                )
            }
            unsafe fn symm(
                side: Side, uplo: Uplo, m: MklInt, n: MklInt, alpha: Self, a: *const Self, lda: MklInt,
                b: *const Self, ldb: MklInt, beta: Self, c: *mut Self, ldc: MklInt,
            ) {
                $symm(
                    COL_MAJOR, side as c_int, uplo as c_int, m, n, alpha.cblas_arg(),
                    a, lda, b, ldb, beta.cblas_arg(), c, ldc,
                )
            }
            unsafe fn syr2k(
                uplo: Uplo, trans: Transpose, n: MklInt, k: MklInt, alpha: Self, a: *const Self, lda: MklInt,
                b: *const Self, ldb: MklInt, beta: Self, c: *mut Self, ldc: MklInt,
            ) {
                $syr2k(
                    COL_MAJOR, uplo as c_int, trans as c_int, n, k, alpha.cblas_arg(),
                    a, lda, b, ldb, beta.cblas_arg(), c, ldc,
                )
            }
            unsafe fn syrk(
                uplo: Uplo, trans: Transpose, n: MklInt, k: MklInt, alpha: Self, a: *const Self, lda: MklInt,
                beta: Self, c: *mut Self, ldc: MklInt,
            ) {
                $syrk(COL_MAJOR, uplo as c_int, trans as c_int, n, k, alpha.cblas_arg(), a, lda, beta.cblas_arg(), c, ldc)
            }
            unsafe fn trmm(
                side: Side, uplo: Uplo, trans: Transpose, diag: Diag, m: MklInt, n: MklInt, alpha: Self,
                a: *const Self, lda: MklInt, b: *mut Self, ldb: MklInt,
            ) {
                $trmm(
                    COL_MAJOR, side as c_int, uplo as c_int, trans as c_int, diag as c_int, m, n,
                    alpha.cblas_arg(), a, lda, b, ldb,
                )
            }
            unsafe fn trsm(
                side: Side, uplo: Uplo, trans: Transpose, diag: Diag, m: MklInt, n: MklInt, alpha: Self,
                a: *const Self, lda: MklInt, b: *mut Self, ldb: MklInt,
            ) {
                $trsm(
                    COL_MAJOR, side as c_int, uplo as c_int, trans as c_int, diag as c_int, m, n,
                    alpha.cblas_arg(), a, lda, b, ldb,
                )
            }
            unsafe fn gemm_batch_strided(
                transa: Transpose, transb: Transpose, m: MklInt, n: MklInt, k: MklInt, alpha: Self,
                a: *const Self, lda: MklInt, stride_a: MklInt, b: *const Self, ldb: MklInt, stride_b: MklInt,
                beta: Self, c: *mut Self, ldc: MklInt, stride_c: MklInt, batch_size: MklInt,
            ) {
                $gbs(
                    COL_MAJOR, transa as c_int, transb as c_int, m, n, k, alpha.cblas_arg(),
                    a, lda, stride_a, b, ldb, stride_b, beta.cblas_arg(), c, ldc, stride_c, batch_size,
                )
            }
        }
    };
}

macro_rules! cblas_real {
    (
        $t:ty;
        dot: $dot:ident, rotm: $rotm:ident, rotmg: $rotmg:ident, ger: $ger:ident,
        sbmv: $sbmv:ident, spmv: $spmv:ident, spr: $spr:ident, spr2: $spr2:ident,
        symv: $symv:ident, syr: $syr:ident, syr2: $syr2:ident $(,)?
    ) => {
        #[link(name = "mkl_rt")]
        #[rustfmt::skip]
        extern "C" {
            fn $dot(n: MklInt, x: *const $t, incx: MklInt, y: *const $t, incy: MklInt) -> $t;
            fn $rotm(n: MklInt, x: *mut $t, incx: MklInt, y: *mut $t, incy: MklInt, param: *const $t);
            fn $rotmg(d1: *mut $t, d2: *mut $t, x1: *mut $t, y1: $t, param: *mut $t);
            fn $ger(
                layout: c_int, m: MklInt, n: MklInt, alpha: $t, x: *const $t, incx: MklInt,
                y: *const $t, incy: MklInt, a: *mut $t, lda: MklInt,
            );
            fn $sbmv(
                layout: c_int, uplo: c_int, n: MklInt, k: MklInt, alpha: $t, a: *const $t, lda: MklInt,
                x: *const $t, incx: MklInt, beta: $t, y: *mut $t, incy: MklInt,
            );
            fn $spmv(
                layout: c_int, uplo: c_int, n: MklInt, alpha: $t, ap: *const $t,
                x: *const $t, incx: MklInt, beta: $t, y: *mut $t, incy: MklInt,
            );
            fn $spr(layout: c_int, uplo: c_int, n: MklInt, alpha: $t, x: *const $t, incx: MklInt, ap: *mut $t);
            fn $spr2(
                layout: c_int, uplo: c_int, n: MklInt, alpha: $t, x: *const $t, incx: MklInt,
                y: *const $t, incy: MklInt, ap: *mut $t,
            );
            fn $symv(
                layout: c_int, uplo: c_int, n: MklInt, alpha: $t, a: *const $t, lda: MklInt,
                x: *const $t, incx: MklInt, beta: $t, y: *mut $t, incy: MklInt,
            );
            fn $syr(
                layout: c_int, uplo: c_int, n: MklInt, alpha: $t, x: *const $t, incx: MklInt,
                a: *mut $t, lda: MklInt,
            );
            fn $syr2(
                layout: c_int, uplo: c_int, n: MklInt, alpha: $t, x: *const $t, incx: MklInt,
                y: *const $t, incy: MklInt, a: *mut $t, lda: MklInt,
            );
        }

        #[rustfmt::skip]
        impl CblasReal for $t {
            unsafe fn dot(n: MklInt, x: *const Self, incx: MklInt, y: *const Self, incy: MklInt) -> Self {
                $dot(n, x, incx, y, incy)
            }
            unsafe fn rotm(n: MklInt, x: *mut Self, incx: MklInt, y: *mut Self, incy: MklInt, param: *const Self) {
                $rotm(n, x, incx, y, incy, param)
            }
            unsafe fn rotmg(d1: *mut Self, d2: *mut Self, x1: *mut Self, y1: Self, param: *mut Self) {
                $rotmg(d1, d2, x1, y1, param)
            }
            unsafe fn ger(
                m: MklInt, n: MklInt, alpha: Self, x: *const Self, incx: MklInt, y: *const Self, incy: MklInt,
                a: *mut Self, lda: MklInt,
            ) {
                $ger(COL_MAJOR, m, n, alpha, x, incx, y, incy, a, lda)
            }
            unsafe fn sbmv(
                uplo: Uplo, n: MklInt, k: MklInt, alpha: Self, a: *const Self, lda: MklInt,
                x: *const Self, incx: MklInt, beta: Self, y: *mut Self, incy: MklInt,
            ) {
                $sbmv(COL_MAJOR, uplo as c_int, n, k, alpha, a, lda, x, incx, beta, y, incy)
            }
            unsafe fn spmv(
                uplo: Uplo, n: MklInt, alpha: Self, ap: *const Self, x: *const Self, incx: MklInt,
                beta: Self, y: *mut Self, incy: MklInt,
            ) {
                $spmv(COL_MAJOR, uplo as c_int, n, alpha, ap, x, incx, beta, y, incy)
            }
            unsafe fn spr(uplo: Uplo, n: MklInt, alpha: Self, x: *const Self, incx: MklInt, ap: *mut Self) {
                $spr(COL_MAJOR, uplo as c_int, n, alpha, x, incx, ap)
            }
            unsafe fn spr2(
                uplo: Uplo, n: MklInt, alpha: Self, x: *const Self, incx: MklInt, y: *const Self, incy: MklInt,
                ap: *mut Self,
            ) {
                $spr2(COL_MAJOR, uplo as c_int, n, alpha, x, incx, y, incy, ap)
            }
            unsafe fn symv(
                uplo: Uplo, n: MklInt, alpha: Self, a: *const Self, lda: MklInt, x: *const Self, incx: MklInt,
                beta: Self, y: *mut Self, incy: MklInt,
            ) {
                $symv(COL_MAJOR, uplo as c_int, n, alpha, a, lda, x, incx, beta, y, incy)
            }
            unsafe fn syr(uplo: Uplo, n: MklInt, alpha: Self, x: *const Self, incx: MklInt, a: *mut Self, lda: MklInt) {
                $syr(COL_MAJOR, uplo as c_int, n, alpha, x, incx, a, lda)
            }
            unsafe fn syr2(
                uplo: Uplo, n: MklInt, alpha: Self, x: *const Self, incx: MklInt, y: *const Self, incy: MklInt,
                a: *mut Self, lda: MklInt,
            ) {
                $syr2(COL_MAJOR, uplo as c_int, n, alpha, x, incx, y, incy, a, lda)
            }
        }
    };
}

macro_rules! cblas_complex {
    (
        $t:ty, $real:ty;
        dotc: $dotc:ident, dotu: $dotu:ident, scal_real: $scal_real:ident,
        gerc: $gerc:ident, geru: $geru:ident, hbmv: $hbmv:ident, hemv: $hemv:ident,
        her: $her:ident, her2: $her2:ident, hpmv: $hpmv:ident, hpr: $hpr:ident, hpr2: $hpr2:ident,
        hemm: $hemm:ident, herk: $herk:ident, her2k: $her2k:ident $(,)?
    ) => {
        #[link(name = "mkl_rt")]
        #[rustfmt::skip]
        extern "C" {
            fn $dotc(n: MklInt, x: *const $t, incx: MklInt, y: *const $t, incy: MklInt, out: *mut $t);
            fn $dotu(n: MklInt, x: *const $t, incx: MklInt, y: *const $t, incy: MklInt, out: *mut $t);
            fn $scal_real(n: MklInt, alpha: $real, x: *mut $t, incx: MklInt);
            fn $gerc(
                layout: c_int, m: MklInt, n: MklInt, alpha: *const $t, x: *const $t, incx: MklInt,
                y: *const $t, incy: MklInt, a: *mut $t, lda: MklInt,
            );
            fn $geru(
                layout: c_int, m: MklInt, n: MklInt, alpha: *const $t, x: *const $t, incx: MklInt,
                y: *const $t, incy: MklInt, a: *mut $t, lda: MklInt,
            );
            fn $hbmv(
                layout: c_int, uplo: c_int, n: MklInt, k: MklInt, alpha: *const $t, a: *const $t, lda: MklInt,
                x: *const $t, incx: MklInt, beta: *const $t, y: *mut $t, incy: MklInt,
            );
            fn $hemv(
                layout: c_int, uplo: c_int, n: MklInt, alpha: *const $t, a: *const $t, lda: MklInt,
                x: *const $t, incx: MklInt, beta: *const $t, y: *mut $t, incy: MklInt,
            );
            fn $her(
                layout: c_int, uplo: c_int, n: MklInt, alpha: $real, x: *const $t, incx: MklInt,
                a: *mut $t, lda: MklInt,
            );
            fn $her2(
                layout: c_int, uplo: c_int, n: MklInt, alpha: *const $t, x: *const $t, incx: MklInt,
                y: *const $t, incy: MklInt, a: *mut $t, lda: MklInt,
            );
            fn $hpmv(
                layout: c_int, uplo: c_int, n: MklInt, alpha: *const $t, ap: *const $t,
                x: *const $t, incx: MklInt, beta: *const $t, y: *mut $t, incy: MklInt,
            );
            fn $hpr(layout: c_int, uplo: c_int, n: MklInt, alpha: $real, x: *const $t, incx: MklInt, ap: *mut $t);
            fn $hpr2(
                layout: c_int, uplo: c_int, n: MklInt, alpha: *const $t, x: *const $t, incx: MklInt,
                y: *const $t, incy: MklInt, ap: *mut $t,
            );
            fn $hemm(
                layout: c_int, side: c_int, uplo: c_int, m: MklInt, n: MklInt, alpha: *const $t,
                a: *const $t, lda: MklInt, b: *const $t, ldb: MklInt, beta: *const $t, c: *mut $t, ldc: MklInt,
            );
            fn $herk(
                layout: c_int, uplo: c_int, trans: c_int, n: MklInt, k: MklInt, alpha: $real,
                a: *const $t, lda: MklInt, beta: $real, c: *mut $t, ldc: MklInt,
            );
            fn $her2k(
                layout: c_int, uplo: c_int, trans: c_int, n: MklInt, k: MklInt, alpha: *const $t,
                a: *const $t, lda: MklInt, b: *const $t, ldb: MklInt, beta: $real, c: *mut $t, ldc: MklInt,
            );
        }

        #[rustfmt::skip]
        impl CblasComplex for $t {
            unsafe fn dotc(n: MklInt, x: *const Self, incx: MklInt, y: *const Self, incy: MklInt, out: *mut Self) {
                $dotc(n, x, incx, y, incy, out)
            }
            unsafe fn dotu(n: MklInt, x: *const Self, incx: MklInt, y: *const Self, incy: MklInt, out: *mut Self) {
                $dotu(n, x, incx, y, incy, out)
            }
            unsafe fn scal_real(n: MklInt, alpha: $real, x: *mut Self, incx: MklInt) {
                $scal_real(n, alpha, x, incx)
            }
            unsafe fn gerc(
                m: MklInt, n: MklInt, alpha: Self, x: *const Self, incx: MklInt, y: *const Self, incy: MklInt,
                a: *mut Self, lda: MklInt,
            ) {
                $gerc(COL_MAJOR, m, n, &alpha, x, incx, y, incy, a, lda)
            }
            unsafe fn geru(
                m: MklInt, n: MklInt, alpha: Self, x: *const Self, incx: MklInt, y: *const Self, incy: MklInt,
                a: *mut Self, lda: MklInt,
            ) {
                $geru(COL_MAJOR, m, n, &alpha, x, incx, y, incy, a, lda)
            }
            unsafe fn hbmv(
                uplo: Uplo, n: MklInt, k: MklInt, alpha: Self, a: *const Self, lda: MklInt,
                x: *const Self, incx: MklInt, beta: Self, y: *mut Self, incy: MklInt,
            ) {
                $hbmv(COL_MAJOR, uplo as c_int, n, k, &alpha, a, lda, x, incx, &beta, y, incy)
            }
            unsafe fn hemv(
                uplo: Uplo, n: MklInt, alpha: Self, a: *const Self, lda: MklInt, x: *const Self, incx: MklInt,
                beta: Self, y: *mut Self, incy: MklInt,
            ) {
                $hemv(COL_MAJOR, uplo as c_int, n, &alpha, a, lda, x, incx, &beta, y, incy)
            }
            unsafe fn her(uplo: Uplo, n: MklInt, alpha: $real, x: *const Self, incx: MklInt, a: *mut Self, lda: MklInt) {
                $her(COL_MAJOR, uplo as c_int, n, alpha, x, incx, a, lda)
            }
            unsafe fn her2(
                uplo: Uplo, n: MklInt, alpha: Self, x: *const Self, incx: MklInt, y: *const Self, incy: MklInt,
                a: *mut Self, lda: MklInt,
            ) {
                $her2(COL_MAJOR, uplo as c_int, n, &alpha, x, incx, y, incy, a, lda)
            }
            unsafe fn hpmv(
                uplo: Uplo, n: MklInt, alpha: Self, ap: *const Self, x: *const Self, incx: MklInt,
                beta: Self, y: *mut Self, incy: MklInt,
            ) {
                $hpmv(COL_MAJOR, uplo as c_int, n, &alpha, ap, x, incx, &beta, y, incy)
            }
            unsafe fn hpr(uplo: Uplo, n: MklInt, alpha: $real, x: *const Self, incx: MklInt, ap: *mut Self) {
                $hpr(COL_MAJOR, uplo as c_int, n, alpha, x, incx, ap)
            }
            unsafe fn hpr2(
                uplo: Uplo, n: MklInt, alpha: Self, x: *const Self, incx: MklInt, y: *const Self, incy: MklInt,
                ap: *mut Self,
            ) {
                $hpr2(COL_MAJOR, uplo as c_int, n, &alpha, x, incx, y, incy, ap)
            }
            unsafe fn hemm(
                side: Side, uplo: Uplo, m: MklInt, n: MklInt, alpha: Self, a: *const Self, lda: MklInt,
                b: *const Self, ldb: MklInt, beta: Self, c: *mut Self, ldc: MklInt,
            ) {
                $hemm(COL_MAJOR, side as c_int, uplo as c_int, m, n, &alpha, a, lda, b, ldb, &beta, c, ldc)
            }
            unsafe fn herk(
                uplo: Uplo, trans: Transpose, n: MklInt, k: MklInt, alpha: $real, a: *const Self, lda: MklInt,
                beta: $real, c: *mut Self, ldc: MklInt,
            ) {
                $herk(COL_MAJOR, uplo as c_int, trans as c_int, n, k, alpha, a, lda, beta, c, ldc)
            }
            unsafe fn her2k(
                uplo: Uplo, trans: Transpose, n: MklInt, k: MklInt, alpha: Self, a: *const Self, lda: MklInt,
                b: *const Self, ldb: MklInt, beta: $real, c: *mut Self, ldc: MklInt,
            ) {
                $her2k(COL_MAJOR, uplo as c_int, trans as c_int, n, k, &alpha, a, lda, b, ldb, beta, c, ldc)
            }
        }
    };
}

cblas_common! {
    f32, f32, f32;
    asum: cblas_sasum, axpy: cblas_saxpy, copy: cblas_scopy, iamax: cblas_isamax,
    iamin: cblas_isamin, nrm2: cblas_snrm2, rot: cblas_srot, rotg: cblas_srotg,
    scal: cblas_sscal, swap: cblas_sswap,
    gbmv: cblas_sgbmv, gemv: cblas_sgemv, tbmv: cblas_stbmv, tbsv: cblas_stbsv,
    tpmv: cblas_stpmv, tpsv: cblas_stpsv, trmv: cblas_strmv, trsv: cblas_strsv,
    gemm: cblas_sgemm, gemmt: cblas_sgemmt, symm: cblas_ssymm, syr2k: cblas_ssyr2k,
    syrk: cblas_ssyrk, trmm: cblas_strmm, trsm: cblas_strsm,
    gemm_batch_strided: cblas_sgemm_batch_strided,
}

cblas_common! {
    f64, f64, f64;
    asum: cblas_dasum, axpy: cblas_daxpy, copy: cblas_dcopy, iamax: cblas_idamax,
    iamin: cblas_idamin, nrm2: cblas_dnrm2, rot: cblas_drot, rotg: cblas_drotg,
    scal: cblas_dscal, swap: cblas_dswap,
    gbmv: cblas_dgbmv, gemv: cblas_dgemv, tbmv: cblas_dtbmv, tbsv: cblas_dtbsv,
    tpmv: cblas_dtpmv, tpsv: cblas_dtpsv, trmv: cblas_dtrmv, trsv: cblas_dtrsv,
    gemm: cblas_dgemm, gemmt: cblas_dgemmt, symm: cblas_dsymm, syr2k: cblas_dsyr2k,
    syrk: cblas_dsyrk, trmm: cblas_dtrmm, trsm: cblas_dtrsm,
    gemm_batch_strided: cblas_dgemm_batch_strided,
}

cblas_common! {
    Complex32, f32, *const Complex32;
    asum: cblas_scasum, axpy: cblas_caxpy, copy: cblas_ccopy, iamax: cblas_icamax,
    iamin: cblas_icamin, nrm2: cblas_scnrm2, rot: cblas_csrot, rotg: cblas_crotg,
    scal: cblas_cscal, swap: cblas_cswap,
    gbmv: cblas_cgbmv, gemv: cblas_cgemv, tbmv: cblas_ctbmv, tbsv: cblas_ctbsv,
    tpmv: cblas_ctpmv, tpsv: cblas_ctpsv, trmv: cblas_ctrmv, trsv: cblas_ctrsv,
    gemm: cblas_cgemm, gemmt: cblas_cgemmt, symm: cblas_csymm, syr2k: cblas_csyr2k,
    syrk: cblas_csyrk, trmm: cblas_ctrmm, trsm: cblas_ctrsm,
    gemm_batch_strided: cblas_cgemm_batch_strided,
}

cblas_common! {
    Complex64, f64, *const Complex64;
    asum: cblas_dzasum, axpy: cblas_zaxpy, copy: cblas_zcopy, iamax: cblas_izamax,
    iamin: cblas_izamin, nrm2: cblas_dznrm2, rot: cblas_zdrot, rotg: cblas_zrotg,
    scal: cblas_zscal, swap: cblas_zswap,
    gbmv: cblas_zgbmv, gemv: cblas_zgemv, tbmv: cblas_ztbmv, tbsv: cblas_ztbsv,
    tpmv: cblas_ztpmv, tpsv: cblas_ztpsv, trmv: cblas_ztrmv, trsv: cblas_ztrsv,
    gemm: cblas_zgemm, gemmt: cblas_zgemmt, symm: cblas_zsymm, syr2k: cblas_zsyr2k,
    syrk: cblas_zsyrk, trmm: cblas_ztrmm, trsm: cblas_ztrsm,
    gemm_batch_strided: cblas_zgemm_batch_strided,
}

cblas_real! {
    f32;
    dot: cblas_sdot, rotm: cblas_srotm, rotmg: cblas_srotmg, ger: cblas_sger,
    sbmv: cblas_ssbmv, spmv: cblas_sspmv, spr: cblas_sspr, spr2: cblas_sspr2,
    symv: cblas_ssymv, syr: cblas_ssyr, syr2: cblas_ssyr2,
}

cblas_real! {
    f64;
    dot: cblas_ddot, rotm: cblas_drotm, rotmg: cblas_drotmg, ger: cblas_dger,
    sbmv: cblas_dsbmv, spmv: cblas_dspmv, spr: cblas_dspr, spr2: cblas_dspr2,
    symv: cblas_dsymv, syr: cblas_dsyr, syr2: cblas_dsyr2,
}

cblas_complex! {
    Complex32, f32;
    dotc: cblas_cdotc_sub, dotu: cblas_cdotu_sub, scal_real: cblas_csscal,
    gerc: cblas_cgerc, geru: cblas_cgeru, hbmv: cblas_chbmv, hemv: cblas_chemv,
    her: cblas_cher, her2: cblas_cher2, hpmv: cblas_chpmv, hpr: cblas_chpr, hpr2: cblas_chpr2,
    hemm: cblas_chemm, herk: cblas_cherk, her2k: cblas_cher2k,
}

cblas_complex! {
    Complex64, f64;
    dotc: cblas_zdotc_sub, dotu: cblas_zdotu_sub, scal_real: cblas_zdscal,
    gerc: cblas_zgerc, geru: cblas_zgeru, hbmv: cblas_zhbmv, hemv: cblas_zhemv,
    her: cblas_zher, her2: cblas_zher2, hpmv: cblas_zhpmv, hpr: cblas_zhpr, hpr2: cblas_zhpr2,
    hemm: cblas_zhemm, herk: cblas_zherk, her2k: cblas_zher2k,
}

// ============================================================================
// Mixed precision
// ============================================================================

/// `MKL_F16` and `MKL_BF16` are both `unsigned short`.
pub type MklHalf = u16;

#[link(name = "mkl_rt")]
#[rustfmt::skip]
extern "C" {
    pub fn cblas_hgemm(
        layout: c_int, transa: c_int, transb: c_int, m: MklInt, n: MklInt, k: MklInt, alpha: MklHalf,
        a: *const MklHalf, lda: MklInt, b: *const MklHalf, ldb: MklInt, beta: MklHalf,
        c: *mut MklHalf, ldc: MklInt,
    );
    pub fn cblas_gemm_f16f16f32(
        layout: c_int, transa: c_int, transb: c_int, m: MklInt, n: MklInt, k: MklInt, alpha: f32,
        a: *const MklHalf, lda: MklInt, b: *const MklHalf, ldb: MklInt, beta: f32,
        c: *mut f32, ldc: MklInt,
    );
    pub fn cblas_gemm_bf16bf16f32(
        layout: c_int, transa: c_int, transb: c_int, m: MklInt, n: MklInt, k: MklInt, alpha: f32,
        a: *const MklHalf, lda: MklInt, b: *const MklHalf, ldb: MklInt, beta: f32,
        c: *mut f32, ldc: MklInt,
    );
    pub fn cblas_gemm_s8u8s32(
        layout: c_int, transa: c_int, transb: c_int, offsetc: c_int, m: MklInt, n: MklInt, k: MklInt,
        alpha: f32, a: *const i8, lda: MklInt, ao: i8, b: *const u8, ldb: MklInt, bo: i8,
        beta: f32, c: *mut i32, ldc: MklInt, co: *const i32,
    );
    pub fn cblas_sdsdot(n: MklInt, sb: f32, x: *const f32, incx: MklInt, y: *const f32, incy: MklInt) -> f32;
    pub fn cblas_dsdot(n: MklInt, x: *const f32, incx: MklInt, y: *const f32, incy: MklInt) -> f64;
}

pub(super) const fn col_major() -> c_int {
    COL_MAJOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complex_scalars_cross_by_pointer() {
        let alpha = Complex64::new(1.5, -2.0);
        let p: *const Complex64 = alpha.cblas_arg();
        assert_eq!(unsafe { *p }, alpha);
        let beta = Complex32::new(0.0, 1.0);
        assert_eq!(unsafe { *beta.cblas_arg() }, beta);
    }

    #[test]
    fn test_real_scalars_cross_by_value() {
        assert_eq!(2.5f32.cblas_arg(), 2.5);
        assert_eq!((-1.0f64).cblas_arg(), -1.0);
    }

    #[test]
    fn test_cblas_enum_values() {
        assert_eq!(col_major(), 102);
        assert_eq!(Transpose::ConjTrans as c_int, 113);
        assert_eq!(Uplo::Lower as c_int, 122);
        assert_eq!(Side::Right as c_int, 142);
        assert_eq!(Diag::Unit as c_int, 132);
    }

    #[cfg(feature = "mkl-ilp64")]
    #[test]
    fn test_ilp64_int_width() {
        assert_eq!(std::mem::size_of::<MklInt>(), 8);
    }

    #[cfg(not(feature = "mkl-ilp64"))]
    #[test]
    fn test_lp64_int_width() {
        assert_eq!(std::mem::size_of::<MklInt>(), 4);
    }
}
