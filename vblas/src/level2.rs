//! BLAS Level 2: matrix-vector operations.
//!
//! Matrices are column-major. Band matrices use BLAS band storage
//! (`lda >= kl + ku + 1`, or `k + 1` for the symmetric/Hermitian/triangular
//! band forms); packed matrices hold `n * (n + 1) / 2` elements.

use vblas_core::{
    BlasScalar, Buffer, ComplexScalar, Diag, Event, Queue, RealScalar, Result, Routine,
    Transpose, Uplo,
};

use crate::backend::{BlasBackend, BlasOps, Level2};
use crate::router::{check_len, check_matrix, check_vector, packed_extent, Blas};

type Real<T> = <T as BlasScalar>::Real;

/// Lengths of (x, y) for `y = op(A) x` with `A` stored `m x n`.
fn gemv_lengths(trans: Transpose, m: i64, n: i64) -> (i64, i64) {
    if trans.is_trans() {
        (m, n)
    } else {
        (n, m)
    }
}

impl<B: BlasBackend> Blas<B> {
    // ========================================================================
    // Managed buffers
    // ========================================================================

    /// y = alpha * op(A) * x + beta * y, `A` an `m x n` band matrix with
    /// `kl` sub- and `ku` super-diagonals.
    pub fn gbmv<T, Q>(
        &self,
        queue: &Q,
        trans: Transpose,
        m: i64,
        n: i64,
        kl: i64,
        ku: i64,
        alpha: T,
        a: &Buffer<T>,
        lda: i64,
        x: &Buffer<T>,
        incx: i64,
        beta: T,
        y: &Buffer<T>,
        incy: i64,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let (lx, ly) = gemv_lengths(trans, m, n);
        check_matrix(Routine::Gbmv, "a", a, kl + ku + 1, n, lda)?;
        check_vector(Routine::Gbmv, "x", x, lx, incx)?;
        check_vector(Routine::Gbmv, "y", y, ly, incy)?;
        let call = Level2::Gbmv {
            trans,
            m,
            n,
            kl,
            ku,
            alpha,
            a: a.as_const_ptr(),
            lda,
            x: x.as_const_ptr(),
            incx,
            beta,
            y: y.as_mut_ptr(),
            incy,
        };
        self.submit_buffers(
            queue,
            Routine::Gbmv,
            T::DTYPE,
            |b| b.level2(call),
            [a.read(), x.read(), y.write()],
        )
    }

    /// y = alpha * op(A) * x + beta * y
    pub fn gemv<T, Q>(
        &self,
        queue: &Q,
        trans: Transpose,
        m: i64,
        n: i64,
        alpha: T,
        a: &Buffer<T>,
        lda: i64,
        x: &Buffer<T>,
        incx: i64,
        beta: T,
        y: &Buffer<T>,
        incy: i64,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let (lx, ly) = gemv_lengths(trans, m, n);
        check_matrix(Routine::Gemv, "a", a, m, n, lda)?;
        check_vector(Routine::Gemv, "x", x, lx, incx)?;
        check_vector(Routine::Gemv, "y", y, ly, incy)?;
        let call = Level2::Gemv {
            trans,
            m,
            n,
            alpha,
            a: a.as_const_ptr(),
            lda,
            x: x.as_const_ptr(),
            incx,
            beta,
            y: y.as_mut_ptr(),
            incy,
        };
        self.submit_buffers(
            queue,
            Routine::Gemv,
            T::DTYPE,
            |b| b.level2(call),
            [a.read(), x.read(), y.write()],
        )
    }

    /// A = alpha * x * y^T + A
    pub fn ger<T, Q>(
        &self,
        queue: &Q,
        m: i64,
        n: i64,
        alpha: T,
        x: &Buffer<T>,
        incx: i64,
        y: &Buffer<T>,
        incy: i64,
        a: &Buffer<T>,
        lda: i64,
    ) -> Result<()>
    where
        T: RealScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        self.rank1(queue, Routine::Ger, m, n, alpha, x, incx, y, incy, a, lda)
    }

    /// A = alpha * x * y^H + A
    pub fn gerc<T, Q>(
        &self,
        queue: &Q,
        m: i64,
        n: i64,
        alpha: T,
        x: &Buffer<T>,
        incx: i64,
        y: &Buffer<T>,
        incy: i64,
        a: &Buffer<T>,
        lda: i64,
    ) -> Result<()>
    where
        T: ComplexScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        self.rank1(queue, Routine::Gerc, m, n, alpha, x, incx, y, incy, a, lda)
    }

    /// A = alpha * x * y^T + A
    pub fn geru<T, Q>(
        &self,
        queue: &Q,
        m: i64,
        n: i64,
        alpha: T,
        x: &Buffer<T>,
        incx: i64,
        y: &Buffer<T>,
        incy: i64,
        a: &Buffer<T>,
        lda: i64,
    ) -> Result<()>
    where
        T: ComplexScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        self.rank1(queue, Routine::Geru, m, n, alpha, x, incx, y, incy, a, lda)
    }

    fn rank1<T, Q>(
        &self,
        queue: &Q,
        routine: Routine,
        m: i64,
        n: i64,
        alpha: T,
        x: &Buffer<T>,
        incx: i64,
        y: &Buffer<T>,
        incy: i64,
        a: &Buffer<T>,
        lda: i64,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        check_vector(routine, "x", x, m, incx)?;
        check_vector(routine, "y", y, n, incy)?;
        check_matrix(routine, "a", a, m, n, lda)?;
        let (xp, yp, ap) = (x.as_const_ptr(), y.as_const_ptr(), a.as_mut_ptr());
        let call = match routine {
            Routine::Gerc => Level2::Gerc { m, n, alpha, x: xp, incx, y: yp, incy, a: ap, lda },
            Routine::Geru => Level2::Geru { m, n, alpha, x: xp, incx, y: yp, incy, a: ap, lda },
            _ => Level2::Ger { m, n, alpha, x: xp, incx, y: yp, incy, a: ap, lda },
        };
        self.submit_buffers(
            queue,
            routine,
            T::DTYPE,
            |b| b.level2(call),
            [x.read(), y.read(), a.write()],
        )
    }

    /// y = alpha * A * x + beta * y, `A` Hermitian band with `k` off-diagonals.
    pub fn hbmv<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        n: i64,
        k: i64,
        alpha: T,
        a: &Buffer<T>,
        lda: i64,
        x: &Buffer<T>,
        incx: i64,
        beta: T,
        y: &Buffer<T>,
        incy: i64,
    ) -> Result<()>
    where
        T: ComplexScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        self.band_mv(queue, Routine::Hbmv, uplo, n, k, alpha, a, lda, x, incx, beta, y, incy)
    }

    /// y = alpha * A * x + beta * y, `A` symmetric band with `k` off-diagonals.
    pub fn sbmv<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        n: i64,
        k: i64,
        alpha: T,
        a: &Buffer<T>,
        lda: i64,
        x: &Buffer<T>,
        incx: i64,
        beta: T,
        y: &Buffer<T>,
        incy: i64,
    ) -> Result<()>
    where
        T: RealScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        self.band_mv(queue, Routine::Sbmv, uplo, n, k, alpha, a, lda, x, incx, beta, y, incy)
    }

    fn band_mv<T, Q>(
        &self,
        queue: &Q,
        routine: Routine,
        uplo: Uplo,
        n: i64,
        k: i64,
        alpha: T,
        a: &Buffer<T>,
        lda: i64,
        x: &Buffer<T>,
        incx: i64,
        beta: T,
        y: &Buffer<T>,
        incy: i64,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        check_matrix(routine, "a", a, k + 1, n, lda)?;
        check_vector(routine, "x", x, n, incx)?;
        check_vector(routine, "y", y, n, incy)?;
        let (ap, xp, yp) = (a.as_const_ptr(), x.as_const_ptr(), y.as_mut_ptr());
        let call = if routine == Routine::Hbmv {
            Level2::Hbmv { uplo, n, k, alpha, a: ap, lda, x: xp, incx, beta, y: yp, incy }
        } else {
            Level2::Sbmv { uplo, n, k, alpha, a: ap, lda, x: xp, incx, beta, y: yp, incy }
        };
        self.submit_buffers(
            queue,
            routine,
            T::DTYPE,
            |b| b.level2(call),
            [a.read(), x.read(), y.write()],
        )
    }

    /// y = alpha * A * x + beta * y, `A` Hermitian.
    pub fn hemv<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        n: i64,
        alpha: T,
        a: &Buffer<T>,
        lda: i64,
        x: &Buffer<T>,
        incx: i64,
        beta: T,
        y: &Buffer<T>,
        incy: i64,
    ) -> Result<()>
    where
        T: ComplexScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        self.sym_mv(queue, Routine::Hemv, uplo, n, alpha, a, lda, x, incx, beta, y, incy)
    }

    /// y = alpha * A * x + beta * y, `A` symmetric.
    pub fn symv<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        n: i64,
        alpha: T,
        a: &Buffer<T>,
        lda: i64,
        x: &Buffer<T>,
        incx: i64,
        beta: T,
        y: &Buffer<T>,
        incy: i64,
    ) -> Result<()>
    where
        T: RealScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        self.sym_mv(queue, Routine::Symv, uplo, n, alpha, a, lda, x, incx, beta, y, incy)
    }

    fn sym_mv<T, Q>(
        &self,
        queue: &Q,
        routine: Routine,
        uplo: Uplo,
        n: i64,
        alpha: T,
        a: &Buffer<T>,
        lda: i64,
        x: &Buffer<T>,
        incx: i64,
        beta: T,
        y: &Buffer<T>,
        incy: i64,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        check_matrix(routine, "a", a, n, n, lda)?;
        check_vector(routine, "x", x, n, incx)?;
        check_vector(routine, "y", y, n, incy)?;
        let (ap, xp, yp) = (a.as_const_ptr(), x.as_const_ptr(), y.as_mut_ptr());
        let call = if routine == Routine::Hemv {
            Level2::Hemv { uplo, n, alpha, a: ap, lda, x: xp, incx, beta, y: yp, incy }
        } else {
            Level2::Symv { uplo, n, alpha, a: ap, lda, x: xp, incx, beta, y: yp, incy }
        };
        self.submit_buffers(
            queue,
            routine,
            T::DTYPE,
            |b| b.level2(call),
            [a.read(), x.read(), y.write()],
        )
    }

    /// A = alpha * x * x^H + A, `A` Hermitian, `alpha` real.
    pub fn her<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        n: i64,
        alpha: Real<T>,
        x: &Buffer<T>,
        incx: i64,
        a: &Buffer<T>,
        lda: i64,
    ) -> Result<()>
    where
        T: ComplexScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        check_vector(Routine::Her, "x", x, n, incx)?;
        check_matrix(Routine::Her, "a", a, n, n, lda)?;
        let call = Level2::Her {
            uplo,
            n,
            alpha,
            x: x.as_const_ptr(),
            incx,
            a: a.as_mut_ptr(),
            lda,
        };
        self.submit_buffers(
            queue,
            Routine::Her,
            T::DTYPE,
            |b| b.level2(call),
            [x.read(), a.write()],
        )
    }

    /// A = alpha * x * x^T + A, `A` symmetric.
    pub fn syr<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        n: i64,
        alpha: T,
        x: &Buffer<T>,
        incx: i64,
        a: &Buffer<T>,
        lda: i64,
    ) -> Result<()>
    where
        T: RealScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        check_vector(Routine::Syr, "x", x, n, incx)?;
        check_matrix(Routine::Syr, "a", a, n, n, lda)?;
        let call = Level2::Syr {
            uplo,
            n,
            alpha,
            x: x.as_const_ptr(),
            incx,
            a: a.as_mut_ptr(),
            lda,
        };
        self.submit_buffers(
            queue,
            Routine::Syr,
            T::DTYPE,
            |b| b.level2(call),
            [x.read(), a.write()],
        )
    }

    /// A = alpha * x * y^H + conj(alpha) * y * x^H + A, `A` Hermitian.
    pub fn her2<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        n: i64,
        alpha: T,
        x: &Buffer<T>,
        incx: i64,
        y: &Buffer<T>,
        incy: i64,
        a: &Buffer<T>,
        lda: i64,
    ) -> Result<()>
    where
        T: ComplexScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        self.rank2(queue, Routine::Her2, uplo, n, alpha, x, incx, y, incy, a, lda)
    }

    /// A = alpha * x * y^T + alpha * y * x^T + A, `A` symmetric.
    pub fn syr2<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        n: i64,
        alpha: T,
        x: &Buffer<T>,
        incx: i64,
        y: &Buffer<T>,
        incy: i64,
        a: &Buffer<T>,
        lda: i64,
    ) -> Result<()>
    where
        T: RealScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        self.rank2(queue, Routine::Syr2, uplo, n, alpha, x, incx, y, incy, a, lda)
    }

    fn rank2<T, Q>(
        &self,
        queue: &Q,
        routine: Routine,
        uplo: Uplo,
        n: i64,
        alpha: T,
        x: &Buffer<T>,
        incx: i64,
        y: &Buffer<T>,
        incy: i64,
        a: &Buffer<T>,
        lda: i64,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        check_vector(routine, "x", x, n, incx)?;
        check_vector(routine, "y", y, n, incy)?;
        check_matrix(routine, "a", a, n, n, lda)?;
        let (xp, yp, ap) = (x.as_const_ptr(), y.as_const_ptr(), a.as_mut_ptr());
        let call = if routine == Routine::Her2 {
            Level2::Her2 { uplo, n, alpha, x: xp, incx, y: yp, incy, a: ap, lda }
        } else {
            Level2::Syr2 { uplo, n, alpha, x: xp, incx, y: yp, incy, a: ap, lda }
        };
        self.submit_buffers(
            queue,
            routine,
            T::DTYPE,
            |b| b.level2(call),
            [x.read(), y.read(), a.write()],
        )
    }

    /// y = alpha * A * x + beta * y, `A` Hermitian packed.
    pub fn hpmv<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        n: i64,
        alpha: T,
        a: &Buffer<T>,
        x: &Buffer<T>,
        incx: i64,
        beta: T,
        y: &Buffer<T>,
        incy: i64,
    ) -> Result<()>
    where
        T: ComplexScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        self.packed_mv(queue, Routine::Hpmv, uplo, n, alpha, a, x, incx, beta, y, incy)
    }

    /// y = alpha * A * x + beta * y, `A` symmetric packed.
    pub fn spmv<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        n: i64,
        alpha: T,
        a: &Buffer<T>,
        x: &Buffer<T>,
        incx: i64,
        beta: T,
        y: &Buffer<T>,
        incy: i64,
    ) -> Result<()>
    where
        T: RealScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        self.packed_mv(queue, Routine::Spmv, uplo, n, alpha, a, x, incx, beta, y, incy)
    }

    fn packed_mv<T, Q>(
        &self,
        queue: &Q,
        routine: Routine,
        uplo: Uplo,
        n: i64,
        alpha: T,
        a: &Buffer<T>,
        x: &Buffer<T>,
        incx: i64,
        beta: T,
        y: &Buffer<T>,
        incy: i64,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        check_len(routine, "a", a, packed_extent(n))?;
        check_vector(routine, "x", x, n, incx)?;
        check_vector(routine, "y", y, n, incy)?;
        let (ap, xp, yp) = (a.as_const_ptr(), x.as_const_ptr(), y.as_mut_ptr());
        let call = if routine == Routine::Hpmv {
            Level2::Hpmv { uplo, n, alpha, a: ap, x: xp, incx, beta, y: yp, incy }
        } else {
            Level2::Spmv { uplo, n, alpha, a: ap, x: xp, incx, beta, y: yp, incy }
        };
        self.submit_buffers(
            queue,
            routine,
            T::DTYPE,
            |b| b.level2(call),
            [a.read(), x.read(), y.write()],
        )
    }

    /// A = alpha * x * x^H + A, `A` Hermitian packed, `alpha` real.
    pub fn hpr<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        n: i64,
        alpha: Real<T>,
        x: &Buffer<T>,
        incx: i64,
        a: &Buffer<T>,
    ) -> Result<()>
    where
        T: ComplexScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        check_vector(Routine::Hpr, "x", x, n, incx)?;
        check_len(Routine::Hpr, "a", a, packed_extent(n))?;
        let call = Level2::Hpr { uplo, n, alpha, x: x.as_const_ptr(), incx, a: a.as_mut_ptr() };
        self.submit_buffers(
            queue,
            Routine::Hpr,
            T::DTYPE,
            |b| b.level2(call),
            [x.read(), a.write()],
        )
    }

    /// A = alpha * x * x^T + A, `A` symmetric packed.
    pub fn spr<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        n: i64,
        alpha: T,
        x: &Buffer<T>,
        incx: i64,
        a: &Buffer<T>,
    ) -> Result<()>
    where
        T: RealScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        check_vector(Routine::Spr, "x", x, n, incx)?;
        check_len(Routine::Spr, "a", a, packed_extent(n))?;
        let call = Level2::Spr { uplo, n, alpha, x: x.as_const_ptr(), incx, a: a.as_mut_ptr() };
        self.submit_buffers(
            queue,
            Routine::Spr,
            T::DTYPE,
            |b| b.level2(call),
            [x.read(), a.write()],
        )
    }

    /// Packed Hermitian rank-2 update.
    pub fn hpr2<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        n: i64,
        alpha: T,
        x: &Buffer<T>,
        incx: i64,
        y: &Buffer<T>,
        incy: i64,
        a: &Buffer<T>,
    ) -> Result<()>
    where
        T: ComplexScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        self.packed_rank2(queue, Routine::Hpr2, uplo, n, alpha, x, incx, y, incy, a)
    }

    /// Packed symmetric rank-2 update.
    pub fn spr2<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        n: i64,
        alpha: T,
        x: &Buffer<T>,
        incx: i64,
        y: &Buffer<T>,
        incy: i64,
        a: &Buffer<T>,
    ) -> Result<()>
    where
        T: RealScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        self.packed_rank2(queue, Routine::Spr2, uplo, n, alpha, x, incx, y, incy, a)
    }

    fn packed_rank2<T, Q>(
        &self,
        queue: &Q,
        routine: Routine,
        uplo: Uplo,
        n: i64,
        alpha: T,
        x: &Buffer<T>,
        incx: i64,
        y: &Buffer<T>,
        incy: i64,
        a: &Buffer<T>,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        check_vector(routine, "x", x, n, incx)?;
        check_vector(routine, "y", y, n, incy)?;
        check_len(routine, "a", a, packed_extent(n))?;
        let (xp, yp, ap) = (x.as_const_ptr(), y.as_const_ptr(), a.as_mut_ptr());
        let call = if routine == Routine::Hpr2 {
            Level2::Hpr2 { uplo, n, alpha, x: xp, incx, y: yp, incy, a: ap }
        } else {
            Level2::Spr2 { uplo, n, alpha, x: xp, incx, y: yp, incy, a: ap }
        };
        self.submit_buffers(
            queue,
            routine,
            T::DTYPE,
            |b| b.level2(call),
            [x.read(), y.read(), a.write()],
        )
    }

    /// x = op(A) * x, `A` triangular band with `k` off-diagonals.
    pub fn tbmv<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        trans: Transpose,
        diag: Diag,
        n: i64,
        k: i64,
        a: &Buffer<T>,
        lda: i64,
        x: &Buffer<T>,
        incx: i64,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        self.triangular_band(queue, Routine::Tbmv, uplo, trans, diag, n, k, a, lda, x, incx)
    }

    /// Solve op(A) * x = b in place, `A` triangular band.
    pub fn tbsv<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        trans: Transpose,
        diag: Diag,
        n: i64,
        k: i64,
        a: &Buffer<T>,
        lda: i64,
        x: &Buffer<T>,
        incx: i64,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        self.triangular_band(queue, Routine::Tbsv, uplo, trans, diag, n, k, a, lda, x, incx)
    }

    fn triangular_band<T, Q>(
        &self,
        queue: &Q,
        routine: Routine,
        uplo: Uplo,
        trans: Transpose,
        diag: Diag,
        n: i64,
        k: i64,
        a: &Buffer<T>,
        lda: i64,
        x: &Buffer<T>,
        incx: i64,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        check_matrix(routine, "a", a, k + 1, n, lda)?;
        check_vector(routine, "x", x, n, incx)?;
        let (ap, xp) = (a.as_const_ptr(), x.as_mut_ptr());
        let call = if routine == Routine::Tbsv {
            Level2::Tbsv { uplo, trans, diag, n, k, a: ap, lda, x: xp, incx }
        } else {
            Level2::Tbmv { uplo, trans, diag, n, k, a: ap, lda, x: xp, incx }
        };
        self.submit_buffers(queue, routine, T::DTYPE, |b| b.level2(call), [a.read(), x.write()])
    }

    /// x = op(A) * x, `A` triangular packed.
    pub fn tpmv<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        trans: Transpose,
        diag: Diag,
        n: i64,
        a: &Buffer<T>,
        x: &Buffer<T>,
        incx: i64,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        self.triangular_packed(queue, Routine::Tpmv, uplo, trans, diag, n, a, x, incx)
    }

    /// Solve op(A) * x = b in place, `A` triangular packed.
    pub fn tpsv<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        trans: Transpose,
        diag: Diag,
        n: i64,
        a: &Buffer<T>,
        x: &Buffer<T>,
        incx: i64,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        self.triangular_packed(queue, Routine::Tpsv, uplo, trans, diag, n, a, x, incx)
    }

    fn triangular_packed<T, Q>(
        &self,
        queue: &Q,
        routine: Routine,
        uplo: Uplo,
        trans: Transpose,
        diag: Diag,
        n: i64,
        a: &Buffer<T>,
        x: &Buffer<T>,
        incx: i64,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        check_len(routine, "a", a, packed_extent(n))?;
        check_vector(routine, "x", x, n, incx)?;
        let (ap, xp) = (a.as_const_ptr(), x.as_mut_ptr());
        let call = if routine == Routine::Tpsv {
            Level2::Tpsv { uplo, trans, diag, n, a: ap, x: xp, incx }
        } else {
            Level2::Tpmv { uplo, trans, diag, n, a: ap, x: xp, incx }
        };
        self.submit_buffers(queue, routine, T::DTYPE, |b| b.level2(call), [a.read(), x.write()])
    }

    /// x = op(A) * x, `A` triangular.
    pub fn trmv<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        trans: Transpose,
        diag: Diag,
        n: i64,
        a: &Buffer<T>,
        lda: i64,
        x: &Buffer<T>,
        incx: i64,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        self.triangular(queue, Routine::Trmv, uplo, trans, diag, n, a, lda, x, incx)
    }

    /// Solve op(A) * x = b in place, `A` triangular.
    pub fn trsv<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        trans: Transpose,
        diag: Diag,
        n: i64,
        a: &Buffer<T>,
        lda: i64,
        x: &Buffer<T>,
        incx: i64,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        self.triangular(queue, Routine::Trsv, uplo, trans, diag, n, a, lda, x, incx)
    }

    fn triangular<T, Q>(
        &self,
        queue: &Q,
        routine: Routine,
        uplo: Uplo,
        trans: Transpose,
        diag: Diag,
        n: i64,
        a: &Buffer<T>,
        lda: i64,
        x: &Buffer<T>,
        incx: i64,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        check_matrix(routine, "a", a, n, n, lda)?;
        check_vector(routine, "x", x, n, incx)?;
        let (ap, xp) = (a.as_const_ptr(), x.as_mut_ptr());
        let call = if routine == Routine::Trsv {
            Level2::Trsv { uplo, trans, diag, n, a: ap, lda, x: xp, incx }
        } else {
            Level2::Trmv { uplo, trans, diag, n, a: ap, lda, x: xp, incx }
        };
        self.submit_buffers(queue, routine, T::DTYPE, |b| b.level2(call), [a.read(), x.write()])
    }

    // ========================================================================
    // Raw pointers
    // ========================================================================

    /// Raw-pointer [`gbmv`](Self::gbmv).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn gbmv_usm<T, Q>(
        &self,
        queue: &Q,
        trans: Transpose,
        m: i64,
        n: i64,
        kl: i64,
        ku: i64,
        alpha: T,
        a: *const T,
        lda: i64,
        x: *const T,
        incx: i64,
        beta: T,
        y: *mut T,
        incy: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level2::Gbmv {
            trans,
            m,
            n,
            kl,
            ku,
            alpha,
            a: a.into(),
            lda,
            x: x.into(),
            incx,
            beta,
            y: y.into(),
            incy,
        };
        self.submit_usm(queue, Routine::Gbmv, T::DTYPE, |b| b.level2(call), dependencies)
    }

    /// Raw-pointer [`gemv`](Self::gemv).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn gemv_usm<T, Q>(
        &self,
        queue: &Q,
        trans: Transpose,
        m: i64,
        n: i64,
        alpha: T,
        a: *const T,
        lda: i64,
        x: *const T,
        incx: i64,
        beta: T,
        y: *mut T,
        incy: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level2::Gemv {
            trans,
            m,
            n,
            alpha,
            a: a.into(),
            lda,
            x: x.into(),
            incx,
            beta,
            y: y.into(),
            incy,
        };
        self.submit_usm(queue, Routine::Gemv, T::DTYPE, |b| b.level2(call), dependencies)
    }

    /// Raw-pointer [`ger`](Self::ger).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn ger_usm<T, Q>(
        &self,
        queue: &Q,
        m: i64,
        n: i64,
        alpha: T,
        x: *const T,
        incx: i64,
        y: *const T,
        incy: i64,
        a: *mut T,
        lda: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: RealScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level2::Ger {
            m,
            n,
            alpha,
            x: x.into(),
            incx,
            y: y.into(),
            incy,
            a: a.into(),
            lda,
        };
        self.submit_usm(queue, Routine::Ger, T::DTYPE, |b| b.level2(call), dependencies)
    }

    /// Raw-pointer [`gerc`](Self::gerc).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn gerc_usm<T, Q>(
        &self,
        queue: &Q,
        m: i64,
        n: i64,
        alpha: T,
        x: *const T,
        incx: i64,
        y: *const T,
        incy: i64,
        a: *mut T,
        lda: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: ComplexScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level2::Gerc {
            m,
            n,
            alpha,
            x: x.into(),
            incx,
            y: y.into(),
            incy,
            a: a.into(),
            lda,
        };
        self.submit_usm(queue, Routine::Gerc, T::DTYPE, |b| b.level2(call), dependencies)
    }

    /// Raw-pointer [`geru`](Self::geru).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn geru_usm<T, Q>(
        &self,
        queue: &Q,
        m: i64,
        n: i64,
        alpha: T,
        x: *const T,
        incx: i64,
        y: *const T,
        incy: i64,
        a: *mut T,
        lda: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: ComplexScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level2::Geru {
            m,
            n,
            alpha,
            x: x.into(),
            incx,
            y: y.into(),
            incy,
            a: a.into(),
            lda,
        };
        self.submit_usm(queue, Routine::Geru, T::DTYPE, |b| b.level2(call), dependencies)
    }

    /// Raw-pointer [`hbmv`](Self::hbmv).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn hbmv_usm<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        n: i64,
        k: i64,
        alpha: T,
        a: *const T,
        lda: i64,
        x: *const T,
        incx: i64,
        beta: T,
        y: *mut T,
        incy: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: ComplexScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level2::Hbmv {
            uplo,
            n,
            k,
            alpha,
            a: a.into(),
            lda,
            x: x.into(),
            incx,
            beta,
            y: y.into(),
            incy,
        };
        self.submit_usm(queue, Routine::Hbmv, T::DTYPE, |b| b.level2(call), dependencies)
    }

    /// Raw-pointer [`hemv`](Self::hemv).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn hemv_usm<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        n: i64,
        alpha: T,
        a: *const T,
        lda: i64,
        x: *const T,
        incx: i64,
        beta: T,
        y: *mut T,
        incy: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: ComplexScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level2::Hemv {
            uplo,
            n,
            alpha,
            a: a.into(),
            lda,
            x: x.into(),
            incx,
            beta,
            y: y.into(),
            incy,
        };
        self.submit_usm(queue, Routine::Hemv, T::DTYPE, |b| b.level2(call), dependencies)
    }

    /// Raw-pointer [`her`](Self::her).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn her_usm<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        n: i64,
        alpha: Real<T>,
        x: *const T,
        incx: i64,
        a: *mut T,
        lda: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: ComplexScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level2::Her { uplo, n, alpha, x: x.into(), incx, a: a.into(), lda };
        self.submit_usm(queue, Routine::Her, T::DTYPE, |b| b.level2(call), dependencies)
    }

    /// Raw-pointer [`her2`](Self::her2).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn her2_usm<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        n: i64,
        alpha: T,
        x: *const T,
        incx: i64,
        y: *const T,
        incy: i64,
        a: *mut T,
        lda: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: ComplexScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level2::Her2 {
            uplo,
            n,
            alpha,
            x: x.into(),
            incx,
            y: y.into(),
            incy,
            a: a.into(),
            lda,
        };
        self.submit_usm(queue, Routine::Her2, T::DTYPE, |b| b.level2(call), dependencies)
    }

    /// Raw-pointer [`hpmv`](Self::hpmv).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn hpmv_usm<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        n: i64,
        alpha: T,
        a: *const T,
        x: *const T,
        incx: i64,
        beta: T,
        y: *mut T,
        incy: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: ComplexScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level2::Hpmv {
            uplo,
            n,
            alpha,
            a: a.into(),
            x: x.into(),
            incx,
            beta,
            y: y.into(),
            incy,
        };
        self.submit_usm(queue, Routine::Hpmv, T::DTYPE, |b| b.level2(call), dependencies)
    }

    /// Raw-pointer [`hpr`](Self::hpr).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn hpr_usm<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        n: i64,
        alpha: Real<T>,
        x: *const T,
        incx: i64,
        a: *mut T,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: ComplexScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level2::Hpr { uplo, n, alpha, x: x.into(), incx, a: a.into() };
        self.submit_usm(queue, Routine::Hpr, T::DTYPE, |b| b.level2(call), dependencies)
    }

    /// Raw-pointer [`hpr2`](Self::hpr2).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn hpr2_usm<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        n: i64,
        alpha: T,
        x: *const T,
        incx: i64,
        y: *const T,
        incy: i64,
        a: *mut T,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: ComplexScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level2::Hpr2 {
            uplo,
            n,
            alpha,
            x: x.into(),
            incx,
            y: y.into(),
            incy,
            a: a.into(),
        };
        self.submit_usm(queue, Routine::Hpr2, T::DTYPE, |b| b.level2(call), dependencies)
    }

    /// Raw-pointer [`sbmv`](Self::sbmv).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn sbmv_usm<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        n: i64,
        k: i64,
        alpha: T,
        a: *const T,
        lda: i64,
        x: *const T,
        incx: i64,
        beta: T,
        y: *mut T,
        incy: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: RealScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level2::Sbmv {
            uplo,
            n,
            k,
            alpha,
            a: a.into(),
            lda,
            x: x.into(),
            incx,
            beta,
            y: y.into(),
            incy,
        };
        self.submit_usm(queue, Routine::Sbmv, T::DTYPE, |b| b.level2(call), dependencies)
    }

    /// Raw-pointer [`spmv`](Self::spmv).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn spmv_usm<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        n: i64,
        alpha: T,
        a: *const T,
        x: *const T,
        incx: i64,
        beta: T,
        y: *mut T,
        incy: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: RealScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level2::Spmv {
            uplo,
            n,
            alpha,
            a: a.into(),
            x: x.into(),
            incx,
            beta,
            y: y.into(),
            incy,
        };
        self.submit_usm(queue, Routine::Spmv, T::DTYPE, |b| b.level2(call), dependencies)
    }

    /// Raw-pointer [`spr`](Self::spr).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn spr_usm<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        n: i64,
        alpha: T,
        x: *const T,
        incx: i64,
        a: *mut T,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: RealScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level2::Spr { uplo, n, alpha, x: x.into(), incx, a: a.into() };
        self.submit_usm(queue, Routine::Spr, T::DTYPE, |b| b.level2(call), dependencies)
    }

    /// Raw-pointer [`spr2`](Self::spr2).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn spr2_usm<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        n: i64,
        alpha: T,
        x: *const T,
        incx: i64,
        y: *const T,
        incy: i64,
        a: *mut T,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: RealScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level2::Spr2 {
            uplo,
            n,
            alpha,
            x: x.into(),
            incx,
            y: y.into(),
            incy,
            a: a.into(),
        };
        self.submit_usm(queue, Routine::Spr2, T::DTYPE, |b| b.level2(call), dependencies)
    }

    /// Raw-pointer [`symv`](Self::symv).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn symv_usm<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        n: i64,
        alpha: T,
        a: *const T,
        lda: i64,
        x: *const T,
        incx: i64,
        beta: T,
        y: *mut T,
        incy: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: RealScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level2::Symv {
            uplo,
            n,
            alpha,
            a: a.into(),
            lda,
            x: x.into(),
            incx,
            beta,
            y: y.into(),
            incy,
        };
        self.submit_usm(queue, Routine::Symv, T::DTYPE, |b| b.level2(call), dependencies)
    }

    /// Raw-pointer [`syr`](Self::syr).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn syr_usm<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        n: i64,
        alpha: T,
        x: *const T,
        incx: i64,
        a: *mut T,
        lda: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: RealScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level2::Syr { uplo, n, alpha, x: x.into(), incx, a: a.into(), lda };
        self.submit_usm(queue, Routine::Syr, T::DTYPE, |b| b.level2(call), dependencies)
    }

    /// Raw-pointer [`syr2`](Self::syr2).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn syr2_usm<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        n: i64,
        alpha: T,
        x: *const T,
        incx: i64,
        y: *const T,
        incy: i64,
        a: *mut T,
        lda: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: RealScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level2::Syr2 {
            uplo,
            n,
            alpha,
            x: x.into(),
            incx,
            y: y.into(),
            incy,
            a: a.into(),
            lda,
        };
        self.submit_usm(queue, Routine::Syr2, T::DTYPE, |b| b.level2(call), dependencies)
    }

    /// Raw-pointer [`tbmv`](Self::tbmv).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn tbmv_usm<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        trans: Transpose,
        diag: Diag,
        n: i64,
        k: i64,
        a: *const T,
        lda: i64,
        x: *mut T,
        incx: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level2::Tbmv { uplo, trans, diag, n, k, a: a.into(), lda, x: x.into(), incx };
        self.submit_usm(queue, Routine::Tbmv, T::DTYPE, |b| b.level2(call), dependencies)
    }

    /// Raw-pointer [`tbsv`](Self::tbsv).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn tbsv_usm<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        trans: Transpose,
        diag: Diag,
        n: i64,
        k: i64,
        a: *const T,
        lda: i64,
        x: *mut T,
        incx: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level2::Tbsv { uplo, trans, diag, n, k, a: a.into(), lda, x: x.into(), incx };
        self.submit_usm(queue, Routine::Tbsv, T::DTYPE, |b| b.level2(call), dependencies)
    }

    /// Raw-pointer [`tpmv`](Self::tpmv).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn tpmv_usm<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        trans: Transpose,
        diag: Diag,
        n: i64,
        a: *const T,
        x: *mut T,
        incx: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level2::Tpmv { uplo, trans, diag, n, a: a.into(), x: x.into(), incx };
        self.submit_usm(queue, Routine::Tpmv, T::DTYPE, |b| b.level2(call), dependencies)
    }

    /// Raw-pointer [`tpsv`](Self::tpsv).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn tpsv_usm<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        trans: Transpose,
        diag: Diag,
        n: i64,
        a: *const T,
        x: *mut T,
        incx: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level2::Tpsv { uplo, trans, diag, n, a: a.into(), x: x.into(), incx };
        self.submit_usm(queue, Routine::Tpsv, T::DTYPE, |b| b.level2(call), dependencies)
    }

    /// Raw-pointer [`trmv`](Self::trmv).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn trmv_usm<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        trans: Transpose,
        diag: Diag,
        n: i64,
        a: *const T,
        lda: i64,
        x: *mut T,
        incx: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level2::Trmv { uplo, trans, diag, n, a: a.into(), lda, x: x.into(), incx };
        self.submit_usm(queue, Routine::Trmv, T::DTYPE, |b| b.level2(call), dependencies)
    }

    /// Raw-pointer [`trsv`](Self::trsv).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn trsv_usm<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        trans: Transpose,
        diag: Diag,
        n: i64,
        a: *const T,
        lda: i64,
        x: *mut T,
        incx: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level2::Trsv { uplo, trans, diag, n, a: a.into(), lda, x: x.into(), incx };
        self.submit_usm(queue, Routine::Trsv, T::DTYPE, |b| b.level2(call), dependencies)
    }
}
