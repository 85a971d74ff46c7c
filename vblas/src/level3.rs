//! BLAS Level 3: matrix-matrix operations.

use vblas_core::{
    BlasScalar, Buffer, ComplexScalar, Diag, Event, Queue, Result, Routine, Side, Transpose, Uplo,
};

use crate::backend::{BlasBackend, BlasOps, Level3};
use crate::router::{check_matrix, Blas};

type Real<T> = <T as BlasScalar>::Real;

/// Order of the triangular/symmetric `A` for a given side.
fn side_order(side: Side, m: i64, n: i64) -> i64 {
    match side {
        Side::Left => m,
        Side::Right => n,
    }
}

/// Check `A` stored for `op(A)` of shape `rows x cols`.
fn check_op<T: BlasScalar>(
    routine: Routine,
    argument: &'static str,
    buffer: &Buffer<T>,
    trans: Transpose,
    rows: i64,
    cols: i64,
    ld: i64,
) -> Result<()> {
    check_matrix(
        routine,
        argument,
        buffer,
        trans.stored_rows(rows, cols),
        trans.stored_cols(rows, cols),
        ld,
    )
}

impl<B: BlasBackend> Blas<B> {
    // ========================================================================
    // Managed buffers
    // ========================================================================

    /// C = alpha * op(A) * op(B) + beta * C
    pub fn gemm<T, Q>(
        &self,
        queue: &Q,
        transa: Transpose,
        transb: Transpose,
        m: i64,
        n: i64,
        k: i64,
        alpha: T,
        a: &Buffer<T>,
        lda: i64,
        b: &Buffer<T>,
        ldb: i64,
        beta: T,
        c: &Buffer<T>,
        ldc: i64,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        check_op(Routine::Gemm, "a", a, transa, m, k, lda)?;
        check_op(Routine::Gemm, "b", b, transb, k, n, ldb)?;
        check_matrix(Routine::Gemm, "c", c, m, n, ldc)?;
        let call = Level3::Gemm {
            transa,
            transb,
            m,
            n,
            k,
            alpha,
            a: a.as_const_ptr(),
            lda,
            b: b.as_const_ptr(),
            ldb,
            beta,
            c: c.as_mut_ptr(),
            ldc,
        };
        self.submit_buffers(
            queue,
            Routine::Gemm,
            T::DTYPE,
            |backend| backend.level3(call),
            [a.read(), b.read(), c.write()],
        )
    }

    /// GEMM restricted to the `uplo` triangle of the `n x n` result.
    pub fn gemmt<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        transa: Transpose,
        transb: Transpose,
        n: i64,
        k: i64,
        alpha: T,
        a: &Buffer<T>,
        lda: i64,
        b: &Buffer<T>,
        ldb: i64,
        beta: T,
        c: &Buffer<T>,
        ldc: i64,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        check_op(Routine::Gemmt, "a", a, transa, n, k, lda)?;
        check_op(Routine::Gemmt, "b", b, transb, k, n, ldb)?;
        check_matrix(Routine::Gemmt, "c", c, n, n, ldc)?;
        let call = Level3::Gemmt {
            uplo,
            transa,
            transb,
            n,
            k,
            alpha,
            a: a.as_const_ptr(),
            lda,
            b: b.as_const_ptr(),
            ldb,
            beta,
            c: c.as_mut_ptr(),
            ldc,
        };
        self.submit_buffers(
            queue,
            Routine::Gemmt,
            T::DTYPE,
            |backend| backend.level3(call),
            [a.read(), b.read(), c.write()],
        )
    }

    /// C = alpha * A * B + beta * C (or `B * A` for `Side::Right`), `A`
    /// Hermitian.
    pub fn hemm<T, Q>(
        &self,
        queue: &Q,
        side: Side,
        uplo: Uplo,
        m: i64,
        n: i64,
        alpha: T,
        a: &Buffer<T>,
        lda: i64,
        b: &Buffer<T>,
        ldb: i64,
        beta: T,
        c: &Buffer<T>,
        ldc: i64,
    ) -> Result<()>
    where
        T: ComplexScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        self.side_mm(queue, Routine::Hemm, side, uplo, m, n, alpha, a, lda, b, ldb, beta, c, ldc)
    }

    /// C = alpha * A * B + beta * C (or `B * A` for `Side::Right`), `A`
    /// symmetric.
    pub fn symm<T, Q>(
        &self,
        queue: &Q,
        side: Side,
        uplo: Uplo,
        m: i64,
        n: i64,
        alpha: T,
        a: &Buffer<T>,
        lda: i64,
        b: &Buffer<T>,
        ldb: i64,
        beta: T,
        c: &Buffer<T>,
        ldc: i64,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        self.side_mm(queue, Routine::Symm, side, uplo, m, n, alpha, a, lda, b, ldb, beta, c, ldc)
    }

    fn side_mm<T, Q>(
        &self,
        queue: &Q,
        routine: Routine,
        side: Side,
        uplo: Uplo,
        m: i64,
        n: i64,
        alpha: T,
        a: &Buffer<T>,
        lda: i64,
        b: &Buffer<T>,
        ldb: i64,
        beta: T,
        c: &Buffer<T>,
        ldc: i64,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let ka = side_order(side, m, n);
        check_matrix(routine, "a", a, ka, ka, lda)?;
        check_matrix(routine, "b", b, m, n, ldb)?;
        check_matrix(routine, "c", c, m, n, ldc)?;
        let (ap, bp, cp) = (a.as_const_ptr(), b.as_const_ptr(), c.as_mut_ptr());
        let call = if routine == Routine::Hemm {
            Level3::Hemm { side, uplo, m, n, alpha, a: ap, lda, b: bp, ldb, beta, c: cp, ldc }
        } else {
            Level3::Symm { side, uplo, m, n, alpha, a: ap, lda, b: bp, ldb, beta, c: cp, ldc }
        };
        self.submit_buffers(
            queue,
            routine,
            T::DTYPE,
            |backend| backend.level3(call),
            [a.read(), b.read(), c.write()],
        )
    }

    /// C = alpha * op(A) * op(B)^H + conj(alpha) * op(B) * op(A)^H + beta * C
    pub fn her2k<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        trans: Transpose,
        n: i64,
        k: i64,
        alpha: T,
        a: &Buffer<T>,
        lda: i64,
        b: &Buffer<T>,
        ldb: i64,
        beta: Real<T>,
        c: &Buffer<T>,
        ldc: i64,
    ) -> Result<()>
    where
        T: ComplexScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        check_op(Routine::Her2k, "a", a, trans, n, k, lda)?;
        check_op(Routine::Her2k, "b", b, trans, n, k, ldb)?;
        check_matrix(Routine::Her2k, "c", c, n, n, ldc)?;
        let call = Level3::Her2k {
            uplo,
            trans,
            n,
            k,
            alpha,
            a: a.as_const_ptr(),
            lda,
            b: b.as_const_ptr(),
            ldb,
            beta,
            c: c.as_mut_ptr(),
            ldc,
        };
        self.submit_buffers(
            queue,
            Routine::Her2k,
            T::DTYPE,
            |backend| backend.level3(call),
            [a.read(), b.read(), c.write()],
        )
    }

    /// C = alpha * op(A) * op(A)^H + beta * C, real `alpha` and `beta`.
    pub fn herk<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        trans: Transpose,
        n: i64,
        k: i64,
        alpha: Real<T>,
        a: &Buffer<T>,
        lda: i64,
        beta: Real<T>,
        c: &Buffer<T>,
        ldc: i64,
    ) -> Result<()>
    where
        T: ComplexScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        check_op(Routine::Herk, "a", a, trans, n, k, lda)?;
        check_matrix(Routine::Herk, "c", c, n, n, ldc)?;
        let call = Level3::Herk {
            uplo,
            trans,
            n,
            k,
            alpha,
            a: a.as_const_ptr(),
            lda,
            beta,
            c: c.as_mut_ptr(),
            ldc,
        };
        self.submit_buffers(
            queue,
            Routine::Herk,
            T::DTYPE,
            |backend| backend.level3(call),
            [a.read(), c.write()],
        )
    }

    /// C = alpha * (op(A) * op(B)^T + op(B) * op(A)^T) + beta * C
    pub fn syr2k<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        trans: Transpose,
        n: i64,
        k: i64,
        alpha: T,
        a: &Buffer<T>,
        lda: i64,
        b: &Buffer<T>,
        ldb: i64,
        beta: T,
        c: &Buffer<T>,
        ldc: i64,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        check_op(Routine::Syr2k, "a", a, trans, n, k, lda)?;
        check_op(Routine::Syr2k, "b", b, trans, n, k, ldb)?;
        check_matrix(Routine::Syr2k, "c", c, n, n, ldc)?;
        let call = Level3::Syr2k {
            uplo,
            trans,
            n,
            k,
            alpha,
            a: a.as_const_ptr(),
            lda,
            b: b.as_const_ptr(),
            ldb,
            beta,
            c: c.as_mut_ptr(),
            ldc,
        };
        self.submit_buffers(
            queue,
            Routine::Syr2k,
            T::DTYPE,
            |backend| backend.level3(call),
            [a.read(), b.read(), c.write()],
        )
    }

    /// C = alpha * op(A) * op(A)^T + beta * C
    pub fn syrk<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        trans: Transpose,
        n: i64,
        k: i64,
        alpha: T,
        a: &Buffer<T>,
        lda: i64,
        beta: T,
        c: &Buffer<T>,
        ldc: i64,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        check_op(Routine::Syrk, "a", a, trans, n, k, lda)?;
        check_matrix(Routine::Syrk, "c", c, n, n, ldc)?;
        let call = Level3::Syrk {
            uplo,
            trans,
            n,
            k,
            alpha,
            a: a.as_const_ptr(),
            lda,
            beta,
            c: c.as_mut_ptr(),
            ldc,
        };
        self.submit_buffers(
            queue,
            Routine::Syrk,
            T::DTYPE,
            |backend| backend.level3(call),
            [a.read(), c.write()],
        )
    }

    /// B = alpha * op(A) * B (or `B * op(A)`), `A` triangular.
    pub fn trmm<T, Q>(
        &self,
        queue: &Q,
        side: Side,
        uplo: Uplo,
        trans: Transpose,
        diag: Diag,
        m: i64,
        n: i64,
        alpha: T,
        a: &Buffer<T>,
        lda: i64,
        b: &Buffer<T>,
        ldb: i64,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        self.triangular_mm(
            queue,
            Routine::Trmm,
            side,
            uplo,
            trans,
            diag,
            m,
            n,
            alpha,
            a,
            lda,
            b,
            ldb,
        )
    }

    /// Solve op(A) * X = alpha * B (or `X * op(A)`), overwriting B with X.
    pub fn trsm<T, Q>(
        &self,
        queue: &Q,
        side: Side,
        uplo: Uplo,
        trans: Transpose,
        diag: Diag,
        m: i64,
        n: i64,
        alpha: T,
        a: &Buffer<T>,
        lda: i64,
        b: &Buffer<T>,
        ldb: i64,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        self.triangular_mm(
            queue,
            Routine::Trsm,
            side,
            uplo,
            trans,
            diag,
            m,
            n,
            alpha,
            a,
            lda,
            b,
            ldb,
        )
    }

    fn triangular_mm<T, Q>(
        &self,
        queue: &Q,
        routine: Routine,
        side: Side,
        uplo: Uplo,
        trans: Transpose,
        diag: Diag,
        m: i64,
        n: i64,
        alpha: T,
        a: &Buffer<T>,
        lda: i64,
        b: &Buffer<T>,
        ldb: i64,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let ka = side_order(side, m, n);
        check_matrix(routine, "a", a, ka, ka, lda)?;
        check_matrix(routine, "b", b, m, n, ldb)?;
        let (ap, bp) = (a.as_const_ptr(), b.as_mut_ptr());
        let call = if routine == Routine::Trsm {
            Level3::Trsm { side, uplo, trans, diag, m, n, alpha, a: ap, lda, b: bp, ldb }
        } else {
            Level3::Trmm { side, uplo, trans, diag, m, n, alpha, a: ap, lda, b: bp, ldb }
        };
        self.submit_buffers(
            queue,
            routine,
            T::DTYPE,
            |backend| backend.level3(call),
            [a.read(), b.write()],
        )
    }

    // ========================================================================
    // Raw pointers
    // ========================================================================

    /// Raw-pointer [`gemm`](Self::gemm).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn gemm_usm<T, Q>(
        &self,
        queue: &Q,
        transa: Transpose,
        transb: Transpose,
        m: i64,
        n: i64,
        k: i64,
        alpha: T,
        a: *const T,
        lda: i64,
        b: *const T,
        ldb: i64,
        beta: T,
        c: *mut T,
        ldc: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level3::Gemm {
            transa,
            transb,
            m,
            n,
            k,
            alpha,
            a: a.into(),
            lda,
            b: b.into(),
            ldb,
            beta,
            c: c.into(),
            ldc,
        };
        self.submit_usm(
            queue,
            Routine::Gemm,
            T::DTYPE,
            |backend| backend.level3(call),
            dependencies,
        )
    }

    /// Raw-pointer [`gemmt`](Self::gemmt).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn gemmt_usm<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        transa: Transpose,
        transb: Transpose,
        n: i64,
        k: i64,
        alpha: T,
        a: *const T,
        lda: i64,
        b: *const T,
        ldb: i64,
        beta: T,
        c: *mut T,
        ldc: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level3::Gemmt {
            uplo,
            transa,
            transb,
            n,
            k,
            alpha,
            a: a.into(),
            lda,
            b: b.into(),
            ldb,
            beta,
            c: c.into(),
            ldc,
        };
        self.submit_usm(
            queue,
            Routine::Gemmt,
            T::DTYPE,
            |backend| backend.level3(call),
            dependencies,
        )
    }

    /// Raw-pointer [`hemm`](Self::hemm).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn hemm_usm<T, Q>(
        &self,
        queue: &Q,
        side: Side,
        uplo: Uplo,
        m: i64,
        n: i64,
        alpha: T,
        a: *const T,
        lda: i64,
        b: *const T,
        ldb: i64,
        beta: T,
        c: *mut T,
        ldc: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: ComplexScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level3::Hemm {
            side,
            uplo,
            m,
            n,
            alpha,
            a: a.into(),
            lda,
            b: b.into(),
            ldb,
            beta,
            c: c.into(),
            ldc,
        };
        self.submit_usm(
            queue,
            Routine::Hemm,
            T::DTYPE,
            |backend| backend.level3(call),
            dependencies,
        )
    }

    /// Raw-pointer [`her2k`](Self::her2k).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn her2k_usm<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        trans: Transpose,
        n: i64,
        k: i64,
        alpha: T,
        a: *const T,
        lda: i64,
        b: *const T,
        ldb: i64,
        beta: Real<T>,
        c: *mut T,
        ldc: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: ComplexScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level3::Her2k {
            uplo,
            trans,
            n,
            k,
            alpha,
            a: a.into(),
            lda,
            b: b.into(),
            ldb,
            beta,
            c: c.into(),
            ldc,
        };
        self.submit_usm(
            queue,
            Routine::Her2k,
            T::DTYPE,
            |backend| backend.level3(call),
            dependencies,
        )
    }

    /// Raw-pointer [`herk`](Self::herk).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn herk_usm<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        trans: Transpose,
        n: i64,
        k: i64,
        alpha: Real<T>,
        a: *const T,
        lda: i64,
        beta: Real<T>,
        c: *mut T,
        ldc: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: ComplexScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level3::Herk {
            uplo,
            trans,
            n,
            k,
            alpha,
            a: a.into(),
            lda,
            beta,
            c: c.into(),
            ldc,
        };
        self.submit_usm(
            queue,
            Routine::Herk,
            T::DTYPE,
            |backend| backend.level3(call),
            dependencies,
        )
    }

    /// Raw-pointer [`symm`](Self::symm).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn symm_usm<T, Q>(
        &self,
        queue: &Q,
        side: Side,
        uplo: Uplo,
        m: i64,
        n: i64,
        alpha: T,
        a: *const T,
        lda: i64,
        b: *const T,
        ldb: i64,
        beta: T,
        c: *mut T,
        ldc: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level3::Symm {
            side,
            uplo,
            m,
            n,
            alpha,
            a: a.into(),
            lda,
            b: b.into(),
            ldb,
            beta,
            c: c.into(),
            ldc,
        };
        self.submit_usm(
            queue,
            Routine::Symm,
            T::DTYPE,
            |backend| backend.level3(call),
            dependencies,
        )
    }

    /// Raw-pointer [`syr2k`](Self::syr2k).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn syr2k_usm<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        trans: Transpose,
        n: i64,
        k: i64,
        alpha: T,
        a: *const T,
        lda: i64,
        b: *const T,
        ldb: i64,
        beta: T,
        c: *mut T,
        ldc: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level3::Syr2k {
            uplo,
            trans,
            n,
            k,
            alpha,
            a: a.into(),
            lda,
            b: b.into(),
            ldb,
            beta,
            c: c.into(),
            ldc,
        };
        self.submit_usm(
            queue,
            Routine::Syr2k,
            T::DTYPE,
            |backend| backend.level3(call),
            dependencies,
        )
    }

    /// Raw-pointer [`syrk`](Self::syrk).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn syrk_usm<T, Q>(
        &self,
        queue: &Q,
        uplo: Uplo,
        trans: Transpose,
        n: i64,
        k: i64,
        alpha: T,
        a: *const T,
        lda: i64,
        beta: T,
        c: *mut T,
        ldc: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level3::Syrk {
            uplo,
            trans,
            n,
            k,
            alpha,
            a: a.into(),
            lda,
            beta,
            c: c.into(),
            ldc,
        };
        self.submit_usm(
            queue,
            Routine::Syrk,
            T::DTYPE,
            |backend| backend.level3(call),
            dependencies,
        )
    }

    /// Raw-pointer [`trmm`](Self::trmm).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn trmm_usm<T, Q>(
        &self,
        queue: &Q,
        side: Side,
        uplo: Uplo,
        trans: Transpose,
        diag: Diag,
        m: i64,
        n: i64,
        alpha: T,
        a: *const T,
        lda: i64,
        b: *mut T,
        ldb: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level3::Trmm {
            side,
            uplo,
            trans,
            diag,
            m,
            n,
            alpha,
            a: a.into(),
            lda,
            b: b.into(),
            ldb,
        };
        self.submit_usm(
            queue,
            Routine::Trmm,
            T::DTYPE,
            |backend| backend.level3(call),
            dependencies,
        )
    }

    /// Raw-pointer [`trsm`](Self::trsm).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn trsm_usm<T, Q>(
        &self,
        queue: &Q,
        side: Side,
        uplo: Uplo,
        trans: Transpose,
        diag: Diag,
        m: i64,
        n: i64,
        alpha: T,
        a: *const T,
        lda: i64,
        b: *mut T,
        ldb: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level3::Trsm {
            side,
            uplo,
            trans,
            diag,
            m,
            n,
            alpha,
            a: a.into(),
            lda,
            b: b.into(),
            ldb,
        };
        self.submit_usm(
            queue,
            Routine::Trsm,
            T::DTYPE,
            |backend| backend.level3(call),
            dependencies,
        )
    }
}
