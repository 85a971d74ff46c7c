//! Batched operations.
//!
//! Strided batches address every matrix from one base pointer per operand;
//! they exist in both calling conventions. Grouped batches carry one
//! pointer per matrix and are raw-pointer only.

use vblas_core::{
    BlasError, BlasScalar, Buffer, Diag, Event, Queue, Result, Routine, Side, Transpose, Uplo,
};

use crate::backend::{AxpyGroup, Batch, BlasBackend, BlasOps, GemmGroup};
use crate::router::{check_len, matrix_extent, strided_extent, Blas};

fn check_strided<T: BlasScalar>(
    routine: Routine,
    argument: &'static str,
    buffer: &Buffer<T>,
    rows: i64,
    cols: i64,
    ld: i64,
    stride: i64,
    batch_size: i64,
) -> Result<()> {
    let extent = strided_extent(matrix_extent(rows, cols, ld), stride, batch_size);
    check_len(routine, argument, buffer, extent)
}

fn ragged_group(routine: Routine, group: usize, reason: &str) -> BlasError {
    BlasError::InvalidArgument {
        routine,
        argument: "groups",
        reason: format!("group {}: {}", group, reason),
    }
}

impl<B: BlasBackend> Blas<B> {
    /// C_i = alpha * op(A_i) * op(B_i) + beta * C_i for `i < batch_size`,
    /// with `A_i` at `a + i * stride_a` (likewise B, C).
    pub fn gemm_batch<T, Q>(
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
        stride_a: i64,
        b: &Buffer<T>,
        ldb: i64,
        stride_b: i64,
        beta: T,
        c: &Buffer<T>,
        ldc: i64,
        stride_c: i64,
        batch_size: i64,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let routine = Routine::GemmBatch;
        check_strided(
            routine,
            "a",
            a,
            transa.stored_rows(m, k),
            transa.stored_cols(m, k),
            lda,
            stride_a,
            batch_size,
        )?;
        check_strided(
            routine,
            "b",
            b,
            transb.stored_rows(k, n),
            transb.stored_cols(k, n),
            ldb,
            stride_b,
            batch_size,
        )?;
        check_strided(routine, "c", c, m, n, ldc, stride_c, batch_size)?;
        let call = Batch::GemmStrided {
            transa,
            transb,
            m,
            n,
            k,
            alpha,
            a: a.as_const_ptr(),
            lda,
            stride_a,
            b: b.as_const_ptr(),
            ldb,
            stride_b,
            beta,
            c: c.as_mut_ptr(),
            ldc,
            stride_c,
            batch_size,
        };
        self.submit_buffers(
            queue,
            routine,
            T::DTYPE,
            |backend| backend.batch(call),
            [a.read(), b.read(), c.write()],
        )
    }

    /// Solve op(A_i) * X_i = alpha * B_i (or `X_i * op(A_i)`) for each
    /// matrix of a strided batch.
    pub fn trsm_batch<T, Q>(
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
        stride_a: i64,
        b: &Buffer<T>,
        ldb: i64,
        stride_b: i64,
        batch_size: i64,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let routine = Routine::TrsmBatch;
        let ka = if side == Side::Left { m } else { n };
        check_strided(routine, "a", a, ka, ka, lda, stride_a, batch_size)?;
        check_strided(routine, "b", b, m, n, ldb, stride_b, batch_size)?;
        let call = Batch::TrsmStrided {
            side,
            uplo,
            trans,
            diag,
            m,
            n,
            alpha,
            a: a.as_const_ptr(),
            lda,
            stride_a,
            b: b.as_mut_ptr(),
            ldb,
            stride_b,
            batch_size,
        };
        self.submit_buffers(
            queue,
            routine,
            T::DTYPE,
            |backend| backend.batch(call),
            [a.read(), b.write()],
        )
    }

    /// Raw-pointer [`gemm_batch`](Self::gemm_batch).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn gemm_batch_usm<T, Q>(
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
        stride_a: i64,
        b: *const T,
        ldb: i64,
        stride_b: i64,
        beta: T,
        c: *mut T,
        ldc: i64,
        stride_c: i64,
        batch_size: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Batch::GemmStrided {
            transa,
            transb,
            m,
            n,
            k,
            alpha,
            a: a.into(),
            lda,
            stride_a,
            b: b.into(),
            ldb,
            stride_b,
            beta,
            c: c.into(),
            ldc,
            stride_c,
            batch_size,
        };
        self.submit_usm(
            queue,
            Routine::GemmBatch,
            T::DTYPE,
            |backend| backend.batch(call),
            dependencies,
        )
    }

    /// Grouped GEMM batch: every group shares its shapes and scalars, and
    /// lists one `(a, b, c)` pointer triple per matrix.
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract);
    /// it applies to every pointer of every group.
    pub unsafe fn gemm_batch_groups_usm<T, Q>(
        &self,
        queue: &Q,
        groups: &[GemmGroup<T>],
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        for (i, group) in groups.iter().enumerate() {
            if group.a.len() != group.size() || group.b.len() != group.size() {
                return Err(ragged_group(Routine::GemmBatch, i, "a, b and c lengths differ"));
            }
        }
        let call = Batch::GemmGroups {
            groups: groups.to_vec(),
        };
        self.submit_usm(
            queue,
            Routine::GemmBatch,
            T::DTYPE,
            |backend| backend.batch(call),
            dependencies,
        )
    }

    /// Raw-pointer [`trsm_batch`](Self::trsm_batch).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn trsm_batch_usm<T, Q>(
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
        stride_a: i64,
        b: *mut T,
        ldb: i64,
        stride_b: i64,
        batch_size: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Batch::TrsmStrided {
            side,
            uplo,
            trans,
            diag,
            m,
            n,
            alpha,
            a: a.into(),
            lda,
            stride_a,
            b: b.into(),
            ldb,
            stride_b,
            batch_size,
        };
        self.submit_usm(
            queue,
            Routine::TrsmBatch,
            T::DTYPE,
            |backend| backend.batch(call),
            dependencies,
        )
    }

    /// Grouped AXPY batch: y_j = alpha_g * x_j + y_j for every vector pair
    /// of every group.
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract);
    /// it applies to every pointer of every group.
    pub unsafe fn axpy_batch_usm<T, Q>(
        &self,
        queue: &Q,
        groups: &[AxpyGroup<T>],
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        for (i, group) in groups.iter().enumerate() {
            if group.x.len() != group.size() {
                return Err(ragged_group(Routine::AxpyBatch, i, "x and y lengths differ"));
            }
        }
        let call = Batch::AxpyGroups {
            groups: groups.to_vec(),
        };
        self.submit_usm(
            queue,
            Routine::AxpyBatch,
            T::DTYPE,
            |backend| backend.batch(call),
            dependencies,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ragged_group_message() {
        let err = ragged_group(Routine::GemmBatch, 2, "a, b and c lengths differ");
        match err {
            BlasError::InvalidArgument { argument, reason, .. } => {
                assert_eq!(argument, "groups");
                assert!(reason.starts_with("group 2"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
