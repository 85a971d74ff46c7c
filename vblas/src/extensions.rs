//! Mixed-precision extensions: half and bfloat16 GEMM, integer GEMM with
//! offsets, and dot products that accumulate in higher precision.

use vblas_core::{
    bf16, f16, Buffer, BufferAccess, Element, Event, Offset, Queue, Result, Routine, Transpose,
};

use crate::backend::{Extension, ExtensionOps};
use crate::router::{check_len, check_matrix, check_vector, Blas};

/// Check an operand stored for `op(X)` of shape `rows x cols`.
fn check_op<T: Element>(
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

impl<B: ExtensionOps> Blas<B> {
    fn submit_extension<Q: Queue + ?Sized>(
        &self,
        queue: &Q,
        call: Extension,
        accesses: impl IntoIterator<Item = BufferAccess>,
    ) -> Result<()> {
        self.submit_buffers(
            queue,
            call.routine(),
            call.dtype(),
            |backend| backend.extension(call),
            accesses,
        )
    }

    fn submit_extension_usm<Q: Queue + ?Sized>(
        &self,
        queue: &Q,
        call: Extension,
        dependencies: &[Event],
    ) -> Result<Event> {
        self.submit_usm(
            queue,
            call.routine(),
            call.dtype(),
            |backend| backend.extension(call),
            dependencies,
        )
    }

    /// Half-precision GEMM.
    pub fn gemm_f16<Q: Queue + ?Sized>(
        &self,
        queue: &Q,
        transa: Transpose,
        transb: Transpose,
        m: i64,
        n: i64,
        k: i64,
        alpha: f16,
        a: &Buffer<f16>,
        lda: i64,
        b: &Buffer<f16>,
        ldb: i64,
        beta: f16,
        c: &Buffer<f16>,
        ldc: i64,
    ) -> Result<()> {
        check_op(Routine::Gemm, "a", a, transa, m, k, lda)?;
        check_op(Routine::Gemm, "b", b, transb, k, n, ldb)?;
        check_matrix(Routine::Gemm, "c", c, m, n, ldc)?;
        let call = Extension::GemmF16 {
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
        self.submit_extension(queue, call, [a.read(), b.read(), c.write()])
    }

    /// GEMM with f16 inputs and f32 accumulation and output.
    pub fn gemm_ext_f16f32<Q: Queue + ?Sized>(
        &self,
        queue: &Q,
        transa: Transpose,
        transb: Transpose,
        m: i64,
        n: i64,
        k: i64,
        alpha: f32,
        a: &Buffer<f16>,
        lda: i64,
        b: &Buffer<f16>,
        ldb: i64,
        beta: f32,
        c: &Buffer<f32>,
        ldc: i64,
    ) -> Result<()> {
        check_op(Routine::GemmExt, "a", a, transa, m, k, lda)?;
        check_op(Routine::GemmExt, "b", b, transb, k, n, ldb)?;
        check_matrix(Routine::GemmExt, "c", c, m, n, ldc)?;
        let call = Extension::GemmF16F32 {
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
        self.submit_extension(queue, call, [a.read(), b.read(), c.write()])
    }

    /// GEMM with bf16 inputs and f32 accumulation and output.
    pub fn gemm_ext_bf16f32<Q: Queue + ?Sized>(
        &self,
        queue: &Q,
        transa: Transpose,
        transb: Transpose,
        m: i64,
        n: i64,
        k: i64,
        alpha: f32,
        a: &Buffer<bf16>,
        lda: i64,
        b: &Buffer<bf16>,
        ldb: i64,
        beta: f32,
        c: &Buffer<f32>,
        ldc: i64,
    ) -> Result<()> {
        check_op(Routine::GemmExt, "a", a, transa, m, k, lda)?;
        check_op(Routine::GemmExt, "b", b, transb, k, n, ldb)?;
        check_matrix(Routine::GemmExt, "c", c, m, n, ldc)?;
        let call = Extension::GemmBf16F32 {
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
        self.submit_extension(queue, call, [a.read(), b.read(), c.write()])
    }

    /// Integer GEMM: C = alpha * (op(A) - ao) * (op(B) - bo) + beta * C + co,
    /// where `co` holds `offsetc.len(m, n)` entries.
    pub fn gemm_ext_s8u8s32<Q: Queue + ?Sized>(
        &self,
        queue: &Q,
        transa: Transpose,
        transb: Transpose,
        offsetc: Offset,
        m: i64,
        n: i64,
        k: i64,
        alpha: f32,
        a: &Buffer<i8>,
        lda: i64,
        ao: i8,
        b: &Buffer<u8>,
        ldb: i64,
        bo: u8,
        beta: f32,
        c: &Buffer<i32>,
        ldc: i64,
        co: &Buffer<i32>,
    ) -> Result<()> {
        check_op(Routine::GemmExt, "a", a, transa, m, k, lda)?;
        check_op(Routine::GemmExt, "b", b, transb, k, n, ldb)?;
        check_matrix(Routine::GemmExt, "c", c, m, n, ldc)?;
        check_vector(Routine::GemmExt, "co", co, offsetc.len(m, n), 1)?;
        let call = Extension::GemmS8U8S32 {
            transa,
            transb,
            offsetc,
            m,
            n,
            k,
            alpha,
            a: a.as_const_ptr(),
            lda,
            ao,
            b: b.as_const_ptr(),
            ldb,
            bo,
            beta,
            c: c.as_mut_ptr(),
            ldc,
            co: co.as_const_ptr(),
        };
        self.submit_extension(queue, call, [a.read(), b.read(), co.read(), c.write()])
    }

    /// result[0] = sb + x^T * y, accumulated in f64.
    pub fn sdsdot<Q: Queue + ?Sized>(
        &self,
        queue: &Q,
        n: i64,
        sb: f32,
        x: &Buffer<f32>,
        incx: i64,
        y: &Buffer<f32>,
        incy: i64,
        result: &Buffer<f32>,
    ) -> Result<()> {
        check_vector(Routine::Sdsdot, "x", x, n, incx)?;
        check_vector(Routine::Sdsdot, "y", y, n, incy)?;
        check_len(Routine::Sdsdot, "result", result, 1)?;
        let call = Extension::Sdsdot {
            n,
            sb,
            x: x.as_const_ptr(),
            incx,
            y: y.as_const_ptr(),
            incy,
            result: result.as_mut_ptr(),
        };
        self.submit_extension(queue, call, [x.read(), y.read(), result.write()])
    }

    /// result[0] = x^T * y over f32 vectors, accumulated and returned in f64.
    pub fn dot_f64<Q: Queue + ?Sized>(
        &self,
        queue: &Q,
        n: i64,
        x: &Buffer<f32>,
        incx: i64,
        y: &Buffer<f32>,
        incy: i64,
        result: &Buffer<f64>,
    ) -> Result<()> {
        check_vector(Routine::Dot, "x", x, n, incx)?;
        check_vector(Routine::Dot, "y", y, n, incy)?;
        check_len(Routine::Dot, "result", result, 1)?;
        let call = Extension::DotF32F64 {
            n,
            x: x.as_const_ptr(),
            incx,
            y: y.as_const_ptr(),
            incy,
            result: result.as_mut_ptr(),
        };
        self.submit_extension(queue, call, [x.read(), y.read(), result.write()])
    }

    /// Raw-pointer [`gemm_f16`](Self::gemm_f16).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn gemm_f16_usm<Q: Queue + ?Sized>(
        &self,
        queue: &Q,
        transa: Transpose,
        transb: Transpose,
        m: i64,
        n: i64,
        k: i64,
        alpha: f16,
        a: *const f16,
        lda: i64,
        b: *const f16,
        ldb: i64,
        beta: f16,
        c: *mut f16,
        ldc: i64,
        dependencies: &[Event],
    ) -> Result<Event> {
        let call = Extension::GemmF16 {
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
        self.submit_extension_usm(queue, call, dependencies)
    }

    /// Raw-pointer [`gemm_ext_f16f32`](Self::gemm_ext_f16f32).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn gemm_ext_f16f32_usm<Q: Queue + ?Sized>(
        &self,
        queue: &Q,
        transa: Transpose,
        transb: Transpose,
        m: i64,
        n: i64,
        k: i64,
        alpha: f32,
        a: *const f16,
        lda: i64,
        b: *const f16,
        ldb: i64,
        beta: f32,
        c: *mut f32,
        ldc: i64,
        dependencies: &[Event],
    ) -> Result<Event> {
        let call = Extension::GemmF16F32 {
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
        self.submit_extension_usm(queue, call, dependencies)
    }

    /// Raw-pointer [`gemm_ext_bf16f32`](Self::gemm_ext_bf16f32).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn gemm_ext_bf16f32_usm<Q: Queue + ?Sized>(
        &self,
        queue: &Q,
        transa: Transpose,
        transb: Transpose,
        m: i64,
        n: i64,
        k: i64,
        alpha: f32,
        a: *const bf16,
        lda: i64,
        b: *const bf16,
        ldb: i64,
        beta: f32,
        c: *mut f32,
        ldc: i64,
        dependencies: &[Event],
    ) -> Result<Event> {
        let call = Extension::GemmBf16F32 {
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
        self.submit_extension_usm(queue, call, dependencies)
    }

    /// Raw-pointer [`gemm_ext_s8u8s32`](Self::gemm_ext_s8u8s32).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn gemm_ext_s8u8s32_usm<Q: Queue + ?Sized>(
        &self,
        queue: &Q,
        transa: Transpose,
        transb: Transpose,
        offsetc: Offset,
        m: i64,
        n: i64,
        k: i64,
        alpha: f32,
        a: *const i8,
        lda: i64,
        ao: i8,
        b: *const u8,
        ldb: i64,
        bo: u8,
        beta: f32,
        c: *mut i32,
        ldc: i64,
        co: *const i32,
        dependencies: &[Event],
    ) -> Result<Event> {
        let call = Extension::GemmS8U8S32 {
            transa,
            transb,
            offsetc,
            m,
            n,
            k,
            alpha,
            a: a.into(),
            lda,
            ao,
            b: b.into(),
            ldb,
            bo,
            beta,
            c: c.into(),
            ldc,
            co: co.into(),
        };
        self.submit_extension_usm(queue, call, dependencies)
    }

    /// Raw-pointer [`sdsdot`](Self::sdsdot).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn sdsdot_usm<Q: Queue + ?Sized>(
        &self,
        queue: &Q,
        n: i64,
        sb: f32,
        x: *const f32,
        incx: i64,
        y: *const f32,
        incy: i64,
        result: *mut f32,
        dependencies: &[Event],
    ) -> Result<Event> {
        let call = Extension::Sdsdot {
            n,
            sb,
            x: x.into(),
            incx,
            y: y.into(),
            incy,
            result: result.into(),
        };
        self.submit_extension_usm(queue, call, dependencies)
    }

    /// Raw-pointer [`dot_f64`](Self::dot_f64).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn dot_f64_usm<Q: Queue + ?Sized>(
        &self,
        queue: &Q,
        n: i64,
        x: *const f32,
        incx: i64,
        y: *const f32,
        incy: i64,
        result: *mut f64,
        dependencies: &[Event],
    ) -> Result<Event> {
        let call = Extension::DotF32F64 {
            n,
            x: x.into(),
            incx,
            y: y.into(),
            incy,
            result: result.into(),
        };
        self.submit_extension_usm(queue, call, dependencies)
    }
}
