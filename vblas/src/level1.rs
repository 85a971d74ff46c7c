//! BLAS Level 1: vector-vector operations.
//!
//! Scalar results (`asum`, `dot`, `iamax`, ...) are written to a one-element
//! buffer or pointer so they can be produced asynchronously.

use vblas_core::{
    BlasScalar, Buffer, ComplexScalar, Event, Queue, RealScalar, Result, Routine,
};

use crate::backend::{BlasBackend, BlasOps, Level1};
use crate::router::{check_len, check_vector, Blas};

type Real<T> = <T as BlasScalar>::Real;

impl<B: BlasBackend> Blas<B> {
    // ========================================================================
    // Managed buffers
    // ========================================================================

    /// result[0] = sum_i |re(x_i)| + |im(x_i)|
    pub fn asum<T, Q>(
        &self,
        queue: &Q,
        n: i64,
        x: &Buffer<T>,
        incx: i64,
        result: &Buffer<Real<T>>,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        check_vector(Routine::Asum, "x", x, n, incx)?;
        check_len(Routine::Asum, "result", result, 1)?;
        let call = Level1::Asum { n, x: x.as_const_ptr(), incx, result: result.as_mut_ptr() };
        self.submit_buffers(
            queue,
            Routine::Asum,
            T::DTYPE,
            |b| b.level1(call),
            [x.read(), result.write()],
        )
    }

    /// y = alpha * x + y
    pub fn axpy<T, Q>(
        &self,
        queue: &Q,
        n: i64,
        alpha: T,
        x: &Buffer<T>,
        incx: i64,
        y: &Buffer<T>,
        incy: i64,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        check_vector(Routine::Axpy, "x", x, n, incx)?;
        check_vector(Routine::Axpy, "y", y, n, incy)?;
        let call = Level1::Axpy { n, alpha, x: x.as_const_ptr(), incx, y: y.as_mut_ptr(), incy };
        self.submit_buffers(
            queue,
            Routine::Axpy,
            T::DTYPE,
            |b| b.level1(call),
            [x.read(), y.write()],
        )
    }

    /// y = x
    pub fn copy<T, Q>(
        &self,
        queue: &Q,
        n: i64,
        x: &Buffer<T>,
        incx: i64,
        y: &Buffer<T>,
        incy: i64,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        check_vector(Routine::Copy, "x", x, n, incx)?;
        check_vector(Routine::Copy, "y", y, n, incy)?;
        let call = Level1::Copy { n, x: x.as_const_ptr(), incx, y: y.as_mut_ptr(), incy };
        self.submit_buffers(
            queue,
            Routine::Copy,
            T::DTYPE,
            |b| b.level1(call),
            [x.read(), y.write()],
        )
    }

    /// result[0] = x^T * y
    pub fn dot<T, Q>(
        &self,
        queue: &Q,
        n: i64,
        x: &Buffer<T>,
        incx: i64,
        y: &Buffer<T>,
        incy: i64,
        result: &Buffer<T>,
    ) -> Result<()>
    where
        T: RealScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        self.dot_family(queue, Routine::Dot, n, x, incx, y, incy, result)
    }

    /// result[0] = x^H * y
    pub fn dotc<T, Q>(
        &self,
        queue: &Q,
        n: i64,
        x: &Buffer<T>,
        incx: i64,
        y: &Buffer<T>,
        incy: i64,
        result: &Buffer<T>,
    ) -> Result<()>
    where
        T: ComplexScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        self.dot_family(queue, Routine::Dotc, n, x, incx, y, incy, result)
    }

    /// result[0] = x^T * y
    pub fn dotu<T, Q>(
        &self,
        queue: &Q,
        n: i64,
        x: &Buffer<T>,
        incx: i64,
        y: &Buffer<T>,
        incy: i64,
        result: &Buffer<T>,
    ) -> Result<()>
    where
        T: ComplexScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        self.dot_family(queue, Routine::Dotu, n, x, incx, y, incy, result)
    }

    fn dot_family<T, Q>(
        &self,
        queue: &Q,
        routine: Routine,
        n: i64,
        x: &Buffer<T>,
        incx: i64,
        y: &Buffer<T>,
        incy: i64,
        result: &Buffer<T>,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        check_vector(routine, "x", x, n, incx)?;
        check_vector(routine, "y", y, n, incy)?;
        check_len(routine, "result", result, 1)?;
        let (x_ptr, y_ptr, r) = (x.as_const_ptr(), y.as_const_ptr(), result.as_mut_ptr());
        let call = match routine {
            Routine::Dotc => Level1::Dotc { n, x: x_ptr, incx, y: y_ptr, incy, result: r },
            Routine::Dotu => Level1::Dotu { n, x: x_ptr, incx, y: y_ptr, incy, result: r },
            _ => Level1::Dot { n, x: x_ptr, incx, y: y_ptr, incy, result: r },
        };
        self.submit_buffers(
            queue,
            routine,
            T::DTYPE,
            |b| b.level1(call),
            [x.read(), y.read(), result.write()],
        )
    }

    /// result[0] = zero-based index of the first max |re| + |im|
    pub fn iamax<T, Q>(
        &self,
        queue: &Q,
        n: i64,
        x: &Buffer<T>,
        incx: i64,
        result: &Buffer<i64>,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        check_vector(Routine::Iamax, "x", x, n, incx)?;
        check_len(Routine::Iamax, "result", result, 1)?;
        let call = Level1::Iamax { n, x: x.as_const_ptr(), incx, result: result.as_mut_ptr() };
        self.submit_buffers(
            queue,
            Routine::Iamax,
            T::DTYPE,
            |b| b.level1(call),
            [x.read(), result.write()],
        )
    }

    /// result[0] = zero-based index of the first min |re| + |im|
    pub fn iamin<T, Q>(
        &self,
        queue: &Q,
        n: i64,
        x: &Buffer<T>,
        incx: i64,
        result: &Buffer<i64>,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        check_vector(Routine::Iamin, "x", x, n, incx)?;
        check_len(Routine::Iamin, "result", result, 1)?;
        let call = Level1::Iamin { n, x: x.as_const_ptr(), incx, result: result.as_mut_ptr() };
        self.submit_buffers(
            queue,
            Routine::Iamin,
            T::DTYPE,
            |b| b.level1(call),
            [x.read(), result.write()],
        )
    }

    /// result[0] = ||x||_2
    pub fn nrm2<T, Q>(
        &self,
        queue: &Q,
        n: i64,
        x: &Buffer<T>,
        incx: i64,
        result: &Buffer<Real<T>>,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        check_vector(Routine::Nrm2, "x", x, n, incx)?;
        check_len(Routine::Nrm2, "result", result, 1)?;
        let call = Level1::Nrm2 { n, x: x.as_const_ptr(), incx, result: result.as_mut_ptr() };
        self.submit_buffers(
            queue,
            Routine::Nrm2,
            T::DTYPE,
            |b| b.level1(call),
            [x.read(), result.write()],
        )
    }

    /// Apply the plane rotation `[c s; -s c]` to the pairs `(x_i, y_i)`.
    pub fn rot<T, Q>(
        &self,
        queue: &Q,
        n: i64,
        x: &Buffer<T>,
        incx: i64,
        y: &Buffer<T>,
        incy: i64,
        c: Real<T>,
        s: Real<T>,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        check_vector(Routine::Rot, "x", x, n, incx)?;
        check_vector(Routine::Rot, "y", y, n, incy)?;
        let call = Level1::Rot { n, x: x.as_mut_ptr(), incx, y: y.as_mut_ptr(), incy, c, s };
        self.submit_buffers(
            queue,
            Routine::Rot,
            T::DTYPE,
            |b| b.level1(call),
            [x.write(), y.write()],
        )
    }

    /// Construct a Givens rotation eliminating `b`.
    pub fn rotg<T, Q>(
        &self,
        queue: &Q,
        a: &Buffer<T>,
        b: &Buffer<T>,
        c: &Buffer<Real<T>>,
        s: &Buffer<T>,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        check_len(Routine::Rotg, "a", a, 1)?;
        check_len(Routine::Rotg, "b", b, 1)?;
        check_len(Routine::Rotg, "c", c, 1)?;
        check_len(Routine::Rotg, "s", s, 1)?;
        let call = Level1::Rotg {
            a: a.as_mut_ptr(),
            b: b.as_mut_ptr(),
            c: c.as_mut_ptr(),
            s: s.as_mut_ptr(),
        };
        self.submit_buffers(
            queue,
            Routine::Rotg,
            T::DTYPE,
            |backend| backend.level1(call),
            [a.write(), b.write(), c.write(), s.write()],
        )
    }

    /// Apply the modified Givens transformation described by `param[0..5]`.
    pub fn rotm<T, Q>(
        &self,
        queue: &Q,
        n: i64,
        x: &Buffer<T>,
        incx: i64,
        y: &Buffer<T>,
        incy: i64,
        param: &Buffer<T>,
    ) -> Result<()>
    where
        T: RealScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        check_vector(Routine::Rotm, "x", x, n, incx)?;
        check_vector(Routine::Rotm, "y", y, n, incy)?;
        check_len(Routine::Rotm, "param", param, 5)?;
        let call = Level1::Rotm {
            n,
            x: x.as_mut_ptr(),
            incx,
            y: y.as_mut_ptr(),
            incy,
            param: param.as_const_ptr(),
        };
        self.submit_buffers(
            queue,
            Routine::Rotm,
            T::DTYPE,
            |b| b.level1(call),
            [x.write(), y.write(), param.read()],
        )
    }

    /// Construct a modified Givens transformation.
    pub fn rotmg<T, Q>(
        &self,
        queue: &Q,
        d1: &Buffer<T>,
        d2: &Buffer<T>,
        x1: &Buffer<T>,
        y1: T,
        param: &Buffer<T>,
    ) -> Result<()>
    where
        T: RealScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        check_len(Routine::Rotmg, "d1", d1, 1)?;
        check_len(Routine::Rotmg, "d2", d2, 1)?;
        check_len(Routine::Rotmg, "x1", x1, 1)?;
        check_len(Routine::Rotmg, "param", param, 5)?;
        let call = Level1::Rotmg {
            d1: d1.as_mut_ptr(),
            d2: d2.as_mut_ptr(),
            x1: x1.as_mut_ptr(),
            y1,
            param: param.as_mut_ptr(),
        };
        self.submit_buffers(
            queue,
            Routine::Rotmg,
            T::DTYPE,
            |b| b.level1(call),
            [d1.write(), d2.write(), x1.write(), param.write()],
        )
    }

    /// x = alpha * x
    pub fn scal<T, Q>(&self, queue: &Q, n: i64, alpha: T, x: &Buffer<T>, incx: i64) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        check_vector(Routine::Scal, "x", x, n, incx)?;
        let call = Level1::Scal { n, alpha, x: x.as_mut_ptr(), incx };
        self.submit_buffers(queue, Routine::Scal, T::DTYPE, |b| b.level1(call), [x.write()])
    }

    /// x = alpha * x with a real `alpha` (csscal / zdscal).
    pub fn scal_real<T, Q>(
        &self,
        queue: &Q,
        n: i64,
        alpha: Real<T>,
        x: &Buffer<T>,
        incx: i64,
    ) -> Result<()>
    where
        T: ComplexScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        check_vector(Routine::Scal, "x", x, n, incx)?;
        let call = Level1::ScalReal { n, alpha, x: x.as_mut_ptr(), incx };
        self.submit_buffers(queue, Routine::Scal, T::DTYPE, |b| b.level1(call), [x.write()])
    }

    /// Exchange x and y.
    pub fn swap<T, Q>(
        &self,
        queue: &Q,
        n: i64,
        x: &Buffer<T>,
        incx: i64,
        y: &Buffer<T>,
        incy: i64,
    ) -> Result<()>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        check_vector(Routine::Swap, "x", x, n, incx)?;
        check_vector(Routine::Swap, "y", y, n, incy)?;
        let call = Level1::Swap { n, x: x.as_mut_ptr(), incx, y: y.as_mut_ptr(), incy };
        self.submit_buffers(
            queue,
            Routine::Swap,
            T::DTYPE,
            |b| b.level1(call),
            [x.write(), y.write()],
        )
    }

    // ========================================================================
    // Raw pointers
    // ========================================================================

    /// Raw-pointer [`asum`](Self::asum).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn asum_usm<T, Q>(
        &self,
        queue: &Q,
        n: i64,
        x: *const T,
        incx: i64,
        result: *mut Real<T>,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level1::Asum { n, x: x.into(), incx, result: result.into() };
        self.submit_usm(queue, Routine::Asum, T::DTYPE, |b| b.level1(call), dependencies)
    }

    /// Raw-pointer [`axpy`](Self::axpy).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn axpy_usm<T, Q>(
        &self,
        queue: &Q,
        n: i64,
        alpha: T,
        x: *const T,
        incx: i64,
        y: *mut T,
        incy: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level1::Axpy { n, alpha, x: x.into(), incx, y: y.into(), incy };
        self.submit_usm(queue, Routine::Axpy, T::DTYPE, |b| b.level1(call), dependencies)
    }

    /// Raw-pointer [`copy`](Self::copy).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn copy_usm<T, Q>(
        &self,
        queue: &Q,
        n: i64,
        x: *const T,
        incx: i64,
        y: *mut T,
        incy: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level1::Copy { n, x: x.into(), incx, y: y.into(), incy };
        self.submit_usm(queue, Routine::Copy, T::DTYPE, |b| b.level1(call), dependencies)
    }

    /// Raw-pointer [`dot`](Self::dot).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn dot_usm<T, Q>(
        &self,
        queue: &Q,
        n: i64,
        x: *const T,
        incx: i64,
        y: *const T,
        incy: i64,
        result: *mut T,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: RealScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level1::Dot { n, x: x.into(), incx, y: y.into(), incy, result: result.into() };
        self.submit_usm(queue, Routine::Dot, T::DTYPE, |b| b.level1(call), dependencies)
    }

    /// Raw-pointer [`dotc`](Self::dotc).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn dotc_usm<T, Q>(
        &self,
        queue: &Q,
        n: i64,
        x: *const T,
        incx: i64,
        y: *const T,
        incy: i64,
        result: *mut T,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: ComplexScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level1::Dotc { n, x: x.into(), incx, y: y.into(), incy, result: result.into() };
        self.submit_usm(queue, Routine::Dotc, T::DTYPE, |b| b.level1(call), dependencies)
    }

    /// Raw-pointer [`dotu`](Self::dotu).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn dotu_usm<T, Q>(
        &self,
        queue: &Q,
        n: i64,
        x: *const T,
        incx: i64,
        y: *const T,
        incy: i64,
        result: *mut T,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: ComplexScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level1::Dotu { n, x: x.into(), incx, y: y.into(), incy, result: result.into() };
        self.submit_usm(queue, Routine::Dotu, T::DTYPE, |b| b.level1(call), dependencies)
    }

    /// Raw-pointer [`iamax`](Self::iamax).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn iamax_usm<T, Q>(
        &self,
        queue: &Q,
        n: i64,
        x: *const T,
        incx: i64,
        result: *mut i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level1::Iamax { n, x: x.into(), incx, result: result.into() };
        self.submit_usm(queue, Routine::Iamax, T::DTYPE, |b| b.level1(call), dependencies)
    }

    /// Raw-pointer [`iamin`](Self::iamin).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn iamin_usm<T, Q>(
        &self,
        queue: &Q,
        n: i64,
        x: *const T,
        incx: i64,
        result: *mut i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level1::Iamin { n, x: x.into(), incx, result: result.into() };
        self.submit_usm(queue, Routine::Iamin, T::DTYPE, |b| b.level1(call), dependencies)
    }

    /// Raw-pointer [`nrm2`](Self::nrm2).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn nrm2_usm<T, Q>(
        &self,
        queue: &Q,
        n: i64,
        x: *const T,
        incx: i64,
        result: *mut Real<T>,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level1::Nrm2 { n, x: x.into(), incx, result: result.into() };
        self.submit_usm(queue, Routine::Nrm2, T::DTYPE, |b| b.level1(call), dependencies)
    }

    /// Raw-pointer [`rot`](Self::rot).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn rot_usm<T, Q>(
        &self,
        queue: &Q,
        n: i64,
        x: *mut T,
        incx: i64,
        y: *mut T,
        incy: i64,
        c: Real<T>,
        s: Real<T>,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level1::Rot { n, x: x.into(), incx, y: y.into(), incy, c, s };
        self.submit_usm(queue, Routine::Rot, T::DTYPE, |b| b.level1(call), dependencies)
    }

    /// Raw-pointer [`rotg`](Self::rotg).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn rotg_usm<T, Q>(
        &self,
        queue: &Q,
        a: *mut T,
        b: *mut T,
        c: *mut Real<T>,
        s: *mut T,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level1::Rotg { a: a.into(), b: b.into(), c: c.into(), s: s.into() };
        self.submit_usm(
            queue,
            Routine::Rotg,
            T::DTYPE,
            |backend| backend.level1(call),
            dependencies,
        )
    }

    /// Raw-pointer [`rotm`](Self::rotm).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn rotm_usm<T, Q>(
        &self,
        queue: &Q,
        n: i64,
        x: *mut T,
        incx: i64,
        y: *mut T,
        incy: i64,
        param: *const T,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: RealScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level1::Rotm { n, x: x.into(), incx, y: y.into(), incy, param: param.into() };
        self.submit_usm(queue, Routine::Rotm, T::DTYPE, |b| b.level1(call), dependencies)
    }

    /// Raw-pointer [`rotmg`](Self::rotmg).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn rotmg_usm<T, Q>(
        &self,
        queue: &Q,
        d1: *mut T,
        d2: *mut T,
        x1: *mut T,
        y1: T,
        param: *mut T,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: RealScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level1::Rotmg {
            d1: d1.into(),
            d2: d2.into(),
            x1: x1.into(),
            y1,
            param: param.into(),
        };
        self.submit_usm(queue, Routine::Rotmg, T::DTYPE, |b| b.level1(call), dependencies)
    }

    /// Raw-pointer [`scal`](Self::scal).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn scal_usm<T, Q>(
        &self,
        queue: &Q,
        n: i64,
        alpha: T,
        x: *mut T,
        incx: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level1::Scal { n, alpha, x: x.into(), incx };
        self.submit_usm(queue, Routine::Scal, T::DTYPE, |b| b.level1(call), dependencies)
    }

    /// Raw-pointer [`scal_real`](Self::scal_real).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn scal_real_usm<T, Q>(
        &self,
        queue: &Q,
        n: i64,
        alpha: Real<T>,
        x: *mut T,
        incx: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: ComplexScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level1::ScalReal { n, alpha, x: x.into(), incx };
        self.submit_usm(queue, Routine::Scal, T::DTYPE, |b| b.level1(call), dependencies)
    }

    /// Raw-pointer [`swap`](Self::swap).
    ///
    /// # Safety
    /// See the [raw-pointer contract](crate::router#raw-pointer-contract).
    pub unsafe fn swap_usm<T, Q>(
        &self,
        queue: &Q,
        n: i64,
        x: *mut T,
        incx: i64,
        y: *mut T,
        incy: i64,
        dependencies: &[Event],
    ) -> Result<Event>
    where
        T: BlasScalar,
        B: BlasOps<T>,
        Q: Queue + ?Sized,
    {
        let call = Level1::Swap { n, x: x.into(), incx, y: y.into(), incy };
        self.submit_usm(queue, Routine::Swap, T::DTYPE, |b| b.level1(call), dependencies)
    }
}
