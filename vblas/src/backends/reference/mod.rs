//! Pure-Rust host backend.
//!
//! Serves `reference/host` and `reference/intelcpu`. It covers a working
//! subset of each family; every other routine resolves to
//! [`BlasError::Unsupported`]. Parameters are checked the way vendor
//! libraries check them (non-negative dimensions, non-zero increments
//! outside Level 1, leading dimensions at least `max(1, rows)`), before the
//! kernel is queued.

mod kernels;
mod mixed;

use vblas_core::{
    Backend, BlasError, BlasScalar, Kernel, Library, Result, Routine, Side, Transpose,
};

use crate::backend::{Batch, BlasBackend, BlasOps, Extension, ExtensionOps, Level1, Level2, Level3};

/// Host backend written against the column-major BLAS reference semantics.
#[derive(Debug, Clone)]
pub struct ReferenceBackend {
    backend: Backend,
}

impl ReferenceBackend {
    pub fn new(backend: Backend) -> Result<Self> {
        if !Library::Reference.targets(backend) {
            return Err(BlasError::UnsupportedBackend {
                library: Library::Reference,
                backend,
                reason: "the reference backend runs on the host CPU only".to_string(),
            });
        }
        Ok(Self { backend })
    }

    pub fn host() -> Self {
        Self {
            backend: Backend::Host,
        }
    }
}

impl Default for ReferenceBackend {
    fn default() -> Self {
        Self::host()
    }
}

impl BlasBackend for ReferenceBackend {
    fn library(&self) -> Library {
        Library::Reference
    }

    fn backend(&self) -> Backend {
        self.backend
    }

    fn name(&self) -> &'static str {
        "vblas reference"
    }
}

// ============================================================================
// Parameter checks
// ============================================================================

fn invalid(routine: Routine, argument: &'static str, reason: String) -> BlasError {
    BlasError::InvalidArgument {
        routine,
        argument,
        reason,
    }
}

/// Level 1 quick-return semantics: `n <= 0` is an empty vector.
fn len(n: i64) -> usize {
    usize::try_from(n).unwrap_or(0)
}

fn dim(routine: Routine, argument: &'static str, v: i64) -> Result<usize> {
    usize::try_from(v).map_err(|_| invalid(routine, argument, format!("{v} is negative")))
}

fn inc(routine: Routine, argument: &'static str, v: i64) -> Result<i64> {
    if v == 0 {
        return Err(invalid(routine, argument, "increment must be non-zero".to_string()));
    }
    Ok(v)
}

fn ld(routine: Routine, argument: &'static str, v: i64, rows: usize) -> Result<usize> {
    let min = rows.max(1);
    match usize::try_from(v) {
        Ok(ld) if ld >= min => Ok(ld),
        _ => Err(invalid(routine, argument, format!("{v} < max(1, {rows})"))),
    }
}

fn batch_stride(routine: Routine, argument: &'static str, v: i64) -> Result<usize> {
    usize::try_from(v).map_err(|_| invalid(routine, argument, format!("stride {v} is negative")))
}

fn kernel(f: impl FnOnce() + Send + 'static) -> Result<Kernel> {
    Ok(Box::new(move || {
        f();
        Ok(())
    }))
}

/// Validated GEMM shape, shared by the plain, batched and mixed variants.
#[derive(Clone, Copy)]
struct GemmShape {
    m: usize,
    n: usize,
    k: usize,
    lda: usize,
    ldb: usize,
    ldc: usize,
}

impl GemmShape {
    fn check(
        routine: Routine,
        transa: Transpose,
        transb: Transpose,
        m: i64,
        n: i64,
        k: i64,
        lda: i64,
        ldb: i64,
        ldc: i64,
    ) -> Result<Self> {
        let (m, n, k) = (dim(routine, "m", m)?, dim(routine, "n", n)?, dim(routine, "k", k)?);
        let a_rows = if transa.is_trans() { k } else { m };
        let b_rows = if transb.is_trans() { n } else { k };
        Ok(Self {
            m,
            n,
            k,
            lda: ld(routine, "lda", lda, a_rows)?,
            ldb: ld(routine, "ldb", ldb, b_rows)?,
            ldc: ld(routine, "ldc", ldc, m)?,
        })
    }
}

// ============================================================================
// Families
// ============================================================================

impl<T: BlasScalar> BlasOps<T> for ReferenceBackend {
    fn level1(&self, call: Level1<T>) -> Result<Kernel> {
        use kernels::*;

        match call {
            Level1::Asum { n, x, incx, result } => {
                let n = len(n);
                kernel(move || unsafe { store(result, 0, asum(n, x, incx)) })
            }
            Level1::Axpy { n, alpha, x, incx, y, incy } => {
                let n = len(n);
                kernel(move || unsafe { axpy(n, alpha, x, incx, y, incy) })
            }
            Level1::Copy { n, x, incx, y, incy } => {
                let n = len(n);
                kernel(move || unsafe { copy(n, x, incx, y, incy) })
            }
            Level1::Dot { n, x, incx, y, incy, result }
            | Level1::Dotu { n, x, incx, y, incy, result } => {
                let n = len(n);
                kernel(move || unsafe { store(result, 0, dot(n, x, incx, y, incy, false)) })
            }
            Level1::Dotc { n, x, incx, y, incy, result } => {
                let n = len(n);
                kernel(move || unsafe { store(result, 0, dot(n, x, incx, y, incy, true)) })
            }
            Level1::Iamax { n, x, incx, result } => {
                let n = len(n);
                kernel(move || unsafe { store(result, 0, iamax(n, x, incx, true)) })
            }
            Level1::Iamin { n, x, incx, result } => {
                let n = len(n);
                kernel(move || unsafe { store(result, 0, iamax(n, x, incx, false)) })
            }
            Level1::Nrm2 { n, x, incx, result } => {
                let n = len(n);
                kernel(move || unsafe { store(result, 0, nrm2(n, x, incx)) })
            }
            Level1::Rot { n, x, incx, y, incy, c, s } => {
                let n = len(n);
                kernel(move || unsafe { rot(n, x, incx, y, incy, c, s) })
            }
            Level1::Scal { n, alpha, x, incx } => {
                let n = len(n);
                kernel(move || unsafe { scal(n, alpha, x, incx) })
            }
            Level1::ScalReal { n, alpha, x, incx } => {
                let (n, alpha) = (len(n), T::from_real(alpha));
                kernel(move || unsafe { scal(n, alpha, x, incx) })
            }
            Level1::Swap { n, x, incx, y, incy } => {
                let n = len(n);
                kernel(move || unsafe { swap(n, x, incx, y, incy) })
            }
            other => Err(self.unsupported(other.routine(), T::DTYPE)),
        }
    }

    fn level2(&self, call: Level2<T>) -> Result<Kernel> {
        let routine = call.routine();
        match call {
            Level2::Gemv { trans, m, n, alpha, a, lda, x, incx, beta, y, incy } => {
                let (m, n) = (dim(routine, "m", m)?, dim(routine, "n", n)?);
                let lda = ld(routine, "lda", lda, m)?;
                let incx = inc(routine, "incx", incx)?;
                let incy = inc(routine, "incy", incy)?;
                kernel(move || unsafe {
                    kernels::gemv(trans, m, n, alpha, a, lda, x, incx, beta, y, incy)
                })
            }
            Level2::Sbmv { uplo, n, k, alpha, a, lda, x, incx, beta, y, incy } => {
                let (n, k) = (dim(routine, "n", n)?, dim(routine, "k", k)?);
                let lda = ld(routine, "lda", lda, k + 1)?;
                let incx = inc(routine, "incx", incx)?;
                let incy = inc(routine, "incy", incy)?;
                kernel(move || unsafe {
                    kernels::sbmv(uplo, n, k, alpha, a, lda, x, incx, beta, y, incy)
                })
            }
            _ => Err(self.unsupported(routine, T::DTYPE)),
        }
    }

    fn level3(&self, call: Level3<T>) -> Result<Kernel> {
        let routine = call.routine();
        match call {
            Level3::Gemm { transa, transb, m, n, k, alpha, a, lda, b, ldb, beta, c, ldc } => {
                let s = GemmShape::check(routine, transa, transb, m, n, k, lda, ldb, ldc)?;
                kernel(move || unsafe {
                    kernels::gemm(
                        transa,
                        transb,
                        s.m,
                        s.n,
                        s.k,
                        alpha,
                        a,
                        s.lda,
                        b,
                        s.ldb,
                        beta,
                        c,
                        s.ldc,
                    )
                })
            }
            Level3::Trsm { side, uplo, trans, diag, m, n, alpha, a, lda, b, ldb } => {
                let (m, n) = (dim(routine, "m", m)?, dim(routine, "n", n)?);
                let ka = if side == Side::Left { m } else { n };
                let lda = ld(routine, "lda", lda, ka)?;
                let ldb = ld(routine, "ldb", ldb, m)?;
                kernel(move || unsafe {
                    kernels::trsm(side, uplo, trans, diag, m, n, alpha, a, lda, b, ldb)
                })
            }
            _ => Err(self.unsupported(routine, T::DTYPE)),
        }
    }

    fn batch(&self, call: Batch<T>) -> Result<Kernel> {
        let routine = call.routine();
        match call {
            Batch::GemmStrided {
                transa,
                transb,
                m,
                n,
                k,
                alpha,
                a,
                lda,
                stride_a,
                b,
                ldb,
                stride_b,
                beta,
                c,
                ldc,
                stride_c,
                batch_size,
            } => {
                let s = GemmShape::check(routine, transa, transb, m, n, k, lda, ldb, ldc)?;
                let count = dim(routine, "batch_size", batch_size)?;
                let sa = batch_stride(routine, "stride_a", stride_a)?;
                let sb = batch_stride(routine, "stride_b", stride_b)?;
                let sc = batch_stride(routine, "stride_c", stride_c)?;
                kernel(move || unsafe {
                    for i in 0..count {
                        kernels::gemm(
                            transa,
                            transb,
                            s.m,
                            s.n,
                            s.k,
                            alpha,
                            a.add(i * sa),
                            s.lda,
                            b.add(i * sb),
                            s.ldb,
                            beta,
                            c.add(i * sc),
                            s.ldc,
                        );
                    }
                })
            }
            Batch::GemmGroups { groups } => {
                let shapes = groups
                    .iter()
                    .map(|g| {
                        GemmShape::check(
                            routine,
                            g.transa,
                            g.transb,
                            g.m,
                            g.n,
                            g.k,
                            g.lda,
                            g.ldb,
                            g.ldc,
                        )
                    })
                    .collect::<Result<Vec<_>>>()?;
                kernel(move || unsafe {
                    for (g, s) in groups.iter().zip(&shapes) {
                        for ((&a, &b), &c) in g.a.iter().zip(&g.b).zip(&g.c) {
                            kernels::gemm(
                                g.transa,
                                g.transb,
                                s.m,
                                s.n,
                                s.k,
                                g.alpha,
                                a,
                                s.lda,
                                b,
                                s.ldb,
                                g.beta,
                                c,
                                s.ldc,
                            );
                        }
                    }
                })
            }
            _ => Err(self.unsupported(routine, T::DTYPE)),
        }
    }
}

impl ExtensionOps for ReferenceBackend {
    fn extension(&self, call: Extension) -> Result<Kernel> {
        let routine = call.routine();
        match call {
            Extension::GemmF16 { transa, transb, m, n, k, alpha, a, lda, b, ldb, beta, c, ldc } => {
                let s = GemmShape::check(routine, transa, transb, m, n, k, lda, ldb, ldc)?;
                let (alpha, beta) = (alpha.to_f32(), beta.to_f32());
                kernel(move || unsafe {
                    mixed::gemm_widened(
                        transa,
                        transb,
                        s.m,
                        s.n,
                        s.k,
                        alpha,
                        a,
                        s.lda,
                        b,
                        s.ldb,
                        beta,
                        c,
                        s.ldc,
                    )
                })
            }
            Extension::GemmF16F32 {
                transa,
                transb,
                m,
                n,
                k,
                alpha,
                a,
                lda,
                b,
                ldb,
                beta,
                c,
                ldc,
            } => {
                let s = GemmShape::check(routine, transa, transb, m, n, k, lda, ldb, ldc)?;
                kernel(move || unsafe {
                    mixed::gemm_widened(
                        transa,
                        transb,
                        s.m,
                        s.n,
                        s.k,
                        alpha,
                        a,
                        s.lda,
                        b,
                        s.ldb,
                        beta,
                        c,
                        s.ldc,
                    )
                })
            }
            Extension::GemmBf16F32 {
                transa,
                transb,
                m,
                n,
                k,
                alpha,
                a,
                lda,
                b,
                ldb,
                beta,
                c,
                ldc,
            } => {
                let s = GemmShape::check(routine, transa, transb, m, n, k, lda, ldb, ldc)?;
                kernel(move || unsafe {
                    mixed::gemm_widened(
                        transa,
                        transb,
                        s.m,
                        s.n,
                        s.k,
                        alpha,
                        a,
                        s.lda,
                        b,
                        s.ldb,
                        beta,
                        c,
                        s.ldc,
                    )
                })
            }
            Extension::Sdsdot { n, sb, x, incx, y, incy, result } => {
                let n = len(n);
                kernel(move || unsafe {
                    let dot = mixed::dot_f64(n, x, incx, y, incy);
                    kernels::store(result, 0, (f64::from(sb) + dot) as f32)
                })
            }
            Extension::DotF32F64 { n, x, incx, y, incy, result } => {
                let n = len(n);
                kernel(move || unsafe {
                    kernels::store(result, 0, mixed::dot_f64(n, x, incx, y, incy))
                })
            }
            other => Err(self.unsupported(routine, other.dtype())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vblas_core::{ConstPtr, DType, MutPtr};

    #[test]
    fn test_rejects_gpu_backends() {
        assert!(ReferenceBackend::new(Backend::IntelCpu).is_ok());
        let err = ReferenceBackend::new(Backend::IntelGpu).unwrap_err();
        assert!(matches!(err, BlasError::UnsupportedBackend { .. }));
    }

    #[test]
    fn test_unimplemented_routine_is_unsupported() {
        let backend = ReferenceBackend::host();
        let call = Level2::<f64>::Trmv {
            uplo: vblas_core::Uplo::Upper,
            trans: Transpose::NoTrans,
            diag: vblas_core::Diag::NonUnit,
            n: 2,
            a: ConstPtr::new(std::ptr::null()),
            lda: 2,
            x: MutPtr::new(std::ptr::null_mut()),
            incx: 1,
        };
        let err = BlasOps::<f64>::level2(&backend, call).err().unwrap();
        assert_eq!(
            err,
            BlasError::Unsupported {
                routine: Routine::Trmv,
                dtype: DType::F64,
                library: Library::Reference,
                backend: Backend::Host,
            }
        );
    }

    #[test]
    fn test_leading_dimension_checked_at_resolve() {
        let backend = ReferenceBackend::host();
        let call = Level2::<f32>::Gemv {
            trans: Transpose::NoTrans,
            m: 4,
            n: 2,
            alpha: 1.0,
            a: ConstPtr::new(std::ptr::null()),
            lda: 3,
            x: ConstPtr::new(std::ptr::null()),
            incx: 1,
            beta: 0.0,
            y: MutPtr::new(std::ptr::null_mut()),
            incy: 1,
        };
        let err = BlasOps::<f32>::level2(&backend, call).err().unwrap();
        assert!(matches!(err, BlasError::InvalidArgument { argument: "lda", .. }));
    }

    #[test]
    fn test_zero_increment_rejected_outside_level1() {
        assert!(inc(Routine::Gemv, "incx", 0).is_err());
        assert_eq!(len(-3), 0);
        assert!(dim(Routine::Gemm, "m", -1).is_err());
        assert_eq!(ld(Routine::Gemm, "lda", 1, 0).unwrap(), 1);
    }
}
