//! Intel oneMKL through its CBLAS interface.
//!
//! Serves `intelmkl/intelcpu`. Every Level 1/2/3 routine is forwarded for
//! all four element types, plus the strided GEMM batch and the
//! mixed-precision GEMMs. Grouped batches and the TRSM batch run as one
//! CBLAS call per matrix inside a single kernel.
//!
//! Integer arguments are converted to `MKL_INT` at resolve time; a value
//! that does not fit (LP64 builds) is an invalid argument. All other
//! parameter checking is left to MKL.

mod ffi;

use std::os::raw::c_int;

use smallvec::SmallVec;
use vblas_core::{
    Backend, BlasError, BlasScalar, Complex32, Complex64, Kernel, Library, Result, Routine,
};

use crate::backend::{
    Batch, BlasBackend, BlasOps, Extension, ExtensionOps, Level1, Level2, Level3,
};
use ffi::{Cblas, CblasComplex, CblasReal, MklHalf, MklInt};

/// CBLAS-backed Intel CPU backend.
#[derive(Debug, Clone, Default)]
pub struct MklBackend {
    _private: (),
}

impl MklBackend {
    pub fn new() -> Self {
        tracing::debug!(
            ilp64 = cfg!(feature = "mkl-ilp64"),
            "binding Intel oneMKL CBLAS"
        );
        Self { _private: () }
    }
}

impl BlasBackend for MklBackend {
    fn library(&self) -> Library {
        Library::IntelMkl
    }

    fn backend(&self) -> Backend {
        Backend::IntelCpu
    }

    fn name(&self) -> &'static str {
        "Intel oneMKL (CBLAS)"
    }
}

fn int(routine: Routine, argument: &'static str, v: i64) -> Result<MklInt> {
    MklInt::try_from(v).map_err(|_| BlasError::InvalidArgument {
        routine,
        argument,
        reason: format!("{v} does not fit in MKL_INT"),
    })
}

fn offset(routine: Routine, argument: &'static str, v: i64) -> Result<usize> {
    usize::try_from(v).map_err(|_| BlasError::InvalidArgument {
        routine,
        argument,
        reason: format!("stride {v} is negative"),
    })
}

/// Rebind each named `i64` as `MKL_INT`, failing the resolve on overflow.
macro_rules! mkl_ints {
    ($routine:expr; $($v:ident),+ $(,)?) => {
        $(let $v = int($routine, stringify!($v), $v)?;)+
    };
}

fn kernel(f: impl FnOnce() + Send + 'static) -> Result<Kernel> {
    Ok(Box::new(move || {
        f();
        Ok(())
    }))
}

/// Outcome of the type-independent routing step.
enum Routed<C> {
    Done(Kernel),
    Rest(C),
}

// ============================================================================
// Routines common to all element types
// ============================================================================

fn level1_common<T: Cblas>(call: Level1<T>) -> Result<Routed<Level1<T>>> {
    let routine = call.routine();
    let k = match call {
        Level1::Asum { n, x, incx, result } => {
            mkl_ints!(routine; n, incx);
            kernel(move || unsafe { result.get().write(T::asum(n, x.get(), incx)) })?
        }
        Level1::Axpy { n, alpha, x, incx, y, incy } => {
            mkl_ints!(routine; n, incx, incy);
            kernel(move || unsafe { T::axpy(n, alpha, x.get(), incx, y.get(), incy) })?
        }
        Level1::Copy { n, x, incx, y, incy } => {
            mkl_ints!(routine; n, incx, incy);
            kernel(move || unsafe { T::copy(n, x.get(), incx, y.get(), incy) })?
        }
        Level1::Iamax { n, x, incx, result } => {
            mkl_ints!(routine; n, incx);
            kernel(move || unsafe { result.get().write(T::iamax(n, x.get(), incx) as i64) })?
        }
        Level1::Iamin { n, x, incx, result } => {
            mkl_ints!(routine; n, incx);
            kernel(move || unsafe { result.get().write(T::iamin(n, x.get(), incx) as i64) })?
        }
        Level1::Nrm2 { n, x, incx, result } => {
            mkl_ints!(routine; n, incx);
            kernel(move || unsafe { result.get().write(T::nrm2(n, x.get(), incx)) })?
        }
        Level1::Rot { n, x, incx, y, incy, c, s } => {
            mkl_ints!(routine; n, incx, incy);
            kernel(move || unsafe { T::rot(n, x.get(), incx, y.get(), incy, c, s) })?
        }
        Level1::Rotg { a, b, c, s } => {
            kernel(move || unsafe { T::rotg(a.get(), b.get(), c.get(), s.get()) })?
        }
        Level1::Scal { n, alpha, x, incx } => {
            mkl_ints!(routine; n, incx);
            kernel(move || unsafe { T::scal(n, alpha, x.get(), incx) })?
        }
        Level1::Swap { n, x, incx, y, incy } => {
            mkl_ints!(routine; n, incx, incy);
            kernel(move || unsafe { T::swap(n, x.get(), incx, y.get(), incy) })?
        }
        rest => return Ok(Routed::Rest(rest)),
    };
    Ok(Routed::Done(k))
}

fn level2_common<T: Cblas>(call: Level2<T>) -> Result<Routed<Level2<T>>> {
    let routine = call.routine();
    let k = match call {
        Level2::Gbmv { trans, m, n, kl, ku, alpha, a, lda, x, incx, beta, y, incy } => {
            mkl_ints!(routine; m, n, kl, ku, lda, incx, incy);
            kernel(move || unsafe {
                T::gbmv(
                    trans,
                    m,
                    n,
                    kl,
                    ku,
                    alpha,
                    a.get(),
                    lda,
                    x.get(),
                    incx,
                    beta,
                    y.get(),
                    incy,
                )
            })?
        }
        Level2::Gemv { trans, m, n, alpha, a, lda, x, incx, beta, y, incy } => {
            mkl_ints!(routine; m, n, lda, incx, incy);
            kernel(move || unsafe {
                T::gemv(trans, m, n, alpha, a.get(), lda, x.get(), incx, beta, y.get(), incy)
            })?
        }
        Level2::Tbmv { uplo, trans, diag, n, k, a, lda, x, incx } => {
            mkl_ints!(routine; n, k, lda, incx);
            kernel(move || unsafe {
                T::tbmv(uplo, trans, diag, n, k, a.get(), lda, x.get(), incx)
            })?
        }
        Level2::Tbsv { uplo, trans, diag, n, k, a, lda, x, incx } => {
            mkl_ints!(routine; n, k, lda, incx);
            kernel(move || unsafe {
                T::tbsv(uplo, trans, diag, n, k, a.get(), lda, x.get(), incx)
            })?
        }
        Level2::Tpmv { uplo, trans, diag, n, a, x, incx } => {
            mkl_ints!(routine; n, incx);
            kernel(move || unsafe { T::tpmv(uplo, trans, diag, n, a.get(), x.get(), incx) })?
        }
        Level2::Tpsv { uplo, trans, diag, n, a, x, incx } => {
            mkl_ints!(routine; n, incx);
            kernel(move || unsafe { T::tpsv(uplo, trans, diag, n, a.get(), x.get(), incx) })?
        }
        Level2::Trmv { uplo, trans, diag, n, a, lda, x, incx } => {
            mkl_ints!(routine; n, lda, incx);
            kernel(move || unsafe { T::trmv(uplo, trans, diag, n, a.get(), lda, x.get(), incx) })?
        }
        Level2::Trsv { uplo, trans, diag, n, a, lda, x, incx } => {
            mkl_ints!(routine; n, lda, incx);
            kernel(move || unsafe { T::trsv(uplo, trans, diag, n, a.get(), lda, x.get(), incx) })?
        }
        rest => return Ok(Routed::Rest(rest)),
    };
    Ok(Routed::Done(k))
}

fn level3_common<T: Cblas>(call: Level3<T>) -> Result<Routed<Level3<T>>> {
    let routine = call.routine();
    let kern = match call {
        Level3::Gemm { transa, transb, m, n, k, alpha, a, lda, b, ldb, beta, c, ldc } => {
            mkl_ints!(routine; m, n, k, lda, ldb, ldc);
            kernel(move || unsafe {
                T::gemm(
                    transa,
                    transb,
                    m,
                    n,
                    k,
                    alpha,
                    a.get(),
                    lda,
                    b.get(),
                    ldb,
                    beta,
                    c.get(),
                    ldc,
                )
            })?
        }
        Level3::Gemmt { uplo, transa, transb, n, k, alpha, a, lda, b, ldb, beta, c, ldc } => {
            mkl_ints!(routine; n, k, lda, ldb, ldc);
            kernel(move || unsafe {
                T::gemmt(
                    uplo,
                    transa,
                    transb,
                    n,
                    k,
                    alpha,
                    a.get(),
                    lda,
                    b.get(),
                    ldb,
                    beta,
                    c.get(),
                    ldc,
                )
            })?
        }
        Level3::Symm { side, uplo, m, n, alpha, a, lda, b, ldb, beta, c, ldc } => {
            mkl_ints!(routine; m, n, lda, ldb, ldc);
            kernel(move || unsafe {
                T::symm(side, uplo, m, n, alpha, a.get(), lda, b.get(), ldb, beta, c.get(), ldc)
            })?
        }
        Level3::Syr2k { uplo, trans, n, k, alpha, a, lda, b, ldb, beta, c, ldc } => {
            mkl_ints!(routine; n, k, lda, ldb, ldc);
            kernel(move || unsafe {
                T::syr2k(uplo, trans, n, k, alpha, a.get(), lda, b.get(), ldb, beta, c.get(), ldc)
            })?
        }
        Level3::Syrk { uplo, trans, n, k, alpha, a, lda, beta, c, ldc } => {
            mkl_ints!(routine; n, k, lda, ldc);
            kernel(move || unsafe {
                T::syrk(uplo, trans, n, k, alpha, a.get(), lda, beta, c.get(), ldc)
            })?
        }
        Level3::Trmm { side, uplo, trans, diag, m, n, alpha, a, lda, b, ldb } => {
            mkl_ints!(routine; m, n, lda, ldb);
            kernel(move || unsafe {
                T::trmm(side, uplo, trans, diag, m, n, alpha, a.get(), lda, b.get(), ldb)
            })?
        }
        Level3::Trsm { side, uplo, trans, diag, m, n, alpha, a, lda, b, ldb } => {
            mkl_ints!(routine; m, n, lda, ldb);
            kernel(move || unsafe {
                T::trsm(side, uplo, trans, diag, m, n, alpha, a.get(), lda, b.get(), ldb)
            })?
        }
        rest => return Ok(Routed::Rest(rest)),
    };
    Ok(Routed::Done(kern))
}

fn batch<T: Cblas>(call: Batch<T>) -> Result<Kernel> {
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
            mkl_ints!(routine; m, n, k, lda, stride_a, ldb, stride_b, ldc, stride_c, batch_size);
            kernel(move || unsafe {
                T::gemm_batch_strided(
                    transa,
                    transb,
                    m,
                    n,
                    k,
                    alpha,
                    a.get(),
                    lda,
                    stride_a,
                    b.get(),
                    ldb,
                    stride_b,
                    beta,
                    c.get(),
                    ldc,
                    stride_c,
                    batch_size,
                )
            })
        }
        Batch::GemmGroups { groups } => {
            let mut shapes: SmallVec<[[MklInt; 6]; 4]> = SmallVec::with_capacity(groups.len());
            for g in &groups {
                let (m, n, k, lda, ldb, ldc) = (g.m, g.n, g.k, g.lda, g.ldb, g.ldc);
                mkl_ints!(routine; m, n, k, lda, ldb, ldc);
                shapes.push([m, n, k, lda, ldb, ldc]);
            }
            kernel(move || unsafe {
                for (g, &[m, n, k, lda, ldb, ldc]) in groups.iter().zip(&shapes) {
                    for ((a, b), c) in g.a.iter().zip(&g.b).zip(&g.c) {
                        T::gemm(
                            g.transa,
                            g.transb,
                            m,
                            n,
                            k,
                            g.alpha,
                            a.get(),
                            lda,
                            b.get(),
                            ldb,
                            g.beta,
                            c.get(),
                            ldc,
                        );
                    }
                }
            })
        }
        Batch::TrsmStrided {
            side,
            uplo,
            trans,
            diag,
            m,
            n,
            alpha,
            a,
            lda,
            stride_a,
            b,
            ldb,
            stride_b,
            batch_size,
        } => {
            mkl_ints!(routine; m, n, lda, ldb);
            let sa = offset(routine, "stride_a", stride_a)?;
            let sb = offset(routine, "stride_b", stride_b)?;
            let count = usize::try_from(batch_size).unwrap_or(0);
            kernel(move || unsafe {
                for i in 0..count {
                    T::trsm(
                        side,
                        uplo,
                        trans,
                        diag,
                        m,
                        n,
                        alpha,
                        a.add(i * sa).get(),
                        lda,
                        b.add(i * sb).get(),
                        ldb,
                    );
                }
            })
        }
        Batch::AxpyGroups { groups } => {
            let mut shapes: SmallVec<[[MklInt; 3]; 4]> = SmallVec::with_capacity(groups.len());
            for g in &groups {
                let (n, incx, incy) = (g.n, g.incx, g.incy);
                mkl_ints!(routine; n, incx, incy);
                shapes.push([n, incx, incy]);
            }
            kernel(move || unsafe {
                for (g, &[n, incx, incy]) in groups.iter().zip(&shapes) {
                    for (x, y) in g.x.iter().zip(&g.y) {
                        T::axpy(n, g.alpha, x.get(), incx, y.get(), incy);
                    }
                }
            })
        }
    }
}

// ============================================================================
// Real and complex families
// ============================================================================

fn level1_real<T: CblasReal>(backend: &MklBackend, call: Level1<T>) -> Result<Kernel> {
    let call = match level1_common(call)? {
        Routed::Done(k) => return Ok(k),
        Routed::Rest(call) => call,
    };
    let routine = call.routine();
    match call {
        Level1::Dot { n, x, incx, y, incy, result } => {
            mkl_ints!(routine; n, incx, incy);
            kernel(move || unsafe { result.get().write(T::dot(n, x.get(), incx, y.get(), incy)) })
        }
        Level1::Rotm { n, x, incx, y, incy, param } => {
            mkl_ints!(routine; n, incx, incy);
            kernel(move || unsafe { T::rotm(n, x.get(), incx, y.get(), incy, param.get()) })
        }
        Level1::Rotmg { d1, d2, x1, y1, param } => {
            kernel(move || unsafe { T::rotmg(d1.get(), d2.get(), x1.get(), y1, param.get()) })
        }
        other => Err(backend.unsupported(other.routine(), T::DTYPE)),
    }
}

fn level1_complex<T: CblasComplex>(backend: &MklBackend, call: Level1<T>) -> Result<Kernel> {
    let call = match level1_common(call)? {
        Routed::Done(k) => return Ok(k),
        Routed::Rest(call) => call,
    };
    let routine = call.routine();
    match call {
        Level1::Dotc { n, x, incx, y, incy, result } => {
            mkl_ints!(routine; n, incx, incy);
            kernel(move || unsafe { T::dotc(n, x.get(), incx, y.get(), incy, result.get()) })
        }
        Level1::Dotu { n, x, incx, y, incy, result } => {
            mkl_ints!(routine; n, incx, incy);
            kernel(move || unsafe { T::dotu(n, x.get(), incx, y.get(), incy, result.get()) })
        }
        Level1::ScalReal { n, alpha, x, incx } => {
            mkl_ints!(routine; n, incx);
            kernel(move || unsafe { T::scal_real(n, alpha, x.get(), incx) })
        }
        other => Err(backend.unsupported(other.routine(), T::DTYPE)),
    }
}

fn level2_real<T: CblasReal>(backend: &MklBackend, call: Level2<T>) -> Result<Kernel> {
    let call = match level2_common(call)? {
        Routed::Done(k) => return Ok(k),
        Routed::Rest(call) => call,
    };
    let routine = call.routine();
    match call {
        Level2::Ger { m, n, alpha, x, incx, y, incy, a, lda } => {
            mkl_ints!(routine; m, n, incx, incy, lda);
            kernel(move || unsafe {
                T::ger(m, n, alpha, x.get(), incx, y.get(), incy, a.get(), lda)
            })
        }
        Level2::Sbmv { uplo, n, k, alpha, a, lda, x, incx, beta, y, incy } => {
            mkl_ints!(routine; n, k, lda, incx, incy);
            kernel(move || unsafe {
                T::sbmv(uplo, n, k, alpha, a.get(), lda, x.get(), incx, beta, y.get(), incy)
            })
        }
        Level2::Spmv { uplo, n, alpha, a, x, incx, beta, y, incy } => {
            mkl_ints!(routine; n, incx, incy);
            kernel(move || unsafe {
                T::spmv(uplo, n, alpha, a.get(), x.get(), incx, beta, y.get(), incy)
            })
        }
        Level2::Spr { uplo, n, alpha, x, incx, a } => {
            mkl_ints!(routine; n, incx);
            kernel(move || unsafe { T::spr(uplo, n, alpha, x.get(), incx, a.get()) })
        }
        Level2::Spr2 { uplo, n, alpha, x, incx, y, incy, a } => {
            mkl_ints!(routine; n, incx, incy);
            kernel(move || unsafe {
                T::spr2(uplo, n, alpha, x.get(), incx, y.get(), incy, a.get())
            })
        }
        Level2::Symv { uplo, n, alpha, a, lda, x, incx, beta, y, incy } => {
            mkl_ints!(routine; n, lda, incx, incy);
            kernel(move || unsafe {
                T::symv(uplo, n, alpha, a.get(), lda, x.get(), incx, beta, y.get(), incy)
            })
        }
        Level2::Syr { uplo, n, alpha, x, incx, a, lda } => {
            mkl_ints!(routine; n, incx, lda);
            kernel(move || unsafe { T::syr(uplo, n, alpha, x.get(), incx, a.get(), lda) })
        }
        Level2::Syr2 { uplo, n, alpha, x, incx, y, incy, a, lda } => {
            mkl_ints!(routine; n, incx, incy, lda);
            kernel(move || unsafe {
                T::syr2(uplo, n, alpha, x.get(), incx, y.get(), incy, a.get(), lda)
            })
        }
        other => Err(backend.unsupported(other.routine(), T::DTYPE)),
    }
}

fn level2_complex<T: CblasComplex>(backend: &MklBackend, call: Level2<T>) -> Result<Kernel> {
    let call = match level2_common(call)? {
        Routed::Done(k) => return Ok(k),
        Routed::Rest(call) => call,
    };
    let routine = call.routine();
    match call {
        Level2::Gerc { m, n, alpha, x, incx, y, incy, a, lda } => {
            mkl_ints!(routine; m, n, incx, incy, lda);
            kernel(move || unsafe {
                T::gerc(m, n, alpha, x.get(), incx, y.get(), incy, a.get(), lda)
            })
        }
        Level2::Geru { m, n, alpha, x, incx, y, incy, a, lda } => {
            mkl_ints!(routine; m, n, incx, incy, lda);
            kernel(move || unsafe {
                T::geru(m, n, alpha, x.get(), incx, y.get(), incy, a.get(), lda)
            })
        }
        Level2::Hbmv { uplo, n, k, alpha, a, lda, x, incx, beta, y, incy } => {
            mkl_ints!(routine; n, k, lda, incx, incy);
            kernel(move || unsafe {
                T::hbmv(uplo, n, k, alpha, a.get(), lda, x.get(), incx, beta, y.get(), incy)
            })
        }
        Level2::Hemv { uplo, n, alpha, a, lda, x, incx, beta, y, incy } => {
            mkl_ints!(routine; n, lda, incx, incy);
            kernel(move || unsafe {
                T::hemv(uplo, n, alpha, a.get(), lda, x.get(), incx, beta, y.get(), incy)
            })
        }
        Level2::Her { uplo, n, alpha, x, incx, a, lda } => {
            mkl_ints!(routine; n, incx, lda);
            kernel(move || unsafe { T::her(uplo, n, alpha, x.get(), incx, a.get(), lda) })
        }
        Level2::Her2 { uplo, n, alpha, x, incx, y, incy, a, lda } => {
            mkl_ints!(routine; n, incx, incy, lda);
            kernel(move || unsafe {
                T::her2(uplo, n, alpha, x.get(), incx, y.get(), incy, a.get(), lda)
            })
        }
        Level2::Hpmv { uplo, n, alpha, a, x, incx, beta, y, incy } => {
            mkl_ints!(routine; n, incx, incy);
            kernel(move || unsafe {
                T::hpmv(uplo, n, alpha, a.get(), x.get(), incx, beta, y.get(), incy)
            })
        }
        Level2::Hpr { uplo, n, alpha, x, incx, a } => {
            mkl_ints!(routine; n, incx);
            kernel(move || unsafe { T::hpr(uplo, n, alpha, x.get(), incx, a.get()) })
        }
        Level2::Hpr2 { uplo, n, alpha, x, incx, y, incy, a } => {
            mkl_ints!(routine; n, incx, incy);
            kernel(move || unsafe {
                T::hpr2(uplo, n, alpha, x.get(), incx, y.get(), incy, a.get())
            })
        }
        other => Err(backend.unsupported(other.routine(), T::DTYPE)),
    }
}

fn level3_complex<T: CblasComplex>(backend: &MklBackend, call: Level3<T>) -> Result<Kernel> {
    let call = match level3_common(call)? {
        Routed::Done(k) => return Ok(k),
        Routed::Rest(call) => call,
    };
    let routine = call.routine();
    match call {
        Level3::Hemm { side, uplo, m, n, alpha, a, lda, b, ldb, beta, c, ldc } => {
            mkl_ints!(routine; m, n, lda, ldb, ldc);
            kernel(move || unsafe {
                T::hemm(side, uplo, m, n, alpha, a.get(), lda, b.get(), ldb, beta, c.get(), ldc)
            })
        }
        Level3::Herk { uplo, trans, n, k, alpha, a, lda, beta, c, ldc } => {
            mkl_ints!(routine; n, k, lda, ldc);
            kernel(move || unsafe {
                T::herk(uplo, trans, n, k, alpha, a.get(), lda, beta, c.get(), ldc)
            })
        }
        Level3::Her2k { uplo, trans, n, k, alpha, a, lda, b, ldb, beta, c, ldc } => {
            mkl_ints!(routine; n, k, lda, ldb, ldc);
            kernel(move || unsafe {
                T::her2k(uplo, trans, n, k, alpha, a.get(), lda, b.get(), ldb, beta, c.get(), ldc)
            })
        }
        other => Err(backend.unsupported(other.routine(), T::DTYPE)),
    }
}

macro_rules! impl_real_ops {
    ($($t:ty),+) => {$(
        impl BlasOps<$t> for MklBackend {
            fn level1(&self, call: Level1<$t>) -> Result<Kernel> {
                level1_real(self, call)
            }

            fn level2(&self, call: Level2<$t>) -> Result<Kernel> {
                level2_real(self, call)
            }

            fn level3(&self, call: Level3<$t>) -> Result<Kernel> {
                match level3_common(call)? {
                    Routed::Done(k) => Ok(k),
                    Routed::Rest(other) => {
                        Err(self.unsupported(other.routine(), <$t as BlasScalar>::DTYPE))
                    }
                }
            }

            fn batch(&self, call: Batch<$t>) -> Result<Kernel> {
                batch(call)
            }
        }
    )+};
}

macro_rules! impl_complex_ops {
    ($($t:ty),+) => {$(
        impl BlasOps<$t> for MklBackend {
            fn level1(&self, call: Level1<$t>) -> Result<Kernel> {
                level1_complex(self, call)
            }

            fn level2(&self, call: Level2<$t>) -> Result<Kernel> {
                level2_complex(self, call)
            }

            fn level3(&self, call: Level3<$t>) -> Result<Kernel> {
                level3_complex(self, call)
            }

            fn batch(&self, call: Batch<$t>) -> Result<Kernel> {
                batch(call)
            }
        }
    )+};
}

impl_real_ops!(f32, f64);
impl_complex_ops!(Complex32, Complex64);

// ============================================================================
// Mixed precision
// ============================================================================

impl ExtensionOps for MklBackend {
    fn extension(&self, call: Extension) -> Result<Kernel> {
        let routine = call.routine();
        let layout = ffi::col_major();
        match call {
            Extension::GemmF16 { transa, transb, m, n, k, alpha, a, lda, b, ldb, beta, c, ldc } => {
                mkl_ints!(routine; m, n, k, lda, ldb, ldc);
                let (ta, tb) = (transa as c_int, transb as c_int);
                kernel(move || unsafe {
                    ffi::cblas_hgemm(
                        layout,
                        ta,
                        tb,
                        m,
                        n,
                        k,
                        alpha.to_bits(),
                        a.get().cast::<MklHalf>(),
                        lda,
                        b.get().cast::<MklHalf>(),
                        ldb,
                        beta.to_bits(),
                        c.get().cast::<MklHalf>(),
                        ldc,
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
                mkl_ints!(routine; m, n, k, lda, ldb, ldc);
                let (ta, tb) = (transa as c_int, transb as c_int);
                kernel(move || unsafe {
                    ffi::cblas_gemm_f16f16f32(
                        layout,
                        ta,
                        tb,
                        m,
                        n,
                        k,
                        alpha,
                        a.get().cast::<MklHalf>(),
                        lda,
                        b.get().cast::<MklHalf>(),
                        ldb,
                        beta,
                        c.get(),
                        ldc,
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
                mkl_ints!(routine; m, n, k, lda, ldb, ldc);
                let (ta, tb) = (transa as c_int, transb as c_int);
                kernel(move || unsafe {
                    ffi::cblas_gemm_bf16bf16f32(
                        layout,
                        ta,
                        tb,
                        m,
                        n,
                        k,
                        alpha,
                        a.get().cast::<MklHalf>(),
                        lda,
                        b.get().cast::<MklHalf>(),
                        ldb,
                        beta,
                        c.get(),
                        ldc,
                    )
                })
            }
            Extension::GemmS8U8S32 {
                transa,
                transb,
                offsetc,
                m,
                n,
                k,
                alpha,
                a,
                lda,
                ao,
                b,
                ldb,
                bo,
                beta,
                c,
                ldc,
                co,
            } => {
                mkl_ints!(routine; m, n, k, lda, ldb, ldc);
                let (ta, tb, oc) = (transa as c_int, transb as c_int, offsetc as c_int);
                // MKL declares `bo` as MKL_INT8; the bit pattern is passed through.
                let bo = bo as i8;
                kernel(move || unsafe {
                    ffi::cblas_gemm_s8u8s32(
                        layout,
                        ta,
                        tb,
                        oc,
                        m,
                        n,
                        k,
                        alpha,
                        a.get(),
                        lda,
                        ao,
                        b.get(),
                        ldb,
                        bo,
                        beta,
                        c.get(),
                        ldc,
                        co.get(),
                    )
                })
            }
            Extension::Sdsdot { n, sb, x, incx, y, incy, result } => {
                mkl_ints!(routine; n, incx, incy);
                kernel(move || unsafe {
                    result
                        .get()
                        .write(ffi::cblas_sdsdot(n, sb, x.get(), incx, y.get(), incy))
                })
            }
            Extension::DotF32F64 { n, x, incx, y, incy, result } => {
                mkl_ints!(routine; n, incx, incy);
                kernel(move || unsafe {
                    result.get().write(ffi::cblas_dsdot(n, x.get(), incx, y.get(), incy))
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let backend = MklBackend::new();
        assert_eq!(backend.library(), Library::IntelMkl);
        assert_eq!(backend.backend(), Backend::IntelCpu);
        assert!(Library::IntelMkl.targets(backend.backend()));
    }

    #[cfg(not(feature = "mkl-ilp64"))]
    #[test]
    fn test_lp64_overflow_rejected() {
        let err = int(Routine::Gemm, "m", i64::from(i32::MAX) + 1).unwrap_err();
        assert!(matches!(err, BlasError::InvalidArgument { argument: "m", .. }));
        assert_eq!(int(Routine::Gemm, "m", 7).unwrap(), 7);
    }

    #[test]
    fn test_real_only_routine_rejected_for_complex() {
        let backend = MklBackend::new();
        let call = Level1::<Complex64>::Rotmg {
            d1: vblas_core::MutPtr::new(std::ptr::null_mut()),
            d2: vblas_core::MutPtr::new(std::ptr::null_mut()),
            x1: vblas_core::MutPtr::new(std::ptr::null_mut()),
            y1: Complex64::new(0.0, 0.0),
            param: vblas_core::MutPtr::new(std::ptr::null_mut()),
        };
        let err = BlasOps::<Complex64>::level1(&backend, call).err().unwrap();
        assert!(matches!(err, BlasError::Unsupported { routine: Routine::Rotmg, .. }));
    }

    #[test]
    fn test_complex_only_level3_rejected_for_real() {
        let backend = MklBackend::new();
        let call = Level3::<f64>::Hemm {
            side: vblas_core::Side::Left,
            uplo: vblas_core::Uplo::Upper,
            m: 2,
            n: 2,
            alpha: 1.0,
            a: vblas_core::ConstPtr::new(std::ptr::null()),
            lda: 2,
            b: vblas_core::ConstPtr::new(std::ptr::null()),
            ldb: 2,
            beta: 0.0,
            c: vblas_core::MutPtr::new(std::ptr::null_mut()),
            ldc: 2,
        };
        let err = BlasOps::<f64>::level3(&backend, call).err().unwrap();
        assert_eq!(
            err,
            BlasError::Unsupported {
                routine: Routine::Hemm,
                dtype: vblas_core::DType::F64,
                library: Library::IntelMkl,
                backend: Backend::IntelCpu,
            }
        );
    }

    #[test]
    fn test_negative_trsm_batch_stride_rejected() {
        let call = Batch::<f64>::TrsmStrided {
            side: vblas_core::Side::Left,
            uplo: vblas_core::Uplo::Lower,
            trans: vblas_core::Transpose::NoTrans,
            diag: vblas_core::Diag::NonUnit,
            m: 2,
            n: 2,
            alpha: 1.0,
            a: vblas_core::ConstPtr::new(std::ptr::null()),
            lda: 2,
            stride_a: -4,
            b: vblas_core::MutPtr::new(std::ptr::null_mut()),
            ldb: 2,
            stride_b: 4,
            batch_size: 1,
        };
        assert!(batch(call).is_err());
    }
}
