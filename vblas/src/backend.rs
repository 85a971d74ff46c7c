//! Backend capability interface.
//!
//! A backend implementation serves one `(Library, Backend)` tag. The router
//! packs every call into the family enum below and asks the backend for a
//! [`Kernel`]; a backend that has no implementation answers with
//! [`BlasError::Unsupported`] before anything reaches the queue.
//!
//! Arguments are forwarded exactly as the caller passed them: column-major,
//! BLAS increments (negative allowed), leading dimensions, scalars.

use vblas_core::{
    bf16, f16, BlasError, BlasScalar, ConstPtr, DType, Diag, Kernel, Library, MutPtr, Offset,
    Result, Routine, Side, Tag, Transpose, Uplo,
};

type Real<T> = <T as BlasScalar>::Real;

// ============================================================================
// Level 1: vector-vector
// ============================================================================

/// Level 1 call for element type `T`.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy)]
pub enum Level1<T: BlasScalar> {
    /// result = sum |re(x_i)| + |im(x_i)|
    Asum { n: i64, x: ConstPtr<T>, incx: i64, result: MutPtr<Real<T>> },
    /// y = alpha * x + y
    Axpy { n: i64, alpha: T, x: ConstPtr<T>, incx: i64, y: MutPtr<T>, incy: i64 },
    Copy { n: i64, x: ConstPtr<T>, incx: i64, y: MutPtr<T>, incy: i64 },
    /// result = x^T * y (real types)
    Dot { n: i64, x: ConstPtr<T>, incx: i64, y: ConstPtr<T>, incy: i64, result: MutPtr<T> },
    /// result = x^H * y
    Dotc { n: i64, x: ConstPtr<T>, incx: i64, y: ConstPtr<T>, incy: i64, result: MutPtr<T> },
    /// result = x^T * y (complex types)
    Dotu { n: i64, x: ConstPtr<T>, incx: i64, y: ConstPtr<T>, incy: i64, result: MutPtr<T> },
    /// Zero-based index of the first element of largest magnitude.
    Iamax { n: i64, x: ConstPtr<T>, incx: i64, result: MutPtr<i64> },
    Iamin { n: i64, x: ConstPtr<T>, incx: i64, result: MutPtr<i64> },
    Nrm2 { n: i64, x: ConstPtr<T>, incx: i64, result: MutPtr<Real<T>> },
    /// Plane rotation with real cosine and sine.
    Rot { n: i64, x: MutPtr<T>, incx: i64, y: MutPtr<T>, incy: i64, c: Real<T>, s: Real<T> },
    Rotg { a: MutPtr<T>, b: MutPtr<T>, c: MutPtr<Real<T>>, s: MutPtr<T> },
    Rotm { n: i64, x: MutPtr<T>, incx: i64, y: MutPtr<T>, incy: i64, param: ConstPtr<T> },
    Rotmg { d1: MutPtr<T>, d2: MutPtr<T>, x1: MutPtr<T>, y1: T, param: MutPtr<T> },
    Scal { n: i64, alpha: T, x: MutPtr<T>, incx: i64 },
    /// Complex vector scaled by a real scalar.
    ScalReal { n: i64, alpha: Real<T>, x: MutPtr<T>, incx: i64 },
    Swap { n: i64, x: MutPtr<T>, incx: i64, y: MutPtr<T>, incy: i64 },
}

impl<T: BlasScalar> Level1<T> {
    pub fn routine(&self) -> Routine {
        match self {
            Level1::Asum { .. } => Routine::Asum,
            Level1::Axpy { .. } => Routine::Axpy,
            Level1::Copy { .. } => Routine::Copy,
            Level1::Dot { .. } => Routine::Dot,
            Level1::Dotc { .. } => Routine::Dotc,
            Level1::Dotu { .. } => Routine::Dotu,
            Level1::Iamax { .. } => Routine::Iamax,
            Level1::Iamin { .. } => Routine::Iamin,
            Level1::Nrm2 { .. } => Routine::Nrm2,
            Level1::Rot { .. } => Routine::Rot,
            Level1::Rotg { .. } => Routine::Rotg,
            Level1::Rotm { .. } => Routine::Rotm,
            Level1::Rotmg { .. } => Routine::Rotmg,
            Level1::Scal { .. } | Level1::ScalReal { .. } => Routine::Scal,
            Level1::Swap { .. } => Routine::Swap,
        }
    }
}

// ============================================================================
// Level 2: matrix-vector
// ============================================================================

/// Level 2 call for element type `T`. Packed variants (`hp*`, `sp*`, `tp*`)
/// take `n * (n + 1) / 2` elements and no leading dimension.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy)]
pub enum Level2<T: BlasScalar> {
    Gbmv {
        trans: Transpose, m: i64, n: i64, kl: i64, ku: i64, alpha: T,
        a: ConstPtr<T>, lda: i64, x: ConstPtr<T>, incx: i64, beta: T, y: MutPtr<T>, incy: i64,
    },
    Gemv {
        trans: Transpose, m: i64, n: i64, alpha: T, a: ConstPtr<T>, lda: i64,
        x: ConstPtr<T>, incx: i64, beta: T, y: MutPtr<T>, incy: i64,
    },
    Ger {
        m: i64, n: i64, alpha: T, x: ConstPtr<T>, incx: i64, y: ConstPtr<T>, incy: i64,
        a: MutPtr<T>, lda: i64,
    },
    Gerc {
        m: i64, n: i64, alpha: T, x: ConstPtr<T>, incx: i64, y: ConstPtr<T>, incy: i64,
        a: MutPtr<T>, lda: i64,
    },
    Geru {
        m: i64, n: i64, alpha: T, x: ConstPtr<T>, incx: i64, y: ConstPtr<T>, incy: i64,
        a: MutPtr<T>, lda: i64,
    },
    Hbmv {
        uplo: Uplo, n: i64, k: i64, alpha: T, a: ConstPtr<T>, lda: i64,
        x: ConstPtr<T>, incx: i64, beta: T, y: MutPtr<T>, incy: i64,
    },
    Hemv {
        uplo: Uplo, n: i64, alpha: T, a: ConstPtr<T>, lda: i64,
        x: ConstPtr<T>, incx: i64, beta: T, y: MutPtr<T>, incy: i64,
    },
    Her { uplo: Uplo, n: i64, alpha: Real<T>, x: ConstPtr<T>, incx: i64, a: MutPtr<T>, lda: i64 },
    Her2 {
        uplo: Uplo, n: i64, alpha: T, x: ConstPtr<T>, incx: i64, y: ConstPtr<T>, incy: i64,
        a: MutPtr<T>, lda: i64,
    },
    Hpmv {
        uplo: Uplo, n: i64, alpha: T, a: ConstPtr<T>, x: ConstPtr<T>, incx: i64,
        beta: T, y: MutPtr<T>, incy: i64,
    },
    Hpr { uplo: Uplo, n: i64, alpha: Real<T>, x: ConstPtr<T>, incx: i64, a: MutPtr<T> },
    Hpr2 {
        uplo: Uplo, n: i64, alpha: T, x: ConstPtr<T>, incx: i64, y: ConstPtr<T>, incy: i64,
        a: MutPtr<T>,
    },
    Sbmv {
        uplo: Uplo, n: i64, k: i64, alpha: T, a: ConstPtr<T>, lda: i64,
        x: ConstPtr<T>, incx: i64, beta: T, y: MutPtr<T>, incy: i64,
    },
    Spmv {
        uplo: Uplo, n: i64, alpha: T, a: ConstPtr<T>, x: ConstPtr<T>, incx: i64,
        beta: T, y: MutPtr<T>, incy: i64,
    },
    Spr { uplo: Uplo, n: i64, alpha: T, x: ConstPtr<T>, incx: i64, a: MutPtr<T> },
    Spr2 {
        uplo: Uplo, n: i64, alpha: T, x: ConstPtr<T>, incx: i64, y: ConstPtr<T>, incy: i64,
        a: MutPtr<T>,
    },
    Symv {
        uplo: Uplo, n: i64, alpha: T, a: ConstPtr<T>, lda: i64,
        x: ConstPtr<T>, incx: i64, beta: T, y: MutPtr<T>, incy: i64,
    },
    Syr { uplo: Uplo, n: i64, alpha: T, x: ConstPtr<T>, incx: i64, a: MutPtr<T>, lda: i64 },
    Syr2 {
        uplo: Uplo, n: i64, alpha: T, x: ConstPtr<T>, incx: i64, y: ConstPtr<T>, incy: i64,
        a: MutPtr<T>, lda: i64,
    },
    Tbmv {
        uplo: Uplo, trans: Transpose, diag: Diag, n: i64, k: i64, a: ConstPtr<T>, lda: i64,
        x: MutPtr<T>, incx: i64,
    },
    Tbsv {
        uplo: Uplo, trans: Transpose, diag: Diag, n: i64, k: i64, a: ConstPtr<T>, lda: i64,
        x: MutPtr<T>, incx: i64,
    },
    Tpmv {
        uplo: Uplo, trans: Transpose, diag: Diag, n: i64, a: ConstPtr<T>, x: MutPtr<T>, incx: i64,
    },
    Tpsv {
        uplo: Uplo, trans: Transpose, diag: Diag, n: i64, a: ConstPtr<T>, x: MutPtr<T>, incx: i64,
    },
    Trmv {
        uplo: Uplo, trans: Transpose, diag: Diag, n: i64, a: ConstPtr<T>, lda: i64,
        x: MutPtr<T>, incx: i64,
    },
    Trsv {
        uplo: Uplo, trans: Transpose, diag: Diag, n: i64, a: ConstPtr<T>, lda: i64,
        x: MutPtr<T>, incx: i64,
    },
}

impl<T: BlasScalar> Level2<T> {
    pub fn routine(&self) -> Routine {
        match self {
            Level2::Gbmv { .. } => Routine::Gbmv,
            Level2::Gemv { .. } => Routine::Gemv,
            Level2::Ger { .. } => Routine::Ger,
            Level2::Gerc { .. } => Routine::Gerc,
            Level2::Geru { .. } => Routine::Geru,
            Level2::Hbmv { .. } => Routine::Hbmv,
            Level2::Hemv { .. } => Routine::Hemv,
            Level2::Her { .. } => Routine::Her,
            Level2::Her2 { .. } => Routine::Her2,
            Level2::Hpmv { .. } => Routine::Hpmv,
            Level2::Hpr { .. } => Routine::Hpr,
            Level2::Hpr2 { .. } => Routine::Hpr2,
            Level2::Sbmv { .. } => Routine::Sbmv,
            Level2::Spmv { .. } => Routine::Spmv,
            Level2::Spr { .. } => Routine::Spr,
            Level2::Spr2 { .. } => Routine::Spr2,
            Level2::Symv { .. } => Routine::Symv,
            Level2::Syr { .. } => Routine::Syr,
            Level2::Syr2 { .. } => Routine::Syr2,
            Level2::Tbmv { .. } => Routine::Tbmv,
            Level2::Tbsv { .. } => Routine::Tbsv,
            Level2::Tpmv { .. } => Routine::Tpmv,
            Level2::Tpsv { .. } => Routine::Tpsv,
            Level2::Trmv { .. } => Routine::Trmv,
            Level2::Trsv { .. } => Routine::Trsv,
        }
    }
}

// ============================================================================
// Level 3: matrix-matrix
// ============================================================================

/// Level 3 call for element type `T`.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy)]
pub enum Level3<T: BlasScalar> {
    Gemm {
        transa: Transpose, transb: Transpose, m: i64, n: i64, k: i64, alpha: T,
        a: ConstPtr<T>, lda: i64, b: ConstPtr<T>, ldb: i64, beta: T, c: MutPtr<T>, ldc: i64,
    },
    /// GEMM updating only the `uplo` triangle of the `n x n` result.
    Gemmt {
        uplo: Uplo, transa: Transpose, transb: Transpose, n: i64, k: i64, alpha: T,
        a: ConstPtr<T>, lda: i64, b: ConstPtr<T>, ldb: i64, beta: T, c: MutPtr<T>, ldc: i64,
    },
    Hemm {
        side: Side, uplo: Uplo, m: i64, n: i64, alpha: T, a: ConstPtr<T>, lda: i64,
        b: ConstPtr<T>, ldb: i64, beta: T, c: MutPtr<T>, ldc: i64,
    },
    Her2k {
        uplo: Uplo, trans: Transpose, n: i64, k: i64, alpha: T, a: ConstPtr<T>, lda: i64,
        b: ConstPtr<T>, ldb: i64, beta: Real<T>, c: MutPtr<T>, ldc: i64,
    },
    Herk {
        uplo: Uplo, trans: Transpose, n: i64, k: i64, alpha: Real<T>, a: ConstPtr<T>, lda: i64,
        beta: Real<T>, c: MutPtr<T>, ldc: i64,
    },
    Symm {
        side: Side, uplo: Uplo, m: i64, n: i64, alpha: T, a: ConstPtr<T>, lda: i64,
        b: ConstPtr<T>, ldb: i64, beta: T, c: MutPtr<T>, ldc: i64,
    },
    Syr2k {
        uplo: Uplo, trans: Transpose, n: i64, k: i64, alpha: T, a: ConstPtr<T>, lda: i64,
        b: ConstPtr<T>, ldb: i64, beta: T, c: MutPtr<T>, ldc: i64,
    },
    Syrk {
        uplo: Uplo, trans: Transpose, n: i64, k: i64, alpha: T, a: ConstPtr<T>, lda: i64,
        beta: T, c: MutPtr<T>, ldc: i64,
    },
    Trmm {
        side: Side, uplo: Uplo, trans: Transpose, diag: Diag, m: i64, n: i64, alpha: T,
        a: ConstPtr<T>, lda: i64, b: MutPtr<T>, ldb: i64,
    },
    Trsm {
        side: Side, uplo: Uplo, trans: Transpose, diag: Diag, m: i64, n: i64, alpha: T,
        a: ConstPtr<T>, lda: i64, b: MutPtr<T>, ldb: i64,
    },
}

impl<T: BlasScalar> Level3<T> {
    pub fn routine(&self) -> Routine {
        match self {
            Level3::Gemm { .. } => Routine::Gemm,
            Level3::Gemmt { .. } => Routine::Gemmt,
            Level3::Hemm { .. } => Routine::Hemm,
            Level3::Her2k { .. } => Routine::Her2k,
            Level3::Herk { .. } => Routine::Herk,
            Level3::Symm { .. } => Routine::Symm,
            Level3::Syr2k { .. } => Routine::Syr2k,
            Level3::Syrk { .. } => Routine::Syrk,
            Level3::Trmm { .. } => Routine::Trmm,
            Level3::Trsm { .. } => Routine::Trsm,
        }
    }
}

// ============================================================================
// Batch
// ============================================================================

/// One group of a grouped GEMM batch: shared parameters, one pointer triple
/// per matrix.
#[derive(Debug, Clone)]
pub struct GemmGroup<T: BlasScalar> {
    pub transa: Transpose,
    pub transb: Transpose,
    pub m: i64,
    pub n: i64,
    pub k: i64,
    pub alpha: T,
    pub lda: i64,
    pub ldb: i64,
    pub beta: T,
    pub ldc: i64,
    pub a: Vec<ConstPtr<T>>,
    pub b: Vec<ConstPtr<T>>,
    pub c: Vec<MutPtr<T>>,
}

impl<T: BlasScalar> GemmGroup<T> {
    pub fn size(&self) -> usize {
        self.c.len()
    }
}

/// One group of a grouped AXPY batch.
#[derive(Debug, Clone)]
pub struct AxpyGroup<T: BlasScalar> {
    pub n: i64,
    pub alpha: T,
    pub incx: i64,
    pub incy: i64,
    pub x: Vec<ConstPtr<T>>,
    pub y: Vec<MutPtr<T>>,
}

impl<T: BlasScalar> AxpyGroup<T> {
    pub fn size(&self) -> usize {
        self.y.len()
    }
}

/// Batched call for element type `T`.
#[rustfmt::skip]
#[derive(Debug, Clone)]
pub enum Batch<T: BlasScalar> {
    /// Matrices at fixed strides from one base pointer per operand.
    GemmStrided {
        transa: Transpose, transb: Transpose, m: i64, n: i64, k: i64, alpha: T,
        a: ConstPtr<T>, lda: i64, stride_a: i64, b: ConstPtr<T>, ldb: i64, stride_b: i64,
        beta: T, c: MutPtr<T>, ldc: i64, stride_c: i64, batch_size: i64,
    },
    GemmGroups { groups: Vec<GemmGroup<T>> },
    TrsmStrided {
        side: Side, uplo: Uplo, trans: Transpose, diag: Diag, m: i64, n: i64, alpha: T,
        a: ConstPtr<T>, lda: i64, stride_a: i64, b: MutPtr<T>, ldb: i64, stride_b: i64,
        batch_size: i64,
    },
    AxpyGroups { groups: Vec<AxpyGroup<T>> },
}

impl<T: BlasScalar> Batch<T> {
    pub fn routine(&self) -> Routine {
        match self {
            Batch::GemmStrided { .. } | Batch::GemmGroups { .. } => Routine::GemmBatch,
            Batch::TrsmStrided { .. } => Routine::TrsmBatch,
            Batch::AxpyGroups { .. } => Routine::AxpyBatch,
        }
    }
}

// ============================================================================
// Mixed-precision extensions
// ============================================================================

/// Calls whose operand types differ from their result type.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy)]
pub enum Extension {
    /// Half precision in and out.
    GemmF16 {
        transa: Transpose, transb: Transpose, m: i64, n: i64, k: i64, alpha: f16,
        a: ConstPtr<f16>, lda: i64, b: ConstPtr<f16>, ldb: i64, beta: f16, c: MutPtr<f16>, ldc: i64,
    },
    /// Half inputs, single-precision accumulation and output.
    GemmF16F32 {
        transa: Transpose, transb: Transpose, m: i64, n: i64, k: i64, alpha: f32,
        a: ConstPtr<f16>, lda: i64, b: ConstPtr<f16>, ldb: i64, beta: f32, c: MutPtr<f32>, ldc: i64,
    },
    GemmBf16F32 {
        transa: Transpose, transb: Transpose, m: i64, n: i64, k: i64, alpha: f32,
        a: ConstPtr<bf16>, lda: i64, b: ConstPtr<bf16>, ldb: i64,
        beta: f32, c: MutPtr<f32>, ldc: i64,
    },
    /// C = alpha * (op(A) - ao)(op(B) - bo) + beta * C + co
    GemmS8U8S32 {
        transa: Transpose, transb: Transpose, offsetc: Offset, m: i64, n: i64, k: i64, alpha: f32,
        a: ConstPtr<i8>, lda: i64, ao: i8, b: ConstPtr<u8>, ldb: i64, bo: u8,
        beta: f32, c: MutPtr<i32>, ldc: i64, co: ConstPtr<i32>,
    },
    /// result = sb + x^T * y, accumulated in double precision.
    Sdsdot {
        n: i64, sb: f32, x: ConstPtr<f32>, incx: i64, y: ConstPtr<f32>, incy: i64,
        result: MutPtr<f32>,
    },
    /// Single-precision vectors, double-precision result.
    DotF32F64 {
        n: i64, x: ConstPtr<f32>, incx: i64, y: ConstPtr<f32>, incy: i64, result: MutPtr<f64>,
    },
}

impl Extension {
    pub fn routine(&self) -> Routine {
        match self {
            Extension::GemmF16 { .. } => Routine::Gemm,
            Extension::GemmF16F32 { .. }
            | Extension::GemmBf16F32 { .. }
            | Extension::GemmS8U8S32 { .. } => Routine::GemmExt,
            Extension::Sdsdot { .. } => Routine::Sdsdot,
            Extension::DotF32F64 { .. } => Routine::Dot,
        }
    }

    /// Element type of the inputs.
    pub fn dtype(&self) -> DType {
        match self {
            Extension::GemmF16 { .. } | Extension::GemmF16F32 { .. } => DType::F16,
            Extension::GemmBf16F32 { .. } => DType::BF16,
            Extension::GemmS8U8S32 { .. } => DType::I8,
            Extension::Sdsdot { .. } | Extension::DotF32F64 { .. } => DType::F32,
        }
    }
}

// ============================================================================
// Capability traits
// ============================================================================

/// Identity of a backend implementation.
pub trait BlasBackend: Send + Sync + 'static {
    fn library(&self) -> Library;
    fn backend(&self) -> vblas_core::Backend;

    /// Human-readable implementation name for logs.
    fn name(&self) -> &'static str {
        self.library().as_str()
    }

    fn tag(&self) -> Tag {
        Tag::new(self.library(), self.backend())
    }

    /// The error for a routine this backend does not implement.
    fn unsupported(&self, routine: Routine, dtype: DType) -> BlasError {
        BlasError::Unsupported {
            routine,
            dtype,
            library: self.library(),
            backend: self.backend(),
        }
    }
}

/// Operations for element type `T`, one method per family.
///
/// Each method either returns the kernel to queue or fails synchronously.
/// The defaults reject everything.
pub trait BlasOps<T: BlasScalar>: BlasBackend {
    fn level1(&self, call: Level1<T>) -> Result<Kernel> {
        Err(self.unsupported(call.routine(), T::DTYPE))
    }

    fn level2(&self, call: Level2<T>) -> Result<Kernel> {
        Err(self.unsupported(call.routine(), T::DTYPE))
    }

    fn level3(&self, call: Level3<T>) -> Result<Kernel> {
        Err(self.unsupported(call.routine(), T::DTYPE))
    }

    fn batch(&self, call: Batch<T>) -> Result<Kernel> {
        Err(self.unsupported(call.routine(), T::DTYPE))
    }
}

/// Mixed-precision operations.
pub trait ExtensionOps: BlasBackend {
    fn extension(&self, call: Extension) -> Result<Kernel> {
        Err(self.unsupported(call.routine(), call.dtype()))
    }
}

/// A complete backend: every family for every element type.
pub trait NumericBackend:
    BlasOps<f32>
    + BlasOps<f64>
    + BlasOps<vblas_core::Complex32>
    + BlasOps<vblas_core::Complex64>
    + ExtensionOps
{
}

impl<B> NumericBackend for B where
    B: BlasOps<f32>
        + BlasOps<f64>
        + BlasOps<vblas_core::Complex32>
        + BlasOps<vblas_core::Complex64>
        + ExtensionOps
{
}
