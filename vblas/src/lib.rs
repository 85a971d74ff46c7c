// Routines mirror CBLAS signatures, so long parameter lists are inherent.
// Kernels index packed column-major storage directly.
#![allow(clippy::too_many_arguments, clippy::needless_range_loop)]

//! # vblas
//!
//! Vendor-neutral BLAS. One API for Level 1/2/3, batched and mixed-precision
//! routines, routed to whichever implementation the configuration selects.
//!
//! ## Backends
//!
//! - **Intel oneMKL** (`intelmkl/intelcpu`, feature `mkl`): CBLAS forwarding.
//! - **Reference** (`reference/host`, `reference/intelcpu`): pure Rust,
//!   covers a subset and rejects the rest at resolve time.
//!
//! A backend is chosen once through [`select::with_backend`]; calls on the
//! resulting [`Blas<B>`] are statically dispatched.
//!
//! ## Calling conventions
//!
//! Every routine comes as a managed-buffer call (`gemm`) ordered by buffer
//! access tracking, and an `unsafe` raw-pointer call (`gemm_usm`) ordered by
//! explicit event dependencies and returning its own [`Event`]. Either way an
//! unsupported routine/type combination fails synchronously and nothing is
//! queued.
//!
//! ```
//! use vblas::{Blas, Buffer, HostQueue, Queue, ReferenceBackend, Transpose};
//!
//! let blas = Blas::new(ReferenceBackend::host());
//! let queue = HostQueue::new().unwrap();
//!
//! let a = Buffer::from_slice(&[1.0f64, 2.0, 3.0, 4.0]);
//! let b = Buffer::from_slice(&[1.0f64, 0.0, 0.0, 1.0]);
//! let c = Buffer::<f64>::zeroed(4);
//! let nt = Transpose::NoTrans;
//! blas.gemm(&queue, nt, nt, 2, 2, 2, 1.0, &a, 2, &b, 2, 0.0, &c, 2).unwrap();
//! queue.wait().unwrap();
//! assert_eq!(c.to_vec().unwrap(), vec![1.0, 2.0, 3.0, 4.0]);
//! ```

pub mod backend;
pub mod backends;
mod batch;
mod extensions;
mod level1;
mod level2;
mod level3;
pub mod router;
pub mod select;

pub use backend::{
    AxpyGroup, Batch, BlasBackend, BlasOps, Extension, ExtensionOps, GemmGroup, Level1, Level2,
    Level3, NumericBackend,
};
pub use backends::reference::ReferenceBackend;
pub use router::Blas;
pub use select::BackendVisitor;

#[cfg(feature = "mkl")]
pub use backends::mkl::MklBackend;

pub use vblas_core::{
    bf16, devices, f16, logging, AccessMode, Backend, BlasConfig, BlasError, BlasScalar, Buffer,
    BufferAccess, Complex32, Complex64, ComplexScalar, ConstPtr, DType, Diag, Element, EntryPoint,
    Event, EventId, EventStatus, GraphError, HostQueue, HostQueueBuilder, Kernel, Layout, Level,
    Library, ManualQueue, MutPtr, Offset, Queue, RealScalar, Result, Routine, Side, Submission, Tag,
    TaskGraph, Transpose, Uplo, UsmVec,
};
