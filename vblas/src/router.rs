//! The operation router.
//!
//! [`Blas<B>`] is stateless: it holds the backend implementation chosen at
//! configuration time and nothing else. Every operation exists in two
//! calling conventions:
//!
//! - **managed buffers**: `op(queue, .., &Buffer<T>, ..) -> Result<()>`. The
//!   queue orders the work through the buffers' access tracking.
//! - **raw pointers**: `unsafe op_usm(queue, .., *const T / *mut T, ..,
//!   dependencies) -> Result<Event>`. Ordered only by `dependencies`.
//!
//! Both resolve the call against the backend first, so an unsupported
//! routine/type combination fails synchronously with nothing queued.
//!
//! # Raw-pointer contract
//!
//! Every `*_usm` function is `unsafe`. The caller guarantees that each
//! pointer addresses memory the queue's backend can access (a [`UsmVec`]
//! for host queues), covers every element the routine touches given the
//! dimensions, increments and leading dimensions, and stays allocated and
//! free of conflicting host or kernel access until the returned event has
//! settled.
//!
//! [`UsmVec`]: vblas_core::UsmVec

use std::sync::Arc;

use vblas_core::{
    Buffer, BufferAccess, DType, Element, EntryPoint, Event, Kernel, Library, Queue, Result,
    Routine, Submission, Tag,
};

use crate::backend::BlasBackend;

/// Vendor-neutral BLAS entry point bound to one backend implementation.
pub struct Blas<B> {
    backend: Arc<B>,
}

impl<B> Clone for Blas<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B: BlasBackend> Blas<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub fn from_arc(backend: Arc<B>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn library(&self) -> Library {
        self.backend.library()
    }

    pub fn tag(&self) -> Tag {
        self.backend.tag()
    }

    fn resolve(
        &self,
        entry: EntryPoint,
        resolve: impl FnOnce(&B) -> Result<Kernel>,
    ) -> Result<Kernel> {
        resolve(&self.backend).map_err(|err| {
            tracing::debug!(entry = %entry, tag = %self.tag(), error = %err, "dispatch rejected");
            err
        })
    }

    /// Resolve and submit a managed-buffer call.
    pub(crate) fn submit_buffers<Q: Queue + ?Sized>(
        &self,
        queue: &Q,
        routine: Routine,
        dtype: DType,
        resolve: impl FnOnce(&B) -> Result<Kernel>,
        accesses: impl IntoIterator<Item = BufferAccess>,
    ) -> Result<()> {
        let entry = EntryPoint::new(routine, dtype);
        let kernel = self.resolve(entry, resolve)?;
        let event = queue.submit(Submission::new(entry.to_string(), kernel).accesses(accesses))?;
        tracing::trace!(entry = %entry, tag = %self.tag(), event = %event.id(), "dispatched");
        Ok(())
    }

    /// Resolve and submit a raw-pointer call.
    pub(crate) fn submit_usm<Q: Queue + ?Sized>(
        &self,
        queue: &Q,
        routine: Routine,
        dtype: DType,
        resolve: impl FnOnce(&B) -> Result<Kernel>,
        dependencies: &[Event],
    ) -> Result<Event> {
        let entry = EntryPoint::new(routine, dtype);
        let kernel = self.resolve(entry, resolve)?;
        let event =
            queue.submit(Submission::new(entry.to_string(), kernel).depends_on(dependencies))?;
        tracing::trace!(
            entry = %entry,
            tag = %self.tag(),
            event = %event.id(),
            deps = dependencies.len(),
            "dispatched"
        );
        Ok(event)
    }
}

// ============================================================================
// Managed-buffer extent checks
// ============================================================================

fn to_usize(v: i64) -> usize {
    usize::try_from(v).unwrap_or(0)
}

/// Elements spanned by `n` entries at increment `inc`: `1 + (n - 1) * |inc|`.
pub(crate) fn vector_extent(n: i64, inc: i64) -> usize {
    if n <= 0 {
        return 0;
    }
    1 + to_usize(n - 1).saturating_mul(to_usize(inc.saturating_abs()))
}

/// Elements spanned by a column-major `rows x cols` matrix with leading
/// dimension `ld`.
pub(crate) fn matrix_extent(rows: i64, cols: i64, ld: i64) -> usize {
    if rows <= 0 || cols <= 0 {
        return 0;
    }
    to_usize(cols - 1)
        .saturating_mul(to_usize(ld.max(1)))
        .saturating_add(to_usize(rows))
}

/// Elements of a packed triangular `n x n` matrix.
pub(crate) fn packed_extent(n: i64) -> usize {
    let n = to_usize(n);
    n.saturating_mul(n + 1) / 2
}

/// Elements spanned by `count` matrices `stride` apart, each `extent` long.
pub(crate) fn strided_extent(extent: usize, stride: i64, count: i64) -> usize {
    if count <= 0 || extent == 0 {
        return 0;
    }
    to_usize(count - 1)
        .saturating_mul(to_usize(stride))
        .saturating_add(extent)
}

pub(crate) fn check_len<T: Element>(
    routine: Routine,
    argument: &'static str,
    buffer: &Buffer<T>,
    required: usize,
) -> Result<()> {
    if buffer.len() < required {
        return Err(vblas_core::BlasError::BufferTooSmall {
            routine,
            argument,
            required,
            actual: buffer.len(),
        });
    }
    Ok(())
}

pub(crate) fn check_vector<T: Element>(
    routine: Routine,
    argument: &'static str,
    buffer: &Buffer<T>,
    n: i64,
    inc: i64,
) -> Result<()> {
    check_len(routine, argument, buffer, vector_extent(n, inc))
}

pub(crate) fn check_matrix<T: Element>(
    routine: Routine,
    argument: &'static str,
    buffer: &Buffer<T>,
    rows: i64,
    cols: i64,
    ld: i64,
) -> Result<()> {
    check_len(routine, argument, buffer, matrix_extent(rows, cols, ld))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_extent() {
        assert_eq!(vector_extent(0, 1), 0);
        assert_eq!(vector_extent(5, 1), 5);
        assert_eq!(vector_extent(5, 2), 9);
        assert_eq!(vector_extent(5, -3), 13);
        assert_eq!(vector_extent(1, 7), 1);
    }

    #[test]
    fn test_matrix_extent() {
        assert_eq!(matrix_extent(3, 4, 3), 12);
        assert_eq!(matrix_extent(3, 4, 5), 18);
        assert_eq!(matrix_extent(0, 4, 5), 0);
        assert_eq!(packed_extent(4), 10);
        assert_eq!(strided_extent(12, 16, 3), 44);
    }

    #[test]
    fn test_check_len_reports_sizes() {
        let buf = Buffer::<f32>::zeroed(4);
        let err = check_vector(Routine::Axpy, "x", &buf, 3, 2).unwrap_err();
        assert_eq!(
            err,
            vblas_core::BlasError::BufferTooSmall {
                routine: Routine::Axpy,
                argument: "x",
                required: 5,
                actual: 4,
            }
        );
        check_matrix(Routine::Gemm, "a", &buf, 2, 2, 2).unwrap();
    }
}
