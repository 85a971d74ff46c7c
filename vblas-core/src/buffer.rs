//! Managed buffers with queue-side access tracking.
//!
//! Every buffer keeps a small access record: the last submission that wrote
//! it and the submissions that read it since. [`schedule`] turns the
//! accesses of a new submission into implicit dependencies:
//!
//! - read after write: the reader waits for the last writer
//! - write after read / write after write: the writer waits for the last
//!   writer and every reader since
//!
//! so submissions touching overlapping buffers execute in submission order
//! while independent ones stay concurrent. Host access goes through the same
//! record, which keeps it from racing queued kernels.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use smallvec::SmallVec;

use crate::error::Result;
use crate::event::Event;
use crate::scalar::Element;
use crate::usm::{AlignedAlloc, ConstPtr, MutPtr};

/// Serialises the read-modify-write of access records across submissions.
static TRACKER: Mutex<()> = parking_lot::const_mutex(());

#[derive(Default)]
struct AccessRecord {
    last_write: Option<Event>,
    reads: Vec<Event>,
}

impl AccessRecord {
    fn prune(&mut self) {
        self.reads.retain(|e| !e.is_complete());
        if matches!(&self.last_write, Some(e) if e.is_complete()) {
            self.last_write = None;
        }
    }
}

trait Tracked: Send + Sync {
    fn record(&self) -> &Mutex<AccessRecord>;
}

struct BufferInner<T: Element> {
    mem: AlignedAlloc<T>,
    record: Mutex<AccessRecord>,
}

impl<T: Element> Tracked for BufferInner<T> {
    fn record(&self) -> &Mutex<AccessRecord> {
        &self.record
    }
}

/// How a submission uses a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    Read,
    /// Read-write; ordered like a write.
    Write,
}

/// One buffer used by one submission. Holding it keeps the buffer memory
/// alive until the submission's kernel has run.
#[derive(Clone)]
pub struct BufferAccess {
    mode: AccessMode,
    target: Arc<dyn Tracked>,
}

impl BufferAccess {
    pub fn mode(&self) -> AccessMode {
        self.mode
    }
}

impl fmt::Debug for BufferAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferAccess")
            .field("mode", &self.mode)
            .field("buffer", &Arc::as_ptr(&self.target).cast::<()>())
            .finish()
    }
}

/// Create the event of a submission, adding the implicit dependencies its
/// buffer accesses imply, and record the accesses.
pub fn schedule(label: &str, explicit: &[Event], accesses: &[BufferAccess]) -> Event {
    let _guard = TRACKER.lock();

    let mut deps: SmallVec<[Event; 4]> = explicit.iter().cloned().collect();
    for access in accesses {
        let mut record = access.target.record().lock();
        record.prune();
        if let Some(w) = &record.last_write {
            deps.push(w.clone());
        }
        if access.mode == AccessMode::Write {
            deps.extend(record.reads.iter().cloned());
        }
    }

    let event = Event::pending(label, &deps);

    for access in accesses {
        let mut record = access.target.record().lock();
        match access.mode {
            AccessMode::Read => record.reads.push(event.clone()),
            AccessMode::Write => {
                record.last_write = Some(event.clone());
                record.reads.clear();
            }
        }
    }
    event
}

/// Completes the host-access event even if the host closure panics.
struct HostAccess(Event);

impl HostAccess {
    /// Schedule a host access and wait for the submissions it is ordered
    /// after. A failed dependency fails the access event too, so the buffer
    /// keeps reporting the failure to later accesses.
    fn begin(label: &str, access: BufferAccess) -> Result<Self> {
        let event = schedule(label, &[], &[access]);
        if let Err(err) = event.wait_dependencies() {
            event.set_failed(err.clone());
            return Err(err);
        }
        Ok(Self(event))
    }
}

impl Drop for HostAccess {
    fn drop(&mut self) {
        self.0.set_complete();
    }
}

/// Fixed-length, shared, 64-byte aligned buffer tracked by the queues.
///
/// Cloning shares the same storage.
pub struct Buffer<T: Element> {
    inner: Arc<BufferInner<T>>,
}

impl<T: Element> Clone for Buffer<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Element> Buffer<T> {
    pub fn from_slice(data: &[T]) -> Self {
        Self::from_mem(AlignedAlloc::from_slice(data))
    }

    pub fn from_elem(value: T, len: usize) -> Self {
        Self::from_mem(AlignedAlloc::from_elem(value, len))
    }

    fn from_mem(mem: AlignedAlloc<T>) -> Self {
        Self {
            inner: Arc::new(BufferInner {
                mem,
                record: Mutex::new(AccessRecord::default()),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.mem.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Declare a read by the submission being built.
    pub fn read(&self) -> BufferAccess {
        self.access(AccessMode::Read)
    }

    /// Declare a read-write by the submission being built.
    pub fn write(&self) -> BufferAccess {
        self.access(AccessMode::Write)
    }

    fn access(&self, mode: AccessMode) -> BufferAccess {
        let target: Arc<dyn Tracked> = self.inner.clone();
        BufferAccess { mode, target }
    }

    /// Operand pointer for a kernel that declared a read of this buffer.
    pub fn as_const_ptr(&self) -> ConstPtr<T> {
        ConstPtr::new(self.inner.mem.as_ptr())
    }

    /// Operand pointer for a kernel that declared a write of this buffer.
    pub fn as_mut_ptr(&self) -> MutPtr<T> {
        MutPtr::new(self.inner.mem.as_ptr())
    }

    pub fn ptr_eq(&self, other: &Buffer<T>) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Last submission writing this buffer, if it has not completed yet.
    pub fn pending_write(&self) -> Option<Event> {
        let _guard = TRACKER.lock();
        let mut record = self.inner.record.lock();
        record.prune();
        record.last_write.clone()
    }

    /// Run `f` on the host contents once every queued writer has finished.
    pub fn with_host<R>(&self, f: impl FnOnce(&[T]) -> R) -> Result<R> {
        let _guard = HostAccess::begin("host_read", self.read())?;
        // SAFETY: the host-read event orders this view after every queued
        // writer and every later writer after the view.
        Ok(f(unsafe { self.inner.mem.as_slice() }))
    }

    /// Run `f` on the host contents once every queued access has finished.
    pub fn with_host_mut<R>(&self, f: impl FnOnce(&mut [T]) -> R) -> Result<R> {
        let _guard = HostAccess::begin("host_write", self.write())?;
        // SAFETY: as in `with_host`, and the write access also excludes
        // concurrent readers.
        Ok(f(unsafe { self.inner.mem.as_mut_slice() }))
    }

    pub fn to_vec(&self) -> Result<Vec<T>> {
        self.with_host(|s| s.to_vec())
    }

    /// Overwrite the contents from the host.
    ///
    /// # Panics
    /// If `data.len() != self.len()`.
    pub fn write_from(&self, data: &[T]) -> Result<()> {
        self.with_host_mut(|s| s.copy_from_slice(data))
    }

    /// Block until every queued access of this buffer has settled.
    pub fn wait(&self) -> Result<()> {
        let outstanding: Vec<Event> = {
            let _guard = TRACKER.lock();
            let record = self.inner.record.lock();
            record
                .last_write
                .iter()
                .chain(record.reads.iter())
                .cloned()
                .collect()
        };
        Event::wait_all(&outstanding)
    }
}

impl<T: Element + Default> Buffer<T> {
    pub fn zeroed(len: usize) -> Self {
        Self::from_elem(T::default(), len)
    }
}

impl<T: Element> fmt::Debug for Buffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("dtype", &T::DTYPE)
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BlasError;

    #[test]
    fn test_read_after_write_depends_on_writer() {
        let buf = Buffer::from_slice(&[1.0f32; 4]);
        let w = schedule("w", &[], &[buf.write()]);
        let r = schedule("r", &[], &[buf.read()]);
        assert_eq!(r.dependency_ids(), &[w.id()]);
    }

    #[test]
    fn test_concurrent_reads_independent() {
        let buf = Buffer::from_slice(&[1.0f64; 4]);
        let r1 = schedule("r1", &[], &[buf.read()]);
        let r2 = schedule("r2", &[], &[buf.read()]);
        assert!(r1.dependency_ids().is_empty());
        assert!(r2.dependency_ids().is_empty());
        // write after read waits for both readers
        let w = schedule("w", &[], &[buf.write()]);
        assert_eq!(w.dependency_ids(), &[r1.id(), r2.id()]);
    }

    #[test]
    fn test_write_after_write_and_pruning() {
        let buf = Buffer::from_slice(&[0i32; 2]);
        let w1 = schedule("w1", &[], &[buf.write()]);
        let w2 = schedule("w2", &[], &[buf.write()]);
        assert_eq!(w2.dependency_ids(), &[w1.id()]);
        w1.set_complete();
        w2.set_complete();
        let w3 = schedule("w3", &[], &[buf.write()]);
        assert!(w3.dependency_ids().is_empty());
        w3.set_complete();
    }

    #[test]
    fn test_disjoint_buffers_do_not_order() {
        let a = Buffer::from_slice(&[0.0f32; 2]);
        let b = Buffer::from_slice(&[0.0f32; 2]);
        let _wa = schedule("wa", &[], &[a.write()]);
        let wb = schedule("wb", &[], &[b.write()]);
        assert!(wb.dependency_ids().is_empty());
    }

    #[test]
    fn test_host_access_waits_for_writer() {
        let buf = Buffer::from_slice(&[1.0f32, 2.0]);
        let w = schedule("w", &[], &[buf.write()]);
        let remote = w.clone();
        let ptr = buf.as_mut_ptr();
        let handle = std::thread::spawn(move || {
            unsafe { ptr.get().write(10.0) };
            remote.set_complete();
        });
        assert_eq!(buf.to_vec().unwrap(), vec![10.0, 2.0]);
        handle.join().unwrap();
    }

    #[test]
    fn test_failed_writer_surfaces_on_host_read() {
        let buf = Buffer::from_slice(&[0.0f64; 3]);
        let w = schedule("w", &[], &[buf.write()]);
        w.set_failed(BlasError::QueueClosed);
        assert_eq!(
            buf.to_vec(),
            Err(BlasError::DependencyFailed { event: w.id() })
        );
    }

    #[test]
    fn test_failed_host_write_keeps_buffer_failed() {
        let buf = Buffer::from_slice(&[0.0f64; 2]);
        let w = schedule("w", &[], &[buf.write()]);
        w.set_failed(BlasError::QueueClosed);

        let err = buf.write_from(&[1.0, 2.0]).unwrap_err();
        assert_eq!(err, BlasError::DependencyFailed { event: w.id() });
        let host_write = buf.pending_write().unwrap();
        assert_ne!(host_write.id(), w.id());
        assert!(host_write.wait().is_err());

        assert!(buf.to_vec().is_err());
        assert!(buf.with_host_mut(|s| s[0] = 5.0).is_err());
        assert!(buf.wait().is_err());
    }

    #[test]
    fn test_write_from_host() {
        let buf = Buffer::<f32>::zeroed(3);
        buf.write_from(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(buf.to_vec().unwrap(), vec![1.0, 2.0, 3.0]);
        assert!(buf.pending_write().is_none());
        buf.wait().unwrap();
    }
}
