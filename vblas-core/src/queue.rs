//! The execution-queue seam.
//!
//! The dispatch layer never schedules anything itself: it resolves a call to
//! a [`Kernel`] and hands it to the caller's queue as a [`Submission`]. The
//! queue owns ordering, execution and the asynchronous error path.

use smallvec::SmallVec;

use crate::buffer::{self, BufferAccess};
use crate::error::Result;
use crate::event::Event;
use crate::tag::Backend;

/// Deferred backend work. Runs once, on whatever thread the queue chooses.
pub type Kernel = Box<dyn FnOnce() -> Result<()> + Send + 'static>;

/// One unit of work handed to a queue.
pub struct Submission {
    pub label: String,
    /// Explicit prerequisites (raw-pointer convention).
    pub dependencies: SmallVec<[Event; 4]>,
    /// Buffers touched (managed-buffer convention).
    pub accesses: SmallVec<[BufferAccess; 4]>,
    pub kernel: Kernel,
}

impl Submission {
    pub fn new(label: impl Into<String>, kernel: Kernel) -> Self {
        Self {
            label: label.into(),
            dependencies: SmallVec::new(),
            accesses: SmallVec::new(),
            kernel,
        }
    }

    pub fn depends_on(mut self, events: &[Event]) -> Self {
        self.dependencies.extend(events.iter().cloned());
        self
    }

    pub fn accesses(mut self, accesses: impl IntoIterator<Item = BufferAccess>) -> Self {
        self.accesses.extend(accesses);
        self
    }

    /// Create the submission's event: explicit dependencies plus whatever
    /// its buffer accesses imply.
    pub fn schedule(&self) -> Event {
        buffer::schedule(&self.label, &self.dependencies, &self.accesses)
    }
}

/// An execution queue owned by the caller.
pub trait Queue: Send + Sync {
    /// Device class this queue executes on.
    fn backend(&self) -> Backend;

    /// Enqueue work. The returned event settles when the kernel has run or
    /// a prerequisite has failed.
    fn submit(&self, submission: Submission) -> Result<Event>;

    /// Block until everything submitted so far has settled. Reports the
    /// first asynchronous failure since the previous `wait`.
    fn wait(&self) -> Result<()>;

    /// An event that completes once every event in `events` has completed.
    fn join(&self, events: &[Event]) -> Result<Event> {
        self.submit(Submission::new("join", Box::new(|| Ok(()))).depends_on(events))
    }
}

impl<Q: Queue + ?Sized> Queue for &Q {
    fn backend(&self) -> Backend {
        (**self).backend()
    }

    fn submit(&self, submission: Submission) -> Result<Event> {
        (**self).submit(submission)
    }

    fn wait(&self) -> Result<()> {
        (**self).wait()
    }
}

impl<Q: Queue + ?Sized> Queue for std::sync::Arc<Q> {
    fn backend(&self) -> Backend {
        (**self).backend()
    }

    fn submit(&self, submission: Submission) -> Result<Event> {
        (**self).submit(submission)
    }

    fn wait(&self) -> Result<()> {
        (**self).wait()
    }
}
