//! Host execution queue: a fixed pool of worker threads fed over a channel.
//!
//! Jobs are dispatched in submission order. A worker first waits for the
//! job's prerequisites, then runs the kernel inside `catch_unwind` and
//! settles the job's event. Failures are reported to the optional
//! asynchronous error handler and kept for the next [`Queue::wait`].

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};
use parking_lot::{Condvar, Mutex};
use smallvec::SmallVec;

use crate::buffer::BufferAccess;
use crate::error::{BlasError, Result};
use crate::event::Event;
use crate::graph::TaskGraph;
use crate::queue::{Kernel, Queue, Submission};
use crate::tag::Backend;

/// Callback for failures observed after submission.
pub type ErrorHandler = Arc<dyn Fn(&BlasError) + Send + Sync>;

struct Job {
    event: Event,
    kernel: Kernel,
    /// Keeps buffer storage alive until the kernel has run.
    accesses: SmallVec<[BufferAccess; 4]>,
}

struct Shared {
    outstanding: Mutex<usize>,
    idle: Condvar,
    first_error: Mutex<Option<BlasError>>,
    handler: Option<ErrorHandler>,
    graph: Option<Mutex<TaskGraph>>,
}

impl Shared {
    fn report(&self, err: &BlasError) {
        tracing::warn!(error = %err, "asynchronous failure");
        self.first_error.lock().get_or_insert_with(|| err.clone());
        if let Some(handler) = &self.handler {
            handler(err);
        }
    }

    fn finish_one(&self) {
        let mut outstanding = self.outstanding.lock();
        *outstanding -= 1;
        if *outstanding == 0 {
            self.idle.notify_all();
        }
    }
}

/// Builder for [`HostQueue`].
pub struct HostQueueBuilder {
    workers: usize,
    backend: Backend,
    handler: Option<ErrorHandler>,
    record_graph: bool,
}

impl Default for HostQueueBuilder {
    fn default() -> Self {
        Self {
            workers: thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            backend: Backend::Host,
            handler: None,
            record_graph: false,
        }
    }
}

impl HostQueueBuilder {
    /// Number of worker threads (at least one).
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Device class reported by [`Queue::backend`].
    pub fn backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub fn error_handler(mut self, handler: impl Fn(&BlasError) + Send + Sync + 'static) -> Self {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Record every submission in a [`TaskGraph`].
    pub fn record_graph(mut self, record: bool) -> Self {
        self.record_graph = record;
        self
    }

    pub fn build(self) -> Result<HostQueue> {
        if self.backend.is_gpu() {
            return Err(BlasError::Config(format!(
                "host queue cannot execute on {}",
                self.backend
            )));
        }
        let shared = Arc::new(Shared {
            outstanding: Mutex::new(0),
            idle: Condvar::new(),
            first_error: Mutex::new(None),
            handler: self.handler,
            graph: self.record_graph.then(|| Mutex::new(TaskGraph::new())),
        });
        let (sender, receiver) = crossbeam_channel::unbounded::<Job>();

        let mut workers = Vec::with_capacity(self.workers);
        for id in 0..self.workers {
            let receiver = receiver.clone();
            let shared = Arc::clone(&shared);
            let handle = thread::Builder::new()
                .name(format!("vblas-host-{id}"))
                .spawn(move || worker_loop(id, receiver, shared))
                .map_err(|e| BlasError::Config(format!("failed to spawn host worker: {e}")))?;
            workers.push(handle);
        }
        tracing::debug!(workers = workers.len(), backend = %self.backend, "host queue started");

        Ok(HostQueue {
            backend: self.backend,
            shared,
            sender: Some(sender),
            submit_lock: Mutex::new(()),
            workers,
        })
    }
}

/// Queue executing kernels on host threads.
pub struct HostQueue {
    backend: Backend,
    shared: Arc<Shared>,
    sender: Option<Sender<Job>>,
    /// Keeps channel order equal to event-id order.
    submit_lock: Mutex<()>,
    workers: Vec<JoinHandle<()>>,
}

impl HostQueue {
    /// Queue with one worker per available core.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> HostQueueBuilder {
        HostQueueBuilder::default()
    }

    pub fn num_workers(&self) -> usize {
        self.workers.len()
    }

    /// Snapshot of the recorded task graph, if recording is enabled.
    pub fn graph(&self) -> Option<TaskGraph> {
        self.shared.graph.as_ref().map(|g| g.lock().clone())
    }
}

impl Queue for HostQueue {
    fn backend(&self) -> Backend {
        self.backend
    }

    fn submit(&self, submission: Submission) -> Result<Event> {
        let sender = self.sender.as_ref().ok_or(BlasError::QueueClosed)?;
        let _order = self.submit_lock.lock();

        let event = submission.schedule();
        if let Some(graph) = &self.shared.graph {
            graph
                .lock()
                .record(event.id(), event.label(), event.dependency_ids())?;
        }
        tracing::trace!(
            event = %event.id(),
            label = event.label(),
            deps = event.dependency_ids().len(),
            "submit"
        );

        *self.shared.outstanding.lock() += 1;
        let job = Job {
            event: event.clone(),
            kernel: submission.kernel,
            accesses: submission.accesses,
        };
        if sender.send(job).is_err() {
            self.shared.finish_one();
            event.set_failed(BlasError::QueueClosed);
            return Err(BlasError::QueueClosed);
        }
        Ok(event)
    }

    fn wait(&self) -> Result<()> {
        let mut outstanding = self.shared.outstanding.lock();
        while *outstanding > 0 {
            self.shared.idle.wait(&mut outstanding);
        }
        drop(outstanding);
        match self.shared.first_error.lock().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Drop for HostQueue {
    fn drop(&mut self) {
        // Closing the channel lets workers drain the backlog and exit.
        self.sender.take();
        for worker in std::mem::take(&mut self.workers) {
            let _ = worker.join();
        }
    }
}

fn worker_loop(id: usize, receiver: Receiver<Job>, shared: Arc<Shared>) {
    tracing::trace!(worker = id, "host worker running");
    for job in receiver.iter() {
        let Job {
            event,
            kernel,
            accesses,
        } = job;

        let outcome = event.wait_dependencies().and_then(|()| {
            event.set_running();
            run_kernel(event.label(), kernel)
        });
        drop(accesses);

        match outcome {
            Ok(()) => event.set_complete(),
            Err(err) => {
                shared.report(&err);
                event.set_failed(err);
            }
        }
        shared.finish_one();
    }
    tracing::trace!(worker = id, "host worker exiting");
}

fn run_kernel(label: &str, kernel: Kernel) -> Result<()> {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(kernel)) {
        Ok(result) => result,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string panic payload".to_string());
            Err(BlasError::KernelPanicked {
                label: label.to_string(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Buffer;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn queue(workers: usize) -> HostQueue {
        HostQueue::builder()
            .workers(workers)
            .record_graph(true)
            .build()
            .unwrap()
    }

    #[test]
    fn test_runs_kernel_and_completes() {
        let q = queue(2);
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        let ev = q
            .submit(Submission::new(
                "count",
                Box::new(move || {
                    h.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }),
            ))
            .unwrap();
        ev.wait().unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        q.wait().unwrap();
    }

    #[test]
    fn test_explicit_dependencies_order_execution() {
        let q = queue(4);
        let log = Arc::new(Mutex::new(Vec::new()));
        let (l1, l2) = (Arc::clone(&log), Arc::clone(&log));
        let first = q
            .submit(Submission::new(
                "first",
                Box::new(move || {
                    thread::sleep(std::time::Duration::from_millis(20));
                    l1.lock().push(1);
                    Ok(())
                }),
            ))
            .unwrap();
        let second = q
            .submit(
                Submission::new(
                    "second",
                    Box::new(move || {
                        l2.lock().push(2);
                        Ok(())
                    }),
                )
                .depends_on(&[first.clone()]),
            )
            .unwrap();
        second.wait().unwrap();
        assert_eq!(*log.lock(), vec![1, 2]);
        let graph = q.graph().unwrap();
        assert!(graph.is_ordered_after(second.id(), first.id()));
    }

    #[test]
    fn test_failure_propagates_to_dependents_and_handler() {
        let seen = Arc::new(AtomicUsize::new(0));
        let s = Arc::clone(&seen);
        let q = HostQueue::builder()
            .workers(1)
            .error_handler(move |_| {
                s.fetch_add(1, Ordering::SeqCst);
            })
            .build()
            .unwrap();
        let bad = q
            .submit(Submission::new(
                "bad",
                Box::new(|| Err(BlasError::Config("boom".into()))),
            ))
            .unwrap();
        let after = q
            .submit(Submission::new("after", Box::new(|| Ok(()))).depends_on(&[bad.clone()]))
            .unwrap();
        assert_eq!(bad.wait(), Err(BlasError::Config("boom".into())));
        assert_eq!(
            after.wait(),
            Err(BlasError::DependencyFailed { event: bad.id() })
        );
        assert_eq!(q.wait(), Err(BlasError::Config("boom".into())));
        // the error is reported once per wait
        q.wait().unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_panicking_kernel_fails_event() {
        let q = queue(1);
        let ev = q
            .submit(Submission::new("panics", Box::new(|| panic!("kernel bug"))))
            .unwrap();
        match ev.wait() {
            Err(BlasError::KernelPanicked { label, message }) => {
                assert_eq!(label, "panics");
                assert_eq!(message, "kernel bug");
            }
            other => panic!("unexpected {other:?}"),
        }
        // the worker survives
        q.join(&[]).unwrap().wait().unwrap();
    }

    #[test]
    fn test_buffer_accesses_serialise() {
        let q = queue(4);
        let buf = Buffer::from_slice(&[0u8; 1]);
        for i in 1..=16u8 {
            let ptr = buf.as_mut_ptr();
            q.submit(
                Submission::new(
                    "inc",
                    Box::new(move || {
                        unsafe {
                            let v = ptr.get().read();
                            assert_eq!(v, i - 1);
                            ptr.get().write(i);
                        }
                        Ok(())
                    }),
                )
                .accesses([buf.write()]),
            )
            .unwrap();
        }
        assert_eq!(buf.to_vec().unwrap(), vec![16]);
        q.wait().unwrap();
    }

    #[test]
    fn test_join_waits_for_all() {
        let q = queue(2);
        let a = q.submit(Submission::new("a", Box::new(|| Ok(())))).unwrap();
        let b = q.submit(Submission::new("b", Box::new(|| Ok(())))).unwrap();
        let j = q.join(&[a.clone(), b.clone()]).unwrap();
        assert_eq!(j.dependency_ids(), &[a.id(), b.id()]);
        j.wait().unwrap();
        assert!(a.is_complete() && b.is_complete());
    }

    #[test]
    fn test_gpu_backend_rejected() {
        assert!(HostQueue::builder().backend(Backend::NvidiaGpu).build().is_err());
    }
}
