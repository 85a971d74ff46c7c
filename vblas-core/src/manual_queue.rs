//! Deterministic queue that only runs work when told to.
//!
//! Nothing executes on submission. `step` runs the oldest job whose
//! prerequisites have completed, on the calling thread, so tests can observe
//! readiness and ordering exactly. Jobs whose prerequisites failed settle as
//! failed without running.

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::buffer::BufferAccess;
use crate::error::{BlasError, Result};
use crate::event::Event;
use crate::graph::TaskGraph;
use crate::queue::{Kernel, Queue, Submission};
use crate::tag::Backend;

struct Pending {
    event: Event,
    kernel: Kernel,
    _accesses: smallvec::SmallVec<[BufferAccess; 4]>,
}

#[derive(Default)]
struct State {
    pending: VecDeque<Pending>,
    graph: TaskGraph,
    submitted: Vec<String>,
    first_error: Option<BlasError>,
}

/// Single-threaded, step-driven queue.
pub struct ManualQueue {
    backend: Backend,
    state: Mutex<State>,
}

impl Default for ManualQueue {
    fn default() -> Self {
        Self::new(Backend::Host)
    }
}

impl ManualQueue {
    pub fn new(backend: Backend) -> Self {
        Self {
            backend,
            state: Mutex::new(State::default()),
        }
    }

    /// A host-controlled event, completed with [`Event::set_complete`].
    pub fn user_event(&self, label: &str) -> Event {
        let event = Event::pending(label, &[]);
        let mut state = self.state.lock();
        // ids are fresh, so recording cannot fail
        let _ = state.graph.record(event.id(), label, &[]);
        event
    }

    /// True if `event` belongs to a job that has not run and whose
    /// prerequisites have all completed.
    pub fn is_runnable(&self, event: &Event) -> bool {
        let state = self.state.lock();
        state
            .pending
            .iter()
            .any(|p| p.event == *event && matches!(p.event.dependencies_ready(), Some(Ok(()))))
    }

    /// Events of all jobs that could run now, in submission order.
    pub fn runnable(&self) -> Vec<Event> {
        let state = self.state.lock();
        state
            .pending
            .iter()
            .filter(|p| matches!(p.event.dependencies_ready(), Some(Ok(()))))
            .map(|p| p.event.clone())
            .collect()
    }

    pub fn pending_len(&self) -> usize {
        self.state.lock().pending.len()
    }

    /// Labels of every submission, in submission order.
    pub fn submissions(&self) -> Vec<String> {
        self.state.lock().submitted.clone()
    }

    pub fn graph(&self) -> TaskGraph {
        self.state.lock().graph.clone()
    }

    /// Settle the oldest job that can make progress. Returns its event, or
    /// `None` if every pending job is still blocked.
    pub fn step(&self) -> Option<Event> {
        let (job, ready) = {
            let mut state = self.state.lock();
            let (idx, ready) = state
                .pending
                .iter()
                .enumerate()
                .find_map(|(i, p)| p.event.dependencies_ready().map(|r| (i, r)))?;
            (state.pending.remove(idx)?, ready)
        };

        let outcome = ready.and_then(|()| {
            job.event.set_running();
            (job.kernel)()
        });
        match outcome {
            Ok(()) => job.event.set_complete(),
            Err(err) => {
                tracing::debug!(event = %job.event.id(), error = %err, "manual queue job failed");
                self.state.lock().first_error.get_or_insert_with(|| err.clone());
                job.event.set_failed(err);
            }
        }
        Some(job.event)
    }

    /// Step until nothing can make progress. Returns how many jobs settled.
    pub fn run_ready(&self) -> usize {
        let mut settled = 0;
        while self.step().is_some() {
            settled += 1;
        }
        settled
    }
}

impl Queue for ManualQueue {
    fn backend(&self) -> Backend {
        self.backend
    }

    fn submit(&self, submission: Submission) -> Result<Event> {
        let mut state = self.state.lock();
        let event = submission.schedule();
        state
            .graph
            .record(event.id(), event.label(), event.dependency_ids())?;
        state.submitted.push(submission.label);
        state.pending.push_back(Pending {
            event: event.clone(),
            kernel: submission.kernel,
            _accesses: submission.accesses,
        });
        Ok(event)
    }

    /// Runs everything that can run. Jobs blocked on events that never
    /// complete stay pending.
    fn wait(&self) -> Result<()> {
        self.run_ready();
        match self.state.lock().first_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn noop(label: &str) -> Submission {
        Submission::new(label, Box::new(|| Ok(())))
    }

    #[test]
    fn test_nothing_runs_until_stepped() {
        let q = ManualQueue::default();
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        let ev = q
            .submit(Submission::new(
                "k",
                Box::new(move || {
                    h.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }),
            ))
            .unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert!(q.is_runnable(&ev));
        assert_eq!(q.step(), Some(ev.clone()));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(ev.is_complete());
        assert!(!q.is_runnable(&ev));
    }

    #[test]
    fn test_user_event_gates_job() {
        let q = ManualQueue::default();
        let gate = q.user_event("gate");
        let ev = q.submit(noop("gated").depends_on(&[gate.clone()])).unwrap();
        assert!(!q.is_runnable(&ev));
        assert_eq!(q.run_ready(), 0);
        gate.set_complete();
        assert!(q.is_runnable(&ev));
        assert_eq!(q.run_ready(), 1);
        assert!(q.graph().is_ordered_after(ev.id(), gate.id()));
    }

    #[test]
    fn test_failed_prerequisite_skips_kernel() {
        let q = ManualQueue::default();
        let gate = q.user_event("gate");
        let ran = Arc::new(AtomicUsize::new(0));
        let r = Arc::clone(&ran);
        let ev = q
            .submit(
                Submission::new(
                    "dependent",
                    Box::new(move || {
                        r.fetch_add(1, Ordering::SeqCst);
                        Ok(())
                    }),
                )
                .depends_on(&[gate.clone()]),
            )
            .unwrap();
        gate.set_failed(BlasError::QueueClosed);
        assert_eq!(
            q.wait(),
            Err(BlasError::DependencyFailed { event: gate.id() })
        );
        assert_eq!(ran.load(Ordering::SeqCst), 0);
        assert!(matches!(ev.wait(), Err(BlasError::DependencyFailed { .. })));
    }

    #[test]
    fn test_submission_log() {
        let q = ManualQueue::default();
        q.submit(noop("a")).unwrap();
        q.submit(noop("b")).unwrap();
        assert_eq!(q.submissions(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(q.pending_len(), 2);
        q.wait().unwrap();
        assert_eq!(q.pending_len(), 0);
    }
}
