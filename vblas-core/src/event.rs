//! Completion events.
//!
//! An [`Event`] stands for work that has been scheduled on a queue and may
//! still be pending. Raw-pointer operations take a list of events to wait for
//! and hand back a new one. Ids are allocated from one process-wide counter
//! and an event can only list events that already exist, so the dependency
//! relation is acyclic by construction.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Condvar, Mutex};
use smallvec::SmallVec;

use crate::error::{BlasError, Result};

static NEXT_EVENT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-wide unique, monotonically increasing event id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(u64);

impl EventId {
    fn next() -> Self {
        EventId(NEXT_EVENT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Build an id from a raw value. Only meaningful for graph bookkeeping.
    pub fn from_raw(raw: u64) -> Self {
        EventId(raw)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Execution state of an event.
#[derive(Debug, Clone, PartialEq)]
pub enum EventStatus {
    Pending,
    Running,
    Complete,
    Failed(BlasError),
}

impl EventStatus {
    pub fn is_settled(&self) -> bool {
        matches!(self, EventStatus::Complete | EventStatus::Failed(_))
    }
}

struct EventInner {
    id: EventId,
    label: String,
    dependency_ids: SmallVec<[EventId; 4]>,
    /// Prerequisites still referenced; released once this event settles.
    waiting_on: Mutex<SmallVec<[Event; 4]>>,
    status: Mutex<EventStatus>,
    settled: Condvar,
}

/// Handle to scheduled work. Cloning shares the same underlying event.
#[derive(Clone)]
pub struct Event {
    inner: Arc<EventInner>,
}

impl Event {
    /// A new pending event depending on `dependencies`.
    ///
    /// Intended for queue implementations; duplicate dependencies are
    /// collapsed.
    pub fn pending(label: impl Into<String>, dependencies: &[Event]) -> Self {
        let mut deps: SmallVec<[Event; 4]> = SmallVec::with_capacity(dependencies.len());
        for dep in dependencies {
            if !deps.iter().any(|d| d.id() == dep.id()) {
                deps.push(dep.clone());
            }
        }
        let dependency_ids = deps.iter().map(Event::id).collect();
        Self::with_status(label.into(), dependency_ids, deps, EventStatus::Pending)
    }

    /// An event that is already complete.
    pub fn completed(label: impl Into<String>) -> Self {
        Self::with_status(
            label.into(),
            SmallVec::new(),
            SmallVec::new(),
            EventStatus::Complete,
        )
    }

    fn with_status(
        label: String,
        dependency_ids: SmallVec<[EventId; 4]>,
        waiting_on: SmallVec<[Event; 4]>,
        status: EventStatus,
    ) -> Self {
        Self {
            inner: Arc::new(EventInner {
                id: EventId::next(),
                label,
                dependency_ids,
                waiting_on: Mutex::new(waiting_on),
                status: Mutex::new(status),
                settled: Condvar::new(),
            }),
        }
    }

    pub fn id(&self) -> EventId {
        self.inner.id
    }

    pub fn label(&self) -> &str {
        &self.inner.label
    }

    /// Ids of the events this one was created to wait for.
    pub fn dependency_ids(&self) -> &[EventId] {
        &self.inner.dependency_ids
    }

    pub fn status(&self) -> EventStatus {
        self.inner.status.lock().clone()
    }

    pub fn is_complete(&self) -> bool {
        matches!(*self.inner.status.lock(), EventStatus::Complete)
    }

    pub fn is_settled(&self) -> bool {
        self.inner.status.lock().is_settled()
    }

    /// Block until the event settles. Returns the failure if the work failed.
    pub fn wait(&self) -> Result<()> {
        let mut status = self.inner.status.lock();
        while !status.is_settled() {
            self.inner.settled.wait(&mut status);
        }
        match &*status {
            EventStatus::Failed(err) => Err(err.clone()),
            _ => Ok(()),
        }
    }

    /// Wait for every event; returns the first failure in list order.
    pub fn wait_all(events: &[Event]) -> Result<()> {
        let mut first_err = None;
        for event in events {
            if let Err(err) = event.wait() {
                first_err.get_or_insert(err);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    /// Non-blocking readiness check: `None` while a prerequisite is still
    /// outstanding, `Some(Err)` once any prerequisite failed.
    pub fn dependencies_ready(&self) -> Option<Result<()>> {
        let waiting = self.inner.waiting_on.lock();
        let mut all_done = true;
        for dep in waiting.iter() {
            match dep.status() {
                EventStatus::Complete => {}
                EventStatus::Failed(_) => {
                    return Some(Err(BlasError::DependencyFailed { event: dep.id() }))
                }
                EventStatus::Pending | EventStatus::Running => all_done = false,
            }
        }
        all_done.then_some(Ok(()))
    }

    /// Block until every prerequisite settles.
    pub fn wait_dependencies(&self) -> Result<()> {
        let deps: SmallVec<[Event; 4]> = self.inner.waiting_on.lock().clone();
        for dep in &deps {
            dep.wait()
                .map_err(|_| BlasError::DependencyFailed { event: dep.id() })?;
        }
        Ok(())
    }

    pub fn set_running(&self) {
        let mut status = self.inner.status.lock();
        if matches!(*status, EventStatus::Pending) {
            *status = EventStatus::Running;
        }
    }

    pub fn set_complete(&self) {
        self.settle(EventStatus::Complete);
    }

    pub fn set_failed(&self, err: BlasError) {
        self.settle(EventStatus::Failed(err));
    }

    fn settle(&self, outcome: EventStatus) {
        {
            let mut status = self.inner.status.lock();
            if status.is_settled() {
                return;
            }
            *status = outcome;
            self.inner.settled.notify_all();
        }
        self.inner.waiting_on.lock().clear();
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Event {}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("id", &self.inner.id)
            .field("label", &self.inner.label)
            .field("dependencies", &self.inner.dependency_ids)
            .field("status", &*self.inner.status.lock())
            .finish()
    }
}
