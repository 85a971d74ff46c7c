//! Test backends and helpers shared by the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vblas::{
    Backend, Batch, BlasBackend, BlasError, BlasOps, BlasScalar, DType, EntryPoint, Extension,
    ExtensionOps, Kernel, Level1, Level2, Level3, Library, Result, Routine,
};

/// Backend that accepts every call, records the entry point at resolve
/// time and again when the kernel runs. Selected entry points can be
/// rejected at resolve time or made to fail when executed.
#[derive(Clone)]
pub struct Recorder {
    library: Library,
    backend: Backend,
    rejected: Vec<EntryPoint>,
    failing: Vec<EntryPoint>,
    pub resolved: Arc<Mutex<Vec<String>>>,
    pub ran: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    pub fn new(library: Library, backend: Backend) -> Self {
        Self {
            library,
            backend,
            rejected: Vec::new(),
            failing: Vec::new(),
            resolved: Arc::default(),
            ran: Arc::default(),
        }
    }

    pub fn host() -> Self {
        Self::new(Library::Reference, Backend::Host)
    }

    pub fn rejecting(mut self, routine: Routine, dtype: DType) -> Self {
        self.rejected.push(EntryPoint::new(routine, dtype));
        self
    }

    pub fn failing(mut self, routine: Routine, dtype: DType) -> Self {
        self.failing.push(EntryPoint::new(routine, dtype));
        self
    }

    pub fn resolved(&self) -> Vec<String> {
        self.resolved.lock().unwrap().clone()
    }

    pub fn ran(&self) -> Vec<String> {
        self.ran.lock().unwrap().clone()
    }

    fn record(&self, routine: Routine, dtype: DType) -> Result<Kernel> {
        let entry = EntryPoint::new(routine, dtype);
        if self.rejected.contains(&entry) {
            return Err(self.unsupported(routine, dtype));
        }
        self.resolved.lock().unwrap().push(entry.to_string());
        let ran = Arc::clone(&self.ran);
        let fails = self.failing.contains(&entry);
        Ok(Box::new(move || {
            ran.lock().unwrap().push(entry.to_string());
            if fails {
                return Err(BlasError::Backend {
                    routine,
                    message: "injected failure".to_string(),
                });
            }
            Ok(())
        }))
    }
}

impl BlasBackend for Recorder {
    fn library(&self) -> Library {
        self.library
    }

    fn backend(&self) -> Backend {
        self.backend
    }
}

impl<T: BlasScalar> BlasOps<T> for Recorder {
    fn level1(&self, call: Level1<T>) -> Result<Kernel> {
        self.record(call.routine(), T::DTYPE)
    }

    fn level2(&self, call: Level2<T>) -> Result<Kernel> {
        self.record(call.routine(), T::DTYPE)
    }

    fn level3(&self, call: Level3<T>) -> Result<Kernel> {
        self.record(call.routine(), T::DTYPE)
    }

    fn batch(&self, call: Batch<T>) -> Result<Kernel> {
        self.record(call.routine(), T::DTYPE)
    }
}

impl ExtensionOps for Recorder {
    fn extension(&self, call: Extension) -> Result<Kernel> {
        self.record(call.routine(), call.dtype())
    }
}

pub fn rng() -> StdRng {
    StdRng::seed_from_u64(0x5eed_b1a5)
}

pub fn random_vec(rng: &mut StdRng, len: usize) -> Vec<f64> {
    (0..len).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

pub fn assert_close(actual: &[f64], expected: &[f64], tol: f64) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a - e).abs() <= tol * (1.0 + e.abs()),
            "element {i}: {a} vs {e}"
        );
    }
}

/// Column-major `op(A)(i, j)` with leading dimension `ld`.
pub fn op(a: &[f64], trans: bool, i: usize, j: usize, ld: usize) -> f64 {
    if trans {
        a[j + i * ld]
    } else {
        a[i + j * ld]
    }
}
