//! Ordering and failure propagation across submissions.

mod common;

use std::collections::HashMap;
use std::ptr::{null, null_mut};

use common::Recorder;
use vblas::{
    Blas, BlasError, Buffer, DType, EventId, EventStatus, HostQueue, ManualQueue, Queue, Routine,
    Transpose,
};

fn labels(events: &[vblas::Event]) -> Vec<&str> {
    events.iter().map(|e| e.label()).collect()
}

#[test]
fn test_usm_dependency_gates_execution() {
    let recorder = Recorder::host();
    let blas = Blas::new(recorder.clone());
    let queue = ManualQueue::default();

    let gate = queue.user_event("gate");
    let (scal, axpy, copy) = unsafe {
        let scal = blas.scal_usm(&queue, 2, 3.0f64, null_mut(), 1, &[gate.clone()]).unwrap();
        let axpy = blas
            .axpy_usm(&queue, 2, 1.0f64, null(), 1, null_mut(), 1, &[scal.clone()])
            .unwrap();
        let copy = blas.copy_usm(&queue, 2, null::<f64>(), 1, null_mut(), 1, &[]).unwrap();
        (scal, axpy, copy)
    };

    assert!(!queue.is_runnable(&scal));
    assert!(!queue.is_runnable(&axpy));
    assert!(queue.is_runnable(&copy));
    assert_eq!(queue.run_ready(), 1);
    assert_eq!(recorder.ran(), vec!["dcopy"]);
    assert_eq!(scal.status(), EventStatus::Pending);

    gate.set_complete();
    assert!(queue.is_runnable(&scal));
    assert!(!queue.is_runnable(&axpy));
    assert_eq!(queue.run_ready(), 2);
    assert_eq!(recorder.ran(), vec!["dcopy", "dscal", "daxpy"]);
    assert!(axpy.is_complete());
}

#[test]
fn test_join_waits_for_every_operand() {
    let recorder = Recorder::host();
    let blas = Blas::new(recorder);
    let queue = ManualQueue::default();

    let (a, b) = unsafe {
        (
            blas.scal_usm(&queue, 2, 2.0f32, null_mut(), 1, &[]).unwrap(),
            blas.scal_usm(&queue, 2, 2.0f32, null_mut(), 1, &[]).unwrap(),
        )
    };
    let joined = queue.join(&[a.clone(), b.clone()]).unwrap();
    assert_eq!(joined.dependency_ids(), &[a.id(), b.id()]);
    queue.step();
    assert!(!queue.is_runnable(&joined));
    queue.step();
    assert!(queue.is_runnable(&joined));
    queue.wait().unwrap();
    assert!(joined.is_complete());
}

#[test]
fn test_buffer_hazards_order_submissions() {
    let recorder = Recorder::host();
    let blas = Blas::new(recorder.clone());
    let queue = ManualQueue::default();
    let x = Buffer::from_slice(&[1.0f64; 4]);
    let y = Buffer::<f64>::zeroed(4);
    let z = Buffer::<f64>::zeroed(4);
    let r = Buffer::<f64>::zeroed(1);

    blas.scal(&queue, 4, 2.0, &x, 1).unwrap(); // writes x
    blas.copy(&queue, 4, &x, 1, &y, 1).unwrap(); // RAW on x
    blas.dot(&queue, 4, &y, 1, &y, 1, &r).unwrap(); // RAW on y
    blas.scal(&queue, 4, 0.5, &y, 1).unwrap(); // WAR and WAW on y
    blas.axpy(&queue, 4, 1.0, &x, 1, &z, 1).unwrap(); // RAW on x only

    assert_eq!(labels(&queue.runnable()), vec!["dscal"]);
    queue.step();
    assert_eq!(labels(&queue.runnable()), vec!["dcopy", "daxpy"]);
    queue.step();
    assert_eq!(labels(&queue.runnable()), vec!["ddot", "daxpy"]);
    queue.step();
    assert_eq!(labels(&queue.runnable()), vec!["dscal", "daxpy"]);
    assert_eq!(queue.run_ready(), 2);
    assert_eq!(recorder.ran(), vec!["dscal", "dcopy", "ddot", "dscal", "daxpy"]);
}

#[test]
fn test_concurrent_reads_are_not_ordered() {
    let recorder = Recorder::host();
    let blas = Blas::new(recorder);
    let queue = ManualQueue::default();
    let x = Buffer::from_slice(&[1.0f32; 8]);
    let r1 = Buffer::<f32>::zeroed(1);
    let r2 = Buffer::<f32>::zeroed(1);

    blas.asum(&queue, 8, &x, 1, &r1).unwrap();
    blas.nrm2(&queue, 8, &x, 1, &r2).unwrap();
    assert_eq!(labels(&queue.runnable()), vec!["sasum", "snrm2"]);
}

#[test]
fn test_failure_propagates_to_dependents() {
    let recorder = Recorder::host().failing(Routine::Gemm, DType::F64);
    let blas = Blas::new(recorder.clone());
    let queue = ManualQueue::default();

    let nt = Transpose::NoTrans;
    let (gemm, axpy, copy, scal) = unsafe {
        let (a, b) = (null::<f64>(), null::<f64>());
        let gemm = blas
            .gemm_usm(&queue, nt, nt, 2, 2, 2, 1.0, a, 2, b, 2, 0.0, null_mut(), 2, &[])
            .unwrap();
        let axpy = blas
            .axpy_usm(&queue, 4, 1.0f64, null(), 1, null_mut(), 1, &[gemm.clone()])
            .unwrap();
        let copy = blas
            .copy_usm(&queue, 4, null::<f64>(), 1, null_mut(), 1, &[axpy.clone()])
            .unwrap();
        let scal = blas.scal_usm(&queue, 4, 2.0f64, null_mut(), 1, &[]).unwrap();
        (gemm, axpy, copy, scal)
    };

    assert_eq!(queue.run_ready(), 4);
    assert_eq!(
        gemm.wait().unwrap_err(),
        BlasError::Backend {
            routine: Routine::Gemm,
            message: "injected failure".to_string(),
        }
    );
    assert_eq!(
        axpy.status(),
        EventStatus::Failed(BlasError::DependencyFailed { event: gemm.id() })
    );
    assert_eq!(
        copy.status(),
        EventStatus::Failed(BlasError::DependencyFailed { event: axpy.id() })
    );
    assert!(scal.is_complete());
    // Dependents never reach the backend.
    assert_eq!(recorder.ran(), vec!["dgemm", "dscal"]);
    assert!(matches!(queue.wait(), Err(BlasError::Backend { .. })));
}

#[test]
fn test_host_queue_graph_records_buffer_order() {
    let recorder = Recorder::host();
    let blas = Blas::new(recorder.clone());
    let queue = HostQueue::builder().workers(4).record_graph(true).build().unwrap();
    let x = Buffer::from_slice(&[1.0f64; 16]);
    let y = Buffer::<f64>::zeroed(16);
    let r = Buffer::<f64>::zeroed(1);

    blas.scal(&queue, 16, 2.0, &x, 1).unwrap();
    blas.copy(&queue, 16, &x, 1, &y, 1).unwrap();
    blas.nrm2(&queue, 16, &y, 1, &r).unwrap();
    blas.axpy(&queue, 16, 1.0, &x, 1, &y, 1).unwrap();
    queue.wait().unwrap();

    let graph = queue.graph().unwrap();
    let ids: HashMap<&str, EventId> = graph
        .topological_order()
        .into_iter()
        .filter_map(|id| graph.label(id).map(|label| (label, id)))
        .collect();
    assert!(graph.is_ordered_after(ids["dcopy"], ids["dscal"]));
    assert!(graph.is_ordered_after(ids["dnrm2"], ids["dcopy"]));
    assert!(graph.is_ordered_after(ids["daxpy"], ids["dnrm2"]));
    assert_eq!(recorder.ran(), vec!["dscal", "dcopy", "dnrm2", "daxpy"]);
}

#[test]
fn test_host_queue_reports_failure_on_wait() {
    let recorder = Recorder::host().failing(Routine::Axpy, DType::F32);
    let blas = Blas::new(recorder);
    let queue = HostQueue::builder().workers(2).build().unwrap();
    let x = Buffer::from_slice(&[1.0f32; 4]);
    let y = Buffer::<f32>::zeroed(4);

    blas.axpy(&queue, 4, 1.0, &x, 1, &y, 1).unwrap();
    let err = queue.wait().unwrap_err();
    assert!(matches!(err, BlasError::Backend { routine: Routine::Axpy, .. }));
    // The failed writer surfaces on host access too.
    assert!(y.to_vec().is_err());
}
