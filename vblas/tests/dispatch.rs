//! Routing: every routine reaches the backend under the right entry point,
//! and rejected calls leave the queue untouched.

mod common;

use std::ptr::{null, null_mut};

use common::Recorder;
use vblas::{
    AxpyGroup, Blas, BlasError, BlasScalar, Buffer, Complex32, Complex64, ComplexScalar, DType,
    Diag, Event, GemmGroup, Library, ManualQueue, Offset, Queue, RealScalar, Routine, Side,
    Transpose, Uplo,
};

type Real<T> = <T as BlasScalar>::Real;

fn setup() -> (Blas<Recorder>, Recorder, ManualQueue) {
    let recorder = Recorder::host();
    (Blas::new(recorder.clone()), recorder, ManualQueue::default())
}

fn labels(prefix: &str, names: &[&str]) -> Vec<String> {
    names.iter().map(|n| format!("{prefix}{n}")).collect()
}

const COMMON: &[&str] = &[
    "asum", "axpy", "copy", "nrm2", "rot", "rotg", "scal", "swap", "gbmv", "gemv", "tbmv",
    "tbsv", "tpmv", "tpsv", "trmv", "trsv", "gemm", "gemmt", "symm", "syr2k", "syrk", "trmm",
    "trsm", "gemm_batch", "trsm_batch",
];

/// Every routine defined for all four element types, raw-pointer form.
unsafe fn submit_common<T: BlasScalar>(
    blas: &Blas<Recorder>,
    q: &ManualQueue,
) -> vblas::Result<()> {
    let (x, y, a) = (null::<T>(), null_mut::<T>(), null::<T>());
    let (z, r) = (T::default(), <Real<T>>::default());
    let (nt, up, nu) = (Transpose::NoTrans, Uplo::Upper, Diag::NonUnit);
    let deps: &[Event] = &[];

    blas.asum_usm(q, 2, x, 1, null_mut::<Real<T>>(), deps)?;
    blas.axpy_usm(q, 2, z, x, 1, y, 1, deps)?;
    blas.copy_usm(q, 2, x, 1, y, 1, deps)?;
    blas.nrm2_usm(q, 2, x, 1, null_mut::<Real<T>>(), deps)?;
    blas.rot_usm(q, 2, y, 1, y, 1, r, r, deps)?;
    blas.rotg_usm(q, y, y, null_mut::<Real<T>>(), y, deps)?;
    blas.scal_usm(q, 2, z, y, 1, deps)?;
    blas.swap_usm(q, 2, y, 1, y, 1, deps)?;

    blas.gbmv_usm(q, nt, 2, 2, 0, 0, z, a, 1, x, 1, z, y, 1, deps)?;
    blas.gemv_usm(q, nt, 2, 2, z, a, 2, x, 1, z, y, 1, deps)?;
    blas.tbmv_usm(q, up, nt, nu, 2, 0, a, 1, y, 1, deps)?;
    blas.tbsv_usm(q, up, nt, nu, 2, 0, a, 1, y, 1, deps)?;
    blas.tpmv_usm(q, up, nt, nu, 2, a, y, 1, deps)?;
    blas.tpsv_usm(q, up, nt, nu, 2, a, y, 1, deps)?;
    blas.trmv_usm(q, up, nt, nu, 2, a, 2, y, 1, deps)?;
    blas.trsv_usm(q, up, nt, nu, 2, a, 2, y, 1, deps)?;

    blas.gemm_usm(q, nt, nt, 2, 2, 2, z, a, 2, a, 2, z, y, 2, deps)?;
    blas.gemmt_usm(q, up, nt, nt, 2, 2, z, a, 2, a, 2, z, y, 2, deps)?;
    blas.symm_usm(q, Side::Left, up, 2, 2, z, a, 2, a, 2, z, y, 2, deps)?;
    blas.syr2k_usm(q, up, nt, 2, 2, z, a, 2, a, 2, z, y, 2, deps)?;
    blas.syrk_usm(q, up, nt, 2, 2, z, a, 2, z, y, 2, deps)?;
    blas.trmm_usm(q, Side::Left, up, nt, nu, 2, 2, z, a, 2, y, 2, deps)?;
    blas.trsm_usm(q, Side::Left, up, nt, nu, 2, 2, z, a, 2, y, 2, deps)?;

    blas.gemm_batch_usm(q, nt, nt, 2, 2, 2, z, a, 2, 4, a, 2, 4, z, y, 2, 4, 3, deps)?;
    blas.trsm_batch_usm(q, Side::Left, up, nt, nu, 2, 2, z, a, 2, 4, y, 2, 4, 3, deps)?;
    Ok(())
}

const REAL_ONLY: &[&str] = &[
    "dot", "rotm", "rotmg", "ger", "sbmv", "spmv", "spr", "spr2", "symv", "syr", "syr2",
];

unsafe fn submit_real<T: RealScalar>(blas: &Blas<Recorder>, q: &ManualQueue) -> vblas::Result<()> {
    let (x, y, a) = (null::<T>(), null_mut::<T>(), null::<T>());
    let z = T::default();
    let up = Uplo::Lower;
    let deps: &[Event] = &[];

    blas.dot_usm(q, 2, x, 1, x, 1, y, deps)?;
    blas.rotm_usm(q, 2, y, 1, y, 1, x, deps)?;
    blas.rotmg_usm(q, y, y, y, z, y, deps)?;
    blas.ger_usm(q, 2, 2, z, x, 1, x, 1, y, 2, deps)?;
    blas.sbmv_usm(q, up, 2, 1, z, a, 2, x, 1, z, y, 1, deps)?;
    blas.spmv_usm(q, up, 2, z, a, x, 1, z, y, 1, deps)?;
    blas.spr_usm(q, up, 2, z, x, 1, y, deps)?;
    blas.spr2_usm(q, up, 2, z, x, 1, x, 1, y, deps)?;
    blas.symv_usm(q, up, 2, z, a, 2, x, 1, z, y, 1, deps)?;
    blas.syr_usm(q, up, 2, z, x, 1, y, 2, deps)?;
    blas.syr2_usm(q, up, 2, z, x, 1, x, 1, y, 2, deps)?;
    Ok(())
}

const COMPLEX_ONLY: &[&str] = &[
    "dotc", "dotu", "scal", "gerc", "geru", "hbmv", "hemv", "her", "her2", "hpmv", "hpr", "hpr2",
    "hemm", "herk", "her2k",
];

unsafe fn submit_complex<T: ComplexScalar>(
    blas: &Blas<Recorder>,
    q: &ManualQueue,
) -> vblas::Result<()> {
    let (x, y, a) = (null::<T>(), null_mut::<T>(), null::<T>());
    let (z, r) = (T::default(), <Real<T>>::default());
    let (up, nt) = (Uplo::Upper, Transpose::ConjTrans);
    let deps: &[Event] = &[];

    blas.dotc_usm(q, 2, x, 1, x, 1, y, deps)?;
    blas.dotu_usm(q, 2, x, 1, x, 1, y, deps)?;
    blas.scal_real_usm(q, 2, r, y, 1, deps)?;
    blas.gerc_usm(q, 2, 2, z, x, 1, x, 1, y, 2, deps)?;
    blas.geru_usm(q, 2, 2, z, x, 1, x, 1, y, 2, deps)?;
    blas.hbmv_usm(q, up, 2, 1, z, a, 2, x, 1, z, y, 1, deps)?;
    blas.hemv_usm(q, up, 2, z, a, 2, x, 1, z, y, 1, deps)?;
    blas.her_usm(q, up, 2, r, x, 1, y, 2, deps)?;
    blas.her2_usm(q, up, 2, z, x, 1, x, 1, y, 2, deps)?;
    blas.hpmv_usm(q, up, 2, z, a, x, 1, z, y, 1, deps)?;
    blas.hpr_usm(q, up, 2, r, x, 1, y, deps)?;
    blas.hpr2_usm(q, up, 2, z, x, 1, x, 1, y, deps)?;
    blas.hemm_usm(q, Side::Right, up, 2, 2, z, a, 2, a, 2, z, y, 2, deps)?;
    blas.herk_usm(q, up, nt, 2, 2, r, a, 2, r, y, 2, deps)?;
    blas.her2k_usm(q, up, nt, 2, 2, z, a, 2, a, 2, r, y, 2, deps)?;
    Ok(())
}

#[test]
fn test_common_routines_for_every_type() {
    let types = [("s", DType::F32), ("d", DType::F64), ("c", DType::C32), ("z", DType::C64)];
    for (prefix, dtype) in types {
        let (blas, recorder, queue) = setup();
        let submitted = unsafe {
            match dtype {
                DType::F32 => submit_common::<f32>(&blas, &queue),
                DType::F64 => submit_common::<f64>(&blas, &queue),
                DType::C32 => submit_common::<Complex32>(&blas, &queue),
                _ => submit_common::<Complex64>(&blas, &queue),
            }
        };
        submitted.unwrap();

        let expected = labels(prefix, COMMON);
        assert_eq!(recorder.resolved(), expected);
        assert_eq!(queue.submissions(), expected);
        // ManualQueue runs nothing until stepped.
        assert!(recorder.ran().is_empty());
        assert_eq!(queue.run_ready(), COMMON.len());
        assert_eq!(recorder.ran(), expected);
    }
}

#[test]
fn test_real_only_routines() {
    let (blas, recorder, queue) = setup();
    unsafe {
        submit_real::<f32>(&blas, &queue).unwrap();
        submit_real::<f64>(&blas, &queue).unwrap();
    }
    let mut expected = labels("s", REAL_ONLY);
    expected.extend(labels("d", REAL_ONLY));
    assert_eq!(recorder.resolved(), expected);
    queue.wait().unwrap();
}

#[test]
fn test_complex_only_routines() {
    let (blas, recorder, queue) = setup();
    unsafe {
        submit_complex::<Complex32>(&blas, &queue).unwrap();
        submit_complex::<Complex64>(&blas, &queue).unwrap();
    }
    let mut expected = labels("c", COMPLEX_ONLY);
    expected.extend(labels("z", COMPLEX_ONLY));
    assert_eq!(recorder.resolved(), expected);
    queue.wait().unwrap();
}

#[test]
fn test_iamax_labels_put_prefix_after_i() {
    let (blas, recorder, queue) = setup();
    unsafe {
        blas.iamax_usm(&queue, 3, null::<f32>(), 1, null_mut(), &[]).unwrap();
        blas.iamin_usm(&queue, 3, null::<Complex64>(), 1, null_mut(), &[]).unwrap();
    }
    assert_eq!(recorder.resolved(), vec!["isamax", "izamin"]);
}

#[test]
fn test_grouped_batches_and_extensions() {
    let (blas, recorder, queue) = setup();
    let group = GemmGroup::<f64> {
        transa: Transpose::NoTrans,
        transb: Transpose::Trans,
        m: 2,
        n: 2,
        k: 2,
        alpha: 1.0,
        lda: 2,
        ldb: 2,
        beta: 0.0,
        ldc: 2,
        a: vec![null::<f64>().into(); 2],
        b: vec![null::<f64>().into(); 2],
        c: vec![null_mut::<f64>().into(); 2],
    };
    let axpy = AxpyGroup::<Complex32> {
        n: 4,
        alpha: Complex32::new(1.0, 0.0),
        incx: 1,
        incy: 1,
        x: vec![null::<Complex32>().into(); 3],
        y: vec![null_mut::<Complex32>().into(); 3],
    };
    unsafe {
        blas.gemm_batch_groups_usm(&queue, &[group], &[]).unwrap();
        blas.axpy_batch_usm(&queue, &[axpy], &[]).unwrap();
        blas.gemm_f16_usm(
            &queue,
            Transpose::NoTrans,
            Transpose::NoTrans,
            2,
            2,
            2,
            vblas::f16::ONE,
            null(),
            2,
            null(),
            2,
            vblas::f16::ZERO,
            null_mut(),
            2,
            &[],
        )
        .unwrap();
        blas.gemm_ext_s8u8s32_usm(
            &queue,
            Transpose::NoTrans,
            Transpose::NoTrans,
            Offset::Fix,
            2,
            2,
            2,
            1.0,
            null(),
            2,
            0,
            null(),
            2,
            0,
            0.0,
            null_mut(),
            2,
            null(),
            &[],
        )
        .unwrap();
        blas.sdsdot_usm(&queue, 4, 0.5, null(), 1, null(), 1, null_mut(), &[]).unwrap();
    }
    assert_eq!(
        recorder.resolved(),
        vec!["dgemm_batch", "caxpy_batch", "hgemm", "s8_gemm_ext", "sdsdot"]
    );
}

#[test]
fn test_unsupported_fails_before_queueing() {
    let recorder = Recorder::new(Library::IntelMkl, vblas::Backend::IntelCpu)
        .rejecting(Routine::Gemmt, DType::C64);
    let blas = Blas::new(recorder.clone());
    let queue = ManualQueue::new(vblas::Backend::IntelCpu);

    let err = unsafe {
        blas.gemmt_usm(
            &queue,
            Uplo::Lower,
            Transpose::NoTrans,
            Transpose::NoTrans,
            2,
            2,
            Complex64::new(1.0, 0.0),
            null(),
            2,
            null(),
            2,
            Complex64::new(0.0, 0.0),
            null_mut(),
            2,
            &[],
        )
    }
    .unwrap_err();

    assert_eq!(
        err,
        BlasError::Unsupported {
            routine: Routine::Gemmt,
            dtype: DType::C64,
            library: Library::IntelMkl,
            backend: vblas::Backend::IntelCpu,
        }
    );
    assert!(err.is_unsupported());
    assert_eq!(queue.pending_len(), 0);
    assert!(queue.submissions().is_empty());

    // The same routine for another type still goes through.
    let accepted = unsafe {
        blas.gemmt_usm(
            &queue,
            Uplo::Lower,
            Transpose::NoTrans,
            Transpose::NoTrans,
            2,
            2,
            Complex32::new(1.0, 0.0),
            null(),
            2,
            null(),
            2,
            Complex32::new(0.0, 0.0),
            null_mut(),
            2,
            &[],
        )
    };
    accepted.unwrap();
    assert_eq!(queue.submissions(), vec!["cgemmt"]);
}

#[test]
fn test_unsupported_buffer_call_leaves_buffers_idle() {
    let recorder = Recorder::host().rejecting(Routine::Axpy, DType::F32);
    let blas = Blas::new(recorder);
    let queue = ManualQueue::default();
    let x = Buffer::from_slice(&[1.0f32; 4]);
    let y = Buffer::from_slice(&[2.0f32; 4]);

    let err = blas.axpy(&queue, 4, 1.0, &x, 1, &y, 1).unwrap_err();
    assert!(matches!(err, BlasError::Unsupported { routine: Routine::Axpy, .. }));
    assert_eq!(queue.pending_len(), 0);
    assert!(y.pending_write().is_none());
    assert_eq!(y.to_vec().unwrap(), vec![2.0; 4]);
}

#[test]
fn test_buffer_extent_checked_before_resolve() {
    let (blas, recorder, queue) = setup();
    let a = Buffer::<f64>::zeroed(5);
    let b = Buffer::<f64>::zeroed(6);
    let c = Buffer::<f64>::zeroed(6);

    // 2x3 with lda 2 needs 6 elements.
    let nt = Transpose::NoTrans;
    let err = blas
        .gemm(&queue, nt, nt, 2, 2, 3, 1.0, &a, 2, &b, 3, 0.0, &c, 2)
        .unwrap_err();
    assert!(matches!(
        err,
        BlasError::BufferTooSmall { argument: "a", required: 6, actual: 5, .. }
    ));
    assert!(recorder.resolved().is_empty());
    assert_eq!(queue.pending_len(), 0);
}

#[test]
fn test_negative_increment_extent() {
    let (blas, _, queue) = setup();
    let x = Buffer::from_slice(&[1.0f64, 2.0, 3.0, 4.0, 5.0]);
    let y = Buffer::<f64>::zeroed(3);
    // n = 3 at |inc| = 2 spans 5 elements regardless of sign.
    blas.copy(&queue, 3, &x, -2, &y, 1).unwrap();
    let err = blas.copy(&queue, 3, &y, -2, &x, 1).unwrap_err();
    assert!(matches!(err, BlasError::BufferTooSmall { argument: "x", .. }));
}

#[test]
fn test_ragged_group_rejected() {
    let (blas, recorder, queue) = setup();
    let group = AxpyGroup::<f64> {
        n: 2,
        alpha: 1.0,
        incx: 1,
        incy: 1,
        x: vec![null::<f64>().into(); 2],
        y: vec![null_mut::<f64>().into(); 3],
    };
    let err = unsafe { blas.axpy_batch_usm(&queue, &[group], &[]) }.unwrap_err();
    assert!(matches!(err, BlasError::InvalidArgument { argument: "groups", .. }));
    assert!(recorder.resolved().is_empty());
    assert_eq!(queue.pending_len(), 0);
}

#[test]
fn test_usm_event_carries_entry_label() {
    let (blas, _, queue) = setup();
    let event = unsafe {
        blas.scal_usm(&queue, 4, Complex64::new(2.0, 0.0), null_mut(), 1, &[]).unwrap()
    };
    assert_eq!(event.label(), "zscal");
    assert!(!event.is_settled());
    queue.step();
    assert!(event.is_complete());
}
