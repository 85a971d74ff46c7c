//! # vblas-core
//!
//! Shared building blocks for the vblas dispatch layer.
//!
//! This crate provides:
//! - **Operand enums**: CBLAS-valued `Transpose`, `Uplo`, `Side`, `Diag`, `Offset`.
//! - **Element types**: `BlasScalar` over f32/f64/Complex32/Complex64 plus the
//!   mixed-precision element tags.
//! - **Tags**: the `(Library, Backend)` pair a backend implementation serves.
//! - **Events**: completion tokens forming a DAG, with wait/join.
//! - **Queues**: the `Queue` seam, a threaded `HostQueue` and a step-driven
//!   `ManualQueue`.
//! - **Memory**: access-tracked `Buffer`s and 64-byte aligned unified `UsmVec`s.
//! - **Config / logging / device detection.**

pub mod buffer;
pub mod config;
pub mod devices;
pub mod error;
pub mod event;
pub mod graph;
pub mod host_queue;
pub mod layout;
pub mod logging;
pub mod manual_queue;
pub mod queue;
pub mod routine;
pub mod scalar;
pub mod tag;
pub mod usm;

pub use buffer::{AccessMode, Buffer, BufferAccess};
pub use config::BlasConfig;
pub use error::{BlasError, Result};
pub use event::{Event, EventId, EventStatus};
pub use graph::{GraphError, TaskGraph};
pub use host_queue::{HostQueue, HostQueueBuilder};
pub use layout::{Diag, Layout, Offset, Side, Transpose, Uplo};
pub use manual_queue::ManualQueue;
pub use queue::{Kernel, Queue, Submission};
pub use routine::{Level, Routine};
pub use scalar::{BlasScalar, ComplexScalar, DType, Element, EntryPoint, RealScalar};
pub use tag::{Backend, Library, Tag};
pub use usm::{ConstPtr, MutPtr, UsmVec};

pub use half::{bf16, f16};
pub use num_complex::{Complex32, Complex64};
