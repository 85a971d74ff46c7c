//! Backend implementations.

pub mod reference;

#[cfg(feature = "mkl")]
pub mod mkl;
