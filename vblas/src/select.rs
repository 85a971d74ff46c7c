//! Backend factory.
//!
//! The configured `(library, backend)` pair is turned into a concrete
//! backend once, and a [`BackendVisitor`] receives the resulting
//! `Blas<B>`. Everything past that point is statically dispatched.
//!
//! ```no_run
//! use vblas::{select, BackendVisitor, Blas, BlasConfig, NumericBackend};
//!
//! struct Name;
//!
//! impl BackendVisitor for Name {
//!     type Output = String;
//!     fn visit<B: NumericBackend>(self, blas: Blas<B>) -> String {
//!         blas.tag().to_string()
//!     }
//! }
//!
//! let config = BlasConfig::from_env().unwrap();
//! config.init_logging();
//! let name = select::with_backend(&config, Name).unwrap();
//! println!("running on {name}");
//! ```

use vblas_core::{devices, Backend, BlasConfig, BlasError, Library, Result, Tag};

use crate::backend::NumericBackend;
use crate::backends::reference::ReferenceBackend;
use crate::router::Blas;

/// Receives the backend chosen by [`with_backend`].
pub trait BackendVisitor {
    type Output;

    fn visit<B: NumericBackend>(self, blas: Blas<B>) -> Self::Output;
}

/// Build the backend for `config` and pass it to `visitor`.
///
/// Pairs outside the vendor matrix, or whose implementation is not compiled
/// into this binary, fail with [`BlasError::UnsupportedBackend`].
pub fn with_backend<V: BackendVisitor>(config: &BlasConfig, visitor: V) -> Result<V::Output> {
    config.validate()?;
    let tag = config.tag();
    match (config.library, config.backend) {
        (Library::Reference, backend) => {
            let blas = Blas::new(ReferenceBackend::new(backend)?);
            tracing::debug!(tag = %tag, "selected backend");
            Ok(visitor.visit(blas))
        }
        #[cfg(feature = "mkl")]
        (Library::IntelMkl, Backend::IntelCpu) => {
            let blas = Blas::new(crate::backends::mkl::MklBackend::new());
            tracing::debug!(tag = %tag, "selected backend");
            Ok(visitor.visit(blas))
        }
        (library, backend) => {
            tracing::debug!(tag = %tag, "backend not compiled in");
            Err(BlasError::UnsupportedBackend {
                library,
                backend,
                reason: "implementation not compiled into this build".to_string(),
            })
        }
    }
}

/// Tag pairs this build can construct.
pub fn available() -> Vec<Tag> {
    let mut tags = Vec::with_capacity(3);
    #[cfg(feature = "mkl")]
    tags.push(Tag::new(Library::IntelMkl, Backend::IntelCpu));
    tags.push(Tag::new(Library::Reference, Backend::IntelCpu));
    tags.push(Tag::new(Library::Reference, Backend::Host));
    tags
}

/// The best compiled-in pair for the devices on this machine.
pub fn auto_config() -> BlasConfig {
    let caps = devices::detect();
    let built = available();
    let tag = built
        .iter()
        .copied()
        .find(|tag| tag.library != Library::Reference && caps.has(tag.backend))
        .unwrap_or_else(|| Tag::new(Library::Reference, Backend::Host));
    tracing::info!(tag = %tag, cores = caps.num_cores, "auto-selected backend");
    BlasConfig::new(tag.library, tag.backend)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TagOf;

    impl BackendVisitor for TagOf {
        type Output = Tag;

        fn visit<B: NumericBackend>(self, blas: Blas<B>) -> Tag {
            blas.tag()
        }
    }

    #[test]
    fn test_reference_host_is_always_available() {
        let tag = with_backend(&BlasConfig::default(), TagOf).unwrap();
        assert_eq!(tag, Tag::new(Library::Reference, Backend::Host));
        assert!(available().contains(&tag));
    }

    #[test]
    fn test_reference_on_intel_cpu() {
        let config = BlasConfig::new(Library::Reference, Backend::IntelCpu);
        let tag = with_backend(&config, TagOf).unwrap();
        assert_eq!(tag.backend, Backend::IntelCpu);
    }

    #[test]
    fn test_cublas_not_compiled_in() {
        let config = BlasConfig::new(Library::Cublas, Backend::NvidiaGpu);
        let err = with_backend(&config, TagOf).unwrap_err();
        assert!(matches!(
            err,
            BlasError::UnsupportedBackend {
                library: Library::Cublas,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_pair_rejected_before_construction() {
        let config = BlasConfig::new(Library::Reference, Backend::NvidiaGpu);
        let err = with_backend(&config, TagOf).unwrap_err();
        assert!(matches!(err, BlasError::UnsupportedBackend { .. }));
    }

    #[test]
    fn test_auto_config_is_buildable() {
        let config = auto_config();
        assert!(with_backend(&config, TagOf).is_ok());
    }
}
