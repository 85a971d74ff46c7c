//! Operation tags: which vendor library runs a call, on which device class.
//!
//! A `(Library, Backend)` pair is fixed when a backend implementation is
//! built. It never travels with individual calls.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BlasError;

/// Vendor numerical library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Library {
    /// Intel oneMKL / MKL.
    IntelMkl,
    /// NVIDIA cuBLAS.
    Cublas,
    /// Pure-Rust host kernels shipped with vblas.
    #[default]
    Reference,
}

/// Device class the library executes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Generic host execution.
    #[default]
    Host,
    IntelCpu,
    IntelGpu,
    NvidiaGpu,
}

impl Library {
    pub const ALL: [Library; 3] = [Library::IntelMkl, Library::Cublas, Library::Reference];

    pub fn as_str(self) -> &'static str {
        match self {
            Library::IntelMkl => "intelmkl",
            Library::Cublas => "cublas",
            Library::Reference => "reference",
        }
    }

    /// Whether this library can execute on `backend` at all.
    ///
    /// This is the vendor matrix, not what is compiled into the current
    /// binary; see `vblas::select::available` for that.
    pub fn targets(self, backend: Backend) -> bool {
        matches!(
            (self, backend),
            (Library::IntelMkl, Backend::IntelCpu)
                | (Library::IntelMkl, Backend::IntelGpu)
                | (Library::Cublas, Backend::NvidiaGpu)
                | (Library::Reference, Backend::Host)
                | (Library::Reference, Backend::IntelCpu)
        )
    }
}

impl Backend {
    pub const ALL: [Backend; 4] = [
        Backend::Host,
        Backend::IntelCpu,
        Backend::IntelGpu,
        Backend::NvidiaGpu,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Backend::Host => "host",
            Backend::IntelCpu => "intelcpu",
            Backend::IntelGpu => "intelgpu",
            Backend::NvidiaGpu => "nvidiagpu",
        }
    }

    pub fn is_gpu(self) -> bool {
        matches!(self, Backend::IntelGpu | Backend::NvidiaGpu)
    }
}

impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Library {
    type Err = BlasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Library::ALL
            .into_iter()
            .find(|l| l.as_str() == lower || (lower == "mkl" && *l == Library::IntelMkl))
            .ok_or_else(|| BlasError::Config(format!("unknown library `{s}`")))
    }
}

impl FromStr for Backend {
    type Err = BlasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Backend::ALL
            .into_iter()
            .find(|b| b.as_str() == lower)
            .ok_or_else(|| BlasError::Config(format!("unknown backend `{s}`")))
    }
}

/// The `(library, backend)` pair a backend implementation is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub library: Library,
    pub backend: Backend,
}

impl Tag {
    pub fn new(library: Library, backend: Backend) -> Self {
        Self { library, backend }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.library, self.backend)
    }
}
