//! Backend selection and queue configuration.
//!
//! Selection is explicit: a `BlasConfig` value is built by the caller (from
//! code, from serde, or from the environment) and passed to the factory.
//! Nothing here is process-global.

use serde::{Deserialize, Serialize};

use crate::error::{BlasError, Result};
use crate::host_queue::HostQueue;
use crate::tag::{Backend, Library, Tag};

pub const ENV_LIBRARY: &str = "VBLAS_LIBRARY";
pub const ENV_BACKEND: &str = "VBLAS_BACKEND";
pub const ENV_HOST_WORKERS: &str = "VBLAS_HOST_WORKERS";
pub const ENV_RECORD_GRAPH: &str = "VBLAS_RECORD_GRAPH";
pub const ENV_LOG: &str = "VBLAS_LOG";

fn default_log_filter() -> String {
    "warn".to_string()
}

/// Which library/backend to build, and how to run host work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlasConfig {
    pub library: Library,
    pub backend: Backend,
    /// Host queue worker threads; `None` uses one per core.
    pub host_workers: Option<usize>,
    /// Record submissions in a task graph.
    pub record_graph: bool,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for BlasConfig {
    fn default() -> Self {
        Self {
            library: Library::Reference,
            backend: Backend::Host,
            host_workers: None,
            record_graph: false,
            log_filter: default_log_filter(),
        }
    }
}

impl BlasConfig {
    pub fn new(library: Library, backend: Backend) -> Self {
        Self {
            library,
            backend,
            ..Self::default()
        }
    }

    pub fn tag(&self) -> Tag {
        Tag::new(self.library, self.backend)
    }

    /// Defaults overridden by `VBLAS_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(v) = lookup(ENV_LIBRARY) {
            config.library = v.parse()?;
        }
        if let Some(v) = lookup(ENV_BACKEND) {
            config.backend = v.parse()?;
        }
        if let Some(v) = lookup(ENV_HOST_WORKERS) {
            let n = v
                .trim()
                .parse::<usize>()
                .map_err(|e| BlasError::Config(format!("{ENV_HOST_WORKERS}={v}: {e}")))?;
            config.host_workers = Some(n);
        }
        if let Some(v) = lookup(ENV_RECORD_GRAPH) {
            config.record_graph = parse_bool(ENV_RECORD_GRAPH, &v)?;
        }
        if let Some(v) = lookup(ENV_LOG) {
            config.log_filter = v;
        }
        config.validate()?;
        Ok(config)
    }

    /// Reject pairs no vendor library can serve and nonsensical settings.
    pub fn validate(&self) -> Result<()> {
        if !self.library.targets(self.backend) {
            return Err(BlasError::UnsupportedBackend {
                library: self.library,
                backend: self.backend,
                reason: "library does not target this backend".to_string(),
            });
        }
        if self.host_workers == Some(0) {
            return Err(BlasError::Config("host_workers must be at least 1".into()));
        }
        Ok(())
    }

    /// Install the `tracing` subscriber with `log_filter` as the default
    /// filter. Returns `false` if a subscriber was already installed.
    pub fn init_logging(&self) -> bool {
        crate::logging::init(&self.log_filter)
    }

    /// A host queue configured from this config.
    pub fn host_queue(&self) -> Result<HostQueue> {
        let mut builder = HostQueue::builder()
            .backend(self.backend)
            .record_graph(self.record_graph);
        if let Some(n) = self.host_workers {
            builder = builder.workers(n);
        }
        builder.build()
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(BlasError::Config(format!("{key}: expected a boolean, got `{other}`"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = BlasConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, BlasConfig::default());
        assert_eq!(config.tag(), Tag::new(Library::Reference, Backend::Host));
    }

    #[test]
    fn test_env_overrides() {
        let config = BlasConfig::from_lookup(lookup(&[
            (ENV_LIBRARY, "intelmkl"),
            (ENV_BACKEND, "intelcpu"),
            (ENV_HOST_WORKERS, "3"),
            (ENV_RECORD_GRAPH, "yes"),
            (ENV_LOG, "vblas=trace"),
        ]))
        .unwrap();
        assert_eq!(config.library, Library::IntelMkl);
        assert_eq!(config.backend, Backend::IntelCpu);
        assert_eq!(config.host_workers, Some(3));
        assert!(config.record_graph);
        assert_eq!(config.log_filter, "vblas=trace");
    }

    #[test]
    fn test_invalid_pair_rejected() {
        let err = BlasConfig::from_lookup(lookup(&[
            (ENV_LIBRARY, "cublas"),
            (ENV_BACKEND, "intelcpu"),
        ]))
        .unwrap_err();
        assert!(err.is_unsupported());
        assert!(BlasConfig::from_lookup(lookup(&[(ENV_HOST_WORKERS, "many")])).is_err());
        assert!(BlasConfig::from_lookup(lookup(&[(ENV_RECORD_GRAPH, "maybe")])).is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let json = r#"{"library":"intelmkl","backend":"intelcpu","host_workers":2}"#;
        let config: BlasConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.library, Library::IntelMkl);
        assert_eq!(config.host_workers, Some(2));
        assert!(!config.record_graph);
        assert_eq!(config.log_filter, "warn");
        let json = serde_json::to_string(&config).unwrap();
        let back: BlasConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_init_logging_installs_once() {
        let config = BlasConfig::from_lookup(lookup(&[(ENV_LOG, "vblas_core=debug")])).unwrap();
        let _first = config.init_logging();
        assert!(!config.init_logging());
        // Still a no-op once installed, even with a malformed filter.
        let bad = BlasConfig {
            log_filter: "[[".to_string(),
            ..BlasConfig::default()
        };
        assert!(!bad.init_logging());
    }

    #[test]
    fn test_host_queue_from_config() {
        let mut config = BlasConfig::default();
        config.host_workers = Some(2);
        let q = config.host_queue().unwrap();
        assert_eq!(q.num_workers(), 2);
    }
}
