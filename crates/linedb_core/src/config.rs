//! Store configuration.

use std::path::PathBuf;

/// Which concrete storage backend a store uses.
///
/// The selection is an explicit value passed into [`crate::Store::open`],
/// resolved at startup - never a string-based dynamic lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// Persistent flat file under the configured data directory.
    #[default]
    File,
    /// In-memory backend for tests and ephemeral stores.
    Memory,
}

/// What to do when a persisted line cannot be decoded at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriftPolicy {
    /// Fail the load. This is the default: silently dropping records
    /// would corrupt the derived index.
    #[default]
    Abort,
    /// Skip the line and report it via a `tracing` warning.
    Skip,
}

/// Configuration for opening a store.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the per-record-type data files.
    pub data_dir: PathBuf,

    /// Which storage backend to use.
    pub backend: BackendKind,

    /// How to treat undecodable lines during startup replay.
    pub drift_policy: DriftPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./linedb_data"),
            backend: BackendKind::File,
            drift_policy: DriftPolicy::Abort,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the data directory.
    #[must_use]
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_dir = path.into();
        self
    }

    /// Sets the storage backend.
    #[must_use]
    pub const fn backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    /// Sets the drift policy for startup replay.
    #[must_use]
    pub const fn drift_policy(mut self, policy: DriftPolicy) -> Self {
        self.drift_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.backend, BackendKind::File);
        assert_eq!(config.drift_policy, DriftPolicy::Abort);
        assert_eq!(config.data_dir, PathBuf::from("./linedb_data"));
    }

    #[test]
    fn builder_setters() {
        let config = Config::new()
            .data_dir("/tmp/db")
            .backend(BackendKind::Memory)
            .drift_policy(DriftPolicy::Skip);

        assert_eq!(config.data_dir, PathBuf::from("/tmp/db"));
        assert_eq!(config.backend, BackendKind::Memory);
        assert_eq!(config.drift_policy, DriftPolicy::Skip);
    }
}
