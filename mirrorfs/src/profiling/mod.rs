//! Operational profiling facilities.
//!
//! Two independent, optional diagnostics: a continuous CPU capture for
//! the process lifetime and on-demand heap snapshots triggered by
//! SIGUSR1. Failing to open the CPU destination at startup is fatal (the
//! user explicitly asked for the profile); an individual heap snapshot
//! failure is logged and the listener keeps serving later triggers.

mod cpu;
mod heap;

pub use cpu::CpuProfile;
pub use heap::HeapSnapshots;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from the profiling facilities.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// A profile destination file could not be created.
    #[error("failed to create profile file {}: {source}", path.display())]
    Create { path: PathBuf, source: io::Error },

    /// The CPU profiler itself failed.
    #[error("cpu profiler: {0}")]
    Profiler(#[from] pprof::Error),

    /// The captured CPU profile could not be encoded.
    #[error("failed to encode cpu profile: {0}")]
    Encode(String),

    /// A profile destination file could not be written.
    #[error("failed to write profile file {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    /// The allocator refused to dump a heap snapshot.
    #[error("heap snapshot {} was not written: {source}", path.display())]
    HeapDump {
        path: PathBuf,
        source: tikv_jemalloc_ctl::Error,
    },

    /// A snapshot path contained an interior NUL byte.
    #[error("profile path {} contains an interior NUL byte", path.display())]
    InvalidPath { path: PathBuf },

    /// The snapshot trigger listener could not be installed.
    #[error("failed to install snapshot trigger listener: {0}")]
    Listener(#[from] io::Error),
}

/// Optional diagnostics, each independently enabled.
#[derive(Clone, Debug, Default)]
pub struct ProfilingConfig {
    /// Destination for the continuous CPU profile (pprof format).
    pub cpu_profile: Option<PathBuf>,

    /// Optional flamegraph rendering of the same capture.
    pub flamegraph: Option<PathBuf>,

    /// Prefix for heap snapshot files (`<prefix>-<seq>.heap`).
    pub heap_snapshot_prefix: Option<PathBuf>,
}

impl ProfilingConfig {
    /// Whether any facility is enabled.
    pub fn any_enabled(&self) -> bool {
        self.cpu_profile.is_some() || self.heap_snapshot_prefix.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_disabled() {
        assert!(!ProfilingConfig::default().any_enabled());
    }

    #[test]
    fn test_either_facility_enables() {
        let config = ProfilingConfig {
            cpu_profile: Some(PathBuf::from("/tmp/cpu.pb")),
            ..ProfilingConfig::default()
        };
        assert!(config.any_enabled());

        let config = ProfilingConfig {
            heap_snapshot_prefix: Some(PathBuf::from("/tmp/heap")),
            ..ProfilingConfig::default()
        };
        assert!(config.any_enabled());
    }
}
