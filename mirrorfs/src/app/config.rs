//! Application configuration.

use crate::config::MountConfig;
use crate::profiling::ProfilingConfig;

/// Top-level configuration for one mirrorfs run.
///
/// Combines the mount description with the optional diagnostics so the
/// whole run is wired from a single value.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// The mount to establish and supervise.
    pub mount: MountConfig,

    /// Optional CPU/heap diagnostics.
    pub profiling: ProfilingConfig,
}

impl AppConfig {
    /// Create a configuration with diagnostics disabled.
    pub fn new(mount: MountConfig) -> Self {
        Self {
            mount,
            profiling: ProfilingConfig::default(),
        }
    }

    /// Enable diagnostics.
    pub fn with_profiling(mut self, profiling: ProfilingConfig) -> Self {
        self.profiling = profiling;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_new_disables_profiling() {
        let config = AppConfig::new(MountConfig::new("/src", "/mnt"));
        assert!(!config.profiling.any_enabled());
    }

    #[test]
    fn test_with_profiling() {
        let profiling = ProfilingConfig {
            cpu_profile: Some(PathBuf::from("/tmp/cpu.pb")),
            ..ProfilingConfig::default()
        };
        let config = AppConfig::new(MountConfig::new("/src", "/mnt")).with_profiling(profiling);
        assert!(config.profiling.any_enabled());
    }
}
