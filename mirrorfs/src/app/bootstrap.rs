//! Application bootstrap implementation.

use tokio::runtime::Runtime;
use tracing::error;

use super::config::AppConfig;
use super::error::AppError;
use crate::mount::{MountController, MountError, Shutdown};
use crate::profiling::{CpuProfile, HeapSnapshots};

/// A single mirrorfs run: one mount, supervised from establishment to
/// release.
///
/// The run sequence is fixed:
/// 1. Validate the mount configuration.
/// 2. Start the CPU capture; an unwritable destination is fatal here,
///    before anything is mounted.
/// 3. Create the runtime, arm the heap snapshot listener and the
///    shutdown stream, mount, and serve until teardown.
/// 4. Finalize the CPU capture, whatever the serve outcome was.
pub struct MirrorFsApp {
    config: AppConfig,
}

impl MirrorFsApp {
    /// Create an application from a resolved configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Run to completion.
    ///
    /// Blocks the calling thread until the mount is released. Returns the
    /// first fatal error; CPU-capture finalization failures after the
    /// serve has ended are logged, not returned, so they never mask the
    /// run's own outcome or prevent exit.
    pub fn run(self) -> Result<(), AppError> {
        self.config.mount.validate()?;

        let cpu_profile = match self.config.profiling.cpu_profile.as_deref() {
            Some(path) => Some(CpuProfile::start(
                path,
                self.config.profiling.flamegraph.as_deref(),
            )?),
            None => None,
        };

        let runtime = Runtime::new().map_err(|e| AppError::RuntimeCreation(e.to_string()))?;
        let result = runtime.block_on(self.serve());

        if let Some(profile) = cpu_profile {
            if let Err(e) = profile.finish() {
                error!(error = %e, "failed to finalize cpu profile");
            }
        }

        result
    }

    async fn serve(&self) -> Result<(), AppError> {
        let _snapshots = match self.config.profiling.heap_snapshot_prefix.as_deref() {
            Some(prefix) => Some(HeapSnapshots::spawn(prefix)?),
            None => None,
        };

        let mut shutdown = Shutdown::install().map_err(MountError::Signal)?;
        let session = MountController::new(self.config.mount.clone()).mount().await?;
        session.serve(&mut shutdown).await?;
        Ok(())
    }
}
