//! Mount establishment.

use libfuse_fs::passthrough::{new_passthroughfs_layer, PassthroughFs};
use rfuse3::raw::Session;
use tracing::{info, warn};

use crate::config::{MountConfig, MountMode};

use super::error::MountError;
use super::session::MountSession;

/// Establishes mounts from a validated configuration.
pub struct MountController {
    config: MountConfig,
}

impl MountController {
    pub fn new(config: MountConfig) -> Self {
        Self { config }
    }

    /// Build the passthrough backend and mount it.
    ///
    /// Backend construction failure and mount failure are both terminal;
    /// nothing is mounted when an error is returned, so there is nothing
    /// to unmount either.
    pub async fn mount(&self) -> Result<MountSession, MountError> {
        let source = self.config.source().to_path_buf();
        let mountpoint = self.config.mountpoint().to_path_buf();

        let backend = self.backend().await?;
        let handle = match self.config.mount_mode() {
            MountMode::Helper => {
                Session::new(self.config.mount_options())
                    .mount_with_unprivileged(backend, &mountpoint)
                    .await
            }
            MountMode::Direct { strict: true } => {
                Session::new(self.config.mount_options())
                    .mount(backend, &mountpoint)
                    .await
            }
            MountMode::Direct { strict: false } => {
                match Session::new(self.config.mount_options())
                    .mount(backend, &mountpoint)
                    .await
                {
                    Ok(handle) => Ok(handle),
                    Err(err) => {
                        warn!(
                            mountpoint = %mountpoint.display(),
                            error = %err,
                            "direct mount failed, retrying through the helper"
                        );
                        // the failed mount consumed the backend
                        let backend = self.backend().await?;
                        Session::new(self.config.mount_options())
                            .mount_with_unprivileged(backend, &mountpoint)
                            .await
                    }
                }
            }
        }
        .map_err(|err| MountError::Mount {
            source_dir: source.clone(),
            mountpoint: mountpoint.clone(),
            source: err,
        })?;

        info!(
            source = %source.display(),
            mountpoint = %mountpoint.display(),
            "mounted"
        );
        Ok(MountSession::new(handle, source, mountpoint))
    }

    async fn backend(&self) -> Result<PassthroughFs, MountError> {
        let source = self.config.source();
        new_passthroughfs_layer(&source.to_string_lossy())
            .await
            .map_err(|e| MountError::Backend {
                path: source.to_path_buf(),
                source: e.into(),
            })
    }
}
