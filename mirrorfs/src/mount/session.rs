//! Live mount session.

use std::path::{Path, PathBuf};

use rfuse3::raw::MountHandle;
use tracing::info;

use super::error::MountError;
use super::shutdown::Shutdown;

/// Handle to a mounted passthrough filesystem.
///
/// Owns the single OS mount resource of the process; the engine handle
/// lives behind an `Option` and [`serve`](Self::serve) consumes the
/// session, so the mount can only ever be released once.
pub struct MountSession {
    handle: Option<MountHandle>,
    source: PathBuf,
    mountpoint: PathBuf,
}

impl MountSession {
    pub(crate) fn new(handle: MountHandle, source: PathBuf, mountpoint: PathBuf) -> Self {
        Self {
            handle: Some(handle),
            source,
            mountpoint,
        }
    }

    /// Source directory the mount exposes.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Where the filesystem is visible.
    pub fn mountpoint(&self) -> &Path {
        &self.mountpoint
    }

    /// Serve filesystem requests until the mount is torn down.
    ///
    /// Blocks until either the kernel connection closes (an external
    /// `umount` or `fusermount -u`) or `shutdown` delivers, in which case
    /// the session unmounts itself. Both paths end with the mount
    /// released and an "unmounted" record logged before returning.
    pub async fn serve(mut self, shutdown: &mut Shutdown) -> Result<(), MountError> {
        let Some(mut handle) = self.handle.take() else {
            return Ok(());
        };

        let serving = &mut handle;
        tokio::select! {
            res = serving => {
                info!(mountpoint = %self.mountpoint.display(), "mount torn down externally");
                res.map_err(MountError::Serve)?;
            }
            _ = shutdown.recv() => {
                info!(mountpoint = %self.mountpoint.display(), "unmounting");
                handle.unmount().await.map_err(MountError::Unmount)?;
            }
        }

        info!(
            source = %self.source.display(),
            mountpoint = %self.mountpoint.display(),
            "unmounted"
        );
        Ok(())
    }
}
