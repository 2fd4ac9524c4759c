//! Mount lifecycle errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from backend construction, mounting, and teardown.
#[derive(Debug, Error)]
pub enum MountError {
    /// The passthrough backend could not be built from the source
    /// directory.
    #[error("failed to open source directory {}: {source}", path.display())]
    Backend { path: PathBuf, source: io::Error },

    /// The OS-level mount failed.
    #[error("failed to mount {} at {}: {source}", source_dir.display(), mountpoint.display())]
    Mount {
        source_dir: PathBuf,
        mountpoint: PathBuf,
        source: io::Error,
    },

    /// The serving loop ended with an error.
    #[error("filesystem session failed: {0}")]
    Serve(#[source] io::Error),

    /// Unmounting the session failed.
    #[error("failed to unmount: {0}")]
    Unmount(#[source] io::Error),

    /// The shutdown signal listener could not be installed.
    #[error("failed to install signal listener: {0}")]
    Signal(#[source] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_mentions_path() {
        let err = MountError::Backend {
            path: PathBuf::from("/srv/data"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such directory"),
        };
        let text = err.to_string();
        assert!(text.contains("/srv/data"));
        assert!(text.contains("no such directory"));
    }

    #[test]
    fn test_mount_error_mentions_both_paths() {
        let err = MountError::Mount {
            source_dir: PathBuf::from("/srv/data"),
            mountpoint: PathBuf::from("/mnt/view"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let text = err.to_string();
        assert!(text.contains("/srv/data"));
        assert!(text.contains("/mnt/view"));
    }
}
