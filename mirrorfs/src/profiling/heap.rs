//! On-demand heap snapshots.
//!
//! A SIGUSR1 stream drives snapshot writes through jemalloc's `prof.dump`
//! control. Snapshots are numbered from 0 and the sequence advances on
//! every trigger, so one failed write never stalls later ones.

use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use tokio::signal::unix::{signal, SignalKind};
use tokio::task::JoinHandle;
use tracing::{debug, error};

use super::ProfileError;

/// jemalloc control name for writing a heap profile.
const PROF_DUMP: &[u8] = b"prof.dump\0";

/// Extension of snapshot files.
const SNAPSHOT_EXT: &str = "heap";

/// Names successive snapshot files for one prefix.
///
/// The sequence number advances unconditionally: a trigger whose write
/// fails still consumes its number.
struct SnapshotSeries {
    prefix: PathBuf,
    sequence: u64,
}

impl SnapshotSeries {
    fn new(prefix: PathBuf) -> Self {
        Self {
            prefix,
            sequence: 0,
        }
    }

    fn next_path(&mut self) -> PathBuf {
        let mut name = self.prefix.as_os_str().to_os_string();
        name.push(format!("-{}.{SNAPSHOT_EXT}", self.sequence));
        self.sequence += 1;
        PathBuf::from(name)
    }
}

/// Live snapshot listener.
///
/// Runs for the process lifetime, concurrently with mount servicing;
/// dropping the handle stops it.
pub struct HeapSnapshots {
    task: JoinHandle<()>,
}

impl HeapSnapshots {
    /// Arm the SIGUSR1 listener.
    ///
    /// Requires a running Tokio runtime. Each received signal writes one
    /// snapshot named `<prefix>-<seq>.heap`; failures are logged at error
    /// severity and never stop the listener.
    pub fn spawn(prefix: &Path) -> Result<Self, ProfileError> {
        let mut trigger = signal(SignalKind::user_defined1())?;
        let mut series = SnapshotSeries::new(prefix.to_path_buf());

        let task = tokio::spawn(async move {
            while trigger.recv().await.is_some() {
                let path = series.next_path();
                debug!(path = %path.display(), "writing heap snapshot");
                match write_snapshot(&path) {
                    Ok(()) => debug!(path = %path.display(), "heap snapshot written"),
                    Err(e) => error!(path = %path.display(), error = %e, "heap snapshot failed"),
                }
            }
        });

        Ok(Self { task })
    }
}

impl Drop for HeapSnapshots {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Ask the allocator to dump its heap profile to `path`.
///
/// Fails when heap profiling was not activated at process start
/// (`MALLOC_CONF=prof:true`) or when the file cannot be written.
fn write_snapshot(path: &Path) -> Result<(), ProfileError> {
    let raw = CString::new(path.as_os_str().as_bytes()).map_err(|_| ProfileError::InvalidPath {
        path: path.to_path_buf(),
    })?;
    // jemalloc copies the string before prof.dump returns
    unsafe { tikv_jemalloc_ctl::raw::write(PROF_DUMP, raw.as_ptr()) }.map_err(|source| {
        ProfileError::HeapDump {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_numbering_starts_at_zero() {
        let mut series = SnapshotSeries::new(PathBuf::from("/tmp/profile"));
        assert_eq!(series.next_path(), PathBuf::from("/tmp/profile-0.heap"));
        assert_eq!(series.next_path(), PathBuf::from("/tmp/profile-1.heap"));
        assert_eq!(series.next_path(), PathBuf::from("/tmp/profile-2.heap"));
    }

    #[test]
    fn test_sequence_advances_without_touching_files() {
        // next_path never inspects the filesystem, so a failed write
        // cannot stall or repeat a number
        let mut series = SnapshotSeries::new(PathBuf::from("/nonexistent/dir/prefix"));
        for expected in 0..5u64 {
            let path = series.next_path();
            assert!(path
                .to_string_lossy()
                .ends_with(&format!("-{expected}.heap")));
        }
    }

    #[test]
    fn test_interior_nul_is_rejected() {
        use std::ffi::OsStr;
        let path = PathBuf::from(OsStr::from_bytes(b"bad\0path"));
        assert!(matches!(
            write_snapshot(&path),
            Err(ProfileError::InvalidPath { .. })
        ));
    }
}
