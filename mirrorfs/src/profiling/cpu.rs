//! Continuous CPU capture.
//!
//! The capture starts before the mount and is finished exactly once on
//! the way out, on every exit path. The destination file is opened
//! eagerly so a bad path fails at startup instead of after a full run.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use pprof::protos::Message;
use pprof::{ProfilerGuard, ProfilerGuardBuilder};
use tracing::{debug, info};

use super::ProfileError;

/// Sampling frequency in Hz.
const SAMPLE_FREQUENCY: i32 = 99;

/// Frames excluded from the capture.
const FRAME_BLOCKLIST: &[&str] = &["libc", "libgcc", "pthread", "vdso"];

/// A running CPU capture.
///
/// Dropping the guard without calling [`finish`](Self::finish) stops
/// sampling but writes nothing, leaving the destination file empty. This
/// is what happens when the process is killed without a graceful
/// unmount.
pub struct CpuProfile {
    guard: ProfilerGuard<'static>,
    output: File,
    path: PathBuf,
    flamegraph: Option<PathBuf>,
}

impl CpuProfile {
    /// Open the destination and begin sampling.
    pub fn start(path: &Path, flamegraph: Option<&Path>) -> Result<Self, ProfileError> {
        let output = File::create(path).map_err(|source| ProfileError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        let guard = ProfilerGuardBuilder::default()
            .frequency(SAMPLE_FREQUENCY)
            .blocklist(FRAME_BLOCKLIST)
            .build()?;
        debug!(path = %path.display(), frequency = SAMPLE_FREQUENCY, "cpu capture started");

        Ok(Self {
            guard,
            output,
            path: path.to_path_buf(),
            flamegraph: flamegraph.map(Path::to_path_buf),
        })
    }

    /// Stop sampling and flush the capture.
    ///
    /// Writes the pprof protobuf to the destination opened by
    /// [`start`](Self::start) and, when configured, renders a flamegraph
    /// SVG as well.
    pub fn finish(mut self) -> Result<(), ProfileError> {
        let report = self.guard.report().build()?;

        let profile = report.pprof()?;
        let mut content = Vec::new();
        profile
            .encode(&mut content)
            .map_err(|e| ProfileError::Encode(e.to_string()))?;
        self.output
            .write_all(&content)
            .and_then(|()| self.output.flush())
            .map_err(|source| ProfileError::Write {
                path: self.path.clone(),
                source,
            })?;
        info!(
            path = %self.path.display(),
            stacks = report.data.len(),
            "cpu profile written"
        );

        if let Some(ref flamegraph_path) = self.flamegraph {
            let file = File::create(flamegraph_path).map_err(|source| ProfileError::Create {
                path: flamegraph_path.clone(),
                source,
            })?;
            report.flamegraph(file)?;
            debug!(path = %flamegraph_path.display(), "flamegraph written");
        }

        Ok(())
    }
}
