//! Mount configuration.
//!
//! `MountConfig` is built once from resolved CLI inputs, validated before
//! any mount attempt, and read-only afterwards. Translation of the named
//! flags into the engine's option set lives here so the flag semantics
//! stay in one place.

use std::io;
use std::path::{Path, PathBuf};

use rfuse3::MountOptions;
use thiserror::Error;

/// Errors produced while validating a [`MountConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required path was empty.
    #[error("{what} path must not be empty")]
    EmptyPath { what: &'static str },

    /// A path could not be resolved.
    #[error("{what} {} is not accessible: {source}", path.display())]
    Inaccessible {
        what: &'static str,
        path: PathBuf,
        source: io::Error,
    },

    /// A path exists but is not a directory.
    #[error("{what} {} is not a directory", path.display())]
    NotADirectory { what: &'static str, path: PathBuf },

    /// Source and mountpoint resolve to the same directory.
    #[error("source and mountpoint must be distinct (both resolve to {})", path.display())]
    SamePath { path: PathBuf },
}

/// Named mount flags, all off by default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MountFlags {
    /// Allow other users to access the mount.
    pub allow_other: bool,
    /// Mount read-only.
    pub read_only: bool,
    /// Use the raw mount syscall instead of the fusermount helper.
    pub direct_mount: bool,
    /// Like `direct_mount`, but never fall back to the helper.
    pub direct_mount_strict: bool,
    /// Per-request logging; honored through the logging threshold rather
    /// than an engine switch.
    pub debug: bool,
}

impl MountFlags {
    /// Whether the kernel enforces file permissions itself.
    ///
    /// Always paired with `allow_other`; the two kernel flags are never
    /// set separately.
    pub fn kernel_permission_checks(&self) -> bool {
        self.allow_other
    }
}

/// How the OS-level mount is performed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MountMode {
    /// Mount through the fusermount helper; works unprivileged.
    Helper,
    /// Call the mount syscall directly. Unless `strict`, a failure falls
    /// back to the helper.
    Direct { strict: bool },
}

/// Immutable mount configuration, resolved once at startup.
#[derive(Clone, Debug)]
pub struct MountConfig {
    source: PathBuf,
    mountpoint: PathBuf,
    flags: MountFlags,
}

impl MountConfig {
    /// Describe a mount of `source` at `mountpoint`.
    pub fn new(source: impl Into<PathBuf>, mountpoint: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            mountpoint: mountpoint.into(),
            flags: MountFlags::default(),
        }
    }

    /// Replace the whole flag set.
    pub fn with_flags(mut self, flags: MountFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Allow other users to access the mount.
    pub fn with_allow_other(mut self, allow: bool) -> Self {
        self.flags.allow_other = allow;
        self
    }

    /// Mount read-only.
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.flags.read_only = read_only;
        self
    }

    /// Use the raw mount syscall; `strict` disables the helper fallback.
    pub fn with_direct_mount(mut self, direct: bool, strict: bool) -> Self {
        self.flags.direct_mount = direct;
        self.flags.direct_mount_strict = strict;
        self
    }

    /// Request per-request logging.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.flags.debug = debug;
        self
    }

    /// Source directory being exposed.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Where the view becomes visible.
    pub fn mountpoint(&self) -> &Path {
        &self.mountpoint
    }

    /// The resolved flag set.
    pub fn flags(&self) -> &MountFlags {
        &self.flags
    }

    /// How the OS-level mount should be performed.
    pub fn mount_mode(&self) -> MountMode {
        if self.flags.direct_mount || self.flags.direct_mount_strict {
            MountMode::Direct {
                strict: self.flags.direct_mount_strict,
            }
        } else {
            MountMode::Helper
        }
    }

    /// Check that both paths name existing, distinct directories.
    ///
    /// Runs before any mount attempt; a configuration that fails here is
    /// never handed to the engine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let source = Self::resolve_dir("source directory", &self.source)?;
        let mountpoint = Self::resolve_dir("mountpoint", &self.mountpoint)?;
        if source == mountpoint {
            return Err(ConfigError::SamePath { path: source });
        }
        Ok(())
    }

    fn resolve_dir(what: &'static str, path: &Path) -> Result<PathBuf, ConfigError> {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath { what });
        }
        let resolved = path
            .canonicalize()
            .map_err(|source| ConfigError::Inaccessible {
                what,
                path: path.to_path_buf(),
                source,
            })?;
        if !resolved.is_dir() {
            return Err(ConfigError::NotADirectory {
                what,
                path: path.to_path_buf(),
            });
        }
        Ok(resolved)
    }

    /// Translate the flag set into engine mount options.
    ///
    /// `fs_name` carries the source path so mount listings show which
    /// directory is being exposed. Caller uid/gid and readdir-plus are
    /// always set, matching what an unprivileged passthrough mount needs.
    pub fn mount_options(&self) -> MountOptions {
        let uid = unsafe { libc::getuid() };
        let gid = unsafe { libc::getgid() };

        let mut options = MountOptions::default();
        options
            .fs_name(self.source.to_string_lossy())
            .force_readdir_plus(true)
            .uid(uid)
            .gid(gid)
            .read_only(self.flags.read_only)
            .allow_other(self.flags.allow_other)
            .default_permissions(self.flags.kernel_permission_checks());
        options
    }
}
