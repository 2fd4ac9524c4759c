//! Validation behavior against real directories.
//!
//! A configuration that fails validation is never handed to the mount
//! engine, so these checks are the gate in front of every mount attempt.

use mirrorfs::config::{ConfigError, MountConfig};

#[test]
fn missing_source_fails_before_any_mount() {
    let mountpoint = tempfile::tempdir().unwrap();
    let config = MountConfig::new("/nonexistent/mirrorfs-source", mountpoint.path());

    let err = config.validate().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Inaccessible {
            what: "source directory",
            ..
        }
    ));
    assert!(err.to_string().contains("/nonexistent/mirrorfs-source"));
}

#[test]
fn missing_mountpoint_fails() {
    let source = tempfile::tempdir().unwrap();
    let config = MountConfig::new(source.path(), "/nonexistent/mirrorfs-view");

    let err = config.validate().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Inaccessible {
            what: "mountpoint",
            ..
        }
    ));
}

#[test]
fn identical_directories_fail() {
    let dir = tempfile::tempdir().unwrap();
    let config = MountConfig::new(dir.path(), dir.path());
    assert!(matches!(
        config.validate(),
        Err(ConfigError::SamePath { .. })
    ));
}

#[test]
fn symlinked_mountpoint_resolving_to_source_fails() {
    let source = tempfile::tempdir().unwrap();
    let parent = tempfile::tempdir().unwrap();
    let link = parent.path().join("view");
    std::os::unix::fs::symlink(source.path(), &link).unwrap();

    let config = MountConfig::new(source.path(), &link);
    assert!(matches!(
        config.validate(),
        Err(ConfigError::SamePath { .. })
    ));
}

#[test]
fn distinct_existing_directories_pass() {
    let source = tempfile::tempdir().unwrap();
    let mountpoint = tempfile::tempdir().unwrap();
    let config = MountConfig::new(source.path(), mountpoint.path());
    assert!(config.validate().is_ok());
}
