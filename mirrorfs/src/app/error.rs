//! Application error types.

use std::fmt;

use crate::config::ConfigError;
use crate::mount::MountError;
use crate::profiling::ProfileError;

/// Errors that can occur during application lifecycle.
#[derive(Debug)]
pub enum AppError {
    /// Configuration failed validation.
    Config(ConfigError),

    /// Backend construction, mount, or teardown failed.
    Mount(MountError),

    /// A profiling facility failed to start.
    Profile(ProfileError),

    /// Failed to create the Tokio runtime.
    RuntimeCreation(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(e) => write!(f, "Configuration error: {}", e),
            AppError::Mount(e) => write!(f, "Mount error: {}", e),
            AppError::Profile(e) => write!(f, "Profiling error: {}", e),
            AppError::RuntimeCreation(msg) => {
                write!(f, "Failed to create Tokio runtime: {}", msg)
            }
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(e) => Some(e),
            AppError::Mount(e) => Some(e),
            AppError::Profile(e) => Some(e),
            AppError::RuntimeCreation(_) => None,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Config(e)
    }
}

impl From<MountError> for AppError {
    fn from(e: MountError) -> Self {
        AppError::Mount(e)
    }
}

impl From<ProfileError> for AppError {
    fn from(e: ProfileError) -> Self {
        AppError::Profile(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::RuntimeCreation("worker threads unavailable".to_string());
        assert!(err.to_string().contains("Tokio runtime"));
        assert!(err.to_string().contains("worker threads unavailable"));
    }

    #[test]
    fn test_app_error_from_config_error() {
        let config_err = ConfigError::EmptyPath {
            what: "source directory",
        };
        let app_err: AppError = config_err.into();
        assert!(matches!(app_err, AppError::Config(_)));
        assert!(app_err.to_string().contains("Configuration error"));
    }
}
