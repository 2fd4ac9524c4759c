//! Application bootstrap and lifecycle management.
//!
//! This module provides the `MirrorFsApp` type which sequences a whole
//! run: configuration is validated first, the CPU capture (if requested)
//! starts before the mount, and the capture is finalized on every exit
//! path after it has begun - normal completion, signal-triggered
//! shutdown, and fatal mount errors alike.
//!
//! # Example
//!
//! ```ignore
//! use mirrorfs::app::{AppConfig, MirrorFsApp};
//! use mirrorfs::config::MountConfig;
//!
//! let config = AppConfig::new(MountConfig::new("/srv/data", "/mnt/view"));
//! MirrorFsApp::new(config).run()?;
//! ```

mod bootstrap;
mod config;
mod error;

pub use bootstrap::MirrorFsApp;
pub use config::AppConfig;
pub use error::AppError;
