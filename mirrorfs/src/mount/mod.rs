//! Mount lifecycle.
//!
//! The controller builds the passthrough backend, performs the OS-level
//! mount, and owns the shutdown sequence. A shutdown signal stream and
//! the serving future race; whichever finishes first leads to the same
//! terminal state, with the mount released exactly once.

mod controller;
mod error;
mod session;
mod shutdown;

pub use controller::MountController;
pub use error::MountError;
pub use session::MountSession;
pub use shutdown::Shutdown;
