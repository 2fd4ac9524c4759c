//! Shutdown signal coordination.
//!
//! A single stream over the process interrupt and termination signals.
//! The first delivery resolves [`Shutdown::recv`]; the session reacts
//! with exactly one unmount, and deliveries after that are left
//! unserviced rather than triggering a second teardown.

use std::io;

use tokio::signal::unix::{signal, Signal, SignalKind};

/// Combined SIGINT/SIGTERM stream.
pub struct Shutdown {
    interrupt: Signal,
    terminate: Signal,
}

impl Shutdown {
    /// Install the listeners.
    ///
    /// Requires a running Tokio runtime.
    pub fn install() -> io::Result<Self> {
        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    /// Wait for an interrupt or termination request.
    pub async fn recv(&mut self) {
        tokio::select! {
            _ = self.interrupt.recv() => {}
            _ = self.terminate.recv() => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_recv_resolves_on_sigterm() {
        let mut shutdown = Shutdown::install().unwrap();
        unsafe { libc::raise(libc::SIGTERM) };
        tokio::time::timeout(Duration::from_secs(5), shutdown.recv())
            .await
            .expect("shutdown should observe the raised signal");
    }
}
