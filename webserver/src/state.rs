//! Server runtime state

use std::net::SocketAddr;
use std::time::Instant;

/// Per-process server state. Read-mostly after construction; each run
/// invocation builds its own fresh local state.
#[derive(Debug)]
pub struct ServerState {
    pub bind_address: SocketAddr,
    start_time: Instant,
}

impl ServerState {
    pub fn new(bind_address: SocketAddr) -> Self {
        Self {
            bind_address,
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
