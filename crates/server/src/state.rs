use std::sync::Arc;
use std::time::Instant;

use relaycast_core::{Config, StreamSupervisor};

/// Shared application state
pub struct AppState {
    config: Config,
    supervisor: Arc<StreamSupervisor>,
    started_at: Instant,
}

impl AppState {
    pub fn new(config: Config, supervisor: Arc<StreamSupervisor>) -> Self {
        Self {
            config,
            supervisor,
            started_at: Instant::now(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn supervisor(&self) -> &StreamSupervisor {
        &self.supervisor
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
