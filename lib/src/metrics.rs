use std::time::Instant;
use tracing::info;

/// Logs `timer.<name>=<seconds>s` when dropped.
pub struct Timer {
    name: &'static str,
    started_at: Instant,
}

impl Timer {
    pub fn start(name: &'static str) -> Self {
        Self {
            name,
            started_at: Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        info!("timer.{}={:.4}s", self.name, self.started_at.elapsed().as_secs_f64());
    }
}
