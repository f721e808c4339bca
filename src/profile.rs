//! Memory and timing checkpoints
//!
//! - Memory: Reads RSS (Resident Set Size) from /proc/self/status (0 elsewhere)
//! - Timing: Uses std::time::Instant
//!
//! Everything is logged at debug level (`RUST_LOG=gridplot=debug`).

use std::fs;
use std::time::Instant;

use tracing::debug;

/// Get current RSS (Resident Set Size) in bytes from /proc/self/status
pub fn get_rss_bytes() -> u64 {
    let Ok(status) = fs::read_to_string("/proc/self/status") else {
        return 0;
    };
    status
        .lines()
        .find(|line| line.starts_with("VmRSS:"))
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|kb| kb.parse::<u64>().ok())
        .map(|kb| kb * 1024)
        .unwrap_or(0)
}

/// Get current RSS in megabytes
pub fn get_rss_mb() -> f64 {
    get_rss_bytes() as f64 / (1024.0 * 1024.0)
}

/// A running phase timer
#[derive(Debug)]
pub struct PhaseTimer {
    start: Instant,
    section: Instant,
}

impl PhaseTimer {
    /// Start timing, logging the label and current RSS
    pub fn start(label: &str) -> Self {
        debug!("PROF [{:.2} MB]: {} ...", get_rss_mb(), label);
        let now = Instant::now();
        PhaseTimer {
            start: now,
            section: now,
        }
    }

    /// Log the time since the previous checkpoint and since start
    pub fn checkpoint(&mut self, label: &str) {
        debug!(
            "PROF [{:.2} MB]: {} [+{:.3}s, total: {:.3}s]",
            get_rss_mb(),
            label,
            self.section.elapsed().as_secs_f64(),
            self.start.elapsed().as_secs_f64()
        );
        self.section = Instant::now();
    }

    /// Seconds since start
    pub fn total_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}
