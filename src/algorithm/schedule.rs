//! Cooperative batching of the jittered-grid pass

use crate::io::configuration::{BATCH_DELAY, BATCH_SIZE};
use std::time::Duration;

/// How often the grid pass hands control back to the runtime, and for how long
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSchedule {
    /// Cells processed between pauses
    pub batch_size: usize,
    /// Pause length; zero only yields
    pub delay: Duration,
}

impl Default for BatchSchedule {
    fn default() -> Self {
        Self {
            batch_size: BATCH_SIZE,
            delay: BATCH_DELAY,
        }
    }
}

impl BatchSchedule {
    /// Schedule that yields between batches without sleeping
    pub const fn immediate(batch_size: usize) -> Self {
        Self {
            batch_size,
            delay: Duration::ZERO,
        }
    }

    /// Effective batch size, never zero
    pub fn chunk_len(&self) -> usize {
        self.batch_size.max(1)
    }

    /// Suspend between two batches
    pub async fn pause(&self) {
        if self.delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(self.delay).await;
        }
    }
}
