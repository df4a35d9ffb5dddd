use crate::Arp;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::info;

/// ExpirationTimer
/// Sweeps the cache of an `Arp` once every `sweep_interval`, freeing learned and incomplete
/// entries older than `entry_timeout`. Holds only a weak reference, so the task winds down on its
/// own once the last `Arc<Arp>` is gone.
pub struct ExpirationTimer {
    arp: Weak<Arp>,
    period: Duration,
}

impl ExpirationTimer {
    pub fn new(arp: &Arc<Arp>) -> Self {
        ExpirationTimer {
            arp: Arc::downgrade(arp),
            period: arp.config().sweep_interval,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub async fn run(self) {
        info!(
            period_ms = self.period.as_millis() as u64,
            "arp expiration timer started"
        );
        let mut ticks = time::interval(self.period);
        loop {
            ticks.tick().await;
            match self.arp.upgrade() {
                Some(arp) => {
                    arp.expire();
                }
                None => break,
            }
        }
        info!("arp expiration timer stopped");
    }

    /// Runs the timer on the current tokio runtime.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}
