//! Interval-backed tick source for a running play session clock

use std::time::Duration;
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval_at, Instant},
};
use tracing::debug;

use crate::engine::TickScheduler;

/// Cadence of the play session clock
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Spawns one interval task per subscription, each sending its epoch into a
/// shared channel once per second
#[derive(Debug, Clone)]
pub struct IntervalScheduler {
    tick_tx: mpsc::UnboundedSender<u64>,
}

impl IntervalScheduler {
    pub fn new(tick_tx: mpsc::UnboundedSender<u64>) -> Self {
        Self { tick_tx }
    }
}

/// A live interval task; aborted when dropped
#[derive(Debug)]
pub struct IntervalSubscription {
    epoch: u64,
    handle: JoinHandle<()>,
}

impl IntervalSubscription {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

impl Drop for IntervalSubscription {
    fn drop(&mut self) {
        debug!("Stopping tick interval for epoch {}", self.epoch);
        self.handle.abort();
    }
}

impl TickScheduler for IntervalScheduler {
    type Subscription = IntervalSubscription;

    /// Must be called from within a tokio runtime
    fn subscribe(&mut self, epoch: u64) -> IntervalSubscription {
        let tick_tx = self.tick_tx.clone();
        let handle = tokio::spawn(async move {
            // first tick lands one full period after the clock starts
            let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
            loop {
                interval.tick().await;
                if tick_tx.send(epoch).is_err() {
                    debug!("Tick receiver gone, stopping interval for epoch {}", epoch);
                    break;
                }
            }
        });
        IntervalSubscription { epoch, handle }
    }
}
