use std::time::{Duration, Instant};

use crossbeam::channel::{self, Receiver, RecvTimeoutError, TryRecvError};
use log::trace;

/// Periodic tick source for a replay. Dropping the handle cancels it; there
/// is no separate stop call.
#[derive(Debug)]
pub struct TickSource {
    ticks: Receiver<Instant>,
    period: Duration,
}

impl TickSource {
    pub fn start(period: Duration) -> Self {
        trace!("tick source started, period {period:?}");
        Self {
            ticks: channel::tick(period),
            period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Blocks until the next tick or until `timeout` passes.
    pub fn wait(&self, timeout: Duration) -> Option<Instant> {
        match self.ticks.recv_timeout(timeout) {
            Ok(at) => Some(at),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    pub fn try_tick(&self) -> Option<Instant> {
        match self.ticks.try_recv() {
            Ok(at) => Some(at),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

impl Drop for TickSource {
    fn drop(&mut self) {
        trace!("tick source cancelled");
    }
}
