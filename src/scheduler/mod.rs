pub mod fifo;

use crate::core::{Process, Schedule};
pub use fifo::FcfsScheduler;

/// A non-preemptive scheduling policy over a fixed list of processes.
pub trait Scheduler {
    fn init() -> Self;

    fn name(&self) -> &'static str;

    /// Computes the full schedule in one pass. Every executed process comes
    /// back with its timing filled in; the input is left untouched. Arrival
    /// and burst times are expected within
    /// [`MAX_TICKS`](crate::core::MAX_TICKS), which the process table
    /// enforces.
    fn schedule(&mut self, processes: &[Process]) -> Schedule;
}
