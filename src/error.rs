use thiserror::Error;

use crate::core::ProcessId;

/// Refusals from the editing and playback surface. Front ends treat these as
/// disabled controls rather than user-facing failures.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("a replay is in progress")]
    Running,

    #[error("at least one process must remain")]
    LastProcess,

    #[error("no process with id {0}")]
    UnknownProcess(ProcessId),

    #[error("nothing to schedule")]
    NoProcesses,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("tick period must be non-zero")]
    ZeroTickPeriod,

    #[error("clock step must be positive and finite, got {0}")]
    InvalidClockStep(f64),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkloadError {
    #[error("expected NAME:ARRIVAL:BURST or ARRIVAL:BURST, got {0:?}")]
    Malformed(String),
}
