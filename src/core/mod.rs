pub mod driver;
pub mod event;
pub mod observer;
pub mod schedule;
pub mod state;

pub use driver::{PlaybackClock, PlaybackDriver, PlaybackState};
pub use event::SessionEvent;
pub use schedule::{GanttSegment, Schedule};
pub use state::{
    MAX_TICKS, Process, ProcessField, ProcessId, ProcessTable, Ticks, Timing, clamp_arrival,
    clamp_burst, parse_arrival, parse_burst,
};
