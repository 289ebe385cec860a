use crate::core::{ProcessField, ProcessId, Ticks};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    ProcessRemoved {
        id: ProcessId,
    },
    ProcessEdited {
        id: ProcessId,
        field: ProcessField,
    },
    RunStarted {
        processes: usize,
        completion_time: Ticks,
    },
    ClockAdvanced {
        now: f64,
    },
    // Index into Schedule::gantt; None while the CPU idles between arrivals
    SegmentChange {
        from: Option<usize>,
        to: Option<usize>,
    },
    RunCompleted {
        completion_time: Ticks,
    },
    Reset {
        was_running: bool,
    },
}
