use rustc_hash::FxHashSet;

use super::schedule::Schedule;

/// Sanity pass over everything the driver produces. Violations are bugs in
/// a scheduler or in the driver, so they only fire in debug builds.
#[derive(Debug, Default)]
pub struct Observer {
    schedules: u64,
    ticks: u64,
    last_clock: f64,
}

impl Observer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe_schedule(&mut self, schedule: &Schedule) {
        self.schedules += 1;
        self.last_clock = 0.0;

        debug_assert_eq!(
            schedule.executed.len(),
            schedule.gantt.len(),
            "Gantt segments must run parallel to executed processes"
        );

        let mut seen = FxHashSet::default();
        let mut prev_end = 0;
        for (process, segment) in schedule.executed.iter().zip(&schedule.gantt) {
            debug_assert!(
                seen.insert(process.id),
                "Process {} scheduled more than once",
                process.id
            );
            debug_assert_eq!(segment.process, process.id, "Segment/process mismatch");

            let Some(timing) = process.timing else {
                debug_assert!(false, "Executed process {} has no timing", process.id);
                continue;
            };
            debug_assert_eq!((timing.start, timing.end), (segment.start, segment.end));
            debug_assert!(
                timing.start >= prev_end,
                "Segment for process {} overlaps its predecessor",
                process.id
            );
            debug_assert!(timing.start >= process.arrival_time);
            debug_assert_eq!(timing.end, timing.start + process.burst_time);
            debug_assert_eq!(timing.waiting, timing.start - process.arrival_time);
            debug_assert_eq!(timing.turnaround, timing.waiting + process.burst_time);
            prev_end = timing.end;
        }

        debug_assert_eq!(
            schedule.completion_time, prev_end,
            "Completion time must equal the last segment's end"
        );
    }

    pub fn observe_tick(&mut self, clock: f64) {
        self.ticks += 1;
        debug_assert!(
            clock > self.last_clock,
            "Playback clock went from {} to {clock}",
            self.last_clock
        );
        self.last_clock = clock;
    }

    pub fn observe_reset(&mut self) {
        self.last_clock = 0.0;
    }

    pub fn schedules(&self) -> u64 {
        self.schedules
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
