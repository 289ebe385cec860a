use average::{Estimate, Mean};

use super::state::{Process, ProcessId, Ticks, Timing};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GanttSegment {
    pub process: ProcessId,
    pub name: String,
    pub start: Ticks,
    pub end: Ticks,
}

impl GanttSegment {
    // Half-open: a segment stops being active the instant its successor starts
    pub fn is_active(&self, clock: f64) -> bool {
        clock >= self.start as f64 && clock < self.end as f64
    }
}

/// Outcome of one scheduling pass. `executed` is in execution order and
/// `gantt` runs parallel to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    pub executed: Vec<Process>,
    pub gantt: Vec<GanttSegment>,
    pub completion_time: Ticks,
}

impl Schedule {
    pub fn is_empty(&self) -> bool {
        self.executed.is_empty()
    }

    pub fn active_segment(&self, clock: f64) -> Option<usize> {
        self.gantt.iter().position(|segment| segment.is_active(clock))
    }

    pub fn average_waiting(&self) -> f64 {
        self.average(|t| t.waiting)
    }

    pub fn average_turnaround(&self) -> f64 {
        self.average(|t| t.turnaround)
    }

    fn average(&self, f: impl Fn(&Timing) -> Ticks) -> f64 {
        if self.executed.is_empty() {
            return 0.0;
        }
        self.executed
            .iter()
            .filter_map(|p| p.timing.as_ref())
            .map(|t| f(t) as f64)
            .collect::<Mean>()
            .estimate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(name: &str, start: Ticks, end: Ticks) -> GanttSegment {
        GanttSegment {
            process: 0,
            name: name.to_string(),
            start,
            end,
        }
    }

    #[test]
    fn active_segment_is_half_open() {
        let schedule = Schedule {
            executed: Vec::new(),
            gantt: vec![segment("A", 0, 4), segment("B", 4, 7)],
            completion_time: 7,
        };

        assert_eq!(schedule.active_segment(0.0), Some(0));
        assert_eq!(schedule.active_segment(3.5), Some(0));
        assert_eq!(schedule.active_segment(4.0), Some(1));
        assert_eq!(schedule.active_segment(7.0), None);
    }

    #[test]
    fn idle_gap_has_no_active_segment() {
        let schedule = Schedule {
            executed: Vec::new(),
            gantt: vec![segment("A", 5, 7)],
            completion_time: 7,
        };
        assert_eq!(schedule.active_segment(2.5), None);
        assert_eq!(schedule.active_segment(5.0), Some(0));
    }

    #[test]
    fn averages_of_empty_schedule_are_zero() {
        let schedule = Schedule::default();
        assert_eq!(schedule.average_waiting(), 0.0);
        assert_eq!(schedule.average_turnaround(), 0.0);
    }
}
