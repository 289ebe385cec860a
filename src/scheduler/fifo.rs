use std::cmp;

use super::Scheduler;
use crate::core::{GanttSegment, Process, Schedule, Timing};

/// First-Come-First-Served: strict arrival order, each process runs its
/// whole burst once started.
pub struct FcfsScheduler;

impl Scheduler for FcfsScheduler {
    fn init() -> Self {
        Self
    }

    fn name(&self) -> &'static str {
        "fcfs"
    }

    fn schedule(&mut self, processes: &[Process]) -> Schedule {
        // sort_by_key is stable, so equal arrivals keep their input order
        let mut ready = processes.to_vec();
        ready.sort_by_key(|p| p.arrival_time);

        let mut clock = 0;
        let mut executed = Vec::with_capacity(ready.len());
        let mut gantt = Vec::with_capacity(ready.len());

        for mut process in ready {
            // CPU idles until the next arrival if nothing is ready yet
            let start = cmp::max(clock, process.arrival_time);
            let end = start + process.burst_time;
            process.timing = Some(Timing {
                start,
                end,
                waiting: start - process.arrival_time,
                turnaround: end - process.arrival_time,
            });

            gantt.push(GanttSegment {
                process: process.id,
                name: process.name.clone(),
                start,
                end,
            });
            executed.push(process);
            clock = end;
        }

        Schedule {
            executed,
            gantt,
            completion_time: clock,
        }
    }
}
