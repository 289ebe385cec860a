//! Plain-text views of a session: the editable process list, the Gantt
//! chart with the running segment marked, and the results table.

use std::fmt::Write;

use crate::core::{Process, Schedule, Ticks};

// Columns per time unit in the Gantt chart
const UNIT_WIDTH: usize = 3;
// Long segments and names are squeezed into this many columns
const MAX_CELL_WIDTH: usize = 24;
const MAX_LABEL_LEN: usize = MAX_CELL_WIDTH - 4;

struct Cell {
    label: String,
    start: Ticks,
    width: usize,
    active: bool,
}

fn cell_label(name: &str) -> String {
    if name.chars().count() <= MAX_LABEL_LEN {
        return name.to_string();
    }
    let mut label: String = name.chars().take(MAX_LABEL_LEN - 1).collect();
    label.push('~');
    label
}

fn cell_width(duration: Ticks, label: &str) -> usize {
    let span = usize::try_from(duration)
        .unwrap_or(usize::MAX)
        .saturating_mul(UNIT_WIDTH)
        .min(MAX_CELL_WIDTH);
    // Room for the active markers so cells keep their width between frames
    span.max(label.chars().count() + 4)
}

/// Two lines: the segment bar and the start time under each cell. Idle gaps
/// between arrivals get their own cell. The final end time is not labelled.
pub fn gantt_chart(schedule: &Schedule, clock: f64) -> String {
    if schedule.gantt.is_empty() {
        return String::new();
    }

    let active = schedule.active_segment(clock);
    let mut cells = Vec::with_capacity(schedule.gantt.len());
    let mut prev_end = 0;
    for (i, segment) in schedule.gantt.iter().enumerate() {
        if segment.start > prev_end {
            cells.push(Cell {
                label: "idle".to_string(),
                start: prev_end,
                width: cell_width(segment.start - prev_end, "idle"),
                active: false,
            });
        }
        let label = cell_label(&segment.name);
        cells.push(Cell {
            width: cell_width(segment.end - segment.start, &label),
            label,
            start: segment.start,
            active: active == Some(i),
        });
        prev_end = segment.end;
    }

    let mut bar = String::from("|");
    let mut labels = String::new();
    for cell in &cells {
        let content = if cell.active {
            format!(">{}<", cell.label)
        } else {
            cell.label.clone()
        };
        let _ = write!(bar, "{:^width$}|", content, width = cell.width);
        let _ = write!(labels, "{:<width$}", cell.start, width = cell.width + 1);
    }

    format!("{bar}\n{}", labels.trim_end())
}

pub fn process_table(processes: &[Process]) -> String {
    let name_width = processes
        .iter()
        .map(|p| p.name.len())
        .max()
        .unwrap_or(0)
        .max("Process".len());

    let mut out = format!(
        "{:>4}  {:<name_width$}  {:>7}  {:>5}\n",
        "Id", "Process", "Arrival", "Burst"
    );
    for p in processes {
        let _ = writeln!(
            out,
            "{:>4}  {:<name_width$}  {:>7}  {:>5}",
            p.id, p.name, p.arrival_time, p.burst_time
        );
    }
    out
}

/// Every executed process in execution order, then the averages.
pub fn results_table(schedule: &Schedule) -> String {
    let name_width = schedule
        .executed
        .iter()
        .map(|p| p.name.len())
        .max()
        .unwrap_or(0)
        .max("Process".len());

    let mut out = format!(
        "{:<name_width$}  {:>7}  {:>5}  {:>5}  {:>5}  {:>7}  {:>10}\n",
        "Process", "Arrival", "Burst", "Start", "End", "Waiting", "Turnaround"
    );
    for p in &schedule.executed {
        let Some(t) = p.timing else { continue };
        let _ = writeln!(
            out,
            "{:<name_width$}  {:>7}  {:>5}  {:>5}  {:>5}  {:>7}  {:>10}",
            p.name, p.arrival_time, p.burst_time, t.start, t.end, t.waiting, t.turnaround
        );
    }
    let _ = writeln!(
        out,
        "\nAverage waiting time:    {:.2}",
        schedule.average_waiting()
    );
    let _ = write!(
        out,
        "Average turnaround time: {:.2}",
        schedule.average_turnaround()
    );
    out
}
