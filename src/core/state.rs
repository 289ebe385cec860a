use std::num::IntErrorKind;

use log::debug;

use crate::error::SessionError;

pub type ProcessId = u64;
pub type Ticks = u64;

pub const DEFAULT_ARRIVAL: Ticks = 0;
pub const MIN_BURST: Ticks = 1;

/// Derived attributes, filled in only by a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub start: Ticks,
    pub end: Ticks,
    pub waiting: Ticks,
    pub turnaround: Ticks,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pub id: ProcessId,
    pub name: String,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub timing: Option<Timing>,
}

impl Process {
    pub fn new(id: ProcessId) -> Self {
        Self {
            id,
            name: format!("P{id}"),
            arrival_time: DEFAULT_ARRIVAL,
            burst_time: MIN_BURST,
            timing: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessField {
    Name,
    Arrival,
    Burst,
}

/// Upper bound for arrival and burst edits. Keeps every schedule end time
/// far below both `u64::MAX` and the 2^53 limit of exact `f64` comparison
/// for any process count that fits in memory.
pub const MAX_TICKS: Ticks = 1_000_000;

pub fn clamp_arrival(value: i64) -> Ticks {
    (value.max(0) as Ticks).min(MAX_TICKS)
}

pub fn clamp_burst(value: i64) -> Ticks {
    (value.max(MIN_BURST as i64) as Ticks).min(MAX_TICKS)
}

// Out-of-range numbers saturate rather than falling back to the default
fn parse_saturating(raw: &str) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(value) => Some(value),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

// Raw text from the input surface; anything unparsable falls back to the minimum.
pub fn parse_arrival(raw: &str) -> Ticks {
    parse_saturating(raw)
        .map(clamp_arrival)
        .unwrap_or(DEFAULT_ARRIVAL)
}

pub fn parse_burst(raw: &str) -> Ticks {
    parse_saturating(raw)
        .map(clamp_burst)
        .unwrap_or(MIN_BURST)
}

/// Editable process list in insertion order.
#[derive(Debug)]
pub struct ProcessTable {
    processes: Vec<Process>,

    // Increment upon process creation; ids are never handed out twice
    next_id: ProcessId,
}

impl Default for ProcessTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessTable {
    pub fn new() -> Self {
        Self {
            processes: Vec::new(),
            next_id: 1,
        }
    }

    pub fn add(&mut self) -> ProcessId {
        let id = self.next_id;
        self.next_id += 1;
        self.processes.push(Process::new(id));
        debug!("added process {id}");
        id
    }

    pub fn remove(&mut self, id: ProcessId) -> Result<Process, SessionError> {
        let index = self.index_of(id)?;
        if self.processes.len() == 1 {
            return Err(SessionError::LastProcess);
        }
        debug!("removed process {id}");
        Ok(self.processes.remove(index))
    }

    pub fn rename(&mut self, id: ProcessId, name: &str) -> Result<(), SessionError> {
        self.process_mut(id)?.name = name.to_string();
        Ok(())
    }

    pub fn set_arrival(&mut self, id: ProcessId, value: i64) -> Result<Ticks, SessionError> {
        let arrival = clamp_arrival(value);
        self.process_mut(id)?.arrival_time = arrival;
        Ok(arrival)
    }

    pub fn set_burst(&mut self, id: ProcessId, value: i64) -> Result<Ticks, SessionError> {
        let burst = clamp_burst(value);
        self.process_mut(id)?.burst_time = burst;
        Ok(burst)
    }

    pub fn get(&self, id: ProcessId) -> Option<&Process> {
        self.processes.iter().find(|p| p.id == id)
    }

    pub fn as_slice(&self) -> &[Process] {
        &self.processes
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    fn index_of(&self, id: ProcessId) -> Result<usize, SessionError> {
        self.processes
            .iter()
            .position(|p| p.id == id)
            .ok_or(SessionError::UnknownProcess(id))
    }

    fn process_mut(&mut self, id: ProcessId) -> Result<&mut Process, SessionError> {
        let index = self.index_of(id)?;
        Ok(&mut self.processes[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_assigns_increasing_ids_with_defaults() {
        let mut table = ProcessTable::new();
        let a = table.add();
        let b = table.add();
        assert_eq!((a, b), (1, 2));

        let p = table.get(b).unwrap();
        assert_eq!(p.name, "P2");
        assert_eq!(p.arrival_time, 0);
        assert_eq!(p.burst_time, 1);
        assert!(p.timing.is_none());
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut table = ProcessTable::new();
        table.add();
        let b = table.add();
        table.remove(b).unwrap();
        assert_eq!(table.add(), 3);
    }

    #[test]
    fn last_process_cannot_be_removed() {
        let mut table = ProcessTable::new();
        let a = table.add();
        assert!(matches!(table.remove(a), Err(SessionError::LastProcess)));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn unknown_process_is_reported() {
        let mut table = ProcessTable::new();
        table.add();
        assert!(matches!(
            table.set_burst(42, 3),
            Err(SessionError::UnknownProcess(42))
        ));
    }

    #[test]
    fn numeric_edits_are_clamped() {
        let mut table = ProcessTable::new();
        let a = table.add();
        assert_eq!(table.set_arrival(a, -5).unwrap(), 0);
        assert_eq!(table.set_burst(a, 0).unwrap(), 1);
        assert_eq!(table.set_burst(a, -3).unwrap(), 1);
        assert_eq!(table.set_arrival(a, 7).unwrap(), 7);

        let p = table.get(a).unwrap();
        assert_eq!((p.arrival_time, p.burst_time), (7, 1));
    }

    #[test]
    fn raw_input_is_coerced() {
        assert_eq!(parse_arrival("12"), 12);
        assert_eq!(parse_arrival(" -4 "), 0);
        assert_eq!(parse_arrival("abc"), 0);
        assert_eq!(parse_burst(""), 1);
        assert_eq!(parse_burst("0"), 1);
        assert_eq!(parse_burst("9"), 9);
    }

    #[test]
    fn edits_saturate_at_max_ticks() {
        let mut table = ProcessTable::new();
        let a = table.add();
        assert_eq!(table.set_burst(a, i64::MAX).unwrap(), MAX_TICKS);
        assert_eq!(table.set_arrival(a, i64::MAX).unwrap(), MAX_TICKS);
        assert_eq!(clamp_burst(MAX_TICKS as i64), MAX_TICKS);
        assert_eq!(clamp_burst(MAX_TICKS as i64 + 1), MAX_TICKS);

        assert_eq!(parse_burst("9223372036854775807"), MAX_TICKS);
        assert_eq!(parse_burst("99999999999999999999999"), MAX_TICKS);
        assert_eq!(parse_arrival("-99999999999999999999999"), 0);
    }
}
