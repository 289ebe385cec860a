use std::time::Duration;

use log::debug;

use super::{timer::TickSource, workload::ProcessSpec};
use crate::{
    config::PlaybackConfig,
    core::{
        PlaybackDriver, PlaybackState, Process, ProcessField, ProcessId, ProcessTable, Schedule,
        SessionEvent, Ticks,
    },
    error::SessionError,
    scheduler::{FcfsScheduler, Scheduler},
};

/// Averages shown under the results table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub executed: usize,
    pub average_waiting: f64,
    pub average_turnaround: f64,
    pub completion_time: Ticks,
}

/// Everything one page view owns: the editable process list, the replay
/// state machine and the tick source driving it.
pub struct Session<S: Scheduler = FcfsScheduler> {
    config: PlaybackConfig,
    table: ProcessTable,
    driver: PlaybackDriver<S>,
    // At most one live tick source; dropping it cancels the replay timer
    ticker: Option<TickSource>,
}

impl<S: Scheduler> Session<S> {
    pub fn new(config: PlaybackConfig) -> Result<Self, SessionError> {
        config.validate()?;
        Ok(Self {
            config,
            table: ProcessTable::new(),
            driver: PlaybackDriver::new(config.clock_step),
            ticker: None,
        })
    }

    pub fn add_process(&mut self) -> Result<ProcessId, SessionError> {
        self.ensure_editable()?;
        Ok(self.table.add())
    }

    pub fn remove_process(&mut self, id: ProcessId) -> Result<SessionEvent, SessionError> {
        self.ensure_editable()?;
        self.table.remove(id)?;
        Ok(SessionEvent::ProcessRemoved { id })
    }

    pub fn rename_process(
        &mut self,
        id: ProcessId,
        name: &str,
    ) -> Result<SessionEvent, SessionError> {
        self.ensure_editable()?;
        self.table.rename(id, name)?;
        Ok(SessionEvent::ProcessEdited {
            id,
            field: ProcessField::Name,
        })
    }

    pub fn set_arrival(&mut self, id: ProcessId, value: i64) -> Result<SessionEvent, SessionError> {
        self.ensure_editable()?;
        self.table.set_arrival(id, value)?;
        Ok(SessionEvent::ProcessEdited {
            id,
            field: ProcessField::Arrival,
        })
    }

    pub fn set_burst(&mut self, id: ProcessId, value: i64) -> Result<SessionEvent, SessionError> {
        self.ensure_editable()?;
        self.table.set_burst(id, value)?;
        Ok(SessionEvent::ProcessEdited {
            id,
            field: ProcessField::Burst,
        })
    }

    /// Appends one process per spec, in order.
    pub fn load(&mut self, specs: &[ProcessSpec]) -> Result<Vec<ProcessId>, SessionError> {
        self.ensure_editable()?;
        let mut ids = Vec::with_capacity(specs.len());
        for spec in specs {
            let id = self.table.add();
            if let Some(name) = &spec.name {
                self.table.rename(id, name)?;
            }
            self.table
                .set_arrival(id, i64::try_from(spec.arrival).unwrap_or(i64::MAX))?;
            self.table
                .set_burst(id, i64::try_from(spec.burst).unwrap_or(i64::MAX))?;
            ids.push(id);
        }
        Ok(ids)
    }

    /// Computes the schedule and starts the replay. A second run request
    /// while one is in flight is ignored.
    pub fn run(&mut self) -> Result<Vec<SessionEvent>, SessionError> {
        if self.driver.is_running() {
            return Ok(Vec::new());
        }
        if self.table.is_empty() {
            return Err(SessionError::NoProcesses);
        }

        // Replace, never stack, tick sources
        self.ticker.take();
        let events = self.driver.start(self.table.as_slice());
        self.ticker = Some(TickSource::start(self.config.tick_period));
        Ok(events)
    }

    /// Always accepted. Cancels the tick source and discards the schedule.
    pub fn reset(&mut self) -> Vec<SessionEvent> {
        if self.ticker.take().is_some() {
            debug!("reset cancelled an active replay");
        }
        self.driver.reset()
    }

    /// Feeds one tick to the driver if it arrives within `timeout`. Returns
    /// immediately when no replay is active.
    pub fn wait_for_tick(&mut self, timeout: Duration) -> Vec<SessionEvent> {
        let ticked = match &self.ticker {
            Some(ticker) => ticker.wait(timeout).is_some(),
            None => false,
        };
        if ticked { self.tick() } else { Vec::new() }
    }

    /// Non-blocking variant of `wait_for_tick`.
    pub fn pump(&mut self) -> Vec<SessionEvent> {
        let ticked = self
            .ticker
            .as_ref()
            .is_some_and(|ticker| ticker.try_tick().is_some());
        if ticked { self.tick() } else { Vec::new() }
    }

    fn tick(&mut self) -> Vec<SessionEvent> {
        let events = self.driver.tick();
        if !self.driver.is_running() {
            self.ticker.take();
        }
        events
    }

    fn ensure_editable(&self) -> Result<(), SessionError> {
        if self.driver.is_running() {
            debug!("edit refused during replay");
            return Err(SessionError::Running);
        }
        Ok(())
    }

    pub fn processes(&self) -> &[Process] {
        self.table.as_slice()
    }

    pub fn schedule(&self) -> &Schedule {
        self.driver.schedule()
    }

    pub fn clock(&self) -> f64 {
        self.driver.now()
    }

    pub fn state(&self) -> PlaybackState {
        self.driver.state()
    }

    pub fn is_running(&self) -> bool {
        self.driver.is_running()
    }

    pub fn has_tick_source(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn active_segment(&self) -> Option<usize> {
        self.driver.active_segment()
    }

    pub fn can_run(&self) -> bool {
        !self.is_running() && !self.table.is_empty()
    }

    pub fn can_remove(&self) -> bool {
        !self.is_running() && self.table.len() > 1
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn summary(&self) -> Summary {
        let schedule = self.driver.schedule();
        Summary {
            executed: schedule.executed.len(),
            average_waiting: schedule.average_waiting(),
            average_turnaround: schedule.average_turnaround(),
            completion_time: schedule.completion_time,
        }
    }
}

impl<S: Scheduler> Drop for Session<S> {
    fn drop(&mut self) {
        if self.ticker.take().is_some() {
            debug!("session dropped with a replay in flight");
        }
    }
}
