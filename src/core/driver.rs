use log::{info, trace};

use super::{
    event::SessionEvent,
    observer::Observer,
    schedule::Schedule,
    state::Process,
};
use crate::scheduler::Scheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Running,
}

/// Simulated time cursor. Kept as a step count so that repeated increments
/// of a fractional step never drift.
#[derive(Debug, Clone, Copy)]
pub struct PlaybackClock {
    steps: u64,
    step_size: f64,
}

impl PlaybackClock {
    pub fn new(step_size: f64) -> Self {
        Self {
            steps: 0,
            step_size,
        }
    }

    pub fn now(&self) -> f64 {
        self.steps as f64 * self.step_size
    }

    pub fn advance(&mut self) -> f64 {
        self.steps += 1;
        self.now()
    }

    pub fn reset(&mut self) {
        self.steps = 0;
    }
}

/// Idle -> Running -> Idle state machine replaying one schedule.
pub struct PlaybackDriver<S: Scheduler> {
    pub scheduler: S,
    state: PlaybackState,
    clock: PlaybackClock,
    schedule: Schedule,
    active: Option<usize>,
    observer: Observer,
}

impl<S: Scheduler> PlaybackDriver<S> {
    pub fn new(step_size: f64) -> Self {
        Self {
            scheduler: S::init(),
            state: PlaybackState::Idle,
            clock: PlaybackClock::new(step_size),
            schedule: Schedule::default(),
            active: None,
            observer: Observer::new(),
        }
    }

    pub fn start(&mut self, processes: &[Process]) -> Vec<SessionEvent> {
        if processes.is_empty() || self.is_running() {
            return Vec::new();
        }

        self.schedule = self.scheduler.schedule(processes);
        self.observer.observe_schedule(&self.schedule);
        self.clock.reset();
        self.state = PlaybackState::Running;

        info!(
            "{}: replaying {} processes, completion at t={}",
            self.scheduler.name(),
            self.schedule.executed.len(),
            self.schedule.completion_time
        );

        let mut events = vec![SessionEvent::RunStarted {
            processes: self.schedule.executed.len(),
            completion_time: self.schedule.completion_time,
        }];
        self.track_active_segment(&mut events);
        events
    }

    pub fn tick(&mut self) -> Vec<SessionEvent> {
        if !self.is_running() {
            return Vec::new();
        }

        let now = self.clock.advance();
        self.observer.observe_tick(now);
        trace!("t={now}");

        let mut events = vec![SessionEvent::ClockAdvanced { now }];
        self.track_active_segment(&mut events);

        if now >= self.schedule.completion_time as f64 {
            self.state = PlaybackState::Idle;
            info!("replay completed at t={now}");
            events.push(SessionEvent::RunCompleted {
                completion_time: self.schedule.completion_time,
            });
        }

        events
    }

    pub fn reset(&mut self) -> Vec<SessionEvent> {
        let was_running = self.is_running();
        self.state = PlaybackState::Idle;
        self.clock.reset();
        self.schedule = Schedule::default();
        self.active = None;
        self.observer.observe_reset();
        vec![SessionEvent::Reset { was_running }]
    }

    fn track_active_segment(&mut self, events: &mut Vec<SessionEvent>) {
        let active = self.schedule.active_segment(self.clock.now());
        if active != self.active {
            events.push(SessionEvent::SegmentChange {
                from: self.active,
                to: active,
            });
            self.active = active;
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == PlaybackState::Running
    }

    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn active_segment(&self) -> Option<usize> {
        self.schedule.active_segment(self.clock.now())
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::Ticks, scheduler::FcfsScheduler};

    fn processes(specs: &[(&str, Ticks, Ticks)]) -> Vec<Process> {
        specs
            .iter()
            .enumerate()
            .map(|(i, &(name, arrival, burst))| Process {
                id: i as u64 + 1,
                name: name.to_string(),
                arrival_time: arrival,
                burst_time: burst,
                timing: None,
            })
            .collect()
    }

    fn run_to_completion(driver: &mut PlaybackDriver<FcfsScheduler>) -> usize {
        let mut ticks = 0;
        while driver.is_running() {
            driver.tick();
            ticks += 1;
            assert!(ticks < 10_000, "replay never completed");
        }
        ticks
    }

    #[test]
    fn half_steps_reach_completion() {
        let mut driver = PlaybackDriver::<FcfsScheduler>::new(0.5);
        let events = driver.start(&processes(&[("A", 0, 4), ("B", 1, 3), ("C", 2, 1)]));

        assert_eq!(
            events[0],
            SessionEvent::RunStarted {
                processes: 3,
                completion_time: 8
            }
        );
        assert_eq!(driver.active_segment(), Some(0));

        assert_eq!(run_to_completion(&mut driver), 16);
        assert_eq!(driver.state(), PlaybackState::Idle);
        assert_eq!(driver.now(), 8.0);
        // Results stay visible once the replay finishes
        assert_eq!(driver.schedule().gantt.len(), 3);
        assert_eq!(driver.observer().ticks(), 16);
    }

    #[test]
    fn segment_changes_follow_the_clock() {
        let mut driver = PlaybackDriver::<FcfsScheduler>::new(1.0);
        driver.start(&processes(&[("A", 0, 2), ("B", 4, 1)]));

        let mut changes = Vec::new();
        while driver.is_running() {
            for event in driver.tick() {
                if let SessionEvent::SegmentChange { from, to } = event {
                    changes.push((driver.now(), from, to));
                }
            }
        }

        assert_eq!(
            changes,
            vec![
                (2.0, Some(0), None),
                (4.0, None, Some(1)),
                (5.0, Some(1), None),
            ]
        );
    }

    #[test]
    fn last_tick_reports_completion() {
        let mut driver = PlaybackDriver::<FcfsScheduler>::new(0.5);
        driver.start(&processes(&[("A", 0, 1)]));

        assert!(!driver.tick().contains(&SessionEvent::RunCompleted { completion_time: 1 }));
        let events = driver.tick();
        assert!(events.contains(&SessionEvent::RunCompleted { completion_time: 1 }));
        assert!(driver.tick().is_empty());
    }

    #[test]
    fn start_is_ignored_while_running_or_empty() {
        let mut driver = PlaybackDriver::<FcfsScheduler>::new(0.5);
        assert!(driver.start(&[]).is_empty());
        assert_eq!(driver.state(), PlaybackState::Idle);

        driver.start(&processes(&[("A", 0, 3)]));
        driver.tick();
        assert!(driver.start(&processes(&[("B", 0, 9)])).is_empty());
        assert_eq!(driver.now(), 0.5);
        assert_eq!(driver.schedule().completion_time, 3);
        assert_eq!(driver.observer().schedules(), 1);
    }

    #[test]
    fn rerun_restarts_the_clock() {
        let mut driver = PlaybackDriver::<FcfsScheduler>::new(1.0);
        let input = processes(&[("A", 0, 2)]);
        driver.start(&input);
        run_to_completion(&mut driver);
        assert_eq!(driver.now(), 2.0);

        driver.start(&input);
        assert!(driver.is_running());
        assert_eq!(driver.now(), 0.0);
    }

    #[test]
    fn largest_inputs_complete_on_the_exact_tick() {
        use crate::core::MAX_TICKS;

        let mut driver = PlaybackDriver::<FcfsScheduler>::new(MAX_TICKS as f64);
        let input = processes(&[
            ("A", MAX_TICKS, MAX_TICKS),
            ("B", MAX_TICKS, MAX_TICKS),
            ("C", MAX_TICKS, MAX_TICKS),
        ]);
        driver.start(&input);
        assert_eq!(driver.schedule().completion_time, 4 * MAX_TICKS);

        assert_eq!(run_to_completion(&mut driver), 4);
        assert_eq!(driver.now(), (4 * MAX_TICKS) as f64);
    }

    #[test]
    fn reset_returns_to_initial_state() {
        let mut driver = PlaybackDriver::<FcfsScheduler>::new(0.5);
        driver.start(&processes(&[("A", 0, 4), ("B", 1, 3)]));
        driver.tick();
        driver.tick();

        assert_eq!(driver.reset(), vec![SessionEvent::Reset { was_running: true }]);
        assert_eq!(driver.state(), PlaybackState::Idle);
        assert_eq!(driver.now(), 0.0);
        assert_eq!(driver.schedule(), &Schedule::default());
        assert_eq!(driver.active_segment(), None);
        assert!(driver.tick().is_empty());

        // Reset is accepted from Idle too
        assert_eq!(driver.reset(), vec![SessionEvent::Reset { was_running: false }]);
    }
}
