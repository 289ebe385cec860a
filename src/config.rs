use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(500);
pub const DEFAULT_CLOCK_STEP: f64 = 0.5;

/// Playback pacing. The step is cosmetic sub-stepping of the replay clock
/// and never affects the computed schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackConfig {
    pub tick_period: Duration,
    pub clock_step: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_period: DEFAULT_TICK_PERIOD,
            clock_step: DEFAULT_CLOCK_STEP,
        }
    }
}

impl PlaybackConfig {
    pub fn new(tick_period: Duration, clock_step: f64) -> Result<Self, ConfigError> {
        let config = Self {
            tick_period,
            clock_step,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_period.is_zero() {
            return Err(ConfigError::ZeroTickPeriod);
        }
        if !self.clock_step.is_finite() || self.clock_step <= 0.0 {
            return Err(ConfigError::InvalidClockStep(self.clock_step));
        }
        Ok(())
    }
}
