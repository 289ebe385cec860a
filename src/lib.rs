pub mod config;
pub mod core;
pub mod error;
pub mod render;
pub mod scheduler;
pub mod sim;

pub use config::PlaybackConfig;
pub use crate::core::{Process, Schedule, SessionEvent};
pub use error::SessionError;
pub use scheduler::{FcfsScheduler, Scheduler};
pub use sim::{ProcessSpec, Session};
