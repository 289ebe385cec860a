pub mod session;
pub mod timer;
pub mod workload;

pub use session::{Session, Summary};
pub use timer::TickSource;
pub use workload::{ProcessSpec, bernoulli_workload, parse_process_spec};
