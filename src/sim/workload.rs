use rand::prelude::*;

use crate::{
    core::{Ticks, parse_arrival, parse_burst},
    error::WorkloadError,
};

/// Process description as typed on the command line, before it gets an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    pub name: Option<String>,
    pub arrival: Ticks,
    pub burst: Ticks,
}

/// Parses `NAME:ARRIVAL:BURST` or `ARRIVAL:BURST`. Numeric fields go through
/// the same coercion as interactive edits, so `A:-3:x` becomes arrival 0,
/// burst 1.
pub fn parse_process_spec(raw: &str) -> Result<ProcessSpec, WorkloadError> {
    let fields: Vec<&str> = raw.split(':').collect();
    match fields.as_slice() {
        [arrival, burst] => Ok(ProcessSpec {
            name: None,
            arrival: parse_arrival(arrival),
            burst: parse_burst(burst),
        }),
        [name, arrival, burst] if !name.trim().is_empty() => Ok(ProcessSpec {
            name: Some(name.trim().to_string()),
            arrival: parse_arrival(arrival),
            burst: parse_burst(burst),
        }),
        _ => Err(WorkloadError::Malformed(raw.to_string())),
    }
}

/// Bernoulli arrivals over `ticks` time units: each unit sees an arrival with
/// probability `p_arrival`, which is short with probability `p_short`.
pub fn bernoulli_workload(
    ticks: Ticks,
    p_arrival: f64,
    p_short: f64,
    short_ticks: Ticks,
    long_ticks: Ticks,
    seed: u64,
) -> Vec<ProcessSpec> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut specs = Vec::new();

    for t in 0..ticks {
        if rng.random::<f64>() < p_arrival {
            let burst = if rng.random::<f64>() < p_short {
                short_ticks
            } else {
                long_ticks
            };

            specs.push(ProcessSpec {
                name: None,
                arrival: t,
                burst: burst.max(1),
            });
        }
    }

    specs
}
