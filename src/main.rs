use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use fcfs_model::{
    FcfsScheduler, PlaybackConfig, Scheduler, Session, SessionError, SessionEvent,
    render::{gantt_chart, process_table, results_table},
    sim::{ProcessSpec, bernoulli_workload, parse_process_spec},
};
use log::{debug, info, warn};

/// Replays a First-Come-First-Served CPU schedule as a timed Gantt chart.
#[derive(Debug, Parser)]
struct Opts {
    /// Process as NAME:ARRIVAL:BURST or ARRIVAL:BURST. Repeat to add more;
    /// processes are submitted in the order given.
    #[clap(short = 'p', long = "process", value_parser = parse_process_spec)]
    processes: Vec<ProcessSpec>,

    /// Append a random workload with Bernoulli arrivals over this many time units.
    #[clap(short = 'r', long)]
    random: Option<u64>,

    /// Seed for --random.
    #[clap(long, default_value = "0")]
    seed: u64,

    /// Wall-clock period between replay ticks, in milliseconds.
    #[clap(short = 't', long, env = "FCFS_TICK_MS", default_value = "500")]
    tick_ms: u64,

    /// Simulated time the replay clock advances per tick.
    #[clap(short = 's', long, env = "FCFS_STEP", default_value = "0.5")]
    step: f64,

    /// Print the results without replaying the chart.
    #[clap(long, action = clap::ArgAction::SetTrue)]
    no_animate: bool,

    /// Enable verbose output. Specify multiple times to increase verbosity.
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) -> Result<()> {
    let llv = match verbose {
        0 => simplelog::LevelFilter::Info,
        1 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };
    let mut lcfg = simplelog::ConfigBuilder::new();
    lcfg.set_time_level(simplelog::LevelFilter::Error)
        .set_location_level(simplelog::LevelFilter::Off)
        .set_target_level(simplelog::LevelFilter::Off)
        .set_thread_level(simplelog::LevelFilter::Off);
    simplelog::TermLogger::init(
        llv,
        lcfg.build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;
    Ok(())
}

fn draw(session: &Session) {
    let running = session
        .active_segment()
        .map(|i| session.schedule().gantt[i].name.as_str())
        .unwrap_or("idle");
    println!("t={:<6} running: {running}", session.clock());
    println!("{}\n", gantt_chart(session.schedule(), session.clock()));
}

fn replay(session: &mut Session, shutdown: &AtomicBool) -> Result<bool> {
    match session.run() {
        Ok(events) => debug!("{events:?}"),
        Err(SessionError::NoProcesses) => {
            warn!("No processes to schedule, add some with --process");
            return Ok(false);
        }
        Err(e) => return Err(e).context("Failed to start replay"),
    }
    draw(session);

    // Poll often enough to notice Ctrl-C between slow ticks
    let poll = session.config().tick_period.min(Duration::from_millis(100));
    while session.is_running() {
        if shutdown.load(Ordering::Relaxed) {
            session.reset();
            info!("Replay cancelled");
            return Ok(false);
        }

        let events = session.wait_for_tick(poll);
        for event in &events {
            debug!("{event:?}");
        }
        if events
            .iter()
            .any(|e| matches!(e, SessionEvent::ClockAdvanced { .. }))
        {
            draw(session);
        }
    }

    Ok(true)
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    init_logging(opts.verbose)?;

    let config = PlaybackConfig::new(Duration::from_millis(opts.tick_ms), opts.step)
        .context("Invalid playback pacing")?;
    let mut session: Session = Session::new(config)?;

    let mut specs = opts.processes.clone();
    if let Some(window) = opts.random {
        specs.extend(bernoulli_workload(window, 0.3, 0.3, 2, 6, opts.seed));
    }
    session.load(&specs)?;

    println!("{}", process_table(session.processes()));

    if opts.no_animate {
        if session.processes().is_empty() {
            warn!("No processes to schedule, add some with --process");
            return Ok(());
        }
        let mut scheduler = FcfsScheduler::init();
        println!("{}", results_table(&scheduler.schedule(session.processes())));
        return Ok(());
    }

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = shutdown.clone();
    ctrlc::set_handler(move || {
        shutdown_clone.store(true, Ordering::Relaxed);
    })
    .context("Error setting Ctrl-C handler")?;

    if replay(&mut session, &shutdown)? {
        println!("{}", results_table(session.schedule()));
    }

    Ok(())
}
