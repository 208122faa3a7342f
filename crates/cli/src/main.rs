mod scenario;

use std::{
    error::Error,
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    rc::Rc,
};

use clap::Parser;
use clockwork_animate::{AnimationDriver, Frame, Status, TrajectoryPlayer};
use clockwork_core::Observer;
use clockwork_observers::{FrameRecorder, TraceLog};
use clockwork_solvers::transient::{SampleGrid, SampledSolution, dopri5};
use tracing_subscriber::EnvFilter;

use crate::scenario::{BUILTIN, Entry, Scenario};

#[derive(Parser)]
#[command(name = "clockwork")]
#[command(about = "Clockwork - simulate and animate pendulums with an escapement", long_about = None)]
struct Cli {
    /// Path to a scenario YAML file (defaults to the built-in clock scenario)
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Number of frames to drive (defaults to one pass of the longest trajectory)
    #[arg(short, long)]
    frames: Option<usize>,

    /// Output CSV file for the recorded frames
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Wall-clock budget for each solve, in seconds (replaces the scenario's
    /// `solver.timeout_secs`)
    #[arg(long)]
    timeout_secs: Option<f64>,

    /// Print the built-in scenario and exit
    #[arg(long)]
    print_scenario: bool,

    /// Play the animation in a window instead of recording it
    #[cfg(feature = "plot")]
    #[arg(long)]
    show: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing on stderr, keeping stdout for the report
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.print_scenario {
        print!("{BUILTIN}");
        return Ok(());
    }

    let scenario = match &cli.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::builtin()?,
    }
    .with_timeout_secs(cli.timeout_secs);

    let grid = scenario.grid()?;
    let config = scenario.solver_config()?;
    let entries = scenario.entries()?;

    let mut names = Vec::with_capacity(entries.len());
    let mut players = Vec::with_capacity(entries.len());
    for entry in &entries {
        let solution = solve(entry, &grid, &config)?;
        names.push(entry.name.clone());
        players.push(TrajectoryPlayer::new(Rc::new(solution))?);
    }

    let driver = AnimationDriver::new(players)?;
    let frames = cli.frames.unwrap_or_else(|| driver.frame_count());

    #[cfg(feature = "plot")]
    if cli.show {
        use std::time::Duration;

        use clockwork_observers::{LiveAnimation, ShowConfig};

        let interval = Duration::from_secs_f64(grid.spacing());
        LiveAnimation::new(driver, names).show(
            ShowConfig::new()
                .title("Clockwork")
                .legend()
                .frame_interval(interval),
        )?;
        return Ok(());
    }

    animate(driver, &names, frames, cli.output.as_deref())
}

/// Solves one pendulum, logging each step.
fn solve(
    entry: &Entry,
    grid: &SampleGrid,
    config: &dopri5::Config,
) -> Result<SampledSolution<2>, dopri5::Error> {
    let mut log = TraceLog::new();

    let span = tracing::info_span!("solve", pendulum = %entry.name);
    let _guard = span.enter();

    let solution = dopri5::solve(
        &entry.model,
        entry.initial,
        grid,
        config,
        |event: &dopri5::Event<2>| log.observe(event),
    )?;

    let stats = solution.stats();
    tracing::info!(
        samples = solution.len(),
        accepted = stats.accepted,
        rejected = stats.rejected,
        evaluations = stats.evaluations,
        "solved"
    );

    Ok(solution)
}

/// Drives the animation headless, recording every frame.
fn animate(
    mut driver: AnimationDriver<TrajectoryPlayer>,
    names: &[String],
    frames: usize,
    output: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let mut recorder = FrameRecorder::new();
    let mut log = TraceLog::new();

    let summary = driver.run(frames, &mut |frame: &Frame| {
        recorder.record(frame);
        log.observe(frame)
    });
    debug_assert_eq!(summary.status, Status::Complete);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "Drove {} frames", summary.ticks)?;
    for (name, player) in names.iter().zip(driver.players()) {
        let last = player.marker();
        writeln!(
            out,
            "  {name}: {} samples, {} passes, last state [{:.6}, {:.6}]",
            player.len(),
            player.cycles(),
            last.position,
            last.velocity,
        )?;
    }

    if let Some(path) = output {
        let file = File::create(path)?;
        recorder.write_csv(BufWriter::new(file))?;
        writeln!(out, "Wrote {} rows to {}", recorder.rows().len(), path.display())?;
    }

    Ok(())
}
