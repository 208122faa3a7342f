//! Live animations of the clockwork pendulum models.
//!
//! Each mode solves one or more pendulums and opens a window that plays them
//! back in a loop.
//!
//! # Usage
//!
//! ```text
//! cargo run --example live --features plot -- damped
//! cargo run --example live --features plot -- damped 0.3
//! cargo run --example live --features plot -- clock
//! ```
//!
//! # Modes
//!
//! - **damped [drag]**: a single damped pendulum released from `[0, 1]` and
//!   left to decay. The default drag is `0.1`.
//!
//! - **clock**: a damped pendulum next to the same pendulum driven by an
//!   escapement. The driven one settles onto a steady swing while the other
//!   winds down.

use std::{error::Error, rc::Rc};

use clockwork_animate::{AnimationDriver, TrajectoryPlayer};
use clockwork_core::DynamicsModel;
use clockwork_models::{Pendulum, PendulumWithEscapement};
use clockwork_observers::{LiveAnimation, ShowConfig};
use clockwork_solvers::transient::{SampleGrid, dopri5};

const DURATION: f64 = 30.0;
const RATE: f64 = 50.0;

fn main() -> Result<(), Box<dyn Error>> {
    let mode = std::env::args().nth(1).unwrap_or_else(|| "clock".into());
    match mode.as_str() {
        "damped" => {
            let drag = std::env::args()
                .nth(2)
                .as_deref()
                .map(str::parse::<f64>)
                .transpose()
                .unwrap_or_else(|_| {
                    eprintln!("Invalid drag, expected a number, e.g. 0.3");
                    std::process::exit(1);
                })
                .unwrap_or(0.1);
            damped(drag)
        }
        "clock" => clock(),
        other => {
            eprintln!("Unknown mode: {other}");
            eprintln!("Usage: live [damped [drag]|clock]");
            std::process::exit(1);
        }
    }
}

/// Solves a model over the demo grid and wraps it in a player.
fn play(model: &impl DynamicsModel<2>) -> Result<TrajectoryPlayer, Box<dyn Error>> {
    let grid = SampleGrid::from_si(DURATION, RATE)?;
    let solution = dopri5::solve_unobserved(model, [0.0, 1.0], &grid, &dopri5::Config::default())?;
    Ok(TrajectoryPlayer::new(Rc::new(solution))?)
}

fn damped(drag: f64) -> Result<(), Box<dyn Error>> {
    let player = play(&Pendulum::new(drag)?)?;
    let driver = AnimationDriver::new([player])?;

    LiveAnimation::new(driver, [format!("drag {drag}")]).show(
        ShowConfig::new().title(format!("Damped pendulum, drag {drag}")),
    )?;

    Ok(())
}

fn clock() -> Result<(), Box<dyn Error>> {
    let free = play(&Pendulum::new(0.1)?)?;
    let driven = play(&PendulumWithEscapement::new(0.1, 0.5)?)?;
    let driver = AnimationDriver::new([free, driven])?;

    LiveAnimation::new(driver, ["free", "escapement"]).show(
        ShowConfig::new()
            .title("Pendulum with and without an escapement")
            .legend(),
    )?;

    Ok(())
}
