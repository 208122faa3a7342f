//! Shared fixtures for the end-to-end tests.

use std::rc::Rc;

use clockwork_animate::TrajectoryPlayer;
use clockwork_core::DynamicsModel;
use clockwork_solvers::transient::{SampleGrid, SampledSolution, dopri5};

/// Solves `model` from `initial` over `duration` seconds at `rate` hertz with
/// the default solver settings.
///
/// # Panics
///
/// Panics if the grid is invalid or the solve fails.
pub fn solve(
    model: &impl DynamicsModel<2>,
    initial: [f64; 2],
    duration: f64,
    rate: f64,
) -> SampledSolution<2> {
    let grid = SampleGrid::from_si(duration, rate).expect("valid grid");
    dopri5::solve_unobserved(model, initial, &grid, &dopri5::Config::default())
        .expect("solve should succeed")
}

/// Builds a player over a synthetic trajectory of `len` samples at 50 Hz.
///
/// Sample `i` is `(i, 0)`, so a state's position identifies its index.
///
/// # Panics
///
/// Panics if `len` is zero.
#[must_use]
pub fn counting_player(len: usize) -> TrajectoryPlayer {
    #[allow(clippy::cast_precision_loss)]
    let (times, states): (Vec<f64>, Vec<[f64; 2]>) = (0..len)
        .map(|i| (i as f64 / 50.0, [i as f64, 0.0]))
        .unzip();
    let solution = SampledSolution::from_samples(times, states).expect("valid samples");
    TrajectoryPlayer::new(Rc::new(solution)).expect("non-empty trajectory")
}

/// Returns the largest phase-space magnitude among `states`.
#[must_use]
pub fn peak_magnitude(states: &[[f64; 2]]) -> f64 {
    states
        .iter()
        .map(|[position, velocity]| position.hypot(*velocity))
        .fold(0.0, f64::max)
}
