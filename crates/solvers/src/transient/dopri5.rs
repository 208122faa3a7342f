//! Adaptive Dormand–Prince 5(4) solver with sampled output.
//!
//! The solver takes variable steps sized to keep the local error estimate
//! within the configured tolerances, and never steps further than one grid
//! spacing at a time. After each accepted step it fills in every grid time the
//! step covered by cubic Hermite interpolation, and the final step is clamped
//! to land exactly on the last grid time.
//!
//! # Example
//!
//! ```ignore
//! use clockwork_solvers::transient::{SampleGrid, dopri5};
//!
//! let grid = SampleGrid::from_si(10.0, 50.0)?;
//! let solution = dopri5::solve_unobserved(&model, [0.0, 1.0], &grid, &dopri5::Config::default())?;
//!
//! for (t, state) in solution.iter() {
//!     println!("t={t}: {state:?}");
//! }
//! ```

mod action;
mod config;
mod error;
mod event;
mod step;

#[cfg(test)]
mod tests;

pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;

use std::time::Instant;

use clockwork_core::{DynamicsModel, Observer};

use super::{SampleGrid, SampledSolution, Stats};

// Step size controller parameters.
const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 10.0;

/// Integrates a model from `initial` and samples it on `grid`.
///
/// # Algorithm
///
/// 1. Check the initial state and record it as the first sample.
/// 2. Estimate a starting step size from the scale of the problem.
/// 3. Until every grid time has a sample:
///    - Stop with an error if the time limit is exhausted, or if the attempts
///      exceed one per grid interval by more than `max_steps`.
///    - Attempt a step, clamped so it lands exactly on the last grid time.
///    - If the scaled error is at most one, accept the step, interpolate the
///      grid times it covers, and emit an [`Event`].
///    - Grow or shrink the step size from the error estimate.
///
/// # Observer
///
/// The observer receives an [`Event`] after each accepted step. Returning
/// [`Action::Abort`] abandons the integration with [`Error::Aborted`].
///
/// # Errors
///
/// Returns an error if the initial state is not finite, the state becomes
/// non-finite, the step size underflows, the step budget or time limit runs
/// out, or the observer aborts.
pub fn solve<M, Obs, const N: usize>(
    model: &M,
    initial: [f64; N],
    grid: &SampleGrid,
    config: &Config,
    observer: Obs,
) -> Result<SampledSolution<N>, Error>
where
    M: DynamicsModel<N>,
    Obs: Observer<Event<N>, Action>,
{
    tracing::debug!(
        samples = grid.len(),
        end = grid.end(),
        rel_tol = config.rel_tol(),
        abs_tol = config.abs_tol(),
        "starting dopri5 integration"
    );

    let solution = integrate(model, initial, grid, config, observer)
        .inspect_err(|error| tracing::warn!(%error, "dopri5 integration failed"))?;

    let stats = solution.stats();
    tracing::debug!(
        accepted = stats.accepted,
        rejected = stats.rejected,
        evaluations = stats.evaluations,
        "finished dopri5 integration"
    );

    Ok(solution)
}

/// Integrates a model and samples it on `grid` without observation.
///
/// This is a convenience wrapper around [`solve`] that discards events.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<M, const N: usize>(
    model: &M,
    initial: [f64; N],
    grid: &SampleGrid,
    config: &Config,
) -> Result<SampledSolution<N>, Error>
where
    M: DynamicsModel<N>,
{
    solve(model, initial, grid, config, ())
}

fn integrate<M, Obs, const N: usize>(
    model: &M,
    initial: [f64; N],
    grid: &SampleGrid,
    config: &Config,
    mut observer: Obs,
) -> Result<SampledSolution<N>, Error>
where
    M: DynamicsModel<N>,
    Obs: Observer<Event<N>, Action>,
{
    if initial.iter().any(|value| !value.is_finite()) {
        return Err(Error::NonFiniteInitialState);
    }

    let started = Instant::now();
    let samples = grid.len();
    let mut times = Vec::with_capacity(samples);
    let mut states = Vec::with_capacity(samples);
    let mut stats = Stats::default();

    times.push(grid.time(0));
    states.push(initial);

    if samples == 1 {
        return Ok(SampledSolution::from_parts(times, states, stats));
    }

    let rel_tol = config.rel_tol();
    let abs_tol = config.abs_tol();
    let t_end = grid.end();
    let max_step = grid.spacing();

    let mut t = 0.0;
    let mut y = initial;
    let mut dy = model.derivative(t, &y);
    let mut h = step::initial_step(model, t, &y, &dy, abs_tol, rel_tol, max_step);
    stats.evaluations += 2;

    // One step per grid interval is the floor, since steps never span more
    // than one spacing.
    let budget = config.max_steps().saturating_add(samples - 1);
    let mut next = 1;
    let mut attempts = 0;
    let mut just_rejected = false;

    while next < samples {
        if let Some(limit) = config.timeout() {
            if started.elapsed() > limit {
                return Err(Error::Timeout { limit, time: t });
            }
        }
        if attempts == budget {
            return Err(Error::MaxSteps {
                max_steps: config.max_steps(),
                time: t,
            });
        }
        if h < 10.0 * f64::EPSILON * t.abs().max(1.0) {
            return Err(Error::StepSizeUnderflow { step_size: h, time: t });
        }
        attempts += 1;

        let last = t + 1.01 * h >= t_end;
        if last {
            h = t_end - t;
        }

        let trial = step::attempt(model, t, h, &y, &dy);
        stats.evaluations += step::EVALUATIONS_PER_STEP;

        let error = step::error_norm(&trial.error, &y, &trial.y, abs_tol, rel_tol);
        if !error.is_finite() || trial.y.iter().any(|value| !value.is_finite()) {
            return Err(Error::NonFinite { time: t });
        }

        if error > 1.0 {
            stats.rejected += 1;
            h *= (SAFETY * error.powf(-0.2)).max(MIN_FACTOR);
            just_rejected = true;
            continue;
        }

        stats.accepted += 1;
        let t_new = if last { t_end } else { t + h };

        while next < samples && grid.time(next) <= t_new {
            let time = grid.time(next);
            let theta = (time - t) / h;
            times.push(time);
            states.push(step::interpolate(
                theta,
                h,
                (&y, &dy),
                (&trial.y, &trial.dy),
            ));
            next += 1;
        }

        let event = Event {
            step: stats.accepted,
            time: t_new,
            step_size: h,
            error,
            state: trial.y,
        };
        if let Some(Action::Abort) = observer.observe(&event) {
            return Err(Error::Aborted { time: t_new });
        }

        let mut factor = if error == 0.0 {
            MAX_FACTOR
        } else {
            (SAFETY * error.powf(-0.2)).clamp(MIN_FACTOR, MAX_FACTOR)
        };
        if just_rejected {
            factor = factor.min(1.0);
        }

        tracing::trace!(step = stats.accepted, t = t_new, h, error, "accepted step");

        h = (h * factor).min(max_step);
        t = t_new;
        y = trial.y;
        dy = trial.dy;
        just_rejected = false;
    }

    Ok(SampledSolution::from_parts(times, states, stats))
}
