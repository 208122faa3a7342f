//! Solvers for transient problems, integrating a model forward in time.
//!
//! A [`DynamicsModel`] defines `dy/dt = f(t, y)`. Solvers in this module
//! integrate it from an initial state and report the result on a
//! [`SampleGrid`]: `n = floor(duration · rate) + 1` uniformly spaced times
//! starting at zero. The output is a [`SampledSolution`] with exactly one
//! state per grid time, regardless of the steps the solver took internally.
//!
//! # Solvers
//!
//! - [`dopri5`]: adaptive Dormand–Prince 5(4) with dense output
//!
//! [`DynamicsModel`]: clockwork_core::DynamicsModel

mod grid;
mod solution;

pub mod dopri5;

pub use grid::{GridError, SampleGrid};
pub use solution::{SampledSolution, SolutionError, Stats};
