use std::time::Duration;

use thiserror::Error;

/// Errors that can occur during Dormand–Prince integration.
///
/// Every variant means no solution is produced; the solver never returns a
/// partially filled trajectory.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum Error {
    #[error("initial state is not finite")]
    NonFiniteInitialState,

    #[error("step limit of {max_steps} extra steps reached at t = {time}")]
    MaxSteps { max_steps: usize, time: f64 },

    #[error("step size {step_size:e} underflowed at t = {time}")]
    StepSizeUnderflow { step_size: f64, time: f64 },

    #[error("state became non-finite at t = {time}")]
    NonFinite { time: f64 },

    #[error("integration exceeded its time limit of {limit:?} at t = {time}")]
    Timeout { limit: Duration, time: f64 },

    #[error("integration aborted by observer at t = {time}")]
    Aborted { time: f64 },
}
