/// Event emitted by the Dormand–Prince solver after each accepted step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event<const N: usize> {
    /// The accepted step number, starting at 1.
    pub step: usize,

    /// Time at the end of the step.
    pub time: f64,

    /// Size of the accepted step.
    pub step_size: f64,

    /// Scaled local error estimate of the step (accepted steps have `error <= 1`).
    pub error: f64,

    /// State at the end of the step.
    pub state: [f64; N],
}
