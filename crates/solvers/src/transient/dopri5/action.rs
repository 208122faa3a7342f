/// Control actions supported by the Dormand–Prince solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Abandon the integration.
    ///
    /// The solver returns [`Error::Aborted`](super::Error::Aborted) rather
    /// than a partial solution.
    Abort,
}
