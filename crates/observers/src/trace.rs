use clockwork_animate::{self as animate, Frame};
use clockwork_core::Observer;
use clockwork_solvers::transient::dopri5;

/// Logs every observed event through `tracing` and never intervenes.
///
/// Solver steps are logged at `trace` level. Animation frames are logged at
/// `trace` level, plus a `debug` line for each player that starts a new pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceLog {
    events: usize,
}

impl TraceLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of events logged so far.
    #[must_use]
    pub fn events(&self) -> usize {
        self.events
    }
}

impl<const N: usize> Observer<dopri5::Event<N>, dopri5::Action> for TraceLog {
    fn observe(&mut self, event: &dopri5::Event<N>) -> Option<dopri5::Action> {
        self.events += 1;
        tracing::trace!(
            step = event.step,
            time = event.time,
            step_size = event.step_size,
            error = event.error,
            state = ?event.state,
            "solver step"
        );
        None
    }
}

impl Observer<Frame, animate::Action> for TraceLog {
    fn observe(&mut self, event: &Frame) -> Option<animate::Action> {
        self.events += 1;
        tracing::trace!(tick = event.tick, players = event.updates.len(), "frame");
        for update in event.updates.iter().filter(|update| update.restarted) {
            tracing::debug!(tick = event.tick, player = update.player, "player restarted");
        }
        None
    }
}
