use std::time::{Duration, Instant};

use clockwork_core::Observer;

use crate::traits::CanStop;

/// Stops a run once a wall-clock budget is spent.
///
/// The clock starts when the deadline is created. Every observed event after
/// the budget runs out returns the stop action, so it works with both the
/// solver (where it aborts the integration) and the animation driver.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    limit: Duration,
    expired: bool,
}

impl Deadline {
    /// Creates a deadline `limit` from now.
    #[must_use]
    pub fn new(limit: Duration) -> Self {
        Self {
            started: Instant::now(),
            limit,
            expired: false,
        }
    }

    /// Returns the budget.
    #[must_use]
    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// Returns `true` once the budget has been seen to run out.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.expired
    }
}

impl<E, A: CanStop> Observer<E, A> for Deadline {
    fn observe(&mut self, _event: &E) -> Option<A> {
        if self.started.elapsed() < self.limit {
            return None;
        }

        if !self.expired {
            tracing::warn!(limit = ?self.limit, "deadline reached, stopping");
            self.expired = true;
        }
        Some(A::stop())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clockwork_animate as animate;
    use clockwork_models::Pendulum;
    use clockwork_solvers::transient::{SampleGrid, dopri5};

    #[test]
    fn generous_deadline_never_fires() {
        let mut deadline = Deadline::new(Duration::from_secs(3600));
        let action: Option<animate::Action> = deadline.observe(&());

        assert_eq!(action, None);
        assert!(!deadline.expired());
    }

    #[test]
    fn spent_deadline_stops_every_time() {
        let mut deadline = Deadline::new(Duration::ZERO);

        for _ in 0..3 {
            let action: Option<animate::Action> = deadline.observe(&());
            assert_eq!(action, Some(animate::Action::Stop));
        }
        assert!(deadline.expired());
    }

    #[test]
    fn aborts_the_solver() {
        let grid = SampleGrid::from_si(10.0, 50.0).unwrap();
        let result = dopri5::solve(
            &Pendulum::undamped(),
            [0.0, 1.0],
            &grid,
            &dopri5::Config::default(),
            Deadline::new(Duration::ZERO),
        );

        assert!(matches!(result, Err(dopri5::Error::Aborted { .. })));
    }
}
