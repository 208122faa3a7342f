//! Capability traits for observers shared by solvers and animations.
//!
//! These traits abstract over the event and action types of the Dormand–Prince
//! solver and the animation driver, so one observer can watch either.
//!
//! # Event traits
//!
//! - [`HasStep`]: events numbered by a step or tick counter
//! - [`HasTime`]: events that carry a simulation time
//!
//! # Action traits
//!
//! - [`CanStop`]: actions that end the run
//!
//! # Example
//!
//! ```rust
//! use clockwork_core::Observer;
//! use clockwork_observers::traits::{CanStop, HasStep};
//!
//! struct StopAfter {
//!     steps: usize,
//! }
//!
//! impl<E: HasStep, A: CanStop> Observer<E, A> for StopAfter {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         (event.step() >= self.steps).then(A::stop)
//!     }
//! }
//! ```

use clockwork_animate::{self as animate, Frame};
use clockwork_solvers::transient::dopri5;

/// An event numbered by a step or tick counter.
pub trait HasStep {
    /// Returns the step number for this event.
    fn step(&self) -> usize;
}

/// An event that carries a simulation time.
pub trait HasTime {
    /// Returns the simulation time in seconds for this event.
    fn time(&self) -> f64;
}

/// An action type that can end a run.
pub trait CanStop {
    /// Returns the action that ends the run.
    ///
    /// For the solver this abandons the integration, and for the animation
    /// driver it stops ticking.
    fn stop() -> Self;
}

impl<const N: usize> HasStep for dopri5::Event<N> {
    fn step(&self) -> usize {
        self.step
    }
}

impl<const N: usize> HasTime for dopri5::Event<N> {
    fn time(&self) -> f64 {
        self.time
    }
}

impl HasStep for Frame {
    fn step(&self) -> usize {
        self.tick
    }
}

impl CanStop for dopri5::Action {
    fn stop() -> Self {
        Self::Abort
    }
}

impl CanStop for animate::Action {
    fn stop() -> Self {
        Self::Stop
    }
}
