//! Core traits and types for the Clockwork workspace.
//!
//! This crate defines the shared abstractions that models, solvers, the
//! animation driver, and renderers build on:
//!
//! - [`DynamicsModel`]: a vector field `dy/dt = f(t, y)` over `N` state
//!   variables
//! - [`Observer`]: receives events from a solver or driver and optionally
//!   returns a control action
//! - [`PhaseState`]: a pendulum's `(position, velocity)` pair

mod dynamics;
mod observer;
mod phase;

pub use dynamics::DynamicsModel;
pub use observer::Observer;
pub use phase::PhaseState;
