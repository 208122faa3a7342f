//! Numerical solvers for the Clockwork workspace.
//!
//! # Modules
//!
//! - [`transient`]: integrate a [`DynamicsModel`] over time and report the
//!   trajectory on a uniform sample grid
//!
//! [`DynamicsModel`]: clockwork_core::DynamicsModel

pub mod transient;
