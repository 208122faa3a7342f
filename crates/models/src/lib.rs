//! Pendulum models for Clockwork.
//!
//! Both models are [`DynamicsModel<2>`] implementations over the state
//! `[position, velocity]`:
//!
//! - [`Pendulum`]: a linear damped oscillator, `p̈ = -p - drag·ṗ`
//! - [`PendulumWithEscapement`]: a [`Pendulum`] plus a forcing term that
//!   pushes the bob near each end of its swing, `p̈ = p̈_pendulum + gain·e(p, ṗ)`
//!
//! The forcing shape `e` is selected with [`Escapement`].
//!
//! [`DynamicsModel<2>`]: clockwork_core::DynamicsModel

mod error;
mod escapement;
mod pendulum;

pub use error::ParameterError;
pub use escapement::{Escapement, PendulumWithEscapement};
pub use pendulum::Pendulum;
