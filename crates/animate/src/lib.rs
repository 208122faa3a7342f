//! Looping playback of sampled trajectories for animation.
//!
//! A [`TrajectoryPlayer`] replays a [`SampledSolution`] one state per pull and
//! starts over when it runs out. An [`AnimationDriver`] ticks a set of players
//! in lockstep and hands each tick's render data to a renderer, which is any
//! [`Observer`] of [`Frame`] events.
//!
//! [`SampledSolution`]: clockwork_solvers::transient::SampledSolution
//! [`Observer`]: clockwork_core::Observer

mod driver;
mod error;
mod player;
mod render;

pub use driver::{Action, AnimationDriver, Frame, Status, Summary, Update};
pub use error::Error;
pub use player::TrajectoryPlayer;
pub use render::{ArmGeometry, ArmPose, RenderCommand, render_command};
