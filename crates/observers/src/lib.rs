//! Reusable observers for clockwork solvers and animations.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work with both the Dormand–Prince solver and the animation driver.
//!
//! # Modules
//!
//! - [`traits`]: capability traits for shared observers
//!   ([`HasStep`], [`HasTime`], [`CanStop`])
//!
//! # Observers
//!
//! - [`Deadline`] stops a solve or an animation after a wall-clock budget.
//! - [`FrameRecorder`] captures every animation frame and writes it as CSV.
//! - [`TraceLog`] logs solver steps and frames through `tracing`.
//!
//! # Features
//!
//! - `plot`: enables `LiveAnimation` for playing an animation in an egui
//!   window. This feature adds dependencies on `eframe` and `egui_plot`.
//!
//! [`Observer`]: clockwork_core::Observer
//! [`HasStep`]: traits::HasStep
//! [`HasTime`]: traits::HasTime
//! [`CanStop`]: traits::CanStop

pub mod traits;

mod deadline;
mod recorder;
mod trace;

#[cfg(feature = "plot")]
mod plot;

pub use deadline::Deadline;
pub use recorder::{FrameRecorder, Row};
pub use trace::TraceLog;

#[cfg(feature = "plot")]
pub use plot::{LiveAnimation, ShowConfig};
