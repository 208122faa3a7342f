use thiserror::Error;

/// Errors that can occur when setting up an animation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("cannot play back a solution with no samples")]
    EmptySolution,

    #[error("an animation needs at least one player")]
    NoPlayers,
}
