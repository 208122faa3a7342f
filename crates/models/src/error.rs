use thiserror::Error;

/// Errors that can occur when constructing a pendulum model.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ParameterError {
    #[error("drag must be finite and non-negative, got {0}")]
    Drag(f64),

    #[error("escapement gain must be finite, got {0}")]
    Gain(f64),

    #[error("escapement peak offset must be finite, got {0}")]
    Offset(f64),

    #[error("escapement peak sharpness must be finite and positive, got {0}")]
    Sharpness(f64),
}
