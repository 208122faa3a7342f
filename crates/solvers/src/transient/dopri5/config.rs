use std::time::Duration;

use thiserror::Error;

/// Configuration for the Dormand–Prince solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    rel_tol: f64,
    abs_tol: f64,
    max_steps: usize,
    timeout: Option<Duration>,
}

/// Errors that can occur when validating a Dormand–Prince solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("rel_tol must be finite and at least {min}", min = Config::MIN_REL_TOL)]
    RelTol,

    #[error("abs_tol must be finite and positive")]
    AbsTol,

    #[error("max_steps must be at least 1")]
    MaxSteps,

    #[error("timeout must be non-zero")]
    Timeout,
}

impl Default for Config {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(1e-9, 1e-12, 100_000).unwrap()
    }
}

impl Config {
    /// Smallest relative tolerance the solver accepts.
    pub const MIN_REL_TOL: f64 = 100.0 * f64::EPSILON;

    /// Creates a new config with validated tolerances and no time limit.
    ///
    /// `max_steps` bounds the attempted steps, accepted or rejected, beyond
    /// the one step per grid interval every solve needs. A solve over `n`
    /// samples therefore attempts at most `n - 1 + max_steps` steps.
    ///
    /// # Errors
    ///
    /// Returns an error if a tolerance is out of range or `max_steps` is zero.
    pub fn new(rel_tol: f64, abs_tol: f64, max_steps: usize) -> Result<Self, ConfigError> {
        if !rel_tol.is_finite() || rel_tol < Self::MIN_REL_TOL {
            return Err(ConfigError::RelTol);
        }
        if !abs_tol.is_finite() || abs_tol <= 0.0 {
            return Err(ConfigError::AbsTol);
        }
        if max_steps == 0 {
            return Err(ConfigError::MaxSteps);
        }

        Ok(Self {
            rel_tol,
            abs_tol,
            max_steps,
            timeout: None,
        })
    }

    /// Returns a copy of this config with a wall-clock time limit.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Timeout`] if `timeout` is zero.
    pub fn with_timeout(self, timeout: Duration) -> Result<Self, ConfigError> {
        if timeout.is_zero() {
            return Err(ConfigError::Timeout);
        }
        Ok(Self {
            timeout: Some(timeout),
            ..self
        })
    }

    /// Returns the relative tolerance.
    #[must_use]
    pub fn rel_tol(&self) -> f64 {
        self.rel_tol
    }

    /// Returns the absolute tolerance.
    #[must_use]
    pub fn abs_tol(&self) -> f64 {
        self.abs_tol
    }

    /// Returns the number of attempted steps allowed beyond one per grid
    /// interval.
    #[must_use]
    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Returns the wall-clock time limit, if any.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}
