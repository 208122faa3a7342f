use thiserror::Error;
use uom::si::{
    f64::{Frequency, Time},
    frequency::hertz,
    time::second,
};

/// A uniform grid of sample times starting at zero.
///
/// The grid has `floor(duration · rate) + 1` points spaced `1 / rate` apart.
/// The i-th time is computed directly as `i / rate` rather than accumulated,
/// so the spacing is uniform to within one rounding error. When
/// `duration · rate` is not an integer, the last sample falls just before
/// `duration`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleGrid {
    rate: f64,
    len: usize,
}

/// Errors that can occur when constructing a [`SampleGrid`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GridError {
    #[error("duration must be finite and positive, got {0} s")]
    Duration(f64),

    #[error("sample rate must be finite and positive, got {0} Hz")]
    Rate(f64),

    #[error("grid would need {requested} samples, more than the limit of {limit}")]
    TooManySamples { requested: f64, limit: usize },
}

impl SampleGrid {
    /// Upper bound on the number of samples in a grid.
    pub const MAX_SAMPLES: usize = 10_000_000;

    /// Creates a grid covering `duration` at `rate` samples per unit time.
    ///
    /// # Errors
    ///
    /// Returns an error if either argument is non-finite or non-positive, or
    /// if the grid would exceed [`SampleGrid::MAX_SAMPLES`].
    pub fn new(duration: Time, rate: Frequency) -> Result<Self, GridError> {
        Self::from_si(duration.get::<second>(), rate.get::<hertz>())
    }

    /// Creates a grid from a duration in seconds and a rate in hertz.
    ///
    /// # Errors
    ///
    /// See [`SampleGrid::new`].
    pub fn from_si(duration: f64, rate: f64) -> Result<Self, GridError> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(GridError::Duration(duration));
        }
        if !rate.is_finite() || rate <= 0.0 {
            return Err(GridError::Rate(rate));
        }

        let intervals = (duration * rate).floor();
        if intervals >= Self::MAX_SAMPLES as f64 {
            return Err(GridError::TooManySamples {
                requested: intervals + 1.0,
                limit: Self::MAX_SAMPLES,
            });
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let len = intervals as usize + 1;

        Ok(Self { rate, len })
    }

    /// Returns the number of sample times.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: a grid contains at least the initial time.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the sample rate in hertz.
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the sample rate as a [`Frequency`].
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        Frequency::new::<hertz>(self.rate)
    }

    /// Returns the spacing between consecutive samples in seconds.
    #[must_use]
    pub fn spacing(&self) -> f64 {
        1.0 / self.rate
    }

    /// Returns the `index`-th sample time in seconds.
    ///
    /// Indices past the end extrapolate along the same spacing.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn time(&self, index: usize) -> f64 {
        index as f64 / self.rate
    }

    /// Returns the last sample time in seconds.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.time(self.len - 1)
    }

    /// Returns an iterator over all sample times in seconds.
    pub fn times(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        (0..self.len).map(|index| self.time(index))
    }
}
