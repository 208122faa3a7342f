use thiserror::Error;

/// Counters describing the work a solver did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Number of times the model's derivative was evaluated.
    pub evaluations: usize,

    /// Number of accepted integration steps.
    pub accepted: usize,

    /// Number of rejected integration steps.
    pub rejected: usize,
}

/// A trajectory sampled at uniformly spaced times.
///
/// Holds `n` strictly increasing times paired with `n` states. Solvers
/// produce solutions whose times match a [`SampleGrid`] exactly, so the first
/// time is zero and consecutive times are one grid spacing apart.
///
/// A solution is read-only once built.
///
/// [`SampleGrid`]: super::SampleGrid
#[derive(Debug, Clone, PartialEq)]
pub struct SampledSolution<const N: usize> {
    times: Vec<f64>,
    states: Vec<[f64; N]>,
    stats: Stats,
}

/// Errors that can occur when assembling a [`SampledSolution`] by hand.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SolutionError {
    #[error("got {times} times but {states} states")]
    LengthMismatch { times: usize, states: usize },

    #[error("times must be finite and strictly increasing (index {index})")]
    NotIncreasing { index: usize },
}

impl<const N: usize> SampledSolution<N> {
    /// Builds a solution from existing samples.
    ///
    /// This is useful for replaying recorded or synthetic trajectories. An
    /// empty solution is allowed here; consumers that need samples check for
    /// it themselves.
    ///
    /// # Errors
    ///
    /// Returns an error if the lengths differ or if the times are not finite
    /// and strictly increasing.
    pub fn from_samples(times: Vec<f64>, states: Vec<[f64; N]>) -> Result<Self, SolutionError> {
        if times.len() != states.len() {
            return Err(SolutionError::LengthMismatch {
                times: times.len(),
                states: states.len(),
            });
        }
        if let Some(index) = times.iter().position(|t| !t.is_finite()) {
            return Err(SolutionError::NotIncreasing { index });
        }
        if let Some(index) = times.windows(2).position(|pair| pair[1] <= pair[0]) {
            return Err(SolutionError::NotIncreasing { index: index + 1 });
        }

        Ok(Self {
            times,
            states,
            stats: Stats::default(),
        })
    }

    /// Assembles a solver result whose invariants hold by construction.
    pub(crate) fn from_parts(times: Vec<f64>, states: Vec<[f64; N]>, stats: Stats) -> Self {
        debug_assert_eq!(times.len(), states.len());
        Self {
            times,
            states,
            stats,
        }
    }

    /// Returns the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns `true` if the solution has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Returns the sample times.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Returns the sampled states, one per time.
    #[must_use]
    pub fn states(&self) -> &[[f64; N]] {
        &self.states
    }

    /// Returns the state at a sample index.
    #[must_use]
    pub fn state(&self, index: usize) -> Option<&[f64; N]> {
        self.states.get(index)
    }

    /// Returns the first state, if any.
    #[must_use]
    pub fn first(&self) -> Option<&[f64; N]> {
        self.states.first()
    }

    /// Returns the last state, if any.
    #[must_use]
    pub fn last(&self) -> Option<&[f64; N]> {
        self.states.last()
    }

    /// Returns one state variable across all samples.
    ///
    /// # Panics
    ///
    /// Panics if `variable >= N`.
    pub fn component(&self, variable: usize) -> impl ExactSizeIterator<Item = f64> + '_ {
        assert!(variable < N, "state has only {N} variables");
        self.states.iter().map(move |state| state[variable])
    }

    /// Returns `(time, state)` pairs in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (f64, &[f64; N])> + '_ {
        self.times.iter().copied().zip(self.states.iter())
    }

    /// Returns the solver statistics.
    ///
    /// Solutions built with [`SampledSolution::from_samples`] report zeros.
    #[must_use]
    pub fn stats(&self) -> Stats {
        self.stats
    }
}
