//! Scenario files: which pendulums to simulate and how to sample them.

use std::{fs, path::Path, time::Duration};

use clockwork_core::DynamicsModel;
use clockwork_models::{Escapement, ParameterError, Pendulum, PendulumWithEscapement};
use clockwork_solvers::transient::{GridError, SampleGrid, dopri5};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The scenario used when no file is given.
pub const BUILTIN: &str = include_str!("../scenarios/clock.yaml");

/// A simulation scenario loaded from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Simulated time in seconds.
    #[serde(default = "default_duration")]
    pub duration: f64,

    /// Samples per second of simulated time.
    #[serde(default = "default_rate")]
    pub rate: f64,

    #[serde(default)]
    pub solver: SolverSettings,

    pub pendulums: Vec<PendulumSpec>,
}

/// Tolerances and limits for the Dormand–Prince solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolverSettings {
    pub rel_tol: f64,
    pub abs_tol: f64,
    pub max_steps: usize,

    /// Wall-clock limit per solve, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<f64>,
}

/// One pendulum in a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PendulumSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub drag: f64,

    /// Initial `[position, velocity]`.
    #[serde(default = "default_initial")]
    pub initial: [f64; 2],

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escapement: Option<EscapementSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EscapementSpec {
    pub gain: f64,

    #[serde(default)]
    pub shape: Shape,
}

/// Forcing shape of an escapement.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    #[default]
    Ridge,
    Peaks {
        #[serde(default = "default_offset")]
        offset: f64,
        #[serde(default = "default_sharpness")]
        sharpness: f64,
    },
}

/// Errors that can occur when loading or interpreting a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid scenario: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("scenario has no pendulums")]
    NoPendulums,

    #[error("initial state of pendulum {index} must be finite")]
    InitialState { index: usize },

    #[error("invalid sample grid: {0}")]
    Grid(#[from] GridError),

    #[error("invalid solver settings: {0}")]
    Solver(#[from] dopri5::ConfigError),

    #[error("timeout must be finite and positive, got {0} s")]
    Timeout(f64),

    #[error("invalid parameters for pendulum {index}: {source}")]
    Parameter {
        index: usize,
        source: ParameterError,
    },
}

/// A pendulum ready to solve.
pub struct Entry {
    pub name: String,
    pub model: Box<dyn DynamicsModel<2>>,
    pub initial: [f64; 2],
}

impl Default for SolverSettings {
    fn default() -> Self {
        let config = dopri5::Config::default();
        Self {
            rel_tol: config.rel_tol(),
            abs_tol: config.abs_tol(),
            max_steps: config.max_steps(),
            timeout_secs: None,
        }
    }
}

impl Scenario {
    /// Parses a scenario from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid scenario or names no
    /// pendulums.
    pub fn from_yaml(text: &str) -> Result<Self, ScenarioError> {
        let scenario: Self = serde_yaml::from_str(text)?;
        if scenario.pendulums.is_empty() {
            return Err(ScenarioError::NoPendulums);
        }
        Ok(scenario)
    }

    /// Reads and parses a scenario file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let text = fs::read_to_string(path).map_err(|source| ScenarioError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    /// Returns the built-in scenario.
    ///
    /// # Errors
    ///
    /// Returns an error only if the bundled file is broken.
    pub fn builtin() -> Result<Self, ScenarioError> {
        Self::from_yaml(BUILTIN)
    }

    /// Replaces the solver's wall-clock limit when `secs` is given.
    ///
    /// A limit passed on the command line wins over the one in the file.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: Option<f64>) -> Self {
        if secs.is_some() {
            self.solver.timeout_secs = secs;
        }
        self
    }

    /// Builds the sample grid.
    ///
    /// # Errors
    ///
    /// Returns an error if the duration or rate is invalid.
    pub fn grid(&self) -> Result<SampleGrid, ScenarioError> {
        Ok(SampleGrid::from_si(self.duration, self.rate)?)
    }

    /// Builds the solver configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a tolerance, the step limit, or the timeout is
    /// invalid.
    pub fn solver_config(&self) -> Result<dopri5::Config, ScenarioError> {
        let settings = &self.solver;
        let config = dopri5::Config::new(settings.rel_tol, settings.abs_tol, settings.max_steps)?;

        match settings.timeout_secs {
            None => Ok(config),
            Some(secs) => {
                let timeout =
                    Duration::try_from_secs_f64(secs).map_err(|_| ScenarioError::Timeout(secs))?;
                Ok(config.with_timeout(timeout)?)
            }
        }
    }

    /// Builds a model for every pendulum, in order.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first pendulum with invalid parameters.
    pub fn entries(&self) -> Result<Vec<Entry>, ScenarioError> {
        self.pendulums
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                if spec.initial.iter().any(|value| !value.is_finite()) {
                    return Err(ScenarioError::InitialState { index });
                }
                let model = spec
                    .model()
                    .map_err(|source| ScenarioError::Parameter { index, source })?;
                Ok(Entry {
                    name: spec.name.clone().unwrap_or_else(|| format!("pendulum {index}")),
                    model,
                    initial: spec.initial,
                })
            })
            .collect()
    }
}

impl PendulumSpec {
    /// Builds the model this spec describes.
    ///
    /// # Errors
    ///
    /// Returns an error if a parameter is out of range.
    pub fn model(&self) -> Result<Box<dyn DynamicsModel<2>>, ParameterError> {
        let pendulum = Pendulum::new(self.drag)?;
        let Some(escapement) = self.escapement else {
            return Ok(Box::new(pendulum));
        };

        let shape = match escapement.shape {
            Shape::Ridge => Escapement::Ridge,
            Shape::Peaks { offset, sharpness } => Escapement::peaks_with(offset, sharpness)?,
        };
        Ok(Box::new(PendulumWithEscapement::with_escapement(
            pendulum,
            escapement.gain,
            shape,
        )?))
    }
}

fn default_duration() -> f64 {
    10.0
}

fn default_rate() -> f64 {
    50.0
}

fn default_initial() -> [f64; 2] {
    [0.0, 1.0]
}

fn default_offset() -> f64 {
    Escapement::PEAK_OFFSET
}

fn default_sharpness() -> f64 {
    Escapement::PEAK_SHARPNESS
}
