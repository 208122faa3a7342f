use clockwork_core::DynamicsModel;

use crate::ParameterError;

/// A damped pendulum in the small-angle approximation.
///
/// With `p` the angle and `ṗ` its rate, the equation of motion is:
///
/// ```text
/// p̈ = -p - drag·ṗ
/// ```
///
/// A drag of zero gives lossless simple harmonic motion with unit angular
/// frequency. The system is autonomous, so the time argument of
/// [`DynamicsModel::derivative`] is ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pendulum {
    drag: f64,
}

impl Pendulum {
    /// Creates a pendulum with the given drag coefficient.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::Drag`] if `drag` is negative or non-finite.
    pub fn new(drag: f64) -> Result<Self, ParameterError> {
        if !drag.is_finite() || drag < 0.0 {
            return Err(ParameterError::Drag(drag));
        }
        Ok(Self { drag })
    }

    /// Creates a pendulum without drag.
    #[must_use]
    pub fn undamped() -> Self {
        Self { drag: 0.0 }
    }

    /// Returns the drag coefficient.
    #[must_use]
    pub fn drag(&self) -> f64 {
        self.drag
    }

    /// Returns the angular acceleration at a given angle and rate.
    #[must_use]
    pub fn acceleration(&self, position: f64, velocity: f64) -> f64 {
        -position - self.drag * velocity
    }
}

impl DynamicsModel<2> for Pendulum {
    fn derivative(&self, _t: f64, y: &[f64; 2]) -> [f64; 2] {
        let [position, velocity] = *y;
        [velocity, self.acceleration(position, velocity)]
    }
}
