use clockwork_core::DynamicsModel;

use crate::{ParameterError, Pendulum};

/// Shape of the idealised escapement forcing term `e(p, ṗ)`.
///
/// A real escapement delivers a short impulse near each end of the swing.
/// Both shapes model that impulse as a smooth, sharply localised function of
/// the phase state, and both are odd under `(p, ṗ) → (-p, -ṗ)`, so the push
/// always acts in the direction that sustains the motion.
///
/// The two shapes are not numerically equivalent and give visibly different
/// phase portraits. [`Escapement::Ridge`] is the default.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Escapement {
    /// `tanh(5p) · exp(-(5pṗ - 1)²)`.
    ///
    /// Concentrated along the ridge `5pṗ ≈ 1`, where the bob is moving away
    /// from the centre, and signed by the side of the swing.
    #[default]
    Ridge,

    /// `peak(offset) - peak(-offset)`, where
    /// `peak(o) = exp(-sharpness · ((-p - o)² + (ṗ - o)²))`.
    ///
    /// Two Gaussian bumps centred at `(-offset, offset)` and
    /// `(offset, -offset)` in the phase plane.
    Peaks { offset: f64, sharpness: f64 },
}

impl Escapement {
    /// Default offset of the [`Escapement::Peaks`] shape.
    pub const PEAK_OFFSET: f64 = 0.4;

    /// Default sharpness of the [`Escapement::Peaks`] shape.
    pub const PEAK_SHARPNESS: f64 = 20.0;

    /// Creates the Gaussian peaks shape with the default offset and sharpness.
    #[must_use]
    pub fn peaks() -> Self {
        Self::Peaks {
            offset: Self::PEAK_OFFSET,
            sharpness: Self::PEAK_SHARPNESS,
        }
    }

    /// Creates a Gaussian peaks shape with custom parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if `offset` is non-finite or `sharpness` is not
    /// finite and positive.
    pub fn peaks_with(offset: f64, sharpness: f64) -> Result<Self, ParameterError> {
        if !offset.is_finite() {
            return Err(ParameterError::Offset(offset));
        }
        if !sharpness.is_finite() || sharpness <= 0.0 {
            return Err(ParameterError::Sharpness(sharpness));
        }
        Ok(Self::Peaks { offset, sharpness })
    }

    /// Evaluates the forcing term at a phase state.
    #[must_use]
    pub fn force(&self, position: f64, velocity: f64) -> f64 {
        match *self {
            Self::Ridge => {
                let ridge = 5.0 * position * velocity - 1.0;
                (5.0 * position).tanh() * (-ridge * ridge).exp()
            }
            Self::Peaks { offset, sharpness } => {
                let peak = |o: f64| {
                    let d = (-position - o).powi(2) + (velocity - o).powi(2);
                    (-sharpness * d).exp()
                };
                peak(offset) - peak(-offset)
            }
        }
    }
}

/// A [`Pendulum`] sustained by an idealised escapement.
///
/// The escapement gives the bob a push at each end of the swing, allowing it
/// to keep swinging indefinitely (like a clock) even with drag:
///
/// ```text
/// p̈ = -p - drag·ṗ + gain·e(p, ṗ)
/// ```
///
/// The gain multiplies the forcing term after it is evaluated. The damping
/// part is delegated to the wrapped [`Pendulum`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendulumWithEscapement {
    pendulum: Pendulum,
    gain: f64,
    escapement: Escapement,
}

impl PendulumWithEscapement {
    /// Creates a pendulum with the default [`Escapement::Ridge`] forcing.
    ///
    /// # Errors
    ///
    /// Returns an error if `drag` is negative or non-finite, or if `gain` is
    /// non-finite.
    pub fn new(drag: f64, gain: f64) -> Result<Self, ParameterError> {
        Self::with_escapement(Pendulum::new(drag)?, gain, Escapement::default())
    }

    /// Wraps an existing pendulum with the given escapement shape.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::Gain`] if `gain` is non-finite.
    pub fn with_escapement(
        pendulum: Pendulum,
        gain: f64,
        escapement: Escapement,
    ) -> Result<Self, ParameterError> {
        if !gain.is_finite() {
            return Err(ParameterError::Gain(gain));
        }
        Ok(Self {
            pendulum,
            gain,
            escapement,
        })
    }

    /// Returns the wrapped pendulum.
    #[must_use]
    pub fn pendulum(&self) -> &Pendulum {
        &self.pendulum
    }

    /// Returns the escapement gain.
    #[must_use]
    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Returns the escapement shape.
    #[must_use]
    pub fn escapement(&self) -> Escapement {
        self.escapement
    }

    /// Returns the acceleration contributed by the escapement alone.
    #[must_use]
    pub fn escapement_acceleration(&self, position: f64, velocity: f64) -> f64 {
        self.gain * self.escapement.force(position, velocity)
    }
}

impl DynamicsModel<2> for PendulumWithEscapement {
    fn derivative(&self, t: f64, y: &[f64; 2]) -> [f64; 2] {
        let [position, velocity] = *y;
        let [_, damped] = self.pendulum.derivative(t, y);
        [
            velocity,
            damped + self.escapement_acceleration(position, velocity),
        ]
    }
}
