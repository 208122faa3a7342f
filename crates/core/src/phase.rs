/// A point in a pendulum's phase space.
///
/// `position` is the angular displacement in radians and `velocity` its rate
/// of change. Converts to and from the `[position, velocity]` arrays used by
/// solvers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhaseState {
    pub position: f64,
    pub velocity: f64,
}

impl PhaseState {
    /// The resting state at the origin.
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Creates a phase state from a position and velocity.
    #[must_use]
    pub const fn new(position: f64, velocity: f64) -> Self {
        Self { position, velocity }
    }

    /// Returns the distance from the origin, `sqrt(p² + v²)`.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.position.hypot(self.velocity)
    }

    /// Returns `p² + v²`.
    ///
    /// For the undamped linear pendulum this quantity is conserved, which
    /// makes it a convenient proxy for the total energy.
    #[must_use]
    pub fn energy(&self) -> f64 {
        self.position * self.position + self.velocity * self.velocity
    }

    /// Returns `true` if both components are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }

    /// Returns the state as a `[position, velocity]` array.
    #[must_use]
    pub fn to_array(self) -> [f64; 2] {
        [self.position, self.velocity]
    }
}

impl From<[f64; 2]> for PhaseState {
    fn from([position, velocity]: [f64; 2]) -> Self {
        Self { position, velocity }
    }
}

impl From<PhaseState> for [f64; 2] {
    fn from(state: PhaseState) -> Self {
        state.to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn converts_to_and_from_arrays() {
        let state = PhaseState::from([0.25, -1.5]);
        assert_eq!(state, PhaseState::new(0.25, -1.5));
        assert_eq!(<[f64; 2]>::from(state), [0.25, -1.5]);
    }

    #[test]
    fn magnitude_and_energy() {
        let state = PhaseState::new(3.0, 4.0);
        assert_relative_eq!(state.magnitude(), 5.0);
        assert_relative_eq!(state.energy(), 25.0);
        assert_relative_eq!(PhaseState::ORIGIN.magnitude(), 0.0);
    }

    #[test]
    fn detects_non_finite_components() {
        assert!(PhaseState::new(1.0, 2.0).is_finite());
        assert!(!PhaseState::new(f64::NAN, 2.0).is_finite());
        assert!(!PhaseState::new(1.0, f64::INFINITY).is_finite());
    }
}
