use clockwork_core::PhaseState;
use uom::si::{angle::radian, f64::Angle};

/// Fixed geometry of a drawn pendulum arm.
///
/// The arm hangs from `pivot` and has the given `length`. At zero angle the
/// bob sits directly below the pivot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmGeometry {
    pub length: f64,
    pub pivot: [f64; 2],
}

impl ArmGeometry {
    pub const DEFAULT_LENGTH: f64 = 1.5;
    pub const DEFAULT_PIVOT: [f64; 2] = [0.0, 0.5];

    /// Creates an arm geometry.
    #[must_use]
    pub const fn new(length: f64, pivot: [f64; 2]) -> Self {
        Self { length, pivot }
    }

    /// Returns the bob position for an arm swung `angle` radians from vertical.
    #[must_use]
    pub fn bob(&self, angle: f64) -> [f64; 2] {
        let (sin, cos) = angle.sin_cos();
        [
            self.pivot[0] + self.length * sin,
            self.pivot[1] - self.length * cos,
        ]
    }
}

impl Default for ArmGeometry {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LENGTH, Self::DEFAULT_PIVOT)
    }
}

/// Where to draw a pendulum arm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmPose {
    pub angle: Angle,
    pub pivot: [f64; 2],
    pub bob: [f64; 2],
}

impl ArmPose {
    /// Returns the arm angle in radians.
    #[must_use]
    pub fn angle_si(&self) -> f64 {
        self.angle.get::<radian>()
    }

    /// Returns the arm as a two-point polyline from pivot to bob.
    #[must_use]
    pub fn segment(&self) -> [[f64; 2]; 2] {
        [self.pivot, self.bob]
    }
}

/// Everything a renderer needs to draw one pendulum for one frame.
///
/// `marker` is the point to highlight on the phase-space trajectory, and
/// `arm` is the pose of the swinging pendulum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCommand {
    pub marker: PhaseState,
    pub arm: ArmPose,
}

/// Builds the render data for a state.
///
/// The marker is the state itself and the arm is swung to the state's
/// position.
#[must_use]
pub fn render_command(state: PhaseState, geometry: &ArmGeometry) -> RenderCommand {
    RenderCommand {
        marker: state,
        arm: ArmPose {
            angle: Angle::new::<radian>(state.position),
            pivot: geometry.pivot,
            bob: geometry.bob(state.position),
        },
    }
}
