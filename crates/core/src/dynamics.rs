/// A system of first-order ordinary differential equations with `N` state
/// variables.
///
/// Implementors describe the vector field `dy/dt = f(t, y)`. The function is
/// expected to be total: it never fails, and non-finite inputs are allowed to
/// propagate into non-finite derivatives so that solvers can detect them.
///
/// Autonomous systems simply ignore `t`.
pub trait DynamicsModel<const N: usize> {
    /// Returns the time derivative of `y` at time `t`.
    fn derivative(&self, t: f64, y: &[f64; N]) -> [f64; N];
}

impl<T, const N: usize> DynamicsModel<N> for &T
where
    T: DynamicsModel<N> + ?Sized,
{
    fn derivative(&self, t: f64, y: &[f64; N]) -> [f64; N] {
        (**self).derivative(t, y)
    }
}

impl<T, const N: usize> DynamicsModel<N> for Box<T>
where
    T: DynamicsModel<N> + ?Sized,
{
    fn derivative(&self, t: f64, y: &[f64; N]) -> [f64; N] {
        (**self).derivative(t, y)
    }
}
