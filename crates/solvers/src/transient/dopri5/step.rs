//! A single Dormand–Prince 5(4) step and the interpolant used to sample it.

use clockwork_core::DynamicsModel;

const C2: f64 = 1.0 / 5.0;
const C3: f64 = 3.0 / 10.0;
const C4: f64 = 4.0 / 5.0;
const C5: f64 = 8.0 / 9.0;

const A21: f64 = 1.0 / 5.0;

const A31: f64 = 3.0 / 40.0;
const A32: f64 = 9.0 / 40.0;

const A41: f64 = 44.0 / 45.0;
const A42: f64 = -56.0 / 15.0;
const A43: f64 = 32.0 / 9.0;

const A51: f64 = 19372.0 / 6561.0;
const A52: f64 = -25360.0 / 2187.0;
const A53: f64 = 64448.0 / 6561.0;
const A54: f64 = -212.0 / 729.0;

const A61: f64 = 9017.0 / 3168.0;
const A62: f64 = -355.0 / 33.0;
const A63: f64 = 46732.0 / 5247.0;
const A64: f64 = 49.0 / 176.0;
const A65: f64 = -5103.0 / 18656.0;

// Fifth-order weights; also the last stage row (FSAL).
const B1: f64 = 35.0 / 384.0;
const B3: f64 = 500.0 / 1113.0;
const B4: f64 = 125.0 / 192.0;
const B5: f64 = -2187.0 / 6784.0;
const B6: f64 = 11.0 / 84.0;

// Difference between fifth- and fourth-order weights.
const E1: f64 = 71.0 / 57600.0;
const E3: f64 = -71.0 / 16695.0;
const E4: f64 = 71.0 / 1920.0;
const E5: f64 = -17253.0 / 339_200.0;
const E6: f64 = 22.0 / 525.0;
const E7: f64 = -1.0 / 40.0;

/// Number of derivative evaluations made by [`attempt`].
pub(super) const EVALUATIONS_PER_STEP: usize = 6;

/// The result of attempting one step.
pub(super) struct Trial<const N: usize> {
    /// Fifth-order solution at `t + h`.
    pub(super) y: [f64; N],

    /// Derivative at `t + h`, reused as the first stage of the next step.
    pub(super) dy: [f64; N],

    /// Local error estimate.
    pub(super) error: [f64; N],
}

/// Returns `y + h · Σ aᵢ·kᵢ`.
fn stage<const N: usize>(y: &[f64; N], h: f64, terms: &[(f64, &[f64; N])]) -> [f64; N] {
    std::array::from_fn(|i| y[i] + h * terms.iter().map(|(a, k)| a * k[i]).sum::<f64>())
}

/// Attempts one step of size `h` from `(t, y)`, where `k1` is the derivative
/// at `(t, y)`.
pub(super) fn attempt<M, const N: usize>(
    model: &M,
    t: f64,
    h: f64,
    y: &[f64; N],
    k1: &[f64; N],
) -> Trial<N>
where
    M: DynamicsModel<N>,
{
    let k2 = model.derivative(t + C2 * h, &stage(y, h, &[(A21, k1)]));
    let k3 = model.derivative(t + C3 * h, &stage(y, h, &[(A31, k1), (A32, &k2)]));
    let k4 = model.derivative(
        t + C4 * h,
        &stage(y, h, &[(A41, k1), (A42, &k2), (A43, &k3)]),
    );
    let k5 = model.derivative(
        t + C5 * h,
        &stage(y, h, &[(A51, k1), (A52, &k2), (A53, &k3), (A54, &k4)]),
    );
    let k6 = model.derivative(
        t + h,
        &stage(
            y,
            h,
            &[(A61, k1), (A62, &k2), (A63, &k3), (A64, &k4), (A65, &k5)],
        ),
    );

    let y_next = stage(
        y,
        h,
        &[(B1, k1), (B3, &k3), (B4, &k4), (B5, &k5), (B6, &k6)],
    );
    let k7 = model.derivative(t + h, &y_next);

    let error = std::array::from_fn(|i| {
        h * (E1 * k1[i] + E3 * k3[i] + E4 * k4[i] + E5 * k5[i] + E6 * k6[i] + E7 * k7[i])
    });

    Trial {
        y: y_next,
        dy: k7,
        error,
    }
}

/// Returns the root-mean-square of the error scaled by the tolerances.
///
/// Each component is measured against `abs_tol + rel_tol · max(|y₀|, |y₁|)`.
/// A step is acceptable when the result is at most one.
pub(super) fn error_norm<const N: usize>(
    error: &[f64; N],
    y0: &[f64; N],
    y1: &[f64; N],
    abs_tol: f64,
    rel_tol: f64,
) -> f64 {
    if N == 0 {
        return 0.0;
    }

    let sum: f64 = (0..N)
        .map(|i| {
            let scale = abs_tol + rel_tol * y0[i].abs().max(y1[i].abs());
            (error[i] / scale).powi(2)
        })
        .sum();

    #[allow(clippy::cast_precision_loss)]
    let n = N as f64;
    (sum / n).sqrt()
}

/// Cubic Hermite interpolation across an accepted step.
///
/// Uses the states and derivatives at both ends of the step, so it matches
/// the solution and its slope at `theta = 0` and `theta = 1`.
pub(super) fn interpolate<const N: usize>(
    theta: f64,
    h: f64,
    (y0, f0): (&[f64; N], &[f64; N]),
    (y1, f1): (&[f64; N], &[f64; N]),
) -> [f64; N] {
    let t2 = theta * theta;
    let t3 = t2 * theta;

    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + theta;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;

    std::array::from_fn(|i| h00 * y0[i] + h10 * h * f0[i] + h01 * y1[i] + h11 * h * f1[i])
}

/// Picks an initial step size from the scale of the problem.
///
/// Follows the usual heuristic: size an explicit Euler step so that it
/// changes the state by about one percent, then refine it from an estimate
/// of the second derivative.
pub(super) fn initial_step<M, const N: usize>(
    model: &M,
    t: f64,
    y: &[f64; N],
    f0: &[f64; N],
    abs_tol: f64,
    rel_tol: f64,
    max_step: f64,
) -> f64
where
    M: DynamicsModel<N>,
{
    let zero = [0.0; N];
    let d0 = error_norm(y, &zero, y, abs_tol, rel_tol);
    let d1 = error_norm(f0, &zero, y, abs_tol, rel_tol);

    let h0 = if d0 < 1e-5 || d1 < 1e-5 {
        1e-6
    } else {
        0.01 * d0 / d1
    }
    .min(max_step);

    let y1 = stage(y, h0, &[(1.0, f0)]);
    let f1 = model.derivative(t + h0, &y1);
    let df: [f64; N] = std::array::from_fn(|i| f1[i] - f0[i]);
    let d2 = error_norm(&df, &zero, y, abs_tol, rel_tol) / h0;

    let h1 = if d1.max(d2) <= 1e-15 {
        (h0 * 1e-3).max(1e-6)
    } else {
        (0.01 / d1.max(d2)).powf(1.0 / 5.0)
    };

    (100.0 * h0).min(h1).min(max_step)
}
