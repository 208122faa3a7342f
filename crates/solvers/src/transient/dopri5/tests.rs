use super::*;

use std::{thread, time::Duration};

use approx::assert_relative_eq;
use clockwork_models::Pendulum;

// --- Test fixtures ---

/// Exponential decay: `y' = -y`.
struct Decay;

impl DynamicsModel<1> for Decay {
    fn derivative(&self, _t: f64, y: &[f64; 1]) -> [f64; 1] {
        [-y[0]]
    }
}

/// A model whose derivative is never finite.
struct Broken;

impl DynamicsModel<2> for Broken {
    fn derivative(&self, _t: f64, _y: &[f64; 2]) -> [f64; 2] {
        [f64::NAN, f64::NAN]
    }
}

/// Harmonic oscillator that sleeps on every evaluation.
struct Slow;

impl DynamicsModel<2> for Slow {
    fn derivative(&self, _t: f64, y: &[f64; 2]) -> [f64; 2] {
        thread::sleep(Duration::from_millis(1));
        [y[1], -y[0]]
    }
}

/// Closed-form solution of `p'' + k·p' + p = 0` from `p = 0, v = 1`.
fn damped(drag: f64, t: f64) -> [f64; 2] {
    let omega = (1.0 - drag * drag / 4.0).sqrt();
    let envelope = (-drag * t / 2.0).exp();
    let (sin, cos) = (omega * t).sin_cos();
    [
        envelope * sin / omega,
        envelope * (cos - drag / (2.0 * omega) * sin),
    ]
}

fn grid(duration: f64, rate: f64) -> SampleGrid {
    SampleGrid::from_si(duration, rate).expect("valid grid")
}

// --- Tests ---

#[test]
fn exponential_decay() {
    let grid = grid(5.0, 10.0);
    let solution = solve_unobserved(&Decay, [1.0], &grid, &Config::default()).unwrap();

    assert_eq!(solution.len(), 51);
    for (t, state) in solution.iter() {
        assert_relative_eq!(state[0], (-t).exp(), max_relative = 1e-7);
    }
}

#[test]
fn times_match_the_grid_exactly() {
    let grid = grid(3.0, 7.0);
    let config = Config::new(1e-3, 1e-6, 1_000).unwrap();
    let solution = solve_unobserved(&Pendulum::undamped(), [0.0, 1.0], &grid, &config).unwrap();

    assert_eq!(solution.len(), 22);
    assert_eq!(solution.times(), grid.times().collect::<Vec<_>>().as_slice());
}

#[test]
fn damped_pendulum_matches_reference_values() {
    let pendulum = Pendulum::new(0.1).unwrap();
    let grid = grid(10.0, 50.0);
    let solution = solve_unobserved(&pendulum, [0.0, 1.0], &grid, &Config::default()).unwrap();

    assert_eq!(solution.len(), 501);
    assert_eq!(solution.first(), Some(&[0.0, 1.0]));

    let expected = [
        (1, [0.019_978_681_352_509_45, 0.997_802_271_792_689_7]),
        (2, [0.039_909_462_052_770_86, 0.995_210_225_886_067_2]),
        (9, [0.177_427_936_703_692_06, 0.966_197_350_134_575_9]),
        (500, [-0.323_979_553_100_354_7, -0.496_810_863_596_984_56]),
    ];
    for (index, [position, velocity]) in expected {
        let state = solution.state(index).unwrap();
        assert_relative_eq!(state[0], position, epsilon = 1e-7);
        assert_relative_eq!(state[1], velocity, epsilon = 1e-7);
    }

    for (t, state) in solution.iter() {
        let exact = damped(0.1, t);
        assert_relative_eq!(state[0], exact[0], epsilon = 1e-7);
        assert_relative_eq!(state[1], exact[1], epsilon = 1e-7);
    }
}

#[test]
fn undamped_pendulum_conserves_energy() {
    let grid = grid(20.0, 25.0);
    let solution =
        solve_unobserved(&Pendulum::undamped(), [0.5, 0.0], &grid, &Config::default()).unwrap();

    for state in solution.states() {
        let energy = state[0] * state[0] + state[1] * state[1];
        assert_relative_eq!(energy, 0.25, epsilon = 1e-7);
    }
}

#[test]
fn single_sample_grid_skips_integration() {
    let grid = grid(0.01, 10.0);
    let solution = solve_unobserved(&Decay, [2.0], &grid, &Config::default()).unwrap();

    assert_eq!(solution.times(), &[0.0]);
    assert_eq!(solution.states(), &[[2.0]]);
    assert_eq!(solution.stats(), Stats::default());
}

#[test]
fn stats_count_every_evaluation() {
    let grid = grid(2.0, 20.0);
    let solution =
        solve_unobserved(&Pendulum::undamped(), [0.0, 1.0], &grid, &Config::default()).unwrap();

    let stats = solution.stats();
    assert!(stats.accepted >= 40, "never steps past a grid spacing");
    assert_eq!(
        stats.evaluations,
        2 + step::EVALUATIONS_PER_STEP * (stats.accepted + stats.rejected)
    );
}

#[test]
fn rejects_non_finite_initial_state() {
    let grid = grid(1.0, 10.0);
    let result = solve_unobserved(&Decay, [f64::NAN], &grid, &Config::default());
    assert_eq!(result.unwrap_err(), Error::NonFiniteInitialState);
}

#[test]
fn non_finite_derivative_is_an_error() {
    let grid = grid(1.0, 10.0);
    let result = solve_unobserved(&Broken, [0.0, 1.0], &grid, &Config::default());
    assert!(matches!(result, Err(Error::NonFinite { .. })));
}

#[test]
fn step_budget_is_enforced() {
    // Ten one-second intervals need far more than one step each at this
    // tolerance.
    let grid = grid(10.0, 1.0);
    let config = Config::new(1e-12, 1e-14, 3).unwrap();
    let result = solve_unobserved(&Pendulum::undamped(), [0.0, 1.0], &grid, &config);

    match result {
        Err(Error::MaxSteps { max_steps, time }) => {
            assert_eq!(max_steps, 3);
            assert!(time < 10.0);
        }
        other => panic!("expected MaxSteps, got {other:?}"),
    }
}

#[test]
fn step_budget_scales_with_the_grid() {
    // More intervals than `max_steps`, each needing about one step.
    let grid = grid(2100.0, 50.0);
    assert!(grid.len() > Config::default().max_steps());

    let solution = solve_unobserved(
        &Pendulum::new(0.1).unwrap(),
        [0.0, 1.0],
        &grid,
        &Config::default(),
    )
    .unwrap();

    assert_eq!(solution.len(), 105_001);
    assert_eq!(solution.times()[105_000], grid.end());
    assert!(solution.stats().accepted >= 105_000);
}

#[test]
fn time_limit_is_enforced() {
    let grid = grid(10.0, 50.0);
    let config = Config::default()
        .with_timeout(Duration::from_millis(1))
        .unwrap();

    // The two evaluations used to pick the first step already exceed the limit.
    let result = solve_unobserved(&Slow, [0.0, 1.0], &grid, &config);
    assert!(matches!(result, Err(Error::Timeout { time, .. }) if time == 0.0));
}

#[test]
fn observer_sees_accepted_steps() {
    let grid = grid(1.0, 10.0);
    let mut steps = Vec::new();

    solve(
        &Pendulum::undamped(),
        [0.0, 1.0],
        &grid,
        &Config::default(),
        |event: &Event<2>| {
            assert!(event.error <= 1.0);
            assert!(event.step_size > 0.0);
            steps.push((event.step, event.time));
            None
        },
    )
    .unwrap();

    assert!(!steps.is_empty());
    for (index, (step, _)) in steps.iter().enumerate() {
        assert_eq!(*step, index + 1);
    }
    assert!(steps.windows(2).all(|pair| pair[1].1 > pair[0].1));
    assert_eq!(steps.last().map(|&(_, time)| time), Some(1.0));
}

#[test]
fn observer_can_abort() {
    let grid = grid(10.0, 50.0);
    let observer = |event: &Event<2>| (event.step == 5).then_some(Action::Abort);

    let result = solve(
        &Pendulum::undamped(),
        [0.0, 1.0],
        &grid,
        &Config::default(),
        observer,
    );

    match result {
        Err(Error::Aborted { time }) => assert!(time > 0.0 && time < 10.0),
        other => panic!("expected Aborted, got {other:?}"),
    }
}
