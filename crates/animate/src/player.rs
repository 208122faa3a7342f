use std::rc::Rc;

use clockwork_core::PhaseState;
use clockwork_solvers::transient::SampledSolution;

use crate::{
    Error,
    render::{ArmGeometry, RenderCommand, render_command},
};

/// Plays a sampled trajectory one state at a time, looping forever.
///
/// Each pull returns the sample at the cursor and advances it. After the last
/// sample is returned the player is exhausted, and the next pull quietly
/// starts a new pass from the first sample, so the k-th pull (counting from
/// one) always returns sample `(k - 1) mod len`.
///
/// The player shares its solution read-only, so several players can replay
/// the same trajectory independently.
///
/// A player also remembers a marker state pushed to it from outside. The
/// marker is what a renderer highlights and is independent of the cursor.
#[derive(Debug, Clone)]
pub struct TrajectoryPlayer {
    solution: Rc<SampledSolution<2>>,
    geometry: ArmGeometry,
    cursor: usize,
    current: PhaseState,
    marker: PhaseState,
    cycles: usize,
}

impl TrajectoryPlayer {
    /// Creates a player positioned at the first sample of `solution`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySolution`] if the solution has no samples.
    pub fn new(solution: impl Into<Rc<SampledSolution<2>>>) -> Result<Self, Error> {
        let solution = solution.into();
        let first = solution
            .first()
            .map(|&state| PhaseState::from(state))
            .ok_or(Error::EmptySolution)?;

        Ok(Self {
            solution,
            geometry: ArmGeometry::default(),
            cursor: 0,
            current: first,
            marker: first,
            cycles: 0,
        })
    }

    /// Returns this player with a different arm geometry for its render data.
    #[must_use]
    pub fn with_geometry(self, geometry: ArmGeometry) -> Self {
        Self { geometry, ..self }
    }

    /// Returns the next state and advances the cursor.
    ///
    /// Never fails: an exhausted player starts a new pass.
    pub fn next_state(&mut self) -> PhaseState {
        let len = self.len();
        if self.cursor == len {
            tracing::debug!(samples = len, cycles = self.cycles, "restarting trajectory");
            self.cursor = 0;
        }

        let state = PhaseState::from(self.solution.states()[self.cursor]);
        self.cursor += 1;
        if self.cursor == len {
            self.cycles += 1;
        }

        self.current = state;
        state
    }

    /// Returns the most recently pulled state, or the first sample if nothing
    /// has been pulled since the player was created or restarted.
    #[must_use]
    pub fn current_state(&self) -> PhaseState {
        self.current
    }

    /// Records a display state and returns the render data for it.
    pub fn set_marker(&mut self, state: PhaseState) -> RenderCommand {
        self.marker = state;
        render_command(state, &self.geometry)
    }

    /// Returns the last marker state pushed with [`set_marker`](Self::set_marker).
    #[must_use]
    pub fn marker(&self) -> PhaseState {
        self.marker
    }

    /// Returns the number of completed passes through the trajectory.
    #[must_use]
    pub fn cycles(&self) -> usize {
        self.cycles
    }

    /// Rewinds to the first sample.
    ///
    /// The completed pass count and the marker are kept.
    pub fn restart(&mut self) {
        self.cursor = 0;
        self.current = PhaseState::from(self.solution.states()[0]);
    }

    /// Returns the number of samples in one pass.
    #[must_use]
    pub fn len(&self) -> usize {
        self.solution.len()
    }

    /// Always `false`: players are never built from empty solutions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns how many samples of the current pass have been pulled.
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Returns `true` if no sample of the current pass has been pulled.
    #[must_use]
    pub fn is_fresh(&self) -> bool {
        self.cursor == 0
    }

    /// Returns `true` if the last sample was just pulled.
    ///
    /// The next pull starts a new pass.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.cursor == self.len()
    }

    /// Returns the trajectory being played.
    #[must_use]
    pub fn solution(&self) -> &Rc<SampledSolution<2>> {
        &self.solution
    }

    /// Returns the arm geometry used for render data.
    #[must_use]
    pub fn geometry(&self) -> &ArmGeometry {
        &self.geometry
    }
}

/// An endless stream of states; `next` never returns `None`.
impl Iterator for TrajectoryPlayer {
    type Item = PhaseState;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_state())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    /// A trajectory of `len` samples where sample `i` is `(i, -i)`.
    fn ramp(len: usize) -> SampledSolution<2> {
        #[allow(clippy::cast_precision_loss)]
        let (times, states): (Vec<f64>, Vec<[f64; 2]>) = (0..len)
            .map(|i| {
                let x = i as f64;
                (x * 0.1, [x, -x])
            })
            .unzip();
        SampledSolution::from_samples(times, states).unwrap()
    }

    #[test]
    fn rejects_empty_solution() {
        let empty = SampledSolution::<2>::from_samples(Vec::new(), Vec::new()).unwrap();
        assert_eq!(TrajectoryPlayer::new(empty).unwrap_err(), Error::EmptySolution);
    }

    #[test]
    fn starts_fresh_at_first_sample() {
        let player = TrajectoryPlayer::new(ramp(3)).unwrap();

        assert!(player.is_fresh());
        assert!(!player.is_exhausted());
        assert_eq!(player.position(), 0);
        assert_eq!(player.current_state(), PhaseState::new(0.0, 0.0));
        assert_eq!(player.marker(), PhaseState::new(0.0, 0.0));
        assert_eq!(player.cycles(), 0);
    }

    #[test]
    fn pulls_wrap_around() {
        let mut player = TrajectoryPlayer::new(ramp(3)).unwrap();

        let positions: Vec<f64> = (0..7).map(|_| player.next_state().position).collect();
        assert_eq!(positions, vec![0.0, 1.0, 2.0, 0.0, 1.0, 2.0, 0.0]);
        assert_eq!(player.cycles(), 2);
        assert_eq!(player.current_state(), PhaseState::new(0.0, 0.0));
    }

    #[test]
    fn exhaustion_and_restart_states() {
        let mut player = TrajectoryPlayer::new(ramp(2)).unwrap();

        player.next_state();
        assert!(!player.is_fresh());
        assert!(!player.is_exhausted());

        player.next_state();
        assert!(player.is_exhausted());
        assert_eq!(player.cycles(), 1);

        // The restart happens on the next pull.
        assert_eq!(player.next_state(), PhaseState::new(0.0, 0.0));
        assert_eq!(player.position(), 1);
    }

    #[test]
    fn single_sample_repeats() {
        let mut player = TrajectoryPlayer::new(ramp(1)).unwrap();

        for pull in 1..=4 {
            assert_eq!(player.next_state(), PhaseState::ORIGIN);
            assert_eq!(player.cycles(), pull);
        }
    }

    #[test]
    fn iterator_never_ends() {
        let player = TrajectoryPlayer::new(ramp(4)).unwrap();
        assert_eq!(player.size_hint(), (usize::MAX, None));

        let states: Vec<PhaseState> = player.take(10).collect();
        assert_eq!(states.len(), 10);
        assert_eq!(states[9], PhaseState::new(1.0, -1.0));
    }

    #[test]
    fn marker_is_independent_of_cursor() {
        let mut player = TrajectoryPlayer::new(ramp(5)).unwrap();
        player.next_state();

        let pushed = PhaseState::new(0.25, 0.5);
        let command = player.set_marker(pushed);

        assert_eq!(player.marker(), pushed);
        assert_eq!(command.marker, pushed);
        assert_eq!(player.position(), 1);
        assert_eq!(player.current_state(), PhaseState::ORIGIN);
    }

    #[test]
    fn marker_uses_player_geometry() {
        let geometry = ArmGeometry::new(1.0, [0.0, 0.0]);
        let mut player = TrajectoryPlayer::new(ramp(2))
            .unwrap()
            .with_geometry(geometry);

        let command = player.set_marker(PhaseState::ORIGIN);
        assert_relative_eq!(command.arm.bob[1], -1.0);
        assert_eq!(player.geometry(), &geometry);
    }

    #[test]
    fn restart_rewinds_but_keeps_cycles() {
        let mut player = TrajectoryPlayer::new(ramp(2)).unwrap();
        player.next_state();
        player.next_state();
        player.next_state();

        player.restart();
        assert!(player.is_fresh());
        assert_eq!(player.cycles(), 1);
        assert_eq!(player.current_state(), PhaseState::ORIGIN);
        assert_eq!(player.next_state(), PhaseState::ORIGIN);
    }

    #[test]
    fn players_share_a_solution() {
        let solution = Rc::new(ramp(3));
        let mut first = TrajectoryPlayer::new(Rc::clone(&solution)).unwrap();
        let second = TrajectoryPlayer::new(Rc::clone(&solution)).unwrap();

        first.next_state();
        first.next_state();

        assert_eq!(second.position(), 0);
        assert!(Rc::ptr_eq(first.solution(), second.solution()));
        assert_eq!(Rc::strong_count(&solution), 3);
    }
}
