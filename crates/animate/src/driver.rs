use std::borrow::{Borrow, BorrowMut};

use clockwork_core::{Observer, PhaseState};

use crate::{Error, TrajectoryPlayer, render::RenderCommand};

/// Control actions a renderer can return from a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop driving the animation after this frame.
    Stop,
}

/// One player's contribution to a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Update {
    /// Index of the player in the driver, in insertion order.
    pub player: usize,

    /// The state pulled from the player this tick.
    pub state: PhaseState,

    /// Render data for the state.
    pub command: RenderCommand,

    /// `true` if this pull started a new pass through the trajectory.
    pub restarted: bool,
}

/// Event emitted to the renderer once per tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// The tick number, starting at 0.
    pub tick: usize,

    /// One update per player, in insertion order.
    pub updates: Vec<Update>,
}

/// How a call to [`AnimationDriver::run`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// All requested frames were driven.
    Complete,

    /// The renderer returned [`Action::Stop`].
    StoppedByRenderer,
}

/// Result of a call to [`AnimationDriver::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Ticks driven during the call, including the one that was stopped.
    pub ticks: usize,

    pub status: Status,
}

/// Advances a set of players in lockstep and pushes each frame to a renderer.
///
/// On every tick the driver pulls one state from each player in insertion
/// order, pushes it back as the player's marker, and hands the resulting
/// render data to the renderer as a single [`Frame`]. Players with different
/// lengths loop at their own periods.
///
/// Players are held through [`BorrowMut`], so the driver can own them or
/// borrow them mutably.
#[derive(Debug)]
pub struct AnimationDriver<P = TrajectoryPlayer> {
    players: Vec<P>,
    frame: Frame,
    ticks: usize,
}

impl<P> AnimationDriver<P>
where
    P: BorrowMut<TrajectoryPlayer>,
{
    /// Creates a driver over `players`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoPlayers`] if `players` is empty.
    pub fn new(players: impl IntoIterator<Item = P>) -> Result<Self, Error> {
        let players: Vec<P> = players.into_iter().collect();
        if players.is_empty() {
            return Err(Error::NoPlayers);
        }

        let driver = Self {
            frame: Frame {
                tick: 0,
                updates: Vec::with_capacity(players.len()),
            },
            players,
            ticks: 0,
        };

        tracing::debug!(
            players = driver.players.len(),
            frame_count = driver.frame_count(),
            "created animation driver"
        );

        Ok(driver)
    }

    /// Advances every player by one state and emits a frame to `renderer`.
    ///
    /// Returns the renderer's action for this frame.
    pub fn tick<R>(&mut self, renderer: &mut R) -> Option<Action>
    where
        R: Observer<Frame, Action>,
    {
        self.frame.tick = self.ticks;
        self.frame.updates.clear();

        for (index, player) in self.players.iter_mut().enumerate() {
            let player: &mut TrajectoryPlayer = player.borrow_mut();
            let restarted = player.is_exhausted();
            let state = player.next_state();
            let command = player.set_marker(state);

            self.frame.updates.push(Update {
                player: index,
                state,
                command,
                restarted,
            });
        }
        debug_assert_eq!(self.frame.updates.len(), self.players.len());

        self.ticks += 1;
        renderer.observe(&self.frame)
    }

    /// Drives up to `frames` ticks, stopping early if the renderer asks to.
    pub fn run<R>(&mut self, frames: usize, renderer: &mut R) -> Summary
    where
        R: Observer<Frame, Action>,
    {
        for driven in 1..=frames {
            if let Some(Action::Stop) = self.tick(renderer) {
                tracing::debug!(ticks = driven, total = self.ticks, "renderer stopped animation");
                return Summary {
                    ticks: driven,
                    status: Status::StoppedByRenderer,
                };
            }
        }

        tracing::debug!(ticks = frames, total = self.ticks, "finished animation run");
        Summary {
            ticks: frames,
            status: Status::Complete,
        }
    }

    /// Returns the number of frames needed for every player to play its
    /// trajectory at least once.
    ///
    /// This is the length of the longest trajectory.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.players()
            .map(TrajectoryPlayer::len)
            .max()
            .unwrap_or_default()
    }

    /// Returns the number of ticks driven so far.
    #[must_use]
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Returns the most recently emitted frame.
    ///
    /// Before the first tick the frame has no updates.
    #[must_use]
    pub fn last_frame(&self) -> &Frame {
        &self.frame
    }

    /// Returns the number of players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Always `false`: a driver has at least one player.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the player at `index`.
    #[must_use]
    pub fn player(&self, index: usize) -> Option<&TrajectoryPlayer> {
        self.players.get(index).map(<P as Borrow<TrajectoryPlayer>>::borrow)
    }

    /// Returns an iterator over the players in insertion order.
    pub fn players(&self) -> impl ExactSizeIterator<Item = &TrajectoryPlayer> {
        self.players.iter().map(<P as Borrow<TrajectoryPlayer>>::borrow)
    }

    /// Consumes the driver and returns its players.
    #[must_use]
    pub fn into_players(self) -> Vec<P> {
        self.players
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::rc::Rc;

    use clockwork_solvers::transient::SampledSolution;

    fn player(len: usize) -> TrajectoryPlayer {
        #[allow(clippy::cast_precision_loss)]
        let (times, states): (Vec<f64>, Vec<[f64; 2]>) = (0..len)
            .map(|i| (i as f64, [i as f64, 0.0]))
            .unzip();
        TrajectoryPlayer::new(SampledSolution::from_samples(times, states).unwrap()).unwrap()
    }

    #[test]
    fn rejects_no_players() {
        let result = AnimationDriver::<TrajectoryPlayer>::new(Vec::new());
        assert_eq!(result.unwrap_err(), Error::NoPlayers);
    }

    #[test]
    fn players_loop_at_their_own_periods() {
        let mut driver = AnimationDriver::new([player(100), player(150)]).unwrap();
        assert_eq!(driver.frame_count(), 150);

        let summary = driver.run(300, &mut ());
        assert_eq!(
            summary,
            Summary {
                ticks: 300,
                status: Status::Complete
            }
        );
        assert_eq!(driver.ticks(), 300);

        let cycles: Vec<usize> = driver.players().map(TrajectoryPlayer::cycles).collect();
        assert_eq!(cycles, vec![3, 2]);

        // Both players are exhausted, so the next tick starts them over.
        driver.tick(&mut ());
        for update in &driver.last_frame().updates {
            assert!(update.restarted);
            assert_eq!(update.state, PhaseState::ORIGIN);
        }
    }

    #[test]
    fn frames_carry_one_update_per_player() {
        let mut driver = AnimationDriver::new([player(2), player(3)]).unwrap();
        let mut seen = Vec::new();

        driver.run(4, &mut |frame: &Frame| {
            let positions: Vec<f64> = frame
                .updates
                .iter()
                .map(|update| update.state.position)
                .collect();
            seen.push((frame.tick, positions));
            None
        });

        assert_eq!(
            seen,
            vec![
                (0, vec![0.0, 0.0]),
                (1, vec![1.0, 1.0]),
                (2, vec![0.0, 2.0]),
                (3, vec![1.0, 0.0]),
            ]
        );
    }

    #[test]
    fn markers_follow_pulled_states() {
        let mut driver = AnimationDriver::new([player(5)]).unwrap();
        driver.run(3, &mut ());

        let update = driver.last_frame().updates[0];
        assert_eq!(update.player, 0);
        assert_eq!(update.command.marker, update.state);
        assert_eq!(driver.player(0).map(TrajectoryPlayer::marker), Some(update.state));
        assert_eq!(update.state.position, 2.0);
    }

    #[test]
    fn renderer_can_stop() {
        let mut driver = AnimationDriver::new([player(10)]).unwrap();
        let mut renderer = |frame: &Frame| (frame.tick == 4).then_some(Action::Stop);

        let summary = driver.run(100, &mut renderer);
        assert_eq!(summary.ticks, 5);
        assert_eq!(summary.status, Status::StoppedByRenderer);
        assert_eq!(driver.ticks(), 5);
    }

    #[test]
    fn works_over_borrowed_players() {
        let solution = Rc::clone(player(4).solution());
        let mut first = TrajectoryPlayer::new(Rc::clone(&solution)).unwrap();
        let mut second = TrajectoryPlayer::new(solution).unwrap();

        {
            let mut driver = AnimationDriver::new([&mut first, &mut second]).unwrap();
            driver.run(6, &mut ());
        }

        assert_eq!(first.cycles(), 1);
        assert_eq!(first.position(), 2);
        assert_eq!(second.current_state(), first.current_state());
    }
}
