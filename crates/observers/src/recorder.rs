use std::io::{self, Write};

use clockwork_animate::Frame;
use clockwork_core::Observer;

/// One player's state in one recorded frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Row {
    pub frame: usize,
    pub player: usize,
    pub position: f64,
    pub velocity: f64,
    pub bob: [f64; 2],
}

/// Records every frame an animation driver emits.
///
/// Pass it as the renderer to capture the full animation without drawing
/// anything, then write it out with [`write_csv`](Self::write_csv).
#[derive(Debug, Clone, Default)]
pub struct FrameRecorder {
    rows: Vec<Row>,
    frames: usize,
}

impl FrameRecorder {
    const HEADER: &'static str = "frame,player,position,velocity,bob_x,bob_y";

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the updates in a frame.
    pub fn record(&mut self, frame: &Frame) {
        self.frames += 1;
        self.rows.extend(frame.updates.iter().map(|update| Row {
            frame: frame.tick,
            player: update.player,
            position: update.state.position,
            velocity: update.state.velocity,
            bob: update.command.arm.bob,
        }));
    }

    /// Returns the recorded rows, one per player per frame.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the number of frames recorded.
    #[must_use]
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Writes the recorded rows as CSV with a header line.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn write_csv<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "{}", Self::HEADER)?;
        for row in &self.rows {
            writeln!(
                writer,
                "{},{},{},{},{},{}",
                row.frame, row.player, row.position, row.velocity, row.bob[0], row.bob[1]
            )?;
        }
        writer.flush()
    }
}

impl<A> Observer<Frame, A> for FrameRecorder {
    fn observe(&mut self, event: &Frame) -> Option<A> {
        self.record(event);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clockwork_animate::{AnimationDriver, TrajectoryPlayer};
    use clockwork_solvers::transient::SampledSolution;

    fn player(states: Vec<[f64; 2]>) -> TrajectoryPlayer {
        #[allow(clippy::cast_precision_loss)]
        let times = (0..states.len()).map(|i| i as f64).collect();
        TrajectoryPlayer::new(SampledSolution::from_samples(times, states).unwrap()).unwrap()
    }

    #[test]
    fn records_one_row_per_player_per_frame() {
        let mut driver = AnimationDriver::new([
            player(vec![[0.0, 1.0], [0.5, 0.5]]),
            player(vec![[0.0, -1.0]]),
        ])
        .unwrap();
        let mut recorder = FrameRecorder::new();

        driver.run(3, &mut recorder);

        assert_eq!(recorder.frames(), 3);
        assert_eq!(recorder.rows().len(), 6);

        let frames: Vec<(usize, usize)> = recorder
            .rows()
            .iter()
            .map(|row| (row.frame, row.player))
            .collect();
        assert_eq!(frames, vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]);

        // The first player wraps back to its first sample on the third frame.
        assert_eq!(recorder.rows()[4].velocity, 1.0);
        assert_eq!(recorder.rows()[2].position, 0.5);
    }

    #[test]
    fn writes_csv() {
        let mut driver = AnimationDriver::new([player(vec![[0.0, 1.0]])]).unwrap();
        let mut recorder = FrameRecorder::new();
        driver.run(2, &mut recorder);

        let mut buffer = Vec::new();
        recorder.write_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                "frame,player,position,velocity,bob_x,bob_y",
                "0,0,0,1,0,-1",
                "1,0,0,1,0,-1",
            ]
        );
    }

    #[test]
    fn empty_recorder_writes_header_only() {
        let mut buffer = Vec::new();
        FrameRecorder::new().write_csv(&mut buffer).unwrap();
        assert_eq!(buffer, b"frame,player,position,velocity,bob_x,bob_y\n");
    }
}
